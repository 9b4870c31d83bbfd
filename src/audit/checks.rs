//! The audit check battery.
//!
//! Each check reads the project and appends findings to the report. Checks
//! are independent; their order only affects report ordering.

use tracing::debug;

use super::AuditReport;
use crate::config::AuditConfig;
use crate::graph::{dependent_counts, resource_groups, root_task_count};
use crate::models::{
    Bottleneck, ComplianceIssue, Project, ResourceConflict, Risk, RiskCategory, Severity, Standard,
};
use crate::validation::{detect_cycles, find_dangling_dependencies};

/// Dependents at or above which a bottleneck is rated high.
const SEVERE_BOTTLENECK_DEPENDENTS: usize = 5;

/// Every dependency id must name a task in the project.
pub(super) fn dependency_validity(project: &Project, report: &mut AuditReport) {
    let dangling = find_dangling_dependencies(project);
    debug!(count = dangling.len(), "dangling dependencies");

    for d in dangling {
        report.risks.push(Risk::for_task(
            Severity::High,
            RiskCategory::Dependency,
            d.task_id,
            format!(
                "Task '{}' depends on non-existent task '{}'",
                d.task_id, d.dependency_id
            ),
            "Remove the invalid dependency or add the missing task",
        ));
    }
}

/// Circular dependencies make the project unschedulable.
pub(super) fn cycles(project: &Project, report: &mut AuditReport) {
    let cycles = detect_cycles(project);
    debug!(count = cycles.len(), "dependency cycles");

    for task_id in cycles {
        report.risks.push(Risk::for_task(
            Severity::Critical,
            RiskCategory::Cycle,
            task_id.as_str(),
            format!("Circular dependency detected involving task '{task_id}'"),
            "Break the cycle by removing or re-sequencing one of its dependencies",
        ));
    }
}

/// Duration sanity plus the sum-of-durations timeline test.
///
/// The timeline test compares the *sum* of all durations, not the critical
/// path, against the calendar window. Parallel work is not credited.
pub(super) fn schedule_feasibility(
    project: &Project,
    config: &AuditConfig,
    report: &mut AuditReport,
) {
    for task in &project.tasks {
        if task.duration_days < config.min_task_duration_days {
            report.risks.push(Risk::for_task(
                Severity::Medium,
                RiskCategory::Schedule,
                task.id.as_str(),
                format!(
                    "Task '{}' duration of {} days is unrealistically short",
                    task.id, task.duration_days
                ),
                "Verify the estimate; very short tasks often hide setup and inspection time",
            ));
        } else if task.duration_days > config.max_task_duration_days {
            report.risks.push(Risk::for_task(
                Severity::Medium,
                RiskCategory::Schedule,
                task.id.as_str(),
                format!(
                    "Task '{}' duration of {} days is unrealistically long, consider splitting",
                    task.id, task.duration_days
                ),
                "Split the task into smaller work packages with their own milestones",
            ));
        }
    }

    if let Some(target_end) = project.target_end_date {
        let total_duration = project.total_duration();
        let available_days = (target_end - project.start_date).num_days() as f64;
        debug!(total_duration, available_days, "timeline check");

        if total_duration > config.timeline_utilization_limit * available_days {
            report.risks.push(Risk::for_project(
                Severity::High,
                RiskCategory::Schedule,
                format!(
                    "Tight timeline: {total_duration:.1} task-days of work against {available_days:.0} available days"
                ),
                "Add schedule buffer, increase parallel work, or extend the target end date",
            ));
        }
    }
}

/// Shared-resource contention and tasks without resources.
pub(super) fn resource_allocation(
    project: &Project,
    config: &AuditConfig,
    report: &mut AuditReport,
) {
    for ((kind, name), task_ids) in resource_groups(project) {
        if task_ids.len() > config.resource_conflict_threshold {
            report.resource_conflicts.push(ResourceConflict {
                severity: Severity::Medium,
                resource_kind: kind,
                description: format!(
                    "{kind} resource '{name}' is required by {} tasks",
                    task_ids.len()
                ),
                resource_name: name,
                task_ids,
            });
        }
    }

    for task in project.tasks.iter().filter(|t| t.resources.is_empty()) {
        report.risks.push(Risk::for_task(
            Severity::Medium,
            RiskCategory::Resource,
            task.id.as_str(),
            format!("Task '{}' has no resources assigned", task.id),
            "Assign the labor, equipment, and material the task needs",
        ));
    }
}

/// Safety requirements for high-risk work and a project-wide quality regime.
pub(super) fn compliance(project: &Project, config: &AuditConfig, report: &mut AuditReport) {
    for task in &project.tasks {
        if !task.compliance_requirements.is_empty() {
            continue;
        }
        if let Some(activity) = task.first_mentioned(&config.high_risk_keywords) {
            report.compliance_issues.push(ComplianceIssue::for_task(
                Severity::High,
                Standard::Osha,
                task.id.as_str(),
                format!(
                    "Task '{}' involves high-risk activity ({activity}) but has no compliance requirements",
                    task.id
                ),
                "Add OSHA safety requirements and a site-specific safety plan",
            ));
        }
    }

    // Only judged once some task declares requirements at all.
    let mut requirements = project
        .tasks
        .iter()
        .flat_map(|t| t.compliance_requirements.iter())
        .peekable();
    let has_requirements = requirements.peek().is_some();
    let mentions_quality = requirements.any(|r| r.to_lowercase().contains("quality"));

    if has_requirements && !mentions_quality {
        report.compliance_issues.push(ComplianceIssue::for_project(
            Severity::Medium,
            Standard::Iso9001,
            "No quality management requirements are defined for the project",
            "Add ISO 9001 quality control checkpoints to key tasks",
        ));
    }
}

/// Tasks many others wait on, and projects with too little sequencing.
pub(super) fn bottlenecks(project: &Project, config: &AuditConfig, report: &mut AuditReport) {
    for (task, count) in project.tasks.iter().zip(dependent_counts(project)) {
        if count >= config.bottleneck_threshold {
            let severity = if count >= SEVERE_BOTTLENECK_DEPENDENTS {
                Severity::High
            } else {
                Severity::Medium
            };
            report.bottlenecks.push(Bottleneck {
                severity,
                task_id: task.id.clone(),
                dependent_count: count,
                description: format!(
                    "Task '{}' is a bottleneck: {count} tasks depend on it",
                    task.id
                ),
            });
        }
    }

    let roots = root_task_count(project);
    if roots > config.parallel_task_warning {
        report.risks.push(Risk::for_project(
            Severity::Low,
            RiskCategory::Structure,
            format!("{roots} tasks have no dependencies; many parallelizable tasks, review project logic"),
            "Confirm that missing dependencies are intentional",
        ));
    }
}

/// Total cost against the approved budget.
pub(super) fn budget_alignment(project: &Project, config: &AuditConfig, report: &mut AuditReport) {
    if project.budget <= 0.0 {
        return;
    }
    let total_cost = project.total_cost();
    let ratio = total_cost / project.budget;
    let percent = ratio * 100.0;
    debug!(total_cost, budget = project.budget, ratio, "budget check");

    if ratio > 1.0 {
        report.risks.push(Risk::for_project(
            Severity::Critical,
            RiskCategory::Budget,
            format!(
                "Budget exceeded: total cost {total_cost:.2} is {percent:.1}% of budget {:.2}",
                project.budget
            ),
            "Reduce scope, value-engineer materials, or secure additional funding",
        ));
    } else if ratio > config.budget_warning_ratio {
        report.risks.push(Risk::for_project(
            Severity::High,
            RiskCategory::Budget,
            format!("Total cost is {percent:.1}% of budget, leaving little contingency"),
            "Establish a contingency reserve of 5-15% of the budget",
        ));
    }
}

/// Tasks whose own risk estimate is high.
pub(super) fn task_risk(project: &Project, config: &AuditConfig, report: &mut AuditReport) {
    for task in &project.tasks {
        if task.risk_level > config.task_risk_threshold {
            report.risks.push(Risk::for_task(
                Severity::High,
                RiskCategory::Task,
                task.id.as_str(),
                format!("Task '{}' has a high risk level of {:.2}", task.id, task.risk_level),
                "Prepare a task-specific risk mitigation plan",
            ));
        }
    }
}
