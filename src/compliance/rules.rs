//! Built-in standards rules.
//!
//! - **ISO 19650**: BIM information management
//! - **OSHA**: construction safety (29 CFR 1926)
//! - **PMBOK**: project management baseline

use super::ComplianceRule;
use crate::config::HIGH_RISK_ACTIVITIES;
use crate::models::{ComplianceIssue, Project, Severity, Standard};

/// ISO 19650 BIM information management.
///
/// Requires the project to declare its BIM maturity level under the
/// `"bim_level"` metadata key.
#[derive(Debug, Clone, Copy)]
pub struct Iso19650;

impl ComplianceRule for Iso19650 {
    fn standard(&self) -> Standard {
        Standard::Iso19650
    }

    fn check_compliance(&self, project: &Project) -> Vec<ComplianceIssue> {
        if project.metadata.contains_key("bim_level") {
            return Vec::new();
        }
        vec![ComplianceIssue::for_project(
            Severity::Medium,
            Standard::Iso19650,
            "Project does not declare a BIM maturity level (bim_level)",
            "Record the BIM level and set up a common data environment",
        )]
    }

    fn description(&self) -> &'static str {
        "BIM information management"
    }
}

/// OSHA construction safety.
///
/// Every task involving a high-risk activity must list at least one
/// compliance requirement.
#[derive(Debug, Clone, Copy)]
pub struct Osha;

impl ComplianceRule for Osha {
    fn standard(&self) -> Standard {
        Standard::Osha
    }

    fn check_compliance(&self, project: &Project) -> Vec<ComplianceIssue> {
        project
            .tasks
            .iter()
            .filter(|t| t.compliance_requirements.is_empty())
            .filter_map(|t| {
                t.first_mentioned(&HIGH_RISK_ACTIVITIES).map(|activity| {
                    ComplianceIssue::for_task(
                        Severity::High,
                        Standard::Osha,
                        t.id.as_str(),
                        format!(
                            "Task '{}' involves {activity} but lists no safety requirements",
                            t.id
                        ),
                        "Document the applicable OSHA 1926 requirements and a safety plan",
                    )
                })
            })
            .collect()
    }

    fn description(&self) -> &'static str {
        "Construction safety"
    }
}

/// PMBOK project management baseline.
///
/// Checks for a committed end date, an approved budget, and a dependency
/// network that links most tasks.
#[derive(Debug, Clone, Copy)]
pub struct Pmbok;

impl ComplianceRule for Pmbok {
    fn standard(&self) -> Standard {
        Standard::Pmbok
    }

    fn check_compliance(&self, project: &Project) -> Vec<ComplianceIssue> {
        let mut issues = Vec::new();

        if project.target_end_date.is_none() {
            issues.push(ComplianceIssue::for_project(
                Severity::High,
                Standard::Pmbok,
                "Project has no target end date",
                "Set a baseline completion date in the schedule",
            ));
        }

        if project.budget == 0.0 {
            issues.push(ComplianceIssue::for_project(
                Severity::High,
                Standard::Pmbok,
                "Project has no approved budget",
                "Establish a cost baseline before execution",
            ));
        }

        // The first task is expected to start the network.
        let unlinked = project
            .tasks
            .iter()
            .skip(1)
            .filter(|t| !t.has_dependencies())
            .count();
        if unlinked as f64 > project.tasks.len() as f64 / 2.0 {
            issues.push(ComplianceIssue::for_project(
                Severity::Medium,
                Standard::Pmbok,
                format!("{unlinked} tasks have no dependencies; the schedule network is incomplete"),
                "Define predecessor relationships for all activities",
            ));
        }

        issues
    }

    fn description(&self) -> &'static str {
        "Project management baseline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use chrono::{Duration, TimeZone, Utc};

    fn baseline() -> Project {
        let start = Utc.with_ymd_and_hms(2026, 7, 6, 0, 0, 0).unwrap();
        Project::new("P", start)
            .with_target_end(start + Duration::days(90))
            .with_budget(100_000.0)
            .with_metadata("bim_level", serde_json::json!(2))
    }

    #[test]
    fn test_iso19650() {
        assert!(Iso19650.check_compliance(&baseline()).is_empty());

        let mut p = baseline();
        p.metadata.clear();
        let issues = Iso19650.check_compliance(&p);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_iso19650_any_value_counts() {
        let p = baseline().with_metadata("bim_level", serde_json::Value::Null);
        assert!(Iso19650.check_compliance(&p).is_empty());
    }

    #[test]
    fn test_osha() {
        let p = baseline()
            .with_task(Task::new("T1", 5.0).with_name("Electrical rough-in"))
            .with_task(Task::new("T2", 5.0).with_description("Confined space entry"))
            .with_task(
                Task::new("T3", 5.0)
                    .with_name("Demolition")
                    .with_requirement("OSHA 1926 Subpart T"),
            )
            .with_task(Task::new("T4", 5.0).with_name("Painting"));
        let issues = Osha.check_compliance(&p);
        let ids: Vec<_> = issues.iter().filter_map(|i| i.task_id.as_deref()).collect();
        assert_eq!(ids, vec!["T1", "T2"]);
        assert!(issues.iter().all(|i| i.severity == Severity::High));
    }

    #[test]
    fn test_osha_keyword_must_sit_in_one_field() {
        let split = baseline().with_task(
            Task::new("T1", 5.0)
                .with_name("Steel")
                .with_description("Erection"),
        );
        assert!(Osha.check_compliance(&split).is_empty());

        let whole = baseline().with_task(
            Task::new("T1", 5.0)
                .with_name("Frame")
                .with_description("Steel erection, level 3"),
        );
        assert_eq!(Osha.check_compliance(&whole).len(), 1);
    }

    #[test]
    fn test_pmbok_missing_baseline() {
        let start = Utc.with_ymd_and_hms(2026, 7, 6, 0, 0, 0).unwrap();
        let issues = Pmbok.check_compliance(&Project::new("P", start));
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.severity == Severity::High));
    }

    #[test]
    fn test_pmbok_unlinked_tasks() {
        // 4 tasks, 3 after the first without dependencies: 3 > 2
        let p = baseline()
            .with_task(Task::new("A", 1.0))
            .with_task(Task::new("B", 1.0))
            .with_task(Task::new("C", 1.0))
            .with_task(Task::new("D", 1.0));
        let issues = Pmbok.check_compliance(&p);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);

        // 2 unlinked of 4 is not more than half
        let p = baseline()
            .with_task(Task::new("A", 1.0))
            .with_task(Task::new("B", 1.0))
            .with_task(Task::new("C", 1.0))
            .with_task(Task::new("D", 1.0).with_dependency("A"));
        assert!(Pmbok.check_compliance(&p).is_empty());
    }
}
