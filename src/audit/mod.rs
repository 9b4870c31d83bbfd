//! Project auditor.
//!
//! Runs a fixed battery of structural, schedule, resource, compliance, and
//! budget checks over a project and produces a scored [`AuditReport`].
//!
//! # Checks (in report order)
//!
//! 1. Dependency validity (dangling ids)
//! 2. Cycle detection
//! 3. Schedule feasibility
//! 4. Resource allocation
//! 5. Compliance
//! 6. Bottlenecks
//! 7. Budget alignment
//! 8. Task-level risk
//!
//! # Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use u_project_audit::audit::Auditor;
//! use u_project_audit::models::{Project, Resource, Task};
//!
//! let crew = || Resource::labor("L1").with_name("Crew").with_quantity(1.0, "day").with_cost(800.0);
//! let project = Project::new("P1", Utc.with_ymd_and_hms(2026, 5, 4, 0, 0, 0).unwrap())
//!     .with_task(Task::new("T1", 10.0).with_resource(crew()))
//!     .with_task(Task::new("T2", 15.0).with_dependency("T1").with_resource(crew()));
//!
//! let report = Auditor::new().audit(&project).unwrap();
//! assert_eq!(report.overall_score, 100.0);
//! ```

mod checks;
mod scoring;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AuditConfig;
use crate::error::EngineResult;
use crate::models::{
    Bottleneck, ComplianceIssue, Project, Recommendation, ResourceConflict, Risk, Severity,
};
use crate::validation::validate_project;

/// Result of an audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    /// Audited project ID.
    pub project_id: String,
    /// Wall-clock time of the audit. Not part of the deterministic result.
    pub audited_at: DateTime<Utc>,
    /// Score in `[0, 100]`; 100 means no findings.
    pub overall_score: f64,
    pub risks: Vec<Risk>,
    pub compliance_issues: Vec<ComplianceIssue>,
    pub bottlenecks: Vec<Bottleneck>,
    pub resource_conflicts: Vec<ResourceConflict>,
    pub recommendations: Vec<Recommendation>,
}

/// Finding counts by severity across all finding kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditSummary {
    pub total: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl AuditReport {
    /// Creates an empty report stamped with the current time.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            audited_at: Utc::now(),
            overall_score: 100.0,
            risks: Vec::new(),
            compliance_issues: Vec::new(),
            bottlenecks: Vec::new(),
            resource_conflicts: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Whether the audit produced no findings.
    pub fn is_clean(&self) -> bool {
        self.risks.is_empty()
            && self.compliance_issues.is_empty()
            && self.bottlenecks.is_empty()
            && self.resource_conflicts.is_empty()
    }

    /// Counts findings by severity.
    pub fn summary(&self) -> AuditSummary {
        let severities = self
            .risks
            .iter()
            .map(|r| r.severity)
            .chain(self.compliance_issues.iter().map(|i| i.severity))
            .chain(self.bottlenecks.iter().map(|b| b.severity))
            .chain(self.resource_conflicts.iter().map(|c| c.severity));

        let mut summary = AuditSummary::default();
        for severity in severities {
            summary.total += 1;
            match severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }
        summary
    }

    /// Risks at or above `severity`.
    pub fn risks_at_least(&self, severity: Severity) -> impl Iterator<Item = &Risk> {
        self.risks.iter().filter(move |r| r.severity >= severity)
    }
}

/// Stateless project auditor.
#[derive(Debug, Clone, Default)]
pub struct Auditor {
    config: AuditConfig,
}

impl Auditor {
    /// Creates an auditor with the standard thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an auditor with custom thresholds.
    pub fn with_config(config: AuditConfig) -> Self {
        Self { config }
    }

    /// Audits a project.
    ///
    /// Cycles, dangling dependencies, and missing resources are reported as
    /// findings. The project is never modified.
    ///
    /// # Errors
    /// [`EngineError::DuplicateTaskId`](crate::error::EngineError::DuplicateTaskId)
    /// if two tasks share an id.
    pub fn audit(&self, project: &Project) -> EngineResult<AuditReport> {
        validate_project(project)?;

        let mut report = AuditReport::new(&project.id);

        checks::dependency_validity(project, &mut report);
        checks::cycles(project, &mut report);
        checks::schedule_feasibility(project, &self.config, &mut report);
        checks::resource_allocation(project, &self.config, &mut report);
        checks::compliance(project, &self.config, &mut report);
        checks::bottlenecks(project, &self.config, &mut report);
        checks::budget_alignment(project, &self.config, &mut report);
        checks::task_risk(project, &self.config, &mut report);

        report.overall_score = scoring::overall_score(&report);
        report.recommendations = scoring::recommendations(&report);

        info!(
            project = %project.id,
            score = report.overall_score,
            risks = report.risks.len(),
            compliance_issues = report.compliance_issues.len(),
            bottlenecks = report.bottlenecks.len(),
            resource_conflicts = report.resource_conflicts.len(),
            "audit complete"
        );

        Ok(report)
    }
}
