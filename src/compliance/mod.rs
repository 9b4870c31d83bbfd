//! Standards compliance checking.
//!
//! A fixed, ordered set of rules ([`rules::Iso19650`], [`rules::Osha`],
//! [`rules::Pmbok`]) each inspects the project and reports issues. The
//! checker concatenates them in rule order and tallies severities.
//!
//! # Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use u_project_audit::compliance::ComplianceChecker;
//! use u_project_audit::models::Project;
//!
//! let project = Project::new("P1", Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap());
//! let result = ComplianceChecker::new().check_all(&project).unwrap();
//!
//! assert_eq!(result.standards_checked, vec!["ISO 19650", "OSHA", "PMBOK"]);
//! assert_eq!(result.summary.total, 3); // no bim_level, no end date, no budget
//! ```

pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, info};

use crate::error::EngineResult;
use crate::models::{ComplianceIssue, Project, Severity, Standard};
use crate::validation::validate_project;

/// A standards rule.
pub trait ComplianceRule: Send + Sync + Debug {
    /// The standard this rule checks.
    fn standard(&self) -> Standard;

    /// Inspects the project and returns every issue found.
    fn check_compliance(&self, project: &Project) -> Vec<ComplianceIssue>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.standard().as_str()
    }
}

/// Issue counts by severity.
///
/// Critical issues are counted with the high ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub high_severity: usize,
    pub medium_severity: usize,
    pub low_severity: usize,
}

/// Result of a compliance check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Standard names, in rule order.
    pub standards_checked: Vec<String>,
    pub issues: Vec<ComplianceIssue>,
    pub summary: ComplianceSummary,
}

impl ComplianceResult {
    /// Whether no rule reported anything.
    pub fn is_compliant(&self) -> bool {
        self.summary.total == 0
    }

    /// Issues reported against one standard.
    pub fn issues_for(&self, standard: Standard) -> impl Iterator<Item = &ComplianceIssue> {
        self.issues.iter().filter(move |i| i.standard == standard)
    }
}

/// Runs the standard rule set.
#[derive(Debug)]
pub struct ComplianceChecker {
    rules: Vec<Box<dyn ComplianceRule>>,
}

impl ComplianceChecker {
    /// Creates a checker with ISO 19650, OSHA, and PMBOK rules.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(rules::Iso19650),
                Box::new(rules::Osha),
                Box::new(rules::Pmbok),
            ],
        }
    }

    /// Names of the standards checked, in rule order.
    pub fn standards(&self) -> Vec<String> {
        self.rules
            .iter()
            .map(|r| r.standard().as_str().to_string())
            .collect()
    }

    /// Runs every rule.
    ///
    /// # Errors
    /// [`EngineError::DuplicateTaskId`](crate::error::EngineError::DuplicateTaskId)
    /// if two tasks share an id.
    pub fn check_all(&self, project: &Project) -> EngineResult<ComplianceResult> {
        validate_project(project)?;

        let mut issues = Vec::new();
        for rule in &self.rules {
            let found = rule.check_compliance(project);
            debug!(standard = %rule.standard(), issues = found.len(), "rule checked");
            issues.extend(found);
        }

        let mut summary = ComplianceSummary {
            total: issues.len(),
            ..ComplianceSummary::default()
        };
        for issue in &issues {
            match issue.severity {
                Severity::Critical | Severity::High => summary.high_severity += 1,
                Severity::Medium => summary.medium_severity += 1,
                Severity::Low => summary.low_severity += 1,
            }
        }

        info!(project = %project.id, issues = summary.total, "compliance check complete");

        Ok(ComplianceResult {
            standards_checked: self.standards(),
            issues,
            summary,
        })
    }

    /// Whether the project passes every rule.
    pub fn is_compliant(&self, project: &Project) -> EngineResult<bool> {
        Ok(self.check_all(project)?.is_compliant())
    }
}

impl Default for ComplianceChecker {
    fn default() -> Self {
        Self::new()
    }
}
