//! Audit findings.
//!
//! Findings are plain data: risks, compliance issues, bottlenecks, and
//! resource conflicts detected in a project. None of them are errors.

use serde::{Deserialize, Serialize};

use super::ResourceKind;

/// Finding severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    /// Dangling dependency reference.
    Dependency,
    /// Circular dependency.
    Cycle,
    /// Duration or timeline problem.
    Schedule,
    /// Task without resources.
    Resource,
    /// Project logic (e.g. too many unconnected tasks).
    Structure,
    /// Cost against budget.
    Budget,
    /// Task-level risk estimate.
    Task,
}

/// A risk detected in the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub severity: Severity,
    pub category: RiskCategory,
    /// Implicated task, `None` for project-level risks.
    pub task_id: Option<String>,
    pub description: String,
    pub mitigation: String,
}

impl Risk {
    /// Creates a risk attached to a task.
    pub fn for_task(
        severity: Severity,
        category: RiskCategory,
        task_id: impl Into<String>,
        description: impl Into<String>,
        mitigation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            task_id: Some(task_id.into()),
            description: description.into(),
            mitigation: mitigation.into(),
        }
    }

    /// Creates a project-level risk.
    pub fn for_project(
        severity: Severity,
        category: RiskCategory,
        description: impl Into<String>,
        mitigation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            task_id: None,
            description: description.into(),
            mitigation: mitigation.into(),
        }
    }
}

/// Standards a project can be checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standard {
    #[serde(rename = "OSHA")]
    Osha,
    #[serde(rename = "ISO 9001")]
    Iso9001,
    #[serde(rename = "ISO 19650")]
    Iso19650,
    #[serde(rename = "PMBOK")]
    Pmbok,
}

impl Standard {
    pub fn as_str(&self) -> &'static str {
        match self {
            Standard::Osha => "OSHA",
            Standard::Iso9001 => "ISO 9001",
            Standard::Iso19650 => "ISO 19650",
            Standard::Pmbok => "PMBOK",
        }
    }
}

impl std::fmt::Display for Standard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A gap against a named standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    pub severity: Severity,
    pub standard: Standard,
    /// Implicated task, `None` for project-level issues.
    pub task_id: Option<String>,
    pub description: String,
    /// Suggested corrective action.
    pub recommendation: String,
}

impl ComplianceIssue {
    pub fn for_task(
        severity: Severity,
        standard: Standard,
        task_id: impl Into<String>,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            standard,
            task_id: Some(task_id.into()),
            description: description.into(),
            recommendation: recommendation.into(),
        }
    }

    pub fn for_project(
        severity: Severity,
        standard: Standard,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            standard,
            task_id: None,
            description: description.into(),
            recommendation: recommendation.into(),
        }
    }
}

/// A task many others wait on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub severity: Severity,
    pub task_id: String,
    /// Number of tasks listing this one as a dependency.
    pub dependent_count: usize,
    pub description: String,
}

/// A named resource shared by too many tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConflict {
    pub severity: Severity,
    pub resource_kind: ResourceKind,
    pub resource_name: String,
    /// Tasks using the resource, in project order.
    pub task_ids: Vec<String>,
    pub description: String,
}

/// Recommendation grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    RiskManagement,
    ScheduleOptimization,
    Compliance,
    ResourceManagement,
    Optimization,
}

/// A follow-up action suggested by the audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Severity,
    pub title: String,
    pub description: String,
}
