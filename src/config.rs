//! Engine configuration.
//!
//! Holds the fixed threshold and factor tables used by the auditor and the
//! optimizer. Defaults reproduce the standard rule set; a TOML file can
//! override individual values.
//!
//! ```
//! use u_project_audit::config::EngineConfig;
//!
//! let config = EngineConfig::from_toml_str(r#"
//!     [audit]
//!     max_task_duration_days = 45.0
//!
//!     [optimizer]
//!     material_cost_reduction = 0.05
//! "#).unwrap();
//!
//! assert_eq!(config.audit.max_task_duration_days, 45.0);
//! assert_eq!(config.audit.min_task_duration_days, 0.5);
//! assert_eq!(config.optimizer.material_cost_reduction, 0.05);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Activities that require an explicit safety plan.
pub const HIGH_RISK_ACTIVITIES: [&str; 8] = [
    "excavation",
    "steel erection",
    "scaffolding",
    "confined space",
    "fall protection",
    "electrical",
    "trenching",
    "demolition",
];

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub audit: AuditConfig,
    pub optimizer: OptimizerConfig,
}

/// Auditor thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Tasks shorter than this are flagged as unrealistically short.
    pub min_task_duration_days: f64,
    /// Tasks longer than this are flagged as candidates for splitting.
    pub max_task_duration_days: f64,
    /// Fraction of the calendar window the summed durations may occupy.
    pub timeline_utilization_limit: f64,
    /// A resource shared by more tasks than this is a conflict.
    pub resource_conflict_threshold: usize,
    /// A task depended upon by at least this many tasks is a bottleneck.
    pub bottleneck_threshold: usize,
    /// More root tasks than this triggers a project-structure warning.
    pub parallel_task_warning: usize,
    /// Cost/budget ratio above which a contingency warning is raised.
    pub budget_warning_ratio: f64,
    /// Task risk levels above this are reported.
    pub task_risk_threshold: f64,
    /// Activity keywords that require compliance requirements.
    pub high_risk_keywords: Vec<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            min_task_duration_days: 0.5,
            max_task_duration_days: 60.0,
            timeline_utilization_limit: 0.9,
            resource_conflict_threshold: 3,
            bottleneck_threshold: 3,
            parallel_task_warning: 10,
            budget_warning_ratio: 0.95,
            task_risk_threshold: 0.7,
            high_risk_keywords: HIGH_RISK_ACTIVITIES.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Optimizer factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Multiplier applied to a bottleneck task's duration.
    pub bottleneck_duration_factor: f64,
    /// Dependents needed for a task to count as a bottleneck.
    pub bottleneck_threshold: usize,
    /// A resource shared by more tasks than this gets a balancing note.
    pub resource_conflict_threshold: usize,
    /// Fast-tracking only considers tasks longer than this.
    pub fast_track_min_duration_days: f64,
    /// Name keywords marking a task as a fast-tracking candidate.
    pub fast_track_keywords: Vec<String>,
    /// Fractional reduction of a material's unit cost.
    pub material_cost_reduction: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            bottleneck_duration_factor: 0.85,
            bottleneck_threshold: 3,
            resource_conflict_threshold: 3,
            fast_track_min_duration_days: 5.0,
            fast_track_keywords: vec!["foundation".to_string(), "preparation".to_string()],
            material_cost_reduction: 0.03,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
