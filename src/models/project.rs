//! Project model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Task;

/// Opaque key/value bag attached to a project.
///
/// The engine only checks for the presence of specific keys.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// A construction project: an ordered list of tasks plus calendar and budget.
///
/// `Clone` produces a fully independent copy; every task, dependency set,
/// and resource is owned by the clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Tasks in declaration order. IDs must be unique.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Calendar start.
    pub start_date: DateTime<Utc>,
    /// Target completion date, if committed.
    #[serde(default)]
    pub target_end_date: Option<DateTime<Utc>>,
    /// Approved budget (0 = not set).
    #[serde(default)]
    pub budget: f64,
    /// Caller-supplied metadata.
    #[serde(default)]
    pub metadata: Metadata,
}

impl Project {
    /// Creates an empty project starting at `start_date`.
    pub fn new(id: impl Into<String>, start_date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            tasks: Vec::new(),
            start_date,
            target_end_date: None,
            budget: 0.0,
            metadata: Metadata::new(),
        }
    }

    /// Sets the project name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Appends a task.
    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    /// Sets the target end date.
    pub fn with_target_end(mut self, target_end_date: DateTime<Utc>) -> Self {
        self.target_end_date = Some(target_end_date);
        self
    }

    /// Sets the budget.
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget.max(0.0);
        self
    }

    /// Adds a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Looks up a task by ID.
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Sum of all task durations (days).
    pub fn total_duration(&self) -> f64 {
        self.tasks.iter().map(|t| t.duration_days).sum()
    }

    /// Sum of all task costs.
    pub fn total_cost(&self) -> f64 {
        self.tasks.iter().map(Task::calculate_cost).sum()
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}
