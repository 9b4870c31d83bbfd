//! Task model.
//!
//! A task is a unit of construction work with a duration, a set of
//! prerequisite tasks, and the resources it consumes. Dates are filled
//! in by [`crate::graph::schedule_tasks`]; callers never supply them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Resource;

/// A task within a project.
///
/// `dependencies` must name other tasks of the same project. This is
/// checked by the auditor, not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier within the project.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Duration in days (expected > 0).
    pub duration_days: f64,
    /// IDs of tasks that must finish before this one starts.
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    /// Resources consumed, in declaration order.
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Progress state.
    #[serde(default)]
    pub status: TaskStatus,
    /// Priority, 1 (lowest) to 5 (highest).
    #[serde(default = "default_priority")]
    pub priority: u8,
    /// Computed start date.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Computed end date.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Standards or permits this task must satisfy.
    #[serde(default)]
    pub compliance_requirements: Vec<String>,
    /// Estimated risk, 0.0..=1.0.
    #[serde(default)]
    pub risk_level: f64,
}

fn default_priority() -> u8 {
    3
}

/// Task progress state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Blocked,
    Delayed,
}

impl Task {
    /// Creates a planned task with the given ID and duration.
    pub fn new(id: impl Into<String>, duration_days: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            duration_days,
            dependencies: BTreeSet::new(),
            resources: Vec::new(),
            status: TaskStatus::Planned,
            priority: default_priority(),
            start_date: None,
            end_date: None,
            compliance_requirements: Vec::new(),
            risk_level: 0.0,
        }
    }

    /// Sets the task name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Adds a prerequisite task ID.
    pub fn with_dependency(mut self, task_id: impl Into<String>) -> Self {
        self.dependencies.insert(task_id.into());
        self
    }

    /// Adds a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority, clamped to 1..=5.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.clamp(1, 5);
        self
    }

    /// Adds a compliance requirement.
    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.compliance_requirements.push(requirement.into());
        self
    }

    /// Sets the risk level, clamped to 0.0..=1.0.
    pub fn with_risk(mut self, risk_level: f64) -> Self {
        self.risk_level = risk_level.clamp(0.0, 1.0);
        self
    }

    /// Sum of resource costs.
    pub fn calculate_cost(&self) -> f64 {
        self.resources.iter().map(Resource::total_cost).sum()
    }

    /// Whether this task waits on any other task.
    pub fn has_dependencies(&self) -> bool {
        !self.dependencies.is_empty()
    }

    /// First keyword contained in the name or in the description
    /// (case-insensitive). A keyword must sit wholly within one field.
    pub fn first_mentioned<'k, S: AsRef<str>>(&self, keywords: &'k [S]) -> Option<&'k str> {
        let name = self.name.to_lowercase();
        let description = self.description.to_lowercase();
        keywords.iter().map(AsRef::as_ref).find(|k| {
            let k = k.to_lowercase();
            name.contains(&k) || description.contains(&k)
        })
    }

    /// Whether the name or description contains any keyword (case-insensitive).
    pub fn mentions_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        self.first_mentioned(keywords).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new("T1", 10.0)
            .with_name("Site preparation")
            .with_description("Clear and grade the lot")
            .with_dependency("T0")
            .with_priority(9)
            .with_requirement("OSHA 1926 Subpart P")
            .with_risk(0.4);

        assert_eq!(task.id, "T1");
        assert_eq!(task.priority, 5);
        assert!(task.has_dependencies());
        assert!(task.dependencies.contains("T0"));
        assert_eq!(task.compliance_requirements.len(), 1);
        assert_eq!(task.status, TaskStatus::Planned);
        assert!(task.start_date.is_none());
    }

    #[test]
    fn test_calculate_cost() {
        let task = Task::new("T1", 5.0)
            .with_resource(Resource::labor("L1").with_quantity(5.0, "days").with_cost(800.0))
            .with_resource(Resource::material("M1").with_quantity(10.0, "m3").with_cost(100.0));
        assert!((task.calculate_cost() - 5000.0).abs() < 1e-10);
        assert!((Task::new("empty", 1.0).calculate_cost() - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_mentions_any() {
        let task = Task::new("T1", 3.0)
            .with_name("Trench work")
            .with_description("Utility TRENCHING along the north side");
        assert!(task.mentions_any(&["trenching"]));
        assert!(!task.mentions_any(&["demolition", "scaffolding"]));
        assert_eq!(
            task.first_mentioned(&["excavation", "trenching", "trench"]),
            Some("trenching")
        );
    }

    #[test]
    fn test_keyword_not_matched_across_fields() {
        let task = Task::new("T1", 3.0)
            .with_name("Steel")
            .with_description("Erection");
        assert!(!task.mentions_any(&["steel erection"]));
        assert!(task.mentions_any(&["steel"]));
    }

    #[test]
    fn test_dependencies_are_a_set() {
        let task = Task::new("T2", 1.0).with_dependency("T1").with_dependency("T1");
        assert_eq!(task.dependencies.len(), 1);
    }

    #[test]
    fn test_fresh_collections_per_instance() {
        let mut a = Task::new("A", 1.0);
        let b = Task::new("B", 1.0);
        a.dependencies.insert("X".into());
        assert!(b.dependencies.is_empty());
    }
}
