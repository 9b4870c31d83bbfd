//! Before/after project metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total duration | Σ task durations (days) |
//! | Critical path | CPM forward-pass length (days) |
//! | Total cost | Σ task costs |
//! | Task count | Number of tasks |
//! | Avg task duration | Total duration / task count |
//! | Tasks per day | Task count / critical path |
//!
//! Every ratio yields 0 when its denominator is 0.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::graph::critical_path_duration;
use crate::models::Project;

/// Headline metrics of one project.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    pub total_duration: f64,
    pub critical_path_duration: f64,
    pub total_cost: f64,
    pub task_count: usize,
    pub avg_task_duration: f64,
    pub tasks_per_day: f64,
}

/// Gains of the optimized project over the original.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricImprovements {
    /// Critical path reduction (days).
    pub duration_reduction_days: f64,
    pub duration_reduction_percent: f64,
    /// Cost reduction, never negative.
    pub cost_savings: f64,
    pub cost_savings_percent: f64,
}

/// Original vs optimized metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsComparison {
    pub original: ProjectMetrics,
    pub optimized: ProjectMetrics,
    pub improvements: MetricImprovements,
}

impl ProjectMetrics {
    /// Computes metrics for an acyclic project.
    pub fn calculate(project: &Project) -> EngineResult<Self> {
        let total_duration = project.total_duration();
        let critical_path = critical_path_duration(project)?;
        let task_count = project.task_count();

        Ok(Self {
            total_duration,
            critical_path_duration: critical_path,
            total_cost: project.total_cost(),
            task_count,
            avg_task_duration: ratio(total_duration, task_count as f64),
            tasks_per_day: ratio(task_count as f64, critical_path),
        })
    }
}

impl MetricsComparison {
    /// Compares two projects.
    pub fn calculate(original: &Project, optimized: &Project) -> EngineResult<Self> {
        Ok(Self::from_metrics(
            ProjectMetrics::calculate(original)?,
            ProjectMetrics::calculate(optimized)?,
        ))
    }

    /// Derives improvements from precomputed metrics.
    pub fn from_metrics(original: ProjectMetrics, optimized: ProjectMetrics) -> Self {
        let duration_reduction_days =
            original.critical_path_duration - optimized.critical_path_duration;
        let cost_savings = (original.total_cost - optimized.total_cost).max(0.0);

        Self {
            original,
            optimized,
            improvements: MetricImprovements {
                duration_reduction_days,
                duration_reduction_percent: ratio(
                    duration_reduction_days,
                    original.critical_path_duration,
                ) * 100.0,
                cost_savings,
                cost_savings_percent: ratio(cost_savings, original.total_cost) * 100.0,
            },
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, Task};
    use chrono::{TimeZone, Utc};

    fn project(tasks: Vec<Task>) -> Project {
        let mut p = Project::new("P", Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap());
        p.tasks = tasks;
        p
    }

    #[test]
    fn test_metrics_basic() {
        let p = project(vec![
            Task::new("A", 10.0)
                .with_resource(Resource::labor("L").with_quantity(10.0, "day").with_cost(100.0)),
            Task::new("B", 20.0).with_dependency("A"),
            Task::new("C", 6.0).with_dependency("A"),
        ]);
        let m = ProjectMetrics::calculate(&p).unwrap();
        assert!((m.total_duration - 36.0).abs() < 1e-10);
        assert!((m.critical_path_duration - 30.0).abs() < 1e-10);
        assert!((m.total_cost - 1000.0).abs() < 1e-10);
        assert_eq!(m.task_count, 3);
        assert!((m.avg_task_duration - 12.0).abs() < 1e-10);
        assert!((m.tasks_per_day - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_empty() {
        let m = ProjectMetrics::calculate(&project(vec![])).unwrap();
        assert_eq!(m.task_count, 0);
        assert!((m.avg_task_duration - 0.0).abs() < 1e-10);
        assert!((m.tasks_per_day - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_comparison() {
        let original = project(vec![
            Task::new("A", 20.0)
                .with_resource(Resource::material("M").with_quantity(10.0, "t").with_cost(100.0)),
        ]);
        let mut optimized = original.clone();
        optimized.tasks[0].duration_days = 17.0;
        optimized.tasks[0].resources[0].cost_per_unit = 97.0;

        let c = MetricsComparison::calculate(&original, &optimized).unwrap();
        assert!((c.improvements.duration_reduction_days - 3.0).abs() < 1e-10);
        assert!((c.improvements.duration_reduction_percent - 15.0).abs() < 1e-10);
        assert!((c.improvements.cost_savings - 30.0).abs() < 1e-10);
        assert!((c.improvements.cost_savings_percent - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_cost_increase_clamped() {
        let original = project(vec![Task::new("A", 1.0)]);
        let optimized = project(vec![Task::new("A", 1.0)
            .with_resource(Resource::labor("L").with_quantity(1.0, "day").with_cost(50.0))]);
        let c = MetricsComparison::calculate(&original, &optimized).unwrap();
        assert!((c.improvements.cost_savings - 0.0).abs() < 1e-10);
        assert!((c.improvements.cost_savings_percent - 0.0).abs() < 1e-10);
    }
}
