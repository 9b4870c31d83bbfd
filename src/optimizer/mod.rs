//! Heuristic schedule and cost optimizer.
//!
//! Produces an independent, optimized copy of a project and reports what
//! changed. The heuristics are rule-based and deterministic.
//!
//! # Transformations (in order)
//!
//! 1. **Sequencing**: counts tasks that share a dependency level
//!    (informational).
//! 2. **Bottleneck elimination**: shortens tasks with many dependents by
//!    15%.
//! 3. **Resource balancing**: notes over-shared resources (informational).
//! 4. **Fast-tracking**: counts overlap candidates (informational).
//! 5. **Value engineering**: cuts the unit cost of each task's first priced
//!    material by 3%.
//! 6. **Scheduling**: assigns start/end dates with the new durations.
//!
//! # Preconditions
//!
//! The dependency graph must be acyclic. A cyclic project is refused with
//! [`EngineError::CyclicDependency`](crate::error::EngineError::CyclicDependency)
//! before any work is done. Dangling dependency ids are tolerated and left
//! as they are.

mod metrics;

pub use metrics::{MetricImprovements, MetricsComparison, ProjectMetrics};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::OptimizerConfig;
use crate::error::EngineResult;
use crate::graph::{dependency_levels, dependent_counts, resource_groups, schedule_tasks};
use crate::models::{Project, ResourceKind};
use crate::validation::{ensure_acyclic, validate_project};

/// Improvement classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImprovementCategory {
    Sequencing,
    BottleneckElimination,
    ResourceBalancing,
    ScheduleCompression,
    CostOptimization,
}

/// Expected impact of an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
}

/// One applied or suggested improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Improvement {
    pub category: ImprovementCategory,
    pub description: String,
    pub impact: Impact,
    /// Free-text before/after or estimated change.
    pub metric_change: String,
}

impl Improvement {
    fn new(
        category: ImprovementCategory,
        impact: Impact,
        description: impl Into<String>,
        metric_change: impl Into<String>,
    ) -> Self {
        Self {
            category,
            description: description.into(),
            impact,
            metric_change: metric_change.into(),
        }
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub original_project: Project,
    /// Independent copy with all transformations applied and dates set.
    pub optimized_project: Project,
    pub improvements: Vec<Improvement>,
    pub metrics: MetricsComparison,
}

/// Stateless heuristic optimizer.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    /// Creates an optimizer with the standard factors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an optimizer with custom factors.
    pub fn with_config(config: OptimizerConfig) -> Self {
        Self { config }
    }

    /// Optimizes a copy of `project`. The input is not modified.
    ///
    /// # Errors
    /// - [`EngineError::DuplicateTaskId`](crate::error::EngineError::DuplicateTaskId)
    ///   if two tasks share an id.
    /// - [`EngineError::CyclicDependency`](crate::error::EngineError::CyclicDependency)
    ///   if the dependency graph has a cycle.
    /// - [`EngineError::ScheduleOutOfRange`](crate::error::EngineError::ScheduleOutOfRange)
    ///   if a task's dates cannot be represented.
    pub fn optimize(&self, project: &Project) -> EngineResult<OptimizationResult> {
        validate_project(project)?;
        if let Err(e) = ensure_acyclic(project) {
            warn!(project = %project.id, error = %e, "refusing to optimize cyclic project");
            return Err(e);
        }

        let mut working = project.clone();
        let mut improvements = Vec::new();

        self.sequencing(&working, &mut improvements)?;
        self.eliminate_bottlenecks(&mut working, &mut improvements);
        self.balance_resources(&working, &mut improvements);
        self.compress_schedule(&working, &mut improvements);
        self.value_engineer(&mut working, &mut improvements);
        schedule_tasks(&mut working)?;

        let metrics = MetricsComparison::calculate(project, &working)?;

        info!(
            project = %project.id,
            improvements = improvements.len(),
            duration_reduction_days = metrics.improvements.duration_reduction_days,
            cost_savings = metrics.improvements.cost_savings,
            "optimization complete"
        );

        Ok(OptimizationResult {
            original_project: project.clone(),
            optimized_project: working,
            improvements,
            metrics,
        })
    }

    fn sequencing(&self, project: &Project, out: &mut Vec<Improvement>) -> EngineResult<()> {
        let opportunities: usize = dependency_levels(project)?
            .values()
            .filter(|ids| ids.len() > 1)
            .map(|ids| ids.len() - 1)
            .sum();
        debug!(opportunities, "parallelization opportunities");

        if opportunities > 0 {
            out.push(Improvement::new(
                ImprovementCategory::Sequencing,
                Impact::Medium,
                format!("Identified {opportunities} opportunities to run tasks in parallel"),
                format!("{opportunities} tasks can start alongside others at the same dependency level"),
            ));
        }
        Ok(())
    }

    fn eliminate_bottlenecks(&self, project: &mut Project, out: &mut Vec<Improvement>) {
        let counts = dependent_counts(project);
        for (task, count) in project.tasks.iter_mut().zip(counts) {
            if count < self.config.bottleneck_threshold {
                continue;
            }
            let before = task.duration_days;
            task.duration_days = before * self.config.bottleneck_duration_factor;
            debug!(task = %task.id, before, after = task.duration_days, "bottleneck shortened");

            out.push(Improvement::new(
                ImprovementCategory::BottleneckElimination,
                Impact::High,
                format!(
                    "Reduced duration of bottleneck task '{}' ({count} dependents) by adding resources",
                    task.id
                ),
                format!("{before:.1} days -> {:.1} days", task.duration_days),
            ));
        }
    }

    fn balance_resources(&self, project: &Project, out: &mut Vec<Improvement>) {
        for ((kind, name), task_ids) in resource_groups(project) {
            if task_ids.len() > self.config.resource_conflict_threshold {
                out.push(Improvement::new(
                    ImprovementCategory::ResourceBalancing,
                    Impact::Medium,
                    format!(
                        "Stagger use of {kind} resource '{name}' across {} tasks",
                        task_ids.len()
                    ),
                    "Reduced resource contention",
                ));
            }
        }
    }

    fn compress_schedule(&self, project: &Project, out: &mut Vec<Improvement>) {
        let overlaps = project
            .tasks
            .iter()
            .filter(|t| {
                t.has_dependencies()
                    && t.duration_days > self.config.fast_track_min_duration_days
                    && self
                        .config
                        .fast_track_keywords
                        .iter()
                        .any(|k| t.name.to_lowercase().contains(&k.to_lowercase()))
            })
            .count();
        debug!(overlaps, "fast-tracking candidates");

        if overlaps > 0 {
            out.push(Improvement::new(
                ImprovementCategory::ScheduleCompression,
                Impact::High,
                format!("Fast-track {overlaps} tasks by overlapping them with their predecessors"),
                "10-20% potential reduction in affected task durations",
            ));
        }
    }

    fn value_engineer(&self, project: &mut Project, out: &mut Vec<Improvement>) {
        let reduction = self.config.material_cost_reduction;
        let mut total_savings = 0.0;
        let mut tasks_changed = 0usize;

        for task in project.tasks.iter_mut() {
            let original_cost = task.calculate_cost();
            if original_cost <= 0.0 {
                continue;
            }
            let material = task
                .resources
                .iter_mut()
                .find(|r| r.kind == ResourceKind::Material && r.cost_per_unit > 0.0);
            if let Some(resource) = material {
                resource.cost_per_unit *= 1.0 - reduction;
                total_savings += original_cost * reduction;
                tasks_changed += 1;
            }
        }
        debug!(tasks_changed, total_savings, "value engineering");

        if total_savings > 0.0 {
            out.push(Improvement::new(
                ImprovementCategory::CostOptimization,
                Impact::Medium,
                format!(
                    "Value-engineered materials on {tasks_changed} tasks ({:.0}% unit cost reduction)",
                    reduction * 100.0
                ),
                format!("${total_savings:.2} estimated savings"),
            ));
        }
    }
}
