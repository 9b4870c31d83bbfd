//! Engine error model.
//!
//! Structural problems in a project (cycles, dangling dependencies, missing
//! resources) are *findings* and are reported inside result values. Only
//! precondition violations and dates outside chrono's range surface as
//! [`EngineError`].

use thiserror::Error;

/// Result type used across the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Failure that prevents a result from being produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Two tasks in the same project share an id.
    #[error("duplicate task id: {task_id}")]
    DuplicateTaskId {
        /// The colliding id.
        task_id: String,
    },

    /// An operation that requires an acyclic dependency graph was given a cycle.
    #[error("circular dependency detected involving task '{task_id}'")]
    CyclicDependency {
        /// A task on the cycle.
        task_id: String,
    },

    /// A scheduled date falls outside the representable calendar range.
    #[error("schedule for task '{task_id}' falls outside the supported date range")]
    ScheduleOutOfRange {
        /// The task whose dates overflowed.
        task_id: String,
    },
}

impl EngineError {
    pub fn duplicate_task_id(task_id: impl Into<String>) -> Self {
        Self::DuplicateTaskId {
            task_id: task_id.into(),
        }
    }

    pub fn cyclic_dependency(task_id: impl Into<String>) -> Self {
        Self::CyclicDependency {
            task_id: task_id.into(),
        }
    }

    pub fn schedule_out_of_range(task_id: impl Into<String>) -> Self {
        Self::ScheduleOutOfRange {
            task_id: task_id.into(),
        }
    }
}
