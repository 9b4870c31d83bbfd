//! Structural checks on a project's dependency graph.
//!
//! Two kinds of result come out of this module:
//! - [`validate_project`] enforces preconditions (unique task ids) and
//!   fails with an [`EngineError`].
//! - [`find_dangling_dependencies`] and [`detect_cycles`] return findings
//!   for the auditor to report. They never fail.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::error::{EngineError, EngineResult};
use crate::models::Project;

/// A dependency id that names no task in the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingDependency<'a> {
    /// Task declaring the dependency.
    pub task_id: &'a str,
    /// The unknown id.
    pub dependency_id: &'a str,
}

/// Checks engine preconditions.
///
/// # Errors
/// [`EngineError::DuplicateTaskId`] for the first id used by two tasks.
pub fn validate_project(project: &Project) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for task in &project.tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(EngineError::duplicate_task_id(&task.id));
        }
    }
    Ok(())
}

/// Lists every dependency id that does not name a task, in project order.
pub fn find_dangling_dependencies(project: &Project) -> Vec<DanglingDependency<'_>> {
    let ids: HashSet<&str> = project.tasks.iter().map(|t| t.id.as_str()).collect();
    let ids = &ids;
    project
        .tasks
        .iter()
        .flat_map(move |task| {
            task.dependencies
                .iter()
                .filter(move |dep| !ids.contains(dep.as_str()))
                .map(move |dep| DanglingDependency {
                    task_id: task.id.as_str(),
                    dependency_id: dep.as_str(),
                })
        })
        .collect()
}

/// Detects circular dependencies using DFS.
///
/// # Algorithm
/// Walks dependency edges (task → prerequisite) from every unvisited task in
/// project order, using an explicit stack. Reaching a task still on the stack
/// is a back edge: its id is recorded and the walk continues. Tasks already fully
/// visited are skipped. Unknown dependency ids are ignored.
///
/// Returns the ids of tasks entered by a back edge, one entry per back edge.
/// An empty result means the graph is acyclic.
pub fn detect_cycles(project: &Project) -> Vec<String> {
    let index = task_index(project);
    let mut visited = HashSet::new();
    let mut in_stack = HashSet::new();
    let mut cycles = Vec::new();

    for start in 0..project.tasks.len() {
        if !visited.contains(&start) {
            cycle_dfs(start, project, &index, &mut visited, &mut in_stack, &mut cycles);
        }
    }

    cycles
}

/// Fails if the dependency graph contains a cycle.
///
/// # Errors
/// [`EngineError::CyclicDependency`] naming the first task found on a cycle.
pub fn ensure_acyclic(project: &Project) -> EngineResult<()> {
    match detect_cycles(project).into_iter().next() {
        Some(task_id) => Err(EngineError::cyclic_dependency(task_id)),
        None => Ok(()),
    }
}

/// Maps task id → position in `project.tasks`.
pub(crate) fn task_index(project: &Project) -> HashMap<&str, usize> {
    project
        .tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect()
}

fn cycle_dfs(
    root: usize,
    project: &Project,
    index: &HashMap<&str, usize>,
    visited: &mut HashSet<usize>,
    in_stack: &mut HashSet<usize>,
    cycles: &mut Vec<String>,
) {
    visited.insert(root);
    in_stack.insert(root);
    let mut stack = vec![(root, project.tasks[root].dependencies.iter())];

    while let Some((node, deps)) = stack.last_mut() {
        let node = *node;
        let Some(dep) = deps.next() else {
            in_stack.remove(&node);
            stack.pop();
            continue;
        };
        let Some(&next) = index.get(dep.as_str()) else {
            continue;
        };
        if in_stack.contains(&next) {
            cycles.push(project.tasks[next].id.clone()); // Back edge → cycle
        } else if visited.insert(next) {
            in_stack.insert(next);
            stack.push((next, project.tasks[next].dependencies.iter()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Task;
    use chrono::{TimeZone, Utc};

    fn project(tasks: Vec<Task>) -> Project {
        let mut p = Project::new("P", Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap());
        p.tasks = tasks;
        p
    }

    #[test]
    fn test_valid_project() {
        let p = project(vec![
            Task::new("A", 1.0),
            Task::new("B", 1.0).with_dependency("A"),
        ]);
        assert!(validate_project(&p).is_ok());
        assert!(find_dangling_dependencies(&p).is_empty());
        assert!(detect_cycles(&p).is_empty());
    }

    #[test]
    fn test_duplicate_task_id() {
        let p = project(vec![Task::new("A", 1.0), Task::new("A", 2.0)]);
        assert_eq!(
            validate_project(&p).unwrap_err(),
            EngineError::duplicate_task_id("A")
        );
    }

    #[test]
    fn test_dangling_dependency() {
        let p = project(vec![
            Task::new("A", 1.0).with_dependency("ghost"),
            Task::new("B", 1.0).with_dependency("A"),
        ]);
        let dangling = find_dangling_dependencies(&p);
        assert_eq!(dangling.len(), 1);
        assert_eq!(dangling[0].task_id, "A");
        assert_eq!(dangling[0].dependency_id, "ghost");
    }

    #[test]
    fn test_cyclic_dependency() {
        // A depends on C, B on A, C on B
        let p = project(vec![
            Task::new("A", 1.0).with_dependency("C"),
            Task::new("B", 1.0).with_dependency("A"),
            Task::new("C", 1.0).with_dependency("B"),
        ]);
        let cycles = detect_cycles(&p);
        assert_eq!(cycles, vec!["A".to_string()]);
        assert!(matches!(
            ensure_acyclic(&p),
            Err(EngineError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn test_no_cycle_in_chain() {
        let p = project(vec![
            Task::new("A", 1.0),
            Task::new("B", 1.0).with_dependency("A"),
            Task::new("C", 1.0).with_dependency("B"),
        ]);
        assert!(detect_cycles(&p).is_empty());
        assert!(ensure_acyclic(&p).is_ok());
    }

    #[test]
    fn test_self_dependency_is_cycle() {
        let p = project(vec![Task::new("A", 1.0).with_dependency("A")]);
        assert_eq!(detect_cycles(&p), vec!["A".to_string()]);
    }

    #[test]
    fn test_diamond_is_not_cycle() {
        // D depends on B and C, both depend on A
        let p = project(vec![
            Task::new("A", 1.0),
            Task::new("B", 1.0).with_dependency("A"),
            Task::new("C", 1.0).with_dependency("A"),
            Task::new("D", 1.0).with_dependency("B").with_dependency("C"),
        ]);
        assert!(detect_cycles(&p).is_empty());
    }

    #[test]
    fn test_long_chain_with_cycle() {
        let n = 50_000;
        let mut tasks: Vec<Task> = (1..n)
            .map(|i| Task::new(format!("T{i}"), 1.0).with_dependency(format!("T{}", i - 1)))
            .collect();
        tasks.push(Task::new("T0", 1.0).with_dependency(format!("T{}", n - 1)));
        let p = project(tasks);
        assert_eq!(detect_cycles(&p), vec!["T1".to_string()]);
    }

    #[test]
    fn test_disconnected_components() {
        let p = project(vec![
            Task::new("A", 1.0),
            Task::new("B", 1.0).with_dependency("A"),
            Task::new("X", 1.0).with_dependency("Y"),
            Task::new("Y", 1.0).with_dependency("X"),
        ]);
        assert_eq!(detect_cycles(&p).len(), 1);
    }
}
