//! Dependency-graph utilities.
//!
//! Pure functions over a [`Project`]: topological layering, the CPM
//! forward pass, and the shared groupings used by both the auditor and the
//! optimizer.
//!
//! # Preconditions
//!
//! Functions that walk dependency chains ([`dependency_levels`],
//! [`forward_pass`], [`critical_path_duration`], [`schedule_tasks`]) need an
//! acyclic graph. They check this first and return
//! [`EngineError::CyclicDependency`](crate::error::EngineError::CyclicDependency)
//! instead of recursing forever.
//! Dependency ids that name no task are ignored.
//!
//! # Reference
//! Kelley & Walker (1959), "Critical-Path Planning and Scheduling"

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{EngineError, EngineResult};
use crate::models::{Project, ResourceKind};
use crate::validation::{ensure_acyclic, task_index};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Earliest start/finish of one task, in days from project start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskTiming {
    pub earliest_start: f64,
    pub earliest_finish: f64,
}

/// Groups task ids by dependency depth.
///
/// Level 0 holds tasks with no known dependencies; otherwise a task sits one
/// level above its deepest prerequisite. Ids within a level keep project order.
pub fn dependency_levels(project: &Project) -> EngineResult<BTreeMap<usize, Vec<String>>> {
    ensure_acyclic(project)?;

    let index = task_index(project);
    let mut level = vec![0usize; project.tasks.len()];
    for node in prerequisite_order(project, &index) {
        let deepest = known_dependencies(project, &index, node)
            .map(|j| level[j] + 1)
            .max()
            .unwrap_or(0);
        level[node] = deepest;
    }

    let mut levels: BTreeMap<usize, Vec<String>> = BTreeMap::new();
    for (task, level) in project.tasks.iter().zip(level) {
        levels.entry(level).or_default().push(task.id.clone());
    }
    Ok(levels)
}

/// CPM forward pass.
///
/// `earliest_start(t) = max(earliest_finish(dep))` (0 without dependencies),
/// `earliest_finish(t) = earliest_start(t) + duration(t)`.
/// The result is aligned with `project.tasks`.
pub fn forward_pass(project: &Project) -> EngineResult<Vec<TaskTiming>> {
    ensure_acyclic(project)?;

    let index = task_index(project);
    let mut timings = vec![
        TaskTiming {
            earliest_start: 0.0,
            earliest_finish: 0.0,
        };
        project.tasks.len()
    ];
    for node in prerequisite_order(project, &index) {
        let earliest_start = known_dependencies(project, &index, node)
            .map(|j| timings[j].earliest_finish)
            .fold(0.0, f64::max);
        timings[node] = TaskTiming {
            earliest_start,
            earliest_finish: earliest_start + project.tasks[node].duration_days,
        };
    }
    Ok(timings)
}

/// Task positions ordered so every known prerequisite comes before the
/// tasks that depend on it. Requires an acyclic graph.
///
/// Iterative post-order DFS, so chain length is not bounded by the call stack.
fn prerequisite_order(project: &Project, index: &HashMap<&str, usize>) -> Vec<usize> {
    let n = project.tasks.len();
    let mut order = Vec::with_capacity(n);
    let mut visited = vec![false; n];

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        let mut stack = vec![(root, project.tasks[root].dependencies.iter())];

        while let Some((node, deps)) = stack.last_mut() {
            let node = *node;
            match deps.next() {
                Some(dep) => {
                    if let Some(&next) = index.get(dep.as_str()) {
                        if !visited[next] {
                            visited[next] = true;
                            stack.push((next, project.tasks[next].dependencies.iter()));
                        }
                    }
                }
                None => {
                    order.push(node);
                    stack.pop();
                }
            }
        }
    }

    order
}

fn known_dependencies<'a>(
    project: &'a Project,
    index: &'a HashMap<&'a str, usize>,
    node: usize,
) -> impl Iterator<Item = usize> + 'a {
    project.tasks[node]
        .dependencies
        .iter()
        .filter_map(move |dep| index.get(dep.as_str()).copied())
}

/// Minimum project duration in days assuming unlimited resources.
///
/// Returns 0 for a project without tasks.
pub fn critical_path_duration(project: &Project) -> EngineResult<f64> {
    Ok(forward_pass(project)?
        .iter()
        .map(|t| t.earliest_finish)
        .fold(0.0, f64::max))
}

/// Writes forward-pass dates onto every task.
///
/// `start_date = project.start_date + earliest_start`,
/// `end_date = start_date + duration_days`.
///
/// # Errors
/// [`EngineError::ScheduleOutOfRange`](crate::error::EngineError::ScheduleOutOfRange)
/// if a date would fall outside chrono's range. The project is left
/// untouched in that case.
pub fn schedule_tasks(project: &mut Project) -> EngineResult<()> {
    let timings = forward_pass(project)?;
    let base = project.start_date;

    let mut dates = Vec::with_capacity(timings.len());
    for (task, timing) in project.tasks.iter().zip(&timings) {
        let start = offset(base, timing.earliest_start)
            .ok_or_else(|| EngineError::schedule_out_of_range(&task.id))?;
        let end = offset(start, task.duration_days)
            .ok_or_else(|| EngineError::schedule_out_of_range(&task.id))?;
        dates.push((start, end));
    }

    for (task, (start, end)) in project.tasks.iter_mut().zip(dates) {
        task.start_date = Some(start);
        task.end_date = Some(end);
    }

    Ok(())
}

fn offset(date: DateTime<Utc>, days: f64) -> Option<DateTime<Utc>> {
    let ms = (days * MS_PER_DAY).round();
    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(ms as i64).and_then(|delta| date.checked_add_signed(delta))
}

/// For each task, how many tasks list it as a dependency.
///
/// Aligned with `project.tasks`.
pub fn dependent_counts(project: &Project) -> Vec<usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for task in &project.tasks {
        for dep in &task.dependencies {
            *counts.entry(dep.as_str()).or_insert(0) += 1;
        }
    }
    project
        .tasks
        .iter()
        .map(|t| counts.get(t.id.as_str()).copied().unwrap_or(0))
        .collect()
}

/// Shared resource key: kind plus name.
pub type ResourceKey = (ResourceKind, String);

/// Groups tasks by the `(kind, name)` of the resources they use.
///
/// Each task id appears at most once per group, in project order.
pub fn resource_groups(project: &Project) -> BTreeMap<ResourceKey, Vec<String>> {
    let mut groups: BTreeMap<ResourceKey, Vec<String>> = BTreeMap::new();
    for task in &project.tasks {
        for resource in &task.resources {
            let users = groups
                .entry((resource.kind, resource.name.clone()))
                .or_default();
            if users.last() != Some(&task.id) {
                users.push(task.id.clone());
            }
        }
    }
    groups
}

/// Number of tasks with no dependencies.
pub fn root_task_count(project: &Project) -> usize {
    project.tasks.iter().filter(|t| !t.has_dependencies()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Resource, Task};
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap()
    }

    fn project(tasks: Vec<Task>) -> Project {
        let mut p = Project::new("P", start());
        p.tasks = tasks;
        p
    }

    fn fork() -> Project {
        project(vec![
            Task::new("T1", 10.0),
            Task::new("T2", 15.0).with_dependency("T1"),
            Task::new("T3", 12.0).with_dependency("T1"),
        ])
    }

    #[test]
    fn test_critical_path_fork() {
        let cp = critical_path_duration(&fork()).unwrap();
        assert!((cp - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_critical_path_empty() {
        let cp = critical_path_duration(&project(vec![])).unwrap();
        assert!((cp - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_critical_path_parallel() {
        let p = project(vec![Task::new("A", 3.0), Task::new("B", 7.0)]);
        assert!((critical_path_duration(&p).unwrap() - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_forward_pass_order_independent() {
        // Successor listed before its prerequisite
        let p = project(vec![
            Task::new("B", 2.0).with_dependency("A"),
            Task::new("A", 3.0),
        ]);
        let timings = forward_pass(&p).unwrap();
        assert!((timings[0].earliest_start - 3.0).abs() < 1e-10);
        assert!((timings[0].earliest_finish - 5.0).abs() < 1e-10);
        assert!((timings[1].earliest_start - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_dangling_dependency_ignored() {
        let p = project(vec![Task::new("A", 4.0).with_dependency("ghost")]);
        assert!((critical_path_duration(&p).unwrap() - 4.0).abs() < 1e-10);
        let levels = dependency_levels(&p).unwrap();
        assert_eq!(levels[&0], vec!["A".to_string()]);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let p = project(vec![
            Task::new("A", 1.0).with_dependency("B"),
            Task::new("B", 1.0).with_dependency("A"),
        ]);
        assert!(matches!(
            critical_path_duration(&p),
            Err(EngineError::CyclicDependency { .. })
        ));
        assert!(dependency_levels(&p).is_err());
    }

    #[test]
    fn test_dependency_levels() {
        let p = project(vec![
            Task::new("A", 1.0),
            Task::new("B", 1.0).with_dependency("A"),
            Task::new("C", 1.0).with_dependency("A"),
            Task::new("D", 1.0).with_dependency("B").with_dependency("C"),
            Task::new("E", 1.0),
        ]);
        let levels = dependency_levels(&p).unwrap();
        assert_eq!(levels[&0], vec!["A".to_string(), "E".to_string()]);
        assert_eq!(levels[&1], vec!["B".to_string(), "C".to_string()]);
        assert_eq!(levels[&2], vec!["D".to_string()]);
    }

    #[test]
    fn test_schedule_tasks() {
        let mut p = fork();
        schedule_tasks(&mut p).unwrap();

        let t1 = &p.tasks[0];
        assert_eq!(t1.start_date, Some(start()));
        assert_eq!(t1.end_date, Some(start() + Duration::days(10)));

        let t2 = &p.tasks[1];
        assert_eq!(t2.start_date, Some(start() + Duration::days(10)));
        assert_eq!(t2.end_date, Some(start() + Duration::days(25)));
    }

    #[test]
    fn test_schedule_fractional_days() {
        let mut p = project(vec![Task::new("A", 0.5)]);
        schedule_tasks(&mut p).unwrap();
        assert_eq!(p.tasks[0].end_date, Some(start() + Duration::hours(12)));
    }

    #[test]
    fn test_schedule_out_of_range() {
        let mut p = project(vec![
            Task::new("A", 2.0),
            Task::new("B", 1.0e9).with_dependency("A"),
        ]);
        let before = p.clone();
        assert_eq!(
            schedule_tasks(&mut p),
            Err(EngineError::schedule_out_of_range("B"))
        );
        assert_eq!(p, before);
    }

    #[test]
    fn test_long_chain() {
        let n = 50_000;
        let mut tasks = vec![Task::new("T0", 1.0)];
        for i in 1..n {
            tasks.push(Task::new(format!("T{i}"), 1.0).with_dependency(format!("T{}", i - 1)));
        }
        // Reverse so every successor precedes its prerequisite
        tasks.reverse();
        let p = project(tasks);

        assert!((critical_path_duration(&p).unwrap() - n as f64).abs() < 1e-10);
        let levels = dependency_levels(&p).unwrap();
        assert_eq!(levels.len(), n);
        assert_eq!(levels[&(n - 1)], vec![format!("T{}", n - 1)]);
    }

    #[test]
    fn test_dependent_counts() {
        let p = project(vec![
            Task::new("A", 1.0),
            Task::new("B", 1.0).with_dependency("A"),
            Task::new("C", 1.0).with_dependency("A"),
            Task::new("D", 1.0).with_dependency("A").with_dependency("B"),
        ]);
        assert_eq!(dependent_counts(&p), vec![3, 1, 0, 0]);
    }

    #[test]
    fn test_resource_groups() {
        let crane = || Resource::equipment("E").with_name("Crane");
        let p = project(vec![
            Task::new("A", 1.0).with_resource(crane()).with_resource(crane()),
            Task::new("B", 1.0).with_resource(crane()),
            Task::new("C", 1.0).with_resource(Resource::labor("L").with_name("Crane")),
        ]);
        let groups = resource_groups(&p);
        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[&(ResourceKind::Equipment, "Crane".to_string())],
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn test_root_task_count() {
        assert_eq!(root_task_count(&fork()), 1);
    }
}
