//! Stateless filter functions over the store's collections.
//!
//! Every function recomputes from the slices it is given; nothing is
//! cached, so there is no view to invalidate. Date-relative functions
//! take `today` explicitly so callers control the calendar boundary.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{Goal, JournalEntry, Task};

/// Tasks whose due date falls on `today`
pub fn tasks_for_today(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.due_date == Some(today))
        .collect()
}

/// Tasks whose due date is strictly after `today`
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.due_date.is_some_and(|due| due > today))
        .collect()
}

/// Tasks with the completion flag set
pub fn completed_tasks(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.is_completed).collect()
}

/// Tasks labeled with the given category
pub fn tasks_for_category<'a>(tasks: &'a [Task], category: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.category == category).collect()
}

/// Goals not yet completed
pub fn active_goals(goals: &[Goal]) -> Vec<&Goal> {
    goals.iter().filter(|g| !g.is_completed).collect()
}

/// Goals with the completion flag set
pub fn completed_goals(goals: &[Goal]) -> Vec<&Goal> {
    goals.iter().filter(|g| g.is_completed).collect()
}

/// Goals with a deadline strictly in the future that are not completed
pub fn upcoming_goals(goals: &[Goal], today: NaiveDate) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|g| !g.is_completed && g.deadline.is_some_and(|d| d > today))
        .collect()
}

/// Resolve a goal's ordered task-id references against a task pool.
/// Ids that no longer resolve are silently skipped; list order is kept.
pub fn tasks_for_goal<'a, I>(goal: &Goal, tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task> + Clone,
{
    goal.task_ids
        .iter()
        .filter_map(|id| tasks.clone().into_iter().find(|t| t.id == *id))
        .collect()
}

/// Percentage of the goal's resolvable referenced tasks that are completed.
/// `0.0` when no reference resolves, so an empty goal never divides by zero.
pub fn completion_percentage<'a, I>(goal: &Goal, tasks: I) -> f64
where
    I: IntoIterator<Item = &'a Task> + Clone,
{
    let resolved = tasks_for_goal(goal, tasks);
    if resolved.is_empty() {
        return 0.0;
    }
    let completed = resolved.iter().filter(|t| t.is_completed).count();
    100.0 * completed as f64 / resolved.len() as f64
}

/// Group journal entries by ISO (year, week-of-year), newest week first.
/// The grouping key is derived on read and never persisted.
pub fn journal_by_week(entries: &[JournalEntry]) -> Vec<((i32, u32), Vec<&JournalEntry>)> {
    let mut weeks: BTreeMap<(i32, u32), Vec<&JournalEntry>> = BTreeMap::new();
    for entry in entries {
        weeks.entry(entry.week_key()).or_default().push(entry);
    }
    weeks.into_iter().rev().collect()
}
