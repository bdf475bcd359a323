use std::time::Duration;

use chrono::NaiveDate;
use tgj::models::{Goal, Priority, RecurrenceInterval, Task};
use tgj::store::{Store, StoreError};
use tgj::Database;

fn new_store() -> Store {
    let database = Database::open_in_memory().unwrap();
    Store::new(database, Duration::from_millis(50)).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn completing_a_plain_task_moves_it_to_the_archive() {
    let mut store = new_store();
    let workspace_id = store.workspaces()[0].id;

    let task_id = store
        .add_task(
            workspace_id,
            Task::new("File taxes".to_string(), "Admin".to_string()),
        )
        .unwrap();

    store.toggle_task_completion(task_id).unwrap();

    let workspace = store.workspace(workspace_id).unwrap();
    assert!(workspace.tasks.is_empty());
    assert_eq!(workspace.archived_tasks.len(), 1);

    let archived = &workspace.archived_tasks[0];
    assert_eq!(archived.id, task_id);
    assert!(archived.is_completed);
    assert!(archived.is_archived);
    assert!(archived.last_completed_date.is_some());
}

#[test]
fn completing_a_recurring_task_spawns_exactly_one_successor() {
    let mut store = new_store();
    let workspace_id = store.workspaces()[0].id;

    let mut task = Task::new("Weekly review".to_string(), "Work".to_string());
    task.priority = Priority::High;
    task.notes = "Check the inbox first".to_string();
    task.due_date = Some(date(2025, 3, 7));
    task.is_recurring = true;
    task.recurrence_interval = Some(RecurrenceInterval::Weekly);
    let task_id = store.add_task(workspace_id, task).unwrap();

    store.toggle_task_completion(task_id).unwrap();

    let workspace = store.workspace(workspace_id).unwrap();
    assert!(workspace.archived_tasks.is_empty());
    assert_eq!(workspace.tasks.len(), 2);

    let original = workspace.tasks.iter().find(|t| t.id == task_id).unwrap();
    assert!(original.is_completed);
    assert!(original.last_completed_date.is_some());

    let successor = workspace.tasks.iter().find(|t| t.id != task_id).unwrap();
    assert_eq!(successor.title, "Weekly review");
    assert_eq!(successor.category, "Work");
    assert_eq!(successor.priority, Priority::High);
    assert_eq!(successor.notes, "Check the inbox first");
    assert_eq!(successor.due_date, Some(date(2025, 3, 14)));
    assert!(!successor.is_completed);
    assert!(successor.is_recurring);
    assert_eq!(successor.recurrence_interval, Some(RecurrenceInterval::Weekly));
}

#[test]
fn untoggling_clears_the_completion_stamp() {
    let mut store = new_store();
    let workspace_id = store.workspaces()[0].id;

    let mut task = Task::new("Daily standup".to_string(), "Work".to_string());
    task.is_recurring = true;
    task.recurrence_interval = Some(RecurrenceInterval::Daily);
    let task_id = store.add_task(workspace_id, task).unwrap();

    store.toggle_task_completion(task_id).unwrap();
    store.toggle_task_completion(task_id).unwrap();

    let workspace = store.workspace(workspace_id).unwrap();
    let original = workspace.tasks.iter().find(|t| t.id == task_id).unwrap();
    assert!(!original.is_completed);
    assert_eq!(original.last_completed_date, None);
    // The successor spawned by the first toggle remains
    assert_eq!(workspace.tasks.len(), 2);
}

#[test]
fn archived_tasks_are_unreachable_until_unarchived() {
    let mut store = new_store();
    let workspace_id = store.workspaces()[0].id;

    let task_id = store
        .add_task(
            workspace_id,
            Task::new("One-off errand".to_string(), "Home".to_string()),
        )
        .unwrap();
    store.toggle_task_completion(task_id).unwrap();

    // Toggle does not see archived tasks
    assert!(matches!(
        store.toggle_task_completion(task_id),
        Err(StoreError::NotFound { .. })
    ));

    store.unarchive_task(task_id).unwrap();
    let workspace = store.workspace(workspace_id).unwrap();
    assert_eq!(workspace.tasks.len(), 1);
    assert!(workspace.archived_tasks.is_empty());
    let task = &workspace.tasks[0];
    assert!(!task.is_archived);
    assert!(task.is_completed);

    // Now the regular un-toggle applies
    store.toggle_task_completion(task_id).unwrap();
    let workspace = store.workspace(workspace_id).unwrap();
    assert!(!workspace.tasks[0].is_completed);
    assert_eq!(workspace.tasks[0].last_completed_date, None);
}

#[test]
fn successor_joins_the_original_goal() {
    let mut store = new_store();
    let workspace_id = store.workspaces()[0].id;

    let goal_id = store
        .add_goal(workspace_id, Goal::new("Stay on top of chores".to_string()))
        .unwrap();

    let mut task = Task::new("Laundry".to_string(), "Home".to_string());
    task.is_recurring = true;
    task.recurrence_interval = Some(RecurrenceInterval::Weekly);
    task.goal_id = Some(goal_id);
    let task_id = store.add_task(workspace_id, task).unwrap();

    store.toggle_task_completion(task_id).unwrap();

    let workspace = store.workspace(workspace_id).unwrap();
    let goal = &workspace.goals[0];
    assert_eq!(goal.task_ids.len(), 2);
    assert_eq!(goal.task_ids[0], task_id);

    let resolved = store.tasks_for_goal(goal_id).unwrap();
    assert_eq!(resolved.len(), 2);
}

#[test]
fn goal_progress_counts_archived_completions() {
    let mut store = new_store();
    let workspace_id = store.workspaces()[0].id;

    let goal_id = store
        .add_goal(workspace_id, Goal::new("Declutter".to_string()))
        .unwrap();
    let done_id = store
        .add_task(
            workspace_id,
            Task::new("Sort bookshelf".to_string(), "Home".to_string()),
        )
        .unwrap();
    let open_id = store
        .add_task(
            workspace_id,
            Task::new("Sort closet".to_string(), "Home".to_string()),
        )
        .unwrap();
    store.assign_task_to_goal(goal_id, done_id).unwrap();
    store.assign_task_to_goal(goal_id, open_id).unwrap();

    // Completing the first task archives it; it still counts
    store.toggle_task_completion(done_id).unwrap();

    assert_eq!(store.completion_percentage_for_goal(goal_id).unwrap(), 50.0);
}

#[test]
fn monthly_recurrence_clamps_at_month_end() {
    let monthly = RecurrenceInterval::Monthly;
    assert_eq!(monthly.advance(date(2025, 1, 31)), date(2025, 2, 28));
    assert_eq!(monthly.advance(date(2024, 1, 31)), date(2024, 2, 29));
    assert_eq!(monthly.advance(date(2025, 3, 31)), date(2025, 4, 30));
    assert_eq!(monthly.advance(date(2025, 4, 15)), date(2025, 5, 15));
    assert_eq!(monthly.advance(date(2025, 12, 10)), date(2026, 1, 10));
}

#[test]
fn recurrence_advances_by_one_unit() {
    assert_eq!(
        RecurrenceInterval::Daily.advance(date(2025, 6, 30)),
        date(2025, 7, 1)
    );
    assert_eq!(
        RecurrenceInterval::Weekly.advance(date(2025, 12, 29)),
        date(2026, 1, 5)
    );
    assert_eq!(
        RecurrenceInterval::Yearly.advance(date(2024, 2, 29)),
        date(2025, 2, 28)
    );
    assert_eq!(
        RecurrenceInterval::Yearly.advance(date(2025, 7, 4)),
        date(2026, 7, 4)
    );
}

#[test]
fn recurring_task_without_a_due_date_spawns_an_undated_successor() {
    let mut store = new_store();
    let workspace_id = store.workspaces()[0].id;

    let mut task = Task::new("Stretch".to_string(), "Health".to_string());
    task.is_recurring = true;
    task.recurrence_interval = Some(RecurrenceInterval::Daily);
    let task_id = store.add_task(workspace_id, task).unwrap();

    store.toggle_task_completion(task_id).unwrap();

    let workspace = store.workspace(workspace_id).unwrap();
    let successor = workspace.tasks.iter().find(|t| t.id != task_id).unwrap();
    assert_eq!(successor.due_date, None);
}
