use std::time::Duration;

use chrono::NaiveDate;
use tgj::database::{Database, DatabaseError, KEY_WORKSPACES};
use tgj::models::{Goal, JournalEntry, Page, Priority, RecurrenceInterval, Task, Workspace};
use tgj::store::Store;

const DEBOUNCE: Duration = Duration::from_millis(100);

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn missing_keys_load_as_empty_collections() {
    let database = Database::open_in_memory().unwrap();

    let loaded: Vec<Workspace> = database.load(KEY_WORKSPACES).unwrap();
    assert!(loaded.is_empty());
    assert!(database.revision(KEY_WORKSPACES).unwrap().is_none());
}

#[test]
fn undecodable_blobs_surface_a_recoverable_error() {
    let database = Database::open_in_memory().unwrap();
    database.write_raw(KEY_WORKSPACES, b"definitely not json").unwrap();

    let result = database.load::<Vec<Workspace>>(KEY_WORKSPACES);
    assert!(matches!(result, Err(DatabaseError::CorruptData { .. })));
}

#[test]
fn save_load_round_trip_is_lossless() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let path_str = path.to_str().unwrap();

    let mut store = Store::new(Database::new(path_str).unwrap(), DEBOUNCE).unwrap();
    let workspace_id = store.workspaces()[0].id;

    let mut goal = Goal::new("Run a marathon".to_string());
    goal.description = "Autumn race".to_string();
    goal.deadline = Some(date(2025, 10, 12));
    let goal_id = store.add_goal(workspace_id, goal).unwrap();

    let mut task = Task::new("Long run".to_string(), "Health".to_string());
    task.priority = Priority::High;
    task.due_date = Some(date(2025, 6, 21));
    task.notes = "20km, easy pace".to_string();
    task.is_recurring = true;
    task.recurrence_interval = Some(RecurrenceInterval::Weekly);
    task.goal_id = Some(goal_id);
    let task_id = store.add_task(workspace_id, task).unwrap();

    // A second task without any of the optional fields, completed and archived
    let plain_id = store
        .add_task(
            workspace_id,
            Task::new("Buy shoes".to_string(), "Shopping".to_string()),
        )
        .unwrap();
    store.toggle_task_completion(plain_id).unwrap();

    let page_id = store
        .add_page(
            workspace_id,
            Page::new("Training plan".to_string(), "Week 1: base".to_string()),
        )
        .unwrap();
    store.select_page(page_id).unwrap();

    store
        .add_journal_entry(JournalEntry::new("Felt strong today".to_string()))
        .unwrap();

    let before = store.workspace(workspace_id).unwrap().clone();
    let journal_before = store.journal().to_vec();

    store.flush();
    drop(store);

    let reopened = Store::new(Database::new(path_str).unwrap(), DEBOUNCE).unwrap();

    assert_eq!(reopened.workspaces().len(), 1);
    let after = reopened.workspace(workspace_id).unwrap();
    assert_eq!(after.name, before.name);
    assert_eq!(after.icon, before.icon);
    assert_eq!(after.color, before.color);
    assert_eq!(after.categories, before.categories);

    assert_eq!(after.tasks.len(), 1);
    let task = &after.tasks[0];
    assert_eq!(task.id, task_id);
    assert_eq!(task.title, "Long run");
    assert_eq!(task.category, "Health");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.due_date, Some(date(2025, 6, 21)));
    assert_eq!(task.notes, "20km, easy pace");
    assert!(task.is_recurring);
    assert_eq!(task.recurrence_interval, Some(RecurrenceInterval::Weekly));
    assert_eq!(task.goal_id, Some(goal_id));
    assert!(!task.is_completed);
    assert_eq!(task.last_completed_date, None);

    assert_eq!(after.archived_tasks.len(), 1);
    let archived = &after.archived_tasks[0];
    assert_eq!(archived.id, plain_id);
    assert!(archived.is_archived);
    assert_eq!(
        archived.last_completed_date,
        before.archived_tasks[0].last_completed_date
    );

    assert_eq!(after.goals.len(), 1);
    let goal = &after.goals[0];
    assert_eq!(goal.id, goal_id);
    assert_eq!(goal.description, "Autumn race");
    assert_eq!(goal.deadline, Some(date(2025, 10, 12)));
    assert_eq!(goal.task_ids, before.goals[0].task_ids);

    assert_eq!(after.pages.len(), 1);
    assert_eq!(after.pages[0].title, "Training plan");
    assert_eq!(after.pages[0].content, "Week 1: base");
    assert_eq!(after.pages[0].date_created, before.pages[0].date_created);
    assert_eq!(after.pages[0].date_modified, before.pages[0].date_modified);

    assert_eq!(reopened.journal().len(), 1);
    assert_eq!(reopened.journal()[0].id, journal_before[0].id);
    assert_eq!(reopened.journal()[0].thoughts, "Felt strong today");
    assert_eq!(reopened.journal()[0].date, journal_before[0].date);

    // Selection pointers survive the restart
    assert_eq!(reopened.selected_workspace().unwrap().id, workspace_id);
    assert_eq!(reopened.selected_page().unwrap().id, page_id);
}

#[test]
fn legacy_workspace_blobs_decode_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let path_str = path.to_str().unwrap();

    // An early record shape: only id and name were ever written
    let legacy = br#"{"version":1,"items":[{"id":"00000000-0000-4000-8000-000000000001","name":"Legacy"}]}"#;
    {
        let database = Database::new(path_str).unwrap();
        database.write_raw(KEY_WORKSPACES, legacy).unwrap();
    }

    let store = Store::new(Database::new(path_str).unwrap(), DEBOUNCE).unwrap();

    assert_eq!(store.workspaces().len(), 1);
    let workspace = &store.workspaces()[0];
    assert_eq!(workspace.name, "Legacy");
    assert_eq!(workspace.icon, "folder");
    assert!(workspace.categories.is_empty());
    assert!(workspace.tasks.is_empty());
    assert!(workspace.archived_tasks.is_empty());
    assert!(workspace.goals.is_empty());
    assert!(workspace.pages.is_empty());
    // The orphaned selection pointer resolves to the only workspace
    assert_eq!(store.selected_workspace().unwrap().id, workspace.id);
}

#[test]
fn corrupt_workspace_data_bootstraps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let path_str = path.to_str().unwrap();

    {
        let database = Database::new(path_str).unwrap();
        database.write_raw(KEY_WORKSPACES, b"\x00\x01garbage").unwrap();
    }

    let store = Store::new(Database::new(path_str).unwrap(), DEBOUNCE).unwrap();

    assert_eq!(store.workspaces().len(), 1);
    assert_eq!(store.workspaces()[0].name, "Personal");
    assert!(store.selected_workspace().is_some());
}

#[test]
fn rapid_mutations_coalesce_into_a_single_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let path_str = path.to_str().unwrap();

    let mut store = Store::new(Database::new(path_str).unwrap(), DEBOUNCE).unwrap();
    let workspace_id = store.workspaces()[0].id;
    let observer = Database::new(path_str).unwrap();

    // Let the bootstrap write settle so it does not fold into the burst
    std::thread::sleep(Duration::from_millis(500));
    let baseline = observer.revision(KEY_WORKSPACES).unwrap().unwrap();

    for i in 0..10 {
        store
            .add_category(workspace_id, format!("Category {i}"))
            .unwrap();
    }

    std::thread::sleep(Duration::from_millis(700));
    let revision = observer.revision(KEY_WORKSPACES).unwrap().unwrap();
    assert_eq!(revision, baseline + 1);

    // The single write holds the final state of the burst
    let loaded: Vec<Workspace> = observer.load(KEY_WORKSPACES).unwrap();
    assert_eq!(loaded[0].categories.len(), 12);
    assert_eq!(loaded[0].categories.last().unwrap(), "Category 9");
}

#[test]
fn flush_writes_immediately_without_waiting_for_the_debounce() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.db");
    let path_str = path.to_str().unwrap();

    let mut store = Store::new(Database::new(path_str).unwrap(), Duration::from_secs(60)).unwrap();
    let workspace_id = store.workspaces()[0].id;

    store
        .add_category(workspace_id, "Urgent".to_string())
        .unwrap();
    store.flush();

    let observer = Database::new(path_str).unwrap();
    let loaded: Vec<Workspace> = observer.load(KEY_WORKSPACES).unwrap();
    assert!(loaded[0].categories.iter().any(|c| c == "Urgent"));
}
