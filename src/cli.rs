use clap::{Parser, Subcommand};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Goal, JournalEntry, Page, Priority, RecurrenceInterval, Task, Workspace};
use crate::store::{Store, StoreError};
use crate::utils::parse_date;

#[derive(Parser)]
#[command(name = "tgj")]
#[command(about = "Tasks, Goals, Pages, Journal - organized into workspaces")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/database)
    #[arg(long)]
    pub dev: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List workspaces (default if no subcommand)
    Workspaces,
    /// Create a new workspace
    AddWorkspace {
        /// Workspace name
        name: String,
    },
    /// Select a workspace by name
    SelectWorkspace {
        /// Workspace name
        name: String,
    },
    /// Add a category label to a workspace
    AddCategory {
        /// Category label
        label: String,
        /// Target workspace name (defaults to the selected workspace)
        #[arg(long)]
        workspace: Option<String>,
    },
    /// Quickly add a new task
    AddTask {
        /// Task title
        title: String,
        /// Category label
        #[arg(long, default_value = "General")]
        category: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Priority (low, medium, high)
        #[arg(long)]
        priority: Option<String>,
        /// Recurrence interval (daily, weekly, monthly, yearly)
        #[arg(long)]
        every: Option<String>,
        /// Target workspace name (defaults to the selected workspace)
        #[arg(long)]
        workspace: Option<String>,
    },
    /// Toggle a task's completion state
    Toggle {
        /// Task id
        id: String,
    },
    /// Quickly add a new goal
    AddGoal {
        /// Goal title
        title: String,
        /// Goal description
        #[arg(long)]
        description: Option<String>,
        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: Option<String>,
        /// Target workspace name (defaults to the selected workspace)
        #[arg(long)]
        workspace: Option<String>,
    },
    /// Quickly add a new page
    AddPage {
        /// Page title
        title: String,
        /// Page content
        #[arg(long)]
        content: Option<String>,
        /// Target workspace name (defaults to the selected workspace)
        #[arg(long)]
        workspace: Option<String>,
    },
    /// Quickly add a new journal entry
    AddJournal {
        /// Journal thoughts
        thoughts: String,
    },
    /// List tasks due today in the selected workspace
    Today,
    /// List upcoming tasks in the selected workspace
    Upcoming,
    /// List goals in the selected workspace with their progress
    Goals,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
    #[error("Failed to parse date: {0}")]
    DateParseError(String),
    #[error("Invalid id: {0}")]
    InvalidId(String),
    #[error("Unknown value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
    #[error("No workspace named '{0}'")]
    UnknownWorkspace(String),
    #[error("No workspace is selected")]
    NoWorkspaceSelected,
}

/// Resolve a workspace argument to an id, falling back to the selection
fn resolve_workspace(store: &Store, name: Option<&str>) -> Result<Uuid, CliError> {
    match name {
        Some(name) => store
            .workspaces()
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.id)
            .ok_or_else(|| CliError::UnknownWorkspace(name.to_string())),
        None => store
            .selected_workspace()
            .map(|w| w.id)
            .ok_or(CliError::NoWorkspaceSelected),
    }
}

fn parse_priority(value: &str) -> Result<Priority, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "low" => Ok(Priority::Low),
        "medium" => Ok(Priority::Medium),
        "high" => Ok(Priority::High),
        _ => Err(CliError::InvalidValue {
            field: "priority",
            value: value.to_string(),
        }),
    }
}

fn parse_interval(value: &str) -> Result<RecurrenceInterval, CliError> {
    match value.to_ascii_lowercase().as_str() {
        "daily" => Ok(RecurrenceInterval::Daily),
        "weekly" => Ok(RecurrenceInterval::Weekly),
        "monthly" => Ok(RecurrenceInterval::Monthly),
        "yearly" => Ok(RecurrenceInterval::Yearly),
        _ => Err(CliError::InvalidValue {
            field: "interval",
            value: value.to_string(),
        }),
    }
}

fn parse_due(due: Option<String>) -> Result<Option<chrono::NaiveDate>, CliError> {
    match due {
        Some(due_str) => parse_date(&due_str)
            .map(Some)
            .map_err(|e| CliError::DateParseError(format!("Invalid date '{}': {}", due_str, e))),
        None => Ok(None),
    }
}

/// Handle the workspaces command
pub fn handle_workspaces(store: &Store) {
    let selected = store.selected_workspace().map(|w| w.id);
    for workspace in store.workspaces() {
        let marker = if Some(workspace.id) == selected { "*" } else { " " };
        println!(
            "{} {}  (tasks: {}, goals: {}, pages: {})  {}",
            marker,
            workspace.name,
            workspace.tasks.len(),
            workspace.goals.len(),
            workspace.pages.len(),
            workspace.id
        );
    }
}

/// Handle the add-workspace command
pub fn handle_add_workspace(name: String, store: &mut Store) -> Result<(), CliError> {
    let id = store.add_workspace(Workspace::new(name))?;
    println!("Workspace created successfully (ID: {})", id);
    Ok(())
}

/// Handle the select-workspace command
pub fn handle_select_workspace(name: String, store: &mut Store) -> Result<(), CliError> {
    let id = resolve_workspace(store, Some(&name))?;
    store.select_workspace(id)?;
    println!("Selected workspace '{}'", name);
    Ok(())
}

/// Handle the add-category command
pub fn handle_add_category(
    label: String,
    workspace: Option<String>,
    store: &mut Store,
) -> Result<(), CliError> {
    let workspace_id = resolve_workspace(store, workspace.as_deref())?;
    store.add_category(workspace_id, label.clone())?;
    println!("Category '{}' added", label);
    Ok(())
}

/// Handle the add-task command
pub fn handle_add_task(
    title: String,
    category: String,
    due: Option<String>,
    priority: Option<String>,
    every: Option<String>,
    workspace: Option<String>,
    store: &mut Store,
) -> Result<(), CliError> {
    let workspace_id = resolve_workspace(store, workspace.as_deref())?;

    let mut task = Task::new(title, category);
    task.due_date = parse_due(due)?;
    if let Some(priority) = priority {
        task.priority = parse_priority(&priority)?;
    }
    if let Some(every) = every {
        task.is_recurring = true;
        task.recurrence_interval = Some(parse_interval(&every)?);
    }

    let id = store.add_task(workspace_id, task)?;
    println!("Task created successfully (ID: {})", id);
    Ok(())
}

/// Handle the toggle command
pub fn handle_toggle(id: String, store: &mut Store) -> Result<(), CliError> {
    let task_id = Uuid::parse_str(&id).map_err(|_| CliError::InvalidId(id))?;
    store.toggle_task_completion(task_id)?;
    println!("Task toggled");
    Ok(())
}

/// Handle the add-goal command
pub fn handle_add_goal(
    title: String,
    description: Option<String>,
    deadline: Option<String>,
    workspace: Option<String>,
    store: &mut Store,
) -> Result<(), CliError> {
    let workspace_id = resolve_workspace(store, workspace.as_deref())?;

    let mut goal = Goal::new(title);
    goal.description = description.unwrap_or_default();
    goal.deadline = parse_due(deadline)?;

    let id = store.add_goal(workspace_id, goal)?;
    println!("Goal created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-page command
pub fn handle_add_page(
    title: String,
    content: Option<String>,
    workspace: Option<String>,
    store: &mut Store,
) -> Result<(), CliError> {
    let workspace_id = resolve_workspace(store, workspace.as_deref())?;
    let page = Page::new(title, content.unwrap_or_default());
    let id = store.add_page(workspace_id, page)?;
    println!("Page created successfully (ID: {})", id);
    Ok(())
}

/// Handle the add-journal command
pub fn handle_add_journal(thoughts: String, store: &mut Store) -> Result<(), CliError> {
    let id = store.add_journal_entry(JournalEntry::new(thoughts))?;
    println!("Journal entry created successfully (ID: {})", id);
    Ok(())
}

/// Handle the today command
pub fn handle_today(store: &Store) -> Result<(), CliError> {
    let workspace_id = resolve_workspace(store, None)?;
    for task in store.tasks_for_today(workspace_id)? {
        let state = if task.is_completed { "x" } else { " " };
        println!("[{}] {}  ({})  {}", state, task.title, task.category, task.id);
    }
    Ok(())
}

/// Handle the upcoming command
pub fn handle_upcoming(store: &Store) -> Result<(), CliError> {
    let workspace_id = resolve_workspace(store, None)?;
    for task in store.upcoming_tasks(workspace_id)? {
        let due = task
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!("{}  {}  ({})  {}", due, task.title, task.category, task.id);
    }
    Ok(())
}

/// Handle the goals command
pub fn handle_goals(store: &Store) -> Result<(), CliError> {
    let workspace_id = resolve_workspace(store, None)?;
    for goal in store.active_goals(workspace_id)? {
        let percentage = store.completion_percentage_for_goal(goal.id)?;
        println!("{:>3.0}%  {}  {}", percentage, goal.title, goal.id);
    }
    Ok(())
}
