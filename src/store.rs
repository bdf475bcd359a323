use chrono::{Local, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::autosave::{Autosave, Snapshot};
use crate::database::{Database, DatabaseError, KEY_JOURNAL, KEY_SELECTION, KEY_WORKSPACES};
use crate::models::{ColorComponents, Goal, JournalEntry, Page, Task, Workspace};
use crate::queries;

/// Entity discriminant carried inside not-found errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Workspace,
    Task,
    Goal,
    Page,
    JournalEntry,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Workspace => "workspace",
            EntityKind::Task => "task",
            EntityKind::Goal => "goal",
            EntityKind::Page => "page",
            EntityKind::JournalEntry => "journal entry",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No {entity} with id {id}")]
    NotFound { entity: EntityKind, id: Uuid },
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),
}

fn not_found(entity: EntityKind, id: Uuid) -> StoreError {
    StoreError::NotFound { entity, id }
}

/// Store-level pointers, held by identity and re-resolved against the
/// canonical collections on every read so consumers never see stale copies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub workspace_id: Option<Uuid>,
    #[serde(default)]
    pub page_id: Option<Uuid>,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

/// The single in-memory source of truth. All mutation goes through it.
///
/// Every successful mutation updates the canonical collections
/// synchronously, hands a snapshot to the debounced autosave writer, and
/// then notifies subscribers in registration order. Notification carries
/// no payload; subscribers re-read state through the accessors.
pub struct Store {
    workspaces: Vec<Workspace>,
    journal: Vec<JournalEntry>,
    selection: Selection,
    subscribers: Vec<(SubscriberId, Box<dyn FnMut() + Send>)>,
    next_subscriber_id: u64,
    autosave: Autosave,
}

impl Store {
    /// Load the persisted state and take ownership of the database, which
    /// moves into the autosave writer. Corrupt collections are logged and
    /// treated as empty; an empty workspace list bootstraps default data.
    pub fn new(database: Database, debounce: Duration) -> Result<Self, StoreError> {
        let mut workspaces = match database.load::<Vec<Workspace>>(KEY_WORKSPACES) {
            Ok(items) => items,
            Err(e @ DatabaseError::CorruptData { .. }) => {
                warn!("discarding corrupt workspace data: {e}");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        let journal = match database.load::<Vec<JournalEntry>>(KEY_JOURNAL) {
            Ok(items) => items,
            Err(e @ DatabaseError::CorruptData { .. }) => {
                warn!("discarding corrupt journal data: {e}");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };
        let mut selection = match database.load::<Selection>(KEY_SELECTION) {
            Ok(selection) => selection,
            Err(e @ DatabaseError::CorruptData { .. }) => {
                warn!("discarding corrupt selection data: {e}");
                Selection::default()
            }
            Err(e) => return Err(e.into()),
        };

        let bootstrapped = workspaces.is_empty();
        if bootstrapped {
            info!("no workspaces found, creating default workspace");
            let mut workspace = Workspace::new("Personal".to_string());
            workspace.categories = vec!["Personal".to_string(), "Work".to_string()];
            workspaces.push(workspace);
        }

        // Persisted pointers may reference entities that no longer exist
        let selected_resolves = workspaces
            .iter()
            .any(|w| Some(w.id) == selection.workspace_id);
        if !selected_resolves {
            selection.workspace_id = workspaces.first().map(|w| w.id);
            selection.page_id = None;
        } else if let Some(page_id) = selection.page_id {
            let page_resolves = workspaces
                .iter()
                .find(|w| Some(w.id) == selection.workspace_id)
                .is_some_and(|w| w.pages.iter().any(|p| p.id == page_id));
            if !page_resolves {
                selection.page_id = None;
            }
        }

        let store = Self {
            workspaces,
            journal,
            selection,
            subscribers: Vec::new(),
            next_subscriber_id: 0,
            autosave: Autosave::spawn(database, debounce),
        };
        if bootstrapped {
            store.autosave.schedule(store.snapshot());
        }
        Ok(store)
    }

    // --- Accessors ---

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn workspace(&self, id: Uuid) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Resolve the selected-workspace pointer against the canonical list
    pub fn selected_workspace(&self) -> Option<&Workspace> {
        self.selection
            .workspace_id
            .and_then(|id| self.workspace(id))
    }

    /// Resolve the selected-page pointer against the canonical list
    pub fn selected_page(&self) -> Option<&Page> {
        let page_id = self.selection.page_id?;
        self.selected_workspace()?
            .pages
            .iter()
            .find(|p| p.id == page_id)
    }

    // --- Subscriptions ---

    /// Register a change callback, invoked synchronously after every
    /// committed mutation, in registration order. The callback carries no
    /// payload; re-read state through the accessors.
    pub fn subscribe(&mut self, callback: Box<dyn FnMut() + Send>) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;
        self.subscribers.push((id, callback));
        id
    }

    /// Remove a subscriber; returns false if the id was already gone
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Write the current state durably and wait for the write to finish.
    /// The debounced autosave makes this unnecessary except at teardown.
    pub fn flush(&self) {
        self.autosave.flush(self.snapshot());
    }

    // --- Workspace operations ---

    pub fn add_workspace(&mut self, workspace: Workspace) -> Result<Uuid, StoreError> {
        validate_title(&workspace.name, "workspace name")?;
        let id = workspace.id;
        self.workspaces.push(workspace);
        if self.selection.workspace_id.is_none() {
            self.selection.workspace_id = Some(id);
        }
        self.commit();
        Ok(id)
    }

    pub fn update_workspace(
        &mut self,
        id: Uuid,
        name: String,
        icon: String,
        color: ColorComponents,
    ) -> Result<(), StoreError> {
        validate_title(&name, "workspace name")?;
        let workspace = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| not_found(EntityKind::Workspace, id))?;
        workspace.name = name;
        workspace.icon = icon;
        workspace.color = color;
        self.commit();
        Ok(())
    }

    /// Delete a workspace and everything it owns. If it was selected, the
    /// page pointer clears and selection moves to the first remaining
    /// workspace, or to none.
    pub fn delete_workspace(&mut self, id: Uuid) -> Result<(), StoreError> {
        let position = self
            .workspaces
            .iter()
            .position(|w| w.id == id)
            .ok_or_else(|| not_found(EntityKind::Workspace, id))?;
        self.workspaces.remove(position);
        if self.selection.workspace_id == Some(id) {
            self.selection.page_id = None;
            self.selection.workspace_id = self.workspaces.first().map(|w| w.id);
        }
        self.commit();
        Ok(())
    }

    /// Point selection at another workspace. The page pointer clears
    /// unless the page belongs to the newly selected workspace.
    pub fn select_workspace(&mut self, id: Uuid) -> Result<(), StoreError> {
        let workspace = self
            .workspaces
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| not_found(EntityKind::Workspace, id))?;
        let keep_page = self
            .selection
            .page_id
            .is_some_and(|pid| workspace.pages.iter().any(|p| p.id == pid));
        if !keep_page {
            self.selection.page_id = None;
        }
        self.selection.workspace_id = Some(id);
        self.commit();
        Ok(())
    }

    /// Append a category label. Adding a duplicate is a no-op.
    pub fn add_category(&mut self, workspace_id: Uuid, label: String) -> Result<(), StoreError> {
        validate_title(&label, "category")?;
        let workspace = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == workspace_id)
            .ok_or_else(|| not_found(EntityKind::Workspace, workspace_id))?;
        if workspace.categories.contains(&label) {
            return Ok(());
        }
        workspace.categories.push(label);
        self.commit();
        Ok(())
    }

    // --- Task operations ---

    pub fn add_task(&mut self, workspace_id: Uuid, task: Task) -> Result<Uuid, StoreError> {
        validate_task(&task)?;
        let workspace = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == workspace_id)
            .ok_or_else(|| not_found(EntityKind::Workspace, workspace_id))?;
        let task_id = task.id;
        if let Some(goal_id) = task.goal_id {
            let goal = workspace
                .goals
                .iter_mut()
                .find(|g| g.id == goal_id)
                .ok_or_else(|| not_found(EntityKind::Goal, goal_id))?;
            if !goal.task_ids.contains(&task_id) {
                goal.task_ids.push(task_id);
            }
        }
        workspace.tasks.push(task);
        self.commit();
        Ok(task_id)
    }

    /// Replace an active task by id. A changed goal reference also moves
    /// the id between the goals' ordered task lists.
    pub fn update_task(&mut self, task: Task) -> Result<(), StoreError> {
        validate_task(&task)?;
        let (ws_idx, task_idx) = self
            .locate_task(task.id)
            .ok_or_else(|| not_found(EntityKind::Task, task.id))?;
        let workspace = &mut self.workspaces[ws_idx];
        let task_id = task.id;
        let old_goal = workspace.tasks[task_idx].goal_id;
        let new_goal = task.goal_id;
        workspace.tasks[task_idx] = task;
        if old_goal != new_goal {
            if let Some(goal) = old_goal.and_then(|gid| workspace.goals.iter_mut().find(|g| g.id == gid)) {
                goal.task_ids.retain(|tid| *tid != task_id);
            }
            if let Some(goal) = new_goal.and_then(|gid| workspace.goals.iter_mut().find(|g| g.id == gid)) {
                if !goal.task_ids.contains(&task_id) {
                    goal.task_ids.push(task_id);
                }
            }
        }
        self.commit();
        Ok(())
    }

    /// Delete a task from the active or archived collection. The id may
    /// linger in goal task lists; queries skip dangling references.
    pub fn delete_task(&mut self, id: Uuid) -> Result<(), StoreError> {
        if let Some((ws_idx, task_idx)) = self.locate_task(id) {
            self.workspaces[ws_idx].tasks.remove(task_idx);
        } else if let Some((ws_idx, task_idx)) = self.locate_archived_task(id) {
            self.workspaces[ws_idx].archived_tasks.remove(task_idx);
        } else {
            return Err(not_found(EntityKind::Task, id));
        }
        self.commit();
        Ok(())
    }

    /// Flip a task's completion state.
    ///
    /// Completing a recurring task stamps it and appends its next
    /// occurrence; completing a non-recurring task moves it to the
    /// workspace's archive. Un-completing clears the stamp but never
    /// un-archives; archived tasks are only reachable via `unarchive_task`.
    pub fn toggle_task_completion(&mut self, id: Uuid) -> Result<(), StoreError> {
        let (ws_idx, task_idx) = self
            .locate_task(id)
            .ok_or_else(|| not_found(EntityKind::Task, id))?;
        let workspace = &mut self.workspaces[ws_idx];

        if !workspace.tasks[task_idx].is_completed {
            {
                let task = &mut workspace.tasks[task_idx];
                task.is_completed = true;
                task.last_completed_date = Some(Utc::now());
            }
            if workspace.tasks[task_idx].is_recurring {
                let successor = workspace.tasks[task_idx].next_occurrence();
                let successor_id = successor.id;
                let goal_id = workspace.tasks[task_idx].goal_id;
                workspace.tasks.push(successor);
                if let Some(goal) =
                    goal_id.and_then(|gid| workspace.goals.iter_mut().find(|g| g.id == gid))
                {
                    goal.task_ids.push(successor_id);
                }
            } else {
                let mut archived = workspace.tasks.remove(task_idx);
                archived.is_archived = true;
                workspace.archived_tasks.push(archived);
            }
        } else {
            let task = &mut workspace.tasks[task_idx];
            task.is_completed = false;
            task.last_completed_date = None;
        }
        self.commit();
        Ok(())
    }

    /// Move an archived task back into the active collection. The task
    /// stays completed; un-toggle it to clear the completion stamp.
    pub fn unarchive_task(&mut self, id: Uuid) -> Result<(), StoreError> {
        let (ws_idx, task_idx) = self
            .locate_archived_task(id)
            .ok_or_else(|| not_found(EntityKind::Task, id))?;
        let workspace = &mut self.workspaces[ws_idx];
        let mut task = workspace.archived_tasks.remove(task_idx);
        task.is_archived = false;
        workspace.tasks.push(task);
        self.commit();
        Ok(())
    }

    // --- Goal operations ---

    pub fn add_goal(&mut self, workspace_id: Uuid, goal: Goal) -> Result<Uuid, StoreError> {
        validate_title(&goal.title, "goal title")?;
        let workspace = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == workspace_id)
            .ok_or_else(|| not_found(EntityKind::Workspace, workspace_id))?;
        let id = goal.id;
        workspace.goals.push(goal);
        self.commit();
        Ok(id)
    }

    pub fn update_goal(&mut self, goal: Goal) -> Result<(), StoreError> {
        validate_title(&goal.title, "goal title")?;
        let (ws_idx, goal_idx) = self
            .locate_goal(goal.id)
            .ok_or_else(|| not_found(EntityKind::Goal, goal.id))?;
        self.workspaces[ws_idx].goals[goal_idx] = goal;
        self.commit();
        Ok(())
    }

    /// Delete a goal and clear the back-reference on any task that
    /// pointed at it.
    pub fn delete_goal(&mut self, id: Uuid) -> Result<(), StoreError> {
        let (ws_idx, goal_idx) = self
            .locate_goal(id)
            .ok_or_else(|| not_found(EntityKind::Goal, id))?;
        let workspace = &mut self.workspaces[ws_idx];
        workspace.goals.remove(goal_idx);
        for task in workspace
            .tasks
            .iter_mut()
            .chain(workspace.archived_tasks.iter_mut())
        {
            if task.goal_id == Some(id) {
                task.goal_id = None;
            }
        }
        self.commit();
        Ok(())
    }

    pub fn toggle_goal_completion(&mut self, id: Uuid) -> Result<(), StoreError> {
        let (ws_idx, goal_idx) = self
            .locate_goal(id)
            .ok_or_else(|| not_found(EntityKind::Goal, id))?;
        let goal = &mut self.workspaces[ws_idx].goals[goal_idx];
        goal.is_completed = !goal.is_completed;
        self.commit();
        Ok(())
    }

    /// Link an active task to a goal in the same workspace. Repeating an
    /// existing assignment is a no-op.
    pub fn assign_task_to_goal(&mut self, goal_id: Uuid, task_id: Uuid) -> Result<(), StoreError> {
        let (ws_idx, goal_idx) = self
            .locate_goal(goal_id)
            .ok_or_else(|| not_found(EntityKind::Goal, goal_id))?;
        let workspace = &mut self.workspaces[ws_idx];
        let task = workspace
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| not_found(EntityKind::Task, task_id))?;
        let already_linked = task.goal_id == Some(goal_id)
            && workspace.goals[goal_idx].task_ids.contains(&task_id);
        if already_linked {
            return Ok(());
        }
        task.goal_id = Some(goal_id);
        let goal = &mut workspace.goals[goal_idx];
        if !goal.task_ids.contains(&task_id) {
            goal.task_ids.push(task_id);
        }
        self.commit();
        Ok(())
    }

    // --- Page operations ---

    pub fn add_page(&mut self, workspace_id: Uuid, page: Page) -> Result<Uuid, StoreError> {
        validate_title(&page.title, "page title")?;
        let workspace = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == workspace_id)
            .ok_or_else(|| not_found(EntityKind::Workspace, workspace_id))?;
        let id = page.id;
        workspace.pages.push(page);
        self.commit();
        Ok(id)
    }

    /// Rewrite a page's title and content, stamping `date_modified`.
    /// The stamp moves on every mutation, never on read.
    pub fn update_page(&mut self, id: Uuid, title: String, content: String) -> Result<(), StoreError> {
        validate_title(&title, "page title")?;
        let (ws_idx, page_idx) = self
            .locate_page(id)
            .ok_or_else(|| not_found(EntityKind::Page, id))?;
        let page = &mut self.workspaces[ws_idx].pages[page_idx];
        page.title = title;
        page.content = content;
        page.date_modified = Utc::now();
        self.commit();
        Ok(())
    }

    pub fn delete_page(&mut self, id: Uuid) -> Result<(), StoreError> {
        let (ws_idx, page_idx) = self
            .locate_page(id)
            .ok_or_else(|| not_found(EntityKind::Page, id))?;
        self.workspaces[ws_idx].pages.remove(page_idx);
        if self.selection.page_id == Some(id) {
            self.selection.page_id = None;
        }
        self.commit();
        Ok(())
    }

    /// Point selection at a page of the selected workspace
    pub fn select_page(&mut self, id: Uuid) -> Result<(), StoreError> {
        let belongs = self
            .selected_workspace()
            .is_some_and(|w| w.pages.iter().any(|p| p.id == id));
        if !belongs {
            return Err(not_found(EntityKind::Page, id));
        }
        self.selection.page_id = Some(id);
        self.commit();
        Ok(())
    }

    // --- Journal operations ---

    pub fn add_journal_entry(&mut self, entry: JournalEntry) -> Result<Uuid, StoreError> {
        let id = entry.id;
        self.journal.push(entry);
        self.commit();
        Ok(id)
    }

    pub fn update_journal_entry(&mut self, entry: JournalEntry) -> Result<(), StoreError> {
        let existing = self
            .journal
            .iter_mut()
            .find(|e| e.id == entry.id)
            .ok_or_else(|| not_found(EntityKind::JournalEntry, entry.id))?;
        *existing = entry;
        self.commit();
        Ok(())
    }

    pub fn delete_journal_entry(&mut self, id: Uuid) -> Result<(), StoreError> {
        let position = self
            .journal
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| not_found(EntityKind::JournalEntry, id))?;
        self.journal.remove(position);
        self.commit();
        Ok(())
    }

    // --- Derived queries ---
    // Thin wrappers over the stateless functions in `queries`, scoped to a
    // workspace and pinned to the local calendar day.

    pub fn categories(&self, workspace_id: Uuid) -> Result<Vec<String>, StoreError> {
        let workspace = self.require_workspace(workspace_id)?;
        Ok(workspace.categories.clone())
    }

    pub fn tasks_for_category(
        &self,
        workspace_id: Uuid,
        category: &str,
    ) -> Result<Vec<&Task>, StoreError> {
        let workspace = self.require_workspace(workspace_id)?;
        Ok(queries::tasks_for_category(&workspace.tasks, category))
    }

    pub fn tasks_for_today(&self, workspace_id: Uuid) -> Result<Vec<&Task>, StoreError> {
        let workspace = self.require_workspace(workspace_id)?;
        Ok(queries::tasks_for_today(
            &workspace.tasks,
            Local::now().date_naive(),
        ))
    }

    pub fn upcoming_tasks(&self, workspace_id: Uuid) -> Result<Vec<&Task>, StoreError> {
        let workspace = self.require_workspace(workspace_id)?;
        Ok(queries::upcoming_tasks(
            &workspace.tasks,
            Local::now().date_naive(),
        ))
    }

    pub fn completed_tasks(&self, workspace_id: Uuid) -> Result<Vec<&Task>, StoreError> {
        let workspace = self.require_workspace(workspace_id)?;
        Ok(queries::completed_tasks(&workspace.tasks))
    }

    pub fn active_goals(&self, workspace_id: Uuid) -> Result<Vec<&Goal>, StoreError> {
        let workspace = self.require_workspace(workspace_id)?;
        Ok(queries::active_goals(&workspace.goals))
    }

    pub fn completed_goals(&self, workspace_id: Uuid) -> Result<Vec<&Goal>, StoreError> {
        let workspace = self.require_workspace(workspace_id)?;
        Ok(queries::completed_goals(&workspace.goals))
    }

    pub fn upcoming_goals(&self, workspace_id: Uuid) -> Result<Vec<&Goal>, StoreError> {
        let workspace = self.require_workspace(workspace_id)?;
        Ok(queries::upcoming_goals(
            &workspace.goals,
            Local::now().date_naive(),
        ))
    }

    /// Resolve a goal's references against its workspace's tasks, archived
    /// ones included (a completed task that moved to the archive still
    /// counts toward the goal).
    pub fn tasks_for_goal(&self, goal_id: Uuid) -> Result<Vec<&Task>, StoreError> {
        let (ws_idx, goal_idx) = self
            .locate_goal(goal_id)
            .ok_or_else(|| not_found(EntityKind::Goal, goal_id))?;
        let workspace = &self.workspaces[ws_idx];
        Ok(queries::tasks_for_goal(
            &workspace.goals[goal_idx],
            workspace.tasks.iter().chain(workspace.archived_tasks.iter()),
        ))
    }

    pub fn completion_percentage_for_goal(&self, goal_id: Uuid) -> Result<f64, StoreError> {
        let (ws_idx, goal_idx) = self
            .locate_goal(goal_id)
            .ok_or_else(|| not_found(EntityKind::Goal, goal_id))?;
        let workspace = &self.workspaces[ws_idx];
        Ok(queries::completion_percentage(
            &workspace.goals[goal_idx],
            workspace.tasks.iter().chain(workspace.archived_tasks.iter()),
        ))
    }

    pub fn journal_by_week(&self) -> Vec<((i32, u32), Vec<&JournalEntry>)> {
        queries::journal_by_week(&self.journal)
    }

    // --- Internals ---

    fn require_workspace(&self, id: Uuid) -> Result<&Workspace, StoreError> {
        self.workspace(id)
            .ok_or_else(|| not_found(EntityKind::Workspace, id))
    }

    fn locate_task(&self, id: Uuid) -> Option<(usize, usize)> {
        self.workspaces.iter().enumerate().find_map(|(ws_idx, w)| {
            w.tasks
                .iter()
                .position(|t| t.id == id)
                .map(|task_idx| (ws_idx, task_idx))
        })
    }

    fn locate_archived_task(&self, id: Uuid) -> Option<(usize, usize)> {
        self.workspaces.iter().enumerate().find_map(|(ws_idx, w)| {
            w.archived_tasks
                .iter()
                .position(|t| t.id == id)
                .map(|task_idx| (ws_idx, task_idx))
        })
    }

    fn locate_goal(&self, id: Uuid) -> Option<(usize, usize)> {
        self.workspaces.iter().enumerate().find_map(|(ws_idx, w)| {
            w.goals
                .iter()
                .position(|g| g.id == id)
                .map(|goal_idx| (ws_idx, goal_idx))
        })
    }

    fn locate_page(&self, id: Uuid) -> Option<(usize, usize)> {
        self.workspaces.iter().enumerate().find_map(|(ws_idx, w)| {
            w.pages
                .iter()
                .position(|p| p.id == id)
                .map(|page_idx| (ws_idx, page_idx))
        })
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            workspaces: self.workspaces.clone(),
            journal: self.journal.clone(),
            selection: self.selection.clone(),
        }
    }

    /// Mutation epilogue: schedule the debounced write, then notify.
    /// Notification is synchronous and independent of the write.
    fn commit(&mut self) {
        self.autosave.schedule(self.snapshot());
        for (_, callback) in self.subscribers.iter_mut() {
            callback();
        }
    }
}

fn validate_title(value: &str, what: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::Validation(format!("{what} cannot be empty")));
    }
    Ok(())
}

fn validate_task(task: &Task) -> Result<(), StoreError> {
    validate_title(&task.title, "task title")?;
    if task.is_recurring && task.recurrence_interval.is_none() {
        return Err(StoreError::Validation(
            "recurring task needs a recurrence interval".to_string(),
        ));
    }
    Ok(())
}
