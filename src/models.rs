use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// Cadence at which a completed recurring task spawns its next occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceInterval {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrenceInterval {
    /// Advance a due date by one recurrence unit.
    /// Monthly and yearly steps clamp the day-of-month at month end
    /// (Jan 31 advances to the last day of February, never into March).
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        let next = match self {
            RecurrenceInterval::Daily => date.checked_add_days(Days::new(1)),
            RecurrenceInterval::Weekly => date.checked_add_days(Days::new(7)),
            RecurrenceInterval::Monthly => date.checked_add_months(Months::new(1)),
            RecurrenceInterval::Yearly => date.checked_add_months(Months::new(12)),
        };
        // None only past chrono's representable date bounds
        next.unwrap_or(date)
    }
}

/// Workspace accent color as three normalized channels.
/// Persisted as plain floats rather than any platform color type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorComponents {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl Default for ColorComponents {
    fn default() -> Self {
        Self {
            red: 0.35,
            green: 0.55,
            blue: 0.95,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_interval: Option<RecurrenceInterval>,
    #[serde(default)]
    pub is_archived: bool,
    #[serde(default)]
    pub last_completed_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub goal_id: Option<Uuid>,
}

impl Task {
    pub fn new(title: String, category: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            is_completed: false,
            category,
            priority: Priority::Medium,
            due_date: None,
            notes: String::new(),
            is_recurring: false,
            recurrence_interval: None,
            is_archived: false,
            last_completed_date: None,
            goal_id: None,
        }
    }

    /// Build the next occurrence of a recurring task: fresh identity,
    /// same title/category/priority/notes, due date advanced by one unit,
    /// completion reset.
    pub fn next_occurrence(&self) -> Self {
        let due_date = match (self.due_date, self.recurrence_interval) {
            (Some(date), Some(interval)) => Some(interval.advance(date)),
            (date, _) => date,
        };
        Self {
            id: Uuid::new_v4(),
            title: self.title.clone(),
            is_completed: false,
            category: self.category.clone(),
            priority: self.priority,
            due_date,
            notes: self.notes.clone(),
            is_recurring: self.is_recurring,
            recurrence_interval: self.recurrence_interval,
            is_archived: false,
            last_completed_date: None,
            goal_id: self.goal_id,
        }
    }
}

// Entity equality is identity equality: two records with the same field
// values but different ids are distinct entities.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub is_completed: bool,
    /// Ordered weak references into the workspace's task collection.
    /// Ids that no longer resolve are tolerated and skipped by queries.
    #[serde(default)]
    pub task_ids: Vec<Uuid>,
}

impl Goal {
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: String::new(),
            deadline: None,
            is_completed: false,
            task_ids: Vec::new(),
        }
    }
}

impl PartialEq for Goal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Goal {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "Utc::now")]
    pub date_created: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub date_modified: DateTime<Utc>,
}

impl Page {
    pub fn new(title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            date_created: now,
            date_modified: now,
        }
    }
}

impl PartialEq for Page {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Page {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub color: ColorComponents,
    /// Ordered category labels; duplicates are rejected on insert.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Completed non-recurring tasks, moved out of the active set.
    #[serde(default)]
    pub archived_tasks: Vec<Task>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

fn default_icon() -> String {
    "folder".to_string()
}

impl Workspace {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            icon: default_icon(),
            color: ColorComponents::default(),
            categories: Vec::new(),
            tasks: Vec::new(),
            archived_tasks: Vec::new(),
            goals: Vec::new(),
            pages: Vec::new(),
        }
    }
}

impl PartialEq for Workspace {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Workspace {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    #[serde(default)]
    pub thoughts: String,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(thoughts: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            thoughts,
            date: Utc::now(),
        }
    }

    /// Presentation grouping key: ISO (year, week-of-year).
    /// Recomputed on read, never persisted.
    pub fn week_key(&self) -> (i32, u32) {
        let week = self.date.date_naive().iso_week();
        (week.year(), week.week())
    }
}

impl PartialEq for JournalEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for JournalEntry {}
