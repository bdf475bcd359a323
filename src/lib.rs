pub mod autosave;
pub mod cli;
pub mod config;
pub mod database;
pub mod models;
pub mod queries;
pub mod store;
pub mod utils;

pub use config::Config;
pub use database::Database;
pub use models::{Goal, JournalEntry, Page, Task, Workspace};
pub use store::{Store, StoreError};
pub use utils::Profile;
