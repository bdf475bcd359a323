use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for TGJ
/// If profile is Dev, uses "tgj-dev" instead of "tgj"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "tgj-dev",
        Profile::Prod => "tgj",
    };
    // Use "com" as qualifier for better cross-platform compatibility
    ProjectDirs::from("com", "tgj", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for TGJ
/// If profile is Dev, uses "tgj-dev" instead of "tgj"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "tgj-dev",
        Profile::Prod => "tgj",
    };
    ProjectDirs::from("com", "tgj", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}
