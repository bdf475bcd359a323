use clap::Parser;
use color_eyre::Result;
use std::time::Duration;
use tgj::{
    cli::{self, Cli, Commands},
    Config, Database, Profile, Store,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    // Keep the handle alive for the lifetime of the process
    let _logger = init_logging(&config, profile);

    // Initialize the database and hand it to the store
    let db_path = config.get_database_path();
    let database = Database::new(
        db_path
            .to_str()
            .ok_or_else(|| color_eyre::eyre::eyre!("Database path contains invalid UTF-8"))?,
    )?;
    let mut store = Store::new(
        database,
        Duration::from_millis(config.autosave_debounce_ms),
    )?;

    // Dispatch to appropriate command handler
    match cli.command {
        None | Some(Commands::Workspaces) => {
            cli::handle_workspaces(&store);
        }
        Some(Commands::AddWorkspace { name }) => {
            cli::handle_add_workspace(name, &mut store)?;
        }
        Some(Commands::SelectWorkspace { name }) => {
            cli::handle_select_workspace(name, &mut store)?;
        }
        Some(Commands::AddCategory { label, workspace }) => {
            cli::handle_add_category(label, workspace, &mut store)?;
        }
        Some(Commands::AddTask {
            title,
            category,
            due,
            priority,
            every,
            workspace,
        }) => {
            cli::handle_add_task(title, category, due, priority, every, workspace, &mut store)?;
        }
        Some(Commands::Toggle { id }) => {
            cli::handle_toggle(id, &mut store)?;
        }
        Some(Commands::AddGoal {
            title,
            description,
            deadline,
            workspace,
        }) => {
            cli::handle_add_goal(title, description, deadline, workspace, &mut store)?;
        }
        Some(Commands::AddPage {
            title,
            content,
            workspace,
        }) => {
            cli::handle_add_page(title, content, workspace, &mut store)?;
        }
        Some(Commands::AddJournal { thoughts }) => {
            cli::handle_add_journal(thoughts, &mut store)?;
        }
        Some(Commands::Today) => {
            cli::handle_today(&store)?;
        }
        Some(Commands::Upcoming) => {
            cli::handle_upcoming(&store)?;
        }
        Some(Commands::Goals) => {
            cli::handle_goals(&store)?;
        }
    }

    // One-shot process: force the debounced write out before teardown
    store.flush();

    Ok(())
}

/// Start the file logger in the profile's data directory.
/// Logging is best-effort; a failure here must not block the command.
fn init_logging(config: &Config, profile: Profile) -> Option<flexi_logger::LoggerHandle> {
    let log_dir = tgj::utils::get_data_dir(profile).map(|d| d.join("logs"))?;
    let result = flexi_logger::Logger::try_with_str(&config.log_level).and_then(|logger| {
        logger
            .log_to_file(
                flexi_logger::FileSpec::default()
                    .directory(&log_dir)
                    .basename("tgj"),
            )
            .append()
            .start()
    });
    match result {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("WARNING: failed to start logger: {}", e);
            None
        }
    }
}
