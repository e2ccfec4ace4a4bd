use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use staffing::cli::{
    handle_check_command, handle_repartitions_command, handle_roster_command, RowSpec,
};
use staffing::config::{paths::StaffingPaths, settings::Settings};
use staffing::logging::init_logging;
use staffing::storage::Storage;

#[derive(Parser)]
#[command(
    name = "staffing",
    author = "Kaylee Beyene",
    version,
    about = "Terminal controller for collaborator Build/Run allocations",
    long_about = "staffing-cli edits a collaborator's primary Build/Run allocation and \
                  the secondary allocations that lend part of it to other profiles. \
                  Forms are checked against the available CAF before they are posted \
                  to the staffing server."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    #[command(alias = "ui")]
    Tui,

    /// Show the secondary allocations the server holds for a collaborator
    #[command(alias = "rep")]
    Repartitions {
        /// Collaborator matricule
        matricule: String,
    },

    /// Run the pre-submit budget check without a server
    Check {
        /// Primary Build percentage
        #[arg(short, long, default_value = "")]
        build: String,
        /// Primary Run percentage
        #[arg(short, long, default_value = "")]
        run: String,
        /// Base hours
        #[arg(long, default_value = "")]
        hours: String,
        /// Secondary row as PROFILE_ID:BUILD:RUN (repeatable)
        #[arg(long = "row", value_name = "PID:BUILD:RUN")]
        rows: Vec<RowSpec>,
    },

    /// List the cached roster
    Roster,

    /// Create the settings and roster files
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = StaffingPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let _log_guard = init_logging(&paths, &settings)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    debug!(base = %paths.base_dir().display(), "storage loaded");

    match cli.command {
        Some(Commands::Tui) => {
            staffing::tui::run_tui(&storage, &settings, &paths)?;
        }
        Some(Commands::Repartitions { matricule }) => {
            handle_repartitions_command(&settings, &matricule)?;
        }
        Some(Commands::Check {
            build,
            run,
            hours,
            rows,
        }) => {
            handle_check_command(&settings, &build, &run, &hours, &rows)?;
        }
        Some(Commands::Roster) => {
            handle_roster_command(&storage, &settings)?;
        }
        Some(Commands::Init) => {
            if !staffing::storage::needs_initialization(&paths) {
                println!("Already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }
            println!("Initializing staffing-cli at: {}", paths.base_dir().display());
            staffing::storage::initialize_storage(&paths)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Edit {} to set:", paths.settings_file().display());
            println!("  - server.base_url (currently {})", settings.server.base_url);
            println!("  - the profiles and assignments offered in the forms");
            println!();
            println!("Run 'staffing tui' to open the collaborator forms.");
        }
        Some(Commands::Config) => {
            println!("staffing-cli Configuration");
            println!("==========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Roster file:     {}", paths.roster_file().display());
            println!("Log directory:   {}", paths.log_dir().display());
            println!();
            println!("Settings:");
            println!("  Server:        {}", settings.server.base_url);
            match settings.server.request_timeout_secs {
                Some(secs) => println!("  Timeout:       {}s", secs),
                None => println!("  Timeout:       none"),
            }
            println!(
                "  Modal timings: open {}ms, close {}ms, highlight {}ms",
                settings.timings.open_delay_ms,
                settings.timings.close_delay_ms,
                settings.timings.highlight_ms
            );
            println!("  Profiles:      {}", settings.profiles.len());
            println!("  Assignments:   {}", settings.assignments.len());
            println!("  Log filter:    {}", settings.log_filter);
        }
        None => {
            println!("staffing-cli - collaborator allocation forms");
            println!();
            println!("Run 'staffing --help' for usage information.");
            println!("Run 'staffing tui' to launch the interactive interface.");
        }
    }

    Ok(())
}
