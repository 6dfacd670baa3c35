use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finanzgarten::audit::AuditLogger;
use finanzgarten::cli::{
    amount_formatter, handle_budget_command, handle_export_command, handle_import_command,
    handle_profile_command, handle_transaction_command, open_ledger, save, BudgetCommands,
    ExportFormat, ProfileCommands, TransactionCommands,
};
use finanzgarten::config::{paths::FinancePaths, settings::Settings};
use finanzgarten::display::format_dashboard;
use finanzgarten::storage::Storage;

/// Environment variable holding the log filter
const LOG_ENV: &str = "FINANZGARTEN_LOG";

#[derive(Parser)]
#[command(
    name = "finanzgarten",
    version,
    about = "Personal finance tracker with salary-driven budget cycles",
    long_about = "Finanzgarten keeps a running balance of your income and expenses, \
                  starts a new budget cycle whenever a salary arrives, and splits each \
                  salary across fixed costs, needs, wants and savings."
)]
struct Cli {
    /// Data directory (overrides the default location)
    #[arg(long, global = true, env = "FINANZGARTEN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory, settings and an empty profile
    Init,

    /// Show paths and settings
    Config,

    /// Balance, current cycle and budget at a glance
    #[command(alias = "dash")]
    Dashboard,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Budget allocation commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Profile and balance commands
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Export all data
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file, or "-" for stdout (default: finanzgarten-export-YYYY-MM-DD.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace all data with a JSON or YAML export
    Import {
        /// Path to the export file
        path: PathBuf,
    },

    /// Show recent audit log entries
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Delete all transactions and start over with a fresh profile
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => FinancePaths::with_base_dir(dir),
        None => FinancePaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing Finanzgarten at: {}", paths.base_dir().display());
            if !paths.is_initialized() {
                settings.save(&paths)?;
            }
            if storage.initialize()? {
                let profile = storage.profile.load()?.unwrap_or_default();
                println!("Created a new profile with the default categories:");
                for category in &profile.categories {
                    println!("  - {}", category);
                }
            } else {
                println!("Existing profile kept.");
            }
            println!();
            println!("Run 'finanzgarten transaction add income 2500 \"Gehalt\"' to start a budget cycle.");
        }
        Some(Commands::Config) => {
            println!("Finanzgarten Configuration");
            println!("==========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Date format:      {}", settings.date_format);
            println!("  Salary marker:    {}", settings.salary_marker);
            println!("  Default split:    {}", settings.default_split);
            println!("  Split tolerance:  {}%", settings.split_tolerance_percent);
        }
        Some(Commands::Dashboard) => {
            let (ledger, _audit) = open_ledger(&storage, &settings)?;
            let fmt = amount_formatter(&settings, &ledger);
            print!("{}", format_dashboard(&ledger, &fmt, &settings.date_format));
        }
        Some(Commands::Transaction(cmd)) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Profile(cmd)) => {
            handle_profile_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Export { format, output }) => {
            handle_export_command(&storage, &settings, format, output)?;
        }
        Some(Commands::Import { path }) => {
            handle_import_command(&storage, &settings, &path)?;
        }
        Some(Commands::History { count }) => {
            let entries = AuditLogger::new(paths.audit_log()).read_recent(count)?;
            if entries.is_empty() {
                println!("No audit entries yet.");
            }
            for entry in &entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                bail!("Reset deletes all transactions. Re-run with --yes to confirm.");
            }
            let (mut ledger, audit) = open_ledger(&storage, &settings)?;
            ledger.reset();
            save(&storage, &ledger, &audit)?;
            let fmt = amount_formatter(&settings, &ledger);
            println!(
                "All data reset. Balance is back to {}",
                fmt.format(ledger.profile().current_balance)
            );
        }
        None => {
            println!("Finanzgarten - salary-driven budgeting");
            println!();
            println!("Run 'finanzgarten --help' for usage information.");
            println!("Run 'finanzgarten dashboard' for an overview.");
        }
    }

    Ok(())
}
