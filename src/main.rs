use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use fintrack::cli::{
    handle_advice_command, handle_backup_command, handle_balance_command,
    handle_dashboard_command, handle_expense_command, handle_goal_command,
    handle_income_command, handle_report_command, handle_reserve_command, BackupCommands,
    BalanceCommands, ExpenseCommands, GoalCommands, IncomeCommands, ReportArgs, ReserveCommands,
};
use fintrack::config::{FinancePaths, Settings};
use fintrack::ledger::LedgerStore;
use fintrack::logging::init_tracing;
use fintrack::storage::{open_file_store, JsonFileStore};

#[derive(Parser)]
#[command(
    name = "fintrack",
    version,
    about = "Personal finance tracker: expenses, incomes, balances and budget pacing",
    long_about = "fintrack keeps a household ledger of expenses, incomes, account \
                  balances and reserves, and reports how this month's spending is \
                  pacing against a monthly goal."
)]
struct Cli {
    /// Directory holding settings, data and backups
    #[arg(long, global = true, env = "FINTRACK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// Account balance commands
    #[command(subcommand)]
    Balance(BalanceCommands),

    /// Reserve management commands
    #[command(subcommand)]
    Reserve(ReserveCommands),

    /// Monthly expense goal commands
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Show totals, balances, pacing and the category breakdown
    Dashboard,

    /// Report on a date range, optionally exporting it
    Report(ReportArgs),

    /// Backup export and restore
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Get spending tips
    Advice,

    /// Show current configuration and paths, or change settings
    Config {
        /// Currency symbol used in output
        #[arg(long)]
        currency: Option<String>,

        /// chrono format string for dates in listings
        #[arg(long)]
        date_format: Option<String>,

        /// Turn the advice service on or off
        #[arg(long)]
        advice_enabled: Option<bool>,

        /// Base URL of the Ollama server
        #[arg(long)]
        advice_url: Option<String>,

        /// Model name passed to the advice service
        #[arg(long)]
        advice_model: Option<String>,
    },
}

fn open_ledger(paths: &FinancePaths) -> Result<LedgerStore<JsonFileStore>> {
    let backend = open_file_store(paths)?;
    Ok(LedgerStore::open(backend)?)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = match cli.data_dir {
        Some(dir) => FinancePaths::with_base_dir(dir),
        None => FinancePaths::new()?,
    };
    let mut settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            let mut store = open_ledger(&paths)?;
            handle_expense_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Income(cmd)) => {
            let mut store = open_ledger(&paths)?;
            handle_income_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Balance(cmd)) => {
            let mut store = open_ledger(&paths)?;
            handle_balance_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Reserve(cmd)) => {
            let mut store = open_ledger(&paths)?;
            handle_reserve_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Goal(cmd)) => {
            let mut store = open_ledger(&paths)?;
            handle_goal_command(&mut store, &settings, cmd)?;
        }
        Some(Commands::Dashboard) => {
            let store = open_ledger(&paths)?;
            handle_dashboard_command(&store, &settings)?;
        }
        Some(Commands::Report(args)) => {
            let store = open_ledger(&paths)?;
            handle_report_command(&store, &paths, &settings, args)?;
        }
        Some(Commands::Backup(cmd)) => {
            let mut store = open_ledger(&paths)?;
            handle_backup_command(&mut store, &paths, cmd)?;
        }
        Some(Commands::Advice) => {
            let store = open_ledger(&paths)?;
            handle_advice_command(&store, &settings)?;
        }
        Some(Commands::Config {
            currency,
            date_format,
            advice_enabled,
            advice_url,
            advice_model,
        }) => {
            let changed = currency.is_some()
                || date_format.is_some()
                || advice_enabled.is_some()
                || advice_url.is_some()
                || advice_model.is_some();

            if let Some(symbol) = currency {
                settings.currency_symbol = symbol;
            }
            if let Some(format) = date_format {
                settings.date_format = format;
            }
            if let Some(enabled) = advice_enabled {
                settings.advice.enabled = enabled;
            }
            if let Some(url) = advice_url {
                settings.advice.base_url = url;
            }
            if let Some(model) = advice_model {
                settings.advice.model = model;
            }
            if changed {
                settings.save(&paths)?;
                println!("Settings saved.");
                println!();
            }

            println!("fintrack Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Reports directory: {}", paths.reports_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!(
                "  Advice:          {} ({} at {})",
                if settings.advice.enabled { "enabled" } else { "disabled" },
                settings.advice.model,
                settings.advice.base_url
            );
        }
        None => {
            println!("fintrack - personal finance tracker");
            println!();
            println!("Run 'fintrack --help' for usage information.");
            println!("Run 'fintrack dashboard' for this month's overview.");
        }
    }

    Ok(())
}
