use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ledgerly::audit::AuditLogger;
use ledgerly::cli::{run_script, run_shell, Session};
use ledgerly::config::{LedgerPaths, Settings};
use ledgerly::models::CurrencyCatalog;

#[derive(Parser)]
#[command(
    name = "ledgerly",
    author = "Kaylee Beyene",
    version,
    about = "Session-based personal finance tracker",
    long_about = "Ledgerly records income and expenses, keeps category budgets in step \
                  with what you spend, tracks account balances and reports spending \
                  trends. Everything happens inside one session: type commands at the \
                  prompt or run them from a script."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    Shell,

    /// Run the commands in a file, one per line
    Run {
        /// Script path, or - for standard input
        script: PathBuf,
    },

    /// List the currencies a session can display
    Currencies,

    /// Show current configuration and paths
    Config,

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn open_session(paths: LedgerPaths, settings: Settings) -> Session {
    let audit = settings
        .audit_enabled
        .then(|| AuditLogger::new(paths.audit_log()));
    let mut session = Session::new(paths, settings);
    if let Some(logger) = audit {
        session.store.subscribe(logger.listener());
    }
    session
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = LedgerPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let mut session = open_session(paths, settings);
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            if interactive {
                println!("Ledgerly - type 'help' for commands, 'exit' to leave.");
            }
            run_shell(&mut session, stdin.lock(), &mut io::stdout(), interactive)?;
        }
        Commands::Run { script } => {
            let mut session = open_session(paths, settings);
            let mut stdout = io::stdout();
            if script.as_os_str() == "-" {
                run_script(&mut session, io::stdin().lock(), &mut stdout)?;
            } else {
                let file = File::open(&script)
                    .with_context(|| format!("Cannot open script {}", script.display()))?;
                run_script(&mut session, BufReader::new(file), &mut stdout)
                    .with_context(|| format!("Script {} failed", script.display()))?;
            }
        }
        Commands::Currencies => {
            let catalog = CurrencyCatalog::default();
            for currency in catalog.all() {
                let marker = if currency.code.eq_ignore_ascii_case(&settings.default_currency) {
                    "*"
                } else {
                    " "
                };
                println!("{} {}", marker, currency);
            }
        }
        Commands::Config => {
            println!("Ledgerly Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!();
            println!("Settings:");
            println!("  Default currency: {}", settings.default_currency);
            println!("  Spent policy:     {}", settings.spent_policy);
            println!("  Budget period:    {}", settings.default_budget_period);
            println!("  Audit enabled:    {}", settings.audit_enabled);
            println!("  Date format:      {}", settings.date_format);
        }
        Commands::Audit { limit } => {
            let logger = AuditLogger::new(paths.audit_log());
            let entries = logger.read_recent(limit)?;
            if entries.is_empty() {
                println!("No audit entries.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
    }

    Ok(())
}
