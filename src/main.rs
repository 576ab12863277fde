use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use kurlar::cli::favorites::FavoriteAction;
use kurlar::cli::selection::SelectAction;
use kurlar::core::log::init_logging;
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_code(value: &str) -> Result<String, String> {
    let code = value.trim().to_uppercase();
    if code.is_empty() {
        return Err("currency code must not be empty".to_string());
    }
    Ok(code)
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display exchange rates
    Rates {
        /// Bulletin date (YYYY-MM-DD), defaults to the latest
        #[arg(short, long)]
        date: Option<NaiveDate>,
        /// Filter by code or name
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Convert an amount between two currencies
    Convert {
        amount: Decimal,
        /// Source currency code, TRY for the lira
        #[arg(value_parser = parse_code)]
        from: String,
        /// Target currency code
        #[arg(value_parser = parse_code)]
        to: String,
        /// Bulletin date (YYYY-MM-DD), defaults to the latest
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Show or change which currencies are displayed
    Select {
        #[command(subcommand)]
        action: SelectCommand,
    },
    /// Show or change favorite currencies
    Favorite {
        #[command(subcommand)]
        action: FavoriteCommand,
    },
}

#[derive(Subcommand)]
enum SelectCommand {
    /// List selected currencies
    List,
    /// Select every published currency
    All,
    /// Clear the selection
    None,
    /// Flip the selection of each code
    Toggle {
        #[arg(required = true, value_parser = parse_code)]
        codes: Vec<String>,
    },
}

#[derive(Subcommand)]
enum FavoriteCommand {
    /// List favorite currencies
    List,
    /// Add codes to favorites
    Add {
        #[arg(required = true, value_parser = parse_code)]
        codes: Vec<String>,
    },
    /// Remove codes from favorites
    Remove {
        #[arg(required = true, value_parser = parse_code)]
        codes: Vec<String>,
    },
    /// Flip each code in favorites
    Toggle {
        #[arg(required = true, value_parser = parse_code)]
        codes: Vec<String>,
    },
}

impl From<Commands> for kurlar::AppCommand {
    fn from(cmd: Commands) -> kurlar::AppCommand {
        match cmd {
            Commands::Rates { date, search } => kurlar::AppCommand::Rates { date, search },
            Commands::Convert {
                amount,
                from,
                to,
                date,
            } => kurlar::AppCommand::Convert {
                amount,
                from,
                to,
                date,
            },
            Commands::Select { action } => kurlar::AppCommand::Select(match action {
                SelectCommand::List => SelectAction::List,
                SelectCommand::All => SelectAction::All,
                SelectCommand::None => SelectAction::None,
                SelectCommand::Toggle { codes } => SelectAction::Toggle(codes),
            }),
            Commands::Favorite { action } => kurlar::AppCommand::Favorite(match action {
                FavoriteCommand::List => FavoriteAction::List,
                FavoriteCommand::Add { codes } => FavoriteAction::Add(codes),
                FavoriteCommand::Remove { codes } => FavoriteAction::Remove(codes),
                FavoriteCommand::Toggle { codes } => FavoriteAction::Toggle(codes),
            }),
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => kurlar::cli::setup::setup(),
        Some(cmd) => kurlar::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
