//! Datacap demo CLI - card validation and tokenization
//!
//! Validates, classifies, masks and formats card numbers, and runs the
//! token request and sale flows in demo mode (or prepares them for a remote
//! endpoint).

use clap::{Parser, Subcommand};
use datacap_card::CardBrand;
use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{check, config, inspect, sale, tokenize, validate};

/// Card validation and tokenization demo
#[derive(Parser)]
#[command(name = "datacap-demo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(short, long, global = true, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Tokenization config file (defaults to the standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate card numbers (Luhn and length)
    Validate {
        /// Card numbers; spaces allowed inside quotes
        #[arg(required = true)]
        numbers: Vec<String>,
    },

    /// Detect the card brand
    Brand {
        /// Card number or prefix
        number: String,
    },

    /// Mask a card number, revealing the last four digits
    Mask {
        /// Card number
        number: String,
    },

    /// Group a card number for display
    Format {
        /// Card number or prefix
        number: String,

        /// Group for this brand instead of the detected one (e.g. amex, diners)
        #[arg(short, long, value_parser = parse_brand)]
        brand: Option<CardBrand>,
    },

    /// Check many card numbers and summarize by brand
    Check {
        /// Card numbers
        numbers: Vec<String>,

        /// File with one card number per line
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Request a token for a card
    Tokenize {
        /// Card number
        #[arg(short, long)]
        number: String,

        /// Expiration date (MM/YY)
        #[arg(short, long)]
        expiry: String,

        /// Card verification value
        #[arg(long)]
        cvv: String,

        /// Override the configured mode (demo, certification, production)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Charge a saved token
    Sale {
        /// Token from a previous `tokenize`
        #[arg(short, long)]
        token: String,

        /// Amount in dollars (e.g. 12.50)
        #[arg(short, long)]
        amount: String,

        /// Override the configured mode (demo, certification, production)
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Show the effective tokenization configuration
    Config,
}

fn parse_brand(name: &str) -> Result<CardBrand, String> {
    CardBrand::from_name(name).ok_or_else(|| format!("unknown card brand '{name}'"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose || std::env::var_os("RUST_LOG").is_some() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("datacap_demo=debug,datacap_token=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Commands::Validate { numbers } => validate::run(&numbers, &cli.format),
        Commands::Brand { number } => inspect::brand(&number, &cli.format),
        Commands::Mask { number } => inspect::mask(&number, &cli.format),
        Commands::Format { number, brand } => inspect::format(&number, brand, &cli.format),
        Commands::Check { numbers, file } => check::run(&numbers, file.as_deref(), &cli.format),
        Commands::Tokenize {
            number,
            expiry,
            cvv,
            mode,
        } => {
            let card = tokenize::CardArgs {
                number: &number,
                expiry: &expiry,
                cvv: &cvv,
            };
            tokenize::run(card, mode.as_deref(), cli.config.as_deref(), &cli.format)
        }
        Commands::Sale {
            token,
            amount,
            mode,
        } => sale::run(&token, &amount, mode.as_deref(), cli.config.as_deref(), &cli.format),
        Commands::Config => config::run(cli.config.as_deref(), &cli.format),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
