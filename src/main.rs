//! Token ledger CLI
//!
//! Deploys the configured token and replays scripted transactions against it.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use token_ledger::cli;
use token_ledger::config::DeployConfig;

#[derive(Parser)]
#[command(name = "token-ledger")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "ERC-20 style token ledger with a signed-transaction runtime", long_about = None)]
struct Cli {
    /// Deployment config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the token and print its address
    Deploy {
        /// Token name
        #[arg(long)]
        name: Option<String>,

        /// Token symbol
        #[arg(long)]
        symbol: Option<String>,

        /// Initial supply in whole tokens
        #[arg(long)]
        supply: Option<String>,

        /// Dev account index of the deployer
        #[arg(long)]
        deployer: Option<u32>,
    },

    /// Deploy, then apply a JSON script of transactions
    Run {
        /// Script file path
        #[arg(short, long)]
        script: PathBuf,
    },

    /// List deterministic dev accounts
    Accounts {
        /// Number of accounts to show
        #[arg(short = 'n', long, default_value = "5")]
        count: u32,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = DeployConfig::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Deploy {
            name,
            symbol,
            supply,
            deployer,
        } => {
            if let Some(name) = name {
                config.name = name;
            }
            if let Some(symbol) = symbol {
                config.symbol = symbol;
            }
            if let Some(supply) = supply {
                config.initial_supply = supply;
            }
            if let Some(deployer) = deployer {
                config.deployer = deployer;
            }

            if let Err(e) = cli::cmd_deploy(&config) {
                log::error!("Deployment failed: {}", e);
                return Err(e);
            }
        }

        Commands::Run { script } => {
            cli::cmd_run(&config, &script)?;
        }

        Commands::Accounts { count } => {
            cli::cmd_accounts(count)?;
        }
    }

    Ok(())
}
