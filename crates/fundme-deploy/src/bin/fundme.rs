//! FundMe command line
//!
//! Deploys the ledger on an in-memory development chain and drives it:
//! - `networks`: print the configured network table
//! - `run`: execute a JSON script of fund/withdraw/set_price steps
//! - `simulate`: several funders contribute, then the owner withdraws

use anyhow::Context;
use clap::{Parser, Subcommand};
use fundme_deploy::{simulate, FundMeConfig, Script, Session};
use fundme_oracle::FeedRegistry;
use fundme_types::Wei;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fundme", version, about = "Crowdfunding ledger with a USD minimum")]
struct Args {
    /// JSON configuration file; built-in defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the network table
    Networks,

    /// Deploy and execute a script
    Run {
        #[arg(long, default_value = "hardhat")]
        network: String,

        #[arg(long)]
        script: PathBuf,
    },

    /// Fund from several development accounts, then withdraw
    Simulate {
        #[arg(long, default_value = "hardhat")]
        network: String,

        #[arg(long, default_value_t = 5)]
        funders: u32,

        /// Ether sent by each funder
        #[arg(long, default_value = "0.1")]
        value: Wei,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => FundMeConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => FundMeConfig::default(),
    };

    match args.command {
        Command::Networks => {
            println!("{}", serde_json::to_string_pretty(&config.networks)?);
        }

        Command::Run { network, script } => {
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("reading {}", script.display()))?;
            let script: Script = serde_json::from_str(&text).context("parsing script")?;

            let mut session = Session::start(&config, &network, &FeedRegistry::new())?;
            let report = session.run(&script)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Command::Simulate {
            network,
            funders,
            value,
        } => {
            let report = simulate(&config, &network, funders, value)?;
            tracing::info!(
                withdrawn = report.steps.last().map(|s| s.ok).unwrap_or(false),
                "simulation finished"
            );
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
