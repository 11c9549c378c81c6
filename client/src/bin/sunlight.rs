#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use serde::Serialize;
use sunlight_congress::{
    config::Config,
    congress::{Chamber, Committee, CongressClient, LocationCriteria},
};
use tracing_subscriber::EnvFilter;

/// Look up members of Congress and their committees.
#[derive(Debug, Parser)]
#[command(name = "sunlight", version)]
struct Cli {
    /// YAML config file (SUNLIGHT_* environment variables override it)
    #[arg(long, default_value = "sunlight.yaml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch a legislator by Bioguide ID
    Legislator { bioguide_id: String },
    /// Fetch a committee with its subcommittees and members
    Committee { id: String },
    /// List the committees of a chamber (House, Senate, or Joint)
    Chamber { chamber: Chamber },
    /// List the committees a legislator sits on
    CommitteesFor { bioguide_id: String },
    /// List the members of a committee
    Members { committee_id: String },
    /// Find the senators and representative for a location
    Locate {
        #[arg(long = "lat", requires = "longitude", allow_hyphen_values = true)]
        latitude: Option<f64>,
        #[arg(long = "long", requires = "latitude", allow_hyphen_values = true)]
        longitude: Option<f64>,
        #[arg(long, conflicts_with_all = ["latitude", "longitude"])]
        zip: Option<String>,
    },
    /// Fuzzy search for legislators by name
    Search {
        name: String,
        /// Drop matches scoring below this confidence (0.0 - 1.0)
        #[arg(long, default_value_t = 0.0)]
        min_score: f64,
    },
}

fn print<T: Serialize>(result: Option<T>) -> anyhow::Result<()> {
    match result {
        Some(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        None => println!("no result"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let config = Config::load_from(&cli.config).map_err(|e| anyhow::anyhow!("{e}"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.api.base_url,
        "sunlight client starting"
    );

    let client = CongressClient::from_config(&config.api)?;

    match cli.command {
        Command::Legislator { bioguide_id } => print(client.get_legislator(&bioguide_id).await?),
        Command::Committee { id } => print(client.get_committee(&id).await?),
        Command::Chamber { chamber } => print(client.committees_for_chamber(chamber).await?),
        Command::CommitteesFor { bioguide_id } => {
            print(client.committees_for_legislator(&bioguide_id).await?)
        }
        Command::Members { committee_id } => {
            let mut committee = Committee {
                id: Some(committee_id),
                ..Committee::default()
            };
            client.load_members(&mut committee).await?;
            print(committee.members)
        }
        Command::Locate {
            latitude,
            longitude,
            zip,
        } => {
            let criteria = LocationCriteria {
                latitude,
                longitude,
                zip,
                ..LocationCriteria::default()
            };
            print(client.legislators_for_location(&criteria).await?)
        }
        Command::Search { name, min_score } => {
            print(client.search_legislators_by_name(&name, min_score).await?)
        }
    }
}
