use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use svcstate::api::{self, AppState};
use svcstate::logging::init_logging;
use svcstate::topology::{InMemoryTopology, TopologyProvider};
use svcstate::{Config, ServiceHealthAggregator, ServiceId};

#[derive(Parser)]
#[command(name = "svcstate")]
#[command(about = "Aggregate host-component states into a service state", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, global = true, help = "TOML config file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, help = "Topology snapshot (.yaml, .json or .toml)")]
    topology: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the state of one service
    Service {
        #[arg(long)]
        cluster: String,
        #[arg(long)]
        service: String,
    },
    /// Print the state of every service in a cluster
    Cluster {
        #[arg(long)]
        cluster: String,
    },
    /// Serve service states over HTTP
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(topology) = cli.topology {
        config.topology_path = Some(topology);
    }
    init_logging(&config.log_level);

    let provider = load_topology(&config)?;

    match cli.command {
        Commands::Service { cluster, service } => {
            let aggregator = ServiceHealthAggregator::new(provider);
            let state = aggregator
                .compute_service_state(&ServiceId::new(cluster, service))
                .await;
            println!("{}", state);
        }
        Commands::Cluster { cluster } => {
            let aggregator = ServiceHealthAggregator::new(provider);
            for report in aggregator.compute_cluster_states(&cluster).await? {
                println!("{}\t{}", report.service, report.state);
            }
        }
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.port);
            api::serve(AppState::new(provider), port).await?;
        }
    }

    Ok(())
}

fn load_topology(config: &Config) -> Result<Arc<dyn TopologyProvider>> {
    let path = config
        .topology_path
        .as_ref()
        .context("No topology snapshot given (use --topology or SVCSTATE_TOPOLOGY)")?;

    let topology = InMemoryTopology::from_snapshot_file(path)
        .with_context(|| format!("Failed to load topology from {}", path.display()))?;

    Ok(Arc::new(topology))
}
