//! Binary entrypoint for the ecotransport CLI.
//!
//! Runs the full analysis pipeline against a world definition loaded from
//! JSON - the offline stand-in for a live game world. Every subcommand maps
//! onto the corresponding chat command:
//!
//! - `init` - create a starter `config.toml`
//! - `overview [-l <n>]` - ranked opportunities, grouped by product
//! - `find <term>` / `detail <term>` - filtered views
//! - `routes [-l <n>]` - chained multi-stop delivery runs
//! - `export` - write a timestamped JSON export
//!
//! See the library crate docs for module-level details: `ecotransport::`.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use ecotransport::commands::CommandProcessor;
use ecotransport::config::Config;
use ecotransport::market::MarketService;
use ecotransport::stats::UsageStats;
use ecotransport::world::memory::MemoryWorld;

#[derive(Parser)]
#[command(name = "ecotransport")]
#[command(about = "Cross-store trade opportunity analysis for player-shop economies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// World definition file (JSON)
    #[arg(short, long, default_value = "world.json", global = true)]
    world: String,

    /// Actor the queries run as (ownership and access checks apply to them)
    #[arg(short, long, default_value = "analyst", global = true)]
    actor: String,

    /// Verbose logging (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter configuration file
    Init,
    /// Show ranked trade opportunities
    Overview {
        /// Maximum products to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Search opportunities by product or store name
    Find { term: String },
    /// Detailed breakdown of the best match
    Detail { term: String },
    /// Show chained multi-stop delivery routes
    Routes {
        /// Maximum routes to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Write opportunities to a timestamped JSON file
    Export,
}

fn init_logging(config: Option<&Config>, verbose: u8) {
    let level = match verbose {
        0 => config
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&level))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        init_logging(None, cli.verbose);
        Config::create_default(&cli.config).await?;
        info!("configuration file created at {}", cli.config);
        println!("Wrote default configuration to {}", cli.config);
        return Ok(());
    }

    let config = match Config::load(&cli.config).await {
        Ok(config) => config,
        Err(_) => Config::default(),
    };
    init_logging(Some(&config), cli.verbose);

    let raw = tokio::fs::read_to_string(&cli.world)
        .await
        .with_context(|| format!("failed to read world file {}", cli.world))?;
    let world = MemoryWorld::from_json(&raw)
        .with_context(|| format!("failed to parse world file {}", cli.world))?;
    info!(
        "loaded world: {} entities, {} products",
        world.entities.len(),
        world.products.len()
    );

    let service = MarketService::new(world);
    let stats = UsageStats::new();
    let processor = CommandProcessor::new(&service, &stats, &config);

    let input = match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Overview { limit } => match limit {
            Some(limit) => format!("overview {}", limit),
            None => "overview".to_string(),
        },
        Commands::Find { term } => format!("find {}", term),
        Commands::Detail { term } => format!("detail {}", term),
        Commands::Routes { limit } => match limit {
            Some(limit) => format!("routes {}", limit),
            None => "routes".to_string(),
        },
        Commands::Export => "export".to_string(),
    };

    let reply = processor.process(&cli.actor, &input).await?;
    println!("{}", reply);
    Ok(())
}
