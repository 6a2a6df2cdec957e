//! bb_sim CLI
//!
//! Plays headless Biome Battler matches and writes the default data files.
//! Logging follows `RUST_LOG` (e.g. `RUST_LOG=bb_core=debug`).

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "bb_sim")]
#[command(about = "Run headless Biome Battler matches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Play one seeded match and print the JSON summary
    Simulate {
        /// Match seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Smart-turn probability of the autopilot player
        #[arg(long, default_value_t = 0.5)]
        smartness: f32,

        /// Rules config JSON (falls back to BB_RULES_CONFIG_PATH, then the standard rules)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Card catalog JSON
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Include the full event log
        #[arg(long, default_value = "false")]
        events: bool,

        /// Write the summary here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Play a range of seeds in parallel and print aggregate rates
    Batch {
        /// First seed
        #[arg(long, default_value_t = 0)]
        start_seed: u64,

        /// Number of matches
        #[arg(long, default_value_t = 1000)]
        count: u64,

        /// Smart-turn probability of the autopilot player
        #[arg(long, default_value_t = 0.5)]
        smartness: f32,

        /// Rules config JSON
        #[arg(long)]
        config: Option<PathBuf>,

        /// Card catalog JSON
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Write the summary JSON here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write the standard card catalog as JSON
    Catalog {
        #[arg(long)]
        out: PathBuf,
    },

    /// Write the standard rules config as JSON
    Rules {
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { seed, smartness, config, catalog, events, out } => {
            let mut request = build_request(seed, smartness, config, catalog)?;
            request.include_events = events;

            let response = bb_core::simulate_match(&request)?;
            let json = serde_json::to_string_pretty(&response)?;
            emit(out, &json)?;
        }

        Commands::Batch { start_seed, count, smartness, config, catalog, out } => {
            let template = build_request(start_seed, smartness, config, catalog)?;
            let end = start_seed
                .checked_add(count)
                .ok_or_else(|| anyhow::anyhow!("seed range overflows u64"))?;

            log::info!("Running {} matches from seed {}", count, start_seed);
            let summary = bb_sim::run_batch(start_seed..end, &template)?;

            println!("Matches:        {}", summary.matches);
            println!("Completed:      {}", summary.completed);
            println!("Win rate:       {:.1}%", summary.win_rate * 100.0);
            println!("Stage 2 rate:   {:.1}%", summary.stage2_rate * 100.0);
            println!("Avg rounds:     {:.2}", summary.avg_rounds);
            println!("Avg overtime:   {:.2}", summary.avg_overtime_rounds);
            println!("Checksum:       {}", summary.checksum);

            if let Some(path) = out {
                std::fs::write(&path, serde_json::to_string_pretty(&summary)?)?;
                println!("Summary saved to: {}", path.display());
            }
        }

        Commands::Catalog { out } => {
            bb_sim::write_default_catalog(&out)?;
            println!("Catalog written to: {}", out.display());
        }

        Commands::Rules { out } => {
            bb_sim::write_default_rules(&out)?;
            println!("Rules written to: {}", out.display());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn build_request(
    seed: u64,
    smartness: f32,
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
) -> Result<bb_core::SimulationRequest> {
    let mut request = bb_core::SimulationRequest::new(seed);
    request.player_smartness = smartness;
    request.config = Some(bb_sim::load_rules(config.as_deref())?);
    request.catalog = Some(bb_sim::load_catalog(catalog.as_deref())?);
    Ok(request)
}

#[cfg(feature = "cli")]
fn emit(out: Option<PathBuf>, json: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, json)?;
            log::info!("Summary saved to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("bb_sim CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
