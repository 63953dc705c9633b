//! Inventory refresher.
//!
//! Calls `refresh_inventory()` on the player contract right away and then
//! every `REFRESH_INTERVAL_MS` (default five minutes) until interrupted.
//!
//! ```text
//! parse CLI → load config (.env, file, env) → init logging
//!     → [metrics exporter] → load player ABI → connect signer
//!     → refresh loop ⟲ until SIGINT/SIGTERM
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use inventory_ops::blockchain::parse_felt;
use inventory_ops::blockchain::transaction::REFRESH_INVENTORY;
use inventory_ops::config::{Script, ScriptConfig};
use inventory_ops::inventory::InventoryRefresher;
use inventory_ops::lifecycle::{signals, startup, Shutdown, StartupError};
use inventory_ops::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "refresh-inventory")]
#[command(about = "Periodically refresh a player's on-chain inventory", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match startup::load_settings(cli.config.as_deref(), Script::Refresher) {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.observability.log_level);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Error in refresh loop");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ScriptConfig) -> Result<(), StartupError> {
    if let Some(addr) = &config.observability.metrics_address {
        let addr = addr
            .parse()
            .map_err(|e| StartupError::Metrics(format!("'{}': {}", addr, e)))?;
        metrics::init_metrics(addr).map_err(|e| StartupError::Metrics(e.to_string()))?;
    }

    startup::load_contract(&config.contracts.player_abi_path, &[(REFRESH_INVENTORY, 0)])?;
    let player = parse_felt(&config.contracts.player_address)?;
    let client = startup::connect(&config).await?;

    let shutdown = Shutdown::new();
    let listener = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown.clone());

    let interval = Duration::from_millis(config.refresh.interval_ms);
    let summary = InventoryRefresher::new(client, player, interval)
        .run(listener)
        .await;

    tracing::info!(
        attempts = summary.attempts,
        failures = summary.failures,
        "Inventory refresher stopped"
    );
    Ok(())
}
