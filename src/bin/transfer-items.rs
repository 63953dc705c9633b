//! Item transfer tool.
//!
//! Unequips the given items on the player contract, then moves each one to
//! the recipient through the ERC-1155 contract.
//!
//! Usage: `transfer-items <recipient_address> <item_id_1> [<item_id_2> ...]`

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use inventory_ops::blockchain::parse_felt;
use inventory_ops::blockchain::transaction::{SAFE_TRANSFER_FROM, TRANSFER_OBJECTS};
use inventory_ops::config::{Script, ScriptConfig};
use inventory_ops::inventory::{ItemTransfer, TransferRequest};
use inventory_ops::lifecycle::{startup, StartupError};
use inventory_ops::observability::logging;

const USAGE: &str =
    "transfer-items [--config <PATH>] <recipient_address> <item_id_1> [<item_id_2> ...]";

#[derive(Parser)]
#[command(name = "transfer-items")]
#[command(about = "Unequip game items and transfer them to another address", long_about = None)]
#[command(override_usage = USAGE)]
struct Cli {
    /// Optional TOML config file; environment variables take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address receiving the items.
    recipient_address: String,

    /// Item ids (decimal, or 0x-prefixed hex).
    #[arg(required = true, num_args = 1..)]
    item_ids: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    let request = match TransferRequest::parse(&cli.recipient_address, cli.item_ids.as_slice()) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match startup::load_settings(cli.config.as_deref(), Script::Transfer) {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.observability.log_level);

    // A failed transfer is logged by the service; only startup errors exit 1
    match run(config, &request).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ScriptConfig, request: &TransferRequest) -> Result<(), StartupError> {
    startup::load_contract(&config.contracts.player_abi_path, &[(TRANSFER_OBJECTS, 1)])?;
    startup::load_contract(&config.contracts.erc1155_abi_path, &[(SAFE_TRANSFER_FROM, 5)])?;

    let player = parse_felt(&config.contracts.player_address)?;
    let token = parse_felt(&config.contracts.erc1155_address)?;

    let client = startup::connect(&config).await?;
    let owner = client.address();

    let transferred = ItemTransfer::new(client, player, token, owner)
        .transfer(request)
        .await;
    if !transferred {
        tracing::warn!("Transfer stopped early; completed steps are not rolled back");
    }
    Ok(())
}
