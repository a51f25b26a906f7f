//! Pump bridge daemon entry point.
//!
//! Loads configuration, starts the translation service, and hands its ports
//! to the transport adapters. The wireless radio and the broker session are
//! deployment-specific; this binary owns process bootstrap, logging, and
//! the lifetime of the translation tasks.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pumpbridge_runner::{AppConfig, BridgeService};
use pumpbridge_translate::Bridge;

#[derive(Parser, Debug)]
#[command(name = "pumpbridge", about = "Wireless <-> bus bridge for pump controllers")]
struct Args {
    /// Path to the JSON configuration file.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match AppConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let bridge = Bridge::new(config.topics.prefix.clone());
    info!(
        broker = %config.mqtt.uri,
        filter = %bridge.command_subscription_filter(),
        address = %config.bridge_address(),
        "starting bridge"
    );

    let (service, wireless, bus) = BridgeService::start(bridge, config.bridge_address());

    // Transport adapters attach here. Until a radio and broker session are
    // wired in, outbound traffic is drained to the log so the translation
    // path stays observable end to end.
    let mut sends_out = wireless.sends_out;
    tokio::spawn(async move {
        while let Some(send) = sends_out.recv().await {
            info!(dest = %send.dest_address, frame = ?send.frame, "wireless send ready");
        }
    });
    let mut publishes_out = bus.publishes_out;
    tokio::spawn(async move {
        while let Some(publish) = publishes_out.recv().await {
            info!(topic = %publish.topic, body = %publish.body, "bus publish ready");
        }
    });

    // Keep the inbound senders alive until shutdown.
    let _frames_in = wireless.frames_in;
    let _messages_in = bus.messages_in;

    if tokio::signal::ctrl_c().await.is_err() {
        error!("failed to listen for shutdown signal");
        return ExitCode::FAILURE;
    }
    info!("shutting down");

    drop(_frames_in);
    drop(_messages_in);
    service.join().await;
    ExitCode::SUCCESS
}
