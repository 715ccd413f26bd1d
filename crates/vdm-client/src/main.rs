//! VDM input relay client entry point.
//!
//! Loads the configuration, connects to the remote device and starts routing.
//! The headless binary has no display surface of its own: input arrives
//! through the [`ChannelInputSource`], which an embedding UI feeds.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ load_config()          -- ~/.config/vdminput/config.toml
//!  └─ transport::connect()   -- TCP to [network] host_address:port
//!       ├─ run_writer        (Tokio task, frames -> socket)
//!       └─ pump_events       (blocking thread, input -> InputRouter)
//! ```

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vdm_client::application::route_input::RemoteEventSink;
use vdm_client::application::session::ClientSession;
use vdm_client::infrastructure::input_capture::channel::ChannelInputSource;
use vdm_client::infrastructure::input_capture::{pump_events, InputSource};
use vdm_client::infrastructure::storage::config::load_config;
use vdm_client::infrastructure::transport::{self, FramedEventSink};
use vdm_core::DisplayId;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("failed to load configuration")?;

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.client.log_level)),
        )
        .init();

    info!("VDM input client starting");

    // ── Transport ─────────────────────────────────────────────────────────────
    let addr = config.network.socket_addr()?;
    let stream = transport::connect(addr)
        .await
        .with_context(|| format!("could not reach remote device at {addr}"))?;
    let (sink, frames) = FramedEventSink::new();
    let writer = tokio::spawn(async move {
        if let Err(e) = transport::run_writer(stream, frames).await {
            error!("transport writer stopped: {e}");
        }
    });

    // ── Session ───────────────────────────────────────────────────────────────
    let session = ClientSession::new(config.input, Arc::new(sink) as Arc<dyn RemoteEventSink>);
    session
        .focus()
        .add_listener(Arc::new(|display_id: DisplayId| {
            info!("focused display is now {display_id}");
        }));
    info!(
        "input policy: {:?} (focus tracking {})",
        session.policy(),
        if session.policy().tracks_focus() { "on" } else { "off" }
    );

    // ── Input pump ────────────────────────────────────────────────────────────
    let source = ChannelInputSource::new();
    let events = source.start()?;
    let router = Arc::clone(session.router());
    let pump = tokio::task::spawn_blocking(move || pump_events(events, &router));

    info!("VDM input client ready.  Press Ctrl-C to exit.");

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("failed to listen for shutdown signal: {e}");
            }
            info!("shutdown signal received");
        }
        _ = writer => warn!("connection to remote device closed"),
    }

    source.stop();
    match pump.await {
        Ok(routed) => info!("routed {routed} input commands"),
        Err(e) => error!("input pump failed: {e}"),
    }

    info!("VDM input client stopped");
    Ok(())
}
