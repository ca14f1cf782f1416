//! usbscope
//!
//! Interactive USB device viewer. Enumerates every device on the bus and
//! shows a two-pane terminal UI: device summaries on the left, the full
//! descriptor dump of the selected device on the right. The list follows
//! hot-plug events while the viewer runs.

mod config;
mod error;
mod logging;
mod tui;
mod usb;

pub use error::{Error, Result};

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use usb::{create_usb_bridge, spawn_usb_worker, DeviceRegistry, UsbBridge, UsbCommand, UsbEvent};

#[derive(Parser, Debug)]
#[command(name = "usbscope")]
#[command(author, version, about = "Interactive USB device viewer")]
#[command(long_about = "
A terminal viewer for USB devices. Shows one summary line per device and
a lsusb-style decode of every descriptor the device exposes, updated live
on hot-plug.

EXAMPLES:
    # Interactive two-pane viewer
    usbscope

    # Print one line per device and exit
    usbscope --list-devices

    # Print the full descriptor dump for every device and exit
    usbscope --list-devices --verbose

    # Run with debug logging written to a file
    usbscope --log-level debug

CONFIGURATION:
    The viewer looks for configuration files in the following order:
    1. Path specified with --config
    2. ~/.config/usbscope/config.toml
    3. /etc/usbscope/config.toml
    4. Built-in defaults
")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<std::path::PathBuf>,

    /// Save default configuration to default location and exit
    #[arg(long)]
    save_config: bool,

    /// List USB devices and exit
    #[arg(long)]
    list_devices: bool,

    /// With --list-devices, print the full descriptor dump per device
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Handle --save-config flag early (before loading config)
    if args.save_config {
        let config = config::ViewerConfig::default();
        let path = config::ViewerConfig::default_path();
        config.save(&path).context("Failed to save configuration")?;
        println!("Configuration saved to: {}", path.display());
        return Ok(());
    }

    let config = if args.config.is_some() {
        config::ViewerConfig::load(args.config.clone()).context("Failed to load configuration")?
    } else {
        config::ViewerConfig::load_or_default()
    };

    // CLI log level wins over the config value
    let log_level = args
        .log_level
        .as_deref()
        .unwrap_or(&config.viewer.log_level);

    if args.list_devices {
        // Non-interactive mode logs to stderr; stdout carries the listing
        logging::setup_stderr_logging(log_level).context("Failed to setup logging")?;
        return list_devices_mode(args.verbose);
    }

    // In TUI mode the terminal belongs to ratatui, so logs go to a file
    // when one is configured and are discarded otherwise.
    logging::setup_logging(log_level, config.viewer.log_file.as_deref())
        .context("Failed to setup logging")?;

    info!("usbscope v{}", env!("CARGO_PKG_VERSION"));
    info!("Log level: {}", log_level);

    let registry = Arc::new(DeviceRegistry::new());
    let (bridge, worker) = create_usb_bridge();
    let worker_handle =
        spawn_usb_worker(worker, registry.clone()).context("Failed to spawn USB worker thread")?;

    // Wait for the initial enumeration so the first frame is populated
    match bridge.recv_event().await {
        Ok(UsbEvent::DevicesChanged { count }) => {
            info!("Initial scan found {} devices", count);
        }
        Err(e) => {
            error!("USB worker failed before the first scan: {}", e);
        }
    }

    let result = tui::run(registry, bridge.clone(), &config).await;

    info!("Shutting down USB subsystem...");
    if let Err(e) = shutdown_usb_worker(bridge).await {
        error!("Error shutting down USB worker: {:#}", e);
    }
    match worker_handle.join() {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!("USB worker exited with error: {}", e),
        Err(e) => error!("USB worker thread panicked: {:?}", e),
    }

    result
}

/// List USB devices on stdout and exit
fn list_devices_mode(verbose: bool) -> anyhow::Result<()> {
    let context = rusb::Context::new().context("Failed to create USB context")?;
    let records = usb::worker::enumerate(&context).context("Failed to enumerate devices")?;

    if records.is_empty() {
        println!("No USB devices found.");
        return Ok(());
    }

    for record in records {
        println!("{}", record.summary);
        if verbose {
            for line in &record.details {
                println!("{}", line);
            }
            println!();
        }
    }

    Ok(())
}

/// Shutdown USB worker thread gracefully
async fn shutdown_usb_worker(bridge: UsbBridge) -> anyhow::Result<()> {
    bridge
        .send_command(UsbCommand::Shutdown)
        .await
        .context("Failed to send Shutdown command")?;
    Ok(())
}
