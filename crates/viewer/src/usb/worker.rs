//! USB worker thread
//!
//! Dedicated thread for enumeration and hot-plug handling. Runs the
//! libusb_handle_events() loop and communicates with the Tokio runtime
//! via async channels; the TUI never touches the bus directly.

use crate::usb::host::HostDevice;
use crate::usb::record::DeviceRecord;
use crate::usb::registry::DeviceRegistry;
use async_channel::{bounded, Receiver, Sender};
use rusb::{Context, Device, Hotplug, HotplugBuilder, Registration, UsbContext};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Commands from the Tokio runtime to the USB thread.
#[derive(Debug)]
pub enum UsbCommand {
    /// Re-enumerate the bus even without a hot-plug notification
    Rescan,
    /// Stop the worker thread
    Shutdown,
}

/// Events from the USB thread to the Tokio runtime.
#[derive(Debug)]
pub enum UsbEvent {
    /// The registry snapshot was replaced
    DevicesChanged { count: usize },
}

/// Handle for the Tokio runtime (async)
#[derive(Clone)]
pub struct UsbBridge {
    cmd_tx: Sender<UsbCommand>,
    event_rx: Receiver<UsbEvent>,
}

impl UsbBridge {
    /// Send a command to the USB thread
    pub async fn send_command(&self, cmd: UsbCommand) -> crate::Result<()> {
        self.cmd_tx
            .send(cmd)
            .await
            .map_err(|e| crate::Error::Channel(e.to_string()))
    }

    /// Receive an event from the USB thread
    pub async fn recv_event(&self) -> crate::Result<UsbEvent> {
        self.event_rx
            .recv()
            .await
            .map_err(|e| crate::Error::Channel(e.to_string()))
    }

    /// Try to receive an event without blocking
    pub fn try_recv_event(&self) -> Option<UsbEvent> {
        self.event_rx.try_recv().ok()
    }
}

/// Handle for the USB thread (blocking)
pub struct UsbWorker {
    cmd_rx: Receiver<UsbCommand>,
    event_tx: Sender<UsbEvent>,
}

impl UsbWorker {
    /// Try to receive a command without blocking
    pub fn try_recv_command(&self) -> Option<UsbCommand> {
        self.cmd_rx.try_recv().ok()
    }

    /// Send an event to the Tokio runtime (blocking)
    pub fn send_event(&self, event: UsbEvent) -> crate::Result<()> {
        self.event_tx
            .send_blocking(event)
            .map_err(|e| crate::Error::Channel(e.to_string()))
    }
}

/// Create the channel bridge between Tokio and the USB thread
///
/// Returns (UsbBridge for Tokio, UsbWorker for the USB thread)
pub fn create_usb_bridge() -> (UsbBridge, UsbWorker) {
    let (cmd_tx, cmd_rx) = bounded(64);
    let (event_tx, event_rx) = bounded(64);

    (
        UsbBridge { cmd_tx, event_rx },
        UsbWorker { cmd_rx, event_tx },
    )
}

/// Hot-plug callback handler
///
/// Callbacks fire from inside handle_events() on the worker thread, so
/// this only raises a flag; the actual rescan happens in the event loop.
struct HotplugCallback {
    dirty: Arc<AtomicBool>,
}

impl<T: UsbContext> Hotplug<T> for HotplugCallback {
    fn device_arrived(&mut self, device: Device<T>) {
        debug!(
            "Hot-plug callback: device arrived (bus={}, addr={})",
            device.bus_number(),
            device.address()
        );
        self.dirty.store(true, Ordering::SeqCst);
    }

    fn device_left(&mut self, device: Device<T>) {
        debug!(
            "Hot-plug callback: device left (bus={}, addr={})",
            device.bus_number(),
            device.address()
        );
        self.dirty.store(true, Ordering::SeqCst);
    }
}

/// USB worker thread
///
/// Owns the rusb context, processes commands from Tokio, and refreshes
/// the shared registry whenever the bus changes.
pub struct UsbWorkerThread {
    context: Context,
    registry: Arc<DeviceRegistry>,
    worker: UsbWorker,
    dirty: Arc<AtomicBool>,
    _hotplug_registration: Option<Registration<Context>>,
}

impl UsbWorkerThread {
    /// Create a new USB worker thread
    pub fn new(worker: UsbWorker, registry: Arc<DeviceRegistry>) -> Result<Self, rusb::Error> {
        let context = Context::new()?;
        // Starts dirty so the first loop iteration performs the initial scan
        let dirty = Arc::new(AtomicBool::new(true));

        let registration = if rusb::has_hotplug() {
            let callback = HotplugCallback {
                dirty: dirty.clone(),
            };
            match HotplugBuilder::new().register(&context, Box::new(callback)) {
                Ok(reg) => {
                    debug!("Hot-plug callbacks registered");
                    Some(reg)
                }
                Err(e) => {
                    warn!("Hot-plug registration failed, rescans are manual: {}", e);
                    None
                }
            }
        } else {
            warn!("Hot-plug not supported on this platform, rescans are manual");
            None
        };

        Ok(Self {
            context,
            registry,
            worker,
            dirty,
            _hotplug_registration: registration,
        })
    }

    /// Run the USB worker thread event loop
    ///
    /// Each iteration checks for commands (non-blocking), processes USB
    /// events with a timeout, and rescans if a hot-plug callback or a
    /// Rescan command raised the dirty flag. The loop continues until a
    /// Shutdown command is received.
    pub fn run(mut self) -> Result<(), rusb::Error> {
        info!("USB worker thread started");

        loop {
            match self.worker.try_recv_command() {
                Some(UsbCommand::Shutdown) => {
                    info!("USB worker shutting down");
                    break;
                }
                Some(UsbCommand::Rescan) => {
                    self.dirty.store(true, Ordering::SeqCst);
                }
                None => {}
            }

            let timeout = Duration::from_millis(100);
            match self.context.handle_events(Some(timeout)) {
                Ok(()) => {}
                Err(rusb::Error::Interrupted) => {
                    debug!("USB event handling interrupted");
                }
                Err(e) => {
                    warn!("Error handling USB events: {}", e);
                    std::thread::sleep(Duration::from_millis(100));
                }
            }

            if self.dirty.swap(false, Ordering::SeqCst) {
                self.rescan();
            }
        }

        info!("USB worker thread stopped");
        Ok(())
    }

    /// Re-enumerate the bus and publish a fresh snapshot.
    fn rescan(&mut self) {
        let records = match enumerate(&self.context) {
            Ok(records) => records,
            Err(e) => {
                warn!("Device enumeration failed: {}", e);
                return;
            }
        };

        let count = records.len();
        info!("Enumerated {} devices", count);
        self.registry.replace(records);

        if self
            .worker
            .send_event(UsbEvent::DevicesChanged { count })
            .is_err()
        {
            debug!("Event channel closed, dropping DevicesChanged");
        }
    }
}

/// Enumerate every device on the bus into display records.
///
/// Devices whose descriptors cannot be read at all are skipped with a
/// warning rather than aborting the whole scan.
pub fn enumerate(context: &Context) -> rusb::Result<Vec<DeviceRecord>> {
    let mut records = Vec::new();

    for device in context.devices()?.iter() {
        let host = HostDevice::new(device);
        match DeviceRecord::from_host(&host) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(
                    "Skipping device {:03}:{:03}: {}",
                    host.bus_number(),
                    host.address(),
                    e
                );
            }
        }
    }

    records.sort_by_key(|r| (r.bus, r.address));
    Ok(records)
}

/// Spawn the USB worker thread
///
/// Creates a new OS thread for USB operations and returns a join handle.
/// The thread runs until a Shutdown command is received.
pub fn spawn_usb_worker(
    worker: UsbWorker,
    registry: Arc<DeviceRegistry>,
) -> std::io::Result<std::thread::JoinHandle<Result<(), rusb::Error>>> {
    std::thread::Builder::new()
        .name("usb-worker".to_string())
        .spawn(move || {
            let worker_thread = UsbWorkerThread::new(worker, registry)?;
            worker_thread.run()
        })
}
