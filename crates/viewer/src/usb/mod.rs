//! USB subsystem: host access, device records, registry, worker thread.

pub mod host;
pub mod record;
pub mod registry;
pub mod worker;

pub use record::DeviceRecord;
pub use registry::DeviceRegistry;
pub use worker::{create_usb_bridge, spawn_usb_worker, UsbBridge, UsbCommand, UsbEvent};
