//! Device registry
//!
//! Holds the current enumeration snapshot. The USB worker replaces the
//! whole snapshot on every change; the TUI reads it without locking the bus.

use crate::usb::record::DeviceRecord;
use std::sync::{Arc, RwLock};

/// Shared registry of enumerated devices.
///
/// Snapshots are immutable `Arc`ed vectors so a reader holding one across
/// a redraw never observes a half-updated list.
#[derive(Default)]
pub struct DeviceRegistry {
    snapshot: RwLock<Arc<Vec<DeviceRecord>>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a fresh enumeration result.
    pub fn replace(&self, records: Vec<DeviceRecord>) {
        let mut guard = self.snapshot.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(records);
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Vec<DeviceRecord>> {
        self.snapshot
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Summary line for every device, list-pane order.
    pub fn summaries(&self) -> Vec<String> {
        self.snapshot().iter().map(|r| r.summary.clone()).collect()
    }

    /// Descriptor dump for the device at `index`.
    pub fn details(&self, index: usize) -> crate::Result<Vec<String>> {
        let snapshot = self.snapshot();
        snapshot
            .get(index)
            .map(|r| r.details.clone())
            .ok_or(crate::Error::InvalidIndex(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: u8, summary: &str) -> DeviceRecord {
        DeviceRecord {
            bus: 1,
            address,
            vendor_id: 0x046d,
            product_id: 0xc077,
            summary: summary.to_string(),
            details: vec![format!("details for {}", summary)],
        }
    }

    #[test]
    fn replace_swaps_whole_snapshot() {
        let registry = DeviceRegistry::new();
        assert!(registry.is_empty());

        registry.replace(vec![record(1, "first"), record(2, "second")]);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.summaries(), vec!["first", "second"]);

        registry.replace(vec![record(3, "third")]);
        assert_eq!(registry.summaries(), vec!["third"]);
    }

    #[test]
    fn details_track_the_same_index_as_summaries() {
        let registry = DeviceRegistry::new();
        registry.replace(vec![record(1, "a"), record(2, "b")]);
        assert_eq!(registry.details(0).unwrap(), vec!["details for a"]);
        assert_eq!(registry.details(1).unwrap(), vec!["details for b"]);
    }

    #[test]
    fn invalid_index_is_an_error() {
        let registry = DeviceRegistry::new();
        registry.replace(vec![record(1, "only")]);
        assert!(matches!(
            registry.details(1),
            Err(crate::Error::InvalidIndex(1))
        ));
    }

    #[test]
    fn old_snapshot_survives_replacement() {
        let registry = DeviceRegistry::new();
        registry.replace(vec![record(1, "old")]);
        let held = registry.snapshot();
        registry.replace(vec![record(2, "new")]);
        assert_eq!(held[0].summary, "old");
        assert_eq!(registry.summaries(), vec!["new"]);
    }
}
