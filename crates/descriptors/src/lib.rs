//! USB descriptor decoding and formatting engine
//!
//! This crate turns raw USB descriptor byte buffers into ordered sequences of
//! human-readable text lines, one formatter per descriptor family: device,
//! configuration (with the full interface/endpoint/class-specific walk), HID,
//! CCID, CDC, audio, video, hub, and BOS capability descriptors.
//!
//! Every formatter is a pure function over its input buffer. Decoding
//! problems are never errors: a malformed or truncated descriptor degrades to
//! a warning line in the output and decoding continues with whatever bytes
//! are present. Reads beyond the end of a buffer yield zero, so a short
//! buffer can never cause a panic.
//!
//! String descriptor indices (iProduct, iInterface, ...) and HID report
//! descriptors live on the device, not in the buffers, so formatters that
//! need them take a [`DumpContext`]. [`NullContext`] satisfies both lookups
//! with "nothing available" and is what tests and `--list-devices` use.
//!
//! # Example
//!
//! ```
//! use descriptors::{device, NullContext};
//!
//! let raw: [u8; 18] = [
//!     18, 1, 0x00, 0x02, 0, 0, 0, 64, 0x6b, 0x1d, 0x02, 0x00, 0x15, 0x05,
//!     3, 2, 1, 1,
//! ];
//! let lines = device::device_descriptor(&raw, &NullContext);
//! assert_eq!(lines[0], "Device Descriptor:");
//! assert!(lines.iter().any(|l| l.contains("Linux Foundation")));
//! ```

pub mod audio;
pub mod bos;
pub mod ccid;
pub mod comm;
pub mod config;
pub mod cursor;
pub mod device;
pub mod hid;
pub mod hub;
pub mod video;

/// Device-side lookups a formatter may need while dumping.
///
/// Implementations back these with control transfers against an open device;
/// the engine itself never performs I/O.
pub trait DumpContext {
    /// Resolve a string descriptor index to its contents.
    ///
    /// Returns `None` when the index is zero, the device is not open, or the
    /// transfer fails; the formatter then prints just the numeric index.
    fn string_descriptor(&self, index: u8) -> Option<String>;

    /// Fetch a HID report descriptor for an interface.
    ///
    /// `length` is the wDescriptorLength the HID descriptor claims. `None`
    /// means the descriptor is unavailable (unopened device, claim failure);
    /// a shorter-than-claimed buffer is reported as incomplete and dumped
    /// anyway.
    fn report_descriptor(&self, _interface_number: u8, _length: u16) -> Option<Vec<u8>> {
        None
    }
}

/// A [`DumpContext`] with nothing available, for tests and offline dumps.
pub struct NullContext;

impl DumpContext for NullContext {
    fn string_descriptor(&self, _index: u8) -> Option<String> {
        None
    }
}

pub(crate) fn too_short(indent: &str, out: &mut Vec<String>) {
    out.push(format!("{indent}Warning: Descriptor too short"));
}

/// Render a string-descriptor field: the numeric index, then the resolved
/// string when one is available.
pub(crate) fn string_field(ctx: &dyn DumpContext, index: u8) -> String {
    match ctx.string_descriptor(index) {
        Some(s) if !s.is_empty() => format!("{index:5} {s}"),
        _ => format!("{index:5} "),
    }
}
