//! USB name lookup tables
//!
//! Pure string-table lookups keyed by the numeric identifiers found in USB
//! descriptors: vendor and product IDs, class/subclass/protocol triples, HID
//! descriptor and report item tags, usage pages, country codes, and audio and
//! video terminal types.
//!
//! Every lookup returns `Option<&'static str>`; callers render the bare
//! numeric value when a name is unknown. The vendor/product table is a
//! curated subset of the usb.ids database, which keeps this crate free of any
//! runtime file dependency.

mod classes;
mod hid;
mod terminals;
mod vendors;

pub use classes::{class, protocol, subclass};
pub use hid::{country_code, hid_descriptor_type, report_tag, usage, usage_page};
pub use terminals::{audio_terminal, video_terminal};
pub use vendors::{product, vendor};
