//! Configuration descriptor dump.
//!
//! The entry point walks the whole wTotalLength image: the nine-byte
//! configuration header followed by interface, endpoint and class-specific
//! records in bus order. Class-specific records are dispatched on the class
//! triple of the most recent interface descriptor.

use crate::cursor::{byte, hex_bytes, le16};
use crate::{audio, ccid, comm, hid, string_field, too_short, video, DumpContext};

/// Class triple of the interface currently in scope during the walk.
#[derive(Clone, Copy, Default)]
struct InterfaceClass {
    class: u8,
    subclass: u8,
    protocol: u8,
    number: u8,
}

/// Format a complete configuration image, header plus all sub-records.
pub fn config_descriptor(buf: &[u8], ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    if buf.len() < 9 {
        too_short("  ", &mut out);
    }
    out.push("  Configuration Descriptor:".to_string());
    out.push(format!("    bLength             {:5}", byte(buf, 0)));
    out.push(format!("    bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("    wTotalLength       0x{:04x}", le16(buf, 2)));
    out.push(format!("    bNumInterfaces      {:5}", byte(buf, 4)));
    out.push(format!("    bConfigurationValue {:5}", byte(buf, 5)));
    out.push(format!(
        "    iConfiguration      {}",
        string_field(ctx, byte(buf, 6))
    ));
    let attrs = byte(buf, 7);
    out.push(format!("    bmAttributes         0x{:02x}", attrs));
    if attrs & 0x80 == 0 {
        out.push("      (Missing must-be-set bit!)".to_string());
    }
    if attrs & 0x40 != 0 {
        out.push("      Self Powered".to_string());
    }
    if attrs & 0x20 != 0 {
        out.push("      Remote Wakeup".to_string());
    }
    if attrs & 0x10 != 0 {
        out.push("      Battery Powered".to_string());
    }
    out.push(format!("    MaxPower            {:5}mA", u16::from(byte(buf, 8)) * 2));

    let total = usize::from(le16(buf, 2)).min(buf.len());
    let mut iface: Option<InterfaceClass> = None;
    let mut i = 9;
    while i + 2 <= total {
        let blen = usize::from(byte(buf, i));
        if blen == 0 {
            out.push("    Warning: corrupt descriptor, aborting dump".to_string());
            break;
        }
        let rec = &buf[i..(i + blen).min(total)];
        match byte(rec, 1) {
            0x04 => iface = Some(interface_descriptor(rec, ctx, &mut out)),
            0x05 => endpoint_descriptor(rec, iface, &mut out),
            0x09 => otg_descriptor(rec, &mut out),
            0x0b => interface_association(rec, ctx, &mut out),
            0x0c => security_descriptor(rec, &mut out),
            0x30 => ss_endpoint_companion(rec, iface, &mut out),
            dtype => class_specific(rec, dtype, iface, ctx, &mut out),
        }
        i += blen;
    }
    out
}

fn interface_descriptor(
    buf: &[u8],
    ctx: &dyn DumpContext,
    out: &mut Vec<String>,
) -> InterfaceClass {
    let cls = InterfaceClass {
        class: byte(buf, 5),
        subclass: byte(buf, 6),
        protocol: byte(buf, 7),
        number: byte(buf, 2),
    };
    out.push("    Interface Descriptor:".to_string());
    out.push(format!("      bLength             {:5}", byte(buf, 0)));
    out.push(format!("      bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("      bInterfaceNumber    {:5}", byte(buf, 2)));
    out.push(format!("      bAlternateSetting   {:5}", byte(buf, 3)));
    out.push(format!("      bNumEndpoints       {:5}", byte(buf, 4)));
    out.push(format!(
        "      bInterfaceClass     {:5} {}",
        cls.class,
        names::class(cls.class).unwrap_or("")
    ));
    out.push(format!(
        "      bInterfaceSubClass  {:5} {}",
        cls.subclass,
        names::subclass(cls.class, cls.subclass).unwrap_or("")
    ));
    out.push(format!(
        "      bInterfaceProtocol  {:5} {}",
        cls.protocol,
        names::protocol(cls.class, cls.subclass, cls.protocol).unwrap_or("")
    ));
    out.push(format!(
        "      iInterface          {}",
        string_field(ctx, byte(buf, 8))
    ));
    cls
}

const TRANSFER_TYPES: [&str; 4] = ["Control", "Isochronous", "Bulk", "Interrupt"];
const SYNCH_TYPES: [&str; 4] = ["None", "Asynchronous", "Adaptive", "Synchronous"];
const USAGE_TYPES: [&str; 4] = ["Data", "Feedback", "Implicit feedback Data", "(reserved)"];

fn endpoint_descriptor(buf: &[u8], iface: Option<InterfaceClass>, out: &mut Vec<String>) {
    let addr = byte(buf, 2);
    let attrs = byte(buf, 3);
    let wmax = le16(buf, 4);
    out.push("      Endpoint Descriptor:".to_string());
    out.push(format!("        bLength             {:5}", byte(buf, 0)));
    out.push(format!("        bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!(
        "        bEndpointAddress     0x{:02x}  EP {} {}",
        addr,
        addr & 0x0f,
        if addr & 0x80 != 0 { "IN" } else { "OUT" }
    ));
    out.push(format!("        bmAttributes        {:5}", attrs));
    out.push(format!(
        "          Transfer Type            {}",
        TRANSFER_TYPES[usize::from(attrs & 0x03)]
    ));
    out.push(format!(
        "          Synch Type               {}",
        SYNCH_TYPES[usize::from((attrs >> 2) & 0x03)]
    ));
    out.push(format!(
        "          Usage Type               {}",
        USAGE_TYPES[usize::from((attrs >> 4) & 0x03)]
    ));
    out.push(format!(
        "        wMaxPacketSize     0x{:04x}  {}x {} bytes",
        wmax,
        ((wmax >> 11) & 0x03) + 1,
        wmax & 0x7ff
    ));
    out.push(format!("        bInterval           {:5}", byte(buf, 6)));
    // Audio endpoints are nine bytes long and carry two extra fields.
    if usize::from(byte(buf, 0)) == 9 && iface.map(|c| c.class) == Some(0x01) {
        out.push(format!("        bRefresh            {:5}", byte(buf, 7)));
        out.push(format!("        bSynchAddress       {:5}", byte(buf, 8)));
    }
}

fn ss_endpoint_companion(buf: &[u8], iface: Option<InterfaceClass>, out: &mut Vec<String>) {
    let _ = iface;
    out.push("        SuperSpeed Endpoint Companion:".to_string());
    out.push(format!("          bLength             {:5}", byte(buf, 0)));
    out.push(format!("          bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("          bMaxBurst           {:5}", byte(buf, 2)));
    out.push(format!("          bmAttributes         0x{:02x}", byte(buf, 3)));
    out.push(format!("          wBytesPerInterval  0x{:04x}", le16(buf, 4)));
}

fn interface_association(buf: &[u8], ctx: &dyn DumpContext, out: &mut Vec<String>) {
    out.push("    Interface Association:".to_string());
    out.push(format!("      bLength             {:5}", byte(buf, 0)));
    out.push(format!("      bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("      bFirstInterface     {:5}", byte(buf, 2)));
    out.push(format!("      bInterfaceCount     {:5}", byte(buf, 3)));
    out.push(format!(
        "      bFunctionClass      {:5} {}",
        byte(buf, 4),
        names::class(byte(buf, 4)).unwrap_or("")
    ));
    out.push(format!(
        "      bFunctionSubClass   {:5} {}",
        byte(buf, 5),
        names::subclass(byte(buf, 4), byte(buf, 5)).unwrap_or("")
    ));
    out.push(format!(
        "      bFunctionProtocol   {:5} {}",
        byte(buf, 6),
        names::protocol(byte(buf, 4), byte(buf, 5), byte(buf, 6)).unwrap_or("")
    ));
    out.push(format!(
        "      iFunction           {}",
        string_field(ctx, byte(buf, 7))
    ));
}

fn otg_descriptor(buf: &[u8], out: &mut Vec<String>) {
    out.push("    OTG Descriptor:".to_string());
    out.push(format!("      bLength             {:5}", byte(buf, 0)));
    out.push(format!("      bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("      bmAttributes         0x{:02x}", byte(buf, 2)));
    if byte(buf, 2) & 0x01 != 0 {
        out.push("        SRP (Session Request Protocol)".to_string());
    }
    if byte(buf, 2) & 0x02 != 0 {
        out.push("        HNP (Host Negotiation Protocol)".to_string());
    }
}

/// True when the configuration contains an OTG descriptor. The device
/// status dump changes shape for OTG-capable devices.
pub fn has_otg(buf: &[u8]) -> bool {
    let total = usize::from(le16(buf, 2)).min(buf.len());
    let mut i = 9;
    while i + 2 <= total {
        let blen = usize::from(byte(buf, i));
        if blen == 0 {
            return false;
        }
        if byte(buf, i + 1) == 0x09 {
            return true;
        }
        i += blen;
    }
    false
}

fn security_descriptor(buf: &[u8], out: &mut Vec<String>) {
    out.push("    Security Descriptor:".to_string());
    out.push(format!("      bLength             {:5}", byte(buf, 0)));
    out.push(format!("      bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("      wTotalLength       0x{:04x}", le16(buf, 2)));
    out.push(format!("      bNumEncryptionTypes {:5}", byte(buf, 4)));
}

fn dfu_descriptor(buf: &[u8], out: &mut Vec<String>) {
    out.push("      Device Firmware Upgrade Interface Descriptor:".to_string());
    out.push(format!("        bLength                         {:5}", byte(buf, 0)));
    out.push(format!("        bDescriptorType                 {:5}", byte(buf, 1)));
    out.push(format!("        bmAttributes                    {:5}", byte(buf, 2)));
    if byte(buf, 2) & 0x08 != 0 {
        out.push("          Will Detach".to_string());
    }
    out.push(format!(
        "          Manifestation {}",
        if byte(buf, 2) & 0x04 != 0 { "Tolerant" } else { "Intolerant" }
    ));
    if byte(buf, 2) & 0x02 != 0 {
        out.push("          Upload Supported".to_string());
    }
    if byte(buf, 2) & 0x01 != 0 {
        out.push("          Download Supported".to_string());
    }
    out.push(format!(
        "        wDetachTimeout                  {:5} milliseconds",
        le16(buf, 3)
    ));
    out.push(format!(
        "        wTransferSize                   {:5} bytes",
        le16(buf, 5)
    ));
    out.push(format!(
        "        bcdDFUVersion                   {:x}.{:02x}",
        byte(buf, 8),
        byte(buf, 7)
    ));
}

fn midistreaming_endpoint(buf: &[u8], out: &mut Vec<String>) {
    out.push("        MIDIStreaming Endpoint Descriptor:".to_string());
    out.push(format!("          bLength             {:5}", byte(buf, 0)));
    out.push(format!("          bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!(
        "          bDescriptorSubtype  {:5} ({})",
        byte(buf, 2),
        if byte(buf, 2) == 1 { "GENERAL" } else { "unknown" }
    ));
    out.push(format!("          bNumEmbMIDIJack     {:5}", byte(buf, 3)));
    for i in 0..usize::from(byte(buf, 3)) {
        out.push(format!(
            "          baAssocJackID({i})    {:5}",
            byte(buf, 4 + i)
        ));
    }
}

/// Route a class-specific record to the right decoder based on the
/// interface in scope.
fn class_specific(
    rec: &[u8],
    dtype: u8,
    iface: Option<InterfaceClass>,
    ctx: &dyn DumpContext,
    out: &mut Vec<String>,
) {
    let Some(cls) = iface else {
        out.push(format!("    ** UNRECOGNIZED: {}", hex_bytes(rec)));
        return;
    };
    match (cls.class, cls.subclass, dtype) {
        (0x03, _, 0x21) => out.extend(hid::hid_descriptor(rec, cls.number, ctx)),
        (0x0b, _, 0x21) => out.extend(ccid::ccid_descriptor(rec)),
        (0xfe, 0x01, 0x21) => dfu_descriptor(rec, out),
        (0x01, 0x01, 0x24) => {
            out.extend(audio::audiocontrol_interface(rec, cls.protocol, ctx))
        }
        (0x01, 0x02, 0x24) => {
            out.extend(audio::audiostreaming_interface(rec, cls.protocol, ctx))
        }
        (0x01, 0x03, 0x24) => out.extend(audio::midistreaming_interface(rec, ctx)),
        (0x01, 0x01, 0x25) | (0x01, 0x02, 0x25) => {
            out.extend(audio::audiostreaming_endpoint(rec, cls.protocol))
        }
        (0x01, 0x03, 0x25) => midistreaming_endpoint(rec, out),
        (0x02, _, 0x24) | (0x0a, _, 0x24) => {
            out.extend(comm::comm_descriptor(rec, "      ", ctx))
        }
        (0x0e, 0x01, 0x24) => out.extend(video::videocontrol_interface(rec, ctx)),
        (0x0e, 0x02, 0x24) => out.extend(video::videostreaming_interface(rec)),
        _ => out.push(format!("      ** UNRECOGNIZED: {}", hex_bytes(rec))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullContext;

    // One-interface HID keyboard configuration, 34 bytes total.
    fn keyboard_config() -> Vec<u8> {
        let mut buf = vec![9, 0x02];
        buf.extend_from_slice(&34u16.to_le_bytes());
        buf.extend_from_slice(&[1, 1, 0, 0xa0, 50]);
        buf.extend_from_slice(&[9, 0x04, 0, 0, 1, 0x03, 0x01, 0x01, 0]);
        buf.extend_from_slice(&[9, 0x21, 0x11, 0x01, 0x00, 0x01, 0x22, 65, 0]);
        buf.extend_from_slice(&[7, 0x05, 0x81, 0x03, 0x08, 0x00, 10]);
        buf
    }

    #[test]
    fn configuration_header() {
        let lines = config_descriptor(&keyboard_config(), &NullContext);
        assert_eq!(lines[0], "  Configuration Descriptor:");
        assert_eq!(lines[3], "    wTotalLength       0x0022");
        assert_eq!(lines[7], "    bmAttributes         0xa0");
        assert_eq!(lines[8], "      Remote Wakeup");
        assert_eq!(lines[9], "    MaxPower              100mA");
    }

    #[test]
    fn interface_and_class_names() {
        let lines = config_descriptor(&keyboard_config(), &NullContext);
        assert!(lines.contains(&"    Interface Descriptor:".to_string()));
        assert!(lines
            .contains(&"      bInterfaceClass         3 Human Interface Device".to_string()));
        assert!(lines
            .contains(&"      bInterfaceProtocol      1 Keyboard".to_string()));
    }

    #[test]
    fn hid_record_dispatched() {
        let lines = config_descriptor(&keyboard_config(), &NullContext);
        assert!(lines.contains(&"        HID Device Descriptor:".to_string()));
        assert!(lines.contains(&"            ** UNAVAILABLE **".to_string()));
    }

    #[test]
    fn endpoint_fields() {
        let lines = config_descriptor(&keyboard_config(), &NullContext);
        let start = lines
            .iter()
            .position(|l| l == "      Endpoint Descriptor:")
            .unwrap();
        assert_eq!(lines[start + 3], "        bEndpointAddress     0x81  EP 1 IN");
        assert_eq!(lines[start + 5], "          Transfer Type            Interrupt");
        assert_eq!(lines[start + 8], "        wMaxPacketSize     0x0008  1x 8 bytes");
        assert_eq!(lines[start + 9], "        bInterval              10");
    }

    #[test]
    fn zero_length_record_stops_walk() {
        let mut buf = keyboard_config();
        let pos = buf.len();
        buf.extend_from_slice(&[0, 0, 0]);
        buf[2..4].copy_from_slice(&((pos + 3) as u16).to_le_bytes());
        let lines = config_descriptor(&buf, &NullContext);
        assert_eq!(
            lines.last().unwrap(),
            "    Warning: corrupt descriptor, aborting dump"
        );
    }

    #[test]
    fn truncated_header_warns_once() {
        let lines = config_descriptor(&[9, 0x02, 0x22], &NullContext);
        let warnings = lines
            .iter()
            .filter(|l| l.contains("Descriptor too short"))
            .count();
        assert_eq!(warnings, 1);
        assert_eq!(lines[0], "  Warning: Descriptor too short");
    }

    #[test]
    fn unknown_record_is_hex_dumped() {
        let mut buf = vec![9, 0x02];
        buf.extend_from_slice(&13u16.to_le_bytes());
        buf.extend_from_slice(&[1, 1, 0, 0x80, 50]);
        buf.extend_from_slice(&[4, 0x44, 0xaa, 0xbb]);
        let lines = config_descriptor(&buf, &NullContext);
        assert_eq!(
            lines.last().unwrap(),
            "    ** UNRECOGNIZED: 04 44 aa bb"
        );
    }

    #[test]
    fn otg_descriptor_detected() {
        let mut buf = vec![9, 0x02];
        buf.extend_from_slice(&12u16.to_le_bytes());
        buf.extend_from_slice(&[1, 1, 0, 0x80, 50]);
        buf.extend_from_slice(&[3, 0x09, 0x03]);
        assert!(has_otg(&buf));
        let lines = config_descriptor(&buf, &NullContext);
        assert!(lines.contains(&"        SRP (Session Request Protocol)".to_string()));
        assert!(lines.contains(&"        HNP (Host Negotiation Protocol)".to_string()));
        assert!(!has_otg(&keyboard_config()));
    }

    #[test]
    fn dump_is_idempotent() {
        let a = config_descriptor(&keyboard_config(), &NullContext);
        let b = config_descriptor(&keyboard_config(), &NullContext);
        assert_eq!(a, b);
    }
}
