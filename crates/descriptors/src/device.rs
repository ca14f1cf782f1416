//! Device-level descriptors: the 18-byte device descriptor, the dual-speed
//! device qualifier, the debug descriptor, and device status words.

use crate::cursor::{byte, hex_bytes, le16};
use crate::{string_field, too_short, DumpContext};

/// Structural minimum for a device descriptor.
const DEVICE_DESC_LEN: usize = 18;

/// Format the standard device descriptor.
pub fn device_descriptor(buf: &[u8], ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    if buf.len() < DEVICE_DESC_LEN || usize::from(byte(buf, 0)) < DEVICE_DESC_LEN {
        too_short("", &mut out);
    }

    let bcd_usb = le16(buf, 2);
    let class = byte(buf, 4);
    let subclass = byte(buf, 5);
    let protocol = byte(buf, 6);
    let vid = le16(buf, 8);
    let pid = le16(buf, 10);
    let bcd_device = le16(buf, 12);

    out.push("Device Descriptor:".to_string());
    out.push(format!("bLength             {:5}", byte(buf, 0)));
    out.push(format!("bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("bcdUSB              {:2x}.{:02x}", bcd_usb >> 8, bcd_usb & 0xff));
    out.push(format!(
        "bDeviceClass        {:5} {}",
        class,
        names::class(class).unwrap_or("")
    ));
    out.push(format!(
        "bDeviceSubClass     {:5} {}",
        subclass,
        names::subclass(class, subclass).unwrap_or("")
    ));
    out.push(format!(
        "bDeviceProtocol     {:5} {}",
        protocol,
        names::protocol(class, subclass, protocol).unwrap_or("")
    ));
    out.push(format!("bMaxPacketSize0     {:5}", byte(buf, 7)));
    out.push(format!(
        "idVendor           0x{vid:04x} {}",
        names::vendor(vid).unwrap_or("")
    ));
    out.push(format!(
        "idProduct          0x{pid:04x} {}",
        names::product(vid, pid).unwrap_or("")
    ));
    out.push(format!(
        "bcdDevice           {:2x}.{:02x}",
        bcd_device >> 8,
        bcd_device & 0xff
    ));
    out.push(format!("iManufacturer       {}", string_field(ctx, byte(buf, 14))));
    out.push(format!("iProduct            {}", string_field(ctx, byte(buf, 15))));
    out.push(format!("iSerial             {}", string_field(ctx, byte(buf, 16))));
    out.push(format!("bNumConfigurations  {:5}", byte(buf, 17)));
    out
}

/// Format a device qualifier descriptor (the "other speed" identity of a
/// dual-speed USB 2.0 device).
pub fn device_qualifier(buf: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    if buf.len() < 10 || usize::from(byte(buf, 0)) < 10 {
        too_short("", &mut out);
    }

    let bcd_usb = le16(buf, 2);
    let class = byte(buf, 4);
    let subclass = byte(buf, 5);
    let protocol = byte(buf, 6);

    out.push("Device Qualifier (for other device speed):".to_string());
    out.push(format!("  bLength             {:5}", byte(buf, 0)));
    out.push(format!("  bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("  bcdUSB              {:2x}.{:02x}", bcd_usb >> 8, bcd_usb & 0xff));
    out.push(format!(
        "  bDeviceClass        {:5} {}",
        class,
        names::class(class).unwrap_or("")
    ));
    out.push(format!(
        "  bDeviceSubClass     {:5} {}",
        subclass,
        names::subclass(class, subclass).unwrap_or("")
    ));
    out.push(format!(
        "  bDeviceProtocol     {:5} {}",
        protocol,
        names::protocol(class, subclass, protocol).unwrap_or("")
    ));
    out.push(format!("  bMaxPacketSize0     {:5}", byte(buf, 7)));
    out.push(format!("  bNumConfigurations  {:5}", byte(buf, 8)));
    out
}

/// Format a debug descriptor.
pub fn debug_descriptor(buf: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    if buf.len() < 4 || usize::from(byte(buf, 0)) < 4 {
        too_short("", &mut out);
    }
    out.push("Debug descriptor:".to_string());
    out.push(format!("  bLength             {:5}", byte(buf, 0)));
    out.push(format!("  bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("  bDebugInEndpoint     0x{:02x}", byte(buf, 2)));
    out.push(format!("  bDebugOutEndpoint    0x{:02x}", byte(buf, 3)));
    out
}

/// Format the device status word from GET_STATUS.
///
/// The meaning of the upper bits depends on what the rest of the dump
/// established about the device, hence the flags.
pub fn device_status(status: u16, otg: bool, wireless: bool, super_speed: bool) -> Vec<String> {
    let mut out = Vec::new();
    out.push(format!("Device Status:     0x{status:04x}"));

    if status & (1 << 0) != 0 {
        out.push("  Self Powered".to_string());
    } else {
        out.push("  (Bus Powered)".to_string());
    }
    if status & (1 << 1) != 0 {
        out.push("  Remote Wakeup Enabled".to_string());
    }
    if status & (1 << 2) != 0 && !super_speed {
        out.push("  Test Mode".to_string());
    }
    if super_speed {
        if status & (1 << 2) != 0 {
            out.push("  U1 Enabled".to_string());
        }
        if status & (1 << 3) != 0 {
            out.push("  U2 Enabled".to_string());
        }
        if status & (1 << 4) != 0 {
            out.push("  Latency Tolerance Messaging (LTM) Enabled".to_string());
        }
    }
    if otg {
        if status & (1 << 3) != 0 {
            out.push("  HNP Enabled".to_string());
        }
        if status & (1 << 4) != 0 {
            out.push("  HNP Capable".to_string());
        }
        if status & (1 << 5) != 0 {
            out.push("  ALT port is HNP Capable".to_string());
        }
    }
    if wireless && status & (1 << 6) != 0 {
        out.push("  Battery Powered".to_string());
    }
    out
}

/// Format the wireless-USB status extension: each value is a label followed
/// by its raw payload hex-dumped.
pub fn wireless_status(transmit_power: &[u8], mas_availability: &[u8]) -> Vec<String> {
    vec![
        "Wireless Status:".to_string(),
        "  Transmit Power:".to_string(),
        format!("   {}", hex_bytes(transmit_power)),
        "  MAS Availability:".to_string(),
        format!("   {}", hex_bytes(mas_availability)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullContext;

    fn root_hub_descriptor() -> [u8; 18] {
        [
            18, 1, 0x00, 0x02, 9, 0, 1, 64, 0x6b, 0x1d, 0x02, 0x00, 0x15,
            0x05, 3, 2, 1, 1,
        ]
    }

    #[test]
    fn device_descriptor_lines() {
        let lines = device_descriptor(&root_hub_descriptor(), &NullContext);
        assert_eq!(lines[0], "Device Descriptor:");
        assert_eq!(lines[1], "bLength                18");
        assert_eq!(lines[3], "bcdUSB               2.00");
        assert_eq!(lines[4], "bDeviceClass            9 Hub");
        assert_eq!(lines[6], "bDeviceProtocol         1 Single TT");
        assert_eq!(lines[8], "idVendor           0x1d6b Linux Foundation");
        assert_eq!(lines[9], "idProduct          0x0002 2.0 root hub");
        assert_eq!(lines[15], "bNumConfigurations      1");
    }

    #[test]
    fn device_descriptor_is_idempotent() {
        let buf = root_hub_descriptor();
        assert_eq!(
            device_descriptor(&buf, &NullContext),
            device_descriptor(&buf, &NullContext)
        );
    }

    #[test]
    fn short_device_descriptor_warns_once() {
        let lines = device_descriptor(&[18, 1, 0x10], &NullContext);
        let warnings = lines
            .iter()
            .filter(|l| l.contains("Descriptor too short"))
            .count();
        assert_eq!(warnings, 1);
        // Still decodes what it can.
        assert!(lines.iter().any(|l| l.starts_with("bcdUSB")));
    }

    #[test]
    fn qualifier_lines() {
        let buf = [10, 6, 0x00, 0x02, 0, 0, 0, 64, 1, 0];
        let lines = device_qualifier(&buf);
        assert_eq!(lines[0], "Device Qualifier (for other device speed):");
        assert_eq!(lines[3], "  bcdUSB               2.00");
        assert_eq!(lines[8], "  bNumConfigurations      1");
    }

    #[test]
    fn status_bus_powered() {
        let lines = device_status(0x0000, false, false, false);
        assert_eq!(lines, vec!["Device Status:     0x0000", "  (Bus Powered)"]);
    }

    #[test]
    fn status_superspeed_bits() {
        let lines = device_status(0x001d, false, false, true);
        assert!(lines.contains(&"  Self Powered".to_string()));
        assert!(lines.contains(&"  U1 Enabled".to_string()));
        assert!(lines.contains(&"  U2 Enabled".to_string()));
        assert!(lines.contains(&"  Latency Tolerance Messaging (LTM) Enabled".to_string()));
        assert!(!lines.contains(&"  Test Mode".to_string()));
    }

    #[test]
    fn status_otg_bits() {
        let lines = device_status(0x0018, true, false, false);
        assert!(lines.contains(&"  HNP Enabled".to_string()));
        assert!(lines.contains(&"  HNP Capable".to_string()));
    }

    #[test]
    fn wireless_status_is_label_then_hex() {
        let lines = wireless_status(&[0x01, 0x02], &[0xff]);
        assert_eq!(lines[1], "  Transmit Power:");
        assert_eq!(lines[2], "   01 02");
        assert_eq!(lines[3], "  MAS Availability:");
        assert_eq!(lines[4], "   ff");
    }
}
