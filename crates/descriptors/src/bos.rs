//! Binary Object Store descriptor and its device capabilities.

use crate::cursor::{byte, guid, hex_bytes, le16, le32};
use crate::{string_field, too_short, DumpContext};

const WEBUSB_UUID: &str = "{3408b638-09a9-47a0-8bfd-a0768815b665}";

/// Format a complete BOS blob: the five-byte header followed by the
/// device capability descriptors packed up to wTotalLength.
pub fn bos_descriptor(buf: &[u8], ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    if buf.len() < 5 {
        too_short("", &mut out);
        return out;
    }
    out.push("Binary Object Store Descriptor:".to_string());
    out.push(format!("  bLength             {:5}", byte(buf, 0)));
    out.push(format!("  bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("  wTotalLength       0x{:04x}", le16(buf, 2)));
    out.push(format!("  bNumDeviceCaps      {:5}", byte(buf, 4)));

    let total = usize::from(le16(buf, 2)).min(buf.len());
    let mut i = 5;
    while i + 2 <= total {
        let blen = usize::from(byte(buf, i));
        if blen < 3 {
            out.push("  Warning: corrupt capability descriptor, aborting".to_string());
            break;
        }
        let cap = &buf[i..(i + blen).min(total)];
        capability(cap, ctx, &mut out);
        i += blen;
    }
    out
}

fn capability(cap: &[u8], ctx: &dyn DumpContext, out: &mut Vec<String>) {
    match byte(cap, 2) {
        0x02 => usb2_extension(cap, out),
        0x03 => superspeed(cap, out),
        0x04 => container_id(cap, out),
        0x05 => platform(cap, ctx, out),
        0x0a => superspeed_plus(cap, out),
        0x0b => {
            out.push("  Precision Time Measurement Device Capability:".to_string());
            out.push(format!("    bLength             {:5}", byte(cap, 0)));
            out.push(format!("    bDescriptorType     {:5}", byte(cap, 1)));
            out.push(format!("    bDevCapabilityType  {:5}", byte(cap, 2)));
        }
        0x0d => billboard(cap, ctx, out),
        _ => {
            out.push(format!("  ** UNRECOGNIZED: {}", hex_bytes(cap)));
        }
    }
}

fn usb2_extension(cap: &[u8], out: &mut Vec<String>) {
    let attrs = le32(cap, 3);
    out.push("  USB 2.0 Extension Device Capability:".to_string());
    out.push(format!("    bLength             {:5}", byte(cap, 0)));
    out.push(format!("    bDescriptorType     {:5}", byte(cap, 1)));
    out.push(format!("    bDevCapabilityType  {:5}", byte(cap, 2)));
    out.push(format!("    bmAttributes   0x{attrs:08x}"));
    if attrs & 0x02 == 0 {
        out.push("      (Missing must-be-set LPM bit!)".to_string());
    } else if attrs & 0x04 == 0 {
        out.push("      HIRD Link Power Management (LPM) Supported".to_string());
    } else {
        out.push("      BESL Link Power Management (LPM) Supported".to_string());
        if attrs & 0x08 != 0 {
            out.push(format!("    BESL value    {:5} us ", (attrs & 0xf00) >> 8));
        }
        if attrs & 0x10 != 0 {
            out.push(format!("    Deep BESL value    {:5} us ", (attrs & 0xf000) >> 12));
        }
    }
}

fn speed_name(bit: u32) -> &'static str {
    match bit {
        0 => "Low Speed (1.5Mbps)",
        1 => "Full Speed (12Mbps)",
        2 => "High Speed (480Mbps)",
        _ => "SuperSpeed (5Gbps)",
    }
}

fn superspeed(cap: &[u8], out: &mut Vec<String>) {
    let speeds = le16(cap, 4);
    out.push("  SuperSpeed USB Device Capability:".to_string());
    out.push(format!("    bLength             {:5}", byte(cap, 0)));
    out.push(format!("    bDescriptorType     {:5}", byte(cap, 1)));
    out.push(format!("    bDevCapabilityType  {:5}", byte(cap, 2)));
    out.push(format!("    bmAttributes         0x{:02x}", byte(cap, 3)));
    if byte(cap, 3) & 0x02 != 0 {
        out.push("      Latency Tolerance Messages (LTM) Supported".to_string());
    }
    out.push(format!("    wSpeedsSupported   0x{speeds:04x}"));
    for bit in 0..4 {
        if speeds & (1 << bit) != 0 {
            out.push(format!("      Device can operate at {}", speed_name(bit)));
        }
    }
    out.push(format!("    bFunctionalitySupport {:3}", byte(cap, 6)));
    out.push(format!(
        "      Lowest fully-functional device speed is {}",
        speed_name(u32::from(byte(cap, 6)))
    ));
    out.push(format!("    bU1DevExitLat       {:5} micro seconds", byte(cap, 7)));
    out.push(format!("    bU2DevExitLat       {:5} micro seconds", le16(cap, 8)));
}

fn superspeed_plus(cap: &[u8], out: &mut Vec<String>) {
    let attrs = le32(cap, 4);
    let func = le16(cap, 8);
    let ssac = (attrs & 0x1f) + 1;
    let ssic = ((attrs >> 5) & 0x0f) + 1;
    out.push("  SuperSpeedPlus USB Device Capability:".to_string());
    out.push(format!("    bLength             {:5}", byte(cap, 0)));
    out.push(format!("    bDescriptorType     {:5}", byte(cap, 1)));
    out.push(format!("    bDevCapabilityType  {:5}", byte(cap, 2)));
    out.push(format!("    bmAttributes   0x{attrs:08x}"));
    out.push(format!("      Sublink Speed Attribute count {ssac}"));
    out.push(format!("      Sublink Speed ID count {ssic}"));
    out.push(format!("    wFunctionalitySupport 0x{func:04x}"));
    out.push(format!("      Min functional Speed Attribute ID: {}", func & 0x0f));
    out.push(format!("      Min functional RX lanes: {}", (func >> 8) & 0x0f));
    out.push(format!("      Min functional TX lanes: {}", (func >> 12) & 0x0f));
    for i in 0..ssac as usize {
        let attr = le32(cap, 12 + 4 * i);
        let exponent = (attr >> 4) & 0x03;
        let mantissa = attr >> 16;
        let unit = match exponent {
            0 => "b/s",
            1 => "Kb/s",
            2 => "Mb/s",
            _ => "Gb/s",
        };
        out.push(format!("    bmSublinkSpeedAttr[{i}]   0x{attr:08x}"));
        out.push(format!(
            "      Speed Attribute ID: {} {}{} {} {}",
            attr & 0x0f,
            mantissa,
            unit,
            if attr & 0x40 != 0 { "Asymmetric" } else { "Symmetric" },
            if attr & 0x80 != 0 { "TX" } else { "RX" },
        ));
    }
}

fn container_id(cap: &[u8], out: &mut Vec<String>) {
    out.push("  Container ID Device Capability:".to_string());
    out.push(format!("    bLength             {:5}", byte(cap, 0)));
    out.push(format!("    bDescriptorType     {:5}", byte(cap, 1)));
    out.push(format!("    bDevCapabilityType  {:5}", byte(cap, 2)));
    out.push(format!("    bReserved           {:5}", byte(cap, 3)));
    out.push(format!("    ContainerID             {}", guid(cap, 4)));
}

fn platform(cap: &[u8], ctx: &dyn DumpContext, out: &mut Vec<String>) {
    let uuid = guid(cap, 4);
    out.push("  Platform Device Capability:".to_string());
    out.push(format!("    bLength             {:5}", byte(cap, 0)));
    out.push(format!("    bDescriptorType     {:5}", byte(cap, 1)));
    out.push(format!("    bDevCapabilityType  {:5}", byte(cap, 2)));
    out.push(format!("    bReserved           {:5}", byte(cap, 3)));
    out.push(format!("    PlatformCapabilityUUID  {uuid}"));
    if uuid == WEBUSB_UUID && cap.len() >= 24 {
        out.push("      WebUSB:".to_string());
        out.push(format!(
            "        bcdVersion   {:2x}.{:02x}",
            byte(cap, 21),
            byte(cap, 20)
        ));
        out.push(format!("        bVendorCode  {:5}", byte(cap, 22)));
        out.push(format!(
            "        iLandingPage {}",
            string_field(ctx, byte(cap, 23))
        ));
    }
}

fn billboard(cap: &[u8], ctx: &dyn DumpContext, out: &mut Vec<String>) {
    let modes = usize::from(byte(cap, 4));
    out.push("  Billboard Capability:".to_string());
    out.push(format!("    bLength             {:5}", byte(cap, 0)));
    out.push(format!("    bDescriptorType     {:5}", byte(cap, 1)));
    out.push(format!("    bDevCapabilityType  {:5}", byte(cap, 2)));
    out.push(format!(
        "    iAdditionalInfoURL  {}",
        string_field(ctx, byte(cap, 3))
    ));
    out.push(format!("    bNumberOfAlternateModes {:3}", byte(cap, 4)));
    out.push(format!("    bPreferredAlternateMode {:3}", byte(cap, 5)));
    let vconn = le16(cap, 6);
    let watts = match vconn & 0x07 {
        0 => "1W",
        1 => "1.5W",
        2 => "2W",
        3 => "3W",
        4 => "4W",
        5 => "5W",
        6 => "6W",
        _ => "reserved",
    };
    if vconn & 0x8000 != 0 {
        out.push("    VCONN Power is not required".to_string());
    } else {
        out.push(format!("    VCONN Power         {:5} {}", vconn & 0x07, watts));
    }
    out.push(format!(
        "    bcdVersion          {:2x}.{:02x}",
        byte(cap, 41),
        byte(cap, 40)
    ));
    for i in 0..modes {
        let off = 44 + 4 * i;
        out.push(format!(
            "    Alternate Mode {i}: wSVID 0x{:04x} bAlternateMode {} iAlternateModeString {}",
            le16(cap, off),
            byte(cap, off + 2),
            string_field(ctx, byte(cap, off + 3)).trim_end()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullContext;

    fn bos(caps: &[&[u8]]) -> Vec<u8> {
        let total: usize = 5 + caps.iter().map(|c| c.len()).sum::<usize>();
        let mut buf = vec![5, 0x0f];
        buf.extend_from_slice(&(total as u16).to_le_bytes());
        buf.push(caps.len() as u8);
        for c in caps {
            buf.extend_from_slice(c);
        }
        buf
    }

    #[test]
    fn usb2_extension_lpm() {
        let cap = [7, 0x10, 0x02, 0x02, 0x00, 0x00, 0x00];
        let lines = bos_descriptor(&bos(&[&cap]), &NullContext);
        assert_eq!(lines[0], "Binary Object Store Descriptor:");
        assert_eq!(lines[4], "  bNumDeviceCaps          1");
        assert_eq!(lines[5], "  USB 2.0 Extension Device Capability:");
        assert_eq!(lines[9], "    bmAttributes   0x00000002");
        assert_eq!(lines[10], "      HIRD Link Power Management (LPM) Supported");
    }

    #[test]
    fn superspeed_capability() {
        let cap = [10, 0x10, 0x03, 0x02, 0x0e, 0x00, 1, 10, 0xff, 0x07];
        let lines = bos_descriptor(&bos(&[&cap]), &NullContext);
        assert_eq!(lines[5], "  SuperSpeed USB Device Capability:");
        assert_eq!(lines[10], "      Latency Tolerance Messages (LTM) Supported");
        assert_eq!(lines[11], "    wSpeedsSupported   0x000e");
        assert_eq!(lines[12], "      Device can operate at Full Speed (12Mbps)");
        assert_eq!(lines[13], "      Device can operate at High Speed (480Mbps)");
        assert_eq!(lines[14], "      Device can operate at SuperSpeed (5Gbps)");
        assert_eq!(
            lines[16],
            "      Lowest fully-functional device speed is Full Speed (12Mbps)"
        );
        assert_eq!(lines[17], "    bU1DevExitLat          10 micro seconds");
        assert_eq!(lines[18], "    bU2DevExitLat        2047 micro seconds");
    }

    #[test]
    fn webusb_platform_sub_decode() {
        let mut cap = vec![24, 0x10, 0x05, 0x00];
        cap.extend_from_slice(&[
            0x38, 0xb6, 0x08, 0x34, 0xa9, 0x09, 0xa0, 0x47, 0x8b, 0xfd, 0xa0, 0x76, 0x88, 0x15,
            0xb6, 0x65,
        ]);
        cap.extend_from_slice(&[0x00, 0x01, 1, 1]);
        let lines = bos_descriptor(&bos(&[&cap]), &NullContext);
        assert_eq!(
            lines[10],
            "    PlatformCapabilityUUID  {3408b638-09a9-47a0-8bfd-a0768815b665}"
        );
        assert_eq!(lines[11], "      WebUSB:");
        assert_eq!(lines[12], "        bcdVersion    1.00");
        assert_eq!(lines[13], "        bVendorCode      1");
    }

    #[test]
    fn unknown_capability_hexdump() {
        let cap = [4, 0x10, 0x7e, 0xaa];
        let lines = bos_descriptor(&bos(&[&cap]), &NullContext);
        assert_eq!(lines[5], "  ** UNRECOGNIZED: 04 10 7e aa");
    }

    #[test]
    fn zero_length_capability_stops_walk() {
        let cap = [0u8, 0, 0, 0];
        let lines = bos_descriptor(&bos(&[&cap]), &NullContext);
        assert_eq!(
            lines.last().unwrap(),
            "  Warning: corrupt capability descriptor, aborting"
        );
    }

    #[test]
    fn container_id_guid() {
        let mut cap = vec![20, 0x10, 0x04, 0x00];
        cap.extend_from_slice(&[
            0x38, 0xb6, 0x08, 0x34, 0xa9, 0x09, 0xa0, 0x47, 0x8b, 0xfd, 0xa0, 0x76, 0x88, 0x15,
            0xb6, 0x65,
        ]);
        let lines = bos_descriptor(&bos(&[&cap]), &NullContext);
        assert_eq!(
            lines[10],
            "    ContainerID             {3408b638-09a9-47a0-8bfd-a0768815b665}"
        );
    }
}
