//! HID class descriptor and report descriptor decoding.

use crate::cursor::{byte, le16};
use crate::{too_short, DumpContext};

const ITEM_TYPES: [&str; 4] = ["Main", "Global", "Local", "reserved"];

const UNIT_SYSTEMS: [&str; 5] = [
    "None",
    "SI Linear",
    "SI Rotation",
    "English Linear",
    "English Rotation",
];

const UNITS: [[&str; 8]; 5] = [
    ["None", "None", "None", "None", "None", "None", "None", "None"],
    ["None", "Centimeter", "Gram", "Seconds", "Kelvin", "Ampere", "Candela", "None"],
    ["None", "Radians", "Gram", "Seconds", "Kelvin", "Ampere", "Candela", "None"],
    ["None", "Inch", "Slug", "Seconds", "Fahrenheit", "Ampere", "Candela", "None"],
    ["None", "Degrees", "Slug", "Seconds", "Fahrenheit", "Ampere", "Candela", "None"],
];

/// Format a HID class descriptor found in an interface's extra bytes.
/// When one of the sub-descriptors is a report descriptor, the context is
/// asked for its contents; a refusal is rendered as `** UNAVAILABLE **`.
pub fn hid_descriptor(buf: &[u8], interface_number: u8, ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    if buf.len() < 6 {
        too_short("        ", &mut out);
        return out;
    }

    out.push("        HID Device Descriptor:".to_string());
    out.push(format!("          bLength             {:5}", byte(buf, 0)));
    out.push(format!("          bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!(
        "          bcdHID              {:2x}.{:02x}",
        byte(buf, 3),
        byte(buf, 2)
    ));
    out.push(format!(
        "          bCountryCode        {:5} {}",
        byte(buf, 4),
        names::country_code(byte(buf, 4)).unwrap_or("Unknown")
    ));
    out.push(format!("          bNumDescriptors     {:5}", byte(buf, 5)));

    let count = usize::from(byte(buf, 5));
    for i in 0..count {
        let off = 6 + 3 * i;
        let dtype = byte(buf, off);
        let dlen = le16(buf, off + 1);
        out.push(format!(
            "          bDescriptorType     {:5} {}",
            dtype,
            names::hid_descriptor_type(dtype).unwrap_or("")
        ));
        out.push(format!("          wDescriptorLength   {:5}", dlen));
        if dtype == 0x22 {
            match ctx.report_descriptor(interface_number, dlen) {
                Some(desc) => {
                    out.push(format!(
                        "          Report Descriptor: (length is {})",
                        desc.len()
                    ));
                    report_descriptor(&desc, &mut out);
                }
                None => {
                    out.push("          Report Descriptors: ".to_string());
                    out.push("            ** UNAVAILABLE **".to_string());
                }
            }
        }
    }
    out
}

/// Decode a raw report descriptor into per-item lines.
pub fn report_descriptor(desc: &[u8], out: &mut Vec<String>) {
    // Current usage page, carried from Usage Page items to name bare usages.
    let mut page: u16 = 0;
    let mut i = 0usize;
    while i < desc.len() {
        let b = desc[i];
        let mut bsize = usize::from(b & 0x03);
        if bsize == 3 {
            bsize = 4;
        }
        let btag = b & 0xfc;
        let mut data: u32 = 0;
        let mut line = format!(
            "            Item({:<6}): {}, data=",
            ITEM_TYPES[usize::from((b >> 2) & 0x03)],
            names::report_tag(btag).unwrap_or("reserved")
        );
        if bsize > 0 {
            line.push_str("[ ");
            for j in 0..bsize {
                let v = byte(desc, i + 1 + j);
                line.push_str(&format!("0x{:02x} ", v));
                data |= u32::from(v) << (8 * j);
            }
            line.push_str(&format!("] {}", data));
        } else {
            line.push_str("none");
        }
        out.push(line);

        match btag {
            // Usage Page
            0x04 => {
                page = (data & 0xffff) as u16;
                out.push(format!(
                    "                {}",
                    names::usage_page(page).unwrap_or("(null)")
                ));
            }
            // Usage, Usage Minimum, Usage Maximum
            0x08 | 0x18 | 0x28 => {
                out.push(format!(
                    "                {}",
                    names::usage((u32::from(page) << 16) | (data & 0xffff))
                        .unwrap_or("(null)")
                ));
            }
            // Unit Exponent
            0x54 => {
                let exp = ((data as i32 & 0x0f) << 28) >> 28;
                out.push(format!("                Unit Exponent: {}", exp));
            }
            // Unit
            0x64 => {
                out.push(format!("                {}", unit(data, bsize)));
            }
            // Collection
            0xa0 => {
                let kind = match data & 0xff {
                    0x00 => "Physical",
                    0x01 => "Application",
                    0x02 => "Logical",
                    0x03 => "Report",
                    0x04 => "Named Array",
                    0x05 => "Usage Switch",
                    0x06 => "Usage Modifier",
                    n if n & 0x80 != 0 => "Vendor defined",
                    _ => "Reserved for future use.",
                };
                out.push(format!("                {}", kind));
            }
            // Input, Output, Feature
            0x80 | 0x90 | 0xb0 => {
                out.push(format!(
                    "                {} {} {} {} {}",
                    if data & 0x01 != 0 { "Constant" } else { "Data" },
                    if data & 0x02 != 0 { "Variable" } else { "Array" },
                    if data & 0x04 != 0 { "Relative" } else { "Absolute" },
                    if data & 0x08 != 0 { "Wrap" } else { "No_Wrap" },
                    if data & 0x10 != 0 { "Non_Linear" } else { "Linear" },
                ));
                out.push(format!(
                    "                {} {} {} {}",
                    if data & 0x20 != 0 { "No_Preferred_State" } else { "Preferred_State" },
                    if data & 0x40 != 0 { "Null_State" } else { "No_Null_Position" },
                    if data & 0x80 != 0 { "Volatile" } else { "Non_Volatile" },
                    if data & 0x100 != 0 { "Buffered Bytes" } else { "Bitfield" },
                ));
            }
            _ => {}
        }
        i += 1 + bsize;
    }
}

/// Render a HID unit value, e.g. `System: SI Linear, Unit: Centimeter^2`.
fn unit(mut data: u32, len: usize) -> String {
    let sys = (data & 0x0f) as usize;
    data >>= 4;
    if sys > 4 {
        return if sys == 0x0f {
            "System: Vendor defined, Unit: (unknown)".to_string()
        } else {
            "System: Reserved, Unit: (unknown)".to_string()
        };
    }
    let mut s = format!("System: {}, Unit: ", UNIT_SYSTEMS[sys]);
    let mut seen = 0;
    for i in 1..len * 2 {
        let nibble = data & 0x0f;
        data >>= 4;
        if nibble != 0 && i < 8 {
            if seen > 0 {
                s.push('*');
            }
            seen += 1;
            s.push_str(UNITS[sys][i]);
            if nibble != 1 {
                let exp = ((nibble as i32) << 28) >> 28;
                s.push_str(&format!("^{}", exp));
            }
        }
    }
    if seen == 0 {
        s.push_str("(None)");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullContext;

    struct FakeReport(Vec<u8>);

    impl DumpContext for FakeReport {
        fn string_descriptor(&self, _index: u8) -> Option<String> {
            None
        }

        fn report_descriptor(&self, _interface_number: u8, _length: u16) -> Option<Vec<u8>> {
            Some(self.0.clone())
        }
    }

    // 9-byte HID descriptor advertising one report descriptor of 52 bytes.
    fn hid_buf() -> Vec<u8> {
        vec![9, 0x21, 0x11, 0x01, 0x00, 0x01, 0x22, 52, 0]
    }

    #[test]
    fn hid_header_fields() {
        let lines = hid_descriptor(&hid_buf(), 0, &NullContext);
        assert_eq!(lines[0], "        HID Device Descriptor:");
        assert_eq!(lines[3], "          bcdHID               1.11");
        assert_eq!(lines[4], "          bCountryCode            0 Not supported");
        assert_eq!(lines[6], "          bDescriptorType        34 Report");
        assert_eq!(lines[7], "          wDescriptorLength      52");
    }

    #[test]
    fn report_unavailable_marker() {
        let lines = hid_descriptor(&hid_buf(), 0, &NullContext);
        assert_eq!(lines[8], "          Report Descriptors: ");
        assert_eq!(lines[9], "            ** UNAVAILABLE **");
    }

    #[test]
    fn report_items_are_decoded() {
        // Usage Page (Generic Desktop), Usage (Mouse), Collection (Application)
        let report = vec![0x05, 0x01, 0x09, 0x02, 0xa1, 0x01];
        let ctx = FakeReport(report);
        let lines = hid_descriptor(&hid_buf(), 0, &ctx);
        assert_eq!(lines[8], "          Report Descriptor: (length is 6)");
        assert_eq!(
            lines[9],
            "            Item(Global): Usage Page, data=[ 0x01 ] 1"
        );
        assert_eq!(lines[10], "                Generic Desktop Controls");
        assert_eq!(lines[11], "            Item(Local ): Usage, data=[ 0x02 ] 2");
        assert_eq!(lines[12], "                Mouse");
        assert_eq!(
            lines[13],
            "            Item(Main  ): Collection, data=[ 0x01 ] 1"
        );
        assert_eq!(lines[14], "                Application");
    }

    #[test]
    fn input_item_flag_narrative() {
        let mut out = Vec::new();
        // Input (Data,Var,Rel) as in a mouse X/Y report
        report_descriptor(&[0x81, 0x06], &mut out);
        assert_eq!(
            out,
            vec![
                "            Item(Main  ): Input, data=[ 0x06 ] 6",
                "                Data Variable Relative No_Wrap Linear",
                "                Preferred_State No_Null_Position Non_Volatile Bitfield",
            ]
        );
    }

    #[test]
    fn unit_rendering() {
        assert_eq!(unit(0x11, 2), "System: SI Linear, Unit: Centimeter");
        assert_eq!(unit(0xe021, 2), "System: SI Linear, Unit: Centimeter^2*Seconds^-2");
        assert_eq!(unit(0x0f, 1), "System: Vendor defined, Unit: (unknown)");
        assert_eq!(unit(0x01, 1), "System: SI Linear, Unit: (None)");
    }

    #[test]
    fn short_hid_descriptor_warns() {
        let lines = hid_descriptor(&[9, 0x21, 0x11], 0, &NullContext);
        assert_eq!(lines, vec!["        Warning: Descriptor too short"]);
    }
}
