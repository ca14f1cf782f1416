//! CDC (communications class) functional descriptors.
//!
//! These are the class-specific records found in the `extra` region of
//! communications interfaces, discriminated by bDescriptorSubtype.

use crate::cursor::{byte, guid, hex_bytes, le16};
use crate::DumpContext;

/// Format one CDC functional descriptor. `indent` is the caller's nesting
/// prefix (six spaces at interface level).
pub fn comm_descriptor(buf: &[u8], indent: &str, ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    let len = usize::from(byte(buf, 0));
    let subtype = byte(buf, 2);

    // Each functional descriptor has a fixed (or minimum) size; a mismatch
    // renders the whole record as invalid rather than misreading fields.
    let bad = |type_name: &str, out: &mut Vec<String>| {
        out.push(format!(
            "{indent}INVALID CDC ({type_name}): {}",
            hex_bytes(&buf[..len.min(buf.len())])
        ));
    };

    match subtype {
        0x00 => {
            if len != 5 {
                bad("Header", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC Header:"));
            out.push(format!(
                "{indent}  bcdCDC               {:x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
        }
        0x01 => {
            if len != 5 {
                bad("Call Management", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC Call Management:"));
            out.push(format!("{indent}  bmCapabilities       0x{:02x}", byte(buf, 3)));
            if byte(buf, 3) & 0x01 != 0 {
                out.push(format!("{indent}    call management"));
            }
            if byte(buf, 3) & 0x02 != 0 {
                out.push(format!("{indent}    use DataInterface"));
            }
            out.push(format!("{indent}  bDataInterface          {}", byte(buf, 4)));
        }
        0x02 => {
            if len != 4 {
                bad("ACM", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC ACM:"));
            out.push(format!("{indent}  bmCapabilities       0x{:02x}", byte(buf, 3)));
            if byte(buf, 3) & 0x08 != 0 {
                out.push(format!("{indent}    connection notifications"));
            }
            if byte(buf, 3) & 0x04 != 0 {
                out.push(format!("{indent}    sends break"));
            }
            if byte(buf, 3) & 0x02 != 0 {
                out.push(format!("{indent}    line coding and serial state"));
            }
            if byte(buf, 3) & 0x01 != 0 {
                out.push(format!("{indent}    get/set/clear comm features"));
            }
        }
        0x06 => {
            if len < 5 {
                bad("Union", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC Union:"));
            out.push(format!("{indent}  bMasterInterface        {}", byte(buf, 3)));
            let slaves: Vec<String> = (4..len).map(|i| byte(buf, i).to_string()).collect();
            out.push(format!(
                "{indent}  bSlaveInterface         {}",
                slaves.join(" ")
            ));
        }
        0x07 => {
            if len < 6 || len % 2 != 0 {
                bad("Country Selection", &mut out);
                return out;
            }
            let date = ctx.string_descriptor(byte(buf, 3)).unwrap_or_default();
            out.push(format!("{indent}Country Selection:"));
            out.push(format!(
                "{indent}  iCountryCodeRelDate     {:4} {}",
                byte(buf, 3),
                if byte(buf, 3) != 0 && !date.is_empty() { date.as_str() } else { "(??)" }
            ));
            let mut i = 4;
            while i + 1 < len {
                out.push(format!(
                    "{indent}  wCountryCode          0x{:02x}{:02x}",
                    byte(buf, i),
                    byte(buf, i + 1)
                ));
                i += 2;
            }
        }
        0x08 => {
            if len != 4 {
                bad("Telephone Operations", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC Telephone operations:"));
            out.push(format!("{indent}  bmCapabilities       0x{:02x}", byte(buf, 3)));
            if byte(buf, 3) & 0x04 != 0 {
                out.push(format!("{indent}    computer centric mode"));
            }
            if byte(buf, 3) & 0x02 != 0 {
                out.push(format!("{indent}    standalone mode"));
            }
            if byte(buf, 3) & 0x01 != 0 {
                out.push(format!("{indent}    simple mode"));
            }
        }
        0x0a => {
            if len != 7 {
                bad("Network Channel Terminal", &mut out);
                return out;
            }
            let name = ctx.string_descriptor(byte(buf, 4)).unwrap_or_default();
            out.push(format!("{indent}Network Channel Terminal:"));
            out.push(format!("{indent}  bEntityId               {:3}", byte(buf, 3)));
            out.push(format!("{indent}  iName                   {:3} {name}", byte(buf, 4)));
            out.push(format!("{indent}  bChannelIndex           {:3}", byte(buf, 5)));
            out.push(format!("{indent}  bPhysicalInterface      {:3}", byte(buf, 6)));
        }
        0x0f => {
            if len != 13 {
                bad("Ethernet", &mut out);
                return out;
            }
            let mac = ctx.string_descriptor(byte(buf, 3)).unwrap_or_default();
            let stats = u32::from(byte(buf, 7)) << 24
                | u32::from(byte(buf, 6)) << 16
                | u32::from(byte(buf, 5)) << 8
                | u32::from(byte(buf, 4));
            out.push(format!("{indent}CDC Ethernet:"));
            out.push(format!(
                "{indent}  iMacAddress             {:10} {}",
                byte(buf, 3),
                if byte(buf, 3) != 0 && !mac.is_empty() { mac.as_str() } else { "(??)" }
            ));
            out.push(format!("{indent}  bmEthernetStatistics    0x{stats:08x}"));
            out.push(format!("{indent}  wMaxSegmentSize         {:10}", le16(buf, 8)));
            out.push(format!("{indent}  wNumberMCFilters            0x{:04x}", le16(buf, 10)));
            out.push(format!("{indent}  bNumberPowerFilters     {:10}", byte(buf, 12)));
        }
        0x11 => {
            if len != 5 {
                bad("WHCM version", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC WHCM:"));
            out.push(format!(
                "{indent}  bcdVersion           {:x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
        }
        0x12 => {
            if len != 21 {
                bad("MDLM", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC MDLM:"));
            out.push(format!(
                "{indent}  bcdCDC               {:x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!("{indent}  bGUID               {}", guid(buf, 5)));
        }
        0x13 => {
            if len < 5 {
                bad("MDLM detail", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC MDLM detail:"));
            out.push(format!("{indent}  bGuidDescriptorType  {:02x}", byte(buf, 3)));
            out.push(format!(
                "{indent}  bDetailData          {}",
                hex_bytes(&buf[4..len.min(buf.len())])
            ));
        }
        0x14 => {
            if len != 7 {
                bad("Device Management", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC Device Management:"));
            out.push(format!(
                "{indent}  bcdVersion           {:x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!("{indent}  wMaxCommand          {}", le16(buf, 5)));
        }
        0x15 => {
            if len != 5 {
                bad("OBEX", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC OBEX:"));
            out.push(format!(
                "{indent}  bcdVersion           {:x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
        }
        0x16 => {
            if len != 22 {
                bad("Command Set", &mut out);
                return out;
            }
            let set = ctx.string_descriptor(byte(buf, 5)).unwrap_or_default();
            out.push(format!("{indent}CDC Command Set:"));
            out.push(format!(
                "{indent}  bcdVersion           {:x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!(
                "{indent}  iCommandSet          {:4} {}",
                byte(buf, 5),
                if byte(buf, 5) != 0 && !set.is_empty() { set.as_str() } else { "(??)" }
            ));
            out.push(format!("{indent}  bGUID                {}", guid(buf, 6)));
        }
        0x1a => {
            if len != 6 {
                bad("NCM", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC NCM:"));
            out.push(format!(
                "{indent}  bcdNcmVersion        {:x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!("{indent}  bmNetworkCapabilities 0x{:02x}", byte(buf, 5)));
            for (bit, label) in [
                (1 << 5, "8-byte ntb input size"),
                (1 << 4, "crc mode"),
                (1 << 3, "max datagram size"),
                (1 << 2, "encapsulated commands"),
                (1 << 1, "net address"),
                (1 << 0, "packet filter"),
            ] {
                if byte(buf, 5) & bit != 0 {
                    out.push(format!("{indent}    {label}"));
                }
            }
        }
        0x1b => {
            if len != 12 {
                bad("MBIM", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC MBIM:"));
            out.push(format!(
                "{indent}  bcdMBIMVersion       {:x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!("{indent}  wMaxControlMessage   {}", le16(buf, 5)));
            out.push(format!("{indent}  bNumberFilters       {}", byte(buf, 7)));
            out.push(format!("{indent}  bMaxFilterSize       {}", byte(buf, 8)));
            out.push(format!("{indent}  wMaxSegmentSize      {}", le16(buf, 9)));
            out.push(format!("{indent}  bmNetworkCapabilities 0x{:02x}", byte(buf, 11)));
            if byte(buf, 11) & 0x20 != 0 {
                out.push(format!("{indent}    8-byte ntb input size"));
            }
            if byte(buf, 11) & 0x08 != 0 {
                out.push(format!("{indent}    max datagram size"));
            }
        }
        0x1c => {
            if len != 8 {
                bad("MBIM Extended", &mut out);
                return out;
            }
            out.push(format!("{indent}CDC MBIM Extended:"));
            out.push(format!(
                "{indent}  bcdMBIMExtendedVersion          {:2x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!(
                "{indent}  bMaxOutstandingCommandMessages    {:3}",
                byte(buf, 5)
            ));
            out.push(format!("{indent}  wMTU                            {:5}", le16(buf, 6)));
        }
        _ => {
            out.push(format!(
                "{indent}UNRECOGNIZED CDC: {}",
                hex_bytes(&buf[..len.min(buf.len())])
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullContext;

    #[test]
    fn cdc_header() {
        let buf = [5, 0x24, 0x00, 0x10, 0x01];
        let lines = comm_descriptor(&buf, "      ", &NullContext);
        assert_eq!(lines[0], "      CDC Header:");
        assert_eq!(lines[1], "        bcdCDC               1.10");
    }

    #[test]
    fn cdc_acm_capabilities() {
        let buf = [4, 0x24, 0x02, 0x0f];
        let lines = comm_descriptor(&buf, "", &NullContext);
        assert_eq!(lines[0], "CDC ACM:");
        assert_eq!(lines[1], "  bmCapabilities       0x0f");
        assert_eq!(
            &lines[2..],
            &[
                "    connection notifications",
                "    sends break",
                "    line coding and serial state",
                "    get/set/clear comm features",
            ]
        );
    }

    #[test]
    fn cdc_union_lists_slaves() {
        let buf = [6, 0x24, 0x06, 0, 1, 2];
        let lines = comm_descriptor(&buf, "", &NullContext);
        assert_eq!(lines[1], "  bMasterInterface        0");
        assert_eq!(lines[2], "  bSlaveInterface         1 2");
    }

    #[test]
    fn wrong_length_is_invalid() {
        let buf = [6, 0x24, 0x00, 0x10, 0x01, 0xaa];
        let lines = comm_descriptor(&buf, "", &NullContext);
        assert_eq!(lines, vec!["INVALID CDC (Header): 06 24 00 10 01 aa"]);
    }

    #[test]
    fn unknown_subtype_is_unrecognized() {
        let buf = [4, 0x24, 0x7f, 0x00];
        let lines = comm_descriptor(&buf, "", &NullContext);
        assert_eq!(lines, vec!["UNRECOGNIZED CDC: 04 24 7f 00"]);
    }

    #[test]
    fn cdc_ethernet() {
        let mut buf = vec![13, 0x24, 0x0f, 0, 0x01, 0x00, 0x00, 0x00];
        buf.extend_from_slice(&[0xea, 0x05, 0x00, 0x00, 0]);
        let lines = comm_descriptor(&buf, "", &NullContext);
        assert_eq!(lines[0], "CDC Ethernet:");
        assert!(lines[1].contains("iMacAddress"));
        assert!(lines[1].contains("(??)"));
        assert_eq!(lines[2], "  bmEthernetStatistics    0x00000001");
        assert_eq!(lines[3], "  wMaxSegmentSize               1514");
    }

    #[test]
    fn comm_is_idempotent() {
        let buf = [5, 0x24, 0x00, 0x10, 0x01];
        assert_eq!(
            comm_descriptor(&buf, "  ", &NullContext),
            comm_descriptor(&buf, "  ", &NullContext)
        );
    }
}
