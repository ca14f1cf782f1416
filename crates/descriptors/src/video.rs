//! Video class (UVC) interface descriptors.

use crate::cursor::{byte, guid, hex_bytes, le16, le32};
use crate::{string_field, DumpContext};

const CAMERA_CONTROLS: [&str; 19] = [
    "Scanning Mode",
    "Auto-Exposure Mode",
    "Auto-Exposure Priority",
    "Exposure Time (Absolute)",
    "Exposure Time (Relative)",
    "Focus (Absolute)",
    "Focus (Relative)",
    "Iris (Absolute)",
    "Iris (Relative)",
    "Zoom (Absolute)",
    "Zoom (Relative)",
    "PanTilt (Absolute)",
    "PanTilt (Relative)",
    "Roll (Absolute)",
    "Roll (Relative)",
    "Reserved",
    "Reserved",
    "Focus, Auto",
    "Privacy",
];

const PROCESSING_CONTROLS: [&str; 18] = [
    "Brightness",
    "Contrast",
    "Hue",
    "Saturation",
    "Sharpness",
    "Gamma",
    "White Balance Temperature",
    "White Balance Component",
    "Backlight Compensation",
    "Gain",
    "Power Line Frequency",
    "Hue, Auto",
    "White Balance Temperature, Auto",
    "White Balance Component, Auto",
    "Digital Multiplier",
    "Digital Multiplier Limit",
    "Analog Video Standard",
    "Analog Video Lock Status",
];

fn control_bits(controls: u32, labels: &[&str], indent: &str, out: &mut Vec<String>) {
    for (i, label) in labels.iter().enumerate() {
        if controls & (1 << i) != 0 {
            out.push(format!("{indent}{label}"));
        }
    }
}

/// Format a class-specific descriptor on a VideoControl interface.
pub fn videocontrol_interface(buf: &[u8], ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    let subtype = byte(buf, 2);
    let name = match subtype {
        0x01 => "HEADER",
        0x02 => "INPUT_TERMINAL",
        0x03 => "OUTPUT_TERMINAL",
        0x04 => "SELECTOR_UNIT",
        0x05 => "PROCESSING_UNIT",
        0x06 => "EXTENSION_UNIT",
        _ => "unknown",
    };
    out.push("      VideoControl Interface Descriptor:".to_string());
    out.push(format!("        bLength             {:5}", byte(buf, 0)));
    out.push(format!("        bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("        bDescriptorSubtype  {:5} ({name})", subtype));

    match name {
        "HEADER" => {
            let clock = le32(buf, 7);
            out.push(format!(
                "        bcdUVC              {:2x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!("        wTotalLength       0x{:04x}", le16(buf, 5)));
            out.push(format!(
                "        dwClockFrequency    {}.{:06}MHz",
                clock / 1_000_000,
                clock % 1_000_000
            ));
            out.push(format!("        bInCollection       {:5}", byte(buf, 11)));
            for i in 0..usize::from(byte(buf, 11)) {
                out.push(format!(
                    "        baInterfaceNr({i})    {:5}",
                    byte(buf, 12 + i)
                ));
            }
        }
        "INPUT_TERMINAL" => {
            let tt = le16(buf, 4);
            out.push(format!("        bTerminalID         {:5}", byte(buf, 3)));
            out.push(format!(
                "        wTerminalType      0x{:04x} {}",
                tt,
                names::video_terminal(tt).unwrap_or("")
            ));
            out.push(format!("        bAssocTerminal      {:5}", byte(buf, 6)));
            out.push(format!(
                "        iTerminal           {}",
                string_field(ctx, byte(buf, 7))
            ));
            // Camera terminals carry the optics block and a control bitmap.
            if tt == 0x0201 {
                let csize = usize::from(byte(buf, 14));
                let mut controls: u32 = 0;
                for j in 0..csize.min(3) {
                    controls |= u32::from(byte(buf, 15 + j)) << (8 * j);
                }
                out.push(format!(
                    "        wObjectiveFocalLengthMin  {:5}",
                    le16(buf, 8)
                ));
                out.push(format!(
                    "        wObjectiveFocalLengthMax  {:5}",
                    le16(buf, 10)
                ));
                out.push(format!(
                    "        wOcularFocalLength        {:5}",
                    le16(buf, 12)
                ));
                out.push(format!("        bControlSize              {:5}", byte(buf, 14)));
                out.push(format!("        bmControls       0x{controls:08x}"));
                control_bits(controls, &CAMERA_CONTROLS, "          ", &mut out);
            }
        }
        "OUTPUT_TERMINAL" => {
            let tt = le16(buf, 4);
            out.push(format!("        bTerminalID         {:5}", byte(buf, 3)));
            out.push(format!(
                "        wTerminalType      0x{:04x} {}",
                tt,
                names::video_terminal(tt).unwrap_or("")
            ));
            out.push(format!("        bAssocTerminal      {:5}", byte(buf, 6)));
            out.push(format!("        bSourceID           {:5}", byte(buf, 7)));
            out.push(format!(
                "        iTerminal           {}",
                string_field(ctx, byte(buf, 8))
            ));
        }
        "SELECTOR_UNIT" => {
            let pins = usize::from(byte(buf, 4));
            out.push(format!("        bUnitID             {:5}", byte(buf, 3)));
            out.push(format!("        bNrInPins           {:5}", byte(buf, 4)));
            for i in 0..pins {
                out.push(format!(
                    "        baSourceID({i})       {:5}",
                    byte(buf, 5 + i)
                ));
            }
            out.push(format!(
                "        iSelector           {}",
                string_field(ctx, byte(buf, 5 + pins))
            ));
        }
        "PROCESSING_UNIT" => {
            let csize = usize::from(byte(buf, 7));
            let mut controls: u32 = 0;
            for j in 0..csize.min(3) {
                controls |= u32::from(byte(buf, 8 + j)) << (8 * j);
            }
            out.push(format!("        bUnitID             {:5}", byte(buf, 3)));
            out.push(format!("        bSourceID           {:5}", byte(buf, 4)));
            out.push(format!("        wMaxMultiplier      {:5}", le16(buf, 5)));
            out.push(format!("        bControlSize        {:5}", byte(buf, 7)));
            out.push(format!("        bmControls       0x{controls:08x}"));
            control_bits(controls, &PROCESSING_CONTROLS, "          ", &mut out);
            out.push(format!(
                "        iProcessing         {}",
                string_field(ctx, byte(buf, 8 + csize))
            ));
        }
        "EXTENSION_UNIT" => {
            let pins = usize::from(byte(buf, 21));
            let csize = usize::from(byte(buf, 22 + pins));
            out.push(format!("        bUnitID             {:5}", byte(buf, 3)));
            out.push(format!("        guidExtensionCode   {}", guid(buf, 4)));
            out.push(format!("        bNumControls        {:5}", byte(buf, 20)));
            out.push(format!("        bNrInPins           {:5}", byte(buf, 21)));
            for i in 0..pins {
                out.push(format!(
                    "        baSourceID({i})       {:5}",
                    byte(buf, 22 + i)
                ));
            }
            out.push(format!("        bControlSize        {:5}", byte(buf, 22 + pins)));
            for i in 0..csize {
                out.push(format!(
                    "        bmControls({i})        0x{:02x}",
                    byte(buf, 23 + pins + i)
                ));
            }
            out.push(format!(
                "        iExtension          {}",
                string_field(ctx, byte(buf, 23 + pins + csize))
            ));
        }
        _ => {
            out.push(format!(
                "        Invalid desc subtype: {}",
                hex_bytes(&buf[3.min(buf.len())..])
            ));
        }
    }
    out
}

/// Format a class-specific descriptor on a VideoStreaming interface.
pub fn videostreaming_interface(buf: &[u8]) -> Vec<String> {
    let mut out = Vec::new();
    let subtype = byte(buf, 2);
    let name = match subtype {
        0x01 => "INPUT_HEADER",
        0x02 => "OUTPUT_HEADER",
        0x03 => "STILL_IMAGE_FRAME",
        0x04 => "FORMAT_UNCOMPRESSED",
        0x05 => "FRAME_UNCOMPRESSED",
        0x06 => "FORMAT_MJPEG",
        0x07 => "FRAME_MJPEG",
        0x0c => "FORMAT_MPEG2TS",
        0x0d => "COLORFORMAT",
        0x10 => "FORMAT_FRAME_BASED",
        0x11 => "FRAME_FRAME_BASED",
        _ => "unknown",
    };
    out.push("      VideoStreaming Interface Descriptor:".to_string());
    out.push(format!("        bLength             {:5}", byte(buf, 0)));
    out.push(format!("        bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("        bDescriptorSubtype  {:5} ({name})", subtype));

    match name {
        "INPUT_HEADER" => {
            let formats = usize::from(byte(buf, 3));
            let csize = usize::from(byte(buf, 12));
            out.push(format!("        bNumFormats         {:5}", byte(buf, 3)));
            out.push(format!("        wTotalLength       0x{:04x}", le16(buf, 4)));
            out.push(format!("        bEndpointAddress     0x{:02x}", byte(buf, 6)));
            out.push(format!("        bmInfo              {:5}", byte(buf, 7)));
            out.push(format!("        bTerminalLink       {:5}", byte(buf, 8)));
            out.push(format!("        bStillCaptureMethod {:5}", byte(buf, 9)));
            out.push(format!("        bTriggerSupport     {:5}", byte(buf, 10)));
            out.push(format!("        bTriggerUsage       {:5}", byte(buf, 11)));
            out.push(format!("        bControlSize        {:5}", byte(buf, 12)));
            for i in 0..formats {
                let mut controls: u32 = 0;
                for j in 0..csize.min(4) {
                    controls |= u32::from(byte(buf, 13 + i * csize + j)) << (8 * j);
                }
                out.push(format!("        bmaControls({i})       0x{controls:02x}"));
            }
        }
        "FORMAT_UNCOMPRESSED" | "FORMAT_MJPEG" => {
            out.push(format!("        bFormatIndex        {:5}", byte(buf, 3)));
            out.push(format!("        bNumFrameDescriptors{:5}", byte(buf, 4)));
            if name == "FORMAT_UNCOMPRESSED" {
                out.push(format!("        guidFormat          {}", guid(buf, 5)));
                out.push(format!("        bBitsPerPixel       {:5}", byte(buf, 21)));
                out.push(format!("        bDefaultFrameIndex  {:5}", byte(buf, 22)));
                out.push(format!("        bAspectRatioX       {:5}", byte(buf, 23)));
                out.push(format!("        bAspectRatioY       {:5}", byte(buf, 24)));
                out.push(format!("        bmInterlaceFlags     0x{:02x}", byte(buf, 25)));
                out.push(format!("        bCopyProtect        {:5}", byte(buf, 26)));
            } else {
                out.push(format!("        bmFlags             {:5}", byte(buf, 5)));
                out.push(format!("        bDefaultFrameIndex  {:5}", byte(buf, 6)));
                out.push(format!("        bAspectRatioX       {:5}", byte(buf, 7)));
                out.push(format!("        bAspectRatioY       {:5}", byte(buf, 8)));
                out.push(format!("        bmInterlaceFlags     0x{:02x}", byte(buf, 9)));
                out.push(format!("        bCopyProtect        {:5}", byte(buf, 10)));
            }
        }
        "FRAME_UNCOMPRESSED" | "FRAME_MJPEG" => {
            out.push(format!("        bFrameIndex         {:5}", byte(buf, 3)));
            out.push(format!("        bmCapabilities       0x{:02x}", byte(buf, 4)));
            out.push(format!("        wWidth              {:5}", le16(buf, 5)));
            out.push(format!("        wHeight             {:5}", le16(buf, 7)));
            out.push(format!("        dwMinBitRate    {:9}", le32(buf, 9)));
            out.push(format!("        dwMaxBitRate    {:9}", le32(buf, 13)));
            out.push(format!(
                "        dwMaxVideoFrameBufferSize {:9}",
                le32(buf, 17)
            ));
            out.push(format!(
                "        dwDefaultFrameInterval    {:9}",
                le32(buf, 21)
            ));
            let ivals = usize::from(byte(buf, 25));
            out.push(format!("        bFrameIntervalType  {:5}", byte(buf, 25)));
            if ivals == 0 {
                out.push(format!(
                    "        dwMinFrameInterval        {:9}",
                    le32(buf, 26)
                ));
                out.push(format!(
                    "        dwMaxFrameInterval        {:9}",
                    le32(buf, 30)
                ));
                out.push(format!(
                    "        dwFrameIntervalStep       {:9}",
                    le32(buf, 34)
                ));
            } else {
                for i in 0..ivals {
                    out.push(format!(
                        "        dwFrameInterval({i})        {:9}",
                        le32(buf, 26 + 4 * i)
                    ));
                }
            }
        }
        "COLORFORMAT" => {
            let primaries = |v: u8| match v {
                0 => "(Unspecified)",
                1 => "(BT.709,sRGB)",
                2 => "(BT.470-2 (M))",
                3 => "(BT.470-2 (B,G))",
                4 => "(SMPTE 170M)",
                5 => "(SMPTE 240M)",
                _ => "(Reserved)",
            };
            let transfer = |v: u8| match v {
                0 => "(Unspecified)",
                1 => "(BT.709)",
                2 => "(BT.470-2 (M))",
                3 => "(BT.470-2 (B,G))",
                4 => "(SMPTE 170M)",
                5 => "(SMPTE 240M)",
                6 => "(Linear)",
                7 => "(sRGB)",
                _ => "(Reserved)",
            };
            let matrix = |v: u8| match v {
                0 => "(Unspecified)",
                1 => "(BT.709)",
                2 => "(FCC)",
                3 => "(BT.470-2 (B,G))",
                4 => "(SMPTE 170M (BT.601))",
                5 => "(SMPTE 240M)",
                _ => "(Reserved)",
            };
            out.push(format!(
                "        bColorPrimaries     {:5} {}",
                byte(buf, 3),
                primaries(byte(buf, 3))
            ));
            out.push(format!(
                "        bTransferCharacteristics {} {}",
                byte(buf, 4),
                transfer(byte(buf, 4))
            ));
            out.push(format!(
                "        bMatrixCoefficients {:5} {}",
                byte(buf, 5),
                matrix(byte(buf, 5))
            ));
        }
        _ => {
            out.push(format!(
                "        Invalid desc subtype: {}",
                hex_bytes(&buf[3.min(buf.len())..])
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
    fn vc_header() {
        let mut buf = vec![13, 0x24, 0x01, 0x00, 0x01];
        buf.extend_from_slice(&0x00d9u16.to_le_bytes());
        buf.extend_from_slice(&30_000_000u32.to_le_bytes());
        buf.push(1);
        buf.push(1);
        let lines = videocontrol_interface(&buf, &NullContext);
        assert_eq!(lines[0], "      VideoControl Interface Descriptor:");
        assert_eq!(lines[3], "        bDescriptorSubtype      1 (HEADER)");
        assert_eq!(lines[4], "        bcdUVC               1.00");
        assert_eq!(lines[6], "        dwClockFrequency    30.000000MHz");
        assert_eq!(lines[8], "        baInterfaceNr(0)        1");
    }

    #[test]
    fn camera_terminal_controls() {
        let mut buf = vec![18, 0x24, 0x02, 1];
        buf.extend_from_slice(&0x0201u16.to_le_bytes());
        buf.push(0); // bAssocTerminal
        buf.push(0); // iTerminal
        buf.extend_from_slice(&[0, 0, 0, 0, 0, 0]); // focal lengths
        buf.push(3); // bControlSize
        buf.extend_from_slice(&[0x0e, 0x00, 0x00]);
        let lines = videocontrol_interface(&buf, &NullContext);
        assert_eq!(lines[5], "        wTerminalType      0x0201 Camera Sensor");
        assert_eq!(lines[12], "        bmControls       0x0000000e");
        assert_eq!(lines[13], "          Auto-Exposure Mode");
        assert_eq!(lines[14], "          Auto-Exposure Priority");
        assert_eq!(lines[15], "          Exposure Time (Absolute)");
    }

    #[test]
    fn processing_unit_controls() {
        let buf = [12, 0x24, 0x05, 2, 1, 0, 0, 2, 0x3f, 0x00, 0, 0];
        let lines = videocontrol_interface(&buf, &NullContext);
        assert_eq!(lines[3], "        bDescriptorSubtype      5 (PROCESSING_UNIT)");
        assert_eq!(lines[8], "        bmControls       0x0000003f");
        assert_eq!(lines[9], "          Brightness");
        assert_eq!(lines[14], "          Gamma");
    }

    #[test]
    fn frame_uncompressed_discrete_intervals() {
        let mut buf = vec![30, 0x24, 0x05, 1, 0x00];
        buf.extend_from_slice(&640u16.to_le_bytes());
        buf.extend_from_slice(&480u16.to_le_bytes());
        buf.extend_from_slice(&24_576_000u32.to_le_bytes());
        buf.extend_from_slice(&147_456_000u32.to_le_bytes());
        buf.extend_from_slice(&614_400u32.to_le_bytes());
        buf.extend_from_slice(&333_333u32.to_le_bytes());
        buf.push(1);
        buf.extend_from_slice(&333_333u32.to_le_bytes());
        let lines = videostreaming_interface(&buf);
        assert_eq!(lines[3], "        bDescriptorSubtype      5 (FRAME_UNCOMPRESSED)");
        assert_eq!(lines[6], "        wWidth                640");
        assert_eq!(lines[7], "        wHeight               480");
        assert_eq!(lines[13], "        dwFrameInterval(0)           333333");
    }

    #[test]
    fn colorformat_names() {
        let buf = [6, 0x24, 0x0d, 1, 1, 4];
        let lines = videostreaming_interface(&buf);
        assert_eq!(lines[4], "        bColorPrimaries         1 (BT.709,sRGB)");
        assert_eq!(lines[5], "        bTransferCharacteristics 1 (BT.709)");
        assert_eq!(lines[6], "        bMatrixCoefficients     4 (SMPTE 170M (BT.601))");
    }
}
