//! Audio class (UAC) interface and endpoint descriptors.
//!
//! UAC1 is decoded in full for the common unit and terminal layouts; UAC2
//! adds the clock descriptors. Later protocol revisions renumber the
//! subtype space, so decoding starts by remapping the raw subtype onto a
//! protocol-independent name.

use crate::cursor::{byte, hex_bytes, le16, le32};
use crate::{string_field, DumpContext};

/// bInterfaceProtocol values for the audio class.
pub const UAC1: u8 = 0x00;
pub const UAC2: u8 = 0x20;
pub const UAC3: u8 = 0x30;

const CHANNEL_NAMES: [&str; 12] = [
    "Left Front (L)",
    "Right Front (R)",
    "Center Front (C)",
    "Low Frequency Enhancement (LFE)",
    "Left Surround (LS)",
    "Right Surround (RS)",
    "Left of Center (LC)",
    "Right of Center (RC)",
    "Surround (S)",
    "Side Left (SL)",
    "Side Right (SR)",
    "Top (T)",
];

const FEATURE_NAMES: [&str; 10] = [
    "Mute Control",
    "Volume Control",
    "Bass Control",
    "Mid Control",
    "Treble Control",
    "Graphic Equalizer Control",
    "Automatic Gain Control",
    "Delay Control",
    "Bass Boost Control",
    "Loudness Control",
];

/// Map a control-interface subtype byte onto its name for the given
/// protocol revision. The numbering shifted between UAC1, UAC2 and UAC3.
fn ac_subtype_name(protocol: u8, subtype: u8) -> &'static str {
    match (protocol, subtype) {
        (UAC1, 0x01) | (UAC2, 0x01) => "HEADER",
        (_, 0x02) => "INPUT_TERMINAL",
        (_, 0x03) => "OUTPUT_TERMINAL",
        (UAC3, 0x04) => "EXTENDED_TERMINAL",
        (UAC3, 0x05) => "MIXER_UNIT",
        (UAC3, 0x06) => "SELECTOR_UNIT",
        (_, 0x04) => "MIXER_UNIT",
        (_, 0x05) => "SELECTOR_UNIT",
        (_, 0x06) => "FEATURE_UNIT",
        (UAC1, 0x07) => "PROCESSING_UNIT",
        (UAC2, 0x07) | (UAC3, 0x07) => "EFFECT_UNIT",
        (UAC1, 0x08) => "EXTENSION_UNIT",
        (UAC2, 0x08) | (UAC3, 0x08) => "PROCESSING_UNIT",
        (UAC2, 0x09) | (UAC3, 0x09) => "EXTENSION_UNIT",
        (UAC2, 0x0a) | (UAC3, 0x0a) => "CLOCK_SOURCE",
        (UAC2, 0x0b) | (UAC3, 0x0b) => "CLOCK_SELECTOR",
        (UAC2, 0x0c) | (UAC3, 0x0c) => "CLOCK_MULTIPLIER",
        (UAC2, 0x0d) | (UAC3, 0x0d) => "SAMPLE_RATE_CONVERTER",
        _ => "unknown",
    }
}

fn channel_config(config: u32, indent: &str, out: &mut Vec<String>) {
    for (i, name) in CHANNEL_NAMES.iter().enumerate() {
        if config & (1 << i) != 0 {
            out.push(format!("{indent}{name}"));
        }
    }
}

/// Format a class-specific descriptor on an AudioControl interface.
pub fn audiocontrol_interface(buf: &[u8], protocol: u8, ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    let subtype = byte(buf, 2);
    let name = ac_subtype_name(protocol, subtype);
    out.push("      AudioControl Interface Descriptor:".to_string());
    out.push(format!("        bLength             {:5}", byte(buf, 0)));
    out.push(format!("        bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("        bDescriptorSubtype  {:5} ({name})", subtype));

    match (protocol, name) {
        (UAC1, "HEADER") => {
            out.push(format!(
                "        bcdADC              {:2x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!("        wTotalLength       0x{:04x}", le16(buf, 5)));
            out.push(format!("        bInCollection       {:5}", byte(buf, 7)));
            for i in 0..usize::from(byte(buf, 7)) {
                out.push(format!(
                    "        baInterfaceNr({i})    {:5}",
                    byte(buf, 8 + i)
                ));
            }
        }
        (UAC2, "HEADER") => {
            out.push(format!(
                "        bcdADC              {:2x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!("        bCategory           {:5}", byte(buf, 5)));
            out.push(format!("        wTotalLength       0x{:04x}", le16(buf, 6)));
            out.push(format!("        bmControls           0x{:02x}", byte(buf, 8)));
        }
        (UAC1, "INPUT_TERMINAL") => {
            let tt = le16(buf, 4);
            out.push(format!("        bTerminalID         {:5}", byte(buf, 3)));
            out.push(format!(
                "        wTerminalType      0x{:04x} {}",
                tt,
                names::audio_terminal(tt).unwrap_or("")
            ));
            out.push(format!("        bAssocTerminal      {:5}", byte(buf, 6)));
            out.push(format!("        bNrChannels         {:5}", byte(buf, 7)));
            out.push(format!("        wChannelConfig     0x{:04x}", le16(buf, 8)));
            channel_config(u32::from(le16(buf, 8)), "          ", &mut out);
            out.push(format!(
                "        iChannelNames       {}",
                string_field(ctx, byte(buf, 10))
            ));
            out.push(format!(
                "        iTerminal           {}",
                string_field(ctx, byte(buf, 11))
            ));
        }
        (UAC2, "INPUT_TERMINAL") => {
            let tt = le16(buf, 4);
            out.push(format!("        bTerminalID         {:5}", byte(buf, 3)));
            out.push(format!(
                "        wTerminalType      0x{:04x} {}",
                tt,
                names::audio_terminal(tt).unwrap_or("")
            ));
            out.push(format!("        bAssocTerminal      {:5}", byte(buf, 6)));
            out.push(format!("        bCSourceID          {:5}", byte(buf, 7)));
            out.push(format!("        bNrChannels         {:5}", byte(buf, 8)));
            out.push(format!("        bmChannelConfig    0x{:08x}", le32(buf, 9)));
            channel_config(le32(buf, 9), "          ", &mut out);
            out.push(format!(
                "        iChannelNames       {}",
                string_field(ctx, byte(buf, 13))
            ));
            out.push(format!("        bmControls         0x{:04x}", le16(buf, 14)));
            out.push(format!(
                "        iTerminal           {}",
                string_field(ctx, byte(buf, 16))
            ));
        }
        (UAC1, "OUTPUT_TERMINAL") => {
            let tt = le16(buf, 4);
            out.push(format!("        bTerminalID         {:5}", byte(buf, 3)));
            out.push(format!(
                "        wTerminalType      0x{:04x} {}",
                tt,
                names::audio_terminal(tt).unwrap_or("")
            ));
            out.push(format!("        bAssocTerminal      {:5}", byte(buf, 6)));
            out.push(format!("        bSourceID           {:5}", byte(buf, 7)));
            out.push(format!(
                "        iTerminal           {}",
                string_field(ctx, byte(buf, 8))
            ));
        }
        (UAC2, "OUTPUT_TERMINAL") => {
            let tt = le16(buf, 4);
            out.push(format!("        bTerminalID         {:5}", byte(buf, 3)));
            out.push(format!(
                "        wTerminalType      0x{:04x} {}",
                tt,
                names::audio_terminal(tt).unwrap_or("")
            ));
            out.push(format!("        bAssocTerminal      {:5}", byte(buf, 6)));
            out.push(format!("        bSourceID           {:5}", byte(buf, 7)));
            out.push(format!("        bCSourceID          {:5}", byte(buf, 8)));
            out.push(format!("        bmControls         0x{:04x}", le16(buf, 9)));
            out.push(format!(
                "        iTerminal           {}",
                string_field(ctx, byte(buf, 11))
            ));
        }
        (UAC1, "MIXER_UNIT") => {
            let pins = usize::from(byte(buf, 4));
            out.push(format!("        bUnitID             {:5}", byte(buf, 3)));
            out.push(format!("        bNrInPins           {:5}", byte(buf, 4)));
            for i in 0..pins {
                out.push(format!(
                    "        baSourceID({i})       {:5}",
                    byte(buf, 5 + i)
                ));
            }
            out.push(format!("        bNrChannels         {:5}", byte(buf, 5 + pins)));
            out.push(format!(
                "        wChannelConfig     0x{:04x}",
                le16(buf, 6 + pins)
            ));
            channel_config(u32::from(le16(buf, 6 + pins)), "          ", &mut out);
            out.push(format!(
                "        iChannelNames       {}",
                string_field(ctx, byte(buf, 8 + pins))
            ));
        }
        (UAC1, "SELECTOR_UNIT") | (UAC2, "SELECTOR_UNIT") => {
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
        (UAC1, "FEATURE_UNIT") => {
            let csize = usize::from(byte(buf, 5)).max(1);
            let len = usize::from(byte(buf, 0));
            let slots = len.saturating_sub(7) / csize;
            out.push(format!("        bUnitID             {:5}", byte(buf, 3)));
            out.push(format!("        bSourceID           {:5}", byte(buf, 4)));
            out.push(format!("        bControlSize        {:5}", byte(buf, 5)));
            for i in 0..slots {
                let mut controls: u32 = 0;
                for j in 0..csize.min(4) {
                    controls |= u32::from(byte(buf, 6 + i * csize + j)) << (8 * j);
                }
                out.push(format!("        bmaControls({i})      0x{controls:02x}"));
                for (bit, label) in FEATURE_NAMES.iter().enumerate() {
                    if controls & (1 << bit) != 0 {
                        out.push(format!("          {label}"));
                    }
                }
            }
            out.push(format!(
                "        iFeature            {}",
                string_field(ctx, byte(buf, len.saturating_sub(1)))
            ));
        }
        (UAC2, "CLOCK_SOURCE") => {
            let attrs = byte(buf, 4);
            let kind = match attrs & 0x03 {
                0 => "External clock",
                1 => "Internal fixed clock",
                2 => "Internal variable clock",
                _ => "Internal programmable clock",
            };
            out.push(format!("        bClockID            {:5}", byte(buf, 3)));
            out.push(format!("        bmAttributes         0x{:02x} {}", attrs, kind));
            if attrs & 0x04 != 0 {
                out.push("          (synced to SOF)".to_string());
            }
            out.push(format!("        bmControls           0x{:02x}", byte(buf, 5)));
            out.push(format!("        bAssocTerminal      {:5}", byte(buf, 6)));
            out.push(format!(
                "        iClockSource        {}",
                string_field(ctx, byte(buf, 7))
            ));
        }
        (UAC2, "CLOCK_SELECTOR") => {
            let pins = usize::from(byte(buf, 4));
            out.push(format!("        bClockID            {:5}", byte(buf, 3)));
            out.push(format!("        bNrInPins           {:5}", byte(buf, 4)));
            for i in 0..pins {
                out.push(format!(
                    "        baCSourceID({i})      {:5}",
                    byte(buf, 5 + i)
                ));
            }
            out.push(format!("        bmControls           0x{:02x}", byte(buf, 5 + pins)));
            out.push(format!(
                "        iClockSelector      {}",
                string_field(ctx, byte(buf, 6 + pins))
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

/// Format a class-specific descriptor on an AudioStreaming interface.
pub fn audiostreaming_interface(buf: &[u8], protocol: u8, ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    let subtype = byte(buf, 2);
    let name = match subtype {
        0x01 => "AS_GENERAL",
        0x02 => "FORMAT_TYPE",
        0x03 => "FORMAT_SPECIFIC",
        _ => "unknown",
    };
    out.push("      AudioStreaming Interface Descriptor:".to_string());
    out.push(format!("        bLength             {:5}", byte(buf, 0)));
    out.push(format!("        bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("        bDescriptorSubtype  {:5} ({name})", subtype));

    match (protocol, name) {
        (UAC1, "AS_GENERAL") => {
            let fmt = le16(buf, 5);
            out.push(format!("        bTerminalLink       {:5}", byte(buf, 3)));
            out.push(format!("        bDelay              {:5} frames", byte(buf, 4)));
            out.push(format!(
                "        wFormatTag         0x{:04x} {}",
                fmt,
                format_tag_name(fmt)
            ));
        }
        (UAC2, "AS_GENERAL") => {
            out.push(format!("        bTerminalLink       {:5}", byte(buf, 3)));
            out.push(format!("        bmControls           0x{:02x}", byte(buf, 4)));
            out.push(format!("        bFormatType         {:5}", byte(buf, 5)));
            out.push(format!("        bmFormats        0x{:08x}", le32(buf, 6)));
            out.push(format!("        bNrChannels         {:5}", byte(buf, 10)));
            out.push(format!("        bmChannelConfig    0x{:08x}", le32(buf, 11)));
            channel_config(le32(buf, 11), "          ", &mut out);
            out.push(format!(
                "        iChannelNames       {}",
                string_field(ctx, byte(buf, 15))
            ));
        }
        (UAC1, "FORMAT_TYPE") => {
            let ftype = byte(buf, 3);
            out.push(format!(
                "        bFormatType         {:5} {}",
                ftype,
                match ftype {
                    1 => "(FORMAT_TYPE_I)",
                    2 => "(FORMAT_TYPE_II)",
                    3 => "(FORMAT_TYPE_III)",
                    _ => "(invalid)",
                }
            ));
            out.push(format!("        bNrChannels         {:5}", byte(buf, 4)));
            out.push(format!("        bSubframeSize       {:5}", byte(buf, 5)));
            out.push(format!("        bBitResolution      {:5}", byte(buf, 6)));
            let nfreq = byte(buf, 7);
            if nfreq == 0 {
                let lo = u32::from(byte(buf, 8))
                    | u32::from(byte(buf, 9)) << 8
                    | u32::from(byte(buf, 10)) << 16;
                let hi = u32::from(byte(buf, 11))
                    | u32::from(byte(buf, 12)) << 8
                    | u32::from(byte(buf, 13)) << 16;
                out.push(format!("        bSamFreqType        {:5} Continuous", nfreq));
                out.push(format!("        tLowerSamFreq   {:9}", lo));
                out.push(format!("        tUpperSamFreq   {:9}", hi));
            } else {
                out.push(format!("        bSamFreqType        {:5} Discrete", nfreq));
                for i in 0..usize::from(nfreq) {
                    let f = u32::from(byte(buf, 8 + 3 * i))
                        | u32::from(byte(buf, 9 + 3 * i)) << 8
                        | u32::from(byte(buf, 10 + 3 * i)) << 16;
                    out.push(format!("        tSamFreq[{i:2}]    {f:9}"));
                }
            }
        }
        (UAC2, "FORMAT_TYPE") => {
            out.push(format!("        bFormatType         {:5}", byte(buf, 3)));
            out.push(format!("        bSubslotSize        {:5}", byte(buf, 4)));
            out.push(format!("        bBitResolution      {:5}", byte(buf, 5)));
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

fn format_tag_name(tag: u16) -> &'static str {
    match tag {
        0x0000 => "TYPE_I_UNDEFINED",
        0x0001 => "PCM",
        0x0002 => "PCM8",
        0x0003 => "IEEE_FLOAT",
        0x0004 => "ALAW",
        0x0005 => "MULAW",
        0x1000 => "TYPE_II_UNDEFINED",
        0x1001 => "MPEG",
        0x1002 => "AC-3",
        _ => "",
    }
}

/// Format a class-specific descriptor on a MIDIStreaming interface.
pub fn midistreaming_interface(buf: &[u8], ctx: &dyn DumpContext) -> Vec<String> {
    let mut out = Vec::new();
    let subtype = byte(buf, 2);
    let name = match subtype {
        0x01 => "HEADER",
        0x02 => "MIDI_IN_JACK",
        0x03 => "MIDI_OUT_JACK",
        0x04 => "ELEMENT",
        _ => "unknown",
    };
    out.push("      MIDIStreaming Interface Descriptor:".to_string());
    out.push(format!("        bLength             {:5}", byte(buf, 0)));
    out.push(format!("        bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!("        bDescriptorSubtype  {:5} ({name})", subtype));

    let jack_type = |ty: u8| match ty {
        1 => "Embedded",
        2 => "External",
        _ => "Invalid",
    };
    match name {
        "HEADER" => {
            out.push(format!(
                "        bcdADC              {:2x}.{:02x}",
                byte(buf, 4),
                byte(buf, 3)
            ));
            out.push(format!("        wTotalLength       0x{:04x}", le16(buf, 5)));
        }
        "MIDI_IN_JACK" => {
            out.push(format!(
                "        bJackType           {:5} {}",
                byte(buf, 3),
                jack_type(byte(buf, 3))
            ));
            out.push(format!("        bJackID             {:5}", byte(buf, 4)));
            out.push(format!(
                "        iJack               {}",
                string_field(ctx, byte(buf, 5))
            ));
        }
        "MIDI_OUT_JACK" => {
            let pins = usize::from(byte(buf, 5));
            out.push(format!(
                "        bJackType           {:5} {}",
                byte(buf, 3),
                jack_type(byte(buf, 3))
            ));
            out.push(format!("        bJackID             {:5}", byte(buf, 4)));
            out.push(format!("        bNrInputPins        {:5}", byte(buf, 5)));
            for i in 0..pins {
                out.push(format!(
                    "        baSourceID({i})       {:5}",
                    byte(buf, 6 + 2 * i)
                ));
                out.push(format!(
                    "        BaSourcePin({i})      {:5}",
                    byte(buf, 7 + 2 * i)
                ));
            }
            out.push(format!(
                "        iJack               {}",
                string_field(ctx, byte(buf, 6 + 2 * pins))
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

/// Format a class-specific audio endpoint descriptor (type 0x25).
pub fn audiostreaming_endpoint(buf: &[u8], protocol: u8) -> Vec<String> {
    let mut out = Vec::new();
    let subtype = byte(buf, 2);
    out.push("        AudioStreaming Endpoint Descriptor:".to_string());
    out.push(format!("          bLength             {:5}", byte(buf, 0)));
    out.push(format!("          bDescriptorType     {:5}", byte(buf, 1)));
    out.push(format!(
        "          bDescriptorSubtype  {:5} ({})",
        subtype,
        if subtype == 1 { "EP_GENERAL" } else { "unknown" }
    ));
    if subtype != 1 {
        return out;
    }
    let attrs = byte(buf, 3);
    out.push(format!("          bmAttributes         0x{:02x}", attrs));
    if attrs & 0x01 != 0 {
        out.push("            Sampling Frequency".to_string());
    }
    if attrs & 0x02 != 0 {
        out.push("            Pitch".to_string());
    }
    if attrs & 0x80 != 0 {
        out.push("            MaxPacketsOnly".to_string());
    }
    let units = |u: u8| match u {
        0 => "Undefined",
        1 => "Milliseconds",
        2 => "Decoded PCM samples",
        _ => "Invalid",
    };
    if protocol == UAC2 {
        out.push(format!("          bmControls           0x{:02x}", byte(buf, 4)));
        out.push(format!(
            "          bLockDelayUnits     {:5} {}",
            byte(buf, 5),
            units(byte(buf, 5))
        ));
        out.push(format!("          wLockDelay         0x{:04x}", le16(buf, 6)));
    } else {
        out.push(format!(
            "          bLockDelayUnits     {:5} {}",
            byte(buf, 4),
            units(byte(buf, 4))
        ));
        out.push(format!("          wLockDelay         0x{:04x}", le16(buf, 5)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullContext;

    #[test]
    fn uac1_header() {
        let buf = [10, 0x24, 0x01, 0x00, 0x01, 0x64, 0x00, 2, 1, 2];
        let lines = audiocontrol_interface(&buf, UAC1, &NullContext);
        assert_eq!(lines[0], "      AudioControl Interface Descriptor:");
        assert_eq!(lines[3], "        bDescriptorSubtype      1 (HEADER)");
        assert_eq!(lines[4], "        bcdADC               1.00");
        assert_eq!(lines[5], "        wTotalLength       0x0064");
        assert_eq!(lines[7], "        baInterfaceNr(0)        1");
    }

    #[test]
    fn uac1_input_terminal_channels() {
        let buf = [12, 0x24, 0x02, 1, 0x01, 0x01, 0, 2, 0x03, 0x00, 0, 0];
        let lines = audiocontrol_interface(&buf, UAC1, &NullContext);
        assert_eq!(lines[3], "        bDescriptorSubtype      2 (INPUT_TERMINAL)");
        assert_eq!(lines[5], "        wTerminalType      0x0101 USB Streaming");
        assert_eq!(lines[8], "        wChannelConfig     0x0003");
        assert_eq!(lines[9], "          Left Front (L)");
        assert_eq!(lines[10], "          Right Front (R)");
    }

    #[test]
    fn uac1_feature_unit_controls() {
        // bControlSize 1, two channel slots: master has Mute+Volume, ch1 none
        let buf = [9, 0x24, 0x06, 5, 1, 1, 0x03, 0x00, 0];
        let lines = audiocontrol_interface(&buf, UAC1, &NullContext);
        assert_eq!(lines[3], "        bDescriptorSubtype      6 (FEATURE_UNIT)");
        assert_eq!(lines[7], "        bmaControls(0)      0x03");
        assert_eq!(lines[8], "          Mute Control");
        assert_eq!(lines[9], "          Volume Control");
        assert_eq!(lines[10], "        bmaControls(1)      0x00");
    }

    #[test]
    fn uac2_clock_source_renumbered_subtype() {
        let buf = [8, 0x24, 0x0a, 4, 0x01, 0x07, 0, 0];
        let lines = audiocontrol_interface(&buf, UAC2, &NullContext);
        assert_eq!(lines[3], "        bDescriptorSubtype     10 (CLOCK_SOURCE)");
        assert_eq!(lines[5], "        bmAttributes         0x01 Internal fixed clock");
    }

    #[test]
    fn uac1_as_general_and_format() {
        let general = [7, 0x24, 0x01, 1, 1, 0x01, 0x00];
        let lines = audiostreaming_interface(&general, UAC1, &NullContext);
        assert_eq!(lines[4], "        bTerminalLink           1");
        assert_eq!(lines[5], "        bDelay                  1 frames");
        assert_eq!(lines[6], "        wFormatTag         0x0001 PCM");

        let fmt = [11, 0x24, 0x02, 1, 2, 2, 16, 1, 0x80, 0xbb, 0x00];
        let lines = audiostreaming_interface(&fmt, UAC1, &NullContext);
        assert_eq!(lines[3], "        bDescriptorSubtype      2 (FORMAT_TYPE)");
        assert_eq!(lines[4], "        bFormatType             1 (FORMAT_TYPE_I)");
        assert_eq!(lines[8], "        bSamFreqType            1 Discrete");
        assert_eq!(lines[9], "        tSamFreq[ 0]        48000");
    }

    #[test]
    fn midi_out_jack_pins() {
        let buf = [9, 0x24, 0x03, 1, 3, 1, 2, 1, 0];
        let lines = midistreaming_interface(&buf, &NullContext);
        assert_eq!(lines[3], "        bDescriptorSubtype      3 (MIDI_OUT_JACK)");
        assert_eq!(lines[4], "        bJackType               1 Embedded");
        assert_eq!(lines[7], "        baSourceID(0)           2");
        assert_eq!(lines[8], "        BaSourcePin(0)          1");
    }

    #[test]
    fn audio_endpoint_general() {
        let buf = [7, 0x25, 0x01, 0x01, 0, 0x00, 0x00];
        let lines = audiostreaming_endpoint(&buf, UAC1);
        assert_eq!(lines[3], "          bDescriptorSubtype      1 (EP_GENERAL)");
        assert_eq!(lines[4], "          bmAttributes         0x01");
        assert_eq!(lines[5], "            Sampling Frequency");
        assert_eq!(lines[6], "          bLockDelayUnits         0 Undefined");
    }

    #[test]
    fn unknown_subtype_dumped_as_hex() {
        let buf = [5, 0x24, 0x7f, 0xaa, 0xbb];
        let lines = audiocontrol_interface(&buf, UAC1, &NullContext);
        assert_eq!(lines[3], "        bDescriptorSubtype    127 (unknown)");
        assert_eq!(lines[4], "        Invalid desc subtype: aa bb");
    }
}
