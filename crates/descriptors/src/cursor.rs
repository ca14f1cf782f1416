//! Byte-level helpers for walking descriptor buffers.
//!
//! All accessors treat reads past the end of the buffer as zero, so callers
//! that have already emitted a "too short" warning can keep decoding
//! best-effort without bounds checks at every field.

/// Byte at `offset`, or 0 past the end.
pub fn byte(buf: &[u8], offset: usize) -> u8 {
    buf.get(offset).copied().unwrap_or(0)
}

/// Little-endian u16 at `offset`.
pub fn le16(buf: &[u8], offset: usize) -> u16 {
    u16::from(byte(buf, offset)) | (u16::from(byte(buf, offset + 1)) << 8)
}

/// Little-endian u32 at `offset`.
pub fn le32(buf: &[u8], offset: usize) -> u32 {
    u32::from(le16(buf, offset)) | (u32::from(le16(buf, offset + 2)) << 16)
}

/// Render 16 bytes at `offset` as a GUID in the mixed-endian layout USB
/// capability descriptors use: the first three groups are little-endian
/// fields, the final eight bytes are a flat run.
pub fn guid(buf: &[u8], offset: usize) -> String {
    let b = |i: usize| byte(buf, offset + i);
    format!(
        "{{{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}}}",
        b(3), b(2), b(1), b(0),
        b(5), b(4),
        b(7), b(6),
        b(8), b(9),
        b(10), b(11), b(12), b(13), b(14), b(15),
    )
}

/// Space-separated two-digit hex rendering of a byte run.
pub fn hex_bytes(buf: &[u8]) -> String {
    let mut s = String::with_capacity(buf.len() * 3);
    for (i, b) in buf.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        s.push_str(&format!("{b:02x}"));
    }
    s
}

/// Trailing bytes a known-format decoder did not consume.
///
/// If the descriptor's claimed length (`buf[0]`) exceeds `consumed`, returns
/// a junk line with the extra bytes hex-dumped. The claimed length is clamped
/// to the buffer, so a lying length byte cannot read out of bounds.
pub fn junk(buf: &[u8], indent: &str, consumed: usize) -> Option<String> {
    let claimed = usize::from(byte(buf, 0)).min(buf.len());
    if claimed > consumed {
        Some(format!(
            "{indent}junk at descriptor end: {}",
            hex_bytes(&buf[consumed..claimed])
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_little_endian() {
        let buf = [0x01, 0x02, 0x03, 0x04];
        assert_eq!(le16(&buf, 0), 0x0201);
        assert_eq!(le16(&buf, 2), 0x0403);
        assert_eq!(le32(&buf, 0), 0x04030201);
    }

    #[test]
    fn short_reads_pad_with_zero() {
        let buf = [0xff];
        assert_eq!(le16(&buf, 0), 0x00ff);
        assert_eq!(le32(&buf, 0), 0x000000ff);
        assert_eq!(le32(&buf, 9), 0);
        assert_eq!(byte(&buf, 1), 0);
    }

    #[test]
    fn webusb_guid_round_trip() {
        // WebUSB platform capability UUID, encoded as it appears on the wire.
        let bytes = [
            0x38, 0xb6, 0x08, 0x34, 0xa9, 0x09, 0xa0, 0x47, 0x8b, 0xfd, 0xa0,
            0x76, 0x88, 0x15, 0xb6, 0x65,
        ];
        assert_eq!(guid(&bytes, 0), "{3408b638-09a9-47a0-8bfd-a0768815b665}");
    }

    #[test]
    fn hex_dump_format() {
        assert_eq!(hex_bytes(&[0x01, 0xab, 0x00]), "01 ab 00");
        assert_eq!(hex_bytes(&[]), "");
    }

    #[test]
    fn junk_detection() {
        // Claims 6 bytes, decoder consumed 4.
        let buf = [6, 0x24, 0xaa, 0xbb, 0xcc, 0xdd];
        assert_eq!(
            junk(&buf, "  ", 4).as_deref(),
            Some("  junk at descriptor end: cc dd")
        );
        // Fully consumed: no junk.
        assert_eq!(junk(&buf, "  ", 6), None);
        // Length byte lies beyond the buffer: clamped, no out-of-bounds.
        let lying = [60, 0x24, 0xaa];
        assert_eq!(
            junk(&lying, "", 2).as_deref(),
            Some("junk at descriptor end: aa")
        );
    }
}
