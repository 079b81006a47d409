use image::Rgba;

/// Color used for buckets that no mapping colors, and for malformed hex strings.
pub const FALLBACK_GRAY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Parse a strict `#RRGGBB` string into an opaque color.
///
/// Anything else (missing `#`, short forms, alpha suffixes, non-hex digits) yields
/// [`FALLBACK_GRAY`] instead of failing.
pub fn parse_hex_color(s: &str) -> Rgba<u8> {
    parse_rrggbb(s).unwrap_or(FALLBACK_GRAY)
}

fn parse_rrggbb(s: &str) -> Option<Rgba<u8>> {
    let digits = s.strip_prefix('#')?;
    if s.len() != 7 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    fn hex_byte(pair: &str) -> Option<u8> {
        u8::from_str_radix(pair, 16).ok()
    }

    Some(Rgba([
        hex_byte(&digits[0..2])?,
        hex_byte(&digits[2..4])?,
        hex_byte(&digits[4..6])?,
        255,
    ]))
}
