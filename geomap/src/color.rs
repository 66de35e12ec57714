//! Hex color parsing and white blending for theme tokens.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Accent used when a theme's header background carries no hex stop.
pub const FALLBACK_ACCENT: &str = "#007BFF";

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
#[must_use]
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let digits: Vec<char> = raw.trim().strip_prefix('#')?.chars().collect();
    match digits.as_slice() {
        [r, g, b] => Some((hex_pair(*r, *r)?, hex_pair(*g, *g)?, hex_pair(*b, *b)?)),
        [r1, r2, g1, g2, b1, b2] => Some((hex_pair(*r1, *r2)?, hex_pair(*g1, *g2)?, hex_pair(*b1, *b2)?)),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn hex_pair(hi: char, lo: char) -> Option<u8> {
    Some((hi.to_digit(16)? * 16 + lo.to_digit(16)?) as u8)
}

/// First `#RRGGBB` stop in a CSS value such as `linear-gradient(145deg, #2C3E50, #4CA1AF)`.
#[must_use]
pub fn first_hex(value: &str) -> Option<&str> {
    value.match_indices('#').find_map(|(start, _)| {
        let candidate = value.get(start..start + 7)?;
        candidate[1..].chars().all(|c| c.is_ascii_hexdigit()).then_some(candidate)
    })
}

/// Blend `color` toward white by `ratio` (0 keeps the color, 1 is white).
///
/// Returns a CSS `rgb(r, g, b)` string. Unparseable input blends the
/// fallback accent instead.
#[must_use]
pub fn mix_with_white(color: &str, ratio: f64) -> String {
    let ratio = ratio.clamp(0.0, 1.0);
    let (r, g, b) = parse_hex_rgb(color)
        .or_else(|| parse_hex_rgb(FALLBACK_ACCENT))
        .unwrap_or((0, 123, 255));
    let mix = |c: u8| (f64::from(c) * (1.0 - ratio) + 255.0 * ratio).round();
    format!("rgb({}, {}, {})", mix(r), mix(g), mix(b))
}
