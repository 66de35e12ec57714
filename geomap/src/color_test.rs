use super::*;

#[test]
fn parse_hex_rgb_accepts_short_and_long_forms() {
    assert_eq!(parse_hex_rgb("#abc"), Some((0xaa, 0xbb, 0xcc)));
    assert_eq!(parse_hex_rgb("#007BFF"), Some((0, 123, 255)));
    assert_eq!(parse_hex_rgb("  #ffffff  "), Some((255, 255, 255)));
}

#[test]
fn parse_hex_rgb_rejects_invalid_values() {
    assert_eq!(parse_hex_rgb("007BFF"), None);
    assert_eq!(parse_hex_rgb("#12"), None);
    assert_eq!(parse_hex_rgb("#zzzzzz"), None);
    assert_eq!(parse_hex_rgb("white"), None);
}

#[test]
fn first_hex_finds_leading_gradient_stop() {
    let gradient = "linear-gradient(145deg, #2C3E50, #4CA1AF)";
    assert_eq!(first_hex(gradient), Some("#2C3E50"));
}

#[test]
fn first_hex_skips_short_and_broken_stops() {
    assert_eq!(first_hex("#abc then #123456"), Some("#123456"));
    assert_eq!(first_hex("white"), None);
    assert_eq!(first_hex("ends with #12"), None);
}

#[test]
fn mix_with_white_blends_each_channel() {
    assert_eq!(mix_with_white("#007BFF", 0.9), "rgb(230, 242, 255)");
    assert_eq!(mix_with_white("#000000", 0.5), "rgb(128, 128, 128)");
}

#[test]
fn mix_with_white_extremes() {
    assert_eq!(mix_with_white("#2C3E50", 0.0), "rgb(44, 62, 80)");
    assert_eq!(mix_with_white("#2C3E50", 1.0), "rgb(255, 255, 255)");
}

#[test]
fn mix_with_white_falls_back_to_default_accent() {
    assert_eq!(mix_with_white("not a color", 0.9), mix_with_white(FALLBACK_ACCENT, 0.9));
}
