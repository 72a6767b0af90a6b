use super::*;

#[test]
fn parse_hex_rgb_supports_short_and_long_forms() {
    assert_eq!(parse_hex_rgb("#ABC"), Some((170, 187, 204)));
    assert_eq!(parse_hex_rgb("  #a1B2c3 "), Some((161, 178, 195)));
}

#[test]
fn parse_hex_rgb_rejects_invalid_inputs() {
    assert_eq!(parse_hex_rgb("AABBCC"), None);
    assert_eq!(parse_hex_rgb("#12"), None);
    assert_eq!(parse_hex_rgb("#abcd"), None);
    assert_eq!(parse_hex_rgb("#12GG34"), None);
}

#[test]
fn subject_accent_normalizes_or_falls_back() {
    assert_eq!(subject_accent(Some("#ABC")), "#aabbcc");
    assert_eq!(subject_accent(Some("teal")), DEFAULT_ACCENT);
    assert_eq!(subject_accent(None), DEFAULT_ACCENT);
}

#[test]
fn header_text_contrasts_with_background() {
    assert_eq!(header_text_color("#ffffff"), "#1a1a1a");
    assert_eq!(header_text_color("#ffee00"), "#1a1a1a");
    assert_eq!(header_text_color("#123456"), "#ffffff");
    assert_eq!(header_text_color("nonsense"), "#ffffff");
}
