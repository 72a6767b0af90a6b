//! Subject theme colors for table headers.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Header background used when a subject has no theme color.
pub const DEFAULT_ACCENT: &str = "#4a6fa5";

/// Parse `#RGB` or `#RRGGBB` values into RGB channels.
pub fn parse_hex_rgb(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut it = hex.chars().map(|c| channel(&c.to_string().repeat(2)));
            Some((it.next()??, it.next()??, it.next()??))
        }
        6 => Some((channel(hex.get(0..2)?)?, channel(hex.get(2..4)?)?, channel(hex.get(4..6)?)?)),
        _ => None,
    }
}

/// Canonical `#rrggbb` accent for a subject, falling back to [`DEFAULT_ACCENT`].
pub fn subject_accent(color: Option<&str>) -> String {
    let (r, g, b) = color
        .and_then(parse_hex_rgb)
        .or_else(|| parse_hex_rgb(DEFAULT_ACCENT))
        .unwrap_or((74, 111, 165));
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Black or white, whichever reads better on `background`.
pub fn header_text_color(background: &str) -> &'static str {
    let Some((r, g, b)) = parse_hex_rgb(background) else {
        return "#ffffff";
    };
    // Rec. 601 luma, integer form.
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luma > 150_000 { "#1a1a1a" } else { "#ffffff" }
}
