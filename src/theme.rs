use serde::Deserialize;

/// Screen palette as hex strings (`#RRGGBB`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background: String,
    pub button: String,
    pub field_border: String,
    pub field_fill: String,
    pub text: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#E5F0F4".to_string(),
            button: "#38779A".to_string(),
            field_border: "#DFDFDF".to_string(),
            field_fill: "#F7FBFB".to_string(),
            text: "#07151D".to_string(),
        }
    }
}

/// Parse `#RRGGBB` (the `#` is optional) into RGB.
///
/// Reads leading hex digits only; no digits at all gives black.
pub fn parse_hex(hex: &str) -> (u8, u8, u8) {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let len = digits
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(digits.len())
        .min(6);

    let rgb = u32::from_str_radix(&digits[..len], 16).unwrap_or(0);

    (
        ((rgb >> 16) & 0xFF) as u8,
        ((rgb >> 8) & 0xFF) as u8,
        (rgb & 0xFF) as u8,
    )
}
