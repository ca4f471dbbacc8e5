use egui::Color32;
use egui::ecolor::HexColor;

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA` (the leading `#` is
/// optional).
pub fn parse_hex(text: &str) -> Option<Color32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.is_empty() || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    HexColor::from_str_without_hash(hex).ok().map(|h| h.color())
}

/// Format as `#RRGGBB`, or `#RRGGBBAA` when the color is not opaque.
pub fn to_hex(color: Color32) -> String {
    let hex = if color.is_opaque() {
        HexColor::Hex6(color)
    } else {
        HexColor::Hex8(color)
    };
    hex.to_string().to_ascii_uppercase()
}

/// Serde adapter storing a [`Color32`] as a hex string.
pub mod serde_hex {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_hex(&text).ok_or_else(|| D::Error::custom(format!("invalid color `{text}`")))
    }
}
