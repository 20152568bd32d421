use serde::{Deserialize, Serialize};

/// Color representation.
///
/// Serialized as a HEX8 string (`#RRGGBBAA`). Deserialization also accepts HEX6 strings.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for String {
    fn from(val: Color) -> Self {
        val.to_hex()
    }
}

impl Color {
    /// White color: `#FFFFFFFF`
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    /// Marker fill used for city markers: orange-red at 90% opacity.
    pub const MARKER_ORANGE: Color = Color::rgba(255, 69, 0, 230);

    /// Constructs color from its RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Constructs color from RGB channels and opacity in range `0.0..=1.0`.
    pub fn rgb_opacity(r: u8, g: u8, b: u8, opacity: f64) -> Self {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b, a }
    }

    /// Converts the color into HEX8 string: `#RRGGBBAA`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
    }

    /// Parses a color from the hex string. Hex string can be either HEX6 (`#RRGGBB`) or HEX8 (`#RRGGBBAA`).
    pub fn try_from_hex(hex_string: &str) -> Option<Self> {
        if hex_string.len() != 7 && hex_string.len() != 9 || !hex_string.starts_with('#') {
            return None;
        }

        let channel = |range: std::ops::Range<usize>| {
            hex_string
                .get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
        };

        let r = channel(1..3)?;
        let g = channel(3..5)?;
        let b = channel(5..7)?;
        let a = if hex_string.len() == 9 {
            channel(7..9)?
        } else {
            255
        };

        Some(Self { r, g, b, a })
    }

    /// Opacity of the color in range `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Red component of the color in RGBA space.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green component of the color in RGBA space.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue component of the color in RGBA space.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Opacity component of the color.
    pub fn a(&self) -> u8 {
        self.a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let hex = "#FF4500E6";
        let color = Color::try_from_hex(hex).unwrap();
        assert_eq!(color, Color::MARKER_ORANGE);
        assert_eq!(&color.to_hex(), hex);
    }

    #[test]
    fn hex6_is_opaque() {
        let color = Color::try_from_hex("#ffffff").unwrap();
        assert_eq!(color, Color::WHITE);
    }

    #[test]
    fn invalid_hex() {
        assert_eq!(Color::try_from_hex("FF4500"), None);
        assert_eq!(Color::try_from_hex("#GG4500"), None);
        assert_eq!(Color::try_from_hex("#FF45"), None);
    }

    #[test]
    fn opacity() {
        assert_eq!(Color::rgb_opacity(255, 69, 0, 0.9), Color::MARKER_ORANGE);
        assert_eq!(Color::rgb_opacity(0, 0, 0, 2.0).a(), 255);
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::WHITE).unwrap();
        assert_eq!(json, r##""#FFFFFFFF""##);
        assert!(serde_json::from_str::<Color>(r#""white""#).is_err());
    }
}
