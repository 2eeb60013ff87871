use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An opaque sRGB color. Alpha is handled separately by the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` (the leading `#` is optional). Shorthand `#RGB` is
    /// accepted the way CSS expands it.
    pub fn parse_hex(value: &str) -> Result<Self> {
        let hex = value.trim().trim_start_matches('#');
        let invalid = || Error::InvalidHexColor {
            value: value.to_string(),
        };
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).map_err(|_| invalid())?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).map_err(|_| invalid())?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).map_err(|_| invalid())?;
                Ok(Self { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
                let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
                let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
                Ok(Self { r, g, b })
            }
            _ => Err(invalid()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other`. `ratio` is clamped to `0..=1`.
    pub fn lerp(self, other: Self, ratio: f64) -> Self {
        let ratio = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * ratio).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Scales each component by `1 - factor`. A negative `factor` lightens
    /// towards white instead.
    pub fn darken(self, factor: f64) -> Self {
        let adjust = |component: u8| -> u8 {
            let comp = component as f64;
            let out = if factor >= 0.0 {
                comp * (1.0 - factor)
            } else {
                comp + (255.0 - comp) * -factor
            };
            out.round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: adjust(self.r),
            g: adjust(self.g),
            b: adjust(self.b),
        }
    }
}

/// The sixteen Minecraft chat colors. Each carries a foreground color and the
/// matching darker shadow color used for the drop-shadow pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinecraftColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl MinecraftColor {
    pub const ALL: [MinecraftColor; 16] = [
        Self::Black,
        Self::DarkBlue,
        Self::DarkGreen,
        Self::DarkAqua,
        Self::DarkRed,
        Self::DarkPurple,
        Self::Gold,
        Self::Gray,
        Self::DarkGray,
        Self::Blue,
        Self::Green,
        Self::Aqua,
        Self::Red,
        Self::LightPurple,
        Self::Yellow,
        Self::White,
    ];

    /// Canonical lowercase tag name (`dark_aqua`, not `Dark Aqua`).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::DarkBlue => "dark_blue",
            Self::DarkGreen => "dark_green",
            Self::DarkAqua => "dark_aqua",
            Self::DarkRed => "dark_red",
            Self::DarkPurple => "dark_purple",
            Self::Gold => "gold",
            Self::Gray => "gray",
            Self::DarkGray => "dark_gray",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Aqua => "aqua",
            Self::Red => "red",
            Self::LightPurple => "light_purple",
            Self::Yellow => "yellow",
            Self::White => "white",
        }
    }

    /// Case-insensitive lookup by canonical name. Unknown names return `None`
    /// so callers can fall back to the current style instead of failing.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }

    pub const fn foreground(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0x00, 0x00, 0x00),
            Self::DarkBlue => Rgb::new(0x00, 0x00, 0xAA),
            Self::DarkGreen => Rgb::new(0x00, 0xAA, 0x00),
            Self::DarkAqua => Rgb::new(0x00, 0xAA, 0xAA),
            Self::DarkRed => Rgb::new(0xAA, 0x00, 0x00),
            Self::DarkPurple => Rgb::new(0xAA, 0x00, 0xAA),
            Self::Gold => Rgb::new(0xFF, 0xAA, 0x00),
            Self::Gray => Rgb::new(0xAA, 0xAA, 0xAA),
            Self::DarkGray => Rgb::new(0x55, 0x55, 0x55),
            Self::Blue => Rgb::new(0x55, 0x55, 0xFF),
            Self::Green => Rgb::new(0x55, 0xFF, 0x55),
            Self::Aqua => Rgb::new(0x55, 0xFF, 0xFF),
            Self::Red => Rgb::new(0xFF, 0x55, 0x55),
            Self::LightPurple => Rgb::new(0xFF, 0x55, 0xFF),
            Self::Yellow => Rgb::new(0xFF, 0xFF, 0x55),
            Self::White => Rgb::new(0xFF, 0xFF, 0xFF),
        }
    }

    pub const fn shadow(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0x00, 0x00, 0x00),
            Self::DarkBlue => Rgb::new(0x00, 0x00, 0x2A),
            Self::DarkGreen => Rgb::new(0x00, 0x2A, 0x00),
            Self::DarkAqua => Rgb::new(0x00, 0x2A, 0x2A),
            Self::DarkRed => Rgb::new(0x2A, 0x00, 0x00),
            Self::DarkPurple => Rgb::new(0x2A, 0x00, 0x2A),
            Self::Gold => Rgb::new(0x2A, 0x2A, 0x00),
            Self::Gray => Rgb::new(0x2A, 0x2A, 0x2A),
            Self::DarkGray => Rgb::new(0x15, 0x15, 0x15),
            Self::Blue => Rgb::new(0x15, 0x15, 0x3F),
            Self::Green => Rgb::new(0x15, 0x3F, 0x15),
            Self::Aqua => Rgb::new(0x15, 0x3F, 0x3F),
            Self::Red => Rgb::new(0x3F, 0x15, 0x15),
            Self::LightPurple => Rgb::new(0x3F, 0x15, 0x3F),
            Self::Yellow => Rgb::new(0x3F, 0x3F, 0x15),
            Self::White => Rgb::new(0x3F, 0x3F, 0x3F),
        }
    }
}

/// Shadow color for an arbitrary foreground. Chat colors keep their paired
/// table shadow; anything else (hex literals, gradient stops) is darkened
/// uniformly by 0.75.
pub fn shadow_for(color: Rgb) -> Rgb {
    match MinecraftColor::ALL
        .into_iter()
        .find(|mc| mc.foreground() == color)
    {
        Some(mc) => mc.shadow(),
        None => color.darken(0.75),
    }
}

/// Hypixel rank → display color, case-insensitive. Unknown ranks return
/// `None`; callers typically fall back to the `DEFAULT` gray.
pub fn rank_color(rank: &str) -> Option<Rgb> {
    const RANK_COLORS: [(&str, Rgb); 10] = [
        ("ADMIN", Rgb::new(255, 85, 85)),
        ("GAME_MASTER", Rgb::new(0, 170, 0)),
        ("YOUTUBER", Rgb::new(255, 85, 85)),
        ("SUPERSTAR_GOLD", Rgb::new(255, 170, 0)),
        ("SUPERSTAR_AQUA", Rgb::new(85, 255, 255)),
        ("MVP_PLUS", Rgb::new(85, 255, 255)),
        ("MVP", Rgb::new(85, 255, 255)),
        ("VIP_PLUS", Rgb::new(85, 255, 85)),
        ("VIP", Rgb::new(85, 255, 85)),
        ("DEFAULT", Rgb::new(170, 170, 170)),
    ];

    RANK_COLORS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(rank))
        .map(|(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let gold = Rgb::parse_hex("#FFAA00").expect("parse ok");
        assert_eq!(gold, MinecraftColor::Gold.foreground());
        assert_eq!(gold.to_hex(), "#FFAA00");
        assert_eq!(Rgb::parse_hex("55ff55").expect("parse ok").to_hex(), "#55FF55");
        assert_eq!(Rgb::parse_hex("#abc").expect("parse ok").to_hex(), "#AABBCC");
    }

    #[test]
    fn invalid_hex_is_an_error() {
        assert!(Rgb::parse_hex("#12345").is_err());
        assert!(Rgb::parse_hex("#GGGGGG").is_err());
        assert!(Rgb::parse_hex("").is_err());
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        assert_eq!(MinecraftColor::from_name("dark_aqua"), Some(MinecraftColor::DarkAqua));
        assert_eq!(MinecraftColor::from_name("DARK_AQUA"), Some(MinecraftColor::DarkAqua));
        assert_eq!(MinecraftColor::from_name("Dark Aqua"), None);
        assert_eq!(MinecraftColor::from_name("chartreuse"), None);
    }

    #[test]
    fn every_chat_color_has_a_table_shadow() {
        for color in MinecraftColor::ALL {
            assert_eq!(shadow_for(color.foreground()), color.shadow(), "{}", color.name());
        }
    }

    #[test]
    fn unknown_foreground_shadow_is_darkened() {
        let odd = Rgb::new(0x12, 0x80, 0xFE);
        let shadow = shadow_for(odd);
        assert_eq!(shadow, odd.darken(0.75));
        assert!(shadow.r < odd.r && shadow.g < odd.g && shadow.b < odd.b);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(255, 255, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 128, 128));
        // out-of-range ratios clamp instead of over/undershooting
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, -1.0), a);
    }

    #[test]
    fn rank_colors_match_hypixel_palette() {
        assert_eq!(rank_color("MVP_PLUS"), Some(Rgb::new(85, 255, 255)));
        assert_eq!(rank_color("vip"), Some(Rgb::new(85, 255, 85)));
        assert_eq!(rank_color("DEFAULT"), Some(Rgb::new(170, 170, 170)));
        assert_eq!(rank_color("OWNER"), None);
    }
}
