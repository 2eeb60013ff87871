//! BedWars prestige and level-progress formatting.
//!
//! Everything here produces markup strings for the renderer; the palette
//! tables mirror the in-game prestige colors (one tier per 100 levels,
//! clamped at the last defined tier).

use crate::color::MinecraftColor;
use std::fmt::Write as _;

use MinecraftColor::{
    Aqua, Black, Blue, DarkAqua, DarkBlue, DarkGray, DarkGreen, DarkPurple, DarkRed, Gold, Gray,
    Green, LightPurple, Red, White, Yellow,
};

#[derive(Debug, Clone, Copy)]
enum Palette {
    Solid(MinecraftColor),
    /// One color per character of the rendered `[<level><symbol>]` bracket.
    Multi([MinecraftColor; 7]),
}

#[derive(Debug, Clone, Copy)]
struct Tier {
    name: &'static str,
    palette: Palette,
    symbol: char,
}

const STAR: char = '✫';
const STAR_PRIME: char = '✪';
const STAR_MIRROR: char = '⚝';
const STAR_FINAL: char = '✥';

const TIERS: [Tier; 51] = [
    Tier { name: "Stone", palette: Palette::Solid(Gray), symbol: STAR },
    Tier { name: "Iron", palette: Palette::Solid(White), symbol: STAR },
    Tier { name: "Gold", palette: Palette::Solid(Gold), symbol: STAR },
    Tier { name: "Diamond", palette: Palette::Solid(Aqua), symbol: STAR },
    Tier { name: "Emerald", palette: Palette::Solid(DarkGreen), symbol: STAR },
    Tier { name: "Sapphire", palette: Palette::Solid(DarkAqua), symbol: STAR },
    Tier { name: "Ruby", palette: Palette::Solid(DarkRed), symbol: STAR },
    Tier { name: "Crystal", palette: Palette::Solid(LightPurple), symbol: STAR },
    Tier { name: "Opal", palette: Palette::Solid(Blue), symbol: STAR },
    Tier { name: "Amethyst", palette: Palette::Solid(DarkPurple), symbol: STAR },
    Tier {
        name: "Rainbow",
        palette: Palette::Multi([Red, Gold, Yellow, Green, Aqua, LightPurple, DarkPurple]),
        symbol: STAR,
    },
    Tier {
        name: "Iron Prime",
        palette: Palette::Multi([Gray, White, White, White, White, Gray, Gray]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Gold Prime",
        palette: Palette::Multi([Gray, Yellow, Yellow, Yellow, Yellow, Gold, Gray]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Diamond Prime",
        palette: Palette::Multi([Gray, Aqua, Aqua, Aqua, Aqua, DarkAqua, Gray]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Emerald Prime",
        palette: Palette::Multi([Gray, Green, Green, Green, Green, DarkGreen, Gray]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Sapphire Prime",
        palette: Palette::Multi([Gray, DarkAqua, DarkAqua, DarkAqua, DarkAqua, Blue, Gray]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Ruby Prime",
        palette: Palette::Multi([Gray, Red, Red, Red, Red, DarkRed, Gray]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Crystal Prime",
        palette: Palette::Multi([
            Gray, LightPurple, LightPurple, LightPurple, LightPurple, DarkPurple, Gray,
        ]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Opal Prime",
        palette: Palette::Multi([Gray, Blue, Blue, Blue, Blue, DarkBlue, Gray]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Amethyst Prime",
        palette: Palette::Multi([
            Gray, DarkPurple, DarkPurple, DarkPurple, DarkPurple, DarkGray, Gray,
        ]),
        symbol: STAR_PRIME,
    },
    Tier {
        name: "Mirror",
        palette: Palette::Multi([DarkGray, Gray, White, White, Gray, Gray, DarkGray]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Light",
        palette: Palette::Multi([White, White, Yellow, Yellow, Gold, Gold, Gold]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Dawn",
        palette: Palette::Multi([Gold, Gold, White, White, Aqua, DarkAqua, DarkAqua]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Dusk",
        palette: Palette::Multi([
            DarkPurple, DarkPurple, LightPurple, LightPurple, Gold, Yellow, Yellow,
        ]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Air",
        palette: Palette::Multi([Aqua, Aqua, White, White, Gray, Gray, DarkGray]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Wind",
        palette: Palette::Multi([White, White, Green, Green, DarkGreen, DarkGreen, DarkGreen]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Nebula",
        palette: Palette::Multi([
            DarkRed, DarkRed, Red, Red, LightPurple, LightPurple, DarkPurple,
        ]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Thunder",
        palette: Palette::Multi([Yellow, Yellow, White, White, DarkGray, DarkGray, DarkGray]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Earth",
        palette: Palette::Multi([Green, Green, DarkGreen, DarkGreen, Gold, Gold, Yellow]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Water",
        palette: Palette::Multi([Aqua, Aqua, DarkAqua, DarkAqua, Blue, Blue, DarkBlue]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "Fire",
        palette: Palette::Multi([Yellow, Yellow, Gold, Gold, Red, Red, DarkRed]),
        symbol: STAR_MIRROR,
    },
    Tier {
        name: "3100",
        palette: Palette::Multi([DarkBlue, DarkBlue, DarkAqua, DarkAqua, Gold, Gold, Yellow]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "3200",
        palette: Palette::Multi([Red, DarkRed, Gray, Gray, DarkRed, Red, Red]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "3300",
        palette: Palette::Multi([Blue, Blue, Blue, LightPurple, Red, Red, DarkRed]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "3400",
        palette: Palette::Multi([
            DarkGreen, Green, LightPurple, LightPurple, DarkPurple, DarkPurple, DarkGreen,
        ]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "3500",
        palette: Palette::Multi([Red, Red, DarkRed, DarkRed, DarkGreen, Green, Green]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "3600",
        palette: Palette::Multi([Green, Green, Green, Aqua, Blue, Blue, DarkBlue]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "3700",
        palette: Palette::Multi([DarkRed, DarkRed, Red, Red, Aqua, DarkAqua, DarkAqua]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "3800",
        palette: Palette::Multi([
            DarkBlue, DarkBlue, Blue, DarkPurple, DarkPurple, LightPurple, DarkBlue,
        ]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "3900",
        palette: Palette::Multi([Red, Red, Green, Green, DarkGreen, Blue, Blue]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4000",
        palette: Palette::Multi([DarkPurple, DarkPurple, Red, Red, Gold, Gold, Yellow]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4100",
        palette: Palette::Multi([
            Yellow, Yellow, Gold, Red, LightPurple, LightPurple, DarkPurple,
        ]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4200",
        palette: Palette::Multi([DarkBlue, Blue, DarkAqua, Aqua, White, Gray, Gray]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4300",
        palette: Palette::Multi([
            Black, DarkPurple, DarkGray, DarkGray, DarkPurple, DarkPurple, Black,
        ]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4400",
        palette: Palette::Multi([
            DarkGreen, DarkGreen, Green, Yellow, Gold, DarkPurple, LightPurple,
        ]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4500",
        palette: Palette::Multi([White, White, Aqua, Aqua, DarkAqua, DarkAqua, DarkAqua]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4600",
        palette: Palette::Multi([DarkAqua, Aqua, Yellow, Yellow, Gold, LightPurple, DarkPurple]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4700",
        palette: Palette::Multi([White, DarkRed, Red, Red, Blue, DarkBlue, Blue]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4800",
        palette: Palette::Multi([DarkPurple, DarkPurple, Red, Gold, Yellow, Aqua, DarkAqua]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "4900",
        palette: Palette::Multi([DarkGreen, Green, White, White, Green, Green, DarkGreen]),
        symbol: STAR_FINAL,
    },
    Tier {
        name: "5000",
        palette: Palette::Multi([DarkRed, DarkRed, DarkPurple, Blue, Blue, DarkBlue, Black]),
        symbol: STAR_FINAL,
    },
];

fn tier_for(level: u32) -> &'static Tier {
    let index = ((level / 100) as usize).min(TIERS.len() - 1);
    &TIERS[index]
}

/// Prestige tier name for a level (`"Stone"`, `"Rainbow"`, `"5000"`, ...).
pub fn prestige_name(level: u32) -> &'static str {
    tier_for(level).name
}

/// Formats `[<level><symbol>]` as markup in the prestige palette. Multi-color
/// tiers wrap every character in its own tag pair; the palette index clamps
/// at the last entry for levels wider than the seven palette slots.
pub fn prestige_markup(level: u32) -> String {
    let tier = tier_for(level);
    let formatted = format!("[{level}{}]", tier.symbol);

    match tier.palette {
        Palette::Solid(color) => {
            let name = color.name();
            format!("<{name}>{formatted}</{name}>")
        }
        Palette::Multi(colors) => {
            let mut out = String::new();
            for (i, ch) in formatted.chars().enumerate() {
                let name = colors[i.min(colors.len() - 1)].name();
                let _ = write!(out, "<{name}>{ch}</{name}>");
            }
            out
        }
    }
}

/// Renders the in-level XP progress as a ten-segment bar. The BedWars XP
/// curve grants the first four levels of each prestige at a discount (500,
/// 1000, 2000, 3500 XP) and 5000 XP per level after that.
pub fn level_progress_markup(xp: u64) -> String {
    const EASY_XP: [u64; 4] = [500, 1000, 2000, 3500];
    const NORMAL_XP: u64 = 5000;

    let mut remaining = xp;
    let mut level = 0u64;
    loop {
        let delta = if level % 100 < 4 {
            EASY_XP[(level % 100) as usize]
        } else {
            NORMAL_XP
        };
        if remaining < delta {
            // `remaining` is now the XP earned inside the current level.
            let filled =
                ((remaining as f64 / delta as f64 * 10.0).floor() as usize).clamp(0, 10);
            return format!(
                "<dark_gray>[</dark_gray><aqua>{}</aqua><gray>{}</gray><dark_gray>]</dark_gray>",
                "■".repeat(filled),
                "■".repeat(10 - filled)
            );
        }
        remaining -= delta;
        level += 1;
    }
}

/// XP needed to clear one full prestige (100 levels).
const PRESTIGE_XP: u64 = 487_000;

/// "Progress to [next prestige]" line with a percentage of the prestige XP.
pub fn prestige_progress_markup(level: u32, xp: u64) -> String {
    let next = level.div_ceil(100) * 100;
    let percent = (xp % PRESTIGE_XP) as f64 / PRESTIGE_XP as f64 * 100.0;
    format!(
        "<white>Progress to</white> {}<gray>:</gray> <green>{percent:.1}</green><gray>%</gray>",
        prestige_markup(next)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::strip_markup;

    #[test]
    fn solid_tier_wraps_once() {
        assert_eq!(prestige_markup(120), "<gold>[120✫]</gold>");
        assert_eq!(prestige_markup(0), "<gray>[0✫]</gray>");
        assert_eq!(prestige_name(450), "Emerald");
    }

    #[test]
    fn multi_tier_wraps_every_character() {
        let markup = prestige_markup(1023);
        assert_eq!(strip_markup(&markup), "[1023✫]");
        // Rainbow palette, one tag pair per character.
        assert!(markup.starts_with("<red>[</red><gold>1</gold>"));
        assert_eq!(markup.matches("</").count(), "[1023✫]".chars().count());
    }

    #[test]
    fn level_beyond_table_clamps_to_last_tier() {
        assert_eq!(prestige_name(9_999), "5000");
        let markup = prestige_markup(9_999);
        assert_eq!(strip_markup(&markup), "[9999✥]");
        // Characters past the palette reuse its last color.
        assert!(markup.ends_with("<black>]</black>"));
    }

    #[test]
    fn prime_tiers_use_the_second_symbol() {
        assert!(strip_markup(&prestige_markup(1_100)).contains('✪'));
        assert!(strip_markup(&prestige_markup(2_000)).contains('⚝'));
        assert!(strip_markup(&prestige_markup(3_100)).contains('✥'));
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        // 250 XP into the first (500 XP) level: half the bar.
        let bar = level_progress_markup(250);
        assert_eq!(bar.matches('■').count(), 10);
        let aqua = bar
            .split("<aqua>")
            .nth(1)
            .and_then(|rest| rest.split("</aqua>").next())
            .expect("aqua segment");
        assert_eq!(aqua.chars().count(), 5);
    }

    #[test]
    fn progress_bar_is_bounded() {
        for xp in [0u64, 1, 499, 500, 7_000, 487_000, 10_000_000] {
            let bar = level_progress_markup(xp);
            assert_eq!(bar.matches('■').count(), 10, "xp={xp}");
            assert_eq!(strip_markup(&bar).chars().count(), 12, "xp={xp}");
        }
    }

    #[test]
    fn prestige_progress_line_shape() {
        let line = prestige_progress_markup(150, 48_700);
        let plain = strip_markup(&line);
        assert!(plain.starts_with("Progress to [200✫]"));
        assert!(plain.ends_with("10.0%"));
    }
}
