//! Named color themes.
//!
//! Every theme is four tokens: primary, secondary, accent and background. The
//! view derives everything else (text, grid, HUD) from those.

use crate::fb::{CellStyle, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeId {
    Crimson,
    #[default]
    Obsidian,
    Ocean,
    Gold,
    Cyber,
    Emerald,
}

impl ThemeId {
    pub const ALL: [ThemeId; 6] = [
        ThemeId::Crimson,
        ThemeId::Obsidian,
        ThemeId::Ocean,
        ThemeId::Gold,
        ThemeId::Cyber,
        ThemeId::Emerald,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemeId::Crimson => "crimson",
            ThemeId::Obsidian => "obsidian",
            ThemeId::Ocean => "ocean",
            ThemeId::Gold => "gold",
            ThemeId::Cyber => "cyber",
            ThemeId::Emerald => "emerald",
        }
    }

    pub fn parse(name: &str) -> Option<ThemeId> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Unknown or missing names fall back to the default theme.
    pub fn from_name_or_default(name: Option<&str>) -> ThemeId {
        name.and_then(ThemeId::parse).unwrap_or_default()
    }

    /// The next theme in display order, wrapping around.
    pub fn next(self) -> ThemeId {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeId::Crimson => Palette::new(
                Rgb::new(0xcc, 0x00, 0x00),
                Rgb::new(0x8b, 0x00, 0x00),
                Rgb::new(0xff, 0x44, 0x44),
                Rgb::new(0x08, 0x08, 0x08),
            ),
            ThemeId::Obsidian => Palette::new(
                Rgb::new(0x4a, 0x4a, 0x4a),
                Rgb::new(0x2a, 0x2a, 0x2a),
                Rgb::new(0x8a, 0x8a, 0x8a),
                Rgb::new(0x0a, 0x0a, 0x0a),
            ),
            ThemeId::Ocean => Palette::new(
                Rgb::new(0x00, 0x66, 0xcc),
                Rgb::new(0x00, 0x44, 0x88),
                Rgb::new(0x33, 0x99, 0xff),
                Rgb::new(0x05, 0x05, 0x10),
            ),
            ThemeId::Gold => Palette::new(
                Rgb::new(0xd4, 0xaf, 0x37),
                Rgb::new(0x8b, 0x75, 0x00),
                Rgb::new(0xff, 0xd7, 0x00),
                Rgb::new(0x0a, 0x08, 0x05),
            ),
            ThemeId::Cyber => Palette::new(
                Rgb::new(0x99, 0x33, 0xff),
                Rgb::new(0x66, 0x00, 0xcc),
                Rgb::new(0xcc, 0x66, 0xff),
                Rgb::new(0x0a, 0x05, 0x10),
            ),
            ThemeId::Emerald => Palette::new(
                Rgb::new(0x00, 0xcc, 0x66),
                Rgb::new(0x00, 0x88, 0x44),
                Rgb::new(0x33, 0xff, 0x99),
                Rgb::new(0x05, 0x0a, 0x08),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
}

const WHITE: Rgb = Rgb::new(255, 255, 255);

impl Palette {
    pub const fn new(primary: Rgb, secondary: Rgb, accent: Rgb, background: Rgb) -> Self {
        Self {
            primary,
            secondary,
            accent,
            background,
        }
    }

    pub fn base(&self) -> CellStyle {
        CellStyle::new(self.text(), self.background)
    }

    pub fn text(&self) -> Rgb {
        Rgb::new(230, 230, 230)
    }

    /// Lane markings and other low-contrast chrome.
    pub fn muted(&self) -> Rgb {
        self.secondary.mix(WHITE, 40)
    }

    /// Track surface, slightly lifted from the background.
    pub fn road(&self) -> Rgb {
        self.background.mix(self.secondary, 40)
    }

    pub fn highlight(&self) -> Rgb {
        self.accent.mix(WHITE, 90)
    }
}

impl Default for Palette {
    fn default() -> Self {
        ThemeId::default().palette()
    }
}
