pub mod carousel;
pub mod files;
pub mod list;
pub mod status;
pub mod surface;

use serde::{Deserialize, Serialize};

pub use surface::{Align, DrawOp, RecordingSurface, Sprite, Surface};

/// Width of one glyph cell at text size 1, in pixels.
pub const GLYPH_WIDTH: i32 = 6;
/// Height of one glyph cell at text size 1, in pixels.
pub const GLYPH_HEIGHT: i32 = 8;

/// RGB565 color, the native format of the device panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Color = Color(0x0000);
    pub const WHITE: Color = Color(0xFFFF);
    pub const RED: Color = Color(0xF800);
    pub const GREEN: Color = Color(0x07E0);
    pub const PURPLE: Color = Color(0x780F);
    pub const ORANGE: Color = Color(0xFDA0);
    pub const DARK_GREY: Color = Color(0x7BEF);

    /// Pack 8-bit channels into RGB565
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }

    /// Expand to 8-bit channels
    pub const fn to_rgb(self) -> (u8, u8, u8) {
        let r = ((self.0 >> 11) & 0x1F) as u8;
        let g = ((self.0 >> 5) & 0x3F) as u8;
        let b = (self.0 & 0x1F) as u8;
        ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
    }

    /// Shift the raw value down, the panel convention for a dimmer shade
    pub const fn dimmed(self, amount: u16) -> Self {
        Color(self.0.wrapping_sub(amount))
    }
}

/// Foreground, background and alert colors shared by every renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub foreground: Color,
    pub background: Color,
    pub alert: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::purple()
    }
}

impl Palette {
    pub const fn purple() -> Self {
        Self {
            foreground: Color(0xA80F),
            background: Color::BLACK,
            alert: Color::RED,
        }
    }

    pub const fn green() -> Self {
        Self {
            foreground: Color::GREEN,
            background: Color::BLACK,
            alert: Color::RED,
        }
    }

    pub const fn amber() -> Self {
        Self {
            foreground: Color::ORANGE,
            background: Color::BLACK,
            alert: Color::RED,
        }
    }

    pub const fn high_contrast() -> Self {
        Self {
            foreground: Color::WHITE,
            background: Color::BLACK,
            alert: Color(0xFFE0),
        }
    }

    /// Get palette by preset name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "default" | "purple" => Some(Self::purple()),
            "green" => Some(Self::green()),
            "amber" => Some(Self::amber()),
            "highcontrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}

/// Font scale factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TextSize {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl TextSize {
    pub const fn scale(self) -> i32 {
        self as i32
    }

    pub const fn glyph_width(self) -> i32 {
        GLYPH_WIDTH * self.scale()
    }

    pub const fn line_height(self) -> i32 {
        GLYPH_HEIGHT * self.scale()
    }

    /// Pixel width of `text` at this size
    pub fn text_width(self, text: &str) -> i32 {
        text.chars().count() as i32 * self.glyph_width()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size: TextSize,
    pub fg: Color,
    /// Transparent when `None`
    pub bg: Option<Color>,
}

impl TextStyle {
    pub const fn new(size: TextSize, fg: Color) -> Self {
        Self { size, fg, bg: None }
    }

    pub const fn on(self, bg: Color) -> Self {
        Self {
            size: self.size,
            fg: self.fg,
            bg: Some(bg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }
}

/// Cut `text` to at most `glyphs` characters
pub fn truncate(text: &str, glyphs: usize) -> &str {
    match text.char_indices().nth(glyphs) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_glyphs_not_bytes() {
        assert_eq!(truncate("Config", 13), "Config");
        assert_eq!(truncate("Deauth Flood Attack", 12), "Deauth Flood");
        assert_eq!(truncate("éèàçù", 3), "éèà");
        assert_eq!(truncate("", 4), "");
    }

    #[test]
    fn rgb565_round_trip_keeps_primaries() {
        assert_eq!(Color::from_rgb(255, 0, 0), Color::RED);
        assert_eq!(Color::RED.to_rgb(), (255, 0, 0));
        assert_eq!(Color::WHITE.to_rgb(), (255, 255, 255));
        assert_eq!(Color::BLACK.to_rgb(), (0, 0, 0));
    }

    #[test]
    fn dimmed_wraps_instead_of_overflowing() {
        assert_eq!(Color(0xA80F).dimmed(0x2000), Color(0x880F));
        assert_eq!(Color(0x1000).dimmed(0x2000), Color(0xF000));
    }

    #[test]
    fn palette_presets_resolve_by_loose_name() {
        assert_eq!(Palette::from_name("High-Contrast"), Some(Palette::high_contrast()));
        assert_eq!(Palette::from_name("default"), Some(Palette::purple()));
        assert_eq!(Palette::from_name("neon"), None);
    }

    #[test]
    fn text_width_scales_with_size() {
        assert_eq!(TextSize::Small.text_width("RF"), 12);
        assert_eq!(TextSize::Large.text_width("WiFi"), 72);
        assert_eq!(TextSize::Medium.line_height(), 16);
    }
}
