use ratatui::style::{Color, Modifier, Style};

use crate::render::{self, TextSize, TextStyle};

/// Terminal color for an RGB565 value seen through a backlight at `level`
pub fn terminal_color(color: render::Color, level: u8) -> Color {
    let (r, g, b) = color.to_rgb();
    dim(Color::Rgb(r, g, b), level)
}

/// Cell style for a text run; large text is bold
pub fn text_style(style: &TextStyle) -> Style {
    let mut cell = Style::default().fg(terminal_color(style.fg, u8::MAX));
    if let Some(bg) = style.bg {
        cell = cell.bg(terminal_color(bg, u8::MAX));
    }
    if style.size == TextSize::Large {
        cell = cell.add_modifier(Modifier::BOLD);
    }
    cell
}

/// Apply the backlight to an already converted color
pub fn dim(color: Color, level: u8) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let scale = |channel: u8| (u16::from(channel) * u16::from(level) / 255) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}
