use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect as Area;
use ratatui::style::Style;
use ratatui::widgets::Widget;
use ratatui::Terminal;

use crate::battery::SharedBacklight;
use crate::error::MenuError;
use crate::render::{Align, Color, Point, Rect, Surface, TextStyle, GLYPH_HEIGHT, GLYPH_WIDTH};

use super::theme::{dim, terminal_color, text_style};

const SQUARE: [&str; 4] = ["┌", "┐", "└", "┘"];
const ROUND: [&str; 4] = ["╭", "╮", "╰", "╯"];

/// Device display emulated on a terminal, one cell per 6x8 pixel block.
///
/// Drawing goes to an off-screen buffer; `present` copies it to the
/// terminal through the simulated backlight. Terminal failures cannot be
/// reported through `Surface`, so the first one is kept for `take_error`.
pub struct TerminalSurface<B: Backend> {
    terminal: Terminal<B>,
    screen: Buffer,
    width: i32,
    height: i32,
    backlight: SharedBacklight,
    error: Option<MenuError>,
}

impl<B: Backend> TerminalSurface<B> {
    pub fn new(terminal: Terminal<B>, width: i32, height: i32, backlight: SharedBacklight) -> Self {
        let columns = (width + GLYPH_WIDTH - 1) / GLYPH_WIDTH;
        let rows = (height + GLYPH_HEIGHT - 1) / GLYPH_HEIGHT;
        Self {
            terminal,
            screen: Buffer::empty(Area::new(0, 0, columns.max(1) as u16, rows.max(1) as u16)),
            width,
            height,
            backlight,
            error: None,
        }
    }

    pub fn screen(&self) -> &Buffer {
        &self.screen
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// First terminal error since the last call
    pub fn take_error(&mut self) -> Option<MenuError> {
        self.error.take()
    }

    fn cell_span(rect: Rect) -> Option<(i32, i32, i32, i32)> {
        if rect.width <= 0 || rect.height <= 0 {
            return None;
        }
        Some((
            rect.x.div_euclid(GLYPH_WIDTH),
            rect.y.div_euclid(GLYPH_HEIGHT),
            (rect.x + rect.width - 1).div_euclid(GLYPH_WIDTH),
            (rect.y + rect.height - 1).div_euclid(GLYPH_HEIGHT),
        ))
    }

    fn put(&mut self, column: i32, row: i32, symbol: Option<&str>, style: Style) {
        if column < 0 || row < 0 {
            return;
        }
        if let Some(cell) = self.screen.cell_mut((column as u16, row as u16)) {
            if let Some(symbol) = symbol {
                cell.set_symbol(symbol);
            }
            cell.set_style(style);
        }
    }

    fn outline(&mut self, rect: Rect, color: Color, corners: [&str; 4]) {
        let Some((left, top, right, bottom)) = Self::cell_span(rect) else {
            return;
        };
        let style = Style::default().fg(terminal_color(color, u8::MAX));
        for column in left..=right {
            self.put(column, top, Some("─"), style);
            self.put(column, bottom, Some("─"), style);
        }
        for row in top..=bottom {
            self.put(left, row, Some("│"), style);
            self.put(right, row, Some("│"), style);
        }
        if left != right && top != bottom {
            self.put(left, top, Some(corners[0]), style);
            self.put(right, top, Some(corners[1]), style);
            self.put(left, bottom, Some(corners[2]), style);
            self.put(right, bottom, Some(corners[3]), style);
        }
    }
}

impl<B: Backend> Surface for TerminalSurface<B> {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((left, top, right, bottom)) = Self::cell_span(rect) else {
            return;
        };
        let style = Style::default().bg(terminal_color(color, u8::MAX));
        for row in top..=bottom {
            for column in left..=right {
                self.put(column, row, Some(" "), style);
            }
        }
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.outline(rect, color, SQUARE);
    }

    fn fill_round_rect(&mut self, rect: Rect, _radius: i32, color: Color) {
        self.fill_rect(rect, color);
    }

    fn draw_round_rect(&mut self, rect: Rect, _radius: i32, color: Color) {
        self.outline(rect, color, ROUND);
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        let style = Style::default().fg(terminal_color(color, u8::MAX));
        let (x0, y0) = (from.x.div_euclid(GLYPH_WIDTH), from.y.div_euclid(GLYPH_HEIGHT));
        let (x1, y1) = (to.x.div_euclid(GLYPH_WIDTH), to.y.div_euclid(GLYPH_HEIGHT));
        let symbol = if y0 == y1 {
            "─"
        } else if x0 == x1 {
            "│"
        } else {
            "·"
        };

        // Bresenham over cells
        let (dx, dy) = ((x1 - x0).abs(), -(y1 - y0).abs());
        let (sx, sy) = ((x1 - x0).signum(), (y1 - y0).signum());
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.put(x, y, Some(symbol), style);
            if x == x1 && y == y1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_text_aligned(&mut self, at: Point, text: &str, style: TextStyle, align: Align) {
        let width = style.size.text_width(text);
        let left = match align {
            Align::Left => at.x,
            Align::Center => at.x - width / 2,
            Align::Right => at.x - width,
        };
        let scale = style.size.scale();
        let column = left.div_euclid(GLYPH_WIDTH);
        let row = at.y.div_euclid(GLYPH_HEIGHT) + (scale - 1) / 2;
        let cell_style = text_style(&style);

        let mut symbol = [0u8; 4];
        for (i, glyph) in text.chars().enumerate() {
            let glyph_column = column + i as i32 * scale;
            let encoded: &str = glyph.encode_utf8(&mut symbol);
            self.put(glyph_column, row, Some(encoded), cell_style);
            // wide glyphs leave their padding cells in the text background
            for pad in 1..scale {
                let padding = if style.bg.is_some() { Some(" ") } else { None };
                self.put(glyph_column + pad, row, padding, cell_style);
            }
        }
    }

    fn present(&mut self) {
        let screen = Screen {
            buffer: &self.screen,
            level: self.backlight.level(),
        };
        if let Err(err) = self.terminal.draw(|frame| frame.render_widget(screen, frame.area())) {
            self.error.get_or_insert(MenuError::Tui(err.to_string()));
        }
    }
}

/// Off-screen buffer copied into the frame, centered
struct Screen<'a> {
    buffer: &'a Buffer,
    level: u8,
}

impl Widget for Screen<'_> {
    fn render(self, area: Area, buf: &mut Buffer) {
        let source = self.buffer.area;
        let x_offset = area.x + area.width.saturating_sub(source.width) / 2;
        let y_offset = area.y + area.height.saturating_sub(source.height) / 2;
        for row in 0..source.height.min(area.height) {
            for column in 0..source.width.min(area.width) {
                let (Some(from), Some(to)) = (
                    self.buffer.cell((column, row)),
                    buf.cell_mut((x_offset + column, y_offset + row)),
                ) else {
                    continue;
                };
                to.set_symbol(from.symbol());
                to.set_fg(dim(from.fg, self.level));
                to.set_bg(dim(from.bg, self.level));
                to.modifier = from.modifier;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Sprite, TextSize};
    use ratatui::backend::TestBackend;
    use ratatui::style::Color as TermColor;

    fn surface(width: i32, height: i32) -> TerminalSurface<TestBackend> {
        let backend = TestBackend::new(40, 17);
        let terminal = Terminal::new(backend).unwrap();
        TerminalSurface::new(terminal, width, height, SharedBacklight::default())
    }

    fn symbol(surface: &TerminalSurface<TestBackend>, column: u16, row: u16) -> String {
        surface.screen().cell((column, row)).unwrap().symbol().to_string()
    }

    #[test]
    fn screen_is_sized_in_cells() {
        let surface = surface(240, 135);
        assert_eq!(surface.screen().area, Area::new(0, 0, 40, 17));
    }

    #[test]
    fn fill_covers_touched_cells() {
        let mut surface = surface(240, 135);
        surface.fill_rect(Rect::new(6, 8, 12, 16), Color::RED);

        let cell = surface.screen().cell((1, 1)).unwrap();
        assert_eq!(cell.bg, TermColor::Rgb(255, 0, 0));
        assert_eq!(surface.screen().cell((3, 1)).unwrap().bg, TermColor::Reset);
    }

    #[test]
    fn rounded_outline_uses_arc_corners() {
        let mut surface = surface(240, 135);
        surface.draw_round_rect(Rect::new(0, 0, 24, 24), 5, Color::WHITE);

        assert_eq!(symbol(&surface, 0, 0), "╭");
        assert_eq!(symbol(&surface, 3, 2), "╯");
        assert_eq!(symbol(&surface, 1, 0), "─");
        assert_eq!(symbol(&surface, 0, 1), "│");
    }

    #[test]
    fn centered_text_is_spread_by_scale() {
        let mut surface = surface(240, 135);
        let style = TextStyle::new(TextSize::Medium, Color::WHITE).on(Color::BLACK);
        surface.draw_text_centered(120, 16, "Hi", style);

        // 24px wide, starts at x = 108 -> column 18, row 2
        assert_eq!(symbol(&surface, 18, 2), "H");
        assert_eq!(symbol(&surface, 19, 2), " ");
        assert_eq!(symbol(&surface, 20, 2), "i");
    }

    #[test]
    fn sprites_land_on_the_terminal_after_present() {
        let mut surface = surface(240, 135);
        let mut sprite = Sprite::new(60, 16);
        sprite.draw_text(
            Point::new(0, 0),
            ">WiFi",
            TextStyle::new(TextSize::Small, Color::WHITE),
        );
        sprite.push_sprite(&mut surface, 12, 8);
        surface.present();

        let frame = surface.terminal().backend().buffer();
        assert_eq!(frame.cell((2, 1)).unwrap().symbol(), ">");
        assert_eq!(frame.cell((3, 1)).unwrap().symbol(), "W");
        assert!(surface.take_error().is_none());
    }

    #[test]
    fn present_applies_backlight() {
        let backend = TestBackend::new(40, 17);
        let terminal = Terminal::new(backend).unwrap();
        let mut backlight = SharedBacklight::default();
        let mut surface = TerminalSurface::new(terminal, 240, 135, backlight.clone());
        surface.fill_rect(Rect::new(0, 0, 6, 8), Color::WHITE);

        crate::battery::Backlight::set_brightness(&mut backlight, 0);
        surface.present();

        let frame = surface.terminal().backend().buffer();
        assert_eq!(frame.cell((0, 0)).unwrap().bg, TermColor::Rgb(0, 0, 0));
    }

    #[test]
    fn drawing_off_screen_is_ignored() {
        let mut surface = surface(240, 135);
        surface.fill_rect(Rect::new(-30, -30, 12, 12), Color::RED);
        surface.draw_line(Point::new(500, 0), Point::new(600, 0), Color::RED);
        surface.present();
        assert!(surface.take_error().is_none());
    }
}
