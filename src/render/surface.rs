use super::{Color, Point, Rect, TextStyle};

/// Horizontal anchoring of a text run relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Drawing primitives exposed by a display (or anything pretending to be one)
pub trait Surface {
    fn width(&self) -> i32;
    fn height(&self) -> i32;

    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn fill_round_rect(&mut self, rect: Rect, radius: i32, color: Color);
    fn draw_round_rect(&mut self, rect: Rect, radius: i32, color: Color);
    fn draw_line(&mut self, from: Point, to: Point, color: Color);
    fn draw_text_aligned(&mut self, at: Point, text: &str, style: TextStyle, align: Align);

    /// Make everything painted so far visible
    fn present(&mut self) {}

    fn fill_screen(&mut self, color: Color) {
        let area = Rect::new(0, 0, self.width(), self.height());
        self.fill_rect(area, color);
    }

    fn draw_text(&mut self, at: Point, text: &str, style: TextStyle) {
        self.draw_text_aligned(at, text, style, Align::Left);
    }

    fn draw_text_centered(&mut self, center_x: i32, y: i32, text: &str, style: TextStyle) {
        self.draw_text_aligned(Point::new(center_x, y), text, style, Align::Center);
    }

    fn draw_text_right(&mut self, right_x: i32, y: i32, text: &str, style: TextStyle) {
        self.draw_text_aligned(Point::new(right_x, y), text, style, Align::Right);
    }
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    FillRect(Rect, Color),
    DrawRect(Rect, Color),
    FillRoundRect(Rect, i32, Color),
    DrawRoundRect(Rect, i32, Color),
    Line(Point, Point, Color),
    Text {
        at: Point,
        text: String,
        style: TextStyle,
        align: Align,
    },
}

impl DrawOp {
    pub fn offset(&self, dx: i32, dy: i32) -> DrawOp {
        match self {
            DrawOp::FillRect(rect, color) => DrawOp::FillRect(rect.offset(dx, dy), *color),
            DrawOp::DrawRect(rect, color) => DrawOp::DrawRect(rect.offset(dx, dy), *color),
            DrawOp::FillRoundRect(rect, radius, color) => {
                DrawOp::FillRoundRect(rect.offset(dx, dy), *radius, *color)
            }
            DrawOp::DrawRoundRect(rect, radius, color) => {
                DrawOp::DrawRoundRect(rect.offset(dx, dy), *radius, *color)
            }
            DrawOp::Line(from, to, color) => {
                DrawOp::Line(from.offset(dx, dy), to.offset(dx, dy), *color)
            }
            DrawOp::Text {
                at,
                text,
                style,
                align,
            } => DrawOp::Text {
                at: at.offset(dx, dy),
                text: text.clone(),
                style: *style,
                align: *align,
            },
        }
    }

    /// Issue this call against a real surface
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        match self {
            DrawOp::FillRect(rect, color) => target.fill_rect(*rect, *color),
            DrawOp::DrawRect(rect, color) => target.draw_rect(*rect, *color),
            DrawOp::FillRoundRect(rect, radius, color) => {
                target.fill_round_rect(*rect, *radius, *color)
            }
            DrawOp::DrawRoundRect(rect, radius, color) => {
                target.draw_round_rect(*rect, *radius, *color)
            }
            DrawOp::Line(from, to, color) => target.draw_line(*from, *to, *color),
            DrawOp::Text {
                at,
                text,
                style,
                align,
            } => target.draw_text_aligned(*at, text, *style, *align),
        }
    }
}

/// Surface that keeps every call instead of painting pixels.
///
/// Serves as the off-screen half of sprite compositing and as the
/// inspection surface in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingSurface {
    width: i32,
    height: i32,
    ops: Vec<DrawOp>,
    presents: usize,
}

/// Off-screen buffer painted first, then pushed onto the display in one go
pub type Sprite = RecordingSurface;

impl RecordingSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            presents: 0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn presents(&self) -> usize {
        self.presents
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.presents = 0;
    }

    /// Text runs in drawing order
    pub fn texts(&self) -> impl Iterator<Item = (Point, &str, TextStyle)> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text {
                at, text, style, ..
            } => Some((*at, text.as_str(), *style)),
            _ => None,
        })
    }

    /// Blit the recorded calls onto `target` with their origin at (x, y)
    pub fn push_sprite<S: Surface + ?Sized>(&self, target: &mut S, x: i32, y: i32) {
        for op in &self.ops {
            op.offset(x, y).replay(target);
        }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect(rect, color));
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::DrawRect(rect, color));
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: i32, color: Color) {
        self.ops.push(DrawOp::FillRoundRect(rect, radius, color));
    }

    fn draw_round_rect(&mut self, rect: Rect, radius: i32, color: Color) {
        self.ops.push(DrawOp::DrawRoundRect(rect, radius, color));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color) {
        self.ops.push(DrawOp::Line(from, to, color));
    }

    fn draw_text_aligned(&mut self, at: Point, text: &str, style: TextStyle, align: Align) {
        self.ops.push(DrawOp::Text {
            at,
            text: text.to_string(),
            style,
            align,
        });
    }

    fn present(&mut self) {
        self.presents += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextSize;

    #[test]
    fn push_sprite_offsets_every_call() {
        let mut sprite = Sprite::new(50, 20);
        sprite.fill_round_rect(Rect::new(0, 0, 50, 20), 5, Color::BLACK);
        sprite.draw_text(Point::new(5, 9), ">WiFi", TextStyle::new(TextSize::Medium, Color::WHITE));
        sprite.draw_line(Point::new(0, 0), Point::new(10, 0), Color::RED);

        let mut screen = RecordingSurface::new(240, 135);
        sprite.push_sprite(&mut screen, 36, 40);

        assert_eq!(
            screen.ops()[0],
            DrawOp::FillRoundRect(Rect::new(36, 40, 50, 20), 5, Color::BLACK)
        );
        let (at, text, _) = screen.texts().next().unwrap();
        assert_eq!(at, Point::new(41, 49));
        assert_eq!(text, ">WiFi");
        assert_eq!(
            screen.ops()[2],
            DrawOp::Line(Point::new(36, 40), Point::new(46, 40), Color::RED)
        );
    }

    #[test]
    fn pushing_a_sprite_does_not_present() {
        let sprite = Sprite::new(10, 10);
        let mut screen = RecordingSurface::new(240, 135);
        sprite.push_sprite(&mut screen, 0, 0);
        assert_eq!(screen.presents(), 0);
        screen.present();
        assert_eq!(screen.presents(), 1);
    }

    #[test]
    fn fill_screen_covers_whole_surface() {
        let mut screen = RecordingSurface::new(160, 80);
        screen.fill_screen(Color::BLACK);
        assert_eq!(
            screen.ops(),
            &[DrawOp::FillRect(Rect::new(0, 0, 160, 80), Color::BLACK)]
        );
    }
}
