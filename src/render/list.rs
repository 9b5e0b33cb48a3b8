use std::num::NonZeroUsize;

use crate::menu::{compute_window, Menu, NavigationState, View, VisibleWindow};

use super::{truncate, Palette, Point, Rect, Sprite, Surface, TextSize, TextStyle};

/// Glyphs per row, selection marker included
pub const ROW_GLYPHS: usize = 13;

const ROW_HEIGHT: i32 = TextSize::Medium.line_height() + 4;
const PADDING: i32 = 5;
const RADIUS: i32 = 5;

/// Paint the compact list panel centered on screen.
///
/// The panel holds exactly `window.count` rows; the selected row carries a
/// `>` marker, the others a blank so labels stay aligned.
pub fn draw_list<S, L>(
    surface: &mut S,
    labels: &[L],
    state: &NavigationState,
    window: VisibleWindow,
    palette: &Palette,
) where
    S: Surface + ?Sized,
    L: AsRef<str>,
{
    let rows = window.count as i32;
    let width = surface.width() * 7 / 10;
    let height = ROW_HEIGHT * rows + PADDING * 2;
    let panel = Rect::new(0, 0, width, height);

    let mut sprite = Sprite::new(width, height);
    sprite.fill_round_rect(panel, RADIUS, palette.background);

    let style = TextStyle::new(TextSize::Medium, palette.foreground).on(palette.background);
    for (row, index) in window.range().enumerate() {
        let label = labels.get(index).map_or("", |label| label.as_ref());
        let marker = if index == state.selected() { '>' } else { ' ' };
        let text = format!("{marker}{}", truncate(label, ROW_GLYPHS - 1));
        let y = PADDING + 4 + row as i32 * ROW_HEIGHT;
        sprite.draw_text(Point::new(PADDING, y), &text, style);
    }
    sprite.draw_round_rect(panel, RADIUS, palette.foreground);

    let x = surface.width() * 15 / 100;
    let y = surface.height() / 2 - rows * ROW_HEIGHT / 2 - PADDING;
    sprite.push_sprite(surface, x, y);
}

/// Menu shown as a scroll-windowed list
pub struct ListView<'m, 'a> {
    menu: &'m Menu<'a>,
    capacity: usize,
    palette: Palette,
}

impl<'m, 'a> ListView<'m, 'a> {
    pub fn new(menu: &'m Menu<'a>, capacity: usize, palette: Palette) -> Self {
        Self {
            menu,
            capacity,
            palette,
        }
    }
}

impl View for ListView<'_, '_> {
    fn count(&self) -> NonZeroUsize {
        self.menu.count()
    }

    fn draw<S: Surface>(&self, surface: &mut S, state: &NavigationState) {
        let window = compute_window(state.selected(), state.count(), self.capacity);
        draw_list(surface, self.menu.items(), state, window, &self.palette);
    }

    fn dispatch(&self, index: usize) {
        if let Some(item) = self.menu.get(index) {
            item.invoke();
        }
    }
}
