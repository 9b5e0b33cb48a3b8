use std::num::NonZeroUsize;

use crate::menu::{Menu, NavigationState, View};

use super::{truncate, Palette, Point, Rect, Sprite, Surface, TextSize, TextStyle};

/// Amount subtracted from the foreground for the neighbor slots
pub const NEIGHBOR_DIM: u16 = 0x2000;

const INDICATOR_WIDTH: i32 = 5;

/// Paint the three-slot wheel: previous and next items small and dim,
/// the selection large and underlined in the middle.
///
/// Neighbors always wrap, so the first item shows the last one above it.
/// A bar on the right edge marks the selection's position in the list.
pub fn draw_carousel<S, L>(
    surface: &mut S,
    labels: &[L],
    state: &NavigationState,
    caption: &str,
    palette: &Palette,
) where
    S: Surface + ?Sized,
    L: AsRef<str>,
{
    let width = surface.width() - 20;
    let height = surface.height() - 35;
    let center = width / 2;
    let label = |index: usize| labels.get(index).map_or("", |label| label.as_ref());

    let mut sprite = Sprite::new(width, height);
    sprite.fill_rect(Rect::new(0, 0, width, height), palette.background);
    sprite.draw_text(
        Point::new(2, 3),
        caption,
        TextStyle::new(TextSize::Small, palette.foreground),
    );

    let neighbor = TextStyle::new(TextSize::Medium, palette.foreground.dimmed(NEIGHBOR_DIM));
    let neighbor_glyphs = (width / TextSize::Medium.glyph_width()) as usize;
    sprite.draw_text_centered(
        center,
        height * 15 / 100,
        truncate(label(state.previous_index()), neighbor_glyphs),
        neighbor,
    );

    let current = truncate(
        label(state.selected()),
        ((width - INDICATOR_WIDTH) / TextSize::Large.glyph_width()) as usize,
    );
    let current_y = height * 40 / 100;
    sprite.draw_text_centered(
        center,
        current_y,
        current,
        TextStyle::new(TextSize::Large, palette.foreground),
    );

    sprite.draw_text_centered(
        center,
        height * 75 / 100,
        truncate(label(state.next_index()), neighbor_glyphs),
        neighbor,
    );

    let underline = TextSize::Large.text_width(current);
    let underline_y = current_y + TextSize::Large.line_height();
    let start = center - underline / 2;
    sprite.draw_line(
        Point::new(start, underline_y),
        Point::new(start + underline - 1, underline_y),
        palette.foreground,
    );

    let count = state.count() as i32;
    sprite.fill_rect(
        Rect::new(
            width - INDICATOR_WIDTH,
            state.selected() as i32 * height / count,
            INDICATOR_WIDTH,
            (height / count).max(1),
        ),
        palette.foreground,
    );

    sprite.push_sprite(surface, 10, 27);
}

/// Menu shown as a wheel with a caption
pub struct CarouselView<'m, 'a> {
    menu: &'m Menu<'a>,
    caption: &'m str,
    palette: Palette,
}

impl<'m, 'a> CarouselView<'m, 'a> {
    pub fn new(menu: &'m Menu<'a>, caption: &'m str, palette: Palette) -> Self {
        Self {
            menu,
            caption,
            palette,
        }
    }
}

impl View for CarouselView<'_, '_> {
    fn count(&self) -> NonZeroUsize {
        self.menu.count()
    }

    fn draw<S: Surface>(&self, surface: &mut S, state: &NavigationState) {
        draw_carousel(surface, self.menu.items(), state, self.caption, &self.palette);
    }

    fn dispatch(&self, index: usize) {
        if let Some(item) = self.menu.get(index) {
            item.invoke();
        }
    }
}
