use std::num::NonZeroUsize;

use crate::error::{MenuError, Result};
use crate::menu::{NavigationState, View};

use super::{Color, Palette, Point, Rect, Sprite, Surface, TextSize, TextStyle};

/// Draw the battery gauge in the top-right corner of the screen.
///
/// The outline holds a fill proportional to `percent`, cut into three
/// segments, with the numeric reading right-aligned to its left.
pub fn draw_battery_status<S>(surface: &mut S, percent: u8, palette: &Palette)
where
    S: Surface + ?Sized,
{
    let percent = i32::from(percent.min(100));
    let right = surface.width();

    surface.draw_round_rect(Rect::new(right - 42, 7, 34, 14), 2, palette.foreground);
    surface.fill_rect(Rect::new(right - 41, 8, 32, 12), palette.background);
    surface.draw_text_right(
        right - 45,
        10,
        &format!("{percent}%"),
        TextStyle::new(TextSize::Small, palette.foreground).on(palette.background),
    );
    surface.fill_round_rect(
        Rect::new(right - 40, 9, 30 * percent / 100, 10),
        2,
        palette.foreground,
    );
    for x in [right - 30, right - 20] {
        surface.draw_line(Point::new(x, 9), Point::new(x, 19), palette.background);
    }
}

/// Band with centered white text over the alert color.
///
/// Short messages use medium text; longer ones drop to small so they fit.
/// `compact` selects the layout for short panels, pinned to the top.
pub fn display_red_stripe<S>(surface: &mut S, text: &str, palette: &Palette, compact: bool)
where
    S: Surface + ?Sized,
{
    let (band, medium_limit, medium_y, small_y) = if compact {
        (Rect::new(10, 5, surface.width() - 20, 20), 20, 7, 7)
    } else {
        (Rect::new(10, 55, surface.width() - 20, 26), 19, 60, 65)
    };
    surface.fill_rect(band, palette.alert);

    let (size, y) = if text.chars().count() < medium_limit {
        (TextSize::Medium, medium_y)
    } else {
        (TextSize::Small, small_y)
    };
    surface.draw_text_centered(
        surface.width() / 2,
        y,
        text,
        TextStyle::new(size, Color::WHITE).on(palette.alert),
    );
}

/// Long-running job reported through [`draw_progress`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTask {
    Firmware,
    Filesystem,
    Download,
}

impl ProgressTask {
    pub fn caption(self) -> &'static str {
        match self {
            ProgressTask::Firmware => "Installing FW",
            ProgressTask::Filesystem => "Installing SPIFFS",
            ProgressTask::Download => "Downloading",
        }
    }
}

/// Paint one progress update.
///
/// The screen is cleared and the track and caption drawn only while the bar
/// is still short, so the first call of a job sets the scene and later calls
/// just extend the bar.
pub fn draw_progress<S>(
    surface: &mut S,
    progress: usize,
    total: usize,
    task: ProgressTask,
    palette: &Palette,
    compact: bool,
) where
    S: Surface + ?Sized,
{
    let (track_x, track_width, restart_below) = if compact { (28, 104, 5) } else { (18, 204, 7) };
    let span = track_width - 4;
    let bar = if total == 0 {
        0
    } else {
        (progress.min(total) as u64 * span as u64 / total as u64) as i32
    };

    let (track_y, color) = match task {
        ProgressTask::Filesystem => (surface.height() - 28, palette.alert),
        _ => (surface.height() - 47, palette.foreground),
    };

    if bar < restart_below {
        let inner = Rect::new(6, 6, surface.width() - 12, surface.height() - 12);
        surface.fill_rect(inner, palette.background);
        surface.draw_rect(Rect::new(track_x, track_y, track_width, 17), color);
        display_red_stripe(surface, task.caption(), palette, compact);
    }
    surface.fill_rect(Rect::new(track_x + 2, track_y + 2, bar, 13), color);
}

/// Modal banner shown while a scan runs
pub fn display_scanning<S>(surface: &mut S, palette: &Palette)
where
    S: Surface + ?Sized,
{
    let width = surface.width() * 7 / 10;
    let height = TextSize::Medium.line_height() * 2;
    let mut sprite = Sprite::new(width, height);
    sprite.fill_round_rect(Rect::new(0, 0, width, height), 5, palette.foreground);
    sprite.draw_text_centered(
        width / 2,
        5,
        "Scanning..",
        TextStyle::new(TextSize::Medium, Color::WHITE).on(palette.foreground),
    );
    sprite.push_sprite(surface, surface.width() * 15 / 100, surface.height() / 2 - 15);
}

/// Top bar contents of the main screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub clock: String,
    pub wifi_connected: bool,
    pub battery: u8,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            clock: "hh:mm".to_string(),
            wifi_connected: false,
            battery: 0,
        }
    }
}

/// Paint the framed top-level screen for one category
pub fn draw_main_menu<S>(surface: &mut S, label: &str, header: &Header, palette: &Palette)
where
    S: Surface + ?Sized,
{
    let width = surface.width() - 20;
    let height = surface.height() - 20;
    let mut sprite = Sprite::new(width, height);
    sprite.fill_rect(Rect::new(0, 0, width, height), palette.background);

    let small = TextStyle::new(TextSize::Small, palette.foreground).on(palette.background);
    sprite.draw_text(Point::new(2, 2), &header.clock, small);
    if header.wifi_connected {
        sprite.draw_text_centered(width / 2, 2, "(WiFi On)", small);
    }

    sprite.draw_text_centered(
        width / 2,
        height - TextSize::Medium.line_height(),
        label,
        TextStyle::new(TextSize::Medium, palette.foreground),
    );
    let arrows = TextStyle::new(TextSize::Large, palette.foreground);
    sprite.draw_text(Point::new(0, height / 2), "<", arrows);
    sprite.draw_text(
        Point::new(width - TextSize::Large.glyph_width(), height / 2),
        ">",
        arrows,
    );
    sprite.push_sprite(surface, 10, 10);

    let right = surface.width();
    surface.draw_round_rect(
        Rect::new(5, 5, right - 10, surface.height() - 10),
        5,
        palette.foreground,
    );
    surface.draw_line(Point::new(5, 25), Point::new(right - 5, 25), palette.foreground);
    draw_battery_status(surface, header.battery, palette);
}

/// Category picker on the framed main screen
pub struct MainScreenView<'l, L> {
    labels: &'l [L],
    count: NonZeroUsize,
    header: Header,
    palette: Palette,
}

impl<'l, L: AsRef<str>> MainScreenView<'l, L> {
    pub fn new(labels: &'l [L], header: Header, palette: Palette) -> Result<Self> {
        let count = NonZeroUsize::new(labels.len()).ok_or(MenuError::EmptyMenu)?;
        Ok(Self {
            labels,
            count,
            header,
            palette,
        })
    }
}

impl<L: AsRef<str>> View for MainScreenView<'_, L> {
    fn count(&self) -> NonZeroUsize {
        self.count
    }

    fn draw<S: Surface>(&self, surface: &mut S, state: &NavigationState) {
        let label = self
            .labels
            .get(state.selected())
            .map_or("", |label| label.as_ref());
        draw_main_menu(surface, label, &self.header, &self.palette);
    }
}
