use std::time::Duration;

use tracing::debug;

use crate::battery::{brightness_for, Backlight, BatteryReader, BrightnessCurve, FixedBattery};
use crate::device::DeviceProfile;
use crate::error::Result;
use crate::input::{Clock, InputSource};
use crate::menu::{Layout, LoopOptions, Menu, Outcome, PreviousMode, SelectionLoop, Timing, View};
use crate::render::carousel::CarouselView;
use crate::render::files::{FileList, FileView};
use crate::render::list::ListView;
use crate::render::status::{self, Header, MainScreenView, ProgressTask};
use crate::render::{Palette, Surface};

/// Default floor of the brightness curve
pub const MIN_BRIGHTNESS: u8 = 160;

/// The device as the menu code sees it: one display, one input source,
/// one clock, plus the optional backlight and battery collaborators.
pub struct Engine<S, I, C> {
    surface: S,
    input: I,
    clock: C,
    profile: DeviceProfile,
    palette: Palette,
    timing: Timing,
    backlight: Option<Box<dyn Backlight>>,
    curve: BrightnessCurve,
    min_brightness: u8,
    battery: Box<dyn BatteryReader>,
}

impl<S: Surface, I: InputSource, C: Clock> Engine<S, I, C> {
    pub fn new(surface: S, input: I, clock: C, profile: DeviceProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self {
            surface,
            input,
            clock,
            profile,
            palette: Palette::default(),
            timing: Timing::default(),
            backlight: None,
            curve: brightness_for,
            min_brightness: MIN_BRIGHTNESS,
            battery: Box::new(FixedBattery(100)),
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_backlight(mut self, backlight: impl Backlight + 'static) -> Self {
        self.backlight = Some(Box::new(backlight));
        self
    }

    pub fn with_brightness_curve(mut self, curve: BrightnessCurve, min: u8) -> Self {
        self.curve = curve;
        self.min_brightness = min;
        self
    }

    pub fn with_battery(mut self, battery: impl BatteryReader + 'static) -> Self {
        self.battery = Box::new(battery);
        self
    }

    pub fn profile(&self) -> &DeviceProfile {
        &self.profile
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Run a menu until an item is chosen or the user backs out.
    ///
    /// A chosen item's action has already run when this returns.
    pub fn loop_options(&mut self, menu: &Menu<'_>, options: &LoopOptions) -> Outcome {
        let previous = options
            .previous
            .unwrap_or_else(|| self.profile.previous_mode());
        let cancel = self.profile.has_keyboard;
        debug!(layout = %options.layout, items = menu.count().get(), "running menu");
        match options.layout {
            Layout::List => {
                let view = ListView::new(menu, self.profile.max_menu_rows, self.palette);
                self.run_view(&view, 0, options.wrap, previous, options.brightness_linked, cancel)
            }
            Layout::Carousel => {
                let view = CarouselView::new(menu, &options.caption, self.palette);
                self.run_view(&view, 0, true, previous, options.brightness_linked, cancel)
            }
        }
    }

    /// Let the user pick an entry of a directory listing.
    ///
    /// Returns the chosen index; nothing is invoked.
    pub fn browse_files(&mut self, files: &FileList) -> Option<usize> {
        let view = FileView::new(files, self.palette);
        let previous = self.profile.previous_mode();
        let cancel = self.profile.has_keyboard;
        self.run_view(&view, 0, true, previous, false, cancel).selected()
    }

    /// Top-level category picker, resuming at `start`.
    ///
    /// Previous always navigates here; a cancel press leaves the screen.
    pub fn main_screen<L: AsRef<str>>(
        &mut self,
        labels: &[L],
        start: usize,
        mut header: Header,
    ) -> Result<Outcome> {
        header.battery = self.battery.percent();
        let view = MainScreenView::new(labels, header, self.palette)?;
        Ok(self.run_view(&view, start, true, PreviousMode::Navigate, false, true))
    }

    /// Paint the background over the whole screen without presenting
    pub fn clear_screen(&mut self) {
        self.surface.fill_screen(self.palette.background);
    }

    /// Hold the current frame on screen
    pub fn wait(&mut self, duration: Duration) {
        self.clock.delay(duration);
    }

    pub fn battery_percent(&mut self) -> u8 {
        self.battery.percent()
    }

    pub fn draw_battery_status(&mut self) {
        let percent = self.battery.percent();
        status::draw_battery_status(&mut self.surface, percent, &self.palette);
        self.surface.present();
    }

    pub fn red_stripe(&mut self, text: &str) {
        let compact = self.profile.is_compact();
        status::display_red_stripe(&mut self.surface, text, &self.palette, compact);
        self.surface.present();
    }

    pub fn progress(&mut self, progress: usize, total: usize, task: ProgressTask) {
        let compact = self.profile.is_compact();
        status::draw_progress(&mut self.surface, progress, total, task, &self.palette, compact);
        self.surface.present();
    }

    pub fn scanning(&mut self) {
        status::display_scanning(&mut self.surface, &self.palette);
        self.surface.present();
    }

    fn run_view<V: View>(
        &mut self,
        view: &V,
        start: usize,
        wrap: bool,
        previous: PreviousMode,
        bright: bool,
        cancel: bool,
    ) -> Outcome {
        let Self {
            surface,
            input,
            clock,
            timing,
            backlight,
            curve,
            min_brightness,
            ..
        } = self;

        let mut selection = SelectionLoop::new(view, wrap)
            .starting_at(start)
            .with_previous(previous)
            .with_cancel(cancel)
            .with_timing(*timing);
        if let (true, Some(backlight)) = (bright, backlight.as_mut()) {
            let curve = *curve;
            let min = *min_brightness;
            selection = selection.on_redraw(move |state| {
                backlight.set_brightness(curve(state.selected(), state.count(), min));
            });
        }
        selection.run(surface, input, clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::SharedBacklight;
    use crate::device::{CARDPUTER, STICK_C, STICK_C_PLUS};
    use crate::input::ManualClock;
    use crate::menu::selection::tests::{Press::*, ScriptedInput};
    use crate::menu::MenuItem;
    use crate::render::files::{FileEntry, FileKind};
    use crate::render::{RecordingSurface, TextSize};
    use std::cell::Cell;

    fn engine(
        profile: DeviceProfile,
        script: &[Option<crate::menu::selection::tests::Press>],
    ) -> Engine<RecordingSurface, ScriptedInput, ManualClock> {
        let surface = RecordingSurface::new(profile.width, profile.height);
        Engine::new(surface, ScriptedInput::new(script), ManualClock::new(), profile).unwrap()
    }

    #[test]
    fn list_loop_runs_chosen_action() {
        let chosen = Cell::new(None);
        let menu = Menu::new(vec![
            MenuItem::new("Scan", || chosen.set(Some("Scan"))),
            MenuItem::new("Deauth", || chosen.set(Some("Deauth"))),
        ])
        .unwrap();
        let mut engine = engine(CARDPUTER, &[Some(Next), Some(Select)]);

        let outcome = engine.loop_options(&menu, &LoopOptions::list());

        assert_eq!(outcome, Outcome::Selected(1));
        assert_eq!(chosen.get(), Some("Deauth"));
        assert_eq!(engine.surface().presents(), 2);
    }

    #[test]
    fn two_button_device_backs_out_on_previous() {
        let ran = Cell::new(false);
        let menu = Menu::new(vec![MenuItem::new("Scan", || ran.set(true))]).unwrap();
        let mut engine = engine(STICK_C_PLUS, &[Some(Previous)]);

        let outcome = engine.loop_options(&menu, &LoopOptions::carousel("WiFi"));

        assert_eq!(outcome, Outcome::Cancelled);
        assert!(!ran.get());
    }

    #[test]
    fn explicit_previous_mode_overrides_device() {
        let menu = Menu::new(vec![
            MenuItem::new("A", || {}),
            MenuItem::new("B", || {}),
            MenuItem::new("C", || {}),
        ])
        .unwrap();
        let mut engine = engine(STICK_C_PLUS, &[Some(Previous), Some(Select)]);
        let options = LoopOptions::list().with_previous(PreviousMode::Navigate);

        assert_eq!(engine.loop_options(&menu, &options), Outcome::Selected(2));
    }

    #[test]
    fn list_without_wrap_stops_at_first_item() {
        let menu = Menu::new(vec![MenuItem::new("A", || {}), MenuItem::new("B", || {})]).unwrap();
        let mut engine = engine(CARDPUTER, &[Some(Previous), Some(Select)]);
        let options = LoopOptions::list().without_wrap();

        assert_eq!(engine.loop_options(&menu, &options), Outcome::Selected(0));
    }

    #[test]
    fn cancel_key_only_on_keyboard_devices() {
        let menu = Menu::new(vec![MenuItem::new("A", || {})]).unwrap();

        let mut keyboard = engine(CARDPUTER, &[Some(Cancel)]);
        assert_eq!(keyboard.loop_options(&menu, &LoopOptions::list()), Outcome::Cancelled);

        let mut buttons = engine(STICK_C_PLUS, &[Some(Cancel), Some(Select)]);
        assert_eq!(buttons.loop_options(&menu, &LoopOptions::list()), Outcome::Selected(0));
    }

    #[test]
    fn bright_menu_drives_backlight() {
        let items: Vec<MenuItem> = ["100%", "75%", "50%", "25%", " 0%"]
            .into_iter()
            .map(|label| MenuItem::new(label, || {}))
            .collect();
        let menu = Menu::new(items).unwrap();
        let backlight = SharedBacklight::default();
        let mut engine = engine(CARDPUTER, &[Some(Next), Some(Next), Some(Select)])
            .with_backlight(backlight.clone());

        engine.loop_options(&menu, &LoopOptions::list().bright());

        assert_eq!(backlight.level(), 208);
    }

    #[test]
    fn backlight_untouched_unless_linked() {
        let menu = Menu::new(vec![MenuItem::new("A", || {}), MenuItem::new("B", || {})]).unwrap();
        let backlight = SharedBacklight::default();
        let mut engine =
            engine(CARDPUTER, &[Some(Next), Some(Select)]).with_backlight(backlight.clone());

        engine.loop_options(&menu, &LoopOptions::list());

        assert_eq!(backlight.level(), 255);
    }

    #[test]
    fn custom_curve_is_used() {
        fn half(_: usize, _: usize, _: u8) -> u8 {
            128
        }
        let menu = Menu::new(vec![MenuItem::new("A", || {})]).unwrap();
        let backlight = SharedBacklight::default();
        let mut engine = engine(CARDPUTER, &[Some(Select)])
            .with_backlight(backlight.clone())
            .with_brightness_curve(half, 0);

        engine.loop_options(&menu, &LoopOptions::list().bright());

        assert_eq!(backlight.level(), 128);
    }

    #[test]
    fn list_capacity_follows_device() {
        let items: Vec<MenuItem> = (0..6).map(|i| MenuItem::new(format!("Item {i}"), || {})).collect();
        let menu = Menu::new(items).unwrap();
        let mut engine = engine(STICK_C, &[Some(Select)]);

        engine.loop_options(&menu, &LoopOptions::list());

        assert_eq!(engine.surface().texts().count(), STICK_C.max_menu_rows);
    }

    #[test]
    fn file_browser_reports_index_without_side_effects() {
        let files = FileList::new(vec![
            FileEntry::new("> Back", "..", FileKind::Operator),
            FileEntry::new("captures", "/captures", FileKind::Folder),
            FileEntry::new("tv.ir", "/tv.ir", FileKind::Plain),
        ])
        .unwrap();
        let mut engine = engine(CARDPUTER, &[Some(Next), Some(Next), Some(Select)]);

        assert_eq!(engine.browse_files(&files), Some(2));
    }

    #[test]
    fn main_screen_resumes_and_shows_battery() {
        let labels = ["WiFi", "BLE", "RF", "RFID", "Others", "Config"];
        let mut engine = engine(STICK_C_PLUS, &[Some(Previous), Some(Select)])
            .with_battery(FixedBattery(42));

        let outcome = engine.main_screen(&labels, 3, Header::default()).unwrap();

        assert_eq!(outcome, Outcome::Selected(2));
        assert!(engine.surface().texts().any(|(_, text, _)| text == "42%"));
    }

    #[test]
    fn status_widgets_present_immediately() {
        let mut engine = engine(STICK_C, &[]);
        engine.red_stripe("Saved");
        engine.progress(0, 10, ProgressTask::Download);
        engine.scanning();
        engine.draw_battery_status();

        assert_eq!(engine.surface().presents(), 4);
        let (at, _, style) = engine.surface().texts().next().unwrap();
        assert_eq!((at.y, style.size), (7, TextSize::Medium));
    }

    #[test]
    fn zero_row_profile_is_rejected() {
        let mut profile = CARDPUTER;
        profile.max_menu_rows = 0;
        let surface = RecordingSurface::new(240, 135);
        let result = Engine::new(surface, ScriptedInput::new(&[]), ManualClock::new(), profile);
        assert!(result.is_err());
    }
}
