use std::cell::Cell;
use std::time::Duration;

use chrono::Local;
use tracing::info;

use crate::engine::Engine;
use crate::error::Result;
use crate::input::{Clock, InputSource};
use crate::menu::{Layout, LoopOptions, Menu, MenuItem, Outcome};
use crate::render::files::{FileEntry, FileKind, FileList};
use crate::render::status::{Header, ProgressTask};
use crate::render::Surface;

/// Top-level categories, in wheel order
pub const CATEGORIES: [&str; 6] = ["WiFi", "BLE", "RF", "RFID", "Others", "Config"];

const MESSAGE_HOLD: Duration = Duration::from_millis(1000);
const PROGRESS_STEP: Duration = Duration::from_millis(80);

/// What a submenu item asked for, carried out once its loop has ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Scan,
    ToggleWifi,
    Files,
    Install(ProgressTask),
    Brightness,
    Exit,
}

/// Menu tree shown by the simulator
pub struct Demo {
    layout: Layout,
    wifi_connected: bool,
}

impl Demo {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            wifi_connected: false,
        }
    }

    /// Cycle between the main screen and submenus until the user leaves
    pub fn run<S, I, C>(&mut self, engine: &mut Engine<S, I, C>) -> Result<()>
    where
        S: Surface,
        I: InputSource,
        C: Clock,
    {
        let mut index = 0;
        loop {
            engine.clear_screen();
            let header = Header {
                clock: Local::now().format("%H:%M").to_string(),
                wifi_connected: self.wifi_connected,
                battery: 0,
            };
            match engine.main_screen(&CATEGORIES, index, header)? {
                Outcome::Cancelled => break,
                Outcome::Selected(category) => {
                    index = category;
                    if !self.open(engine, category)? {
                        break;
                    }
                }
            }
        }
        info!("simulator finished");
        Ok(())
    }

    /// Run one category's submenu; `false` ends the simulator
    fn open<S, I, C>(&mut self, engine: &mut Engine<S, I, C>, category: usize) -> Result<bool>
    where
        S: Surface,
        I: InputSource,
        C: Clock,
    {
        let route = Cell::new(None);
        let target = &route;
        let go = |to: Route| move || target.set(Some(to));

        let mut items = match category {
            0 => vec![
                MenuItem::new("Scan networks", go(Route::Scan)),
                MenuItem::new(
                    if self.wifi_connected { "Disconnect" } else { "Connect" },
                    go(Route::ToggleWifi),
                ),
            ],
            1 => vec![
                MenuItem::new("BLE Scan", go(Route::Scan)),
                MenuItem::new("Media Cmds", go(Route::Scan)),
            ],
            2 => vec![
                MenuItem::new("Scan/copy", go(Route::Scan)),
                MenuItem::new("Replay", go(Route::Files)),
            ],
            3 => vec![
                MenuItem::new("Read tag", go(Route::Scan)),
                MenuItem::new("Load file", go(Route::Files)),
            ],
            4 => vec![
                MenuItem::new("SD Card", go(Route::Files)),
                MenuItem::new("Update FW", go(Route::Install(ProgressTask::Firmware))),
                MenuItem::new("Update SPIFFS", go(Route::Install(ProgressTask::Filesystem))),
                MenuItem::new("Download", go(Route::Install(ProgressTask::Download))),
            ],
            _ => vec![
                MenuItem::new("Brightness", go(Route::Brightness)),
                MenuItem::new("Exit", go(Route::Exit)),
            ],
        };
        items.push(MenuItem::new("Main Menu", || {}));
        let menu = Menu::new(items)?;

        let caption = CATEGORIES.get(category).copied().unwrap_or_default();
        let options = LoopOptions::carousel(caption).with_layout(self.layout);
        engine.clear_screen();
        engine.loop_options(&menu, &options);

        match route.get() {
            Some(Route::Exit) => Ok(false),
            Some(next) => {
                self.follow(engine, next)?;
                Ok(true)
            }
            None => Ok(true),
        }
    }

    fn follow<S, I, C>(&mut self, engine: &mut Engine<S, I, C>, route: Route) -> Result<()>
    where
        S: Surface,
        I: InputSource,
        C: Clock,
    {
        match route {
            Route::Scan => {
                engine.scanning();
                engine.wait(MESSAGE_HOLD);
                engine.red_stripe("Nothing found");
                engine.wait(MESSAGE_HOLD);
            }
            Route::ToggleWifi => {
                self.wifi_connected = !self.wifi_connected;
                let text = if self.wifi_connected { "Connected" } else { "Disconnected" };
                engine.red_stripe(text);
                engine.wait(MESSAGE_HOLD);
            }
            Route::Files => {
                let files = FileList::new(sample_files())?;
                engine.clear_screen();
                if let Some(entry) = engine.browse_files(&files).and_then(|i| files.get(i)) {
                    engine.clear_screen();
                    engine.red_stripe(&entry.name);
                    engine.wait(MESSAGE_HOLD);
                }
            }
            Route::Install(task) => {
                let total = 100;
                for done in (0..=total).step_by(5) {
                    engine.progress(done, total, task);
                    engine.wait(PROGRESS_STEP);
                }
                engine.red_stripe("Done");
                engine.wait(MESSAGE_HOLD);
            }
            Route::Brightness => {
                let items = ["100%", "75%", "50%", "25%", " 0%"]
                    .into_iter()
                    .map(|label| MenuItem::new(label, || {}))
                    .collect();
                let menu = Menu::new(items)?;
                engine.clear_screen();
                engine.loop_options(&menu, &LoopOptions::list().bright());
            }
            Route::Exit => {}
        }
        Ok(())
    }
}

/// Canned directory listing for the file browser
fn sample_files() -> Vec<FileEntry> {
    vec![
        FileEntry::new("> Back", "/", FileKind::Operator),
        FileEntry::new("captures", "/captures", FileKind::Folder),
        FileEntry::new("portals", "/portals", FileKind::Folder),
        FileEntry::new("garage_door.sub", "/garage_door.sub", FileKind::Plain),
        FileEntry::new("tv_power.ir", "/tv_power.ir", FileKind::Plain),
        FileEntry::new("office_badge.rfid", "/office_badge.rfid", FileKind::Plain),
        FileEntry::new("long_capture_name_from_field_test.sub", "/long.sub", FileKind::Plain),
        FileEntry::new("notes.txt", "/notes.txt", FileKind::Plain),
        FileEntry::new("New Folder", "/", FileKind::Operator),
        FileEntry::sentinel(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battery::SharedBacklight;
    use crate::device::{CARDPUTER, STICK_C_PLUS};
    use crate::input::ManualClock;
    use crate::menu::selection::tests::{Press, Press::*, ScriptedInput};
    use crate::render::RecordingSurface;

    fn engine(
        profile: crate::device::DeviceProfile,
        script: &[Option<Press>],
    ) -> Engine<RecordingSurface, ScriptedInput, ManualClock> {
        let surface = RecordingSurface::new(profile.width, profile.height);
        Engine::new(surface, ScriptedInput::new(script), ManualClock::new(), profile).unwrap()
    }

    fn shown(engine: &Engine<RecordingSurface, ScriptedInput, ManualClock>, text: &str) -> bool {
        engine.surface().texts().any(|(_, shown, _)| shown == text)
    }

    #[test]
    fn exit_item_ends_the_simulator() {
        // main: back to Config, open it; submenu: Exit
        let mut engine = engine(CARDPUTER, &[Some(Previous), Some(Select), Some(Next), Some(Select)]);
        Demo::new(Layout::List).run(&mut engine).unwrap();
        assert!(shown(&engine, ">Exit"));
    }

    #[test]
    fn back_returns_to_main_screen_at_same_category() {
        // open RF, back out, then cancel from the main screen
        let mut engine = engine(
            STICK_C_PLUS,
            &[Some(Next), Some(Next), Some(Select), Some(Previous), Some(Cancel)],
        );
        Demo::new(Layout::Carousel).run(&mut engine).unwrap();

        let labels: Vec<&str> = engine
            .surface()
            .texts()
            .map(|(_, text, _)| text)
            .filter(|text| CATEGORIES.contains(text))
            .collect();
        assert_eq!(labels.last(), Some(&"RF"));
        assert!(shown(&engine, "Scan/copy"));
    }

    #[test]
    fn file_browser_reports_chosen_entry() {
        // Others > SD Card > third entry
        let mut engine = engine(
            CARDPUTER,
            &[
                Some(Next),
                Some(Next),
                Some(Next),
                Some(Next),
                Some(Select),
                Some(Select),
                Some(Next),
                Some(Next),
                Some(Select),
                Some(Cancel),
            ],
        );
        Demo::new(Layout::List).run(&mut engine).unwrap();
        assert!(shown(&engine, ">portals"));
        assert!(shown(&engine, "portals"));
    }

    #[test]
    fn brightness_menu_drives_backlight() {
        let backlight = SharedBacklight::default();
        let mut engine = engine(
            CARDPUTER,
            &[
                Some(Previous),
                Some(Select),
                Some(Select),
                Some(Next),
                Some(Next),
                Some(Next),
                Some(Select),
                Some(Cancel),
            ],
        )
        .with_backlight(backlight.clone());

        Demo::new(Layout::List).run(&mut engine).unwrap();

        assert_eq!(backlight.level(), 184);
    }

    #[test]
    fn sample_listing_has_a_sentinel() {
        let files = FileList::new(sample_files()).unwrap();
        assert_eq!(files.count().get(), 9);
    }
}
