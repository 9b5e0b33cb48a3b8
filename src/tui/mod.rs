mod demo;
mod event;
mod surface;
mod theme;

pub use demo::{Demo, CATEGORIES};
pub use event::{map_key, Key, KeyboardInput};
pub use surface::TerminalSurface;

use std::io;

use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use crate::battery::{
    brightness_for, AdcBattery, BatteryReader, FixedBattery, PmicBattery, SharedBacklight,
};
use crate::config::Config;
use crate::device::{BatteryKind, DeviceProfile};
use crate::engine::Engine;
use crate::error::{MenuError, Result};
use crate::input::SystemClock;
use crate::menu::Layout;

/// Battery gauge for the simulator: a fixed reading when one is given,
/// otherwise the device's own strategy fed with a healthy cell.
pub fn simulated_battery(profile: &DeviceProfile, fixed: Option<u8>) -> Box<dyn BatteryReader> {
    match (fixed, profile.battery) {
        (Some(percent), _) => Box::new(FixedBattery(percent)),
        (None, BatteryKind::PmicVoltage) => Box::new(PmicBattery::new(|| 3.9)),
        (None, BatteryKind::AdcDivider) => Box::new(AdcBattery::new(|| 1_950)),
    }
}

/// Run the simulator on the current terminal
pub fn run(config: &Config, profile: DeviceProfile, layout: Layout, battery: Option<u8>) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(|e| MenuError::Tui(e.to_string()))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)
        .map_err(|e| MenuError::Tui(e.to_string()))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| MenuError::Tui(e.to_string()))?;
    terminal.clear().map_err(|e| MenuError::Tui(e.to_string()))?;

    info!(device = profile.name, %layout, "simulator started");
    let backlight = SharedBacklight::default();
    let surface = TerminalSurface::new(terminal, profile.width, profile.height, backlight.clone());
    let gauge = simulated_battery(&profile, battery);
    let res = Engine::new(surface, KeyboardInput::new(), SystemClock::new(), profile).and_then(
        |engine| {
            let mut engine = engine
                .with_palette(config.palette())
                .with_timing(config.timing())
                .with_backlight(backlight)
                .with_brightness_curve(brightness_for, config.min_brightness)
                .with_battery(gauge);
            let res = Demo::new(layout).run(&mut engine);
            match engine.surface_mut().take_error() {
                Some(err) => res.and(Err(err)),
                None => res,
            }
        },
    );

    // Restore terminal
    disable_raw_mode().map_err(|e| MenuError::Tui(e.to_string()))?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
        .map_err(|e| MenuError::Tui(e.to_string()))?;

    res
}
