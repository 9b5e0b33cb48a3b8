use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use pocket_menu::config::Config;
use pocket_menu::device::{BatteryKind, DeviceProfile, PROFILES};
use pocket_menu::menu::Layout;
use pocket_menu::{logging, tui, Result};

const HELP_TEXT: &str = r#"
  Keys
    Left, Up, ',' ';'      Previous item (back on two-button devices)
    Right, Down, '.' '/'   Next item
    Enter                  Select
    Esc, '`'               Cancel (keyboard devices)
    q, Ctrl-C              Quit

  Examples
    $ pocket-menu
    $ pocket-menu --device stick-c --layout carousel
    $ pocket-menu --battery 15
    $ pocket-menu --list-devices
"#;

#[derive(Parser)]
#[command(
    name = "pocket-menu",
    version = env!("CARGO_PKG_VERSION"),
    about = "Handheld menu simulator for the terminal",
    after_help = HELP_TEXT
)]
struct Cli {
    /// Device profile to emulate
    #[arg(short = 'd', long, value_name = "NAME")]
    device: Option<String>,

    /// Submenu layout: list or carousel
    #[arg(short = 'l', long, value_name = "LAYOUT")]
    layout: Option<String>,

    /// Use a custom config file
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show the available device profiles
    #[arg(long)]
    list_devices: bool,

    /// Simulated battery reading in percent
    #[arg(short = 'b', long, value_name = "PERCENT", value_parser = clap::value_parser!(u8).range(0..=100))]
    battery: Option<u8>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(Some(path))?,
        None => Config::load_or_default(None),
    };
    let profile = DeviceProfile::by_name(cli.device.as_deref().unwrap_or(&config.device))?;

    if cli.list_devices {
        print_devices(&profile);
        return Ok(());
    }

    let layout: Layout = match cli.layout.as_deref() {
        Some(name) => name.parse()?,
        None => config.layout,
    };

    logging::init(&config.log_level, &config.log_path()?)?;
    tui::run(&config, profile, layout, cli.battery)
}

fn print_devices(current: &DeviceProfile) {
    println!();
    println!("  {}", "Devices".underline());
    for profile in PROFILES {
        let marker = if profile.name == current.name {
            "●".green().to_string()
        } else {
            " ".to_string()
        };
        let battery = match profile.battery {
            BatteryKind::PmicVoltage => "pmic",
            BatteryKind::AdcDivider => "adc",
        };
        println!(
            "  {} {} {} {}",
            marker,
            format!("{:<14}", profile.name).bold(),
            profile.description.dimmed(),
            format!("[{} rows, {} battery]", profile.max_menu_rows, battery).dimmed()
        );
    }
    println!();
}
