use std::fmt;
use std::str::FromStr;

use crate::error::{MenuError, Result};
use crate::menu::PreviousMode;

/// How the battery level is sensed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryKind {
    /// Power-management chip reporting cell voltage
    PmicVoltage,
    /// Calibrated ADC reading behind a 1:2 divider
    AdcDivider,
}

/// Everything that differs between supported handhelds, chosen at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub width: i32,
    pub height: i32,
    /// Full keyboard: Previous navigates and a cancel key exists
    pub has_keyboard: bool,
    pub battery: BatteryKind,
    /// Rows the list layout shows before it starts scrolling
    pub max_menu_rows: usize,
}

pub const CARDPUTER: DeviceProfile = DeviceProfile {
    name: "cardputer",
    description: "240x135 with full keyboard",
    width: 240,
    height: 135,
    has_keyboard: true,
    battery: BatteryKind::AdcDivider,
    max_menu_rows: 5,
};

pub const STICK_C_PLUS: DeviceProfile = DeviceProfile {
    name: "stick-c-plus",
    description: "240x135, two buttons, PMIC battery",
    width: 240,
    height: 135,
    has_keyboard: false,
    battery: BatteryKind::PmicVoltage,
    max_menu_rows: 5,
};

pub const STICK_C_PLUS2: DeviceProfile = DeviceProfile {
    name: "stick-c-plus2",
    description: "240x135, two buttons, ADC battery",
    width: 240,
    height: 135,
    has_keyboard: false,
    battery: BatteryKind::AdcDivider,
    max_menu_rows: 5,
};

pub const STICK_C: DeviceProfile = DeviceProfile {
    name: "stick-c",
    description: "160x80, two buttons, PMIC battery",
    width: 160,
    height: 80,
    has_keyboard: false,
    battery: BatteryKind::PmicVoltage,
    max_menu_rows: 3,
};

pub const PROFILES: [DeviceProfile; 4] = [CARDPUTER, STICK_C_PLUS, STICK_C_PLUS2, STICK_C];

impl Default for DeviceProfile {
    fn default() -> Self {
        CARDPUTER
    }
}

impl DeviceProfile {
    pub fn by_name(name: &str) -> Result<Self> {
        let wanted = name.to_lowercase().replace(['_', ' '], "-");
        PROFILES
            .iter()
            .find(|profile| profile.name == wanted)
            .cloned()
            .ok_or_else(|| MenuError::UnknownDevice(name.to_string()))
    }

    /// Previous navigates on keyboards and means "back" on two-button devices
    pub fn previous_mode(&self) -> PreviousMode {
        if self.has_keyboard {
            PreviousMode::Navigate
        } else {
            PreviousMode::Back
        }
    }

    /// Short panels use the tighter status layouts
    pub fn is_compact(&self) -> bool {
        self.height < 100
    }

    pub fn with_menu_rows(mut self, rows: usize) -> Result<Self> {
        self.max_menu_rows = rows;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_menu_rows == 0 {
            return Err(MenuError::InvalidCapacity(self.max_menu_rows));
        }
        Ok(())
    }
}

impl FromStr for DeviceProfile {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        Self::by_name(s)
    }
}

impl fmt::Display for DeviceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
