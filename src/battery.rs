use std::cell::Cell;
use std::rc::Rc;

/// Synchronous battery gauge, 0 to 100
pub trait BatteryReader {
    fn percent(&mut self) -> u8;
}

impl<B: BatteryReader + ?Sized> BatteryReader for Box<B> {
    fn percent(&mut self) -> u8 {
        (**self).percent()
    }
}

/// Screen backlight, 0 (off) to 255 (full)
pub trait Backlight {
    fn set_brightness(&mut self, level: u8);
}

fn clamp_percent(percent: f64) -> u8 {
    if percent.is_nan() {
        return 0;
    }
    percent.round().clamp(0.0, 100.0) as u8
}

/// Cell voltage from a PMIC, 3.0 V empty to 4.2 V full
pub fn percent_from_pmic_volts(volts: f32) -> u8 {
    clamp_percent((f64::from(volts) - 3.0) / 1.2 * 100.0)
}

/// Calibrated ADC millivolts measured behind a 1:2 divider
pub fn percent_from_adc_millivolts(millivolts: u32) -> u8 {
    let cell = f64::from(millivolts) * 2.0;
    clamp_percent((cell - 3300.0) * 100.0 / (4150.0 - 3350.0))
}

/// Gauge backed by a PMIC voltage sampler
pub struct PmicBattery<F> {
    sample_volts: F,
}

impl<F: FnMut() -> f32> PmicBattery<F> {
    pub fn new(sample_volts: F) -> Self {
        Self { sample_volts }
    }
}

impl<F: FnMut() -> f32> BatteryReader for PmicBattery<F> {
    fn percent(&mut self) -> u8 {
        percent_from_pmic_volts((self.sample_volts)())
    }
}

/// Gauge backed by an ADC sampler returning calibrated millivolts
pub struct AdcBattery<F> {
    sample_millivolts: F,
}

impl<F: FnMut() -> u32> AdcBattery<F> {
    pub fn new(sample_millivolts: F) -> Self {
        Self { sample_millivolts }
    }
}

impl<F: FnMut() -> u32> BatteryReader for AdcBattery<F> {
    fn percent(&mut self) -> u8 {
        percent_from_adc_millivolts((self.sample_millivolts)())
    }
}

/// Constant reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBattery(pub u8);

impl BatteryReader for FixedBattery {
    fn percent(&mut self) -> u8 {
        self.0.min(100)
    }
}

/// Backlight level shared between the hook that sets it and whoever shows it
#[derive(Debug, Clone)]
pub struct SharedBacklight(Rc<Cell<u8>>);

impl Default for SharedBacklight {
    fn default() -> Self {
        Self(Rc::new(Cell::new(u8::MAX)))
    }
}

impl SharedBacklight {
    pub fn level(&self) -> u8 {
        self.0.get()
    }
}

impl Backlight for SharedBacklight {
    fn set_brightness(&mut self, level: u8) {
        self.0.set(level);
    }
}

/// Signature of a selection-to-brightness curve: `(index, count, min)`
pub type BrightnessCurve = fn(usize, usize, u8) -> u8;

/// Brightness for a selection: first item full, last item at `min`
pub fn brightness_for(index: usize, count: usize, min: u8) -> u8 {
    if count <= 1 {
        return u8::MAX;
    }
    let last = (count - 1) as f32;
    let steps_from_end = (count - 1 - index.min(count - 1)) as f32;
    let span = f32::from(u8::MAX - min);
    let level = f32::from(min) + (span * steps_from_end / last).round();
    level.min(f32::from(u8::MAX)) as u8
}
