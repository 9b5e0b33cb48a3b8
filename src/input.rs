use std::thread;
use std::time::{Duration, Instant};

/// Debounced button queries, sampled once per loop iteration.
///
/// Each query answers "did this happen since the last check?". There is no
/// event queue: presses the source cannot report in time are lost.
pub trait InputSource {
    /// Refresh latched state before the queries of one iteration
    fn update(&mut self) {}

    /// Forget presses latched while nobody was polling
    fn discard(&mut self) {}

    fn previous_pressed(&mut self) -> bool;
    fn next_pressed(&mut self) -> bool;
    fn select_pressed(&mut self) -> bool;

    /// Only keyboard devices have a cancel key
    fn cancel_pressed(&mut self) -> bool {
        false
    }
}

/// Time source used for debounce delays
pub trait Clock {
    /// Milliseconds since the clock was created
    fn millis(&self) -> u64;
    fn delay(&mut self, duration: Duration);
}

/// Wall clock backed by `Instant` and `thread::sleep`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn millis(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn delay(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Simulated clock: delays advance time instantly and are recorded
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    delays: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }

    /// Every delay requested so far, in order
    pub fn delays(&self) -> &[Duration] {
        &self.delays
    }
}

impl Clock for ManualClock {
    fn millis(&self) -> u64 {
        self.now.as_millis() as u64
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
        self.now += duration;
    }
}
