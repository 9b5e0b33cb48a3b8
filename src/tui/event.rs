use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::InputSource;

/// How long one `update` waits for a key before reporting nothing
const POLL_WAIT: Duration = Duration::from_millis(10);

/// Simulator keys after mapping from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Previous,
    Next,
    Select,
    Cancel,
    /// Leave the simulator from anywhere
    Quit,
}

/// Map a terminal key to a device key.
///
/// The punctuation keys are the arrow keys of the handheld keyboard.
pub fn map_key(key: KeyEvent) -> Option<Key> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Key::Quit);
    }
    match key.code {
        KeyCode::Left | KeyCode::Up | KeyCode::Char(',') | KeyCode::Char(';') => {
            Some(Key::Previous)
        }
        KeyCode::Right | KeyCode::Down | KeyCode::Char('.') | KeyCode::Char('/') => {
            Some(Key::Next)
        }
        KeyCode::Enter => Some(Key::Select),
        KeyCode::Esc | KeyCode::Char('`') => Some(Key::Cancel),
        KeyCode::Char('q') => Some(Key::Quit),
        _ => None,
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Latched {
    previous: bool,
    next: bool,
    select: bool,
    cancel: bool,
}

/// Keyboard input read on a background thread.
///
/// Presses are latched between polls and consumed by the queries. Once quit
/// is requested, every loop sees a cancel and a back press until it unwinds.
pub struct KeyboardInput {
    receiver: mpsc::Receiver<Key>,
    latched: Latched,
    quit: bool,
    _handler: thread::JoinHandle<()>,
}

impl KeyboardInput {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();

        let handler = thread::spawn(move || loop {
            if !event::poll(Duration::from_millis(50)).unwrap_or(false) {
                continue;
            }
            if let Ok(event::Event::Key(key)) = event::read() {
                if let Some(key) = map_key(key) {
                    if sender.send(key).is_err() {
                        break;
                    }
                }
            }
        });

        Self::with_receiver(receiver, handler)
    }

    fn with_receiver(receiver: mpsc::Receiver<Key>, handler: thread::JoinHandle<()>) -> Self {
        Self {
            receiver,
            latched: Latched::default(),
            quit: false,
            _handler: handler,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    fn latch(&mut self, key: Key) {
        match key {
            Key::Previous => self.latched.previous = true,
            Key::Next => self.latched.next = true,
            Key::Select => self.latched.select = true,
            Key::Cancel => self.latched.cancel = true,
            Key::Quit => self.quit = true,
        }
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for KeyboardInput {
    fn update(&mut self) {
        match self.receiver.recv_timeout(POLL_WAIT) {
            Ok(key) => self.latch(key),
            Err(RecvTimeoutError::Timeout) => return,
            Err(RecvTimeoutError::Disconnected) => {
                self.quit = true;
                return;
            }
        }
        while let Ok(key) = self.receiver.try_recv() {
            self.latch(key);
        }
    }

    fn discard(&mut self) {
        while let Ok(key) = self.receiver.try_recv() {
            if key == Key::Quit {
                self.quit = true;
            }
        }
        self.latched = Latched::default();
    }

    fn previous_pressed(&mut self) -> bool {
        std::mem::take(&mut self.latched.previous) || self.quit
    }

    fn next_pressed(&mut self) -> bool {
        std::mem::take(&mut self.latched.next) && !self.quit
    }

    fn select_pressed(&mut self) -> bool {
        std::mem::take(&mut self.latched.select) && !self.quit
    }

    fn cancel_pressed(&mut self) -> bool {
        std::mem::take(&mut self.latched.cancel) || self.quit
    }
}
