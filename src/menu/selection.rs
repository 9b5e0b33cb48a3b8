use std::num::NonZeroUsize;
use std::time::Duration;

use tracing::{debug, trace};

use crate::input::{Clock, InputSource};
use crate::render::Surface;

use super::navigator::{Direction, NavigationState};

/// What a Previous press does in a given loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviousMode {
    /// Step the selection backwards
    Navigate,
    /// Leave the loop without running anything
    Back,
}

/// Debounce delays applied by the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Pause after every redraw before input is read again
    pub settle: Duration,
    /// Pause after the loop ends, before control returns to the caller
    pub exit: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(200),
            exit: Duration::from_millis(200),
        }
    }
}

/// Something the selection loop can paint and, optionally, act upon
pub trait View {
    fn count(&self) -> NonZeroUsize;

    /// Paint the full frame for `state`. Must not depend on earlier calls.
    fn draw<S: Surface>(&self, surface: &mut S, state: &NavigationState);

    /// Run whatever is bound to `index`
    fn dispatch(&self, _index: usize) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Frame is stale and must be painted
    Rendering,
    /// Frame is current, waiting for input
    Idle,
    /// An item was chosen
    Dispatch,
    /// Left without choosing
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Selected(usize),
    Cancelled,
}

impl Outcome {
    pub fn selected(self) -> Option<usize> {
        match self {
            Outcome::Selected(index) => Some(index),
            Outcome::Cancelled => None,
        }
    }
}

/// Poll-driven state machine tying input, navigation and painting together.
///
/// The loop owns its `NavigationState` for its whole lifetime; nothing else
/// can move the selection while it runs.
pub struct SelectionLoop<'v, 'h, V> {
    view: &'v V,
    state: NavigationState,
    phase: LoopState,
    previous: PreviousMode,
    cancel_enabled: bool,
    timing: Timing,
    on_redraw: Option<Box<dyn FnMut(&NavigationState) + 'h>>,
}

impl<'v, 'h, V: View> SelectionLoop<'v, 'h, V> {
    pub fn new(view: &'v V, wrap: bool) -> Self {
        Self {
            view,
            state: NavigationState::new(view.count(), wrap),
            phase: LoopState::Rendering,
            previous: PreviousMode::Navigate,
            cancel_enabled: false,
            timing: Timing::default(),
            on_redraw: None,
        }
    }

    pub fn starting_at(mut self, index: usize) -> Self {
        self.state = NavigationState::at(index, self.view.count(), self.state.wrap());
        self
    }

    pub fn with_previous(mut self, previous: PreviousMode) -> Self {
        self.previous = previous;
        self
    }

    pub fn with_cancel(mut self, enabled: bool) -> Self {
        self.cancel_enabled = enabled;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Hook run after every redraw, e.g. to drive the backlight
    pub fn on_redraw(mut self, hook: impl FnMut(&NavigationState) + 'h) -> Self {
        self.on_redraw = Some(Box::new(hook));
        self
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn phase(&self) -> LoopState {
        self.phase
    }

    /// Advance the machine by one transition
    pub fn step<S, I, C>(&mut self, surface: &mut S, input: &mut I, clock: &mut C) -> LoopState
    where
        S: Surface,
        I: InputSource,
        C: Clock,
    {
        match self.phase {
            LoopState::Rendering => self.render(surface, input, clock),
            LoopState::Idle => self.poll(input),
            LoopState::Dispatch | LoopState::Cancelled => {}
        }
        self.phase
    }

    /// Spin until an item is chosen or the loop is left.
    ///
    /// A chosen item's action runs exactly once, before the exit delay.
    pub fn run<S, I, C>(mut self, surface: &mut S, input: &mut I, clock: &mut C) -> Outcome
    where
        S: Surface,
        I: InputSource,
        C: Clock,
    {
        debug!(items = self.state.count(), "menu loop entered");
        let outcome = loop {
            match self.step(surface, input, clock) {
                LoopState::Dispatch => {
                    let index = self.state.selected();
                    debug!(index, "menu dispatch");
                    self.view.dispatch(index);
                    break Outcome::Selected(index);
                }
                LoopState::Cancelled => {
                    debug!(index = self.state.selected(), "menu cancelled");
                    break Outcome::Cancelled;
                }
                LoopState::Rendering | LoopState::Idle => {}
            }
        };
        clock.delay(self.timing.exit);
        input.discard();
        outcome
    }

    fn render<S, I, C>(&mut self, surface: &mut S, input: &mut I, clock: &mut C)
    where
        S: Surface,
        I: InputSource,
        C: Clock,
    {
        self.view.draw(surface, &self.state);
        surface.present();
        if let Some(hook) = self.on_redraw.as_mut() {
            hook(&self.state);
        }
        trace!(selected = self.state.selected(), "menu redrawn");
        clock.delay(self.timing.settle);
        input.discard();
        self.phase = LoopState::Idle;
    }

    fn poll<I: InputSource>(&mut self, input: &mut I) {
        input.update();

        if input.previous_pressed() {
            match self.previous {
                PreviousMode::Navigate => self.navigate(Direction::Previous),
                PreviousMode::Back => {
                    self.phase = LoopState::Cancelled;
                    return;
                }
            }
        }
        if input.next_pressed() {
            self.navigate(Direction::Next);
        }
        if input.select_pressed() {
            self.phase = LoopState::Dispatch;
            return;
        }
        if self.cancel_enabled && input.cancel_pressed() {
            self.phase = LoopState::Cancelled;
        }
    }

    fn navigate(&mut self, direction: Direction) {
        self.state = self.state.advance(direction);
        trace!(?direction, selected = self.state.selected(), "menu navigated");
        self.phase = LoopState::Rendering;
    }
}
