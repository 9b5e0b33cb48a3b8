use std::num::NonZeroUsize;

/// Discrete navigation step delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Selection within a non-empty list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    selected: usize,
    count: NonZeroUsize,
    wrap: bool,
}

impl NavigationState {
    /// Start at the first item
    pub fn new(count: NonZeroUsize, wrap: bool) -> Self {
        Self {
            selected: 0,
            count,
            wrap,
        }
    }

    /// Start at `selected`, clamped to the last item
    pub fn at(selected: usize, count: NonZeroUsize, wrap: bool) -> Self {
        Self {
            selected: selected.min(count.get() - 1),
            count,
            wrap,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn count(&self) -> usize {
        self.count.get()
    }

    pub fn wrap(&self) -> bool {
        self.wrap
    }

    /// Index shown before the selection, always wrapping
    pub fn previous_index(&self) -> usize {
        (self.selected + self.count() - 1) % self.count()
    }

    /// Index shown after the selection, always wrapping
    pub fn next_index(&self) -> usize {
        (self.selected + 1) % self.count()
    }

    pub fn advance(self, direction: Direction) -> Self {
        advance(self, direction)
    }
}

/// Move the selection one step.
///
/// Next always wraps past the last item. Previous wraps only when the
/// state allows it, otherwise it stops at the first item.
pub fn advance(state: NavigationState, direction: Direction) -> NavigationState {
    let selected = match direction {
        Direction::Next => state.next_index(),
        Direction::Previous if state.wrap => state.previous_index(),
        Direction::Previous => state.selected.saturating_sub(1),
    };
    NavigationState { selected, ..state }
}
