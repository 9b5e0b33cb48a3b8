use std::ops::Range;

/// Contiguous slice of the list currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow {
    pub start: usize,
    pub count: usize,
}

impl VisibleWindow {
    pub fn end(&self) -> usize {
        self.start + self.count
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// Derive the rows to show for a selection.
///
/// Short lists show everything. Once the list overflows, the window stays
/// at the top until the selection passes the last row, then keeps the
/// selection pinned as the bottom row.
pub fn compute_window(selected: usize, item_count: usize, capacity: usize) -> VisibleWindow {
    if item_count == 0 || capacity == 0 {
        return VisibleWindow { start: 0, count: 0 };
    }
    if item_count <= capacity {
        return VisibleWindow {
            start: 0,
            count: item_count,
        };
    }
    if selected < capacity {
        return VisibleWindow {
            start: 0,
            count: capacity,
        };
    }
    let selected = selected.min(item_count - 1);
    VisibleWindow {
        start: selected + 1 - capacity,
        count: capacity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::navigator::{Direction, NavigationState};
    use std::num::NonZeroUsize;

    #[test]
    fn window_follows_selection_down_a_long_list() {
        let mut state = NavigationState::new(NonZeroUsize::new(10).unwrap(), true);
        let window = |state: &NavigationState| compute_window(state.selected(), 10, 7);

        assert_eq!(window(&state).range(), 0..7);
        for _ in 0..6 {
            state = state.advance(Direction::Next);
        }
        assert_eq!(state.selected(), 6);
        assert_eq!(window(&state).range(), 0..7);

        state = state.advance(Direction::Next);
        assert_eq!(state.selected(), 7);
        assert_eq!(window(&state).range(), 1..8);

        state = state.advance(Direction::Next).advance(Direction::Next);
        assert_eq!(state.selected(), 9);
        assert_eq!(window(&state).range(), 3..10);
    }

    #[test]
    fn window_snaps_back_to_top_when_selection_returns() {
        assert_eq!(compute_window(9, 10, 7).range(), 3..10);
        assert_eq!(compute_window(8, 10, 7).range(), 2..9);
        assert_eq!(compute_window(6, 10, 7).range(), 0..7);
        assert_eq!(compute_window(0, 10, 7).range(), 0..7);
    }

    #[test]
    fn short_list_is_shown_whole() {
        assert_eq!(compute_window(2, 3, 5), VisibleWindow { start: 0, count: 3 });
        assert_eq!(compute_window(4, 5, 5), VisibleWindow { start: 0, count: 5 });
    }

    #[test]
    fn window_always_contains_selection() {
        for item_count in 1..=20 {
            for capacity in 1..=9 {
                for selected in 0..item_count {
                    let window = compute_window(selected, item_count, capacity);
                    assert!(window.contains(selected), "{selected}/{item_count}/{capacity}");
                    assert!(window.count <= capacity.min(item_count));
                    assert!(window.end() <= item_count);
                }
            }
        }
    }

    #[test]
    fn degenerate_inputs_yield_empty_window() {
        assert_eq!(compute_window(0, 0, 7).count, 0);
        assert_eq!(compute_window(3, 10, 0).count, 0);
    }
}
