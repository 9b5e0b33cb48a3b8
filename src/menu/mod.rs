pub mod navigator;
pub mod selection;
pub mod window;

use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MenuError, Result};

pub use navigator::{advance, Direction, NavigationState};
pub use selection::{LoopState, Outcome, PreviousMode, SelectionLoop, Timing, View};
pub use window::{compute_window, VisibleWindow};

/// A label and the action to run when it is selected
pub struct MenuItem<'a> {
    label: String,
    action: Box<dyn Fn() + 'a>,
}

impl<'a> MenuItem<'a> {
    pub fn new(label: impl Into<String>, action: impl Fn() + 'a) -> Self {
        Self {
            label: label.into(),
            action: Box::new(action),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn invoke(&self) {
        (self.action)();
    }
}

impl AsRef<str> for MenuItem<'_> {
    fn as_ref(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for MenuItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Ordered, non-empty list of menu items
#[derive(Debug)]
pub struct Menu<'a> {
    items: Vec<MenuItem<'a>>,
    count: NonZeroUsize,
}

impl<'a> Menu<'a> {
    pub fn new(items: Vec<MenuItem<'a>>) -> Result<Self> {
        let count = NonZeroUsize::new(items.len()).ok_or(MenuError::EmptyMenu)?;
        Ok(Self { items, count })
    }

    pub fn items(&self) -> &[MenuItem<'a>] {
        &self.items
    }

    pub fn count(&self) -> NonZeroUsize {
        self.count
    }

    pub fn get(&self, index: usize) -> Option<&MenuItem<'a>> {
        self.items.get(index)
    }
}

/// How a menu is laid out on screen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Vertical scroll-windowed panel
    #[default]
    List,
    /// Three-slot wheel centered on the selection
    Carousel,
}

impl FromStr for Layout {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "list" => Ok(Layout::List),
            "carousel" | "wheel" | "submenu" => Ok(Layout::Carousel),
            other => Err(MenuError::UnknownLayout(other.to_string())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::List => write!(f, "list"),
            Layout::Carousel => write!(f, "carousel"),
        }
    }
}

/// Per-invocation settings of the selection loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopOptions {
    pub layout: Layout,
    /// Drive the backlight from the selection position
    pub brightness_linked: bool,
    /// Header text, shown only by the carousel
    pub caption: String,
    /// `None` uses the device default
    pub previous: Option<PreviousMode>,
    /// Let Previous wrap from the first item to the last (list layout only)
    pub wrap: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            layout: Layout::List,
            brightness_linked: false,
            caption: String::new(),
            previous: None,
            wrap: true,
        }
    }
}

impl LoopOptions {
    pub fn list() -> Self {
        Self::default()
    }

    pub fn carousel(caption: impl Into<String>) -> Self {
        Self {
            layout: Layout::Carousel,
            caption: caption.into(),
            ..Self::default()
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn bright(mut self) -> Self {
        self.brightness_linked = true;
        self
    }

    pub fn with_previous(mut self, previous: PreviousMode) -> Self {
        self.previous = Some(previous);
        self
    }

    pub fn without_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn empty_menu_is_rejected() {
        let err = Menu::new(Vec::new()).unwrap_err();
        assert!(matches!(err, MenuError::EmptyMenu));
    }

    #[test]
    fn item_invokes_its_own_action() {
        let hits = Cell::new(0);
        let item = MenuItem::new("Scan", || hits.set(hits.get() + 1));
        item.invoke();
        item.invoke();
        assert_eq!(hits.get(), 2);
        assert_eq!(item.label(), "Scan");
    }

    #[test]
    fn layout_parses_aliases() {
        assert_eq!("LIST".parse::<Layout>().unwrap(), Layout::List);
        assert_eq!("wheel".parse::<Layout>().unwrap(), Layout::Carousel);
        assert!("grid".parse::<Layout>().is_err());
    }

    #[test]
    fn layout_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Layout::Carousel).unwrap(), "\"carousel\"");
    }
}
