//! Top-level focus and navigation state machine.
//!
//! The launcher screen is three stacked rows traversed with a remote control:
//!
//! ```text
//!   Services   [tv] [cast] [dining] [spa] [concierge] [info]
//!      |  ^
//!    Down Up
//!      v  |
//!   Apps       [netflix] [youtube] [disney] [prime]
//!      |  ^
//!    Down Up
//!      v  |
//!   Footer     [dnd] [alarm] [privacy] [checkout]
//! ```
//!
//! Left/Right move within the active row and clamp at both ends. Up/Down
//! switch rows and keep each row's own remembered index, so returning to a row
//! lands on the element the guest last left it on.
//!
//! # Invariants
//!
//! - Every index stays within `[0, len - 1]` of its row (`0` for an empty row).
//! - Indices never wrap.
//! - Switching rows never changes any index.

use serde::Serialize;

use crate::catalog::{SERVICES, STREAMING_APPS};

/// Number of footer actions.
pub const FOOTER_SLOTS: usize = 4;

/// One of the three navigable rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Row {
    /// Guest service cards.
    #[default]
    Services,
    /// Streaming app shortcuts.
    Apps,
    /// Footer actions.
    Footer,
}

impl Row {
    /// The row below, if any.
    pub const fn below(self) -> Option<Self> {
        match self {
            Self::Services => Some(Self::Apps),
            Self::Apps => Some(Self::Footer),
            Self::Footer => None,
        }
    }

    /// The row above, if any.
    pub const fn above(self) -> Option<Self> {
        match self {
            Self::Services => None,
            Self::Apps => Some(Self::Services),
            Self::Footer => Some(Self::Apps),
        }
    }
}

/// Directional remote input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
}

/// Element counts for each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSizes {
    /// Service cards.
    pub services: usize,
    /// App shortcuts.
    pub apps: usize,
    /// Footer actions.
    pub footer: usize,
}

impl RowSizes {
    /// Element count of `row`.
    pub const fn len(&self, row: Row) -> usize {
        match row {
            Row::Services => self.services,
            Row::Apps => self.apps,
            Row::Footer => self.footer,
        }
    }
}

impl Default for RowSizes {
    fn default() -> Self {
        Self { services: SERVICES.len(), apps: STREAMING_APPS.len(), footer: FOOTER_SLOTS }
    }
}

/// Footer actions by slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterAction {
    /// Toggle do-not-disturb.
    DoNotDisturb,
    /// Alarm setup entry point.
    SetAlarm,
    /// Open or close the privacy menu.
    Privacy,
    /// Express checkout.
    Checkout,
}

impl FooterAction {
    /// Action at footer slot `index`.
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::DoNotDisturb),
            1 => Some(Self::SetAlarm),
            2 => Some(Self::Privacy),
            3 => Some(Self::Checkout),
            _ => None,
        }
    }
}

/// Result of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Move {
    /// Row or index changed.
    pub changed: bool,
    /// The guest moved right, which counts as interacting with the content.
    pub interacted: bool,
}

/// Which row is active and where each row's focus sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FocusState {
    row: Row,
    service_index: usize,
    app_index: usize,
    footer_index: usize,
}

impl FocusState {
    /// Initial focus: first service card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active row.
    pub fn row(&self) -> Row {
        self.row
    }

    /// Index within the active row.
    pub fn index(&self) -> usize {
        self.index_of(self.row)
    }

    /// Remembered index of `row`, active or not.
    pub fn index_of(&self, row: Row) -> usize {
        match row {
            Row::Services => self.service_index,
            Row::Apps => self.app_index,
            Row::Footer => self.footer_index,
        }
    }

    /// Whether `row`/`index` is the focused element.
    pub fn is_focused(&self, row: Row, index: usize) -> bool {
        self.row == row && self.index() == index
    }

    /// Apply one directional input.
    pub fn navigate(&mut self, direction: Direction, sizes: &RowSizes) -> Move {
        let before = *self;
        let interacted = match direction {
            Direction::Right => {
                let last = last_index(sizes.len(self.row));
                let next = (self.index() + 1).min(last);
                self.set_index(self.row, next);
                true
            },
            Direction::Left => {
                let next = self.index().saturating_sub(1);
                self.set_index(self.row, next);
                false
            },
            Direction::Down => {
                if let Some(target) = self.row.below() {
                    self.enter(target, sizes);
                }
                false
            },
            Direction::Up => {
                if let Some(target) = self.row.above() {
                    self.enter(target, sizes);
                }
                false
            },
        };
        Move { changed: before != *self, interacted }
    }

    /// Focus a specific element directly (pointer hover), clamping the index.
    pub fn focus(&mut self, row: Row, index: usize, sizes: &RowSizes) {
        self.row = row;
        self.set_index(row, index.min(last_index(sizes.len(row))));
    }

    /// Make `row` active, clamping its remembered index to the row's bound.
    fn enter(&mut self, row: Row, sizes: &RowSizes) {
        let remembered = self.index_of(row).min(last_index(sizes.len(row)));
        self.row = row;
        self.set_index(row, remembered);
    }

    fn set_index(&mut self, row: Row, index: usize) {
        match row {
            Row::Services => self.service_index = index,
            Row::Apps => self.app_index = index,
            Row::Footer => self.footer_index = index,
        }
    }
}

const fn last_index(len: usize) -> usize {
    len.saturating_sub(1)
}
