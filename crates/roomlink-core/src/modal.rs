//! Modal focus sub-machine.
//!
//! While a modal is open it owns all directional input. Its controls form a
//! ring: Right/Down step forward, Left/Up step back, and both ends wrap. This
//! is the opposite of the top-level rows, which clamp.
//!
//! # Invariants
//!
//! - A freshly opened modal focuses its first control.
//! - The ring index is always `< len` (or `0` for an empty ring).
//! - The top-level [`FocusState`](crate::focus::FocusState) is never touched
//!   by anything in this module.

use crate::{
    catalog::{ModalContent, ModalItem, ServiceId},
    focus::Direction,
};

/// A cyclic focus index over a fixed number of elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRing {
    index: usize,
    len: usize,
}

impl FocusRing {
    /// A ring of `len` elements focused on the first.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Focused position.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the ring has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Step forward, wrapping to the first element.
    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    /// Step back, wrapping to the last element.
    pub fn previous(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump to the first element.
    pub fn first(&mut self) {
        self.index = 0;
    }

    /// Jump to the last element.
    pub fn last(&mut self) {
        self.index = self.len.saturating_sub(1);
    }

    /// Right/Down step forward, Left/Up step back.
    pub fn step(&mut self, direction: Direction) {
        match direction {
            Direction::Right | Direction::Down => self.next(),
            Direction::Left | Direction::Up => self.previous(),
        }
    }
}

/// A focusable control inside a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalControl {
    /// The close button in the corner.
    Close,
    /// A focusable body item, by index into the content's items.
    Item(usize),
    /// "Confirm Selection".
    Confirm,
    /// "Back".
    Back,
}

/// What activating the focused control asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    /// Close the modal.
    Close,
    /// An item was marked as the current selection.
    Selected(usize),
    /// The guest confirmed; the modal closes.
    Confirmed {
        /// Service the modal describes.
        service: ServiceId,
        /// Label of the selected item, if one was picked.
        item: Option<String>,
    },
}

/// An open modal with its focus ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    content: ModalContent,
    controls: Vec<ModalControl>,
    ring: FocusRing,
    selected: Option<usize>,
}

impl ModalState {
    /// Open a modal: collect its controls and focus the first one.
    ///
    /// Controls are ordered Close, each focusable item, Confirm, Back.
    pub fn open(content: ModalContent) -> Self {
        let mut controls = vec![ModalControl::Close];
        controls.extend(content.focusable_items().map(ModalControl::Item));
        controls.push(ModalControl::Confirm);
        controls.push(ModalControl::Back);

        let ring = FocusRing::new(controls.len());
        Self { content, controls, ring, selected: None }
    }

    /// What the modal shows.
    pub fn content(&self) -> &ModalContent {
        &self.content
    }

    /// Controls in ring order.
    pub fn controls(&self) -> &[ModalControl] {
        &self.controls
    }

    /// Position of the focused control in [`Self::controls`].
    pub fn focus_index(&self) -> usize {
        self.ring.index()
    }

    /// The focused control.
    pub fn focused(&self) -> ModalControl {
        self.controls.get(self.ring.index()).copied().unwrap_or(ModalControl::Close)
    }

    /// The item marked as selected, if any.
    pub fn selected_item(&self) -> Option<&ModalItem> {
        self.selected.and_then(|i| self.content.items.get(i))
    }

    /// Index of the selected item, if any.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Move focus around the ring.
    pub fn navigate(&mut self, direction: Direction) {
        self.ring.step(direction);
    }

    /// Activate the focused control.
    pub fn activate(&mut self) -> ModalOutcome {
        match self.focused() {
            ModalControl::Close | ModalControl::Back => ModalOutcome::Close,
            ModalControl::Item(index) => {
                self.selected = Some(index);
                ModalOutcome::Selected(index)
            },
            ModalControl::Confirm => ModalOutcome::Confirmed {
                service: self.content.service,
                item: self.selected_item().map(|item| item.label.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::SERVICES, state::GuestState};

    fn tv_modal() -> ModalState {
        ModalState::open(ModalContent::for_service(&SERVICES[0], &GuestState::default()))
    }

    fn dining_modal() -> ModalState {
        ModalState::open(ModalContent::for_service(&SERVICES[2], &GuestState::default()))
    }

    #[test]
    fn ring_wraps_both_ways() {
        let mut ring = FocusRing::new(3);
        ring.previous();
        assert_eq!(ring.index(), 2);
        ring.next();
        assert_eq!(ring.index(), 0);
    }

    #[test]
    fn empty_ring_stays_put() {
        let mut ring = FocusRing::new(0);
        ring.next();
        ring.previous();
        ring.last();
        assert_eq!(ring.index(), 0);
        assert!(ring.is_empty());
    }

    #[test]
    fn controls_are_close_items_confirm_back() {
        let modal = tv_modal();
        assert_eq!(modal.controls().len(), 8);
        assert_eq!(modal.controls()[0], ModalControl::Close);
        assert_eq!(modal.controls()[1], ModalControl::Item(0));
        assert_eq!(modal.controls()[6], ModalControl::Confirm);
        assert_eq!(modal.controls()[7], ModalControl::Back);

        assert_eq!(dining_modal().controls().len(), 3);
    }

    #[test]
    fn opens_on_first_control() {
        let modal = tv_modal();
        assert_eq!(modal.focus_index(), 0);
        assert_eq!(modal.focused(), ModalControl::Close);
    }

    #[test]
    fn left_from_first_wraps_to_back() {
        let mut modal = dining_modal();
        modal.navigate(Direction::Left);
        assert_eq!(modal.focused(), ModalControl::Back);
        assert_eq!(modal.activate(), ModalOutcome::Close);
    }

    #[test]
    fn confirm_reports_selected_item() {
        let mut modal = tv_modal();
        modal.navigate(Direction::Down);
        modal.navigate(Direction::Down);
        assert_eq!(modal.activate(), ModalOutcome::Selected(1));

        for _ in 0..4 {
            modal.navigate(Direction::Right);
        }
        assert_eq!(modal.focused(), ModalControl::Confirm);
        assert_eq!(
            modal.activate(),
            ModalOutcome::Confirmed {
                service: ServiceId::Tv,
                item: Some("CNN International".to_owned())
            }
        );
    }

    #[test]
    fn confirm_without_selection() {
        let mut modal = dining_modal();
        modal.navigate(Direction::Right);
        assert_eq!(
            modal.activate(),
            ModalOutcome::Confirmed { service: ServiceId::Dining, item: None }
        );
    }
}
