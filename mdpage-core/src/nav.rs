//! Page navigation state machine
//!
//! [`NavState`] is a plain value; every operation takes the old state and
//! returns the new one together with a [`Transition`] telling the caller
//! whether a redraw is needed. [`Pager`] bundles a state with the page count
//! it is valid for.

use crate::error::NavError;
use crate::toc::find_label;

/// Current position and sidebar flag for one open document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NavState {
    pub current_index: usize,
    pub sidebar_visible: bool,
}

/// Whether an operation changed the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Changed,
    Unchanged,
}

impl Transition {
    pub fn is_changed(self) -> bool {
        self == Transition::Changed
    }

    fn between(old: NavState, new: NavState) -> Self {
        if old == new {
            Transition::Unchanged
        } else {
            Transition::Changed
        }
    }
}

/// Navigation requests a presentation layer can issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEvent {
    Next,
    Prev,
    JumpTo(usize),
    ToggleSidebar,
}

impl NavState {
    /// State for a freshly loaded document: first page, sidebar hidden.
    pub fn initial() -> Self {
        Self::default()
    }

    pub fn next(self, page_count: usize) -> (Self, Transition) {
        if self.current_index + 1 >= page_count {
            return (self, Transition::Unchanged);
        }
        let new = Self {
            current_index: self.current_index + 1,
            ..self
        };
        (new, Transition::Changed)
    }

    pub fn prev(self) -> (Self, Transition) {
        if self.current_index == 0 {
            return (self, Transition::Unchanged);
        }
        let new = Self {
            current_index: self.current_index - 1,
            ..self
        };
        (new, Transition::Changed)
    }

    /// Move to `index`. Out-of-range targets are reported, never clamped.
    pub fn jump_to(self, index: usize, page_count: usize) -> Result<(Self, Transition), NavError> {
        if index >= page_count {
            return Err(NavError::OutOfRange { index, page_count });
        }
        let new = Self {
            current_index: index,
            ..self
        };
        Ok((new, Transition::between(self, new)))
    }

    pub fn toggle_sidebar(self) -> (Self, Transition) {
        let new = Self {
            sidebar_visible: !self.sidebar_visible,
            ..self
        };
        (new, Transition::Changed)
    }

    /// Jump to the first page whose label equals `label`; unknown labels
    /// leave the state as is.
    pub fn select_by_label(
        self,
        label: &str,
        labels: &[String],
        page_count: usize,
    ) -> Result<(Self, Transition), NavError> {
        match find_label(labels, label) {
            Some(index) => self.jump_to(index, page_count),
            None => Ok((self, Transition::Unchanged)),
        }
    }

    /// Apply a single navigation event.
    pub fn apply(self, event: NavEvent, page_count: usize) -> Result<(Self, Transition), NavError> {
        match event {
            NavEvent::Next => Ok(self.next(page_count)),
            NavEvent::Prev => Ok(self.prev()),
            NavEvent::JumpTo(index) => self.jump_to(index, page_count),
            NavEvent::ToggleSidebar => Ok(self.toggle_sidebar()),
        }
    }
}

/// Navigation state bound to a fixed page count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pager {
    page_count: usize,
    state: NavState,
}

impl Pager {
    pub fn new(page_count: usize) -> Self {
        Self {
            page_count,
            state: NavState::initial(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current(&self) -> usize {
        self.state.current_index
    }

    pub fn sidebar_visible(&self) -> bool {
        self.state.sidebar_visible
    }

    pub fn is_first(&self) -> bool {
        self.state.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.state.current_index + 1 >= self.page_count
    }

    pub fn next(&mut self) -> Transition {
        self.commit(self.state.next(self.page_count))
    }

    pub fn prev(&mut self) -> Transition {
        self.commit(self.state.prev())
    }

    pub fn jump_to(&mut self, index: usize) -> Result<Transition, NavError> {
        let step = self.state.jump_to(index, self.page_count)?;
        Ok(self.commit(step))
    }

    pub fn first(&mut self) -> Transition {
        self.jump_to(0).unwrap_or(Transition::Unchanged)
    }

    pub fn last(&mut self) -> Transition {
        match self.page_count.checked_sub(1) {
            Some(last) => self.jump_to(last).unwrap_or(Transition::Unchanged),
            None => Transition::Unchanged,
        }
    }

    pub fn toggle_sidebar(&mut self) -> Transition {
        self.commit(self.state.toggle_sidebar())
    }

    pub fn select_by_label(&mut self, label: &str, labels: &[String]) -> Result<Transition, NavError> {
        let step = self.state.select_by_label(label, labels, self.page_count)?;
        Ok(self.commit(step))
    }

    pub fn apply(&mut self, event: NavEvent) -> Result<Transition, NavError> {
        let step = self.state.apply(event, self.page_count)?;
        Ok(self.commit(step))
    }

    fn commit(&mut self, (state, transition): (NavState, Transition)) -> Transition {
        self.state = state;
        transition
    }
}
