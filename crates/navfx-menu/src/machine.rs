#![forbid(unsafe_code)]

//! Menu lifecycle state machine.
//!
//! The machine is a transition table keyed by `(MenuState, MenuEvent)`.
//! Requests that do not match a row are rejected without side effects,
//! which is what keeps two timelines from ever running at once.
//!
//! ```text
//!   Closed --OpenRequested--> Opening --OpenSettled--> Open
//!     ^                                                  |
//!     +----CloseSettled---- Closing <--CloseRequested----+
//! ```
//!
//! Each accepted transition start bumps a generation counter. Completion
//! cues carry the generation they were issued under, so a cue from an
//! earlier transition can never advance a later one.

use std::fmt;

use crate::timeline::{Cue, Direction};

/// Lifecycle state of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuState {
    /// Overlay hidden, hero visible.
    #[default]
    Closed,
    /// Open timeline in flight.
    Opening,
    /// Overlay covering the viewport.
    Open,
    /// Close timeline in flight.
    Closing,
}

impl MenuState {
    /// Whether a timeline is in flight.
    #[must_use]
    pub const fn is_transitioning(self) -> bool {
        matches!(self, Self::Opening | Self::Closing)
    }
}

/// Inputs to the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuEvent {
    /// A trigger asked to open.
    OpenRequested,
    /// A trigger asked to close.
    CloseRequested,
    /// The open timeline's terminal step finished.
    OpenSettled,
    /// The close timeline's terminal step finished.
    CloseSettled,
}

/// Side effect the caller performs for an accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Issue the open timeline.
    IssueOpen,
    /// Issue the close timeline.
    IssueClose,
    /// Apply the open settle batch.
    SettleOpen,
    /// Apply the close reset batch.
    ResetClosed,
}

/// The transition table.
#[must_use]
pub const fn transition(state: MenuState, event: MenuEvent) -> Option<(MenuState, Action)> {
    use MenuEvent::*;
    use MenuState::*;
    match (state, event) {
        (Closed, OpenRequested) => Some((Opening, Action::IssueOpen)),
        (Opening, OpenSettled) => Some((Open, Action::SettleOpen)),
        (Open, CloseRequested) => Some((Closing, Action::IssueClose)),
        (Closing, CloseSettled) => Some((Closed, Action::ResetClosed)),
        _ => None,
    }
}

/// Text of the header toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonLabel {
    /// Offers to open.
    Menu,
    /// Offers to close.
    Close,
}

impl ButtonLabel {
    /// The label the overlay's own close trigger always shows.
    pub const OVERLAY_TRIGGER: Self = Self::Close;

    /// Label for `state`, given whether the current transition's label
    /// timer has already fired.
    #[must_use]
    pub const fn derive(state: MenuState, flipped: bool) -> Self {
        match (state, flipped) {
            (MenuState::Closed, _) | (MenuState::Opening, false) | (MenuState::Closing, true) => {
                Self::Menu
            }
            (MenuState::Open, _) | (MenuState::Opening, true) | (MenuState::Closing, false) => {
                Self::Close
            }
        }
    }

    /// Display text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "Menu",
            Self::Close => "Close",
        }
    }
}

impl fmt::Display for ButtonLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a completion cue did to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueOutcome {
    /// The button label flipped.
    LabelFlipped,
    /// A transition reached its terminal state; perform the action.
    Settled(Action),
    /// The cue did not belong to the transition in flight.
    Ignored,
}

/// State, label flip flag and transition generation.
#[derive(Debug, Clone, Default)]
pub struct MenuMachine {
    state: MenuState,
    flipped: bool,
    generation: u64,
}

impl MenuMachine {
    /// A closed machine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Current button label.
    #[must_use]
    pub fn label(&self) -> ButtonLabel {
        ButtonLabel::derive(self.state, self.flipped)
    }

    /// Generation of the latest accepted transition.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Feed a request. Returns the action to perform, or `None` if the
    /// request was rejected.
    pub fn request(&mut self, direction: Direction) -> Option<Action> {
        let event = match direction {
            Direction::Open => MenuEvent::OpenRequested,
            Direction::Close => MenuEvent::CloseRequested,
        };
        let Some((next, action)) = transition(self.state, event) else {
            navfx_core::debug!(state = ?self.state, ?event, "request rejected");
            return None;
        };
        self.generation += 1;
        self.flipped = false;
        self.enter(next);
        Some(action)
    }

    /// Feed a completion cue issued under `generation`.
    pub fn on_cue(&mut self, generation: u64, cue: Cue) -> CueOutcome {
        if generation != self.generation {
            navfx_core::debug!(generation, current = self.generation, ?cue, "stale cue");
            return CueOutcome::Ignored;
        }
        match cue {
            Cue::LabelFlip(direction) => {
                let expected = match direction {
                    Direction::Open => MenuState::Opening,
                    Direction::Close => MenuState::Closing,
                };
                if self.state != expected || self.flipped {
                    return CueOutcome::Ignored;
                }
                self.flipped = true;
                navfx_core::debug!(label = %self.label(), "label flipped");
                CueOutcome::LabelFlipped
            }
            Cue::Settled(direction) => {
                let event = match direction {
                    Direction::Open => MenuEvent::OpenSettled,
                    Direction::Close => MenuEvent::CloseSettled,
                };
                let Some((next, action)) = transition(self.state, event) else {
                    return CueOutcome::Ignored;
                };
                self.enter(next);
                self.flipped = false;
                CueOutcome::Settled(action)
            }
        }
    }

    fn enter(&mut self, next: MenuState) {
        navfx_core::debug!(from = ?self.state, to = ?next, "menu state");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_accepts_only_four_rows() {
        let states = [
            MenuState::Closed,
            MenuState::Opening,
            MenuState::Open,
            MenuState::Closing,
        ];
        let events = [
            MenuEvent::OpenRequested,
            MenuEvent::CloseRequested,
            MenuEvent::OpenSettled,
            MenuEvent::CloseSettled,
        ];
        let accepted = states
            .iter()
            .flat_map(|s| events.iter().map(move |e| (*s, *e)))
            .filter(|(s, e)| transition(*s, *e).is_some())
            .count();
        assert_eq!(accepted, 4);
    }

    #[test]
    fn label_derivation() {
        use ButtonLabel::*;
        assert_eq!(ButtonLabel::derive(MenuState::Closed, false), Menu);
        assert_eq!(ButtonLabel::derive(MenuState::Opening, false), Menu);
        assert_eq!(ButtonLabel::derive(MenuState::Opening, true), Close);
        assert_eq!(ButtonLabel::derive(MenuState::Open, false), Close);
        assert_eq!(ButtonLabel::derive(MenuState::Closing, false), Close);
        assert_eq!(ButtonLabel::derive(MenuState::Closing, true), Menu);
        assert_eq!(ButtonLabel::OVERLAY_TRIGGER.to_string(), "Close");
    }

    #[test]
    fn full_cycle() {
        let mut m = MenuMachine::new();
        assert_eq!(m.request(Direction::Open), Some(Action::IssueOpen));
        let g = m.generation();
        assert_eq!(m.on_cue(g, Cue::LabelFlip(Direction::Open)), CueOutcome::LabelFlipped);
        assert_eq!(m.label(), ButtonLabel::Close);
        assert_eq!(
            m.on_cue(g, Cue::Settled(Direction::Open)),
            CueOutcome::Settled(Action::SettleOpen)
        );
        assert_eq!(m.state(), MenuState::Open);

        assert_eq!(m.request(Direction::Close), Some(Action::IssueClose));
        let g = m.generation();
        m.on_cue(g, Cue::LabelFlip(Direction::Close));
        assert_eq!(m.label(), ButtonLabel::Menu);
        m.on_cue(g, Cue::Settled(Direction::Close));
        assert_eq!(m.state(), MenuState::Closed);
        assert_eq!(m.label(), ButtonLabel::Menu);
    }

    #[test]
    fn rejects_reentry() {
        let mut m = MenuMachine::new();
        m.request(Direction::Open);
        let g = m.generation();
        assert_eq!(m.request(Direction::Open), None);
        assert_eq!(m.request(Direction::Close), None);
        assert_eq!(m.generation(), g);
        assert_eq!(m.state(), MenuState::Opening);
    }

    #[test]
    fn stale_and_mismatched_cues_ignored() {
        let mut m = MenuMachine::new();
        m.request(Direction::Open);
        let g = m.generation();
        assert_eq!(m.on_cue(g - 1, Cue::Settled(Direction::Open)), CueOutcome::Ignored);
        assert_eq!(m.on_cue(g, Cue::Settled(Direction::Close)), CueOutcome::Ignored);
        assert_eq!(m.on_cue(g, Cue::LabelFlip(Direction::Close)), CueOutcome::Ignored);
        assert_eq!(m.state(), MenuState::Opening);
        assert_eq!(m.label(), ButtonLabel::Menu);
    }
}
