//! Interaction state machines
//!
//! Widgets define their own state enum and map events to transitions by
//! implementing [`StateTransitions`]. Pattern matching keeps the full
//! transition table in one place:
//!
//! ```
//! use spindle_core::fsm::StateTransitions;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//! enum PressState {
//!     Idle,
//!     Pressed,
//! }
//!
//! const PRESS: u32 = 1;
//! const RELEASE: u32 = 2;
//!
//! impl StateTransitions for PressState {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (PressState::Idle, PRESS) => Some(PressState::Pressed),
//!             (PressState::Pressed, RELEASE) => Some(PressState::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut state = PressState::Idle;
//! assert!(state.advance(PRESS));
//! assert_eq!(state, PressState::Pressed);
//! ```

/// Maps `(state, event)` pairs to successor states.
///
/// `on_event` returns `None` when the event does not transition out of the
/// current state; callers keep the existing state in that case.
pub trait StateTransitions: Sized + Copy + core::fmt::Debug {
    /// Compute the successor state for an event, if any
    fn on_event(&self, event: u32) -> Option<Self>;

    /// Apply an event in place, returning whether the state changed
    fn advance(&mut self, event: u32) -> bool {
        match self.on_event(event) {
            Some(next) => {
                tracing::trace!(from = ?self, to = ?next, event, "fsm transition");
                *self = next;
                true
            }
            None => false,
        }
    }
}
