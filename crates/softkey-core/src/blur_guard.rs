//! Per-field blur suppression.
//!
//! Tapping a key on some platforms makes the text field lose native focus for
//! a moment. That blur must not close the keyboard. The code that handles
//! the tap runs before the blur notification on the same event turn, so it
//! arms the field's guard, and the blur handler consumes it.
//!
//! The guard is a two-state machine, not a general flag: arming moves it to
//! [`BlurGuardState::SuppressNextBlur`], and exactly one [`BlurGuard::take`]
//! reads that state and returns the guard to [`BlurGuardState::Idle`].

use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlurGuardState {
    /// The next blur is a genuine focus loss.
    #[default]
    Idle,
    /// The next blur was caused by a key press and must be ignored.
    SuppressNextBlur,
}

/// Shared handle to one field's guard.
///
/// Clones observe and mutate the same state; the field keeps one, the
/// registry metadata keeps another so key surfaces can reach it.
#[derive(Clone, Debug, Default)]
pub struct BlurGuard {
    state: Rc<Cell<BlurGuardState>>,
}

impl BlurGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> BlurGuardState {
        self.state.get()
    }

    pub fn is_armed(&self) -> bool {
        self.state.get() == BlurGuardState::SuppressNextBlur
    }

    /// Suppress the next blur. Arming twice is the same as arming once.
    pub fn arm(&self) {
        self.state.set(BlurGuardState::SuppressNextBlur);
    }

    /// Read the state and reset to [`BlurGuardState::Idle`].
    pub fn take(&self) -> BlurGuardState {
        self.state.replace(BlurGuardState::Idle)
    }

    /// Whether `other` is a handle to the same guard.
    pub fn same_guard(&self, other: &BlurGuard) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let guard = BlurGuard::new();
        assert_eq!(guard.state(), BlurGuardState::Idle);
        assert!(!guard.is_armed());
    }

    #[test]
    fn take_consumes_exactly_one_arm() {
        let guard = BlurGuard::new();
        guard.arm();
        guard.arm();

        assert_eq!(guard.take(), BlurGuardState::SuppressNextBlur);
        assert_eq!(guard.take(), BlurGuardState::Idle);
    }

    #[test]
    fn clones_share_state() {
        let guard = BlurGuard::new();
        let remote = guard.clone();
        remote.arm();

        assert!(guard.is_armed());
        assert!(guard.same_guard(&remote));
        assert!(!guard.same_guard(&BlurGuard::new()));
        assert_eq!(guard.take(), BlurGuardState::SuppressNextBlur);
        assert!(!remote.is_armed());
    }
}
