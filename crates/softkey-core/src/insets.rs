//! Device safe-area insets.
//!
//! The platform integration owns the real numbers and pushes them in through
//! [`WindowInsets::set_safe_area`]; keyboard code only ever reads them.

use crate::state::{MutableState, State, Subscription};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct EdgeInsets {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl EdgeInsets {
    pub fn uniform(all: f32) -> Self {
        Self {
            left: all,
            top: all,
            right: all,
            bottom: all,
        }
    }

    pub fn bottom(bottom: f32) -> Self {
        Self {
            bottom,
            ..Self::default()
        }
    }
}

/// Observable safe-area insets for the window hosting the keyboard.
#[derive(Clone, Debug)]
pub struct WindowInsets {
    safe_area: MutableState<EdgeInsets>,
}

impl WindowInsets {
    pub fn new() -> Self {
        Self::with_safe_area(EdgeInsets::default())
    }

    pub fn with_safe_area(insets: EdgeInsets) -> Self {
        Self {
            safe_area: MutableState::new(insets),
        }
    }

    pub fn safe_area(&self) -> EdgeInsets {
        self.safe_area.get()
    }

    /// Current bottom inset; the only edge the keyboard host consumes.
    pub fn bottom(&self) -> f32 {
        self.safe_area.with(|insets| insets.bottom)
    }

    pub fn set_safe_area(&self, insets: EdgeInsets) -> bool {
        let changed = self.safe_area.set(insets);
        if changed {
            log::debug!("safe area insets changed to {insets:?}");
        }
        changed
    }

    pub fn state(&self) -> State<EdgeInsets> {
        self.safe_area.as_state()
    }

    pub fn subscribe(&self, listener: impl Fn(&EdgeInsets) + 'static) -> Subscription {
        self.safe_area.subscribe(listener)
    }
}

impl Default for WindowInsets {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn bottom_tracks_updates() {
        let insets = WindowInsets::new();
        assert_eq!(insets.bottom(), 0.0);

        assert!(insets.set_safe_area(EdgeInsets::bottom(34.0)));
        assert_eq!(insets.bottom(), 34.0);
        assert!(!insets.set_safe_area(EdgeInsets::bottom(34.0)));
    }

    #[test]
    fn subscribers_see_new_insets() {
        let insets = WindowInsets::new();
        let seen = Rc::new(Cell::new(0.0f32));
        let _subscription = {
            let seen = Rc::clone(&seen);
            insets.subscribe(move |value| seen.set(value.bottom))
        };

        insets.set_safe_area(EdgeInsets::uniform(12.0));
        assert_eq!(seen.get(), 12.0);
    }
}
