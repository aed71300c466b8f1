//! Which named keyboard is on screen.
//!
//! Holds only a layout name, never a field handle, so code with no field at
//! all can show a keyboard too.

use crate::state::{MutableState, State, Subscription};

#[derive(Clone, Debug)]
pub struct KeyboardVisibility {
    active: MutableState<Option<String>>,
}

impl KeyboardVisibility {
    pub fn new() -> Self {
        Self {
            active: MutableState::new(None),
        }
    }

    /// Make `name` the active keyboard. Showing the active name again does
    /// nothing observable.
    pub fn show(&self, name: impl Into<String>) {
        let name = name.into();
        if self.active.set(Some(name.clone())) {
            log::debug!("show keyboard {name:?}");
        }
    }

    pub fn hide(&self) {
        if self.active.set(None) {
            log::debug!("hide keyboard");
        }
    }

    pub fn active(&self) -> Option<String> {
        self.active.get()
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.with(|active| active.as_deref() == Some(name))
    }

    pub fn is_any_active(&self) -> bool {
        self.active.with(Option::is_some)
    }

    pub fn state(&self) -> State<Option<String>> {
        self.active.as_state()
    }

    pub fn subscribe(&self, listener: impl Fn(Option<&str>) + 'static) -> Subscription {
        self.active
            .subscribe(move |active: &Option<String>| listener(active.as_deref()))
    }
}

impl Default for KeyboardVisibility {
    fn default() -> Self {
        Self::new()
    }
}
