//! Value helper for fields driven by a custom keyboard.

use crate::key::BACKSPACE;
use softkey_core::{KeyPressHandler, MutableState, State, Subscription};
use std::rc::Rc;

pub type ValueSetter = Rc<dyn Fn(String)>;

/// Apply one key label to `value`: backspace removes the last character,
/// anything else is appended verbatim.
pub fn apply_key(value: &mut String, key: &str) {
    if key == BACKSPACE {
        value.pop();
    } else {
        value.push_str(key);
    }
}

/// Observable string edited by key presses.
#[derive(Clone, Debug)]
pub struct KeyboardInput {
    value: MutableState<String>,
}

impl KeyboardInput {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            value: MutableState::new(initial.into()),
        }
    }

    pub fn value(&self) -> String {
        self.value.get()
    }

    pub fn handle_key(&self, key: &str) {
        self.value.update(|value| apply_key(value, key));
    }

    pub fn set_value(&self, value: impl Into<String>) {
        self.value.set(value.into());
    }

    /// Key press callback bound to this value.
    pub fn handler(&self) -> KeyPressHandler {
        let input = self.clone();
        Rc::new(move |key: &str| input.handle_key(key))
    }

    pub fn setter(&self) -> ValueSetter {
        let input = self.clone();
        Rc::new(move |value: String| input.set_value(value))
    }

    pub fn state(&self) -> State<String> {
        self.value.as_state()
    }

    pub fn subscribe(&self, listener: impl Fn(&String) + 'static) -> Subscription {
        self.value.subscribe(listener)
    }
}

impl Default for KeyboardInput {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// `(value, key press handler, setter)` for one keyboard-driven value.
pub fn use_keyboard_input(
    initial: impl Into<String>,
) -> (State<String>, KeyPressHandler, ValueSetter) {
    let input = KeyboardInput::new(initial);
    (input.state(), input.handler(), input.setter())
}
