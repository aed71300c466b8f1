//! Custom on-screen keyboards.
//!
//! - [`KeyboardField`] wraps a text field so that focusing it shows a named
//!   custom keyboard instead of the platform's own.
//! - [`Keyboard`] declares a named key grid and renders it to a
//!   [`KeyboardView`] while its name is the active one.
//! - [`KeyboardHost`] holds the keyboards of a screen and slides the active
//!   one in and out.
//! - [`KeyboardInput`] / [`use_keyboard_input`] keep a string in sync with key
//!   presses.
//!
//! All of them coordinate through a [`softkey_core::KeyboardContext`].

pub mod color;
mod field;
mod host;
mod input;
pub mod key;
mod keyboard;
pub mod layouts;

pub use color::Color;
pub use field::{BlurOutcome, FocusEvent, FocusEventKind, FocusHandler, KeyboardField, TextInput};
pub use host::{HostFrame, HostOptions, KeyboardHost};
pub use input::{apply_key, use_keyboard_input, KeyboardInput, ValueSetter};
pub use key::{KeyKind, BACKSPACE, FILLER, SPACE, SPACE_GLYPH};
pub use keyboard::{
    FillerView, KeyButton, KeyRowView, KeyView, Keyboard, KeyboardMetrics, KeyboardOptions,
    KeyboardView,
};
pub use layouts::{KeyLayout, ALPHA_LAYOUT, NUMERIC_LAYOUT};

pub use softkey_animation::{AnimationSpec, Easing};
pub use softkey_core::{
    use_keyboard, BlurGuard, FieldId, KeyPressHandler, KeyboardContext, KeyboardHandle,
    KeyboardProvider,
};

pub mod prelude {
    pub use crate::{
        use_keyboard_input, Color, HostOptions, KeyLayout, Keyboard, KeyboardField, KeyboardHost,
        KeyboardInput, KeyboardOptions, TextInput, ALPHA_LAYOUT, BACKSPACE, NUMERIC_LAYOUT, SPACE,
    };
    pub use softkey_core::{use_keyboard, KeyboardContext, KeyboardProvider};
}
