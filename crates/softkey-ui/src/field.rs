//! Text field wrapper that opens a custom keyboard instead of the native one.
//!
//! [`KeyboardField`] wraps any [`TextInput`] and keeps the context in step
//! with the field's focus: focusing shows the field's keyboard and makes it
//! the key press target, a genuine blur hides it again, and a blur caused by
//! pressing a key on the custom keyboard is swallowed through the field's
//! [`BlurGuard`].
//!
//! The native input method stays disabled for as long as the wrapper lives.

use softkey_core::{
    BlurGuard, BlurGuardState, FieldId, FieldMetadata, KeyPressHandler, KeyboardContext,
};
use std::fmt;
use std::rc::Rc;

/// The bare text entry primitive being wrapped.
pub trait TextInput {
    /// Whether focusing the field raises the platform's own soft keyboard.
    fn set_show_soft_input_on_focus(&mut self, show: bool);

    /// Ask the platform to focus the field. The resulting notification is
    /// delivered later through [`KeyboardField::handle_focus`].
    fn request_focus(&mut self);

    /// Ask the platform to blur the field. The resulting notification is
    /// delivered later through [`KeyboardField::handle_blur`].
    fn request_blur(&mut self);

    fn is_focused(&self) -> bool;

    fn value(&self) -> String;

    fn set_value(&mut self, value: String);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusEventKind {
    Focus,
    Blur,
}

/// Focus notification forwarded to external handlers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FocusEvent {
    pub field: FieldId,
    pub kind: FocusEventKind,
}

pub type FocusHandler = Rc<dyn Fn(&FocusEvent)>;

/// What a native blur did to the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurOutcome {
    /// Genuine focus loss: keyboard hidden and current field cleared.
    Hidden,
    /// Press-induced blur: the keyboard stays up.
    Suppressed,
}

pub struct KeyboardField<T: TextInput> {
    context: KeyboardContext,
    id: FieldId,
    input: T,
    keyboard_name: String,
    on_custom_key_press: Option<KeyPressHandler>,
    on_focus: Option<FocusHandler>,
    on_blur: Option<FocusHandler>,
    blur_guard: BlurGuard,
}

impl<T: TextInput> KeyboardField<T> {
    /// Wrap `input` and register it with `context` under `keyboard_name`.
    pub fn mount(
        context: &KeyboardContext,
        mut input: T,
        keyboard_name: impl Into<String>,
    ) -> Self {
        input.set_show_soft_input_on_focus(false);
        let field = Self {
            context: context.clone(),
            id: context.allocate_field_id(),
            input,
            keyboard_name: keyboard_name.into(),
            on_custom_key_press: None,
            on_focus: None,
            on_blur: None,
            blur_guard: BlurGuard::new(),
        };
        field.register();
        field
    }

    pub fn with_on_custom_key_press(mut self, handler: impl Fn(&str) + 'static) -> Self {
        self.set_on_custom_key_press(Some(Rc::new(handler)));
        self
    }

    pub fn with_on_focus(mut self, handler: impl Fn(&FocusEvent) + 'static) -> Self {
        self.on_focus = Some(Rc::new(handler));
        self
    }

    pub fn with_on_blur(mut self, handler: impl Fn(&FocusEvent) + 'static) -> Self {
        self.on_blur = Some(Rc::new(handler));
        self
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn keyboard_name(&self) -> &str {
        &self.keyboard_name
    }

    pub fn context(&self) -> &KeyboardContext {
        &self.context
    }

    pub fn blur_guard(&self) -> &BlurGuard {
        &self.blur_guard
    }

    /// Whether this field currently receives custom key presses.
    pub fn is_current(&self) -> bool {
        self.context.current_field() == Some(self.id)
    }

    /// Point the field at another keyboard. A focused field keeps showing the
    /// old one until it is focused again.
    pub fn set_keyboard_name(&mut self, keyboard_name: impl Into<String>) {
        let keyboard_name = keyboard_name.into();
        if keyboard_name == self.keyboard_name {
            return;
        }
        self.keyboard_name = keyboard_name;
        self.register();
    }

    /// Replace the key press callback. Re-registers only when the callback
    /// identity changes.
    pub fn set_on_custom_key_press(&mut self, handler: Option<KeyPressHandler>) {
        let unchanged = match (&self.on_custom_key_press, &handler) {
            (Some(old), Some(new)) => Rc::ptr_eq(old, new),
            (None, None) => true,
            _ => false,
        };
        if unchanged {
            return;
        }
        self.on_custom_key_press = handler;
        self.register();
    }

    pub fn set_on_focus(&mut self, handler: Option<FocusHandler>) {
        self.on_focus = handler;
    }

    pub fn set_on_blur(&mut self, handler: Option<FocusHandler>) {
        self.on_blur = handler;
    }

    /// Programmatic focus request.
    pub fn focus(&mut self) {
        self.input.request_focus();
    }

    /// Programmatic blur request.
    pub fn blur(&mut self) {
        self.input.request_blur();
    }

    /// Native focus notification. Starts a fresh session: a suppression armed
    /// by a press that never produced a blur is discarded here.
    pub fn handle_focus(&self) {
        if self.blur_guard.take() == BlurGuardState::SuppressNextBlur {
            log::debug!("{} dropped an unconsumed blur suppression", self.id);
        }
        log::debug!("{} focused, showing {:?}", self.id, self.keyboard_name);
        self.context.set_current_field(Some(self.id));
        self.context.show_keyboard(self.keyboard_name.clone());
        if let Some(handler) = &self.on_focus {
            handler(&FocusEvent {
                field: self.id,
                kind: FocusEventKind::Focus,
            });
        }
    }

    /// Native blur notification. Consumes the blur guard.
    pub fn handle_blur(&self) -> BlurOutcome {
        let outcome = match self.blur_guard.take() {
            BlurGuardState::Idle => {
                log::debug!("{} blurred, hiding keyboard", self.id);
                self.context.hide_keyboard();
                self.context.set_current_field(None);
                BlurOutcome::Hidden
            }
            BlurGuardState::SuppressNextBlur => {
                log::debug!("{} blur suppressed", self.id);
                BlurOutcome::Suppressed
            }
        };
        if let Some(handler) = &self.on_blur {
            handler(&FocusEvent {
                field: self.id,
                kind: FocusEventKind::Blur,
            });
        }
        outcome
    }

    /// Swallow the next native blur of this field.
    pub fn suppress_next_blur(&self) {
        self.blur_guard.arm();
    }

    pub fn value(&self) -> String {
        self.input.value()
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.input.set_value(value.into());
    }

    pub fn is_focused(&self) -> bool {
        self.input.is_focused()
    }

    pub fn inner(&self) -> &T {
        &self.input
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.input
    }

    fn register(&self) {
        let mut metadata =
            FieldMetadata::new(self.keyboard_name.clone()).with_blur_guard(self.blur_guard.clone());
        if let Some(handler) = &self.on_custom_key_press {
            metadata = metadata.with_key_press(Rc::clone(handler));
        }
        self.context.register_field(self.id, metadata);
    }
}

impl<T: TextInput> Drop for KeyboardField<T> {
    fn drop(&mut self) {
        self.context.unregister_field(self.id);
        self.input.set_show_soft_input_on_focus(true);
    }
}

impl<T: TextInput> fmt::Debug for KeyboardField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardField")
            .field("id", &self.id)
            .field("keyboard_name", &self.keyboard_name)
            .field("has_key_press", &self.on_custom_key_press.is_some())
            .field("blur_guard", &self.blur_guard.state())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/field_tests.rs"]
mod tests;
