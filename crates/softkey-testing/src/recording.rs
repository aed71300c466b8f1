use softkey_ui::TextInput;
use std::cell::RefCell;
use std::rc::Rc;

/// A call made on a [`RecordingTextInput`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextInputCall {
    SetShowSoftInputOnFocus(bool),
    RequestFocus,
    RequestBlur,
    SetValue(String),
}

#[derive(Debug)]
struct Recording {
    value: String,
    focused: bool,
    show_soft_input_on_focus: bool,
    calls: Vec<TextInputCall>,
}

/// In-memory [`TextInput`] that records every call.
///
/// Clones share one recording, so a clone kept by the test still observes the
/// field after it has been moved into a [`softkey_ui::KeyboardField`] or
/// dropped with it.
#[derive(Clone, Debug)]
pub struct RecordingTextInput {
    recording: Rc<RefCell<Recording>>,
}

impl RecordingTextInput {
    pub fn new() -> Self {
        Self::with_value("")
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            recording: Rc::new(RefCell::new(Recording {
                value: value.into(),
                focused: false,
                show_soft_input_on_focus: true,
                calls: Vec::new(),
            })),
        }
    }

    /// Whether focusing would currently raise the platform keyboard.
    pub fn shows_soft_input_on_focus(&self) -> bool {
        self.recording.borrow().show_soft_input_on_focus
    }

    pub fn calls(&self) -> Vec<TextInputCall> {
        self.recording.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.recording.borrow_mut().calls.clear();
    }

    fn record(&self, call: TextInputCall) {
        self.recording.borrow_mut().calls.push(call);
    }
}

impl Default for RecordingTextInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TextInput for RecordingTextInput {
    fn set_show_soft_input_on_focus(&mut self, show: bool) {
        self.recording.borrow_mut().show_soft_input_on_focus = show;
        self.record(TextInputCall::SetShowSoftInputOnFocus(show));
    }

    fn request_focus(&mut self) {
        self.recording.borrow_mut().focused = true;
        self.record(TextInputCall::RequestFocus);
    }

    fn request_blur(&mut self) {
        self.recording.borrow_mut().focused = false;
        self.record(TextInputCall::RequestBlur);
    }

    fn is_focused(&self) -> bool {
        self.recording.borrow().focused
    }

    fn value(&self) -> String {
        self.recording.borrow().value.clone()
    }

    fn set_value(&mut self, value: String) {
        self.recording.borrow_mut().value = value.clone();
        self.record(TextInputCall::SetValue(value));
    }
}
