use crate::recording::RecordingTextInput;
use softkey_core::{EdgeInsets, KeyboardContext, KeyboardProvider, RuntimeHandle};
use softkey_ui::{BlurOutcome, KeyButton, KeyboardField, KeyboardView, TextInput};

/// Frame interval used by [`KeyboardTestRule::advance_time_millis`].
pub const FRAME_INTERVAL_NANOS: u64 = 16_000_000;

const MAX_IDLE_FRAMES: usize = 1_000;

/// Headless harness for keyboard scenarios.
///
/// Owns a [`KeyboardProvider`] and a manual frame clock: nothing advances
/// until the test calls [`advance_frame`](Self::advance_frame) or one of the
/// helpers built on it.
pub struct KeyboardTestRule {
    provider: KeyboardProvider,
    frame_time_nanos: u64,
}

impl KeyboardTestRule {
    pub fn new() -> Self {
        Self {
            provider: KeyboardProvider::with_runtime(RuntimeHandle::new()),
            frame_time_nanos: 0,
        }
    }

    pub fn context(&self) -> &KeyboardContext {
        self.provider.context()
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.context().runtime()
    }

    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Run `content` with the rule's context provided.
    pub fn provide<R>(&self, content: impl FnOnce() -> R) -> R {
        self.provider.provide(content)
    }

    /// Move the clock forward by `delta_nanos` and drain one frame.
    /// Returns the number of frame callbacks that ran.
    pub fn advance_frame(&mut self, delta_nanos: u64) -> usize {
        self.frame_time_nanos += delta_nanos;
        self.runtime_handle()
            .drain_frame_callbacks(self.frame_time_nanos)
    }

    /// Advance by `millis` in [`FRAME_INTERVAL_NANOS`] steps.
    pub fn advance_time_millis(&mut self, millis: u64) {
        let target = self.frame_time_nanos + millis * 1_000_000;
        while self.frame_time_nanos < target {
            let step = FRAME_INTERVAL_NANOS.min(target - self.frame_time_nanos);
            self.advance_frame(step);
        }
    }

    /// Drain frames until no callback is pending. Returns the frame count.
    ///
    /// # Panics
    /// Panics if work is still pending after a thousand frames.
    pub fn run_until_idle(&mut self) -> usize {
        let runtime = self.runtime_handle();
        let mut frames = 0;
        while runtime.has_pending_frame_callbacks() {
            if frames == MAX_IDLE_FRAMES {
                panic!("run_until_idle: frame callbacks still pending after {frames} frames");
            }
            self.advance_frame(FRAME_INTERVAL_NANOS);
            frames += 1;
        }
        log::trace!("idle after {frames} frames");
        frames
    }

    pub fn set_bottom_inset(&self, bottom: f32) {
        self.context()
            .insets()
            .set_safe_area(EdgeInsets::bottom(bottom));
    }

    /// Mount a recording field on this rule's context. The returned
    /// [`RecordingTextInput`] shares its recording with the mounted one.
    pub fn mount_field(
        &self,
        keyboard_name: &str,
    ) -> (KeyboardField<RecordingTextInput>, RecordingTextInput) {
        let input = RecordingTextInput::new();
        let field = KeyboardField::mount(self.context(), input.clone(), keyboard_name);
        (field, input)
    }
}

impl Default for KeyboardTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for tests that only need a rule for one closure.
pub fn run_keyboard_test<R>(f: impl FnOnce(&mut KeyboardTestRule) -> R) -> R {
    let mut rule = KeyboardTestRule::new();
    f(&mut rule)
}

/// User tap on `field`: focus request followed by the native notification.
pub fn tap_field<T: TextInput>(field: &mut KeyboardField<T>) {
    field.focus();
    field.handle_focus();
}

/// Genuine focus loss on `field`.
pub fn blur_field<T: TextInput>(field: &mut KeyboardField<T>) -> BlurOutcome {
    field.blur();
    field.handle_blur()
}

/// Find `label` on a rendered keyboard.
///
/// # Panics
/// Panics if the keyboard has no such key.
pub fn find_key<'a>(view: &'a KeyboardView, label: &str) -> &'a KeyButton {
    match view.find_key(label) {
        Some(key) => key,
        None => panic!("keyboard {:?} has no key {label:?}", view.name),
    }
}

/// Press and release `label`. Returns whether a callback received it.
pub fn press_key(view: &KeyboardView, label: &str) -> bool {
    let key = find_key(view, label);
    let delivered = key.press_in();
    key.press_out();
    delivered
}

/// Press `label` on a platform where the press makes `field` blur natively:
/// contact, then the press-induced blur, then release.
pub fn press_key_stealing_focus<T: TextInput>(
    view: &KeyboardView,
    label: &str,
    field: &KeyboardField<T>,
) -> BlurOutcome {
    let key = find_key(view, label);
    key.press_in();
    let outcome = field.handle_blur();
    key.press_out();
    outcome
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
