//! Scripted keyboard session.
//!
//! Mounts an amount field on the numeric pad and a name field on the alpha
//! layout, then types into both the way a user would: tap, press keys (each
//! press blurs the native field, as it does on touch platforms), tap away.
//! Frames are driven by the wall clock at roughly 60 Hz. Run with
//! `RUST_LOG=debug` to see every registry and visibility transition.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use softkey_core::{
    Clock, EdgeInsets, KeyboardProvider, RuntimeHandle, RuntimeScheduler, SystemClock,
};
use softkey_ui::{
    use_keyboard_input, Color, HostOptions, Keyboard, KeyboardField, KeyboardHost, KeyboardView,
    TextInput, ALPHA_LAYOUT, BACKSPACE, NUMERIC_LAYOUT, SPACE,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 120;

/// Stand-in for a platform text field.
#[derive(Default)]
struct DemoTextInput {
    label: &'static str,
    value: String,
    focused: bool,
    native_keyboard: bool,
}

impl DemoTextInput {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            native_keyboard: true,
            ..Self::default()
        }
    }
}

impl TextInput for DemoTextInput {
    fn set_show_soft_input_on_focus(&mut self, show: bool) {
        let state = if show { "on" } else { "off" };
        log::debug!("{}: native keyboard {state}", self.label);
        self.native_keyboard = show;
    }

    fn request_focus(&mut self) {
        self.focused = true;
    }

    fn request_blur(&mut self) {
        self.focused = false;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

/// Raises a flag whenever the runtime wants a frame.
#[derive(Default)]
struct FrameRequest {
    pending: AtomicBool,
}

impl RuntimeScheduler for FrameRequest {
    fn schedule_frame(&self) {
        self.pending.store(true, Ordering::Release);
    }
}

struct FrameLoop {
    runtime: RuntimeHandle,
    request: Arc<FrameRequest>,
    clock: SystemClock,
    started: <SystemClock as Clock>::Instant,
}

impl FrameLoop {
    fn new(runtime: RuntimeHandle, request: Arc<FrameRequest>) -> Self {
        let clock = SystemClock;
        Self {
            runtime,
            request,
            started: clock.now(),
            clock,
        }
    }

    /// Render frames until the runtime has nothing left to animate.
    fn run_until_idle(&self, host: &KeyboardHost) {
        if !self.request.pending.swap(false, Ordering::AcqRel) {
            return;
        }
        let mut frames = 0;
        while self.runtime.has_pending_frame_callbacks() && frames < MAX_FRAMES {
            std::thread::sleep(FRAME_INTERVAL);
            let now = self.clock.elapsed_nanos(self.started);
            self.runtime.drain_frame_callbacks(now);
            frames += 1;
            log::trace!("frame {frames}: offset {:.1}", host.offset());
        }
        self.request.pending.store(false, Ordering::Release);
        log::info!(
            "host settled after {frames} frames at offset {:.1} of {:.1}",
            host.offset(),
            host.total_height()
        );
    }
}

fn type_keys<T: TextInput>(field: &KeyboardField<T>, keys: &[&str], view: &KeyboardView) {
    for label in keys {
        let Some(key) = view.find_key(label) else {
            log::warn!("keyboard {:?} has no key {label:?}", view.name);
            continue;
        };
        key.press_in();
        field.handle_blur();
        key.press_out();
    }
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let request = Arc::new(FrameRequest::default());
    let runtime = RuntimeHandle::with_scheduler(request.clone());
    let provider = KeyboardProvider::with_runtime(runtime.clone());
    let context = provider.context().clone();
    let frames = FrameLoop::new(runtime, request);

    context.insets().set_safe_area(EdgeInsets::bottom(34.0));

    let host = KeyboardHost::with_options(
        &context,
        vec![
            Keyboard::new("numeric", NUMERIC_LAYOUT)
                .container_height(240.0)
                .press_steals_focus(true),
            Keyboard::new("alpha", ALPHA_LAYOUT)
                .key_height(48.0)
                .key_color(Color::from_rgb_u8(0x2a, 0x2a, 0x2e))
                .press_steals_focus(true),
        ],
        HostOptions::default(),
    );

    let (amount, on_amount_key, _) = use_keyboard_input("");
    let (name, on_name_key, set_name) = use_keyboard_input("");
    let mut amount_field = KeyboardField::mount(&context, DemoTextInput::new("amount"), "numeric")
        .with_on_custom_key_press(move |key| on_amount_key(key));
    let mut name_field = KeyboardField::mount(&context, DemoTextInput::new("name"), "alpha")
        .with_on_custom_key_press(move |key| on_name_key(key));

    log::info!("tap amount field");
    amount_field.focus();
    amount_field.handle_focus();
    frames.run_until_idle(&host);
    if let Some(view) = host.frame().content {
        type_keys(&amount_field, &["1", "2", "5", BACKSPACE, ".", "5"], &view);
    }
    log::info!("amount = {:?}", amount.get());

    log::info!("tap name field");
    amount_field.blur();
    amount_field.handle_blur();
    name_field.focus();
    name_field.handle_focus();
    frames.run_until_idle(&host);
    if let Some(view) = host.frame().content {
        let name_keys = ["A", "N", "A", SPACE, "P", "E", "Ñ", "A"];
        type_keys(&name_field, &name_keys, &view);
    }
    log::info!("name = {:?}", name.get());

    log::info!("tap outside");
    name_field.blur();
    name_field.handle_blur();
    frames.run_until_idle(&host);

    provider.provide(|| {
        let keyboard = softkey_core::use_keyboard();
        let active = keyboard.active_keyboard();
        log::info!("active keyboard after session: {active:?}");
    });

    set_name(String::new());
    drop(name_field);
    drop(amount_field);

    println!("amount: {}", amount.get());
    println!("name cleared: {:?}", name.get());
}
