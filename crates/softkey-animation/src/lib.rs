//! Time-based animations for softkey.
//!
//! An [`Animatable`] holds one value and moves it toward a target over
//! successive frames of a [`softkey_core::FrameClock`]. Calling
//! [`Animatable::animate_to`] while an animation is running redirects it:
//! the new tween starts from the value reached so far, never from the old
//! start, so the output stays continuous.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use softkey_core::{FrameCallbackRegistration, MutableState, RuntimeHandle, State, Subscription};

/// Duration of keyboard slide-in / slide-out transitions.
pub const KEYBOARD_SLIDE_MILLIS: u64 = 250;

/// Types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Easing curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    /// Symmetric cubic ease; the default for keyboard slides.
    EaseInOut,
    /// Material "standard" curve.
    FastOutSlowIn,
}

impl Easing {
    /// Map a linear fraction in `[0, 1]` onto the curve.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction.clamp(0.0, 1.0),
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Evaluate the CSS-style cubic bezier `(x1, y1, x2, y2)` at x = `fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let curve = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let slope = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson for the parameter t whose x equals `fraction`, with
    // bisection as the fallback when the slope flattens out.
    let mut t = fraction;
    let mut solved = false;
    for _ in 0..8 {
        let error = curve(ax, bx, cx, t) - fraction;
        if error.abs() < 1e-6 {
            solved = true;
            break;
        }
        let dx = slope(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - error / dx).clamp(0.0, 1.0);
    }

    if !solved {
        let (mut low, mut high) = (0.0f32, 1.0f32);
        t = fraction;
        for _ in 0..16 {
            let error = curve(ax, bx, cx, t) - fraction;
            if error.abs() < 1e-6 {
                break;
            }
            if error > 0.0 {
                high = t;
            } else {
                low = t;
            }
            t = 0.5 * (low + high);
        }
    }

    curve(ay, by, cy, t)
}

/// Tween configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    /// The fixed-duration slide used for every keyboard show and hide,
    /// whatever the distance.
    pub fn keyboard_slide() -> Self {
        Self::tween(KEYBOARD_SLIDE_MILLIS, Easing::EaseInOut)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::keyboard_slide()
    }
}

/// A value animated across frames.
pub struct Animatable<T: Lerp + Clone + PartialEq + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: Lerp + Clone + PartialEq + 'static> {
    state: MutableState<T>,
    runtime: RuntimeHandle,
    current: T,
    start: T,
    target: T,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
}

impl<T: Lerp + Clone + PartialEq + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            state: MutableState::new(initial.clone()),
            runtime,
            current: initial.clone(),
            start: initial.clone(),
            target: initial,
            spec: AnimationSpec::default(),
            start_time_nanos: None,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate toward `target`, redirecting any animation in flight.
    pub fn animate_to(&self, target: T, spec: AnimationSpec) {
        {
            let mut inner = self.inner.borrow_mut();

            if inner.current == target {
                if let Some(registration) = inner.registration.take() {
                    log::trace!("animation retargeted to its current value, settling");
                    registration.cancel();
                }
                inner.start = target.clone();
                inner.target = target;
                inner.spec = spec;
                inner.start_time_nanos = None;
                return;
            }

            if let Some(registration) = inner.registration.take() {
                log::trace!("animation retargeted mid-flight");
                registration.cancel();
            }

            inner.start = inner.current.clone();
            inner.target = target;
            inner.spec = spec;
            inner.start_time_nanos = None;
        }

        Self::schedule_frame(&self.inner);
    }

    /// Jump to `target` immediately, cancelling any animation.
    pub fn snap_to(&self, target: T) {
        let state = {
            let mut inner = self.inner.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            inner.start_time_nanos = None;
            inner.state.clone()
        };
        state.set(target);
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn spec(&self) -> AnimationSpec {
        self.inner.borrow().spec
    }

    /// Whether a frame is pending for this animation.
    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    pub fn state(&self) -> State<T> {
        self.inner.borrow().state.as_state()
    }

    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        self.inner.borrow().state.subscribe(listener)
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let (state, value, schedule_next) = {
            let mut inner = this.borrow_mut();
            inner.registration = None;

            let spec = inner.spec;
            let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
            let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
            let delay_nanos = spec.delay_millis * 1_000_000;

            if elapsed_nanos < delay_nanos {
                (inner.state.clone(), inner.current.clone(), true)
            } else {
                let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                let linear_progress = ((elapsed_nanos - delay_nanos) as f32
                    / duration_nanos as f32)
                    .clamp(0.0, 1.0);

                if linear_progress >= 1.0 {
                    log::trace!("animation settled after {elapsed_nanos}ns");
                    inner.current = inner.target.clone();
                    inner.start = inner.target.clone();
                    inner.start_time_nanos = None;
                    (inner.state.clone(), inner.current.clone(), false)
                } else {
                    let progress = spec.easing.transform(linear_progress);
                    inner.current = inner.start.lerp(&inner.target, progress);
                    (inner.state.clone(), inner.current.clone(), true)
                }
            }
        };

        if schedule_next {
            Self::schedule_frame(this);
        }
        // Published last: subscribers may call back into this animatable.
        state.set(value);
    }
}

impl<T: Lerp + Clone + PartialEq + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Lerp + Clone + PartialEq + fmt::Debug + 'static> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("current", &inner.current)
            .field("target", &inner.target)
            .field("running", &inner.registration.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
