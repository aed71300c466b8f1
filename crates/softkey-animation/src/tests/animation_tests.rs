use super::*;

const FRAME_NANOS: u64 = 16_666_667;

fn run_frames(runtime: &RuntimeHandle, start: &mut u64, frames: usize) {
    for _ in 0..frames {
        *start += FRAME_NANOS;
        runtime.drain_frame_callbacks(*start);
    }
}

#[test]
fn animate_to_interpolates_and_settles_on_target() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(300.0f32, runtime.clone());

    offset.animate_to(0.0, AnimationSpec::keyboard_slide());
    assert!(offset.is_running());

    let mut time = 0;
    let mut saw_midpoint = false;
    for _ in 0..64 {
        if !runtime.has_pending_frame_callbacks() {
            break;
        }
        run_frames(&runtime, &mut time, 1);
        let value = offset.value();
        if value > 0.0 && value < 300.0 {
            saw_midpoint = true;
        }
    }

    assert!(saw_midpoint, "animation should report intermediate values");
    assert_eq!(offset.value(), 0.0);
    assert_eq!(offset.state().get(), 0.0);
    assert!(!offset.is_running());
}

#[test]
fn tween_finishes_after_its_duration() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(0.0f32, runtime.clone());
    offset.animate_to(100.0, AnimationSpec::linear(250));

    // First frame pins the start time.
    runtime.drain_frame_callbacks(1_000_000_000);
    assert_eq!(offset.value(), 0.0);

    runtime.drain_frame_callbacks(1_125_000_000);
    assert!((offset.value() - 50.0).abs() < 0.01);

    runtime.drain_frame_callbacks(1_250_000_000);
    assert_eq!(offset.value(), 100.0);
    assert!(!runtime.has_pending_frame_callbacks());
}

#[test]
fn retarget_mid_flight_continues_from_current_value() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(0.0f32, runtime.clone());
    offset.animate_to(200.0, AnimationSpec::linear(200));

    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(100_000_000);
    let reached = offset.value();
    assert!((reached - 100.0).abs() < 0.01);

    offset.animate_to(0.0, AnimationSpec::linear(200));
    assert_eq!(offset.target(), 0.0);

    // The redirected tween starts where the old one stopped, not at 0 or 200.
    runtime.drain_frame_callbacks(116_000_000);
    assert!((offset.value() - reached).abs() < 0.01);

    runtime.drain_frame_callbacks(216_000_000);
    assert!((offset.value() - 50.0).abs() < 0.01);

    runtime.drain_frame_callbacks(316_000_000);
    assert_eq!(offset.value(), 0.0);
}

#[test]
fn retarget_does_not_leave_two_callbacks_in_flight() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(0.0f32, runtime.clone());

    offset.animate_to(10.0, AnimationSpec::linear(100));
    offset.animate_to(20.0, AnimationSpec::linear(100));
    offset.animate_to(30.0, AnimationSpec::linear(100));

    assert_eq!(runtime.drain_frame_callbacks(0), 1);
}

#[test]
fn snap_to_cancels_running_animation() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(0.0f32, runtime.clone());
    offset.animate_to(100.0, AnimationSpec::linear(100));

    offset.snap_to(42.0);

    assert!(!offset.is_running());
    assert!(!runtime.has_pending_frame_callbacks());
    assert_eq!(offset.value(), 42.0);
    assert_eq!(offset.state().get(), 42.0);
}

#[test]
fn animate_to_current_value_while_idle_schedules_nothing() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(5.0f32, runtime.clone());

    offset.animate_to(5.0, AnimationSpec::default());

    assert!(!offset.is_running());
    assert!(!runtime.has_pending_frame_callbacks());
}

#[test]
fn retarget_to_current_value_mid_flight_settles_immediately() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(0.0f32, runtime.clone());
    offset.animate_to(100.0, AnimationSpec::linear(250));
    assert!(offset.is_running());

    offset.animate_to(0.0, AnimationSpec::linear(250));

    assert!(!offset.is_running());
    assert!(!runtime.has_pending_frame_callbacks());
    assert_eq!(offset.value(), 0.0);
    assert_eq!(offset.target(), 0.0);
}

#[test]
fn delay_holds_the_start_value() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(0.0f32, runtime.clone());
    offset.animate_to(10.0, AnimationSpec::linear(100).with_delay(50));

    runtime.drain_frame_callbacks(0);
    runtime.drain_frame_callbacks(40_000_000);
    assert_eq!(offset.value(), 0.0);

    runtime.drain_frame_callbacks(100_000_000);
    assert!((offset.value() - 5.0).abs() < 0.01);
}

#[test]
fn dropped_animatable_stops_scheduling() {
    let runtime = RuntimeHandle::new();
    let offset = Animatable::new(0.0f32, runtime.clone());
    offset.animate_to(10.0, AnimationSpec::linear(100));

    drop(offset);

    assert!(!runtime.has_pending_frame_callbacks());
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
    ];

    for easing in easings {
        assert!(easing.transform(0.0).abs() < 0.01, "start of {easing:?}");
        assert!(
            (easing.transform(1.0) - 1.0).abs() < 0.01,
            "end of {easing:?}"
        );
    }
}

#[test]
fn ease_in_out_is_symmetric() {
    let early = Easing::EaseInOut.transform(0.25);
    let late = Easing::EaseInOut.transform(0.75);
    assert!((early + late - 1.0).abs() < 0.01);
    assert!((Easing::EaseInOut.transform(0.5) - 0.5).abs() < 0.01);
}

#[test]
fn keyboard_slide_is_fixed_duration() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, KEYBOARD_SLIDE_MILLIS);
    assert_eq!(spec.easing, Easing::EaseInOut);
    assert_eq!(spec.delay_millis, 0);
}
