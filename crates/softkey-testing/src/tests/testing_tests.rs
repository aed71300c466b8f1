use super::*;
use crate::recording::TextInputCall;
use softkey_ui::{KeyLayout, Keyboard};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn advance_frame_moves_the_clock() {
    let mut rule = KeyboardTestRule::new();
    let ran = Rc::new(Cell::new(0u64));
    let seen = Rc::clone(&ran);
    rule.runtime_handle()
        .register_frame_callback(move |time| seen.set(time));

    assert_eq!(rule.advance_frame(5_000_000), 1);
    assert_eq!(ran.get(), 5_000_000);
    assert_eq!(rule.frame_time_nanos(), 5_000_000);
}

#[test]
fn advance_time_millis_steps_in_frames() {
    let mut rule = KeyboardTestRule::new();
    rule.advance_time_millis(40);
    assert_eq!(rule.frame_time_nanos(), 40_000_000);
}

#[test]
fn run_until_idle_counts_frames() {
    run_keyboard_test(|rule| {
        assert_eq!(rule.run_until_idle(), 0);
    });
}

#[test]
fn mounted_field_shares_its_recording() {
    let rule = KeyboardTestRule::new();
    let (mut field, input) = rule.mount_field("numeric");

    tap_field(&mut field);

    assert!(input.is_focused());
    assert!(!input.shows_soft_input_on_focus());
    assert_eq!(
        input.calls(),
        vec![
            TextInputCall::SetShowSoftInputOnFocus(false),
            TextInputCall::RequestFocus,
        ]
    );

    drop(field);
    assert!(input.shows_soft_input_on_focus());
}

#[test]
fn press_key_reports_delivery() {
    let rule = KeyboardTestRule::new();
    rule.context().show_keyboard("numeric");
    let view = Keyboard::new("numeric", KeyLayout::numeric())
        .render(rule.context())
        .expect("numeric is active");

    // No current field and no keyboard handler.
    assert!(!press_key(&view, "1"));
    assert!(!find_key(&view, "1").is_pressed());
}

#[test]
#[should_panic(expected = "has no key")]
fn find_key_panics_on_missing_label() {
    let rule = KeyboardTestRule::new();
    rule.context().show_keyboard("numeric");
    let view = Keyboard::new("numeric", KeyLayout::numeric())
        .render(rule.context())
        .expect("numeric is active");
    find_key(&view, "Q");
}
