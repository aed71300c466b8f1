use super::*;

use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn set_notifies_subscribers_synchronously() {
    let state = MutableState::new(0);
    let seen = Rc::new(RefCell::new(Vec::new()));

    let _subscription = {
        let seen = Rc::clone(&seen);
        state.subscribe(move |value| seen.borrow_mut().push(*value))
    };

    assert!(state.set(1));
    assert_eq!(*seen.borrow(), vec![1]);
    assert!(state.set(2));
    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn equal_write_is_silent() {
    let state = MutableState::new(String::from("numeric"));
    let count = Rc::new(Cell::new(0));

    let _subscription = {
        let count = Rc::clone(&count);
        state.subscribe(move |_| count.set(count.get() + 1))
    };

    assert!(!state.set(String::from("numeric")));
    assert_eq!(count.get(), 0);
}

#[test]
fn dropping_subscription_unsubscribes() {
    let state = MutableState::new(0);
    let count = Rc::new(Cell::new(0));

    let subscription = {
        let count = Rc::clone(&count);
        state.subscribe(move |_| count.set(count.get() + 1))
    };
    assert_eq!(state.subscriber_count(), 1);

    state.set(1);
    drop(subscription);
    state.set(2);

    assert_eq!(count.get(), 1);
    assert_eq!(state.subscriber_count(), 0);
}

#[test]
fn listener_can_read_state_during_notification() {
    let state = MutableState::new(1);
    let observed = Rc::new(Cell::new(0));

    let _subscription = {
        let reader = state.as_state();
        let observed = Rc::clone(&observed);
        state.subscribe(move |_| observed.set(reader.get()))
    };

    state.set(5);
    assert_eq!(observed.get(), 5);
}

#[test]
fn listener_can_unsubscribe_another_listener_mid_notification() {
    let state = MutableState::new(0);
    let victim_calls = Rc::new(Cell::new(0));
    let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let _killer = {
        let victim_slot = Rc::clone(&victim_slot);
        state.subscribe(move |_| {
            victim_slot.borrow_mut().take();
        })
    };
    let victim = {
        let victim_calls = Rc::clone(&victim_calls);
        state.subscribe(move |_| victim_calls.set(victim_calls.get() + 1))
    };
    victim_slot.borrow_mut().replace(victim);

    // The copied listener list still reaches the victim once.
    state.set(1);
    state.set(2);
    assert_eq!(victim_calls.get(), 1);
}

#[test]
fn update_applies_closure() {
    let state = MutableState::new(String::from("4"));
    assert!(state.update(|value| value.push('2')));
    assert_eq!(state.get(), "42");
    assert!(!state.update(|_| {}));
}
