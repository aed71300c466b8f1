//! Animated container for the keyboards of a screen.
//!
//! The host picks the keyboard whose name is active and slides a single
//! container in from below the visible area. Its vertical offset is one
//! retargetable [`Animatable`]: `0` is fully shown and the container's total
//! height is fully hidden, so a show that interrupts a hide simply redirects
//! from wherever the container currently is.

use crate::color::Color;
use crate::keyboard::{Keyboard, KeyboardView};
use softkey_animation::{Animatable, AnimationSpec};
use softkey_core::{KeyboardContext, State, Subscription};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Host-wide defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostOptions {
    /// Keyboard height used when the selected keyboard declares none.
    pub height: f32,
    pub background: Color,
    pub animation: AnimationSpec,
}

impl HostOptions {
    pub const DEFAULT_HEIGHT: f32 = 280.0;
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            height: Self::DEFAULT_HEIGHT,
            background: Color::from_rgb_u8(0x11, 0x11, 0x11),
            animation: AnimationSpec::keyboard_slide(),
        }
    }
}

struct HostInner {
    context: KeyboardContext,
    options: HostOptions,
    keyboards: Vec<Keyboard>,
    offset: Animatable<f32>,
    selected: Option<usize>,
    total_height: f32,
    target_offset: f32,
}

impl HostInner {
    fn sync(this: &Rc<RefCell<HostInner>>) {
        let (offset, target, spec) = {
            let mut host = this.borrow_mut();
            let active = host.context.active_keyboard();
            let selected = active
                .as_deref()
                .and_then(|name| host.keyboards.iter().position(|kb| kb.name() == name));
            if let (Some(name), None) = (active.as_deref(), selected) {
                log::warn!("no keyboard named {name:?} in host");
            }

            let base_height = selected
                .and_then(|index| host.keyboards[index].declared_height())
                .unwrap_or(host.options.height);
            let total_height = base_height + host.context.insets().bottom();
            let target = if active.is_some() { 0.0 } else { total_height };

            host.selected = selected;
            host.total_height = total_height;
            if target == host.target_offset {
                return;
            }
            host.target_offset = target;
            (host.offset.clone(), target, host.options.animation)
        };
        log::debug!("keyboard host sliding to offset {target}");
        offset.animate_to(target, spec);
    }
}

pub struct KeyboardHost {
    inner: Rc<RefCell<HostInner>>,
    _subscriptions: [Subscription; 2],
}

impl KeyboardHost {
    pub fn new(context: &KeyboardContext, keyboards: Vec<Keyboard>) -> Self {
        Self::with_options(context, keyboards, HostOptions::default())
    }

    /// Build a host that starts fully hidden, then immediately slides in if a
    /// keyboard is already active.
    pub fn with_options(
        context: &KeyboardContext,
        keyboards: Vec<Keyboard>,
        options: HostOptions,
    ) -> Self {
        let hidden = options.height + context.insets().bottom();
        let inner = Rc::new(RefCell::new(HostInner {
            context: context.clone(),
            options,
            keyboards,
            offset: Animatable::new(hidden, context.runtime()),
            selected: None,
            total_height: hidden,
            target_offset: hidden,
        }));

        let weak = Rc::downgrade(&inner);
        let on_visibility = context.subscribe_active_keyboard(move |_| resync(&weak));
        let weak = Rc::downgrade(&inner);
        let on_insets = context.insets().subscribe(move |_| resync(&weak));

        HostInner::sync(&inner);
        Self {
            inner,
            _subscriptions: [on_visibility, on_insets],
        }
    }

    pub fn set_keyboards(&self, keyboards: Vec<Keyboard>) {
        self.inner.borrow_mut().keyboards = keyboards;
        HostInner::sync(&self.inner);
    }

    pub fn set_options(&self, options: HostOptions) {
        self.inner.borrow_mut().options = options;
        HostInner::sync(&self.inner);
    }

    pub fn options(&self) -> HostOptions {
        self.inner.borrow().options
    }

    /// Name of the keyboard currently selected for display.
    pub fn selected_keyboard(&self) -> Option<String> {
        let inner = self.inner.borrow();
        inner
            .selected
            .map(|index| inner.keyboards[index].name().to_owned())
    }

    /// Container height, bottom inset included.
    pub fn total_height(&self) -> f32 {
        self.inner.borrow().total_height
    }

    /// Current vertical offset from the fully shown position.
    pub fn offset(&self) -> f32 {
        self.inner.borrow().offset.value()
    }

    pub fn target_offset(&self) -> f32 {
        self.inner.borrow().target_offset
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().offset.is_running()
    }

    pub fn is_shown(&self) -> bool {
        !self.is_animating() && self.offset() == 0.0
    }

    pub fn is_hidden(&self) -> bool {
        let inner = self.inner.borrow();
        !inner.offset.is_running() && inner.offset.value() >= inner.total_height
    }

    pub fn offset_state(&self) -> State<f32> {
        self.inner.borrow().offset.state()
    }

    /// Snapshot of the container for drawing.
    pub fn frame(&self) -> HostFrame {
        let inner = self.inner.borrow();
        let bottom_padding = inner.context.insets().bottom();
        let content = inner
            .selected
            .and_then(|index| inner.keyboards[index].render(&inner.context));
        HostFrame {
            offset_y: inner.offset.value(),
            height: inner.total_height,
            background: inner.options.background,
            bottom_padding,
            content_height: inner.total_height - bottom_padding,
            content,
        }
    }
}

fn resync(weak: &Weak<RefCell<HostInner>>) {
    if let Some(inner) = weak.upgrade() {
        HostInner::sync(&inner);
    }
}

impl fmt::Debug for KeyboardHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("KeyboardHost")
            .field("keyboards", &inner.keyboards.len())
            .field("selected", &inner.selected)
            .field("total_height", &inner.total_height)
            .field("offset", &inner.offset)
            .finish()
    }
}

/// One drawable state of the host container.
#[derive(Debug)]
pub struct HostFrame {
    /// Downward translation; `0` is fully shown, `height` fully hidden.
    pub offset_y: f32,
    pub height: f32,
    pub background: Color,
    /// Safe-area space reserved below the keyboard, selected or not.
    pub bottom_padding: f32,
    pub content_height: f32,
    pub content: Option<KeyboardView>,
}

#[cfg(test)]
#[path = "tests/host_tests.rs"]
mod tests;
