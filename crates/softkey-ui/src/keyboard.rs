//! Keyed-layout renderer.
//!
//! A [`Keyboard`] is a named layout plus styling. Rendering it produces a
//! plain [`KeyboardView`] tree that a drawing backend walks; an inactive
//! keyboard renders to `None` without building a single key.

use crate::color::Color;
use crate::key::{display_text, KeyKind};
use crate::layouts::KeyLayout;
use smallvec::SmallVec;
use softkey_core::{KeyPressHandler, KeyboardContext};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Fixed spacing of the key grid, in logical pixels.
pub struct KeyboardMetrics;

impl KeyboardMetrics {
    pub const CONTAINER_PADDING: f32 = 12.0;
    pub const ROW_SPACING: f32 = 8.0;
    pub const KEY_HORIZONTAL_MARGIN: f32 = 3.0;
    pub const KEY_CORNER_RADIUS: f32 = 8.0;
}

/// Styling of one keyboard. Every field defaults independently.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardOptions {
    pub key_height: f32,
    /// Height of the whole keyboard; `None` sizes it from the host.
    pub container_height: Option<f32>,
    /// Background behind the keys; `None` inherits the host background.
    pub container_background: Option<Color>,
    pub key_color: Color,
    pub key_pressed_color: Color,
    pub text_color: Color,
    pub font_size: f32,
}

impl Default for KeyboardOptions {
    fn default() -> Self {
        Self {
            key_height: 56.0,
            container_height: None,
            container_background: None,
            key_color: Color::from_rgb_u8(0x22, 0x22, 0x22),
            key_pressed_color: Color::from_rgb_u8(0x33, 0x33, 0x33),
            text_color: Color::WHITE,
            font_size: 18.0,
        }
    }
}

/// A named, styled key layout.
#[derive(Clone)]
pub struct Keyboard {
    name: String,
    layout: KeyLayout,
    options: KeyboardOptions,
    on_key_press: Option<KeyPressHandler>,
    press_steals_focus: bool,
}

impl Keyboard {
    pub fn new(name: impl Into<String>, layout: impl Into<KeyLayout>) -> Self {
        Self {
            name: name.into(),
            layout: layout.into(),
            options: KeyboardOptions::default(),
            on_key_press: None,
            press_steals_focus: false,
        }
    }

    pub fn with_options(mut self, options: KeyboardOptions) -> Self {
        self.options = options;
        self
    }

    /// Receive every key press of this keyboard. Without one, presses go to
    /// the focused field's own key press callback.
    pub fn on_key_press(mut self, handler: impl Fn(&str) + 'static) -> Self {
        self.on_key_press = Some(Rc::new(handler));
        self
    }

    /// Declare that pressing a key makes the native field blur on this
    /// platform, so each press suppresses that one blur.
    pub fn press_steals_focus(mut self, steals: bool) -> Self {
        self.press_steals_focus = steals;
        self
    }

    pub fn key_height(mut self, height: f32) -> Self {
        self.options.key_height = height;
        self
    }

    pub fn container_height(mut self, height: f32) -> Self {
        self.options.container_height = Some(height);
        self
    }

    pub fn container_background(mut self, color: Color) -> Self {
        self.options.container_background = Some(color);
        self
    }

    pub fn key_color(mut self, color: Color) -> Self {
        self.options.key_color = color;
        self
    }

    pub fn key_pressed_color(mut self, color: Color) -> Self {
        self.options.key_pressed_color = color;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.options.text_color = color;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.options.font_size = size;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    pub fn options(&self) -> &KeyboardOptions {
        &self.options
    }

    /// Declared container height, if any. Zero counts as undeclared.
    pub fn declared_height(&self) -> Option<f32> {
        self.options.container_height.filter(|height| *height > 0.0)
    }

    pub fn is_active(&self, context: &KeyboardContext) -> bool {
        context.visibility().is_active(&self.name)
    }

    /// Build the key grid, or `None` when this keyboard is not the active one.
    pub fn render(&self, context: &KeyboardContext) -> Option<KeyboardView> {
        if !self.is_active(context) {
            return None;
        }
        Some(self.build_view(context))
    }

    fn build_view(&self, context: &KeyboardContext) -> KeyboardView {
        let dispatch = Rc::new(KeyDispatch {
            context: context.clone(),
            keyboard_name: self.name.clone(),
            on_key_press: self.on_key_press.clone(),
            press_steals_focus: self.press_steals_focus,
        });
        let options = &self.options;

        let rows = self
            .layout
            .rows()
            .iter()
            .map(|labels| KeyRowView {
                keys: labels
                    .iter()
                    .map(|label| match KeyKind::of(label) {
                        KeyKind::Filler => KeyView::Filler(FillerView {
                            weight: KeyKind::Filler.weight(),
                            height: options.key_height,
                        }),
                        kind => KeyView::Key(KeyButton {
                            label: label.clone(),
                            kind,
                            weight: kind.weight(),
                            height: options.key_height,
                            key_color: options.key_color,
                            pressed_color: options.key_pressed_color,
                            text_color: options.text_color,
                            font_size: options.font_size,
                            pressed: Cell::new(false),
                            dispatch: Rc::clone(&dispatch),
                        }),
                    })
                    .collect(),
            })
            .collect();

        KeyboardView {
            name: self.name.clone(),
            height: self.declared_height(),
            background: options.container_background,
            rows,
        }
    }
}

impl fmt::Debug for Keyboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyboard")
            .field("name", &self.name)
            .field("rows", &self.layout.row_count())
            .field("options", &self.options)
            .field("press_steals_focus", &self.press_steals_focus)
            .finish()
    }
}

struct KeyDispatch {
    context: KeyboardContext,
    keyboard_name: String,
    on_key_press: Option<KeyPressHandler>,
    press_steals_focus: bool,
}

impl KeyDispatch {
    fn dispatch(&self, key: &str) -> bool {
        if !self.context.visibility().is_active(&self.keyboard_name) {
            log::warn!(
                "press on {key:?} ignored: keyboard {:?} is no longer active",
                self.keyboard_name
            );
            return false;
        }
        if self.press_steals_focus {
            self.context.suppress_next_blur();
        }
        match &self.on_key_press {
            Some(handler) => {
                handler(key);
                true
            }
            None => self.context.dispatch_key_press(key),
        }
    }
}

/// Rendered keyboard.
#[derive(Debug)]
pub struct KeyboardView {
    pub name: String,
    /// Declared container height, if any.
    pub height: Option<f32>,
    /// Container background; `None` means inherit.
    pub background: Option<Color>,
    pub rows: Vec<KeyRowView>,
}

impl KeyboardView {
    /// Pressable keys in row-major order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyButton> + '_ {
        self.rows.iter().flat_map(|row| {
            row.keys.iter().filter_map(|key| match key {
                KeyView::Key(button) => Some(button),
                KeyView::Filler(_) => None,
            })
        })
    }

    pub fn find_key(&self, label: &str) -> Option<&KeyButton> {
        self.keys().find(|key| key.label() == label)
    }

    pub fn interactive_key_count(&self) -> usize {
        self.keys().count()
    }

    /// Height the grid needs when no container height is declared.
    pub fn content_height(&self) -> f32 {
        let rows: SmallVec<[f32; 8]> = self
            .rows
            .iter()
            .map(|row| row.keys.iter().map(KeyView::height).fold(0.0, f32::max))
            .collect();
        let spacing = KeyboardMetrics::ROW_SPACING * rows.len() as f32;
        rows.iter().sum::<f32>() + spacing + 2.0 * KeyboardMetrics::CONTAINER_PADDING
    }
}

#[derive(Debug)]
pub struct KeyRowView {
    pub keys: Vec<KeyView>,
}

impl KeyRowView {
    /// Sum of flex weights, fillers included.
    pub fn total_weight(&self) -> f32 {
        self.keys.iter().map(KeyView::weight).sum()
    }
}

#[derive(Debug)]
pub enum KeyView {
    /// Spacing sized like a real key; not pressable.
    Filler(FillerView),
    Key(KeyButton),
}

impl KeyView {
    pub fn weight(&self) -> f32 {
        match self {
            KeyView::Filler(filler) => filler.weight,
            KeyView::Key(button) => button.weight,
        }
    }

    pub fn height(&self) -> f32 {
        match self {
            KeyView::Filler(filler) => filler.height,
            KeyView::Key(button) => button.height,
        }
    }

    pub fn as_button(&self) -> Option<&KeyButton> {
        match self {
            KeyView::Key(button) => Some(button),
            KeyView::Filler(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillerView {
    pub weight: f32,
    pub height: f32,
}

/// One pressable key.
///
/// Presses fire on initial contact ([`KeyButton::press_in`]); release only
/// clears the pressed feedback.
pub struct KeyButton {
    label: String,
    kind: KeyKind,
    weight: f32,
    height: f32,
    key_color: Color,
    pressed_color: Color,
    text_color: Color,
    font_size: f32,
    pressed: Cell<bool>,
    dispatch: Rc<KeyDispatch>,
}

impl KeyButton {
    /// The label delivered to callbacks.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The text drawn on the key.
    pub fn display_text(&self) -> &str {
        display_text(&self.label)
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn text_color(&self) -> Color {
        self.text_color
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn corner_radius(&self) -> f32 {
        KeyboardMetrics::KEY_CORNER_RADIUS
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed.get()
    }

    pub fn background(&self) -> Color {
        if self.pressed.get() {
            self.pressed_color
        } else {
            self.key_color
        }
    }

    /// Contact began: emit the label, then show pressed feedback.
    ///
    /// Returns whether a callback received the key.
    pub fn press_in(&self) -> bool {
        let delivered = self.dispatch.dispatch(&self.label);
        self.pressed.set(true);
        delivered
    }

    /// Contact ended.
    pub fn press_out(&self) {
        self.pressed.set(false);
    }
}

impl fmt::Debug for KeyButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyButton")
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("weight", &self.weight)
            .field("pressed", &self.pressed.get())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/keyboard_tests.rs"]
mod tests;
