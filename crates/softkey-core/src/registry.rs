//! Field registry.
//!
//! Maps each mounted field to the keyboard it opens and the callback that
//! receives its key presses, and tracks which field currently owns the custom
//! keyboard. The registry never owns a field: entries are added when a field
//! mounts and removed by the field itself when it is dropped.

use crate::blur_guard::BlurGuard;
use crate::collections::map::HashMap;
use crate::id::FieldId;
use std::fmt;
use std::rc::Rc;

/// Callback receiving raw key labels, sentinels included.
pub type KeyPressHandler = Rc<dyn Fn(&str)>;

/// What the registry knows about one field.
#[derive(Clone)]
pub struct FieldMetadata {
    pub keyboard_name: String,
    pub on_key_press: Option<KeyPressHandler>,
    blur_guard: BlurGuard,
}

impl FieldMetadata {
    pub fn new(keyboard_name: impl Into<String>) -> Self {
        Self {
            keyboard_name: keyboard_name.into(),
            on_key_press: None,
            blur_guard: BlurGuard::new(),
        }
    }

    pub fn with_key_press(mut self, handler: KeyPressHandler) -> Self {
        self.on_key_press = Some(handler);
        self
    }

    /// Share `guard` with the field that owns it.
    pub fn with_blur_guard(mut self, guard: BlurGuard) -> Self {
        self.blur_guard = guard;
        self
    }

    pub fn blur_guard(&self) -> &BlurGuard {
        &self.blur_guard
    }

    /// Invoke the key press callback, if any. Returns whether one ran.
    pub fn dispatch(&self, key: &str) -> bool {
        match &self.on_key_press {
            Some(handler) => {
                handler(key);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for FieldMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldMetadata")
            .field("keyboard_name", &self.keyboard_name)
            .field("has_key_press", &self.on_key_press.is_some())
            .field("blur_guard", &self.blur_guard.state())
            .finish()
    }
}

/// Handle → metadata store plus the current field reference.
///
/// Invariant: `current`, when set through [`InputRegistry::set_current`] to a
/// registered handle, is cleared by [`InputRegistry::unregister`] of that
/// handle. A dangling `set_current` is tolerated and simply has no metadata.
#[derive(Default)]
pub struct InputRegistry {
    entries: HashMap<FieldId, FieldMetadata>,
    current: Option<FieldId>,
}

impl InputRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the metadata for `field`.
    pub fn register(&mut self, field: FieldId, metadata: FieldMetadata) {
        log::debug!("register {field} -> keyboard {:?}", metadata.keyboard_name);
        self.entries.insert(field, metadata);
    }

    /// Remove `field`. Clears the current reference if it pointed at `field`.
    ///
    /// Unknown handles are a no-op.
    pub fn unregister(&mut self, field: FieldId) -> Option<FieldMetadata> {
        let removed = self.entries.remove(&field);
        if self.current == Some(field) {
            log::debug!("unregister {field} clears current field");
            self.current = None;
        }
        removed
    }

    pub fn set_current(&mut self, field: Option<FieldId>) {
        if let Some(id) = field {
            if !self.entries.contains_key(&id) {
                log::warn!("{id} set as current field before registering");
            }
        }
        self.current = field;
    }

    pub fn current(&self) -> Option<FieldId> {
        self.current
    }

    pub fn metadata(&self, field: FieldId) -> Option<&FieldMetadata> {
        self.entries.get(&field)
    }

    pub fn current_metadata(&self) -> Option<&FieldMetadata> {
        self.current.and_then(|field| self.entries.get(&field))
    }

    pub fn is_registered(&self, field: FieldId) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for InputRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputRegistry")
            .field("fields", &self.entries.len())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/registry_tests.rs"]
mod tests;
