//! The coordination object shared by every field, keyboard and host.
//!
//! A `KeyboardContext` bundles the field registry, the visibility state, the
//! window insets and the frame runtime. It is created explicitly (directly or
//! through [`KeyboardProvider`](crate::KeyboardProvider)) and handed to each
//! participant; there is no process-wide instance.

use crate::blur_guard::BlurGuard;
use crate::id::FieldId;
use crate::insets::WindowInsets;
use crate::registry::{FieldMetadata, InputRegistry};
use crate::runtime::RuntimeHandle;
use crate::state::{State, Subscription};
use crate::visibility::KeyboardVisibility;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

struct ContextInner {
    registry: RefCell<InputRegistry>,
    visibility: KeyboardVisibility,
    insets: WindowInsets,
    runtime: RuntimeHandle,
    next_field_id: Cell<u64>,
}

#[derive(Clone)]
pub struct KeyboardContext {
    inner: Rc<ContextInner>,
}

impl KeyboardContext {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self::with_insets(runtime, WindowInsets::new())
    }

    pub fn with_insets(runtime: RuntimeHandle, insets: WindowInsets) -> Self {
        Self {
            inner: Rc::new(ContextInner {
                registry: RefCell::new(InputRegistry::new()),
                visibility: KeyboardVisibility::new(),
                insets,
                runtime,
                next_field_id: Cell::new(1),
            }),
        }
    }

    pub fn runtime(&self) -> RuntimeHandle {
        self.inner.runtime.clone()
    }

    pub fn visibility(&self) -> &KeyboardVisibility {
        &self.inner.visibility
    }

    pub fn insets(&self) -> &WindowInsets {
        &self.inner.insets
    }

    /// Whether `other` is a handle to the same context.
    pub fn same_context(&self, other: &KeyboardContext) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn allocate_field_id(&self) -> FieldId {
        let raw = self.inner.next_field_id.get();
        self.inner.next_field_id.set(raw + 1);
        FieldId::from_raw(raw)
    }

    // ------------------------------------------------------------------
    // Visibility
    // ------------------------------------------------------------------

    pub fn show_keyboard(&self, name: impl Into<String>) {
        self.inner.visibility.show(name);
    }

    pub fn hide_keyboard(&self) {
        self.inner.visibility.hide();
    }

    pub fn active_keyboard(&self) -> Option<String> {
        self.inner.visibility.active()
    }

    pub fn active_keyboard_state(&self) -> State<Option<String>> {
        self.inner.visibility.state()
    }

    pub fn subscribe_active_keyboard(
        &self,
        listener: impl Fn(Option<&str>) + 'static,
    ) -> Subscription {
        self.inner.visibility.subscribe(listener)
    }

    // ------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------

    pub fn register_field(&self, field: FieldId, metadata: FieldMetadata) {
        self.inner.registry.borrow_mut().register(field, metadata);
    }

    pub fn unregister_field(&self, field: FieldId) {
        self.inner.registry.borrow_mut().unregister(field);
    }

    pub fn set_current_field(&self, field: Option<FieldId>) {
        self.inner.registry.borrow_mut().set_current(field);
    }

    pub fn current_field(&self) -> Option<FieldId> {
        self.inner.registry.borrow().current()
    }

    pub fn field_metadata(&self, field: FieldId) -> Option<FieldMetadata> {
        self.inner.registry.borrow().metadata(field).cloned()
    }

    pub fn current_field_metadata(&self) -> Option<FieldMetadata> {
        self.inner.registry.borrow().current_metadata().cloned()
    }

    /// Run `f` against the registry. `f` must not call back into this
    /// context's registry methods.
    pub fn with_registry<R>(&self, f: impl FnOnce(&InputRegistry) -> R) -> R {
        f(&self.inner.registry.borrow())
    }

    // ------------------------------------------------------------------
    // Key routing
    // ------------------------------------------------------------------

    /// Arm the current field's blur guard ahead of an interaction that will
    /// make the native field blur. Returns `false` when no field is current.
    pub fn suppress_next_blur(&self) -> bool {
        let guard: Option<BlurGuard> = self
            .inner
            .registry
            .borrow()
            .current_metadata()
            .map(|metadata| metadata.blur_guard().clone());
        match guard {
            Some(guard) => {
                guard.arm();
                true
            }
            None => false,
        }
    }

    /// Deliver `key` to the current field's key press callback.
    ///
    /// Returns whether a callback ran. The registry is not borrowed while the
    /// callback runs, so it may freely re-enter this context.
    pub fn dispatch_key_press(&self, key: &str) -> bool {
        let metadata = self.current_field_metadata();
        match metadata {
            Some(metadata) => metadata.dispatch(key),
            None => {
                log::debug!("key {key:?} pressed with no current field");
                false
            }
        }
    }
}

impl fmt::Debug for KeyboardContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardContext")
            .field("registry", &*self.inner.registry.borrow())
            .field("active_keyboard", &self.inner.visibility.active())
            .field("insets", &self.inner.insets.safe_area())
            .finish()
    }
}
