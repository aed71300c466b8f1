//! Scoped access to a [`KeyboardContext`].
//!
//! `KeyboardProvider::provide` makes a context reachable from code that was
//! not handed one explicitly. Reading it outside every provide scope is a
//! structural bug in the caller, so [`use_keyboard`] fails fast instead of
//! inventing a detached default.

use crate::context::KeyboardContext;
use crate::error::ContextError;
use crate::insets::WindowInsets;
use crate::runtime::RuntimeHandle;
use crate::state::State;
use std::cell::RefCell;

// Thread-local stack of provided contexts; the innermost scope wins.
thread_local! {
    static PROVIDER_STACK: RefCell<Vec<KeyboardContext>> = const { RefCell::new(Vec::new()) };
}

/// Guard that pops the provider stack on drop.
#[must_use = "ProviderScopeGuard pops the provider stack on drop"]
pub struct ProviderScopeGuard;

impl Drop for ProviderScopeGuard {
    fn drop(&mut self) {
        PROVIDER_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Pushes `context` onto the provider stack until the guard drops.
pub fn enter(context: &KeyboardContext) -> ProviderScopeGuard {
    PROVIDER_STACK.with(|stack| stack.borrow_mut().push(context.clone()));
    ProviderScopeGuard
}

/// Explicit creation point for a keyboard context.
pub struct KeyboardProvider {
    context: KeyboardContext,
}

#[allow(clippy::new_without_default)]
impl KeyboardProvider {
    pub fn new() -> Self {
        Self::with_runtime(RuntimeHandle::new())
    }

    pub fn with_runtime(runtime: RuntimeHandle) -> Self {
        Self {
            context: KeyboardContext::new(runtime),
        }
    }

    pub fn with_insets(runtime: RuntimeHandle, insets: WindowInsets) -> Self {
        Self {
            context: KeyboardContext::with_insets(runtime, insets),
        }
    }

    pub fn context(&self) -> &KeyboardContext {
        &self.context
    }

    /// Run `content` with this provider's context reachable through
    /// [`use_keyboard`].
    pub fn provide<R>(&self, content: impl FnOnce() -> R) -> R {
        let _guard = enter(&self.context);
        content()
    }
}

/// Visibility controls for code running inside a provide scope.
#[derive(Clone, Debug)]
pub struct KeyboardHandle {
    context: KeyboardContext,
}

impl KeyboardHandle {
    pub fn show_keyboard(&self, name: impl Into<String>) {
        self.context.show_keyboard(name);
    }

    pub fn hide_keyboard(&self) {
        self.context.hide_keyboard();
    }

    pub fn active_keyboard(&self) -> Option<String> {
        self.context.active_keyboard()
    }

    pub fn active_keyboard_state(&self) -> State<Option<String>> {
        self.context.active_keyboard_state()
    }

    pub fn context(&self) -> &KeyboardContext {
        &self.context
    }
}

/// The innermost provided context, if any.
pub fn current_context() -> Option<KeyboardContext> {
    PROVIDER_STACK.with(|stack| stack.borrow().last().cloned())
}

pub fn try_use_keyboard() -> Result<KeyboardHandle, ContextError> {
    current_context()
        .map(|context| KeyboardHandle { context })
        .ok_or(ContextError::NoProvider {
            accessor: "use_keyboard",
        })
}

/// Access the innermost provided keyboard.
///
/// # Panics
/// Panics if called outside every [`KeyboardProvider::provide`] scope.
pub fn use_keyboard() -> KeyboardHandle {
    match try_use_keyboard() {
        Ok(handle) => handle,
        Err(err) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_keyboard_sees_provided_context() {
        let provider = KeyboardProvider::new();
        provider.provide(|| {
            let keyboard = use_keyboard();
            keyboard.show_keyboard("numeric");
            assert_eq!(keyboard.active_keyboard().as_deref(), Some("numeric"));
        });
        assert_eq!(
            provider.context().active_keyboard().as_deref(),
            Some("numeric")
        );
    }

    #[test]
    fn try_use_keyboard_outside_provider_is_an_error() {
        let err = try_use_keyboard().err();
        assert_eq!(
            err,
            Some(ContextError::NoProvider {
                accessor: "use_keyboard"
            })
        );
    }

    #[test]
    #[should_panic(expected = "use_keyboard must be used within a KeyboardProvider")]
    fn use_keyboard_outside_provider_panics() {
        let _ = use_keyboard();
    }

    #[test]
    fn nested_providers_resolve_innermost() {
        let outer = KeyboardProvider::new();
        let inner = KeyboardProvider::new();
        outer.provide(|| {
            inner.provide(|| {
                let handle = use_keyboard();
                assert!(handle.context().same_context(inner.context()));
            });
            let handle = use_keyboard();
            assert!(handle.context().same_context(outer.context()));
        });
        assert!(current_context().is_none());
    }

    #[test]
    fn provider_scope_unwinds_on_panic() {
        let provider = KeyboardProvider::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            provider.provide(|| panic!("boom"));
        }));
        assert!(result.is_err());
        assert!(current_context().is_none());
    }
}
