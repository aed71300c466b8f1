//! Coordination runtime for on-screen custom keyboards.
//!
//! This crate keeps three pieces of state consistent while native focus
//! events, key presses and programmatic show/hide requests interleave:
//! - which field currently owns the custom keyboard ([`InputRegistry`]),
//! - which named keyboard is visible ([`KeyboardVisibility`]),
//! - whether the next native blur of a field must be ignored ([`BlurGuard`]).
//!
//! It also carries the single-threaded frame runtime ([`RuntimeHandle`],
//! [`FrameClock`]) that keyboard animations run on, and the window insets the
//! keyboard host lays itself out against.
//!
//! Nothing here renders. `softkey-ui` builds the field wrapper, the key grid
//! and the host on top of these pieces.

mod blur_guard;
pub mod collections;
mod context;
mod error;
mod frame_clock;
mod id;
mod insets;
pub mod platform;
mod provider;
mod registry;
mod runtime;
mod state;
mod visibility;

pub use blur_guard::{BlurGuard, BlurGuardState};
pub use context::KeyboardContext;
pub use error::ContextError;
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use id::FieldId;
pub use insets::{EdgeInsets, WindowInsets};
pub use platform::{Clock, RuntimeScheduler, SystemClock};
pub use provider::{
    current_context, enter, try_use_keyboard, use_keyboard, KeyboardHandle, KeyboardProvider,
    ProviderScopeGuard,
};
pub use registry::{FieldMetadata, InputRegistry, KeyPressHandler};
pub use runtime::{FrameCallbackId, RuntimeHandle};
pub use state::{MutableState, State, Subscription};
pub use visibility::KeyboardVisibility;
