//! Platform abstraction traits for keyboard runtime services.
//!
//! These traits let the host platform own scheduling and timing, so the
//! coordination layer never touches a window system or an event loop.

use web_time::Instant;

/// Schedules work for the keyboard runtime.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}

/// Wall clock backed by `web_time::Instant` (works on native and wasm).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Instant) -> u64 {
        since.elapsed().as_nanos().min(u64::MAX as u128) as u64
    }
}
