//! Frame callback runtime.
//!
//! Everything in this crate runs on one UI thread. The only work that spans
//! more than one event turn is animation, and animation advances exclusively
//! through frame callbacks registered here and drained by the host once per
//! rendered frame.

use crate::collections::map::HashSet;
use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnMut(u64)>;

#[derive(Default)]
struct RuntimeInner {
    next_callback_id: FrameCallbackId,
    frame_callbacks: Vec<(FrameCallbackId, FrameCallback)>,
    draining: bool,
    cancelled_while_draining: HashSet<FrameCallbackId>,
    last_frame_nanos: Option<u64>,
    scheduler: Option<Arc<dyn RuntimeScheduler>>,
}

/// Cheap, cloneable handle to the frame runtime.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Rc<RefCell<RuntimeInner>>,
}

impl RuntimeHandle {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(RuntimeInner::default())),
        }
    }

    /// Create a runtime that asks `scheduler` for a frame whenever the first
    /// callback of an idle period is registered.
    pub fn with_scheduler(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        let runtime = Self::new();
        runtime.inner.borrow_mut().scheduler = Some(scheduler);
        runtime
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn register_frame_callback(&self, callback: impl FnMut(u64) + 'static) -> FrameCallbackId {
        let (id, scheduler) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_callback_id;
            inner.next_callback_id += 1;
            let was_idle = inner.frame_callbacks.is_empty();
            inner.frame_callbacks.push((id, Box::new(callback)));
            let scheduler = if was_idle && !inner.draining {
                inner.scheduler.clone()
            } else {
                None
            };
            (id, scheduler)
        };
        if let Some(scheduler) = scheduler {
            scheduler.schedule_frame();
        }
        id
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.frame_callbacks.len();
        inner.frame_callbacks.retain(|(other, _)| *other != id);
        if inner.frame_callbacks.len() == before && inner.draining {
            // Already taken by the drain in progress; skip it there.
            inner.cancelled_while_draining.insert(id);
        }
    }

    pub fn has_pending_frame_callbacks(&self) -> bool {
        !self.inner.borrow().frame_callbacks.is_empty()
    }

    /// Timestamp of the most recent drained frame, if any.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner.borrow().last_frame_nanos
    }

    /// Run every callback registered before this call with `frame_time_nanos`.
    ///
    /// Callbacks registered while draining run on the next drain. Returns the
    /// number of callbacks that ran.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if inner.draining {
                log::warn!("drain_frame_callbacks re-entered; ignoring nested drain");
                return 0;
            }
            inner.draining = true;
            inner.last_frame_nanos = Some(frame_time_nanos);
            std::mem::take(&mut inner.frame_callbacks)
        };
        let guard = DrainGuard { inner: &self.inner };

        let mut ran = 0;
        for (id, mut callback) in callbacks {
            let cancelled = self.inner.borrow_mut().cancelled_while_draining.remove(&id);
            if cancelled {
                continue;
            }
            callback(frame_time_nanos);
            ran += 1;
        }

        drop(guard);
        let scheduler = {
            let inner = self.inner.borrow();
            if inner.frame_callbacks.is_empty() {
                None
            } else {
                inner.scheduler.clone()
            }
        };
        if let Some(scheduler) = scheduler {
            scheduler.schedule_frame();
        }

        log::trace!("drained {ran} frame callbacks at {frame_time_nanos}ns");
        ran
    }
}

/// Ends a drain even when a callback unwinds, so the runtime keeps accepting
/// frames afterwards.
struct DrainGuard<'a> {
    inner: &'a RefCell<RuntimeInner>,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.draining = false;
        inner.cancelled_while_draining.clear();
    }
}

impl Default for RuntimeHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("RuntimeHandle")
            .field("pending_callbacks", &inner.frame_callbacks.len())
            .field("last_frame_nanos", &inner.last_frame_nanos)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn drain_runs_registered_callbacks_once() {
        let runtime = RuntimeHandle::new();
        let seen = Rc::new(Cell::new(0u64));
        {
            let seen = Rc::clone(&seen);
            runtime.register_frame_callback(move |time| seen.set(time));
        }

        assert!(runtime.has_pending_frame_callbacks());
        assert_eq!(runtime.drain_frame_callbacks(16), 1);
        assert_eq!(seen.get(), 16);
        assert!(!runtime.has_pending_frame_callbacks());
        assert_eq!(runtime.drain_frame_callbacks(32), 0);
    }

    #[test]
    fn callbacks_registered_during_drain_wait_for_next_frame() {
        let runtime = RuntimeHandle::new();
        let count = Rc::new(Cell::new(0));
        {
            let runtime_inner = runtime.clone();
            let count = Rc::clone(&count);
            runtime.register_frame_callback(move |_| {
                count.set(count.get() + 1);
                let count = Rc::clone(&count);
                runtime_inner.register_frame_callback(move |_| count.set(count.get() + 1));
            });
        }

        runtime.drain_frame_callbacks(1);
        assert_eq!(count.get(), 1);
        assert!(runtime.has_pending_frame_callbacks());
        runtime.drain_frame_callbacks(2);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn cancel_during_drain_skips_the_callback() {
        let runtime = RuntimeHandle::new();
        let victim_ran = Rc::new(Cell::new(false));
        let victim_id = Rc::new(Cell::new(None));

        {
            let runtime_inner = runtime.clone();
            let victim_id = Rc::clone(&victim_id);
            runtime.register_frame_callback(move |_| {
                if let Some(id) = victim_id.get() {
                    runtime_inner.cancel_frame_callback(id);
                }
            });
        }
        let id = {
            let victim_ran = Rc::clone(&victim_ran);
            runtime.register_frame_callback(move |_| victim_ran.set(true))
        };
        victim_id.set(Some(id));

        assert_eq!(runtime.drain_frame_callbacks(1), 1);
        assert!(!victim_ran.get());
    }

    #[test]
    fn panicking_callback_does_not_wedge_the_runtime() {
        let runtime = RuntimeHandle::new();
        runtime.register_frame_callback(|_| panic!("frame callback failed"));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            runtime.drain_frame_callbacks(1)
        }));
        assert!(result.is_err());

        let ran = Rc::new(Cell::new(false));
        {
            let ran = Rc::clone(&ran);
            runtime.register_frame_callback(move |_| ran.set(true));
        }
        assert_eq!(runtime.drain_frame_callbacks(2), 1);
        assert!(ran.get());
    }

    struct CountingScheduler(AtomicUsize);

    impl RuntimeScheduler for CountingScheduler {
        fn schedule_frame(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn scheduler_is_asked_once_per_idle_period() {
        let scheduler = Arc::new(CountingScheduler(AtomicUsize::new(0)));
        let runtime = RuntimeHandle::with_scheduler(scheduler.clone());

        runtime.register_frame_callback(|_| {});
        runtime.register_frame_callback(|_| {});
        assert_eq!(scheduler.0.load(Ordering::SeqCst), 1);

        runtime.drain_frame_callbacks(1);
        runtime.register_frame_callback(|_| {});
        assert_eq!(scheduler.0.load(Ordering::SeqCst), 2);
    }
}
