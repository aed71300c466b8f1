use crate::runtime::{FrameCallbackId, RuntimeHandle};

/// Entry point for code that wants to run on the next frame.
#[derive(Clone, Debug)]
pub struct FrameClock {
    runtime: RuntimeHandle,
}

impl FrameClock {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    pub fn with_frame_nanos(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        let mut callback_opt = Some(callback);
        let id = self.runtime.register_frame_callback(move |time| {
            if let Some(callback) = callback_opt.take() {
                callback(time);
            }
        });
        FrameCallbackRegistration::new(self.runtime.clone(), id)
    }

    pub fn with_frame_millis(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> FrameCallbackRegistration {
        self.with_frame_nanos(move |nanos| {
            let millis = nanos / 1_000_000;
            callback(millis);
        })
    }
}

/// Pending frame callback. Dropping it cancels the callback.
#[derive(Debug)]
pub struct FrameCallbackRegistration {
    runtime: RuntimeHandle,
    id: Option<FrameCallbackId>,
}

impl FrameCallbackRegistration {
    fn new(runtime: RuntimeHandle, id: FrameCallbackId) -> Self {
        Self {
            runtime,
            id: Some(id),
        }
    }

    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

impl Drop for FrameCallbackRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.runtime.cancel_frame_callback(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn with_frame_millis_converts_units() {
        let runtime = RuntimeHandle::new();
        let seen = Rc::new(Cell::new(0));
        let _registration = {
            let seen = Rc::clone(&seen);
            runtime
                .frame_clock()
                .with_frame_millis(move |millis| seen.set(millis))
        };

        runtime.drain_frame_callbacks(48_000_000);
        assert_eq!(seen.get(), 48);
    }

    #[test]
    fn dropping_registration_cancels_callback() {
        let runtime = RuntimeHandle::new();
        let ran = Rc::new(Cell::new(false));
        let registration = {
            let ran = Rc::clone(&ran);
            runtime
                .frame_clock()
                .with_frame_nanos(move |_| ran.set(true))
        };

        drop(registration);
        assert!(!runtime.has_pending_frame_callbacks());
        runtime.drain_frame_callbacks(1);
        assert!(!ran.get());
    }
}
