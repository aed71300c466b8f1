//! Testing utilities and harness for softkey

mod recording;
pub mod testing;

pub use recording::{RecordingTextInput, TextInputCall};
pub use testing::*;

pub mod prelude {
    pub use crate::recording::{RecordingTextInput, TextInputCall};
    pub use crate::testing::*;
}
