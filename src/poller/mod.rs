//! Poll loop module.
//!
//! Drives the fetch, validate, notify cycle on a fixed interval and owns
//! the poll cursor.

mod cursor;
mod runner;

pub use cursor::PollCursor;
pub use runner::{HomeworkPoller, PollError, PollOutcome, PollerMessage};
