//! Poll cursor state.

use chrono::Utc;

/// Lower bound timestamp for "new" status changes in the next poll.
///
/// Owned exclusively by the poll loop and never persisted; a restart starts
/// watching from the moment the process comes up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollCursor {
    from_date: i64,
}

impl PollCursor {
    /// Creates a cursor starting at the current time.
    #[must_use]
    pub fn starting_now() -> Self {
        Self {
            from_date: Utc::now().timestamp(),
        }
    }

    /// Creates a cursor at a specific Unix timestamp.
    #[must_use]
    pub const fn at(from_date: i64) -> Self {
        Self { from_date }
    }

    /// Timestamp to pass as `from_date` on the next request.
    #[must_use]
    pub const fn from_date(self) -> i64 {
        self.from_date
    }

    /// Advances the cursor to the server-reported `current_date`.
    ///
    /// Must only be called after a fully successful poll; a failed
    /// iteration leaves the cursor in place so the same window is retried.
    pub fn advance_to(&mut self, current_date: i64) {
        self.from_date = current_date;
    }
}
