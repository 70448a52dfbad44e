//! Wall-clock timestamps for console records.

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:3]");

/// Source of record timestamps in a fixed UTC offset.
///
/// The local offset must be captured before worker threads are spawned;
/// `time` refuses to read it from a multi-threaded process on some
/// platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    offset: UtcOffset,
}

impl Clock {
    /// Local time, or UTC when the local offset is unavailable.
    pub fn local() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        Self { offset }
    }

    pub fn utc() -> Self {
        Self {
            offset: UtcOffset::UTC,
        }
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }

    pub fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::utc()
    }
}

/// `YYYY-MM-DD HH:MM:SS.mmm` (millisecond precision, truncated).
pub fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| ts.unix_timestamp().to_string())
}
