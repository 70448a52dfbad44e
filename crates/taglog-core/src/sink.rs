//! Output sinks for console records.
//!
//! A record is one atomic write: every line of a decoded report reaches the
//! sink in a single `write` call, so concurrent connections never interleave
//! inside a record.

use std::io::{self, Write};
use std::net::IpAddr;

use log::warn;
use parking_lot::Mutex;

/// Destination of console records, shared by all connection threads.
pub trait LogSink: Send + Sync {
    /// Write one complete record (newline-terminated lines).
    fn write(&self, record: &str);
}

/// Writes records to stdout, holding the stdout lock per record.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, record: &str) {
        let mut out = io::stdout().lock();
        if let Err(err) = out.write_all(record.as_bytes()).and_then(|()| out.flush()) {
            warn!("failed to write console record: {err}");
        }
    }
}

/// Keeps records in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<String> {
        self.records.lock().clone()
    }

    /// All records split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .flat_map(|record| record.lines())
            .map(str::to_string)
            .collect()
    }
}

impl LogSink for MemorySink {
    fn write(&self, record: &str) {
        self.records.lock().push(record.to_string());
    }
}

/// Prefix every message with `[<timestamp>][<client>]: ` and join them into
/// one record.
pub fn format_record<S: AsRef<str>>(timestamp: &str, client: IpAddr, messages: &[S]) -> String {
    messages
        .iter()
        .map(|message| format!("[{timestamp}][{client}]: {}\n", message.as_ref()))
        .collect()
}
