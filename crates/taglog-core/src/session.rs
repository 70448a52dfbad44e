//! Per-connection processing: `CONNECTED -> (receiving lines)* -> CLOSED`.
//!
//! Each complete line is printed verbatim (trailing whitespace trimmed) and
//! then run through the decode pipeline. A remainder left in the carry-over
//! buffer when the peer closes is flushed as a final line before the close
//! notice.

use std::net::SocketAddr;
use std::sync::Arc;

use log::debug;

use crate::clock::Clock;
use crate::layouts::LayoutRegistry;
use crate::line_buffer::LineBuffer;
use crate::pipeline::inspect_line;
use crate::sink::{LogSink, format_record};

/// Shared, read-only collaborators of every connection.
#[derive(Clone)]
pub struct SessionContext {
    pub registry: Arc<LayoutRegistry>,
    pub sink: Arc<dyn LogSink>,
    pub clock: Clock,
}

impl SessionContext {
    pub fn new(registry: Arc<LayoutRegistry>, sink: Arc<dyn LogSink>, clock: Clock) -> Self {
        Self {
            registry,
            sink,
            clock,
        }
    }
}

/// Carry-over bytes and remote address of one client.
#[derive(Debug)]
pub struct ConnectionState {
    pub peer: SocketAddr,
    pub buffer: LineBuffer,
}

pub struct Session<'a> {
    context: &'a SessionContext,
    state: ConnectionState,
}

impl<'a> Session<'a> {
    /// Start a session and log the connection notice.
    pub fn open(context: &'a SessionContext, peer: SocketAddr) -> Self {
        let session = Self {
            context,
            state: ConnectionState {
                peer,
                buffer: LineBuffer::new(),
            },
        };
        session.emit(&[format!("Connection from {}", peer.ip())]);
        session
    }

    pub fn peer(&self) -> SocketAddr {
        self.state.peer
    }

    /// Handle bytes from one read.
    pub fn receive(&mut self, bytes: &[u8]) {
        for line in self.state.buffer.feed(bytes) {
            self.handle_line(&line);
        }
    }

    /// Flush any unterminated remainder and log the close notice.
    pub fn close(mut self) {
        if let Some(rest) = std::mem::take(&mut self.state.buffer).finish() {
            self.handle_line(&rest);
        }
        self.emit(&[format!("Connection from {} closed.", self.state.peer.ip())]);
    }

    fn handle_line(&self, line: &str) {
        let line = line.trim_end();
        self.emit(&[line]);

        let outcome = inspect_line(&self.context.registry, line);
        if outcome.is_error() {
            debug!("{}: tagged line not decoded: {outcome:?}", self.state.peer);
        }
        let report = outcome.report();
        if !report.is_empty() {
            self.emit(&report);
        }
    }

    fn emit<S: AsRef<str>>(&self, messages: &[S]) {
        let record = format_record(
            &self.context.clock.timestamp(),
            self.state.peer.ip(),
            messages,
        );
        self.context.sink.write(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionContext};
    use crate::clock::Clock;
    use crate::layouts::LayoutRegistry;
    use crate::sink::MemorySink;
    use std::sync::Arc;

    fn context(sink: &Arc<MemorySink>) -> SessionContext {
        SessionContext::new(
            Arc::new(LayoutRegistry::builtin().unwrap()),
            sink.clone(),
            Clock::utc(),
        )
    }

    fn messages(sink: &MemorySink) -> Vec<String> {
        sink.lines()
            .into_iter()
            .map(|line| line.split_once("]: ").unwrap().1.to_string())
            .collect()
    }

    #[test]
    fn session_logs_open_lines_and_close() {
        let sink = Arc::new(MemorySink::new());
        let context = context(&sink);
        let mut session = Session::open(&context, "10.0.0.9:5555".parse().unwrap());
        session.receive(b"hello\r\nwor");
        session.receive(b"ld\n");
        session.close();

        assert_eq!(
            messages(&sink),
            vec![
                "Connection from 10.0.0.9",
                "hello",
                "world",
                "Connection from 10.0.0.9 closed."
            ]
        );
        assert!(sink.lines()[0].contains("][10.0.0.9]: "));
    }

    #[test]
    fn session_flushes_remainder_on_close() {
        let sink = Arc::new(MemorySink::new());
        let context = context(&sink);
        let mut session = Session::open(&context, "10.0.0.9:5555".parse().unwrap());
        session.receive(b"partial");
        session.close();

        assert_eq!(
            messages(&sink),
            vec![
                "Connection from 10.0.0.9",
                "partial",
                "Connection from 10.0.0.9 closed."
            ]
        );
    }

    #[test]
    fn decoded_report_is_one_record() {
        let sink = Arc::new(MemorySink::new());
        let context = context(&sink);
        let mut session = Session::open(&context, "10.0.0.9:5555".parse().unwrap());
        session.receive(b"DATA_TAG: NAME:NetworkData FORMAT:<IH LEN:2 BASE64:BwAAAOQM\n");

        let records = sink.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].lines().count(), 3);
        assert!(records[2].ends_with("]:   battery_voltage: 3300\n"));
    }
}
