//! Taglog core library: a TCP log listener that decodes tagged binary frames.
//!
//! Devices stream text logs over TCP. Every received line is echoed with a
//! timestamp and the client address; lines carrying a `DATA_TAG:` frame are
//! additionally decoded. A frame names a struct, its packing format, the
//! declared field count and a base64 payload:
//!
//! ```text
//! DATA_TAG: NAME:NetworkData FORMAT:<IH LEN:2 BASE64:BwAAAOQM
//! ```
//!
//! The pipeline per line is `frame` (extract) -> `layouts` (resolve names)
//! -> `format` (compile descriptor) -> `decode` (unpack payload) -> `render`
//! (print values). Connection handling lives in `server` and `session`;
//! output goes through a [`LogSink`].
//!
//! Invariants:
//! - A malformed or undecodable frame affects only its own line.
//! - Line splitting is independent of how bytes are chunked by the socket.
//! - A multi-line report is written as one record and never interleaves with
//!   another connection's output.
//!
//! Version française (résumé):
//! Serveur de journaux TCP : chaque ligne reçue est horodatée et affichée, et
//! les trames `DATA_TAG:` sont décodées (extraction -> registre -> format ->
//! décodage -> rendu). Une trame invalide n'affecte que sa propre ligne.
//!
//! # Examples
//! ```
//! use taglog_core::{LayoutRegistry, inspect_line};
//!
//! let registry = LayoutRegistry::builtin()?;
//! let outcome = inspect_line(
//!     &registry,
//!     "DATA_TAG: NAME:NetworkData FORMAT:<IH LEN:2 BASE64:BwAAAOQM",
//! );
//! assert_eq!(outcome.report()[1], "  send_count: 7");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod clock;
pub mod config;
pub mod decode;
pub mod format;
pub mod frame;
pub mod layouts;
pub mod line_buffer;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod session;
pub mod sink;

pub use clock::{Clock, format_timestamp};
pub use config::{ConfigError, DEFAULT_PORT, DEFAULT_READ_BUFFER, ServerConfig};
pub use decode::{
    DecodeError, EncodeError, Value, decode, decode_base64, encode, encode_base64,
};
pub use format::{Field, FieldKind, FormatError, FormatSpec};
pub use frame::{FrameError, TaggedFrame, extract_frame, has_data_tag};
pub use layouts::{
    LayoutDefinition, LayoutDescriptor, LayoutRegistry, Resolution, UnknownStructError,
    placeholder_field_names,
};
pub use line_buffer::LineBuffer;
pub use pipeline::{LineOutcome, decode_frame, inspect_line, tag_values};
pub use render::{DecodedRecord, FieldLabel};
pub use server::{Server, ServerError, serve_connection};
pub use session::{ConnectionState, Session, SessionContext};
pub use sink::{ConsoleSink, LogSink, MemorySink, format_record};
