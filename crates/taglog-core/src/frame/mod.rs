//! Tagged frame extraction.
//!
//! Lines carrying the `DATA_TAG:` marker embed a binary struct as
//! `NAME:<word> FORMAT:<descriptor> LEN:<digits> BASE64:<payload>`, separated
//! by whitespace in that fixed order. Labels are case-sensitive and each
//! `LABEL:value` pair is contiguous.
//!
//! Each labeled sub-field has its own reader function in `parser`; the cursor
//! they share lives in `reader`, and the literal tokens in `layout`.
//!
//! Version française (résumé):
//! Les lignes marquées `DATA_TAG:` portent `NAME FORMAT LEN BASE64` dans cet
//! ordre, étiquettes sensibles à la casse. Le curseur est dans `reader`, les
//! jetons littéraux dans `layout`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::FrameError;
pub use parser::{TaggedFrame, extract_frame, has_data_tag};
