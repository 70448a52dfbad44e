//! Binary payload decoding.
//!
//! `parser` unpacks fixed-width little-endian fields according to a compiled
//! [`FormatSpec`](crate::FormatSpec) and `encoder` packs values back into the
//! same layout. The payload length must match the format exactly; a mismatch
//! is reported, never truncated or padded. Safe byte access lives in `reader`.
//!
//! Version française (résumé):
//! `parser` décode les champs petit-boutistes selon un `FormatSpec`, `encoder`
//! fait l'inverse. La longueur du payload doit correspondre exactement au
//! format; l'accès sûr aux octets est dans `reader`.

pub mod encoder;
pub mod error;
pub mod parser;
pub(crate) mod reader;
pub mod value;

pub use encoder::{encode, encode_base64};
pub use error::{DecodeError, EncodeError};
pub use parser::{decode, decode_base64};
pub use value::Value;
