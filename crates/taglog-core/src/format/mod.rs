//! Format descriptor compilation.
//!
//! A descriptor is a byte order prefix (`<`, little-endian, the only order
//! accepted) followed by codes: `B`/`b` (u8/i8), `H`/`h` (u16/i16), `I`/`i`
//! (u32/i32), `x` (pad byte) and `s` (byte string). A decimal count before a
//! code repeats it; for `s` the count is the string width instead.
//!
//! Descriptors are compiled once into a [`FormatSpec`] table so decoding never
//! re-parses the descriptor text. Code tables live in `layout`.
//!
//! Version française (résumé):
//! Un descripteur commence par `<` (petit-boutiste, seul ordre accepté) puis
//! des codes B/b, H/h, I/i, x et s, éventuellement précédés d'un compteur. Il
//! est compilé une fois en table de champs; les codes sont dans `layout`.

pub mod error;
pub mod layout;
pub mod parser;

pub use error::FormatError;
pub use parser::{Field, FieldKind, FormatSpec};
