use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::format::{FieldKind, FormatSpec};

use super::error::EncodeError;
use super::value::Value;

/// Pack `values` into a little-endian payload laid out by `spec`.
///
/// Padding bytes are written as zero. This is the inverse of
/// [`decode`](super::decode) for every layout.
///
/// # Errors
/// Returns `EncodeError` when the value count, a value kind or an integer
/// range does not fit the format.
pub fn encode(spec: &FormatSpec, values: &[Value]) -> Result<Vec<u8>, EncodeError> {
    if values.len() != spec.value_count() {
        return Err(EncodeError::ValueCount {
            expected: spec.value_count(),
            actual: values.len(),
        });
    }

    let missing = || EncodeError::ValueCount {
        expected: spec.value_count(),
        actual: values.len(),
    };
    let mut out = Vec::with_capacity(spec.byte_len());
    let mut values = values.iter().enumerate();
    for field in spec.fields() {
        match field.kind {
            FieldKind::Padding => out.resize(out.len() + field.repeat, 0),
            FieldKind::Bytes => {
                let (index, value) = values.next().ok_or_else(missing)?;
                let bytes = value.as_bytes().ok_or(EncodeError::KindMismatch {
                    index,
                    expected: "bytes",
                })?;
                if bytes.len() != field.width {
                    return Err(EncodeError::BytesWidth {
                        index,
                        actual: bytes.len(),
                        width: field.width,
                    });
                }
                out.extend_from_slice(bytes);
            }
            FieldKind::Unsigned | FieldKind::Signed => {
                let signed = field.kind == FieldKind::Signed;
                for _ in 0..field.repeat {
                    let (index, value) = values.next().ok_or_else(missing)?;
                    let int = value.as_int().ok_or(EncodeError::KindMismatch {
                        index,
                        expected: "integer",
                    })?;
                    if !fits(int, field.width, signed) {
                        return Err(EncodeError::OutOfRange {
                            index,
                            value: int,
                            width: field.width,
                        });
                    }
                    out.extend_from_slice(&int.to_le_bytes()[..field.width]);
                }
            }
        }
    }
    Ok(out)
}

/// Pack `values` and return the payload as standard padded base64.
pub fn encode_base64(spec: &FormatSpec, values: &[Value]) -> Result<String, EncodeError> {
    encode(spec, values).map(|bytes| BASE64.encode(bytes))
}

fn fits(value: i64, width: usize, signed: bool) -> bool {
    let bits = (width * 8) as u32;
    if signed {
        let min = -(1i64 << (bits - 1));
        let max = (1i64 << (bits - 1)) - 1;
        (min..=max).contains(&value)
    } else {
        (0..=((1i64 << bits) - 1)).contains(&value)
    }
}
