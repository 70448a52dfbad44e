use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

use crate::format::{FieldKind, FormatSpec};

use super::error::DecodeError;
use super::reader::FieldReader;
use super::value::Value;

/// Unpack `payload` according to `spec`.
///
/// The payload must be exactly as long as the format; padding bytes are
/// consumed without producing values.
///
/// # Errors
/// Returns `DecodeError::LengthMismatch` when the payload size differs from
/// the size implied by `spec`.
pub fn decode(spec: &FormatSpec, payload: &[u8]) -> Result<Vec<Value>, DecodeError> {
    if payload.len() != spec.byte_len() {
        return Err(DecodeError::LengthMismatch {
            expected: spec.byte_len(),
            actual: payload.len(),
        });
    }

    let mut reader = FieldReader::new(payload);
    let mut values = Vec::with_capacity(spec.value_count());
    for field in spec.fields() {
        match field.kind {
            FieldKind::Padding => reader.skip(field.repeat)?,
            FieldKind::Bytes => {
                let bytes = reader.read_slice(field.width)?;
                values.push(Value::Bytes(bytes.to_vec()));
            }
            FieldKind::Unsigned => {
                for _ in 0..field.repeat {
                    values.push(Value::Int(i64::from(reader.read_unsigned(field.width)?)));
                }
            }
            FieldKind::Signed => {
                for _ in 0..field.repeat {
                    values.push(Value::Int(i64::from(reader.read_signed(field.width)?)));
                }
            }
        }
    }
    Ok(values)
}

/// Base64-decode `payload` (standard alphabet, padded) and unpack it.
///
/// # Errors
/// Returns `DecodeError::PayloadMalformed` for invalid base64, otherwise the
/// errors of [`decode`].
pub fn decode_base64(spec: &FormatSpec, payload: &str) -> Result<Vec<Value>, DecodeError> {
    let bytes = BASE64.decode(payload)?;
    decode(spec, &bytes)
}
