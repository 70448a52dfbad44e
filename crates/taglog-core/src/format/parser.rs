use std::fmt;

use super::error::FormatError;
use super::layout;

/// Storage class of a compiled field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Unsigned,
    Signed,
    /// Skipped bytes; produce no value.
    Padding,
    /// Raw byte string of `width` bytes; produces one value.
    Bytes,
}

/// One run of identical elements: `repeat` elements of `width` bytes each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    pub width: usize,
    pub repeat: usize,
}

impl Field {
    pub fn byte_len(&self) -> Option<usize> {
        self.width.checked_mul(self.repeat)
    }

    pub fn value_count(&self) -> usize {
        match self.kind {
            FieldKind::Padding => 0,
            FieldKind::Bytes => 1,
            FieldKind::Unsigned | FieldKind::Signed => self.repeat,
        }
    }
}

/// A format descriptor compiled into a table of fixed-width fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    descriptor: String,
    fields: Vec<Field>,
    byte_len: usize,
    value_count: usize,
}

impl FormatSpec {
    /// Compile a descriptor such as `<IH6B`.
    ///
    /// # Errors
    /// Returns `FormatError` when the byte order prefix is missing or not
    /// little-endian, a code is unknown, a count has no code, or the
    /// described size overflows.
    pub fn compile(descriptor: &str) -> Result<Self, FormatError> {
        let mut chars = descriptor.char_indices();
        match chars.next() {
            None => return Err(FormatError::Empty),
            Some((_, layout::LITTLE_ENDIAN)) => {}
            Some((_, found)) if layout::OTHER_BYTE_ORDERS.contains(&found) => {
                return Err(FormatError::UnsupportedByteOrder { found });
            }
            Some((_, found)) => return Err(FormatError::MissingByteOrder { found }),
        }

        let mut fields = Vec::new();
        let mut byte_len = 0usize;
        let mut value_count = 0usize;

        while let Some((position, c)) = chars.next() {
            if c.is_whitespace() {
                continue;
            }

            let mut count = None;
            let mut code = c;
            let mut code_position = position;
            if let Some(digit) = c.to_digit(10) {
                let mut value = digit as usize;
                loop {
                    match chars.next() {
                        Some((_, next)) if next.is_ascii_digit() => {
                            let digit = next.to_digit(10).unwrap_or_default() as usize;
                            value = value
                                .checked_mul(10)
                                .and_then(|v| v.checked_add(digit))
                                .ok_or(FormatError::TooLarge)?;
                        }
                        Some((next_position, next)) => {
                            code = next;
                            code_position = next_position;
                            break;
                        }
                        None => return Err(FormatError::DanglingCount { position }),
                    }
                }
                count = Some(value);
            }

            let field = compile_code(code, code_position, count.unwrap_or(1))?;
            byte_len = field
                .byte_len()
                .and_then(|len| byte_len.checked_add(len))
                .ok_or(FormatError::TooLarge)?;
            value_count = value_count
                .checked_add(field.value_count())
                .ok_or(FormatError::TooLarge)?;
            fields.push(field);
        }

        Ok(Self {
            descriptor: descriptor.to_string(),
            fields,
            byte_len,
            value_count,
        })
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Total payload size in bytes, padding included.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Number of values a decode produces (padding excluded).
    pub fn value_count(&self) -> usize {
        self.value_count
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.descriptor)
    }
}

fn compile_code(code: char, position: usize, count: usize) -> Result<Field, FormatError> {
    if let Some((width, signed)) = layout::integer_code(code) {
        let kind = if signed {
            FieldKind::Signed
        } else {
            FieldKind::Unsigned
        };
        return Ok(Field {
            kind,
            width,
            repeat: count,
        });
    }
    match code {
        layout::PAD_CODE => Ok(Field {
            kind: FieldKind::Padding,
            width: 1,
            repeat: count,
        }),
        // The count of a byte string is its width, not a repeat.
        layout::BYTES_CODE => Ok(Field {
            kind: FieldKind::Bytes,
            width: count,
            repeat: 1,
        }),
        _ => Err(FormatError::UnknownCode { code, position }),
    }
}
