use super::error::DecodeError;

/// Sequential little-endian reader over a payload.
pub struct FieldReader<'a> {
    payload: &'a [u8],
    offset: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload, offset: 0 }
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.offset.saturating_add(len);
        let bytes = self
            .payload
            .get(self.offset..end)
            .ok_or(DecodeError::LengthMismatch {
                expected: end,
                actual: self.payload.len(),
            })?;
        self.offset = end;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), DecodeError> {
        self.read_slice(len).map(|_| ())
    }

    pub fn read_unsigned(&mut self, width: usize) -> Result<u32, DecodeError> {
        let bytes = self.read_slice(width)?;
        match *bytes {
            [b0] => Ok(u32::from(b0)),
            [b0, b1] => Ok(u32::from(u16::from_le_bytes([b0, b1]))),
            [b0, b1, b2, b3] => Ok(u32::from_le_bytes([b0, b1, b2, b3])),
            _ => Err(DecodeError::LengthMismatch {
                expected: 4,
                actual: bytes.len(),
            }),
        }
    }

    pub fn read_signed(&mut self, width: usize) -> Result<i32, DecodeError> {
        let bytes = self.read_slice(width)?;
        match *bytes {
            [b0] => Ok(i32::from(i8::from_le_bytes([b0]))),
            [b0, b1] => Ok(i32::from(i16::from_le_bytes([b0, b1]))),
            [b0, b1, b2, b3] => Ok(i32::from_le_bytes([b0, b1, b2, b3])),
            _ => Err(DecodeError::LengthMismatch {
                expected: 4,
                actual: bytes.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FieldReader;
    use crate::decode::error::DecodeError;

    #[test]
    fn reads_little_endian_values_in_sequence() {
        let payload = [0x01, 0x34, 0x12, 0xff, 0xff, 0xff, 0xff];
        let mut reader = FieldReader::new(&payload);
        assert_eq!(reader.read_unsigned(1).unwrap(), 1);
        assert_eq!(reader.read_unsigned(2).unwrap(), 0x1234);
        assert_eq!(reader.read_signed(4).unwrap(), -1);
        assert!(reader.read_unsigned(1).is_err());
    }

    #[test]
    fn sign_extends_narrow_values() {
        let payload = [0x80, 0x00, 0x80];
        let mut reader = FieldReader::new(&payload);
        assert_eq!(reader.read_signed(1).unwrap(), -128);
        assert_eq!(reader.read_signed(2).unwrap(), -32768);
    }

    #[test]
    fn skip_advances_offset() {
        let payload = [0xaa, 0xbb, 0x07];
        let mut reader = FieldReader::new(&payload);
        reader.skip(2).unwrap();
        assert_eq!(reader.read_unsigned(1).unwrap(), 7);
    }

    #[test]
    fn read_past_end_reports_lengths() {
        let payload = [0x01];
        let mut reader = FieldReader::new(&payload);
        let err = reader.read_unsigned(2).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }
}
