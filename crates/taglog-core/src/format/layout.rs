pub const LITTLE_ENDIAN: char = '<';
pub const OTHER_BYTE_ORDERS: [char; 4] = ['>', '!', '=', '@'];

pub const PAD_CODE: char = 'x';
pub const BYTES_CODE: char = 's';

pub const U8_CODE: char = 'B';
pub const I8_CODE: char = 'b';
pub const U16_CODE: char = 'H';
pub const I16_CODE: char = 'h';
pub const U32_CODE: char = 'I';
pub const I32_CODE: char = 'i';

/// Width in bytes and signedness of an integer format code.
pub fn integer_code(code: char) -> Option<(usize, bool)> {
    match code {
        U8_CODE => Some((1, false)),
        I8_CODE => Some((1, true)),
        U16_CODE => Some((2, false)),
        I16_CODE => Some((2, true)),
        U32_CODE => Some((4, false)),
        I32_CODE => Some((4, true)),
        _ => None,
    }
}
