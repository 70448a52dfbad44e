pub const DATA_TAG_MARKER: &str = "DATA_TAG:";

pub const NAME_LABEL: &str = "NAME:";
pub const FORMAT_LABEL: &str = "FORMAT:";
pub const LEN_LABEL: &str = "LEN:";
pub const BASE64_LABEL: &str = "BASE64:";

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub fn is_base64_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')
}
