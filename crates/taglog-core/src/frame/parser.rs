use std::fmt;

use super::error::FrameError;
use super::layout;
use super::reader::TagReader;

/// One tagged payload found in a text line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedFrame {
    pub struct_name: String,
    pub format: String,
    /// Field count announced by the sender (`LEN:`).
    pub declared_len: usize,
    pub payload_base64: String,
}

impl fmt::Display for TaggedFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} {}{} {}{} {}{}",
            layout::DATA_TAG_MARKER,
            layout::NAME_LABEL,
            self.struct_name,
            layout::FORMAT_LABEL,
            self.format,
            layout::LEN_LABEL,
            self.declared_len,
            layout::BASE64_LABEL,
            self.payload_base64,
        )
    }
}

/// Whether `line` carries the `DATA_TAG:` marker at all.
pub fn has_data_tag(line: &str) -> bool {
    line.contains(layout::DATA_TAG_MARKER)
}

/// Extract the tagged frame from `line`.
///
/// Returns `Ok(None)` when the marker is absent. When the marker is present,
/// the labeled fields may start anywhere after it; the first `NAME:` at
/// which the whole `NAME FORMAT LEN BASE64` sequence reads wins.
///
/// # Errors
/// Returns the `FrameError` of the first candidate when no candidate reads.
pub fn extract_frame(line: &str) -> Result<Option<TaggedFrame>, FrameError> {
    let Some(marker) = line.find(layout::DATA_TAG_MARKER) else {
        return Ok(None);
    };
    let tail = &line[marker + layout::DATA_TAG_MARKER.len()..];

    let mut first_err = None;
    for (idx, _) in tail.match_indices(layout::NAME_LABEL) {
        match read_frame(&mut TagReader::new(&tail[idx..])) {
            Ok(frame) => return Ok(Some(frame)),
            Err(err) => {
                first_err.get_or_insert(err);
            }
        }
    }
    Err(first_err.unwrap_or(FrameError::MissingLabel { label: "NAME" }))
}

fn read_frame(reader: &mut TagReader<'_>) -> Result<TaggedFrame, FrameError> {
    let struct_name = read_name(reader)?;
    reader.expect_separator(layout::NAME_LABEL)?;
    let format = read_format(reader)?;
    reader.expect_separator(layout::FORMAT_LABEL)?;
    let declared_len = read_len(reader)?;
    reader.expect_separator(layout::LEN_LABEL)?;
    let payload_base64 = read_payload(reader)?;
    Ok(TaggedFrame {
        struct_name: struct_name.to_string(),
        format: format.to_string(),
        declared_len,
        payload_base64: payload_base64.to_string(),
    })
}

/// `NAME:` followed by word characters.
pub fn read_name<'a>(reader: &mut TagReader<'a>) -> Result<&'a str, FrameError> {
    reader.expect_label(layout::NAME_LABEL)?;
    reader.take_value(layout::NAME_LABEL, layout::is_word_char)
}

/// `FORMAT:` followed by a non-whitespace run.
pub fn read_format<'a>(reader: &mut TagReader<'a>) -> Result<&'a str, FrameError> {
    reader.expect_label(layout::FORMAT_LABEL)?;
    reader.take_value(layout::FORMAT_LABEL, |c| !c.is_whitespace())
}

/// `LEN:` followed by decimal digits, saturating at `usize::MAX`.
pub fn read_len(reader: &mut TagReader<'_>) -> Result<usize, FrameError> {
    reader.expect_label(layout::LEN_LABEL)?;
    let digits = reader.take_value(layout::LEN_LABEL, |c| c.is_ascii_digit())?;
    Ok(digits.parse().unwrap_or(usize::MAX))
}

/// `BASE64:` followed by a run of the base64 alphabet.
pub fn read_payload<'a>(reader: &mut TagReader<'a>) -> Result<&'a str, FrameError> {
    reader.expect_label(layout::BASE64_LABEL)?;
    reader.take_value(layout::BASE64_LABEL, layout::is_base64_char)
}
