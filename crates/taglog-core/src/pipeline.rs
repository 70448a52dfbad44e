//! Per-line decode pipeline: extract, resolve, decode, render.
//!
//! Every outcome is local to its line; nothing here can fail the connection.

use crate::decode::{DecodeError, EncodeError, Value, decode_base64, encode_base64};
use crate::format::FormatSpec;
use crate::frame::{FrameError, TaggedFrame, extract_frame, has_data_tag};
use crate::layouts::{LayoutRegistry, Resolution, UnknownStructError, placeholder_field_names};
use crate::render::DecodedRecord;

/// What a single received line turned into.
#[derive(Debug)]
pub enum LineOutcome {
    /// No `DATA_TAG:` marker; the extractor never ran.
    Untagged,
    Malformed(FrameError),
    Decoded {
        frame: TaggedFrame,
        /// Set when placeholder field names were used.
        fallback: Option<UnknownStructError>,
        record: DecodedRecord,
    },
    Failed {
        frame: TaggedFrame,
        error: DecodeError,
    },
}

impl LineOutcome {
    /// Console messages describing the outcome (empty for untagged lines).
    pub fn report(&self) -> Vec<String> {
        match self {
            LineOutcome::Untagged => Vec::new(),
            LineOutcome::Malformed(err) => vec![format!("Could not parse DATA_TAG line: {err}")],
            LineOutcome::Decoded {
                frame,
                fallback,
                record,
            } => {
                let header = match fallback {
                    None => format!("Decoded {}:", frame.struct_name),
                    Some(reason) => format!(
                        "Decoded {} ({reason}, using placeholder field names):",
                        frame.struct_name
                    ),
                };
                let mut lines = Vec::with_capacity(record.fields.len() + 1);
                lines.push(header);
                lines.extend(record.render());
                lines
            }
            LineOutcome::Failed { frame, error } => {
                vec![format!("Failed to decode {}: {error}", frame.struct_name)]
            }
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LineOutcome::Malformed(_) | LineOutcome::Failed { .. })
    }
}

/// Run the decode pipeline on one line.
///
/// # Examples
/// ```
/// use taglog_core::{LayoutRegistry, LineOutcome, inspect_line};
///
/// let registry = LayoutRegistry::builtin().unwrap();
/// let outcome = inspect_line(&registry, "DATA_TAG: NAME:Foo FORMAT:<I LEN:1 BASE64:AQAAAA==");
/// assert_eq!(
///     outcome.report(),
///     vec![
///         "Decoded Foo (struct Foo is not registered, using placeholder field names):",
///         "  field_0: 1",
///     ]
/// );
/// assert!(matches!(inspect_line(&registry, "boot ok"), LineOutcome::Untagged));
/// ```
pub fn inspect_line(registry: &LayoutRegistry, line: &str) -> LineOutcome {
    if !has_data_tag(line) {
        return LineOutcome::Untagged;
    }
    match extract_frame(line) {
        Ok(Some(frame)) => decode_frame(registry, frame),
        Ok(None) => LineOutcome::Untagged,
        Err(err) => LineOutcome::Malformed(err),
    }
}

/// Decode `frame` with the registered layout, or with its own format and
/// placeholder names when the registry has no exact match.
pub fn decode_frame(registry: &LayoutRegistry, frame: TaggedFrame) -> LineOutcome {
    let decoded = match registry.resolve(&frame) {
        Resolution::Registered(layout) => decode_base64(layout.spec(), &frame.payload_base64)
            .map(|values| {
                let record = DecodedRecord::new(&frame.struct_name, layout.field_names, values);
                (None, record)
            }),
        Resolution::Unregistered(reason) => FormatSpec::compile(&frame.format)
            .map_err(DecodeError::from)
            .and_then(|spec| decode_base64(&spec, &frame.payload_base64))
            .map(|values| {
                // LEN is sender-controlled; names past the value count are never shown.
                let names = placeholder_field_names(frame.declared_len.min(values.len()));
                let record = DecodedRecord::new(&frame.struct_name, names.as_slice(), values);
                (Some(reason), record)
            }),
    };

    match decoded {
        Ok((fallback, record)) => LineOutcome::Decoded {
            frame,
            fallback,
            record,
        },
        Err(error) => LineOutcome::Failed { frame, error },
    }
}

/// Pack `values` into a frame the way the firmware logs a struct.
pub fn tag_values(
    struct_name: &str,
    spec: &FormatSpec,
    values: &[Value],
) -> Result<TaggedFrame, EncodeError> {
    let payload_base64 = encode_base64(spec, values)?;
    Ok(TaggedFrame {
        struct_name: struct_name.to_string(),
        format: spec.descriptor().to_string(),
        declared_len: values.len(),
        payload_base64,
    })
}
