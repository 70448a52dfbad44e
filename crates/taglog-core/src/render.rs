//! Struct printer: pairs field names with decoded values.

use std::fmt;

use crate::decode::Value;

/// Label of one decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldLabel {
    Named(String),
    /// A value beyond the supplied names, by absolute value index.
    Extra(usize),
}

impl fmt::Display for FieldLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldLabel::Named(name) => f.write_str(name),
            FieldLabel::Extra(index) => write!(f, "[extra {index}]"),
        }
    }
}

/// Decoded values labeled in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub struct_name: String,
    pub fields: Vec<(FieldLabel, Value)>,
}

impl DecodedRecord {
    /// Names beyond the value count are ignored; values beyond the name
    /// count are kept as extras.
    pub fn new<S: AsRef<str>>(struct_name: &str, field_names: &[S], values: Vec<Value>) -> Self {
        let fields = values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| {
                let label = match field_names.get(idx) {
                    Some(name) => FieldLabel::Named(name.as_ref().to_string()),
                    None => FieldLabel::Extra(idx),
                };
                (label, value)
            })
            .collect();
        Self {
            struct_name: struct_name.to_string(),
            fields,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find_map(|(label, value)| match label {
            FieldLabel::Named(n) if n == name => Some(value),
            _ => None,
        })
    }

    pub fn extras(&self) -> usize {
        self.fields
            .iter()
            .filter(|(label, _)| matches!(label, FieldLabel::Extra(_)))
            .count()
    }

    /// One `  <label>: <value>` line per field.
    pub fn render(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(label, value)| format!("  {label}: {value}"))
            .collect()
    }
}
