use std::collections::BTreeMap;

use thiserror::Error;

use crate::format::{FormatError, FormatSpec};
use crate::frame::TaggedFrame;

use super::builtin::{BUILTIN_LAYOUTS, LayoutDefinition};

/// A registered struct layout with its compiled format.
#[derive(Debug, Clone)]
pub struct LayoutDescriptor {
    pub name: &'static str,
    pub format: &'static str,
    pub field_names: &'static [&'static str],
    spec: FormatSpec,
}

impl LayoutDescriptor {
    pub fn spec(&self) -> &FormatSpec {
        &self.spec
    }
}

/// Why a frame falls back to placeholder field names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownStructError {
    #[error("struct {name} is not registered")]
    NotRegistered { name: String },
    #[error("format {declared} differs from registered {registered}")]
    FormatMismatch {
        declared: String,
        registered: &'static str,
    },
}

/// Outcome of matching a frame against the registry.
#[derive(Debug)]
pub enum Resolution<'a> {
    Registered(&'a LayoutDescriptor),
    Unregistered(UnknownStructError),
}

/// Read-only mapping from struct name to layout.
#[derive(Debug, Clone, Default)]
pub struct LayoutRegistry {
    layouts: BTreeMap<&'static str, LayoutDescriptor>,
}

impl LayoutRegistry {
    /// Registry of the layouts compiled into this build.
    ///
    /// # Errors
    /// Returns `FormatError` if a built-in descriptor does not compile.
    pub fn builtin() -> Result<Self, FormatError> {
        Self::from_definitions(BUILTIN_LAYOUTS)
    }

    pub fn from_definitions(definitions: &[LayoutDefinition]) -> Result<Self, FormatError> {
        let mut layouts = BTreeMap::new();
        for definition in definitions {
            let spec = FormatSpec::compile(definition.format)?;
            layouts.insert(
                definition.name,
                LayoutDescriptor {
                    name: definition.name,
                    format: definition.format,
                    field_names: definition.field_names,
                    spec,
                },
            );
        }
        Ok(Self { layouts })
    }

    pub fn lookup(&self, name: &str) -> Option<&LayoutDescriptor> {
        self.layouts.get(name)
    }

    /// Registered layout when both name and format string match exactly.
    pub fn resolve(&self, frame: &TaggedFrame) -> Resolution<'_> {
        match self.lookup(&frame.struct_name) {
            Some(layout) if layout.format == frame.format => Resolution::Registered(layout),
            Some(layout) => Resolution::Unregistered(UnknownStructError::FormatMismatch {
                declared: frame.format.clone(),
                registered: layout.format,
            }),
            None => Resolution::Unregistered(UnknownStructError::NotRegistered {
                name: frame.struct_name.clone(),
            }),
        }
    }

    /// Layouts in name order.
    pub fn iter(&self) -> impl Iterator<Item = &LayoutDescriptor> {
        self.layouts.values()
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }
}

/// `field_0`, `field_1`, ... for frames without a registered layout.
pub fn placeholder_field_names(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("field_{idx}")).collect()
}
