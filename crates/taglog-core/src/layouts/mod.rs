//! Registry of known struct layouts.
//!
//! The registry is fixed at build time (`builtin`) and compiled once at
//! startup; it is never mutated afterwards, so it is shared across
//! connection threads without locking. A frame uses the registered field
//! names only when both its struct name and its format string match a
//! registered layout; otherwise it falls back to `field_N` placeholders.

pub mod builtin;
pub mod registry;

pub use builtin::LayoutDefinition;
pub use registry::{
    LayoutDescriptor, LayoutRegistry, Resolution, UnknownStructError, placeholder_field_names,
};
