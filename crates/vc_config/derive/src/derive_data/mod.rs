//! Parsed input of `#[derive(ConfigObject)]`.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod config_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, TypeAttributes};
pub(crate) use config_struct::{ConfigField, ConfigStruct};
