use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, type_name};

use vc_node::ConfigNode;

use super::context::{ensure_type, rewrap};
use crate::info::{SequenceInfo, TypeInfo};
use crate::{ArrayHandling, ConfigError, ConfigObject, MemberError, SerializeContext};

impl SerializeContext<'_> {
    /// Loads every member of `instance` from `node`.
    ///
    /// A member absent from `node` keeps its current value. The failure of an
    /// optional member is logged and recorded, and the walk goes on; a
    /// required member absent or failing aborts with [`ConfigError::MissingField`].
    ///
    /// The hooks of `instance` itself are not called.
    pub fn load_members<T: ConfigObject>(
        &mut self,
        node: &ConfigNode,
        instance: &mut T,
    ) -> Result<(), ConfigError> {
        for member in T::members() {
            let declared = member.type_info();
            let settings = self.settings.with_overrides(member.meta());

            let loaded = self
                .scoped(settings)
                .load_member(node, member.effective_name(), declared);

            let result = match loaded {
                Ok(Some(value)) => member.set(instance, value).map_err(|_| MemberError::TypeMismatch {
                    expected: declared.type_path(),
                }),
                Ok(None) if member.is_required() => {
                    return Err(ConfigError::MissingField {
                        owner: type_name::<T>(),
                        field: member.effective_name(),
                        cause: None,
                    });
                }
                Ok(None) => Ok(()),
                Err(error) => Err(error),
            };

            if let Err(error) = result {
                if member.is_required() {
                    return Err(ConfigError::MissingField {
                        owner: type_name::<T>(),
                        field: member.effective_name(),
                        cause: Some(error),
                    });
                }
                self.record("load", member, error);
            }
        }
        Ok(())
    }

    /// Parses the child node `node` as `target`, then runs its post-deserialize hook.
    pub fn parse_node(
        &mut self,
        node: &ConfigNode,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Any>, MemberError> {
        let parser = self.node_parser(target)?;
        let mut value = ensure_type(parser.parse(node, target, self)?, target)?;
        if let Some(info) = target.as_node() {
            info.post_deserialize(&mut *value);
        }
        Ok(value)
    }

    /// Parses `text` as the scalar `target`.
    pub fn parse_value(
        &self,
        text: &str,
        target: &'static TypeInfo,
    ) -> Result<Box<dyn Any>, MemberError> {
        let parser = self.value_parser(target)?;
        ensure_type(parser.parse(text, target, &self.settings)?, target)
    }

    // -------------------------------------------------------------------------
    // Dispatch

    /// Returns `None` when the member is absent from `node`.
    fn load_member(
        &mut self,
        node: &ConfigNode,
        name: &str,
        declared: &'static TypeInfo,
    ) -> Result<Option<Box<dyn Any>>, MemberError> {
        let target = declared.strip_nullable();

        let loaded = match target {
            TypeInfo::Scalar(_) => match node.get_value(name) {
                Some(text) => Some(self.parse_value(text, target)?),
                None => None,
            },
            TypeInfo::Node(_) => match node.get_node(name) {
                Some(child) => Some(self.parse_node(child, target)?),
                None => None,
            },
            TypeInfo::Array(sequence) | TypeInfo::Collection(sequence) => {
                self.load_sequence(node, name, sequence)?
            }
            TypeInfo::Nullable(_) => return Err(MemberError::UnsupportedType(target.type_path())),
        };

        loaded.map(|value| rewrap(declared, value)).transpose()
    }

    fn load_sequence(
        &mut self,
        node: &ConfigNode,
        name: &str,
        sequence: &'static SequenceInfo,
    ) -> Result<Option<Box<dyn Any>>, MemberError> {
        let item = sequence.item();
        let element = sequence.element();
        let mut items: Vec<Box<dyn Any>> = Vec::new();

        match element {
            TypeInfo::Node(_) => {
                for child in node.get_nodes(name) {
                    let value = self.parse_node(child, element)?;
                    items.push(rewrap(item, value)?);
                }
            }
            TypeInfo::Scalar(_) => {
                let pieces: Vec<&str> = match self.settings.array_handling {
                    ArrayHandling::SingleValue => node
                        .get_value(name)
                        .map(|text| self.settings.split_array(text))
                        .unwrap_or_default(),
                    ArrayHandling::SeparateValues => node.get_values(name).collect(),
                };
                for piece in pieces {
                    let value = self.parse_value(piece, element)?;
                    items.push(rewrap(item, value)?);
                }
            }
            _ => return Err(MemberError::UnsupportedType(sequence.ty().path())),
        }

        // A fixed-size array cannot be built from nothing.
        if items.is_empty() && sequence.fixed_len().is_some_and(|len| len > 0) {
            return Ok(None);
        }
        sequence.collect(items).map(Some)
    }
}
