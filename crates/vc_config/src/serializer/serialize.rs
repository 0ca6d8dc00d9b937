use alloc::string::String;
use alloc::vec::Vec;
use core::any::{Any, type_name};

use vc_node::ConfigNode;

use super::context::unwrap_nullable;
use crate::info::{SequenceInfo, TypeInfo};
use crate::{ArrayHandling, ConfigError, ConfigObject, MemberError, SerializeContext};

// -----------------------------------------------------------------------------
// MemberOutput

/// The converted pieces of one member, appended only once complete.
#[derive(Default)]
struct MemberOutput {
    values: Vec<String>,
    nodes: Vec<ConfigNode>,
}

impl MemberOutput {
    fn append_to(self, name: &str, node: &mut ConfigNode) {
        for value in self.values {
            node.add_value(name, value);
        }
        for child in self.nodes {
            node.add_node(child);
        }
    }
}

// -----------------------------------------------------------------------------
// Serialize path

impl SerializeContext<'_> {
    /// Appends every member of `instance` to `node`.
    ///
    /// `None` members and empty sequences emit nothing. The failure of an
    /// optional member is logged and recorded, leaving no output for it; a
    /// required member that is `None` or fails aborts with
    /// [`ConfigError::MissingValue`].
    ///
    /// The hooks of `instance` itself are not called.
    pub fn save_members<T: ConfigObject>(
        &mut self,
        instance: &T,
        node: &mut ConfigNode,
    ) -> Result<(), ConfigError> {
        for member in T::members() {
            let name = member.effective_name();
            let declared = member.type_info();

            let Some(value) = unwrap_nullable(declared, member.get(instance)) else {
                if member.is_required() {
                    return Err(ConfigError::MissingValue {
                        owner: type_name::<T>(),
                        field: name,
                        cause: None,
                    });
                }
                continue;
            };

            let settings = self.settings.with_overrides(member.meta());
            let saved = self
                .scoped(settings)
                .save_member(value, name, declared.strip_nullable());

            match saved {
                Ok(output) => output.append_to(name, node),
                Err(error) if member.is_required() => {
                    return Err(ConfigError::MissingValue {
                        owner: type_name::<T>(),
                        field: name,
                        cause: Some(error),
                    });
                }
                Err(error) => self.record("save", member, error),
            }
        }
        Ok(())
    }

    /// Runs the pre-serialize hook of `value`, then saves it as `target`
    /// into a new child named `name`.
    pub fn save_node(
        &mut self,
        value: &dyn Any,
        target: &'static TypeInfo,
        name: &str,
    ) -> Result<ConfigNode, MemberError> {
        let parser = self.node_parser(target)?;
        if let Some(info) = target.as_node() {
            info.pre_serialize(value);
        }
        let mut child = ConfigNode::new(name);
        parser.save(&mut child, value, target, self)?;
        Ok(child)
    }

    /// Saves the scalar `value` of type `target`.
    pub fn save_value(&self, value: &dyn Any, target: &'static TypeInfo) -> Result<String, MemberError> {
        let parser = self.value_parser(target)?;
        Ok(parser.save(value, target, &self.settings)?)
    }

    // -------------------------------------------------------------------------
    // Dispatch

    fn save_member(
        &mut self,
        value: &dyn Any,
        name: &str,
        target: &'static TypeInfo,
    ) -> Result<MemberOutput, MemberError> {
        let mut output = MemberOutput::default();
        match target {
            TypeInfo::Scalar(_) => output.values.push(self.save_value(value, target)?),
            TypeInfo::Node(_) => output.nodes.push(self.save_node(value, target, name)?),
            TypeInfo::Array(sequence) | TypeInfo::Collection(sequence) => {
                self.save_sequence(value, name, sequence, &mut output)?;
            }
            TypeInfo::Nullable(_) => return Err(MemberError::UnsupportedType(target.type_path())),
        }
        Ok(output)
    }

    fn save_sequence(
        &mut self,
        value: &dyn Any,
        name: &str,
        sequence: &'static SequenceInfo,
        output: &mut MemberOutput,
    ) -> Result<(), MemberError> {
        let item = sequence.item();
        let element = sequence.element();
        if !matches!(element, TypeInfo::Node(_) | TypeInfo::Scalar(_)) {
            return Err(MemberError::UnsupportedType(sequence.ty().path()));
        }

        let elements: Vec<&dyn Any> = sequence
            .iter(value)
            .ok_or(MemberError::TypeMismatch {
                expected: sequence.ty().path(),
            })?
            .into_iter()
            .filter_map(|element| unwrap_nullable(item, element))
            .collect();

        if elements.is_empty() {
            return Ok(());
        }

        match element {
            TypeInfo::Node(_) => {
                for value in elements {
                    output.nodes.push(self.save_node(value, element, name)?);
                }
            }
            TypeInfo::Scalar(_) => {
                let saved = elements
                    .into_iter()
                    .map(|value| self.save_value(value, element))
                    .collect::<Result<Vec<_>, _>>()?;
                match self.settings.array_handling {
                    ArrayHandling::SingleValue => {
                        output.values.push(self.settings.join_array(&saved));
                    }
                    ArrayHandling::SeparateValues => output.values.extend(saved),
                }
            }
            _ => unreachable!(),
        }
        Ok(())
    }
}
