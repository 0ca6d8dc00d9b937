use alloc::vec::Vec;
use core::any::Any;

use crate::info::TypeInfo;
use crate::member::Member;
use crate::parser::{ConfigNodeParser, ConfigValueParser, ParserDatabase, ParserKind};
use crate::{Diagnostic, MemberError, SerializerSettings};

// -----------------------------------------------------------------------------
// SerializeContext

/// State of one (de)serialization call.
///
/// Node parsers receive it to recurse into nested objects: its settings are
/// those of the member being processed, and soft failures of nested members
/// are collected into the same diagnostics.
pub struct SerializeContext<'a> {
    pub(super) database: &'a ParserDatabase,
    pub(super) settings: SerializerSettings,
    pub(super) diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> SerializeContext<'a> {
    #[inline]
    pub fn new(
        database: &'a ParserDatabase,
        settings: SerializerSettings,
        diagnostics: &'a mut Vec<Diagnostic>,
    ) -> Self {
        Self {
            database,
            settings,
            diagnostics,
        }
    }

    #[inline]
    pub fn database(&self) -> &'a ParserDatabase {
        self.database
    }

    /// Returns the settings in effect for the current member.
    #[inline]
    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    /// Returns the soft failures recorded so far.
    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics
    }

    /// Returns a context sharing the database and diagnostics, with other settings.
    #[inline]
    pub fn scoped(&mut self, settings: SerializerSettings) -> SerializeContext<'_> {
        SerializeContext {
            database: self.database,
            settings,
            diagnostics: &mut *self.diagnostics,
        }
    }

    // -------------------------------------------------------------------------
    // Internal helpers

    pub(super) fn value_parser(
        &self,
        target: &'static TypeInfo,
    ) -> Result<&'a dyn ConfigValueParser, MemberError> {
        self.database
            .values()
            .resolve(target)
            .ok_or(MemberError::NoParser {
                kind: ParserKind::Value,
                ty: target.type_path(),
            })
    }

    pub(super) fn node_parser(
        &self,
        target: &'static TypeInfo,
    ) -> Result<&'a dyn ConfigNodeParser, MemberError> {
        self.database
            .nodes()
            .resolve(target)
            .ok_or(MemberError::NoParser {
                kind: ParserKind::Node,
                ty: target.type_path(),
            })
    }

    /// Logs and records a soft failure.
    pub(super) fn record<T>(&mut self, action: &str, member: &Member<T>, error: MemberError) {
        let owner = core::any::type_name::<T>();
        log::error!(
            "could not {action} `{}` while processing `{owner}`: {error}",
            member.storage_name(),
        );
        self.diagnostics.push(Diagnostic {
            owner,
            member: member.storage_name(),
            field: member.effective_name(),
            error,
        });
    }
}

impl core::fmt::Debug for SerializeContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SerializeContext")
            .field("settings", &self.settings)
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Checks that a parser produced a value of the requested type.
pub(super) fn ensure_type(
    value: alloc::boxed::Box<dyn Any>,
    target: &'static TypeInfo,
) -> Result<alloc::boxed::Box<dyn Any>, MemberError> {
    if (*value).type_id() == target.type_id() {
        Ok(value)
    } else {
        Err(MemberError::TypeMismatch {
            expected: target.type_path(),
        })
    }
}

/// Wraps a value of the stripped type back into every optional layer of `declared`.
pub(super) fn rewrap(
    declared: &'static TypeInfo,
    value: alloc::boxed::Box<dyn Any>,
) -> Result<alloc::boxed::Box<dyn Any>, MemberError> {
    match declared {
        TypeInfo::Nullable(nullable) => {
            let inner = rewrap(nullable.inner(), value)?;
            nullable
                .wrap(inner)
                .map_err(|_| MemberError::TypeMismatch {
                    expected: nullable.inner().type_path(),
                })
        }
        _ => Ok(value),
    }
}

/// Unwraps every optional layer of `declared`; `None` if any layer is empty.
pub(super) fn unwrap_nullable<'v>(
    declared: &'static TypeInfo,
    value: &'v dyn Any,
) -> Option<&'v dyn Any> {
    let mut info = declared;
    let mut value = value;
    while let TypeInfo::Nullable(nullable) = info {
        value = nullable.unwrap(value)?;
        info = nullable.inner();
    }
    Some(value)
}
