use alloc::vec::Vec;
use core::fmt;

use crate::MemberError;

// -----------------------------------------------------------------------------
// Diagnostic

/// A soft failure of one member, recorded while the walk went on.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Path of the type owning the member.
    pub owner: &'static str,
    /// Field identifier of the member.
    pub member: &'static str,
    /// Name of the member in the node.
    pub field: &'static str,
    pub error: MemberError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "member `{}` (`{}`) of `{}`: {}",
            self.member, self.field, self.owner, self.error
        )
    }
}

// -----------------------------------------------------------------------------
// Report

/// A deserialized value along with the soft failures met on the way.
#[derive(Debug, Clone)]
pub struct Report<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Report<T> {
    #[inline]
    pub const fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// Returns `true` if every member was processed without failure.
    #[inline]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    #[inline]
    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}
