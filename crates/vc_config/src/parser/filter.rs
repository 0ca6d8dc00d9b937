use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use crate::TypeIdMap;
use crate::info::{Type, TypeInfo};

// -----------------------------------------------------------------------------
// ParserEntry

/// A constructed parser with its declaration.
pub struct ParserEntry<P: ?Sized> {
    parser_type: Type,
    target: Type,
    priority: i32,
    parser: Box<P>,
}

impl<P: ?Sized> ParserEntry<P> {
    #[inline]
    pub fn new(parser_type: Type, target: Type, priority: i32, parser: Box<P>) -> Self {
        Self {
            parser_type,
            target,
            priority,
            parser,
        }
    }

    #[inline]
    pub const fn parser_type(&self) -> Type {
        self.parser_type
    }

    #[inline]
    pub const fn target(&self) -> Type {
        self.target
    }

    #[inline]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    #[inline]
    pub fn parser(&self) -> &P {
        &self.parser
    }
}

impl<P: ?Sized> fmt::Debug for ParserEntry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserEntry")
            .field("parser_type", &self.parser_type)
            .field("target", &self.target)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ParserFilter

/// One catalog of parsers, resolving the best parser for a requested type.
///
/// Immutable once built.
pub struct ParserFilter<P: ?Sized> {
    // Sorted by parser type path.
    entries: Vec<ParserEntry<P>>,
    by_target: TypeIdMap<usize>,
    by_parser: TypeIdMap<usize>,
}

impl<P: ?Sized> ParserFilter<P> {
    /// Builds the catalog.
    ///
    /// When two parsers declare the same exact target, the higher priority
    /// keeps the exact slot, and on a tie the first in parser type path order.
    /// The other one stays an assignability candidate.
    pub fn new(mut entries: Vec<ParserEntry<P>>) -> Self {
        entries.sort_by(|a, b| a.parser_type.path().cmp(b.parser_type.path()));

        let mut by_target = TypeIdMap::new();
        let mut by_parser = TypeIdMap::new();

        for (index, entry) in entries.iter().enumerate() {
            by_parser.get_or_insert(entry.parser_type.id(), || index);

            let slot = by_target.get_or_insert(entry.target.id(), || index);
            if *slot == index {
                continue;
            }

            let holder: &ParserEntry<P> = &entries[*slot];
            let (kept, dropped) = if entry.priority > holder.priority {
                *slot = index;
                (entry, holder)
            } else {
                (holder, entry)
            };
            log::warn!(
                "parsers `{}` and `{}` both target `{}`; `{}` is used for exact matches",
                kept.parser_type,
                dropped.parser_type,
                entry.target,
                kept.parser_type,
            );
        }

        Self {
            entries,
            by_target,
            by_parser,
        }
    }

    /// Returns the number of parsers.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over every entry, in parser type path order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ParserEntry<P>> {
        self.entries.iter()
    }

    /// Returns the entry holding the exact slot of `target`.
    #[inline]
    pub fn get_exact(&self, target: TypeId) -> Option<&ParserEntry<P>> {
        self.by_target.get(&target).map(|&index| &self.entries[index])
    }

    /// Returns the parser of type `parser_type`.
    #[inline]
    pub fn get_by_parser_type(&self, parser_type: TypeId) -> Option<&P> {
        self.by_parser
            .get(&parser_type)
            .map(|&index| self.entries[index].parser())
    }

    /// Resolves the entry best matching `target`.
    ///
    /// The exact match wins regardless of priority. Otherwise the candidate
    /// `target` is assignable to with the strictly highest priority is
    /// chosen; on equal priorities, the first in parser type path order.
    pub fn resolve_entry(&self, target: &TypeInfo) -> Option<&ParserEntry<P>> {
        if let Some(entry) = self.get_exact(target.type_id()) {
            return Some(entry);
        }

        let mut best: Option<&ParserEntry<P>> = None;
        for entry in &self.entries {
            if !target.is_assignable_to(entry.target.id()) {
                continue;
            }
            if best.is_none_or(|best| entry.priority > best.priority) {
                best = Some(entry);
            }
        }
        best
    }

    /// Resolves the parser best matching `target`. See [`resolve_entry`](Self::resolve_entry).
    #[inline]
    pub fn resolve(&self, target: &TypeInfo) -> Option<&P> {
        self.resolve_entry(target).map(ParserEntry::parser)
    }
}

impl<P: ?Sized> fmt::Debug for ParserFilter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
