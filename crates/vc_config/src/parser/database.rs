use alloc::vec::Vec;
use std::sync::LazyLock;

use crate::parser::{ConfigNodeParser, ConfigValueParser, ParserEntry, ParserFilter};
use crate::parser::{ParserInstance, ParserRegistration};

// -----------------------------------------------------------------------------
// ParserDatabase

/// The value and node parser catalogs.
///
/// The global database is built once, on first use, from the builtin
/// parsers and, with the `auto_register` feature, every registration
/// submitted with [`submit_parser!`](crate::submit_parser). It is read-only
/// afterwards.
///
/// # Examples
///
/// ```
/// use vc_config::info::Typed;
/// use vc_config::parser::{FromStrParser, ParserDatabase};
///
/// let database = ParserDatabase::instance();
/// assert!(database.values().resolve(u64::type_info()).is_some());
/// assert!(database.nodes().resolve(u64::type_info()).is_none());
///
/// let by_type = database
///     .values()
///     .get_by_parser_type(core::any::TypeId::of::<FromStrParser<u64>>());
/// assert!(by_type.is_some());
/// ```
pub struct ParserDatabase {
    values: ParserFilter<dyn ConfigValueParser>,
    nodes: ParserFilter<dyn ConfigNodeParser>,
}

impl ParserDatabase {
    /// Returns the global database.
    pub fn instance() -> &'static ParserDatabase {
        static DATABASE: LazyLock<ParserDatabase> =
            LazyLock::new(|| ParserDatabase::from_registrations(global_registrations()));
        &DATABASE
    }

    /// Builds a database from exactly the given registrations.
    ///
    /// Each factory runs once. A factory error is logged and the plugin left
    /// out; the remaining plugins are still registered.
    ///
    /// ```
    /// use vc_config::ParserInitError;
    /// use vc_config::parser::{BoolParser, ParserDatabase, ParserRegistration};
    ///
    /// let broken = ParserRegistration::value::<BoolParser, bool>()
    ///     .with_factory(|| Err(ParserInitError::new("missing resource")));
    ///
    /// let database = ParserDatabase::from_registrations(
    ///     ParserRegistration::builtins().iter().copied().chain([broken]),
    /// );
    /// assert_eq!(database.values().len(), ParserRegistration::builtins().len() - 2);
    /// ```
    pub fn from_registrations(registrations: impl IntoIterator<Item = ParserRegistration>) -> Self {
        let mut values: Vec<ParserEntry<dyn ConfigValueParser>> = Vec::new();
        let mut nodes: Vec<ParserEntry<dyn ConfigNodeParser>> = Vec::new();

        for registration in registrations {
            let parser_type = registration.parser_type();
            let target = registration.target();
            let priority = registration.priority();

            match registration.instantiate() {
                Ok(ParserInstance::Value(parser)) => {
                    values.push(ParserEntry::new(parser_type, target, priority, parser));
                }
                Ok(ParserInstance::Node(parser)) => {
                    nodes.push(ParserEntry::new(parser_type, target, priority, parser));
                }
                Err(err) => {
                    log::error!("parser `{parser_type}` for `{target}` is excluded: {err}");
                }
            }
        }

        log::debug!(
            "parser database built: {} value parsers, {} node parsers",
            values.len(),
            nodes.len()
        );

        Self {
            values: ParserFilter::new(values),
            nodes: ParserFilter::new(nodes),
        }
    }

    /// Returns the value parser catalog.
    #[inline]
    pub fn values(&self) -> &ParserFilter<dyn ConfigValueParser> {
        &self.values
    }

    /// Returns the node parser catalog.
    #[inline]
    pub fn nodes(&self) -> &ParserFilter<dyn ConfigNodeParser> {
        &self.nodes
    }
}

impl core::fmt::Debug for ParserDatabase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParserDatabase")
            .field("values", &self.values)
            .field("nodes", &self.nodes)
            .finish()
    }
}

fn global_registrations() -> impl Iterator<Item = ParserRegistration> {
    let builtins = ParserRegistration::builtins().iter().copied();

    #[cfg(feature = "auto_register")]
    let submitted = inventory::iter::<ParserRegistration>.into_iter().copied();
    #[cfg(not(feature = "auto_register"))]
    let submitted = core::iter::empty();

    builtins.chain(submitted)
}
