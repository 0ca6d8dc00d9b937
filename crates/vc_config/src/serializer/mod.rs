//! The (de)serialization engine.

mod context;
mod deserialize;
mod serialize;

pub use context::SerializeContext;

use alloc::vec::Vec;

use vc_node::ConfigNode;

use crate::parser::ParserDatabase;
use crate::{ConfigError, ConfigObject, Diagnostic, Report, SerializerSettings};

// -----------------------------------------------------------------------------
// ConfigSerializer

/// Entry point mapping [`ConfigObject`]s to and from [`ConfigNode`]s.
///
/// Holds the parser database and the settings; cheap to copy.
///
/// # Examples
///
/// ```
/// use vc_config::{ArrayHandling, ConfigSerializer, SerializerSettings, derive::ConfigObject};
///
/// #[derive(ConfigObject, Default)]
/// struct Part {
///     #[config]
///     tags: Vec<String>,
/// }
///
/// let settings = SerializerSettings::DEFAULT.with_array_handling(ArrayHandling::SeparateValues);
/// let serializer = ConfigSerializer::new().with_settings(settings);
///
/// let part = Part { tags: vec!["a".into(), "b".into()] };
/// let node = serializer.serialize(&part, "PART").unwrap();
/// assert_eq!(node.get_values("tags").collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConfigSerializer<'a> {
    database: &'a ParserDatabase,
    settings: SerializerSettings,
}

impl ConfigSerializer<'static> {
    /// Creates a serializer over the global database, with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::with_database(ParserDatabase::instance())
    }
}

impl Default for ConfigSerializer<'static> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ConfigSerializer<'a> {
    /// Creates a serializer over `database`, with default settings.
    #[inline]
    pub fn with_database(database: &'a ParserDatabase) -> Self {
        Self {
            database,
            settings: SerializerSettings::DEFAULT,
        }
    }

    #[inline]
    pub fn with_settings(mut self, settings: SerializerSettings) -> Self {
        self.settings = settings;
        self
    }

    #[inline]
    pub fn settings(&self) -> &SerializerSettings {
        &self.settings
    }

    #[inline]
    pub fn database(&self) -> &'a ParserDatabase {
        self.database
    }

    // -------------------------------------------------------------------------
    // Serialize

    /// Serializes `instance` into a new node named `node_name`.
    ///
    /// Soft member failures are logged and their members left out.
    pub fn serialize<T: ConfigObject>(
        &self,
        instance: &T,
        node_name: &str,
    ) -> Result<ConfigNode, ConfigError> {
        if node_name.is_empty() {
            return Err(ConfigError::EmptyNodeName);
        }
        let mut node = ConfigNode::new(node_name);
        self.serialize_into(instance, &mut node)?;
        Ok(node)
    }

    /// Appends the members of `instance` to `node`, returning the soft failures.
    pub fn serialize_into<T: ConfigObject>(
        &self,
        instance: &T,
        node: &mut ConfigNode,
    ) -> Result<Vec<Diagnostic>, ConfigError> {
        let mut diagnostics = Vec::new();
        let mut cx = SerializeContext::new(self.database, self.settings, &mut diagnostics);

        instance.on_pre_serialize();
        cx.save_members(instance, node)?;
        Ok(diagnostics)
    }

    // -------------------------------------------------------------------------
    // Deserialize

    /// Deserializes a new `T`, starting from `T::default()`.
    #[inline]
    pub fn deserialize<T: ConfigObject>(&self, node: &ConfigNode) -> Result<T, ConfigError> {
        self.deserialize_with_defaults(node, T::default())
    }

    /// Deserializes `node` over `defaults`; absent members keep their value.
    ///
    /// ```
    /// use vc_config::{ConfigSerializer, derive::ConfigObject};
    /// use vc_node::ConfigNode;
    ///
    /// #[derive(ConfigObject, Default)]
    /// struct Tank {
    ///     #[config]
    ///     fuel: f64,
    ///     #[config]
    ///     oxidizer: f64,
    /// }
    ///
    /// let mut node = ConfigNode::new("TANK");
    /// node.add_value("fuel", "90");
    ///
    /// let tank = ConfigSerializer::new()
    ///     .deserialize_with_defaults(&node, Tank { fuel: 1.0, oxidizer: 110.0 })
    ///     .unwrap();
    /// assert_eq!(tank.fuel, 90.0);
    /// assert_eq!(tank.oxidizer, 110.0);
    /// ```
    pub fn deserialize_with_defaults<T: ConfigObject>(
        &self,
        node: &ConfigNode,
        mut defaults: T,
    ) -> Result<T, ConfigError> {
        self.deserialize_into(node, &mut defaults)?;
        Ok(defaults)
    }

    /// Loads `node` into `instance`, returning the soft failures.
    ///
    /// On a hard error, the members loaded before it are kept.
    pub fn deserialize_into<T: ConfigObject>(
        &self,
        node: &ConfigNode,
        instance: &mut T,
    ) -> Result<Vec<Diagnostic>, ConfigError> {
        let mut diagnostics = Vec::new();
        let mut cx = SerializeContext::new(self.database, self.settings, &mut diagnostics);

        cx.load_members(node, instance)?;
        instance.on_post_deserialize();
        Ok(diagnostics)
    }

    /// Deserializes a new `T` together with the soft failures.
    pub fn deserialize_report<T: ConfigObject>(
        &self,
        node: &ConfigNode,
    ) -> Result<Report<T>, ConfigError> {
        let mut value = T::default();
        let diagnostics = self.deserialize_into(node, &mut value)?;
        Ok(Report::new(value, diagnostics))
    }
}

#[cfg(test)]
mod tests;
