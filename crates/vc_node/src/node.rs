use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::ConfigValue;

// -----------------------------------------------------------------------------
// ConfigNode

/// A named node of a hierarchical key/value document.
///
/// Values and child nodes are kept in insertion order and their names may
/// repeat. Lookups by name are linear scans, returning the *first* match for
/// the single-item accessors.
///
/// The node only ever grows through [`add_value`](Self::add_value) and
/// [`add_node`](Self::add_node); existing entries are never rewritten.
///
/// # Examples
///
/// ```
/// use vc_node::ConfigNode;
///
/// let mut node = ConfigNode::new("ROOT");
/// assert!(node.is_empty());
///
/// node.add_value("key", "1");
/// node.add_node(ConfigNode::new("CHILD"));
/// node.add_node(ConfigNode::new("CHILD"));
///
/// assert!(node.has_value("key"));
/// assert_eq!(node.get_nodes("CHILD").count(), 2);
/// assert!(node.get_node("MISSING").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConfigNode {
    name: String,
    values: Vec<ConfigValue>,
    nodes: Vec<ConfigNode>,
}

impl ConfigNode {
    /// Creates an empty node with the given name.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Returns the node name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the node name.
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns `true` if the node holds neither values nor child nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.nodes.is_empty()
    }

    // -------------------------------------------------------------------------
    // Values

    /// Returns every value entry in insertion order.
    #[inline]
    pub fn values(&self) -> &[ConfigValue] {
        &self.values
    }

    /// Returns the number of value entries.
    #[inline]
    pub fn value_count(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if at least one value is stored under `name`.
    pub fn has_value(&self, name: &str) -> bool {
        self.values.iter().any(|v| v.is_named(name))
    }

    /// Returns the first value stored under `name`.
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.is_named(name))
            .map(ConfigValue::value)
    }

    /// Returns every value stored under `name`, in insertion order.
    pub fn get_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .iter()
            .filter(move |v| v.is_named(name))
            .map(ConfigValue::value)
    }

    /// Parses the first value stored under `name`.
    ///
    /// Returns `None` when the value is missing or cannot be parsed.
    ///
    /// ```
    /// # use vc_node::ConfigNode;
    /// let mut node = ConfigNode::new("N");
    /// node.add_value("mass", "1.25");
    /// node.add_value("flag", "yes");
    ///
    /// assert_eq!(node.try_parse_value::<f32>("mass"), Some(1.25));
    /// assert_eq!(node.try_parse_value::<bool>("flag"), None);
    /// assert_eq!(node.try_parse_value::<i32>("missing"), None);
    /// ```
    pub fn try_parse_value<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get_value(name)?.parse().ok()
    }

    /// Appends a value entry.
    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push(ConfigValue::new(name, value));
    }

    // -------------------------------------------------------------------------
    // Nodes

    /// Returns every child node in insertion order.
    #[inline]
    pub fn nodes(&self) -> &[ConfigNode] {
        &self.nodes
    }

    /// Returns the number of child nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if at least one child node is named `name`.
    pub fn has_node(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n.name == name)
    }

    /// Returns the first child node named `name`.
    pub fn get_node(&self, name: &str) -> Option<&ConfigNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    /// Returns every child node named `name`, in insertion order.
    pub fn get_nodes<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ConfigNode> + 'a {
        self.nodes.iter().filter(move |n| n.name == name)
    }

    /// Appends a child node and returns a reference to it.
    pub fn add_node(&mut self, node: ConfigNode) -> &mut ConfigNode {
        self.nodes.push(node);
        let last = self.nodes.len() - 1;
        &mut self.nodes[last]
    }

    /// Appends a copy of every value and child node of `other`.
    ///
    /// The name of `other` is ignored.
    pub fn append_contents(&mut self, other: &ConfigNode) {
        self.values.extend(other.values.iter().cloned());
        self.nodes.extend(other.nodes.iter().cloned());
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ConfigNode;
    use alloc::vec::Vec;

    #[test]
    fn repeated_names_keep_order() {
        let mut node = ConfigNode::new("ROOT");
        node.add_value("a", "1");
        node.add_value("b", "x");
        node.add_value("a", "2");

        assert_eq!(node.get_value("a"), Some("1"));
        assert_eq!(node.get_values("a").collect::<Vec<_>>(), ["1", "2"]);
        assert_eq!(node.value_count(), 3);
    }

    #[test]
    fn add_node_returns_inserted() {
        let mut node = ConfigNode::new("ROOT");
        node.add_node(ConfigNode::new("CHILD")).add_value("k", "v");

        let child = node.get_node("CHILD").unwrap();
        assert_eq!(child.get_value("k"), Some("v"));
        assert!(node.has_node("CHILD"));
        assert!(!node.has_value("CHILD"));
    }

    #[test]
    fn append_contents_ignores_name() {
        let mut source = ConfigNode::new("SOURCE");
        source.add_value("k", "v");
        source.add_node(ConfigNode::new("INNER"));

        let mut target = ConfigNode::new("TARGET");
        target.append_contents(&source);

        assert_eq!(target.name(), "TARGET");
        assert_eq!(target.get_value("k"), Some("v"));
        assert_eq!(target.node_count(), 1);
    }
}
