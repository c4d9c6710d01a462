//! SCg type to SCs token encoding.
//!
//! SCg documents describe element types as slash-separated strings such as
//! `node/const/perm/struct` or `arc/var/pos/perm`. SCs needs a node type
//! keyword for declarations (`sc_node_structure`) and a connector designation
//! for relation lines (`_->`). The [`TypeEncoding`] trait is the seam the
//! serializer uses; [`TypeTable`] is the built-in implementation, which can
//! be extended or overridden entry by entry.

use indexmap::IndexMap;

/// Maps raw SCg types to SCs tokens.
///
/// Both lookups are total in spirit: an unknown type yields `None` and the
/// caller supplies its own fallback.
pub trait TypeEncoding {
    /// Returns the SCs node type keyword for an SCg node type.
    fn node_token(&self, scg_type: &str) -> Option<&str>;

    /// Returns the SCs connector designation for an SCg connector type.
    fn connector_symbol(&self, scg_type: &str) -> Option<&str>;
}

const NODE_TYPES: &[(&str, &str)] = &[
    ("node/-/-/not_define", "sc_node"),
    ("node/-/not_define", "sc_node"),
    ("node/const/perm/general", "sc_node"),
    ("node/const/perm/terminal", "sc_node_material"),
    ("node/const/perm/material", "sc_node_material"),
    ("node/const/perm/abstract", "sc_node_abstract"),
    ("node/const/perm/struct", "sc_node_structure"),
    ("node/const/perm/tuple", "sc_node_tuple"),
    ("node/const/perm/role", "sc_node_role_relation"),
    ("node/const/perm/relation", "sc_node_non_role_relation"),
    ("node/const/perm/group", "sc_node_class"),
    ("node/const/perm/super_group", "sc_node_superclass"),
    ("node/var/perm/general", "sc_node"),
    ("node/var/perm/terminal", "sc_node_material"),
    ("node/var/perm/material", "sc_node_material"),
    ("node/var/perm/abstract", "sc_node_abstract"),
    ("node/var/perm/struct", "sc_node_structure"),
    ("node/var/perm/tuple", "sc_node_tuple"),
    ("node/var/perm/role", "sc_node_role_relation"),
    ("node/var/perm/relation", "sc_node_non_role_relation"),
    ("node/var/perm/group", "sc_node_class"),
    ("node/var/perm/super_group", "sc_node_superclass"),
    // Legacy GWF 1.x spellings.
    ("node/const/general_node", "sc_node"),
    ("node/const/terminal", "sc_node_material"),
    ("node/const/material", "sc_node_material"),
    ("node/const/struct", "sc_node_structure"),
    ("node/const/tuple", "sc_node_tuple"),
    ("node/const/attribute", "sc_node_role_relation"),
    ("node/const/relation", "sc_node_non_role_relation"),
    ("node/const/group", "sc_node_class"),
    ("node/var/general_node", "sc_node"),
    ("node/var/struct", "sc_node_structure"),
    ("node/var/tuple", "sc_node_tuple"),
    ("node/var/attribute", "sc_node_role_relation"),
    ("node/var/relation", "sc_node_non_role_relation"),
    ("node/var/group", "sc_node_class"),
];

const CONNECTOR_SYMBOLS: &[(&str, &str)] = &[
    ("arc/-/-", ">"),
    ("arc/const/pos/perm", "->"),
    ("arc/const/neg/perm", "-|>"),
    ("arc/const/fuz/perm", "-/>"),
    ("arc/const/pos/temp", "~>"),
    ("arc/const/neg/temp", "~|>"),
    ("arc/const/fuz/temp", "~/>"),
    ("arc/var/pos/perm", "_->"),
    ("arc/var/neg/perm", "_-|>"),
    ("arc/var/fuz/perm", "_-/>"),
    ("arc/var/pos/temp", "_~>"),
    ("arc/var/neg/temp", "_~|>"),
    ("arc/var/fuz/temp", "_~/>"),
    ("arc/const/pos", "->"),
    ("arc/var/pos", "_->"),
    ("pair/-/-/-/orient", ">"),
    ("pair/-/-/-/noorient", "<>"),
    ("pair/const/-/perm/orient", "=>"),
    ("pair/const/-/perm/noorien", "<=>"),
    ("pair/const/-/perm/noorient", "<=>"),
    ("pair/var/-/perm/orient", "_=>"),
    ("pair/var/-/perm/noorien", "_<=>"),
    ("pair/var/-/perm/noorient", "_<=>"),
    ("pair/const/synonym/-/noorient", "<=>"),
    ("pair/const/temp/-/orient", "..>"),
];

/// Built-in, extendable [`TypeEncoding`].
///
/// # Examples
///
/// ```
/// use sctext_core::types::{TypeEncoding, TypeTable};
///
/// let table = TypeTable::default().with_node_token("node/const/perm/custom", "sc_node_class");
///
/// assert_eq!(table.node_token("node/const/perm/struct"), Some("sc_node_structure"));
/// assert_eq!(table.node_token("node/const/perm/custom"), Some("sc_node_class"));
/// assert_eq!(table.connector_symbol("arc/var/pos/perm"), Some("_->"));
/// assert_eq!(table.connector_symbol("unknown"), None);
/// ```
#[derive(Debug, Clone)]
pub struct TypeTable {
    nodes: IndexMap<String, String>,
    connectors: IndexMap<String, String>,
}

impl TypeTable {
    /// Creates a table with no entries at all.
    pub fn empty() -> Self {
        Self {
            nodes: IndexMap::new(),
            connectors: IndexMap::new(),
        }
    }

    /// Adds or replaces the node token for `scg_type`.
    pub fn with_node_token(mut self, scg_type: impl Into<String>, token: impl Into<String>) -> Self {
        self.nodes.insert(scg_type.into(), token.into());
        self
    }

    /// Adds or replaces the connector designation for `scg_type`.
    pub fn with_connector_symbol(
        mut self,
        scg_type: impl Into<String>,
        symbol: impl Into<String>,
    ) -> Self {
        self.connectors.insert(scg_type.into(), symbol.into());
        self
    }

    /// Merges node and connector entries, replacing existing ones.
    pub fn extend<N, C>(mut self, nodes: N, connectors: C) -> Self
    where
        N: IntoIterator<Item = (String, String)>,
        C: IntoIterator<Item = (String, String)>,
    {
        self.nodes.extend(nodes);
        self.connectors.extend(connectors);
        self
    }

    /// Returns the number of node and connector entries.
    pub fn entry_counts(&self) -> (usize, usize) {
        (self.nodes.len(), self.connectors.len())
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        let to_owned = |&(scg, scs): &(&str, &str)| (scg.to_string(), scs.to_string());
        Self {
            nodes: NODE_TYPES.iter().map(to_owned).collect(),
            connectors: CONNECTOR_SYMBOLS.iter().map(to_owned).collect(),
        }
    }
}

impl TypeEncoding for TypeTable {
    fn node_token(&self, scg_type: &str) -> Option<&str> {
        self.nodes
            .get(scg_type)
            .map(String::as_str)
            .filter(|token| !token.is_empty())
    }

    fn connector_symbol(&self, scg_type: &str) -> Option<&str> {
        self.connectors
            .get(scg_type)
            .map(String::as_str)
            .filter(|symbol| !symbol.is_empty())
    }
}
