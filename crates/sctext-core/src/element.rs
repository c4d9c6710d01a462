//! SCg element model.
//!
//! Every element in an SCg graph has a structural [`ElementId`], an optional
//! human-readable identifier, a raw SCg type string (for example
//! `node/const/perm/general` or `arc/const/pos/perm`) and a closed
//! [`ElementKind`]. Connectors refer to their endpoints by id, contours list
//! their members by id; the [`Graph`](crate::graph::Graph) arena owns every
//! element.

use std::fmt;

use crate::identifier::ElementId;

/// Marker substring identifying variable element types.
pub const VARIABLE_MARKER: &str = "var";

/// Direction flavour of a connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorKind {
    /// A directed membership/access arc.
    Arc,
    /// A common pair, oriented or not.
    Pair,
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorKind::Arc => write!(f, "arc"),
            ConnectorKind::Pair => write!(f, "pair"),
        }
    }
}

/// A relation between two elements.
///
/// The target may itself be a connector; such a connector attributes another
/// relation and is folded into the attributed connector's output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    kind: ConnectorKind,
    source: ElementId,
    target: ElementId,
}

impl Connector {
    /// Creates a connector of the given kind between `source` and `target`.
    pub fn new(kind: ConnectorKind, source: ElementId, target: ElementId) -> Self {
        Self {
            kind,
            source,
            target,
        }
    }

    pub fn kind(&self) -> ConnectorKind {
        self.kind
    }

    pub fn source(&self) -> ElementId {
        self.source
    }

    pub fn target(&self) -> ElementId {
        self.target
    }
}

/// A nested scope grouping other elements.
///
/// Members are kept in insertion order and are shared references: the same
/// element may be a member of several contours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contour {
    elements: Vec<ElementId>,
}

impl Contour {
    /// Returns the members of this contour in order.
    pub fn elements(&self) -> &[ElementId] {
        &self.elements
    }

    pub(crate) fn push(&mut self, id: ElementId) {
        if !self.elements.contains(&id) {
            self.elements.push(id);
        }
    }
}

/// The closed set of SCg element kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    /// A node carrying literal content.
    Link { content: String },
    Connector(Connector),
    Contour(Contour),
    /// An aggregation marker attached to a node.
    Bus,
}

/// Discriminant of [`ElementKind`], convenient for logging and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Node,
    Link,
    Arc,
    Pair,
    Contour,
    Bus,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Node => write!(f, "node"),
            Tag::Link => write!(f, "link"),
            Tag::Arc => write!(f, "arc"),
            Tag::Pair => write!(f, "pair"),
            Tag::Contour => write!(f, "contour"),
            Tag::Bus => write!(f, "bus"),
        }
    }
}

/// A single SCg element.
///
/// # Examples
///
/// ```
/// use sctext_core::element::{Element, Tag};
///
/// let node = Element::node("7", "concept", "node/const/perm/general");
/// assert_eq!(node.tag(), Tag::Node);
/// assert_eq!(node.identifier(), "concept");
///
/// let arc = Element::arc("8", "arc/const/pos/perm", "7", "9");
/// assert!(arc.as_connector().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    id: ElementId,
    identifier: String,
    element_type: String,
    kind: ElementKind,
}

impl Element {
    /// Creates an element from its parts.
    ///
    /// # Arguments
    ///
    /// * `id` - Structural id, unique within the graph
    /// * `identifier` - Raw human-readable identifier, possibly empty
    /// * `element_type` - Raw SCg type string
    /// * `kind` - Concrete element kind
    pub fn new(
        id: impl Into<ElementId>,
        identifier: impl Into<String>,
        element_type: impl Into<String>,
        kind: ElementKind,
    ) -> Self {
        Self {
            id: id.into(),
            identifier: identifier.into(),
            element_type: element_type.into(),
            kind,
        }
    }

    pub fn node(
        id: impl Into<ElementId>,
        identifier: impl Into<String>,
        element_type: impl Into<String>,
    ) -> Self {
        Self::new(id, identifier, element_type, ElementKind::Node)
    }

    pub fn link(
        id: impl Into<ElementId>,
        identifier: impl Into<String>,
        element_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            identifier,
            element_type,
            ElementKind::Link {
                content: content.into(),
            },
        )
    }

    /// Creates an unnamed arc. Connectors are always referenced by alias, so
    /// an identifier is rarely useful; see [`Element::with_identifier`].
    pub fn arc(
        id: impl Into<ElementId>,
        element_type: impl Into<String>,
        source: impl Into<ElementId>,
        target: impl Into<ElementId>,
    ) -> Self {
        let connector = Connector::new(ConnectorKind::Arc, source.into(), target.into());
        Self::new(id, "", element_type, ElementKind::Connector(connector))
    }

    pub fn pair(
        id: impl Into<ElementId>,
        element_type: impl Into<String>,
        source: impl Into<ElementId>,
        target: impl Into<ElementId>,
    ) -> Self {
        let connector = Connector::new(ConnectorKind::Pair, source.into(), target.into());
        Self::new(id, "", element_type, ElementKind::Connector(connector))
    }

    /// Creates an empty contour; members are attached through the
    /// [`GraphBuilder`](crate::graph::GraphBuilder).
    pub fn contour(
        id: impl Into<ElementId>,
        identifier: impl Into<String>,
        element_type: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            identifier,
            element_type,
            ElementKind::Contour(Contour::default()),
        )
    }

    pub fn bus(
        id: impl Into<ElementId>,
        identifier: impl Into<String>,
        element_type: impl Into<String>,
    ) -> Self {
        Self::new(id, identifier, element_type, ElementKind::Bus)
    }

    /// Replaces the raw identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Returns the raw identifier, possibly empty.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Returns the raw SCg type string.
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    pub fn tag(&self) -> Tag {
        match &self.kind {
            ElementKind::Node => Tag::Node,
            ElementKind::Link { .. } => Tag::Link,
            ElementKind::Connector(connector) => match connector.kind() {
                ConnectorKind::Arc => Tag::Arc,
                ConnectorKind::Pair => Tag::Pair,
            },
            ElementKind::Contour(_) => Tag::Contour,
            ElementKind::Bus => Tag::Bus,
        }
    }

    /// Returns `true` when the raw type marks a variable element.
    pub fn is_variable(&self) -> bool {
        self.element_type.contains(VARIABLE_MARKER)
    }

    /// Returns `true` for plain nodes and links, the elements declared in the
    /// node phase.
    pub fn is_node_like(&self) -> bool {
        matches!(self.kind, ElementKind::Node | ElementKind::Link { .. })
    }

    pub fn as_connector(&self) -> Option<&Connector> {
        match &self.kind {
            ElementKind::Connector(connector) => Some(connector),
            _ => None,
        }
    }

    pub fn as_contour(&self) -> Option<&Contour> {
        match &self.kind {
            ElementKind::Contour(contour) => Some(contour),
            _ => None,
        }
    }

    /// Returns the literal content of a link, `None` for every other kind.
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Link { content } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        assert_eq!(Element::node("1", "a", "node/const").tag(), Tag::Node);
        assert_eq!(Element::link("2", "", "node/const", "x").tag(), Tag::Link);
        assert_eq!(Element::arc("3", "arc", "1", "2").tag(), Tag::Arc);
        assert_eq!(Element::pair("4", "pair", "1", "2").tag(), Tag::Pair);
        assert_eq!(Element::contour("5", "", "contour").tag(), Tag::Contour);
        assert_eq!(Element::bus("6", "", "bus").tag(), Tag::Bus);
    }

    #[test]
    fn test_is_variable() {
        assert!(Element::node("1", "x", "node/var/perm/general").is_variable());
        assert!(!Element::node("1", "x", "node/const/perm/general").is_variable());
        assert!(Element::arc("2", "arc/var/pos/perm", "1", "1").is_variable());
    }

    #[test]
    fn test_connector_endpoints() {
        let arc = Element::arc("10", "arc/const/pos/perm", "11", "12");
        let connector = arc.as_connector().unwrap();

        assert_eq!(connector.kind(), ConnectorKind::Arc);
        assert_eq!(connector.source(), "11");
        assert_eq!(connector.target(), "12");
        assert!(arc.as_contour().is_none());
        assert_eq!(arc.identifier(), "");
    }

    #[test]
    fn test_link_content() {
        let link = Element::link("1", "text", "node/const/perm/general", "hello");
        assert_eq!(link.content(), Some("hello"));
        assert!(link.is_node_like());

        let node = Element::node("2", "n", "node/const/perm/general");
        assert_eq!(node.content(), None);
        assert!(node.is_node_like());
        assert!(!Element::bus("3", "", "bus").is_node_like());
    }

    #[test]
    fn test_contour_push_ignores_duplicates() {
        let mut contour = Contour::default();
        contour.push(ElementId::new("a"));
        contour.push(ElementId::new("b"));
        contour.push(ElementId::new("a"));

        assert_eq!(contour.elements().len(), 2);
        assert_eq!(contour.elements()[0], "a");
    }

    #[test]
    fn test_with_identifier() {
        let pair = Element::pair("1", "pair/const/-/perm/orient", "2", "3").with_identifier("p");
        assert_eq!(pair.identifier(), "p");
        assert_eq!(pair.tag(), Tag::Pair);
    }
}
