//! TOML graph documents.
//!
//! A document is a flat list of `[[element]]` tables:
//!
//! ```toml
//! [[element]]
//! id = "1"
//! identifier = "apple"
//! type = "node/const/perm/general"
//! kind = "node"
//!
//! [[element]]
//! id = "3"
//! type = "arc/const/pos/perm"
//! kind = "arc"
//! source = "2"
//! target = "1"
//! parent = "basket"
//! ```
//!
//! Elements without `parent` form the top-level collection in document
//! order. `parent` names the contour that owns an element; a contour's
//! `members` list adds shared references to elements owned elsewhere.

use std::collections::HashSet;

use log::{debug, trace};
use serde::Deserialize;

use sctext_core::{
    element::Element,
    graph::{Graph, GraphBuilder},
    identifier::ElementId,
};

use crate::error::ScsError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    #[serde(default, rename = "element")]
    elements: Vec<ElementEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    Node,
    Link,
    Arc,
    Pair,
    Contour,
    Bus,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementEntry {
    id: String,
    #[serde(default)]
    identifier: String,
    #[serde(default, rename = "type")]
    element_type: String,
    kind: EntryKind,
    source: Option<String>,
    target: Option<String>,
    parent: Option<String>,
    content: Option<String>,
    #[serde(default)]
    members: Vec<String>,
}

impl ElementEntry {
    fn to_element(&self) -> Result<Element, ScsError> {
        let (id, identifier, element_type) = (
            self.id.as_str(),
            self.identifier.as_str(),
            self.element_type.as_str(),
        );

        let element = match self.kind {
            EntryKind::Node => Element::node(id, identifier, element_type),
            EntryKind::Link => Element::link(
                id,
                identifier,
                element_type,
                self.content.as_deref().unwrap_or_default(),
            ),
            EntryKind::Arc => {
                let (source, target) = self.endpoints()?;
                Element::arc(id, element_type, source, target).with_identifier(identifier)
            }
            EntryKind::Pair => {
                let (source, target) = self.endpoints()?;
                Element::pair(id, element_type, source, target).with_identifier(identifier)
            }
            EntryKind::Contour => Element::contour(id, identifier, element_type),
            EntryKind::Bus => Element::bus(id, identifier, element_type),
        };

        if !self.members.is_empty() && !matches!(self.kind, EntryKind::Contour) {
            return Err(ScsError::Input(format!(
                "element `{}` lists members but is not a contour",
                self.id
            )));
        }
        Ok(element)
    }

    fn endpoints(&self) -> Result<(&str, &str), ScsError> {
        match (self.source.as_deref(), self.target.as_deref()) {
            (Some(source), Some(target)) => Ok((source, target)),
            _ => Err(ScsError::Input(format!(
                "connector `{}` needs both `source` and `target`",
                self.id
            ))),
        }
    }
}

/// Parses a TOML graph document and builds a validated [`Graph`].
///
/// # Errors
///
/// - [`ScsError::Document`] if the text is not a well-formed document; the
///   error keeps `source` for span-based reporting.
/// - [`ScsError::Input`] for a connector without endpoints, members on a
///   non-contour, or a `parent` that never resolves.
/// - [`ScsError::Graph`] for duplicate ids and dangling references.
///
/// # Examples
///
/// ```
/// let graph = sctext::source::parse_graph(
///     r#"
///     [[element]]
///     id = "1"
///     identifier = "apple"
///     kind = "node"
///     "#,
/// )?;
/// assert_eq!(graph.len(), 1);
/// # Ok::<(), sctext::ScsError>(())
/// ```
pub fn parse_graph(source: &str) -> Result<Graph, ScsError> {
    let document: Document =
        toml::from_str(source).map_err(|err| ScsError::new_document_error(err, source))?;
    debug!(entries = document.elements.len(); "Graph document decoded");

    let mut builder = GraphBuilder::new();
    let mut inserted = HashSet::new();

    let (roots, mut owned): (Vec<_>, Vec<_>) = document
        .elements
        .iter()
        .partition(|entry| entry.parent.is_none());

    for entry in roots {
        let id = builder.add(entry.to_element()?)?;
        inserted.insert(id);
    }

    // Owned elements may name a parent that is itself owned further down the
    // document, so keep sweeping until nothing is left or nothing moves.
    while !owned.is_empty() {
        let before = owned.len();
        let mut deferred = Vec::new();

        for entry in owned {
            let parent = ElementId::new(entry.parent.as_deref().unwrap_or_default());
            if inserted.contains(&parent) {
                let id = builder.add_to(parent, entry.to_element()?)?;
                trace!(parent:% = parent, id:% = id; "Attached owned element");
                inserted.insert(id);
            } else {
                deferred.push(entry);
            }
        }

        if deferred.len() == before {
            let stuck = &deferred[0];
            return Err(ScsError::Input(format!(
                "element `{}` names parent `{}`, which is not a reachable contour",
                stuck.id,
                stuck.parent.as_deref().unwrap_or_default()
            )));
        }
        owned = deferred;
    }

    for entry in &document.elements {
        let contour = ElementId::new(&entry.id);
        for member in &entry.members {
            builder.include(contour, ElementId::new(member))?;
        }
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use sctext_core::{GraphError, element::Tag};

    use super::*;

    #[test]
    fn test_roots_and_owned_elements() {
        let graph = parse_graph(
            r#"
            [[element]]
            id = "apple"
            identifier = "apple"
            type = "node/const/perm/general"
            kind = "node"

            [[element]]
            id = "basket"
            kind = "contour"

            [[element]]
            id = "text"
            kind = "link"
            content = "hello"
            parent = "basket"
            "#,
        )
        .unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.roots().len(), 2);
        assert_eq!(graph.members(ElementId::new("basket"))[0], "text");
        let link = graph.get(ElementId::new("text")).unwrap();
        assert_eq!(link.content(), Some("hello"));
    }

    #[test]
    fn test_parent_declared_later() {
        let graph = parse_graph(
            r#"
            [[element]]
            id = "leaf"
            kind = "node"
            parent = "inner"

            [[element]]
            id = "inner"
            kind = "contour"
            parent = "outer"

            [[element]]
            id = "outer"
            kind = "contour"
            "#,
        )
        .unwrap();

        assert_eq!(graph.roots().len(), 1);
        assert_eq!(graph.members(ElementId::new("outer"))[0], "inner");
        assert_eq!(graph.members(ElementId::new("inner"))[0], "leaf");
    }

    #[test]
    fn test_shared_members() {
        let graph = parse_graph(
            r#"
            [[element]]
            id = "a"
            kind = "node"

            [[element]]
            id = "k"
            kind = "contour"
            members = ["a"]
            "#,
        )
        .unwrap();

        assert_eq!(graph.members(ElementId::new("k"))[0], "a");
        assert_eq!(graph.roots().len(), 2);
    }

    #[test]
    fn test_connectors() {
        let graph = parse_graph(
            r#"
            [[element]]
            id = "a"
            kind = "node"

            [[element]]
            id = "b"
            kind = "node"

            [[element]]
            id = "p"
            kind = "pair"
            type = "pair/const/-/perm/orient"
            source = "a"
            target = "b"
            "#,
        )
        .unwrap();

        let pair = graph.get(ElementId::new("p")).unwrap();
        assert_eq!(pair.tag(), Tag::Pair);
        assert_eq!(pair.as_connector().unwrap().target(), "b");
    }

    #[test]
    fn test_connector_without_target() {
        let err = parse_graph(
            r#"
            [[element]]
            id = "e"
            kind = "arc"
            source = "a"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ScsError::Input(_)));
    }

    #[test]
    fn test_unresolvable_parent() {
        let err = parse_graph(
            r#"
            [[element]]
            id = "x"
            kind = "node"
            parent = "nowhere"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ScsError::Input(_)));
    }

    #[test]
    fn test_parent_cycle() {
        let err = parse_graph(
            r#"
            [[element]]
            id = "a"
            kind = "contour"
            parent = "b"

            [[element]]
            id = "b"
            kind = "contour"
            parent = "a"
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ScsError::Input(_)));
    }

    #[test]
    fn test_dangling_reference() {
        let err = parse_graph(
            r#"
            [[element]]
            id = "a"
            kind = "node"

            [[element]]
            id = "e"
            kind = "arc"
            source = "a"
            target = "ghost"
            "#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ScsError::Graph(GraphError::UnknownElement { .. })
        ));
    }

    #[test]
    fn test_malformed_document() {
        let err = parse_graph("[[element]]\nid = 1\n").unwrap_err();
        assert!(matches!(err, ScsError::Document { .. }));

        let err = parse_graph("[[element]]\nid = \"a\"\nkind = \"blob\"\n").unwrap_err();
        assert!(matches!(err, ScsError::Document { .. }));
    }

    #[test]
    fn test_empty_document() {
        let graph = parse_graph("").unwrap();
        assert!(graph.is_empty());
    }
}
