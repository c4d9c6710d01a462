//! Id-indexed element arena.
//!
//! A [`Graph`] owns every element of an SCg document in an ordered
//! [`IndexMap`] keyed by [`ElementId`]. The top level of the document is an
//! ordered list of root ids; each contour lists its own members the same
//! way. Connectors and contours only store ids, so cross-contour references
//! and shared members need no ownership bookkeeping.
//!
//! Graphs are assembled with [`GraphBuilder`], which checks that every
//! reference resolves before handing the graph out.

use indexmap::IndexMap;
use log::trace;

use crate::{
    element::{Element, ElementKind},
    error::GraphError,
    identifier::ElementId,
};

/// An immutable SCg graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    elements: IndexMap<ElementId, Element>,
    roots: Vec<ElementId>,
}

impl Graph {
    /// Returns the element with the given id, if it exists.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Returns the ids of the top-level collection in insertion order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Returns the members of a contour, or an empty slice when `id` is not a
    /// contour.
    pub fn members(&self, id: ElementId) -> &[ElementId] {
        self.get(id)
            .and_then(Element::as_contour)
            .map(|contour| contour.elements())
            .unwrap_or_default()
    }

    /// Returns an iterator over every element in insertion order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Returns the total number of elements in the arena.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Incremental, validating constructor for [`Graph`].
///
/// # Examples
///
/// ```
/// use sctext_core::{element::Element, graph::GraphBuilder};
///
/// let mut builder = GraphBuilder::new();
/// builder.add(Element::node("1", "apple", "node/const/perm/general"))?;
/// builder.add(Element::node("2", "fruit", "node/const/perm/group"))?;
/// let structure = builder.add(Element::contour("3", "basket", "contour"))?;
/// builder.add_to(structure, Element::arc("4", "arc/const/pos/perm", "2", "1"))?;
///
/// let graph = builder.build()?;
/// assert_eq!(graph.roots().len(), 3);
/// assert_eq!(graph.members(structure).len(), 1);
/// # Ok::<(), sctext_core::GraphError>(())
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    elements: IndexMap<ElementId, Element>,
    roots: Vec<ElementId>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element to the top-level collection.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateElement`] if the id is already taken.
    pub fn add(&mut self, element: Element) -> Result<ElementId, GraphError> {
        let id = self.insert(element)?;
        self.roots.push(id);
        Ok(id)
    }

    /// Adds an element owned by the contour `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already taken, the parent does not exist
    /// yet, or the parent is not a contour.
    pub fn add_to(&mut self, parent: ElementId, element: Element) -> Result<ElementId, GraphError> {
        let referrer = element.id();
        self.check_contour(parent, referrer)?;
        let id = self.insert(element)?;
        self.include(parent, id)?;
        Ok(id)
    }

    /// Adds an already registered (or later registered) element to the
    /// members of `parent`.
    ///
    /// Members are shared references: one element may belong to several
    /// contours. Whether `member` exists is checked by [`GraphBuilder::build`].
    pub fn include(&mut self, parent: ElementId, member: ElementId) -> Result<(), GraphError> {
        self.check_contour(parent, member)?;
        if let Some(ElementKind::Contour(contour)) =
            self.elements.get_mut(&parent).map(Element::kind_mut)
        {
            trace!(parent:% = parent, member:% = member; "Adding contour member");
            contour.push(member);
        }
        Ok(())
    }

    /// Validates every reference and returns the finished graph.
    ///
    /// # Errors
    ///
    /// - [`GraphError::SelfReferencingConnector`] for a connector that is its
    ///   own source or target.
    /// - [`GraphError::UnknownElement`] for a connector endpoint, contour
    ///   member or root that is not in the arena.
    pub fn build(self) -> Result<Graph, GraphError> {
        for element in self.elements.values() {
            let referrer = element.id();
            match element.kind() {
                ElementKind::Connector(connector) => {
                    if connector.source() == referrer || connector.target() == referrer {
                        return Err(GraphError::SelfReferencingConnector(referrer));
                    }
                    self.check_known(referrer, connector.source())?;
                    self.check_known(referrer, connector.target())?;
                }
                ElementKind::Contour(contour) => {
                    for &member in contour.elements() {
                        self.check_known(referrer, member)?;
                    }
                }
                ElementKind::Node | ElementKind::Link { .. } | ElementKind::Bus => {}
            }
        }

        Ok(Graph {
            elements: self.elements,
            roots: self.roots,
        })
    }

    fn insert(&mut self, element: Element) -> Result<ElementId, GraphError> {
        let id = element.id();
        if self.elements.contains_key(&id) {
            return Err(GraphError::DuplicateElement(id));
        }
        self.elements.insert(id, element);
        Ok(id)
    }

    fn check_known(&self, referrer: ElementId, id: ElementId) -> Result<(), GraphError> {
        if self.elements.contains_key(&id) {
            Ok(())
        } else {
            Err(GraphError::UnknownElement {
                referrer,
                missing: id,
            })
        }
    }

    fn check_contour(&self, parent: ElementId, referrer: ElementId) -> Result<(), GraphError> {
        match self.elements.get(&parent) {
            Some(element) if element.as_contour().is_some() => Ok(()),
            Some(element) => Err(GraphError::NotAContour {
                parent,
                tag: element.tag(),
            }),
            None => Err(GraphError::UnknownElement {
                referrer,
                missing: parent,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> Element {
        Element::node(id, "", "node/const/perm/general")
    }

    #[test]
    fn test_empty_graph() {
        let graph = GraphBuilder::new().build().unwrap();

        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.roots().is_empty());
    }

    #[test]
    fn test_roots_keep_insertion_order() {
        let mut builder = GraphBuilder::new();
        builder.add(node("c")).unwrap();
        builder.add(node("a")).unwrap();
        builder.add(node("b")).unwrap();
        let graph = builder.build().unwrap();

        let roots: Vec<String> = graph.roots().iter().map(ToString::to_string).collect();
        assert_eq!(roots, ["c", "a", "b"]);
    }

    #[test]
    fn test_duplicate_element() {
        let mut builder = GraphBuilder::new();
        builder.add(node("dup")).unwrap();

        let err = builder.add(node("dup")).unwrap_err();
        assert_eq!(err, GraphError::DuplicateElement(ElementId::new("dup")));
    }

    #[test]
    fn test_unknown_connector_endpoint() {
        let mut builder = GraphBuilder::new();
        builder.add(node("g1")).unwrap();
        builder
            .add(Element::arc("g2", "arc/const/pos/perm", "g1", "missing"))
            .unwrap();

        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownElement {
                referrer: ElementId::new("g2"),
                missing: ElementId::new("missing"),
            }
        );
    }

    #[test]
    fn test_self_referencing_connector() {
        let mut builder = GraphBuilder::new();
        builder.add(node("s1")).unwrap();
        builder
            .add(Element::arc("s2", "arc/const/pos/perm", "s1", "s2"))
            .unwrap();

        let err = builder.build().unwrap_err();
        assert_eq!(
            err,
            GraphError::SelfReferencingConnector(ElementId::new("s2"))
        );
    }

    #[test]
    fn test_add_to_requires_contour() {
        let mut builder = GraphBuilder::new();
        let parent = builder.add(node("n1")).unwrap();

        let err = builder.add_to(parent, node("n2")).unwrap_err();
        assert!(matches!(err, GraphError::NotAContour { .. }));

        let err = builder
            .add_to(ElementId::new("nowhere"), node("n3"))
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownElement { .. }));
    }

    #[test]
    fn test_nested_and_shared_members() {
        let mut builder = GraphBuilder::new();
        let outer = builder.add(Element::contour("outer", "", "contour")).unwrap();
        let inner = builder
            .add_to(outer, Element::contour("inner", "", "contour"))
            .unwrap();
        let shared = builder.add_to(inner, node("shared")).unwrap();
        builder.include(outer, shared).unwrap();
        let graph = builder.build().unwrap();

        assert_eq!(graph.roots().len(), 1);
        assert_eq!(graph.members(outer).len(), 2);
        assert_eq!(graph.members(inner).len(), 1);
        assert!(graph.members(shared).is_empty());
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_include_unknown_member_fails_on_build() {
        let mut builder = GraphBuilder::new();
        let contour = builder.add(Element::contour("k1", "", "contour")).unwrap();
        builder.include(contour, ElementId::new("ghost")).unwrap();

        assert!(builder.build().is_err());
    }

    #[test]
    fn test_contour_cycle_is_representable() {
        let mut builder = GraphBuilder::new();
        let a = builder.add(Element::contour("cyc_a", "", "contour")).unwrap();
        let b = builder.add_to(a, Element::contour("cyc_b", "", "contour")).unwrap();
        builder.include(b, a).unwrap();
        let graph = builder.build().unwrap();

        assert_eq!(graph.members(b)[0], "cyc_a");
    }
}
