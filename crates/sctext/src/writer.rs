//! Recursive SCs serializer.
//!
//! [`ScsWriter::write`] turns one sibling collection (the graph roots or the
//! members of a contour) into SCs text. Each call runs four phases in order:
//!
//! 1. **Node declarations** for every unwritten node or link reachable from
//!    the collection, looking through unwritten contours.
//! 2. **Attribute-arc classification**: a connector whose target is another
//!    connector of the collection *attributes* it. The attributed connector
//!    becomes *complex*; the attributing one is *consumed* unless it is
//!    complex itself.
//! 3. **Connector lines** for every unwritten, non-consumed connector.
//!    Complex connectors fold their attributing connector into an extended
//!    `source symbol attribute: target;;` line.
//! 4. **Contour blocks** (and bus declarations), recursing into contour
//!    members one level deeper.
//!
//! A single [`WriteContext`] is threaded through the whole call tree. Its
//! written-set guarantees that no element is emitted twice, and that a
//! contour reachable through several parents (or through itself) is only
//! expanded once.

use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Write},
};

use indexmap::IndexMap;
use log::{debug, trace, warn};

use sctext_core::{
    element::{Element, ElementKind},
    graph::Graph,
    identifier::ElementId,
    types::TypeEncoding,
};

use crate::{
    buffer::ScsBuffer,
    config::WriterConfig,
    error::ScsError,
    resolver::IdentifierCache,
};

/// Node type written when the type table has no entry.
pub const NODE_TYPE_FALLBACK: &str = "node_";
/// Connector designation written when the type table has no entry.
pub const CONNECTOR_SYMBOL_FALLBACK: &str = "->";
/// Relation naming the main identifier of an element.
pub const MAIN_IDTF_RELATION: &str = "nrel_main_idtf";
/// Designation of the common arc linking an element to its main identifier.
pub const MAIN_IDTF_SYMBOL: &str = "=>";

const ENDPOINT_FALLBACK_PREFIX: &str = "node";
const RELATION_MARKERS: [&str; 2] = ["nrel_", "rel_"];
const RELATION_DIRECTION: &str = "=>";

/// Mutable state of one serialization run.
///
/// Create one per top-level write; every recursive call shares it.
#[derive(Debug, Default)]
pub struct WriteContext {
    written: HashSet<ElementId>,
    declared: Vec<ElementId>,
    identifiers: IdentifierCache,
}

impl WriteContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `id` has already been emitted in this run.
    pub fn is_written(&self, id: ElementId) -> bool {
        self.written.contains(&id)
    }

    /// Returns the number of elements emitted or folded so far.
    pub fn written_count(&self) -> usize {
        self.written.len()
    }

    /// Returns the elements that received their own output line, in
    /// emission order.
    pub fn declared(&self) -> &[ElementId] {
        &self.declared
    }

    pub fn identifiers(&self) -> &IdentifierCache {
        &self.identifiers
    }

    /// Records `element` as emitted. Returns `false` if it already was.
    fn declare(&mut self, element: &Element) -> bool {
        if !self.written.insert(element.id()) {
            return false;
        }
        self.declared.push(element.id());
        self.identifiers.resolve(element);
        true
    }

    fn system_identifier(&mut self, element: &Element) -> String {
        self.identifiers.resolve(element).system().to_string()
    }
}

/// Result of the attribute-arc classification of one collection.
#[derive(Debug, Default)]
struct AttributeArcs {
    /// Complex connector to the connector attributing it.
    attributing: HashMap<ElementId, ElementId>,
    /// Attributing connectors folded into another connector's line.
    consumed: HashSet<ElementId>,
}

/// Serializer over one [`Graph`].
///
/// # Examples
///
/// ```
/// use sctext::{
///     buffer::ScsBuffer,
///     config::WriterConfig,
///     writer::{ScsWriter, WriteContext},
/// };
/// use sctext_core::{element::Element, graph::GraphBuilder, types::TypeTable};
///
/// let mut builder = GraphBuilder::new();
/// builder.add(Element::node("1", "apple", "node/const/perm/general"))?;
/// builder.add(Element::node("2", "fruit", "node/const/perm/group"))?;
/// builder.add(Element::arc("3", "arc/const/pos/perm", "2", "1"))?;
/// let graph = builder.build()?;
///
/// let types = TypeTable::default();
/// let config = WriterConfig::default();
/// let writer = ScsWriter::new(&graph, &types, &config);
///
/// let mut buffer = ScsBuffer::new();
/// writer.write(graph.roots(), &mut buffer, 0, &mut WriteContext::new())?;
///
/// assert!(buffer.as_str().ends_with("fruit -> apple;;\n"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ScsWriter<'a> {
    graph: &'a Graph,
    types: &'a dyn TypeEncoding,
    config: &'a WriterConfig,
}

impl<'a> ScsWriter<'a> {
    /// Creates a writer for `graph`.
    ///
    /// # Arguments
    ///
    /// * `graph` - The graph whose elements are written
    /// * `types` - Type table used for node tokens and connector symbols
    /// * `config` - Toggles for optional output
    pub fn new(graph: &'a Graph, types: &'a dyn TypeEncoding, config: &'a WriterConfig) -> Self {
        Self {
            graph,
            types,
            config,
        }
    }

    /// Writes the collection `elements` at indentation `depth`.
    ///
    /// Elements already recorded in `context` are skipped; everything written
    /// here (including nested contour contents) is recorded.
    ///
    /// # Errors
    ///
    /// Only fails if writing to the buffer fails. Unknown types, empty
    /// identifiers and unknown ids degrade to fallbacks.
    pub fn write(
        &self,
        elements: &[ElementId],
        buffer: &mut ScsBuffer,
        depth: usize,
        context: &mut WriteContext,
    ) -> Result<(), ScsError> {
        let elements = self.lookup(elements);

        self.write_nodes(&elements, buffer, depth, context)?;
        let arcs = Self::classify_connectors(&elements, context);
        self.write_connectors(&elements, &arcs, buffer, depth, context)?;
        self.write_contours(&elements, buffer, depth, context)
    }

    /// Writes a main-identifier block for every declared element that kept
    /// one during resolution.
    pub fn write_main_identifiers(
        &self,
        buffer: &mut ScsBuffer,
        depth: usize,
        context: &WriteContext,
    ) -> Result<(), ScsError> {
        let blocks = context.declared().iter().filter_map(|&id| {
            let resolved = context.identifiers().get(id)?;
            resolved.main().map(|main| (resolved.system(), main))
        });

        for (system, main) in blocks {
            write_main_identifier(buffer, depth, system, main)?;
        }
        Ok(())
    }

    fn lookup(&self, ids: &[ElementId]) -> Vec<&'a Element> {
        ids.iter()
            .filter_map(|&id| {
                let element = self.graph.get(id);
                if element.is_none() {
                    warn!(id:% = id; "Skipping element missing from the graph");
                }
                element
            })
            .collect()
    }

    fn write_nodes(
        &self,
        elements: &[&'a Element],
        buffer: &mut ScsBuffer,
        depth: usize,
        context: &mut WriteContext,
    ) -> Result<(), ScsError> {
        let mut nodes = IndexMap::new();
        self.collect_nodes(elements, context, &mut HashSet::new(), &mut nodes);

        for element in nodes.into_values() {
            if context.declare(element) {
                self.write_declaration(element, buffer, depth, context)?;
            }
        }
        Ok(())
    }

    /// Gathers unwritten nodes of `elements`, descending into every
    /// unwritten contour once.
    fn collect_nodes(
        &self,
        elements: &[&'a Element],
        context: &WriteContext,
        expanded: &mut HashSet<ElementId>,
        nodes: &mut IndexMap<ElementId, &'a Element>,
    ) {
        for &element in elements {
            let id = element.id();
            if context.is_written(id) {
                continue;
            }
            if element.is_node_like() {
                nodes.insert(id, element);
            } else if let Some(contour) = element.as_contour() {
                if expanded.insert(id) {
                    let members = self.lookup(contour.elements());
                    self.collect_nodes(&members, context, expanded, nodes);
                }
            }
        }
    }

    /// Writes a declaration block. Buses keep their raw type as the
    /// declared type; nodes and links go through the type table.
    fn write_declaration(
        &self,
        element: &Element,
        buffer: &mut ScsBuffer,
        depth: usize,
        context: &mut WriteContext,
    ) -> Result<(), ScsError> {
        let identifier = context.system_identifier(element);
        let token = match element.kind() {
            ElementKind::Bus => Some(element.element_type()).filter(|t| !t.is_empty()),
            _ => self.types.node_token(element.element_type()),
        }
        .unwrap_or_else(|| {
            debug!(
                id:% = element.id(),
                element_type = element.element_type();
                "Unknown node type, using fallback token"
            );
            NODE_TYPE_FALLBACK
        });

        writeln!(buffer.tabs(depth), "{identifier}")?;
        writeln!(buffer.tabs(depth + 1), "<- {token};;")?;
        if let Some(content) = element.content().filter(|content| !content.is_empty()) {
            writeln!(buffer.tabs(depth + 1), "-> [{content}];;")?;
        }
        Ok(())
    }

    fn classify_connectors(elements: &[&'a Element], context: &WriteContext) -> AttributeArcs {
        let pending: HashSet<ElementId> = elements
            .iter()
            .filter(|element| element.as_connector().is_some() && !context.is_written(element.id()))
            .map(|element| element.id())
            .collect();

        let mut attributing = HashMap::new();
        for element in elements {
            let Some(connector) = element.as_connector() else {
                continue;
            };
            if pending.contains(&element.id()) && pending.contains(&connector.target()) {
                attributing.entry(connector.target()).or_insert(element.id());
            }
        }

        let consumed = attributing
            .values()
            .filter(|id| !attributing.contains_key(*id))
            .copied()
            .collect();

        AttributeArcs {
            attributing,
            consumed,
        }
    }

    fn write_connectors(
        &self,
        elements: &[&'a Element],
        arcs: &AttributeArcs,
        buffer: &mut ScsBuffer,
        depth: usize,
        context: &mut WriteContext,
    ) -> Result<(), ScsError> {
        for &element in elements {
            let Some(connector) = element.as_connector() else {
                continue;
            };
            let id = element.id();
            if arcs.consumed.contains(&id) || !context.declare(element) {
                continue;
            }

            let source = self.endpoint_identifier(connector.source(), context);
            let target = self.endpoint_identifier(connector.target(), context);

            let attribute = arcs
                .attributing
                .get(&id)
                .and_then(|&attr_id| self.graph.get(attr_id))
                .and_then(|attr| attr.as_connector().map(|connector| (attr, connector)));

            if let Some((attr_element, attr_connector)) = attribute {
                let attribute_source = self.endpoint_identifier(attr_connector.source(), context);
                trace!(
                    connector:% = id,
                    attribute:% = attr_element.id();
                    "Folding attribute arc"
                );
                let symbol = self.connector_symbol(element);
                writeln!(
                    buffer.tabs(depth),
                    "{source} {symbol} {attribute_source}: {target};;"
                )?;
                if arcs.consumed.contains(&attr_element.id()) {
                    context.written.insert(attr_element.id());
                }
            } else if let Some(relation) = self.relation_marker(element) {
                writeln!(
                    buffer.tabs(depth),
                    "{source} {RELATION_DIRECTION} {relation}: {target};;"
                )?;
            } else {
                let symbol = self.connector_symbol(element);
                writeln!(buffer.tabs(depth), "{source} {symbol} {target};;")?;
            }
        }
        Ok(())
    }

    fn write_contours(
        &self,
        elements: &[&'a Element],
        buffer: &mut ScsBuffer,
        depth: usize,
        context: &mut WriteContext,
    ) -> Result<(), ScsError> {
        for &element in elements {
            match element.kind() {
                ElementKind::Contour(contour) => {
                    if !context.declare(element) {
                        continue;
                    }
                    let identifier = context.system_identifier(element);
                    debug!(contour:% = element.id(), depth = depth; "Writing contour");

                    writeln!(buffer.tabs(depth), "{identifier} = [*")?;
                    self.write(contour.elements(), buffer, depth + 1, context)?;
                    writeln!(buffer.tabs(depth), "*];;")?;
                }
                ElementKind::Bus if self.config.buses() => {
                    if context.declare(element) {
                        self.write_declaration(element, buffer, depth, context)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Resolves the identifier written for a connector endpoint.
    fn endpoint_identifier(&self, id: ElementId, context: &mut WriteContext) -> String {
        let identifier = match self.graph.get(id) {
            Some(element) => context.system_identifier(element),
            None => {
                warn!(id:% = id; "Connector endpoint missing from the graph");
                String::new()
            }
        };

        if identifier.is_empty() {
            format!("{ENDPOINT_FALLBACK_PREFIX}_{}", id.to_token())
        } else {
            identifier
        }
    }

    fn connector_symbol(&self, element: &Element) -> &str {
        self.types
            .connector_symbol(element.element_type())
            .unwrap_or_else(|| {
                debug!(
                    id:% = element.id(),
                    element_type = element.element_type();
                    "Unknown connector type, using fallback symbol"
                );
                CONNECTOR_SYMBOL_FALLBACK
            })
    }

    fn relation_marker<'e>(&self, element: &'e Element) -> Option<&'e str> {
        let element_type = element.element_type();
        (self.config.relation_markers()
            && RELATION_MARKERS
                .iter()
                .any(|marker| element_type.starts_with(marker)))
        .then_some(element_type)
    }
}

/// Writes one main-identifier block: a blank line, the system identifier,
/// and the `nrel_main_idtf` relation to the main identifier.
///
/// # Examples
///
/// ```
/// use sctext::{buffer::ScsBuffer, writer::write_main_identifier};
///
/// let mut buffer = ScsBuffer::new();
/// write_main_identifier(&mut buffer, 0, "el_7", "концепт").unwrap();
///
/// assert_eq!(buffer.as_str(), "\nel_7\n\t=> nrel_main_idtf: [концепт];;\n");
/// ```
pub fn write_main_identifier(
    buffer: &mut ScsBuffer,
    depth: usize,
    system_identifier: &str,
    main_identifier: &str,
) -> fmt::Result {
    writeln!(buffer)?;
    writeln!(buffer.tabs(depth), "{system_identifier}")?;
    writeln!(
        buffer.tabs(depth + 1),
        "{MAIN_IDTF_SYMBOL} {MAIN_IDTF_RELATION}: [{main_identifier}];;"
    )
}
