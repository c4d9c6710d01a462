//! SCText - SCg knowledge graphs to SCs text.
//!
//! Resolves SCg element identifiers into legal SCs system identifiers and
//! serializes a graph of nodes, connectors and nested contours into SCs
//! source text, emitting every element exactly once.

pub mod buffer;
pub mod config;
pub mod resolver;
pub mod source;
pub mod writer;

mod error;

pub use sctext_core::{GraphError, element, graph, identifier, types};

pub use error::ScsError;

use log::{debug, info, trace};

use sctext_core::types::TypeTable;

use buffer::ScsBuffer;
use config::AppConfig;
use graph::Graph;
use writer::{ScsWriter, WriteContext};

/// Entry point for translating SCg graphs to SCs text.
///
/// # Examples
///
/// ```
/// use sctext::{Translator, config::AppConfig};
///
/// let source = r#"
///     [[element]]
///     id = "7"
///     identifier = "концепт"
///     type = "node/const/perm/general"
///     kind = "node"
/// "#;
///
/// let translator = Translator::new(AppConfig::default());
/// let graph = translator.parse(source)?;
/// let scs = translator.translate(&graph)?;
///
/// assert_eq!(
///     scs,
///     "el_7\n\t<- sc_node;;\n\nel_7\n\t=> nrel_main_idtf: [концепт];;\n"
/// );
/// # Ok::<(), sctext::ScsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    config: AppConfig,
    types: TypeTable,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Translator {
    /// Create a translator with the given configuration.
    ///
    /// The type table is the built-in one extended with the entries of
    /// `config.types()`.
    pub fn new(config: AppConfig) -> Self {
        let types = config.types().table();
        Self { config, types }
    }

    /// Replaces the type table derived from the configuration.
    pub fn with_types(mut self, types: TypeTable) -> Self {
        self.types = types;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a TOML graph document. See [`source`] for the format.
    ///
    /// # Errors
    ///
    /// Returns [`ScsError`] for malformed documents and invalid graphs.
    pub fn parse(&self, source: &str) -> Result<Graph, ScsError> {
        info!("Parsing graph document");

        let graph = source::parse_graph(source)?;

        debug!(elements = graph.len(), roots = graph.roots().len(); "Graph built");
        trace!(graph:?; "Parsed graph");

        Ok(graph)
    }

    /// Serialize `graph` to SCs text.
    ///
    /// Writes the top-level collection at depth zero, then, when enabled,
    /// the main-identifier blocks of every emitted element in emission order.
    ///
    /// # Errors
    ///
    /// Serialization itself does not fail on graph content; an error is only
    /// returned if the output buffer rejects a write.
    pub fn translate(&self, graph: &Graph) -> Result<String, ScsError> {
        let (node_types, connector_types) = self.types.entry_counts();
        info!(
            elements = graph.len(),
            node_types = node_types,
            connector_types = connector_types;
            "Translating graph"
        );

        let writer = ScsWriter::new(graph, &self.types, self.config.writer());
        let mut buffer = ScsBuffer::new();
        let mut context = WriteContext::new();

        writer.write(graph.roots(), &mut buffer, 0, &mut context)?;

        if self.config.writer().main_identifiers() {
            writer.write_main_identifiers(&mut buffer, 0, &context)?;
        }

        debug!(
            written = context.written_count(),
            lines = buffer.line_count();
            "Translation finished"
        );

        Ok(buffer.into_string())
    }
}
