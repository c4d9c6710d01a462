//! Configuration types for SCs translation.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so an empty document is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining writer and type settings.
//! - [`WriterConfig`] - Toggles for optional output sections.
//! - [`TypeConfig`] - Extra or overriding SCg type to SCs token mappings.
//!
//! # Example
//!
//! ```
//! # use sctext::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.writer().main_identifiers());
//! assert!(!config.writer().relation_markers());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use sctext_core::types::TypeTable;

/// Top-level configuration combining writer and type settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Writer configuration section.
    #[serde(default)]
    writer: WriterConfig,

    /// Type table configuration section.
    #[serde(default)]
    types: TypeConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    ///
    /// # Arguments
    ///
    /// * `writer` - Output toggles.
    /// * `types` - Type table overrides.
    pub fn new(writer: WriterConfig, types: TypeConfig) -> Self {
        Self { writer, types }
    }

    /// Returns the writer configuration.
    pub fn writer(&self) -> &WriterConfig {
        &self.writer
    }

    /// Returns the type table configuration.
    pub fn types(&self) -> &TypeConfig {
        &self.types
    }
}

/// Toggles for the optional parts of the SCs output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Emit `nrel_main_idtf` blocks for retained main identifiers.
    main_identifiers: bool,

    /// Write connectors whose type starts with `nrel_`/`rel_` as
    /// `source => relation: target`.
    relation_markers: bool,

    /// Declare bus elements.
    buses: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            main_identifiers: true,
            relation_markers: false,
            buses: true,
        }
    }
}

impl WriterConfig {
    /// Creates a new [`WriterConfig`].
    pub fn new(main_identifiers: bool, relation_markers: bool, buses: bool) -> Self {
        Self {
            main_identifiers,
            relation_markers,
            buses,
        }
    }

    pub fn main_identifiers(&self) -> bool {
        self.main_identifiers
    }

    pub fn relation_markers(&self) -> bool {
        self.relation_markers
    }

    pub fn buses(&self) -> bool {
        self.buses
    }
}

/// Type table entries layered over the built-in [`TypeTable`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TypeConfig {
    /// SCg node type to SCs node type keyword.
    #[serde(default)]
    nodes: IndexMap<String, String>,

    /// SCg connector type to SCs connector designation.
    #[serde(default)]
    connectors: IndexMap<String, String>,
}

impl TypeConfig {
    /// Returns the built-in table extended with the configured entries.
    pub fn table(&self) -> TypeTable {
        TypeTable::default().extend(self.nodes.clone(), self.connectors.clone())
    }
}
