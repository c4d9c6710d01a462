//! Identifier resolution for SCs output.
//!
//! SCg identifiers are free text; SCs system identifiers must match
//! `^[0-9a-zA-Z_]*$`. Resolution turns the raw identifier of an element into
//! a legal system identifier and, for identifiers written in Cyrillic, keeps
//! the original text as a *main identifier* that is emitted separately as a
//! `nrel_main_idtf` relation.
//!
//! Resolution never fails: anything that cannot be used verbatim falls
//! through to a name synthesized from the structural id.

use std::collections::HashMap;

use log::trace;

use sctext_core::{
    element::{Element, Tag},
    identifier::ElementId,
};

/// Prefix of synthesized constant element names.
pub const ELEMENT_PREFIX: &str = "el";
/// Prefix of synthesized variable element names.
pub const VARIABLE_ELEMENT_PREFIX: &str = "_el";
/// Prefix of SCs aliases.
pub const ALIAS_PREFIX: &str = "@";
/// Token naming connector aliases.
pub const CONNECTOR_ALIAS: &str = "edge";

/// The outcome of resolving one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentifier {
    system: String,
    main: Option<String>,
}

impl ResolvedIdentifier {
    /// Returns the identifier written into SCs lines.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Returns the retained human-readable identifier, if any.
    pub fn main(&self) -> Option<&str> {
        self.main.as_deref()
    }
}

/// Returns `true` if `identifier` only contains ASCII letters, digits and
/// underscores. The empty string qualifies.
pub fn is_english_identifier(identifier: &str) -> bool {
    identifier
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns `true` if `identifier` is made of English identifier characters,
/// Cyrillic letters (U+0400..=U+045F), `*`, `'` and spaces.
pub fn is_russian_identifier(identifier: &str) -> bool {
    identifier.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || matches!(c, '_' | '*' | '\'' | ' ' | '\u{0400}'..='\u{045F}')
    })
}

/// Builds the alias `@<prefix>_<id>` from the id's token form (see
/// [`ElementId::to_token`]).
///
/// # Examples
///
/// ```
/// use sctext::resolver::make_alias;
/// use sctext_core::identifier::ElementId;
///
/// assert_eq!(make_alias("edge", ElementId::new("4-2")), "@edge_4_2");
/// ```
pub fn make_alias(prefix: &str, id: ElementId) -> String {
    format!("{ALIAS_PREFIX}{prefix}_{}", id.to_token())
}

/// Resolves the identifiers of `element`.
///
/// Variable-ness is derived from the element's raw type; see
/// [`Element::is_variable`].
pub fn resolve(element: &Element) -> ResolvedIdentifier {
    resolve_with(element, element.is_variable())
}

/// Resolves the identifiers of `element`, treating it as a variable when
/// `is_variable` is set.
///
/// # Examples
///
/// ```
/// use sctext::resolver::resolve_with;
/// use sctext_core::element::Element;
///
/// let node = Element::node("7", "концепт", "node/const/perm/general");
/// let resolved = resolve_with(&node, false);
///
/// assert_eq!(resolved.system(), "el_7");
/// assert_eq!(resolved.main(), Some("концепт"));
/// ```
pub fn resolve_with(element: &Element, is_variable: bool) -> ResolvedIdentifier {
    let raw = element.identifier();
    let mut main = None;

    let mut system = if is_english_identifier(raw) {
        raw.to_string()
    } else {
        if is_russian_identifier(raw) {
            main = Some(raw.to_string());
        }
        String::new()
    };

    if system.is_empty() {
        let prefix = if is_variable {
            VARIABLE_ELEMENT_PREFIX
        } else {
            ELEMENT_PREFIX
        };
        system = format!("{prefix}_{}", element.id().to_token());
    } else if is_variable && !system.starts_with('_') {
        system.insert(0, '_');
    }

    if matches!(element.tag(), Tag::Arc | Tag::Pair) {
        system = make_alias(CONNECTOR_ALIAS, element.id());
    }

    trace!(id:% = element.id(), system = system.as_str(); "Resolved identifier");

    ResolvedIdentifier { system, main }
}

/// Per-run cache of resolved identifiers.
///
/// Resolution is pure, so caching only saves work; a fresh cache produces
/// the same results.
#[derive(Debug, Default)]
pub struct IdentifierCache {
    resolved: HashMap<ElementId, ResolvedIdentifier>,
}

impl IdentifierCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached resolution of `element`, resolving it first if
    /// needed.
    pub fn resolve(&mut self, element: &Element) -> &ResolvedIdentifier {
        self.resolved
            .entry(element.id())
            .or_insert_with(|| resolve(element))
    }

    /// Returns a previously cached resolution.
    pub fn get(&self, id: ElementId) -> Option<&ResolvedIdentifier> {
        self.resolved.get(&id)
    }
}
