//! Structural element identifiers backed by a string interner
//!
//! This module provides the [`ElementId`] type. Every SCg element carries a
//! structural id assigned when the graph is constructed; ids are compared and
//! hashed constantly during serialization, so they are interned once and
//! passed around as a `Copy` symbol.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for element ids.
///
/// # Thread Safety
///
/// The interner is append-only and guarded by a `Mutex`, so independent
/// translations running on different threads never observe each other's
/// state beyond sharing symbols for equal strings.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Structural identifier of a graph element.
///
/// # Examples
///
/// ```
/// use sctext_core::identifier::ElementId;
///
/// let id = ElementId::new("a1b2-c3");
/// assert_eq!(id, "a1b2-c3");
/// assert_eq!(id.to_token(), "a1b2_c3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(DefaultSymbol);

impl ElementId {
    /// Creates an `ElementId` from its textual form.
    ///
    /// # Arguments
    ///
    /// * `id` - The structural id as it appears in the source graph
    pub fn new(id: &str) -> Self {
        Self(interner().get_or_intern(id))
    }

    /// Returns the id with every character outside `[0-9a-zA-Z_]` replaced
    /// by an underscore.
    ///
    /// Structural ids are frequently UUID-like; synthesized SCs names use
    /// this form. The token has as many characters as the id.
    ///
    /// # Examples
    ///
    /// ```
    /// use sctext_core::identifier::ElementId;
    ///
    /// assert_eq!(ElementId::new("5-6-7").to_token(), "5_6_7");
    /// assert_eq!(ElementId::new("a.b:7").to_token(), "a_b_7");
    /// ```
    pub fn to_token(&self) -> String {
        self.to_string()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let str_value = interner.resolve(self.0).unwrap_or_default();
        f.write_str(str_value)
    }
}

impl std::str::FromStr for ElementId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ElementId {
    /// Creates an `ElementId` from a string slice
    ///
    /// This is a convenience implementation that calls `ElementId::new`.
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<str> for ElementId {
    /// Allows direct comparison with string slices: `id == "42"`
    fn eq(&self, other: &str) -> bool {
        let interner = interner();
        interner.resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for ElementId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_new() {
        let id1 = ElementId::new("42");
        let id2 = ElementId::new("42");
        let id3 = ElementId::new("43");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "42");
    }

    #[test]
    fn test_to_token_replaces_dashes() {
        let id = ElementId::new("0b1e-44f0-9d");
        assert_eq!(id.to_token(), "0b1e_44f0_9d");

        let plain = ElementId::new("17");
        assert_eq!(plain.to_token(), "17");
    }

    #[test]
    fn test_to_token_replaces_punctuation_and_non_ascii() {
        assert_eq!(ElementId::new("a.b:7").to_token(), "a_b_7");
        assert_eq!(ElementId::new("узел 1").to_token(), "_____1");
        assert_eq!(ElementId::new("x/y@z").to_token(), "x_y_z");
    }

    #[test]
    fn test_display_trait() {
        let id = ElementId::new("display-test");
        assert_eq!(format!("{id}"), "display-test");
    }

    #[test]
    fn test_from_trait() {
        let id1: ElementId = "from_str".into();
        let id2 = ElementId::new("from_str");

        assert_eq!(id1, id2);
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ElementId::new("key1"));
        set.insert(ElementId::new("key1"));
        set.insert(ElementId::new("key2"));

        assert_eq!(set.len(), 2);
        assert!(set.contains(&ElementId::new("key2")));
    }

    #[test]
    fn test_partial_eq_str() {
        let id = ElementId::new("node-1");

        assert!(id == "node-1");
        assert!(id != "node_1");

        let empty = ElementId::new("");
        assert!(empty == "");
    }

    fn check_equal_text_equal_ids(a: &str, b: &str) -> Result<(), TestCaseError> {
        prop_assert_eq!(ElementId::new(a) == ElementId::new(b), a == b);
        Ok(())
    }

    fn check_token_is_word_characters(raw: &str) -> Result<(), TestCaseError> {
        let token = ElementId::new(raw).to_token();

        prop_assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        prop_assert_eq!(token.chars().count(), raw.chars().count());
        Ok(())
    }

    proptest! {
        #[test]
        fn equal_text_equal_ids(a in "[a-c0-2-]{0,4}", b in "[a-c0-2-]{0,4}") {
            check_equal_text_equal_ids(&a, &b)?;
        }

        #[test]
        fn token_is_word_characters(raw in "\\PC{0,36}") {
            check_token_is_word_characters(&raw)?;
        }
    }
}
