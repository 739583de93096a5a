// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Specification table: schema names mapped to message shape descriptions.
//!
//! # Example
//!
//! ```rust
//! use wirecodec::spec::{Compound, SpecTable};
//!
//! let table = SpecTable::builder()
//!     .fields("session-id", ["Int64", "Int64"])
//!     .compound("role-set", Compound::SetOf("String".into()))
//!     .build();
//!
//! assert!(table.contains("session-id"));
//! assert!(table.get("missing").is_err());
//! ```

mod catalogue;
mod loader;

pub use catalogue::catalogue;

use crate::error::{CodecError, Result};
use crate::primitive::Primitive;
use std::collections::{BTreeMap, HashMap};

/// Name of the void sentinel schema ("no value, zero fields").
pub const VOID: &str = "void";

static NULL_ENTRY: SpecEntry = SpecEntry::Null;

/// Description of one schema.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecEntry {
    /// Leaf codec.
    Primitive(Primitive),
    /// Ordered fixed tuple of items.
    Fields(Vec<SpecItem>),
    /// Choice / collection / repetition construct.
    Compound(Compound),
    /// Zero-width void entry.
    Null,
}

/// One element of a field list.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecItem {
    /// Reference to another schema by name.
    Ref(String),
    /// Compound construct declared inline.
    Inline(Compound),
}

impl From<&str> for SpecItem {
    fn from(name: &str) -> Self {
        Self::Ref(name.to_string())
    }
}

impl From<String> for SpecItem {
    fn from(name: String) -> Self {
        Self::Ref(name)
    }
}

impl From<Compound> for SpecItem {
    fn from(compound: Compound) -> Self {
        Self::Inline(compound)
    }
}

/// Compound constructs.
#[derive(Debug, Clone, PartialEq)]
pub enum Compound {
    /// Tagged union: one-byte discriminant selecting a field list.
    OneOf(BTreeMap<u8, Vec<SpecItem>>),
    /// Inner schema repeated until the stream is exhausted.
    NOf(String),
    /// Count-prefixed homogeneous set.
    SetOf(String),
    /// Like `SetOf`, kept sorted and de-duplicated.
    SortedSet(String),
    /// Count-prefixed homogeneous key/value pairs.
    MapOf(String, String),
}

impl Compound {
    /// Build a `OneOf` from `(discriminant, items)` pairs.
    pub fn one_of<I, L, S>(table: I) -> Self
    where
        I: IntoIterator<Item = (u8, L)>,
        L: IntoIterator<Item = S>,
        S: Into<SpecItem>,
    {
        Self::OneOf(
            table
                .into_iter()
                .map(|(disc, items)| (disc, items.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// Kind label, as written in table documents.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OneOf(_) => "one_of",
            Self::NOf(_) => "n_of",
            Self::SetOf(_) => "set_of",
            Self::SortedSet(_) => "sorted_set",
            Self::MapOf(_, _) => "map_of",
        }
    }
}

/// Immutable table of schema descriptions.
#[derive(Debug, Clone, Default)]
pub struct SpecTable {
    entries: HashMap<String, SpecEntry>,
}

impl SpecTable {
    /// Start a builder pre-seeded with the primitive names and `void`.
    pub fn builder() -> SpecTableBuilder {
        SpecTableBuilder::new()
    }

    /// Look up a schema. The void sentinel resolves even when unlisted.
    pub fn get(&self, name: &str) -> Result<&SpecEntry> {
        match self.entries.get(name) {
            Some(entry) => Ok(entry),
            None if name == VOID => Ok(&NULL_ENTRY),
            None => Err(CodecError::UnknownSchema(name.to_string())),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        name == VOID || self.entries.contains_key(name)
    }

    /// All schema names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fluent builder for [`SpecTable`].
#[derive(Debug)]
pub struct SpecTableBuilder {
    entries: HashMap<String, SpecEntry>,
}

impl SpecTableBuilder {
    /// Create a builder holding the canonical primitives and `void`.
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        for p in Primitive::ALL {
            entries.insert(p.name().to_string(), SpecEntry::Primitive(p));
        }
        entries.insert(VOID.to_string(), SpecEntry::Null);
        Self { entries }
    }

    /// Create a builder with no pre-seeded names.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an entry, replacing any previous one.
    pub fn entry(mut self, name: impl Into<String>, entry: SpecEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    pub fn primitive(self, name: impl Into<String>, kind: Primitive) -> Self {
        self.entry(name, SpecEntry::Primitive(kind))
    }

    /// Register a field list.
    pub fn fields<I, S>(self, name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SpecItem>,
    {
        let items = items.into_iter().map(Into::into).collect();
        self.entry(name, SpecEntry::Fields(items))
    }

    /// Register `name` as a singleton field list referring to `target`.
    pub fn alias(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.entry(name, SpecEntry::Fields(vec![SpecItem::Ref(target.into())]))
    }

    pub fn compound(self, name: impl Into<String>, compound: Compound) -> Self {
        self.entry(name, SpecEntry::Compound(compound))
    }

    pub fn null(self, name: impl Into<String>) -> Self {
        self.entry(name, SpecEntry::Null)
    }

    pub(crate) fn extend(mut self, entries: impl IntoIterator<Item = (String, SpecEntry)>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn build(self) -> SpecTable {
        SpecTable {
            entries: self.entries,
        }
    }
}

impl Default for SpecTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_seeds_primitives() {
        let table = SpecTable::builder().build();
        assert_eq!(
            table.get("Int32").unwrap(),
            &SpecEntry::Primitive(Primitive::Int32)
        );
        assert_eq!(table.get(VOID).unwrap(), &SpecEntry::Null);
        assert_eq!(table.len(), Primitive::ALL.len() + 1);
    }

    #[test]
    fn test_unknown_schema_is_error() {
        let table = SpecTable::builder().build();
        let err = table.get("no-such-thing").unwrap_err();
        assert!(matches!(err, CodecError::UnknownSchema(name) if name == "no-such-thing"));
    }

    #[test]
    fn test_void_resolves_without_entry() {
        let table = SpecTableBuilder::empty().build();
        assert!(table.is_empty());
        assert_eq!(table.get(VOID).unwrap(), &SpecEntry::Null);
        assert!(table.contains(VOID));
    }

    #[test]
    fn test_fields_and_alias() {
        let table = SpecTable::builder()
            .fields("session-id", ["Int64", "Int64"])
            .alias("client-id", "Int32")
            .build();

        match table.get("session-id").unwrap() {
            SpecEntry::Fields(items) => assert_eq!(items.len(), 2),
            other => panic!("Expected fields, got {:?}", other),
        }
        assert_eq!(
            table.get("client-id").unwrap(),
            &SpecEntry::Fields(vec![SpecItem::Ref("Int32".into())])
        );
    }

    #[test]
    fn test_one_of_helper() {
        let choice = Compound::one_of([(0, vec!["Int32"]), (1, vec!["error-report"])]);
        match &choice {
            Compound::OneOf(table) => {
                assert_eq!(table.len(), 2);
                assert_eq!(table[&1], vec![SpecItem::Ref("error-report".into())]);
            }
            other => panic!("Expected one_of, got {:?}", other),
        }
        assert_eq!(choice.kind(), "one_of");
    }

    #[test]
    fn test_names_sorted() {
        let table = SpecTableBuilder::empty()
            .fields("zulu", Vec::<&str>::new())
            .fields("alpha", Vec::<&str>::new())
            .build();
        assert_eq!(table.names(), vec!["alpha", "zulu"]);
    }
}
