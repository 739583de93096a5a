// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON table documents.
//!
//! # Format
//!
//! ```json
//! {
//!   "ping-request": [],
//!   "session-id": ["Int64", "Int64"],
//!   "client-id": "Int32",
//!   "nothing": null,
//!   "timestamp": {"primitive": "int64"},
//!   "role-set": {"set_of": "String"},
//!   "topic-offsets": {"map_of": ["String", "Int64"]},
//!   "event-batch": {"n_of": "event"},
//!   "count-or-errors": {"one_of": {"0": ["Int32"], "1": ["error-report"]}}
//! }
//! ```
//!
//! Field lists may contain compound objects inline. Entries are merged over the
//! canonical primitives and `void`.

use super::{Compound, SpecEntry, SpecItem, SpecTable, SpecTableBuilder};
use crate::error::Result;
use crate::primitive::Primitive;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Null,
    Ref(String),
    Fields(Vec<RawItem>),
    Primitive(RawPrimitive),
    Compound(RawCompound),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPrimitive {
    primitive: Primitive,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawItem {
    Ref(String),
    Compound(RawCompound),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
enum RawCompound {
    OneOf(BTreeMap<u8, Vec<RawItem>>),
    NOf(String),
    SetOf(String),
    SortedSet(String),
    MapOf(String, String),
}

impl From<RawItem> for SpecItem {
    fn from(raw: RawItem) -> Self {
        match raw {
            RawItem::Ref(name) => SpecItem::Ref(name),
            RawItem::Compound(c) => SpecItem::Inline(c.into()),
        }
    }
}

impl From<RawCompound> for Compound {
    fn from(raw: RawCompound) -> Self {
        match raw {
            RawCompound::OneOf(table) => Compound::OneOf(
                table
                    .into_iter()
                    .map(|(disc, items)| (disc, items.into_iter().map(Into::into).collect()))
                    .collect(),
            ),
            RawCompound::NOf(inner) => Compound::NOf(inner),
            RawCompound::SetOf(elem) => Compound::SetOf(elem),
            RawCompound::SortedSet(elem) => Compound::SortedSet(elem),
            RawCompound::MapOf(key, value) => Compound::MapOf(key, value),
        }
    }
}

impl From<RawEntry> for SpecEntry {
    fn from(raw: RawEntry) -> Self {
        match raw {
            RawEntry::Null => SpecEntry::Null,
            RawEntry::Ref(target) => SpecEntry::Fields(vec![SpecItem::Ref(target)]),
            RawEntry::Fields(items) => SpecEntry::Fields(items.into_iter().map(Into::into).collect()),
            RawEntry::Primitive(p) => SpecEntry::Primitive(p.primitive),
            RawEntry::Compound(c) => SpecEntry::Compound(c.into()),
        }
    }
}

impl SpecTable {
    /// Parse a table document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: HashMap<String, RawEntry> = serde_json::from_str(json)?;
        let count = raw.len();
        let table = SpecTableBuilder::new()
            .extend(raw.into_iter().map(|(name, entry)| (name, entry.into())))
            .build();
        log::debug!("[spec] loaded {} schema entries from JSON", count);
        Ok(table)
    }

    /// Read and parse a table document from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("[spec] reading table from {}", path.display());
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_parse_every_entry_form() {
        let table = SpecTable::from_json_str(
            r#"{
                "ping-request": [],
                "session-id": ["Int64", "Int64"],
                "client-id": "Int32",
                "nothing": null,
                "timestamp": {"primitive": "int64"},
                "role-set": {"set_of": "String"},
                "sorted-roles": {"sorted_set": "String"},
                "topic-offsets": {"map_of": ["String", "Int64"]},
                "event-batch": {"n_of": "session-id"},
                "count-or-errors": {"one_of": {"0": ["Int32"], "1": ["String", "Int32"]}},
                "inline": ["Int32", {"set_of": "Int64"}]
            }"#,
        )
        .expect("parse table");

        assert_eq!(table.get("ping-request").unwrap(), &SpecEntry::Fields(vec![]));
        assert_eq!(
            table.get("client-id").unwrap(),
            &SpecEntry::Fields(vec![SpecItem::Ref("Int32".into())])
        );
        assert_eq!(table.get("nothing").unwrap(), &SpecEntry::Null);
        assert_eq!(
            table.get("timestamp").unwrap(),
            &SpecEntry::Primitive(Primitive::Int64)
        );
        assert_eq!(
            table.get("topic-offsets").unwrap(),
            &SpecEntry::Compound(Compound::MapOf("String".into(), "Int64".into()))
        );
        assert_eq!(
            table.get("inline").unwrap(),
            &SpecEntry::Fields(vec![
                SpecItem::Ref("Int32".into()),
                SpecItem::Inline(Compound::SetOf("Int64".into())),
            ])
        );
        match table.get("count-or-errors").unwrap() {
            SpecEntry::Compound(Compound::OneOf(choices)) => {
                assert_eq!(choices.len(), 2);
                assert_eq!(choices[&1].len(), 2);
            }
            other => panic!("Expected one_of, got {:?}", other),
        }

        // Primitives stay available.
        assert!(table.contains("String"));
    }

    #[test]
    fn test_unknown_construct_rejected() {
        let err = SpecTable::from_json_str(r#"{"x": {"bag_of": "Int32"}}"#).unwrap_err();
        assert!(matches!(err, CodecError::SpecParse(_)));
    }

    #[test]
    fn test_discriminant_out_of_range_rejected() {
        let err =
            SpecTable::from_json_str(r#"{"x": {"one_of": {"300": ["Int32"]}}}"#).unwrap_err();
        assert!(matches!(err, CodecError::SpecParse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SpecTable::from_json_file("/nonexistent/wirecodec/table.json").unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }
}
