// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema resolution: [`SpecTable`] entries expanded into [`CodecNode`] trees.
//!
//! # Naming
//!
//! | Construct | Registry key |
//! |-----------|--------------|
//! | named compound entry | schema name |
//! | inline compound in a field list | `"{declaring schema}[{index}]"` |
//! | choice variant payload | `"{choice}.{discriminant}"` |
//! | set / sorted set / map | derived from element types |
//!
//! The declaring schema of a choice variant payload is `"{choice}.{discriminant}"`.
//! Registry keys never depend on where a schema was reached from, so a recursive
//! shape maps back onto the codecs built for its first level.
//!
//! Tree entry keys are the dot-joined ancestor path plus the field's own name.

use crate::codec::Codec;
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::primitive::Primitive;
use crate::registry::CodecRegistry;
use crate::spec::{catalogue, Compound, SpecEntry, SpecItem, SpecTable};
use crate::tree::{CodecNode, CodecTree, TreeEntry};
use std::sync::{Arc, OnceLock};

/// Resolves schema names against one table, interning compound codecs in its registry.
///
/// Cloning is cheap and clones share the table and the registry.
#[derive(Debug, Clone)]
pub struct Resolver {
    table: Arc<SpecTable>,
    registry: Arc<CodecRegistry>,
    config: CodecConfig,
}

impl Resolver {
    pub fn new(table: Arc<SpecTable>) -> Self {
        Self {
            table,
            registry: Arc::new(CodecRegistry::new()),
            config: CodecConfig::default(),
        }
    }

    /// Replace the decode configuration. The registry stays shared.
    pub fn with_config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Process-wide resolver over the built-in catalogue.
    pub fn global() -> &'static Resolver {
        static GLOBAL: OnceLock<Resolver> = OnceLock::new();
        GLOBAL.get_or_init(|| Resolver::new(catalogue()))
    }

    pub fn table(&self) -> &SpecTable {
        &self.table
    }

    pub fn registry(&self) -> &CodecRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Resolve `name` from an empty ancestor path.
    pub fn resolve(&self, name: &str) -> Result<CodecNode> {
        log::trace!("[resolver] resolving {}", name);
        self.resolve_path(name, &[])
    }

    /// Build a ready-to-use codec for `name`.
    pub fn codec(&self, name: &str) -> Result<Codec> {
        let fields = match self.resolve(name)? {
            CodecNode::Group(tree) => tree,
            CodecNode::Void => Arc::new(CodecTree::default()),
            node => Arc::new(CodecTree::single(name, node)),
        };
        Ok(Codec::new(name, self.clone(), fields))
    }

    /// Resolve `name` below `ancestors`.
    ///
    /// A named field list holding exactly one reference is an alias and resolves to its
    /// target, so `x = ["session-id"]` exposes the two fields of `session-id`. Choice
    /// variant payloads are field lists in their own right and are not unwrapped: the
    /// same one-item list as a payload decodes to a single nested tuple.
    fn resolve_path(&self, name: &str, ancestors: &[String]) -> Result<CodecNode> {
        if ancestors.iter().any(|a| a == name) {
            return Err(CodecError::InvalidSpec {
                schema: name.to_string(),
                reason: format!("cyclic reference via {}", ancestors.join(".")),
            });
        }
        let mut path = ancestors.to_vec();
        path.push(name.to_string());

        match self.table.get(name)? {
            SpecEntry::Null => Ok(CodecNode::Void),
            SpecEntry::Primitive(p) => Ok(CodecNode::Primitive(*p)),
            SpecEntry::Fields(items) => match items.as_slice() {
                // Single-reference lists are aliases.
                [SpecItem::Ref(target)] => self.resolve_path(target, &path),
                _ => Ok(CodecNode::Group(Arc::new(self.resolve_fields(items, &path)?))),
            },
            SpecEntry::Compound(compound) => self.resolve_compound(compound, name, &path),
        }
    }

    /// Resolve a field list under `path`, one entry per item, in order.
    ///
    /// The last element of `path` is the declaring schema; inline compounds are interned
    /// under it.
    pub(crate) fn resolve_fields(&self, items: &[SpecItem], path: &[String]) -> Result<CodecTree> {
        let prefix = path.join(".");
        let declaring = path.last().map(String::as_str).unwrap_or_default();
        let mut entries = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let entry = match item {
                SpecItem::Ref(name) => TreeEntry {
                    key: format!("{}.{}", prefix, name),
                    node: self.resolve_path(name, path)?,
                },
                SpecItem::Inline(compound) => {
                    let name = format!("{}[{}]", declaring, idx);
                    TreeEntry {
                        key: format!("{}[{}]", prefix, idx),
                        node: self.resolve_compound(compound, &name, path)?,
                    }
                }
            };
            entries.push(entry);
        }
        Ok(CodecTree::new(entries))
    }

    fn resolve_compound(&self, compound: &Compound, name: &str, path: &[String]) -> Result<CodecNode> {
        match compound {
            Compound::SetOf(elem) => {
                let element = self.element_primitive(elem, name)?;
                Ok(CodecNode::Set(self.registry.set_codec(element, false)))
            }
            Compound::SortedSet(elem) => {
                let element = self.element_primitive(elem, name)?;
                Ok(CodecNode::Set(self.registry.set_codec(element, true)))
            }
            Compound::MapOf(key, value) => {
                let key = self.element_primitive(key, name)?;
                let value = self.element_primitive(value, name)?;
                Ok(CodecNode::Map(self.registry.map_codec(key, value)))
            }
            Compound::OneOf(table) => Ok(CodecNode::Choice(self.registry.choice_codec(name, table))),
            Compound::NOf(inner) => {
                if let Some(codec) = self.registry.cached_repeated(name) {
                    return Ok(CodecNode::Repeated(codec));
                }
                // Resolved outside the registry entry lock: it may intern codecs itself.
                let node = self.resolve_path(inner, path)?;
                if node.is_zero_width() {
                    return Err(CodecError::InvalidSpec {
                        schema: name.to_string(),
                        reason: format!("n_of element {} has no wire width", inner),
                    });
                }
                Ok(CodecNode::Repeated(self.registry.repeated_codec(name, node)))
            }
        }
    }

    /// Primitive behind a collection element reference, following aliases.
    fn element_primitive(&self, name: &str, owner: &str) -> Result<Primitive> {
        let mut seen: Vec<&str> = Vec::new();
        let mut current = name;
        loop {
            match self.table.get(current)? {
                SpecEntry::Primitive(p) => return Ok(*p),
                SpecEntry::Fields(items) => match items.as_slice() {
                    [SpecItem::Ref(target)] if !seen.contains(&target.as_str()) => {
                        seen.push(current);
                        current = target.as_str();
                    }
                    _ => break,
                },
                _ => break,
            }
        }
        Err(CodecError::InvalidSpec {
            schema: owner.to_string(),
            reason: format!("collection element {} is not a primitive", name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(table: SpecTable) -> Resolver {
        Resolver::new(Arc::new(table))
    }

    #[test]
    fn test_field_list_keys_follow_path() {
        let r = resolver(
            SpecTable::builder()
                .fields("session-id", ["Int64", "Int64"])
                .fields("subscribe", ["session-id", "String"])
                .build(),
        );
        let tree = match r.resolve("subscribe").unwrap() {
            CodecNode::Group(tree) => tree,
            other => panic!("Expected group, got {:?}", other),
        };
        let keys: Vec<&str> = tree.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["subscribe.session-id", "subscribe.String"]);

        match &tree.entries()[0].node {
            CodecNode::Group(inner) => {
                assert_eq!(inner.entries()[0].key, "subscribe.session-id.Int64");
            }
            other => panic!("Expected nested group, got {:?}", other),
        }
    }

    #[test]
    fn test_alias_is_transparent() {
        let r = resolver(SpecTable::builder().alias("client-id", "Int32").build());
        assert!(matches!(
            r.resolve("client-id").unwrap(),
            CodecNode::Primitive(Primitive::Int32)
        ));
    }

    #[test]
    fn test_unknown_reference_fails() {
        let r = resolver(SpecTable::builder().fields("broken", ["Int32", "nope"]).build());
        let err = r.resolve("broken").unwrap_err();
        assert!(matches!(err, CodecError::UnknownSchema(name) if name == "nope"));
    }

    #[test]
    fn test_cycle_detected() {
        let r = resolver(
            SpecTable::builder()
                .fields("a", ["Int32", "b"])
                .fields("b", ["Int32", "a"])
                .build(),
        );
        let err = r.resolve("a").unwrap_err();
        assert!(matches!(err, CodecError::InvalidSpec { schema, .. } if schema == "a"));
    }

    #[test]
    fn test_collection_elements_must_be_primitive() {
        let r = resolver(
            SpecTable::builder()
                .fields("pair", ["Int32", "Int32"])
                .alias("code", "Int32")
                .compound("pairs", Compound::SetOf("pair".into()))
                .compound("codes", Compound::SetOf("code".into()))
                .build(),
        );
        assert!(matches!(
            r.resolve("pairs").unwrap_err(),
            CodecError::InvalidSpec { .. }
        ));
        match r.resolve("codes").unwrap() {
            CodecNode::Set(set) => assert_eq!(set.element(), Primitive::Int32),
            other => panic!("Expected set, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_compounds_named_by_position() {
        let r = resolver(
            SpecTable::builder()
                .fields(
                    "result",
                    vec![
                        SpecItem::from("Int64"),
                        Compound::one_of([(0, Vec::<&str>::new())]).into(),
                        Compound::one_of([(0, vec!["Int32"])]).into(),
                    ],
                )
                .build(),
        );
        let tree = match r.resolve("result").unwrap() {
            CodecNode::Group(tree) => tree,
            other => panic!("Expected group, got {:?}", other),
        };
        match (&tree.entries()[1].node, &tree.entries()[2].node) {
            (CodecNode::Choice(a), CodecNode::Choice(b)) => {
                assert_eq!(a.name(), "result[1]");
                assert_eq!(b.name(), "result[2]");
                assert!(!Arc::ptr_eq(a, b));
            }
            other => panic!("Expected two choices, got {:?}", other),
        }
    }

    #[test]
    fn test_inline_names_ignore_ancestor_path() {
        let r = resolver(
            SpecTable::builder()
                .fields(
                    "labelled",
                    vec![SpecItem::from("String"), Compound::one_of([(0, vec!["Int32"])]).into()],
                )
                .fields("outer", ["Int64", "labelled"])
                .build(),
        );
        let direct = match r.resolve("labelled").unwrap() {
            CodecNode::Group(tree) => tree.entries()[1].node.clone(),
            other => panic!("Expected group, got {:?}", other),
        };
        let nested = match r.resolve("outer").unwrap() {
            CodecNode::Group(tree) => match &tree.entries()[1].node {
                CodecNode::Group(inner) => {
                    assert_eq!(inner.entries()[1].key, "outer.labelled[1]");
                    inner.entries()[1].node.clone()
                }
                other => panic!("Expected nested group, got {:?}", other),
            },
            other => panic!("Expected group, got {:?}", other),
        };
        match (direct, nested) {
            (CodecNode::Choice(a), CodecNode::Choice(b)) => {
                assert!(Arc::ptr_eq(&a, &b));
                assert_eq!(a.name(), "labelled[1]");
            }
            other => panic!("Expected choices, got {:?}", other),
        }
        assert_eq!(r.registry().len(), 1);
    }

    #[test]
    fn test_single_reference_alias_only_for_named_lists() {
        let r = resolver(
            SpecTable::builder()
                .fields("session-id", ["Int64", "Int64"])
                .fields("current-session", ["session-id"])
                .compound("maybe-session", Compound::one_of([(1, vec!["session-id"])]))
                .build(),
        );
        assert_eq!(r.codec("current-session").unwrap().arity(), 2);

        let choice = match r.resolve("maybe-session").unwrap() {
            CodecNode::Choice(choice) => choice,
            other => panic!("Expected choice, got {:?}", other),
        };
        let payload = choice.variant(1, &r).unwrap();
        assert_eq!(payload.len(), 1);
        assert!(matches!(&payload.entries()[0].node, CodecNode::Group(t) if t.len() == 2));
    }

    #[test]
    fn test_zero_width_repetition_rejected() {
        let r = resolver(
            SpecTable::builder()
                .fields("nothing", Vec::<&str>::new())
                .compound("forever", Compound::NOf("nothing".into()))
                .build(),
        );
        assert!(matches!(
            r.resolve("forever").unwrap_err(),
            CodecError::InvalidSpec { .. }
        ));
    }

    #[test]
    fn test_clones_share_registry() {
        let r = resolver(
            SpecTable::builder()
                .compound("ids", Compound::SetOf("Int64".into()))
                .build(),
        );
        let strict = r.clone().with_config(CodecConfig::default().with_strict_collections(true));
        let (a, b) = match (r.resolve("ids").unwrap(), strict.resolve("ids").unwrap()) {
            (CodecNode::Set(a), CodecNode::Set(b)) => (a, b),
            other => panic!("Expected sets, got {:?}", other),
        };
        assert!(Arc::ptr_eq(&a, &b));
        assert!(strict.config().strict_collections);
        assert_eq!(r.registry().len(), 1);
    }
}
