// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolved codec trees.
//!
//! A [`CodecTree`] mirrors a field list: one [`TreeEntry`] per field, in declaration
//! order. The order is the wire order on both encode and decode.

use crate::choice::ChoiceCodec;
use crate::collections::{MapCodec, SetCodec};
use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::primitive::Primitive;
use crate::repeated::RepeatedCodec;
use crate::resolver::Resolver;
use crate::value::Value;
use std::fmt::Write as _;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// One resolved schema node.
#[derive(Debug, Clone)]
pub enum CodecNode {
    /// Void schema: zero bytes, decodes to `Value::Null`.
    Void,
    Primitive(Primitive),
    /// Nested field list.
    Group(Arc<CodecTree>),
    Set(Arc<SetCodec>),
    Map(Arc<MapCodec>),
    Choice(Arc<ChoiceCodec>),
    Repeated(Arc<RepeatedCodec>),
}

impl CodecNode {
    pub fn read<R: BufRead>(&self, resolver: &Resolver, r: &mut R) -> Result<Value> {
        self.read_nested(resolver, r, 0)
    }

    /// Decode at nesting `depth`; groups, choices and repetitions go one level deeper.
    pub(crate) fn read_nested<R: BufRead>(
        &self,
        resolver: &Resolver,
        r: &mut R,
        depth: usize,
    ) -> Result<Value> {
        let config = resolver.config();
        match self {
            Self::Void => Ok(Value::Null),
            Self::Primitive(p) => p.read(r, config),
            Self::Set(set) => Ok(set.read(r, config)?.into_value()),
            Self::Map(map) => Ok(map.read(r, config)?.into_value()),
            Self::Group(tree) => {
                let depth = descend(config, depth)?;
                Ok(Value::Tuple(tree.read_nested(resolver, r, depth)?))
            }
            Self::Choice(choice) => choice.read_nested(resolver, r, descend(config, depth)?),
            Self::Repeated(repeated) => repeated.read_nested(resolver, r, descend(config, depth)?),
        }
    }

    pub fn write<W: Write>(&self, resolver: &Resolver, w: &mut W, value: &Value) -> Result<()> {
        self.write_field(resolver, w, value, "group", 0)
    }

    /// Like [`write`](Self::write) at nesting `depth`; `owner` names a nested group in
    /// arity errors.
    pub(crate) fn write_field<W: Write>(
        &self,
        resolver: &Resolver,
        w: &mut W,
        value: &Value,
        owner: &str,
        depth: usize,
    ) -> Result<()> {
        let config = resolver.config();
        match (self, value) {
            (Self::Void, Value::Null) => Ok(()),
            (Self::Primitive(p), _) => p.write(w, value),
            (Self::Set(set), Value::Set(items)) => set.write_values(w, items),
            (Self::Map(map), Value::Map(pairs)) => map.write_pairs(w, pairs),
            (Self::Group(tree), Value::Tuple(items)) => {
                tree.write_nested(resolver, w, items, owner, descend(config, depth)?)
            }
            (
                Self::Choice(choice),
                Value::Choice {
                    discriminant,
                    payload,
                },
            ) => choice.write_nested(resolver, w, *discriminant, payload, descend(config, depth)?),
            (Self::Repeated(repeated), Value::List(items)) => {
                repeated.write_nested(resolver, w, items, descend(config, depth)?)
            }
            _ => Err(CodecError::type_mismatch(self.label(), value.kind_name())),
        }
    }

    /// True if this node never reads or writes a byte.
    pub fn is_zero_width(&self) -> bool {
        match self {
            Self::Void => true,
            Self::Group(tree) => tree.entries.iter().all(|e| e.node.is_zero_width()),
            _ => false,
        }
    }

    /// Short label: primitive name, generated codec name, or construct kind.
    pub fn label(&self) -> String {
        match self {
            Self::Void => "void".to_string(),
            Self::Primitive(p) => p.name().to_string(),
            Self::Group(_) => "group".to_string(),
            Self::Set(set) => set.name().to_string(),
            Self::Map(map) => map.name().to_string(),
            Self::Choice(choice) => format!("choice {}", choice.name()),
            Self::Repeated(repeated) => format!("n_of {}", repeated.name()),
        }
    }

    fn describe_into(&self, out: &mut String, depth: usize) {
        match self {
            Self::Group(tree) => tree.describe_into(out, depth),
            Self::Repeated(repeated) => repeated.inner().describe_into(out, depth),
            Self::Choice(choice) => {
                for disc in choice.discriminants() {
                    let _ = writeln!(out, "{:indent$}[{}]", "", disc, indent = depth * 2);
                }
            }
            _ => {}
        }
    }
}

/// Nesting level one below `depth`, or `NestingTooDeep` past the configured limit.
fn descend(config: &CodecConfig, depth: usize) -> Result<usize> {
    let next = depth + 1;
    if next > config.max_depth {
        log::debug!("[tree] nesting limit {} reached", config.max_depth);
        return Err(CodecError::NestingTooDeep {
            max: config.max_depth,
        });
    }
    Ok(next)
}

/// A resolved field entry: composite key plus node.
#[derive(Debug, Clone)]
pub struct TreeEntry {
    /// Dot-joined path of schema names visited during resolution.
    pub key: String,
    pub node: CodecNode,
}

/// Ordered resolved field list.
#[derive(Debug, Clone, Default)]
pub struct CodecTree {
    entries: Vec<TreeEntry>,
}

impl CodecTree {
    pub(crate) fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Tree holding a single entry.
    pub(crate) fn single(key: impl Into<String>, node: CodecNode) -> Self {
        Self::new(vec![TreeEntry {
            key: key.into(),
            node,
        }])
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decode one value per entry, in order.
    pub fn read_values<R: BufRead>(&self, resolver: &Resolver, r: &mut R) -> Result<Vec<Value>> {
        self.read_nested(resolver, r, 0)
    }

    pub(crate) fn read_nested<R: BufRead>(
        &self,
        resolver: &Resolver,
        r: &mut R,
        depth: usize,
    ) -> Result<Vec<Value>> {
        let mut values = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            values.push(entry.node.read_nested(resolver, r, depth)?);
        }
        Ok(values)
    }

    /// Encode `values` against the entries, in order. `owner` names the shape in errors.
    pub fn write_values<W: Write>(
        &self,
        resolver: &Resolver,
        w: &mut W,
        values: &[Value],
        owner: &str,
    ) -> Result<()> {
        self.write_nested(resolver, w, values, owner, 0)
    }

    pub(crate) fn write_nested<W: Write>(
        &self,
        resolver: &Resolver,
        w: &mut W,
        values: &[Value],
        owner: &str,
        depth: usize,
    ) -> Result<()> {
        if values.len() != self.entries.len() {
            return Err(CodecError::ArityMismatch {
                schema: owner.to_string(),
                expected: self.entries.len(),
                found: values.len(),
            });
        }
        for (entry, value) in self.entries.iter().zip(values) {
            entry.node.write_field(resolver, w, value, &entry.key, depth)?;
        }
        Ok(())
    }

    /// Human-readable outline, one line per entry.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(&mut out, 0);
        out
    }

    fn describe_into(&self, out: &mut String, depth: usize) {
        for entry in &self.entries {
            let _ = writeln!(
                out,
                "{:indent$}{}: {}",
                "",
                entry.key,
                entry.node.label(),
                indent = depth * 2
            );
            entry.node.describe_into(out, depth + 1);
        }
    }
}
