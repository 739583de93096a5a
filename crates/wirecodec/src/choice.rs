// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tagged-union (`one_of`) codec.
//!
//! ```text
//! discriminant (u8) | payload fields of that variant
//! ```
//!
//! Variant payload shapes are resolved on first use and kept for the lifetime of the
//! codec. Resolution starts from a fresh path keyed `"{choice}.{discriminant}"`, so a
//! variant may refer back to the schema that contains the choice.

use crate::error::{CodecError, Result};
use crate::resolver::Resolver;
use crate::spec::SpecItem;
use crate::tree::CodecTree;
use crate::value::Value;
use byteorder::{ReadBytesExt, WriteBytesExt};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::sync::{Arc, OnceLock};

#[derive(Debug)]
struct ChoiceVariant {
    items: Vec<SpecItem>,
    tree: OnceLock<Arc<CodecTree>>,
}

/// Choice codec, one per choice name.
#[derive(Debug)]
pub struct ChoiceCodec {
    name: String,
    variants: BTreeMap<u8, ChoiceVariant>,
}

impl ChoiceCodec {
    pub(crate) fn new(name: impl Into<String>, table: &BTreeMap<u8, Vec<SpecItem>>) -> Self {
        let variants = table
            .iter()
            .map(|(disc, items)| {
                (
                    *disc,
                    ChoiceVariant {
                        items: items.clone(),
                        tree: OnceLock::new(),
                    },
                )
            })
            .collect();
        Self {
            name: name.into(),
            variants,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared discriminants, ascending.
    pub fn discriminants(&self) -> impl Iterator<Item = u8> + '_ {
        self.variants.keys().copied()
    }

    pub fn contains(&self, discriminant: u8) -> bool {
        self.variants.contains_key(&discriminant)
    }

    /// True once the payload shape of `discriminant` has been built.
    pub fn is_resolved(&self, discriminant: u8) -> bool {
        self.variants
            .get(&discriminant)
            .is_some_and(|v| v.tree.get().is_some())
    }

    fn variant_key(&self, discriminant: u8) -> String {
        format!("{}.{}", self.name, discriminant)
    }

    /// Payload shape for `discriminant`, resolving it on first use.
    pub fn variant(&self, discriminant: u8, resolver: &Resolver) -> Result<Arc<CodecTree>> {
        let variant =
            self.variants
                .get(&discriminant)
                .ok_or_else(|| CodecError::UnknownDiscriminant {
                    choice: self.name.clone(),
                    discriminant,
                })?;

        if let Some(tree) = variant.tree.get() {
            return Ok(Arc::clone(tree));
        }

        let key = self.variant_key(discriminant);
        let tree = resolver.resolve_fields(&variant.items, &[key.clone()])?;
        log::debug!("[choice] resolved variant {} ({} fields)", key, tree.len());

        // A concurrent first use may have won; keep whichever tree landed first.
        Ok(Arc::clone(variant.tree.get_or_init(|| Arc::new(tree))))
    }

    /// Decode discriminant and payload into `Value::Choice`.
    pub fn read<R: BufRead>(&self, resolver: &Resolver, r: &mut R) -> Result<Value> {
        self.read_nested(resolver, r, 0)
    }

    pub(crate) fn read_nested<R: BufRead>(
        &self,
        resolver: &Resolver,
        r: &mut R,
        depth: usize,
    ) -> Result<Value> {
        let discriminant = r.read_u8()?;
        let tree = self.variant(discriminant, resolver)?;
        let payload = tree.read_nested(resolver, r, depth)?;
        Ok(Value::Choice {
            discriminant,
            payload,
        })
    }

    pub fn write<W: Write>(
        &self,
        resolver: &Resolver,
        w: &mut W,
        discriminant: u8,
        payload: &[Value],
    ) -> Result<()> {
        self.write_nested(resolver, w, discriminant, payload, 0)
    }

    pub(crate) fn write_nested<W: Write>(
        &self,
        resolver: &Resolver,
        w: &mut W,
        discriminant: u8,
        payload: &[Value],
        depth: usize,
    ) -> Result<()> {
        let tree = self.variant(discriminant, resolver)?;
        w.write_u8(discriminant)?;
        tree.write_nested(resolver, w, payload, &self.variant_key(discriminant), depth)
    }

    pub fn to_bytes(
        &self,
        resolver: &Resolver,
        discriminant: u8,
        payload: &[Value],
    ) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write(resolver, &mut buf, discriminant, payload)?;
        Ok(buf)
    }
}
