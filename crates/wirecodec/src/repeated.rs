// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `n_of` codec: the inner shape repeated until the stream is exhausted.
//!
//! There is no count prefix, so a repeated codec only makes sense as the last field
//! of a frame.

use crate::error::Result;
use crate::resolver::Resolver;
use crate::tree::CodecNode;
use crate::value::Value;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub struct RepeatedCodec {
    name: String,
    inner: CodecNode,
}

impl RepeatedCodec {
    pub(crate) fn new(name: impl Into<String>, inner: CodecNode) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &CodecNode {
        &self.inner
    }

    /// Decode occurrences of the inner shape until no input remains.
    pub fn read<R: BufRead>(&self, resolver: &Resolver, r: &mut R) -> Result<Value> {
        self.read_nested(resolver, r, 0)
    }

    pub(crate) fn read_nested<R: BufRead>(
        &self,
        resolver: &Resolver,
        r: &mut R,
        depth: usize,
    ) -> Result<Value> {
        let mut items = Vec::new();
        while !r.fill_buf()?.is_empty() {
            items.push(self.inner.read_nested(resolver, r, depth)?);
        }
        log::trace!("[{}] read {} occurrences", self.name, items.len());
        Ok(Value::List(items))
    }

    pub fn write<W: Write>(&self, resolver: &Resolver, w: &mut W, items: &[Value]) -> Result<()> {
        self.write_nested(resolver, w, items, 0)
    }

    pub(crate) fn write_nested<W: Write>(
        &self,
        resolver: &Resolver,
        w: &mut W,
        items: &[Value],
        depth: usize,
    ) -> Result<()> {
        for item in items {
            self.inner.write_field(resolver, w, item, &self.name, depth)?;
        }
        Ok(())
    }
}
