// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Top-level codec facade.
//!
//! # Example
//!
//! ```rust
//! use wirecodec::{get_codec, Value};
//!
//! let codec = get_codec("session-id")?;
//! let bytes = codec.to_bytes(&[Value::Int64(7), Value::Int64(42)])?;
//! assert_eq!(bytes.len(), 16);
//!
//! let values = codec.decode(&bytes)?;
//! assert_eq!(values, vec![Value::Int64(7), Value::Int64(42)]);
//! # Ok::<(), wirecodec::CodecError>(())
//! ```

use crate::error::Result;
use crate::resolver::Resolver;
use crate::tree::CodecTree;
use crate::value::Value;
use std::io::{BufRead, Write};
use std::iter::FusedIterator;
use std::sync::Arc;

/// Encoder/decoder for one resolved schema.
///
/// Immutable once built; clones share the resolved tree.
#[derive(Debug, Clone)]
pub struct Codec {
    schema: String,
    resolver: Resolver,
    fields: Arc<CodecTree>,
}

impl Codec {
    pub(crate) fn new(schema: impl Into<String>, resolver: Resolver, fields: Arc<CodecTree>) -> Self {
        Self {
            schema: schema.into(),
            resolver,
            fields,
        }
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    /// Top-level fields, in wire order.
    pub fn fields(&self) -> &CodecTree {
        &self.fields
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Number of values in one value tuple.
    pub fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Lazily decode one value tuple from `reader`.
    ///
    /// The returned iterator consumes the stream as it goes and stops after the first
    /// error.
    pub fn read<R: BufRead>(&self, reader: R) -> Values<'_, R> {
        Values {
            codec: self,
            reader,
            next: 0,
            failed: false,
        }
    }

    pub fn from_bytes<'b>(&self, bytes: &'b [u8]) -> Values<'_, &'b [u8]> {
        self.read(bytes)
    }

    /// Decode one complete value tuple.
    pub fn read_all<R: BufRead>(&self, reader: R) -> Result<Vec<Value>> {
        self.read(reader).collect()
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Vec<Value>> {
        self.read_all(bytes)
    }

    pub fn to_bytes(&self, values: &[Value]) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.fields
            .write_values(&self.resolver, &mut buf, values, &self.schema)?;
        Ok(buf)
    }

    /// Encode `values` into `w` and hand the writer back.
    ///
    /// Nothing is written if encoding fails.
    pub fn write<W: Write>(&self, mut w: W, values: &[Value]) -> Result<W> {
        let bytes = self.to_bytes(values)?;
        w.write_all(&bytes)?;
        Ok(w)
    }

    /// Outline of the resolved tree.
    pub fn describe(&self) -> String {
        format!("{}\n{}", self.schema, self.fields.describe())
    }
}

/// Single-pass decoder over one value tuple. See [`Codec::read`].
#[derive(Debug)]
pub struct Values<'c, R> {
    codec: &'c Codec,
    reader: R,
    next: usize,
    failed: bool,
}

impl<R> Values<'_, R> {
    /// Stream positioned after whatever has been decoded so far.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Iterator for Values<'_, R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let entry = self.codec.fields.entries().get(self.next)?;
        self.next += 1;
        let item = entry.node.read(&self.codec.resolver, &mut self.reader);
        if item.is_err() {
            self.failed = true;
        }
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = self.codec.fields.len() - self.next;
        (0, Some(remaining))
    }
}

impl<R: BufRead> FusedIterator for Values<'_, R> {}
