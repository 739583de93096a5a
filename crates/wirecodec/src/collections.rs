// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Set and map codecs, generic over their scalar element codecs.
//!
//! # Wire Format
//!
//! ```text
//! Set : count (i32) | element * count
//! Map : count (i32) | (key | value) * count
//! ```
//!
//! Codec handles are interned by [`CodecRegistry`](crate::CodecRegistry) under derived
//! names (`Int32SetSerialiser`, `StringInt64MapSerialiser`), so two resolutions of the
//! same shape share one `Arc`.

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::primitive::{read_length, write_length, Primitive};
use crate::value::Value;
use std::cmp::Ordering;
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Registry name of a set codec.
pub fn set_codec_name(element: Primitive, sorted: bool) -> String {
    if sorted {
        format!("{}SortedSetSerialiser", element.name())
    } else {
        format!("{}SetSerialiser", element.name())
    }
}

/// Registry name of a map codec.
pub fn map_codec_name(key: Primitive, value: Primitive) -> String {
    format!("{}{}MapSerialiser", key.name(), value.name())
}

/// Cap on pre-allocation from an untrusted count prefix.
const PREALLOC_LIMIT: usize = 1024;

fn sort_dedup(elements: &mut Vec<Value>) {
    elements.sort_by(|a, b| a.scalar_cmp(b).unwrap_or(Ordering::Equal));
    elements.dedup_by(|a, b| a.scalar_cmp(b) == Some(Ordering::Equal));
}

// ---------------------------------------------------------------------------
// Set
// ---------------------------------------------------------------------------

/// Homogeneous set of scalar values.
#[derive(Debug)]
pub struct SetCodec {
    name: String,
    element: Primitive,
    sorted: bool,
}

impl SetCodec {
    pub(crate) fn new(element: Primitive, sorted: bool) -> Self {
        Self {
            name: set_codec_name(element, sorted),
            element,
            sorted,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Primitive {
        self.element
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Check every member against the element codec.
    pub fn validate(&self, elements: &[Value]) -> Result<()> {
        for (idx, member) in elements.iter().enumerate() {
            if !self.element.accepts(member) {
                return Err(CodecError::DataValidation {
                    codec: self.name.clone(),
                    reason: format!(
                        "member {} is {}, expected {}",
                        idx,
                        member.kind_name(),
                        self.element
                    ),
                });
            }
        }
        Ok(())
    }

    /// Build a validated instance. Sorted sets are sorted and de-duplicated here.
    pub fn instance(self: &Arc<Self>, elements: Vec<Value>) -> Result<SetInstance> {
        self.validate(&elements)?;
        let mut elements = elements;
        if self.sorted {
            sort_dedup(&mut elements);
        }
        Ok(SetInstance {
            codec: Arc::clone(self),
            elements,
        })
    }

    /// Decode a set.
    ///
    /// Stream exhaustion at an element boundary ends the set early unless
    /// `config.strict_collections` is set.
    pub fn read<R: BufRead>(self: &Arc<Self>, r: &mut R, config: &CodecConfig) -> Result<SetInstance> {
        let declared = read_length(r, config)?;
        let mut elements = Vec::with_capacity((declared as usize).min(PREALLOC_LIMIT));
        for read in 0..declared {
            if r.fill_buf()?.is_empty() {
                if config.strict_collections {
                    return Err(CodecError::Truncated {
                        codec: self.name.clone(),
                        declared,
                        read,
                    });
                }
                log::warn!(
                    "[{}] stream exhausted after {}/{} elements, ending set",
                    self.name,
                    read,
                    declared
                );
                break;
            }
            elements.push(self.element.read(r, config)?);
        }
        self.instance(elements)
    }

    /// Validate and encode `elements` without taking ownership.
    pub fn write_values<W: Write>(&self, w: &mut W, elements: &[Value]) -> Result<()> {
        self.validate(elements)?;
        if self.sorted {
            let mut canonical = elements.to_vec();
            sort_dedup(&mut canonical);
            return self.write_members(w, &canonical);
        }
        self.write_members(w, elements)
    }

    fn write_members<W: Write>(&self, w: &mut W, elements: &[Value]) -> Result<()> {
        write_length(w, elements.len())?;
        for member in elements {
            self.element.write(w, member)?;
        }
        Ok(())
    }
}

/// A validated set value bound to its codec.
#[derive(Debug, Clone)]
pub struct SetInstance {
    codec: Arc<SetCodec>,
    elements: Vec<Value>,
}

impl SetInstance {
    pub fn codec(&self) -> &Arc<SetCodec> {
        &self.codec
    }

    /// Members, in construction (or canonical, for sorted sets) order.
    pub fn value(&self) -> &[Value] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        self.codec.validate(&self.elements)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(4 + self.elements.len() * 4);
        self.codec.write_members(&mut buf, &self.elements)?;
        Ok(buf)
    }

    /// Write the encoded set and hand the stream back.
    pub fn write<W: Write>(&self, mut w: W) -> Result<W> {
        w.write_all(&self.to_bytes()?)?;
        Ok(w)
    }

    pub fn into_value(self) -> Value {
        Value::Set(self.elements)
    }
}

// ---------------------------------------------------------------------------
// Map
// ---------------------------------------------------------------------------

/// Homogeneous key/value pairs of scalars.
#[derive(Debug)]
pub struct MapCodec {
    name: String,
    key: Primitive,
    value: Primitive,
}

impl MapCodec {
    pub(crate) fn new(key: Primitive, value: Primitive) -> Self {
        Self {
            name: map_codec_name(key, value),
            key,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> Primitive {
        self.key
    }

    pub fn value(&self) -> Primitive {
        self.value
    }

    pub fn validate(&self, pairs: &[(Value, Value)]) -> Result<()> {
        for (idx, (k, v)) in pairs.iter().enumerate() {
            if !self.key.accepts(k) {
                return Err(CodecError::DataValidation {
                    codec: self.name.clone(),
                    reason: format!("key {} is {}, expected {}", idx, k.kind_name(), self.key),
                });
            }
            if !self.value.accepts(v) {
                return Err(CodecError::DataValidation {
                    codec: self.name.clone(),
                    reason: format!(
                        "value {} is {}, expected {}",
                        idx,
                        v.kind_name(),
                        self.value
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn instance(self: &Arc<Self>, pairs: Vec<(Value, Value)>) -> Result<MapInstance> {
        self.validate(&pairs)?;
        Ok(MapInstance {
            codec: Arc::clone(self),
            pairs,
        })
    }

    pub fn read<R: BufRead>(self: &Arc<Self>, r: &mut R, config: &CodecConfig) -> Result<MapInstance> {
        let count = read_length(r, config)? as usize;
        let mut pairs = Vec::with_capacity(count.min(PREALLOC_LIMIT));
        for _ in 0..count {
            let k = self.key.read(r, config)?;
            let v = self.value.read(r, config)?;
            pairs.push((k, v));
        }
        self.instance(pairs)
    }

    pub fn write_pairs<W: Write>(&self, w: &mut W, pairs: &[(Value, Value)]) -> Result<()> {
        self.validate(pairs)?;
        write_length(w, pairs.len())?;
        for (k, v) in pairs {
            self.key.write(w, k)?;
            self.value.write(w, v)?;
        }
        Ok(())
    }
}

/// A validated map value bound to its codec.
#[derive(Debug, Clone)]
pub struct MapInstance {
    codec: Arc<MapCodec>,
    pairs: Vec<(Value, Value)>,
}

impl MapInstance {
    pub fn codec(&self) -> &Arc<MapCodec> {
        &self.codec
    }

    /// Pairs in construction order.
    pub fn value(&self) -> &[(Value, Value)] {
        &self.pairs
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        self.codec.validate(&self.pairs)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.codec.write_pairs(&mut buf, &self.pairs)?;
        Ok(buf)
    }

    pub fn write<W: Write>(&self, mut w: W) -> Result<W> {
        w.write_all(&self.to_bytes()?)?;
        Ok(w)
    }

    pub fn into_value(self) -> Value {
        Value::Map(self.pairs)
    }
}
