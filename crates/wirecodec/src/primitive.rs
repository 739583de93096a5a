// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf codecs for scalar values.
//!
//! # Wire Format
//!
//! All multi-byte integers are big-endian.
//!
//! ```text
//! Byte, Bool   : 1 byte
//! Int16        : 2 bytes
//! Int32        : 4 bytes
//! Int64        : 8 bytes
//! Float64      : 8 bytes (IEEE-754)
//! String       : len (i32) | UTF-8 bytes
//! Bytes        : len (i32) | raw bytes
//! ```

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::value::Value;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Read, Write};

/// Scalar codec kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Byte,
    Bool,
    Int16,
    Int32,
    Int64,
    Float64,
    String,
    Bytes,
}

impl Primitive {
    /// Every primitive, in canonical order.
    pub const ALL: [Primitive; 8] = [
        Self::Byte,
        Self::Bool,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Float64,
        Self::String,
        Self::Bytes,
    ];

    /// Canonical name, used as the table key and in derived codec names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Byte => "Byte",
            Self::Bool => "Bool",
            Self::Int16 => "Int16",
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Float64 => "Float64",
            Self::String => "String",
            Self::Bytes => "Bytes",
        }
    }

    /// Encoded size in bytes (None for length-prefixed kinds).
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Byte | Self::Bool => Some(1),
            Self::Int16 => Some(2),
            Self::Int32 => Some(4),
            Self::Int64 | Self::Float64 => Some(8),
            Self::String | Self::Bytes => None,
        }
    }

    /// Whether `value` is an instance of this primitive.
    pub fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::Byte, Value::Byte(_))
                | (Self::Bool, Value::Bool(_))
                | (Self::Int16, Value::Int16(_))
                | (Self::Int32, Value::Int32(_))
                | (Self::Int64, Value::Int64(_))
                | (Self::Float64, Value::Float64(_))
                | (Self::String, Value::String(_))
                | (Self::Bytes, Value::Bytes(_))
        )
    }

    pub fn read<R: Read>(&self, r: &mut R, config: &CodecConfig) -> Result<Value> {
        let value = match self {
            Self::Byte => Value::Byte(r.read_u8()?),
            Self::Bool => Value::Bool(r.read_u8()? != 0),
            Self::Int16 => Value::Int16(r.read_i16::<BigEndian>()?),
            Self::Int32 => Value::Int32(r.read_i32::<BigEndian>()?),
            Self::Int64 => Value::Int64(r.read_i64::<BigEndian>()?),
            Self::Float64 => Value::Float64(r.read_f64::<BigEndian>()?),
            Self::String => {
                let buf = read_prefixed(r, config)?;
                Value::String(String::from_utf8(buf)?)
            }
            Self::Bytes => Value::Bytes(read_prefixed(r, config)?),
        };
        Ok(value)
    }

    pub fn write<W: Write>(&self, w: &mut W, value: &Value) -> Result<()> {
        match (self, value) {
            (Self::Byte, Value::Byte(v)) => w.write_u8(*v)?,
            (Self::Bool, Value::Bool(v)) => w.write_u8(u8::from(*v))?,
            (Self::Int16, Value::Int16(v)) => w.write_i16::<BigEndian>(*v)?,
            (Self::Int32, Value::Int32(v)) => w.write_i32::<BigEndian>(*v)?,
            (Self::Int64, Value::Int64(v)) => w.write_i64::<BigEndian>(*v)?,
            (Self::Float64, Value::Float64(v)) => w.write_f64::<BigEndian>(*v)?,
            (Self::String, Value::String(s)) => {
                write_length(w, s.len())?;
                w.write_all(s.as_bytes())?;
            }
            (Self::Bytes, Value::Bytes(b)) => {
                write_length(w, b.len())?;
                w.write_all(b)?;
            }
            _ => return Err(CodecError::type_mismatch(self.name(), value.kind_name())),
        }
        Ok(())
    }

    pub fn to_bytes(&self, value: &Value) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.fixed_size().unwrap_or(16));
        self.write(&mut buf, value)?;
        Ok(buf)
    }

    /// Look up a primitive by canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read a 4-byte length/count prefix, bounded by `config.max_collection_len`.
pub(crate) fn read_length<R: Read>(r: &mut R, config: &CodecConfig) -> Result<u32> {
    let raw = r.read_i32::<BigEndian>()?;
    if raw < 0 {
        return Err(CodecError::InvalidData(format!("negative length prefix {}", raw)));
    }
    let len = raw as u32;
    if len > config.max_collection_len {
        return Err(CodecError::CollectionTooLarge {
            len: u64::from(len),
            max: config.max_collection_len,
        });
    }
    Ok(len)
}

/// Write a 4-byte length/count prefix.
pub(crate) fn write_length<W: Write>(w: &mut W, len: usize) -> Result<()> {
    let len = i32::try_from(len).map_err(|_| CodecError::CollectionTooLarge {
        len: len as u64,
        max: i32::MAX as u32,
    })?;
    w.write_i32::<BigEndian>(len)?;
    Ok(())
}

fn read_prefixed<R: Read>(r: &mut R, config: &CodecConfig) -> Result<Vec<u8>> {
    let len = read_length(r, config)? as usize;
    let mut buf = vec![0u8; len];
    r.read_exact(&mut buf)?;
    Ok(buf)
}
