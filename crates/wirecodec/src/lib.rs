// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema-driven binary serialiser for pub/sub wire messages.
//!
//! A [`SpecTable`] maps schema names to message shapes: primitives, fixed field lists,
//! and compound constructs (`one_of`, `n_of`, `set_of`, `sorted_set`, `map_of`).
//! A [`Resolver`] expands a schema name into a tree of codecs, interning every
//! generated set, map, choice and repetition codec so the same shape always yields the
//! same `Arc`. A [`Codec`] wraps a resolved tree for repeated encode/decode calls.
//!
//! # Quick Start
//!
//! ```rust
//! use wirecodec::{get_codec, Value};
//!
//! let codec = get_codec("count-or-parser-errors2")?;
//! let bytes = codec.to_bytes(&[Value::choice(0, [Value::Int32(5)])])?;
//! assert_eq!(bytes, b"\x00\x00\x00\x00\x05");
//!
//! let decoded = codec.decode(&bytes)?;
//! assert_eq!(decoded[0].as_choice(), Some((0, &[Value::Int32(5)][..])));
//! # Ok::<(), wirecodec::CodecError>(())
//! ```
//!
//! # Wire Format
//!
//! | Shape | Encoding |
//! |-------|----------|
//! | Byte / Bool | 1 byte |
//! | Int16 / Int32 / Int64 | big-endian, 2 / 4 / 8 bytes |
//! | Float64 | big-endian IEEE-754 |
//! | String / Bytes | i32 length, then payload |
//! | Field list | fields back to back, no prefix |
//! | Set / sorted set | i32 count, then elements |
//! | Map | i32 count, then key/value pairs |
//! | Choice | u8 discriminant, then variant payload |
//! | N_OF | occurrences until end of stream |
//! | Void | nothing |
//!
//! # Custom Tables
//!
//! ```rust
//! use std::sync::Arc;
//! use wirecodec::{spec::Compound, Resolver, SpecTable, Value};
//!
//! let table = SpecTable::builder()
//!     .fields("quote", ["String", "Float64"])
//!     .compound("quotes", Compound::NOf("quote".into()))
//!     .build();
//! let resolver = Resolver::new(Arc::new(table));
//!
//! let codec = resolver.codec("quotes")?;
//! let batch = Value::List(vec![Value::tuple(["EURUSD".into(), Value::Float64(1.08)])]);
//! let bytes = codec.to_bytes(&[batch.clone()])?;
//! assert_eq!(codec.decode(&bytes)?, vec![batch]);
//! # Ok::<(), wirecodec::CodecError>(())
//! ```

pub mod choice;
pub mod codec;
pub mod collections;
pub mod config;
pub mod error;
pub mod json;
pub mod primitive;
pub mod registry;
pub mod repeated;
pub mod resolver;
pub mod spec;
pub mod tree;
pub mod value;

pub use choice::ChoiceCodec;
pub use codec::{Codec, Values};
pub use collections::{MapCodec, MapInstance, SetCodec, SetInstance};
pub use config::CodecConfig;
pub use error::{CodecError, Result};
pub use json::{value_to_json, values_to_json};
pub use primitive::Primitive;
pub use registry::CodecRegistry;
pub use repeated::RepeatedCodec;
pub use resolver::Resolver;
pub use spec::{SpecEntry, SpecTable};
pub use tree::{CodecNode, CodecTree};
pub use value::Value;

/// Codec for `schema` from the built-in catalogue.
pub fn get_codec(schema: &str) -> Result<Codec> {
    Resolver::global().codec(schema)
}
