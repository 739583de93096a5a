// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON rendering of value tuples.
//!
//! Conversion *from* JSON is schema-directed: the resolved tree decides integer widths
//! and how bytes, choices and maps are spelled.
//!
//! | Value | JSON |
//! |-------|------|
//! | Bytes | hex string (an array of numbers is also accepted) |
//! | Tuple, Set, List | array |
//! | Map | array of `[key, value]` (an object is accepted for string keys) |
//! | Choice | `{"discriminant": d, "payload": [...]}` (`[d, ...]` is accepted) |
//! | Null | `null` |

use crate::codec::Codec;
use crate::error::{CodecError, Result};
use crate::primitive::Primitive;
use crate::resolver::Resolver;
use crate::tree::{CodecNode, CodecTree};
use crate::value::Value;
use serde_json::{json, Value as Json};

/// Render a decoded value.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Byte(v) => json!(v),
        Value::Bool(v) => json!(v),
        Value::Int16(v) => json!(v),
        Value::Int32(v) => json!(v),
        Value::Int64(v) => json!(v),
        Value::Float64(v) => serde_json::Number::from_f64(*v).map_or(Json::Null, Json::Number),
        Value::String(v) => json!(v),
        Value::Bytes(v) => json!(hex::encode(v)),
        Value::Tuple(items) | Value::Set(items) | Value::List(items) => {
            Json::Array(items.iter().map(value_to_json).collect())
        }
        Value::Map(pairs) => Json::Array(
            pairs
                .iter()
                .map(|(k, v)| json!([value_to_json(k), value_to_json(v)]))
                .collect(),
        ),
        Value::Choice {
            discriminant,
            payload,
        } => json!({
            "discriminant": discriminant,
            "payload": payload.iter().map(value_to_json).collect::<Vec<_>>(),
        }),
    }
}

/// Render a value tuple as a JSON array.
pub fn values_to_json(values: &[Value]) -> Json {
    Json::Array(values.iter().map(value_to_json).collect())
}

impl Codec {
    /// Build a value tuple from a JSON array, following this codec's resolved shape.
    pub fn values_from_json(&self, json: &Json) -> Result<Vec<Value>> {
        tree_from_json(self.fields(), self.resolver(), json, self.schema())
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

fn expect_array<'j>(json: &'j Json, expected: &str) -> Result<&'j [Json]> {
    json.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| CodecError::type_mismatch(expected, json_kind(json)))
}

fn tree_from_json(tree: &CodecTree, resolver: &Resolver, json: &Json, owner: &str) -> Result<Vec<Value>> {
    let items = expect_array(json, "array")?;
    if items.len() != tree.len() {
        return Err(CodecError::ArityMismatch {
            schema: owner.to_string(),
            expected: tree.len(),
            found: items.len(),
        });
    }
    tree.entries()
        .iter()
        .zip(items)
        .map(|(entry, item)| node_from_json(&entry.node, resolver, item))
        .collect()
}

/// Convert `json` into the value shape `node` encodes.
pub fn node_from_json(node: &CodecNode, resolver: &Resolver, json: &Json) -> Result<Value> {
    match node {
        CodecNode::Void if json.is_null() => Ok(Value::Null),
        CodecNode::Void => Err(CodecError::type_mismatch("null", json_kind(json))),
        CodecNode::Primitive(p) => primitive_from_json(*p, json),
        CodecNode::Group(tree) => Ok(Value::Tuple(tree_from_json(tree, resolver, json, "group")?)),
        CodecNode::Set(set) => {
            let members = expect_array(json, set.name())?
                .iter()
                .map(|m| primitive_from_json(set.element(), m))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Set(members))
        }
        CodecNode::Map(map) => {
            let pairs = match json {
                Json::Object(obj) if map.key() == Primitive::String => obj
                    .iter()
                    .map(|(k, v)| Ok((Value::String(k.clone()), primitive_from_json(map.value(), v)?)))
                    .collect::<Result<Vec<_>>>()?,
                _ => expect_array(json, map.name())?
                    .iter()
                    .map(|pair| match pair.as_array().map(Vec::as_slice) {
                        Some([k, v]) => Ok((
                            primitive_from_json(map.key(), k)?,
                            primitive_from_json(map.value(), v)?,
                        )),
                        _ => Err(CodecError::type_mismatch("[key, value]", json_kind(pair))),
                    })
                    .collect::<Result<Vec<_>>>()?,
            };
            Ok(Value::Map(pairs))
        }
        CodecNode::Choice(choice) => {
            let (disc, payload) = match json {
                Json::Object(obj) => (
                    obj.get("discriminant").unwrap_or(&Json::Null),
                    obj.get("payload").cloned().unwrap_or_else(|| json!([])),
                ),
                Json::Array(items) if !items.is_empty() => (&items[0], Json::Array(items[1..].to_vec())),
                _ => return Err(CodecError::type_mismatch(choice.name(), json_kind(json))),
            };
            let discriminant = match primitive_from_json(Primitive::Byte, disc)? {
                Value::Byte(d) => d,
                other => return Err(CodecError::type_mismatch("Byte", other.kind_name())),
            };
            let tree = choice.variant(discriminant, resolver)?;
            let owner = format!("{}.{}", choice.name(), discriminant);
            let payload = tree_from_json(&tree, resolver, &payload, &owner)?;
            Ok(Value::Choice {
                discriminant,
                payload,
            })
        }
        CodecNode::Repeated(repeated) => {
            let items = expect_array(json, repeated.name())?
                .iter()
                .map(|item| node_from_json(repeated.inner(), resolver, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::List(items))
        }
    }
}

fn primitive_from_json(p: Primitive, json: &Json) -> Result<Value> {
    let mismatch = || CodecError::type_mismatch(p.name(), json_kind(json));
    let out_of_range = || CodecError::InvalidData(format!("{} out of range for {}", json, p));
    let int = || json.as_i64().ok_or_else(mismatch);

    let value = match p {
        Primitive::Byte => Value::Byte(u8::try_from(int()?).map_err(|_| out_of_range())?),
        Primitive::Bool => Value::Bool(json.as_bool().ok_or_else(mismatch)?),
        Primitive::Int16 => Value::Int16(i16::try_from(int()?).map_err(|_| out_of_range())?),
        Primitive::Int32 => Value::Int32(i32::try_from(int()?).map_err(|_| out_of_range())?),
        Primitive::Int64 => Value::Int64(int()?),
        Primitive::Float64 => Value::Float64(json.as_f64().ok_or_else(mismatch)?),
        Primitive::String => Value::String(json.as_str().ok_or_else(mismatch)?.to_string()),
        Primitive::Bytes => match json {
            Json::String(s) => Value::Bytes(
                hex::decode(s).map_err(|e| CodecError::InvalidData(format!("bad hex: {}", e)))?,
            ),
            Json::Array(items) => Value::Bytes(
                items
                    .iter()
                    .map(|b| {
                        b.as_u64()
                            .and_then(|b| u8::try_from(b).ok())
                            .ok_or_else(|| CodecError::type_mismatch("byte", json_kind(b)))
                    })
                    .collect::<Result<Vec<u8>>>()?,
            ),
            _ => return Err(mismatch()),
        },
    };
    Ok(value)
}
