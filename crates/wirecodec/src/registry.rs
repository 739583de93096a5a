// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Interned compound codecs.
//!
//! One `DashMap` per codec family. A miss is filled through the entry API, which holds
//! the shard lock for the check and the insert, so two threads racing on the same key
//! always end up with the same `Arc`.
//!
//! Constructors passed to the entry API must not resolve schemas: resolution may
//! re-enter the registry and the shard lock is not reentrant.

use crate::choice::ChoiceCodec;
use crate::collections::{map_codec_name, set_codec_name, MapCodec, SetCodec};
use crate::primitive::Primitive;
use crate::repeated::RepeatedCodec;
use crate::spec::SpecItem;
use crate::tree::CodecNode;
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Cache of generated codecs, keyed by derived name.
#[derive(Debug, Default)]
pub struct CodecRegistry {
    /// `{T}SetSerialiser`
    sets: DashMap<String, Arc<SetCodec>>,
    /// `{T}SortedSetSerialiser`
    sorted_sets: DashMap<String, Arc<SetCodec>>,
    /// `{K}{V}MapSerialiser`
    maps: DashMap<String, Arc<MapCodec>>,
    /// Keyed by choice name
    choices: DashMap<String, Arc<ChoiceCodec>>,
    /// Keyed by composite name
    repeated: DashMap<String, Arc<RepeatedCodec>>,
}

impl CodecRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_codec(&self, element: Primitive, sorted: bool) -> Arc<SetCodec> {
        let family = if sorted { &self.sorted_sets } else { &self.sets };
        let key = set_codec_name(element, sorted);
        if let Some(codec) = family.get(&key) {
            return Arc::clone(codec.value());
        }
        let entry = family.entry(key).or_insert_with(|| {
            let codec = SetCodec::new(element, sorted);
            log::debug!("[registry] synthesized {}", codec.name());
            Arc::new(codec)
        });
        Arc::clone(entry.value())
    }

    pub fn map_codec(&self, key: Primitive, value: Primitive) -> Arc<MapCodec> {
        let name = map_codec_name(key, value);
        if let Some(codec) = self.maps.get(&name) {
            return Arc::clone(codec.value());
        }
        let entry = self.maps.entry(name).or_insert_with(|| {
            let codec = MapCodec::new(key, value);
            log::debug!("[registry] synthesized {}", codec.name());
            Arc::new(codec)
        });
        Arc::clone(entry.value())
    }

    /// Choice codec named `name`. `table` is only read on a miss.
    pub fn choice_codec(&self, name: &str, table: &BTreeMap<u8, Vec<SpecItem>>) -> Arc<ChoiceCodec> {
        if let Some(codec) = self.choices.get(name) {
            return Arc::clone(codec.value());
        }
        let entry = self
            .choices
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!("[registry] synthesized choice {} ({} variants)", name, table.len());
                Arc::new(ChoiceCodec::new(name, table))
            });
        Arc::clone(entry.value())
    }

    /// Previously interned repeated codec, if any.
    pub fn cached_repeated(&self, name: &str) -> Option<Arc<RepeatedCodec>> {
        self.repeated.get(name).map(|codec| Arc::clone(codec.value()))
    }

    /// Repeated codec named `name`; `inner` must already be resolved.
    pub fn repeated_codec(&self, name: &str, inner: CodecNode) -> Arc<RepeatedCodec> {
        let entry = self
            .repeated
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!("[registry] synthesized n_of {}", name);
                Arc::new(RepeatedCodec::new(name, inner))
            });
        Arc::clone(entry.value())
    }

    /// Number of interned codecs across all families.
    pub fn len(&self) -> usize {
        self.sets.len()
            + self.sorted_sets.len()
            + self.maps.len()
            + self.choices.len()
            + self.repeated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_codecs_interned() {
        let registry = CodecRegistry::new();
        let a = registry.set_codec(Primitive::String, false);
        let b = registry.set_codec(Primitive::String, false);
        let sorted = registry.set_codec(Primitive::String, true);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &sorted));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_map_codecs_keyed_by_both_types() {
        let registry = CodecRegistry::new();
        let a = registry.map_codec(Primitive::String, Primitive::Int64);
        let b = registry.map_codec(Primitive::Int64, Primitive::String);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.name(), "StringInt64MapSerialiser");
        assert!(Arc::ptr_eq(
            &a,
            &registry.map_codec(Primitive::String, Primitive::Int64)
        ));
    }

    #[test]
    fn test_choice_interned_by_name() {
        let registry = CodecRegistry::new();
        let table: BTreeMap<u8, Vec<SpecItem>> = [(0u8, vec![SpecItem::from("Int32")])].into_iter().collect();
        let a = registry.choice_codec("status", &table);
        let b = registry.choice_codec("status", &BTreeMap::new());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(b.contains(0));
    }

    #[test]
    fn test_concurrent_first_use_yields_one_codec() {
        let registry = CodecRegistry::new();
        let shared = &registry;
        let codecs: Vec<Arc<SetCodec>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(move || shared.set_codec(Primitive::Int32, false)))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        for codec in &codecs[1..] {
            assert!(Arc::ptr_eq(&codecs[0], codec));
        }
        assert_eq!(registry.len(), 1);
    }
}
