// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration.
//!
//! Carried by every [`Resolver`](crate::Resolver) and copied into each
//! [`Codec`](crate::Codec) it hands out.
//!
//! # Example
//!
//! ```rust
//! use wirecodec::CodecConfig;
//!
//! let config = CodecConfig::default()
//!     .with_strict_collections(true)
//!     .with_max_collection_len(4096);
//! assert!(config.strict_collections);
//! ```

use serde::{Deserialize, Serialize};

/// Default upper bound for declared collection counts and string/bytes lengths.
pub const DEFAULT_MAX_COLLECTION_LEN: u32 = 1 << 20;

/// Default nesting limit. Groups, choice payloads and repetitions count one level each.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Runtime knobs for encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Treat stream exhaustion before a set's declared count as an error.
    ///
    /// Off by default: peers rely on exhaustion as the set terminator.
    pub strict_collections: bool,
    /// Largest accepted length prefix.
    pub max_collection_len: u32,
    /// Deepest accepted nesting of groups, choices and repetitions.
    pub max_depth: usize,
}

impl CodecConfig {
    pub fn with_strict_collections(mut self, strict: bool) -> Self {
        self.strict_collections = strict;
        self
    }

    pub fn with_max_collection_len(mut self, max: u32) -> Self {
        self.max_collection_len = max;
        self
    }

    pub fn with_max_depth(mut self, max: usize) -> Self {
        self.max_depth = max;
        self
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            strict_collections: false,
            max_collection_len: DEFAULT_MAX_COLLECTION_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
