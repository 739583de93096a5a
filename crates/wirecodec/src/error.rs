// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by resolution, encoding and decoding.

use thiserror::Error;

/// Errors produced by the serialiser engine.
///
/// Every variant except [`CodecError::Io`] is raised by this crate itself. Nothing here
/// is recovered locally: the transport/session layer decides what to do with it.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A schema name referenced during resolution is not in the table.
    #[error("unknown schema: {0}")]
    UnknownSchema(String),

    /// A collection was constructed with a member of the wrong element type.
    #[error("data validation failed for {codec}: {reason}")]
    DataValidation { codec: String, reason: String },

    /// A choice discriminant byte that the choice table does not declare.
    #[error("unknown discriminant {discriminant} for choice {choice}")]
    UnknownDiscriminant { choice: String, discriminant: u8 },

    /// Value tuple length differs from the resolved shape.
    #[error("arity mismatch for {schema}: expected {expected} values, found {found}")]
    ArityMismatch {
        schema: String,
        expected: usize,
        found: usize,
    },

    /// A value of the wrong kind was handed to a codec.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// The specification table is structurally unusable for this schema.
    #[error("invalid spec for {schema}: {reason}")]
    InvalidSpec { schema: String, reason: String },

    /// Malformed bytes on the wire.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A declared length exceeds the configured bound.
    #[error("collection too large: {len} > {max}")]
    CollectionTooLarge { len: u64, max: u32 },

    /// Groups, choices or repetitions nested past the configured depth.
    #[error("nesting deeper than {max} levels")]
    NestingTooDeep { max: usize },

    /// Stream ran dry before a collection's declared count (strict mode only).
    #[error("{codec} truncated: declared {declared} elements, read {read}")]
    Truncated {
        codec: String,
        declared: u32,
        read: u32,
    },

    #[error("spec parse error: {0}")]
    SpecParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub(crate) fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// True if this is a stream-level end-of-input condition.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }
}

impl From<std::string::FromUtf8Error> for CodecError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::InvalidData(format!("invalid UTF-8 string: {}", e))
    }
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_variants() {
        let err = CodecError::UnknownDiscriminant {
            choice: "count-or-parser-errors2".into(),
            discriminant: 7,
        };
        assert_eq!(
            err.to_string(),
            "unknown discriminant 7 for choice count-or-parser-errors2"
        );

        let err = CodecError::ArityMismatch {
            schema: "session-id".into(),
            expected: 2,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "arity mismatch for session-id: expected 2 values, found 1"
        );
    }

    #[test]
    fn test_unexpected_eof_detection() {
        let eof = CodecError::from(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
        assert!(eof.is_unexpected_eof());
        assert!(!CodecError::UnknownSchema("x".into()).is_unexpected_eof());
    }
}
