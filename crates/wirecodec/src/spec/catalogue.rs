// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in protocol table.

use super::{Compound, SpecEntry, SpecTable};
use std::sync::{Arc, OnceLock};

/// Process-wide protocol table, built on first use and never mutated.
pub fn catalogue() -> Arc<SpecTable> {
    static CATALOGUE: OnceLock<Arc<SpecTable>> = OnceLock::new();
    CATALOGUE
        .get_or_init(|| {
            let table = build();
            log::debug!("[catalogue] built protocol table ({} entries)", table.len());
            Arc::new(table)
        })
        .clone()
}

fn build() -> SpecTable {
    SpecTable::builder()
        // Handshake
        .fields("ping-request", Vec::<&str>::new())
        .fields("session-id", ["Int64", "Int64"])
        .compound("role-set", Compound::SetOf("String".into()))
        .fields("login-request", ["String", "Bytes", "role-set"])
        .null("logout-notice")
        // Errors
        .fields("error-report", ["Int32", "Int32", "String"])
        .compound(
            "count-or-parser-errors2",
            Compound::one_of([(0, vec!["Int32"]), (1, vec!["error-report"])]),
        )
        // Subscriptions
        .fields("subscribe-request", ["session-id", "String", "role-set"])
        .compound("sorted-topics", Compound::SortedSet("String".into()))
        .compound(
            "topic-offsets",
            Compound::MapOf("String".into(), "Int64".into()),
        )
        // Publishing
        .fields("event", ["Int64", "String", "Bytes"])
        .compound("event-batch", Compound::NOf("event".into()))
        .entry(
            "publish-result",
            SpecEntry::Fields(vec![
                "Int64".into(),
                Compound::one_of([(0, vec![]), (1, vec!["error-report"])]).into(),
            ]),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_is_shared() {
        let a = catalogue();
        let b = catalogue();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_catalogue_references_resolve_to_entries() {
        let table = catalogue();
        for name in [
            "ping-request",
            "session-id",
            "role-set",
            "error-report",
            "count-or-parser-errors2",
            "subscribe-request",
            "topic-offsets",
            "event-batch",
            "publish-result",
        ] {
            assert!(table.contains(name), "missing {}", name);
        }
    }
}
