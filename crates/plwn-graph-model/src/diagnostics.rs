//! Data-quality reporting.
//!
//! The relational store does not enforce referential integrity, so the
//! exporter meets duplicate rows and dangling references on every real run.
//! None of them abort an export; each one is described as an [`Anomaly`] and
//! handed to a [`Diagnostics`] sink supplied by the caller.

use crate::{EntityId, LexicalUnit, RelationTable};
use parking_lot::Mutex;
use std::fmt;
use thiserror::Error;

/// The same lexical-unit ID was returned twice with different attributes.
#[derive(Debug, Clone, Error)]
#[error(
    "lexical unit {id} appears more than once with different attributes \
     (kept {kept:?}, skipped {skipped:?})"
)]
pub struct IntegrityError {
    pub id: EntityId,
    pub kept: LexicalUnit,
    pub skipped: LexicalUnit,
}

/// Endpoint of a relation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Parent,
    Child,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("parent"),
            Self::Child => f.write_str("child"),
        }
    }
}

/// A recoverable data-quality problem.
#[derive(Debug, Clone)]
pub enum Anomaly {
    /// Conflicting duplicate lexical unit; the first row was kept.
    DuplicateLexicalUnit(IntegrityError),
    /// A membership row points at a lexical unit that does not exist.
    DanglingMember {
        synset_id: EntityId,
        lexical_unit_id: EntityId,
    },
    /// A relation row points at an entity that is not a vertex; the edge was
    /// dropped.
    DanglingRelation {
        table: RelationTable,
        side: Side,
        entity_id: EntityId,
    },
    /// A row had NULL in an ID or code column and was skipped.
    NullColumn {
        table: &'static str,
        column: &'static str,
    },
    /// A query failed and was treated as returning no rows.
    QueryFailed { query: &'static str, error: String },
}

impl Anomaly {
    /// Short machine-friendly label, used for summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateLexicalUnit(_) => "duplicate_lexical_unit",
            Self::DanglingMember { .. } => "dangling_member",
            Self::DanglingRelation { .. } => "dangling_relation",
            Self::NullColumn { .. } => "null_column",
            Self::QueryFailed { .. } => "query_failed",
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateLexicalUnit(err) => write!(f, "{err}"),
            Self::DanglingMember {
                synset_id,
                lexical_unit_id,
            } => write!(
                f,
                "lexical unit {lexical_unit_id} is a member of synset {synset_id} \
                 in unitandsynset but is missing from lexicalunit"
            ),
            Self::DanglingRelation {
                table,
                side,
                entity_id,
            } => write!(
                f,
                "{side} {entity_id} appears in {table} but is missing from {}",
                table.entity_table()
            ),
            Self::NullColumn { table, column } => {
                write!(f, "{table}.{column} is NULL; row skipped")
            }
            Self::QueryFailed { query, error } => write!(f, "query `{query}` failed: {error}"),
        }
    }
}

/// Receiver of data-quality warnings.
pub trait Diagnostics {
    fn warn(&self, anomaly: Anomaly);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn warn(&self, anomaly: Anomaly) {
        (**self).warn(anomaly)
    }
}

/// Logs every anomaly as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, anomaly: Anomaly) {
        match &anomaly {
            Anomaly::DuplicateLexicalUnit(err) => {
                tracing::warn!(kind = anomaly.kind(), entity_id = err.id, "{anomaly}");
            }
            Anomaly::DanglingMember {
                synset_id,
                lexical_unit_id,
            } => {
                tracing::warn!(
                    kind = anomaly.kind(),
                    synset_id,
                    lexical_unit_id,
                    "{anomaly}"
                );
            }
            Anomaly::DanglingRelation {
                table,
                side,
                entity_id,
            } => {
                tracing::warn!(
                    kind = anomaly.kind(),
                    table = %table,
                    side = %side,
                    entity_id,
                    "{anomaly}"
                );
            }
            Anomaly::NullColumn { table, column } => {
                tracing::warn!(kind = anomaly.kind(), table, column, "{anomaly}");
            }
            Anomaly::QueryFailed { query, error } => {
                tracing::warn!(kind = anomaly.kind(), query, error = %error, "query failed");
            }
        }
    }
}

/// Records anomalies so they can be inspected after a build.
///
/// Recorded anomalies are also forwarded to [`TracingDiagnostics`] unless the
/// sink was created with [`CollectingDiagnostics::silent`].
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    anomalies: Mutex<Vec<Anomaly>>,
    silent: bool,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record without logging.
    pub fn silent() -> Self {
        Self {
            anomalies: Mutex::new(Vec::new()),
            silent: true,
        }
    }

    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.anomalies.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.anomalies.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.lock().is_empty()
    }

    /// Number of recorded anomalies per [`Anomaly::kind`].
    pub fn counts(&self) -> std::collections::BTreeMap<&'static str, usize> {
        let mut out = std::collections::BTreeMap::new();
        for anomaly in self.anomalies.lock().iter() {
            *out.entry(anomaly.kind()).or_insert(0) += 1;
        }
        out
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, anomaly: Anomaly) {
        if !self.silent {
            TracingDiagnostics.warn(anomaly.clone());
        }
        self.anomalies.lock().push(anomaly);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_relation_message_names_side_and_table() {
        let anomaly = Anomaly::DanglingRelation {
            table: RelationTable::SynsetRelation,
            side: Side::Child,
            entity_id: 999,
        };
        assert_eq!(
            anomaly.to_string(),
            "child 999 appears in synsetrelation but is missing from synset"
        );
    }

    #[test]
    fn test_collecting_sink_counts_by_kind() {
        let sink = CollectingDiagnostics::silent();
        sink.warn(Anomaly::DanglingMember {
            synset_id: 1,
            lexical_unit_id: 999,
        });
        sink.warn(Anomaly::DanglingRelation {
            table: RelationTable::LexicalRelation,
            side: Side::Parent,
            entity_id: 4,
        });
        sink.warn(Anomaly::DanglingMember {
            synset_id: 2,
            lexical_unit_id: 998,
        });

        assert_eq!(sink.len(), 3);
        let counts = sink.counts();
        assert_eq!(counts.get("dangling_member"), Some(&2));
        assert_eq!(counts.get("dangling_relation"), Some(&1));
    }

    #[test]
    fn test_sink_usable_through_reference() {
        fn report(diagnostics: &dyn Diagnostics) {
            diagnostics.warn(Anomaly::QueryFailed {
                query: "SELECT 1",
                error: "gone".to_string(),
            });
        }

        let sink = CollectingDiagnostics::silent();
        report(&&sink);
        assert!(matches!(
            sink.anomalies().as_slice(),
            [Anomaly::QueryFailed { query: "SELECT 1", .. }]
        ));
    }
}
