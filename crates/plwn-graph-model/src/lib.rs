//! PLWN entity model
//!
//! Value types shared by every stage of the export pipeline:
//!
//! - [`LexicalUnit`]: one sense of a word (lemma + part of speech + variant)
//! - [`Synset`]: a set of synonymous lexical units
//! - [`RelationEdge`]: a `(parent, child, relation code)` row from one of the
//!   relation tables
//!
//! Data-quality problems found while reading the store are reported through
//! the [`Diagnostics`] sink (see [`diagnostics`]).
//!
//! Entities are identified by the integer IDs assigned by the relational
//! store. Equality, ordering and hashing of entities use that ID only, so they
//! can be kept in sets and used as map keys while a graph is assembled.

pub mod diagnostics;
pub mod lexical_unit;
pub mod relation;
pub mod synset;

pub use diagnostics::{
    Anomaly, CollectingDiagnostics, Diagnostics, IntegrityError, Side, TracingDiagnostics,
};
pub use lexical_unit::{LexicalUnit, PartOfSpeech};
pub use relation::{RelationEdge, RelationTable};
pub use synset::Synset;

/// Identifier assigned to an entity by the relational store.
pub type EntityId = i64;

/// Opaque relation-type code (e.g. hypernymy) taken verbatim from the store.
pub type RelationCode = i64;
