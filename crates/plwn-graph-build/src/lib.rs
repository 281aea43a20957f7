//! PLWN graph construction
//!
//! Turns repository rows into the two export graphs:
//!
//! ```text
//! EntityRepository ──entities──► VertexResolver ──► Graph<P>
//!        │                            ▲
//!        └──────relation rows─────────┘ (resolve parent, child; warn on miss)
//! ```
//!
//! Both graphs go through the same routine, [`build_graph`]; a [`GraphKind`]
//! supplies the entity fetch and the relation table.

pub mod builder;
pub mod kind;
pub mod resolver;


pub use builder::{build_graph, build_lexical_unit_graph, build_synset_graph, BuildSummary};
pub use kind::{GraphKind, LexicalUnitKind, SynsetKind};
pub use resolver::VertexResolver;
