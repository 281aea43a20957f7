use crate::{EntityId, RelationCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a relation table: a directed, typed link between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationEdge {
    pub parent: EntityId,
    pub child: EntityId,
    pub code: RelationCode,
}

impl RelationEdge {
    pub fn new(parent: EntityId, child: EntityId, code: RelationCode) -> Self {
        Self {
            parent,
            child,
            code,
        }
    }
}

/// The relation tables the exporter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationTable {
    /// `synsetrelation`: edges between synsets
    SynsetRelation,
    /// `lexicalrelation`: edges between lexical units
    LexicalRelation,
}

impl RelationTable {
    pub fn table_name(self) -> &'static str {
        match self {
            Self::SynsetRelation => "synsetrelation",
            Self::LexicalRelation => "lexicalrelation",
        }
    }

    /// Name of the entity table the endpoints must exist in.
    pub fn entity_table(self) -> &'static str {
        match self {
            Self::SynsetRelation => "synset",
            Self::LexicalRelation => "lexicalunit",
        }
    }
}

impl fmt::Display for RelationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
