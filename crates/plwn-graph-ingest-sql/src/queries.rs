//! The fixed extraction queries.
//!
//! These are the only statements ever sent to the database. Every backend
//! runs them verbatim except MySQL, which adds casts (see [`mysql`]).

use plwn_graph_model::RelationTable;

pub const LEXICAL_UNITS: &str = "SELECT DISTINCT id, lemma, pos, domain, variant FROM lexicalunit";

pub const SYNSET_IDS: &str = "SELECT DISTINCT id FROM synset";

/// Takes the synset ID as its single positional parameter.
pub const SYNSET_MEMBERS: &str = "SELECT DISTINCT lex_id FROM unitandsynset WHERE syn_id = ?";

pub const SYNSET_RELATIONS: &str =
    "SELECT DISTINCT parent_id, child_id, rel_id FROM synsetrelation";

pub const LEXICAL_RELATIONS: &str =
    "SELECT DISTINCT parent_id, child_id, rel_id FROM lexicalrelation";

pub fn relations(table: RelationTable) -> &'static str {
    match table {
        RelationTable::SynsetRelation => SYNSET_RELATIONS,
        RelationTable::LexicalRelation => LEXICAL_RELATIONS,
    }
}

/// MySQL renditions of the queries above.
///
/// plWordNet dumps mix `INT`, `BIGINT` and `VARBINARY` columns; the casts make
/// every row decode as `(i64.., String)` regardless of the dump.
pub mod mysql {
    use plwn_graph_model::RelationTable;

    pub const LEXICAL_UNITS: &str = "SELECT DISTINCT CAST(id AS SIGNED), CAST(lemma AS CHAR), \
         CAST(pos AS SIGNED), CAST(domain AS SIGNED), CAST(variant AS SIGNED) FROM lexicalunit";

    pub const SYNSET_IDS: &str = "SELECT DISTINCT CAST(id AS SIGNED) FROM synset";

    pub const SYNSET_MEMBERS: &str =
        "SELECT DISTINCT CAST(lex_id AS SIGNED) FROM unitandsynset WHERE syn_id = ?";

    pub fn relations(table: RelationTable) -> &'static str {
        match table {
            RelationTable::SynsetRelation => {
                "SELECT DISTINCT CAST(parent_id AS SIGNED), CAST(child_id AS SIGNED), \
                 CAST(rel_id AS SIGNED) FROM synsetrelation"
            }
            RelationTable::LexicalRelation => {
                "SELECT DISTINCT CAST(parent_id AS SIGNED), CAST(child_id AS SIGNED), \
                 CAST(rel_id AS SIGNED) FROM lexicalrelation"
            }
        }
    }
}
