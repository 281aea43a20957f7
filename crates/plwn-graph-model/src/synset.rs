use crate::{EntityId, LexicalUnit};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A set of synonymous lexical units.
///
/// Members are copies of the units held by the entity repository, kept in
/// ascending lexical-unit ID order. Identity is the synset ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synset {
    id: EntityId,
    lu_set: BTreeSet<LexicalUnit>,
}

impl Synset {
    pub fn new(id: EntityId, lu_set: BTreeSet<LexicalUnit>) -> Self {
        Self { id, lu_set }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn lu_set(&self) -> &BTreeSet<LexicalUnit> {
        &self.lu_set
    }

    pub fn member_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.lu_set.iter().map(LexicalUnit::id)
    }

    pub fn contains(&self, lexical_unit_id: EntityId) -> bool {
        self.lu_set.iter().any(|lu| lu.id() == lexical_unit_id)
    }

    pub fn len(&self) -> usize {
        self.lu_set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lu_set.is_empty()
    }

    /// Same ID and the same members with the same attributes.
    pub fn same_attributes(&self, other: &Synset) -> bool {
        self.id == other.id
            && self.lu_set.len() == other.lu_set.len()
            && self
                .lu_set
                .iter()
                .zip(other.lu_set.iter())
                .all(|(a, b)| a.same_attributes(b))
    }
}

impl PartialEq for Synset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Synset {}

impl Hash for Synset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Synset {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Synset {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// `id: (member, member, ...)`, members in lexical-unit ID order.
impl fmt::Display for Synset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: (", self.id)?;
        for (i, lu) in self.lu_set.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{lu}")?;
        }
        f.write_str(")")
    }
}
