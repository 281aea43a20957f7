use crate::EntityId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Part-of-speech codes used by the `lexicalunit.pos` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartOfSpeech {
    Verb,
    Noun,
    Adverb,
    Adjective,
    VerbEn,
    NounEn,
    AdverbEn,
    AdjectiveEn,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 8] = [
        PartOfSpeech::Verb,
        PartOfSpeech::Noun,
        PartOfSpeech::Adverb,
        PartOfSpeech::Adjective,
        PartOfSpeech::VerbEn,
        PartOfSpeech::NounEn,
        PartOfSpeech::AdverbEn,
        PartOfSpeech::AdjectiveEn,
    ];

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Verb),
            2 => Some(Self::Noun),
            3 => Some(Self::Adverb),
            4 => Some(Self::Adjective),
            5 => Some(Self::VerbEn),
            6 => Some(Self::NounEn),
            7 => Some(Self::AdverbEn),
            8 => Some(Self::AdjectiveEn),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Verb => 1,
            Self::Noun => 2,
            Self::Adverb => 3,
            Self::Adjective => 4,
            Self::VerbEn => 5,
            Self::NounEn => 6,
            Self::AdverbEn => 7,
            Self::AdjectiveEn => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Verb => "verb",
            Self::Noun => "noun",
            Self::Adverb => "adverb",
            Self::Adjective => "adjective",
            Self::VerbEn => "verb_en",
            Self::NounEn => "noun_en",
            Self::AdverbEn => "adverb_en",
            Self::AdjectiveEn => "adjective_en",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single sense of a word.
///
/// The POS code is kept raw: the store may contain codes outside the known
/// table and those units are still exported. Use [`LexicalUnit::part_of_speech`]
/// to decode it.
///
/// `PartialEq`, `Ord` and `Hash` compare the ID only. Use
/// [`LexicalUnit::same_attributes`] to compare every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalUnit {
    id: EntityId,
    lemma: String,
    pos: i64,
    domain: i64,
    variant: i64,
}

impl LexicalUnit {
    pub fn new(
        id: EntityId,
        lemma: impl Into<String>,
        pos: i64,
        domain: i64,
        variant: i64,
    ) -> Self {
        Self {
            id,
            lemma: lemma.into(),
            pos,
            domain,
            variant,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn lemma(&self) -> &str {
        &self.lemma
    }

    /// Raw part-of-speech code.
    pub fn pos(&self) -> i64 {
        self.pos
    }

    pub fn part_of_speech(&self) -> Option<PartOfSpeech> {
        PartOfSpeech::from_code(self.pos)
    }

    pub fn domain(&self) -> i64 {
        self.domain
    }

    pub fn variant(&self) -> i64 {
        self.variant
    }

    /// Field-by-field comparison, including the ID.
    pub fn same_attributes(&self, other: &LexicalUnit) -> bool {
        self.id == other.id
            && self.lemma == other.lemma
            && self.pos == other.pos
            && self.domain == other.domain
            && self.variant == other.variant
    }
}

impl PartialEq for LexicalUnit {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LexicalUnit {}

impl Hash for LexicalUnit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for LexicalUnit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LexicalUnit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

/// `lemma:pos:variant`, e.g. `kot:noun:1`.
impl fmt::Display for LexicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.part_of_speech() {
            Some(pos) => write!(f, "{}:{}:{}", self.lemma, pos, self.variant),
            None => write!(f, "{}:pos{}:{}", self.lemma, self.pos, self.variant),
        }
    }
}
