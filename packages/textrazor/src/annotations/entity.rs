//! Recognised entities.

use crate::attributes::{AttributeMap, Lookup};

/// A recognised span of text linked to a knowledge-base entry or to a
/// user dictionary entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Entity id as sent by the service; custom annotations refer to it.
    pub id: usize,

    /// Knowledge-base name (e.g. "Barclays"), or the dictionary entry text.
    pub entity_id: String,

    /// English knowledge-base name, when the analysed text is not English.
    pub entity_english_id: Option<String>,

    /// Text as it appears in the document.
    pub matched_text: String,

    /// Character offset of the first character.
    pub starting_pos: usize,

    /// Character offset one past the last character.
    pub ending_pos: usize,

    /// Arena indices of the words the service matched this entity on.
    /// Resolve with [`AnalyzedText::resolve_words`](super::AnalyzedText::resolve_words).
    pub matching_words: Vec<usize>,

    /// DBpedia types.
    pub types: Vec<String>,

    pub freebase_types: Vec<String>,

    pub confidence_score: f64,

    pub relevance_score: f64,

    pub freebase_id: Option<String>,

    pub wikidata_id: Option<String>,

    pub wiki_link: Option<String>,

    /// Enrichment query results, or the dictionary entry's data for custom
    /// entities.
    pub data: AttributeMap,

    /// Dictionary entry id, set only for entities matched from a user
    /// dictionary.
    pub custom_entity_id: Option<String>,
}

impl Entity {
    /// Whether this entity came from a user dictionary.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.custom_entity_id.is_some()
    }

    /// Three-state lookup of an enrichment query result.
    #[must_use]
    pub fn data_for(&self, key: &str) -> Lookup<'_> {
        self.data.lookup(key)
    }

    /// Whether the character span overlaps `[start, end)`.
    #[must_use]
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.starting_pos < end && start < self.ending_pos
    }

    #[must_use]
    pub fn has_type(&self, entity_type: &str) -> bool {
        self.types.iter().any(|t| t == entity_type)
    }

    pub(crate) fn span_key(&self) -> (usize, usize, Vec<String>) {
        (self.starting_pos, self.ending_pos, self.types.clone())
    }
}
