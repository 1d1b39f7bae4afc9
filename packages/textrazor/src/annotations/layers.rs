//! Annotation layers produced by the optional extractors: topics,
//! classifier categories, noun phrases, entailments, relations and
//! properties.
//!
//! Word references are arena indices, validated at decode time like every
//! other cross reference in the document.

/// Document topic (`topics` extractor).
#[derive(Debug, Clone, PartialEq)]
pub struct Topic {
    pub label: String,
    pub score: f64,
    pub wiki_link: Option<String>,
    pub wikidata_id: Option<String>,
}

/// Category assigned by a classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub classifier_id: String,
    pub category_id: String,
    pub label: String,
    pub score: f64,
}

/// Noun phrase (`phrases` extractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phrase {
    pub words: Vec<usize>,
}

/// A word implied by part of the text (`entailments` extractor).
#[derive(Debug, Clone, PartialEq)]
pub struct Entailment {
    /// Words the entailment was derived from.
    pub words: Vec<usize>,
    pub entailed_word: String,
    pub prior_score: f64,
    pub context_score: f64,
    pub score: f64,
}

/// Relation argument, e.g. the `SUBJECT` of a predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationParam {
    pub relation: String,
    pub words: Vec<usize>,
}

/// Predicate with its arguments (`relations` extractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub predicate_words: Vec<usize>,
    pub params: Vec<RelationParam>,
}

impl Relation {
    /// Words bound to the argument with this label.
    #[must_use]
    pub fn param(&self, relation: &str) -> Option<&RelationParam> {
        self.params.iter().find(|p| p.relation == relation)
    }
}

/// Property of a subject, e.g. "British" of "bank" (`relations` extractor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub subject_words: Vec<usize>,
    pub property_words: Vec<usize>,
}
