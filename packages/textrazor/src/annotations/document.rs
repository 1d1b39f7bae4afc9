//! The analysed document and the decode pass that resolves its cross
//! references.
//!
//! All annotations live in flat arenas owned by [`AnalyzedText`]. References
//! between them (word to parent, word to entity, rule match to entity or
//! word) are arena indices, checked once while decoding. After a successful
//! decode every index is valid, so navigation never fails.

use std::collections::HashMap;

use super::custom::{BoundValue, BoundVariableData, CustomAnnotation, CustomData};
use super::entity::Entity;
use super::layers::{Category, Entailment, Phrase, Property, Relation, RelationParam, Topic};
use super::wire;
use super::word::{Sense, Sentence, SentenceData, Word, WordData};
use crate::error::{Result, TextRazorError};
use crate::http::RawResponse;
use crate::reply::decode_reply;

/// Result of one analysis request.
///
/// Immutable once built. Which parts are populated depends on the
/// extractors that were requested; absent layers are empty.
#[derive(Debug, Clone)]
pub struct AnalyzedText {
    time: Option<f64>,
    language: Option<String>,
    language_is_reliable: bool,
    pub(crate) words: Vec<WordData>,
    pub(crate) sentences: Vec<SentenceData>,
    pub(crate) entities: Vec<Entity>,
    by_position: HashMap<usize, usize>,
    custom: Vec<CustomData>,
    topics: Vec<Topic>,
    categories: Vec<Category>,
    phrases: Vec<Phrase>,
    entailments: Vec<Entailment>,
    relations: Vec<Relation>,
    properties: Vec<Property>,
}

impl AnalyzedText {
    /// Decode a complete reply body, envelope included.
    ///
    /// # Examples
    /// ```
    /// use textrazor::AnalyzedText;
    ///
    /// let json = r#"{"ok": true, "response": {"sentences": [{"words": [
    ///     {"position": 0, "startingPos": 0, "endingPos": 5, "token": "Hello"}
    /// ]}]}}"#;
    /// let doc = AnalyzedText::from_json(json).unwrap();
    /// assert_eq!(doc.words().next().unwrap().token(), "Hello");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_reply(&RawResponse::new(200, json))
    }

    pub(crate) fn from_reply(raw: &RawResponse) -> Result<Self> {
        let envelope: wire::AnalysisEnvelope = decode_reply(raw)?;
        build(envelope)
    }

    /// Server-side processing time in seconds.
    #[must_use]
    pub fn time(&self) -> Option<f64> {
        self.time
    }

    /// ISO 639-2 code of the detected language.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn language_is_reliable(&self) -> bool {
        self.language_is_reliable
    }

    pub fn sentences(&self) -> impl Iterator<Item = Sentence<'_>> {
        (0..self.sentences.len()).map(move |i| Sentence::new(self, i))
    }

    /// All words, in document order.
    pub fn words(&self) -> impl Iterator<Item = Word<'_>> {
        (0..self.words.len()).map(move |i| Word::new(self, i))
    }

    /// Word by arena index.
    #[must_use]
    pub fn word(&self, index: usize) -> Option<Word<'_>> {
        (index < self.words.len()).then(|| Word::new(self, index))
    }

    /// Word by the position the service assigned to it.
    #[must_use]
    pub fn word_at_position(&self, position: usize) -> Option<Word<'_>> {
        self.by_position
            .get(&position)
            .map(|&index| Word::new(self, index))
    }

    /// Turn arena indices (as stored in entities, phrases, ...) into words.
    ///
    /// Indices outside this document's arena are skipped.
    pub fn resolve_words<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = Word<'a>> + 'a {
        indices.iter().filter_map(move |&i| self.word(i))
    }

    /// Entities, deduplicated by span and type.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities matched from user dictionaries.
    pub fn custom_entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_custom())
    }

    /// Rule matches, in the order the service reported them.
    pub fn custom_annotations(&self) -> impl Iterator<Item = CustomAnnotation<'_>> {
        self.custom.iter().map(move |c| CustomAnnotation::new(self, c))
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    #[must_use]
    pub fn entailments(&self) -> &[Entailment] {
        &self.entailments
    }

    #[must_use]
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}

/// Word position to arena index lookup.
struct PositionIndex<'m>(&'m HashMap<usize, usize>);

impl PositionIndex<'_> {
    fn word(&self, position: usize, what: &str) -> Result<usize> {
        self.0.get(&position).copied().ok_or_else(|| {
            TextRazorError::malformed(format!(
                "{what} refers to word position {position}, which is not in the document"
            ))
        })
    }

    fn words(&self, positions: &[usize], what: &str) -> Result<Vec<usize>> {
        positions.iter().map(|&p| self.word(p, what)).collect()
    }
}

/// Build the document from raw records, resolving every reference.
fn build(envelope: wire::AnalysisEnvelope) -> Result<AnalyzedText> {
    let response = envelope.response;

    // Words, sentence by sentence, into one arena.
    let mut words = Vec::new();
    let mut sentences = Vec::with_capacity(response.sentences.len());
    let mut parent_positions = Vec::new();
    let mut by_position = HashMap::new();

    for (sentence_index, sentence) in response.sentences.into_iter().enumerate() {
        let start = words.len();
        for word in sentence.words {
            if by_position.insert(word.position, words.len()).is_some() {
                return Err(TextRazorError::malformed(format!(
                    "word position {} appears more than once",
                    word.position
                )));
            }
            parent_positions.push(word.parent_position);
            words.push(WordData {
                position: word.position,
                token: word.token,
                lemma: word.lemma,
                stem: word.stem,
                part_of_speech: word.part_of_speech,
                starting_pos: word.starting_pos,
                ending_pos: word.ending_pos,
                relation_to_parent: word.relation_to_parent,
                senses: word
                    .senses
                    .into_iter()
                    .map(|s| Sense {
                        synset: s.synset,
                        score: s.score,
                    })
                    .collect(),
                sentence: sentence_index,
                parent: None,
                children: Vec::new(),
                entities: Vec::new(),
            });
        }
        sentences.push(SentenceData {
            position: sentence.position.unwrap_or(sentence_index),
            words: start..words.len(),
        });
    }

    let positions = PositionIndex(&by_position);

    // Dependency parents, restricted to the word's own sentence.
    for (index, parent_position) in parent_positions.into_iter().enumerate() {
        let Some(parent_position) = parent_position else {
            continue;
        };
        let what = format!("parent of word {}", words[index].position);
        let parent = positions.word(parent_position, &what)?;
        if parent == index {
            return Err(TextRazorError::malformed(format!("{what} is the word itself")));
        }
        if words[parent].sentence != words[index].sentence {
            return Err(TextRazorError::malformed(format!(
                "{what} lies in another sentence"
            )));
        }
        words[index].parent = Some(parent);
        words[parent].children.push(index);
    }

    // Every parent chain must reach a root within its sentence.
    for word in &words {
        let bound = sentences[word.sentence].words.len();
        let mut current = word.parent;
        let mut steps = 0;
        while let Some(parent) = current {
            steps += 1;
            if steps > bound {
                return Err(TextRazorError::malformed(format!(
                    "parent chain of word {} contains a dependency cycle",
                    word.position
                )));
            }
            current = words[parent].parent;
        }
    }

    // Entities: fold duplicates, then attach to overlapping words.
    let mut entities: Vec<Entity> = Vec::with_capacity(response.entities.len());
    let mut by_span = HashMap::new();
    let mut by_id = HashMap::new();

    for raw in response.entities {
        if raw.starting_pos > raw.ending_pos {
            return Err(TextRazorError::malformed(format!(
                "entity {} ends before it starts",
                raw.id
            )));
        }
        let what = format!("entity {}", raw.id);
        let entity = Entity {
            id: raw.id,
            entity_id: raw.entity_id,
            entity_english_id: raw.entity_english_id,
            matched_text: raw.matched_text,
            starting_pos: raw.starting_pos,
            ending_pos: raw.ending_pos,
            matching_words: positions.words(&raw.matching_tokens, &what)?,
            types: raw.types,
            freebase_types: raw.freebase_types,
            confidence_score: raw.confidence_score,
            relevance_score: raw.relevance_score,
            freebase_id: raw.freebase_id,
            wikidata_id: raw.wikidata_id,
            wiki_link: raw.wiki_link,
            data: raw.data,
            custom_entity_id: raw.custom_entity_id,
        };

        let index = *by_span.entry(entity.span_key()).or_insert_with(|| {
            entities.push(entity);
            entities.len() - 1
        });
        if by_id.insert(raw.id, index).is_some() {
            return Err(TextRazorError::malformed(format!(
                "entity id {} appears more than once",
                raw.id
            )));
        }
    }

    for (entity_index, entity) in entities.iter().enumerate() {
        for word in words
            .iter_mut()
            .filter(|w| entity.overlaps(w.starting_pos, w.ending_pos))
        {
            word.entities.push(entity_index);
        }
    }

    // Rule matches.
    let mut custom = Vec::with_capacity(response.custom_annotations.len());
    for annotation in response.custom_annotations {
        let mut contents = Vec::with_capacity(annotation.contents.len());
        for variable in annotation.contents {
            let what = format!("rule variable {}", variable.key);
            let value = match (variable.entities.is_empty(), variable.words.is_empty()) {
                (false, true) => BoundValue::EntityMatches(
                    variable
                        .entities
                        .iter()
                        .map(|id| {
                            by_id.get(id).copied().ok_or_else(|| {
                                TextRazorError::malformed(format!(
                                    "{what} refers to unknown entity {id}"
                                ))
                            })
                        })
                        .collect::<Result<_>>()?,
                ),
                (true, false) => BoundValue::WordMatches(positions.words(&variable.words, &what)?),
                (false, false) => {
                    return Err(TextRazorError::malformed(format!(
                        "{what} binds both entities and words"
                    )))
                }
                (true, true) => {
                    return Err(TextRazorError::malformed(format!("{what} binds nothing")))
                }
            };
            contents.push(BoundVariableData {
                key: variable.key,
                value,
            });
        }
        custom.push(CustomData {
            name: annotation.name,
            contents,
        });
    }

    // Optional layers.
    let phrases = response
        .noun_phrases
        .into_iter()
        .map(|p| {
            Ok(Phrase {
                words: positions.words(&p.word_positions, "noun phrase")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let entailments = response
        .entailments
        .into_iter()
        .map(|e| {
            Ok(Entailment {
                words: positions.words(&e.word_positions, "entailment")?,
                entailed_word: e.entailed_tree.word,
                prior_score: e.prior_score,
                context_score: e.context_score,
                score: e.score,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let relations = response
        .relations
        .into_iter()
        .map(|r| {
            let params = r
                .params
                .into_iter()
                .map(|p| {
                    Ok(RelationParam {
                        words: positions.words(&p.word_positions, "relation parameter")?,
                        relation: p.relation,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Relation {
                predicate_words: positions.words(&r.word_positions, "relation")?,
                params,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let properties = response
        .properties
        .into_iter()
        .map(|p| {
            Ok(Property {
                subject_words: positions.words(&p.word_positions, "property")?,
                property_words: positions.words(&p.property_positions, "property")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let topics = response
        .topics
        .into_iter()
        .map(|t| Topic {
            label: t.label,
            score: t.score,
            wiki_link: t.wiki_link,
            wikidata_id: t.wikidata_id,
        })
        .collect();

    let categories = response
        .categories
        .into_iter()
        .map(|c| Category {
            classifier_id: c.classifier_id,
            category_id: c.category_id,
            label: c.label,
            score: c.score,
        })
        .collect();

    tracing::debug!(
        sentences = sentences.len(),
        words = words.len(),
        entities = entities.len(),
        custom = custom.len(),
        "Decoded analysis"
    );

    Ok(AnalyzedText {
        time: envelope.time,
        language: response.language,
        language_is_reliable: response.language_is_reliable,
        words,
        sentences,
        entities,
        by_position,
        custom,
        topics,
        categories,
        phrases,
        entailments,
        relations,
        properties,
    })
}
