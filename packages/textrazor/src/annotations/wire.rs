//! Raw analysis reply records, exactly as the service sends them.
//!
//! Cross references are still plain numbers here (word positions and
//! entity ids); `document::build` resolves them into arena indices.

use serde::Deserialize;

use crate::attributes::AttributeMap;

#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisEnvelope {
    #[serde(default)]
    pub time: Option<f64>,
    pub response: Response,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Response {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub language_is_reliable: bool,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub custom_annotations: Vec<Custom>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub noun_phrases: Vec<NounPhrase>,
    #[serde(default)]
    pub entailments: Vec<Entailment>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Sentence {
    #[serde(default)]
    pub position: Option<usize>,
    #[serde(default)]
    pub words: Vec<Word>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Word {
    pub position: usize,
    pub starting_pos: usize,
    pub ending_pos: usize,
    pub token: String,
    #[serde(default)]
    pub lemma: String,
    #[serde(default)]
    pub stem: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub parent_position: Option<usize>,
    #[serde(default)]
    pub relation_to_parent: Option<String>,
    #[serde(default)]
    pub senses: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Sense {
    pub synset: String,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Entity {
    pub id: usize,
    #[serde(default)]
    pub entity_id: String,
    #[serde(default)]
    pub entity_english_id: Option<String>,
    #[serde(default)]
    pub matched_text: String,
    pub starting_pos: usize,
    pub ending_pos: usize,
    #[serde(default)]
    pub matching_tokens: Vec<usize>,
    #[serde(default, rename = "type")]
    pub types: Vec<String>,
    #[serde(default)]
    pub freebase_types: Vec<String>,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub freebase_id: Option<String>,
    #[serde(default)]
    pub wikidata_id: Option<String>,
    #[serde(default)]
    pub wiki_link: Option<String>,
    #[serde(default)]
    pub data: AttributeMap,
    #[serde(default)]
    pub custom_entity_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Custom {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub contents: Vec<BoundVariable>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoundVariable {
    pub key: String,
    #[serde(default)]
    pub entities: Vec<usize>,
    #[serde(default)]
    pub words: Vec<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Topic {
    pub label: String,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub wiki_link: Option<String>,
    #[serde(default)]
    pub wikidata_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Category {
    pub classifier_id: String,
    pub category_id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NounPhrase {
    pub word_positions: Vec<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Entailment {
    pub word_positions: Vec<usize>,
    pub entailed_tree: EntailedTree,
    #[serde(default)]
    pub prior_score: f64,
    #[serde(default)]
    pub context_score: f64,
    #[serde(default)]
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EntailedTree {
    pub word: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Relation {
    pub word_positions: Vec<usize>,
    #[serde(default)]
    pub params: Vec<RelationParam>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RelationParam {
    pub relation: String,
    pub word_positions: Vec<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Property {
    pub word_positions: Vec<usize>,
    pub property_positions: Vec<usize>,
}
