//! Typed model of an analysis result.
//!
//! - [`document`]: the [`AnalyzedText`] root and reference resolution
//! - [`word`]: sentences, words and word senses
//! - [`entity`]: recognised entities
//! - [`custom`]: rule matches and their bound variables
//! - [`layers`]: optional layers (topics, categories, phrases, ...)

pub mod custom;
pub mod document;
pub mod entity;
pub mod layers;
pub mod word;

pub(crate) mod wire;

pub use custom::{BoundValue, BoundVariable, CustomAnnotation};
pub use document::AnalyzedText;
pub use entity::Entity;
pub use layers::{Category, Entailment, Phrase, Property, Relation, RelationParam, Topic};
pub use word::{Sense, Sentence, Word};
