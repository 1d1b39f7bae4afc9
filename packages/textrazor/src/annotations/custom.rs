//! Matches of user-defined rules.

use super::document::AnalyzedText;
use super::entity::Entity;
use super::word::Word;

/// What a rule variable was bound to. A variable binds either entities or
/// words, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// Arena indices into the document's entities.
    EntityMatches(Vec<usize>),
    /// Arena indices into the document's words.
    WordMatches(Vec<usize>),
}

#[derive(Debug, Clone)]
pub(crate) struct BoundVariableData {
    pub key: String,
    pub value: BoundValue,
}

#[derive(Debug, Clone)]
pub(crate) struct CustomData {
    pub name: Option<String>,
    pub contents: Vec<BoundVariableData>,
}

/// One match of a rule, e.g. `entity_companies(CompanyEntity)`.
#[derive(Clone, Copy)]
pub struct CustomAnnotation<'a> {
    doc: &'a AnalyzedText,
    data: &'a CustomData,
}

impl<'a> CustomAnnotation<'a> {
    pub(crate) fn new(doc: &'a AnalyzedText, data: &'a CustomData) -> Self {
        Self { doc, data }
    }

    /// Name of the matched rule, when the service reports it.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.data.name.as_deref()
    }

    /// Bound variables, in rule order.
    pub fn contents(&self) -> impl Iterator<Item = BoundVariable<'a>> + 'a {
        let doc = self.doc;
        let data = self.data;
        data.contents
            .iter()
            .map(move |data| BoundVariable { doc, data })
    }

    /// The variable bound under `key`, if any.
    #[must_use]
    pub fn variable(&self, key: &str) -> Option<BoundVariable<'a>> {
        self.contents().find(|v| v.key() == key)
    }
}

impl std::fmt::Debug for CustomAnnotation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomAnnotation")
            .field("name", &self.name())
            .field("contents", &self.data.contents)
            .finish()
    }
}

/// A rule variable and its bound value.
#[derive(Clone, Copy)]
pub struct BoundVariable<'a> {
    doc: &'a AnalyzedText,
    data: &'a BoundVariableData,
}

impl<'a> BoundVariable<'a> {
    /// Rule variable name.
    #[must_use]
    pub fn key(&self) -> &'a str {
        &self.data.key
    }

    #[must_use]
    pub fn value(&self) -> &'a BoundValue {
        &self.data.value
    }

    /// Matched entities; empty when the variable bound words.
    pub fn entities(&self) -> impl Iterator<Item = &'a Entity> + 'a {
        let doc = self.doc;
        let data = self.data;
        let indices: &'a [usize] = match &data.value {
            BoundValue::EntityMatches(indices) => indices,
            BoundValue::WordMatches(_) => &[],
        };
        indices.iter().map(move |&i| &doc.entities[i])
    }

    /// Matched words; empty when the variable bound entities.
    pub fn words(&self) -> impl Iterator<Item = Word<'a>> + 'a {
        let data = self.data;
        let indices: &'a [usize] = match &data.value {
            BoundValue::WordMatches(indices) => indices,
            BoundValue::EntityMatches(_) => &[],
        };
        self.doc.resolve_words(indices)
    }
}

impl std::fmt::Debug for BoundVariable<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundVariable")
            .field("key", &self.key())
            .field("value", self.value())
            .finish()
    }
}
