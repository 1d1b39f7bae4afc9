//! Words and sentences.
//!
//! Both are handed out as lightweight handles borrowing the owning
//! [`AnalyzedText`], the same way `roxmltree::Node` borrows its document.
//! Handles are `Copy` and navigation between them is plain index lookup.

use std::ops::Range;

use super::document::AnalyzedText;
use super::entity::Entity;

/// Word sense disambiguation candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Sense {
    /// WordNet synset identifier, e.g. `investigation.n.02`.
    pub synset: String,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct WordData {
    pub position: usize,
    pub token: String,
    pub lemma: String,
    pub stem: String,
    pub part_of_speech: String,
    pub starting_pos: usize,
    pub ending_pos: usize,
    pub relation_to_parent: Option<String>,
    pub senses: Vec<Sense>,
    pub sentence: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub entities: Vec<usize>,
}

#[derive(Debug, Clone)]
pub(crate) struct SentenceData {
    pub position: usize,
    pub words: Range<usize>,
}

/// A token of the analysed text.
#[derive(Clone, Copy)]
pub struct Word<'a> {
    doc: &'a AnalyzedText,
    index: usize,
}

impl<'a> Word<'a> {
    pub(crate) fn new(doc: &'a AnalyzedText, index: usize) -> Self {
        Self { doc, index }
    }

    fn data(&self) -> &'a WordData {
        &self.doc.words[self.index]
    }

    /// Index in the document's word arena.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Position of the word in the document, as reported by the service.
    #[must_use]
    pub fn position(&self) -> usize {
        self.data().position
    }

    #[must_use]
    pub fn token(&self) -> &'a str {
        &self.data().token
    }

    #[must_use]
    pub fn lemma(&self) -> &'a str {
        &self.data().lemma
    }

    #[must_use]
    pub fn stem(&self) -> &'a str {
        &self.data().stem
    }

    /// Penn Treebank tag.
    #[must_use]
    pub fn part_of_speech(&self) -> &'a str {
        &self.data().part_of_speech
    }

    #[must_use]
    pub fn starting_pos(&self) -> usize {
        self.data().starting_pos
    }

    #[must_use]
    pub fn ending_pos(&self) -> usize {
        self.data().ending_pos
    }

    /// Dependency label towards the parent, e.g. `nsubj`.
    #[must_use]
    pub fn relation_to_parent(&self) -> Option<&'a str> {
        self.data().relation_to_parent.as_deref()
    }

    /// Dependency parent; `None` for the root of a sentence.
    #[must_use]
    pub fn parent(&self) -> Option<Word<'a>> {
        self.data().parent.map(|i| Word::new(self.doc, i))
    }

    /// Dependency children, in document order.
    pub fn children(&self) -> impl Iterator<Item = Word<'a>> + 'a {
        let doc = self.doc;
        self.data().children.iter().map(move |&i| Word::new(doc, i))
    }

    #[must_use]
    pub fn senses(&self) -> &'a [Sense] {
        &self.data().senses
    }

    /// Entities whose character span overlaps this word.
    pub fn entities(&self) -> impl Iterator<Item = &'a Entity> + 'a {
        let doc = self.doc;
        self.data().entities.iter().map(move |&i| &doc.entities[i])
    }

    #[must_use]
    pub fn sentence(&self) -> Sentence<'a> {
        Sentence::new(self.doc, self.data().sentence)
    }
}

impl std::fmt::Debug for Word<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Word")
            .field("position", &self.position())
            .field("token", &self.token())
            .finish()
    }
}

impl PartialEq for Word<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.index == other.index
    }
}

/// One sentence of the analysed text.
#[derive(Clone, Copy)]
pub struct Sentence<'a> {
    doc: &'a AnalyzedText,
    index: usize,
}

impl<'a> Sentence<'a> {
    pub(crate) fn new(doc: &'a AnalyzedText, index: usize) -> Self {
        Self { doc, index }
    }

    fn data(&self) -> &'a SentenceData {
        &self.doc.sentences[self.index]
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.data().position
    }

    /// Words of the sentence, in document order.
    pub fn words(&self) -> impl Iterator<Item = Word<'a>> + 'a {
        let doc = self.doc;
        self.data().words.clone().map(move |i| Word::new(doc, i))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data().words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data().words.is_empty()
    }

    /// Words without a dependency parent.
    pub fn roots(&self) -> impl Iterator<Item = Word<'a>> + 'a {
        self.words().filter(|w| w.parent().is_none())
    }

    #[must_use]
    pub fn contains(&self, word: Word<'_>) -> bool {
        std::ptr::eq(self.doc, word.doc) && self.data().words.contains(&word.index)
    }
}

impl std::fmt::Debug for Sentence<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sentence")
            .field("position", &self.position())
            .field("words", &self.len())
            .finish()
    }
}
