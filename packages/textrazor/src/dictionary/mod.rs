//! Server-side entity dictionaries.
//!
//! Dictionaries are gazetteers of custom terms. Once created and filled,
//! they are referenced by id from the analysis client
//! ([`TextRazor::set_entity_dictionaries`](crate::TextRazor::set_entity_dictionaries)),
//! and matched entities carry the entry id and data.

pub mod manager;
pub mod model;

pub use manager::DictionaryManager;
pub use model::{Dictionary, DictionaryEntry, MatchType, PagedEntries};
