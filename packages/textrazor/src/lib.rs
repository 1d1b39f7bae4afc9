//! TextRazor client - text analysis and entity dictionary management.
//!
//! This crate talks to the TextRazor service over HTTP: it submits text for
//! analysis and turns the reply into a typed, fully cross-referenced
//! document, and it manages the server-side entity dictionaries that
//! analysis can match against.
//!
//! # Example
//!
//! ```
//! use textrazor::config;
//!
//! // Dictionary ids become URL path segments and are checked up front
//! assert!(config::validate_id("developers").is_ok());
//! assert!(config::validate_id("../admin").is_err());
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, client configuration and id validation
//! - [`error`]: Error types and Result alias
//! - [`http`]: Transport trait and the `reqwest` implementation
//! - [`reply`]: Reply envelope decoding
//! - [`attributes`]: `name -> [values]` maps with three-state lookup
//! - [`annotations`]: Analysis result model
//! - [`analysis`]: Analysis client
//! - [`dictionary`]: Dictionary management client
//! - [`demo`]: Walkthroughs run by the `textrazor demo` command
//! - [`cli`]: Command-line interface

pub mod analysis;
pub mod annotations;
pub mod attributes;
pub mod cli;
pub mod config;
pub mod demo;
pub mod dictionary;
pub mod error;
pub mod http;
pub mod reply;

// Re-export commonly used items
pub use analysis::{AnalysisOptions, CleanupMode, TextRazor};
pub use annotations::{AnalyzedText, BoundValue, BoundVariable, CustomAnnotation, Entity, Sentence, Word};
pub use attributes::{AttributeMap, Lookup};
pub use config::{validate_id, ClientConfig};
pub use dictionary::{Dictionary, DictionaryEntry, DictionaryManager, MatchType, PagedEntries};
pub use error::{AnalysisError, NetworkError, Result, TextRazorError};
pub use http::{HttpTransport, Transport};
