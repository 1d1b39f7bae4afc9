//! Analysis client.
//!
//! Accumulates request configuration (extractors, enrichment queries,
//! rules, dictionaries, ...) and submits it together with a document, one
//! synchronous round trip per call.

use std::collections::BTreeSet;
use std::fmt;

use crate::annotations::AnalyzedText;
use crate::config::ClientConfig;
use crate::error::{AnalysisError, Result};
use crate::http::{Body, HttpTransport, Method, Transport, TransportRequest};

/// How the service should clean the submitted document before analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupMode {
    /// Analyse the text as-is.
    Raw,
    /// Remove markup tags, keeping character offsets stable.
    StripTags,
    /// Extract the main content of an HTML page.
    CleanHtml,
}

impl CleanupMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::StripTags => "stripTags",
            Self::CleanHtml => "cleanHTML",
        }
    }
}

/// Request configuration carried from call to call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub extractors: BTreeSet<String>,
    pub enrichment_queries: Vec<String>,
    pub rules: Option<String>,
    pub entity_dictionaries: Vec<String>,
    pub classifiers: Vec<String>,
    pub language_override: Option<String>,
    pub cleanup_mode: Option<CleanupMode>,
    pub dbpedia_type_filters: Vec<String>,
    pub freebase_type_filters: Vec<String>,
    pub allow_overlap: Option<bool>,
}

impl AnalysisOptions {
    /// Form fields for these options, without the document itself.
    #[must_use]
    pub fn to_form(&self) -> Vec<(String, String)> {
        let mut form = Vec::new();
        let mut field = |key: &str, value: &str| form.push((key.to_string(), value.to_string()));

        if !self.extractors.is_empty() {
            let joined = self
                .extractors
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",");
            field("extractors", &joined);
        }
        if let Some(rules) = &self.rules {
            field("rules", rules);
        }
        for query in &self.enrichment_queries {
            field("entities.enrichmentQueries", query);
        }
        for dictionary in &self.entity_dictionaries {
            field("entities.dictionaries", dictionary);
        }
        if !self.classifiers.is_empty() {
            field("classifiers", &self.classifiers.join(","));
        }
        if let Some(language) = &self.language_override {
            field("languageOverride", language);
        }
        if let Some(mode) = self.cleanup_mode {
            field("cleanup.mode", mode.as_str());
        }
        for dbpedia_type in &self.dbpedia_type_filters {
            field("entities.filterDbpediaTypes", dbpedia_type);
        }
        for freebase_type in &self.freebase_type_filters {
            field("entities.filterFreebaseTypes", freebase_type);
        }
        if let Some(allow) = self.allow_overlap {
            field("entities.allowOverlap", if allow { "true" } else { "false" });
        }

        form
    }
}

/// Client for the analysis endpoint.
///
/// Configuration setters take `&mut self` and `analyze` takes `&self`, so
/// the borrow checker already prevents reconfiguring a client while a call
/// is in flight on the same thread. A client shared between threads needs
/// external synchronisation (e.g. a `Mutex`) for reconfiguration; nothing
/// inside is locked.
///
/// # Example
/// ```no_run
/// use textrazor::{ClientConfig, TextRazor};
///
/// let config = ClientConfig::builder("YOUR_API_KEY").build()?;
/// let mut client = TextRazor::new(&config)?;
/// client.add_extractor("entities");
///
/// let doc = client.analyze("Bjarne Stroustrup designed C++.")?;
/// for entity in doc.entities() {
///     println!("{}", entity.entity_id);
/// }
/// # Ok::<(), textrazor::TextRazorError>(())
/// ```
pub struct TextRazor<T = HttpTransport> {
    transport: T,
    api_key: String,
    options: AnalysisOptions,
}

impl TextRazor<HttpTransport> {
    /// Create a client talking HTTP to the configured endpoint.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(
            config.api_key.clone(),
            HttpTransport::new(config)?,
        ))
    }
}

impl<T: Transport> TextRazor<T> {
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            options: AnalysisOptions::default(),
        }
    }

    /// Current request configuration.
    #[must_use]
    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Request an extractor (e.g. `entities`, `words`, `senses`).
    /// Adding the same extractor twice has no effect.
    pub fn add_extractor(&mut self, name: impl Into<String>) -> &mut Self {
        self.options.extractors.insert(name.into());
        self
    }

    pub fn set_enrichment_queries<I, S>(&mut self, queries: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.enrichment_queries = queries.into_iter().map(Into::into).collect();
        self
    }

    /// Set the rules program. Matches come back as custom annotations.
    pub fn set_rules(&mut self, rules: impl Into<String>) -> &mut Self {
        self.options.rules = Some(rules.into());
        self
    }

    /// Match entities from these user dictionaries too.
    pub fn set_entity_dictionaries<I, S>(&mut self, dictionaries: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.entity_dictionaries = dictionaries.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_classifiers<I, S>(&mut self, classifiers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.classifiers = classifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Skip language detection and analyse as this ISO 639-2 language.
    pub fn set_language_override(&mut self, language: impl Into<String>) -> &mut Self {
        self.options.language_override = Some(language.into());
        self
    }

    pub fn set_cleanup_mode(&mut self, mode: CleanupMode) -> &mut Self {
        self.options.cleanup_mode = Some(mode);
        self
    }

    pub fn set_dbpedia_type_filters<I, S>(&mut self, types: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.dbpedia_type_filters = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_freebase_type_filters<I, S>(&mut self, types: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.freebase_type_filters = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_allow_overlap(&mut self, allow: bool) -> &mut Self {
        self.options.allow_overlap = Some(allow);
        self
    }

    /// Analyse `text` with the current configuration.
    pub fn analyze(&self, text: &str) -> Result<AnalyzedText> {
        if text.trim().is_empty() {
            return Err(AnalysisError::InvalidRequest("text is empty".into()).into());
        }
        self.submit("text", text)
    }

    /// Have the service download and analyse the document at `url`.
    pub fn analyze_url(&self, url: &str) -> Result<AnalyzedText> {
        let parsed = url::Url::parse(url)
            .map_err(|e| AnalysisError::InvalidRequest(format!("invalid URL '{url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AnalysisError::InvalidRequest(format!(
                "unsupported URL scheme '{}'",
                parsed.scheme()
            ))
            .into());
        }
        self.submit("url", url)
    }

    fn submit(&self, source_field: &str, source: &str) -> Result<AnalyzedText> {
        let request = self.build_request(source_field, source);

        tracing::debug!(
            extractors = ?self.options.extractors,
            bytes = source.len(),
            "Submitting analysis"
        );

        let raw = self.transport.send(&request, &self.api_key)?;
        AnalyzedText::from_reply(&raw)
    }

    fn build_request(&self, source_field: &str, source: &str) -> TransportRequest {
        let mut form = vec![(source_field.to_string(), source.to_string())];
        form.extend(self.options.to_form());
        TransportRequest::new(Method::Post, "/").with_body(Body::Form(form))
    }
}

impl<T> fmt::Debug for TextRazor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextRazor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
