//! Dictionary management client.

use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;

use super::model::{Dictionary, DictionaryEntry, PagedEntries};
use crate::config::{
    all_entries_path, dictionary_entries_path, dictionary_path, entry_path, validate_id,
    ClientConfig, DEFAULT_PAGE_SIZE, DICTIONARY_ROOT,
};
use crate::error::{AnalysisError, Result};
use crate::http::{Body, HttpTransport, Method, Transport, TransportRequest};
use crate::reply::{decode_reply, expect_ok};

#[derive(Deserialize)]
struct DictionaryList {
    dictionaries: Vec<Dictionary>,
}

#[derive(Deserialize)]
struct Single<T> {
    response: T,
}

#[derive(Deserialize)]
struct EntryPage {
    total: usize,
    #[serde(default)]
    entries: Vec<DictionaryEntry>,
}

/// Client for creating, listing and deleting dictionaries and their
/// entries. Every method is one synchronous round trip.
pub struct DictionaryManager<T = HttpTransport> {
    transport: T,
    api_key: String,
}

impl DictionaryManager<HttpTransport> {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(
            config.api_key.clone(),
            HttpTransport::new(config)?,
        ))
    }
}

impl<T: Transport> DictionaryManager<T> {
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
        }
    }

    fn send(&self, request: TransportRequest) -> Result<crate::http::RawResponse> {
        self.transport.send(&request, &self.api_key)
    }

    /// All dictionaries of the account.
    ///
    /// The listing is fetched once; iterate again by calling this again.
    pub fn all_dictionaries(&self) -> Result<std::vec::IntoIter<Dictionary>> {
        let raw = self.send(TransportRequest::new(Method::Get, DICTIONARY_ROOT))?;
        let list: DictionaryList = decode_reply(&raw)?;
        tracing::debug!(count = list.dictionaries.len(), "Listed dictionaries");
        Ok(list.dictionaries.into_iter())
    }

    pub fn get_dictionary(&self, dict_id: &str) -> Result<Dictionary> {
        validate_id(dict_id)?;
        let raw = self.send(TransportRequest::new(Method::Get, dictionary_path(dict_id)))?;
        let single: Single<Dictionary> = decode_reply(&raw)?;
        Ok(single.response)
    }

    /// Create (or reconfigure) a dictionary.
    pub fn create_dictionary(&self, dictionary: &Dictionary) -> Result<()> {
        validate_id(&dictionary.id)?;
        let request = TransportRequest::new(Method::Put, dictionary_path(&dictionary.id))
            .with_body(Body::Json(dictionary.config_json()));
        expect_ok(&self.send(request)?)?;
        tracing::debug!(dictionary = %dictionary.id, "Created dictionary");
        Ok(())
    }

    pub fn delete_dictionary(&self, dictionary: &Dictionary) -> Result<()> {
        self.delete_dictionary_by_id(&dictionary.id)
    }

    /// Delete a dictionary and its entries.
    ///
    /// Deleting a dictionary that does not exist succeeds: a not-found
    /// reply is logged and swallowed, whatever the service's own
    /// idempotence guarantees are.
    pub fn delete_dictionary_by_id(&self, dict_id: &str) -> Result<()> {
        validate_id(dict_id)?;
        let raw = self.send(TransportRequest::new(Method::Delete, dictionary_path(dict_id)))?;
        match expect_ok(&raw) {
            Err(e) if e.is_not_found() => {
                tracing::debug!(dictionary = dict_id, "Dictionary already absent");
                Ok(())
            }
            other => other,
        }
    }

    /// Add entries in one request; the service applies all or none.
    ///
    /// Entry ids must be valid and unique within the batch. An empty batch
    /// is a no-op.
    pub fn add_entries(&self, dict_id: &str, entries: &[DictionaryEntry]) -> Result<()> {
        validate_id(dict_id)?;
        if entries.is_empty() {
            return Ok(());
        }

        let mut seen = HashSet::new();
        for entry in entries {
            validate_id(&entry.id)?;
            if !seen.insert(entry.id.as_str()) {
                return Err(AnalysisError::InvalidRequest(format!(
                    "entry id '{}' appears more than once in the batch",
                    entry.id
                ))
                .into());
            }
        }

        let body = serde_json::to_value(entries).map_err(|e| {
            AnalysisError::InvalidRequest(format!("cannot encode dictionary entries: {e}"))
        })?;
        let request = TransportRequest::new(Method::Post, dictionary_entries_path(dict_id))
            .with_body(Body::Json(body));
        expect_ok(&self.send(request)?)?;

        tracing::debug!(dictionary = dict_id, count = entries.len(), "Added entries");
        Ok(())
    }

    /// Fetch one entry; fails with a not-found error if it does not exist.
    pub fn get_entry(&self, dict_id: &str, entry_id: &str) -> Result<DictionaryEntry> {
        validate_id(dict_id)?;
        validate_id(entry_id)?;
        let raw = self.send(TransportRequest::new(
            Method::Get,
            entry_path(dict_id, entry_id),
        ))?;
        let single: Single<DictionaryEntry> = decode_reply(&raw)?;
        Ok(single.response)
    }

    pub fn delete_entry(&self, dict_id: &str, entry_id: &str) -> Result<()> {
        validate_id(dict_id)?;
        validate_id(entry_id)?;
        let raw = self.send(TransportRequest::new(
            Method::Delete,
            entry_path(dict_id, entry_id),
        ))?;
        expect_ok(&raw)
    }

    /// First page of a dictionary's entries.
    pub fn all_entries(&self, dict_id: &str) -> Result<PagedEntries> {
        self.entries_page(dict_id, DEFAULT_PAGE_SIZE, 0)
    }

    /// One page of a dictionary's entries. Callers page explicitly, using
    /// [`PagedEntries::next_offset`].
    pub fn entries_page(&self, dict_id: &str, limit: usize, offset: usize) -> Result<PagedEntries> {
        validate_id(dict_id)?;
        if limit == 0 {
            return Err(AnalysisError::InvalidRequest("page limit must be positive".into()).into());
        }

        let request = TransportRequest::new(Method::Get, all_entries_path(dict_id))
            .with_query("limit", limit)
            .with_query("offset", offset);
        let page: Single<EntryPage> = decode_reply(&self.send(request)?)?;

        Ok(PagedEntries {
            total: page.response.total,
            offset,
            limit,
            entries: page.response.entries,
        })
    }
}

impl<T> fmt::Debug for DictionaryManager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryManager").finish_non_exhaustive()
    }
}
