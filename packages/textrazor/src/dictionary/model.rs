//! Dictionary resources as stored by the service.

use serde::{Deserialize, Serialize};

use crate::attributes::AttributeMap;

/// How dictionary entries are matched against the text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Match exact tokens.
    #[default]
    Token,
    /// Match on word stems, so "developers" also matches "developer".
    Stem,
}

impl MatchType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Stem => "stem",
        }
    }
}

/// A named entity dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dictionary {
    pub id: String,

    #[serde(default)]
    pub case_insensitive: bool,

    /// ISO 639-2 language the dictionary applies to; all languages if unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default)]
    pub match_type: MatchType,
}

impl Dictionary {
    /// A case-sensitive, token-matched dictionary for all languages.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            case_insensitive: false,
            language: None,
            match_type: MatchType::Token,
        }
    }

    #[must_use]
    pub fn case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = case_insensitive;
        self
    }

    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    #[must_use]
    pub fn match_type(mut self, match_type: MatchType) -> Self {
        self.match_type = match_type;
        self
    }

    /// Body of the create request: the configuration without the id, which
    /// travels in the path.
    pub(crate) fn config_json(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "caseInsensitive": self.case_insensitive,
            "matchType": self.match_type.as_str(),
        });
        if let (Some(language), Some(object)) = (&self.language, body.as_object_mut()) {
            object.insert("language".into(), language.clone().into());
        }
        body
    }
}

/// One term of a dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub id: String,

    /// Text to match.
    pub text: String,

    /// Data attached to entities matched from this entry.
    #[serde(default)]
    pub data: AttributeMap,
}

impl DictionaryEntry {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            data: AttributeMap::new(),
        }
    }

    /// Attach values under `key`, replacing earlier values for that key.
    #[must_use]
    pub fn with_data<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data
            .insert(key, values.into_iter().map(Into::into).collect());
        self
    }
}

/// One page of a dictionary's entries.
///
/// `total` describes the dictionary at the time this page was produced; it
/// is an upper bound for that snapshot only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedEntries {
    pub total: usize,
    pub offset: usize,
    pub limit: usize,
    pub entries: Vec<DictionaryEntry>,
}

impl PagedEntries {
    /// Offset of the next page, or `None` once the listing is exhausted.
    #[must_use]
    pub fn next_offset(&self) -> Option<usize> {
        let next = self.offset + self.entries.len();
        (!self.entries.is_empty() && next < self.total).then_some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_dictionary_builder() {
        let dict = Dictionary::new("developers")
            .case_insensitive(true)
            .language("eng")
            .match_type(MatchType::Stem);

        assert_eq!(dict.id, "developers");
        assert!(dict.case_insensitive);
        assert_eq!(dict.language.as_deref(), Some("eng"));
        assert_eq!(dict.match_type, MatchType::Stem);
    }

    #[test]
    fn test_config_json() {
        let dict = Dictionary::new("developers");
        assert_eq!(
            dict.config_json(),
            json!({"caseInsensitive": false, "matchType": "token"})
        );

        let dict = dict.language("ita").match_type(MatchType::Stem);
        assert_eq!(
            dict.config_json(),
            json!({"caseInsensitive": false, "matchType": "stem", "language": "ita"})
        );
    }

    #[test]
    fn test_dictionary_deserialize_defaults() {
        let dict: Dictionary = serde_json::from_value(json!({"id": "developers"})).unwrap();
        assert_eq!(dict, Dictionary::new("developers"));

        let dict: Dictionary = serde_json::from_value(json!({
            "id": "places", "caseInsensitive": true, "matchType": "stem", "language": "eng"
        }))
        .unwrap();
        assert!(dict.case_insensitive);
        assert_eq!(dict.match_type, MatchType::Stem);
    }

    #[test]
    fn test_entry_serialization() {
        let entry = DictionaryEntry::new("DEV2", "Bjarne Stroustrup")
            .with_data("types", ["cpp_developer", "writer"]);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "DEV2",
                "text": "Bjarne Stroustrup",
                "data": {"types": ["cpp_developer", "writer"]}
            })
        );

        let back: DictionaryEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_next_offset() {
        let entry = DictionaryEntry::new("a", "A");
        let page = PagedEntries {
            total: 3,
            offset: 0,
            limit: 2,
            entries: vec![entry.clone(), entry.clone()],
        };
        assert_eq!(page.next_offset(), Some(2));

        let last = PagedEntries {
            total: 3,
            offset: 2,
            limit: 2,
            entries: vec![entry],
        };
        assert_eq!(last.next_offset(), None);

        let empty = PagedEntries {
            total: 10,
            offset: 4,
            limit: 2,
            entries: vec![],
        };
        assert_eq!(empty.next_offset(), None);
    }
}
