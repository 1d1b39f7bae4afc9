//! The two walkthroughs run by `textrazor demo`: managing a dictionary and
//! using it for analysis, then a full analysis with enrichment queries and
//! a custom rule.
//!
//! Output goes to any `io::Write` so the flows can be checked in tests.

use std::io::Write;

use crate::analysis::TextRazor;
use crate::dictionary::{Dictionary, DictionaryEntry, DictionaryManager};
use crate::error::Result;
use crate::http::Transport;

pub const DEVELOPERS_DICTIONARY: &str = "developers";

pub const DICTIONARY_SAMPLE: &str = "Although it is very early in the process, higher-level \
parallelism is slated to be a key theme of the next version of C++, says Bjarne Stroustrup";

pub const ANALYSIS_SAMPLE: &str = "LONDON - Barclays misled shareholders and the public RBS \
about one of the biggest investments in the bank's history, a BBC Panorama investigation has found.";

pub const LATITUDE_QUERY: &str =
    "fbase:/location/location/geolocation>/location/geocode/latitude";

pub const LONGITUDE_QUERY: &str =
    "fbase:/location/location/geolocation>/location/geocode/longitude";

pub const COMPANY_RULE: &str =
    "entity_companies(CompanyEntity) :- entity_type(CompanyEntity, 'Company').";

/// Extractors requested by the analysis walkthrough.
pub const ANALYSIS_EXTRACTORS: &[&str] = &[
    "words",
    "entities",
    "entailments",
    "senses",
    "phrases",
    "dependency-trees",
    "relations",
    "entity_companies",
];

/// Reset the account's dictionaries, create and fill `developers`, read it
/// back, then analyse text that mentions one of its entries.
pub fn dictionary_flow<T: Transport, W: Write>(api_key: &str, transport: &T, out: &mut W) -> Result<()> {
    let manager = DictionaryManager::with_transport(api_key, transport);

    for dictionary in manager.all_dictionaries()? {
        writeln!(out, "Deleting current dictionary: {}", dictionary.id)?;
        manager.delete_dictionary(&dictionary)?;
    }

    let developers = Dictionary::new(DEVELOPERS_DICTIONARY);
    manager.create_dictionary(&developers)?;

    let entries = vec![DictionaryEntry::new("DEV2", "Bjarne Stroustrup")
        .with_data("types", ["cpp_developer", "writer"])];
    manager.add_entries(&developers.id, &entries)?;

    let page = manager.all_entries(&developers.id)?;
    writeln!(out, "Dictionary contains: {} total entries.", page.total)?;
    for entry in &page.entries {
        writeln!(out, "Dictionary entry in '{}': {} {}", developers.id, entry.id, entry.text)?;
    }

    let entry = manager.get_entry(&developers.id, "DEV2")?;
    writeln!(out, "Entry text: {}", entry.text)?;

    let mut client = TextRazor::with_transport(api_key, transport);
    client
        .set_entity_dictionaries([developers.id.as_str()])
        .add_extractor("entities");

    let doc = client.analyze(DICTIONARY_SAMPLE)?;
    let custom = doc
        .entities()
        .iter()
        .filter_map(|e| e.custom_entity_id.as_deref().map(|id| (e, id)));
    for (entity, custom_id) in custom {
        writeln!(out, "Found custom entity: {custom_id}")?;
        for entity_type in entity.data_for("types").values() {
            writeln!(out, "Type: {entity_type}")?;
        }
    }

    Ok(())
}

/// Analyse the sample news sentence and walk every layer of the result.
pub fn analysis_flow<T: Transport, W: Write>(api_key: &str, transport: &T, out: &mut W) -> Result<()> {
    let mut client = TextRazor::with_transport(api_key, transport);
    for extractor in ANALYSIS_EXTRACTORS {
        client.add_extractor(*extractor);
    }
    client
        .set_enrichment_queries([LATITUDE_QUERY, LONGITUDE_QUERY])
        .set_rules(COMPANY_RULE);

    let doc = client.analyze(ANALYSIS_SAMPLE)?;

    for sentence in doc.sentences() {
        for word in sentence.words() {
            writeln!(out, "----------------")?;
            writeln!(out, "Word: {}", word.token())?;

            for child in word.children() {
                writeln!(out, "Child: {}", child.token())?;
            }

            for entity in word.entities() {
                writeln!(
                    out,
                    "Matched Entity: {}",
                    entity.entity_english_id.as_deref().unwrap_or(&entity.entity_id)
                )?;
                if let Some(latitude) = entity.data_for(LATITUDE_QUERY).first() {
                    writeln!(out, "Entity latitude: {latitude}")?;
                }
                if let Some(longitude) = entity.data_for(LONGITUDE_QUERY).first() {
                    writeln!(out, "Entity longitude: {longitude}")?;
                }
            }

            for sense in word.senses() {
                writeln!(out, "Word sense: {} has score: {}", sense.synset, sense.score)?;
            }
        }
    }

    for annotation in doc.custom_annotations() {
        for variable in annotation.contents() {
            for entity in variable.entities() {
                writeln!(out, "Variable: {} Value: {}", variable.key(), entity.entity_id)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_support::MockTransport;
    use crate::http::{Method, RawResponse};
    use serde_json::json;

    fn ok(body: serde_json::Value) -> RawResponse {
        RawResponse::new(200, body.to_string())
    }

    #[test]
    fn test_dictionary_flow() {
        let transport = MockTransport::new(vec![
            ok(json!({"ok": true, "dictionaries": [{"id": "old"}]})),
            ok(json!({"ok": true})),
            ok(json!({"ok": true})),
            ok(json!({"ok": true})),
            ok(json!({"ok": true, "response": {"total": 1, "entries": [
                {"id": "DEV2", "text": "Bjarne Stroustrup", "data": {"types": ["cpp_developer", "writer"]}}
            ]}})),
            ok(json!({"ok": true, "response": {"id": "DEV2", "text": "Bjarne Stroustrup"}})),
            ok(json!({"ok": true, "response": {
                "entities": [
                    {"id": 0, "entityId": "C++", "startingPos": 114, "endingPos": 117,
                     "type": ["ProgrammingLanguage"]},
                    {"id": 1, "entityId": "Bjarne Stroustrup", "startingPos": 132,
                     "endingPos": 149, "customEntityId": "DEV2",
                     "data": {"types": ["cpp_developer", "writer"]}}
                ]
            }})),
        ]);

        let mut out = Vec::new();
        dictionary_flow("key", &transport, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Deleting current dictionary: old"));
        assert!(out.contains("Dictionary contains: 1 total entries."));
        assert!(out.contains("Entry text: Bjarne Stroustrup"));
        assert!(out.contains("Found custom entity: DEV2"));
        assert_eq!(out.matches("Found custom entity").count(), 1);
        assert!(out.contains("Type: writer"));

        let methods: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|(r, _)| r.method)
            .collect();
        assert_eq!(
            methods,
            vec![
                Method::Get,
                Method::Delete,
                Method::Put,
                Method::Post,
                Method::Get,
                Method::Get,
                Method::Post
            ]
        );
    }

    #[test]
    fn test_analysis_flow() {
        let transport = MockTransport::with_json(&json!({
            "ok": true,
            "response": {
                "sentences": [{"words": [
                    {"position": 0, "startingPos": 0, "endingPos": 6, "token": "LONDON"},
                    {"position": 1, "startingPos": 9, "endingPos": 17, "token": "Barclays",
                     "parentPosition": 2},
                    {"position": 2, "startingPos": 18, "endingPos": 24, "token": "misled",
                     "senses": [{"synset": "mislead.v.01", "score": 0.5}]}
                ]}],
                "entities": [
                    {"id": 0, "entityId": "London", "startingPos": 0, "endingPos": 6,
                     "type": ["Place"], "data": {
                        "fbase:/location/location/geolocation>/location/geocode/latitude": ["51.5"],
                        "fbase:/location/location/geolocation>/location/geocode/longitude": []
                     }},
                    {"id": 1, "entityId": "Barclays", "startingPos": 9, "endingPos": 17,
                     "type": ["Company"]}
                ],
                "customAnnotations": [{"name": "entity_companies", "contents": [
                    {"key": "CompanyEntity", "entities": [1]}
                ]}]
            }
        }));

        let mut out = Vec::new();
        analysis_flow("key", &transport, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("Word: LONDON"));
        assert!(out.contains("Matched Entity: London"));
        assert!(out.contains("Entity latitude: 51.5"));
        assert!(!out.contains("Entity longitude"));
        assert!(out.contains("Child: Barclays"));
        assert!(out.contains("Word sense: mislead.v.01 has score: 0.5"));
        assert!(out.contains("Variable: CompanyEntity Value: Barclays"));

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.form_value("extractors"),
            Some("dependency-trees,entailments,entities,entity_companies,phrases,relations,senses,words")
        );
        assert_eq!(request.form_value("rules"), Some(COMPANY_RULE));
    }
}
