//! Dictionary management round trips against a mock service.

use pretty_assertions::assert_eq;
use serde_json::json;
use textrazor::{
    ClientConfig, Dictionary, DictionaryEntry, DictionaryManager, MatchType, TextRazorError,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manager(base_url: String) -> DictionaryManager {
    let config = ClientConfig::builder("test-key")
        .base_url(base_url)
        .timeout_secs(2)
        .build()
        .unwrap();
    DictionaryManager::new(&config).unwrap()
}

/// Run a blocking dictionary call off the async test runtime.
async fn with_manager<F, R>(base_url: String, f: F) -> R
where
    F: FnOnce(DictionaryManager) -> R + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(manager(base_url)))
        .await
        .unwrap()
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_dictionaries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entities/"))
        .and(header("X-TextRazor-Key", "test-key"))
        .respond_with(ok(json!({
            "ok": true,
            "dictionaries": [
                {"id": "developers", "caseInsensitive": false, "matchType": "token"},
                {"id": "places", "caseInsensitive": true, "language": "eng", "matchType": "stem"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dictionaries = with_manager(mock_server.uri(), |m| {
        m.all_dictionaries().map(|it| it.collect::<Vec<_>>())
    })
    .await
    .unwrap();

    assert_eq!(
        dictionaries,
        vec![
            Dictionary::new("developers"),
            Dictionary::new("places")
                .case_insensitive(true)
                .language("eng")
                .match_type(MatchType::Stem),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_dictionary_sends_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/entities/places"))
        .and(body_json(json!({
            "caseInsensitive": true,
            "matchType": "stem",
            "language": "eng"
        })))
        .respond_with(ok(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    with_manager(mock_server.uri(), |m| {
        m.create_dictionary(
            &Dictionary::new("places")
                .case_insensitive(true)
                .language("eng")
                .match_type(MatchType::Stem),
        )
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_entry_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/entities/developers/"))
        .and(body_json(json!([
            {"id": "DEV2", "text": "Bjarne Stroustrup",
             "data": {"types": ["cpp_developer", "writer"]}}
        ])))
        .respond_with(ok(json!({"ok": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/entities/developers/DEV2"))
        .respond_with(ok(json!({
            "ok": true,
            "response": {"id": "DEV2", "text": "Bjarne Stroustrup",
                         "data": {"types": ["cpp_developer", "writer"]}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let entry = DictionaryEntry::new("DEV2", "Bjarne Stroustrup")
        .with_data("types", ["cpp_developer", "writer"]);
    let expected = entry.clone();

    let fetched = with_manager(mock_server.uri(), move |m| {
        m.add_entries("developers", &[entry])?;
        m.get_entry("developers", "DEV2")
    })
    .await
    .unwrap();

    assert_eq!(fetched, expected);
    assert_eq!(
        fetched.data.lookup("types").values(),
        ["cpp_developer", "writer"]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_paging_to_exhaustion() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entities/developers/_all"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "0"))
        .respond_with(ok(json!({
            "ok": true,
            "response": {"total": 3, "entries": [
                {"id": "DEV1", "text": "Dennis Ritchie"},
                {"id": "DEV2", "text": "Bjarne Stroustrup"}
            ]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/entities/developers/_all"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "2"))
        .respond_with(ok(json!({
            "ok": true,
            "response": {"total": 3, "entries": [
                {"id": "DEV3", "text": "Guido van Rossum"}
            ]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ids = with_manager(mock_server.uri(), |m| {
        let mut ids = Vec::new();
        let mut offset = Some(0);
        while let Some(current) = offset {
            let page = m.entries_page("developers", 2, current)?;
            ids.extend(page.entries.iter().map(|e| e.id.clone()));
            offset = page.next_offset();
        }
        Ok::<_, TextRazorError>(ids)
    })
    .await
    .unwrap();

    assert_eq!(ids, vec!["DEV1", "DEV2", "DEV3"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_missing_dictionary_succeeds() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/entities/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "ok": false,
            "error": "Dictionary ghost not found"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    with_manager(mock_server.uri(), |m| m.delete_dictionary_by_id("ghost"))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_missing_dictionary_plain_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/entities/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    with_manager(mock_server.uri(), |m| m.delete_dictionary_by_id("ghost"))
        .await
        .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_entry_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entities/developers/DEV9"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "ok": false,
            "error": "Entry DEV9 not found"
        })))
        .mount(&mock_server)
        .await;

    let err = with_manager(mock_server.uri(), |m| m.get_entry("developers", "DEV9"))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_ids_never_reach_service() {
    let mock_server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ok(json!({"ok": true})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let errors = with_manager(mock_server.uri(), |m| {
        vec![
            m.delete_dictionary_by_id("../admin").unwrap_err(),
            m.get_entry("developers", "a/b").unwrap_err(),
            m.get_entry("developers", "..").unwrap_err(),
            m.delete_dictionary_by_id(".").unwrap_err(),
            m.add_entries("developers", &[DictionaryEntry::new("has space", "x")])
                .unwrap_err(),
        ]
    })
    .await;

    for err in errors {
        assert!(matches!(err, TextRazorError::InvalidId(_)), "got {err:?}");
    }
}
