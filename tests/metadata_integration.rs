//! Integration tests for the metadata/annotation locator using wiremock

use serde_json::json;
use std::collections::BTreeMap;
use sysml_probe::client::{ModelScope, Session};
use sysml_probe::config::Config;
use sysml_probe::resolve::metadata;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_for(server: &MockServer) -> Session {
    let url = Url::parse(&server.uri()).expect("mock server URI must parse");
    Session::new(url, &Config::default()).expect("session must build")
}

fn scope_for(session: &Session) -> ModelScope {
    session.scope("p1", "c1").expect("scope must build")
}

async fn mount_query(server: &MockServer, kind: &str, results: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/projects/p1/query-results"))
        .and(query_param("commitId", "c1"))
        .and(body_partial_json(json!({"where": {"property": "@type", "value": [kind]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(results))
        .mount(server)
        .await;
}

#[tokio::test]
async fn short_names_map_to_definition_ids() {
    let server = MockServer::start().await;
    mount_query(
        &server,
        "MetadataDefinition",
        json!([
            {"@id": "md1", "@type": "MetadataDefinition", "declaredShortName": "Domain1"},
            {"@id": "md2", "@type": "MetadataDefinition", "declaredShortName": "Domain2"},
        ]),
    )
    .await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    let id_map = metadata::metadata_ids_by_short_name(
        &session,
        &scope,
        &[String::from("Domain1"), String::from("Unknown")],
    )
    .await
    .expect("query must succeed");

    assert_eq!(id_map.get("Domain1"), Some(&Some(String::from("md1"))));
    assert_eq!(id_map.get("Unknown"), Some(&None));
}

#[tokio::test]
async fn a_failing_definition_query_is_a_hard_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/p1/query-results"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    let result = metadata::metadata_ids_by_short_name(&session, &scope, &[String::from("Domain1")]).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn annotated_ids_are_attributed_to_matching_keys_only() {
    let server = MockServer::start().await;
    mount_query(
        &server,
        "MetadataUsage",
        json!([
            {
                "@id": "u1",
                "@type": "MetadataUsage",
                "metadataDefinition": {"@id": "md1"},
                "annotatedElement": [{"@id": "a1"}, {"@id": "a2"}],
            },
            {
                // No annotatedElement: the usage's own id stands in.
                "@id": "u2",
                "@type": "MetadataUsage",
                "metadataDefinition": {"@id": "md1"},
            },
            {
                // Single-object shape for a different definition.
                "@id": "u3",
                "@type": "MetadataUsage",
                "metadataDefinition": {"@id": "md9"},
                "annotatedElement": {"@id": "a3"},
            },
        ]),
    )
    .await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    let mut id_map = BTreeMap::new();
    let _ = id_map.insert(String::from("Domain1"), Some(String::from("md1")));
    let _ = id_map.insert(String::from("Unknown"), None);

    let annotated = metadata::annotated_element_ids(&session, &scope, &id_map)
        .await
        .expect("query must succeed");

    assert_eq!(
        annotated.get("Domain1"),
        Some(&vec![String::from("a1"), String::from("a2"), String::from("u2")])
    );
    assert_eq!(annotated.get("Unknown"), Some(&Vec::new()));
    assert_eq!(annotated.len(), 2);
}

#[tokio::test]
async fn single_object_annotations_match_their_definition() {
    let server = MockServer::start().await;
    mount_query(
        &server,
        "MetadataUsage",
        json!([
            {
                "@id": "u3",
                "@type": "MetadataUsage",
                "metadataDefinition": {"@id": "md9"},
                "annotatedElement": {"@id": "a3"},
            },
        ]),
    )
    .await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    let mut id_map = BTreeMap::new();
    let _ = id_map.insert(String::from("Other"), Some(String::from("md9")));

    let annotated = metadata::annotated_element_ids(&session, &scope, &id_map)
        .await
        .expect("query must succeed");

    assert_eq!(annotated.get("Other"), Some(&vec![String::from("a3")]));
}
