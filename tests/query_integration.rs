//! Integration tests for the query layer, project/commit listings, and the
//! write-back path using wiremock

use serde_json::json;
use sysml_probe::client::{ModelScope, Session};
use sysml_probe::config::Config;
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

async fn mount_element(server: &MockServer, id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/projects/p1/commits/c1/elements/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn elements_by_kind_decodes_and_normalizes_matches() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/p1/query-results"))
        .and(query_param("commitId", "c1"))
        .and(body_partial_json(json!({"where": {"property": "@type", "value": ["AttributeUsage"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"@id": "e1", "@type": "AttributeUsage"},
            [{"@id": "e2", "@type": "AttributeUsage"}],
            "not an element",
        ])))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    let elements = session.elements_by_kind(&scope, "AttributeUsage").await.expect("query must succeed");
    let ids: Vec<&str> = elements.iter().map(|element| element.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2"]);
}

#[tokio::test]
async fn a_failing_kind_query_is_a_hard_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects/p1/query-results"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    assert!(session.elements_by_kind(&scope, "AttributeUsage").await.is_err());
}

#[tokio::test]
async fn elements_by_name_includes_redefining_elements() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/p1/query-results"))
        .and(body_partial_json(json!({"where": {"property": "declaredName", "value": ["mass"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"@id": "e1", "@type": "AttributeUsage", "declaredName": "mass"},
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/projects/p1/query-results"))
        .and(body_partial_json(json!({"where": {"property": "@type", "value": ["AttributeUsage"]}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"@id": "e1", "@type": "AttributeUsage", "declaredName": "mass"},
            {"@id": "e2", "@type": "AttributeUsage", "declaredName": "m", "ownedRelationship": [{"@id": "rr1"}]},
            {"@id": "e3", "@type": "AttributeUsage", "declaredName": "other", "ownedRelationship": [{"@id": "rr2"}]},
        ])))
        .mount(&server)
        .await;

    // e2 redefines a feature declared "mass"; e3 redefines something else.
    mount_element(
        &server,
        "rr1",
        json!({"@id": "rr1", "@type": "Redefinition", "redefinedFeature": {"@id": "rf1"}}),
    )
    .await;
    mount_element(&server, "rf1", json!({"@id": "rf1", "@type": "AttributeUsage", "declaredName": "mass"})).await;
    mount_element(
        &server,
        "rr2",
        json!({"@id": "rr2", "@type": "Redefinition", "redefinedFeature": {"@id": "rf2"}}),
    )
    .await;
    mount_element(&server, "rf2", json!({"@id": "rf2", "@type": "AttributeUsage", "declaredName": "volume"})).await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    let elements = session.elements_by_name(&scope, "mass").await.expect("query must succeed");
    let ids: Vec<&str> = elements.iter().map(|element| element.id.as_str()).collect();
    assert_eq!(ids, vec!["e1", "e2"]);
}

#[tokio::test]
async fn projects_are_sorted_by_declared_name_case_insensitively() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("page[size]", "1024"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"@id": "pB", "@type": "Project", "declaredName": "Beta"},
            {"@id": "pA", "@type": "Project", "declaredName": "alpha"},
            {"@id": "pN", "@type": "Project"},
        ])))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let projects = session.projects().await.expect("listing must succeed");

    let ids: Vec<&str> = projects.iter().map(|project| project.id.as_str()).collect();
    assert_eq!(ids, vec!["pN", "pA", "pB"]);
}

#[tokio::test]
async fn commits_are_sorted_by_creation_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/p1/commits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"@id": "c2", "@type": "Commit", "createdAt": "2025-03-02T10:00:00Z"},
            {"@id": "c1", "@type": "Commit", "createdAt": "2025-03-01T10:00:00Z"},
            {"@id": "c0", "@type": "Commit"},
        ])))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let commits = session.commits("p1").await.expect("listing must succeed");

    let ids: Vec<&str> = commits.iter().map(|commit| commit.id.as_str()).collect();
    assert_eq!(ids, vec!["c0", "c1", "c2"]);
}

#[tokio::test]
async fn commits_require_a_project_id() {
    let server = MockServer::start().await;

    let session = session_for(&server);
    assert!(session.commits("").await.is_err());
    assert!(server.received_requests().await.expect("request log").is_empty());
}

#[tokio::test]
async fn writing_a_feature_value_creates_one_commit() {
    let server = MockServer::start().await;
    mount_element(&server, "e1", json!({"@id": "e1", "@type": "AttributeUsage"})).await;

    Mock::given(method("POST"))
        .and(path("/projects/p1/commits"))
        .and(body_partial_json(json!({
            "@type": "Commit",
            "change": [{
                "@type": "DataVersion",
                "payload": {"@type": "AttributeUsage", "value": "117", "identifier": "e1"},
                "identity": {"@id": "e1"},
            }],
            "previousCommit": {"@id": "c1"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"@id": "c2", "@type": "Commit"})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    let new_commit = session.write_feature_value(&scope, "e1", "117").await;
    assert_eq!(new_commit, "c2");
}

#[tokio::test]
async fn a_rejected_write_yields_an_empty_commit_id() {
    let server = MockServer::start().await;
    mount_element(&server, "e1", json!({"@id": "e1", "@type": "AttributeUsage"})).await;

    Mock::given(method("POST"))
        .and(path("/projects/p1/commits"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    assert_eq!(session.write_feature_value(&scope, "e1", "117").await, "");
}

#[tokio::test]
async fn a_write_against_an_unresolvable_element_never_posts() {
    let server = MockServer::start().await;

    let session = session_for(&server);
    let scope = scope_for(&session);

    assert_eq!(session.write_feature_value(&scope, "ghost", "117").await, "");

    let posts = server
        .received_requests()
        .await
        .expect("request log")
        .iter()
        .filter(|request| request.method == wiremock::http::Method::POST)
        .count();
    assert_eq!(posts, 0);
}
