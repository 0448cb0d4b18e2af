//! Integration tests for growthforecast-client API operations.
//!
//! These tests use wiremock to simulate server responses and verify
//! that the client correctly handles various API scenarios.

use growthforecast_client::{
    Client, ClientConfig, ClientError, ComplexSource, ComplexTarget, GraphScope, GraphUpdate,
    OutgoingRequest, PathEncoding, RequestObserver, VruleParams,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn graph_list() -> Value {
    json!([
        {"id": 1, "service_name": "app", "section_name": "host1", "graph_name": "<1sec count"},
        {"id": 2, "service_name": "app", "section_name": "host1", "graph_name": "<2sec count"},
        {"id": 3, "service_name": "db", "section_name": "master", "graph_name": "qps"},
        {"id": 4, "service_name": "app", "section_name": "host2", "graph_name": "<1sec count"},
        {"id": 5, "service_name": "db", "section_name": "master", "graph_name": "lag"}
    ])
}

fn full_graph(mode: &str) -> Value {
    json!({
        "number": 48778224,
        "llimit": -1000000000,
        "mode": mode,
        "stype": "AREA",
        "adjustval": "1",
        "meta": "{\"nested\":\"{\\\"nested\\\":\\\"\\\"}\"}",
        "service_name": "app",
        "gmode": "gauge",
        "color": "#cc6633",
        "created_at": "2013/02/02 00:41:11",
        "section_name": "host1",
        "ulimit": 1000000000,
        "id": 21,
        "graph_name": "<1sec count",
        "description": "",
        "sulimit": 100000,
        "unit": "",
        "sort": 0,
        "updated_at": "2013/02/02 02:32:10",
        "adjust": "*",
        "type": "AREA",
        "sllimit": -100000,
        "md5": "3c59dc048e8850243be8079a5c74d079"
    })
}

async fn mount_graph_list(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/json/list/graph"))
        .respond_with(ResponseTemplate::new(200).set_body_json(graph_list()))
        .mount(server)
        .await;
}

#[derive(Default)]
struct Recorder {
    seen: Mutex<Vec<(String, String, Option<String>)>>,
}

impl RequestObserver for Recorder {
    fn on_request(&self, request: &OutgoingRequest<'_>) {
        self.seen.lock().unwrap().push((
            request.method.to_string(),
            request.uri.to_string(),
            request.body.map(str::to_string),
        ));
    }
}

#[tokio::test]
async fn test_list_graph_unfiltered_keeps_server_order() {
    let mock_server = MockServer::start().await;
    mount_graph_list(&mock_server).await;

    let client = Client::new(mock_server.uri()).unwrap();
    let graphs = client.list_graph(None, None, None).await.unwrap();

    let ids: Vec<u64> = graphs.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(graphs[0].graph_name, "<1sec count");
}

#[tokio::test]
async fn test_list_graph_filters_compose() {
    let mock_server = MockServer::start().await;
    mount_graph_list(&mock_server).await;

    let client = Client::new(mock_server.uri()).unwrap();

    let by_service = client.list_graph(Some("app"), None, None).await.unwrap();
    let ids: Vec<u64> = by_service.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);

    let by_both = client
        .list_graph(Some("app"), Some("host1"), None)
        .await
        .unwrap();
    let ids: Vec<u64> = by_both.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let by_name = client
        .list_graph(None, None, Some("<1sec count"))
        .await
        .unwrap();
    let ids: Vec<u64> = by_name.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 4]);

    let none = client
        .list_graph(Some("db"), Some("host1"), None)
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_list_section_and_service() {
    let mock_server = MockServer::start().await;
    mount_graph_list(&mock_server).await;

    let client = Client::new(mock_server.uri()).unwrap();

    let sections = client.list_section(None, None, None).await.unwrap();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].service_name, "app");
    assert_eq!(sections[0].sections, vec!["host1", "host2"]);
    assert_eq!(sections[1].service_name, "db");
    assert_eq!(sections[1].sections, vec!["master"]);

    let pairs: usize = sections.iter().map(|s| s.sections.len()).sum();
    assert_eq!(pairs, 3);

    let services = client.list_service(None, None, None).await.unwrap();
    assert_eq!(services, vec!["app", "db"]);

    let services = client.list_service(Some("db"), None, None).await.unwrap();
    assert_eq!(services, vec!["db"]);
}

#[tokio::test]
async fn test_get_graph_encodes_path_segments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app%20name/host%20name/%3C1sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_graph("gauge")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let graph = client
        .get_graph("app name", "host name", "<1sec count")
        .await
        .unwrap();

    assert_eq!(graph.id, 21);
    assert_eq!(graph.graph_type(), Some("AREA"));
    assert!(graph.meta().is_some());
    assert_eq!(graph.md5(), Some("3c59dc048e8850243be8079a5c74d079"));
}

#[tokio::test]
async fn test_legacy_paths_use_form_encoding_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app+name/host+name/%3C1sec+count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_graph("gauge")))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json/complex/app%20name/host%20name/total"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 18, "service_name": "app name", "section_name": "host name",
            "graph_name": "total", "complex": true, "data": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .legacy_path_encoding(PathEncoding::Form)
        .build();
    let client = Client::with_config(mock_server.uri(), config).unwrap();

    client
        .get_graph("app name", "host name", "<1sec count")
        .await
        .unwrap();
    let complex = client
        .get_complex("app name", "host name", "total")
        .await
        .unwrap();
    assert_eq!(complex.id, 18);
}

#[tokio::test]
async fn test_get_graph_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let err = client
        .get_graph("app", "host1", "missing")
        .await
        .unwrap_err();

    match err {
        ClientError::NotFound { status, uri, body } => {
            assert_eq!(status, 404);
            assert!(uri.ends_with("/api/app/host1/missing"));
            assert_eq!(body, "Not Found");
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_graph_by_id_lacks_meta_and_md5() {
    let mock_server = MockServer::start().await;

    let mut by_id = full_graph("count");
    let object = by_id.as_object_mut().unwrap();
    object.remove("meta");
    object.remove("md5");
    object.insert("complex".to_string(), json!(false));

    Mock::given(method("GET"))
        .and(path("/json/graph/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(by_id))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let graph = client.get_graph_by_id(21).await.unwrap();

    assert_eq!(graph.id, 21);
    assert!(graph.meta().is_none());
    assert!(graph.md5().is_none());
    assert_eq!(graph.is_complex(), Some(false));
}

#[tokio::test]
async fn test_post_graph_sends_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/app/host1/requests"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("number=10"))
        .and(body_string_contains("color=%23112233"))
        .and(body_string_contains("description=rate+per+sec"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": 0,
            "data": {
                "id": 7,
                "service_name": "app",
                "section_name": "host1",
                "graph_name": "requests",
                "number": 10,
                "color": "#112233",
                "mode": "gauge"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let params = GraphUpdate::new()
        .number(10)
        .color("#112233")
        .description("rate per sec");
    let response = client
        .post_graph("app", "host1", "requests", &params)
        .await
        .unwrap();

    assert!(response.is_success());
    let data = response.data.unwrap();
    assert_eq!(data.id, 7);
    assert_eq!(data.color(), Some("#112233"));
}

#[tokio::test]
async fn test_post_graph_body_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/app/host1/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": 1,
            "messages": {"number": "number is required"}
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let response = client
        .post_graph("app", "host1", "requests", &GraphUpdate::new())
        .await
        .unwrap();

    assert!(!response.is_success());
    assert!(response.data.is_none());
}

#[tokio::test]
async fn test_edit_graph_merges_and_blanks_meta() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/%3C1sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_graph("gauge")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut expected = full_graph("gauge");
    expected["color"] = json!("#112233");
    expected["meta"] = json!("");

    Mock::given(method("POST"))
        .and(path("/json/edit/graph/21"))
        .and(header("content-type", "application/json"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let response = client
        .edit_graph(
            "app",
            "host1",
            "<1sec count",
            &GraphUpdate::new().color("#112233"),
        )
        .await
        .unwrap();

    assert!(response.is_success());
}

#[tokio::test]
async fn test_edit_sparse_graph_sends_only_fetched_keys() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/requests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "service_name": "app",
            "section_name": "host1",
            "graph_name": "requests",
            "mode": "gauge",
            "color": "#000000",
            "number": 3,
            "adjustval": 1,
            "llimit": -1.5,
            "meta": "m"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/json/edit/graph/7"))
        .and(body_json(json!({
            "id": 7,
            "service_name": "app",
            "section_name": "host1",
            "graph_name": "requests",
            "mode": "gauge",
            "color": "#112233",
            "number": 3,
            "adjustval": 1,
            "llimit": -1.5,
            "meta": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    client
        .edit_graph(
            "app",
            "host1",
            "requests",
            &GraphUpdate::new().color("#112233"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_edit_graph_keeps_explicit_meta() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/%3C1sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_graph("gauge")))
        .mount(&mock_server)
        .await;

    let mut expected = full_graph("gauge");
    expected["meta"] = json!("replaced");

    Mock::given(method("POST"))
        .and(path("/json/edit/graph/21"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    client
        .edit_graph(
            "app",
            "host1",
            "<1sec count",
            &GraphUpdate::new().meta("replaced"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_edit_count_graph_keeps_number_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/%3C1sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_graph("count")))
        .mount(&mock_server)
        .await;

    let mut expected = full_graph("count");
    expected["meta"] = json!("");

    Mock::given(method("POST"))
        .and(path("/json/edit/graph/21"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    client
        .edit_graph("app", "host1", "<1sec count", &GraphUpdate::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_edit_count_graph_zeroes_number_when_suppressed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/%3C1sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_graph("count")))
        .mount(&mock_server)
        .await;

    let mut expected = full_graph("count");
    expected["meta"] = json!("");
    expected["number"] = json!(0);
    expected["sort"] = json!(19);

    Mock::given(method("POST"))
        .and(path("/json/edit/graph/21"))
        .and(body_json(&expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .suppress_number_on_count_edit(true)
        .build();
    let client = Client::with_config(mock_server.uri(), config).unwrap();
    client
        .edit_graph(
            "app",
            "host1",
            "<1sec count",
            &GraphUpdate::new().sort(19),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_edit_missing_graph_issues_no_write() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let err = client
        .edit_graph("app", "host1", "missing", &GraphUpdate::new().color("#000000"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_graph() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/delete/app/host1/%3C1sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let response = client
        .delete_graph("app", "host1", "<1sec count")
        .await
        .unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_delete_graph_never_created_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/delete/svc/sec/never"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let err = client.delete_graph("svc", "sec", "never").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_delete_graph_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/delete/graph/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    assert!(client.delete_graph_by_id(21).await.unwrap().is_success());
}

#[tokio::test]
async fn test_server_error_is_request_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/list/graph"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let err = client.list_graph(None, None, None).await.unwrap_err();

    match err {
        ClientError::RequestFailed { status, uri, body } => {
            assert_eq!(status, 500);
            assert_eq!(uri, format!("{}/json/list/graph", mock_server.uri()));
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("Expected RequestFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_conflict_is_already_exists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/create/complex"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Conflict"))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let err = client
        .create_complex(&[], &ComplexTarget::new("app", "host1", "total"))
        .await
        .unwrap_err();
    assert!(err.is_already_exists());
}

#[tokio::test]
async fn test_list_complex_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/list/complex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "service_name": "app", "section_name": "host1", "graph_name": "total"},
            {"id": 2, "service_name": "app", "section_name": "host2", "graph_name": "total"}
        ])))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    assert_eq!(client.list_complex(None, None, None).await.unwrap().len(), 2);

    let host2 = client
        .list_complex(Some("app"), Some("host2"), None)
        .await
        .unwrap();
    assert_eq!(host2.len(), 1);
    assert_eq!(host2[0].id, 2);
}

#[tokio::test]
async fn test_get_complex_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/complex/18"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 0,
            "complex": true,
            "created_at": "2013/05/20 15:08:28",
            "service_name": "app name",
            "section_name": "host name",
            "id": 18,
            "graph_name": "complex graph test",
            "data": [
                {"gmode": "gauge", "stack": false, "type": "AREA", "graph_id": 218},
                {"gmode": "gauge", "stack": true, "type": "AREA", "graph_id": 217}
            ],
            "sumup": false,
            "description": "complex graph test",
            "sort": 10,
            "updated_at": "2013/05/20 15:08:28"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let complex = client.get_complex_by_id(18).await.unwrap();

    assert!(complex.complex);
    assert_eq!(complex.sort, 10);
    assert_eq!(complex.data.len(), 2);
    assert_eq!(complex.data[0].graph_id, 218);
    assert!(complex.data[1].stack);
}

#[tokio::test]
async fn test_create_complex_resolves_ids_in_order() {
    let mock_server = MockServer::start().await;

    let mut first = full_graph("gauge");
    first["id"] = json!(3);
    let mut second = full_graph("gauge");
    second["id"] = json!(4);

    Mock::given(method("GET"))
        .and(path("/api/app/host1/%3C1sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/app/host1/%3C2sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(second))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/json/create/complex"))
        .and(body_json(json!({
            "service_name": "app",
            "section_name": "host1",
            "graph_name": "response time",
            "description": "stacked",
            "sort": 1,
            "data": [
                {"gmode": "gauge", "stack": true, "type": "AREA", "graph_id": 3},
                {"gmode": "subtract", "stack": false, "type": "LINE1", "graph_id": 4}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let from = vec![
        ComplexSource::new("app", "host1", "<1sec count"),
        ComplexSource::new("app", "host1", "<2sec count")
            .with_gmode("subtract")
            .with_stack(false)
            .with_type("LINE1"),
    ];
    let to = ComplexTarget::new("app", "host1", "response time")
        .with_description("stacked")
        .with_sort(1);

    let response = client.create_complex(&from, &to).await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_create_complex_aborts_on_missing_source() {
    let mock_server = MockServer::start().await;

    let mut first = full_graph("gauge");
    first["id"] = json!(3);

    Mock::given(method("GET"))
        .and(path("/api/app/host1/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/app/host1/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/app/host1/c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_graph("gauge")))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/json/create/complex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let from = vec![
        ComplexSource::new("app", "host1", "a"),
        ComplexSource::new("app", "host1", "missing"),
        ComplexSource::new("app", "host1", "c"),
    ];
    let err = client
        .create_complex(&from, &ComplexTarget::new("app", "host1", "total"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_complex_scans_then_deletes_by_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/list/complex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "service_name": "app", "section_name": "host1", "graph_name": "total"},
            {"id": 12, "service_name": "app", "section_name": "host2", "graph_name": "total"}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/delete_complex/12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let response = client
        .delete_complex("app", "host2", "total")
        .await
        .unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_delete_complex_without_match_issues_no_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/list/complex"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 11, "service_name": "app", "section_name": "host1", "graph_name": "total"}
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let err = client
        .delete_complex("app", "host1", "other")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("app/host1/other"));
}

#[tokio::test]
async fn test_delete_complex_by_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/json/delete/complex/app%20name/host1/total"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let response = client
        .delete_complex_by_path("app name", "host1", "total")
        .await
        .unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_post_vrule_scoped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vrule/api/app/host1"))
        .and(body_string_contains("description=deploy+v2"))
        .and(body_string_contains("time=1360000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": 0,
            "data": {
                "graph_path": "/app/host1",
                "time": 1360000000,
                "color": "#FF0000",
                "description": "deploy v2",
                "dashes": ""
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let params = VruleParams {
        time: Some(1360000000),
        description: Some("deploy v2".to_string()),
        ..Default::default()
    };
    let response = client
        .post_vrule(&GraphScope::section("app", "host1"), &params)
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.data.unwrap().graph_path, "/app/host1");
}

#[tokio::test]
async fn test_list_vrule_unscoped_omits_segments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vrule/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"graph_path": "/", "time": 1360000000, "color": "#FF0000", "description": "", "dashes": ""}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let rules = client.list_vrule(&GraphScope::all()).await.unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].graph_path, "/");
}

#[tokio::test]
async fn test_last_request_and_response_recorded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;
    mount_graph_list(&mock_server).await;

    let client = Client::new(mock_server.uri()).unwrap();

    let _ = client.get_graph("app", "host1", "missing").await;
    assert_eq!(
        client.last_request_uri().unwrap(),
        format!("{}/api/app/host1/missing", mock_server.uri())
    );
    let last = client.last_response().unwrap();
    assert_eq!(last.status, 404);
    assert_eq!(last.body, "Not Found");

    client.list_graph(None, None, None).await.unwrap();
    assert_eq!(
        client.last_request_uri().unwrap(),
        format!("{}/json/list/graph", mock_server.uri())
    );
    assert_eq!(client.last_response().unwrap().status, 200);
}

#[tokio::test]
async fn test_observer_sees_every_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/app/host1/%3C1sec%20count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_graph("gauge")))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/json/edit/graph/21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": 0})))
        .mount(&mock_server)
        .await;

    let recorder = Arc::new(Recorder::default());
    let client = Client::new(mock_server.uri())
        .unwrap()
        .with_observer(recorder.clone());

    client
        .edit_graph(
            "app",
            "host1",
            "<1sec count",
            &GraphUpdate::new().color("#112233"),
        )
        .await
        .unwrap();

    let seen = recorder.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, "GET");
    assert!(seen[0].2.is_none());
    assert_eq!(seen[1].0, "POST");
    assert!(seen[1].1.ends_with("/json/edit/graph/21"));

    let body: Value = serde_json::from_str(seen[1].2.as_deref().unwrap()).unwrap();
    assert_eq!(body["color"], "#112233");
    assert_eq!(body["meta"], "");
}

#[tokio::test]
async fn test_keepalive_and_basic_auth_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json/list/graph"))
        .and(header("authorization", "Basic b3BzOnNlY3JldA=="))
        .and(header("connection", "Keep-Alive"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::builder()
        .keepalive(true)
        .basic_auth("ops", "secret")
        .build();
    let client = Client::with_config(mock_server.uri(), config).unwrap();

    assert!(client.list_graph(None, None, None).await.unwrap().is_empty());
}
