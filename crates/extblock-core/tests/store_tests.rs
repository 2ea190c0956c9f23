//! Integration tests for the blocklist store running over HTTP

use extblock_core::{classify, BlocklistStore, ErrorKind, ExtensionType, HttpAuthority};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn store(server: &MockServer) -> BlocklistStore<HttpAuthority> {
    BlocklistStore::new(HttpAuthority::new(&server.uri()).expect("valid base url"))
}

fn fixed_list(blocked_exe: bool) -> serde_json::Value {
    json!({
        "success": true,
        "data": [
            {"id": 1, "extension": "exe", "description": "실행 파일", "blocked": blocked_exe},
            {"id": 2, "extension": "bat", "description": "배치 파일", "blocked": false}
        ]
    })
}

#[tokio::test]
async fn test_scenario_counts_after_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixed_list(true)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{"id": 1, "extension": "custom1"}]
        })))
        .mount(&server)
        .await;

    let store = store(&server).await;
    store.load_fixed().await.unwrap();
    store.load_custom().await.unwrap();

    assert_eq!(store.total_count(), 3);
    assert_eq!(store.blocked_count(), 2);
    assert!(!store.is_blocked_locally("bat"));
    assert!(store.is_blocked_locally("custom1"));
    assert!(store.is_blocked_locally("EXE"));
    assert!(store.overlapping_extensions().is_empty());
}

#[tokio::test]
async fn test_unblock_fixed_toggles_then_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/extensions/fixed"))
        .and(body_json(json!({"extension": "exe", "isBlocked": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixed_list(false)))
        .expect(1)
        .mount(&server)
        .await;

    let store = store(&server).await;
    let used = store.unblock("exe", ExtensionType::Fixed).await.unwrap();

    assert_eq!(used, ExtensionType::Fixed);
    assert_eq!(store.fixed_extensions().len(), 2);
    assert!(!store.is_blocked_locally("exe"));
    assert!(!store.is_loading_fixed());
}

#[tokio::test]
async fn test_unblock_custom_deletes_then_reloads() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/extensions/custom/extension/mycustom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let store = store(&server).await;
    let used = store.unblock("mycustom", ExtensionType::Custom).await.unwrap();
    assert_eq!(used, ExtensionType::Custom);
    assert!(store.custom_extensions().is_empty());
}

#[tokio::test]
async fn test_add_fixed_conflict_leaves_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixed_list(true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "status": 409,
            "message": "이미 존재하는 고정 확장자입니다."
        })))
        .mount(&server)
        .await;

    let store = store(&server).await;
    store.load_fixed().await.unwrap();
    let before = store.snapshot();

    let err = store.add_fixed("exe").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.to_string(), "이미 존재하는 고정 확장자입니다.");
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn test_check_then_unblock_workflow() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/check/exe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/type/exe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": "fixed"})))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixed_list(false)))
        .mount(&server)
        .await;

    let store = store(&server).await;
    let extension = classify("Virus.EXE").unwrap();
    assert!(store.check(&extension).await.unwrap());

    let kind = store.classify_type(&extension).await.unwrap().unwrap();
    assert_eq!(store.unblock(&extension, kind).await.unwrap(), ExtensionType::Fixed);
    assert!(!store.is_blocked_locally(&extension));
}

#[tokio::test]
async fn test_load_twice_is_identical() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/extensions/fixed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixed_list(true)))
        .expect(2)
        .mount(&server)
        .await;

    let store = store(&server).await;
    store.load_fixed().await.unwrap();
    let first = store.snapshot();
    store.load_fixed().await.unwrap();
    assert_eq!(store.snapshot(), first);
}
