//! Exercises `PostgrestStore` against a scripted loopback server.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use hub_core::entities::{AuditEvent, LinkDraft, LinkPatch, NewLink};
use hub_core::enums::{AuditAction, Role};
use hub_store::{LinkStore, PostgrestStore, StoreError};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    url: String,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
    body: String,
}

struct Loopback {
    rest_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
    handle: JoinHandle<()>,
}

impl Loopback {
    /// Serve `responses` in order, one per incoming request, then stop.
    fn serve(responses: Vec<(u16, &'static str)>) -> Self {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&requests);

        let handle = std::thread::spawn(move || {
            for (status, body) in responses {
                let Ok(Some(mut request)) = server.recv_timeout(Duration::from_secs(5)) else {
                    return;
                };
                let header = |name: &'static str| {
                    request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv(name))
                        .map(|h| h.value.as_str().to_string())
                };
                let mut recorded = Recorded {
                    method: request.method().as_str().to_string(),
                    url: request.url().to_string(),
                    apikey: header("apikey"),
                    authorization: header("Authorization"),
                    prefer: header("Prefer"),
                    body: String::new(),
                };
                request
                    .as_reader()
                    .read_to_string(&mut recorded.body)
                    .unwrap();
                sink.lock().unwrap().push(recorded);

                let response = tiny_http::Response::from_string(body)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                request.respond(response).unwrap();
            }
        });

        Self {
            rest_url: format!("http://127.0.0.1:{port}/rest/v1"),
            requests,
            handle,
        }
    }

    fn store(&self) -> PostgrestStore {
        PostgrestStore::new(&self.rest_url, "anon-key", Duration::from_secs(5)).unwrap()
    }

    fn finish(self) -> Vec<Recorded> {
        self.handle.join().unwrap();
        Arc::try_unwrap(self.requests)
            .unwrap()
            .into_inner()
            .unwrap()
    }
}

const LINK_ROW: &str = r#"[{
    "id": "lnk-0001",
    "title": "Stok Gudang A",
    "url": "https://example.com/s1",
    "description": null,
    "category": "Stok",
    "location": "Gudang A",
    "tags": ["harian", "stok"],
    "favorite": false,
    "clicks": 3,
    "created_by": "user-1",
    "created_at": "2024-05-01T08:00:00.123456+00:00",
    "updated_at": "2024-05-02T09:30:00+00:00"
}]"#;

fn draft(title: &str, url: &str) -> LinkDraft {
    LinkDraft {
        title: title.into(),
        url: url.into(),
        ..LinkDraft::default()
    }
}

#[tokio::test]
async fn list_orders_by_updated_at_with_anon_credentials() {
    let server = Loopback::serve(vec![(200, LINK_ROW)]);
    let links = server.store().list_links().await.unwrap();
    let requests = server.finish();

    assert_eq!(links.len(), 1);
    assert_eq!(links[0].title, "Stok Gudang A");
    assert_eq!(links[0].clicks, 3);
    assert_eq!(links[0].tag_list(), ["harian", "stok"]);

    let req = &requests[0];
    assert_eq!(req.method, "GET");
    assert!(req.url.starts_with("/rest/v1/links?select="));
    assert!(req.url.ends_with("&order=updated_at.desc"));
    assert_eq!(req.apikey.as_deref(), Some("anon-key"));
    assert_eq!(req.authorization.as_deref(), Some("Bearer anon-key"));
}

#[tokio::test]
async fn insert_sends_creation_fields_and_asks_for_the_row() {
    let server = Loopback::serve(vec![(201, LINK_ROW)]);
    let store = server.store();
    store.set_access_token(Some("user-jwt"));
    let record = store
        .insert_link(&NewLink::new(
            draft("Stok Gudang A", "https://example.com/s1"),
            Some("user-1".into()),
        ))
        .await
        .unwrap();
    let requests = server.finish();

    assert_eq!(record.id, "lnk-0001");
    let req = &requests[0];
    assert_eq!(req.method, "POST");
    assert_eq!(req.prefer.as_deref(), Some("return=representation"));
    assert_eq!(req.authorization.as_deref(), Some("Bearer user-jwt"));

    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body["title"], "Stok Gudang A");
    assert_eq!(body["favorite"], false);
    assert_eq!(body["clicks"], 0);
    assert_eq!(body["created_by"], "user-1");
    assert!(body["tags"].is_null());
}

#[tokio::test]
async fn empty_batch_makes_no_request() {
    let server = Loopback::serve(Vec::new());
    let rows = server.store().insert_many(&[]).await.unwrap();
    assert!(rows.is_empty());
    assert!(server.finish().is_empty());
}

#[tokio::test]
async fn update_with_no_matching_row_is_not_found() {
    let server = Loopback::serve(vec![(200, "[]")]);
    let err = server
        .store()
        .update_link("lnk-missing", &LinkPatch::favorite(true))
        .await
        .unwrap_err();
    let requests = server.finish();

    assert!(matches!(err, StoreError::NotFound(id) if id == "lnk-missing"));
    let req = &requests[0];
    assert_eq!(req.method, "PATCH");
    assert!(req.url.starts_with("/rest/v1/links?id=eq.lnk-missing"));
    assert_eq!(req.body, r#"{"favorite":true}"#);
}

#[tokio::test]
async fn delete_targets_one_id() {
    let server = Loopback::serve(vec![(200, r#"[{"id":"lnk-0001"}]"#)]);
    server.store().delete_link("lnk-0001").await.unwrap();
    let requests = server.finish();

    assert_eq!(requests[0].method, "DELETE");
    assert!(requests[0].url.starts_with("/rest/v1/links?id=eq.lnk-0001"));
}

#[tokio::test]
async fn not_null_violation_maps_to_validation() {
    let server = Loopback::serve(vec![(
        400,
        r#"{"code":"23502","message":"null value in column \"url\" violates not-null constraint"}"#,
    )]);
    let err = server
        .store()
        .insert_link(&NewLink::new(draft("A", ""), None))
        .await
        .unwrap_err();
    server.finish();

    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
async fn permission_error_keeps_status() {
    let server = Loopback::serve(vec![(
        403,
        r#"{"code":"42501","message":"new row violates row-level security policy"}"#,
    )]);
    let err = server.store().delete_link("lnk-0001").await.unwrap_err();
    server.finish();

    assert!(matches!(err, StoreError::Status { status: 403, .. }));
}

#[tokio::test]
async fn audit_failure_is_not_returned() {
    let server = Loopback::serve(vec![(500, r#"{"message":"boom"}"#)]);
    server
        .store()
        .append_audit(&AuditEvent::new(
            AuditAction::Clicked,
            "lnk-0001",
            Some("staff@example.com".into()),
        ))
        .await;
    let requests = server.finish();

    let req = &requests[0];
    assert_eq!(req.url, "/rest/v1/audit_logs");
    assert_eq!(req.prefer.as_deref(), Some("return=minimal"));
    let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"action": "clicked", "link_id": "lnk-0001", "by": "staff@example.com"})
    );
}

#[tokio::test]
async fn profile_lookup_by_user_id() {
    let server = Loopback::serve(vec![
        (
            200,
            r#"[{"id":"user-1","email":"admin@example.com","role":"admin","full_name":null,"created_at":"2024-01-01T00:00:00+00:00"}]"#,
        ),
        (200, "[]"),
    ]);
    let store = server.store();
    let profile = store.fetch_profile("user-1").await.unwrap().unwrap();
    let missing = store.fetch_profile("user-2").await.unwrap();
    let requests = server.finish();

    assert_eq!(profile.role, Role::Admin);
    assert!(missing.is_none());
    assert!(requests[0].url.starts_with("/rest/v1/profiles?id=eq.user-1"));
}
