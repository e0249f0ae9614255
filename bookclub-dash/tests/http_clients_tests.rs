//! Wire-level tests for the record store and cover clients
//!
//! Each test starts a throwaway axum server on an ephemeral port that plays
//! the external service, then points the real client at it.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookclub_common::{BookPick, Month, RowId, Slot};
use bookclub_dash::covers::{CoverLookup, CoverSource, GoogleBooksClient};
use bookclub_dash::error::Error;
use bookclub_dash::store::{RecordStore, RestStore};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request as seen by the mock service
#[derive(Debug, Clone)]
struct Seen {
    query: HashMap<String, String>,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct Mock {
    seen: Arc<Mutex<Vec<Seen>>>,
    reply: Arc<Mutex<(u16, Value)>>,
}

impl Mock {
    fn replying(status: u16, body: Value) -> Self {
        let mock = Mock::default();
        *mock.reply.lock().unwrap() = (status, body);
        mock
    }

    fn record(&self, headers: &HeaderMap, query: HashMap<String, String>, body: Option<Value>) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(Seen {
            query,
            apikey: header("apikey"),
            authorization: header("authorization"),
            prefer: header("prefer"),
            body,
        });
    }

    fn respond(&self) -> axum::response::Response {
        let (status, body) = self.reply.lock().unwrap().clone();
        (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
    }

    fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

async fn handle_get(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> axum::response::Response {
    mock.record(&headers, query, None);
    mock.respond()
}

async fn handle_post(
    State(mock): State<Mock>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    mock.record(&headers, query, Some(body));
    mock.respond()
}

/// Serve the mock on 127.0.0.1:0 and return its base URL
async fn serve(mock: Mock) -> String {
    let app = Router::new()
        .route("/rest/v1/books", get(handle_get).post(handle_post))
        .route("/books/v1/volumes", get(handle_get))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

// =============================================================================
// Record store
// =============================================================================

#[tokio::test]
async fn test_select_all_sends_key_and_ordering() {
    let mock = Mock::replying(
        200,
        json!([
            {"id": "4f1c2a8e-8d8e-4b7e-9c55-0a1b2c3d4e5f", "month": "March", "year": 2024,
             "member": "Brett", "book": "Dune", "author": "Frank Herbert"},
            {"id": 12, "month": "February", "year": 2024,
             "member": null, "book": null, "author": null}
        ]),
    );
    let base = serve(mock.clone()).await;
    let store = RestStore::new(&base, "secret-key").unwrap();

    let picks = store.select_all().await.unwrap();

    assert_eq!(picks.len(), 2);
    assert_eq!(picks[0].slot(), Slot::new(Month::March, 2024));
    assert_eq!(picks[0].title.as_deref(), Some("Dune"));
    assert!(picks[0].id.is_some());
    assert_eq!(picks[1].id, Some(RowId::Int(12)));
    assert_eq!(picks[1].member, "");
    assert!(!picks[1].is_filled());

    let seen = mock.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].query.get("select").map(String::as_str), Some("*"));
    assert_eq!(seen[0].query.get("order").map(String::as_str), Some("year.desc"));
    assert_eq!(seen[0].apikey.as_deref(), Some("secret-key"));
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer secret-key"));
}

#[tokio::test]
async fn test_upsert_merges_on_month_and_year() {
    let mock = Mock::replying(
        201,
        json!([{"month": "April", "year": 2024, "member": "Sampson",
                "book": "Ubik", "author": "Philip K. Dick"}]),
    );
    let base = serve(mock.clone()).await;
    let store = RestStore::new(&base, "secret-key").unwrap();

    let pick = BookPick::new(Slot::new(Month::April, 2024), "Sampson")
        .with_book("Ubik", "Philip K. Dick");
    let saved = store.upsert(&pick).await.unwrap();

    assert_eq!(saved.member, "Sampson");
    assert_eq!(saved.title.as_deref(), Some("Ubik"));

    let seen = mock.seen();
    assert_eq!(seen[0].query.get("on_conflict").map(String::as_str), Some("month,year"));
    let prefer = seen[0].prefer.as_deref().unwrap();
    assert!(prefer.contains("resolution=merge-duplicates"));
    assert!(prefer.contains("return=representation"));

    let body = seen[0].body.as_ref().unwrap();
    assert_eq!(body["month"], "April");
    assert_eq!(body["year"], 2024);
    assert_eq!(body["book"], "Ubik");
    assert_eq!(body["author"], "Philip K. Dick");
}

#[tokio::test]
async fn test_upsert_with_empty_representation_is_error() {
    let base = serve(Mock::replying(201, json!([]))).await;
    let store = RestStore::new(&base, "secret-key").unwrap();

    let pick = BookPick::new(Slot::new(Month::April, 2024), "Sampson")
        .with_book("Ubik", "Philip K. Dick");
    let err = store.upsert(&pick).await.unwrap_err();

    assert!(matches!(err, Error::Store(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_rejected_request_maps_to_status_error() {
    let base = serve(Mock::replying(401, json!({"message": "Invalid API key"}))).await;
    let store = RestStore::new(&base, "wrong-key").unwrap();

    match store.select_all().await {
        Err(Error::Status { status, body, .. }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

// =============================================================================
// Cover service
// =============================================================================

#[tokio::test]
async fn test_google_books_query_and_first_volume() {
    let mock = Mock::replying(
        200,
        json!({"totalItems": 2, "items": [
            {"volumeInfo": {"imageLinks": {
                "smallThumbnail": "http://books.test/dune?zoom=5",
                "thumbnail": "http://books.test/dune?zoom=1&edge=curl"
            }}},
            {"volumeInfo": {"imageLinks": {"thumbnail": "http://books.test/other"}}}
        ]}),
    );
    let base = serve(mock.clone()).await;
    let client = GoogleBooksClient::new(&base).unwrap();

    let links = client.search("Dune Frank Herbert").await.unwrap().unwrap();
    assert_eq!(links.thumbnail.as_deref(), Some("http://books.test/dune?zoom=1&edge=curl"));

    let seen = mock.seen();
    assert_eq!(seen[0].query.get("q").map(String::as_str), Some("Dune Frank Herbert"));
    assert_eq!(seen[0].query.get("maxResults").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn test_cover_lookup_through_google_books_client() {
    let mock = Mock::replying(
        200,
        json!({"items": [{"volumeInfo": {"imageLinks": {
            "thumbnail": "http://books.test/dune?zoom=1"
        }}}]}),
    );
    let base = serve(mock.clone()).await;
    let lookup = CoverLookup::new(Arc::new(GoogleBooksClient::new(&base).unwrap()));

    let cover = lookup.lookup("Dune", "Frank Herbert").await;
    let again = lookup.lookup("Dune", "Frank Herbert").await;

    assert_eq!(cover.as_deref(), Some("https://books.test/dune?zoom=2"));
    assert_eq!(again, cover);
    assert_eq!(mock.seen().len(), 1);
}

#[tokio::test]
async fn test_cover_lookup_caches_service_failure() {
    let mock = Mock::replying(503, json!({"error": "unavailable"}));
    let base = serve(mock.clone()).await;
    let lookup = CoverLookup::new(Arc::new(GoogleBooksClient::new(&base).unwrap()));

    assert_eq!(lookup.lookup("Dune", "Frank Herbert").await, None);
    assert_eq!(lookup.lookup("Dune", "Frank Herbert").await, None);
    assert_eq!(mock.seen().len(), 1);
}
