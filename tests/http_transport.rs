use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use base64::Engine;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use confluence_table_lib::errors::TableError;
use confluence_table_lib::wiki::table::TableRow;
use confluence_table_lib::wiki::transport::Transport;
use confluence_table_lib::wiki::transports::http::HttpTransport;
use confluence_table_lib::wiki::types::{Connection, Credentials};
use confluence_table_lib::wiki::updater;

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Value>,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Stand-in for the content endpoint: answers with canned replies and keeps
/// every request it saw.
#[derive(Clone)]
struct MockWiki {
    recorded: Arc<Mutex<Vec<Recorded>>>,
    get_reply: (StatusCode, &'static str, &'static str),
    put_reply: (StatusCode, &'static str, &'static str),
}

impl MockWiki {
    fn new() -> Self {
        Self {
            recorded: Arc::default(),
            get_reply: (StatusCode::OK, "application/json", TEST_PAGE),
            put_reply: (StatusCode::OK, "application/json", "{}"),
        }
    }

    fn get_reply(mut self, status: StatusCode, content_type: &'static str, body: &'static str) -> Self {
        self.get_reply = (status, content_type, body);
        self
    }

    fn requests(&self) -> Vec<Recorded> {
        self.recorded.lock().unwrap().clone()
    }

    fn record(&self, method: Method, uri: Uri, headers: HeaderMap, body: Option<Value>) {
        self.recorded.lock().unwrap().push(Recorded {
            method,
            uri,
            headers,
            body,
        });
    }
}

fn reply((status, content_type, body): (StatusCode, &'static str, &'static str)) -> Response {
    (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
}

async fn get_content(
    State(wiki): State<MockWiki>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    wiki.record(method, uri, headers, None);
    reply(wiki.get_reply)
}

async fn put_content(
    State(wiki): State<MockWiki>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    wiki.record(method, uri, headers, Some(body));
    reply(wiki.put_reply)
}

async fn serve(wiki: MockWiki) -> String {
    let app = Router::new()
        .route("/rest/api/content/:id", get(get_content).put(put_content))
        .with_state(wiki);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn transport() -> HttpTransport {
    HttpTransport::with_client(reqwest::Client::builder().no_proxy().build().unwrap())
}

fn credentials() -> Credentials {
    Credentials::new("test_user", "test_password")
}

fn expected_auth() -> String {
    format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode("test_user:test_password")
    )
}

const TEST_PAGE: &str = r#"{"id":"123456789","title":"Test Page","version":{"number":2},"body":{"storage":{"value":"|Header 1|Header 2|\n|Value 1|Value 2|","representation":"storage"}}}"#;

#[tokio::test]
async fn get_sends_accept_and_basic_auth() {
    let wiki = MockWiki::new().get_reply(StatusCode::OK, "application/json", r#"{"test":"data"}"#);
    let base = serve(wiki.clone()).await;
    let url = format!("{base}/rest/api/content/123456789?expand=body.storage");

    let json = transport().get_json(&url, &credentials()).await.unwrap();
    assert_eq!(json, json!({ "test": "data" }));

    let requests = wiki.requests();
    let req = &requests[0];
    assert_eq!(req.method, Method::GET);
    assert_eq!(req.uri.path(), "/rest/api/content/123456789");
    assert_eq!(req.uri.query(), Some("expand=body.storage"));
    assert_eq!(req.header("accept"), Some("application/json"));
    assert_eq!(req.header("authorization"), Some(expected_auth().as_str()));
}

#[tokio::test]
async fn put_sends_json_body_and_headers() {
    let wiki = MockWiki::new();
    let base = serve(wiki.clone()).await;
    let url = format!("{base}/rest/api/content/123456789");
    let body = json!({ "id": "123456789", "version": { "number": 3, "minorEdit": true } });

    transport().put_json(&url, &credentials(), &body).await.unwrap();

    let requests = wiki.requests();
    let req = &requests[0];
    assert_eq!(req.method, Method::PUT);
    assert_eq!(req.uri.path(), "/rest/api/content/123456789");
    assert_eq!(req.uri.query(), None);
    assert_eq!(req.header("accept"), Some("application/json"));
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header("authorization"), Some(expected_auth().as_str()));
    assert_eq!(req.body.as_ref(), Some(&body));
}

#[tokio::test]
async fn non_success_status_is_a_remote_error() {
    let wiki = MockWiki::new().get_reply(
        StatusCode::NOT_FOUND,
        "application/json",
        r#"{"message":"No content found"}"#,
    );
    let base = serve(wiki.clone()).await;
    let url = format!("{base}/rest/api/content/1?expand=body.storage");

    let err = transport().get_json(&url, &credentials()).await.unwrap_err();
    match err {
        TableError::Remote { status, detail } => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            assert!(detail.contains("No content found"), "{detail}");
        }
        other => panic!("expected remote error, got {other}"),
    }
    assert_eq!(wiki.requests().len(), 1);
}

#[tokio::test]
async fn non_json_page_body_is_a_validation_error() {
    let wiki = MockWiki::new().get_reply(StatusCode::OK, "text/html", "<html>login page</html>");
    let base = serve(wiki.clone()).await;
    let url = format!("{base}/rest/api/content/123456789?expand=body.storage");

    let err = transport().get_json(&url, &credentials()).await.unwrap_err();
    assert!(matches!(err, TableError::Validation(_)), "{err}");
    assert!(err.to_string().contains("malformed page content response"), "{err}");
}

#[tokio::test]
async fn update_on_non_json_page_never_writes() {
    let wiki = MockWiki::new().get_reply(StatusCode::OK, "text/html", "<html>login page</html>");
    let base = serve(wiki.clone()).await;
    let connection = Connection::new(base, credentials(), "123456789");

    let err = updater::update(&transport(), &connection, TableRow::from_values(["x"]))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to update table. "), "{err}");
    assert!(matches!(err.root(), TableError::Validation(_)), "{err}");

    let requests = wiki.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
}

#[tokio::test]
async fn update_round_trip_over_http() {
    let wiki = MockWiki::new();
    let base = serve(wiki.clone()).await;
    let connection = Connection::new(base, credentials(), "123456789");

    let outcome = updater::update(
        &transport(),
        &connection,
        TableRow::from_values(["New Value 1", "New Value 2"]),
    )
    .await
    .unwrap();
    assert_eq!(outcome.version, 3);

    let requests = wiki.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(
        requests[1].body,
        Some(json!({
            "id": "123456789",
            "type": "page",
            "title": "Test Page",
            "body": {
                "storage": {
                    "value": "{table}\n|Header 1|Header 2|\n|Value 1|Value 2|\n|New Value 1|New Value 2|\n{table}",
                    "representation": "storage"
                }
            },
            "version": { "number": 3, "minorEdit": true }
        }))
    );
}

#[tokio::test]
async fn update_stops_after_failed_fetch() {
    let wiki = MockWiki::new().get_reply(
        StatusCode::NOT_FOUND,
        "application/json",
        r#"{"message":"gone"}"#,
    );
    let base = serve(wiki.clone()).await;
    let connection = Connection::new(base, credentials(), "123456789");

    let err = updater::update(&transport(), &connection, TableRow::from_values(["x"]))
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to update table. Remote error: 404"), "{err}");

    assert_eq!(wiki.requests().len(), 1);
}
