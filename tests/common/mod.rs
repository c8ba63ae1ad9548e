#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

pub async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub uri: String,
    pub headers: HashMap<String, String>,
}

fn record(uri: &Uri, method: &str, headers: &HeaderMap) -> RecordedRequest {
    RecordedRequest {
        method: method.to_string(),
        uri: uri.to_string(),
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
    }
}

pub fn movie_json(id: i64, title: &str, poster: Option<&str>) -> Value {
    json!({
        "id": id,
        "title": title,
        "poster_path": poster,
        "vote_average": 7.9,
        "release_date": "2010-07-15",
        "original_language": "en",
        "overview": "",
    })
}

// ---------------------------------------------------------------------------
// TMDB

pub struct FakeTmdb {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeTmdb {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

type TmdbState = Arc<Mutex<Vec<RecordedRequest>>>;

async fn tmdb_discover(
    State(requests): State<TmdbState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    requests.lock().unwrap().push(record(&uri, "GET", &headers));
    Json(json!({
        "page": 1,
        "results": [
            movie_json(1, "Popular One", Some("/one.jpg")),
            movie_json(2, "Popular Two", None),
        ],
    }))
    .into_response()
}

/// Canned answers keyed by query: `nothing` has no results, `badkey` is a
/// failure payload, `boom` is a 500; anything else finds two movies.
async fn tmdb_search(
    State(requests): State<TmdbState>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    requests.lock().unwrap().push(record(&uri, "GET", &headers));
    let query = params.get("query").cloned().unwrap_or_default();

    match query.as_str() {
        "nothing" => Json(json!({ "page": 1, "results": [] })).into_response(),
        "badkey" => Json(json!({ "Response": "False", "Error": "Invalid API key" })).into_response(),
        "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => Json(json!({
            "page": 1,
            "results": [
                movie_json(27205, &format!("{query} (first)"), Some("/first.jpg")),
                movie_json(27206, &format!("{query} (second)"), None),
            ],
        }))
        .into_response(),
    }
}

pub async fn spawn_fake_tmdb() -> FakeTmdb {
    let requests: TmdbState = Arc::default();
    let app = Router::new()
        .route("/3/discover/movie", get(tmdb_discover))
        .route("/3/search/movie", get(tmdb_search))
        .with_state(requests.clone());

    let addr = spawn_server(app).await;
    FakeTmdb {
        base_url: format!("http://{addr}/3"),
        requests,
    }
}

// ---------------------------------------------------------------------------
// Appwrite

#[derive(Default)]
pub struct AppwriteData {
    pub documents: Vec<Value>,
    pub requests: Vec<RecordedRequest>,
    pub fail: bool,
}

pub struct FakeAppwrite {
    pub endpoint: String,
    pub data: Arc<Mutex<AppwriteData>>,
}

impl FakeAppwrite {
    pub fn documents(&self) -> Vec<Value> {
        self.data.lock().unwrap().documents.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.data.lock().unwrap().requests.clone()
    }

    pub fn set_failing(&self, fail: bool) {
        self.data.lock().unwrap().fail = fail;
    }

    pub fn insert(&self, doc: Value) {
        self.data.lock().unwrap().documents.push(doc);
    }
}

type AppwriteState = Arc<Mutex<AppwriteData>>;

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized", "code": 401 })),
    )
        .into_response()
}

fn compare(a: &Value, b: &Value, attribute: &str) -> std::cmp::Ordering {
    match (&a[attribute], &b[attribute]) {
        (Value::Number(x), Value::Number(y)) => x
            .as_i64()
            .unwrap_or_default()
            .cmp(&y.as_i64().unwrap_or_default()),
        (x, y) => x.as_str().unwrap_or_default().cmp(y.as_str().unwrap_or_default()),
    }
}

async fn appwrite_list(
    State(state): State<AppwriteState>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let mut data = state.lock().unwrap();
    data.requests.push(record(&uri, "GET", &headers));
    if data.fail {
        return unauthorized();
    }

    let queries: Vec<Value> = url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
        .filter(|(k, _)| k == "queries[]")
        .filter_map(|(_, v)| serde_json::from_str(&v).ok())
        .collect();

    let mut docs = data.documents.clone();
    let mut orders: Vec<(String, bool)> = Vec::new();
    let mut limit = 25;

    for query in &queries {
        let attribute = query["attribute"].as_str().unwrap_or_default().to_string();
        match query["method"].as_str() {
            Some("equal") => {
                let wanted = query["values"].as_array().cloned().unwrap_or_default();
                docs.retain(|d| wanted.contains(&d[&attribute]));
            }
            Some("orderDesc") => orders.push((attribute, true)),
            Some("orderAsc") => orders.push((attribute, false)),
            Some("limit") => limit = query["values"][0].as_u64().unwrap_or(25) as usize,
            _ => {}
        }
    }

    docs.sort_by(|a, b| {
        orders
            .iter()
            .map(|(attribute, desc)| {
                let ord = compare(a, b, attribute);
                if *desc { ord.reverse() } else { ord }
            })
            .find(|o| o.is_ne())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let total = docs.len();
    docs.truncate(limit);

    Json(json!({ "total": total, "documents": docs })).into_response()
}

async fn appwrite_create(
    State(state): State<AppwriteState>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = state.lock().unwrap();
    data.requests.push(record(&uri, "POST", &headers));
    if data.fail {
        return unauthorized();
    }

    let mut doc = body["data"].clone();
    doc["$id"] = body["documentId"].clone();
    doc["$permissions"] = body["permissions"].clone();
    data.documents.push(doc.clone());

    (StatusCode::CREATED, Json(doc)).into_response()
}

async fn appwrite_update(
    State(state): State<AppwriteState>,
    Path((_db, _coll, id)): Path<(String, String, String)>,
    uri: Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut data = state.lock().unwrap();
    data.requests.push(record(&uri, "PATCH", &headers));
    if data.fail {
        return unauthorized();
    }

    let Some(doc) = data.documents.iter_mut().find(|d| d["$id"] == id.as_str()) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Document with the requested ID could not be found.", "code": 404 })),
        )
            .into_response();
    };

    if let Some(fields) = body["data"].as_object() {
        for (key, value) in fields {
            doc[key] = value.clone();
        }
    }

    Json(doc.clone()).into_response()
}

pub async fn spawn_fake_appwrite() -> FakeAppwrite {
    let data: AppwriteState = Arc::default();
    let app = Router::new()
        .route(
            "/v1/databases/{db}/collections/{coll}/documents",
            get(appwrite_list).post(appwrite_create),
        )
        .route(
            "/v1/databases/{db}/collections/{coll}/documents/{id}",
            patch(appwrite_update),
        )
        .with_state(data.clone());

    let addr = spawn_server(app).await;
    FakeAppwrite {
        endpoint: format!("http://{addr}/v1"),
        data,
    }
}
