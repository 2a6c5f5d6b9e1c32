#![allow(dead_code)]

//! In-process stand-in for the portal backend. Each test spawns one on an
//! ephemeral port and points a `PortalClient` at it; state is shared so
//! tests can assert what the backend saw.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;
use uuid::Uuid;

use campus_portal_cli::client::PortalClient;

pub type SharedState = Arc<Mutex<PortalState>>;

#[derive(Default)]
pub struct PortalState {
    /// Full branch documents, keyed lookups go through `_id`.
    pub branches: Vec<Value>,
    /// subject id -> {"articles": [...], "files": [...]}
    pub content: HashMap<String, Value>,
    /// Number of requests the upload endpoint received.
    pub upload_requests: usize,
    pub faculty: Value,
    /// Per-branch post groups, as `/api/upload/posts/faculty` returns them.
    pub faculty_posts: Vec<Value>,
}

pub struct TestBackend {
    pub address: String,
    pub state: SharedState,
}

impl TestBackend {
    pub fn client(&self) -> PortalClient {
        PortalClient::with_base_url(Url::parse(&self.address).expect("backend URL"))
    }
}

pub async fn spawn_backend(initial: PortalState) -> TestBackend {
    let state: SharedState = Arc::new(Mutex::new(initial));
    let router = portal_router(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestBackend { address, state }
}

fn portal_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/upload/branches", get(list_branches))
        .route("/api/upload/branches/:id", get(get_branch))
        .route("/api/upload/branches/:id/subjects", post(create_subject))
        .route("/api/upload/subject-Content", post(subject_content))
        .route("/api/upload/branches/:id/upload", post(upload_post))
        .route("/api/faculty/faculty-details", get(faculty_details))
        .route("/api/upload/posts/faculty", get(faculty_posts))
        .route("/api/faculty/login", post(login))
        .with_state(state)
}

// --- handlers ---

async fn list_branches(State(state): State<SharedState>) -> Json<Value> {
    let state = state.lock().unwrap();
    Json(Value::Array(state.branches.clone()))
}

async fn get_branch(State(state): State<SharedState>, Path(id): Path<String>) -> Response {
    let state = state.lock().unwrap();
    match state
        .branches
        .iter()
        .find(|b| b["_id"].as_str() == Some(id.as_str()))
    {
        Some(branch) => Json(branch.clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "branch not found" })),
        )
            .into_response(),
    }
}

async fn create_subject(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }

    let year_id = body["yearId"].as_str().unwrap_or_default().to_string();
    let name = body["subjectName"].as_str().unwrap_or_default().to_string();

    let mut state = state.lock().unwrap();
    let Some(branch) = state
        .branches
        .iter_mut()
        .find(|b| b["_id"].as_str() == Some(id.as_str()))
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "branch not found" })),
        )
            .into_response();
    };

    let Some(year) = branch["years"]
        .as_array_mut()
        .and_then(|years| {
            years
                .iter_mut()
                .find(|y| y["_id"].as_str() == Some(year_id.as_str()))
        })
    else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "year not found" })),
        )
            .into_response();
    };

    let subject = json!({ "_id": Uuid::new_v4().to_string(), "name": name });
    year["subjects"]
        .as_array_mut()
        .expect("subjects array")
        .push(subject.clone());

    (StatusCode::CREATED, Json(subject)).into_response()
}

async fn subject_content(State(state): State<SharedState>, Json(body): Json<Value>) -> Json<Value> {
    let subject_id = body["subjectId"].as_str().unwrap_or_default();
    let state = state.lock().unwrap();
    Json(
        state
            .content
            .get(subject_id)
            .cloned()
            .unwrap_or_else(|| json!({ "articles": [], "files": [] })),
    )
}

async fn upload_post(
    State(state): State<SharedState>,
    Path(_branch_id): Path<String>,
    req: Request,
) -> Response {
    if !bearer_ok(req.headers()) {
        return unauthorized();
    }

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    {
        let mut state = state.lock().unwrap();
        state.upload_requests += 1;
    }

    if content_type.starts_with("multipart/") {
        let mut multipart = match Multipart::from_request(req, &()).await {
            Ok(mp) => mp,
            Err(_) => return (StatusCode::BAD_REQUEST, "bad multipart").into_response(),
        };

        let mut data = String::new();
        let mut file_name = String::from("upload");
        let mut file_len = 0usize;

        while let Some(field) = multipart.next_field().await.unwrap() {
            match field.name().map(str::to_string).as_deref() {
                Some("data") => data = field.text().await.unwrap(),
                Some("file") => {
                    file_name = field
                        .file_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| "upload".to_string());
                    file_len = field.bytes().await.unwrap().len();
                }
                _ => {}
            }
        }

        let inner: Value = serde_json::from_str(&data).unwrap_or_default();
        let subject_id = inner["subjectId"].as_str().unwrap_or_default().to_string();

        let mut state = state.lock().unwrap();
        let content = state
            .content
            .entry(subject_id)
            .or_insert_with(|| json!({ "articles": [], "files": [] }));
        content["files"].as_array_mut().expect("files array").push(json!({
            "_id": Uuid::new_v4().to_string(),
            "file": inner["file"].clone(),
            "fileUrl": format!("http://files.local/{file_name}"),
            "postedByName": inner["postedByName"].clone(),
            "postedByBranch": inner["postedByBranch"].clone(),
            "size": file_len,
        }));

        (StatusCode::CREATED, Json(json!({ "ok": true }))).into_response()
    } else {
        let bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or_default();
        let inner: Value =
            serde_json::from_str(body["data"].as_str().unwrap_or_default()).unwrap_or_default();
        let subject_id = inner["subjectId"].as_str().unwrap_or_default().to_string();

        let mut state = state.lock().unwrap();
        let content = state
            .content
            .entry(subject_id)
            .or_insert_with(|| json!({ "articles": [], "files": [] }));
        content["articles"]
            .as_array_mut()
            .expect("articles array")
            .push(json!({
                "_id": Uuid::new_v4().to_string(),
                "article": inner["content"].clone(),
                "postedByName": inner["postedByName"].clone(),
                "postedByBranch": inner["postedByBranch"].clone(),
            }));

        (StatusCode::CREATED, Json(json!({ "ok": true }))).into_response()
    }
}

async fn faculty_details(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    Json(json!({ "faculty": state.faculty.clone() })).into_response()
}

async fn faculty_posts(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    if !bearer_ok(&headers) {
        return unauthorized();
    }
    let state = state.lock().unwrap();
    Json(json!({ "results": state.faculty_posts.clone() })).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"].as_str().unwrap_or_default().is_empty()
        || body["password"].as_str().unwrap_or_default().is_empty()
    {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid credentials" })),
        )
            .into_response();
    }

    Json(json!({ "token": faculty_token() })).into_response()
}

fn bearer_ok(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "missing bearer token" })),
    )
        .into_response()
}

// --- fixtures ---

pub fn mint_token(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("token")
}

pub fn faculty_token() -> String {
    mint_token(json!({
        "facultyId": "64fa0c1d2b3a4e5f60718293",
        "exp": 4_102_444_800i64
    }))
}

pub fn student_token() -> String {
    mint_token(json!({
        "studentId": "64fa0c1d2b3a4e5f60718293",
        "exp": 4_102_444_800i64
    }))
}

/// A branch document with one empty subject list per year.
pub fn branch_doc(id: &str, name: &str, years: &[(&str, &str)]) -> Value {
    json!({
        "_id": id,
        "branchName": name,
        "years": years
            .iter()
            .map(|(year_id, label)| json!({
                "_id": year_id,
                "years_subfolders": label,
                "subjects": [],
            }))
            .collect::<Vec<_>>(),
    })
}
