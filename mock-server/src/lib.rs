use std::{
    collections::{BTreeMap, HashMap},
    convert::Infallible,
    sync::Arc,
    time::Duration,
};

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Payload for POST and PUT. An `id` in the payload is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    #[serde(default)]
    pub user_id: u64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub user_id: Option<u64>,
    pub title: Option<String>,
    pub completed: Option<bool>,
}

pub type Db = Arc<RwLock<HashMap<u64, Todo>>>;

/// The todo every fresh server starts with.
pub fn seed_todo() -> Todo {
    Todo {
        user_id: 0,
        id: 1,
        title: "title".to_string(),
        completed: false,
    }
}

pub fn app() -> Router {
    let seed = seed_todo();
    let db: Db = Arc::new(RwLock::new(HashMap::from([(seed.id, seed)])));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo)
                .put(replace_todo)
                .patch(patch_todo)
                .delete(delete_todo),
        )
        .route("/status/{code}", any(status))
        .route("/echo", any(echo))
        .route("/text", get(plain_text))
        .route("/slow/headers/{ms}", get(slow_headers))
        .route("/slow/body/{ms}", get(slow_body))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    let mut todos: Vec<Todo> = todos.values().cloned().collect();
    todos.sort_by_key(|todo| todo.id);
    Json(todos)
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<TodoInput>,
) -> (StatusCode, Json<Todo>) {
    let mut todos = db.write().await;
    let id = todos.keys().max().map_or(1, |max| max + 1);
    let todo = Todo {
        user_id: input.user_id,
        id,
        title: input.title,
        completed: input.completed,
    };
    todos.insert(id, todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, StatusCode> {
    let todos = db.read().await;
    todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TodoInput>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    todo.user_id = input.user_id;
    todo.title = input.title;
    todo.completed = input.completed;
    Ok(Json(todo.clone()))
}

async fn patch_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<TodoPatch>,
) -> Result<Json<Todo>, StatusCode> {
    let mut todos = db.write().await;
    let todo = todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(user_id) = input.user_id {
        todo.user_id = user_id;
    }
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let mut todos = db.write().await;
    todos
        .remove(&id)
        .map(|_| Json(json!({})))
        .ok_or(StatusCode::NOT_FOUND)
}

/// Replies with the requested status. The body is empty unless the client
/// accepts JSON, in which case it describes the status.
async fn status(Path(code): Path<u16>, headers: HeaderMap) -> Response {
    let Ok(status) = StatusCode::from_u16(code) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let wants_json = headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|accept| accept.contains("application/json"));
    if wants_json {
        let description = status.canonical_reason().unwrap_or_default();
        (status, Json(json!({ "code": code, "description": description }))).into_response()
    } else {
        status.into_response()
    }
}

/// Reflects the request back as JSON. Header names are lowercased.
async fn echo(method: Method, headers: HeaderMap, body: String) -> Json<Value> {
    let headers: BTreeMap<String, String> = headers
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    let body = if body.is_empty() { Value::Null } else { Value::String(body) };
    Json(json!({
        "method": method.as_str(),
        "headers": headers,
        "body": body,
    }))
}

async fn plain_text() -> &'static str {
    "plain text, not JSON"
}

/// Waits `ms` milliseconds before answering with the seed todo.
async fn slow_headers(Path(ms): Path<u64>) -> Json<Todo> {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    Json(seed_todo())
}

/// Sends the status line and half of the seed todo at once, the rest after
/// `ms` milliseconds.
async fn slow_body(Path(ms): Path<u64>) -> Response {
    let json = serde_json::to_string(&seed_todo()).unwrap_or_default();
    let (head, tail) = json.split_at(json.len() / 2);
    let head = Bytes::from(head.to_string());
    let tail = Bytes::from(tail.to_string());

    let chunks = stream::once(async move { Ok::<_, Infallible>(head) }).chain(stream::once(
        async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            Ok(tail)
        },
    ));
    (
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(chunks),
    )
        .into_response()
}
