//! Fetch a JSON resource and decode it against a schema in one call.
//!
//! # Overview
//! A call runs four stages: issue the request, read the body as JSON,
//! check the HTTP status, validate the body with a schema. The first
//! failing stage decides the result, so every call ends in exactly one of:
//! the decoded value, a `Fetch` error (no response), an `Http` error
//! (non-2xx status) or a `Decode` error (body rejected by the schema).
//!
//! # Design
//! - The network is reached through the `Transport` trait;
//!   `ReqwestTransport` is the stock implementation.
//! - Any `T: DeserializeOwned` is a schema via `schema::json::<T>()`.
//! - Verb entry points (`get_and_decode`, `post_and_decode`, ...) are
//!   pipelines with a fixed base `RequestConfig`; per-call configuration is
//!   merged over it.
//!
//! ```no_run
//! use fetch_decode::{get_and_decode, schema, ReqwestTransport};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! #[serde(rename_all = "camelCase")]
//! struct Todo {
//!     user_id: u64,
//!     id: u64,
//!     title: String,
//!     completed: bool,
//! }
//!
//! # async fn run() {
//! let todos = get_and_decode(ReqwestTransport::new());
//! match todos
//!     .with_schema(schema::json::<Todo>())
//!     .fetch("https://jsonplaceholder.typicode.com/todos/1", None)
//!     .await
//! {
//!     Ok(todo) => println!("{}: {}", todo.id, todo.title),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod schema;
pub mod transport;
pub mod verbs;

pub use config::{RequestConfig, JSON_CONTENT_TYPE};
pub use error::{ErrorKind, FetchDecodeError, Outcome};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RawResponse, Transport};
pub use pipeline::{init_fetch_and_decode, FetchDecode, TypedFetch};
pub use schema::{Json, Schema, ValidationError};
pub use transport::{BodyError, ReqwestTransport, ReqwestResponse};
pub use verbs::{
    delete_and_decode, fetch_and_decode, get_and_decode, patch_and_decode, post_and_decode,
    put_and_decode,
};
