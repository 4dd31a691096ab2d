//! Verb-specific entry points.
//!
//! Each constructor is `init_fetch_and_decode` with a fixed base
//! configuration. `fetch_and_decode` is the same function as
//! `get_and_decode`, kept under its older name.

use crate::config::{json_base, RequestConfig};
use crate::http::{HttpMethod, Transport};
use crate::pipeline::{init_fetch_and_decode, FetchDecode};

/// GET: no defaults beyond the transport's own.
pub fn get_and_decode<Tr: Transport>(transport: Tr) -> FetchDecode<Tr> {
    init_fetch_and_decode(transport, RequestConfig::new())
}

pub use self::get_and_decode as fetch_and_decode;

/// POST with a JSON `Content-Type` header.
pub fn post_and_decode<Tr: Transport>(transport: Tr) -> FetchDecode<Tr> {
    init_fetch_and_decode(transport, json_base(HttpMethod::Post))
}

/// PUT with a JSON `Content-Type` header.
pub fn put_and_decode<Tr: Transport>(transport: Tr) -> FetchDecode<Tr> {
    init_fetch_and_decode(transport, json_base(HttpMethod::Put))
}

/// PATCH with a JSON `Content-Type` header.
pub fn patch_and_decode<Tr: Transport>(transport: Tr) -> FetchDecode<Tr> {
    init_fetch_and_decode(transport, json_base(HttpMethod::Patch))
}

/// DELETE, no default headers.
pub fn delete_and_decode<Tr: Transport>(transport: Tr) -> FetchDecode<Tr> {
    init_fetch_and_decode(transport, RequestConfig::new().method(HttpMethod::Delete))
}
