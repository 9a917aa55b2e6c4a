//! Shared cache-control policies for HTTP handlers.
//!
//! Pages reflect the live collection, so browsers must revalidate them on
//! every visit; probes must never be cached at all.

use actix_web::http::header::CACHE_CONTROL;
use actix_web::http::{StatusCode, header::ContentType};
use actix_web::HttpResponse;

/// Rendered pages are private and revalidated before reuse.
pub const PAGE_NO_CACHE: &str = "private, no-cache, must-revalidate";

/// Health probes bypass every cache.
pub const PROBE_NO_STORE: &str = "no-store";

/// Build an HTML response carrying the page cache policy.
pub fn html_page(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .insert_header((CACHE_CONTROL, PAGE_NO_CACHE))
        .body(body)
}
