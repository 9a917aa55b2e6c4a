//! Detail view: `GET /user/{id}`.
//!
//! An unknown or unparsable id is an expected outcome and renders the
//! not-found page with status 404.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use tracing::debug;

use super::ApiResult;
use super::cache_control::html_page;
use super::state::HttpState;
use super::views::UserRow;

/// Show one record read-only.
#[get("/user/{id}")]
pub async fn user_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw_id = path.into_inner();
    match state.directory.find_by_param(&raw_id) {
        Some(record) => {
            let body = state.views.render_detail(&UserRow::from(&record))?;
            Ok(html_page(StatusCode::OK, body))
        }
        None => {
            debug!(raw_id = %raw_id, "detail requested for unknown user");
            let body = state.views.render_not_found(&raw_id)?;
            Ok(html_page(StatusCode::NOT_FOUND, body))
        }
    }
}
