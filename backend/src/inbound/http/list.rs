//! List view handlers.
//!
//! ```text
//! GET  /?sort=alphabetical-asc
//! GET  /users/new
//! GET  /users/{id}/edit
//! POST /users                  (editor form)
//! POST /users/{id}/delete
//! POST /users/delete-by-id     (id=...)
//! ```
//!
//! Every mutation answers with `303 See Other` back to the list, carrying
//! the sort key along. Outcomes the operator must see (validation messages,
//! unknown ids) re-render the list in place instead.

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::debug;

use super::ApiResult;
use super::cache_control::html_page;
use super::forms::{DeleteByIdForm, EditorSubmission, SortForm};
use super::state::HttpState;
use super::views::{EditorView, ListPage, sort_query};
use crate::domain::{
    DeleteByIdError, Draft, EditorMode, EditorStep, SaveOutcome, SortKey, UserId,
};

const EDIT_TARGET_MISSING: &str = "user with this id was not found";
const IDS_EXHAUSTED: &str = "no user id is left to assign";

/// Query string accepted by the list routes.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub sort: String,
}

impl ListQuery {
    fn key(&self) -> SortKey {
        SortKey::parse(&self.sort)
    }
}

fn list_page(state: &HttpState, sort: SortKey) -> ListPage {
    ListPage::new(&state.directory.list(sort), sort)
}

fn render(state: &HttpState, page: &ListPage, status: StatusCode) -> ApiResult<HttpResponse> {
    let body = state.views.render_list(page)?;
    Ok(html_page(status, body))
}

fn redirect_to_list(sort: SortKey) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, format!("/{}", sort_query(sort))))
        .finish()
}

/// Render the table through the sort selector.
#[get("/")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let page = list_page(&state, query.key());
    render(&state, &page, StatusCode::OK)
}

/// Open the editor on a blank draft.
#[get("/users/new")]
pub async fn new_user(
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let mode = EditorMode::Create;
    let editor = EditorView::new(&mode, &Draft::for_mode(&mode));
    let page = list_page(&state, query.key()).with_editor(editor);
    render(&state, &page, StatusCode::OK)
}

/// Open the editor pre-filled from an existing record.
#[get("/users/{id}/edit")]
pub async fn edit_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let sort = query.key();
    let Some(record) = state.directory.find_by_param(&path) else {
        let page = list_page(&state, sort).with_alert(EDIT_TARGET_MISSING);
        return render(&state, &page, StatusCode::NOT_FOUND);
    };
    let mode = EditorMode::Edit(record);
    let editor = EditorView::new(&mode, &Draft::for_mode(&mode));
    let page = list_page(&state, sort).with_editor(editor);
    render(&state, &page, StatusCode::OK)
}

/// Apply one editor action: save, cancel, or a skill-slot edit.
#[post("/users")]
pub async fn submit_user(
    state: web::Data<HttpState>,
    form: web::Form<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let EditorSubmission {
        mut draft,
        intent,
        sort,
    } = EditorSubmission::from_pairs(form.into_inner())?;

    let mode = draft
        .id()
        .and_then(|id| state.directory.find(id))
        .map_or(EditorMode::Create, EditorMode::Edit);

    match draft.apply(intent) {
        EditorStep::Editing => {
            let page = list_page(&state, sort).with_editor(EditorView::new(&mode, &draft));
            render(&state, &page, StatusCode::OK)
        }
        EditorStep::Rejected(reason) => {
            debug!(%reason, "draft rejected");
            let editor = EditorView::new(&mode, &draft).with_error(reason.to_string());
            let page = list_page(&state, sort).with_editor(editor);
            render(&state, &page, StatusCode::UNPROCESSABLE_ENTITY)
        }
        EditorStep::Submit(request) => match state.directory.save(request) {
            SaveOutcome::IdsExhausted => {
                let editor = EditorView::new(&mode, &draft).with_error(IDS_EXHAUSTED);
                let page = list_page(&state, sort).with_editor(editor);
                render(&state, &page, StatusCode::CONFLICT)
            }
            SaveOutcome::Created(_) | SaveOutcome::Updated(_) | SaveOutcome::Missing(_) => {
                Ok(redirect_to_list(sort))
            }
        },
        EditorStep::Cancelled => Ok(redirect_to_list(sort)),
    }
}

/// Delete one row; unknown ids are a no-op.
#[post("/users/{id}/delete")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    form: web::Form<SortForm>,
) -> HttpResponse {
    match path.parse::<UserId>() {
        Ok(id) => {
            state.directory.delete(id);
        }
        Err(error) => debug!(raw_id = %path, %error, "row delete ignored"),
    }
    redirect_to_list(SortKey::parse(&form.sort))
}

/// Delete by an id typed into the list's delete-by-id field.
#[post("/users/delete-by-id")]
pub async fn delete_user_by_id(
    state: web::Data<HttpState>,
    form: web::Form<DeleteByIdForm>,
) -> ApiResult<HttpResponse> {
    let sort = SortKey::parse(&form.sort);
    match state.directory.delete_by_input(&form.id) {
        Ok(_) => Ok(redirect_to_list(sort)),
        Err(error) => {
            let status = match error {
                DeleteByIdError::InvalidId { .. } => StatusCode::BAD_REQUEST,
                DeleteByIdError::NotFound(_) => StatusCode::NOT_FOUND,
            };
            let page = list_page(&state, sort).with_alert(error.to_string());
            render(&state, &page, status)
        }
    }
}
