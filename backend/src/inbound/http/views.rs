//! HTML views rendered with Tera.
//!
//! Templates are embedded at compile time so the binary has no runtime file
//! dependencies. Each page has a serialisable view model; handlers build the
//! model and the [`Views`] registry renders it. Tera autoescapes every
//! `.html` template, so record fields are safe to interpolate.

use serde::Serialize;
use tera::{Context, Tera};
use tracing::error;

use crate::domain::editor::SKILL_SEPARATOR;
use crate::domain::{Draft, EditorMode, Error, SortKey, UserRecord};

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../../../templates/base.html")),
    ("editor.html", include_str!("../../../templates/editor.html")),
    ("list.html", include_str!("../../../templates/list.html")),
    ("detail.html", include_str!("../../../templates/detail.html")),
    (
        "not_found.html",
        include_str!("../../../templates/not_found.html"),
    ),
];

/// One table row or detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRow {
    pub id: u64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub skills: String,
    pub date: String,
}

impl From<&UserRecord> for UserRow {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id().get(),
            name: record.name().to_owned(),
            surname: record.surname().to_owned(),
            email: record.email().to_string(),
            skills: record.skills().join(SKILL_SEPARATOR),
            date: record.date().as_str().to_owned(),
        }
    }
}

/// Entry of the sort selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn sort_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Unsorted => "As loaded",
        SortKey::AlphabeticalAsc => "Name A-Z",
        SortKey::AlphabeticalDesc => "Name Z-A",
    }
}

/// One skill input of the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillSlot {
    pub index: usize,
    pub value: String,
}

/// Editor form state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorView {
    pub title: &'static str,
    /// Hidden `id` field; empty for a new record.
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub skills: Vec<SkillSlot>,
    /// Validation message shown in the modal.
    pub error: Option<String>,
}

impl EditorView {
    /// Form for `draft`, titled after `mode`.
    pub fn new(mode: &EditorMode, draft: &Draft) -> Self {
        Self {
            title: mode.title(),
            id: draft.id().map(|id| id.to_string()).unwrap_or_default(),
            name: draft.name().to_owned(),
            surname: draft.surname().to_owned(),
            email: draft.email().to_owned(),
            skills: draft
                .skills()
                .iter()
                .enumerate()
                .map(|(index, value)| SkillSlot {
                    index,
                    value: value.clone(),
                })
                .collect(),
            error: None,
        }
    }

    /// Attach a validation message.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

/// The list page: sort selector, table, optional editor and alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage {
    pub users: Vec<UserRow>,
    pub sort: &'static str,
    pub sort_query: String,
    pub sort_options: Vec<SortOption>,
    pub editor: Option<EditorView>,
    pub alert: Option<String>,
}

impl ListPage {
    /// Page for `records`, already ordered by `sort`.
    pub fn new(records: &[UserRecord], sort: SortKey) -> Self {
        Self {
            users: records.iter().map(UserRow::from).collect(),
            sort: sort.as_str(),
            sort_query: sort_query(sort),
            sort_options: SortKey::ALL
                .into_iter()
                .map(|key| SortOption {
                    value: key.as_str(),
                    label: sort_label(key),
                    selected: key == sort,
                })
                .collect(),
            editor: None,
            alert: None,
        }
    }

    /// Show the editor above the table.
    #[must_use]
    pub fn with_editor(mut self, editor: EditorView) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Show a blocking alert above the table.
    #[must_use]
    pub fn with_alert(mut self, message: impl Into<String>) -> Self {
        self.alert = Some(message.into());
        self
    }
}

/// Query string carrying the sort key, or an empty string for stored order.
pub fn sort_query(sort: SortKey) -> String {
    match sort {
        SortKey::Unsorted => String::new(),
        key => format!("?sort={}", key.as_str()),
    }
}

#[derive(Serialize)]
struct DetailPage<'a> {
    user: &'a UserRow,
}

#[derive(Serialize)]
struct NotFoundPage<'a> {
    requested: &'a str,
}

/// Registry of the embedded templates.
pub struct Views {
    tera: Tera,
}

impl Views {
    /// Parse every embedded template.
    ///
    /// # Errors
    ///
    /// Returns the Tera error when a template fails to parse.
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    /// Render the list page.
    pub fn render_list(&self, page: &ListPage) -> Result<String, Error> {
        self.render("list.html", page)
    }

    /// Render the detail page of one record.
    pub fn render_detail(&self, user: &UserRow) -> Result<String, Error> {
        self.render("detail.html", &DetailPage { user })
    }

    /// Render the page shown when `/user/{id}` matches nothing.
    pub fn render_not_found(&self, requested: &str) -> Result<String, Error> {
        self.render("not_found.html", &NotFoundPage { requested })
    }

    fn render(&self, template: &str, model: &impl Serialize) -> Result<String, Error> {
        let context = Context::from_serialize(model).map_err(|e| render_error(template, &e))?;
        self.tera
            .render(template, &context)
            .map_err(|e| render_error(template, &e))
    }
}

fn render_error(template: &str, err: &tera::Error) -> Error {
    error!(template, error = %err, "template rendering failed");
    Error::internal(format!("failed to render {template}"))
}
