//! Record editor: draft state, skill-tag slots, validation, and the
//! create-or-update decision handed to the caller.
//!
//! The editor never touches the store. A successful submit yields a
//! [`SaveRequest`] that states explicitly whether the draft describes a new
//! record or an existing one; [`crate::domain::UserDirectory`] applies it.

use super::user::{UserFields, UserId, UserRecord, UserValidationError};

/// Separator used by the single-field skills representation.
pub const SKILL_SEPARATOR: &str = ", ";

/// How the editor was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    /// Blank draft for a new record.
    Create,
    /// Draft pre-populated from an existing record.
    Edit(UserRecord),
}

impl EditorMode {
    /// Heading shown above the form.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Create => "Add new user",
            Self::Edit(_) => "Edit user",
        }
    }
}

/// Validated outcome of a submitted draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    /// The draft had no identifier: assign one and a registration date.
    NewRecord(UserFields),
    /// The draft belongs to an existing record.
    ExistingRecord {
        /// Identifier of the record to replace.
        id: UserId,
        /// Replacement field values.
        fields: UserFields,
    },
}

/// Operator action submitted with the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorIntent {
    /// Validate and hand the draft to the caller.
    Save,
    /// Discard the draft.
    Cancel,
    /// Append an empty skill slot.
    AddSkillSlot,
    /// Remove the skill slot at the given position.
    RemoveSkill(usize),
}

impl EditorIntent {
    /// Parse a form `intent` value; anything unrecognised means [`EditorIntent::Save`],
    /// which is what pressing Enter in a field submits.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "cancel" => Self::Cancel,
            "add-skill" => Self::AddSkillSlot,
            other => other
                .strip_prefix("remove-skill:")
                .and_then(|index| index.parse().ok())
                .map_or(Self::Save, Self::RemoveSkill),
        }
    }
}

/// Result of applying an [`EditorIntent`] to a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorStep {
    /// Keep editing; the draft changed in place.
    Editing,
    /// Validation passed; persist the request.
    Submit(SaveRequest),
    /// Validation failed; the draft is kept for correction.
    Rejected(UserValidationError),
    /// The operator abandoned the draft.
    Cancelled,
}

/// In-progress, unsaved edits of one record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    id: Option<UserId>,
    name: String,
    surname: String,
    email: String,
    skills: Vec<String>,
}

impl Draft {
    /// Empty draft for a new record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft matching the editor mode: blank on create, pre-filled on edit.
    #[must_use]
    pub fn for_mode(mode: &EditorMode) -> Self {
        match mode {
            EditorMode::Create => Self::new(),
            EditorMode::Edit(record) => Self::from_record(record),
        }
    }

    /// Draft pre-populated from an existing record.
    #[must_use]
    pub fn from_record(record: &UserRecord) -> Self {
        Self {
            id: Some(record.id()),
            name: record.name().to_owned(),
            surname: record.surname().to_owned(),
            email: record.email().to_string(),
            skills: record.skills().to_vec(),
        }
    }

    /// Set the identifier the draft belongs to; `None` marks a new record.
    #[must_use]
    pub fn with_id(mut self, id: Option<UserId>) -> Self {
        self.id = id;
        self
    }

    /// Identifier of the record being edited, if any.
    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Name as typed.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Surname as typed.
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Email as typed.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Skill slots, including blank ones.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Replace the name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Replace the surname.
    pub fn set_surname(&mut self, surname: impl Into<String>) {
        self.surname = surname.into();
    }

    /// Replace the email.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Replace every skill slot.
    pub fn set_skills(&mut self, skills: Vec<String>) {
        self.skills = skills;
    }

    /// Append an empty skill slot.
    pub fn add_skill_slot(&mut self) {
        self.skills.push(String::new());
    }

    /// Overwrite the text of one slot; returns `false` when `index` is out of range.
    pub fn edit_skill(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.skills.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Remove one slot; returns `false` when `index` is out of range.
    pub fn remove_skill(&mut self, index: usize) -> bool {
        if index >= self.skills.len() {
            return false;
        }
        self.skills.remove(index);
        true
    }

    /// Skills joined for the single-field representation.
    #[must_use]
    pub fn skills_text(&self) -> String {
        self.skills.join(SKILL_SEPARATOR)
    }

    /// Replace the slots from the single-field representation.
    ///
    /// # Examples
    /// ```
    /// use roster::domain::Draft;
    ///
    /// let mut draft = Draft::new();
    /// draft.set_skills_text("rust, sql");
    /// assert_eq!(draft.skills(), ["rust", "sql"]);
    /// assert_eq!(draft.skills_text(), "rust, sql");
    /// ```
    pub fn set_skills_text(&mut self, text: &str) {
        self.skills = if text.trim().is_empty() {
            Vec::new()
        } else {
            text.split(SKILL_SEPARATOR).map(str::to_owned).collect()
        };
    }

    /// Run the save-time checks and classify the draft.
    ///
    /// Checks run in order: name present, email present, email well formed.
    pub fn validate(&self) -> Result<SaveRequest, UserValidationError> {
        let fields = UserFields::new(
            self.name.as_str(),
            self.surname.as_str(),
            self.email.as_str(),
            self.skills.iter().cloned(),
        )?;
        Ok(match self.id {
            Some(id) => SaveRequest::ExistingRecord { id, fields },
            None => SaveRequest::NewRecord(fields),
        })
    }

    /// Apply one operator action.
    pub fn apply(&mut self, intent: EditorIntent) -> EditorStep {
        match intent {
            EditorIntent::Cancel => EditorStep::Cancelled,
            EditorIntent::AddSkillSlot => {
                self.add_skill_slot();
                EditorStep::Editing
            }
            EditorIntent::RemoveSkill(index) => {
                self.remove_skill(index);
                EditorStep::Editing
            }
            EditorIntent::Save => match self.validate() {
                Ok(request) => EditorStep::Submit(request),
                Err(error) => EditorStep::Rejected(error),
            },
        }
    }
}
