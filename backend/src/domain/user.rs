//! User record model.
//!
//! A record is built from validated value objects: a positive [`UserId`], a
//! [`UserFields`] bundle (name, surname, email, skill tags) and an immutable
//! [`RegistrationDate`] kept in display form.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors raised while building user value objects.
///
/// The messages are shown verbatim to the operator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was zero, negative, or not a decimal number.
    #[error("user id must be a positive integer")]
    InvalidId,
    /// Name was blank once trimmed.
    #[error("name is required")]
    NameRequired,
    /// Email was blank once trimmed.
    #[error("email is required")]
    EmailRequired,
    /// Email did not look like `local@domain.tld`.
    #[error("invalid email format")]
    InvalidEmailFormat,
}

/// Positive integer identifying a record within the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(u64);

impl UserId {
    /// Identifier handed to the first record of an empty collection.
    pub const FIRST: Self = Self(1);

    /// Validate and construct a [`UserId`]; zero is reserved for unsaved drafts.
    pub fn new(id: u64) -> Result<Self, UserValidationError> {
        if id == 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Identifier following this one; `None` once the id space is used up.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = s
            .trim()
            .parse::<u64>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(parsed)
    }
}

impl TryFrom<u64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for u64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Email address matching a simple `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate and construct an [`Email`], trimming surrounding whitespace.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmailRequired);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmailFormat);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Editable profile fields of a record.
///
/// ## Invariants
/// - `name` is non-empty once trimmed.
/// - `skills` holds no blank tags; order is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    name: String,
    surname: String,
    email: Email,
    skills: Vec<String>,
}

impl UserFields {
    /// Validate raw field values.
    ///
    /// Name is checked before email so the operator sees the first rule broken.
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
        skills: impl IntoIterator<Item = String>,
    ) -> Result<Self, UserValidationError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::NameRequired);
        }
        let email = Email::new(email)?;
        let skills = skills
            .into_iter()
            .map(|skill| skill.trim().to_owned())
            .filter(|skill| !skill.is_empty())
            .collect();

        Ok(Self {
            name: name.to_owned(),
            surname: surname.into().trim().to_owned(),
            email,
            skills,
        })
    }

    /// Given name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Family name; may be empty.
    pub fn surname(&self) -> &str {
        self.surname.as_str()
    }

    /// Contact email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Ordered skill tags.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }
}

/// Errors raised while deriving a [`RegistrationDate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationDateError {
    /// Input was not an ISO-8601 date or timestamp.
    #[error("registration date {value:?} is not an ISO-8601 timestamp")]
    InvalidTimestamp {
        /// Offending input.
        value: String,
    },
}

/// Registration timestamp rendered as `DD.MM.YYYY HH:MM`.
///
/// Derived once, either from the clock on creation or from the ISO-8601
/// value the remote resource reports, and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDate(String);

/// `strftime` pattern used for display dates.
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

impl RegistrationDate {
    /// Render an instant in the given display offset.
    #[must_use]
    pub fn from_instant(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self(
            instant
                .with_timezone(&offset)
                .format(DISPLAY_DATE_FORMAT)
                .to_string(),
        )
    }

    /// Parse an ISO-8601 value and render it in the given display offset.
    ///
    /// Accepts RFC 3339 timestamps, timestamps without an offset (read as
    /// wall-clock time in `offset`) and bare dates (midnight UTC).
    ///
    /// # Examples
    /// ```
    /// use chrono::FixedOffset;
    /// use roster::domain::RegistrationDate;
    ///
    /// let utc = FixedOffset::east_opt(0).expect("zero offset");
    /// let date = RegistrationDate::from_iso("2024-03-05T09:07:00.000Z", utc).expect("valid");
    /// assert_eq!(date.as_str(), "05.03.2024 09:07");
    /// ```
    pub fn from_iso(raw: &str, offset: FixedOffset) -> Result<Self, RegistrationDateError> {
        let value = raw.trim();
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self::from_instant(timestamp.with_timezone(&Utc), offset));
        }
        if let Ok(wall_clock) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(wall_clock.format(DISPLAY_DATE_FORMAT).to_string()));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| Self::from_instant(Utc.from_utc_datetime(&midnight), offset))
            .ok_or_else(|| RegistrationDateError::InvalidTimestamp {
                value: raw.to_owned(),
            })
    }

    /// Display form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RegistrationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user entity held by the collection store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    fields: UserFields,
    date: RegistrationDate,
}

impl UserRecord {
    /// Assemble a record from validated parts.
    #[must_use]
    pub fn new(id: UserId, fields: UserFields, date: RegistrationDate) -> Self {
        Self { id, fields, date }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Editable profile fields.
    pub fn fields(&self) -> &UserFields {
        &self.fields
    }

    /// Given name.
    pub fn name(&self) -> &str {
        self.fields.name()
    }

    /// Family name; may be empty.
    pub fn surname(&self) -> &str {
        self.fields.surname()
    }

    /// Contact email.
    pub fn email(&self) -> &Email {
        self.fields.email()
    }

    /// Ordered skill tags.
    pub fn skills(&self) -> &[String] {
        self.fields.skills()
    }

    /// Registration date in display form.
    pub fn date(&self) -> &RegistrationDate {
        &self.date
    }

    /// Replace the editable fields, keeping identifier and registration date.
    #[must_use]
    pub fn with_fields(self, fields: UserFields) -> Self {
        Self { fields, ..self }
    }
}
