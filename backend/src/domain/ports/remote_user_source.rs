//! Driven port for reading the user collection from the remote REST resource.
//!
//! The remote side is opaque: the adapter returns records as it received
//! them and the domain normalises dates and validates fields on load.

use async_trait::async_trait;
use chrono::FixedOffset;

use super::define_port_error;
use crate::domain::{RegistrationDate, RegistrationDateError, UserFields, UserId, UserRecord};

/// One record as reported by the remote resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUserRecord {
    /// Remote identifier.
    pub id: u64,
    /// Given name.
    pub name: String,
    /// Family name.
    pub surname: String,
    /// Contact email.
    pub email: String,
    /// Ordered skill tags.
    pub skills: Vec<String>,
    /// Registration timestamp in ISO-8601 form.
    pub date: String,
}

/// Reasons a raw record cannot enter the collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RawRecordError {
    /// A field broke a record invariant.
    #[error("record {id}: {source}")]
    Field {
        /// Remote identifier of the offending record.
        id: u64,
        /// Violated rule.
        #[source]
        source: crate::domain::UserValidationError,
    },
    /// The timestamp could not be parsed.
    #[error("record {id}: {source}")]
    Date {
        /// Remote identifier of the offending record.
        id: u64,
        /// Parse failure.
        #[source]
        source: RegistrationDateError,
    },
}

impl RawUserRecord {
    /// Validate the record and render its date in `offset`.
    pub fn into_record(self, offset: FixedOffset) -> Result<UserRecord, RawRecordError> {
        let Self {
            id: raw_id,
            name,
            surname,
            email,
            skills,
            date,
        } = self;
        let field_error = |source| RawRecordError::Field { id: raw_id, source };
        let id = UserId::new(raw_id).map_err(field_error)?;
        let fields = UserFields::new(name, surname, email, skills).map_err(field_error)?;
        let date = RegistrationDate::from_iso(&date, offset)
            .map_err(|source| RawRecordError::Date { id: raw_id, source })?;
        Ok(UserRecord::new(id, fields, date))
    }
}

define_port_error! {
    /// Errors surfaced while fetching the remote collection.
    pub enum RemoteUserSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "remote users transport failed: {message}",
        /// The request exceeded its timeout.
        Timeout { message: String } =>
            "remote users request timed out: {message}",
        /// The resource answered with a non-success status.
        Status { status: u16, message: String } =>
            "remote users returned status {status}: {message}",
        /// The payload was not the expected JSON shape.
        Decode { message: String } =>
            "remote users payload decode failed: {message}",
    }
}

/// Port for fetching the full remote user collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteUserSource: Send + Sync {
    /// Fetch every record the remote resource holds.
    async fn fetch_all(&self) -> Result<Vec<RawUserRecord>, RemoteUserSourceError>;
}

/// Fixture source returning an empty collection; used when no remote
/// resource is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRemoteUserSource;

#[async_trait]
impl RemoteUserSource for FixtureRemoteUserSource {
    async fn fetch_all(&self) -> Result<Vec<RawUserRecord>, RemoteUserSourceError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserValidationError;
    use crate::domain::test_support::utc_offset;
    use rstest::{fixture, rstest};

    #[fixture]
    fn raw() -> RawUserRecord {
        RawUserRecord {
            id: 7,
            name: "Ann".to_owned(),
            surname: "Lee".to_owned(),
            email: "ann@example.com".to_owned(),
            skills: vec!["go".to_owned()],
            date: "2023-11-20T14:05:00.000Z".to_owned(),
        }
    }

    #[rstest]
    fn converts_valid_record_with_display_date(raw: RawUserRecord) {
        let record = raw.into_record(utc_offset()).expect("valid record");
        assert_eq!(record.id().get(), 7);
        assert_eq!(record.date().as_str(), "20.11.2023 14:05");
    }

    #[rstest]
    fn rejects_zero_id(mut raw: RawUserRecord) {
        raw.id = 0;
        let error = raw.into_record(utc_offset()).expect_err("zero id");
        assert_eq!(
            error,
            RawRecordError::Field {
                id: 0,
                source: UserValidationError::InvalidId
            }
        );
    }

    #[rstest]
    fn rejects_unparsable_date(mut raw: RawUserRecord) {
        raw.date = "soon".to_owned();
        let error = raw.into_record(utc_offset()).expect_err("bad date");
        assert!(matches!(error, RawRecordError::Date { id: 7, .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_source_is_empty() {
        let records = FixtureRemoteUserSource.fetch_all().await.expect("fixture");
        assert!(records.is_empty());
    }
}
