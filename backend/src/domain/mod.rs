//! Domain model and services for the user roster.
//!
//! Purpose: define the user record, the shared collection store, the sort
//! selector, the record editor and the directory service, independently of
//! HTTP or the remote REST resource.
//!
//! Public surface:
//! - [`UserRecord`] and its value objects ([`UserId`], [`Email`],
//!   [`UserFields`], [`RegistrationDate`]).
//! - [`UserCollection`]: the in-memory store.
//! - [`sorted_view`] / [`SortKey`]: display ordering.
//! - [`Draft`] / [`EditorMode`] / [`SaveRequest`]: the record editor.
//! - [`UserDirectory`]: the service inbound adapters call.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.

pub mod directory;
pub mod editor;
pub mod error;
pub mod ports;
pub mod sort;
pub mod store;
#[cfg(test)]
pub(crate) mod test_support;
pub mod trace_id;
pub mod user;

pub use self::directory::{DeleteByIdError, LoadOutcome, SaveOutcome, UserDirectory};
pub use self::editor::{Draft, EditorIntent, EditorMode, EditorStep, SaveRequest};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::sort::{SortKey, sorted_view};
pub use self::store::UserCollection;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    Email, RegistrationDate, RegistrationDateError, UserFields, UserId, UserRecord,
    UserValidationError,
};
