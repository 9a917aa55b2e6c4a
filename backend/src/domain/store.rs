//! Process-wide in-memory user collection.
//!
//! The collection is the single source of truth for every view. It is shared
//! behind an `Arc` and all mutations go through the named operations below;
//! each one takes the write lock for its whole duration, so readers never see
//! a half-applied change. Mutations cannot fail.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::user::{UserId, UserRecord};

/// Ordered list of user records.
///
/// Insertion and load order is preserved; sorted views are copies.
#[derive(Debug, Default)]
pub struct UserCollection {
    records: RwLock<Vec<UserRecord>>,
}

impl UserCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection holding `records` in the given order.
    #[must_use]
    pub fn with_records(records: Vec<UserRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    // Every operation leaves the list consistent before it can panic, so a
    // poisoned lock still guards valid data.
    fn read(&self) -> RwLockReadGuard<'_, Vec<UserRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<UserRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the entire collection.
    pub fn set_all(&self, records: Vec<UserRecord>) {
        *self.write() = records;
    }

    /// Replace the collection only while it is still empty.
    ///
    /// Returns `false`, leaving the collection untouched, when records were
    /// added in the meantime.
    pub fn set_all_if_empty(&self, records: Vec<UserRecord>) -> bool {
        let mut guard = self.write();
        if !guard.is_empty() {
            return false;
        }
        *guard = records;
        true
    }

    /// Append a record whose id and date were already assigned.
    pub fn add(&self, record: UserRecord) {
        self.write().push(record);
    }

    /// Replace the record with the same id, keeping its registration date.
    ///
    /// Returns `false` and leaves the collection unchanged when no record
    /// matches.
    pub fn update(&self, record: UserRecord) -> bool {
        let mut guard = self.write();
        let Some(slot) = guard.iter_mut().find(|existing| existing.id() == record.id()) else {
            debug!(user_id = %record.id(), "update ignored: no matching record");
            return false;
        };
        let fields = record.fields().clone();
        *slot = slot.clone().with_fields(fields);
        true
    }

    /// Remove the record with the given id; returns whether one was removed.
    pub fn remove_by_id(&self, id: UserId) -> bool {
        let mut guard = self.write();
        let before = guard.len();
        guard.retain(|record| record.id() != id);
        guard.len() != before
    }

    /// Look up a record by id.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<UserRecord> {
        self.read().iter().find(|record| record.id() == id).cloned()
    }

    /// Whether a record with the given id exists.
    #[must_use]
    pub fn contains(&self, id: UserId) -> bool {
        self.read().iter().any(|record| record.id() == id)
    }

    /// Copy of all records in stored order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<UserRecord> {
        self.read().clone()
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Identifier for the next created record: highest id plus one, or 1.
    ///
    /// `None` when the highest stored id is `u64::MAX`.
    #[must_use]
    pub fn next_id(&self) -> Option<UserId> {
        next_id_in(&self.read())
    }

    /// Assign the next id to a freshly built record and append it atomically.
    ///
    /// `build` receives the id chosen under the write lock, so concurrent
    /// creates never share an identifier. Returns `None`, without calling
    /// `build`, when no identifier is left.
    pub fn add_with_next_id(&self, build: impl FnOnce(UserId) -> UserRecord) -> Option<UserId> {
        let mut guard = self.write();
        let id = next_id_in(&guard)?;
        guard.push(build(id));
        Some(id)
    }
}

fn next_id_in(records: &[UserRecord]) -> Option<UserId> {
    records
        .iter()
        .map(UserRecord::id)
        .max()
        .map_or(Some(UserId::FIRST), UserId::next)
}
