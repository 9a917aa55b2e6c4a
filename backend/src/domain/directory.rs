//! User directory service.
//!
//! Owns the caller-side decisions around the collection store: applying a
//! [`SaveRequest`] (update versus create with a fresh id and date), resolving
//! delete-by-id input, and the guarded initial load from the remote source.
//! Every inbound adapter goes through this service rather than writing to the
//! store ad hoc.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::FixedOffset;
use mockable::Clock;
use tracing::{debug, info, warn};

use super::editor::SaveRequest;
use super::ports::{RemoteUserSource, RemoteUserSourceError};
use super::sort::{SortKey, sorted_view};
use super::store::UserCollection;
use super::user::{RegistrationDate, UserId, UserRecord};

/// Effect of applying a [`SaveRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new record was appended under this id.
    Created(UserId),
    /// The existing record was replaced.
    Updated(UserId),
    /// The record vanished before the update landed; nothing changed.
    Missing(UserId),
    /// No identifier is left for a new record; nothing changed.
    IdsExhausted,
}

/// Lookup failures for delete-by-id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteByIdError {
    /// The input was not a positive decimal id.
    #[error("enter a valid id")]
    InvalidId {
        /// Input as typed.
        input: String,
    },
    /// No record carries the id.
    #[error("user with this id was not found")]
    NotFound(UserId),
}

/// Result of the initial remote load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The collection already held records; the remote was not contacted.
    Skipped,
    /// The collection was populated.
    Loaded {
        /// Records stored.
        loaded: usize,
        /// Records dropped because they broke an invariant.
        rejected: usize,
    },
    /// Records were added locally while the fetch was in flight; the
    /// fetched records were discarded.
    Superseded,
    /// The fetch failed; the collection is unchanged.
    Failed(RemoteUserSourceError),
}

/// Application service over the shared [`UserCollection`].
pub struct UserDirectory {
    store: Arc<UserCollection>,
    clock: Arc<dyn Clock + Send + Sync>,
    display_offset: FixedOffset,
}

impl UserDirectory {
    /// Build the service around a shared store.
    ///
    /// `display_offset` is the UTC offset used when rendering registration
    /// dates.
    pub fn new(
        store: Arc<UserCollection>,
        clock: Arc<dyn Clock + Send + Sync>,
        display_offset: FixedOffset,
    ) -> Self {
        Self {
            store,
            clock,
            display_offset,
        }
    }

    /// Look up a record by id.
    #[must_use]
    pub fn find(&self, id: UserId) -> Option<UserRecord> {
        self.store.find(id)
    }

    /// Shared collection store.
    pub fn store(&self) -> &Arc<UserCollection> {
        &self.store
    }

    /// Records ordered for display.
    #[must_use]
    pub fn list(&self, key: SortKey) -> Vec<UserRecord> {
        sorted_view(&self.store.snapshot(), key)
    }

    /// Look up a record by the decimal id carried in a route parameter.
    ///
    /// Unparsable input is treated like an unknown id.
    #[must_use]
    pub fn find_by_param(&self, raw_id: &str) -> Option<UserRecord> {
        raw_id
            .parse::<UserId>()
            .ok()
            .and_then(|id| self.find(id))
    }

    /// Apply a validated editor submission.
    pub fn save(&self, request: SaveRequest) -> SaveOutcome {
        match request {
            SaveRequest::ExistingRecord { id, fields } => {
                let Some(existing) = self.store.find(id) else {
                    debug!(user_id = %id, "save ignored: record no longer exists");
                    return SaveOutcome::Missing(id);
                };
                if self.store.update(existing.with_fields(fields)) {
                    info!(user_id = %id, "user updated");
                    SaveOutcome::Updated(id)
                } else {
                    SaveOutcome::Missing(id)
                }
            }
            SaveRequest::NewRecord(fields) => {
                let date = RegistrationDate::from_instant(self.clock.utc(), self.display_offset);
                let Some(id) = self
                    .store
                    .add_with_next_id(|id| UserRecord::new(id, fields, date))
                else {
                    warn!("user not created: no identifier left");
                    return SaveOutcome::IdsExhausted;
                };
                info!(user_id = %id, "user created");
                SaveOutcome::Created(id)
            }
        }
    }

    /// Delete the record with the given id; returns whether one was removed.
    pub fn delete(&self, id: UserId) -> bool {
        let removed = self.store.remove_by_id(id);
        if removed {
            info!(user_id = %id, "user deleted");
        }
        removed
    }

    /// Delete by an id typed by the operator.
    pub fn delete_by_input(&self, raw_id: &str) -> Result<UserId, DeleteByIdError> {
        let id = raw_id
            .parse::<UserId>()
            .map_err(|_| DeleteByIdError::InvalidId {
                input: raw_id.to_owned(),
            })?;
        if self.delete(id) {
            Ok(id)
        } else {
            Err(DeleteByIdError::NotFound(id))
        }
    }

    /// Populate the collection from the remote source if it is still empty.
    ///
    /// Failures are logged and leave the collection unchanged. Records that
    /// break an invariant, or repeat an id, are skipped individually.
    pub async fn load_initial(&self, source: &dyn RemoteUserSource) -> LoadOutcome {
        if !self.store.is_empty() {
            info!(reason = "not_empty", "initial user load skipped");
            return LoadOutcome::Skipped;
        }

        let raw_records = match source.fetch_all().await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, "error fetching users");
                return LoadOutcome::Failed(error);
            }
        };

        let fetched = raw_records.len();
        let mut seen = HashSet::with_capacity(fetched);
        let records: Vec<UserRecord> = raw_records
            .into_iter()
            .filter_map(|raw| match raw.into_record(self.display_offset) {
                Ok(record) if seen.insert(record.id()) => Some(record),
                Ok(record) => {
                    warn!(user_id = %record.id(), "skipping remote record with duplicate id");
                    None
                }
                Err(error) => {
                    warn!(%error, "skipping invalid remote record");
                    None
                }
            })
            .collect();
        let loaded = records.len();

        if self.store.set_all_if_empty(records) {
            info!(loaded, fetched, "initial user load applied");
            LoadOutcome::Loaded {
                loaded,
                rejected: fetched - loaded,
            }
        } else {
            info!(fetched, "initial user load discarded: collection changed meanwhile");
            LoadOutcome::Superseded
        }
    }
}
