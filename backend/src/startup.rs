//! Startup wiring: the directory service, the remote source and the
//! initial load.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::ports::{FixtureRemoteUserSource, RemoteUserSource};
use crate::domain::{LoadOutcome, UserCollection, UserDirectory};
use crate::outbound::remote_users::{RemoteUsersHttpSource, RemoteUsersSetupError};
use crate::settings::{RosterSettings, SettingsError};

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A configured value is unusable.
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    /// The remote source adapter could not be built.
    #[error("remote source setup failed: {0}")]
    RemoteSource(#[from] RemoteUsersSetupError),
}

/// Build the directory service over an empty collection.
///
/// # Errors
///
/// Returns [`StartupError::Settings`] when the display offset is invalid.
pub fn build_directory(
    settings: &RosterSettings,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Result<Arc<UserDirectory>, StartupError> {
    let offset = settings.display_offset()?;
    Ok(Arc::new(UserDirectory::new(
        Arc::new(UserCollection::new()),
        clock,
        offset,
    )))
}

/// Pick the remote source: the HTTP adapter, or the empty fixture when no
/// remote URL is configured.
///
/// # Errors
///
/// Returns an error when the URL is malformed or the client cannot be built.
pub fn build_remote_source(
    settings: &RosterSettings,
) -> Result<Arc<dyn RemoteUserSource>, StartupError> {
    match settings.remote_url()? {
        Some(base_url) => {
            let source = RemoteUsersHttpSource::new(&base_url, settings.request_timeout())?;
            info!(endpoint = %source.endpoint(), "remote user source configured");
            Ok(Arc::new(source))
        }
        None => {
            info!(reason = "no_remote_url", "using empty fixture user source");
            Ok(Arc::new(FixtureRemoteUserSource))
        }
    }
}

/// Run the initial load when enabled; returns `None` when disabled.
///
/// Fetch failures are logged by the directory and never abort startup.
pub async fn load_users_on_startup(
    settings: &RosterSettings,
    directory: &UserDirectory,
    source: &dyn RemoteUserSource,
) -> Option<LoadOutcome> {
    if !settings.load_on_startup() {
        info!(reason = "disabled", "initial user load skipped");
        return None;
    }
    let outcome = directory.load_initial(source).await;
    if let LoadOutcome::Loaded {
        rejected: rejected @ 1..,
        ..
    } = &outcome
    {
        warn!(rejected = *rejected, "some remote user records were rejected");
    }
    Some(outcome)
}
