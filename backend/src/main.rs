//! Roster entry-point: loads settings, wires the directory service and the
//! remote source, serves the pages, and runs the initial load alongside.

mod server;

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::inbound::http::health::HealthState;
use roster::inbound::http::views::Views;
use roster::settings::RosterSettings;
use roster::startup::{build_directory, build_remote_source, load_users_on_startup};
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RosterSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let directory =
        build_directory(&settings, Arc::new(DefaultClock)).map_err(std::io::Error::other)?;
    let source = build_remote_source(&settings).map_err(std::io::Error::other)?;
    let views = Views::new()
        .map_err(|e| std::io::Error::other(format!("failed to parse templates: {e}")))?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, directory.clone(), Arc::new(views));
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, "roster listening");

    // The list renders empty until this lands; it is dropped if the server
    // stops first.
    let initial_load = actix_web::rt::spawn(async move {
        load_users_on_startup(&settings, &directory, source.as_ref()).await;
    });

    let result = server.await;
    health_state.mark_unhealthy();
    initial_load.abort();
    result
}
