//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use roster::domain::UserDirectory;
use roster::inbound::http::views::Views;

/// Everything the server factory needs to build each worker's app.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) directory: Arc<UserDirectory>,
    pub(crate) views: Arc<Views>,
}

impl ServerConfig {
    /// Construct a configuration for the given listener and services.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, directory: Arc<UserDirectory>, views: Arc<Views>) -> Self {
        Self {
            bind_addr,
            directory,
            views,
        }
    }
}
