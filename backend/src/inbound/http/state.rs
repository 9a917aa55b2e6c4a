//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`; they reach the store
//! only through the directory service.

use std::sync::Arc;

use super::views::Views;
use crate::domain::UserDirectory;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<UserDirectory>,
    pub views: Arc<Views>,
}

impl HttpState {
    /// Bundle the directory service with the template registry.
    pub fn new(directory: Arc<UserDirectory>, views: Arc<Views>) -> Self {
        Self { directory, views }
    }
}
