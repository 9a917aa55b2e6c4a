//! Remote REST resource adapter.
//!
//! A thin reqwest implementation of the `RemoteUserSource` port.

mod dto;
mod http_source;

pub use http_source::{RemoteUsersHttpSource, RemoteUsersSetupError};
