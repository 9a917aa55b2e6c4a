//! User roster: a server-rendered CRUD interface over an in-memory user
//! collection seeded from a remote REST resource.
//!
//! - [`domain`]: records, the collection store, sorting, the editor and the
//!   directory service.
//! - [`inbound`]: actix-web pages, form endpoints and probes.
//! - [`outbound`]: the reqwest client for the remote resource.
//! - [`settings`] / [`startup`]: configuration and application wiring.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
pub mod startup;

pub use middleware::Trace;
