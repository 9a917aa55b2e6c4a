//! Domain ports for the hexagonal boundary.
//!
//! Driven adapters (the remote REST client) implement these traits; the
//! domain only sees the traits and their typed errors.

mod macros;
pub(crate) use macros::define_port_error;

mod remote_user_source;

#[cfg(test)]
pub use remote_user_source::MockRemoteUserSource;
pub use remote_user_source::{
    FixtureRemoteUserSource, RawRecordError, RawUserRecord, RemoteUserSource,
    RemoteUserSourceError,
};
