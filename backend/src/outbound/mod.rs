//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **remote_users**: reqwest client for the remote REST user resource.
//!
//! Adapters translate between wire payloads and domain types. They contain
//! no business logic.

pub mod remote_users;
