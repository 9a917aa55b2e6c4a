//! Inbound adapters that translate browser requests into directory service
//! calls while keeping framework details at the edge.

pub mod http;
