//! HTTP surface of the portal: router, handlers and wire types.

pub mod handlers;
pub mod server;
pub mod types;

pub use server::{PortalState, build_router, start_server};
