//! Server crate for the Opsboard dashboard backend.
//!
//! Split out of the binary so integration tests can build the router and app
//! state directly.

pub mod handlers;
pub mod infra;
pub mod routes;
