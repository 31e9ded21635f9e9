//! Storage and domain operations for the Opsboard dashboard backend.
//!
//! The [`store::Store`] owns the SQLite pool and is handed explicitly to every
//! consumer; there is no module-level database state. Mutations live in
//! [`mutations`], the aggregate read in [`snapshot`], and first-run data in
//! [`seed`].

pub mod auth;
pub mod error;
pub mod mutations;
pub mod seed;
pub mod snapshot;
pub mod store;

pub use error::{Result, StoreError};
pub use store::Store;
