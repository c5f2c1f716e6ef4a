//! baplan-core
//!
//! Pure domain types and submission validation.
//! No storage or network dependency. This is the shared vocabulary of the
//! survey service, its store, and its clients.

pub mod error;
pub mod models;
pub mod validate;
