//! baplan-storage
//!
//! Survey persistence. Handlers only ever see [`SurveyStore`]; the process
//! picks an in-memory or SQLite backing at startup.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use store::SurveyStore;
