//! baplan-client
//!
//! The respondent's side of the survey: a step-by-step form wizard that
//! builds a submission, an API client for the survey service, and a viewer
//! that renders a stored plan.

pub mod api;
pub mod error;
pub mod render;
pub mod viewer;
pub mod wizard;
