//! baplan-llm
//!
//! Plan generation: the Behavioral Activation prompt, the model backends
//! that answer it, and coercion of the reply into a [`GeneratedPlan`].
//!
//! [`GeneratedPlan`]: baplan_core::models::plan::GeneratedPlan

pub mod backend;
pub mod bedrock;
pub mod error;
pub mod generator;
pub mod normalize;
pub mod openai;
pub mod prompt;
