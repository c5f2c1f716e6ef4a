pub mod field;
pub mod plan;
pub mod survey;
pub mod token_count;
