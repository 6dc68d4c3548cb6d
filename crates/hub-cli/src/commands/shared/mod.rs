pub mod limit;
pub mod prompt;
