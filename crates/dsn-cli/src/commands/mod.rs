pub mod analyze;
pub mod options;
pub mod parse;
pub mod types;
