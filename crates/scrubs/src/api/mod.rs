pub mod options;
pub mod types;
