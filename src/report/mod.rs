pub mod format;
pub mod publisher;
pub mod types;
