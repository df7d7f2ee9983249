pub mod auth;
pub mod client;
pub mod context;
pub mod types;
