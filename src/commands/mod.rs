pub mod auth;
pub mod publish;
