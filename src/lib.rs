pub mod cleanup;
pub mod config;
pub mod context;
pub mod error;
pub mod platform;
