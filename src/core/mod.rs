//! Core utilities shared across the application:
//! - `cache`: in-memory LRU result cache, injected where needed
//! - `config`: environment-driven configuration

pub mod cache;
pub mod config;

pub use cache::ResultCache;
pub use config::Config;
