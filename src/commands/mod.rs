//! Command implementations for the MLB statistics CLI

pub mod common;
pub mod init;
pub mod player;
pub mod search;
pub mod statcast;
pub mod stats;
pub mod sync;
