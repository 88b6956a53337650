//! QUOTESYNC — Quote Collection Agent with Periodic Remote Sync
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod storage;
pub mod store;
pub mod remote;
pub mod transfer;
