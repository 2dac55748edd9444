//! PostgreSQL record store integration
//!
//! This module provides integration with PostgreSQL for storing import jobs
//! and worksheet mapping checkpoints.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::{PostgreSQLAdapter, IMPORT_JOB_CHANNEL};
pub use client::{redact_connection_string, PostgreSQLClient};
pub use models::{PostgreSQLImportJob, PostgreSQLMapping};
