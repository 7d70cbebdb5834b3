//! Automated resume screening for hiring pipelines.
//!
//! The crate hosts the screening workflow (resume parser, scoring engine, and
//! the periodic evaluation worker) together with the configuration, telemetry,
//! and error plumbing shared by the service binaries.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
