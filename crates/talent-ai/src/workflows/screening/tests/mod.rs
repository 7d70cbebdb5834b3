//! Unit and handler tests for the screening workflow.

mod common;
mod scoring;
