//! Workflow implementations exposed by the library.

pub mod screening;
