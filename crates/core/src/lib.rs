//! Portfolio core: shared types, domain errors and input rules for project
//! writes. Contains no I/O so every crate in the workspace can depend on it.

pub mod error;
pub mod project;
pub mod types;
