//! Command line glue: reads the documents, runs the diff engine, builds the
//! tree and prints it.

#[allow(clippy::module_inception)]
mod application;
pub mod data;
mod runtime_config;

pub use application::{Application, ApplicationError};
pub use runtime_config::RuntimeConfig;
