//! Structural diff of two documents, producing a [`crate::report::DiffReport`].

mod align;
mod diff_engine;

pub use align::text_diff;
pub use diff_engine::{DiffEngine, EngineOptions};
