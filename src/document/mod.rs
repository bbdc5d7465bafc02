//! Document values compared by the diff engine.
//!
//! Documents are loaded from YAML (JSON being a subset) into an owned
//! [`Value`] tree that no longer borrows from the source text.

mod value;
mod yaml;

pub use value::Value;
pub use yaml::DocumentError;
