//! Turns the flat change records of a structural diff into a tree shaped like
//! the compared data, where each node carries the aggregated classification
//! of the changes at or below it.
//!
//! ```
//! use difftree::document::Value;
//! use difftree::engine::DiffEngine;
//! use difftree::tree::DiffTree;
//! use difftree::classification::Classification;
//!
//! let before = Value::from_yaml_str("a: 1").unwrap();
//! let after = Value::from_yaml_str("a: 3").unwrap();
//!
//! let tree = DiffTree::build(DiffEngine::default().diff(&before, &after)).unwrap();
//! assert_eq!(tree.root().classification(), Classification::Modified);
//! assert_eq!(tree.get("['a']").unwrap().classification(), Classification::Modified);
//! ```

#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod classification;
pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
mod ext;
pub mod render;
pub mod report;
pub mod tree;
