use clap::ValueEnum;
use derive_more::Display;

use crate::report::ViewMode;

/// How the diff is printed.
#[derive(Debug, Display, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Nested tree of changes
    #[default]
    #[display("tree")]
    Tree,
    /// One line per changed path
    #[display("summary")]
    Summary,
    /// Flat listing grouped by category, without building a tree
    #[display("flat")]
    Flat,
}

impl OutputFormat {
    /// View the diff engine has to produce for this format.
    pub fn view_mode(&self) -> ViewMode {
        match self {
            OutputFormat::Tree | OutputFormat::Summary => ViewMode::Tree,
            OutputFormat::Flat => ViewMode::Text,
        }
    }
}
