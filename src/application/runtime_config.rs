use std::collections::HashSet;
use std::path::PathBuf;

use crate::application::data::{ColorChoice, OutputFormat};
use crate::cli::Cli;
use crate::config::ViewerConfig;
use crate::engine::EngineOptions;

/// Settings of one run: CLI flags layered over the config file.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub before: PathBuf,
    pub after: PathBuf,
    pub format: OutputFormat,
    pub color: ColorChoice,
    pub exclude_paths: HashSet<String>,
}

impl RuntimeConfig {
    pub fn merge(cli: Cli, file: ViewerConfig) -> Self {
        let exclude_paths = file
            .exclude_paths
            .into_iter()
            .chain(cli.exclude_paths)
            .collect();

        Self {
            before: cli.before,
            after: cli.after,
            format: cli.format.or(file.format).unwrap_or_default(),
            color: cli.color.or(file.color).unwrap_or_default(),
            exclude_paths,
        }
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            view: self.format.view_mode(),
            exclude_paths: self.exclude_paths.clone(),
        }
    }
}
