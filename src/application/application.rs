use std::path::Path;

use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::application::data::OutputFormat;
use crate::cli::Cli;
use crate::config::{ConfigError, ViewerConfig};
use crate::document::{DocumentError, Value};
use crate::engine::DiffEngine;
use crate::ext::BestEffortPathExt;
use crate::render::{ConsoleRenderer, Render, SummaryRenderer, render_flat};
use crate::tree::{DiffTree, TreeBuildError};

pub struct Application;

impl Application {
    pub async fn run(cli: Cli) -> Result<(), ApplicationError> {
        let file_config = ViewerConfig::read(cli.config.as_deref())
            .await
            .context(ConfigSnafu)?;
        debug!("Loaded config: {:?}", file_config);

        let runtime_config = RuntimeConfig::merge(cli, file_config);
        colored::control::set_override(runtime_config.color.enabled());

        let output = Self::render(&runtime_config).await?;
        println!("{output}");

        Ok(())
    }

    /// Loads both documents, diffs them and renders the result in the
    /// configured format.
    pub async fn render(config: &RuntimeConfig) -> Result<String, ApplicationError> {
        let before = load_document(&config.before).await?;
        let after = load_document(&config.after).await?;

        let report = DiffEngine::new(config.engine_options()).diff(&before, &after);
        info!(
            "Found {} change(s) between {} and {}",
            report.record_count(),
            config.before.display(),
            config.after.display()
        );

        let output = match config.format {
            OutputFormat::Flat => render_flat(&report),
            OutputFormat::Tree => {
                let tree = DiffTree::build(report).context(TreeBuildSnafu)?;
                ConsoleRenderer::new(config.color.enabled()).render(&tree)
            }
            OutputFormat::Summary => {
                let tree = DiffTree::build(report).context(TreeBuildSnafu)?;
                SummaryRenderer.render(&tree)
            }
        };

        Ok(output)
    }
}

async fn load_document(path: &Path) -> Result<Value, ApplicationError> {
    debug!("Reading document: {}", path.best_effort_path_display());

    let bytes = compio::fs::read(path).await.context(ReadSnafu {
        file_path: path.best_effort_path_display(),
    })?;
    let contents = String::from_utf8(bytes).context(EncodingSnafu {
        file_path: path.best_effort_path_display(),
    })?;

    Value::from_yaml_str(&contents).context(DocumentSnafu {
        file_path: path.best_effort_path_display(),
    })
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered during configuration stage"))]
    ConfigError { source: ConfigError },
    #[snafu(display("Failed to read document {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Document {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to load document {}", file_path))]
    DocumentError {
        file_path: String,
        source: DocumentError,
    },
    #[snafu(display("Critical failure encountered while building the diff tree"))]
    TreeBuildError { source: TreeBuildError },
}
