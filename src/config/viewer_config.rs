use std::borrow::Cow;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::{debug, warn};

use crate::application::data::{ColorChoice, OutputFormat};
use crate::ext::BestEffortPathExt;

pub const CONFIG_FILE_NAME: &str = "difftree.yaml";

const FORMAT_KEY: &str = "format";
const COLOR_KEY: &str = "color";
const EXCLUDE_PATHS_KEY: &str = "exclude_paths";
const KNOWN_KEYS: [&str; 3] = [FORMAT_KEY, COLOR_KEY, EXCLUDE_PATHS_KEY];

/// Settings read from a YAML file. Unset values fall back to the CLI
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerConfig {
    pub format: Option<OutputFormat>,
    pub color: Option<ColorChoice>,
    pub exclude_paths: Vec<String>,
}

impl ViewerConfig {
    /// Reads `explicit` if given, which then has to exist. Otherwise reads
    /// [`CONFIG_FILE_NAME`] from the working directory when present.
    pub async fn read(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(path).await,
            None => {
                let path = PathBuf::from(CONFIG_FILE_NAME);
                if path.is_file() {
                    Self::from_path(&path).await
                } else {
                    debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    Ok(Self::default())
                }
            }
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!("Opening config file: {}", path.best_effort_path_display());
        let bytes = compio::fs::read(path).await.context(ReadSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        debug!("Successfully read config file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.best_effort_path_display(),
        })?;
        contents.as_str().try_into()
    }

    fn parse_enum<T: ValueEnum>(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
    ) -> Result<Option<T>, ConfigError> {
        let Some(node) = top_level.get(&yaml_key(key)) else {
            return Ok(None);
        };

        let value = node.as_str().context(InvalidValueSnafu {
            key,
            value: format!("{node:?}"),
        })?;
        T::from_str(value, true)
            .ok()
            .context(InvalidValueSnafu { key, value })
            .map(Some)
    }

    fn parse_exclude_paths(
        top_level: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Vec<String>, ConfigError> {
        let Some(node) = top_level.get(&yaml_key(EXCLUDE_PATHS_KEY)) else {
            return Ok(Vec::new());
        };

        node.as_sequence()
            .context(ExcludePathsNotSequenceSnafu)?
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.as_str()
                    .map(str::to_string)
                    .context(ExcludePathNotStringSnafu { index })
            })
            .collect()
    }
}

fn yaml_key(key: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(key)))
}

impl TryFrom<&str> for ViewerConfig {
    type Error = ConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;

        let top_level = match documents.first() {
            None | Some(Yaml::Value(Scalar::Null)) => {
                debug!("Config file is empty, using defaults");
                return Ok(Self::default());
            }
            Some(document) => document.as_mapping().context(TopLevelNotMapSnafu)?,
        };

        for key in top_level.keys() {
            match key.as_str() {
                Some(name) if KNOWN_KEYS.contains(&name) => {}
                _ => warn!("Ignoring unknown config entry: {:?}", key),
            }
        }

        Ok(ViewerConfig {
            format: Self::parse_enum(top_level, FORMAT_KEY)?,
            color: Self::parse_enum(top_level, COLOR_KEY)?,
            exclude_paths: Self::parse_exclude_paths(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ConfigError {
    #[snafu(display("Failed to read the config file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Config file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Invalid value {} for '{}'", value, key))]
    InvalidValue { key: String, value: String },
    #[snafu(display("'exclude_paths' should be a list"))]
    ExcludePathsNotSequence,
    #[snafu(display("Entry {} of 'exclude_paths' should be a string", index))]
    ExcludePathNotString { index: usize },
}
