mod viewer_config;

pub use viewer_config::{CONFIG_FILE_NAME, ConfigError, ViewerConfig};
