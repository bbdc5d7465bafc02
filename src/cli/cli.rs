use std::path::PathBuf;

use clap::Parser;

use crate::application::data::{ColorChoice, LogLevel, OutputFormat};

/// Show the structural difference between two YAML or JSON documents as a tree
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Document before the change
    pub before: PathBuf,
    /// Document after the change
    pub after: PathBuf,

    /// Output format, overrides the config file
    #[clap(long, short, value_enum)]
    pub format: Option<OutputFormat>,

    /// When to color the output, overrides the config file
    #[clap(long, short, value_enum)]
    pub color: Option<ColorChoice>,

    /// Config file to use instead of ./difftree.yaml
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Canonical key of a path to leave out, e.g. "['metadata', 'generated']"
    #[clap(long = "exclude-path", short = 'e')]
    pub exclude_paths: Vec<String>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["difftree", "old.yaml", "new.yaml"]).unwrap();
        assert_eq!(cli.before, PathBuf::from("old.yaml"));
        assert_eq!(cli.after, PathBuf::from("new.yaml"));
        assert_eq!(cli.format, None);
        assert_eq!(cli.color, None);
        assert!(cli.exclude_paths.is_empty());
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn every_flag() {
        let cli = Cli::try_parse_from([
            "difftree",
            "a.json",
            "b.json",
            "-f",
            "summary",
            "--color",
            "never",
            "--config",
            "custom.yaml",
            "-e",
            "['a']",
            "--exclude-path",
            "['b', 0]",
            "-l",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Summary));
        assert_eq!(cli.color, Some(ColorChoice::Never));
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert_eq!(cli.exclude_paths, vec!["['a']", "['b', 0]"]);
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn both_documents_are_required() {
        assert!(Cli::try_parse_from(["difftree", "only.yaml"]).is_err());
    }
}
