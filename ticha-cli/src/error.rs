use std::path::PathBuf;
use thiserror::Error;
use ticha_config::ConfigError;
use ticha_magic::{ConvertError, ExportError, FormatError, StylesheetError};
use ticha_parser::{ParseError, TreeError};

/// Anything a subcommand can fail with. `main` prints it and exits with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("missing required argument <{0}>")]
    MissingArgument(&'static str),

    #[error("no command given")]
    MissingCommand,

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Stylesheet(#[from] StylesheetError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Outline(#[from] TreeError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Convert(#[from] ConvertError),
}
