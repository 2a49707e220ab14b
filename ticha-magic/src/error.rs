//! Error types for the conversion passes.
//!
//! Every pass is fail-fast: the first error aborts it and no partial tree is returned.
//! Dictionary misses are not errors; they only show up in [`crate::flex::GlossStats`].

use std::path::PathBuf;
use thiserror::Error;
use ticha_parser::{ParseError, TreeError, WriteError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PagerError {
    #[error("{source} on page {page}, line {line}")]
    Structure {
        #[source]
        source: TreeError,
        page: u32,
        line: u32,
    },

    #[error("column break (<cb n={n:?}/>) must be inside a container: page {page}, line {line}")]
    ColumnBreakOutsideContainer {
        n: Option<String>,
        page: u32,
        line: u32,
    },

    #[error("column section still open at </{tag}>: page {page}, line {line}")]
    UnclosedColumns { tag: String, page: u32, line: u32 },

    #[error("<{tag}> found outside of <body>")]
    MarkerOutsideBody { tag: String },

    #[error("nested <body>: page {page}, line {line}")]
    NestedBody { page: u32, line: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlexError {
    #[error("{source} in section {section:?}")]
    Structure {
        #[source]
        source: TreeError,
        section: String,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid FLEx JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid FLEx XML: {0}")]
    Xml(#[from] ParseError),

    #[error("<interlinear-text> number {index} has no title-abbreviation item")]
    MissingTitle { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StylesheetError {
    #[error("TEI document has no <body>")]
    MissingBody,

    #[error("unknown stylesheet '{0}'")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    #[error("serialization failed: {0}")]
    SerializationError(String),

    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<WriteError> for FormatError {
    fn from(err: WriteError) -> Self {
        FormatError::SerializationError(err.0)
    }
}

/// Any error from a full conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Stylesheet(#[from] StylesheetError),

    #[error(transparent)]
    Pager(#[from] PagerError),

    #[error(transparent)]
    Flex(#[from] FlexError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Structure(#[from] TreeError),
}
