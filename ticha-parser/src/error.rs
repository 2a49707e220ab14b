//! Error types for tree building and XML reading.

use thiserror::Error;

/// A structural error raised while turning events into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("mismatched close tag </{found}>: last open tag is <{expected}> (open stack: {stack:?})")]
    MismatchedClose {
        found: String,
        expected: String,
        stack: Vec<String>,
    },

    #[error("close tag </{0}> with no open element")]
    CloseWithoutOpen(String),

    #[error("unclosed elements at end of input: {0:?}")]
    Unclosed(Vec<String>),

    #[error("document has no root element")]
    Empty,

    #[error("second root element <{0}> after the document root was closed")]
    MultipleRoots(String),

    #[error("text outside the root element: {0:?}")]
    StrayText(String),
}

/// Errors raised while reading XML text into events.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("XML syntax error at byte {position}: {source}")]
    Xml {
        #[source]
        source: quick_xml::Error,
        position: u64,
    },

    #[error("invalid UTF-8 in tag or attribute name")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Error from [`crate::xml::stream`]: either the XML was bad or the sink refused an event.
#[derive(Debug, Error)]
pub enum StreamError<E> {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sink(E),
}

/// Writing a tree as XML failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to write XML: {0}")]
pub struct WriteError(pub String);
