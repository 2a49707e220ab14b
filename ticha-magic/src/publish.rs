use crate::error::FormatError;
use crate::registry::FormatRegistry;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use ticha_parser::Element;

#[derive(Debug)]
pub struct PublishSpec<'a> {
    pub root: &'a Element,
    pub format: &'a str,
    pub output: Option<PathBuf>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(root: &'a Element, format: &'a str) -> Self {
        Self {
            root,
            format,
            output: None,
        }
    }

    pub fn with_output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output = Some(path.as_ref().to_path_buf());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PublishArtifact {
    InMemory(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishResult {
    pub artifact: PublishArtifact,
}

pub fn publish(spec: PublishSpec<'_>) -> Result<PublishResult, FormatError> {
    publish_with(&FormatRegistry::with_defaults(), spec)
}

pub fn publish_with(
    registry: &FormatRegistry,
    spec: PublishSpec<'_>,
) -> Result<PublishResult, FormatError> {
    let text = registry.serialize(spec.root, spec.format)?;
    debug!("serialized {} bytes as {}", text.len(), spec.format);
    write_or_return_text(text, spec.output)
}

fn write_or_return_text(
    text: String,
    output: Option<PathBuf>,
) -> Result<PublishResult, FormatError> {
    if let Some(path) = output {
        write_to_path(path, text.into_bytes()).map(|path| PublishResult {
            artifact: PublishArtifact::File(path),
        })
    } else {
        Ok(PublishResult {
            artifact: PublishArtifact::InMemory(text),
        })
    }
}

fn write_to_path(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf, FormatError> {
    match fs::write(&path, &bytes) {
        Ok(()) => Ok(path),
        Err(source) => Err(FormatError::Io { path, source }),
    }
}
