use crate::error::FormatError;
use crate::format::Format;
use ticha_parser::{xml, Element};

#[derive(Debug, Default, Clone, Copy)]
pub struct XmlFormat;

impl Format for XmlFormat {
    fn name(&self) -> &str {
        "xml"
    }

    fn description(&self) -> &str {
        "XML serialization of the element tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["xml", "xhtml"]
    }

    fn serialize(&self, root: &Element) -> Result<String, FormatError> {
        Ok(xml::to_string(root)?)
    }
}
