use crate::error::FormatError;
use crate::format::Format;
use crate::formats::html::serialize_to_html;
use ticha_parser::Element;

const TEMPLATE: &str = include_str!("../templates/preview.html");

/// A standalone page that renders converted text the way the Ticha site does, popovers
/// included. For checking a conversion in a browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct PreviewFormat;

impl Format for PreviewFormat {
    fn name(&self) -> &str {
        "preview"
    }

    fn description(&self) -> &str {
        "HTML inside the Ticha preview page"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html"]
    }

    fn serialize(&self, root: &Element) -> Result<String, FormatError> {
        let content = serialize_to_html(root)?;
        Ok(TEMPLATE.replacen("{content}", &content, 1))
    }
}
