//! Format trait definition
//!
//! A format turns a finished element tree (paginated and annotated HTML, or an outline) into
//! the text written out. Formats are looked up by name in the
//! [`FormatRegistry`](crate::registry::FormatRegistry).

use crate::error::FormatError;
use ticha_parser::Element;

/// Trait for output formats
///
/// # Examples
///
/// ```ignore
/// struct Debug;
///
/// impl Format for Debug {
///     fn name(&self) -> &str {
///         "debug"
///     }
///
///     fn serialize(&self, root: &Element) -> Result<String, FormatError> {
///         Ok(format!("{:#?}", root))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "xml", "html", "preview")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// File extensions this format writes, preferred first
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    /// Serialize an element tree into text
    fn serialize(&self, root: &Element) -> Result<String, FormatError>;
}
