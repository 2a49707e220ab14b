//! Built-in output formats.
//!
//!     xml       well-formed XML through quick-xml; empty elements self-close
//!     html      HTML5 through html5ever; `<br>` and friends stay void
//!     preview   the html output inside a standalone Ticha page with popover scripts

pub mod html;
pub mod preview;
pub mod xml;

pub use html::HtmlFormat;
pub use preview::PreviewFormat;
pub use xml::XmlFormat;
