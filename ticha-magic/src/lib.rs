//! TEI → paginated, glossed HTML for the Ticha project
//!
//!     Ticha publishes transcriptions of colonial Zapotec manuscripts. The transcriptions are TEI;
//!     the site shows one printed page at a time, with FLEx glosses in popovers over every
//!     Zapotec word. This crate does that conversion.
//!
//! Architecture
//!
//!     Every pass but the stylesheet is an event rewriter built on ticha-parser's EventSink:
//!
//!     - stylesheet: TEI → pseudo-HTML (HTML that still has TEI's pb/cb/lb markers)
//!     - pager: pseudo-HTML → one div.printed-text-page per printed page, columns re-nested
//!     - flex: wraps each <mark> in a popover with its FLEx analysis
//!     - outline: a nested table of contents built from the TEI div ids
//!
//!     pipeline.rs chains them; formats turn the final tree into xml, html or a preview page.
//!
//!     This is a pure lib: nothing here reads the environment or prints. Files are only touched
//!     by GlossDictionary::load, convert_flex_file and publish, all on explicit paths.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── pager.rs                # TEIPager
//!     ├── outline.rs              # OutlineBuilder
//!     ├── pipeline.rs             # generate_html, convert_tei_data
//!     ├── stylesheet
//!     │   ├── preprocess.rs       # <choice> whitespace cleanup
//!     │   └── tei.rs              # built-in TEI mapping
//!     ├── flex
//!     │   ├── dictionary.rs       # GlossDictionary
//!     │   ├── export.rs           # FLEx XML → compact JSON
//!     │   └── inserter.rs         # FlexInserter
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry
//!     ├── publish.rs
//!     ├── formats                 # xml, html, preview
//!     └── templates/preview.html
//!
//! Testing
//!
//!     Unit tests sit next to the code. tests/ runs the pipeline end to end over the documents
//!     in tests/fixtures.

pub mod error;
pub mod flex;
pub mod format;
pub mod formats;
pub mod outline;
pub mod pager;
pub mod pipeline;
pub mod publish;
pub mod registry;
pub mod stylesheet;

pub use error::{
    ConvertError, ExportError, FlexError, FormatError, PagerError, StylesheetError,
};
pub use flex::{insert_glosses, AnnotationRecord, FlexInserter, GlossDictionary, GlossStats};
pub use format::Format;
pub use outline::{generate_outline, OutlineBuilder, OutlineOptions};
pub use pager::{paginate, ElementRole, Pager};
pub use pipeline::{convert_tei_data, generate_html, outline_tei_data, Conversion, ConvertOptions};
pub use publish::{publish, PublishArtifact, PublishResult, PublishSpec};
pub use registry::FormatRegistry;
pub use stylesheet::{
    preprocess_xml, stylesheet_by_name, AbbrChoice, Passthrough, SpellChoice, Stylesheet,
    StylesheetParams, TeiStylesheet,
};
