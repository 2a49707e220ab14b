//! # ticha
//!
//! Converts TEI transcriptions of colonial Zapotec manuscripts into the paginated, glossed
//! HTML published by the Ticha project.
//!
//! The work happens in the member crates; this crate puts them under one name:
//!
//!     ticha-parser   element trees, the structural event stream, XML in and out
//!     ticha-magic    stylesheet, pager, FLEx glosses, outline, output formats
//!     ticha-config   layered TOML configuration
//!     ticha-cli      the `ticha` binary
//!
//! A conversion from TEI text to HTML:
//!
//! ```ignore
//! use ticha::{convert_tei_data, ConvertOptions, GlossDictionary, TeiStylesheet};
//!
//! let dictionary = GlossDictionary::load("flex_export.json")?;
//! let options = ConvertOptions::new("cordova_arte");
//! let html = convert_tei_data(&tei, &TeiStylesheet, &options, Some(&dictionary))?;
//! ```

pub use ticha_magic::*;
pub use ticha_parser as parser;
pub use ticha_parser::{normalize, tag_matches, Element, EventSink};
