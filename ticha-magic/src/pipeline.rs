//! The whole conversion: TEI text in, paginated and glossed HTML out.
//!
//!     preprocess_xml → parse → stylesheet → paginate → insert_glosses → format
//!
//! Gloss insertion only runs when a dictionary is given.

use crate::error::ConvertError;
use crate::flex::{insert_glosses, GlossDictionary, GlossStats};
use crate::outline::{generate_outline, OutlineOptions};
use crate::pager::paginate;
use crate::registry::FormatRegistry;
use crate::stylesheet::{preprocess_xml, Stylesheet, StylesheetParams};
use log::{debug, info};
use ticha_parser::xml::parse_str;
use ticha_parser::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Text id, e.g. `levanto_arte`. Added to every page's class.
    pub text: String,
    pub params: StylesheetParams,
    /// Output format name in the [`FormatRegistry`].
    pub format: String,
}

impl ConvertOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: StylesheetParams::default(),
            format: "html".to_string(),
        }
    }

    pub fn with_params(mut self, params: StylesheetParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub html: Element,
    /// `None` when no dictionary was given.
    pub gloss_stats: Option<GlossStats>,
}

/// Apply the stylesheet, paginate, and insert glosses.
pub fn generate_html(
    tei_root: &Element,
    stylesheet: &dyn Stylesheet,
    options: &ConvertOptions,
    dictionary: Option<&GlossDictionary>,
) -> Result<Conversion, ConvertError> {
    let pseudo_html = stylesheet.transform(tei_root, &options.params)?;
    debug!("applied the {} stylesheet", stylesheet.name());
    let paginated = paginate(&pseudo_html, &options.text)?;
    let Some(dictionary) = dictionary else {
        return Ok(Conversion {
            html: paginated,
            gloss_stats: None,
        });
    };
    let (html, stats) = insert_glosses(&paginated, dictionary)?;
    Ok(Conversion {
        html,
        gloss_stats: Some(stats),
    })
}

/// [`generate_html`] from TEI text to serialized output.
pub fn convert_tei_data(
    xml_text: &str,
    stylesheet: &dyn Stylesheet,
    options: &ConvertOptions,
    dictionary: Option<&GlossDictionary>,
) -> Result<String, ConvertError> {
    let registry = FormatRegistry::with_defaults();
    let format = registry.get(&options.format)?;
    let tei_root = parse_str(&preprocess_xml(xml_text))?;
    let conversion = generate_html(&tei_root, stylesheet, options, dictionary)?;
    if let Some(stats) = conversion.gloss_stats {
        info!(
            "{}: glossed {} of {} word(s)",
            options.text,
            stats.total_words - stats.missed_words,
            stats.total_words
        );
    }
    Ok(format.serialize(&conversion.html)?)
}

/// The outline of a TEI text, serialized in `format`.
pub fn outline_tei_data(
    xml_text: &str,
    options: OutlineOptions,
    format: &str,
) -> Result<String, ConvertError> {
    let registry = FormatRegistry::with_defaults();
    let format = registry.get(format)?;
    let tei_root = parse_str(xml_text)?;
    let outline = generate_outline(&tei_root, options)?;
    Ok(format.serialize(&outline)?)
}
