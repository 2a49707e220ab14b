//! Turning a TEI document into the pseudo-HTML the paginator consumes.
//!
//! Pseudo-HTML is HTML that still carries TEI's `pb`, `cb` and `lb` markers. A [`Stylesheet`]
//! maps the TEI vocabulary onto it; [`preprocess_xml`] cleans up the raw text first.

pub mod preprocess;
pub mod tei;

use crate::error::StylesheetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ticha_parser::Element;

pub use preprocess::preprocess_xml;
pub use tei::TeiStylesheet;

/// Which spelling of a `<choice>` to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpellChoice {
    /// The manuscript spelling.
    #[default]
    Orig,
    /// Regularized to Spanish orthography.
    RegSpanish,
    /// Regularized word spacing.
    RegSpacing,
}

impl SpellChoice {
    pub const ALL: [SpellChoice; 3] = [Self::Orig, Self::RegSpanish, Self::RegSpacing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orig => "orig",
            Self::RegSpanish => "reg-spanish",
            Self::RegSpacing => "reg-spacing",
        }
    }

    /// The `type` of the `<reg>` this choice selects, if any.
    fn reg_type(&self) -> Option<&'static str> {
        match self {
            Self::Orig => None,
            Self::RegSpanish => Some("spanish"),
            Self::RegSpacing => Some("spacing"),
        }
    }
}

/// Whether abbreviations are shown as written or expanded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AbbrChoice {
    #[default]
    Abbr,
    Expan,
}

impl AbbrChoice {
    pub const ALL: [AbbrChoice; 2] = [Self::Abbr, Self::Expan];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Abbr => "abbr",
            Self::Expan => "expan",
        }
    }
}

macro_rules! choice_text_impls {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|choice| choice.as_str() == s)
                    .ok_or_else(|| format!("unknown {} '{}'", $what, s))
            }
        }
    };
}

choice_text_impls!(SpellChoice, "spelling choice");
choice_text_impls!(AbbrChoice, "abbreviation choice");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylesheetParams {
    #[serde(default)]
    pub spellchoice: SpellChoice,
    #[serde(default)]
    pub abbrchoice: AbbrChoice,
}

/// A TEI → pseudo-HTML transformation.
pub trait Stylesheet: Send + Sync {
    fn name(&self) -> &str;

    fn transform(
        &self,
        root: &Element,
        params: &StylesheetParams,
    ) -> Result<Element, StylesheetError>;
}

/// For input that is already pseudo-HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Stylesheet for Passthrough {
    fn name(&self) -> &str {
        "none"
    }

    fn transform(&self, root: &Element, _: &StylesheetParams) -> Result<Element, StylesheetError> {
        Ok(root.clone())
    }
}

pub const STYLESHEET_NAMES: [&str; 2] = ["tei", "none"];

pub fn stylesheet_by_name(name: &str) -> Result<Box<dyn Stylesheet>, StylesheetError> {
    match name {
        "tei" => Ok(Box::new(TeiStylesheet)),
        "none" => Ok(Box::new(Passthrough)),
        other => Err(StylesheetError::Unknown(other.to_string())),
    }
}
