//! Reading FLEx interlinear exports and writing the compact JSON form.
//!
//! FieldWorks Language Explorer exports glossed texts as XML:
//!
//!     <document>
//!       <interlinear-text>
//!         <item type="title-abbreviation">Levanto 1.2</item>
//!         <paragraphs><paragraph><phrases>
//!           <word>
//!             <words><word><item type="txt">tobi</item></word></words>
//!             <morphemes>
//!               <morph><item type="txt">tobi</item><item type="gls">one</item></morph>
//!             </morphemes>
//!             <item type="lit">one</item>
//!           </word>
//!         </phrases></paragraph></paragraphs>
//!       </interlinear-text>
//!     </document>
//!
//! The compact form keeps only what the gloss inserter needs, keyed by normalized word:
//!
//!     { "tobi": [ { "section": "levanto1.2",
//!                   "flex": { "name": "tobi", "morphs": ["tobi"],
//!                             "lex_glosses": ["one"], "en_gloss": "one" } } ] }

use crate::error::ExportError;
use crate::flex::dictionary::AnnotationRecord;
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use ticha_parser::xml::parse_str;
use ticha_parser::{normalize, Element};

/// One `<interlinear-text>` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexText {
    /// Lowercased title abbreviation with spaces removed; used as the section key.
    pub name: String,
    pub words: Vec<FlexWord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlexWord {
    pub name: String,
    pub morphemes: Vec<String>,
    pub glosses: Vec<String>,
    pub literal_translation: String,
}

impl FlexWord {
    pub fn to_record(&self) -> AnnotationRecord {
        AnnotationRecord {
            headword: self.name.clone(),
            morphemes: self.morphemes.clone(),
            glosses: self.glosses.clone(),
            literal_translation: self.literal_translation.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactEntry {
    pub section: String,
    pub flex: AnnotationRecord,
}

/// Normalized word → every annotation of that word, in export order.
pub type CompactExport = IndexMap<String, Vec<CompactEntry>>;

/// Read the blocks of a FLEx interlinear XML export.
pub fn read_flex_xml(src: &str) -> Result<Vec<FlexText>, ExportError> {
    let root = parse_str(src)?;
    let mut texts = Vec::new();
    for (index, block) in root.children_named("interlinear-text").enumerate() {
        let title = find_item(block, "title-abbreviation")
            .ok_or(ExportError::MissingTitle { index })?;
        let name: String = title
            .text_content()
            .to_lowercase()
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        let words: Vec<FlexWord> = block
            .descendants_named("phrases")
            .flat_map(|phrases| phrases.children_named("word"))
            .map(read_word)
            .collect();
        debug!("FLEx block '{}' has {} words", name, words.len());
        texts.push(FlexText { name, words });
    }
    Ok(texts)
}

fn read_word(word: &Element) -> FlexWord {
    let name = word
        .children_named("words")
        .flat_map(|words| words.children_named("word"))
        .flat_map(|inner| inner.children_named("item"))
        .map(Element::text_content)
        .collect::<Vec<_>>()
        .join(" ");
    FlexWord {
        name,
        morphemes: morph_items(word, "txt"),
        glosses: morph_items(word, "gls"),
        literal_translation: find_item(word, "lit")
            .map(Element::text_content)
            .unwrap_or_default(),
    }
}

/// First `item` descendant with the given `type`.
fn find_item<'a>(parent: &'a Element, item_type: &str) -> Option<&'a Element> {
    parent
        .descendants_named("item")
        .find(|item| item.find_attr("type") == Some(item_type))
}

/// Texts of every `morph/item` with the given `type`; empty items give `""`.
fn morph_items(word: &Element, item_type: &str) -> Vec<String> {
    word.descendants_named("morph")
        .flat_map(|morph| morph.children_named("item"))
        .filter(|item| item.find_attr("type") == Some(item_type))
        .map(Element::text_content)
        .collect()
}

/// Group every word of every block under its normalized spelling.
pub fn to_compact(texts: &[FlexText]) -> CompactExport {
    let mut export = CompactExport::new();
    for text in texts {
        for word in &text.words {
            let key = normalize(&word.name);
            if key.is_empty() {
                continue;
            }
            export.entry(key).or_default().push(CompactEntry {
                section: text.name.clone(),
                flex: word.to_record(),
            });
        }
    }
    export
}

/// Serialize the compact export with one-space indentation.
pub fn to_json_string(export: &CompactExport) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    export.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|err| {
        ExportError::Json(<serde_json::Error as serde::ser::Error>::custom(err))
    })
}

/// Convert a FLEx XML export file to a compact JSON file. Returns the number of distinct
/// words written.
pub fn convert_flex_file(input: &Path, output: &Path) -> Result<usize, ExportError> {
    let src = std::fs::read_to_string(input).map_err(|source| ExportError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let export = to_compact(&read_flex_xml(&src)?);
    let json = to_json_string(&export)?;
    std::fs::write(output, json).map_err(|source| ExportError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    info!(
        "wrote {} words from {} to {}",
        export.len(),
        input.display(),
        output.display()
    );
    Ok(export.len())
}
