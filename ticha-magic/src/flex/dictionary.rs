//! Section-partitioned gloss dictionary.
//!
//! Glosses exported from FLEx are grouped by the section of the text they were glossed in.
//! The same spelling can mean different things in different sections, so the dictionary is
//! keyed by section first and by normalized word second.
//!
//! Lookup rules:
//!
//! 1. If the section has its own partition, the answer comes from that partition only. A miss
//!    there is a miss, even if a shorter section has the word.
//! 2. Otherwise the longest partition key that is a prefix of the section answers. Manuscript
//!    sections are often transcribed more finely (`2.3.1.4`) than they were glossed (`2.3`).

use crate::error::ExportError;
use crate::flex::export::{read_flex_xml, CompactExport, FlexText};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use ticha_parser::normalize;

/// Everything needed to render the popover for one word.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(rename = "name")]
    pub headword: String,
    /// Parallel to `glosses`.
    #[serde(rename = "morphs")]
    pub morphemes: Vec<String>,
    #[serde(rename = "lex_glosses")]
    pub glosses: Vec<String>,
    #[serde(rename = "en_gloss")]
    pub literal_translation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossDictionary {
    sections: HashMap<String, HashMap<String, AnnotationRecord>>,
}

impl GlossDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(section, word, record)` triples. Words are normalized, empty keys are
    /// skipped and the last record for a key wins.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String, AnnotationRecord)>,
    {
        let mut dictionary = Self::new();
        for (section, word, record) in entries {
            dictionary.insert(section, &word, record);
        }
        dictionary
    }

    /// Build from FLEx export blocks, one partition per block.
    pub fn from_texts(texts: &[FlexText]) -> Self {
        Self::from_entries(texts.iter().flat_map(|text| {
            text.words
                .iter()
                .map(move |word| (text.name.clone(), word.name.clone(), word.to_record()))
        }))
    }

    /// Build from the compact JSON export.
    pub fn from_compact(export: &CompactExport) -> Self {
        Self::from_entries(export.iter().flat_map(|(word, entries)| {
            entries
                .iter()
                .map(move |entry| (entry.section.clone(), word.clone(), entry.flex.clone()))
        }))
    }

    pub fn from_json_str(src: &str) -> Result<Self, ExportError> {
        let export: CompactExport = serde_json::from_str(src)?;
        Ok(Self::from_compact(&export))
    }

    pub fn from_flex_xml_str(src: &str) -> Result<Self, ExportError> {
        Ok(Self::from_texts(&read_flex_xml(src)?))
    }

    /// Load a dictionary file. `.json` files are read as the compact export, anything else as
    /// a FLEx interlinear XML export.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExportError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let dictionary = if is_json {
            Self::from_json_str(&src)?
        } else {
            Self::from_flex_xml_str(&src)?
        };
        info!(
            "{} words in {} sections of the FLEx dictionary {}",
            dictionary.len(),
            dictionary.section_count(),
            path.display()
        );
        Ok(dictionary)
    }

    fn insert(&mut self, section: String, word: &str, record: AnnotationRecord) {
        let key = normalize(word);
        if key.is_empty() {
            return;
        }
        self.sections.entry(section).or_default().insert(key, record);
    }

    /// Find the record for `word` as it appears in `section`.
    pub fn lookup(&self, section: &str, word: &str) -> Option<&AnnotationRecord> {
        let key = normalize(word);
        if let Some(partition) = self.sections.get(section) {
            return partition.get(&key);
        }
        self.sections
            .iter()
            .filter(|(name, _)| section.starts_with(name.as_str()))
            .max_by_key(|(name, _)| name.len())
            .and_then(|(_, partition)| partition.get(&key))
    }

    /// Total number of entries across all sections.
    pub fn len(&self) -> usize {
        self.sections.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flex::export::FlexWord;

    fn record(headword: &str) -> AnnotationRecord {
        AnnotationRecord {
            headword: headword.to_string(),
            morphemes: vec!["co".to_string(), "la".to_string()],
            glosses: vec!["POT".to_string(), "say".to_string()],
            literal_translation: "he will say".to_string(),
        }
    }

    fn entry(section: &str, word: &str, headword: &str) -> (String, String, AnnotationRecord) {
        (section.to_string(), word.to_string(), record(headword))
    }

    #[test]
    fn test_exact_section_never_falls_back() {
        let dictionary = GlossDictionary::from_entries([
            entry("2", "w", "from 2"),
            entry("2.3", "other", "from 2.3"),
        ]);
        assert_eq!(dictionary.lookup("2.3", "w"), None);
        assert_eq!(dictionary.lookup("2.3", "other").unwrap().headword, "from 2.3");
    }

    #[test]
    fn test_longest_prefix_answers_missing_section() {
        let dictionary = GlossDictionary::from_entries([
            entry("2", "w", "from 2"),
            entry("2.3", "w", "from 2.3"),
        ]);
        assert_eq!(dictionary.lookup("2.3.9", "w").unwrap().headword, "from 2.3");
        assert_eq!(dictionary.lookup("2.4", "w").unwrap().headword, "from 2");
        assert_eq!(dictionary.lookup("3", "w"), None);
        assert_eq!(dictionary.lookup("2.3.9", "absent"), None);
    }

    #[test]
    fn test_lookup_normalizes_the_word() {
        let dictionary = GlossDictionary::from_entries([entry("levanto1", "Cóla-ni", "colani")]);
        assert!(dictionary.lookup("levanto1", "co la[n]ni").is_some());
        assert!(dictionary.lookup("levanto1", "colaní").is_some());
        assert!(dictionary.lookup("levanto1", "  CO-LA-NI. ").is_some());
    }

    #[test]
    fn test_empty_keys_skipped_and_last_write_wins() {
        let dictionary = GlossDictionary::from_entries([
            entry("1", "?", "punctuation only"),
            entry("1", "xi", "first"),
            entry("1", "xí", "second"),
        ]);
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.lookup("1", "xi").unwrap().headword, "second");
    }

    #[test]
    fn test_from_texts_uses_block_names_as_sections() {
        let texts = vec![FlexText {
            name: "levanto1.1".to_string(),
            words: vec![FlexWord {
                name: "tobi".to_string(),
                morphemes: vec!["tobi".to_string()],
                glosses: vec!["one".to_string()],
                literal_translation: "one".to_string(),
            }],
        }];
        let dictionary = GlossDictionary::from_texts(&texts);
        assert_eq!(dictionary.sections().collect::<Vec<_>>(), vec!["levanto1.1"]);
        assert_eq!(
            dictionary.lookup("levanto1.1.2", "tobi").unwrap().glosses,
            vec!["one"]
        );
    }

    #[test]
    fn test_from_json_str() {
        let dictionary = GlossDictionary::from_json_str(
            r#"{
              "tobi": [
                {"section": "1", "flex": {"name": "tobi", "morphs": ["tobi"], "lex_glosses": ["one"], "en_gloss": "one"}},
                {"section": "2", "flex": {"name": "tobi", "morphs": [], "lex_glosses": [], "en_gloss": "a"}}
              ]
            }"#,
        )
        .unwrap();
        assert_eq!(dictionary.section_count(), 2);
        assert_eq!(dictionary.lookup("2", "tobi").unwrap().literal_translation, "a");
    }

    #[test]
    fn test_dictionary_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GlossDictionary>();
    }
}
