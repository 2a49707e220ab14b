//! Gloss popovers for marked Zapotec words.
//!
//! Every Zapotec word in the paginated HTML sits in a `<mark>`. The inserter wraps each mark
//! in a popover span and, right after it, adds a hidden span with the word's FLEx analysis:
//!
//!     <span class="popover-markup inline">
//!       <mark>colani</mark>
//!       <span class="content hide inline">
//!         <table>
//!           <caption>cola ni</caption>
//!           <tr><td>co</td><td>la</td></tr>
//!           <tr><td>POT</td><td>say</td></tr>
//!           <td colspan="2">'he will say'</td>
//!         </table>
//!       </span>
//!     </span>
//!
//! The section used for the lookup is the `id` of the most recently opened `<div>`, with
//! `.0` collapsed to `.` (`2.01` becomes `2.1`). Words that are not in the dictionary still
//! get the hidden span, just empty, and are counted as missed.

use crate::error::FlexError;
use crate::flex::dictionary::{AnnotationRecord, GlossDictionary};
use log::info;
use std::ops::AddAssign;
use ticha_parser::{
    emit_scoped, find_attr, tag_matches, walk, Attributes, Element, EventSink, TreeBuilder,
    TreeError,
};

/// Word counts from one or more gloss insertion runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlossStats {
    pub total_words: usize,
    pub missed_words: usize,
}

impl AddAssign for GlossStats {
    fn add_assign(&mut self, other: Self) {
        self.total_words += other.total_words;
        self.missed_words += other.missed_words;
    }
}

fn class_attr(class: &str) -> Attributes {
    let mut attrs = Attributes::new();
    attrs.insert("class".to_string(), class.to_string());
    attrs
}

/// Event sink that adds gloss popovers and forwards everything to `sink`.
pub struct FlexInserter<'d, S> {
    sink: S,
    dictionary: &'d GlossDictionary,
    section: String,
    word: String,
    in_mark: bool,
    stats: GlossStats,
}

impl<'d, S: EventSink<Error = TreeError>> FlexInserter<'d, S> {
    pub fn new(dictionary: &'d GlossDictionary, sink: S) -> Self {
        Self {
            sink,
            dictionary,
            section: String::new(),
            word: String::new(),
            in_mark: false,
            stats: GlossStats::default(),
        }
    }

    pub fn stats(&self) -> GlossStats {
        self.stats
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn into_parts(self) -> (S, GlossStats) {
        (self.sink, self.stats)
    }

    fn structure(&self, source: TreeError) -> FlexError {
        FlexError::Structure {
            source,
            section: self.section.clone(),
        }
    }

    fn finish_word(&mut self) -> Result<(), TreeError> {
        let dictionary = self.dictionary;
        let record = dictionary.lookup(&self.section, &self.word);
        self.stats.total_words += 1;
        if record.is_none() {
            self.stats.missed_words += 1;
        }
        emit_scoped(
            &mut self.sink,
            "span",
            &class_attr("content hide inline"),
            |sink| match record {
                Some(record) => write_annotation(sink, record),
                None => Ok(()),
            },
        )
    }
}

fn write_annotation<S: EventSink + ?Sized>(
    sink: &mut S,
    record: &AnnotationRecord,
) -> Result<(), S::Error> {
    let none = Attributes::new();
    emit_scoped(sink, "table", &none, |sink| {
        emit_scoped(sink, "caption", &none, |sink| sink.text(&record.headword))?;
        let has_morphemes = record.morphemes.iter().any(|m| !m.is_empty());
        let has_glosses = record.glosses.iter().any(|g| !g.is_empty());
        if has_morphemes && has_glosses {
            write_row(sink, &record.morphemes)?;
            write_row(sink, &record.glosses)?;
        }
        let mut colspan = Attributes::new();
        colspan.insert("colspan".to_string(), record.morphemes.len().to_string());
        emit_scoped(sink, "td", &colspan, |sink| {
            sink.text(&format!("'{}'", record.literal_translation))
        })
    })
}

fn write_row<S: EventSink + ?Sized>(sink: &mut S, cells: &[String]) -> Result<(), S::Error> {
    let none = Attributes::new();
    emit_scoped(sink, "tr", &none, |sink| {
        for cell in cells {
            emit_scoped(sink, "td", &none, |sink| sink.text(cell))?;
        }
        Ok(())
    })
}

impl<'d, S: EventSink<Error = TreeError>> EventSink for FlexInserter<'d, S> {
    type Error = FlexError;

    fn open_element(&mut self, name: &str, attrs: &Attributes) -> Result<(), FlexError> {
        if tag_matches(name, "mark") {
            self.sink
                .open_element("span", &class_attr("popover-markup inline"))
                .map_err(|source| self.structure(source))?;
            self.in_mark = true;
            self.word.clear();
        } else if tag_matches(name, "div") {
            if let Some(id) = find_attr(attrs, "id").filter(|id| !id.is_empty()) {
                self.section = id.replace(".0", ".");
            }
        }
        self.sink
            .open_element(name, attrs)
            .map_err(|source| self.structure(source))
    }

    fn close_element(&mut self, name: &str) -> Result<(), FlexError> {
        self.sink
            .close_element(name)
            .map_err(|source| self.structure(source))?;
        if tag_matches(name, "mark") {
            if !self.word.is_empty() {
                self.finish_word()
                    .map_err(|source| self.structure(source))?;
            }
            self.sink
                .close_element("span")
                .map_err(|source| self.structure(source))?;
            self.in_mark = false;
            self.word.clear();
        }
        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<(), FlexError> {
        if self.in_mark {
            self.word.push_str(content);
        }
        self.sink
            .text(content)
            .map_err(|source| self.structure(source))
    }
}

/// Add gloss popovers to every `<mark>` in `root`.
pub fn insert_glosses(
    root: &Element,
    dictionary: &GlossDictionary,
) -> Result<(Element, GlossStats), FlexError> {
    let mut inserter = FlexInserter::new(dictionary, TreeBuilder::new());
    walk(root, &mut inserter)?;
    let section = inserter.section().to_string();
    let (builder, stats) = inserter.into_parts();
    let annotated = builder
        .finish()
        .map_err(|source| FlexError::Structure { source, section })?;
    info!(
        "Processed {} word(s), missed {}",
        stats.total_words, stats.missed_words
    );
    Ok((annotated, stats))
}
