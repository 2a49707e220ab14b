//! Page and column re-nesting.
//!
//! # The High-Level Concept
//!
//! In TEI a page break is a milestone: `<pb/>` can sit anywhere, in the middle of a paragraph
//! or a list item, and the page it starts has no element of its own. The reader-facing HTML
//! needs the opposite: every printed page is a `div.printed-text-page` container, and the
//! pages are siblings.
//!
//! The pager gets there in a single pass over the event stream. It remembers every element
//! currently open inside `<body>`. When a page break arrives it closes all of them
//! (innermost first), closes the current page container, opens the next one and then reopens
//! the same elements (outermost first, same attributes). Content after the break therefore
//! lands inside the new page, under an identical ancestor chain.
//!
//! Column breaks work the same way at a smaller scale: `<cb n="1"/>` opens a column section
//! and its first `div.col-xs-6`, any other `n` moves to the next column, and an empty `n` ends
//! the section. A section may only start directly inside a `div`. The column containers go on
//! the same stack as document elements, so a page break in the middle of a column section
//! carries the columns over to the next page.
//!
//! # Output Shape
//!
//!     <div>
//!       <div class="printed-text-page {text}" data-n="0" data-rvn="">...</div>
//!       <div class="printed-text-page {text}" data-n="1" data-rvn="{pb n}">...</div>
//!     </div>
//!
//! No `pb` or `cb` element survives. Page breaks with `type="pdf"` only mark a scan boundary
//! and are dropped without starting a page.

use crate::error::PagerError;
use log::debug;
use ticha_parser::{
    find_attr, tag_matches, walk, Attributes, Element, EventSink, TreeBuilder, TreeError,
};

const PAGE_CLASS: &str = "printed-text-page";
const COLUMN_CLASS: &str = "col-xs-6";

/// What the pager does with an element, decided from its tag alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    Body,
    PageBreak,
    ColumnBreak,
    LineBreak,
    Ordinary,
}

impl ElementRole {
    pub fn of(name: &str) -> Self {
        if tag_matches(name, "body") {
            ElementRole::Body
        } else if tag_matches(name, "pb") {
            ElementRole::PageBreak
        } else if tag_matches(name, "cb") {
            ElementRole::ColumnBreak
        } else if tag_matches(name, "br") {
            ElementRole::LineBreak
        } else {
            ElementRole::Ordinary
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Document,
    ColumnSection,
    Column,
}

#[derive(Debug, Clone)]
struct OpenTag {
    name: String,
    attrs: Attributes,
    origin: Origin,
}

/// Event sink that re-nests a pseudo-HTML stream into page and column containers and forwards
/// the result to `sink`.
pub struct Pager<S> {
    sink: S,
    text: String,
    stack: Vec<OpenTag>,
    page: u32,
    line: u32,
    in_body: bool,
}

impl<S: EventSink<Error = TreeError>> Pager<S> {
    pub fn new(text: impl Into<String>, sink: S) -> Self {
        Self {
            sink,
            text: text.into(),
            stack: Vec::new(),
            page: 0,
            line: 1,
            in_body: false,
        }
    }

    /// Number of counted page breaks seen so far.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Line on the current page, starting at 1.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Hand back the downstream sink. Fails if `<body>` was opened but never closed.
    pub fn finish(self) -> Result<S, PagerError> {
        if self.in_body {
            return Err(PagerError::Structure {
                source: TreeError::Unclosed(vec!["body".to_string()]),
                page: self.page,
                line: self.line,
            });
        }
        Ok(self.sink)
    }

    fn structure(&self, source: TreeError) -> PagerError {
        PagerError::Structure {
            source,
            page: self.page,
            line: self.line,
        }
    }

    fn emit_open(&mut self, name: &str, attrs: &Attributes) -> Result<(), PagerError> {
        self.sink
            .open_element(name, attrs)
            .map_err(|source| self.structure(source))
    }

    fn emit_close(&mut self, name: &str) -> Result<(), PagerError> {
        self.sink
            .close_element(name)
            .map_err(|source| self.structure(source))
    }

    fn page_attrs(&self, rvn: &str) -> Attributes {
        let class = if self.text.is_empty() {
            PAGE_CLASS.to_string()
        } else {
            format!("{} {}", PAGE_CLASS, self.text)
        };
        let mut attrs = Attributes::new();
        attrs.insert("class".to_string(), class);
        attrs.insert("data-n".to_string(), self.page.to_string());
        attrs.insert("data-rvn".to_string(), rvn.to_string());
        attrs
    }

    fn start_body(&mut self) -> Result<(), PagerError> {
        if self.in_body {
            return Err(PagerError::NestedBody {
                page: self.page,
                line: self.line,
            });
        }
        self.in_body = true;
        self.emit_open("div", &Attributes::new())?;
        let attrs = self.page_attrs("");
        self.emit_open("div", &attrs)
    }

    fn end_body(&mut self) -> Result<(), PagerError> {
        if self.stack.iter().any(|tag| tag.origin != Origin::Document) {
            return Err(PagerError::UnclosedColumns {
                tag: "body".to_string(),
                page: self.page,
                line: self.line,
            });
        }
        self.in_body = false;
        self.emit_close("div")?;
        self.emit_close("div")
    }

    fn page_break(&mut self, rvn: &str) -> Result<(), PagerError> {
        self.line = 1;
        self.page += 1;
        for tag in self.stack.iter().rev() {
            self.sink
                .close_element(&tag.name)
                .map_err(|source| self.structure(source))?;
        }
        self.emit_close("div")?;
        let attrs = self.page_attrs(rvn);
        self.emit_open("div", &attrs)?;
        for tag in &self.stack {
            self.sink
                .open_element(&tag.name, &tag.attrs)
                .map_err(|source| self.structure(source))?;
        }
        debug!("page {} begins (rvn {:?})", self.page, rvn);
        Ok(())
    }

    fn column_break(&mut self, n: Option<&str>) -> Result<(), PagerError> {
        let container = match n {
            Some("1") => self.stack.last().is_some_and(|tag| tag_matches(&tag.name, "div")),
            _ => matches!(self.stack.last(), Some(tag) if tag.origin == Origin::Column),
        };
        if !container {
            return Err(PagerError::ColumnBreakOutsideContainer {
                n: n.map(str::to_string),
                page: self.page,
                line: self.line,
            });
        }
        if n == Some("1") {
            self.push_column_container("div", Attributes::new(), Origin::ColumnSection)?;
            return self.open_column();
        }
        self.pop_column_container()?;
        if n == Some("") {
            self.pop_column_container()
        } else {
            self.open_column()
        }
    }

    fn open_column(&mut self) -> Result<(), PagerError> {
        let mut attrs = Attributes::new();
        attrs.insert("class".to_string(), COLUMN_CLASS.to_string());
        self.push_column_container("div", attrs, Origin::Column)
    }

    fn push_column_container(
        &mut self,
        name: &str,
        attrs: Attributes,
        origin: Origin,
    ) -> Result<(), PagerError> {
        self.emit_open(name, &attrs)?;
        self.stack.push(OpenTag {
            name: name.to_string(),
            attrs,
            origin,
        });
        Ok(())
    }

    fn pop_column_container(&mut self) -> Result<(), PagerError> {
        match self.stack.pop() {
            Some(tag) => self.emit_close(&tag.name),
            None => Err(PagerError::ColumnBreakOutsideContainer {
                n: Some(String::new()),
                page: self.page,
                line: self.line,
            }),
        }
    }

    fn marker_outside_body(&self, name: &str) -> Result<(), PagerError> {
        if self.in_body {
            Ok(())
        } else {
            Err(PagerError::MarkerOutsideBody {
                tag: name.to_string(),
            })
        }
    }
}

impl<S: EventSink<Error = TreeError>> EventSink for Pager<S> {
    type Error = PagerError;

    fn open_element(&mut self, name: &str, attrs: &Attributes) -> Result<(), PagerError> {
        match ElementRole::of(name) {
            ElementRole::Body => self.start_body(),
            ElementRole::PageBreak => {
                self.marker_outside_body(name)?;
                if find_attr(attrs, "type") == Some("pdf") {
                    return Ok(());
                }
                let rvn = find_attr(attrs, "n").unwrap_or("");
                self.page_break(rvn)
            }
            ElementRole::ColumnBreak => {
                self.marker_outside_body(name)?;
                self.column_break(find_attr(attrs, "n"))
            }
            role => {
                if role == ElementRole::LineBreak {
                    self.line += 1;
                }
                if self.in_body {
                    self.stack.push(OpenTag {
                        name: name.to_string(),
                        attrs: attrs.clone(),
                        origin: Origin::Document,
                    });
                }
                self.emit_open(name, attrs)
            }
        }
    }

    fn close_element(&mut self, name: &str) -> Result<(), PagerError> {
        match ElementRole::of(name) {
            ElementRole::Body => self.end_body(),
            ElementRole::PageBreak | ElementRole::ColumnBreak => Ok(()),
            ElementRole::LineBreak | ElementRole::Ordinary => {
                if self.in_body {
                    if let Some(top) = self.stack.last() {
                        if top.origin != Origin::Document {
                            return Err(PagerError::UnclosedColumns {
                                tag: name.to_string(),
                                page: self.page,
                                line: self.line,
                            });
                        }
                        self.stack.pop();
                    }
                }
                self.emit_close(name)
            }
        }
    }

    fn text(&mut self, content: &str) -> Result<(), PagerError> {
        self.sink
            .text(content)
            .map_err(|source| self.structure(source))
    }
}

/// Re-nest `root` into page containers for the text `text`.
///
/// `text` becomes a second class on every page container; pass `""` for none.
pub fn paginate(root: &Element, text: &str) -> Result<Element, PagerError> {
    let mut pager = Pager::new(text, TreeBuilder::new());
    walk(root, &mut pager)?;
    let (page, line) = (pager.page(), pager.line());
    debug!("paginated '{}' into {} page(s)", text, page + 1);
    pager
        .finish()?
        .finish()
        .map_err(|source| PagerError::Structure { source, page, line })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use ticha_parser::xml::{parse_str, to_string};
    use ticha_parser::{replay, Event, EventRecorder};

    fn run(src: &str, text: &str) -> Result<String, PagerError> {
        let root = parse_str(src).unwrap();
        let paged = paginate(&root, text)?;
        Ok(to_string(&paged).unwrap())
    }

    #[test]
    fn test_page_break_inside_paragraph() {
        insta::assert_snapshot!(
            run(r#"<body><p>A<pb n="1"/>B</p></body>"#, "").unwrap(),
            @r#"<div><div class="printed-text-page" data-n="0" data-rvn=""><p>A</p></div><div class="printed-text-page" data-n="1" data-rvn="1"><p>B</p></div></div>"#
        );
    }

    #[test]
    fn test_reopened_tags_keep_attributes() {
        let html = run(
            r#"<body><div id="levanto1.2" class="chapter"><p class="x">one<pb n="2v"/>two</p></div></body>"#,
            "levanto_arte",
        )
        .unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<div><div class="printed-text-page levanto_arte" data-n="0" data-rvn="">"#,
                r#"<div id="levanto1.2" class="chapter"><p class="x">one</p></div></div>"#,
                r#"<div class="printed-text-page levanto_arte" data-n="1" data-rvn="2v">"#,
                r#"<div id="levanto1.2" class="chapter"><p class="x">two</p></div></div></div>"#,
            )
        );
    }

    #[test]
    fn test_pdf_page_break_is_dropped() {
        let html = run(r#"<body><p>A<pb type="pdf" n="9"/>B</p></body>"#, "").unwrap();
        assert_eq!(
            html,
            r#"<div><div class="printed-text-page" data-n="0" data-rvn=""><p>AB</p></div></div>"#
        );
    }

    #[test]
    fn test_page_break_without_n_has_empty_rvn() {
        let html = run("<body>A<pb/>B</body>", "").unwrap();
        assert!(html.contains(r#"data-n="1" data-rvn="">B</div>"#));
    }

    #[test]
    fn test_columns() {
        insta::assert_snapshot!(
            run(r#"<body><div><cb n="1"/>L<cb n="2"/>R<cb n=""/></div></body>"#, "").unwrap(),
            @r#"<div><div class="printed-text-page" data-n="0" data-rvn=""><div><div><div class="col-xs-6">L</div><div class="col-xs-6">R</div></div></div></div></div>"#
        );
    }

    #[test]
    fn test_page_break_inside_columns_reopens_them() {
        let html = run(
            r#"<body><div><cb n="1"/>L<pb n="3"/>M<cb n=""/></div></body>"#,
            "",
        )
        .unwrap();
        assert_eq!(
            html,
            concat!(
                r#"<div><div class="printed-text-page" data-n="0" data-rvn="">"#,
                r#"<div><div><div class="col-xs-6">L</div></div></div></div>"#,
                r#"<div class="printed-text-page" data-n="1" data-rvn="3">"#,
                r#"<div><div><div class="col-xs-6">M</div></div></div></div></div>"#,
            )
        );
    }

    #[rstest]
    #[case(r#"<body><cb n="2"/></body>"#, Some("2"))]
    #[case(r#"<body><div><cb n=""/></div></body>"#, Some(""))]
    #[case(r#"<body><div><cb n="1"/><p><cb n="2"/></p></div></body>"#, Some("2"))]
    #[case(r#"<body><p><cb/></p></body>"#, None)]
    #[case(r#"<body><cb n="1"/>L</body>"#, Some("1"))]
    #[case(r#"<body><div><p><cb n="1"/>L</p></div></body>"#, Some("1"))]
    fn test_column_break_outside_container(#[case] src: &str, #[case] n: Option<&str>) {
        assert_eq!(
            run(src, ""),
            Err(PagerError::ColumnBreakOutsideContainer {
                n: n.map(str::to_string),
                page: 0,
                line: 1,
            })
        );
    }

    #[test]
    fn test_unfinished_column_section() {
        assert_eq!(
            run(r#"<body><div><cb n="1"/>L</div></body>"#, ""),
            Err(PagerError::UnclosedColumns {
                tag: "div".to_string(),
                page: 0,
                line: 1,
            })
        );
    }

    #[test]
    fn test_markers_outside_body() {
        assert_eq!(
            run(r#"<html><pb n="1"/><body/></html>"#, ""),
            Err(PagerError::MarkerOutsideBody {
                tag: "pb".to_string()
            })
        );
        assert!(matches!(
            run("<body><div><body/></div></body>", ""),
            Err(PagerError::NestedBody { .. })
        ));
    }

    #[test]
    fn test_elements_outside_body_pass_through() {
        let html = run("<html><head><title>t</title></head><body>x</body></html>", "").unwrap();
        assert_eq!(
            html,
            concat!(
                "<html><head><title>t</title></head>",
                r#"<div><div class="printed-text-page" data-n="0" data-rvn="">x</div></div></html>"#,
            )
        );
    }

    #[test]
    fn test_line_and_page_counters() {
        let events = vec![
            Event::open("body"),
            Event::open("p"),
            Event::text("a"),
            Event::open("br"),
            Event::close("br"),
            Event::open("br"),
            Event::close("br"),
            Event::open_with("pb", &[("type", "pdf")]),
            Event::close("pb"),
        ];
        let mut pager = Pager::new("", EventRecorder::new());
        replay(&events, &mut pager).unwrap();
        assert_eq!((pager.page(), pager.line()), (0, 3));

        replay(
            &[
                Event::open_with("pb", &[("n", "1r")]),
                Event::close("pb"),
                Event::open("br"),
                Event::close("br"),
            ],
            &mut pager,
        )
        .unwrap();
        assert_eq!((pager.page(), pager.line()), (1, 2));
    }

    #[test]
    fn test_role_dispatch_ignores_namespaces() {
        assert_eq!(ElementRole::of("tei:pb"), ElementRole::PageBreak);
        assert_eq!(
            ElementRole::of("{http://www.tei-c.org/ns/1.0}cb"),
            ElementRole::ColumnBreak
        );
        assert_eq!(ElementRole::of("body"), ElementRole::Body);
        assert_eq!(ElementRole::of("br"), ElementRole::LineBreak);
        assert_eq!(ElementRole::of("p"), ElementRole::Ordinary);
    }
}
