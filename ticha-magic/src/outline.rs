//! Table of contents for a TEI text.
//!
//! Sections are `<div>`s whose id starts with the text id: in `levanto_arte`, the div
//! `levanto_arte1.2.3` is section `1.2.3`. The section title is the text of its
//! `<head type="outline">`, and its page is the number of (non-pdf) page breaks seen so far.
//!
//! The outline is a nested list, one `ul` level per section depth:
//!
//!     <div class="index">
//!       <ul>
//!         <li><a href="…/levanto_arte/3/original">1 Prologo</a></li>
//!         <ul id="section1">
//!           <li><a href="…/levanto_arte/4/original">1.1 Licencia</a></li>
//!         </ul>
//!       </ul>
//!     </div>
//!
//! When a section is more than one level deeper than the previous one, the skipped levels get
//! a placeholder `li` holding the rest of the number.

use log::{debug, warn};
use ticha_parser::{
    find_attr, tag_matches, walk, Attributes, Element, EventSink, TreeBuilder, TreeError,
};

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://ticha.haverford.edu/en/texts/{text}/{page}/original";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineOptions {
    pub text: String,
    /// Page number before the first page break.
    pub first_page: u32,
    /// Link target for each section; `{text}` and `{page}` are substituted.
    pub url_template: String,
}

impl OutlineOptions {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            first_page: 0,
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
        }
    }

    pub fn with_first_page(mut self, first_page: u32) -> Self {
        self.first_page = first_page;
        self
    }

    pub fn with_url_template(mut self, url_template: impl Into<String>) -> Self {
        self.url_template = url_template.into();
        self
    }

    fn url(&self, page: u32) -> String {
        self.url_template
            .replace("{text}", &self.text)
            .replace("{page}", &page.to_string())
    }
}

#[derive(Debug)]
struct Section {
    number: Vec<String>,
    title: String,
    page: u32,
}

/// Event sink over a raw TEI document that builds its outline.
pub struct OutlineBuilder {
    builder: TreeBuilder,
    options: OutlineOptions,
    page: u32,
    in_progress: Option<Section>,
    in_title: bool,
    /// Number of the last written section; its length is the number of open `ul`s.
    number: Vec<String>,
}

impl OutlineBuilder {
    pub fn new(options: OutlineOptions) -> Result<Self, TreeError> {
        let mut builder = TreeBuilder::new();
        let mut index = Attributes::new();
        index.insert("class".to_string(), "index".to_string());
        builder.open_element("div", &index)?;
        builder.open_element("ul", &Attributes::new())?;
        Ok(Self {
            builder,
            page: options.first_page,
            options,
            in_progress: None,
            in_title: false,
            number: vec!["1".to_string()],
        })
    }

    pub fn finish(mut self) -> Result<Element, TreeError> {
        self.write_section()?;
        for _ in 0..self.number.len() {
            self.builder.close_element("ul")?;
        }
        self.builder.close_element("div")?;
        self.builder.finish()
    }

    fn start_section(&mut self, id: &str) -> Result<bool, TreeError> {
        let Some(rest) = id.strip_prefix(self.options.text.as_str()) else {
            warn!(
                "found a <div> id '{}' that does not start with the text id '{}'",
                id, self.options.text
            );
            return Ok(false);
        };
        let number = rest.split('.').map(str::to_string).collect();
        self.write_section()?;
        self.in_progress = Some(Section {
            number,
            title: String::new(),
            page: self.page,
        });
        Ok(true)
    }

    fn write_section(&mut self) -> Result<(), TreeError> {
        let Some(section) = self.in_progress.take() else {
            return Ok(());
        };
        let current = self.number.len();
        let next = section.number.len();
        let none = Attributes::new();
        if current > next {
            for _ in next..current {
                self.builder.close_element("ul")?;
            }
        } else if next > current {
            for i in current..next - 1 {
                self.builder.open_element("ul", &none)?;
                self.builder.open_element("li", &none)?;
                self.builder.text(&section.number[i..].join("."))?;
                self.builder.close_element("li")?;
            }
            let mut list = Attributes::new();
            list.insert("id".to_string(), format!("section{}", self.number.join(".")));
            self.builder.open_element("ul", &list)?;
        }

        let mut link = Attributes::new();
        link.insert("href".to_string(), self.options.url(section.page));
        self.builder.open_element("li", &none)?;
        self.builder.open_element("a", &link)?;
        self.builder
            .text(&format!("{} {}", section.number.join("."), section.title))?;
        self.builder.close_element("a")?;
        self.builder.close_element("li")?;
        debug!("outline section {:?} on page {}", section.number, section.page);
        self.number = section.number;
        Ok(())
    }
}

impl EventSink for OutlineBuilder {
    type Error = TreeError;

    fn open_element(&mut self, name: &str, attrs: &Attributes) -> Result<(), TreeError> {
        if tag_matches(name, "pb") {
            if find_attr(attrs, "type") != Some("pdf") {
                self.page += 1;
            }
        } else if tag_matches(name, "div") {
            for (key, value) in attrs {
                if key.ends_with("id") && self.start_section(value)? {
                    break;
                }
            }
        } else if tag_matches(name, "head") && find_attr(attrs, "type") == Some("outline") {
            self.in_title = true;
        }
        Ok(())
    }

    fn close_element(&mut self, name: &str) -> Result<(), TreeError> {
        if tag_matches(name, "head") {
            self.in_title = false;
        }
        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<(), TreeError> {
        if self.in_title {
            if let Some(section) = self.in_progress.as_mut() {
                section.title.push_str(content);
            }
        }
        Ok(())
    }
}

/// Build the outline of a raw TEI document.
pub fn generate_outline(root: &Element, options: OutlineOptions) -> Result<Element, TreeError> {
    let mut builder = OutlineBuilder::new(options)?;
    walk(root, &mut builder)?;
    builder.finish()
}
