//! The built-in TEI → pseudo-HTML mapping.
//!
//! | TEI                          | pseudo-HTML                       |
//! |------------------------------|-----------------------------------|
//! | `body`                       | `body` (the output root)          |
//! | `choice`                     | the selected alternative's content|
//! | `lb`                         | `br`                              |
//! | `pb`, `cb`                   | kept, with `n` and `type`         |
//! | `div xml:id=… type=…`        | `div id=… class=…`                |
//! | `p`                          | `p`                               |
//! | `head`                       | `h3`                              |
//! | `hi rend=x`                  | `span class=x`                    |
//! | any element, `xml:lang=zap…` | `mark`                            |
//! | `note`                       | `span class="note"`               |
//! | anything else                | `span class="tei-<name>"`         |
//!
//! Everything outside `body` (the header, front and back matter) is dropped.

use super::{AbbrChoice, SpellChoice, Stylesheet, StylesheetParams};
use crate::error::StylesheetError;
use log::debug;
use ticha_parser::tags::local_name;
use ticha_parser::{Element, Node};

#[derive(Debug, Clone, Copy, Default)]
pub struct TeiStylesheet;

impl Stylesheet for TeiStylesheet {
    fn name(&self) -> &str {
        "tei"
    }

    fn transform(
        &self,
        root: &Element,
        params: &StylesheetParams,
    ) -> Result<Element, StylesheetError> {
        let body = if root.is("body") {
            root
        } else {
            root.descendants_named("body")
                .next()
                .ok_or(StylesheetError::MissingBody)?
        };
        let mut out = Element::new("body");
        convert_children(body, params, &mut out);
        debug!(
            "stylesheet: {} spelling, {} abbreviations",
            params.spellchoice, params.abbrchoice
        );
        Ok(out)
    }
}

fn convert_children(source: &Element, params: &StylesheetParams, out: &mut Element) {
    for child in &source.children {
        match child {
            Node::Text(text) => out.push_text(text.as_str()),
            Node::Element(element) => convert(element, params, out),
        }
    }
}

fn convert(element: &Element, params: &StylesheetParams, out: &mut Element) {
    if element.is("choice") {
        if let Some(chosen) = choose(element, params) {
            convert_children(chosen, params, out);
        }
        return;
    }
    let mut mapped = map_element(element);
    convert_children(element, params, &mut mapped);
    out.push_child(mapped);
}

/// The alternative of a `<choice>` to show.
fn choose<'a>(choice: &'a Element, params: &StylesheetParams) -> Option<&'a Element> {
    if let Some(orig) = choice.child("orig") {
        let reg = params.spellchoice.reg_type().and_then(|reg_type| {
            choice
                .children_named("reg")
                .find(|reg| reg.find_attr("type") == Some(reg_type))
        });
        return reg.or(Some(orig));
    }
    if let Some(abbr) = choice.child("abbr") {
        return match params.abbrchoice {
            AbbrChoice::Abbr => Some(abbr),
            AbbrChoice::Expan => choice.child("expan").or(Some(abbr)),
        };
    }
    if params.spellchoice != SpellChoice::Orig {
        if let Some(reg) = choice.child("reg") {
            return Some(reg);
        }
    }
    choice.child_elements().next()
}

/// The empty output element for `element`; its children are converted separately.
fn map_element(element: &Element) -> Element {
    let copy = |mut out: Element, keys: &[&str]| {
        for key in keys {
            if let Some(value) = element.find_attr(key) {
                out = out.with_attr(*key, value);
            }
        }
        out
    };

    if element.is("lb") {
        return Element::new("br");
    }
    if element.is("pb") || element.is("cb") {
        return copy(Element::new(local_name(&element.name)), &["n", "type"]);
    }
    if element.is("div") {
        let mut div = copy(Element::new("div"), &["id"]);
        if let Some(class) = element.find_attr("type") {
            div = div.with_attr("class", class);
        }
        return div;
    }
    if element.is("p") {
        return Element::new("p");
    }
    if element.is("head") {
        return Element::new("h3");
    }
    if element
        .find_attr("lang")
        .is_some_and(|lang| lang.starts_with("zap"))
    {
        return Element::new("mark");
    }
    if element.is("hi") {
        return match element.find_attr("rend") {
            Some(rend) => Element::new("span").with_attr("class", rend),
            None => Element::new("span"),
        };
    }
    if element.is("note") {
        return Element::new("span").with_attr("class", "note");
    }
    Element::new("span").with_attr("class", format!("tei-{}", local_name(&element.name)))
}
