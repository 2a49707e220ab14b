//! In-memory element tree.
//!
//! The tree only represents what the event stream can carry: elements with ordered
//! attributes, and text. Comments, processing instructions and doctypes are dropped when a
//! document is read.

use crate::tags::{find_attr, tag_matches};
use indexmap::IndexMap;

/// Ordered attribute map. Insertion order is kept for serialization.
pub type Attributes = IndexMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Attributes,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Builder-style child setter.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder-style text setter.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Append text, merging with a preceding text node.
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(&text),
            _ => self.children.push(Node::Text(text)),
        }
    }

    /// Exact attribute lookup.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Namespace-insensitive attribute lookup (`xml:id` answers for `id`).
    pub fn find_attr(&self, key: &str) -> Option<&str> {
        find_attr(&self.attrs, key)
    }

    /// Whether this element's tag matches `literal`, ignoring namespaces.
    pub fn is(&self, literal: &str) -> bool {
        tag_matches(&self.name, literal)
    }

    /// Direct element children.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Direct element children whose tag matches `literal`.
    pub fn children_named<'a>(&'a self, literal: &'a str) -> impl Iterator<Item = &'a Element> {
        self.child_elements().filter(move |child| child.is(literal))
    }

    /// First direct child whose tag matches `literal`.
    pub fn child(&self, literal: &str) -> Option<&Element> {
        self.child_elements().find(|child| child.is(literal))
    }

    /// All descendant elements in document order (not including `self`).
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.child_elements().collect::<Vec<_>>().into_iter().rev().collect(),
        }
    }

    /// Descendant elements whose tag matches `literal`, in document order.
    pub fn descendants_named<'a>(
        &'a self,
        literal: &'a str,
    ) -> impl Iterator<Item = &'a Element> {
        self.descendants().filter(move |element| element.is(literal))
    }

    /// Text held directly by this element, not including descendants.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// All text under this element, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let children: Vec<&Element> = next.child_elements().collect();
        self.stack.extend(children.into_iter().rev());
        Some(next)
    }
}
