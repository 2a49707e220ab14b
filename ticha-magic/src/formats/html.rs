//! HTML serialization
//!
//! Pipeline: Element tree → RcDom handles → html5ever serializer. Going through html5ever
//! gets HTML's rules right where XML's differ: void elements (`<br>`) have no end tag, and an
//! empty `<span>` is written as `<span></span>` rather than self-closed.

use crate::error::FormatError;
use crate::format::Format;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use ticha_parser::{Element, Node as TreeNode};

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn serialize(&self, root: &Element) -> Result<String, FormatError> {
        serialize_to_html(root)
    }
}

/// Serialize `root` (and everything under it) as an HTML fragment.
pub fn serialize_to_html(root: &Element) -> Result<String, FormatError> {
    let handle = build_handle(root);
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    serialize(&mut output, &SerializableHandle::from(handle), opts).map_err(|e| {
        FormatError::SerializationError(format!("HTML serialization failed: {}", e))
    })?;
    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {}", e)))
}

fn build_handle(element: &Element) -> Handle {
    let handle = create_element(element);
    {
        let mut children = handle.children.borrow_mut();
        for child in &element.children {
            children.push(match child {
                TreeNode::Element(child) => build_handle(child),
                TreeNode::Text(text) => create_text(text),
            });
        }
    }
    handle
}

fn create_element(element: &Element) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(element.name.as_str()));
    let attributes = element
        .attrs
        .iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name.as_str())),
            value: value.clone().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_void_and_empty_elements() {
        let root = Element::new("p")
            .with_text("a")
            .with_child(Element::new("br"))
            .with_child(Element::new("span").with_attr("class", "content hide inline"));
        assert_eq!(
            serialize_to_html(&root).unwrap(),
            r#"<p>a<br><span class="content hide inline"></span></p>"#
        );
    }

    #[test]
    fn test_escaping() {
        let root = Element::new("td")
            .with_attr("title", r#"say "hi" & go"#)
            .with_text("'x' < y & z");
        assert_eq!(
            HtmlFormat.serialize(&root).unwrap(),
            r#"<td title="say &quot;hi&quot; &amp; go">'x' &lt; y &amp; z</td>"#
        );
    }

    #[test]
    fn test_paginated_page() {
        let root = Element::new("div").with_child(
            Element::new("div")
                .with_attr("class", "printed-text-page")
                .with_attr("data-n", "1")
                .with_attr("data-rvn", "1")
                .with_child(Element::new("p").with_text("B")),
        );
        insta::assert_snapshot!(
            serialize_to_html(&root).unwrap(),
            @r#"<div><div class="printed-text-page" data-n="1" data-rvn="1"><p>B</p></div></div>"#
        );
    }
}
