//! XML reading and writing over quick-xml.
//!
//! [`stream`] is an event source: it reads XML text and drives any [`EventSink`] directly,
//! without building a tree first. Empty elements (`<pb/>`) arrive as an open immediately
//! followed by a close. Declarations, comments, processing instructions and doctypes are
//! skipped. Tag and attribute names are passed through as written, prefixes included.

use crate::builder::TreeBuilder;
use crate::dom::{Attributes, Element, Node};
use crate::error::{ParseError, StreamError, WriteError};
use crate::events::EventSink;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::{Reader, Writer};

/// Read `src` and fire its events into `sink`.
pub fn stream<S>(src: &str, sink: &mut S) -> Result<(), StreamError<S::Error>>
where
    S: EventSink + ?Sized,
{
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(false);

    loop {
        let position = reader.buffer_position();
        let xml_error = |source: quick_xml::Error| ParseError::Xml { source, position };
        match reader.read_event().map_err(xml_error)? {
            XmlEvent::Start(start) => {
                let (name, attrs) = read_start(&start, position)?;
                sink.open_element(&name, &attrs).map_err(StreamError::Sink)?;
            }
            XmlEvent::Empty(start) => {
                let (name, attrs) = read_start(&start, position)?;
                sink.open_element(&name, &attrs).map_err(StreamError::Sink)?;
                sink.close_element(&name).map_err(StreamError::Sink)?;
            }
            XmlEvent::End(end) => {
                let name = std::str::from_utf8(end.name().as_ref())
                    .map_err(ParseError::from)?
                    .to_string();
                sink.close_element(&name).map_err(StreamError::Sink)?;
            }
            XmlEvent::Text(text) => {
                let content = text.unescape().map_err(xml_error)?;
                if !content.is_empty() {
                    sink.text(&content).map_err(StreamError::Sink)?;
                }
            }
            XmlEvent::CData(cdata) => {
                let bytes = cdata.into_inner();
                let content = std::str::from_utf8(&bytes).map_err(ParseError::from)?;
                if !content.is_empty() {
                    sink.text(content).map_err(StreamError::Sink)?;
                }
            }
            XmlEvent::Eof => break,
            _ => {}
        }
    }
    Ok(())
}

fn read_start(start: &BytesStart<'_>, position: u64) -> Result<(String, Attributes), ParseError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut attrs = Attributes::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| ParseError::Xml {
            source: quick_xml::Error::from(e),
            position,
        })?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr
            .unescape_value()
            .map_err(|source| ParseError::Xml { source, position })?;
        attrs.insert(key, value.into_owned());
    }
    Ok((name, attrs))
}

/// Parse `src` into an element tree.
pub fn parse_str(src: &str) -> Result<Element, ParseError> {
    let mut builder = TreeBuilder::new();
    stream(src, &mut builder).map_err(|err| match err {
        StreamError::Parse(err) => err,
        StreamError::Sink(err) => ParseError::Tree(err),
    })?;
    Ok(builder.finish()?)
}

/// Write `root` as XML. Elements without children are self-closed.
pub fn to_string(root: &Element) -> Result<String, WriteError> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(|e| WriteError(e.to_string()))
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), WriteError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    if element.children.is_empty() {
        return write_event(writer, XmlEvent::Empty(start));
    }
    write_event(writer, XmlEvent::Start(start))?;
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => write_event(
                writer,
                XmlEvent::Text(BytesText::from_escaped(partial_escape(text.as_str()))),
            )?,
        }
    }
    write_event(writer, XmlEvent::End(BytesEnd::new(element.name.as_str())))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: XmlEvent<'_>) -> Result<(), WriteError> {
    writer
        .write_event(event)
        .map_err(|e| WriteError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TreeError;
    use crate::events::{Event, EventRecorder};

    #[test]
    fn test_parse_keeps_prefixes_and_attribute_order() {
        let root = parse_str(
            r#"<?xml version="1.0"?>
<TEI xmlns="http://www.tei-c.org/ns/1.0"><text><div xml:id="levanto1" type="chapter"/></text></TEI>
"#,
        )
        .unwrap();
        assert_eq!(root.name, "TEI");
        let div = root.descendants_named("div").next().unwrap();
        let keys: Vec<&str> = div.attrs.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["xml:id", "type"]);
        assert_eq!(div.find_attr("id"), Some("levanto1"));
    }

    #[test]
    fn test_empty_elements_become_open_close_pairs() {
        let mut recorder = EventRecorder::new();
        stream("<p>A<pb n=\"1\"/>B</p>", &mut recorder).unwrap();
        assert_eq!(
            recorder.finish().unwrap(),
            vec![
                Event::open("p"),
                Event::text("A"),
                Event::open_with("pb", &[("n", "1")]),
                Event::close("pb"),
                Event::text("B"),
                Event::close("p"),
            ]
        );
    }

    #[test]
    fn test_entities_and_cdata_are_text() {
        let root = parse_str("<p>a &amp; b<![CDATA[ <c> ]]></p>").unwrap();
        assert_eq!(root.text_content(), "a & b <c> ");
    }

    #[test]
    fn test_comments_are_dropped() {
        let root = parse_str("<p>a<!-- note -->b</p>").unwrap();
        assert_eq!(root.children, vec![Node::Text("ab".to_string())]);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(matches!(
            parse_str("<p><b></p>"),
            Err(ParseError::Xml { .. })
        ));
    }

    #[test]
    fn test_syntax_errors_report_a_byte_position() {
        let src = "<p>ab</q>";
        match parse_str(src) {
            Err(ParseError::Xml { position, .. }) => {
                assert!(position > 0 && position <= src.len() as u64)
            }
            other => panic!("expected a syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_document_is_a_tree_error() {
        assert!(matches!(
            parse_str("<body><p>"),
            Err(ParseError::Tree(TreeError::Unclosed(_))) | Err(ParseError::Xml { .. })
        ));
    }

    #[test]
    fn test_to_string_self_closes_and_escapes() {
        let root = Element::new("div")
            .with_attr("class", "a\"b")
            .with_child(Element::new("br"))
            .with_text("x < 'y' & z");
        insta::assert_snapshot!(
            to_string(&root).unwrap(),
            @r#"<div class="a&quot;b"><br/>x &lt; 'y' &amp; z</div>"#
        );
    }

    #[test]
    fn test_written_xml_parses_back() {
        let root = Element::new("body").with_child(
            Element::new("div")
                .with_attr("class", "printed-text-page")
                .with_text("uno")
                .with_child(Element::new("mark").with_text("tobi")),
        );
        let written = to_string(&root).unwrap();
        assert_eq!(parse_str(&written).unwrap(), root);
    }
}
