use ticha_parser::xml::{parse_str, stream};
use ticha_parser::{
    find_attr, normalize, tag_matches, walk, Attributes, Event, EventRecorder, EventSink,
    StreamError,
};

const TEI: &str = r#"<?xml version="1.0" encoding="UTF-8"?><TEI xmlns="http://www.tei-c.org/ns/1.0">
  <text>
    <body>
      <div xml:id="levanto_arte1" type="chapter">
        <p>Palabra <foreign xml:lang="zap">Tobi</foreign><lb/>otra</p>
        <pb n="2"/>
      </div>
    </body>
  </text>
</TEI>"#;

/// Counts opens of a tag and refuses the first `pb`.
#[derive(Default)]
struct RejectBreaks {
    opened: usize,
}

impl EventSink for RejectBreaks {
    type Error = String;

    fn open_element(&mut self, name: &str, _attrs: &Attributes) -> Result<(), Self::Error> {
        if tag_matches(name, "pb") {
            return Err(format!("page break after {} elements", self.opened));
        }
        self.opened += 1;
        Ok(())
    }

    fn close_element(&mut self, _name: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn text(&mut self, _content: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn stream_and_tree_walk_agree() {
    let mut streamed = EventRecorder::new();
    stream(TEI, &mut streamed).unwrap();

    let tree = parse_str(TEI).unwrap();
    let mut walked = EventRecorder::new();
    walk(&tree, &mut walked).unwrap();

    assert_eq!(streamed.finish().unwrap(), walked.finish().unwrap());
}

#[test]
fn namespaced_attributes_are_found_by_local_name() {
    let tree = parse_str(TEI).unwrap();
    let div = tree.descendants_named("div").next().unwrap();
    assert_eq!(div.find_attr("id"), Some("levanto_arte1"));
    assert_eq!(find_attr(&div.attrs, "type"), Some("chapter"));

    let foreign = tree.descendants_named("foreign").next().unwrap();
    assert_eq!(foreign.find_attr("lang"), Some("zap"));
    assert_eq!(normalize(&foreign.text()), "tobi");
}

#[test]
fn empty_elements_stream_as_open_close_pairs() {
    let mut recorder = EventRecorder::new();
    stream("<p>a<lb/>b</p>", &mut recorder).unwrap();
    assert_eq!(
        recorder.finish().unwrap(),
        vec![
            Event::open("p"),
            Event::text("a"),
            Event::open("lb"),
            Event::close("lb"),
            Event::text("b"),
            Event::close("p"),
        ]
    );
}

#[test]
fn sink_errors_stop_the_stream() {
    let mut sink = RejectBreaks::default();
    match stream(TEI, &mut sink) {
        Err(StreamError::Sink(message)) => assert_eq!(message, "page break after 7 elements"),
        other => panic!("expected a sink error, got {:?}", other),
    }
}
