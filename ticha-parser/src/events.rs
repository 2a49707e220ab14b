//! Structural event stream.
//!
//! # The High-Level Concept
//!
//! A document is processed as a flat sequence of open, close and text events instead of as a
//! tree. Every rewriter in the toolchain consumes that sequence through [`EventSink`] and
//! produces another sequence by calling the same three methods on the next sink in the chain.
//! Rewriters never look ahead or behind: whatever they need to remember (open tags, counters,
//! the current word) they keep on their own stack.
//!
//! # Sources
//!
//! - [`walk`] fires the events of an [`Element`] tree depth-first.
//! - [`replay`] fires a recorded slice of [`Event`]s.
//! - [`crate::xml::stream`] fires events straight from XML text.
//!
//! # Sinks
//!
//! - [`crate::TreeBuilder`] rebuilds an [`Element`] tree.
//! - [`EventRecorder`] records events for inspection or later replay.
//!
//! Both reject badly nested input, so a rewriter that emits an unbalanced sequence fails at the
//! first offending close instead of producing a corrupt tree.

use crate::dom::{Attributes, Element, Node};
use crate::error::TreeError;

/// A single structural event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Open { name: String, attrs: Attributes },
    Close { name: String },
    Text(String),
}

impl Event {
    pub fn open(name: impl Into<String>) -> Self {
        Event::Open {
            name: name.into(),
            attrs: Attributes::new(),
        }
    }

    pub fn open_with(name: impl Into<String>, attrs: &[(&str, &str)]) -> Self {
        Event::Open {
            name: name.into(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn close(name: impl Into<String>) -> Self {
        Event::Close { name: name.into() }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Event::Text(content.into())
    }
}

/// Receiver of structural events.
pub trait EventSink {
    type Error;

    fn open_element(&mut self, name: &str, attrs: &Attributes) -> Result<(), Self::Error>;

    fn close_element(&mut self, name: &str) -> Result<(), Self::Error>;

    fn text(&mut self, content: &str) -> Result<(), Self::Error>;
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    type Error = S::Error;

    fn open_element(&mut self, name: &str, attrs: &Attributes) -> Result<(), Self::Error> {
        (**self).open_element(name, attrs)
    }

    fn close_element(&mut self, name: &str) -> Result<(), Self::Error> {
        (**self).close_element(name)
    }

    fn text(&mut self, content: &str) -> Result<(), Self::Error> {
        (**self).text(content)
    }
}

/// Drive `sink` with the events of `root`, depth-first.
pub fn walk<S: EventSink + ?Sized>(root: &Element, sink: &mut S) -> Result<(), S::Error> {
    sink.open_element(&root.name, &root.attrs)?;
    for child in &root.children {
        match child {
            Node::Element(element) => walk(element, sink)?,
            Node::Text(text) => sink.text(text)?,
        }
    }
    sink.close_element(&root.name)
}

/// Drive `sink` with a recorded sequence of events.
pub fn replay<S: EventSink + ?Sized>(events: &[Event], sink: &mut S) -> Result<(), S::Error> {
    for event in events {
        match event {
            Event::Open { name, attrs } => sink.open_element(name, attrs)?,
            Event::Close { name } => sink.close_element(name)?,
            Event::Text(content) => sink.text(content)?,
        }
    }
    Ok(())
}

/// Open `name`, run `body`, then close `name`.
///
/// The close is emitted even if `body` fails. The first error is the one returned.
pub fn emit_scoped<S, F>(
    sink: &mut S,
    name: &str,
    attrs: &Attributes,
    body: F,
) -> Result<(), S::Error>
where
    S: EventSink + ?Sized,
    F: FnOnce(&mut S) -> Result<(), S::Error>,
{
    sink.open_element(name, attrs)?;
    let result = body(sink);
    let closed = sink.close_element(name);
    result.and(closed)
}

/// Sink that records every event it receives, checking that closes match opens.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<Event>,
    stack: Vec<String>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Names of the elements currently open, outermost first.
    pub fn open_tags(&self) -> &[String] {
        &self.stack
    }

    /// Return the recorded events, failing if any element is still open.
    pub fn finish(self) -> Result<Vec<Event>, TreeError> {
        if !self.stack.is_empty() {
            return Err(TreeError::Unclosed(self.stack));
        }
        Ok(self.events)
    }
}

impl EventSink for EventRecorder {
    type Error = TreeError;

    fn open_element(&mut self, name: &str, attrs: &Attributes) -> Result<(), TreeError> {
        self.stack.push(name.to_string());
        self.events.push(Event::Open {
            name: name.to_string(),
            attrs: attrs.clone(),
        });
        Ok(())
    }

    fn close_element(&mut self, name: &str) -> Result<(), TreeError> {
        match self.stack.last() {
            None => return Err(TreeError::CloseWithoutOpen(name.to_string())),
            Some(top) if top != name => {
                return Err(TreeError::MismatchedClose {
                    found: name.to_string(),
                    expected: top.clone(),
                    stack: self.stack.clone(),
                })
            }
            Some(_) => {}
        }
        self.stack.pop();
        self.events.push(Event::close(name));
        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<(), TreeError> {
        self.events.push(Event::text(content));
        Ok(())
    }
}
