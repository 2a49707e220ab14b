//! Turns an event stream back into an [`Element`] tree.
//!
//! # The Algorithm
//!
//! 1. **Open:** create an empty element and push it on the stack.
//! 2. **Text:** append to the element on top of the stack.
//! 3. **Close:** check the name against the top of the stack, pop, and attach the finished
//!    element to its parent. When the stack becomes empty the element is the document root.
//! 4. **Finish:** the stack must be empty and exactly one root must have been closed.
//!
//! Whitespace outside the root is dropped (documents routinely end in a newline); any other
//! text there is an error.

use crate::dom::{Attributes, Element};
use crate::error::TreeError;
use crate::events::EventSink;

#[derive(Debug, Default)]
pub struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the elements currently open, outermost first.
    pub fn open_tags(&self) -> Vec<String> {
        self.stack.iter().map(|element| element.name.clone()).collect()
    }

    pub fn finish(self) -> Result<Element, TreeError> {
        if !self.stack.is_empty() {
            return Err(TreeError::Unclosed(
                self.stack.into_iter().map(|element| element.name).collect(),
            ));
        }
        self.root.ok_or(TreeError::Empty)
    }
}

impl EventSink for TreeBuilder {
    type Error = TreeError;

    fn open_element(&mut self, name: &str, attrs: &Attributes) -> Result<(), TreeError> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(TreeError::MultipleRoots(name.to_string()));
        }
        self.stack.push(Element {
            name: name.to_string(),
            attrs: attrs.clone(),
            children: Vec::new(),
        });
        Ok(())
    }

    fn close_element(&mut self, name: &str) -> Result<(), TreeError> {
        let top = self
            .stack
            .last()
            .ok_or_else(|| TreeError::CloseWithoutOpen(name.to_string()))?;
        if top.name != name {
            return Err(TreeError::MismatchedClose {
                found: name.to_string(),
                expected: top.name.clone(),
                stack: self.open_tags(),
            });
        }
        let Some(finished) = self.stack.pop() else {
            return Err(TreeError::CloseWithoutOpen(name.to_string()));
        };
        match self.stack.last_mut() {
            Some(parent) => parent.push_child(finished),
            None => self.root = Some(finished),
        }
        Ok(())
    }

    fn text(&mut self, content: &str) -> Result<(), TreeError> {
        match self.stack.last_mut() {
            Some(top) => {
                top.push_text(content);
                Ok(())
            }
            None if content.trim().is_empty() => Ok(()),
            None => Err(TreeError::StrayText(content.to_string())),
        }
    }
}
