//! # ticha-parser
//!
//! Element trees and structural event streams for Ticha TEI documents.
//!
//! Every transform in the toolchain (the TEI stylesheet, the pager, the FLEx inserter and
//! the outline builder) is written against the same small contract: a source walks a tree
//! depth-first and fires open/close/text events into an [`EventSink`]. A rewriter is itself
//! a sink that forwards a different, still well-nested, event sequence to another sink. The
//! last sink in the chain is usually a [`TreeBuilder`], which turns the events back into an
//! [`Element`] tree.
//!
//! File Layout
//!
//!     src
//!       ├── dom.rs          Element / Node tree
//!       ├── events.rs       Event, EventSink, walk(), replay(), EventRecorder
//!       ├── builder.rs      TreeBuilder sink
//!       ├── xml.rs          quick-xml reader (an event source) and writer
//!       ├── tags.rs         namespace-insensitive tag and attribute matching
//!       ├── normalize.rs    word normalization for dictionary keys
//!       └── error.rs        TreeError, ParseError
//!
//! This crate knows nothing about pages, columns or glosses. Those live in `ticha-magic`.

pub mod builder;
pub mod dom;
pub mod error;
pub mod events;
pub mod normalize;
pub mod tags;
pub mod xml;

pub use builder::TreeBuilder;
pub use dom::{Attributes, Element, Node};
pub use error::{ParseError, StreamError, TreeError, WriteError};
pub use events::{emit_scoped, replay, walk, Event, EventRecorder, EventSink};
pub use normalize::normalize;
pub use tags::{find_attr, tag_matches};
