//! FLEx glosses: the dictionary, export reading, and the inserter that adds popovers.

pub mod dictionary;
pub mod export;
pub mod inserter;

pub use dictionary::{AnnotationRecord, GlossDictionary};
pub use export::{
    convert_flex_file, read_flex_xml, to_compact, to_json_string, CompactEntry, CompactExport,
    FlexText, FlexWord,
};
pub use inserter::{insert_glosses, FlexInserter, GlossStats};
