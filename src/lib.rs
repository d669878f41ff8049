//! Path selectors and typed record population over in-memory JSON documents.
//!
//! ```
//! use jsonsel::Document;
//!
//! let doc: Document = r#"{ "store": { "book": [ { "title": "Moby Dick" } ] } }"#
//!     .parse()
//!     .unwrap();
//! assert_eq!(doc.string("$.store.book[-1].title"), Some("Moby Dick"));
//! assert!(doc.query("$.store.bicycle").is_empty());
//! ```

pub mod error;

pub use error::Error;
pub use jsonsel_jpath::{
    BracketExpr, Document, EngineBuilder, EngineConfig, FilterRegistry, JPathError, SegmentFilter,
    SegmentKind, SegmentToken, Selector, SelectorEngine, parse_selector,
};
pub use jsonsel_unmarshal::{
    FieldBinding, FieldType, Fields, FromValue, RecordSchema, SchemaField, Unmarshal,
    UnmarshalError, from_document, type_name, unmarshal_slice,
};
pub use serde_json::Value;

use log::debug;

/// Decodes `data` and fills `dest` using its field bindings.
pub fn unmarshal<T: Unmarshal>(data: &[u8], dest: &mut T) -> Result<(), Error> {
    Ok(jsonsel_unmarshal::unmarshal_slice(data, dest)?)
}

/// Decodes `data` and returns owned copies of everything `selector` matches.
pub fn query_slice(data: &[u8], selector: &str) -> Result<Vec<Value>, Error> {
    let doc = Document::from_slice(data)?;
    let results: Vec<Value> = doc.try_query(selector)?.into_iter().cloned().collect();
    debug!("'{}' matched {} value(s)", selector, results.len());
    Ok(results)
}
