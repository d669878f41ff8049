//! A path selector engine for in-memory JSON documents.
//!
//! Selectors start with an optional `$` followed by any number of segments:
//! `.name` (field), `..name` (nearest `name` on every branch below),
//! `[i]` (index, negative counts from the end), `[start:end]` (slice) and
//! `[*]` (every element). Each segment is applied to every value matched so
//! far and the results are flattened, so a selector never fails for missing
//! data; it simply matches nothing.

pub mod ast;
pub mod document;
pub mod engine;
pub mod error;
pub mod filters;
mod parser;

// --- Public API ---
pub use ast::{BracketExpr, SegmentKind, SegmentToken, Selector};
pub use document::Document;
pub use engine::{EngineBuilder, EngineConfig, SelectorEngine};
pub use error::JPathError;
pub use filters::{FilterRegistry, SegmentFilter};
pub use parser::parse_selector;
