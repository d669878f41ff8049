//! A decoded JSON document paired with the engine that queries it.
use super::engine::SelectorEngine;
use crate::error::JPathError;
use serde_json::Value;
use std::str::FromStr;

/// An immutable JSON tree that can be queried with selectors.
///
/// Plural accessors (`strings`, `floats`, ...) keep only the results of the
/// requested type. Singular accessors look at the first result and return
/// `None` when there is no result or it has a different type.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
    engine: SelectorEngine,
}

impl Document {
    /// Wraps an already decoded tree.
    pub fn new(root: Value) -> Self {
        Self {
            root,
            engine: SelectorEngine::default(),
        }
    }

    /// Decodes JSON bytes into a document.
    pub fn from_slice(data: &[u8]) -> Result<Self, JPathError> {
        Ok(Self::new(serde_json::from_slice(data)?))
    }

    /// Replaces the engine used for every query on this document.
    pub fn with_engine(mut self, engine: SelectorEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn engine(&self) -> &SelectorEngine {
        &self.engine
    }

    pub fn into_inner(self) -> Value {
        self.root
    }

    // --- Raw Queries ---

    pub fn query(&self, selector: &str) -> Vec<&Value> {
        self.engine.query(selector, &self.root)
    }

    pub fn try_query(&self, selector: &str) -> Result<Vec<&Value>, JPathError> {
        self.engine.try_query(selector, &self.root)
    }

    pub fn first(&self, selector: &str) -> Option<&Value> {
        self.query(selector).into_iter().next()
    }

    pub fn exists(&self, selector: &str) -> bool {
        !self.query(selector).is_empty()
    }

    // --- Typed Accessors ---

    pub fn strings(&self, selector: &str) -> Vec<&str> {
        self.query(selector).into_iter().filter_map(Value::as_str).collect()
    }

    pub fn bools(&self, selector: &str) -> Vec<bool> {
        self.query(selector).into_iter().filter_map(Value::as_bool).collect()
    }

    pub fn floats(&self, selector: &str) -> Vec<f64> {
        self.query(selector).into_iter().filter_map(Value::as_f64).collect()
    }

    /// Numbers that fit in an `i64`; fractional numbers are dropped.
    pub fn integers(&self, selector: &str) -> Vec<i64> {
        self.query(selector).into_iter().filter_map(Value::as_i64).collect()
    }

    pub fn string(&self, selector: &str) -> Option<&str> {
        self.first(selector).and_then(Value::as_str)
    }

    pub fn bool(&self, selector: &str) -> Option<bool> {
        self.first(selector).and_then(Value::as_bool)
    }

    pub fn float(&self, selector: &str) -> Option<f64> {
        self.first(selector).and_then(Value::as_f64)
    }

    pub fn integer(&self, selector: &str) -> Option<i64> {
        self.first(selector).and_then(Value::as_i64)
    }
}

impl From<Value> for Document {
    fn from(root: Value) -> Self {
        Self::new(root)
    }
}

impl FromStr for Document {
    type Err = JPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(serde_json::from_str(s)?))
    }
}
