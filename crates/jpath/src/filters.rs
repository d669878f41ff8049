//! Defines the registry and built-in implementations of segment filters.
use super::ast::{BracketExpr, SegmentKind};
use super::engine::EngineConfig;
use log::trace;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// The signature for a segment filter: given the raw segment text and one
/// candidate value, returns the values the segment selects from it.
pub type SegmentFilter =
    for<'a> fn(raw: &str, value: &'a Value, config: &EngineConfig) -> Vec<&'a Value>;

/// A registry mapping each segment kind to the filter that evaluates it.
#[derive(Clone)]
pub struct FilterRegistry {
    filters: HashMap<SegmentKind, SegmentFilter>,
}

impl FilterRegistry {
    /// Creates a new, empty filter registry.
    pub fn new() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Registers a filter, replacing any previous one for the same kind.
    pub fn register(&mut self, kind: SegmentKind, filter: SegmentFilter) {
        self.filters.insert(kind, filter);
    }

    pub fn get(&self, kind: SegmentKind) -> Option<SegmentFilter> {
        self.filters.get(&kind).copied()
    }
}

impl Default for FilterRegistry {
    /// Creates a new registry populated with the built-in filters.
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(SegmentKind::Attribute, attribute_filter);
        registry.register(SegmentKind::Descendant, descendant_filter);
        registry.register(SegmentKind::Bracket, bracket_filter);
        registry
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.filters.keys()).finish()
    }
}

// --- Built-in Filter Implementations ---

/// `.name`: a direct field lookup on an object.
pub fn attribute_filter<'a>(raw: &str, value: &'a Value, _config: &EngineConfig) -> Vec<&'a Value> {
    let name = raw.strip_prefix('.').unwrap_or(raw);
    match value {
        Value::Object(map) => map.get(name).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// `[*]`, `[i]` and `[start:end]` over an array.
pub fn bracket_filter<'a>(raw: &str, value: &'a Value, _config: &EngineConfig) -> Vec<&'a Value> {
    let content = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(raw);

    let Value::Array(items) = value else {
        return Vec::new();
    };

    match BracketExpr::parse(content) {
        Some(BracketExpr::Wildcard) => items.iter().collect(),
        Some(BracketExpr::Index(idx)) => resolve_index(idx, items.len())
            .and_then(|i| items.get(i))
            .into_iter()
            .collect(),
        Some(BracketExpr::Slice { start, end }) => slice(items, start, end),
        None => {
            trace!("Unrecognized bracket expression '{}'", raw);
            Vec::new()
        }
    }
}

/// `..name`: the shallowest `name` field on every branch below `value`.
pub fn descendant_filter<'a>(raw: &str, value: &'a Value, config: &EngineConfig) -> Vec<&'a Value> {
    let name = raw.strip_prefix("..").unwrap_or(raw);
    let mut results = Vec::new();
    collect_descendants(value, name, 0, config.max_depth, &mut results);
    results
}

fn collect_descendants<'a>(
    value: &'a Value,
    name: &str,
    depth: usize,
    max_depth: Option<usize>,
    results: &mut Vec<&'a Value>,
) {
    if max_depth.is_some_and(|max| depth > max) {
        return;
    }
    match value {
        Value::Object(map) => {
            // A hit ends the search on this branch; siblings are not searched.
            if let Some(found) = map.get(name) {
                results.push(found);
                return;
            }
            for child in map.values() {
                collect_descendants(child, name, depth + 1, max_depth, results);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_descendants(item, name, depth + 1, max_depth, results);
            }
        }
        _ => {}
    }
}

// --- Index Arithmetic ---

/// Resolves a possibly negative index. Valid indexes run from `-len` to `len - 1`.
fn resolve_index(idx: i64, len: usize) -> Option<usize> {
    resolve(idx, len).filter(|&i| i < len)
}

/// Resolves an exclusive slice end. Unlike an index, `len` itself is in range.
fn resolve_end(idx: i64, len: usize) -> Option<usize> {
    resolve(idx, len)
}

/// Translates a negative offset by `len`. Anything outside `-len..=len` is `None`.
fn resolve(idx: i64, len: usize) -> Option<usize> {
    if idx.unsigned_abs() > len as u64 {
        return None;
    }
    if idx < 0 {
        len.checked_sub(idx.unsigned_abs() as usize)
    } else {
        Some(idx as usize)
    }
}

fn slice(items: &[Value], start: Option<i64>, end: Option<i64>) -> Vec<&Value> {
    let start = match start {
        None => 0,
        Some(s) => match resolve_index(s, items.len()) {
            Some(s) => s,
            None => return Vec::new(),
        },
    };
    let end = match end {
        None => items.len(),
        Some(e) => match resolve_end(e, items.len()) {
            Some(e) => e,
            None => return Vec::new(),
        },
    };
    if start >= end {
        return Vec::new();
    }
    items[start..end].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    fn letters() -> Value {
        json!(["a", "b", "c", "d"])
    }

    #[test]
    fn test_attribute_on_object() {
        let data = json!({ "name": "ACME", "id": 7 });
        assert_eq!(attribute_filter(".name", &data, &cfg()), vec![&json!("ACME")]);
        assert!(attribute_filter(".missing", &data, &cfg()).is_empty());
    }

    #[test]
    fn test_attribute_on_non_object_is_empty() {
        for data in [json!([1, 2]), json!("name"), json!(null), json!(3.5)] {
            assert!(attribute_filter(".name", &data, &cfg()).is_empty());
        }
    }

    #[test]
    fn test_wildcard_returns_all_in_order() {
        let data = letters();
        let result = bracket_filter("[*]", &data, &cfg());
        assert_eq!(result, vec![&json!("a"), &json!("b"), &json!("c"), &json!("d")]);
    }

    #[test]
    fn test_negative_index_mirrors_positive() {
        let data = letters();
        assert_eq!(bracket_filter("[-1]", &data, &cfg()), bracket_filter("[3]", &data, &cfg()));
        assert_eq!(bracket_filter("[-4]", &data, &cfg()), bracket_filter("[0]", &data, &cfg()));
        assert!(bracket_filter("[4]", &data, &cfg()).is_empty());
        assert!(bracket_filter("[-5]", &data, &cfg()).is_empty());
    }

    #[test]
    fn test_slices() {
        let data = letters();
        assert_eq!(bracket_filter("[1:3]", &data, &cfg()), vec![&json!("b"), &json!("c")]);
        assert_eq!(bracket_filter("[-3:-1]", &data, &cfg()), vec![&json!("b"), &json!("c")]);
        assert_eq!(bracket_filter("[:-2]", &data, &cfg()), vec![&json!("a"), &json!("b")]);
        assert_eq!(bracket_filter("[-2:]", &data, &cfg()), vec![&json!("c"), &json!("d")]);
        assert_eq!(bracket_filter("[:]", &data, &cfg()).len(), 4);
    }

    #[test]
    fn test_bounds_at_sequence_length() {
        let data = letters();
        let all: Vec<&Value> = data.as_array().unwrap().iter().collect();
        assert_eq!(bracket_filter("[-4]", &data, &cfg()), vec![&json!("a")]);
        assert_eq!(bracket_filter("[-4:]", &data, &cfg()), all);
        assert_eq!(bracket_filter("[:4]", &data, &cfg()), all);
        assert_eq!(bracket_filter("[3:4]", &data, &cfg()), vec![&json!("d")]);
        assert_eq!(bracket_filter("[:-4]", &data, &cfg()), Vec::<&Value>::new());
        assert!(bracket_filter("[4:]", &data, &cfg()).is_empty());
        assert!(bracket_filter("[-5:]", &data, &cfg()).is_empty());
        assert!(bracket_filter("[:-5]", &data, &cfg()).is_empty());
    }

    #[test]
    fn test_slice_halves_cover_sequence() {
        let data = letters();
        let all: Vec<&Value> = data.as_array().unwrap().iter().collect();
        for k in 0..=4 {
            let mut joined = bracket_filter(&format!("[:{}]", k), &data, &cfg());
            joined.extend(bracket_filter(&format!("[{}:]", k), &data, &cfg()));
            assert_eq!(joined, all, "split at {}", k);
        }
    }

    #[test]
    fn test_degenerate_slices_are_empty() {
        let data = letters();
        assert!(bracket_filter("[2:2]", &data, &cfg()).is_empty());
        assert!(bracket_filter("[3:1]", &data, &cfg()).is_empty());
        assert!(bracket_filter("[-1:-3]", &data, &cfg()).is_empty());
        assert!(bracket_filter("[4:]", &data, &cfg()).is_empty());
        assert!(bracket_filter("[:5]", &data, &cfg()).is_empty());
        assert!(bracket_filter("[-5:]", &data, &cfg()).is_empty());
    }

    #[test]
    fn test_bracket_on_non_array_or_unknown_expr_is_empty() {
        assert!(bracket_filter("[0]", &json!({ "0": 1 }), &cfg()).is_empty());
        assert!(bracket_filter("[?(@.x)]", &letters(), &cfg()).is_empty());
        assert!(bracket_filter("[*]", &json!([]), &cfg()).is_empty());
        assert!(bracket_filter("[0]", &json!([]), &cfg()).is_empty());
    }

    #[test]
    fn test_descendant_stops_at_shallowest_match() {
        let data = json!({
            "a": { "price": 1, "inner": { "price": 2 } },
            "b": [ { "price": 3 }, { "other": { "price": 4 } } ],
            "price": null
        });
        // The root itself has `price`, so nothing below is searched.
        assert_eq!(descendant_filter("..price", &data, &cfg()), vec![&json!(null)]);

        let branches = json!([data["a"].clone(), data["b"].clone()]);
        let found = descendant_filter("..price", &branches, &cfg());
        assert_eq!(found, vec![&json!(1), &json!(3), &json!(4)]);
    }

    #[test]
    fn test_descendant_follows_insertion_order() {
        let data: Value =
            serde_json::from_str(r#"{ "z": { "id": "first" }, "a": { "id": "second" } }"#).unwrap();
        let found = descendant_filter("..id", &data, &cfg());
        assert_eq!(found, vec![&json!("first"), &json!("second")]);
    }

    #[test]
    fn test_descendant_on_scalar_is_empty() {
        assert!(descendant_filter("..x", &json!(42), &cfg()).is_empty());
    }

    #[test]
    fn test_descendant_respects_max_depth() {
        let data = json!({ "a": { "b": { "target": 1 } }, "target2": { "target": 2 } });
        let shallow = EngineConfig {
            max_depth: Some(1),
            ..EngineConfig::default()
        };
        assert_eq!(descendant_filter("..target", &data, &shallow), vec![&json!(2)]);
        assert_eq!(descendant_filter("..target", &data, &cfg()).len(), 2);
    }

    #[test]
    fn test_registry_replaces_filters() {
        fn nothing<'a>(_: &str, _: &'a Value, _: &EngineConfig) -> Vec<&'a Value> {
            Vec::new()
        }
        let mut registry = FilterRegistry::default();
        assert!(registry.get(SegmentKind::Bracket).is_some());
        registry.register(SegmentKind::Bracket, nothing);
        let filter = registry.get(SegmentKind::Bracket).unwrap();
        assert!(filter("[*]", &letters(), &cfg()).is_empty());
        assert!(FilterRegistry::new().get(SegmentKind::Attribute).is_none());
    }
}
