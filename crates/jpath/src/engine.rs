//! The evaluation engine threading a result set through a classified selector.
use super::ast::{SegmentKind, Selector};
use super::filters::{FilterRegistry, SegmentFilter};
use crate::error::JPathError;
use log::{trace, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tunables for selector compilation and evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reject selectors that do not start with `$`.
    pub require_root: bool,
    /// How many levels below a candidate a descendant search may look.
    /// `None` searches the whole subtree.
    pub max_depth: Option<usize>,
}

/// Compiles selectors and evaluates them against documents.
///
/// An engine owns its filter table, so differently configured engines can be
/// used side by side.
#[derive(Debug, Clone, Default)]
pub struct SelectorEngine {
    config: EngineConfig,
    filters: FilterRegistry,
}

impl SelectorEngine {
    /// Creates an engine with the built-in filters and default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Classifies `selector`, applying this engine's configuration.
    pub fn compile(&self, selector: &str) -> Result<Selector, JPathError> {
        let compiled = Selector::parse(selector)?;
        if self.config.require_root && !compiled.is_rooted() {
            return Err(JPathError::invalid(selector, "selector must start with '$'"));
        }
        Ok(compiled)
    }

    /// Applies each segment of `selector` in order, starting from `[root]`.
    pub fn evaluate<'a>(&self, selector: &Selector, root: &'a Value) -> Vec<&'a Value> {
        let mut results = vec![root];
        for token in selector.tokens() {
            let Some(filter) = self.filters.get(token.kind) else {
                warn!("No filter registered for {} segment '{}'", token.kind, token.raw);
                return Vec::new();
            };
            results = apply(filter, &token.raw, results, &self.config);
            trace!("Segment '{}' matched {} value(s)", token.raw, results.len());
            if results.is_empty() {
                break;
            }
        }
        results
    }

    /// Compiles and evaluates `selector`, surfacing syntax errors.
    pub fn try_query<'a>(
        &self,
        selector: &str,
        root: &'a Value,
    ) -> Result<Vec<&'a Value>, JPathError> {
        let compiled = self.compile(selector)?;
        Ok(self.evaluate(&compiled, root))
    }

    /// Compiles and evaluates `selector`. A selector that cannot be classified
    /// matches nothing.
    pub fn query<'a>(&self, selector: &str, root: &'a Value) -> Vec<&'a Value> {
        match self.try_query(selector, root) {
            Ok(results) => results,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }
}

fn apply<'a>(
    filter: SegmentFilter,
    raw: &str,
    current: Vec<&'a Value>,
    config: &EngineConfig,
) -> Vec<&'a Value> {
    current
        .into_iter()
        .flat_map(|value| filter(raw, value, config))
        .collect()
}

/// Builds a [`SelectorEngine`] with custom configuration or filters.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    filters: FilterRegistry,
}

impl EngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn require_root(mut self, require_root: bool) -> Self {
        self.config.require_root = require_root;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = Some(max_depth);
        self
    }

    /// Replaces the filter used for `kind`.
    pub fn register(mut self, kind: SegmentKind, filter: SegmentFilter) -> Self {
        self.filters.register(kind, filter);
        self
    }

    pub fn filters(mut self, filters: FilterRegistry) -> Self {
        self.filters = filters;
        self
    }

    pub fn build(self) -> SelectorEngine {
        SelectorEngine {
            config: self.config,
            filters: self.filters,
        }
    }
}
