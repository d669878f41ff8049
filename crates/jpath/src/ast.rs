//! Defines the token types a selector is classified into.
use crate::error::JPathError;
use crate::parser;
use std::fmt;
use std::str::FromStr;

/// The lexical kind of a selector segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// A direct field lookup (e.g., `.name`).
    Attribute,
    /// A recursive field search (e.g., `..name`).
    Descendant,
    /// An index, slice or wildcard over a sequence (e.g., `[0]`, `[1:3]`, `[*]`).
    Bracket,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Attribute => write!(f, "attribute"),
            SegmentKind::Descendant => write!(f, "descendant"),
            SegmentKind::Bracket => write!(f, "bracket"),
        }
    }
}

/// A classified segment: its kind plus the raw text it was recognized from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentToken {
    pub kind: SegmentKind,
    pub raw: String,
}

impl SegmentToken {
    pub fn new(kind: SegmentKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }

    /// The segment argument with its punctuation removed (`name` for `..name`,
    /// `1:3` for `[1:3]`).
    pub fn argument(&self) -> &str {
        match self.kind {
            SegmentKind::Attribute => self.raw.strip_prefix('.').unwrap_or(&self.raw),
            SegmentKind::Descendant => self.raw.strip_prefix("..").unwrap_or(&self.raw),
            SegmentKind::Bracket => self
                .raw
                .strip_prefix('[')
                .and_then(|s| s.strip_suffix(']'))
                .unwrap_or(&self.raw),
        }
    }
}

/// The interpreted contents of a bracket segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketExpr {
    /// `[*]`
    Wildcard,
    /// `[2]`, `[-1]`
    Index(i64),
    /// `[1:3]`, `[:2]`, `[-2:]`
    Slice { start: Option<i64>, end: Option<i64> },
}

impl BracketExpr {
    /// Interprets bracket contents. Returns `None` for anything that is not a
    /// wildcard, an integer or a `start:end` pair.
    pub fn parse(content: &str) -> Option<Self> {
        parser::bracket_expr(content)
    }
}

/// A selector classified into its ordered segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    rooted: bool,
    tokens: Vec<SegmentToken>,
}

impl Selector {
    pub(crate) fn new(rooted: bool, tokens: Vec<SegmentToken>) -> Self {
        Self { rooted, tokens }
    }

    /// Classifies `input` into segments. A leading `$` is accepted but optional.
    pub fn parse(input: &str) -> Result<Self, JPathError> {
        parser::parse_selector(input)
    }

    /// Whether the selector text started with the `$` root marker.
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    /// `$` alone selects the document root.
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[SegmentToken] {
        &self.tokens
    }
}

impl FromStr for Selector {
    type Err = JPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for token in &self.tokens {
            write!(f, "{}", token.raw)?;
        }
        Ok(())
    }
}
