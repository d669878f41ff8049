//! A `nom`-based classifier splitting selector text into segment tokens.
use super::ast::{BracketExpr, SegmentKind, SegmentToken, Selector};
use crate::error::JPathError;
use log::debug;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, tag, take_while1},
    character::complete::{char, i64 as nom_i64},
    combinator::{all_consuming, map, opt, recognize, value},
    multi::many0,
    sequence::{delimited, preceded},
};

// --- Main Public Parser ---

pub fn parse_selector(input: &str) -> Result<Selector, JPathError> {
    match selector(input.trim()) {
        Ok(("", sel)) => {
            debug!("Classified '{}' into {} segment(s)", input, sel.tokens().len());
            Ok(sel)
        }
        Ok((rem, _)) => Err(JPathError::invalid(
            input,
            format!("unrecognized segment at '{}'", rem),
        )),
        Err(e) => Err(JPathError::invalid(input, e.to_string())),
    }
}

// --- Combinators ---

fn selector(input: &str) -> IResult<&str, Selector> {
    map((opt(char('$')), many0(segment)), |(root, tokens)| {
        Selector::new(root.is_some(), tokens)
    })
    .parse(input)
}

/// `\w+`
fn name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_').parse(input)
}

fn descendant(input: &str) -> IResult<&str, SegmentToken> {
    map(recognize(preceded(tag(".."), name)), |raw: &str| {
        SegmentToken::new(SegmentKind::Descendant, raw)
    })
    .parse(input)
}

fn attribute(input: &str) -> IResult<&str, SegmentToken> {
    map(recognize(preceded(char('.'), name)), |raw: &str| {
        SegmentToken::new(SegmentKind::Attribute, raw)
    })
    .parse(input)
}

/// A bracket closes at the first `]`, so `[0][1]` stays two segments.
fn bracket(input: &str) -> IResult<&str, SegmentToken> {
    map(
        recognize(delimited(char('['), is_not("]"), char(']'))),
        |raw: &str| SegmentToken::new(SegmentKind::Bracket, raw),
    )
    .parse(input)
}

fn segment(input: &str) -> IResult<&str, SegmentToken> {
    // Descendant must be tried before attribute to claim the doubled dot.
    alt((descendant, attribute, bracket)).parse(input)
}

// --- Bracket Contents ---

pub(crate) fn bracket_expr(content: &str) -> Option<BracketExpr> {
    let result: IResult<&str, BracketExpr> = all_consuming(alt((
        value(BracketExpr::Wildcard, char('*')),
        map((opt(nom_i64), char(':'), opt(nom_i64)), |(start, _, end)| {
            BracketExpr::Slice { start, end }
        }),
        map(nom_i64, BracketExpr::Index),
    )))
    .parse(content);
    result.ok().map(|(_, expr)| expr)
}
