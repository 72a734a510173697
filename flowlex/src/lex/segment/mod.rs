// flowlex - lexical analysis for flowchart diagrams.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Syntax segmentation.
//!
//! Flowchart tokenization is divided into two phases: a lower-level phase
//! called "segmentation" and a higher-level phase called "scanning".  This
//! module implements the segmentation phase.  [`super::scan`] implements the
//! scanning phase.
//!
//! Segmentation applies an ordered table of [Rule]s to the start of the input.
//! The first rule whose pattern matches wins, even if a later rule would match
//! more text, and the matched text becomes one segment labeled with the rule's
//! [Segment].  Some segments become tokens during scanning; for example,
//! [Segment::Identifier] becomes a [TokenKind::Identifier] token.  Others, such
//! as [Segment::Whitespace] and [Segment::Comment], are ignored.
//!
//! The rules are tried in this order:
//!
//! 1. Ignorable text: white space, a front matter block, a `%%{...}%%`
//!    configuration directive, and a `%%` comment.
//!
//! 2. The keywords `flowchart`/`graph`, the directions, `subgraph`, and `end`.
//!    These are plain prefix matches, so `endpoint` segments as `end` followed
//!    by the identifier `point`.
//!
//! 3. Links, as one alternation ordered from longest to shortest spelling.
//!
//! 4. Node shape delimiters, two-character ones before the one-character
//!    delimiters that are their prefixes.
//!
//! 5. `;`, `&`, and `|`.
//!
//! 6. Double-quoted strings.
//!
//! 7. Identifiers.
//!
//! Every pattern is anchored at the start of the input.  The [regex] crate
//! matches in time linear in the length of the input, including the lazy span
//! inside front matter.

use std::sync::LazyLock;

use enum_iterator::Sequence;
use regex::Regex;
use serde::Serialize;
use thiserror::Error as ThisError;

use super::token::TokenKind;

/// The type of a segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize)]
pub enum Segment {
    /// One or more white space characters, including new-lines.
    Whitespace,

    /// A front matter block: a `---` line, arbitrary content, and a closing
    /// `---`.
    FrontMatter,

    /// A configuration directive such as `%%{init: {"theme": "dark"}}%%`.
    Configuration,

    /// A comment from `%%` to the end of the line.
    Comment,

    /// `flowchart` or `graph`.
    FlowchartDeclaration,

    /// `TB`, `TD`, `BT`, `RL`, or `LR`.
    Direction,

    /// `subgraph`.
    SubgraphOpen,

    /// `end`.
    SubgraphClose,

    /// An arrow or line between nodes.
    Link,

    /// `[(`.
    CylinderOpen,

    /// `)]`.
    CylinderClose,

    /// `((`.
    CircleOpen,

    /// `))`.
    CircleClose,

    /// `(`.
    RoundOpen,

    /// `)`.
    RoundClose,

    /// `[`.
    SquareOpen,

    /// `]`.
    SquareClose,

    /// `>`.
    AsymmetricOpen,

    /// `]`, shadowed by [Segment::SquareClose].
    AsymmetricClose,

    /// `{`.
    RhombusOpen,

    /// `}`.
    RhombusClose,

    /// `;`.
    Semicolon,

    /// `&`.
    Ampersand,

    /// `|`.
    Pipe,

    /// A double-quoted string.
    String,

    /// An identifier.
    Identifier,
}

impl Segment {
    /// Returns true if scanning discards segments of this type.
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::FrontMatter | Self::Configuration | Self::Comment
        )
    }

    /// Returns the kind of token that segments of this type become, or `None`
    /// if they are ignored.
    pub fn token_kind(&self) -> Option<TokenKind> {
        match self {
            Self::Whitespace | Self::FrontMatter | Self::Configuration | Self::Comment => None,
            Self::FlowchartDeclaration => Some(TokenKind::FlowchartDeclaration),
            Self::Direction => Some(TokenKind::Direction),
            Self::SubgraphOpen => Some(TokenKind::SubgraphOpen),
            Self::SubgraphClose => Some(TokenKind::SubgraphClose),
            Self::Link => Some(TokenKind::Link),
            Self::CylinderOpen => Some(TokenKind::CylinderOpen),
            Self::CylinderClose => Some(TokenKind::CylinderClose),
            Self::CircleOpen => Some(TokenKind::CircleOpen),
            Self::CircleClose => Some(TokenKind::CircleClose),
            Self::RoundOpen => Some(TokenKind::RoundOpen),
            Self::RoundClose => Some(TokenKind::RoundClose),
            Self::SquareOpen => Some(TokenKind::SquareOpen),
            Self::SquareClose => Some(TokenKind::SquareClose),
            Self::AsymmetricOpen => Some(TokenKind::AsymmetricOpen),
            Self::AsymmetricClose => Some(TokenKind::AsymmetricClose),
            Self::RhombusOpen => Some(TokenKind::RhombusOpen),
            Self::RhombusClose => Some(TokenKind::RhombusClose),
            Self::Semicolon => Some(TokenKind::Semicolon),
            Self::Ampersand => Some(TokenKind::Ampersand),
            Self::Pipe => Some(TokenKind::Pipe),
            Self::String => Some(TokenKind::String),
            Self::Identifier => Some(TokenKind::Identifier),
        }
    }
}

/// A segmentation rule: a pattern anchored at the start of the input, and the
/// type of segment that it produces.
#[derive(Clone, Debug)]
pub struct Rule {
    segment: Segment,
    pattern: Regex,
}

impl Rule {
    fn new(segment: Segment, pattern: &str) -> Self {
        Self {
            segment,
            pattern: Regex::new(&format!("^(?:{pattern})"))
                .unwrap_or_else(|error| panic!("bad pattern for {segment:?}: {error}")),
        }
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// Returns the regular expression for this rule, including its anchor.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Returns the length in bytes of this rule's match at the very start of
    /// `input`, if it matches there with at least one byte.
    pub fn match_len(&self, input: &str) -> Option<usize> {
        self.pattern
            .find(input)
            .map(|m| m.end())
            .filter(|&len| len > 0)
    }
}

// Anything but a line terminator.
const NOT_NEWLINE: &str = r"[^\n\r\x{2028}\x{2029}]";

// White space, including the byte order mark U+FEFF but not U+0085 (NEL).
const WHITESPACE: &str =
    r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(Segment::Whitespace, &format!("{WHITESPACE}+")),
        Rule::new(
            Segment::FrontMatter,
            &format!(r"---{WHITESPACE}*[\r\n]+(?s:.)*?[\r\n]+---"),
        ),
        Rule::new(Segment::Configuration, &format!(r"%%\{{{NOT_NEWLINE}*?\}}%%")),
        Rule::new(Segment::Comment, &format!(r"%%{NOT_NEWLINE}*")),
        Rule::new(Segment::FlowchartDeclaration, r"flowchart|graph"),
        Rule::new(Segment::Direction, r"TB|TD|BT|RL|LR"),
        Rule::new(Segment::SubgraphOpen, r"subgraph"),
        Rule::new(Segment::SubgraphClose, r"end"),
        Rule::new(
            Segment::Link,
            r"<-->|-\.->|==>|---|-->|~~~|o--|--o|x--|--x|\.->|--",
        ),
        Rule::new(Segment::CylinderOpen, r"\[\("),
        Rule::new(Segment::CylinderClose, r"\)\]"),
        Rule::new(Segment::CircleOpen, r"\(\("),
        Rule::new(Segment::CircleClose, r"\)\)"),
        Rule::new(Segment::RoundOpen, r"\("),
        Rule::new(Segment::RoundClose, r"\)"),
        Rule::new(Segment::SquareOpen, r"\["),
        Rule::new(Segment::SquareClose, r"\]"),
        Rule::new(Segment::AsymmetricOpen, r">"),
        Rule::new(Segment::AsymmetricClose, r"\]"),
        Rule::new(Segment::RhombusOpen, r"\{"),
        Rule::new(Segment::RhombusClose, r"\}"),
        Rule::new(Segment::Semicolon, r";"),
        Rule::new(Segment::Ampersand, r"&"),
        Rule::new(Segment::Pipe, r"\|"),
        Rule::new(Segment::String, r#""[^"]*""#),
        Rule::new(Segment::Identifier, r"[\p{L}\p{N}_?？]+"),
    ]
});

/// Returns the segmentation rules in priority order.
///
/// The table is built the first time it is needed and never changes
/// afterward, so any number of threads may segment concurrently.
pub fn rules() -> &'static [Rule] {
    RULES.as_slice()
}

/// No segmentation rule matches at the start of the input.
#[derive(ThisError, Copy, Clone, Debug, PartialEq, Eq)]
#[error("Unexpected character {0:?} in input.")]
pub struct UnexpectedChar(pub char);

/// Divides flowchart syntax into segments.
#[derive(Copy, Clone, Debug)]
pub struct Segmenter {
    rules: &'static [Rule],
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    pub fn new() -> Self {
        Self { rules: rules() }
    }

    /// Returns the segment at the beginning of `input`.
    ///
    /// Returns `Ok(None)` if `input` is empty.  Otherwise, returns
    /// `Ok(Some((len, segment)))`, where `len` is the number of bytes of
    /// `input` in the segment (always at least one, and always on a character
    /// boundary) and `segment` is the type of the first rule that matched.
    ///
    /// Returns an error holding the first character of `input` if no rule
    /// matches.
    pub fn push(&self, input: &str) -> Result<Option<(usize, Segment)>, UnexpectedChar> {
        self.push_with(input, true)
    }

    /// Like [Segmenter::push], but skips the [Segment::FrontMatter] rule if
    /// `front_matter` is false.  A caller that knows no closing delimiter
    /// follows in `input` uses this to avoid scanning to the end of the input
    /// for one.
    pub(crate) fn push_with(
        &self,
        input: &str,
        front_matter: bool,
    ) -> Result<Option<(usize, Segment)>, UnexpectedChar> {
        let Some(c) = input.chars().next() else {
            return Ok(None);
        };
        self.rules
            .iter()
            .filter(|rule| front_matter || rule.segment != Segment::FrontMatter)
            .find_map(|rule| rule.match_len(input).map(|len| (len, rule.segment)))
            .map(Some)
            .ok_or(UnexpectedChar(c))
    }
}
