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

use std::fmt::{Display, Formatter, Result as FmtResult};

use enum_iterator::Sequence;
use serde::Serialize;

use crate::message::Point;

/// The kind of a [Token].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Sequence, Serialize)]
pub enum TokenKind {
    /// `flowchart` or `graph`.
    FlowchartDeclaration,

    /// `TB`, `TD`, `BT`, `RL`, or `LR`.
    Direction,

    /// `subgraph`.
    SubgraphOpen,

    /// `end`.
    SubgraphClose,

    /// An arrow or line between nodes, such as `-->`, `---`, `==>`, `-.->`,
    /// or `--` at the start of link text.
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
    ///
    /// This also closes an asymmetric shape opened by `>`.  The scanner
    /// cannot tell the two apart, so it always produces `SquareClose`.
    SquareClose,

    /// `>`.
    AsymmetricOpen,

    /// `]` closing an asymmetric shape.
    ///
    /// The scanner never produces this kind, because its rule shares the `]`
    /// literal with [TokenKind::SquareClose], which has priority.  It exists
    /// for parsers that reclassify a `]` by context.
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

    /// A double-quoted string, including the quotes.  There is no escape
    /// syntax, so the string ends at the next `"`.
    String,

    /// A node identifier or label word: a run of Unicode letters and digits,
    /// `_`, `?`, and fullwidth `？`.
    Identifier,

    /// End of input.  Always the last token, and never anywhere else.
    EndOfInput,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FlowchartDeclaration => "FlowchartDeclaration",
            Self::Direction => "Direction",
            Self::SubgraphOpen => "SubgraphOpen",
            Self::SubgraphClose => "SubgraphClose",
            Self::Link => "Link",
            Self::CylinderOpen => "CylinderOpen",
            Self::CylinderClose => "CylinderClose",
            Self::CircleOpen => "CircleOpen",
            Self::CircleClose => "CircleClose",
            Self::RoundOpen => "RoundOpen",
            Self::RoundClose => "RoundClose",
            Self::SquareOpen => "SquareOpen",
            Self::SquareClose => "SquareClose",
            Self::AsymmetricOpen => "AsymmetricOpen",
            Self::AsymmetricClose => "AsymmetricClose",
            Self::RhombusOpen => "RhombusOpen",
            Self::RhombusClose => "RhombusClose",
            Self::Semicolon => "Semicolon",
            Self::Ampersand => "Ampersand",
            Self::Pipe => "Pipe",
            Self::String => "String",
            Self::Identifier => "Identifier",
            Self::EndOfInput => "EndOfInput",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A token in flowchart syntax.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,

    /// The source text of the token, exactly as written.  For
    /// [TokenKind::EndOfInput] this is [Token::END_OF_INPUT_TEXT].
    pub text: String,

    /// 1-based line number of the token's first character.
    pub line: usize,

    /// 1-based column number of the token's first character.
    pub column: usize,
}

impl Token {
    /// The text carried by [TokenKind::EndOfInput] tokens.
    pub const END_OF_INPUT_TEXT: &'static str = "EOF";

    pub fn new(kind: TokenKind, text: impl Into<String>, start: Point) -> Self {
        Self {
            kind,
            text: text.into(),
            line: start.line,
            column: start.column,
        }
    }

    /// Returns an end-of-input token at `point`, which should be the position
    /// just past the last character of the input.
    pub fn end_of_input(point: Point) -> Self {
        Self::new(TokenKind::EndOfInput, Self::END_OF_INPUT_TEXT, point)
    }

    /// Returns the position of the token's first character.
    pub fn start(&self) -> Point {
        Point {
            line: self.line,
            column: self.column,
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == TokenKind::EndOfInput
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {:?} at {}", self.kind, self.text, self.start())
    }
}

#[cfg(test)]
mod test {
    use enum_iterator::all;

    use crate::{
        lex::token::{Token, TokenKind},
        message::Point,
    };

    #[test]
    fn kind_names_are_unique() {
        let mut names = all::<TokenKind>().map(|kind| kind.as_str()).collect::<Vec<_>>();
        let n = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), n);
        assert_eq!(n, 23);
    }

    #[test]
    fn kind_display_matches_debug() {
        for kind in all::<TokenKind>() {
            assert_eq!(kind.to_string(), format!("{kind:?}"));
        }
    }

    #[test]
    fn display() {
        let token = Token::new(TokenKind::Identifier, "開始", Point { line: 2, column: 5 });
        assert_eq!(token.to_string(), r#"Identifier "開始" at 2.5"#);
        assert_eq!(
            Token::end_of_input(Point::START).to_string(),
            r#"EndOfInput "EOF" at 1.1"#
        );
    }

    #[test]
    fn start() {
        let token = Token::new(TokenKind::Link, "-->", Point { line: 3, column: 9 });
        assert_eq!(token.start(), Point { line: 3, column: 9 });
        assert!(!token.is_end_of_input());
        assert!(Token::end_of_input(token.start()).is_end_of_input());
    }

    #[test]
    fn serialize() {
        let token = Token::new(TokenKind::Direction, "TD", Point { line: 1, column: 11 });
        assert_eq!(
            serde_json::to_string(&token).unwrap(),
            r#"{"kind":"Direction","text":"TD","line":1,"column":11}"#
        );
    }
}
