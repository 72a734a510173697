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

//! Flowchart syntax scanning.
//!
//! Flowchart tokenization is divided into two phases: a lower-level phase
//! called "segmentation" and a higher-level phase called "scanning".
//! [super::segment] implements the segmentation phase and this module the
//! scanning phase.
//!
//! Scanning accepts as input a stream of segments, which are slices of the
//! input each labeled with a segment type.  It drops ignorable segments, turns
//! the others into [Token]s that record where they start, and finishes with a
//! single [TokenKind::EndOfInput] token.

use std::iter::FusedIterator;

use log::{debug, trace};
use thiserror::Error as ThisError;

#[cfg(doc)]
use super::token::TokenKind;

use super::{
    segment::{Segment, Segmenter, UnexpectedChar},
    token::Token,
};
use crate::message::{Diagnostic, Location, Point};

/// No rule matches the input at a position.
///
/// Scanning stops at the first such position.  There is no recovery.
#[derive(ThisError, Clone, Debug, PartialEq, Eq)]
#[error("Lexical Error: Unexpected character at line {line}, column {column}: {character}")]
pub struct LexicalError {
    /// The character that no rule matches.
    pub character: char,

    /// 1-based line number of `character`.
    pub line: usize,

    /// 1-based column number of `character`.
    pub column: usize,

    /// Byte offset of `character` in the input.
    pub offset: usize,
}

impl LexicalError {
    /// Returns the position of the unexpected character.
    pub fn point(&self) -> Point {
        Point {
            line: self.line,
            column: self.column,
        }
    }

    /// Returns a diagnostic for this error that quotes the offending line of
    /// `source`, which should be the text that was scanned.
    pub fn diagnostic(&self, source: &str, file_name: Option<&str>) -> Diagnostic {
        Diagnostic {
            location: Location {
                file_name: file_name.map(String::from),
                point: Some(self.point()),
            },
            text: self.to_string(),
            source: Diagnostic::source_line(source, self.line),
        }
    }
}

/// Iterates over every segment in a string, including ignorable ones.
///
/// Concatenating the segments' text reproduces the input, up to the first
/// error if there is one.  Iteration ends after an error.
pub struct StringSegmenter<'a> {
    input: &'a str,
    offset: usize,
    segmenter: Segmenter,
    failed: bool,

    /// Byte offset of the last `---` in `input` that directly follows a line
    /// break, if any.  Front matter can only end there or earlier.
    last_close: Option<usize>,
}

impl<'a> StringSegmenter<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            segmenter: Segmenter::new(),
            failed: false,
            last_close: last_front_matter_close(input),
        }
    }

    /// Returns the number of bytes of input consumed so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the input not yet consumed.
    pub fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }
}

impl<'a> Iterator for StringSegmenter<'a> {
    type Item = Result<(&'a str, Segment), UnexpectedChar>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let rest = self.rest();

        // Front matter opens with three bytes and needs at least one line
        // break before its closing `---`.
        let front_matter = self
            .last_close
            .is_some_and(|close| close > self.offset + 3);
        match self.segmenter.push_with(rest, front_matter) {
            Ok(Some((seg_len, seg_type))) => {
                self.offset += seg_len;
                Some(Ok((&rest[..seg_len], seg_type)))
            }
            Ok(None) => None,
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

impl FusedIterator for StringSegmenter<'_> {}

fn last_front_matter_close(input: &str) -> Option<usize> {
    input
        .as_bytes()
        .windows(4)
        .rposition(|w| matches!(w[0], b'\r' | b'\n') && &w[1..] == b"---")
        .map(|i| i + 1)
}

/// Iterates over the tokens in a string.
///
/// The last item is either a [TokenKind::EndOfInput] token or a
/// [LexicalError].  Nothing follows either one.
pub struct StringScanner<'a> {
    segments: StringSegmenter<'a>,
    point: Point,
    n_tokens: usize,
    done: bool,
}

impl<'a> StringScanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            segments: StringSegmenter::new(input),
            point: Point::START,
            n_tokens: 0,
            done: false,
        }
    }

    /// Returns the position just past the input consumed so far.
    pub fn point(&self) -> Point {
        self.point
    }
}

impl Iterator for StringScanner<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let start = self.point;
            match self.segments.next() {
                Some(Ok((s, seg_type))) => {
                    trace!("{seg_type:?} {s:?} at {start}");
                    self.point = start.advance(s);
                    if let Some(kind) = seg_type.token_kind() {
                        self.n_tokens += 1;
                        return Some(Ok(Token::new(kind, s, start)));
                    }
                }
                Some(Err(UnexpectedChar(character))) => {
                    self.done = true;
                    let error = LexicalError {
                        character,
                        line: start.line,
                        column: start.column,
                        offset: self.segments.offset(),
                    };
                    debug!("scanning failed after {} tokens: {error}", self.n_tokens);
                    return Some(Err(error));
                }
                None => {
                    self.done = true;
                    debug!("scanned {} tokens, ending at {start}", self.n_tokens);
                    return Some(Ok(Token::end_of_input(start)));
                }
            }
        }
    }
}

impl FusedIterator for StringScanner<'_> {}

/// Scans all of `input` into tokens.
///
/// On success, the last token is the only [TokenKind::EndOfInput] token, and it
/// is positioned just past the last character of `input`.  An empty input, or
/// one that contains only white space and comments, yields just that token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexicalError> {
    StringScanner::new(input).collect()
}
