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

//! Lexical analysis for flowchart syntax.
//!
//! Tokenization happens in two phases:
//!
//! 1. A low level called "segmentation", implemented in the [segment] module.
//!    This applies a fixed, prioritized table of anchored patterns to the
//!    start of the input and labels each match with a
//!    [Segment](segment::Segment).  Every byte of the input belongs to exactly
//!    one segment.
//!
//! 2. A higher level called "scanning", implemented in the [scan] module.
//!    This drops ignorable segments (white space, comments, configuration
//!    directives, front matter), turns the rest into [Token]s, and tracks the
//!    line and column where each token starts.

// Warn about missing docs, but not for items declared with `#[cfg(test)]`.
#![cfg_attr(not(test), warn(missing_docs))]

pub mod scan;
pub mod segment;
mod token;
pub use token::{Token, TokenKind};
