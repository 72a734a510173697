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

//! Lexical analysis for flowchart diagram source text.
//!
//! The entry point is [tokenize], which turns a whole diagram into a vector of
//! [Token]s ending in [TokenKind::EndOfInput], or fails with a
//! [LexicalError].  The [lex] module documents the two phases behind it.

pub mod lex;
pub mod message;

pub use lex::{
    scan::{tokenize, LexicalError},
    Token, TokenKind,
};
