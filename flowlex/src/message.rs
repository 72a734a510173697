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

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// A line number and column number within flowchart source text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    /// 1-based line number.
    pub line: usize,

    /// 1-based column number.
    ///
    /// Columns count Unicode scalar values, so `開` advances the column by one
    /// just like `A` does.
    pub column: usize,
}

impl Point {
    /// The position of the first character in a source text.
    pub const START: Self = Self { line: 1, column: 1 };

    /// Takes `point`, adds to it the text in `text`, incrementing the line
    /// number for each new-line in `text` and the column number for each
    /// character after the last new-line, and returns the result.
    ///
    /// Only `\n` ends a line.  In `\r\n`, the `\r` is the last character of
    /// the line it ends, and a lone `\r` is an ordinary character.
    pub fn advance(&self, text: &str) -> Self {
        let mut result = *self;
        for line in text.split_inclusive('\n') {
            if line.ends_with('\n') {
                result.line += 1;
                result.column = 1;
            } else {
                result.column += line.chars().count();
            }
        }
        result
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::START
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.line, self.column)
    }
}

/// Location relevant to a diagnostic message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    /// File name, if any.
    pub file_name: Option<String>,

    /// Position within the file, if any.
    pub point: Option<Point>,
}

impl Location {
    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.point.is_none()
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if let Some(file_name) = &self.file_name {
            write!(f, "{file_name}")?;
        }
        if let Some(point) = &self.point {
            if self.file_name.is_some() {
                write!(f, ":")?;
            }
            write!(f, "{point}")?;
        }
        Ok(())
    }
}

/// An error message together with the line of source it refers to.
///
/// Displaying a diagnostic shows the location, the message, and then the
/// source line with a caret under the column in [Location::point].  The caret
/// is positioned by display width, so it stays under the right character even
/// when the line contains wide (e.g. CJK) characters.
pub struct Diagnostic {
    pub location: Location,
    pub text: String,

    /// The 1-based line number and text of the line that [Location::point]
    /// points into, without its line terminator.
    pub source: Option<(usize, String)>,
}

impl Diagnostic {
    /// Extracts line `line` (1-based) from `source`, without its terminator.
    pub fn source_line(source: &str, line: usize) -> Option<(usize, String)> {
        let text = source.split('\n').nth(line.checked_sub(1)?)?;
        let text = text.strip_suffix('\r').unwrap_or(text);
        Some((line, String::from(text)))
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if !self.location.is_empty() {
            write!(f, "{}: ", self.location)?;
        }
        write!(f, "error: {}", self.text)?;

        if let Some((line_number, line)) = &self.source {
            write!(f, "\n{line_number:5} | {line}")?;
            if let Some(point) = self.location.point {
                let prefix = line
                    .char_indices()
                    .nth(point.column.saturating_sub(1))
                    .map_or(line.as_str(), |(offset, _)| &line[..offset]);
                write!(f, "\n      |")?;
                for _ in 0..=prefix.width() {
                    f.write_str(" ")?;
                }
                f.write_str("^")?;
            }
        }
        Ok(())
    }
}

impl Debug for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self, f)
    }
}

#[cfg(test)]
mod test {
    use super::{Diagnostic, Location, Point};

    #[test]
    fn advance_without_newline() {
        assert_eq!(
            Point::START.advance("flowchart"),
            Point {
                line: 1,
                column: 10
            }
        );
        assert_eq!(
            Point::START.advance("開始"),
            Point { line: 1, column: 3 }
        );
    }

    #[test]
    fn advance_across_newlines() {
        let point = Point { line: 3, column: 7 };
        assert_eq!(point.advance("\n  "), Point { line: 4, column: 3 });
        assert_eq!(point.advance("ab\ncd\n"), Point { line: 5, column: 1 });
        assert_eq!(point.advance("\r\n\r\nx"), Point { line: 5, column: 2 });
        assert_eq!(point.advance("a\rb"), Point { line: 3, column: 10 });
        assert_eq!(point.advance(""), point);
    }

    #[test]
    fn location_display() {
        let location = Location {
            file_name: Some(String::from("diagram.mmd")),
            point: Some(Point { line: 2, column: 5 }),
        };
        assert_eq!(location.to_string(), "diagram.mmd:2.5");
        assert_eq!(
            Location {
                file_name: None,
                point: Some(Point { line: 2, column: 5 }),
            }
            .to_string(),
            "2.5"
        );
        assert!(Location::default().is_empty());
    }

    #[test]
    fn source_line() {
        let source = "flowchart TD\r\n  A --> B\n";
        assert_eq!(
            Diagnostic::source_line(source, 1),
            Some((1, String::from("flowchart TD")))
        );
        assert_eq!(
            Diagnostic::source_line(source, 2),
            Some((2, String::from("  A --> B")))
        );
        assert_eq!(Diagnostic::source_line(source, 3), Some((3, String::new())));
        assert_eq!(Diagnostic::source_line(source, 4), None);
        assert_eq!(Diagnostic::source_line(source, 0), None);
    }

    #[test]
    fn caret_under_wide_characters() {
        let diagnostic = Diagnostic {
            location: Location {
                file_name: None,
                point: Some(Point { line: 1, column: 4 }),
            },
            text: String::from("bad"),
            source: Some((1, String::from("開始 @"))),
        };
        assert_eq!(
            diagnostic.to_string(),
            "1.4: error: bad\n    1 | 開始 @\n      |      ^"
        );
    }
}
