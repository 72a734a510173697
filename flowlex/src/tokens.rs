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

use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use flowlex::{
    lex::{
        scan::StringSegmenter,
        segment::{Segment, UnexpectedChar},
    },
    message::Point,
    tokenize, LexicalError,
};
use log::info;
use serde::Serialize;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs::read_to_string,
    io::{read_to_string as read_all, stdin, stdout, Write},
    path::PathBuf,
};

/// Show the tokens in a flowchart syntax file.
#[derive(Args, Clone, Debug)]
pub struct Tokens {
    /// Flowchart syntax file to read, or `-` for standard input.
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Show every segment, including white space, comments, configuration
    /// directives, and front matter, instead of just the tokens.
    #[arg(long)]
    segments: bool,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t)]
    format: ShowFormat,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
enum ShowFormat {
    /// One item per line, for humans.
    #[default]
    Text,

    /// A single JSON array.
    Json,

    /// Newline-delimited JSON, one item per line.
    Ndjson,
}

/// One segment, for output.
#[derive(Serialize)]
struct SegmentItem<'a> {
    segment: Segment,
    text: &'a str,
    line: usize,
    column: usize,
}

impl Display for SegmentItem<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{:?} {:?} at {}.{}",
            self.segment, self.text, self.line, self.column
        )
    }
}

impl Tokens {
    fn file_name(&self) -> Option<String> {
        (self.input.as_os_str() != "-").then(|| self.input.display().to_string())
    }

    fn read(&self) -> Result<String> {
        match self.file_name() {
            Some(file_name) => read_to_string(&self.input)
                .map_err(|error| anyhow!("{file_name}: {error}")),
            None => Ok(read_all(stdin())?),
        }
    }

    pub fn run(self) -> Result<()> {
        let source = self.read()?;
        let file_name = self.file_name();
        let diagnose =
            |error: LexicalError| anyhow!("{}", error.diagnostic(&source, file_name.as_deref()));
        if self.segments {
            let items = segments(&source).map_err(diagnose)?;
            write_items(self.format, &items)
        } else {
            let tokens = tokenize(&source).map_err(diagnose)?;
            write_items(self.format, &tokens)
        }
    }
}

fn segments(source: &str) -> Result<Vec<SegmentItem<'_>>, LexicalError> {
    let mut segmenter = StringSegmenter::new(source);
    let mut point = Point::START;
    let mut items = Vec::new();
    while let Some(segment) = segmenter.next() {
        match segment {
            Ok((text, segment)) => {
                items.push(SegmentItem {
                    segment,
                    text,
                    line: point.line,
                    column: point.column,
                });
                point = point.advance(text);
            }
            Err(UnexpectedChar(character)) => {
                return Err(LexicalError {
                    character,
                    line: point.line,
                    column: point.column,
                    offset: segmenter.offset(),
                });
            }
        }
    }
    info!("{} segments", items.len());
    Ok(items)
}

fn write_items<T>(format: ShowFormat, items: &[T]) -> Result<()>
where
    T: Serialize + Display,
{
    let mut writer = stdout().lock();
    match format {
        ShowFormat::Text => {
            for item in items {
                writeln!(writer, "{item}")?;
            }
        }
        ShowFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, items)?;
            writeln!(writer)?;
        }
        ShowFormat::Ndjson => {
            for item in items {
                serde_json::to_writer(&mut writer, item)?;
                writeln!(writer)?;
            }
        }
    }
    Ok(())
}
