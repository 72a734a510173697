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

use std::{
    thread,
    time::{Duration, Instant},
};

use flowlex::{
    lex::{scan::StringScanner, segment::rules},
    message::Point,
    tokenize, LexicalError, Token, TokenKind,
};

fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

const DIAGRAM: &str = r#"---
title: Order processing
---
%%{init: {"theme": "forest"}}%%
flowchart LR
    %% Entry point
    start((Start)) --> check{In stock?}
    check -->|yes| ship[Ship order]
    check -- no --> backorder>Backorder]
    ship & backorder --> db[(Orders)]
    subgraph billing
        invoice("Send invoice") -.-> paid(Paid)
    end
    db ==> billing
"#;

#[test]
fn whole_diagram() {
    use TokenKind::*;

    assert_eq!(
        kinds(DIAGRAM),
        vec![
            FlowchartDeclaration,
            Direction,
            // start((Start)) --> check{In stock?}
            Identifier,
            CircleOpen,
            Identifier,
            CircleClose,
            Link,
            Identifier,
            RhombusOpen,
            Identifier,
            Identifier,
            RhombusClose,
            // check -->|yes| ship[Ship order]
            Identifier,
            Link,
            Pipe,
            Identifier,
            Pipe,
            Identifier,
            SquareOpen,
            Identifier,
            Identifier,
            SquareClose,
            // check -- no --> backorder>Backorder]
            Identifier,
            Link,
            Identifier,
            Link,
            Identifier,
            AsymmetricOpen,
            Identifier,
            SquareClose,
            // ship & backorder --> db[(Orders)]
            Identifier,
            Ampersand,
            Identifier,
            Link,
            Identifier,
            CylinderOpen,
            Identifier,
            CylinderClose,
            // subgraph billing
            SubgraphOpen,
            Identifier,
            // invoice("Send invoice") -.-> paid(Paid)
            Identifier,
            RoundOpen,
            String,
            RoundClose,
            Link,
            Identifier,
            RoundOpen,
            Identifier,
            RoundClose,
            // end
            SubgraphClose,
            // db ==> billing
            Identifier,
            Link,
            Identifier,
            EndOfInput,
        ]
    );
}

#[test]
fn whole_diagram_positions() {
    let tokens = tokenize(DIAGRAM).unwrap();
    let find = |text: &str| {
        tokens
            .iter()
            .find(|token| token.text == text)
            .map(Token::start)
            .unwrap()
    };
    assert_eq!(find("flowchart"), Point { line: 5, column: 1 });
    assert_eq!(find("start"), Point { line: 7, column: 5 });
    assert_eq!(find("\"Send invoice\""), Point { line: 12, column: 17 });
    assert_eq!(find("-.->"), Point { line: 12, column: 33 });
    assert_eq!(find("==>"), Point { line: 14, column: 8 });
    assert_eq!(
        tokens.last().unwrap().start(),
        Point { line: 15, column: 1 }
    );
}

#[test]
fn tokens_are_in_document_order() {
    let tokens = tokenize(DIAGRAM).unwrap();
    assert!(tokens
        .windows(2)
        .all(|pair| pair[0].start() < pair[1].start()));
}

#[test]
fn error_in_diagram() {
    let source = "flowchart TD\n    A --> B\n    B --> C@{ shape: rect }\n";
    let error = tokenize(source).unwrap_err();
    assert_eq!(
        error,
        LexicalError {
            character: '@',
            line: 3,
            column: 12,
            offset: source.find('@').unwrap(),
        }
    );
}

#[test]
fn concurrent_scans() {
    let inputs = [
        DIAGRAM,
        "flowchart TD\nA --> B",
        "graph LR; 開始 --> 成功？",
        "A --> B @ C",
    ];
    let expected = inputs.map(tokenize);
    thread::scope(|scope| {
        let handles = (0..8)
            .map(|i| {
                let input = inputs[i % inputs.len()];
                scope.spawn(move || (i, tokenize(input)))
            })
            .collect::<Vec<_>>();
        for handle in handles {
            let (i, result) = handle.join().unwrap();
            assert_eq!(result, expected[i % inputs.len()]);
        }
    });
}

#[test]
fn scanner_is_lazy() {
    // Tokens before an error are still available to the caller.
    let tokens = StringScanner::new("A --> B @ C")
        .map_while(Result::ok)
        .map(|token| token.text)
        .collect::<Vec<_>>();
    assert_eq!(tokens, vec!["A", "-->", "B"]);
}

#[test]
fn rule_table_is_shared() {
    assert!(std::ptr::eq(rules(), rules()));
}

#[test]
fn unterminated_front_matter_is_linear() {
    // Every `---` here looks like the start of front matter, but none has a
    // closing delimiter.
    let input = format!("---\n{}", "X---\n".repeat(20_000));
    let start = Instant::now();
    let tokens = tokenize(&input).unwrap();
    let elapsed = start.elapsed();
    assert_eq!(tokens.len(), 1 + 2 * 20_000 + 1);
    assert!(
        tokens[..tokens.len() - 1]
            .iter()
            .all(|token| matches!(token.kind, TokenKind::Link | TokenKind::Identifier))
    );
    assert!(elapsed < Duration::from_secs(10), "took {elapsed:?}");

    // Closing the front matter at the very end makes it all one segment.
    let input = format!("{input}---");
    assert_eq!(kinds(&input), [TokenKind::EndOfInput]);
}
