// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The line-oriented tokenizer: a pure per-line classifier plus the small
//! state doc strings require.

use crate::{
    ast::{DocStringDelimiter, KeywordType, ScenarioKind},
    keywords::{self, HeaderKind, Keywords, StepBucket},
    location::Location,
};

/// A `@`-tagged span on a `TagLine`, with its own column for `Tag::location`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSpan {
    pub text: String,
    pub column: usize,
}

/// A single `|`-delimited cell on a `TableRow` token, with its own column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellSpan {
    pub value: String,
    pub column: usize,
}

/// One classified line of Gherkin source, as produced by [`crate::tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    FeatureLine {
        location: Location,
        keyword: &'static str,
        name: String,
    },
    RuleLine {
        location: Location,
        keyword: &'static str,
        name: String,
    },
    BackgroundLine {
        location: Location,
        keyword: &'static str,
        name: String,
    },
    ScenarioLine {
        location: Location,
        keyword: &'static str,
        name: String,
        kind: ScenarioKind,
    },
    ExamplesLine {
        location: Location,
        keyword: &'static str,
        name: String,
    },
    StepLine {
        location: Location,
        /// Includes the trailing separator (a space, or `"* "`).
        keyword: String,
        keyword_type: KeywordType,
        text: String,
    },
    DocStringSeparator {
        location: Location,
        delimiter: DocStringDelimiter,
        media_type: Option<String>,
    },
    TableRow {
        location: Location,
        cells: Vec<CellSpan>,
    },
    TagLine {
        location: Location,
        tags: Vec<TagSpan>,
    },
    CommentLine {
        location: Location,
        text: String,
    },
    Language {
        location: Location,
        code: String,
    },
    Empty {
        location: Location,
    },
    Other {
        location: Location,
        raw_text: String,
    },
    Eof {
        location: Location,
    },
}

/// A bare description of a [`Token`]'s shape, used in error payloads where
/// carrying the full token would be redundant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    FeatureLine,
    RuleLine,
    BackgroundLine,
    ScenarioLine,
    ExamplesLine,
    StepLine,
    DocStringSeparator,
    TableRow,
    TagLine,
    CommentLine,
    Language,
    Empty,
    Other,
    Eof,
}

impl Token {
    /// The token's source position (1-based line, code-point column where
    /// the token kind carries one).
    pub fn location(&self) -> Location {
        match self {
            Token::FeatureLine { location, .. }
            | Token::RuleLine { location, .. }
            | Token::BackgroundLine { location, .. }
            | Token::ScenarioLine { location, .. }
            | Token::ExamplesLine { location, .. }
            | Token::StepLine { location, .. }
            | Token::DocStringSeparator { location, .. }
            | Token::TableRow { location, .. }
            | Token::TagLine { location, .. }
            | Token::CommentLine { location, .. }
            | Token::Language { location, .. }
            | Token::Empty { location }
            | Token::Other { location, .. }
            | Token::Eof { location } => *location,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::FeatureLine { .. } => TokenKind::FeatureLine,
            Token::RuleLine { .. } => TokenKind::RuleLine,
            Token::BackgroundLine { .. } => TokenKind::BackgroundLine,
            Token::ScenarioLine { .. } => TokenKind::ScenarioLine,
            Token::ExamplesLine { .. } => TokenKind::ExamplesLine,
            Token::StepLine { .. } => TokenKind::StepLine,
            Token::DocStringSeparator { .. } => TokenKind::DocStringSeparator,
            Token::TableRow { .. } => TokenKind::TableRow,
            Token::TagLine { .. } => TokenKind::TagLine,
            Token::CommentLine { .. } => TokenKind::CommentLine,
            Token::Language { .. } => TokenKind::Language,
            Token::Empty { .. } => TokenKind::Empty,
            Token::Other { .. } => TokenKind::Other,
            Token::Eof { .. } => TokenKind::Eof,
        }
    }
}

/// `Normal ⇄ InDocString(delim)`, plus the one extra bit the `# language:`
/// rule needs (it is only honored on the first non-empty, non-comment
/// line). Transitions out of `InDocString` occur only by matching the
/// opening delimiter exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    Normal,
    InDocString(DocStringDelimiter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LexerState {
    pub mode: Mode,
    pub seen_non_trivial: bool,
}

impl Default for LexerState {
    fn default() -> Self {
        LexerState {
            mode: Mode::Normal,
            seen_non_trivial: false,
        }
    }
}

/// Classifies a single line. Pure given `(line, line_number, state,
/// keywords)`; the only state carried forward is `LexerState`.
pub(crate) fn classify_line(
    line: &str,
    line_number: usize,
    state: LexerState,
    keywords: &Keywords,
) -> (Token, LexerState) {
    let trimmed = line.trim();
    let leading_ws = line.len() - line.trim_start().len();
    let column = leading_ws + 1;
    let loc = Location::new(line_number, column);

    if let Mode::InDocString(delim) = state.mode {
        if trimmed == delim.as_str() {
            let token = Token::DocStringSeparator {
                location: loc,
                delimiter: delim,
                media_type: None,
            };
            return (
                token,
                LexerState {
                    mode: Mode::Normal,
                    seen_non_trivial: true,
                },
            );
        }
        return (
            Token::Other {
                location: Location::without_column(line_number),
                raw_text: line.to_string(),
            },
            state,
        );
    }

    if trimmed.is_empty() {
        return (
            Token::Empty {
                location: Location::without_column(line_number),
            },
            state,
        );
    }

    if let Some(rest) = trimmed.strip_prefix('#') {
        if !state.seen_non_trivial {
            if let Some(code) = parse_language_directive(rest) {
                return (
                    Token::Language { location: loc, code },
                    LexerState {
                        mode: Mode::Normal,
                        seen_non_trivial: true,
                    },
                );
            }
        }
        return (
            Token::CommentLine {
                location: loc,
                text: trimmed.to_string(),
            },
            state,
        );
    }

    if trimmed.starts_with('@') {
        let tags = parse_tags(line, leading_ws);
        if !tags.is_empty() {
            return (
                Token::TagLine {
                    location: loc,
                    tags,
                },
                seen(state),
            );
        }
    }

    if trimmed.starts_with('|') {
        let cells = parse_table_row(line, leading_ws);
        return (
            Token::TableRow {
                location: loc,
                cells,
            },
            seen(state),
        );
    }

    if let Some((delim, media_type)) = parse_doc_string_opener(trimmed) {
        return (
            Token::DocStringSeparator {
                location: loc,
                delimiter: delim,
                media_type,
            },
            LexerState {
                mode: Mode::InDocString(delim),
                seen_non_trivial: true,
            },
        );
    }

    if let Some((kind, keyword, name)) = keywords::match_header(keywords, trimmed) {
        let name = name.trim().to_string();
        let token = match kind {
            HeaderKind::Feature => Token::FeatureLine {
                location: loc,
                keyword,
                name,
            },
            HeaderKind::Rule => Token::RuleLine {
                location: loc,
                keyword,
                name,
            },
            HeaderKind::Background => Token::BackgroundLine {
                location: loc,
                keyword,
                name,
            },
            HeaderKind::Scenario => Token::ScenarioLine {
                location: loc,
                keyword,
                name,
                kind: ScenarioKind::Scenario,
            },
            HeaderKind::ScenarioOutline => Token::ScenarioLine {
                location: loc,
                keyword,
                name,
                kind: ScenarioKind::ScenarioOutline,
            },
            HeaderKind::Examples => Token::ExamplesLine {
                location: loc,
                keyword,
                name,
            },
        };
        return (token, seen(state));
    }

    if let Some((bucket, keyword, text)) = keywords::match_step(keywords, trimmed) {
        let separator = if matches!(bucket, StepBucket::Star) {
            "* ".to_string()
        } else {
            format!("{keyword} ")
        };
        let token = Token::StepLine {
            location: loc,
            keyword: separator,
            keyword_type: bucket.keyword_type(),
            text: text.trim().to_string(),
        };
        return (token, seen(state));
    }

    (
        Token::Other {
            location: Location::without_column(line_number),
            raw_text: line.to_string(),
        },
        seen(state),
    )
}

/// Scans `source` for a `# language:` directive before any non-empty,
/// non-comment line, without needing a language-specific keyword table
/// (the directive's own syntax is language-invariant). Returns the code
/// and the directive's location if found.
pub(crate) fn detect_language(source: &crate::source::Source) -> Option<(String, Location)> {
    for line_no in 1..=source.line_count() {
        let line = source.line(line_no).unwrap();
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix('#') {
            if let Some(code) = parse_language_directive(rest) {
                let leading_ws = line.len() - line.trim_start().len();
                return Some((code, Location::new(line_no, leading_ws + 1)));
            }
            continue;
        }
        return None;
    }
    None
}

fn seen(state: LexerState) -> LexerState {
    LexerState {
        mode: state.mode,
        seen_non_trivial: true,
    }
}

/// `# language: <code>`, whitespace-tolerant around `:`.
fn parse_language_directive(after_hash: &str) -> Option<String> {
    let rest = after_hash.trim_start();
    let rest = rest.strip_prefix("language")?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(':')?;
    let code = rest.trim();
    if code.is_empty() || !is_language_code(code) {
        return None;
    }
    Some(code.to_string())
}

fn is_language_code(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphabetic() || c == '-')
}

/// Splits `@a @b` into tags, dropping a bare `@` with nothing after it
/// (Open Question (b): rejected rather than kept as a zero-length tag).
fn parse_tags(line: &str, leading_ws: usize) -> Vec<TagSpan> {
    let mut tags = vec![];
    let mut col = leading_ws;
    for word in line[leading_ws..].split_whitespace() {
        let start = find_word_start(line, col, word);
        col = start + word.len();
        if let Some(rest) = word.strip_prefix('@') {
            if !rest.is_empty() {
                tags.push(TagSpan {
                    text: word.to_string(),
                    column: char_column(line, start),
                });
            }
        }
    }
    tags
}

fn find_word_start(line: &str, from: usize, word: &str) -> usize {
    line[from..]
        .find(word)
        .map(|i| from + i)
        .unwrap_or(from)
}

/// Converts a byte offset into `line` to a 1-based code-point column.
fn char_column(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count() + 1
}

/// Splits a `|`-delimited row into cells, honoring `\|`, `\\`, `\n` escapes
/// and dropping the leading/trailing empty segments the outer pipes leave
/// behind. Cell text is trimmed on both sides (Open Question (a)).
fn parse_table_row(line: &str, leading_ws: usize) -> Vec<CellSpan> {
    let body = &line[leading_ws..];
    let mut cells = vec![];
    let mut current = String::new();
    let mut current_col: Option<usize> = None;
    let mut chars = body.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '\\' => {
                if let Some(&(_, next)) = chars.peek() {
                    match next {
                        '|' => {
                            current.push('|');
                            chars.next();
                        }
                        '\\' => {
                            current.push('\\');
                            chars.next();
                        }
                        'n' => {
                            current.push('\n');
                            chars.next();
                        }
                        _ => current.push(ch),
                    }
                } else {
                    current.push(ch);
                }
            }
            '|' => {
                let value = current.trim().to_string();
                let byte_offset = leading_ws + current_col.unwrap_or(idx);
                let column = char_column(line, byte_offset);
                cells.push(CellSpan { value, column });
                current.clear();
                current_col = None;
            }
            _ => {
                if current_col.is_none() {
                    current_col = Some(idx);
                }
                current.push(ch);
            }
        }
    }

    // `body` starts and ends with `|`; the split above produces a leading
    // empty cell (before the first `|`) that must be dropped, and the
    // segment after the final `|` (whitespace only) is never pushed.
    if !cells.is_empty() {
        cells.remove(0);
    }
    cells
}

/// Matches `"""` or ` ``` ` optionally followed by a media type.
fn parse_doc_string_opener(trimmed: &str) -> Option<(DocStringDelimiter, Option<String>)> {
    for (delim, token) in [
        (DocStringDelimiter::DoubleQuote, "\"\"\""),
        (DocStringDelimiter::Backtick, "```"),
    ] {
        if let Some(rest) = trimmed.strip_prefix(token) {
            let media_type = rest.trim();
            let media_type = if media_type.is_empty() {
                None
            } else {
                Some(media_type.to_string())
            };
            return Some((delim, media_type));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keywords::lookup;

    fn en() -> &'static Keywords {
        lookup("en").unwrap()
    }

    #[test]
    fn empty_line() {
        let (token, state) = classify_line("   ", 1, LexerState::default(), en());
        assert!(matches!(token, Token::Empty { .. }));
        assert!(!state.seen_non_trivial);
    }

    #[test]
    fn feature_line() {
        let (token, _) = classify_line("Feature: Foo", 1, LexerState::default(), en());
        match token {
            Token::FeatureLine { name, keyword, .. } => {
                assert_eq!(name, "Foo");
                assert_eq!(keyword, "Feature");
            }
            _ => panic!("expected FeatureLine"),
        }
    }

    #[test]
    fn scenario_outline_is_distinguished() {
        let (token, _) = classify_line("Scenario Outline: Foo", 1, LexerState::default(), en());
        match token {
            Token::ScenarioLine { kind, .. } => assert_eq!(kind, ScenarioKind::ScenarioOutline),
            _ => panic!("expected ScenarioLine"),
        }
    }

    #[test]
    fn step_line_keyword_has_trailing_space() {
        let (token, _) = classify_line("Given a thing", 1, LexerState::default(), en());
        match token {
            Token::StepLine { keyword, text, .. } => {
                assert_eq!(keyword, "Given ");
                assert_eq!(text, "a thing");
            }
            _ => panic!("expected StepLine"),
        }
    }

    #[test]
    fn star_step() {
        let (token, _) = classify_line("* a thing", 1, LexerState::default(), en());
        match token {
            Token::StepLine {
                keyword,
                keyword_type,
                ..
            } => {
                assert_eq!(keyword, "* ");
                assert_eq!(keyword_type, KeywordType::Unknown);
            }
            _ => panic!("expected StepLine"),
        }
    }

    #[test]
    fn table_row_splits_and_trims() {
        let (token, _) = classify_line("| a | b c |", 1, LexerState::default(), en());
        match token {
            Token::TableRow { cells, .. } => {
                assert_eq!(cells.len(), 2);
                assert_eq!(cells[0].value, "a");
                assert_eq!(cells[1].value, "b c");
            }
            _ => panic!("expected TableRow"),
        }
    }

    #[test]
    fn table_row_escapes() {
        let (token, _) = classify_line(r"| a\|b | c\\d | e\nf |", 1, LexerState::default(), en());
        match token {
            Token::TableRow { cells, .. } => {
                assert_eq!(cells[0].value, "a|b");
                assert_eq!(cells[1].value, r"c\d");
                assert_eq!(cells[2].value, "e\nf");
            }
            _ => panic!("expected TableRow"),
        }
    }

    #[test]
    fn tag_line_multiple_tags() {
        let (token, _) = classify_line("@a @bb @ccc", 1, LexerState::default(), en());
        match token {
            Token::TagLine { tags, .. } => {
                assert_eq!(tags.len(), 3);
                assert_eq!(tags[0].text, "@a");
                assert_eq!(tags[2].text, "@ccc");
            }
            _ => panic!("expected TagLine"),
        }
    }

    #[test]
    fn bare_at_is_dropped() {
        let (token, _) = classify_line("@ok @", 1, LexerState::default(), en());
        match token {
            Token::TagLine { tags, .. } => {
                assert_eq!(tags.len(), 1);
                assert_eq!(tags[0].text, "@ok");
            }
            _ => panic!("expected TagLine"),
        }
    }

    #[test]
    fn doc_string_opener_with_media_type() {
        let (token, state) = classify_line("```json", 1, LexerState::default(), en());
        match token {
            Token::DocStringSeparator {
                delimiter,
                media_type,
                ..
            } => {
                assert_eq!(delimiter, DocStringDelimiter::Backtick);
                assert_eq!(media_type.as_deref(), Some("json"));
            }
            _ => panic!("expected DocStringSeparator"),
        }
        assert_eq!(state.mode, Mode::InDocString(DocStringDelimiter::Backtick));
    }

    #[test]
    fn doc_string_body_is_other_until_closed() {
        let (_, state) = classify_line("```", 1, LexerState::default(), en());
        let (token, state2) = classify_line("Given inside", 2, state, en());
        assert!(matches!(token, Token::Other { .. }));
        let (closer, state3) = classify_line("```", 3, state2, en());
        assert!(matches!(closer, Token::DocStringSeparator { .. }));
        assert_eq!(state3.mode, Mode::Normal);
    }

    #[test]
    fn language_directive_only_on_first_non_trivial_line() {
        let (_, state) = classify_line("# language: fr", 1, LexerState::default(), en());
        assert!(state.seen_non_trivial);

        let mid_state = LexerState {
            mode: Mode::Normal,
            seen_non_trivial: true,
        };
        let (token, _) = classify_line("# language: fr", 2, mid_state, en());
        assert!(matches!(token, Token::CommentLine { .. }));
    }

    #[test]
    fn comment_line() {
        let (token, _) = classify_line("# just a comment", 1, LexerState::default(), en());
        assert!(matches!(token, Token::CommentLine { .. }));
    }
}
