// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The recursive-descent parser: consumes the token stream and builds a
//! [`GherkinDocument`], or raises the first fatal [`ParserError`].

use crate::{
    ast::{
        Background, Comment, DataTable, DocString, Examples, Feature, FeatureChild,
        GherkinDocument, IdGenerator, Rule, RuleChild, Scenario, ScenarioKind, Step, StepArgument,
        Tag, TableCell, TableRow,
    },
    error::{Errors, ParserError},
    keywords,
    lexer::{self, tokenize_with_language},
    location::Location,
    source::Source,
    token::{self, Token, TokenKind},
};

/// Parses a whole [`Source`] into a [`GherkinDocument`].
///
/// On success, the tree satisfies every invariant in the data model (table
/// uniformity, step-keyword discipline, source-order children). On
/// failure, no partial tree is returned: the first fatal error is wrapped
/// in a one-element [`Errors`] list.
pub fn parse(source: &Source) -> Result<GherkinDocument, Errors> {
    let directive = token::detect_language(source);

    let (language, keywords) = match &directive {
        Some((code, location)) => match keywords::lookup(code) {
            Some(kw) => (code.clone(), kw),
            None => {
                return Err(Errors::single(ParserError::UnknownLanguage {
                    code: code.clone(),
                    location: *location,
                }))
            }
        },
        None => (
            keywords::DEFAULT_LANGUAGE.to_string(),
            lexer::resolve_language(None).expect("default language is always registered"),
        ),
    };

    let tokens = tokenize_with_language(source, keywords);
    let mut parser = Parser {
        tokens,
        pos: 0,
        ids: IdGenerator::default(),
        comments: vec![],
        source: source.clone(),
    };

    parser
        .parse_document(language)
        .map_err(|e| Errors::single(e))
}

pub(crate) struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    ids: IdGenerator,
    comments: Vec<Comment>,
    source: Source,
}

impl Parser {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Consumes comments (recording them) and blank lines, leaving the
    /// cursor on the next structurally meaningful token.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Token::CommentLine { location, text } => {
                    self.comments.push(Comment {
                        location: *location,
                        text: text.clone(),
                    });
                    self.advance();
                }
                Token::Empty { .. } => {
                    self.advance();
                }
                _ => break,
            }
        }
    }

    /// Consumes zero or more leading `TagLine`s, assigning each tag an id
    /// as it is encountered (tags precede their owner in source order, so
    /// they consume ids before it does).
    fn parse_tags(&mut self) -> Vec<Tag> {
        let mut tags = vec![];
        loop {
            self.skip_trivia();
            match self.peek().clone() {
                Token::TagLine { location, tags: spans } => {
                    self.advance();
                    for span in spans {
                        tags.push(Tag {
                            location: Location::new(location.line, span.column),
                            name: span.text,
                            id: self.ids.next(),
                        });
                    }
                }
                _ => break,
            }
        }
        tags
    }

    fn parse_document(&mut self, language: String) -> Result<GherkinDocument, ParserError> {
        if matches!(self.peek(), Token::Language { .. }) {
            self.advance();
        }

        let tags = self.parse_tags();
        self.skip_trivia();

        let feature = match self.peek().clone() {
            Token::FeatureLine { .. } => Some(self.parse_feature(tags, language)?),
            Token::Eof { .. } => {
                if let Some(tag) = tags.first() {
                    return Err(ParserError::OrphanTags {
                        location: tag.location,
                    });
                }
                None
            }
            other => {
                let location = tags.first().map(|t| t.location).unwrap_or_else(|| other.location());
                return Err(ParserError::MissingFeature { location });
            }
        };

        Ok(GherkinDocument {
            source: self.source.clone(),
            feature,
            comments: std::mem::take(&mut self.comments),
        })
    }

    fn parse_feature(&mut self, tags: Vec<Tag>, language: String) -> Result<Feature, ParserError> {
        let (location, keyword, name) = match self.advance() {
            Token::FeatureLine { location, keyword, name } => (location, keyword.to_string(), name),
            _ => unreachable!("caller checked FeatureLine"),
        };
        let id = self.ids.next();
        let description = self.parse_description();

        let mut children = vec![];
        loop {
            let child_tags = self.parse_tags();
            self.skip_trivia();

            match self.peek().clone() {
                Token::BackgroundLine { .. } => {
                    if let Some(tag) = child_tags.first() {
                        return Err(ParserError::OrphanTags { location: tag.location });
                    }
                    children.push(FeatureChild::Background(self.parse_background()?));
                }
                Token::ScenarioLine { .. } => {
                    children.push(FeatureChild::Scenario(self.parse_scenario(child_tags)?));
                }
                Token::RuleLine { .. } => {
                    children.push(FeatureChild::Rule(self.parse_rule(child_tags)?));
                }
                Token::Eof { .. } => {
                    if let Some(tag) = child_tags.first() {
                        return Err(ParserError::OrphanTags { location: tag.location });
                    }
                    break;
                }
                other => {
                    if let Some(tag) = child_tags.first() {
                        return Err(ParserError::OrphanTags { location: tag.location });
                    }
                    return Err(ParserError::UnexpectedToken {
                        expected: vec![
                            TokenKind::BackgroundLine,
                            TokenKind::ScenarioLine,
                            TokenKind::RuleLine,
                            TokenKind::Eof,
                        ],
                        got: other.kind(),
                        location: other.location(),
                    });
                }
            }
        }

        Ok(Feature::builder()
            .location(location)
            .tags(tags)
            .language(language)
            .keyword(keyword)
            .name(name)
            .description(description)
            .id(id)
            .children(children)
            .build())
    }

    fn parse_rule(&mut self, tags: Vec<Tag>) -> Result<Rule, ParserError> {
        let (location, keyword, name) = match self.advance() {
            Token::RuleLine { location, keyword, name } => (location, keyword.to_string(), name),
            _ => unreachable!("caller checked RuleLine"),
        };
        let id = self.ids.next();
        let description = self.parse_description();

        let mut children = vec![];
        loop {
            let child_tags = self.parse_tags();
            self.skip_trivia();

            match self.peek().clone() {
                Token::BackgroundLine { .. } => {
                    if let Some(tag) = child_tags.first() {
                        return Err(ParserError::OrphanTags { location: tag.location });
                    }
                    children.push(RuleChild::Background(self.parse_background()?));
                }
                Token::ScenarioLine { .. } => {
                    children.push(RuleChild::Scenario(self.parse_scenario(child_tags)?));
                }
                _ => {
                    if let Some(tag) = child_tags.first() {
                        return Err(ParserError::OrphanTags { location: tag.location });
                    }
                    break;
                }
            }
        }

        Ok(Rule::builder()
            .location(location)
            .tags(tags)
            .keyword(keyword)
            .name(name)
            .description(description)
            .id(id)
            .children(children)
            .build())
    }

    fn parse_background(&mut self) -> Result<Background, ParserError> {
        let (location, keyword, name) = match self.advance() {
            Token::BackgroundLine { location, keyword, name } => (location, keyword.to_string(), name),
            _ => unreachable!("caller checked BackgroundLine"),
        };
        let id = self.ids.next();
        let description = self.parse_description();
        let steps = self.parse_steps()?;

        Ok(Background::builder()
            .location(location)
            .keyword(keyword)
            .name(name)
            .description(description)
            .id(id)
            .steps(steps)
            .build())
    }

    fn parse_scenario(&mut self, tags: Vec<Tag>) -> Result<Scenario, ParserError> {
        let (location, keyword, name, kind) = match self.advance() {
            Token::ScenarioLine { location, keyword, name, kind } => {
                (location, keyword.to_string(), name, kind)
            }
            _ => unreachable!("caller checked ScenarioLine"),
        };
        let id = self.ids.next();
        let description = self.parse_description();
        let steps = self.parse_steps()?;

        let mut examples = vec![];
        loop {
            let ex_tags = self.parse_tags();
            self.skip_trivia();

            match self.peek().clone() {
                Token::ExamplesLine { location, .. } => {
                    if kind != ScenarioKind::ScenarioOutline {
                        return Err(ParserError::ExamplesUnderNonOutline { location });
                    }
                    examples.push(self.parse_examples(ex_tags)?);
                }
                _ => {
                    if let Some(tag) = ex_tags.first() {
                        return Err(ParserError::OrphanTags { location: tag.location });
                    }
                    break;
                }
            }
        }

        Ok(Scenario::builder()
            .location(location)
            .tags(tags)
            .kind(kind)
            .keyword(keyword)
            .name(name)
            .description(description)
            .id(id)
            .steps(steps)
            .examples(examples)
            .build())
    }

    fn parse_examples(&mut self, tags: Vec<Tag>) -> Result<Examples, ParserError> {
        let (location, keyword, name) = match self.advance() {
            Token::ExamplesLine { location, keyword, name } => (location, keyword.to_string(), name),
            _ => unreachable!("caller checked ExamplesLine"),
        };
        let id = self.ids.next();
        let description = self.parse_description();
        self.skip_trivia();
        let mut rows = self.collect_contiguous_table_rows()?;

        let table_header = if rows.is_empty() { None } else { Some(rows.remove(0)) };

        Ok(Examples::builder()
            .location(location)
            .tags(tags)
            .keyword(keyword)
            .name(name)
            .description(description)
            .id(id)
            .table_header(table_header)
            .table_body(rows)
            .build())
    }

    fn parse_steps(&mut self) -> Result<Vec<Step>, ParserError> {
        let mut steps = vec![];
        loop {
            self.skip_trivia();
            match self.peek().clone() {
                Token::StepLine { location, keyword, keyword_type, text } => {
                    self.advance();
                    let id = self.ids.next();
                    let argument = self.parse_step_argument()?;
                    steps.push(
                        Step::builder()
                            .location(location)
                            .keyword(keyword)
                            .keyword_type(keyword_type)
                            .text(text)
                            .id(id)
                            .argument(argument)
                            .build(),
                    );
                }
                _ => break,
            }
        }
        Ok(steps)
    }

    /// At most one argument per step. A doc string tolerates interleaved
    /// blank lines before its opening separator; a data table does not —
    /// it must follow the step line immediately.
    fn parse_step_argument(&mut self) -> Result<Option<StepArgument>, ParserError> {
        let mut lookahead = 0;
        while matches!(self.tokens.get(self.pos + lookahead), Some(Token::Empty { .. })) {
            lookahead += 1;
        }

        if let Some(Token::DocStringSeparator { location, delimiter, media_type }) =
            self.tokens.get(self.pos + lookahead).cloned()
        {
            self.pos += lookahead;
            self.advance();
            let indent = location.column.unwrap_or(1).saturating_sub(1);
            let content = self.parse_doc_string_body(delimiter, indent, location)?;
            return Ok(Some(StepArgument::DocString(DocString {
                location,
                media_type,
                content,
                delimiter,
            })));
        }

        if matches!(self.peek(), Token::TableRow { .. }) {
            let rows = self.collect_contiguous_table_rows()?;
            let location = rows
                .first()
                .map(|r| r.location)
                .unwrap_or_else(|| self.peek().location());
            return Ok(Some(StepArgument::DataTable(DataTable { location, rows })));
        }

        Ok(None)
    }

    fn parse_doc_string_body(
        &mut self,
        delim: crate::ast::DocStringDelimiter,
        indent: usize,
        opened_at: Location,
    ) -> Result<String, ParserError> {
        let mut lines = vec![];
        loop {
            match self.peek().clone() {
                Token::Other { raw_text, .. } => {
                    self.advance();
                    lines.push(strip_indent(&raw_text, indent));
                }
                Token::DocStringSeparator { delimiter, .. } if delimiter == delim => {
                    self.advance();
                    return Ok(lines.join("\n"));
                }
                _ => return Err(ParserError::UnterminatedDocString { opened_at }),
            }
        }
    }

    /// Collects a contiguous run of `TableRow` tokens, checking every row
    /// against the width of the first. Used for both a step's data table
    /// and an `Examples` table (header + body share the same check: every
    /// row must match the first row's width).
    fn collect_contiguous_table_rows(&mut self) -> Result<Vec<TableRow>, ParserError> {
        let mut rows = vec![];
        let mut width = None;

        loop {
            match self.peek().clone() {
                Token::TableRow { location, cells } => {
                    self.advance();
                    let id = self.ids.next();
                    let row_cells: Vec<TableCell> = cells
                        .into_iter()
                        .map(|c| TableCell {
                            location: Location::new(location.line, c.column),
                            value: c.value,
                        })
                        .collect();

                    match width {
                        None => width = Some(row_cells.len()),
                        Some(w) if w != row_cells.len() => {
                            return Err(ParserError::InconsistentTableCells {
                                expected_count: w,
                                got_count: row_cells.len(),
                                location,
                            })
                        }
                        _ => {}
                    }

                    rows.push(TableRow { location, id, cells: row_cells });
                }
                _ => break,
            }
        }

        Ok(rows)
    }

    /// The maximal run of `Other` tokens (with interior `Empty` preserved
    /// as blank lines) up to the next structural token. Leading and
    /// trailing blank lines are trimmed; a comment ends the run.
    fn parse_description(&mut self) -> String {
        let mut lines: Vec<String> = vec![];
        loop {
            match self.peek().clone() {
                Token::Other { raw_text, .. } => {
                    self.advance();
                    lines.push(raw_text);
                }
                Token::Empty { .. } => {
                    let checkpoint = self.pos;
                    let mut blanks = 0;
                    while matches!(self.peek(), Token::Empty { .. }) {
                        self.advance();
                        blanks += 1;
                    }
                    if matches!(self.peek(), Token::Other { .. }) {
                        if !lines.is_empty() {
                            for _ in 0..blanks {
                                lines.push(String::new());
                            }
                        }
                    } else {
                        self.pos = checkpoint;
                        break;
                    }
                }
                _ => break,
            }
        }
        lines.join("\n")
    }
}

fn strip_indent(line: &str, indent: usize) -> String {
    let mut taken = 0;
    let mut byte_pos = 0;
    for c in line.chars() {
        if taken >= indent || !c.is_whitespace() {
            break;
        }
        taken += 1;
        byte_pos += c.len_utf8();
    }
    line[byte_pos..].to_string()
}
