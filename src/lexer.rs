// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Drivers over [`classify_line`] that walk a whole [`Source`]: an eager
//! `tokenize` and a lazy, pull-based [`Lexer`] iterator.

use crate::{
    keywords::{self, Keywords},
    location::Location,
    source::Source,
    token::{self, classify_line, LexerState, Token},
};

/// Tokenizes a whole [`Source`] eagerly, always ending with `Eof`.
///
/// Resolves the `# language:` directive the same way [`crate::parse`]
/// does, so a standalone tokenizer consumer sees the same token text a
/// parse would see without needing to resolve the language itself.
///
/// The tokenizer never fails: every line classifies to *some* token, even
/// malformed ones (`Other`). Structural misuse (an unterminated doc
/// string, a lone tag line) is the parser's problem, not the tokenizer's.
pub fn tokenize(source: &Source) -> Vec<Token> {
    let language = match token::detect_language(source) {
        Some((code, _)) => resolve_language(Some(&code)).unwrap_or_else(|| {
            resolve_language(None).expect("default language is always registered")
        }),
        None => resolve_language(None).expect("default language is always registered"),
    };
    tokenize_with_language(source, language)
}

/// Tokenizes with an already-resolved language table, skipping the
/// directive lookup `tokenize` performs. Used by the parser, which has
/// already resolved the language itself (and needs to report
/// `UnknownLanguage` rather than silently falling back to English).
pub(crate) fn tokenize_with_language(source: &Source, language: &'static Keywords) -> Vec<Token> {
    Lexer::new(source, language).collect()
}

/// A pull-based tokenizer. Abandoning it mid-stream leaks nothing: all of
/// its state is either a cursor into the caller's `Source` or a `Copy`
/// `LexerState`.
pub(crate) struct Lexer<'s> {
    source: &'s Source,
    language: &'static Keywords,
    next_line: usize,
    state: LexerState,
    done: bool,
}

impl<'s> Lexer<'s> {
    pub(crate) fn new(source: &'s Source, language: &'static Keywords) -> Self {
        Lexer {
            source,
            language,
            next_line: 1,
            state: LexerState::default(),
            done: false,
        }
    }
}

impl<'s> Iterator for Lexer<'s> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        match self.source.line(self.next_line) {
            Some(line) => {
                let (token, next_state) =
                    classify_line(line, self.next_line, self.state, self.language);
                self.state = next_state;
                self.next_line += 1;
                Some(token)
            }
            None => {
                self.done = true;
                Some(Token::Eof {
                    location: Location::without_column(self.source.line_count() + 1),
                })
            }
        }
    }
}

/// Looks up the keyword table for a `# language:` code, falling back to
/// English. Returns `None` only when the code is present in the source
/// but absent from the table.
pub(crate) fn resolve_language(code: Option<&str>) -> Option<&'static Keywords> {
    match code {
        Some(code) => keywords::lookup(code),
        None => keywords::lookup(keywords::DEFAULT_LANGUAGE),
    }
}
