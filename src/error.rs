// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The closed error taxonomy. The tokenizer cannot fail; everything here
//! is raised by the parser (or, for `MalformedTree`, by the writer).

use thiserror::Error;

use crate::{location::Location, token::TokenKind};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("unexpected {got:?} at {location} (expected one of {expected:?})")]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        got: TokenKind,
        location: Location,
    },

    #[error("content before any Feature at {location}")]
    MissingFeature { location: Location },

    #[error("unterminated doc string opened at {opened_at}")]
    UnterminatedDocString { opened_at: Location },

    #[error("inconsistent cell count at {location}: expected {expected_count}, got {got_count}")]
    InconsistentTableCells {
        expected_count: usize,
        got_count: usize,
        location: Location,
    },

    #[error("unknown language {code:?} at {location}")]
    UnknownLanguage { code: String, location: Location },

    #[error("tag(s) with nothing to attach to at {location}")]
    OrphanTags { location: Location },

    #[error("Examples under a plain Scenario (not Scenario Outline) at {location}")]
    ExamplesUnderNonOutline { location: Location },
}

impl ParserError {
    pub fn location(&self) -> Location {
        match self {
            ParserError::UnexpectedToken { location, .. }
            | ParserError::MissingFeature { location }
            | ParserError::InconsistentTableCells { location, .. }
            | ParserError::UnknownLanguage { location, .. }
            | ParserError::OrphanTags { location }
            | ParserError::ExamplesUnderNonOutline { location } => *location,
            ParserError::UnterminatedDocString { opened_at } => *opened_at,
        }
    }
}

/// The facade-level result type: today always a single error wrapped in a
/// one-element list, kept as a `Vec` so a future resilient-parsing mode
/// can return more without an API break (see design notes, "error
/// aggregation").
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", .0.first().map(ToString::to_string).unwrap_or_default())]
pub struct Errors(pub Vec<ParserError>);

impl Errors {
    pub(crate) fn single(error: ParserError) -> Self {
        Errors(vec![error])
    }

    pub fn primary(&self) -> Option<&ParserError> {
        self.0.first()
    }
}

/// Raised by [`crate::writer::write`] when handed an AST that violates an
/// invariant from the data model (a hand-built tree, not one the parser
/// produced).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedTree {
    #[error("data table rows have inconsistent cell counts")]
    InconsistentTableCells,

    #[error("Examples table body row width does not match its header")]
    ExamplesBodyWidthMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_display_is_the_primary_message() {
        let e = Errors::single(ParserError::MissingFeature {
            location: Location::without_column(3),
        });
        assert!(e.to_string().contains("before any Feature"));
    }
}
