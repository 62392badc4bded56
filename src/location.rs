// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Source positions attached to every token and AST node.

use std::cmp::Ordering;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A 1-based line and, where meaningful, a 1-based code-point column.
///
/// Columns are omitted for tokens whose payload has no single natural
/// anchor (e.g. `Empty`); when present they point at the first
/// non-whitespace character unless a token's own rule defines another
/// anchor (a tag line's column is the `@` of its first tag).
pub struct Location {
    pub line: usize,
    pub column: Option<usize>,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location {
            line,
            column: Some(column),
        }
    }

    pub fn without_column(line: usize) -> Self {
        Location { line, column: None }
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.column {
            Some(col) => write!(f, "{}:{}", self.line, col),
            None => write!(f, "{}", self.line),
        }
    }
}
