// Copyright (c) 2018-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A tokenizer, recursive-descent parser, AST, and writer for the Gherkin
//! BDD feature-file language used by Cucumber and its relatives.
//!
//! ```
//! use gherkin_parser::{parse, Source};
//!
//! let source = Source::from_string(
//!     "Feature: Greeting\n  Scenario: Say hello\n    Given a user\n    Then they are greeted\n",
//!     None,
//! );
//! let document = parse(&source).expect("valid feature file");
//! let feature = document.feature.expect("a Feature header was present");
//! assert_eq!(feature.name, "Greeting");
//! ```
//!
//! ### .feature file structure
//!
//! The basic structure of a feature file is:
//!
//! - Optionally a `# language:` directive, on the first non-blank,
//!   non-comment line
//! - Optionally one or more tags
//! - Optionally `#`-prefixed comments on their own line
//! - The feature definition
//! - An optional free-text description
//! - An optional background
//! - One or more scenarios (also taggable), each including:
//!   - One or more steps
//!   - Optionally a data table or doc string per step
//!   - Optionally examples (for a `Scenario Outline`), which can also be tagged
//! - One or more rules (also taggable), each including:
//!   - An optional background
//!   - One or more scenarios
//!
//! ### Four ways to consume a parsed document
//!
//! - Read the [`GherkinDocument`] tree directly; every field is public.
//! - Implement [`Visitor`] and call [`Accept::accept`] for an external,
//!   read-only walk.
//! - Implement [`Fold`] and call [`fold_document`] to thread an
//!   accumulator through the tree, with per-node control over whether to
//!   descend, skip, or abort ([`Flow`]).
//! - Implement [`Handler`] and call [`parse_with_handler`] to receive
//!   `on_*`/`on_end_*` push events without ever holding the tree yourself.
//!
//! Consumers that only want the token stream — a syntax highlighter, say —
//! can call [`tokenize`] directly rather than going through [`parse`].
//!
//! [`GherkinDocument`]: ast::GherkinDocument

mod ast;
mod error;
mod keywords;
mod lexer;
mod location;
mod parser;
mod source;
mod token;

pub mod fold;
pub mod handler;
pub mod visitor;
pub mod writer;

pub use ast::{
    Background, Comment, DataTable, DocString, DocStringDelimiter, Examples, Feature,
    FeatureChild, GherkinDocument, KeywordType, Rule, RuleChild, Scenario, ScenarioKind, Step,
    StepArgument, Tag, TableCell, TableRow,
};
pub use error::{Errors, MalformedTree, ParserError};
pub use fold::{continuing, fold_document, Flow, Fold};
pub use handler::{parse_with_handler, Handler};
pub use lexer::tokenize;
pub use location::Location;
pub use parser::parse;
pub use source::Source;
pub use token::{Token, TokenKind};
pub use visitor::{Accept, Visitor};
pub use writer::write;
