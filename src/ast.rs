// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The Gherkin AST value model.
//!
//! Every type here is immutable once built: the parser is the only code in
//! this crate that constructs one, and it never mutates a node after
//! handing it to a caller. Consumers may build conforming trees by hand
//! (e.g. for synthetic test fixtures) using each type's `TypedBuilder`;
//! `crate::writer::write` validates the invariants in `§3` of the design
//! and reports a `MalformedTree` error rather than panicking on a tree
//! that breaks them.

use typed_builder::TypedBuilder;

use crate::{location::Location, source::Source};

/// Monotone id assignment, threaded through a single parse.
///
/// Ids are strings so that downstream consumers are never tempted to do
/// arithmetic on them; they are an opaque, stable-for-this-parse handle.
#[derive(Debug, Default)]
pub(crate) struct IdGenerator(usize);

impl IdGenerator {
    pub(crate) fn next(&mut self) -> String {
        let id = self.0;
        self.0 += 1;
        id.to_string()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The semantic role of a step keyword, independent of its surface form.
///
/// `And`/`But`/`*` are recorded as `Conjunction`/`Unknown` here; resolving
/// a conjunction to the role of the preceding step is left to consumers
/// (see invariant 2 in the design notes), since the AST itself must stay a
/// faithful record of what was written.
pub enum KeywordType {
    Context,
    Action,
    Outcome,
    Conjunction,
    Unknown,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Scenario,
    ScenarioOutline,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The exact triple-character delimiter a doc string was opened with.
pub enum DocStringDelimiter {
    DoubleQuote,
    Backtick,
}

impl DocStringDelimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            DocStringDelimiter::DoubleQuote => "\"\"\"",
            DocStringDelimiter::Backtick => "```",
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Tag {
    pub location: Location,
    /// Includes the leading `@`.
    pub name: String,
    pub id: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Comment {
    pub location: Location,
    /// Includes the leading `#`.
    pub text: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct TableCell {
    pub location: Location,
    pub value: String,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct TableRow {
    pub location: Location,
    pub id: String,
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|c| c.value.as_str())
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct DataTable {
    pub location: Location,
    pub rows: Vec<TableRow>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct DocString {
    pub location: Location,
    #[builder(default)]
    pub media_type: Option<String>,
    /// Excludes the opening and closing delimiter lines; the delimiter's
    /// own leading whitespace has been stripped from every content line
    /// that carried at least that much (shorter lines are left as-is).
    pub content: String,
    pub delimiter: DocStringDelimiter,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepArgument {
    DocString(DocString),
    DataTable(DataTable),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Step {
    pub location: Location,
    /// Ends with exactly one trailing space, including the `"* "` form.
    pub keyword: String,
    pub keyword_type: KeywordType,
    pub text: String,
    pub id: String,
    #[builder(default)]
    pub argument: Option<StepArgument>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Examples {
    pub location: Location,
    #[builder(default)]
    pub tags: Vec<Tag>,
    pub keyword: String,
    pub name: String,
    #[builder(default)]
    pub description: String,
    pub id: String,
    #[builder(default)]
    pub table_header: Option<TableRow>,
    #[builder(default)]
    pub table_body: Vec<TableRow>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Background {
    pub location: Location,
    pub keyword: String,
    pub name: String,
    #[builder(default)]
    pub description: String,
    pub id: String,
    #[builder(default)]
    pub steps: Vec<Step>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Scenario {
    pub location: Location,
    #[builder(default)]
    pub tags: Vec<Tag>,
    pub kind: ScenarioKind,
    pub keyword: String,
    pub name: String,
    #[builder(default)]
    pub description: String,
    pub id: String,
    #[builder(default)]
    pub steps: Vec<Step>,
    #[builder(default)]
    pub examples: Vec<Examples>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleChild {
    Background(Background),
    Scenario(Scenario),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Rule {
    pub location: Location,
    #[builder(default)]
    pub tags: Vec<Tag>,
    pub keyword: String,
    pub name: String,
    #[builder(default)]
    pub description: String,
    pub id: String,
    #[builder(default)]
    pub children: Vec<RuleChild>,
}

// Note: spec.md's §3 struct listing omits `id` from `Feature` and `Rule`,
// but invariant 6 explicitly lists "feature, rule" among the addressable
// entities that consume an id from the counter. Both structs carry `id`
// to satisfy the invariant; see DESIGN.md.

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FeatureChild {
    Background(Background),
    Scenario(Scenario),
    Rule(Rule),
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, TypedBuilder)]
pub struct Feature {
    pub location: Location,
    #[builder(default)]
    pub tags: Vec<Tag>,
    pub language: String,
    pub keyword: String,
    pub name: String,
    #[builder(default)]
    pub description: String,
    pub id: String,
    #[builder(default)]
    pub children: Vec<FeatureChild>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct GherkinDocument {
    pub source: Source,
    #[builder(default)]
    pub feature: Option<Feature>,
    #[builder(default)]
    pub comments: Vec<Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_generator_is_monotone_from_zero() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next(), "0");
        assert_eq!(ids.next(), "1");
        assert_eq!(ids.next(), "2");
    }
}
