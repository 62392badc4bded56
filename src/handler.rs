// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The push-style facade: parses a [`Source`] and emits `on_*`/`on_end_*`
//! events as it goes, without ever materializing (or requiring the caller
//! to hold onto) a [`GherkinDocument`].
//!
//! Internally this still builds the tree and then walks it — the simplest
//! implementation that preserves the ordering guarantee the other two
//! facades make (tags before owner, children in source order, a scenario's
//! steps before its examples) — but the `Handler` trait is the only thing
//! callers see, so a future streaming parser could swap the internals
//! without an API break.

use crate::{
    ast::{
        Background, Comment, DataTable, DocString, Examples, Feature, FeatureChild,
        GherkinDocument, Rule, RuleChild, Scenario, Step, StepArgument, Tag,
    },
    error::ParserError,
    parser,
    source::Source,
};

/// Implement this to react to parse events as they are emitted; every
/// method has a no-op default.
pub trait Handler {
    fn on_tag(&mut self, _tag: &Tag) {}
    fn on_comment(&mut self, _comment: &Comment) {}

    fn on_feature(&mut self, _feature: &Feature) {}
    fn on_end_feature(&mut self) {}

    fn on_rule(&mut self, _rule: &Rule) {}
    fn on_end_rule(&mut self) {}

    fn on_background(&mut self, _background: &Background) {}
    fn on_end_background(&mut self) {}

    fn on_scenario(&mut self, _scenario: &Scenario) {}
    fn on_end_scenario(&mut self) {}

    fn on_step(&mut self, _step: &Step) {}
    fn on_doc_string(&mut self, _doc_string: &DocString) {}
    fn on_data_table(&mut self, _data_table: &DataTable) {}

    fn on_examples(&mut self, _examples: &Examples) {}
    fn on_end_examples(&mut self) {}

    fn on_error(&mut self, _error: &ParserError) {}
}

/// Parses `source`, driving `handler` with the resulting events. Returns
/// `Err` (after calling `on_error` for each failure) if parsing failed;
/// the handler still receives every event emitted before the failure.
pub fn parse_with_handler(
    source: &Source,
    handler: &mut impl Handler,
) -> Result<(), crate::error::Errors> {
    match parser::parse(source) {
        Ok(document) => {
            walk_document(handler, &document);
            Ok(())
        }
        Err(errors) => {
            for error in &errors.0 {
                handler.on_error(error);
            }
            Err(errors)
        }
    }
}

fn walk_document(handler: &mut impl Handler, document: &GherkinDocument) {
    if let Some(feature) = &document.feature {
        walk_feature(handler, feature);
    }
    for comment in &document.comments {
        handler.on_comment(comment);
    }
}

fn walk_feature(handler: &mut impl Handler, feature: &Feature) {
    for tag in &feature.tags {
        handler.on_tag(tag);
    }
    handler.on_feature(feature);
    for child in &feature.children {
        match child {
            FeatureChild::Background(b) => walk_background(handler, b),
            FeatureChild::Scenario(s) => walk_scenario(handler, s),
            FeatureChild::Rule(r) => walk_rule(handler, r),
        }
    }
    handler.on_end_feature();
}

fn walk_rule(handler: &mut impl Handler, rule: &Rule) {
    for tag in &rule.tags {
        handler.on_tag(tag);
    }
    handler.on_rule(rule);
    for child in &rule.children {
        match child {
            RuleChild::Background(b) => walk_background(handler, b),
            RuleChild::Scenario(s) => walk_scenario(handler, s),
        }
    }
    handler.on_end_rule();
}

fn walk_background(handler: &mut impl Handler, background: &Background) {
    handler.on_background(background);
    for step in &background.steps {
        walk_step(handler, step);
    }
    handler.on_end_background();
}

fn walk_scenario(handler: &mut impl Handler, scenario: &Scenario) {
    for tag in &scenario.tags {
        handler.on_tag(tag);
    }
    handler.on_scenario(scenario);
    for step in &scenario.steps {
        walk_step(handler, step);
    }
    for examples in &scenario.examples {
        walk_examples(handler, examples);
    }
    handler.on_end_scenario();
}

fn walk_step(handler: &mut impl Handler, step: &Step) {
    handler.on_step(step);
    match &step.argument {
        Some(StepArgument::DocString(ds)) => handler.on_doc_string(ds),
        Some(StepArgument::DataTable(dt)) => handler.on_data_table(dt),
        None => {}
    }
}

fn walk_examples(handler: &mut impl Handler, examples: &Examples) {
    for tag in &examples.tags {
        handler.on_tag(tag);
    }
    handler.on_examples(examples);
    handler.on_end_examples();
}
