// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The flow-controlled fold facade: thread an accumulator through a walk,
//! with each callback choosing whether to descend into a node's children,
//! skip them, or abort the whole walk.

use crate::ast::{
    Background, Comment, DataTable, DocString, Examples, Feature, FeatureChild, GherkinDocument,
    Rule, RuleChild, Scenario, Step, StepArgument, Tag, TableRow,
};

/// What a [`Fold`] callback wants to happen next, carrying the (possibly
/// updated) accumulator either way.
pub enum Flow<T> {
    /// Keep going: descend into this node's children, then continue.
    Continue(T),
    /// Do not descend into this node's children; continue with siblings.
    SkipChildren(T),
    /// Abort the whole walk immediately, unwinding with this value.
    Stop(T),
}

impl<T> Flow<T> {
    pub fn into_inner(self) -> T {
        match self {
            Flow::Continue(t) | Flow::SkipChildren(t) | Flow::Stop(t) => t,
        }
    }

    fn is_stop(&self) -> bool {
        matches!(self, Flow::Stop(_))
    }
}

/// Lifts a plain `acc -> acc` step into a callback that always continues.
pub fn continuing<T>(acc: T) -> Flow<T> {
    Flow::Continue(acc)
}

/// Implement this to fold over a document; every callback defaults to
/// [`Flow::Continue`] with the accumulator untouched.
pub trait Fold<T> {
    fn fold_document(&mut self, acc: T, _document: &GherkinDocument) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_feature(&mut self, acc: T, _feature: &Feature) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_rule(&mut self, acc: T, _rule: &Rule) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_background(&mut self, acc: T, _background: &Background) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_scenario(&mut self, acc: T, _scenario: &Scenario) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_step(&mut self, acc: T, _step: &Step) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_examples(&mut self, acc: T, _examples: &Examples) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_doc_string(&mut self, acc: T, _doc_string: &DocString) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_data_table(&mut self, acc: T, _data_table: &DataTable) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_table_row(&mut self, acc: T, _row: &TableRow) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_tag(&mut self, acc: T, _tag: &Tag) -> Flow<T> {
        Flow::Continue(acc)
    }
    fn fold_comment(&mut self, acc: T, _comment: &Comment) -> Flow<T> {
        Flow::Continue(acc)
    }
}

/// Runs `folder` over `document`, returning the final accumulator. Stops
/// early if any callback returns [`Flow::Stop`].
pub fn fold_document<T, F: Fold<T> + ?Sized>(folder: &mut F, acc: T, document: &GherkinDocument) -> T {
    match fold_document_inner(folder, acc, document) {
        Flow::Continue(a) | Flow::SkipChildren(a) | Flow::Stop(a) => a,
    }
}

fn fold_document_inner<T, F: Fold<T> + ?Sized>(
    folder: &mut F,
    acc: T,
    document: &GherkinDocument,
) -> Flow<T> {
    let flow = folder.fold_document(acc, document);
    if flow.is_stop() {
        return flow;
    }
    let descend = matches!(flow, Flow::Continue(_));
    let mut acc = flow.into_inner();

    if descend {
        if let Some(feature) = &document.feature {
            match fold_feature_inner(folder, acc, feature) {
                Flow::Stop(a) => return Flow::Stop(a),
                Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
            }
        }
    }

    for comment in &document.comments {
        match folder.fold_comment(acc, comment) {
            Flow::Stop(a) => return Flow::Stop(a),
            Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
        }
    }

    Flow::Continue(acc)
}

fn fold_tags<T, F: Fold<T> + ?Sized>(folder: &mut F, mut acc: T, tags: &[Tag]) -> Flow<T> {
    for tag in tags {
        match folder.fold_tag(acc, tag) {
            Flow::Stop(a) => return Flow::Stop(a),
            Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
        }
    }
    Flow::Continue(acc)
}

fn fold_feature_inner<T, F: Fold<T> + ?Sized>(folder: &mut F, acc: T, feature: &Feature) -> Flow<T> {
    let mut acc = match fold_tags(folder, acc, &feature.tags) {
        Flow::Stop(a) => return Flow::Stop(a),
        Flow::Continue(a) | Flow::SkipChildren(a) => a,
    };

    let flow = folder.fold_feature(acc, feature);
    if flow.is_stop() {
        return flow;
    }
    let descend = matches!(flow, Flow::Continue(_));
    acc = flow.into_inner();

    if descend {
        for child in &feature.children {
            let flow = match child {
                FeatureChild::Background(b) => fold_background_inner(folder, acc, b),
                FeatureChild::Scenario(s) => fold_scenario_inner(folder, acc, s),
                FeatureChild::Rule(r) => fold_rule_inner(folder, acc, r),
            };
            match flow {
                Flow::Stop(a) => return Flow::Stop(a),
                Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
            }
        }
    }

    Flow::Continue(acc)
}

fn fold_rule_inner<T, F: Fold<T> + ?Sized>(folder: &mut F, acc: T, rule: &Rule) -> Flow<T> {
    let mut acc = match fold_tags(folder, acc, &rule.tags) {
        Flow::Stop(a) => return Flow::Stop(a),
        Flow::Continue(a) | Flow::SkipChildren(a) => a,
    };

    let flow = folder.fold_rule(acc, rule);
    if flow.is_stop() {
        return flow;
    }
    let descend = matches!(flow, Flow::Continue(_));
    acc = flow.into_inner();

    if descend {
        for child in &rule.children {
            let flow = match child {
                RuleChild::Background(b) => fold_background_inner(folder, acc, b),
                RuleChild::Scenario(s) => fold_scenario_inner(folder, acc, s),
            };
            match flow {
                Flow::Stop(a) => return Flow::Stop(a),
                Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
            }
        }
    }

    Flow::Continue(acc)
}

fn fold_background_inner<T, F: Fold<T> + ?Sized>(
    folder: &mut F,
    acc: T,
    background: &Background,
) -> Flow<T> {
    let flow = folder.fold_background(acc, background);
    if flow.is_stop() {
        return flow;
    }
    let descend = matches!(flow, Flow::Continue(_));
    let mut acc = flow.into_inner();

    if descend {
        for step in &background.steps {
            match fold_step_inner(folder, acc, step) {
                Flow::Stop(a) => return Flow::Stop(a),
                Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
            }
        }
    }

    Flow::Continue(acc)
}

fn fold_scenario_inner<T, F: Fold<T> + ?Sized>(folder: &mut F, acc: T, scenario: &Scenario) -> Flow<T> {
    let mut acc = match fold_tags(folder, acc, &scenario.tags) {
        Flow::Stop(a) => return Flow::Stop(a),
        Flow::Continue(a) | Flow::SkipChildren(a) => a,
    };

    let flow = folder.fold_scenario(acc, scenario);
    if flow.is_stop() {
        return flow;
    }
    let descend = matches!(flow, Flow::Continue(_));
    acc = flow.into_inner();

    if descend {
        for step in &scenario.steps {
            match fold_step_inner(folder, acc, step) {
                Flow::Stop(a) => return Flow::Stop(a),
                Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
            }
        }
        for examples in &scenario.examples {
            match fold_examples_inner(folder, acc, examples) {
                Flow::Stop(a) => return Flow::Stop(a),
                Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
            }
        }
    }

    Flow::Continue(acc)
}

fn fold_step_inner<T, F: Fold<T> + ?Sized>(folder: &mut F, acc: T, step: &Step) -> Flow<T> {
    let flow = folder.fold_step(acc, step);
    if flow.is_stop() {
        return flow;
    }
    let descend = matches!(flow, Flow::Continue(_));
    let mut acc = flow.into_inner();

    if descend {
        match &step.argument {
            Some(StepArgument::DocString(ds)) => {
                match folder.fold_doc_string(acc, ds) {
                    Flow::Stop(a) => return Flow::Stop(a),
                    Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
                }
            }
            Some(StepArgument::DataTable(dt)) => {
                let flow = folder.fold_data_table(acc, dt);
                if flow.is_stop() {
                    return flow;
                }
                let descend_rows = matches!(flow, Flow::Continue(_));
                acc = flow.into_inner();
                if descend_rows {
                    for row in &dt.rows {
                        match folder.fold_table_row(acc, row) {
                            Flow::Stop(a) => return Flow::Stop(a),
                            Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
                        }
                    }
                }
            }
            None => {}
        }
    }

    Flow::Continue(acc)
}

fn fold_examples_inner<T, F: Fold<T> + ?Sized>(folder: &mut F, acc: T, examples: &Examples) -> Flow<T> {
    let mut acc = match fold_tags(folder, acc, &examples.tags) {
        Flow::Stop(a) => return Flow::Stop(a),
        Flow::Continue(a) | Flow::SkipChildren(a) => a,
    };

    let flow = folder.fold_examples(acc, examples);
    if flow.is_stop() {
        return flow;
    }
    let descend = matches!(flow, Flow::Continue(_));
    acc = flow.into_inner();

    if descend {
        if let Some(header) = &examples.table_header {
            match folder.fold_table_row(acc, header) {
                Flow::Stop(a) => return Flow::Stop(a),
                Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
            }
        }
        for row in &examples.table_body {
            match folder.fold_table_row(acc, row) {
                Flow::Stop(a) => return Flow::Stop(a),
                Flow::Continue(a) | Flow::SkipChildren(a) => acc = a,
            }
        }
    }

    Flow::Continue(acc)
}
