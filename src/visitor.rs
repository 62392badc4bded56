// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The external visitor facade: an unmaterialized walk over an already-built
//! [`GherkinDocument`], with a no-op default for every node kind so callers
//! only override what they need.
//!
//! Traversal order matches the parser's id-assignment order: a node's tags
//! are visited before the node itself is visited, and a node's children in
//! source order after. `Scenario` visits its steps before its `Examples`.

use crate::ast::{
    Background, Comment, DataTable, DocString, Examples, Feature, FeatureChild, GherkinDocument,
    Rule, RuleChild, Scenario, Step, StepArgument, Tag, TableRow,
};

/// Implement this to react to specific node kinds during a walk; every
/// method has a no-op default.
pub trait Visitor {
    fn visit_document(&mut self, _document: &GherkinDocument) {}
    fn visit_feature(&mut self, _feature: &Feature) {}
    fn visit_rule(&mut self, _rule: &Rule) {}
    fn visit_background(&mut self, _background: &Background) {}
    fn visit_scenario(&mut self, _scenario: &Scenario) {}
    fn visit_step(&mut self, _step: &Step) {}
    fn visit_examples(&mut self, _examples: &Examples) {}
    fn visit_doc_string(&mut self, _doc_string: &DocString) {}
    fn visit_data_table(&mut self, _data_table: &DataTable) {}
    fn visit_table_row(&mut self, _row: &TableRow) {}
    fn visit_tag(&mut self, _tag: &Tag) {}
    fn visit_comment(&mut self, _comment: &Comment) {}
}

/// A node that can drive a [`Visitor`] across itself and its children.
pub trait Accept {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V);
}

impl Accept for GherkinDocument {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_document(self);
        if let Some(feature) = &self.feature {
            feature.accept(visitor);
        }
        for comment in &self.comments {
            comment.accept(visitor);
        }
    }
}

impl Accept for Comment {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_comment(self);
    }
}

impl Accept for Tag {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_tag(self);
    }
}

impl Accept for Feature {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for tag in &self.tags {
            tag.accept(visitor);
        }
        visitor.visit_feature(self);
        for child in &self.children {
            match child {
                FeatureChild::Background(b) => b.accept(visitor),
                FeatureChild::Scenario(s) => s.accept(visitor),
                FeatureChild::Rule(r) => r.accept(visitor),
            }
        }
    }
}

impl Accept for Rule {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for tag in &self.tags {
            tag.accept(visitor);
        }
        visitor.visit_rule(self);
        for child in &self.children {
            match child {
                RuleChild::Background(b) => b.accept(visitor),
                RuleChild::Scenario(s) => s.accept(visitor),
            }
        }
    }
}

impl Accept for Background {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_background(self);
        for step in &self.steps {
            step.accept(visitor);
        }
    }
}

impl Accept for Scenario {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for tag in &self.tags {
            tag.accept(visitor);
        }
        visitor.visit_scenario(self);
        for step in &self.steps {
            step.accept(visitor);
        }
        for examples in &self.examples {
            examples.accept(visitor);
        }
    }
}

impl Accept for Step {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_step(self);
        match &self.argument {
            Some(StepArgument::DocString(ds)) => visitor.visit_doc_string(ds),
            Some(StepArgument::DataTable(dt)) => {
                visitor.visit_data_table(dt);
                for row in &dt.rows {
                    row.accept(visitor);
                }
            }
            None => {}
        }
    }
}

impl Accept for Examples {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        for tag in &self.tags {
            tag.accept(visitor);
        }
        visitor.visit_examples(self);
        if let Some(header) = &self.table_header {
            header.accept(visitor);
        }
        for row in &self.table_body {
            row.accept(visitor);
        }
    }
}

impl Accept for TableRow {
    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_table_row(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::parse, source::Source};

    #[derive(Default)]
    struct Collector(Vec<&'static str>);

    impl Visitor for Collector {
        fn visit_feature(&mut self, _: &Feature) {
            self.0.push("feature");
        }
        fn visit_scenario(&mut self, _: &Scenario) {
            self.0.push("scenario");
        }
        fn visit_step(&mut self, _: &Step) {
            self.0.push("step");
        }
        fn visit_tag(&mut self, _: &Tag) {
            self.0.push("tag");
        }
    }

    #[test]
    fn visits_tags_before_owner_and_children_in_order() {
        let source = Source::from_string(
            "@smoke\nFeature: F\n  Scenario: S\n    Given g\n    When w\n",
            None,
        );
        let doc = parse(&source).unwrap();
        let mut collector = Collector::default();
        doc.accept(&mut collector);
        assert_eq!(collector.0, vec!["tag", "feature", "scenario", "step", "step"]);
    }
}
