// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Renders a [`GherkinDocument`] back to canonical Gherkin text: two-space
//! nesting per level, aligned table columns, and re-escaped cell content.
//!
//! The writer never re-derives a step's keyword (it prints `Step::keyword`
//! verbatim, already carrying its own trailing separator) and trusts the
//! tree's own invariants rather than re-validating everything the parser
//! already guarantees — the two checks it does perform (`MalformedTree`)
//! only matter for a tree a caller built by hand.

use std::slice;

use crate::ast::{
    Comment, Examples, Feature, FeatureChild, GherkinDocument, Rule, RuleChild, Scenario, Step,
    StepArgument, Tag, TableRow,
};
use crate::error::MalformedTree;

const INDENT_WIDTH: usize = 2;

/// Renders `document` to canonical Gherkin text.
///
/// Returns [`MalformedTree`] if a data table or `Examples` body carries
/// inconsistent row widths — a tree the parser itself would never produce,
/// but a hand-built one might.
pub fn write(document: &GherkinDocument) -> Result<String, MalformedTree> {
    let mut writer = Writer {
        out: String::new(),
        comments: document.comments.iter().peekable(),
    };

    if let Some(feature) = &document.feature {
        if feature.language != crate::keywords::DEFAULT_LANGUAGE {
            writer.write_line(0, &format!("# language: {}", feature.language));
        }
        writer.write_feature(feature)?;
    }

    writer.flush_remaining_comments(0);

    Ok(writer.out)
}

struct Writer<'a> {
    out: String,
    comments: std::iter::Peekable<slice::Iter<'a, Comment>>,
}

impl<'a> Writer<'a> {
    fn write_line(&mut self, indent: usize, text: &str) {
        if text.is_empty() {
            self.out.push('\n');
        } else {
            self.out.push_str(&" ".repeat(indent));
            self.out.push_str(text);
            self.out.push('\n');
        }
    }

    fn emit_comments_up_to(&mut self, line: usize) {
        while let Some(c) = self.comments.peek() {
            if c.location.line <= line {
                let c = self.comments.next().unwrap();
                self.write_line(0, &c.text);
            } else {
                break;
            }
        }
    }

    fn flush_remaining_comments(&mut self, indent: usize) {
        while let Some(c) = self.comments.next() {
            self.write_line(indent, &c.text);
        }
    }

    fn write_tags(&mut self, indent: usize, tags: &[Tag]) {
        if tags.is_empty() {
            return;
        }
        let line = tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>().join(" ");
        self.write_line(indent, &line);
    }

    /// Description lines are written verbatim: `Step::text`-style
    /// reindentation would change the field's content on the very next
    /// parse, breaking round-trip equality. Each line already carries
    /// whatever leading whitespace it had in the source.
    fn write_description(&mut self, _indent: usize, description: &str) {
        if description.is_empty() {
            return;
        }
        for line in description.split('\n') {
            self.write_line(0, line);
        }
    }

    fn write_feature(&mut self, feature: &Feature) -> Result<(), MalformedTree> {
        self.emit_comments_up_to(feature.location.line);
        self.write_tags(0, &feature.tags);
        self.write_line(0, &format!("{}: {}", feature.keyword, feature.name));
        self.write_description(INDENT_WIDTH, &feature.description);

        for child in &feature.children {
            match child {
                FeatureChild::Background(b) => self.write_background(INDENT_WIDTH, b)?,
                FeatureChild::Scenario(s) => self.write_scenario(INDENT_WIDTH, s)?,
                FeatureChild::Rule(r) => self.write_rule(INDENT_WIDTH, r)?,
            }
        }

        Ok(())
    }

    fn write_rule(&mut self, indent: usize, rule: &Rule) -> Result<(), MalformedTree> {
        self.emit_comments_up_to(rule.location.line);
        self.write_tags(indent, &rule.tags);
        self.write_line(indent, &format!("{}: {}", rule.keyword, rule.name));
        self.write_description(indent + INDENT_WIDTH, &rule.description);

        for child in &rule.children {
            match child {
                RuleChild::Background(b) => self.write_background(indent + INDENT_WIDTH, b)?,
                RuleChild::Scenario(s) => self.write_scenario(indent + INDENT_WIDTH, s)?,
            }
        }

        Ok(())
    }

    fn write_background(
        &mut self,
        indent: usize,
        background: &crate::ast::Background,
    ) -> Result<(), MalformedTree> {
        self.emit_comments_up_to(background.location.line);
        self.write_line(indent, &format!("{}: {}", background.keyword, background.name));
        self.write_description(indent + INDENT_WIDTH, &background.description);
        for step in &background.steps {
            self.write_step(indent + INDENT_WIDTH, step)?;
        }
        Ok(())
    }

    fn write_scenario(&mut self, indent: usize, scenario: &Scenario) -> Result<(), MalformedTree> {
        self.emit_comments_up_to(scenario.location.line);
        self.write_tags(indent, &scenario.tags);
        self.write_line(indent, &format!("{}: {}", scenario.keyword, scenario.name));
        self.write_description(indent + INDENT_WIDTH, &scenario.description);
        for step in &scenario.steps {
            self.write_step(indent + INDENT_WIDTH, step)?;
        }
        for examples in &scenario.examples {
            self.write_examples(indent, examples)?;
        }
        Ok(())
    }

    fn write_examples(&mut self, indent: usize, examples: &Examples) -> Result<(), MalformedTree> {
        self.emit_comments_up_to(examples.location.line);
        self.write_tags(indent, &examples.tags);
        self.write_line(indent, &format!("{}: {}", examples.keyword, examples.name));
        self.write_description(indent + INDENT_WIDTH, &examples.description);

        let Some(header) = &examples.table_header else {
            return Ok(());
        };

        for body_row in &examples.table_body {
            if body_row.cells.len() != header.cells.len() {
                return Err(MalformedTree::ExamplesBodyWidthMismatch);
            }
        }

        let mut all_rows: Vec<&TableRow> = vec![header];
        all_rows.extend(examples.table_body.iter());
        self.write_table(indent + INDENT_WIDTH, &all_rows)
    }

    fn write_step(&mut self, indent: usize, step: &Step) -> Result<(), MalformedTree> {
        self.emit_comments_up_to(step.location.line);
        self.write_line(indent, &format!("{}{}", step.keyword, step.text));
        match &step.argument {
            Some(StepArgument::DocString(ds)) => self.write_doc_string(indent + INDENT_WIDTH, ds),
            Some(StepArgument::DataTable(dt)) => {
                let rows: Vec<&TableRow> = dt.rows.iter().collect();
                self.write_table(indent + INDENT_WIDTH, &rows)?;
            }
            None => {}
        }
        Ok(())
    }

    fn write_doc_string(&mut self, indent: usize, ds: &crate::ast::DocString) {
        let opener = match &ds.media_type {
            Some(mt) => format!("{}{}", ds.delimiter.as_str(), mt),
            None => ds.delimiter.as_str().to_string(),
        };
        self.write_line(indent, &opener);
        if !ds.content.is_empty() {
            for line in ds.content.split('\n') {
                self.write_line(indent, line);
            }
        }
        self.write_line(indent, ds.delimiter.as_str());
    }

    fn write_table(&mut self, indent: usize, rows: &[&TableRow]) -> Result<(), MalformedTree> {
        if rows.is_empty() {
            return Ok(());
        }

        let width = rows[0].cells.len();
        for row in rows {
            if row.cells.len() != width {
                return Err(MalformedTree::InconsistentTableCells);
            }
        }

        let escaped: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.cells.iter().map(|c| escape_cell(&c.value)).collect())
            .collect();

        let mut col_widths = vec![0usize; width];
        for row in &escaped {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }

        for row in &escaped {
            let padded: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| format!("{:<width$}", cell, width = col_widths[i]))
                .collect();
            self.write_line(indent, &format!("| {} |", padded.join(" | ")));
        }

        Ok(())
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('\\', r"\\").replace('|', r"\|").replace('\n', r"\n")
}
