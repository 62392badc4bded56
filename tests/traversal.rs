//! The three read-facades (external visitor, flow-controlled fold, and
//! push-style handler) must agree on what they saw and in what order, even
//! though their call shapes differ.

use gherkin_parser::{
    continuing, fold_document, parse, parse_with_handler, Accept, Background, Examples, Feature,
    Flow, Fold, GherkinDocument, Handler, Location, Rule, Scenario, Source, Step, Tag, Visitor,
};

const FIXTURES: &[&str] = &[
    "./tests/fixtures/good/tags.feature",
    "./tests/fixtures/good/rules_and_background.feature",
    "./tests/fixtures/good/tables.feature",
];

fn tag(loc: Location) -> String {
    format!("tag@{loc}")
}
fn feature(loc: Location) -> String {
    format!("feature@{loc}")
}
fn rule(loc: Location) -> String {
    format!("rule@{loc}")
}
fn background(loc: Location) -> String {
    format!("background@{loc}")
}
fn scenario(loc: Location) -> String {
    format!("scenario@{loc}")
}
fn step(loc: Location) -> String {
    format!("step@{loc}")
}
fn examples(loc: Location) -> String {
    format!("examples@{loc}")
}

#[derive(Default)]
struct VisitorLog(Vec<String>);

impl Visitor for VisitorLog {
    fn visit_tag(&mut self, t: &Tag) {
        self.0.push(tag(t.location));
    }
    fn visit_feature(&mut self, f: &Feature) {
        self.0.push(feature(f.location));
    }
    fn visit_rule(&mut self, r: &Rule) {
        self.0.push(rule(r.location));
    }
    fn visit_background(&mut self, b: &Background) {
        self.0.push(background(b.location));
    }
    fn visit_scenario(&mut self, s: &Scenario) {
        self.0.push(scenario(s.location));
    }
    fn visit_step(&mut self, s: &Step) {
        self.0.push(step(s.location));
    }
    fn visit_examples(&mut self, e: &Examples) {
        self.0.push(examples(e.location));
    }
}

struct FoldLog;

impl Fold<Vec<String>> for FoldLog {
    fn fold_tag(&mut self, mut acc: Vec<String>, t: &Tag) -> Flow<Vec<String>> {
        acc.push(tag(t.location));
        continuing(acc)
    }
    fn fold_feature(&mut self, mut acc: Vec<String>, f: &Feature) -> Flow<Vec<String>> {
        acc.push(feature(f.location));
        continuing(acc)
    }
    fn fold_rule(&mut self, mut acc: Vec<String>, r: &Rule) -> Flow<Vec<String>> {
        acc.push(rule(r.location));
        continuing(acc)
    }
    fn fold_background(&mut self, mut acc: Vec<String>, b: &Background) -> Flow<Vec<String>> {
        acc.push(background(b.location));
        continuing(acc)
    }
    fn fold_scenario(&mut self, mut acc: Vec<String>, s: &Scenario) -> Flow<Vec<String>> {
        acc.push(scenario(s.location));
        continuing(acc)
    }
    fn fold_step(&mut self, mut acc: Vec<String>, s: &Step) -> Flow<Vec<String>> {
        acc.push(step(s.location));
        continuing(acc)
    }
    fn fold_examples(&mut self, mut acc: Vec<String>, e: &Examples) -> Flow<Vec<String>> {
        acc.push(examples(e.location));
        continuing(acc)
    }
}

#[derive(Default)]
struct HandlerLog(Vec<String>);

impl Handler for HandlerLog {
    fn on_tag(&mut self, t: &Tag) {
        self.0.push(tag(t.location));
    }
    fn on_feature(&mut self, f: &Feature) {
        self.0.push(feature(f.location));
    }
    fn on_rule(&mut self, r: &Rule) {
        self.0.push(rule(r.location));
    }
    fn on_background(&mut self, b: &Background) {
        self.0.push(background(b.location));
    }
    fn on_scenario(&mut self, s: &Scenario) {
        self.0.push(scenario(s.location));
    }
    fn on_step(&mut self, s: &Step) {
        self.0.push(step(s.location));
    }
    fn on_examples(&mut self, e: &Examples) {
        self.0.push(examples(e.location));
    }
}

fn load(path: &str) -> GherkinDocument {
    let text = std::fs::read_to_string(path).unwrap();
    parse(&Source::from_string(text, None)).unwrap()
}

#[test]
fn visitor_fold_and_handler_emit_identical_event_sequences() {
    for path in FIXTURES {
        let doc = load(path);

        let mut visitor_log = VisitorLog::default();
        doc.accept(&mut visitor_log);

        let fold_log = fold_document(&mut FoldLog, vec![], &doc);

        let mut handler_log = HandlerLog::default();
        let source = Source::from_string(std::fs::read_to_string(path).unwrap(), None);
        parse_with_handler(&source, &mut handler_log).unwrap();

        assert_eq!(visitor_log.0, fold_log, "{path}: fold disagreed with visitor");
        assert_eq!(visitor_log.0, handler_log.0, "{path}: handler disagreed with visitor");
        assert!(!visitor_log.0.is_empty(), "{path}: expected at least one event");
    }
}
