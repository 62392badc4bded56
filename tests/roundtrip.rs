use gherkin_parser::{
    continuing, fold_document, parse, write, Background, Comment, DataTable, DocString, Examples,
    Feature, Flow, Fold, GherkinDocument, Rule, Scenario, Source, Step, Tag, TableRow,
};

const FIXTURES: &[&str] = &[
    "./tests/fixtures/good/minimal.feature",
    "./tests/fixtures/good/tags.feature",
    "./tests/fixtures/good/docstring.feature",
    "./tests/fixtures/good/i18n_fr.feature",
    "./tests/fixtures/good/rules_and_background.feature",
    "./tests/fixtures/good/tables.feature",
];

/// Every field but `location`/`id`, flattened into one string per node.
///
/// Writing and reparsing a tree legitimately shifts every node's location
/// (the writer never reproduces header-to-child blank lines, since nothing
/// in the AST records them), so comparing `GherkinDocument`'s derived
/// `PartialEq` directly — which includes `location` on every nested struct
/// — would fail on any fixture containing such a blank line. Folding to a
/// location-blind fingerprint instead asks the only question the round-trip
/// property actually makes: did content and structure survive.
#[derive(Default)]
struct Fingerprint(Vec<String>);

impl Fold<Vec<String>> for Fingerprint {
    fn fold_feature(&mut self, mut acc: Vec<String>, f: &Feature) -> Flow<Vec<String>> {
        acc.push(format!("feature:{}:{}:{}:{}", f.language, f.keyword, f.name, f.description));
        continuing(acc)
    }
    fn fold_rule(&mut self, mut acc: Vec<String>, r: &Rule) -> Flow<Vec<String>> {
        acc.push(format!("rule:{}:{}:{}", r.keyword, r.name, r.description));
        continuing(acc)
    }
    fn fold_background(&mut self, mut acc: Vec<String>, b: &Background) -> Flow<Vec<String>> {
        acc.push(format!("background:{}:{}:{}", b.keyword, b.name, b.description));
        continuing(acc)
    }
    fn fold_scenario(&mut self, mut acc: Vec<String>, s: &Scenario) -> Flow<Vec<String>> {
        acc.push(format!(
            "scenario:{:?}:{}:{}:{}",
            s.kind, s.keyword, s.name, s.description
        ));
        continuing(acc)
    }
    fn fold_step(&mut self, mut acc: Vec<String>, s: &Step) -> Flow<Vec<String>> {
        acc.push(format!("step:{}:{:?}:{}", s.keyword, s.keyword_type, s.text));
        continuing(acc)
    }
    fn fold_examples(&mut self, mut acc: Vec<String>, e: &Examples) -> Flow<Vec<String>> {
        acc.push(format!("examples:{}:{}:{}", e.keyword, e.name, e.description));
        continuing(acc)
    }
    fn fold_doc_string(&mut self, mut acc: Vec<String>, ds: &DocString) -> Flow<Vec<String>> {
        acc.push(format!("docstring:{:?}:{:?}:{}", ds.delimiter, ds.media_type, ds.content));
        continuing(acc)
    }
    fn fold_data_table(&mut self, mut acc: Vec<String>, _dt: &DataTable) -> Flow<Vec<String>> {
        acc.push("datatable".to_string());
        continuing(acc)
    }
    fn fold_table_row(&mut self, mut acc: Vec<String>, row: &TableRow) -> Flow<Vec<String>> {
        acc.push(format!("row:{}", row.values().collect::<Vec<_>>().join(",")));
        continuing(acc)
    }
    fn fold_tag(&mut self, mut acc: Vec<String>, t: &Tag) -> Flow<Vec<String>> {
        acc.push(format!("tag:{}", t.name));
        continuing(acc)
    }
    fn fold_comment(&mut self, mut acc: Vec<String>, c: &Comment) -> Flow<Vec<String>> {
        acc.push(format!("comment:{}", c.text));
        continuing(acc)
    }
}

fn fingerprint(doc: &GherkinDocument) -> Vec<String> {
    fold_document(&mut Fingerprint::default(), vec![], doc)
}

/// `parse(write(parse(s)))` carries the same content and structure as
/// `parse(s)`: writing and re-parsing never drops or reorders a node, even
/// though the exact surface text (indentation, column alignment, and
/// header-to-child blank lines the AST has nowhere to store) may change.
#[test]
fn write_then_reparse_preserves_structure() {
    for path in FIXTURES {
        let text = std::fs::read_to_string(path).unwrap();
        let original = parse(&Source::from_string(text, None)).unwrap();
        let rendered = write(&original).unwrap();
        let reparsed = parse(&Source::from_string(rendered, None))
            .unwrap_or_else(|e| panic!("{path}: rendered output failed to reparse: {e}"));
        assert_eq!(
            fingerprint(&reparsed),
            fingerprint(&original),
            "{path}: structure changed across a write/reparse round trip"
        );
    }
}

/// `write(parse(write(d)))` equals `write(d)`: once a tree has gone through
/// the writer once, writing it again (after reparsing) is a no-op.
#[test]
fn writer_output_is_a_fixed_point() {
    for path in FIXTURES {
        let text = std::fs::read_to_string(path).unwrap();
        let original = parse(&Source::from_string(text, None)).unwrap();
        let once = write(&original).unwrap();
        let reparsed = parse(&Source::from_string(once.clone(), None)).unwrap();
        let twice = write(&reparsed).unwrap();
        assert_eq!(once, twice, "{path}: writer output is not idempotent");
    }
}
