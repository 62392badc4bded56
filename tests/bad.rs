use std::path::Path;

use gherkin_parser::{parse, Errors, GherkinDocument, ParserError, Source};

fn load_feature<P: AsRef<Path>>(path: P) -> Result<GherkinDocument, Errors> {
    let text = std::fs::read_to_string(path.as_ref()).expect("fixture file should exist");
    parse(&Source::from_string(text, path.as_ref().to_str().map(String::from)))
}

#[test]
fn inconsistent_cell_count() {
    let error = load_feature("./tests/fixtures/bad/inconsistent_cell_count.feature").unwrap_err();
    match error.primary().unwrap() {
        ParserError::InconsistentTableCells {
            expected_count,
            got_count,
            ..
        } => {
            assert_eq!(*expected_count, 2);
            assert_eq!(*got_count, 3);
        }
        other => panic!("wrong error variant: {other:?}"),
    }
}

#[test]
fn invalid_language() {
    let error = load_feature("./tests/fixtures/bad/invalid_language.feature").unwrap_err();
    match error.primary().unwrap() {
        ParserError::UnknownLanguage { code, .. } => assert_eq!(code, "klingon"),
        other => panic!("wrong error variant: {other:?}"),
    }
}

#[test]
fn unexpected_eof() {
    let error = load_feature("./tests/fixtures/bad/unexpected_eof.feature").unwrap_err();
    match error.primary().unwrap() {
        ParserError::UnterminatedDocString { .. } => {}
        other => panic!("wrong error variant: {other:?}"),
    }
}

#[test]
fn orphan_tags() {
    let error = load_feature("./tests/fixtures/bad/orphan_tags.feature").unwrap_err();
    match error.primary().unwrap() {
        ParserError::OrphanTags { .. } => {}
        other => panic!("wrong error variant: {other:?}"),
    }
}

#[test]
fn examples_under_non_outline() {
    let error = load_feature("./tests/fixtures/bad/examples_under_non_outline.feature").unwrap_err();
    match error.primary().unwrap() {
        ParserError::ExamplesUnderNonOutline { .. } => {}
        other => panic!("wrong error variant: {other:?}"),
    }
}

#[test]
fn missing_feature() {
    let error = load_feature("./tests/fixtures/bad/missing_feature.feature").unwrap_err();
    match error.primary().unwrap() {
        ParserError::MissingFeature { location } => assert_eq!(location.line, 1),
        other => panic!("wrong error variant: {other:?}"),
    }
}

#[test]
fn unexpected_token() {
    let error = load_feature("./tests/fixtures/bad/unexpected_token.feature").unwrap_err();
    match error.primary().unwrap() {
        ParserError::UnexpectedToken { got, .. } => {
            assert_eq!(*got, gherkin_parser::TokenKind::StepLine)
        }
        other => panic!("wrong error variant: {other:?}"),
    }
}
