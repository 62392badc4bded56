// Copyright (c) 2020-2023  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The static, per-language keyword table the tokenizer consumes.
//!
//! The table itself is generated at build time from `src/languages.json`
//! (see `build.rs`) so that adding a language is a data change, not a code
//! change. Each bucket is sorted longest-keyword-first by the generator so
//! that matching here can simply walk the slice and take the first hit.

use crate::ast::KeywordType;

/// One language's full set of keyword synonyms, one slice per bucket.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Keywords {
    pub feature: &'static [&'static str],
    pub background: &'static [&'static str],
    pub rule: &'static [&'static str],
    pub scenario: &'static [&'static str],
    pub scenario_outline: &'static [&'static str],
    pub examples: &'static [&'static str],
    pub given: &'static [&'static str],
    pub when: &'static [&'static str],
    pub then: &'static [&'static str],
    pub and: &'static [&'static str],
    pub but: &'static [&'static str],
}

include!(concat!(env!("OUT_DIR"), "/keywords_data.gen.rs"));
include!(concat!(env!("OUT_DIR"), "/keywords_table.gen.rs"));

/// The default language used when no `# language:` directive is present.
pub(crate) const DEFAULT_LANGUAGE: &str = "en";

/// A header keyword that was matched at the start of a trimmed line.
pub(crate) enum HeaderKind {
    Feature,
    Rule,
    Background,
    Scenario,
    ScenarioOutline,
    Examples,
}

/// A step keyword bucket, before contextual resolution of `And`/`But`/`*`.
pub(crate) enum StepBucket {
    Given,
    When,
    Then,
    And,
    But,
    Star,
}

impl StepBucket {
    pub(crate) fn keyword_type(&self) -> KeywordType {
        match self {
            StepBucket::Given => KeywordType::Context,
            StepBucket::When => KeywordType::Action,
            StepBucket::Then => KeywordType::Outcome,
            StepBucket::And | StepBucket::But => KeywordType::Conjunction,
            StepBucket::Star => KeywordType::Unknown,
        }
    }
}

/// Looks up the keyword table for a language code.
///
/// Returns `None` for a code absent from the table, which the parser turns
/// into `ParserError::UnknownLanguage`.
pub(crate) fn lookup(code: &str) -> Option<&'static Keywords> {
    LANGUAGES
        .iter()
        .find(|(lang, _)| *lang == code)
        .map(|(_, kw)| *kw)
}

/// Tries every bucket's keywords longest-first and returns the matched
/// keyword plus the remainder of the line after it.
fn match_longest<'a>(candidates: &[&'static str], rest: &'a str) -> Option<(&'static str, &'a str)> {
    candidates
        .iter()
        .find(|kw| rest.starts_with(**kw))
        .map(|kw| (*kw, &rest[kw.len()..]))
}

/// Matches a structural header keyword (`Feature`, `Rule`, `Background`,
/// `Scenario`, `Scenario Outline`, `Examples`) followed by `:`.
///
/// Longest-match is tried across *all* buckets together so that e.g.
/// `Scenario Outline:` is preferred over `Scenario:` when both are
/// plausible prefixes; ties between distinct buckets cannot occur because a
/// keyword belongs to exactly one bucket in the source data.
pub(crate) fn match_header<'a>(
    keywords: &Keywords,
    trimmed: &'a str,
) -> Option<(HeaderKind, &'static str, &'a str)> {
    let buckets: [(HeaderKind, &[&str]); 6] = [
        (HeaderKind::Feature, keywords.feature),
        (HeaderKind::Rule, keywords.rule),
        (HeaderKind::Background, keywords.background),
        (HeaderKind::ScenarioOutline, keywords.scenario_outline),
        (HeaderKind::Scenario, keywords.scenario),
        (HeaderKind::Examples, keywords.examples),
    ];

    let mut best: Option<(HeaderKind, &'static str, &'a str)> = None;

    for (kind, list) in buckets {
        if let Some((kw, rest)) = match_longest(list, trimmed) {
            if !rest.starts_with(':') {
                continue;
            }
            let better = match &best {
                Some((_, matched, _)) => kw.len() > matched.len(),
                None => true,
            };
            if better {
                best = Some((kind, kw, &rest[1..]));
            }
        }
    }

    best
}

/// Matches a step keyword (`Given`, `When`, `Then`, `And`, `But`, `*`) at
/// the start of the trimmed line, longest-match across buckets.
pub(crate) fn match_step<'a>(
    keywords: &Keywords,
    trimmed: &'a str,
) -> Option<(StepBucket, &'static str, &'a str)> {
    if let Some(rest) = trimmed.strip_prefix('*') {
        return Some((StepBucket::Star, "*", rest));
    }

    let buckets: [(StepBucket, &[&str]); 5] = [
        (StepBucket::Given, keywords.given),
        (StepBucket::When, keywords.when),
        (StepBucket::Then, keywords.then),
        (StepBucket::And, keywords.and),
        (StepBucket::But, keywords.but),
    ];

    let mut best: Option<(StepBucket, &'static str, &'a str)> = None;

    for (bucket, list) in buckets {
        if let Some((kw, rest)) = match_longest(list, trimmed) {
            let better = match &best {
                Some((_, matched, _)) => kw.len() > matched.len(),
                None => true,
            };
            if better {
                best = Some((bucket, kw, rest));
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_language_exists() {
        assert!(lookup(DEFAULT_LANGUAGE).is_some());
    }

    #[test]
    fn unknown_language_is_none() {
        assert!(lookup("xx-not-a-language").is_none());
    }

    #[test]
    fn scenario_outline_beats_scenario() {
        let kw = lookup("en").unwrap();
        let (kind, matched, rest) = match_header(kw, "Scenario Outline: Foo").unwrap();
        assert!(matches!(kind, HeaderKind::ScenarioOutline));
        assert_eq!(matched, "Scenario Outline");
        assert_eq!(rest, " Foo");
    }

    #[test]
    fn star_step_matches() {
        let kw = lookup("en").unwrap();
        let (bucket, matched, rest) = match_step(kw, "* a step").unwrap();
        assert!(matches!(bucket, StepBucket::Star));
        assert_eq!(matched, "*");
        assert_eq!(rest, " a step");
    }
}
