// Copyright (c) 2018  Brendan Molloy <brendan@bbqsrc.net>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::{collections::BTreeMap, path::Path};

use quote::{__private::Span, quote};
use syn::Ident;

#[derive(Debug, serde::Deserialize)]
struct Data {
    feature: Vec<String>,
    background: Vec<String>,
    rule: Vec<String>,
    scenario: Vec<String>,
    scenario_outline: Vec<String>,
    examples: Vec<String>,
    given: Vec<String>,
    when: Vec<String>,
    then: Vec<String>,
    and: Vec<String>,
    but: Vec<String>,
}

/// Longest-match tokenization requires each bucket sorted longest-first,
/// otherwise a short synonym could shadow a longer one starting with the
/// same prefix.
fn longest_first(mut v: Vec<String>) -> Vec<String> {
    v.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
    v
}

fn main() {
    use heck::ToShoutySnakeCase as _;

    println!("cargo:rerun-if-changed=src/languages.json");

    let out_dir = std::env::var_os("OUT_DIR").unwrap();
    let out_dir = Path::new(&out_dir);

    let f = std::fs::read_to_string("./src/languages.json").unwrap();
    let langs: BTreeMap<String, Data> = serde_json::from_str(&f).unwrap();

    let mut keyword_defs = vec![];
    let mut table_entries = vec![];

    for (lang, data) in langs {
        let lang_upper = lang.to_shouty_snake_case();
        let lang_ident: Ident = Ident::new(&lang_upper, Span::call_site());

        let Data {
            feature,
            background,
            rule,
            scenario,
            scenario_outline,
            examples,
            given,
            when,
            then,
            and,
            but,
        } = data;

        let feature = longest_first(feature);
        let background = longest_first(background);
        let rule = longest_first(rule);
        let scenario = longest_first(scenario);
        let scenario_outline = longest_first(scenario_outline);
        let examples = longest_first(examples);
        let given = longest_first(given);
        let when = longest_first(when);
        let then = longest_first(then);
        let and = longest_first(and);
        let but = longest_first(but);

        let keyword_def = quote! {
            static #lang_ident: Keywords = Keywords {
                feature: &[#(#feature),*],
                background: &[#(#background),*],
                rule: &[#(#rule),*],
                scenario: &[#(#scenario),*],
                scenario_outline: &[#(#scenario_outline),*],
                examples: &[#(#examples),*],
                given: &[#(#given),*],
                when: &[#(#when),*],
                then: &[#(#then),*],
                and: &[#(#and),*],
                but: &[#(#but),*],
            };
        };

        table_entries.push(quote! { (#lang, &#lang_ident) });

        keyword_defs.push(keyword_def);
    }

    let keyword_defs = quote! { #(#keyword_defs)* }.to_string();

    let table = quote! {
        /// Static per-language lookup, generated from `src/languages.json`.
        pub(crate) static LANGUAGES: &[(&str, &Keywords)] = &[
            #(#table_entries),*
        ];
    }
    .to_string();

    std::fs::write(out_dir.join("keywords_data.gen.rs"), keyword_defs).unwrap();
    std::fs::write(out_dir.join("keywords_table.gen.rs"), table).unwrap();
}
