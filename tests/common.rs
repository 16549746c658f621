#![allow(dead_code)]
//! Shared helpers for `playsearch` integration tests.

use playsearch::*;

pub fn parse_ok(input: &str) -> Parsed<SearchParams> {
    SearchParams::parse(input).unwrap_or_else(|failure| panic!("{input:?} failed: {failure:?}"))
}

pub fn params(input: &str) -> SearchParams {
    parse_ok(input).value
}

pub fn parse_err(input: &str) -> ParseFailure {
    match SearchParams::parse(input) {
        Ok(parsed) => panic!("{input:?} should fail, got: {parsed:?}"),
        Err(failure) => failure,
    }
}

pub fn message(failure: &ParseFailure) -> &str {
    failure
        .error
        .parsing_message()
        .unwrap_or_else(|| panic!("expected Parsing, got: {:?}", failure.error))
}

pub fn beatmap(params: &SearchParams) -> &BeatmapFilter {
    params
        .beatmap
        .as_ref()
        .unwrap_or_else(|| panic!("expected a beatmap filter, got: {params:?}"))
}

pub fn single(op: Comparator, value: f32) -> ComparisonFilter {
    ComparisonFilter::Single(SingleFilter::new(op, value))
}

pub fn between(first: (Comparator, f32), second: (Comparator, f32)) -> ComparisonFilter {
    ComparisonFilter::Between(BetweenFilter::new(
        SingleFilter::new(first.0, first.1),
        SingleFilter::new(second.0, second.1),
    ))
}
