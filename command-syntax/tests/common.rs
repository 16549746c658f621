#![allow(dead_code)]
//! Shared helpers for `command-syntax` integration tests.

use command_syntax::*;

/// A small command used across the integration tests:
/// `<name> [-v] [-t text] [-x text] [n<op><int>]... [w<op><decimal>]...`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sample {
    pub name: Option<String>,
    pub verbose: bool,
    pub tag: Option<String>,
    pub exclude: Option<String>,
    pub count: Option<ComparisonFilter>,
    pub weight: Option<ComparisonFilter>,
}

pub fn sample_parser() -> Parser<Sample> {
    let mut builder = ParserBuilder::<Sample>::new();
    builder
        .add_free_text("name", &[], true)
        .add_rule(MaxOccurrences(1));
    builder
        .add_flag("verbose", &["-v", "--verbose"])
        .add_rule(MaxOccurrences(1));
    builder
        .add_free_text("tag", &["-t", "--tag"], true)
        .add_rule(MaxOccurrences(1))
        .add_rule(MutuallyExclusive::with("exclude"));
    builder
        .add_free_text("exclude", &["-x"], false)
        .add_rule(MaxOccurrences(1));
    builder
        .add_number_comparison("count", &["n", "num"], SignPolicy::Signed, true)
        .add_rule(MaxOccurrences(2));
    builder
        .add_number_comparison("weight", &["w"], SignPolicy::PositiveOnly, false)
        .add_rule(MaxOccurrences(2));
    builder
        .bind("name", |sample, value| {
            sample.name = Some(value.expect_text("name")?.to_string());
            Ok(())
        })
        .bind("verbose", |sample, value| {
            sample.verbose = value.expect_flag("verbose")?;
            Ok(())
        })
        .bind("tag", |sample, value| {
            sample.tag = Some(value.expect_text("tag")?.to_string());
            Ok(())
        })
        .bind("exclude", |sample, value| {
            sample.exclude = Some(value.expect_text("exclude")?.to_string());
            Ok(())
        })
        .bind("count", |sample, value| {
            sample.count = Some(create_filter(value.expect_comparison("count")?)?);
            Ok(())
        })
        .bind("weight", |sample, value| {
            sample.weight = Some(create_filter(value.expect_comparison("weight")?)?);
            Ok(())
        });
    builder.build().unwrap()
}

pub fn parse_ok(input: &str) -> Parsed<Sample> {
    sample_parser().parse(input).unwrap()
}

pub fn parse_err(input: &str) -> ParseFailure {
    sample_parser().parse(input).unwrap_err()
}

pub fn message(failure: &ParseFailure) -> &str {
    failure
        .error
        .parsing_message()
        .unwrap_or_else(|| panic!("expected Parsing, got: {:?}", failure.error))
}

pub fn as_single(filter: &Option<ComparisonFilter>) -> SingleFilter {
    match filter {
        Some(ComparisonFilter::Single(single)) => *single,
        other => panic!("expected Single, got: {other:?}"),
    }
}

pub fn as_between(filter: &Option<ComparisonFilter>) -> BetweenFilter {
    match filter {
        Some(ComparisonFilter::Between(between)) => *between,
        other => panic!("expected Between, got: {other:?}"),
    }
}
