mod common;
use command_syntax::*;
use common::*;

#[test]
fn mutual_exclusion_names_both_fields() {
    let failure = parse_err("alice -t a -x b");
    assert_eq!(
        message(&failure),
        "A match for both groups 'tag' and 'exclude' isn't allowed"
    );
    assert_eq!(failure.leftover, "");

    assert!(sample_parser().parse("alice -t a").is_ok());
    assert!(sample_parser().parse("alice -x b").is_ok());
}

#[test]
fn occurrence_bound_counts_raw_captures() {
    let failure = parse_err("alice n>1 n<2 n=3");
    assert_eq!(
        message(&failure),
        "Number of matches for 'count' exceeded the maximum amount: 2"
    );
    assert!(sample_parser().parse("alice n>1 n<2").is_ok());
    assert!(sample_parser().parse("alice n>1").is_ok());

    let failure = parse_err("alice -v -v");
    assert_eq!(
        message(&failure),
        "Number of matches for 'verbose' exceeded the maximum amount: 1"
    );
}

#[test]
fn two_captures_that_do_not_form_a_range_fail_on_legality() {
    let failure = parse_err("alice n<1 n<2");
    assert_eq!(
        message(&failure),
        "'<1' and '<2' can't be combined: both contain '<'"
    );

    let failure = parse_err("alice n>=1 n>2");
    assert_eq!(
        message(&failure),
        "'>=1' and '>2' can't be combined: both contain '>'"
    );

    let failure = parse_err("alice n=1 n>2");
    assert_eq!(
        message(&failure),
        "'=1' and '>2' can't be combined: '=' only works on its own"
    );
}

#[test]
fn failures_keep_the_leftover() {
    let failure = parse_err("alice -t a -x b trailing words");
    assert_eq!(failure.leftover, "trailing words");

    let failure = parse_err("alice n<1 n<2 stray");
    assert_eq!(failure.leftover, "stray");
}

#[test]
fn rules_are_checked_in_declaration_order() {
    // both `verbose` and `tag` are violated, `verbose` was declared first
    let failure = parse_err("alice -v -v -t a -x b");
    assert_eq!(
        message(&failure),
        "Number of matches for 'verbose' exceeded the maximum amount: 1"
    );
}

#[test]
fn custom_rules_plug_into_the_engine() {
    #[derive(Debug)]
    struct Requires(&'static str);

    impl ValidationRule for Requires {
        fn is_satisfied(&self, field: &str, captures: &RawMatches) -> bool {
            !captures.contains(field) || captures.contains(self.0)
        }

        fn message(&self, field: &str) -> String {
            format!("'{field}' needs '{}'", self.0)
        }

        fn referenced_fields(&self) -> Vec<&str> {
            vec![self.0]
        }
    }

    let mut builder = PatternBuilder::new();
    builder.add_flag("force", &["-f"]).add_rule(Requires("yes"));
    builder.add_flag("yes", &["-y"]);
    let pattern = builder.build().unwrap();

    assert!(pattern.evaluate("-f -y").is_ok());
    assert!(pattern.evaluate("-y").is_ok());
    let failure = pattern.evaluate("-f").unwrap_err();
    assert_eq!(failure.error, ParseError::parsing("'force' needs 'yes'"));
}
