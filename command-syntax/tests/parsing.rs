mod common;
use command_syntax::*;
use common::*;

#[test]
fn every_field_kind_is_populated() {
    let parsed = parse_ok("alice -v -t rust n>3 w<=2.5");
    let sample = parsed.value;
    assert_eq!(sample.name.as_deref(), Some("alice"));
    assert!(sample.verbose);
    assert_eq!(sample.tag.as_deref(), Some("rust"));
    assert_eq!(as_single(&sample.count), SingleFilter::new(Comparator::Greater, 3.0));
    assert_eq!(as_single(&sample.weight), SingleFilter::new(Comparator::LessOrEqual, 2.5));
    assert_eq!(parsed.leftover, "");
}

#[test]
fn empty_input_yields_defaults() {
    for input in ["", "   "] {
        let parsed = parse_ok(input);
        assert_eq!(parsed.value, Sample::default());
        assert_eq!(parsed.leftover, "");
    }
}

#[test]
fn unconsumed_text_is_trimmed_into_leftover() {
    let parsed = parse_ok("alice junk");
    assert_eq!(parsed.value.name.as_deref(), Some("alice"));
    assert_eq!(parsed.leftover, "junk");

    let parsed = parse_ok("alice   some  -v   junk  ");
    assert!(parsed.value.verbose);
    assert_eq!(parsed.leftover, "some   junk");
}

#[test]
fn positional_text_must_lead_the_input() {
    let parsed = parse_ok("-v alice");
    assert!(parsed.value.verbose);
    assert_eq!(parsed.value.name, None);
    assert_eq!(parsed.leftover, "alice");
}

#[test]
fn quoted_text_keeps_inner_spaces() {
    let parsed = parse_ok(r#"alice -t "two  words""#);
    assert_eq!(parsed.value.tag.as_deref(), Some("two  words"));

    let parsed = parse_ok(r#""alice smith" -v"#);
    assert_eq!(parsed.value.name.as_deref(), Some("alice smith"));
    assert!(parsed.value.verbose);
}

#[test]
fn quotes_are_rejected_where_not_allowed() {
    let parsed = parse_ok(r#"alice -x "two words""#);
    assert_eq!(parsed.value.exclude, None);
    assert_eq!(parsed.leftover, r#"-x "two words""#);

    let parsed = parse_ok("alice -x plain");
    assert_eq!(parsed.value.exclude.as_deref(), Some("plain"));
}

#[test]
fn sign_and_format_policies_are_enforced_by_the_pattern() {
    let parsed = parse_ok("alice n>-4 w>-1");
    assert_eq!(as_single(&parsed.value.count).value, -4.0);
    assert_eq!(parsed.value.weight, None);
    assert_eq!(parsed.leftover, "w>-1");

    let parsed = parse_ok("alice n>2.5 w>=.5");
    assert_eq!(parsed.value.count, None);
    assert_eq!(as_single(&parsed.value.weight).value, 0.5);
    assert_eq!(parsed.leftover, "n>2.5");
}

#[test]
fn two_captures_fold_into_an_ordered_range() {
    let between = as_between(&parse_ok("alice n>1 n<=9").value.count);
    assert_eq!(between.min(), SingleFilter::new(Comparator::Greater, 1.0));
    assert_eq!(between.max(), SingleFilter::new(Comparator::LessOrEqual, 9.0));

    let between = as_between(&parse_ok("alice n<9 n>1").value.count);
    assert_eq!(between.min().value, 1.0);
    assert_eq!(between.max().value, 9.0);
}

#[test]
fn aliases_ignore_case_and_prefer_the_longest() {
    let parsed = parse_ok("alice -V --TAG x NUM>5");
    assert!(parsed.value.verbose);
    assert_eq!(parsed.value.tag.as_deref(), Some("x"));
    assert_eq!(as_single(&parsed.value.count).value, 5.0);
    assert_eq!(parsed.leftover, "");
}

#[test]
fn aliases_do_not_match_inside_longer_words() {
    let parsed = parse_ok("alice -verbose nx>3 w>1kg");
    assert!(!parsed.value.verbose);
    assert_eq!(parsed.value.count, None);
    assert_eq!(parsed.value.weight, None);
    assert_eq!(parsed.leftover, "-verbose nx>3 w>1kg");
}

#[test]
fn shared_parser_is_usable_from_many_threads() {
    let parser = sample_parser();
    std::thread::scope(|scope| {
        for n in 0..8 {
            let parser = &parser;
            scope.spawn(move || {
                let parsed = parser.parse(&format!("user{n} n>{n}")).unwrap();
                assert_eq!(parsed.value.name, Some(format!("user{n}")));
                assert_eq!(as_single(&parsed.value.count).value, n as f32);
            });
        }
    });
}
