use command_syntax::{Comparator, ComparisonFilter};

/// Renders `filter` as `relation.attribute op value` fragments joined by
/// ` AND `, lower bound first. An absent filter renders as an empty string.
///
/// ```
/// use playsearch::{BetweenFilter, Comparator, ComparisonFilter, SingleFilter, render_clause};
/// let range = ComparisonFilter::Between(BetweenFilter::new(
///     SingleFilter::new(Comparator::Less, 4.0),
///     SingleFilter::new(Comparator::Greater, 2.0),
/// ));
/// assert_eq!(
///     render_clause(Some(&range), "beatmaps", "circle_size"),
///     "beatmaps.circle_size > 2 AND beatmaps.circle_size < 4"
/// );
/// assert_eq!(render_clause(None, "beatmaps", "circle_size"), "");
/// ```
pub fn render_clause(filter: Option<&ComparisonFilter>, relation: &str, attribute: &str) -> String {
    let Some(filter) = filter else {
        return String::new();
    };
    filter
        .pairs()
        .into_iter()
        .map(|(operator, value)| {
            format!("{relation}.{attribute} {} {value}", sql_operator(operator))
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn sql_operator(operator: Comparator) -> &'static str {
    match operator {
        // a bare value compares for equality
        Comparator::None => "=",
        other => other.as_str(),
    }
}
