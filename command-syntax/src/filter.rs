use crate::{ComparisonToken, NumberComparison, ParseError};
use serde::Serialize;
use std::fmt;

/// Comparison operators a number field understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// No operator was given; renders as an empty string.
    #[default]
    None,
    Less,
    LessOrEqual,
    Equal,
    Greater,
    GreaterOrEqual,
}

impl Comparator {
    /// Maps an operator token to its comparator. Unknown tokens map to
    /// [`Comparator::None`].
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "<" => Comparator::Less,
            "<=" => Comparator::LessOrEqual,
            "=" => Comparator::Equal,
            ">" => Comparator::Greater,
            ">=" => Comparator::GreaterOrEqual,
            _ => Comparator::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Comparator::None => "",
            Comparator::Less => "<",
            Comparator::LessOrEqual => "<=",
            Comparator::Equal => "=",
            Comparator::Greater => ">",
            Comparator::GreaterOrEqual => ">=",
        }
    }

    fn bounds_above(self) -> bool {
        matches!(self, Comparator::Less | Comparator::LessOrEqual)
    }

    fn bounds_below(self) -> bool {
        matches!(self, Comparator::Greater | Comparator::GreaterOrEqual)
    }

    fn is_exact(self) -> bool {
        matches!(self, Comparator::Equal | Comparator::None)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `operator value`, e.g. `<=5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SingleFilter {
    pub operator: Comparator,
    pub value: f32,
}

impl SingleFilter {
    pub fn new(operator: Comparator, value: f32) -> Self {
        Self { operator, value }
    }

    fn from_token(token: &ComparisonToken) -> Result<Self, ParseError> {
        Ok(Self::new(token.operator, parse_number(&token.value)?))
    }
}

impl fmt::Display for SingleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.value)
    }
}

/// Two-sided range. `min.value <= max.value` always holds: the constructor
/// orders its inputs by value, never by operator.
///
/// ```
/// use command_syntax::{BetweenFilter, Comparator, SingleFilter};
/// let range = BetweenFilter::new(
///     SingleFilter::new(Comparator::Less, 20.0),
///     SingleFilter::new(Comparator::Greater, 8.0),
/// );
/// assert_eq!(range.min().value, 8.0);
/// assert_eq!(range.max().value, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BetweenFilter {
    min: SingleFilter,
    max: SingleFilter,
}

impl BetweenFilter {
    pub fn new(first: SingleFilter, second: SingleFilter) -> Self {
        if first.value <= second.value {
            Self {
                min: first,
                max: second,
            }
        } else {
            Self {
                min: second,
                max: first,
            }
        }
    }

    pub fn min(&self) -> SingleFilter {
        self.min
    }

    pub fn max(&self) -> SingleFilter {
        self.max
    }
}

impl fmt::Display for BetweenFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.min, self.max)
    }
}

/// Numeric filter handed to the query builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComparisonFilter {
    Single(SingleFilter),
    Between(BetweenFilter),
}

impl ComparisonFilter {
    /// Builds a filter from a raw capture, rejecting malformed numbers and
    /// operator pairs that can't describe a range.
    pub fn create(raw: &NumberComparison) -> Result<Self, ParseError> {
        let Some(secondary) = raw.secondary() else {
            return Ok(ComparisonFilter::Single(SingleFilter::from_token(
                raw.primary(),
            )?));
        };

        check_range_operators(raw.primary(), secondary)?;
        let first = SingleFilter::from_token(raw.primary())?;
        let second = SingleFilter::from_token(secondary)?;
        Ok(ComparisonFilter::Between(BetweenFilter::new(first, second)))
    }

    /// The `(operator, value)` pairs a consumer embeds into its query, lower
    /// bound first for ranges.
    ///
    /// ```
    /// use command_syntax::{Comparator, ComparisonFilter, NumberComparison};
    /// let filter = ComparisonFilter::create(&NumberComparison::single(Comparator::GreaterOrEqual, "2")).unwrap();
    /// assert_eq!(filter.pairs(), vec![(Comparator::GreaterOrEqual, 2.0)]);
    /// ```
    pub fn pairs(&self) -> Vec<(Comparator, f32)> {
        match self {
            ComparisonFilter::Single(single) => vec![(single.operator, single.value)],
            ComparisonFilter::Between(between) => vec![
                (between.min.operator, between.min.value),
                (between.max.operator, between.max.value),
            ],
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, ComparisonFilter::Between(_))
    }
}

impl fmt::Display for ComparisonFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonFilter::Single(single) => single.fmt(f),
            ComparisonFilter::Between(between) => between.fmt(f),
        }
    }
}

/// Free-function form of [`ComparisonFilter::create`].
pub fn create_filter(raw: &NumberComparison) -> Result<ComparisonFilter, ParseError> {
    ComparisonFilter::create(raw)
}

fn check_range_operators(
    first: &ComparisonToken,
    second: &ComparisonToken,
) -> Result<(), ParseError> {
    let (a, b) = (first.operator, second.operator);
    if a.is_exact() || b.is_exact() {
        return Err(ParseError::parsing(format!(
            "'{first}' and '{second}' can't be combined: '=' only works on its own"
        )));
    }
    if a.bounds_above() && b.bounds_above() {
        return Err(ParseError::parsing(format!(
            "'{first}' and '{second}' can't be combined: both contain '<'"
        )));
    }
    if a.bounds_below() && b.bounds_below() {
        return Err(ParseError::parsing(format!(
            "'{first}' and '{second}' can't be combined: both contain '>'"
        )));
    }
    Ok(())
}

fn parse_number(raw: &str) -> Result<f32, ParseError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ParseError::parsing(format!("'{trimmed}' is not a valid number"))),
    }
}
