use crate::{Comparator, ParseError};
use std::fmt;

/// What a single field produced after the composed pattern ran over the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamedMatchValue {
    /// The field is declared but nothing in the input matched it.
    NoMatch,
    /// A flag such as `-e` was present.
    Flag,
    /// Free text with surrounding quotes and spaces stripped.
    ///
    /// ```
    /// use command_syntax::{NamedMatchValue, PatternBuilder};
    /// let mut builder = PatternBuilder::new();
    /// builder.add_free_text("artist", &["-a"], true);
    /// let pattern = builder.build().unwrap();
    /// let outcome = pattern.evaluate(r#"-a "Inori Minase""#).unwrap();
    /// assert_eq!(
    ///     outcome.matches.get("artist"),
    ///     Some(&NamedMatchValue::String { text: "Inori Minase".into() })
    /// );
    /// ```
    String { text: String },
    /// One comparison, or two captured for the same field (`c>8 c<20`).
    NumberComparison(NumberComparison),
}

impl NamedMatchValue {
    pub fn is_match(&self) -> bool {
        !matches!(self, NamedMatchValue::NoMatch)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            NamedMatchValue::String { text } => Some(text),
            _ => None,
        }
    }

    pub fn as_comparison(&self) -> Option<&NumberComparison> {
        match self {
            NamedMatchValue::NumberComparison(value) => Some(value),
            _ => None,
        }
    }

    /// Used by setters that only accept free text.
    pub fn expect_text(&self, field: &str) -> Result<&str, ParseError> {
        self.as_text()
            .ok_or_else(|| self.mismatch(field, "a text value"))
    }

    /// Used by setters that only accept number comparisons.
    pub fn expect_comparison(&self, field: &str) -> Result<&NumberComparison, ParseError> {
        self.as_comparison()
            .ok_or_else(|| self.mismatch(field, "a number comparison"))
    }

    /// Used by setters bound to flags.
    pub fn expect_flag(&self, field: &str) -> Result<bool, ParseError> {
        match self {
            NamedMatchValue::Flag => Ok(true),
            NamedMatchValue::NoMatch => Ok(false),
            _ => Err(self.mismatch(field, "a flag")),
        }
    }

    fn mismatch(&self, field: &str, expected: &str) -> ParseError {
        ParseError::parsing(format!(
            "Expected {expected} for '{field}', found {}",
            self.kind_name()
        ))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            NamedMatchValue::NoMatch => "no match",
            NamedMatchValue::Flag => "a flag",
            NamedMatchValue::String { .. } => "a text value",
            NamedMatchValue::NumberComparison(_) => "a number comparison",
        }
    }
}

/// A raw `operator value` pair exactly as captured, before numeric parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonToken {
    pub operator: Comparator,
    pub value: String,
}

impl ComparisonToken {
    pub fn new(operator: Comparator, value: impl Into<String>) -> Self {
        Self {
            operator,
            value: value.into(),
        }
    }
}

impl fmt::Display for ComparisonToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.value)
    }
}

/// One or two comparisons captured for the same field in a single pass.
///
/// The secondary pair is only ever set together, so "is this a range" is a
/// property of the shape rather than a separate flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberComparison {
    primary: ComparisonToken,
    secondary: Option<ComparisonToken>,
}

impl NumberComparison {
    pub fn single(operator: Comparator, value: impl Into<String>) -> Self {
        Self {
            primary: ComparisonToken::new(operator, value),
            secondary: None,
        }
    }

    pub fn range(primary: ComparisonToken, secondary: ComparisonToken) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn operator(&self) -> Comparator {
        self.primary.operator
    }

    pub fn value(&self) -> &str {
        &self.primary.value
    }

    pub fn primary(&self) -> &ComparisonToken {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&ComparisonToken> {
        self.secondary.as_ref()
    }

    pub fn secondary_operator(&self) -> Option<Comparator> {
        self.secondary.as_ref().map(|token| token.operator)
    }

    pub fn secondary_value(&self) -> Option<&str> {
        self.secondary.as_ref().map(|token| token.value.as_str())
    }

    pub fn is_range(&self) -> bool {
        self.secondary.is_some()
    }
}

impl fmt::Display for NumberComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        if let Some(secondary) = &self.secondary {
            write!(f, " {secondary}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_derived_from_secondary_pair() {
        let single = NumberComparison::single(Comparator::Greater, "8");
        assert!(!single.is_range());
        assert_eq!(single.secondary_operator(), None);
        assert_eq!(single.secondary_value(), None);

        let range = NumberComparison::range(
            ComparisonToken::new(Comparator::Greater, "8"),
            ComparisonToken::new(Comparator::Less, "20"),
        );
        assert!(range.is_range());
        assert_eq!(range.secondary_operator(), Some(Comparator::Less));
        assert_eq!(range.secondary_value(), Some("20"));
    }

    #[test]
    fn comparison_formats_back_to_tokens() {
        let single = NumberComparison::single(Comparator::LessOrEqual, "5");
        assert_eq!(single.to_string(), "<=5");

        let range = NumberComparison::range(
            ComparisonToken::new(Comparator::Greater, "8"),
            ComparisonToken::new(Comparator::Less, "20"),
        );
        assert_eq!(range.to_string(), ">8 <20");
    }

    #[test]
    fn expect_helpers_reject_other_variants() {
        let text = NamedMatchValue::String {
            text: "opensand".into(),
        };
        assert_eq!(text.expect_text("username").unwrap(), "opensand");
        let err = text.expect_comparison("playcount").unwrap_err();
        assert_eq!(
            err.parsing_message(),
            Some("Expected a number comparison for 'playcount', found a text value")
        );

        assert!(NamedMatchValue::Flag.expect_flag("exact").unwrap());
        assert!(!NamedMatchValue::NoMatch.expect_flag("exact").unwrap());
        assert!(text.expect_flag("exact").is_err());
    }
}
