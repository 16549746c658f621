use crate::RawMatches;
use std::fmt;

/// A constraint evaluated against every raw capture of one input, before any
/// value is extracted. Rules are attached to the field they guard.
pub trait ValidationRule: fmt::Debug + Send + Sync {
    fn is_satisfied(&self, field: &str, captures: &RawMatches) -> bool;

    /// Message reported verbatim as the parsing error when the rule fails.
    fn message(&self, field: &str) -> String;

    /// Fields other than the owner this rule looks at.
    fn referenced_fields(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Bounds how many raw captures a field may produce. A between-range
/// (`c>8 c<20`) is two captures, so `MaxOccurrences(2)` allows it while
/// `MaxOccurrences(1)` forbids it.
///
/// ```
/// use command_syntax::{MaxOccurrences, PatternBuilder, SignPolicy};
/// let mut builder = PatternBuilder::new();
/// builder
///     .add_number_comparison("playcount", &["c"], SignPolicy::Signed, true)
///     .add_rule(MaxOccurrences(2));
/// let pattern = builder.build().unwrap();
/// assert!(pattern.evaluate("c>1 c<5").is_ok());
/// let failure = pattern.evaluate("c>1 c<5 c=3").unwrap_err();
/// assert_eq!(
///     failure.error.to_string(),
///     "Number of matches for 'playcount' exceeded the maximum amount: 2"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxOccurrences(pub usize);

impl ValidationRule for MaxOccurrences {
    fn is_satisfied(&self, field: &str, captures: &RawMatches) -> bool {
        captures.count(field) <= self.0
    }

    fn message(&self, field: &str) -> String {
        format!(
            "Number of matches for '{field}' exceeded the maximum amount: {}",
            self.0
        )
    }
}

/// Forbids the owning field and `other` from both matching the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutuallyExclusive(pub String);

impl MutuallyExclusive {
    pub fn with(other: impl Into<String>) -> Self {
        Self(other.into())
    }
}

impl ValidationRule for MutuallyExclusive {
    fn is_satisfied(&self, field: &str, captures: &RawMatches) -> bool {
        !(captures.contains(field) && captures.contains(&self.0))
    }

    fn message(&self, field: &str) -> String {
        format!(
            "A match for both groups '{field}' and '{}' isn't allowed",
            self.0
        )
    }

    fn referenced_fields(&self) -> Vec<&str> {
        vec![self.0.as_str()]
    }
}
