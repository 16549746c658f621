//! # Declarative command syntax
//!
//! `command-syntax` turns free-form command strings such as
//! `opensand -q feryquitous c>10 c<20 cs>=2` into typed values. A command is
//! described once as a set of fields (flags, free text, number comparisons),
//! each with its aliases and validation rules. The fields compile into one
//! composed pattern, and a [`Parser`] binds every field to a setter on the
//! target type.
//!
//! ## Example
//! ```
//! use command_syntax::{ComparisonFilter, MaxOccurrences, ParserBuilder, SignPolicy};
//!
//! #[derive(Debug, Default)]
//! struct Lookup {
//!     user: String,
//!     count: Option<ComparisonFilter>,
//! }
//!
//! let mut builder = ParserBuilder::<Lookup>::new();
//! builder.add_free_text("user", &[], true).add_rule(MaxOccurrences(1));
//! builder
//!     .add_number_comparison("count", &["c"], SignPolicy::Signed, true)
//!     .add_rule(MaxOccurrences(2));
//! builder
//!     .bind("user", |target, value| {
//!         target.user = value.expect_text("user")?.to_string();
//!         Ok(())
//!     })
//!     .bind("count", |target, value| {
//!         target.count = Some(ComparisonFilter::create(value.expect_comparison("count")?)?);
//!         Ok(())
//!     });
//! let parser = builder.build().unwrap();
//!
//! let parsed = parser.parse("opensand c<20 c>8").unwrap();
//! assert_eq!(parsed.value.user, "opensand");
//! // ranges are ordered by value, not by the order they were typed in
//! assert_eq!(parsed.value.count.unwrap().to_string(), ">8 <20");
//! assert_eq!(parsed.leftover, "");
//! ```

mod error;
mod filter;
mod parser;
mod pattern;
mod rule;
mod value;

pub use error::{ParseError, ParseFailure, RegistrationError};
pub use filter::{BetweenFilter, Comparator, ComparisonFilter, SingleFilter, create_filter};
pub use parser::{ParseResult, Parsed, Parser, ParserBuilder, Setter};
pub use pattern::{
    CaptureKind, CommandPattern, FieldBuilder, FieldDescriptor, MatchOutcome, MatchSet,
    PatternBuilder, RawMatch, RawMatches, SignPolicy,
};
pub use rule::{MaxOccurrences, MutuallyExclusive, ValidationRule};
pub use value::{ComparisonToken, NamedMatchValue, NumberComparison};
