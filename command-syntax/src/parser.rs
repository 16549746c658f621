//! Phased parsing of one command string into a typed target.
//!
//! A [`Parser`] runs every nested sub-parser first, each one shrinking the
//! working input to its leftover, then evaluates its own [`CommandPattern`]
//! over what remains and finally hands every matched value to the setter bound
//! to that field. The first failure in any phase aborts the parse; no partially
//! populated target is ever returned.

use crate::{
    CommandPattern, FieldBuilder, NamedMatchValue, ParseError, ParseFailure, PatternBuilder,
    RegistrationError, SignPolicy,
};
use std::fmt;
use tracing::{debug, trace};

/// Transfers one matched value onto the target.
pub type Setter<T> =
    Box<dyn Fn(&mut T, &NamedMatchValue) -> Result<(), ParseError> + Send + Sync>;

/// A populated target and the text no field consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub leftover: String,
}

pub type ParseResult<T> = Result<Parsed<T>, ParseFailure>;

trait NestedPhase<T>: Send + Sync {
    /// Parses `input` onto `target` and returns the remaining input.
    fn apply(&self, target: &mut T, input: &str) -> Result<String, ParseFailure>;
}

struct Nested<U, F> {
    parser: Parser<U>,
    assign: F,
}

impl<T, U, F> NestedPhase<T> for Nested<U, F>
where
    U: Default,
    F: Fn(&mut T, U) + Send + Sync,
{
    fn apply(&self, target: &mut T, input: &str) -> Result<String, ParseFailure> {
        let Parsed { value, leftover } = self.parser.parse(input)?;
        (self.assign)(target, value);
        Ok(leftover)
    }
}

/// Compiled registration for target type `T`. Build once, share freely.
pub struct Parser<T> {
    pattern: CommandPattern,
    setters: Vec<(String, Setter<T>)>,
    nested: Vec<Box<dyn NestedPhase<T>>>,
}

impl<T: Default> Parser<T> {
    pub fn pattern(&self) -> &CommandPattern {
        &self.pattern
    }

    pub fn parse(&self, input: &str) -> ParseResult<T> {
        let mut target = T::default();
        let mut working = input.to_string();

        for (index, nested) in self.nested.iter().enumerate() {
            working = nested.apply(&mut target, &working)?;
            trace!(index, leftover = %working, "nested phase done");
        }

        let outcome = self.pattern.evaluate(&working)?;
        trace!(
            captures = outcome.raw.len(),
            leftover = %outcome.leftover,
            "composed match done"
        );

        for (field, value) in outcome.matches.matched() {
            let Some(setter) = self.setter(field) else {
                continue;
            };
            if let Err(error) = setter(&mut target, value) {
                debug!(field, %error, "setter rejected value");
                return Err(ParseFailure::new(error, outcome.leftover));
            }
        }

        Ok(Parsed {
            value: target,
            leftover: outcome.leftover,
        })
    }

    fn setter(&self, field: &str) -> Option<&Setter<T>> {
        self.setters
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, setter)| setter)
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("pattern", &self.pattern.as_str())
            .field(
                "setters",
                &self.setters.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            )
            .field("nested", &self.nested.len())
            .finish()
    }
}

/// Declares the fields, setters and nested parsers of a [`Parser`].
///
/// ```
/// use command_syntax::ParserBuilder;
///
/// #[derive(Debug, Default)]
/// struct Greeting {
///     name: String,
///     loud: bool,
/// }
///
/// let mut builder = ParserBuilder::<Greeting>::new();
/// builder.add_free_text("name", &[], true);
/// builder.add_flag("loud", &["-l"]);
/// builder
///     .bind("name", |target, value| {
///         target.name = value.expect_text("name")?.to_string();
///         Ok(())
///     })
///     .bind("loud", |target, value| {
///         target.loud = value.expect_flag("loud")?;
///         Ok(())
///     });
/// let parser = builder.build().unwrap();
///
/// let parsed = parser.parse("world -l !").unwrap();
/// assert_eq!(parsed.value.name, "world");
/// assert!(parsed.value.loud);
/// assert_eq!(parsed.leftover, "!");
/// ```
pub struct ParserBuilder<T> {
    pattern: PatternBuilder,
    setters: Vec<(String, Setter<T>)>,
    nested: Vec<Box<dyn NestedPhase<T>>>,
}

impl<T> Default for ParserBuilder<T> {
    fn default() -> Self {
        Self {
            pattern: PatternBuilder::new(),
            setters: Vec::new(),
            nested: Vec::new(),
        }
    }
}

impl<T: 'static> ParserBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_flag(&mut self, field: &str, aliases: &[&str]) -> FieldBuilder<'_> {
        self.pattern.add_flag(field, aliases)
    }

    pub fn add_free_text(
        &mut self,
        field: &str,
        aliases: &[&str],
        allow_quoted_multi_word: bool,
    ) -> FieldBuilder<'_> {
        self.pattern
            .add_free_text(field, aliases, allow_quoted_multi_word)
    }

    pub fn add_number_comparison(
        &mut self,
        field: &str,
        aliases: &[&str],
        sign: SignPolicy,
        integer_only: bool,
    ) -> FieldBuilder<'_> {
        self.pattern
            .add_number_comparison(field, aliases, sign, integer_only)
    }

    /// Binds the setter that receives `field`'s value. Fields without a
    /// setter still take part in matching and rules.
    pub fn bind<F>(&mut self, field: &str, setter: F) -> &mut Self
    where
        F: Fn(&mut T, &NamedMatchValue) -> Result<(), ParseError> + Send + Sync + 'static,
    {
        self.setters.push((field.to_string(), Box::new(setter)));
        self
    }

    /// Runs `parser` before this parser's own fields and stores its value with
    /// `assign`. Only the nested parser's leftover reaches this parser.
    pub fn nested<U, F>(&mut self, parser: Parser<U>, assign: F) -> &mut Self
    where
        U: Default + 'static,
        F: Fn(&mut T, U) + Send + Sync + 'static,
    {
        self.nested.push(Box::new(Nested { parser, assign }));
        self
    }

    pub fn build(self) -> Result<Parser<T>, RegistrationError> {
        let pattern = self.pattern.build()?;
        for (index, (field, _)) in self.setters.iter().enumerate() {
            if pattern.field(field).is_none() {
                return Err(RegistrationError::UnknownField {
                    context: "setter",
                    field: field.clone(),
                });
            }
            if self.setters[..index].iter().any(|(other, _)| other == field) {
                return Err(RegistrationError::DuplicateSetter(field.clone()));
            }
        }
        debug!(
            setters = self.setters.len(),
            nested = self.nested.len(),
            "built parser"
        );
        Ok(Parser {
            pattern,
            setters: self.setters,
            nested: self.nested,
        })
    }
}
