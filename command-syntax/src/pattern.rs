//! Field registration and the composed matcher built from it.
//!
//! Every declared field contributes one named sub-pattern. The sub-patterns
//! are joined into a single regex so one scan over the input finds every
//! field, and each capture can be traced back to its field by group name.
//!
//! Sub-patterns never consume the whitespace that follows them: a token's
//! trailing boundary is checked by the pattern but the scan resumes right after
//! the token itself, so the next token's leading whitespace is still there.

use crate::{
    Comparator, NamedMatchValue, NumberComparison, ParseError, ParseFailure, RegistrationError,
    ValidationRule,
};
use regex::{Captures, Regex};
use std::ops::Range;
use tracing::{debug, trace};

/// Whether a number field accepts a leading minus sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignPolicy {
    PositiveOnly,
    Signed,
}

/// How a field captures its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    /// Present or absent, e.g. `-e`.
    Flag,
    /// `alias value`, or the leading token of the input when the field has no
    /// aliases.
    FreeText { allow_quoted_multi_word: bool },
    /// `alias<op>number`, e.g. `cs>=4.5`.
    NumberComparison {
        sign: SignPolicy,
        integer_only: bool,
    },
}

/// A declared field: its name, how it captures, the aliases that introduce it
/// and the rules guarding it.
#[derive(Debug)]
pub struct FieldDescriptor {
    name: String,
    kind: CaptureKind,
    aliases: Vec<String>,
    rules: Vec<Box<dyn ValidationRule>>,
}

impl FieldDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CaptureKind {
        self.kind
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn rules(&self) -> &[Box<dyn ValidationRule>] {
        &self.rules
    }

    fn is_positional(&self) -> bool {
        self.aliases.is_empty()
    }

    /// First failing rule wins; `Err` carries its message.
    fn check_rules(&self, captures: &RawMatches) -> Result<(), String> {
        for rule in &self.rules {
            if !rule.is_satisfied(&self.name, captures) {
                return Err(rule.message(&self.name));
            }
        }
        Ok(())
    }

    fn sub_pattern(&self) -> String {
        let name = &self.name;
        let body = match self.kind {
            CaptureKind::Flag => format!(r"(?:^|\s+){}", alias_group(&self.aliases)),
            CaptureKind::FreeText {
                allow_quoted_multi_word,
            } => {
                let value = text_value_pattern(allow_quoted_multi_word);
                if self.is_positional() {
                    format!(r"^\s*(?P<{name}__text>{value})")
                } else {
                    format!(
                        r"(?:^|\s+){}\s+(?P<{name}__text>{value})",
                        alias_group(&self.aliases)
                    )
                }
            }
            CaptureKind::NumberComparison { sign, integer_only } => format!(
                r"(?:^|\s+){}(?P<{name}__op><=|>=|<|>|=)(?P<{name}__value>{})",
                alias_group(&self.aliases),
                number_value_pattern(sign, integer_only)
            ),
        };
        format!(r"(?P<{name}>{body})(?:\s|$)")
    }

    fn capture_value(&self, caps: &Captures<'_>) -> NamedMatchValue {
        let group = |suffix: &str| {
            caps.name(&format!("{}__{suffix}", self.name))
                .map(|m| m.as_str())
                .unwrap_or_default()
        };
        match self.kind {
            CaptureKind::Flag => NamedMatchValue::Flag,
            CaptureKind::FreeText { .. } => NamedMatchValue::String {
                text: strip_quotes(group("text")).to_string(),
            },
            CaptureKind::NumberComparison { .. } => NamedMatchValue::NumberComparison(
                NumberComparison::single(Comparator::from_symbol(group("op")), group("value")),
            ),
        }
    }
}

/// Fluent handle returned by the `add_*` methods; rules attach to the field
/// that was just declared.
pub struct FieldBuilder<'a> {
    field: &'a mut FieldDescriptor,
}

impl FieldBuilder<'_> {
    pub fn add_rule(self, rule: impl ValidationRule + 'static) -> Self {
        self.field.rules.push(Box::new(rule));
        self
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }
}

/// Accumulates field declarations. Nothing is validated until [`build`].
///
/// [`build`]: PatternBuilder::build
#[derive(Debug, Default)]
pub struct PatternBuilder {
    fields: Vec<FieldDescriptor>,
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_flag(&mut self, field: &str, aliases: &[&str]) -> FieldBuilder<'_> {
        self.push(field, CaptureKind::Flag, aliases)
    }

    pub fn add_free_text(
        &mut self,
        field: &str,
        aliases: &[&str],
        allow_quoted_multi_word: bool,
    ) -> FieldBuilder<'_> {
        self.push(
            field,
            CaptureKind::FreeText {
                allow_quoted_multi_word,
            },
            aliases,
        )
    }

    pub fn add_number_comparison(
        &mut self,
        field: &str,
        aliases: &[&str],
        sign: SignPolicy,
        integer_only: bool,
    ) -> FieldBuilder<'_> {
        self.push(
            field,
            CaptureKind::NumberComparison { sign, integer_only },
            aliases,
        )
    }

    fn push(&mut self, field: &str, kind: CaptureKind, aliases: &[&str]) -> FieldBuilder<'_> {
        self.fields.push(FieldDescriptor {
            name: field.to_string(),
            kind,
            aliases: aliases.iter().map(|alias| alias.to_string()).collect(),
            rules: Vec::new(),
        });
        let field = self.fields.last_mut().expect("field was just pushed");
        FieldBuilder { field }
    }

    /// Validates the declarations and compiles them into one matcher.
    pub fn build(self) -> Result<CommandPattern, RegistrationError> {
        self.validate()?;

        // Aliased fields come first so that, at the same position, an
        // explicit `c>10` beats a positional free-text capture.
        let ordered = self
            .fields
            .iter()
            .filter(|field| !field.is_positional())
            .chain(self.fields.iter().filter(|field| field.is_positional()));
        let source = ordered
            .map(FieldDescriptor::sub_pattern)
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&source)?;
        debug!(fields = self.fields.len(), pattern = %source, "compiled command pattern");
        Ok(CommandPattern {
            regex,
            fields: self.fields,
        })
    }

    fn validate(&self) -> Result<(), RegistrationError> {
        for (i, field) in self.fields.iter().enumerate() {
            if !is_valid_field_name(&field.name) {
                return Err(RegistrationError::InvalidFieldName(field.name.clone()));
            }
            if self.fields[..i].iter().any(|other| other.name == field.name) {
                return Err(RegistrationError::DuplicateField(field.name.clone()));
            }
            if field.is_positional() && !matches!(field.kind, CaptureKind::FreeText { .. }) {
                return Err(RegistrationError::MissingAlias(field.name.clone()));
            }
            if let Some(alias) = field
                .aliases
                .iter()
                .find(|alias| alias.is_empty() || alias.chars().any(char::is_whitespace))
            {
                return Err(RegistrationError::InvalidAlias {
                    field: field.name.clone(),
                    alias: alias.clone(),
                });
            }
            for rule in &field.rules {
                for referenced in rule.referenced_fields() {
                    if !self.fields.iter().any(|other| other.name == referenced) {
                        return Err(RegistrationError::UnknownField {
                            context: "validation rule",
                            field: referenced.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// The compiled matcher. Immutable once built and safe to share between
/// threads.
#[derive(Debug)]
pub struct CommandPattern {
    regex: Regex,
    fields: Vec<FieldDescriptor>,
}

impl CommandPattern {
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Runs the composed pattern over `input`, checks every rule against the
    /// raw captures and strips the matched spans.
    pub fn evaluate(&self, input: &str) -> Result<MatchOutcome, ParseFailure> {
        let raw = self.scan(input);
        let leftover = strip_spans(input, &raw);

        for field in &self.fields {
            if let Err(message) = field.check_rules(&raw) {
                debug!(field = field.name(), %message, "validation rule rejected input");
                return Err(ParseFailure {
                    error: ParseError::Parsing(message),
                    leftover,
                });
            }
        }

        let matches = self.collect(&raw);
        Ok(MatchOutcome {
            matches,
            raw,
            leftover,
        })
    }

    fn scan(&self, input: &str) -> RawMatches {
        let quoted = quoted_ranges(input);
        let mut raw = RawMatches::default();
        let mut at = 0;
        while at <= input.len() {
            let Some(caps) = self.regex.captures_at(input, at) else {
                break;
            };
            let Some((field, span)) = self
                .fields
                .iter()
                .find_map(|field| caps.name(&field.name).map(|m| (field, m.range())))
            else {
                // only an empty registration matches without a field group
                break;
            };
            // text between quotes belongs to whichever field captures the quotes
            if let Some(range) = quoted
                .iter()
                .find(|range| range.start < span.start && span.start < range.end)
            {
                trace!(field = field.name(), ?span, "skipped capture inside quotes");
                at = range.end;
                continue;
            }
            trace!(field = field.name(), ?span, text = &input[span.clone()], "captured");
            at = span.end.max(at + 1);
            raw.push(RawMatch {
                field: field.name.clone(),
                span,
                value: field.capture_value(&caps),
            });
        }
        raw
    }

    fn collect(&self, raw: &RawMatches) -> MatchSet {
        let values = self
            .fields
            .iter()
            .map(|field| {
                let mut captured = raw.values(&field.name);
                let value = match captured.next() {
                    None => NamedMatchValue::NoMatch,
                    Some(NamedMatchValue::NumberComparison(first)) => {
                        match captured.next().and_then(NamedMatchValue::as_comparison) {
                            Some(second) => NamedMatchValue::NumberComparison(
                                NumberComparison::range(
                                    first.primary().clone(),
                                    second.primary().clone(),
                                ),
                            ),
                            None => NamedMatchValue::NumberComparison(first.clone()),
                        }
                    }
                    Some(other) => other.clone(),
                };
                (field.name.clone(), value)
            })
            .collect();
        MatchSet { values }
    }
}

/// One capture of one field, before any folding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch {
    pub field: String,
    /// Byte range of the matched token, including the whitespace before it.
    pub span: Range<usize>,
    pub value: NamedMatchValue,
}

/// Every capture of one input, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMatches {
    items: Vec<RawMatch>,
}

impl RawMatches {
    pub fn push(&mut self, item: RawMatch) {
        self.items.push(item);
    }

    pub fn count(&self, field: &str) -> usize {
        self.items.iter().filter(|item| item.field == field).count()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.items.iter().any(|item| item.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawMatch> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn values<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a NamedMatchValue> + 'a {
        self.items
            .iter()
            .filter(move |item| item.field == field)
            .map(|item| &item.value)
    }
}

/// Folded value of every declared field, in declaration order. Fields that did
/// not match hold [`NamedMatchValue::NoMatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    values: Vec<(String, NamedMatchValue)>,
}

impl MatchSet {
    pub fn get(&self, field: &str) -> Option<&NamedMatchValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    pub fn is_matched(&self, field: &str) -> bool {
        self.get(field).is_some_and(NamedMatchValue::is_match)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NamedMatchValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Only the fields that matched.
    pub fn matched(&self) -> impl Iterator<Item = (&str, &NamedMatchValue)> {
        self.iter().filter(|(_, value)| value.is_match())
    }
}

/// Successful evaluation of a [`CommandPattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matches: MatchSet,
    pub raw: RawMatches,
    pub leftover: String,
}

impl MatchOutcome {
    pub fn raw_count(&self, field: &str) -> usize {
        self.raw.count(field)
    }
}

fn alias_group(aliases: &[String]) -> String {
    let mut sorted: Vec<&String> = aliases.iter().collect();
    // longest first so `playcount` is preferred over `pc` when both could apply
    sorted.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    let alternatives = sorted
        .into_iter()
        .map(|alias| {
            let ends_with_word = alias
                .chars()
                .last()
                .is_some_and(|c| c.is_alphanumeric() || c == '_');
            if ends_with_word {
                format!(r"{}\b", regex::escape(alias))
            } else {
                regex::escape(alias)
            }
        })
        .collect::<Vec<_>>()
        .join("|");
    format!("(?i:{alternatives})")
}

fn text_value_pattern(allow_quoted_multi_word: bool) -> &'static str {
    if allow_quoted_multi_word {
        r#""[^"]*"|[^\s"\-][^\s"]*"#
    } else {
        r#"[^\s"\-][^\s"]*"#
    }
}

fn number_value_pattern(sign: SignPolicy, integer_only: bool) -> String {
    let sign = match sign {
        SignPolicy::PositiveOnly => "",
        SignPolicy::Signed => "-?",
    };
    if integer_only {
        format!("{sign}[0-9]+")
    } else {
        format!(r"{sign}(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)")
    }
}

fn strip_quotes(raw: &str) -> &str {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(trimmed);
    unquoted.trim()
}

/// Byte ranges of every `"…"` pair, quotes included. An unpaired trailing
/// quote opens no range.
fn quoted_ranges(input: &str) -> Vec<Range<usize>> {
    let quotes: Vec<usize> = input.match_indices('"').map(|(i, _)| i).collect();
    quotes
        .chunks_exact(2)
        .map(|pair| pair[0]..pair[1] + 1)
        .collect()
}

/// Input minus every matched span, trimmed at both ends.
fn strip_spans(input: &str, raw: &RawMatches) -> String {
    let mut leftover = String::with_capacity(input.len());
    let mut cursor = 0;
    for item in raw.iter() {
        leftover.push_str(&input[cursor..item.span.start]);
        cursor = item.span.end;
    }
    leftover.push_str(&input[cursor..]);
    leftover.trim().to_string()
}

fn is_valid_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !name.contains("__")
}
