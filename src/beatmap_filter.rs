use crate::render_clause;
use command_syntax::{
    ComparisonFilter, MaxOccurrences, Parser, ParserBuilder, RegistrationError, SignPolicy,
};
use serde::Serialize;
use std::fmt;

/// The difficulty attributes a [`BeatmapFilter`] can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BeatmapAttribute {
    CircleSize,
    Bpm,
    Length,
    Drain,
    OverallDifficulty,
    ApproachRate,
    StarRating,
}

impl BeatmapAttribute {
    pub const ALL: [BeatmapAttribute; 7] = [
        BeatmapAttribute::CircleSize,
        BeatmapAttribute::Bpm,
        BeatmapAttribute::Length,
        BeatmapAttribute::Drain,
        BeatmapAttribute::OverallDifficulty,
        BeatmapAttribute::ApproachRate,
        BeatmapAttribute::StarRating,
    ];

    /// Field name in the command grammar, also used as the column name.
    pub fn field(self) -> &'static str {
        match self {
            BeatmapAttribute::CircleSize => "circle_size",
            BeatmapAttribute::Bpm => "bpm",
            BeatmapAttribute::Length => "length",
            BeatmapAttribute::Drain => "drain",
            BeatmapAttribute::OverallDifficulty => "overall_difficulty",
            BeatmapAttribute::ApproachRate => "approach_rate",
            BeatmapAttribute::StarRating => "star_rating",
        }
    }

    /// Accepted aliases; the first one is used when re-serializing.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            BeatmapAttribute::CircleSize => &["cs"],
            BeatmapAttribute::Bpm => &["bpm"],
            BeatmapAttribute::Length => &["length", "len"],
            BeatmapAttribute::Drain => &["hp", "drain"],
            BeatmapAttribute::OverallDifficulty => &["od"],
            BeatmapAttribute::ApproachRate => &["ar"],
            BeatmapAttribute::StarRating => &["sr", "stars"],
        }
    }
}

/// Numeric constraints on a beatmap's difficulty attributes. Each attribute
/// takes a single comparison (`cs<=5`) or a range of two (`cs>2 cs<4`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BeatmapFilter {
    pub circle_size: Option<ComparisonFilter>,
    pub bpm: Option<ComparisonFilter>,
    pub length: Option<ComparisonFilter>,
    pub drain: Option<ComparisonFilter>,
    pub overall_difficulty: Option<ComparisonFilter>,
    pub approach_rate: Option<ComparisonFilter>,
    pub star_rating: Option<ComparisonFilter>,
}

impl BeatmapFilter {
    /// Builds the registration for the seven attributes. Every attribute is a
    /// positive decimal comparison allowed at most twice.
    pub fn parser() -> Result<Parser<BeatmapFilter>, RegistrationError> {
        let mut builder = ParserBuilder::<BeatmapFilter>::new();
        for attribute in BeatmapAttribute::ALL {
            builder
                .add_number_comparison(
                    attribute.field(),
                    attribute.aliases(),
                    SignPolicy::PositiveOnly,
                    false,
                )
                .add_rule(MaxOccurrences(2));
            builder.bind(attribute.field(), move |filter, value| {
                let raw = value.expect_comparison(attribute.field())?;
                *filter.slot_mut(attribute) = Some(ComparisonFilter::create(raw)?);
                Ok(())
            });
        }
        builder.build()
    }

    pub fn get(&self, attribute: BeatmapAttribute) -> Option<&ComparisonFilter> {
        match attribute {
            BeatmapAttribute::CircleSize => self.circle_size.as_ref(),
            BeatmapAttribute::Bpm => self.bpm.as_ref(),
            BeatmapAttribute::Length => self.length.as_ref(),
            BeatmapAttribute::Drain => self.drain.as_ref(),
            BeatmapAttribute::OverallDifficulty => self.overall_difficulty.as_ref(),
            BeatmapAttribute::ApproachRate => self.approach_rate.as_ref(),
            BeatmapAttribute::StarRating => self.star_rating.as_ref(),
        }
    }

    fn slot_mut(&mut self, attribute: BeatmapAttribute) -> &mut Option<ComparisonFilter> {
        match attribute {
            BeatmapAttribute::CircleSize => &mut self.circle_size,
            BeatmapAttribute::Bpm => &mut self.bpm,
            BeatmapAttribute::Length => &mut self.length,
            BeatmapAttribute::Drain => &mut self.drain,
            BeatmapAttribute::OverallDifficulty => &mut self.overall_difficulty,
            BeatmapAttribute::ApproachRate => &mut self.approach_rate,
            BeatmapAttribute::StarRating => &mut self.star_rating,
        }
    }

    /// Present attributes, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (BeatmapAttribute, &ComparisonFilter)> {
        BeatmapAttribute::ALL
            .into_iter()
            .filter_map(|attribute| self.get(attribute).map(|filter| (attribute, filter)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// One rendered clause per present attribute.
    pub fn clauses(&self, relation: &str) -> Vec<String> {
        self.iter()
            .map(|(attribute, filter)| render_clause(Some(filter), relation, attribute.field()))
            .collect()
    }
}

/// Canonical command form, e.g. `cs>2 cs<4 ar>=9`.
impl fmt::Display for BeatmapFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (attribute, filter) in self.iter() {
            let alias = attribute.aliases()[0];
            for (operator, value) in filter.pairs() {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                write!(f, "{alias}{operator}{value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use command_syntax::{Comparator, SingleFilter};
    use std::collections::HashSet;

    #[test]
    fn attribute_names_are_valid_and_unique() {
        // a registration failure here would surface as an error
        BeatmapFilter::parser().unwrap();
        let fields: HashSet<_> = BeatmapAttribute::ALL.iter().map(|a| a.field()).collect();
        assert_eq!(fields.len(), 7);
    }

    #[test]
    fn empty_filter_renders_nothing() {
        let filter = BeatmapFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.to_string(), "");
        assert!(filter.clauses("beatmaps").is_empty());
    }

    #[test]
    fn display_uses_the_first_alias() {
        let filter = BeatmapFilter {
            star_rating: Some(ComparisonFilter::Single(SingleFilter::new(
                Comparator::GreaterOrEqual,
                6.5,
            ))),
            drain: Some(ComparisonFilter::Single(SingleFilter::new(
                Comparator::Less,
                4.0,
            ))),
            ..Default::default()
        };
        assert!(!filter.is_empty());
        assert_eq!(filter.to_string(), "hp<4 sr>=6.5");
    }
}
