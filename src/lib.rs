//! # playsearch
//!
//! Typed search commands for a play-history bot. A command such as
//! `opensand -q feryquitous c>10 c<20 cs>=2` is parsed into [`SearchParams`]:
//! the player, the text to look for, a playcount range and a nested
//! [`BeatmapFilter`] over the beatmap's difficulty attributes.
//!
//! ```
//! use playsearch::{Comparator, ComparisonFilter, SearchParams};
//!
//! let parsed = SearchParams::parse("opensand -q feryquitous c>10 c<20 cs>=2").unwrap();
//! let params = parsed.value;
//! assert_eq!(params.username, "opensand");
//! assert_eq!(params.query.as_deref(), Some("feryquitous"));
//! assert!(matches!(params.playcount, Some(ComparisonFilter::Between(_))));
//!
//! let beatmap = params.beatmap.unwrap();
//! assert_eq!(beatmap.circle_size.unwrap().pairs(), vec![(Comparator::GreaterOrEqual, 2.0)]);
//! assert_eq!(
//!     beatmap.clauses("beatmaps"),
//!     vec!["beatmaps.circle_size >= 2".to_string()]
//! );
//! ```

mod beatmap_filter;
mod clause;
pub mod logging;
mod search_params;

pub use beatmap_filter::{BeatmapAttribute, BeatmapFilter};
pub use clause::render_clause;
pub use command_syntax::{
    BetweenFilter, Comparator, ComparisonFilter, ParseError, ParseFailure, ParseResult, Parsed,
    RegistrationError, SingleFilter,
};
pub use search_params::{SearchParams, UNSPECIFIED_USERNAME};
