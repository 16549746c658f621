use crate::{BeatmapFilter, render_clause};
use command_syntax::{
    ComparisonFilter, MaxOccurrences, MutuallyExclusive, NamedMatchValue, ParseError,
    ParseResult, Parser, ParserBuilder, RegistrationError, SignPolicy,
};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Username of a search that did not name a player.
pub const UNSPECIFIED_USERNAME: &str = "unspecified";

static PARSER: Lazy<Parser<SearchParams>> = Lazy::new(|| {
    SearchParams::parser().expect("search parameter registration is valid")
});

/// Everything a search command can ask for.
///
/// ```
/// use playsearch::SearchParams;
/// let parsed = SearchParams::parse(r#"opensand -e -a "Inori Minase""#).unwrap();
/// assert_eq!(parsed.value.username, "opensand");
/// assert!(parsed.value.exact);
/// assert_eq!(parsed.value.artist.as_deref(), Some("Inori Minase"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchParams {
    pub username: String,
    pub exact: bool,
    pub query: Option<String>,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub playcount: Option<ComparisonFilter>,
    pub beatmap: Option<BeatmapFilter>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            username: UNSPECIFIED_USERNAME.to_string(),
            exact: false,
            query: None,
            artist: None,
            title: None,
            playcount: None,
            beatmap: None,
        }
    }
}

impl SearchParams {
    /// Parses the text that follows the command name.
    pub fn parse(input: &str) -> ParseResult<SearchParams> {
        trace!(input, "parsing search parameters");
        PARSER.parse(input)
    }

    /// Only the username set, for commands that skip free-text parsing.
    pub fn for_most_played(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Self::default()
        }
    }

    /// Builds a fresh registration. [`SearchParams::parse`] uses a shared one.
    pub fn parser() -> Result<Parser<SearchParams>, RegistrationError> {
        let mut builder = ParserBuilder::<SearchParams>::new();
        builder
            .add_free_text("username", &[], true)
            .add_rule(MaxOccurrences(1));
        builder
            .add_flag("exact", &["-e", "--exact"])
            .add_rule(MaxOccurrences(1));
        builder
            .add_free_text("query", &["-q", "--query"], true)
            .add_rule(MaxOccurrences(1))
            .add_rule(MutuallyExclusive::with("artist"))
            .add_rule(MutuallyExclusive::with("title"));
        builder
            .add_free_text("artist", &["-a", "--artist"], true)
            .add_rule(MaxOccurrences(1))
            .add_rule(MutuallyExclusive::with("query"));
        builder
            .add_free_text("title", &["-t", "--title"], true)
            .add_rule(MaxOccurrences(1))
            .add_rule(MutuallyExclusive::with("query"));
        builder
            .add_number_comparison(
                "playcount",
                &["c", "pc", "playcount", "count"],
                SignPolicy::Signed,
                true,
            )
            .add_rule(MaxOccurrences(2));

        builder
            .bind("username", |params, value| {
                params.username = text(value, "username")?;
                Ok(())
            })
            .bind("exact", |params, value| {
                params.exact = value.expect_flag("exact")?;
                Ok(())
            })
            .bind("query", |params, value| {
                params.query = Some(text(value, "query")?);
                Ok(())
            })
            .bind("artist", |params, value| {
                params.artist = Some(text(value, "artist")?);
                Ok(())
            })
            .bind("title", |params, value| {
                params.title = Some(text(value, "title")?);
                Ok(())
            })
            .bind("playcount", |params, value| {
                let raw = value.expect_comparison("playcount")?;
                params.playcount = Some(ComparisonFilter::create(raw)?);
                Ok(())
            })
            .nested(BeatmapFilter::parser()?, |params, beatmap| {
                if !beatmap.is_empty() {
                    params.beatmap = Some(beatmap);
                }
            });
        builder.build()
    }

    pub fn has_username(&self) -> bool {
        self.username != UNSPECIFIED_USERNAME
    }

    /// Playcount clause against `score_relation` followed by the beatmap
    /// clauses against `beatmap_relation`.
    pub fn clauses(&self, score_relation: &str, beatmap_relation: &str) -> Vec<String> {
        let mut clauses = Vec::new();
        if let Some(playcount) = &self.playcount {
            clauses.push(render_clause(Some(playcount), score_relation, "playcount"));
        }
        if let Some(beatmap) = &self.beatmap {
            clauses.extend(beatmap.clauses(beatmap_relation));
        }
        clauses
    }
}

fn text(value: &NamedMatchValue, field: &str) -> Result<String, ParseError> {
    value.expect_text(field).map(str::to_string)
}

/// Canonical command string; parsing it yields an equal value.
impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.has_username() {
            // quoted so a name like `-e` or `c>5` reads back as the username
            parts.push(format!("\"{}\"", self.username));
        }
        if self.exact {
            parts.push("-e".to_string());
        }
        if let Some(query) = &self.query {
            parts.push(format!("-q \"{query}\""));
        }
        if let Some(artist) = &self.artist {
            parts.push(format!("-a \"{artist}\""));
        }
        if let Some(title) = &self.title {
            parts.push(format!("-t \"{title}\""));
        }
        if let Some(playcount) = &self.playcount {
            for (operator, value) in playcount.pairs() {
                parts.push(format!("c{operator}{value}"));
            }
        }
        if let Some(beatmap) = self.beatmap.filter(|beatmap| !beatmap.is_empty()) {
            parts.push(beatmap.to_string());
        }
        write!(f, "{}", parts.join(" "))
    }
}
