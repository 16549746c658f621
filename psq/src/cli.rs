use clap::Parser;

#[derive(Parser)]
pub struct Cli {
    #[clap(long, default_value = "false")]
    /// Print the parsed search as JSON instead of its canonical command form.
    pub json: bool,
    #[clap(long, default_value = "beatmaps")]
    /// Relation prefix used when rendering beatmap clauses.
    pub relation: String,
    #[clap(long, default_value = "scores")]
    /// Relation prefix used when rendering the playcount clause.
    pub score_relation: String,
    #[clap(long, default_value = "warn")]
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log: String,
    /// Parse this command once and exit instead of reading from stdin.
    pub command: Option<String>,
}
