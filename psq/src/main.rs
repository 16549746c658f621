mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use playsearch::SearchParams;
use std::io::{BufRead, Write};
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse();
    playsearch::logging::init(&cli.log)?;

    if let Some(command) = &cli.command {
        return report(&cli, command);
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        stdout.flush().context("stdout is closed")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        } else if line == "/bye" {
            break;
        }
        report(&cli, line)?;
    }
    Ok(())
}

fn report(cli: &Cli, command: &str) -> Result<()> {
    debug!(command, "parsing");
    match SearchParams::parse(command) {
        Ok(parsed) => {
            if cli.json {
                let json = serde_json::to_string_pretty(&parsed.value)
                    .context("failed to serialize search")?;
                println!("{json}");
            } else {
                println!("search: {}", parsed.value);
            }
            for (i, clause) in parsed
                .value
                .clauses(&cli.score_relation, &cli.relation)
                .into_iter()
                .enumerate()
            {
                println!("[{i}] {clause}");
            }
            if !parsed.leftover.is_empty() {
                println!("unrecognized: {}", parsed.leftover);
            }
        }
        Err(failure) => {
            eprintln!("Failed to parse: {}", failure.error);
            if !failure.leftover.is_empty() {
                eprintln!("unrecognized: {}", failure.leftover);
            }
        }
    }
    Ok(())
}
