//! sift-sql CLI
//!
//! Parses, formats and checks SQL statements from the command line.

mod report;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use sift_sql_core::{Lexer, ParseOutcome, Parser as SqlParser, ParserConfig};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::report::SourceReporter;

/// Parser for a search-engine SQL dialect.
#[derive(Parser)]
#[command(name = "sift-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with parser settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Nesting budget in depth units (at most 128).
    #[arg(long, env = "SIFT_SQL_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Stop at the first syntax error instead of recovering.
    #[arg(long, env = "SIFT_SQL_NO_RECOVER")]
    no_recover: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the syntax tree as JSON.
    Parse(Input),

    /// Print the canonical SQL rendering.
    Format(Input),

    /// Print the token stream.
    Tokens(Input),

    /// Report diagnostics; exits non-zero if there are any.
    Check(Input),
}

/// Where the SQL comes from: an argument, a file, or stdin.
#[derive(Args)]
struct Input {
    /// The statement to process.
    sql: Option<String>,

    /// Read the statement from a file.
    #[arg(short, long, conflicts_with = "sql")]
    file: Option<PathBuf>,
}

impl Input {
    /// Returns the source name used in diagnostics and the SQL text.
    fn read(self) -> anyhow::Result<(String, String)> {
        if let Some(sql) = self.sql {
            return Ok(("<arg>".to_string(), sql));
        }
        if let Some(path) = self.file {
            let sql = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            return Ok((path.display().to_string(), sql));
        }
        let mut sql = String::new();
        std::io::stdin()
            .read_to_string(&mut sql)
            .context("reading stdin")?;
        Ok(("<stdin>".to_string(), sql))
    }
}

impl Cli {
    fn parser_config(&self) -> anyhow::Result<ParserConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => ParserConfig::default(),
        };
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if self.no_recover {
            config.recover = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.parser_config()?;
    debug!(?config, "parser configuration");

    match cli.command {
        Commands::Parse(input) => {
            let (name, sql) = input.read()?;
            let outcome = parse(&sql, config);
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            render_diagnostics(&name, &sql, &outcome)?;
        }

        Commands::Format(input) => {
            let (name, sql) = input.read()?;
            let outcome = parse(&sql, config);
            if let Some(statement) = &outcome.statement {
                println!("{statement}");
            }
            render_diagnostics(&name, &sql, &outcome)?;
        }

        Commands::Tokens(input) => {
            let (_, sql) = input.read()?;
            for token in Lexer::new(&sql).tokenize() {
                println!(
                    "{:<12} {:<28} {}",
                    token.span.to_string(),
                    token.kind.to_string(),
                    token.text
                );
            }
        }

        Commands::Check(input) => {
            let (name, sql) = input.read()?;
            let outcome = parse(&sql, config);
            let count = render_diagnostics(&name, &sql, &outcome)?;
            if count > 0 || outcome.aborted {
                bail!("{name}: {count} syntax error(s)");
            }
            info!("{name}: ok");
        }
    }

    Ok(())
}

fn parse(sql: &str, config: ParserConfig) -> ParseOutcome {
    let outcome = SqlParser::with_config(sql, config).parse();
    debug!(
        diagnostics = outcome.diagnostics.len(),
        aborted = outcome.aborted,
        "parsed"
    );
    outcome
}

fn render_diagnostics(name: &str, sql: &str, outcome: &ParseOutcome) -> anyhow::Result<usize> {
    let mut reporter = SourceReporter::new(name, sql);
    outcome.report(&mut reporter);
    Ok(reporter.finish()?)
}
