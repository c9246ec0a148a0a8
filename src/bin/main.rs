use anyhow::{Context, Result};
use autocomplete::config::Config;
use autocomplete::corpus::train_from_file;
use autocomplete::{AutocompleteProvider, Candidate};
use clap::Parser;
use crossterm::style::Stylize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Completes word fragments from the frequencies of trained text.
#[derive(Debug, Parser)]
#[command(name = "autocomplete", version)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Train on the contents of a text file (repeatable)
    #[arg(long, value_name = "FILE")]
    corpus: Vec<PathBuf>,

    /// Train on a passage given inline (repeatable)
    #[arg(long, value_name = "TEXT")]
    train: Vec<String>,

    /// Show at most this many candidates per query
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Lower-case fragments before querying
    #[arg(long)]
    fold_case: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Query this fragment once and exit instead of starting the prompt
    fragment: Option<String>,
}

/// Effective output and query options after merging flags over the config file.
#[derive(Debug, Clone, PartialEq)]
struct Settings {
    limit: Option<usize>,
    fold_case: bool,
    json: bool,
    color: bool,
}

impl Settings {
    fn merge(cli: &Cli, config: &Config) -> Self {
        Self {
            limit: cli.limit.or(config.query.limit),
            fold_case: cli.fold_case || config.query.fold_case,
            json: cli.json || config.output.json,
            color: !cli.no_color && config.output.color,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Command<'a> {
    Train(&'a str),
    Query(&'a str),
    Help,
    Quit,
}

fn parse_command(line: &str) -> Command<'_> {
    match line.trim() {
        ":quit" | ":q" => return Command::Quit,
        ":help" | ":h" => return Command::Help,
        _ => {}
    }
    match line.strip_prefix(":train") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
            Command::Train(rest.trim_start())
        }
        _ => Command::Query(line),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;
    let settings = Settings::merge(&cli, &config);

    let mut provider = AutocompleteProvider::new();
    for path in config.training.corpus.iter().chain(&cli.corpus) {
        train_from_file(&mut provider, path)
            .with_context(|| format!("failed to train on {}", path.display()))?;
    }
    for passage in &cli.train {
        provider.train(passage);
    }
    if provider.is_empty() {
        warn!("no words trained yet; queries will return nothing until `:train` is used");
    }

    let mut stdout = io::stdout().lock();
    if let Some(fragment) = &cli.fragment {
        print_candidates(&mut stdout, &query(&provider, fragment, &settings), &settings)?;
        return Ok(());
    }

    info!("starting interactive prompt");
    run_prompt(&mut provider, &settings, io::stdin().lock(), &mut stdout)
}

fn run_prompt<R: BufRead, W: Write>(
    provider: &mut AutocompleteProvider,
    settings: &Settings,
    input: R,
    out: &mut W,
) -> Result<()> {
    if !settings.json {
        print_help(out)?;
        prompt(out)?;
    }

    for line in input.lines() {
        let line = line.context("failed to read from stdin")?;
        match parse_command(&line) {
            Command::Quit => break,
            Command::Help => print_help(out)?,
            Command::Train(passage) => {
                let recorded = provider.train(passage);
                if !settings.json {
                    writeln!(out, "Trained {} word(s).", recorded)?;
                }
            }
            Command::Query(fragment) => {
                print_candidates(out, &query(provider, fragment, settings), settings)?;
            }
        }
        if !settings.json {
            prompt(out)?;
        }
    }
    Ok(())
}

fn query(provider: &AutocompleteProvider, fragment: &str, settings: &Settings) -> Vec<Candidate> {
    let fragment = if settings.fold_case {
        fragment.to_ascii_lowercase()
    } else {
        fragment.to_string()
    };
    match settings.limit {
        Some(limit) => provider.get_top_words(&fragment, limit),
        None => provider.get_words(&fragment),
    }
}

fn print_candidates<W: Write>(
    out: &mut W,
    candidates: &[Candidate],
    settings: &Settings,
) -> Result<()> {
    if settings.json {
        serde_json::to_writer(&mut *out, candidates)?;
        writeln!(out)?;
        return Ok(());
    }

    if candidates.is_empty() {
        writeln!(out, "No suggestions found.")?;
        return Ok(());
    }
    for (i, candidate) in candidates.iter().enumerate() {
        if settings.color {
            writeln!(
                out,
                "  :{}: \"{}\" ({})",
                i + 1,
                candidate.word().bold().green(),
                candidate.confidence()
            )?;
        } else {
            writeln!(out, "  :{}: {}", i + 1, candidate)?;
        }
    }
    Ok(())
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Type a fragment to see completions.")?;
    writeln!(
        out,
        "':train <text>' to learn from text, ':help' for this message, ':quit' to exit."
    )
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn plain() -> Settings {
        Settings {
            limit: None,
            fold_case: false,
            json: false,
            color: false,
        }
    }

    #[test]
    fn parses_prompt_commands() {
        assert_eq!(parse_command(":q"), Command::Quit);
        assert_eq!(parse_command(":quit "), Command::Quit);
        assert_eq!(parse_command(":help"), Command::Help);
        assert_eq!(parse_command(":train The cat"), Command::Train("The cat"));
        assert_eq!(parse_command(":train"), Command::Train(""));
        assert_eq!(parse_command(":trainer"), Command::Query(":trainer"));
        assert_eq!(parse_command("th"), Command::Query("th"));
        assert_eq!(parse_command(""), Command::Query(""));
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        config.query.limit = Some(3);
        config.output.json = true;

        let cli = Cli::parse_from(["autocomplete", "--limit", "7", "--no-color"]);
        let settings = Settings::merge(&cli, &config);
        assert_eq!(
            settings,
            Settings {
                limit: Some(7),
                fold_case: false,
                json: true,
                color: false,
            }
        );

        let cli = Cli::parse_from(["autocomplete", "--fold-case", "th"]);
        let settings = Settings::merge(&cli, &config);
        assert_eq!(settings.limit, Some(3));
        assert!(settings.fold_case);
        assert_eq!(cli.fragment.as_deref(), Some("th"));
    }

    #[test]
    fn fold_case_lower_cases_the_fragment() {
        let mut provider = AutocompleteProvider::new();
        provider.train("Thing thing");

        assert!(query(&provider, "Th", &plain()).is_empty());
        let settings = Settings {
            fold_case: true,
            ..plain()
        };
        assert_eq!(query(&provider, "Th", &settings), vec![Candidate::new("thing", 2)]);
    }

    #[test]
    fn prompt_trains_then_queries() {
        let mut provider = AutocompleteProvider::new();
        let input = Cursor::new(":train a b a\na\n:quit\nb\n");
        let mut out = Vec::new();
        let settings = Settings {
            json: true,
            ..plain()
        };

        run_prompt(&mut provider, &settings, input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[{\"word\":\"a\",\"confidence\":2}]\n");
    }

    #[test]
    fn plain_output_uses_candidate_display() {
        let mut out = Vec::new();
        print_candidates(&mut out, &[Candidate::new("thing", 2)], &plain()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  :1: \"thing\" (2)\n");

        let mut out = Vec::new();
        print_candidates(&mut out, &[], &plain()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No suggestions found.\n");
    }
}
