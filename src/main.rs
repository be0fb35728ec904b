use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zcalc::keymap::{KEY_TABLE, parse_token};
use zcalc::{AngleMode, CalculatorConfig, CalculatorSession, Projection};

/// Drive a calculator session from the command line.
///
/// Tokens are keys (`7`, `+`, `(`, `Enter`, `Backspace`) or named inputs
/// (`sin`, `pi`, `m+`, `neg`, `mode`, `C`). Without tokens, reads
/// whitespace-separated tokens from stdin line by line.
#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about)]
struct Cli {
    /// Start in radian mode
    #[arg(long)]
    radians: bool,

    /// Print the full projection as JSON
    #[arg(long)]
    json: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/zcalc/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// List the keyboard mapping and exit
    #[arg(long)]
    list_keys: bool,

    /// Tokens to replay
    tokens: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_keys {
        for (keys, input) in KEY_TABLE {
            println!("{:<12} {}", keys, input);
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::load_default()?,
    };
    if cli.radians {
        config.angle_mode = AngleMode::Radians;
    }

    let mut session = CalculatorSession::with_config(config);

    if !cli.tokens.is_empty() {
        replay(&mut session, cli.tokens.iter().map(String::as_str))?;
        return print_projection(&session.projection(), cli.json);
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        if let Err(e) = replay(&mut session, line.split_whitespace()) {
            eprintln!("{}", e);
            continue;
        }
        print_projection(&session.projection(), cli.json)?;
    }

    Ok(())
}

fn replay<'a>(session: &mut CalculatorSession, tokens: impl Iterator<Item = &'a str>) -> Result<()> {
    for token in tokens {
        let input = parse_token(token).with_context(|| format!("Unknown key '{}'", token))?;
        session.apply(input);
    }
    Ok(())
}

fn print_projection(projection: &Projection, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut stdout, projection)?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", projection.display_text)?;
    }
    Ok(())
}
