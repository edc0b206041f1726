use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use gnucash2ledger::LedgerRenderer;

mod cli;

use cli::Cli;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = read_input(cli.input.as_deref())?;
    let renderer = LedgerRenderer::with_symbols(cli.currency_symbols());
    let journal = gnucash2ledger::convert(&input, &renderer).with_context(|| {
        format!("failed to convert {}", source_name(cli.input.as_deref()))
    })?;

    // The journal is complete before the output is touched, so a failed conversion never
    // leaves a partial file behind.
    write_output(cli.output.as_deref(), &journal)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn is_stdin(path: Option<&Path>) -> bool {
    path.map_or(true, |p| p == Path::new("-"))
}

fn source_name(path: Option<&Path>) -> String {
    match path {
        Some(path) if !is_stdin(Some(path)) => path.display().to_string(),
        _ => "standard input".to_string(),
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if !is_stdin(Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read standard input")?;
            Ok(input)
        }
    }
}

fn write_output(path: Option<&Path>, journal: &str) -> Result<()> {
    let mut text = journal.to_string();
    if !text.is_empty() {
        text.push('\n');
    }
    match path {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(text.as_bytes())
                .and_then(|_| out.flush())
                .context("failed to write standard output")?;
        }
    }
    Ok(())
}
