use std::path::PathBuf;

use clap::{ArgAction, Parser};

use gnucash2ledger::CurrencySymbols;

/// Convert a GnuCash XML book into a ledger journal
#[derive(Debug, Parser)]
#[command(name = "gnucash2ledger", version, about)]
pub struct Cli {
    /// GnuCash XML file to read; `-` or nothing reads standard input
    pub input: Option<PathBuf>,

    /// Write the journal to PATH instead of standard output
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Prefix amounts in CODE with SYMBOL, e.g. `CAD=C$`; may be repeated
    #[arg(short = 's', long = "symbol", value_name = "CODE=SYMBOL", value_parser = parse_symbol)]
    pub symbols: Vec<(String, String)>,

    /// Start from an empty symbol table instead of the USD, GPB and EUR defaults
    #[arg(long)]
    pub no_default_symbols: bool,

    /// Log progress to stderr; repeat for more detail
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn currency_symbols(&self) -> CurrencySymbols {
        let mut table = if self.no_default_symbols {
            CurrencySymbols::empty()
        } else {
            CurrencySymbols::default()
        };
        for (code, symbol) in &self.symbols {
            table.insert(code.as_str(), symbol.as_str());
        }
        table
    }
}

fn parse_symbol(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((code, symbol)) if !code.is_empty() && !symbol.is_empty() => {
            Ok((code.to_string(), symbol.to_string()))
        }
        _ => Err(format!("expected CODE=SYMBOL, got '{}'", s)),
    }
}
