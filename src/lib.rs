//! Converts a GnuCash XML book into a ledger journal.
//!
//! The book is parsed, its account names are expanded into full paths, and its transactions
//! are written out oldest first.  Nothing is produced unless every step succeeds.

use log::debug;
use thiserror::Error;

pub use gnucash_parser::error::ParseError;
pub use ledger_render::{CurrencySymbols, LedgerRenderer, RenderError};

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

pub fn convert(input: &str, renderer: &LedgerRenderer) -> Result<String, Error> {
    let book = gnucash_parser::parse(input)?;
    debug!(
        "book has {} accounts and {} transactions",
        book.accounts.len(),
        book.transactions.len()
    );
    Ok(ledger_render::render_to_string(renderer, &book)?)
}
