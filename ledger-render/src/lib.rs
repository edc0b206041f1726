//! Renders a [`Book`] as a ledger journal.
//!
//! ```text
//! 2024/03/01 * Coffee
//!   Assets:Checking                             $-5.0
//!   Expenses:Coffee                             $5.0
//! ```

use std::collections::HashMap;
use std::{io, io::Write};

use gnucash_core::{AccountTree, Book, Posting, ResolvedAccount, Transaction};
use log::debug;
use thiserror::Error;

pub use number::format_float;

mod number;


/// Account names are padded to at least this many columns.
pub const MIN_ACCOUNT_COLUMN: usize = 44;

/// Maps commodity codes to the symbol written in front of the amount.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurrencySymbols {
    symbols: HashMap<String, String>,
}

impl CurrencySymbols {
    /// A table with no symbols; every amount is written with its commodity code.
    pub fn empty() -> Self {
        CurrencySymbols {
            symbols: HashMap::new(),
        }
    }

    /// Adds or replaces the symbol for `code`, returning the previous one.
    pub fn insert<C, S>(&mut self, code: C, symbol: S) -> Option<String>
    where
        C: Into<String>,
        S: Into<String>,
    {
        self.symbols.insert(code.into(), symbol.into())
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.symbols.get(code).map(String::as_str)
    }
}

impl Default for CurrencySymbols {
    fn default() -> Self {
        let mut symbols = CurrencySymbols::empty();
        symbols.insert("USD", "$");
        symbols.insert("GPB", "£");
        symbols.insert("EUR", "€");
        symbols
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LedgerRenderer {
    symbols: CurrencySymbols,
}

impl LedgerRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbols(symbols: CurrencySymbols) -> Self {
        LedgerRenderer { symbols }
    }

    /// The amount column of a posting line.
    ///
    /// Postings with an action (trades) and postings to accounts without a known currency
    /// symbol are written as `<quantity> <commodity>`, everything else as `<symbol><quantity>`.
    pub fn amount(&self, posting: &Posting<'_>, account: &ResolvedAccount<'_>) -> String {
        let quantity = format_float(posting.quantity);
        let commodity = account.commodity.as_deref();
        let symbol = commodity.and_then(|c| self.symbols.get(c));
        match (&posting.action, symbol) {
            (None, Some(symbol)) => format!("{}{}", symbol, quantity),
            _ => format!("{} {}", quantity, commodity.unwrap_or("")),
        }
    }

    fn render_transaction<W: Write>(
        &self,
        transaction: &Transaction<'_>,
        accounts: &AccountTree<'_>,
        column: usize,
        w: &mut W,
    ) -> Result<(), RenderError> {
        write!(
            w,
            "{} {}{}",
            transaction.date.format("%Y/%m/%d"),
            if transaction.is_cleared() { "* " } else { "" },
            transaction.description
        )?;
        for posting in &transaction.splits {
            let account = lookup(accounts, transaction, posting)?;
            write!(
                w,
                "\n  {:<column$}{}",
                account.name,
                self.amount(posting, account),
                column = column
            )?;
        }
        Ok(())
    }
}

pub fn render<W: Write>(w: &mut W, book: &Book<'_>) -> Result<(), RenderError> {
    LedgerRenderer::default().render(book, w)
}

/// Renders the whole journal into memory.
pub fn render_to_string(
    renderer: &LedgerRenderer,
    book: &Book<'_>,
) -> Result<String, RenderError> {
    let mut rendered = Vec::new();
    renderer.render(book, &mut rendered)?;
    // Only `str`s are ever written.
    String::from_utf8(rendered)
        .map_err(|e| RenderError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
    #[error("split of '{description}' on {date} refers to unknown account '{account}'")]
    UnknownAccount {
        account: String,
        date: String,
        description: String,
    },
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

impl<'a, W: Write> Renderer<&'a Book<'_>, W> for LedgerRenderer {
    type Error = RenderError;

    /// Writes every transaction, oldest first, separated by blank lines.  Transactions on the
    /// same day keep their order in the book.
    ///
    /// Every split is checked against the account tree before anything is written.
    fn render(&self, book: &'a Book<'_>, w: &mut W) -> Result<(), Self::Error> {
        for transaction in &book.transactions {
            for posting in &transaction.splits {
                lookup(&book.accounts, transaction, posting)?;
            }
        }

        let column = account_column(&book.accounts);
        debug!(
            "rendering {} transactions, account column {}",
            book.transactions.len(),
            column
        );

        let mut transactions: Vec<&Transaction<'_>> = book.transactions.iter().collect();
        transactions.sort_by_key(|t| t.date);

        for (i, transaction) in transactions.into_iter().enumerate() {
            if i > 0 {
                write!(w, "\n\n")?;
            }
            self.render_transaction(transaction, &book.accounts, column, w)?;
        }
        Ok(())
    }
}

/// Width of the account column: the longest account name in the book plus two, or
/// [`MIN_ACCOUNT_COLUMN`] if that is wider.
pub fn account_column(accounts: &AccountTree<'_>) -> usize {
    let longest = accounts
        .iter()
        .map(|(_, account)| account.name.chars().count())
        .max()
        .unwrap_or(0);
    (longest + 2).max(MIN_ACCOUNT_COLUMN)
}

fn lookup<'t, 'a>(
    accounts: &'t AccountTree<'a>,
    transaction: &Transaction<'_>,
    posting: &Posting<'_>,
) -> Result<&'t ResolvedAccount<'a>, RenderError> {
    accounts
        .get(&posting.account)
        .ok_or_else(|| RenderError::UnknownAccount {
            account: posting.account.to_string(),
            date: transaction.date.to_string(),
            description: transaction.description.to_string(),
        })
}
