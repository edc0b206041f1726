use std::process;

use gnucash_parser::parse;

/// Prints the resolved account names of a GnuCash book, then a transaction count.
fn main() {
    let filename = match std::env::args().nth(1) {
        Some(filename) => filename,
        None => {
            eprintln!("usage: dump_parse <book.gnucash>");
            process::exit(2);
        }
    };
    let input = match std::fs::read_to_string(&filename) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("cannot read {}: {}", filename, e);
            process::exit(1);
        }
    };
    let book = match parse(&input) {
        Ok(book) => book,
        Err(e) => {
            eprintln!("{}: {}", filename, e);
            process::exit(1);
        }
    };

    let mut accounts: Vec<_> = book
        .accounts
        .iter()
        .map(|(id, account)| {
            let commodity = account.commodity.as_deref().unwrap_or("-");
            (account.name.as_str(), commodity, &**id)
        })
        .collect();
    accounts.sort();
    for (name, commodity, id) in accounts {
        println!("{:<50} {:<8} {}", name, commodity, id);
    }
    println!(
        "{} accounts, {} transactions",
        book.accounts.len(),
        book.transactions.len()
    );
}
