use std::error::Error;

use chrono::NaiveDate;
use pest::error::LineColLocation;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser as PestParser;

pub(crate) type BoxError = Box<dyn Error + Send + Sync + 'static>;

#[derive(PestParser)]
#[grammar = "gnucash.pest"]
pub(crate) struct GnuCashParser;

/// Parses an amount written as `numerator/denominator` or as a plain number.
///
/// Division follows IEEE semantics, so a zero denominator gives an infinity or NaN.
pub(crate) fn fraction(text: &str) -> Result<f64, BoxError> {
    let parsed = GnuCashParser::parse(Rule::fraction, text.trim())
        .map_err(grammar_error)?
        .next()
        .ok_or("empty amount")?;

    let mut numbers = parsed
        .into_inner()
        .filter(|p| p.as_rule() == Rule::number);
    let numerator = numbers.next().map(number).transpose()?.ok_or("missing numerator")?;
    let denominator = numbers.next().map(number).transpose()?.unwrap_or(1.0);
    Ok(numerator / denominator)
}

/// Parses the calendar date out of a GnuCash timestamp, dropping time and offset.
pub(crate) fn timestamp(text: &str) -> Result<NaiveDate, BoxError> {
    let parsed = GnuCashParser::parse(Rule::timestamp, text.trim())
        .map_err(grammar_error)?
        .next()
        .ok_or("empty timestamp")?;

    let date = parsed
        .into_inner()
        .find(|p| p.as_rule() == Rule::date)
        .ok_or("missing date")?;
    let mut parts = date.into_inner();
    let year: i32 = date_part(&mut parts, "year")?;
    let month: u32 = date_part(&mut parts, "month")?;
    let day: u32 = date_part(&mut parts, "day")?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        BoxError::from(format!(
            "{:04}-{:02}-{:02} is not a calendar date",
            year, month, day
        ))
    })
}

fn number(pair: Pair<'_, Rule>) -> Result<f64, BoxError> {
    debug_assert!(pair.as_rule() == Rule::number);
    Ok(pair.as_str().parse::<f64>()?)
}

fn date_part<T>(parts: &mut Pairs<'_, Rule>, what: &'static str) -> Result<T, BoxError>
where
    T: std::str::FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    let pair = parts.next().ok_or(what)?;
    Ok(pair.as_str().parse::<T>()?)
}

fn grammar_error(err: pest::error::Error<Rule>) -> BoxError {
    let err = err.renamed_rules(|rule| {
        match *rule {
            Rule::EOI => "end of input",
            Rule::sign => "'+' or '-'",
            Rule::digits => "digits",
            Rule::exponent => "exponent",
            Rule::number => "number",
            Rule::fraction => "amount",
            Rule::year => "4-digit year",
            Rule::month => "2-digit month",
            Rule::day => "2-digit day",
            Rule::date => "date",
            Rule::time => "time of day",
            Rule::utc_offset => "UTC offset",
            Rule::timestamp => "timestamp",
        }
        .to_string()
    });
    let column = match err.line_col {
        LineColLocation::Pos((_, col)) => col,
        LineColLocation::Span((_, col), _) => col,
    };
    format!("{} at character {}", err.variant.message(), column).into()
}
