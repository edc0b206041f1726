use log::{debug, trace};
use roxmltree::{Document, Node};

use gnucash_core as bc;

use crate::error::{ParseError, ParseResult};
use crate::numeric;
use crate::xml::{
    self, Name, SPLIT_ACCOUNT, SPLIT_ACTION, SPLIT_QUANTITY, SPLIT_RECONCILED, SPLIT_VALUE,
    TRN_DATE_POSTED, TRN_DESCRIPTION, TRN_SPLIT, TRN_SPLITS, TS_DATE,
};

/// The `split:reconciled-state` marking a reconciled split.
const RECONCILED: &str = "y";

/// Reads every `gnc:transaction` in the document, in document order.
pub(crate) fn transactions<'i>(doc: &Document<'i>) -> ParseResult<Vec<bc::Transaction<'i>>> {
    let transactions = xml::descendants(doc, xml::GNC_TRANSACTION)
        .map(transaction)
        .collect::<ParseResult<Vec<_>>>()?;
    debug!("extracted {} transactions", transactions.len());
    Ok(transactions)
}

fn transaction<'i>(node: Node<'_, 'i>) -> ParseResult<bc::Transaction<'i>> {
    let date_path = [TRN_DATE_POSTED, TS_DATE];
    let date_node = xml::required(node, "transaction", &date_path)?;
    let date_text = xml::text(date_node);
    let date = numeric::timestamp(&date_text).map_err(|e| {
        ParseError::invalid_date(
            xml::path_string(&date_path),
            &date_text,
            xml::position(date_node),
            e,
        )
    })?;

    let description = xml::required_text(node, "transaction", &[TRN_DESCRIPTION])?;

    let splits = match xml::find(node, &[TRN_SPLITS]) {
        Some(splits) => xml::children(splits, TRN_SPLIT)
            .map(posting)
            .collect::<ParseResult<Vec<_>>>()?,
        None => Vec::new(),
    };
    trace!(
        "transaction {} '{}' with {} splits",
        date,
        description,
        splits.len()
    );

    Ok(bc::Transaction::builder()
        .date(date)
        .description(description)
        .splits(splits)
        .build())
}

fn posting<'i>(node: Node<'_, 'i>) -> ParseResult<bc::Posting<'i>> {
    Ok(bc::Posting::builder()
        .account(xml::required_text(node, "split", &[SPLIT_ACCOUNT])?)
        .action(xml::optional_text(node, &[SPLIT_ACTION]))
        .value(amount(node, SPLIT_VALUE)?)
        .quantity(amount(node, SPLIT_QUANTITY)?)
        .reconciled(
            xml::optional_text(node, &[SPLIT_RECONCILED]).map_or(false, |s| s == RECONCILED),
        )
        .build())
}

/// An absent amount counts as zero.
fn amount(node: Node<'_, '_>, name: Name) -> ParseResult<f64> {
    match xml::find(node, &[name]) {
        Some(field) => {
            let text = xml::text(field);
            numeric::fraction(&text).map_err(|e| {
                ParseError::invalid_number(name.to_string(), &text, xml::position(field), e)
            })
        }
        None => Ok(0.0),
    }
}
