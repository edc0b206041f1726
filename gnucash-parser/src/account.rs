use std::collections::HashSet;

use log::{debug, trace, warn};
use roxmltree::{Document, Node};

use gnucash_core as bc;

use crate::error::ParseResult;
use crate::xml::{self, ACT_COMMODITY, ACT_ID, ACT_NAME, ACT_PARENT, ACT_TYPE, CMDTY_ID};

/// Reads every `gnc:account` in the document, in document order, with names not yet resolved.
pub(crate) fn accounts<'i>(doc: &Document<'i>) -> ParseResult<Vec<bc::Account<'i>>> {
    let mut ids = HashSet::new();
    let mut accounts = Vec::new();
    for node in xml::descendants(doc, xml::GNC_ACCOUNT) {
        let account = account(node)?;
        trace!(
            "account {} '{}' parent={:?} commodity={:?}",
            account.id,
            account.name,
            account.parent,
            account.commodity
        );
        if !ids.insert(account.id.clone()) {
            warn!(
                "account {} is defined more than once, keeping the last definition",
                account.id
            );
        }
        accounts.push(account);
    }
    debug!("loaded {} account records", accounts.len());
    Ok(accounts)
}

fn account<'i>(node: Node<'_, 'i>) -> ParseResult<bc::Account<'i>> {
    Ok(bc::Account::builder()
        .id(xml::required_text(node, "account", &[ACT_ID])?)
        .name(xml::required_text(node, "account", &[ACT_NAME])?)
        .ty(xml::optional_text(node, &[ACT_TYPE]).map(bc::AccountType::from))
        .commodity(xml::optional_text(node, &[ACT_COMMODITY, CMDTY_ID]))
        .parent(xml::optional_text(node, &[ACT_PARENT]))
        .build())
}
