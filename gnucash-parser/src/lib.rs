//! Reads a GnuCash XML book into a [`gnucash_core::Book`].
//!
//! Accounts and transactions are found anywhere in the document.  Text is borrowed from the
//! input wherever the XML did not need unescaping.

use gnucash_core as bc;

use error::ParseResult;

pub mod error;

mod account;
mod numeric;
mod transaction;
mod xml;

pub fn parse<'i>(input: &'i str) -> ParseResult<bc::Book<'i>> {
    let doc = xml::load(input)?;
    let accounts = bc::AccountTree::resolve(account::accounts(&doc)?)?;
    let transactions = transaction::transactions(&doc)?;
    Ok(bc::Book::builder()
        .accounts(accounts)
        .transactions(transactions)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use chrono::NaiveDate;
    use indoc::{formatdoc, indoc};

    fn book(body: &str) -> String {
        formatdoc! {r#"
            <?xml version="1.0" encoding="utf-8" ?>
            <gnc-v2
                 xmlns:gnc="http://www.gnucash.org/XML/gnc"
                 xmlns:act="http://www.gnucash.org/XML/act"
                 xmlns:book="http://www.gnucash.org/XML/book"
                 xmlns:cmdty="http://www.gnucash.org/XML/cmdty"
                 xmlns:trn="http://www.gnucash.org/XML/trn"
                 xmlns:split="http://www.gnucash.org/XML/split"
                 xmlns:ts="http://www.gnucash.org/XML/ts">
            <gnc:book version="2.0.0">
            {}
            </gnc:book>
            </gnc-v2>
            "#,
            body
        }
    }

    const ACCOUNTS: &str = indoc! {r#"
        <gnc:account version="2.0.0">
          <act:name>Root Account</act:name>
          <act:id type="guid">root</act:id>
          <act:type>ROOT</act:type>
        </gnc:account>
        <gnc:account version="2.0.0">
          <act:name>Assets</act:name>
          <act:id type="guid">assets</act:id>
          <act:type>ASSET</act:type>
          <act:commodity>
            <cmdty:space>CURRENCY</cmdty:space>
            <cmdty:id>USD</cmdty:id>
          </act:commodity>
          <act:parent type="guid">root</act:parent>
        </gnc:account>
        <gnc:account version="2.0.0">
          <act:name>Checking</act:name>
          <act:id type="guid">checking</act:id>
          <act:type>BANK</act:type>
          <act:commodity>
            <cmdty:space>CURRENCY</cmdty:space>
            <cmdty:id>USD</cmdty:id>
          </act:commodity>
          <act:parent type="guid">assets</act:parent>
        </gnc:account>
        <gnc:account version="2.0.0">
          <act:name>Coffee</act:name>
          <act:id type="guid">coffee</act:id>
          <act:type>EXPENSE</act:type>
          <act:parent type="guid">root</act:parent>
        </gnc:account>
    "#};

    const COFFEE: &str = indoc! {r#"
        <gnc:transaction version="2.0.0">
          <trn:id type="guid">t1</trn:id>
          <trn:date-posted>
            <ts:date>2024-03-01 10:59:00 +0000</ts:date>
          </trn:date-posted>
          <trn:description>Coffee</trn:description>
          <trn:splits>
            <trn:split>
              <split:id type="guid">s1</split:id>
              <split:reconciled-state>y</split:reconciled-state>
              <split:value>-500/100</split:value>
              <split:quantity>-500/100</split:quantity>
              <split:account type="guid">checking</split:account>
            </trn:split>
            <trn:split>
              <split:id type="guid">s2</split:id>
              <split:action>Buy</split:action>
              <split:reconciled-state>n</split:reconciled-state>
              <split:value>500/100</split:value>
              <split:account type="guid">coffee</split:account>
            </trn:split>
          </trn:splits>
        </gnc:transaction>
    "#};

    #[test]
    fn accounts_are_resolved() {
        let input = book(ACCOUNTS);
        let book = parse(&input).unwrap();
        assert_eq!(book.accounts.len(), 4);
        assert_eq!(book.accounts.get("root").unwrap().name, "");
        assert_eq!(book.accounts.get("assets").unwrap().name, "Assets");
        let checking = book.accounts.get("checking").unwrap();
        assert_eq!(checking.name, "Assets:Checking");
        assert_eq!(checking.commodity.as_deref(), Some("USD"));
        assert_eq!(checking.ty, Some(bc::AccountType::Bank));
        assert_eq!(book.accounts.get("coffee").unwrap().commodity, None);
        assert!(book.transactions.is_empty());
    }

    #[test]
    fn transactions_are_extracted() {
        let input = book(&format!("{}{}", ACCOUNTS, COFFEE));
        let book = parse(&input).unwrap();
        assert_eq!(book.transactions.len(), 1);

        let tx = &book.transactions[0];
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(tx.description, "Coffee");
        assert_eq!(
            tx.splits,
            vec![
                bc::Posting::builder()
                    .account("checking".into())
                    .value(-5.0)
                    .quantity(-5.0)
                    .reconciled(true)
                    .build(),
                bc::Posting::builder()
                    .account("coffee".into())
                    .action(Some("Buy".into()))
                    .value(5.0)
                    .quantity(0.0)
                    .reconciled(false)
                    .build(),
            ]
        );
    }

    #[test]
    fn transactions_keep_document_order() {
        let later = COFFEE
            .replace("2024-03-01", "2024-04-01")
            .replace(">Coffee<", ">Later<");
        let input = book(&format!("{}{}{}", ACCOUNTS, later, COFFEE));
        let book = parse(&input).unwrap();
        let descriptions: Vec<_> = book
            .transactions
            .iter()
            .map(|t| &*t.description)
            .collect();
        assert_eq!(descriptions, vec!["Later", "Coffee"]);
    }

    #[test]
    fn reconciled_marker_is_exact() {
        let cleared = COFFEE.replace(
            "<split:reconciled-state>y</split:reconciled-state>",
            "<split:reconciled-state>c</split:reconciled-state>",
        );
        let input = book(&format!("{}{}", ACCOUNTS, cleared));
        let book = parse(&input).unwrap();
        assert!(book.transactions[0].splits.iter().all(|s| !s.reconciled));
    }

    #[test]
    fn comments_do_not_truncate_text() {
        let accounts = ACCOUNTS.replace(
            "<act:name>Checking</act:name>",
            "<act:name>Check<!-- x -->ing</act:name>",
        );
        let coffee = COFFEE.replace(
            "<trn:description>Coffee</trn:description>",
            "<trn:description>Cof<!-- y -->fee</trn:description>",
        );
        let input = book(&format!("{}{}", accounts, coffee));
        let book = parse(&input).unwrap();
        assert_eq!(book.accounts.get("checking").unwrap().name, "Assets:Checking");
        assert_eq!(book.transactions[0].description, "Coffee");
    }

    #[test]
    fn transaction_without_splits() {
        let input = book(indoc! {r#"
            <gnc:transaction version="2.0.0">
              <trn:date-posted><ts:date>2024-03-01</ts:date></trn:date-posted>
              <trn:description/>
            </gnc:transaction>
        "#});
        let book = parse(&input).unwrap();
        assert_eq!(book.transactions[0].description, "");
        assert!(book.transactions[0].splits.is_empty());
    }

    #[test]
    fn missing_date_is_an_error() {
        let input = book(&format!(
            "{}{}",
            ACCOUNTS,
            COFFEE.replace("<ts:date>2024-03-01 10:59:00 +0000</ts:date>", "")
        ));
        let err = parse(&input).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingField {
                record: "transaction",
                field: "trn:date-posted/ts:date".to_string(),
            }
        );
    }

    #[test]
    fn missing_account_name_is_an_error() {
        let input = book(&ACCOUNTS.replace("<act:name>Checking</act:name>", ""));
        let err = parse(&input).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingField {
                record: "account",
                field: "act:name".to_string(),
            }
        );
    }

    #[test]
    fn invalid_amount_is_an_error() {
        let input = book(&format!(
            "{}{}",
            ACCOUNTS,
            COFFEE.replace("<split:quantity>-500/100", "<split:quantity>-5.00 USD")
        ));
        let err = parse(&input).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::InvalidNumber {
                field: "split:quantity".to_string(),
                text: "-5.00 USD".to_string(),
            }
        );
        assert!(err.location.is_some());
    }

    #[test]
    fn invalid_date_is_an_error() {
        let input = book(&format!(
            "{}{}",
            ACCOUNTS,
            COFFEE.replace("2024-03-01 10:59:00", "2024-02-30 10:59:00")
        ));
        let err = parse(&input).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidDate { .. }));
        assert!(err.to_string().contains("is not a calendar date"), "{}", err);
    }

    #[test]
    fn unknown_parent_is_an_error() {
        let input = book(&ACCOUNTS.replace(
            "<act:parent type=\"guid\">assets</act:parent>",
            "<act:parent type=\"guid\">nowhere</act:parent>",
        ));
        let err = parse(&input).unwrap_err();
        assert!(matches!(
            err.kind,
            ParseErrorKind::InvalidAccountTree { .. }
        ));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn malformed_xml_is_an_error() {
        let err = parse("<gnc-v2><gnc:book></gnc-v2>").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::MalformedXml { .. }));
    }
}
