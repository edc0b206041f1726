use std::borrow::Cow;

use typed_builder::TypedBuilder;

use super::Guid;

/// Represents a transaction split.  A split moves an amount into or out of one account.
///
/// Amounts are carried twice: `value` is expressed in the transaction's currency while
/// `quantity` is expressed in the account's own commodity.  The two only differ for
/// multi-currency transactions and trades, as in this purchase of shares:
///
/// ```text
/// <split:value>-150000/100</split:value>
/// <split:quantity>-150000/100</split:quantity>      (Assets:Checking, USD)
///
/// <split:value>150000/100</split:value>
/// <split:quantity>10/1</split:quantity>             (Assets:Broker:HOOL, HOOL)
/// ```
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Posting<'a> {
    /// Id of the account being posted to.
    pub account: Guid<'a>,

    /// Free-form action, e.g. `Buy` for a stock trade.
    #[builder(default)]
    pub action: Option<Cow<'a, str>>,

    /// Amount in the transaction's currency.
    #[builder(default)]
    pub value: f64,

    /// Amount in the account's commodity.
    #[builder(default)]
    pub quantity: f64,

    /// Whether the split has been reconciled against a statement.
    #[builder(default)]
    pub reconciled: bool,
}
