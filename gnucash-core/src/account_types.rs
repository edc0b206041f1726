use std::borrow::Cow;

/// GnuCash account types, as written in `act:type`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum AccountType<'a> {
    /// The invisible top-level account every book hangs off.
    Root,
    Bank,
    Cash,
    Asset,
    Credit,
    Liability,
    Stock,
    Mutual,
    Currency,
    Income,
    Expense,
    Equity,
    Receivable,
    Payable,
    Trading,
    Other(Cow<'a, str>),
}

impl<'a> From<&'a str> for AccountType<'a> {
    fn from(s: &'a str) -> Self {
        Cow::from(s).into()
    }
}

impl From<String> for AccountType<'_> {
    fn from(s: String) -> Self {
        Cow::from(s).into()
    }
}

impl<'a> From<Cow<'a, str>> for AccountType<'a> {
    fn from(s: Cow<'a, str>) -> Self {
        match &*s {
            "ROOT" => AccountType::Root,
            "BANK" => AccountType::Bank,
            "CASH" => AccountType::Cash,
            "ASSET" => AccountType::Asset,
            "CREDIT" => AccountType::Credit,
            "LIABILITY" => AccountType::Liability,
            "STOCK" => AccountType::Stock,
            "MUTUAL" => AccountType::Mutual,
            "CURRENCY" => AccountType::Currency,
            "INCOME" => AccountType::Income,
            "EXPENSE" => AccountType::Expense,
            "EQUITY" => AccountType::Equity,
            "RECEIVABLE" => AccountType::Receivable,
            "PAYABLE" => AccountType::Payable,
            "TRADING" => AccountType::Trading,
            _ => AccountType::Other(s),
        }
    }
}
