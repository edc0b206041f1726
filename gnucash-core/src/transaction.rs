use std::borrow::Cow;

use chrono::NaiveDate;
use typed_builder::TypedBuilder;

use super::posting::Posting;

#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Transaction<'a> {
    /// Date the transaction was posted; the time of day is dropped.
    pub date: NaiveDate,

    pub description: Cow<'a, str>,

    /// Splits in the order the book lists them.
    #[builder(default)]
    pub splits: Vec<Posting<'a>>,
}

impl Transaction<'_> {
    /// A transaction counts as cleared as soon as a single split is reconciled.
    pub fn is_cleared(&self) -> bool {
        self.splits.iter().any(|split| split.reconciled)
    }
}
