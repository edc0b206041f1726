use std::borrow::Cow;

use typed_builder::TypedBuilder;

pub use account::{Account, AccountTree, ResolveError, ResolvedAccount};
pub use account_types::AccountType;
pub use posting::Posting;
pub use transaction::Transaction;

pub mod account;
pub mod account_types;
pub mod posting;
pub mod transaction;

/// A fully loaded GnuCash book: the resolved account tree and every transaction in
/// document order.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Book<'a> {
    pub accounts: AccountTree<'a>,

    #[builder(default)]
    pub transactions: Vec<Transaction<'a>>,
}

/// A commodity code such as `USD`, or a security symbol.
pub type Commodity<'a> = Cow<'a, str>;

/// Opaque GnuCash identifier (a GUID in practice).
pub type Guid<'a> = Cow<'a, str>;
