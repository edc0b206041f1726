use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use log::{debug, trace};
use thiserror::Error;
use typed_builder::TypedBuilder;

use super::account_types::AccountType;
use super::{Commodity, Guid};

/// Represents an account exactly as the book declares it.
///
/// GnuCash stores accounts flat: each account only knows its own short name and the id of
/// its parent.  The colon-separated name used in a journal is only known once the whole
/// table has been read, see [`AccountTree::resolve`].
///
/// ```text
/// Assets                  ->  Assets
///   Current Assets        ->  Assets:Current Assets
///     Checking Account    ->  Assets:Current Assets:Checking Account
/// ```
#[derive(Clone, Debug, Eq, PartialEq, TypedBuilder)]
pub struct Account<'a> {
    /// Identifier, unique within a book.
    pub id: Guid<'a>,

    /// Short display name, not including any ancestor.
    pub name: Cow<'a, str>,

    #[builder(default)]
    pub ty: Option<AccountType<'a>>,

    /// Commodity the account is denominated in.
    #[builder(default)]
    pub commodity: Option<Commodity<'a>>,

    /// Id of the parent account, `None` for top-level accounts.
    #[builder(default)]
    pub parent: Option<Guid<'a>>,
}

impl Account<'_> {
    /// The invisible `ROOT` account of a book contributes nothing to its children's names.
    fn is_tree_root(&self) -> bool {
        self.parent.is_none() && self.ty == Some(AccountType::Root)
    }
}

/// An account whose name has been expanded to its full path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedAccount<'a> {
    /// Colon-joined names from the top-level ancestor down to this account.
    pub name: String,

    pub ty: Option<AccountType<'a>>,

    pub commodity: Option<Commodity<'a>>,

    pub parent: Option<Guid<'a>>,
}

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ResolveError {
    #[error("account '{account}' refers to unknown parent account '{parent}'")]
    UnknownParent { account: String, parent: String },
    #[error("account '{account}' is its own ancestor")]
    Cycle { account: String },
}

/// All accounts of a book, keyed by id, with hierarchical names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountTree<'a> {
    accounts: HashMap<Guid<'a>, ResolvedAccount<'a>>,
}

impl<'a> AccountTree<'a> {
    /// Expands every account name to its full path.
    ///
    /// Parents may appear after their children.  When two accounts share an id the later one
    /// wins.  A parent id that names no account, or a parent chain that loops back on itself,
    /// is an error.
    pub fn resolve<I>(accounts: I) -> Result<Self, ResolveError>
    where
        I: IntoIterator<Item = Account<'a>>,
    {
        let accounts: Vec<Account<'a>> = accounts.into_iter().collect();
        let by_id: HashMap<&str, &Account<'a>> =
            accounts.iter().map(|a| (a.id.as_ref(), a)).collect();

        let mut names: HashMap<&str, String> = HashMap::with_capacity(by_id.len());
        for account in &accounts {
            if let Some(account) = by_id.get(account.id.as_ref()).copied() {
                resolve_name(account, &by_id, &mut names)?;
            }
        }

        let resolved = by_id
            .values()
            .map(|account| {
                let name = names.get(account.id.as_ref()).cloned().unwrap_or_default();
                trace!("account {} resolved to '{}'", account.id, name);
                (
                    account.id.clone(),
                    ResolvedAccount {
                        name,
                        ty: account.ty.clone(),
                        commodity: account.commodity.clone(),
                        parent: account.parent.clone(),
                    },
                )
            })
            .collect::<HashMap<_, _>>();
        debug!("resolved {} accounts", resolved.len());

        Ok(AccountTree { accounts: resolved })
    }

    pub fn get(&self, id: &str) -> Option<&ResolvedAccount<'a>> {
        self.accounts.get(id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Guid<'a>, &ResolvedAccount<'a>)> {
        self.accounts.iter()
    }
}

/// Walks up from `account` until an ancestor with a known name (or the top of the tree) is
/// found, then names every account on the way back down.
fn resolve_name<'r, 'a>(
    account: &'r Account<'a>,
    by_id: &HashMap<&'r str, &'r Account<'a>>,
    names: &mut HashMap<&'r str, String>,
) -> Result<(), ResolveError> {
    let mut chain: Vec<&'r Account<'a>> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut current = account;

    let mut prefix = loop {
        if let Some(known) = names.get(current.id.as_ref()) {
            break known.clone();
        }
        if !seen.insert(current.id.as_ref()) {
            return Err(ResolveError::Cycle {
                account: current.id.to_string(),
            });
        }
        chain.push(current);
        match &current.parent {
            Some(parent) => {
                current = by_id.get(parent.as_ref()).copied().ok_or_else(|| {
                    ResolveError::UnknownParent {
                        account: current.id.to_string(),
                        parent: parent.to_string(),
                    }
                })?;
            }
            None => break String::new(),
        }
    };

    for account in chain.into_iter().rev() {
        let name = if account.is_tree_root() {
            String::new()
        } else if prefix.is_empty() {
            account.name.to_string()
        } else {
            format!("{}:{}", prefix, account.name)
        };
        names.insert(account.id.as_ref(), name.clone());
        prefix = name;
    }
    Ok(())
}
