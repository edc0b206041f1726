//! Loading of the XML document and typed access to its namespaced elements.
//!
//! GnuCash writes every element in one of a handful of namespaces; elements are matched on
//! namespace URI and local name, never on the prefix a particular file happens to use.

use std::borrow::Cow;
use std::fmt;

use roxmltree::{Document, Node, StringStorage};

use crate::error::{ParseError, ParseResult};

/// A namespaced element name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Name {
    namespace: &'static str,
    prefix: &'static str,
    local: &'static str,
}

impl Name {
    const fn new(namespace: &'static str, prefix: &'static str, local: &'static str) -> Self {
        Name {
            namespace,
            prefix,
            local,
        }
    }

    fn matches(&self, node: &Node<'_, '_>) -> bool {
        node.is_element() && node.has_tag_name((self.namespace, self.local))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.prefix, self.local)
    }
}

const GNC: &str = "http://www.gnucash.org/XML/gnc";
const ACT: &str = "http://www.gnucash.org/XML/act";
const CMDTY: &str = "http://www.gnucash.org/XML/cmdty";
const TRN: &str = "http://www.gnucash.org/XML/trn";
const TS: &str = "http://www.gnucash.org/XML/ts";
const SPLIT: &str = "http://www.gnucash.org/XML/split";

pub(crate) const GNC_ACCOUNT: Name = Name::new(GNC, "gnc", "account");
pub(crate) const GNC_TRANSACTION: Name = Name::new(GNC, "gnc", "transaction");

pub(crate) const ACT_ID: Name = Name::new(ACT, "act", "id");
pub(crate) const ACT_NAME: Name = Name::new(ACT, "act", "name");
pub(crate) const ACT_TYPE: Name = Name::new(ACT, "act", "type");
pub(crate) const ACT_COMMODITY: Name = Name::new(ACT, "act", "commodity");
pub(crate) const ACT_PARENT: Name = Name::new(ACT, "act", "parent");
pub(crate) const CMDTY_ID: Name = Name::new(CMDTY, "cmdty", "id");

pub(crate) const TRN_DATE_POSTED: Name = Name::new(TRN, "trn", "date-posted");
pub(crate) const TRN_DESCRIPTION: Name = Name::new(TRN, "trn", "description");
pub(crate) const TRN_SPLITS: Name = Name::new(TRN, "trn", "splits");
pub(crate) const TRN_SPLIT: Name = Name::new(TRN, "trn", "split");
pub(crate) const TS_DATE: Name = Name::new(TS, "ts", "date");

pub(crate) const SPLIT_ACCOUNT: Name = Name::new(SPLIT, "split", "account");
pub(crate) const SPLIT_ACTION: Name = Name::new(SPLIT, "split", "action");
pub(crate) const SPLIT_VALUE: Name = Name::new(SPLIT, "split", "value");
pub(crate) const SPLIT_QUANTITY: Name = Name::new(SPLIT, "split", "quantity");
pub(crate) const SPLIT_RECONCILED: Name = Name::new(SPLIT, "split", "reconciled-state");

pub(crate) fn load(input: &str) -> ParseResult<Document<'_>> {
    Ok(Document::parse(input)?)
}

/// Every element called `name`, anywhere in the document, in document order (`//name`).
pub(crate) fn descendants<'a, 'i>(
    doc: &'a Document<'i>,
    name: Name,
) -> impl Iterator<Item = Node<'a, 'i>> + 'a {
    doc.descendants().filter(move |n| name.matches(n))
}

/// Direct children of `node` called `name`.
pub(crate) fn children<'a, 'i>(
    node: Node<'a, 'i>,
    name: Name,
) -> impl Iterator<Item = Node<'a, 'i>> {
    node.children().filter(move |n| name.matches(n))
}

/// Follows `path` one child element at a time (`a/b/c`), taking the first match at each step.
pub(crate) fn find<'a, 'i>(node: Node<'a, 'i>, path: &[Name]) -> Option<Node<'a, 'i>> {
    path.iter()
        .try_fold(node, |current, name| children(current, *name).next())
}

/// Text content of an element, joined across every text node below it so comments and
/// processing instructions do not cut it short; an empty element has empty text.
pub(crate) fn text<'i>(node: Node<'_, 'i>) -> Cow<'i, str> {
    let mut pieces = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text_storage());
    let first = match pieces.next() {
        Some(first) => storage(first),
        None => return Cow::Borrowed(""),
    };
    match pieces.next() {
        None => first,
        Some(second) => {
            let mut joined = first.into_owned();
            joined.push_str(&storage(second));
            for piece in pieces {
                joined.push_str(&storage(piece));
            }
            Cow::Owned(joined)
        }
    }
}

fn storage<'i>(text: &StringStorage<'i>) -> Cow<'i, str> {
    match text {
        StringStorage::Borrowed(s) => Cow::Borrowed(*s),
        StringStorage::Owned(s) => Cow::Owned(s.to_string()),
    }
}

pub(crate) fn optional_text<'i>(node: Node<'_, 'i>, path: &[Name]) -> Option<Cow<'i, str>> {
    find(node, path).map(text)
}

pub(crate) fn required<'a, 'i>(
    node: Node<'a, 'i>,
    record: &'static str,
    path: &[Name],
) -> ParseResult<Node<'a, 'i>> {
    find(node, path)
        .ok_or_else(|| ParseError::missing_field(record, path_string(path), position(node)))
}

pub(crate) fn required_text<'i>(
    node: Node<'_, 'i>,
    record: &'static str,
    path: &[Name],
) -> ParseResult<Cow<'i, str>> {
    required(node, record, path).map(text)
}

/// Line and column where `node` starts, both starting at 1.
pub(crate) fn position(node: Node<'_, '_>) -> (u32, u32) {
    let pos = node.document().text_pos_at(node.range().start);
    (pos.row, pos.col)
}

pub(crate) fn path_string(path: &[Name]) -> String {
    path.iter()
        .map(Name::to_string)
        .collect::<Vec<_>>()
        .join("/")
}
