//! Structured field values (RFC 8941), List grammar only.
//!
//! `Sec-Session-Registration` is a List, so that is the only top-level
//! grammar exposed here. Dictionaries and top-level Items are not parsed.

mod parse;

pub use parse::{parse_list, ParseError};

/// A bare item: the value part of an Item or of a parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BareItem {
    Integer(i64),
    Decimal(f64),
    String(String),
    Token(String),
    ByteSequence(Vec<u8>),
    Boolean(bool),
}

impl BareItem {
    /// Returns the contents if this is a String (not a Token).
    pub fn as_string(&self) -> Option<&str> {
        match self {
            BareItem::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contents if this is a Token.
    pub fn as_token(&self) -> Option<&str> {
        match self {
            BareItem::Token(t) => Some(t),
            _ => None,
        }
    }
}

/// Ordered parameters attached to an Item or Inner List.
///
/// Keys are unique. Inserting an existing key overwrites its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters(Vec<(String, BareItem)>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: BareItem) {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&BareItem> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BareItem)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub bare_item: BareItem,
    pub params: Parameters,
}

impl Item {
    pub fn new(bare_item: BareItem) -> Self {
        Self {
            bare_item,
            params: Parameters::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InnerList {
    pub items: Vec<Item>,
    pub params: Parameters,
}

/// One member of a List: either a single Item or a parenthesized Inner List.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry {
    Item(Item),
    InnerList(InnerList),
}

pub type List = Vec<ListEntry>;
