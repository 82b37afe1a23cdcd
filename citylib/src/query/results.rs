//! Typed query results.
//!
//! Results borrow from the dataset they were computed on; nothing is
//! cloned until the presentation layer formats it.

use serde::Serialize;

use crate::data::model::{Block, House};

/// Houses sharing one grouping key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group<'a, K> {
    pub key: K,
    pub houses: Vec<&'a House>,
}

/// A block together with the houses joined to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockHouses<'a> {
    pub block: &'a Block,
    pub houses: Vec<&'a House>,
}

impl BlockHouses<'_> {
    /// Block name, the key this entry is reported under.
    pub fn name(&self) -> &str {
        &self.block.name
    }
}

/// Outcome of looking up a house's administration address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "address", rename_all = "kebab-case")]
pub enum AddressLookup<'a> {
    /// Address of the block the house belongs to
    Found(&'a str),
    /// No association exists for the house code
    HouseNotFound,
    /// The association points at a block that does not exist
    BlockNotFound,
}

impl<'a> AddressLookup<'a> {
    pub fn address(&self) -> Option<&'a str> {
        match *self {
            AddressLookup::Found(address) => Some(address),
            _ => None,
        }
    }
}
