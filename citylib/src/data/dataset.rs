//! The in-memory dataset every query reads from.
//!
//! A `Dataset` is built once, validated, and never mutated afterwards.
//! Queries borrow it, so any number of readers can share one instance
//! and tests can construct as many independent datasets as they need.

use std::collections::HashSet;

use tracing::debug;

use crate::error::CityError;
use crate::Result;

use super::model::{Block, House, HouseToBlock};

fn invalid(code: &str, reason: &'static str) -> CityError {
    CityError::InvalidRecord {
        code: code.to_string(),
        reason,
    }
}

fn check_house(house: &House) -> Result<()> {
    if house.floors == 0 {
        return Err(invalid(&house.code, "floors must be positive"));
    }
    if house.entrances == 0 {
        return Err(invalid(&house.code, "entrances must be positive"));
    }
    Ok(())
}

fn check_block(block: &Block) -> Result<()> {
    // NaN fails this comparison too
    if !(block.area.is_finite() && block.area > 0.0) {
        return Err(invalid(&block.code, "area must be a positive finite number"));
    }
    Ok(())
}

/// Immutable collection of houses, blocks and their associations.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    houses: Vec<House>,
    blocks: Vec<Block>,
    links: Vec<HouseToBlock>,
}

impl Dataset {
    /// Build a dataset, checking field constraints and code uniqueness.
    ///
    /// Houses need at least one floor and one entrance, and block areas
    /// must be finite and positive. House codes and block codes must be
    /// unique, and a house may be linked to at most one block. Links
    /// pointing at unknown houses or blocks are accepted; queries treat
    /// them as unmatched.
    pub fn new(houses: Vec<House>, blocks: Vec<Block>, links: Vec<HouseToBlock>) -> Result<Self> {
        let mut house_codes = HashSet::new();
        for house in &houses {
            check_house(house)?;
            if !house_codes.insert(house.code.as_str()) {
                return Err(CityError::DuplicateHouse(house.code.clone()));
            }
        }

        let mut block_codes = HashSet::new();
        for block in &blocks {
            check_block(block)?;
            if !block_codes.insert(block.code.as_str()) {
                return Err(CityError::DuplicateBlock(block.code.clone()));
            }
        }

        let mut linked = HashSet::new();
        for link in &links {
            if !linked.insert(link.house_code.as_str()) {
                return Err(CityError::DuplicateLink(link.house_code.clone()));
            }
            if !house_codes.contains(link.house_code.as_str()) {
                debug!(house = %link.house_code, "link references unknown house");
            }
            if !block_codes.contains(link.block_code.as_str()) {
                debug!(block = %link.block_code, "link references unknown block");
            }
        }

        debug!(
            houses = houses.len(),
            blocks = blocks.len(),
            links = links.len(),
            "dataset loaded"
        );

        Ok(Self {
            houses,
            blocks,
            links,
        })
    }

    /// A dataset with no records at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Houses in store order.
    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    /// Blocks in store order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// House-to-block associations in store order.
    pub fn links(&self) -> &[HouseToBlock] {
        &self.links
    }

    pub fn house(&self, code: &str) -> Option<&House> {
        self.houses.iter().find(|h| h.code == code)
    }

    pub fn block(&self, code: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.code == code)
    }

    /// Block code a house is linked to, if any.
    pub fn block_code_of(&self, house_code: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.house_code == house_code)
            .map(|l| l.block_code.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.houses.is_empty() && self.blocks.is_empty() && self.links.is_empty()
    }
}
