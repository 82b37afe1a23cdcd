//! Table-ready data structures for query output.
//!
//! This module provides `ReportTable`, a presentation-ready structure
//! that templates consume directly or that serializes to JSON.
//!
//! The data flow is:
//! 1. Dataset (houses, blocks, associations)
//! 2. Query results (`CityQuery` output, borrowing the dataset)
//! 3. ReportTable (formatted strings for display)
//!
//! ReportTable only formats. All joining, grouping and filtering happens
//! in the query layer.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::data::model::{Block, House, ProjectType};
use crate::query::results::{AddressLookup, BlockHouses, Group};

const HOUSE_HEADERS: [&str; 5] = ["House", "Type", "Floors", "Entrances", "Year"];
const BLOCK_HEADERS: [&str; 5] = ["Block", "Name", "Address", "Inhabitants", "Area"];

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (house code, block name, measure name, ...)
    pub label: String,
    /// Remaining cells, ready for display
    pub values: Vec<String>,
}

impl TableRow {
    fn new(label: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Table-ready query output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    pub title: String,
    /// Column headers: [label_header, value1, value2, ...]
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
    /// Summary row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<TableRow>,
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn house_values(house: &House) -> Vec<String> {
    vec![
        house.project_type.to_string(),
        house.floors.to_string(),
        house.entrances.to_string(),
        house.year().to_string(),
    ]
}

fn block_row(block: &Block) -> TableRow {
    TableRow::new(
        block.code.clone(),
        vec![
            block.name.clone(),
            block.administration_address.clone(),
            block.inhabitants.to_string(),
            format!("{:.2}", block.area),
        ],
    )
}

fn count_footer(count: usize, unit: &str) -> Option<TableRow> {
    Some(TableRow::new(format!("Total ({} {})", count, unit), vec![]))
}

/// Rows for a keyed list of houses: the key labels the first row of each
/// group, and a key with no houses still gets a placeholder row.
fn grouped_rows<'h, K: Display>(key: K, houses: &[&'h House]) -> Vec<TableRow> {
    if houses.is_empty() {
        return vec![TableRow::new(key.to_string(), vec!["-".to_string()])];
    }
    houses
        .iter()
        .enumerate()
        .map(|(i, house)| {
            let label = if i == 0 { key.to_string() } else { String::new() };
            let mut values = vec![house.code.clone()];
            values.extend(house_values(house));
            TableRow::new(label, values)
        })
        .collect()
}

impl ReportTable {
    fn new(title: impl Into<String>, headers: Vec<String>, rows: Vec<TableRow>) -> Self {
        Self {
            title: title.into(),
            headers,
            rows,
            footer: None,
        }
    }

    fn with_footer(mut self, footer: Option<TableRow>) -> Self {
        self.footer = footer;
        self
    }

    /// One row per block.
    pub fn from_blocks<'b>(title: &str, blocks: impl IntoIterator<Item = &'b Block>) -> Self {
        let rows: Vec<TableRow> = blocks.into_iter().map(block_row).collect();
        let footer = count_footer(rows.len(), "blocks");
        Self::new(title, headers(&BLOCK_HEADERS), rows).with_footer(footer)
    }

    /// One row per house.
    pub fn from_houses(title: &str, houses: &[&House]) -> Self {
        let rows = houses
            .iter()
            .map(|h| TableRow::new(h.code.clone(), house_values(h)))
            .collect();
        Self::new(title, headers(&HOUSE_HEADERS), rows)
            .with_footer(count_footer(houses.len(), "houses"))
    }

    /// Houses listed under the name of their block.
    pub fn from_block_houses(title: &str, info: &[BlockHouses<'_>]) -> Self {
        let mut names = vec!["Block"];
        names.extend(HOUSE_HEADERS);
        let rows = info
            .iter()
            .flat_map(|entry| grouped_rows(entry.name(), &entry.houses))
            .collect();
        let houses = info.iter().map(|e| e.houses.len()).sum();
        Self::new(title, headers(&names), rows).with_footer(count_footer(houses, "houses"))
    }

    /// Houses listed under their grouping key.
    pub fn from_groups<K: Display>(title: &str, key_header: &str, groups: &[Group<'_, K>]) -> Self {
        let mut names = vec![key_header];
        names.extend(HOUSE_HEADERS);
        let rows = groups
            .iter()
            .flat_map(|g| grouped_rows(&g.key, &g.houses))
            .collect();
        Self::new(title, headers(&names), rows)
            .with_footer(count_footer(groups.len(), "groups"))
    }

    /// One row per project type.
    pub fn from_types(title: &str, types: &[ProjectType]) -> Self {
        let rows = types
            .iter()
            .map(|t| TableRow::new(t.to_string(), vec![]))
            .collect();
        Self::new(title, headers(&["Project type"]), rows)
    }

    /// A single named measurement.
    pub fn from_scalar(title: &str, label: &str, value: String) -> Self {
        Self::new(
            title,
            headers(&["Measure", "Value"]),
            vec![TableRow::new(label, vec![value])],
        )
    }

    /// Administration address lookup for one house.
    pub fn from_address(house_code: &str, lookup: &AddressLookup<'_>) -> Self {
        let value = match lookup {
            AddressLookup::Found(address) => address.to_string(),
            AddressLookup::HouseNotFound => format!("No house with {} code.", house_code),
            AddressLookup::BlockNotFound => "Block is unknown.".to_string(),
        };
        Self::new(
            "Administration address",
            headers(&["House", "Address"]),
            vec![TableRow::new(house_code, vec![value])],
        )
    }

    /// High-rise share of one block.
    pub fn from_percent(block_code: &str, percent: u32) -> Self {
        Self::new(
            "High-rise share",
            headers(&["Block", "High-rise"]),
            vec![TableRow::new(block_code, vec![format!("{}%", percent)])],
        )
    }

    /// Outcome of the random overlap game.
    pub fn from_overlap(block: Option<&Block>) -> Self {
        let table = Self::from_blocks("Random overlap block", block);
        match block {
            Some(_) => table.with_footer(None),
            None => table.with_footer(Some(TableRow::new("No result", vec![]))),
        }
    }

    /// A query that failed, reported in place of its result.
    pub fn from_error(title: &str, message: &str) -> Self {
        Self::new(
            title,
            headers(&["Status", "Message"]),
            vec![TableRow::new("Error", vec![message.to_string()])],
        )
    }

    /// Number of columns, including the label column.
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}
