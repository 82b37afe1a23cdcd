//! Dataset seeding: the reference city and TOML dataset files.
//!
//! The reference city has 13 houses, 4 blocks and 13 associations.
//! Creation dates are expressed as whole years before a reference date,
//! so fixtures stay stable when the reference date is pinned.
//!
//! A dataset file uses one array of tables per collection:
//!
//! ```toml
//! [[houses]]
//! code = "70/1"
//! project_type = "HighRise"
//! floors = 5
//! entrances = 4
//! creation_date = "2006-10-18"
//!
//! [[blocks]]
//! code = "S200"
//! name = "South"
//! administration_address = "Cloud, 22"
//! inhabitants = 20000
//! area = 32.1
//!
//! [[links]]
//! house_code = "70/1"
//! block_code = "S200"
//! ```

use std::path::Path;

use chrono::{Months, NaiveDate};
use serde::Deserialize;

use crate::Result;

use super::dataset::Dataset;
use super::model::{Block, House, HouseToBlock, ProjectType};

/// Houses of the reference city: (code, type, floors, entrances, age in years).
const REFERENCE_HOUSES: [(&str, ProjectType, u32, u32, u32); 13] = [
    ("70/1", ProjectType::HighRise, 5, 4, 20),
    ("70/3", ProjectType::HighRise, 5, 4, 30),
    ("68/1", ProjectType::HighRise, 9, 7, 15),
    ("47", ProjectType::HighRise, 9, 7, 2),
    ("9", ProjectType::OneStory, 1, 1, 6),
    ("8", ProjectType::OneStory, 1, 1, 9),
    ("65a", ProjectType::Hostel, 9, 1, 20),
    ("65b", ProjectType::Hostel, 5, 1, 41),
    ("65c", ProjectType::Hostel, 5, 1, 11),
    ("11/3", ProjectType::HighRise, 7, 3, 20),
    ("11a", ProjectType::Cottage, 2, 1, 4),
    ("11c", ProjectType::Cottage, 3, 1, 7),
    ("11b", ProjectType::Cottage, 1, 1, 1),
];

/// Blocks of the reference city: (code, name, address, inhabitants, area).
const REFERENCE_BLOCKS: [(&str, &str, &str, u32, f64); 4] = [
    ("N120", "North", "Sun, 15", 1200, 10.5),
    ("S200", "South", "Cloud, 22", 20000, 32.1),
    ("W186", "West", "Qwerty, 11/7", 18652, 29.47),
    ("E192", "East", "Center, 13d", 19200, 27.14),
];

/// Associations of the reference city: (house code, block code).
const REFERENCE_LINKS: [(&str, &str); 13] = [
    ("11a", "N120"),
    ("11c", "N120"),
    ("65c", "N120"),
    ("70/1", "S200"),
    ("70/3", "S200"),
    ("9", "S200"),
    ("11/3", "W186"),
    ("47", "W186"),
    ("65a", "W186"),
    ("8", "E192"),
    ("65b", "E192"),
    ("68/1", "E192"),
    ("11b", "S200"),
];

/// Date `years` whole years before `today`.
fn years_before(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years * 12))
        .unwrap_or(NaiveDate::MIN)
}

/// Build the reference city with creation dates relative to `today`.
pub fn reference(today: NaiveDate) -> Result<Dataset> {
    let houses = REFERENCE_HOUSES
        .iter()
        .map(|&(code, ty, floors, entrances, age)| {
            House::new(code, ty, floors, entrances, years_before(today, age))
        })
        .collect();

    let blocks = REFERENCE_BLOCKS
        .iter()
        .map(|&(code, name, address, inhabitants, area)| {
            Block::new(code, name, address, inhabitants, area)
        })
        .collect();

    let links = REFERENCE_LINKS
        .iter()
        .map(|&(house, block)| HouseToBlock::new(house, block))
        .collect();

    Dataset::new(houses, blocks, links)
}

/// On-disk shape of a dataset file.
#[derive(Debug, Default, Deserialize)]
struct DatasetFile {
    #[serde(default)]
    houses: Vec<House>,
    #[serde(default)]
    blocks: Vec<Block>,
    #[serde(default)]
    links: Vec<HouseToBlock>,
}

/// Parse a dataset from TOML text.
pub fn from_toml_str(text: &str) -> Result<Dataset> {
    let file: DatasetFile = toml::from_str(text)?;
    Dataset::new(file.houses, file.blocks, file.links)
}

/// Load a dataset from a TOML file.
pub fn from_file(path: impl AsRef<Path>) -> Result<Dataset> {
    let text = std::fs::read_to_string(path.as_ref())?;
    from_toml_str(&text)
}
