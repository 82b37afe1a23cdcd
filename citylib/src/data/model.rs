//! Core records: houses, blocks and the house-to-block association.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CityError;

/// Building style of a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    /// Multi-story apartment building
    HighRise,
    /// Single-story house
    OneStory,
    Hostel,
    Cottage,
}

impl ProjectType {
    /// All project types in declaration order.
    pub fn all() -> [ProjectType; 4] {
        [
            ProjectType::HighRise,
            ProjectType::OneStory,
            ProjectType::Hostel,
            ProjectType::Cottage,
        ]
    }

    /// Canonical name, as shown in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::HighRise => "HighRise",
            ProjectType::OneStory => "OneStory",
            ProjectType::Hostel => "Hostel",
            ProjectType::Cottage => "Cottage",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = CityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highrise" | "high-rise" | "high_rise" => Ok(ProjectType::HighRise),
            "onestory" | "one-story" | "one_story" => Ok(ProjectType::OneStory),
            "hostel" => Ok(ProjectType::Hostel),
            "cottage" => Ok(ProjectType::Cottage),
            _ => Err(CityError::UnknownProjectType(s.to_string())),
        }
    }
}

/// A single residential building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    /// Unique identifier within the house collection
    pub code: String,
    pub project_type: ProjectType,
    /// Number of floors (positive)
    pub floors: u32,
    /// Number of entrances (positive)
    pub entrances: u32,
    pub creation_date: NaiveDate,
}

impl House {
    pub fn new(
        code: impl Into<String>,
        project_type: ProjectType,
        floors: u32,
        entrances: u32,
        creation_date: NaiveDate,
    ) -> Self {
        Self {
            code: code.into(),
            project_type,
            floors,
            entrances,
            creation_date,
        }
    }

    /// Calendar year the house was built.
    pub fn year(&self) -> i32 {
        self.creation_date.year()
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.code, self.project_type, self.year())
    }
}

/// An administrative city district.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier within the block collection
    pub code: String,
    pub name: String,
    pub administration_address: String,
    pub inhabitants: u32,
    /// Area in square kilometres
    pub area: f64,
}

impl Block {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        administration_address: impl Into<String>,
        inhabitants: u32,
        area: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            administration_address: administration_address.into(),
            inhabitants,
            area,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.code, self.name, self.administration_address
        )
    }
}

/// Association of a house to the block containing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseToBlock {
    pub house_code: String,
    pub block_code: String,
}

impl HouseToBlock {
    pub fn new(house_code: impl Into<String>, block_code: impl Into<String>) -> Self {
        Self {
            house_code: house_code.into(),
            block_code: block_code.into(),
        }
    }
}
