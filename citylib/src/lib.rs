//! # citylib
//!
//! Relational-style queries (grouping, joining, aggregation) over a small
//! in-memory dataset of a city's housing blocks and houses.
//!
//! ## Overview
//!
//! The crate is organised as a short pipeline:
//!
//! - **Data**: `House`, `Block` and `HouseToBlock` records held in an
//!   immutable `Dataset`, seeded from the reference city or a TOML file
//! - **Query**: `CityQuery`, a set of stateless operations borrowing the
//!   dataset (joins, group-bys, filters, aggregates, a random overlap game)
//! - **Output**: `ReportTable`, formatted strings ready for templates or JSON
//!
//! ## Features
//!
//! - **No global state**: a dataset is an explicit value; build as many as you need
//! - **Typed not-found outcomes**: address lookups tell an unknown house from an unknown block
//! - **Explicit arithmetic errors**: ratios over an empty base fail with `DivisionByZero`
//! - **Deterministic sampling on demand**: the random query takes any `IndexSource`
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use citylib::{seed, AddressLookup, CityQuery, PercentBase};
//!
//! let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let dataset = seed::reference(today).unwrap();
//! let query = CityQuery::new(&dataset);
//!
//! assert_eq!(query.blocks().len(), 4);
//! assert_eq!(
//!     query.administration_address("70/1"),
//!     AddressLookup::Found("Cloud, 22")
//! );
//! assert_eq!(query.percent_high_rise("W186", PercentBase::BlockHouses).unwrap(), 66);
//! ```

pub mod data;
pub mod error;
pub mod output;
pub mod query;

pub use data::{seed, Block, Dataset, House, HouseToBlock, ProjectType};
pub use error::CityError;
pub use output::{ReportTable, TableRow};
pub use query::{
    AddressLookup, BlockHouses, CityQuery, Group, IndexSource, PercentBase, QueryOptions,
    ScriptedIndices,
};

/// Result type for citylib operations
pub type Result<T> = std::result::Result<T, CityError>;
