//! Query processing: join, group, filter and aggregate the dataset.
//!
//! This module is the core of the crate. It provides:
//!
//! - **Engine**: `CityQuery`, the stateless operations over a `Dataset`
//! - **Options**: parameters for the demonstration queries (`QueryOptions`, `PercentBase`)
//! - **Results**: typed, borrowing result shapes (`Group`, `BlockHouses`, `AddressLookup`)
//! - **Sampling**: injectable index sources for the random overlap query
//!
//! ## Example
//!
//! ```rust,ignore
//! use citylib::query::{CityQuery, PercentBase};
//!
//! let query = CityQuery::new(&dataset);
//! let share = query.percent_high_rise("W186", PercentBase::default())?;
//! ```

pub mod engine;
pub mod options;
pub mod results;
pub mod sample;

pub use engine::CityQuery;
pub use options::{PercentBase, QueryOptions};
pub use results::{AddressLookup, BlockHouses, Group};
pub use sample::{IndexSource, ScriptedIndices};
