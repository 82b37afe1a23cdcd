//! Data layer: records, the dataset store and seeding.
//!
//! This module holds everything the query engine reads from. It provides:
//!
//! - **Model**: `House`, `Block`, `HouseToBlock`, `ProjectType`
//! - **Dataset**: the validated, read-only store
//! - **Seeding**: the reference city and TOML dataset files
//!
//! ## Example
//!
//! ```rust,ignore
//! use citylib::data::{seed, Dataset};
//!
//! let dataset = seed::reference(chrono::Local::now().date_naive())?;
//! println!("{} houses", dataset.houses().len());
//! ```

pub mod dataset;
pub mod model;
pub mod seed;

pub use dataset::Dataset;
pub use model::{Block, House, HouseToBlock, ProjectType};
