//! Output formatting: present query results as tables.
//!
//! This module handles the last stage of the pipeline - formatting query
//! results for display. It provides:
//!
//! - **ReportTable**: table-ready structure with title, headers, rows and footer
//! - **TableRow**: individual row with label and formatted values
//!
//! ReportTable is a pure presentation layer - it only formats data into strings.
//!
//! ## Example
//!
//! ```rust,ignore
//! use citylib::output::ReportTable;
//!
//! let table = ReportTable::from_houses("Happy houses", &query.houses_matching("7"));
//! // table.headers: ["House", "Type", "Floors", "Entrances", "Year"]
//! // table.rows: [TableRow { label: "70/1", values: ["HighRise", "5", "4", "2006"] }, ...]
//! ```

pub mod table;

pub use table::{ReportTable, TableRow};
