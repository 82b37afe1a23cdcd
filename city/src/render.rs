//! Template rendering for CLI output using outstanding

use std::str::FromStr;

use citylib::ReportTable;
use console::{measure_text_width, pad_str, Alignment, Style};
use outstanding::Theme;
use serde::Serialize;

/// Include template at compile time
const REPORT_TEMPLATE: &str = include_str!("../templates/report.jinja");

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Data context for the report template (all strings pre-padded)
#[derive(Debug, Serialize)]
struct ReportContext {
    title: String,
    header: String,
    separator: String,
    rows: Vec<String>,
    footer: Option<String>,
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("title", Style::new().bold())
}

/// A column is numeric when every non-empty cell parses as a number.
fn numeric_columns(table: &ReportTable) -> Vec<bool> {
    (0..table.width())
        .map(|col| {
            col > 0
                && table.rows.iter().all(|row| {
                    row.values
                        .get(col - 1)
                        .map_or(true, |v| v.is_empty() || v.parse::<f64>().is_ok())
                })
        })
        .collect()
}

/// Width of each column: the widest of header and cells.
fn column_widths(table: &ReportTable) -> Vec<usize> {
    let mut widths: Vec<usize> = table.headers.iter().map(|h| measure_text_width(h)).collect();
    for row in &table.rows {
        if let Some(w) = widths.first_mut() {
            *w = (*w).max(measure_text_width(&row.label));
        }
        for (i, value) in row.values.iter().enumerate() {
            if let Some(w) = widths.get_mut(i + 1) {
                *w = (*w).max(measure_text_width(value));
            }
        }
    }
    widths
}

/// Join cells into one line, padding each to its column width.
fn format_line(cells: &[&str], widths: &[usize], numeric: &[bool]) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(i, width)| {
            let cell = cells.get(i).copied().unwrap_or("");
            let align = if numeric.get(i).copied().unwrap_or(false) {
                Alignment::Right
            } else {
                Alignment::Left
            };
            pad_str(cell, *width, align, None).into_owned()
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

fn build_context(table: &ReportTable) -> ReportContext {
    let widths = column_widths(table);
    let numeric = numeric_columns(table);

    let headers: Vec<&str> = table.headers.iter().map(|s| s.as_str()).collect();
    let header = format_line(&headers, &widths, &vec![false; widths.len()]);

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.label.as_str()];
            cells.extend(row.values.iter().map(|v| v.as_str()));
            format_line(&cells, &widths, &numeric)
        })
        .collect();

    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);

    ReportContext {
        title: table.title.clone(),
        header,
        separator: "-".repeat(total_width),
        rows,
        footer: table.footer.as_ref().map(|f| f.label.clone()),
    }
}

/// Render one table as text using outstanding
fn render_table_text(table: &ReportTable, theme: &Theme) -> anyhow::Result<String> {
    let value = serde_json::to_value(build_context(table))?;
    outstanding::render(REPORT_TEMPLATE, &value, theme).map_err(|e| anyhow::anyhow!("{e}"))
}

/// Render tables in the requested format.
///
/// JSON output is a single object for one table and an array otherwise.
pub fn render_tables(tables: &[ReportTable], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let json = match tables {
                [table] => serde_json::to_string_pretty(table)?,
                _ => serde_json::to_string_pretty(tables)?,
            };
            Ok(json)
        }
        OutputFormat::Text => {
            let theme = create_theme();
            let rendered = tables
                .iter()
                .map(|t| render_table_text(t, &theme).map(|s| s.trim_end().to_string()))
                .collect::<anyhow::Result<Vec<_>>>()?;
            Ok(rendered.join("\n\n"))
        }
    }
}
