//! The demonstration queries, numbered as in the interactive menu.

use std::io::{BufRead, Write};

use anyhow::Context as _;
use citylib::{CityQuery, Dataset, IndexSource, QueryOptions, ReportTable};
use tracing::{debug, info, warn};

use crate::render::{render_tables, OutputFormat};

/// One entry of the demonstration menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Blocks,
    FullInfo,
    Area,
    AreaPerPerson,
    ByType,
    ByFloors,
    Recent,
    Happy,
    Types,
    Address,
    Largest,
    Oldest,
    HighRise,
    MultiEntrance,
    Play,
}

impl MenuItem {
    /// All items in menu order.
    pub fn all() -> [MenuItem; 15] {
        [
            MenuItem::Blocks,
            MenuItem::FullInfo,
            MenuItem::Area,
            MenuItem::AreaPerPerson,
            MenuItem::ByType,
            MenuItem::ByFloors,
            MenuItem::Recent,
            MenuItem::Happy,
            MenuItem::Types,
            MenuItem::Address,
            MenuItem::Largest,
            MenuItem::Oldest,
            MenuItem::HighRise,
            MenuItem::MultiEntrance,
            MenuItem::Play,
        ]
    }

    /// Menu item for a 1-based choice.
    pub fn from_choice(choice: usize) -> Option<MenuItem> {
        choice
            .checked_sub(1)
            .and_then(|i| Self::all().get(i).copied())
    }

    /// Subcommand name.
    pub fn command(&self) -> &'static str {
        match self {
            MenuItem::Blocks => "blocks",
            MenuItem::FullInfo => "full-info",
            MenuItem::Area => "area",
            MenuItem::AreaPerPerson => "area-per-person",
            MenuItem::ByType => "by-type",
            MenuItem::ByFloors => "by-floors",
            MenuItem::Recent => "recent",
            MenuItem::Happy => "happy",
            MenuItem::Types => "types",
            MenuItem::Address => "address",
            MenuItem::Largest => "largest",
            MenuItem::Oldest => "oldest",
            MenuItem::HighRise => "high-rise",
            MenuItem::MultiEntrance => "multi-entrance",
            MenuItem::Play => "play",
        }
    }

    pub fn from_command(name: &str) -> Option<MenuItem> {
        Self::all().into_iter().find(|item| item.command() == name)
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Blocks => "All blocks",
            MenuItem::FullInfo => "Full city info",
            MenuItem::Area => "City area",
            MenuItem::AreaPerPerson => "Area per inhabitant",
            MenuItem::ByType => "Houses by project type",
            MenuItem::ByFloors => "Houses by floor count",
            MenuItem::Recent => "New houses",
            MenuItem::Happy => "Happy houses",
            MenuItem::Types => "Project types at or above a floor count",
            MenuItem::Address => "Administration address of a house",
            MenuItem::Largest => "Houses of the most populated block",
            MenuItem::Oldest => "Oldest houses",
            MenuItem::HighRise => "High-rise share of a block",
            MenuItem::MultiEntrance => "Blocks with multi-entrance houses",
            MenuItem::Play => "Random overlap game",
        }
    }
}

/// Run one menu item against the dataset.
///
/// `target` is the house code for `Address` or the block code for
/// `HighRise`; when absent one is drawn from `source`.
pub fn report(
    item: MenuItem,
    dataset: &Dataset,
    options: &QueryOptions,
    target: Option<&str>,
    source: &mut dyn IndexSource,
) -> anyhow::Result<ReportTable> {
    let query = CityQuery::new(dataset);
    debug!(command = item.command(), "running query");

    let table = match item {
        MenuItem::Blocks => ReportTable::from_blocks(item.label(), query.blocks()),
        MenuItem::FullInfo => ReportTable::from_block_houses(item.label(), &query.full_info()),
        MenuItem::Area => ReportTable::from_scalar(
            item.label(),
            "Area (sq km)",
            format!("{:.2}", query.city_area()),
        ),
        MenuItem::AreaPerPerson => ReportTable::from_scalar(
            item.label(),
            "Inhabitants per sq km",
            format!("{:.2}", query.area_per_inhabitant()?),
        ),
        MenuItem::ByType => {
            ReportTable::from_groups(item.label(), "Project type", &query.houses_by_type())
        }
        MenuItem::ByFloors => ReportTable::from_groups(
            item.label(),
            "Floors",
            &query.houses_by_floors(&options.floor_targets),
        ),
        MenuItem::Recent => ReportTable::from_houses(
            &format!("Houses built after {}", options.recent_year),
            &query.recent_houses(options.recent_year),
        ),
        MenuItem::Happy => ReportTable::from_houses(
            &format!("Houses with \"{}\" in their code", options.digit),
            &query.houses_matching(&options.digit),
        ),
        MenuItem::Types => ReportTable::from_types(
            &format!("Project types with {} or more floors", options.min_floors),
            &query.types_at_or_above(options.min_floors),
        ),
        MenuItem::Address => {
            let code = match target {
                Some(code) => code.to_string(),
                None => pick_code(dataset.houses().iter().map(|h| &h.code), source)
                    .context("no houses to pick from")?,
            };
            ReportTable::from_address(&code, &query.administration_address(&code))
        }
        MenuItem::Largest => {
            let title = match query.largest_block() {
                Some(block) => format!("Houses of the most populated block ({})", block.name),
                None => item.label().to_string(),
            };
            ReportTable::from_houses(&title, &query.largest_block_houses())
        }
        MenuItem::Oldest => ReportTable::from_houses(
            &format!("Top {} oldest houses", options.top_n),
            &query.oldest_houses(options.top_n),
        ),
        MenuItem::HighRise => {
            let code = match target {
                Some(code) => code.to_string(),
                None => pick_code(dataset.blocks().iter().map(|b| &b.code), source)
                    .context("no blocks to pick from")?,
            };
            ReportTable::from_percent(&code, query.percent_high_rise(&code, options.percent_base)?)
        }
        MenuItem::MultiEntrance => ReportTable::from_blocks(
            item.label(),
            query.blocks_with_multi_entrance_houses(),
        ),
        MenuItem::Play => ReportTable::from_overlap(query.random_overlap_block(source)),
    };

    Ok(table)
}

/// Pick one code at random.
fn pick_code<'c>(
    codes: impl Iterator<Item = &'c String>,
    source: &mut dyn IndexSource,
) -> Option<String> {
    let codes: Vec<&String> = codes.collect();
    if codes.is_empty() {
        return None;
    }
    Some(codes[source.pick_index(codes.len())].clone())
}

/// Run every menu item in order.
///
/// A failing item is reported as an error table in its slot and the
/// remaining items still run.
pub fn report_all(
    dataset: &Dataset,
    options: &QueryOptions,
    source: &mut dyn IndexSource,
) -> Vec<ReportTable> {
    MenuItem::all()
        .into_iter()
        .map(|item| {
            report(item, dataset, options, None, source).unwrap_or_else(|e| {
                warn!(command = item.command(), error = %e, "query failed");
                ReportTable::from_error(item.label(), &format!("{e:#}"))
            })
        })
        .collect()
}

/// Menu text listing every item.
pub fn menu_text() -> String {
    let mut text = String::from("City blocks and houses\n");
    for (i, item) in MenuItem::all().iter().enumerate() {
        text.push_str(&format!("{:>3}. {}\n", i + 1, item.label()));
    }
    text
}

/// Interactive menu: read choices until a line is not a number.
///
/// Numbers outside the menu are ignored. Query errors are reported and
/// the menu keeps going.
pub fn run_menu<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    dataset: &Dataset,
    options: &QueryOptions,
    format: OutputFormat,
    source: &mut dyn IndexSource,
) -> anyhow::Result<()> {
    write!(output, "{}", menu_text())?;
    write!(output, "\nEnter your choice: ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let Ok(choice) = line.trim().parse::<usize>() else {
            info!(input = %line.trim(), "leaving menu");
            break;
        };

        if let Some(item) = MenuItem::from_choice(choice) {
            match report(item, dataset, options, None, source) {
                Ok(table) => writeln!(output, "{}", render_tables(&[table], format)?)?,
                Err(e) => writeln!(output, "Error: {e}")?,
            }
        }

        write!(output, "\nEnter your choice: ")?;
        output.flush()?;
    }

    Ok(())
}
