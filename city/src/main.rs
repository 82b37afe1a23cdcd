//! # city
//!
//! A console demonstration of relational-style queries over a city's
//! housing blocks and houses.
//!
//! ## Overview
//!
//! city is built on top of citylib. Each query of the library is exposed
//! as a subcommand; `all` (the default) runs every query in menu order,
//! and `menu` offers the numbered interactive menu.
//!
//! ## Usage
//!
//! ```bash
//! # Run every query against the reference city
//! city
//!
//! # One query, as JSON
//! city address 70/1 --output json
//!
//! # High-rise share with an explicit denominator policy
//! city high-rise W186 --base block-houses
//!
//! # Load another dataset and query options
//! city --data my-city.toml --config queries.toml oldest --top 3
//!
//! # Interactive menu
//! city menu
//! ```

mod commands;
mod logging;
mod render;

use std::process::ExitCode;
use std::str::FromStr;

use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use citylib::{seed, Dataset, PercentBase, QueryOptions};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, info};

use commands::MenuItem;
use render::{render_tables, OutputFormat};

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{}': {}", s, e))
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("city")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Grouping, joining and aggregation over a city's blocks and houses")
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .global(true)
                .help("Load the dataset from a TOML file instead of the reference city"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .global(true)
                .help("Load query options from a TOML file"),
        )
        .arg(
            Arg::new("date")
                .long("date")
                .global(true)
                .value_parser(parse_date)
                .help("Reference date for the reference city (YYYY-MM-DD, defaults to today)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Show debug logging"),
        )
        .subcommand(Command::new("all").about("Run every query in menu order (default command)"))
        .subcommand(Command::new("menu").about("Interactive numbered menu"))
        .subcommand(Command::new("blocks").about("List all blocks"))
        .subcommand(Command::new("full-info").about("Houses of every block"))
        .subcommand(Command::new("area").about("Total city area"))
        .subcommand(Command::new("area-per-person").about("Inhabitants per square km"))
        .subcommand(Command::new("by-type").about("Houses grouped by project type"))
        .subcommand(
            Command::new("by-floors")
                .about("Houses grouped by floor count")
                .arg(
                    Arg::new("floors")
                        .short('f')
                        .long("floors")
                        .value_delimiter(',')
                        .value_parser(value_parser!(u32))
                        .help("Floor counts to keep (comma-separated)"),
                ),
        )
        .subcommand(
            Command::new("recent")
                .about("Houses built after a year")
                .arg(
                    Arg::new("year")
                        .short('y')
                        .long("year")
                        .value_parser(value_parser!(i32))
                        .help("Cutoff year (exclusive)"),
                ),
        )
        .subcommand(
            Command::new("happy")
                .about("Houses whose code contains a digit")
                .arg(
                    Arg::new("digit")
                        .long("digit")
                        .help("Substring to look for in house codes"),
                ),
        )
        .subcommand(
            Command::new("types")
                .about("Distinct project types at or above a floor count")
                .arg(
                    Arg::new("min-floors")
                        .long("min-floors")
                        .value_parser(value_parser!(u32))
                        .help("Minimum floor count"),
                ),
        )
        .subcommand(
            Command::new("address")
                .about("Administration address of a house")
                .arg(
                    Arg::new("target")
                        .value_name("HOUSE")
                        .help("House code (a random house when omitted)"),
                ),
        )
        .subcommand(Command::new("largest").about("Houses of the most populated block"))
        .subcommand(
            Command::new("oldest").about("Oldest houses").arg(
                Arg::new("top")
                    .short('n')
                    .long("top")
                    .value_parser(value_parser!(usize))
                    .help("How many houses to list"),
            ),
        )
        .subcommand(
            Command::new("high-rise")
                .about("High-rise share of a block")
                .arg(
                    Arg::new("target")
                        .value_name("BLOCK")
                        .help("Block code (a random block when omitted)"),
                )
                .arg(
                    Arg::new("base")
                        .long("base")
                        .value_parser(["all-linked", "block-groups", "block-houses"])
                        .help("Denominator of the percentage"),
                ),
        )
        .subcommand(Command::new("multi-entrance").about("Blocks with multi-entrance houses"))
        .subcommand(Command::new("play").about("Random overlap game"))
}

/// Look up an optional argument that may not exist on this subcommand.
fn optional<T: Clone + Send + Sync + 'static>(matches: &ArgMatches, id: &str) -> Option<T> {
    matches.try_get_one::<T>(id).ok().flatten().cloned()
}

/// Matches carrying the global arguments (the subcommand's, if any).
fn global_matches(matches: &ArgMatches) -> &ArgMatches {
    matches.subcommand().map(|(_, m)| m).unwrap_or(matches)
}

fn load_dataset(matches: &ArgMatches) -> anyhow::Result<Dataset> {
    if let Some(path) = matches.get_one::<String>("data") {
        info!(path = %path, "loading dataset file");
        return seed::from_file(path).with_context(|| format!("loading dataset from {}", path));
    }

    let today = matches
        .get_one::<NaiveDate>("date")
        .copied()
        .unwrap_or_else(|| Local::now().date_naive());
    debug!(%today, "seeding reference city");
    Ok(seed::reference(today)?)
}

fn load_options(matches: &ArgMatches) -> anyhow::Result<QueryOptions> {
    match matches.get_one::<String>("config") {
        Some(path) => QueryOptions::from_file(path)
            .with_context(|| format!("loading query options from {}", path)),
        None => Ok(QueryOptions::default()),
    }
}

/// Apply subcommand flags on top of the loaded options
fn apply_overrides(mut options: QueryOptions, matches: &ArgMatches) -> anyhow::Result<QueryOptions> {
    if let Ok(Some(floors)) = matches.try_get_many::<u32>("floors") {
        options = options.floor_targets(floors.copied().collect());
    }
    if let Some(year) = optional::<i32>(matches, "year") {
        options = options.recent_year(year);
    }
    if let Some(digit) = optional::<String>(matches, "digit") {
        options = options.digit(digit);
    }
    if let Some(floors) = optional::<u32>(matches, "min-floors") {
        options = options.min_floors(floors);
    }
    if let Some(top) = optional::<usize>(matches, "top") {
        options = options.top_n(top);
    }
    if let Some(base) = optional::<String>(matches, "base") {
        options = options.percent_base(PercentBase::from_str(&base)?);
    }
    Ok(options)
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let globals = global_matches(matches);
    let format = globals
        .get_one::<String>("output")
        .map(|s| OutputFormat::from_str(s))
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?
        .unwrap_or_default();

    let dataset = load_dataset(globals)?;
    let options = load_options(globals)?;
    let mut rng = rand::rng();

    match matches.subcommand() {
        None | Some(("all", _)) => {
            let tables = commands::report_all(&dataset, &options, &mut rng);
            render_tables(&tables, format)
        }
        Some(("menu", _)) => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            commands::run_menu(
                stdin.lock(),
                &mut stdout,
                &dataset,
                &options,
                format,
                &mut rng,
            )?;
            Ok(String::new())
        }
        Some((name, sub)) => {
            let item = MenuItem::from_command(name)
                .ok_or_else(|| anyhow::anyhow!("unknown command: {}", name))?;
            let options = apply_overrides(options, sub)?;
            let target = optional::<String>(sub, "target");
            let table = commands::report(item, &dataset, &options, target.as_deref(), &mut rng)?;
            render_tables(&[table], format)
        }
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    logging::init_logger(global_matches(&matches).get_flag("verbose"));

    match run(&matches) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
