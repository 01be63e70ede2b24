use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;

use crate::cli::Cli;
use crate::data::filter::{self, FilterCriteria};
use crate::data::loader;
use crate::data::model::MortalityTable;
use crate::output::{self, chart, subset};

/// Literal location value that fans out to every region in the file.
const ALL_LOCATIONS: &str = "all";

// ---------------------------------------------------------------------------
// Run orchestration
// ---------------------------------------------------------------------------

/// Load the table once, then chart either the requested location or every
/// distinct region found in the file.
pub fn run(cli: &Cli) -> Result<()> {
    let table = loader::load_file(&cli.filename)?;

    if cli.location == ALL_LOCATIONS {
        run_all_regions(&table, cli)
    } else {
        let criteria = FilterCriteria {
            location: cli.location.clone(),
            age: cli.age.clone(),
            sex: cli.sex.clone(),
        };
        run_location(&table, &criteria, cli.save_subset)
    }
}

/// Chart every distinct region in first-seen order.
///
/// The first failing region aborts the remaining ones.
fn run_all_regions(table: &MortalityTable, cli: &Cli) -> Result<()> {
    for region in filter::distinct_regions(table)? {
        let criteria = FilterCriteria {
            location: region.clone(),
            age: cli.age.clone(),
            sex: cli.sex.clone(),
        };
        run_location(table, &criteria, cli.save_subset)?;
        debug!("done {region}");
    }
    Ok(())
}

/// Filter, optionally persist the subset, and render the chart for one
/// location.
fn run_location(table: &MortalityTable, criteria: &FilterCriteria, save_subset: bool) -> Result<()> {
    debug!("processing data for {}", criteria.location);

    let filtered = filter::filter_table(table, criteria)
        .with_context(|| format!("aggregating {}", criteria.location))?;

    let stem = output::output_stem(criteria);
    if save_subset {
        let path = PathBuf::from(format!("{stem}.csv"));
        subset::write_subset(&path, table, &filtered.indices)?;
    }
    let chart_path = PathBuf::from(format!("{stem}.png"));
    chart::render(&chart_path, &criteria.location, &filtered.series)
}
