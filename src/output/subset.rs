use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::data::model::MortalityTable;

/// Write the header plus the selected rows, verbatim, as a new CSV.
/// An existing file of the same name is overwritten.
pub fn write_subset(path: &Path, table: &MortalityTable, indices: &[usize]) -> Result<()> {
    debug!("storing {} rows as {}", indices.len(), path.display());
    let file =
        std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_subset_to(file, table, indices).with_context(|| format!("writing {}", path.display()))
}

fn write_subset_to<W: io::Write>(out: W, table: &MortalityTable, indices: &[usize]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(&table.headers)
        .context("writing header row")?;
    for &i in indices {
        writer
            .write_record(&table.rows[i].raw)
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing subset")?;
    Ok(())
}
