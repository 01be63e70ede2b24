use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};

use super::model::{ColumnIndex, MortalityRow, MortalityTable, SchemaError};

/// Byte-order marker some StatCan exports carry in front of the header.
const BOM: char = '\u{feff}';

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a mortality table from a CSV export.
///
/// The file may or may not start with a UTF-8 byte-order marker; when present
/// it is skipped, otherwise the text is parsed from its true start so no data
/// is lost.
pub fn load_file(path: &Path) -> Result<MortalityTable> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_csv(&text).with_context(|| format!("parsing {}", path.display()))
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse CSV text into a header row plus typed data rows.
///
/// The reader runs in flexible mode so that row width is checked here, once,
/// against the header: a row with the wrong field count fails fast with its
/// row number instead of silently mapping fewer fields.
fn parse_csv(text: &str) -> Result<MortalityTable> {
    let text = match text.strip_prefix(BOM) {
        Some(rest) => {
            info!("skipping byte-order marker (BOM)");
            rest
        }
        None => text,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();
    debug!("headers: {headers:?}");

    let columns = ColumnIndex::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            return Err(SchemaError::RowWidth {
                row: row_no,
                expected: headers.len(),
                found: record.len(),
            }
            .into());
        }
        rows.push(MortalityRow::from_record(&columns, &record));
    }

    if let Some(first) = rows.first() {
        debug!("sample row: {:?}", first.raw);
    }
    debug!("{} data rows", rows.len());

    Ok(MortalityTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
REF_DATE,GEO,Age at time of death,Sex,VALUE
2020-01-04,\"Canada, place of occurrence\",\"Age at time of death, all ages\",Both sexes,1500
2020-01-11,\"Canada, place of occurrence\",\"Age at time of death, all ages\",Both sexes,
";

    #[test]
    fn parses_header_and_rows() {
        let table = parse_csv(SAMPLE).unwrap();
        assert_eq!(table.headers[0], "REF_DATE");
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].geo, "Canada, place of occurrence");
        assert_eq!(table.rows[0].value, "1500");
        assert_eq!(table.rows[1].value, "");
    }

    #[test]
    fn bom_and_plain_inputs_parse_identically() {
        let with_bom = format!("\u{feff}{SAMPLE}");
        let plain = parse_csv(SAMPLE).unwrap();
        let marked = parse_csv(&with_bom).unwrap();
        assert_eq!(plain.headers, marked.headers);
        assert_eq!(plain.len(), marked.len());
        assert_eq!(plain.rows[0].raw, marked.rows[0].raw);
    }

    #[test]
    fn input_without_bom_keeps_first_header() {
        // The first header must not lose its leading character.
        let table = parse_csv(SAMPLE).unwrap();
        assert_eq!(table.headers.first().map(String::as_str), Some("REF_DATE"));
    }

    #[test]
    fn missing_required_column_fails() {
        let text = "REF_DATE,GEO,Sex,VALUE\n2020-01-04,\"Canada, x\",Both sexes,1\n";
        let err = parse_csv(text).unwrap_err();
        assert!(err.to_string().contains("Age at time of death"));
    }

    #[test]
    fn short_row_fails_with_row_number() {
        let text = "\
REF_DATE,GEO,Age at time of death,Sex,VALUE
2020-01-04,\"Canada, x\",\"Age at time of death, all ages\",Both sexes,1
2020-01-11,\"Canada, x\",Both sexes
";
        let err = parse_csv(text).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("row 1"), "unexpected error: {msg}");
    }
}
