use anyhow::{Context, Result};
use log::debug;

use super::model::{MortalityRow, MortalityTable, Series};

// ---------------------------------------------------------------------------
// Filter criteria
// ---------------------------------------------------------------------------

/// Row predicates for one chart.
///
/// Matching rules follow the shape of the StatCan export:
/// * `location` is a prefix of the geography field (`"Canada"` matches
///   `"Canada, place of occurrence"`)
/// * `age` is a suffix of the age bucket (`"all ages"` matches
///   `"Age at time of death, all ages"`)
/// * `sex` must equal the sex label exactly
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub location: String,
    pub age: String,
    pub sex: String,
}

impl FilterCriteria {
    pub fn matches(&self, row: &MortalityRow) -> bool {
        row.geo.starts_with(&self.location)
            && row.age.ends_with(&self.age)
            && row.sex == self.sex
    }
}

// ---------------------------------------------------------------------------
// Single-pass filter + aggregation
// ---------------------------------------------------------------------------

/// Rows surviving the filter (as indices into the table, in input order)
/// plus the aggregated chart series.
#[derive(Debug)]
pub struct Filtered {
    pub indices: Vec<usize>,
    pub series: Series,
}

/// Scan the table once, keeping rows that match `criteria` and accumulating
/// their (date, count) pairs. Input row order is preserved; the export is
/// assumed chronological and is not re-sorted.
pub fn filter_table(table: &MortalityTable, criteria: &FilterCriteria) -> Result<Filtered> {
    let mut indices = Vec::new();
    let mut series = Series::default();

    for (i, row) in table.rows.iter().enumerate() {
        if !criteria.matches(row) {
            continue;
        }
        let date = row
            .date()
            .with_context(|| format!("row {i}: bad REF_DATE `{}`", row.ref_date))?;
        let count = row
            .count()
            .with_context(|| format!("row {i}: bad VALUE `{}`", row.value))?;
        indices.push(i);
        series.push(date, count);
    }

    debug!(
        "{} of {} rows match location `{}`",
        indices.len(),
        table.len(),
        criteria.location
    );
    Ok(Filtered { indices, series })
}

// ---------------------------------------------------------------------------
// Region discovery ("all" mode)
// ---------------------------------------------------------------------------

/// Distinct region names in first-seen order.
///
/// The region is the geography text before its first comma; a geography
/// without one is a data fault and aborts discovery.
pub fn distinct_regions(table: &MortalityTable) -> Result<Vec<String>> {
    let mut regions: Vec<String> = Vec::new();
    for (i, row) in table.rows.iter().enumerate() {
        let region = row
            .region()
            .with_context(|| format!("row {i}: GEO `{}` has no comma-separated detail", row.geo))?;
        if !regions.iter().any(|r| r == region) {
            regions.push(region.to_string());
        }
    }
    Ok(regions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ColumnIndex, MortalityRow};
    use chrono::NaiveDate;

    fn row(geo: &str, date: &str, age: &str, sex: &str, value: &str) -> MortalityRow {
        let record = csv::StringRecord::from(vec![date, geo, age, sex, value]);
        let columns = ColumnIndex {
            ref_date: 0,
            geo: 1,
            age: 2,
            sex: 3,
            value: 4,
        };
        MortalityRow::from_record(&columns, &record)
    }

    fn table(rows: Vec<MortalityRow>) -> MortalityTable {
        MortalityTable {
            headers: ["REF_DATE", "GEO", "Age at time of death", "Sex", "VALUE"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rows,
        }
    }

    fn criteria(location: &str) -> FilterCriteria {
        FilterCriteria {
            location: location.to_string(),
            age: "all ages".to_string(),
            sex: "Both sexes".to_string(),
        }
    }

    #[test]
    fn matching_rows_feed_the_series_in_input_order() {
        let t = table(vec![
            row(
                "Canada, part",
                "2020-01-04",
                "Age at time of death, all ages",
                "Both sexes",
                "1500",
            ),
            row(
                "Canada, part",
                "2020-02-04",
                "Age at time of death, all ages",
                "Both sexes",
                "",
            ),
        ]);
        let filtered = filter_table(&t, &criteria("Canada")).unwrap();
        assert_eq!(filtered.indices, vec![0, 1]);
        assert_eq!(
            filtered.series.dates,
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 4).unwrap(),
                NaiveDate::from_ymd_opt(2020, 2, 4).unwrap(),
            ]
        );
        assert_eq!(filtered.series.counts, vec![1500, 0]);
    }

    #[test]
    fn non_matching_rows_are_excluded() {
        let t = table(vec![
            row(
                "Quebec, part",
                "2020-01-04",
                "Age at time of death, all ages",
                "Both sexes",
                "700",
            ),
            row(
                "Canada, part",
                "2020-01-04",
                "Age at time of death, 0 to 44 years",
                "Both sexes",
                "200",
            ),
            row(
                "Canada, part",
                "2020-01-04",
                "Age at time of death, all ages",
                "Males",
                "800",
            ),
            row(
                "Canada, part",
                "2020-01-04",
                "Age at time of death, all ages",
                "Both sexes",
                "1500",
            ),
        ]);
        let filtered = filter_table(&t, &criteria("Canada")).unwrap();
        assert_eq!(filtered.indices, vec![3]);
        assert_eq!(filtered.series.counts, vec![1500]);
    }

    #[test]
    fn bad_value_in_matching_row_aborts() {
        let t = table(vec![row(
            "Canada, part",
            "2020-01-04",
            "Age at time of death, all ages",
            "Both sexes",
            "many",
        )]);
        let err = filter_table(&t, &criteria("Canada")).unwrap_err();
        assert!(err.to_string().contains("bad VALUE"));
    }

    #[test]
    fn bad_date_in_matching_row_aborts() {
        let t = table(vec![row(
            "Canada, part",
            "04/01/2020",
            "Age at time of death, all ages",
            "Both sexes",
            "1500",
        )]);
        let err = filter_table(&t, &criteria("Canada")).unwrap_err();
        assert!(err.to_string().contains("bad REF_DATE"));
    }

    #[test]
    fn bad_fields_in_non_matching_rows_are_ignored() {
        let t = table(vec![
            row(
                "Yukon, part",
                "not-a-date",
                "Age at time of death, all ages",
                "Both sexes",
                "many",
            ),
            row(
                "Canada, part",
                "2020-01-04",
                "Age at time of death, all ages",
                "Both sexes",
                "1500",
            ),
        ]);
        let filtered = filter_table(&t, &criteria("Canada")).unwrap();
        assert_eq!(filtered.series.counts, vec![1500]);
    }

    #[test]
    fn regions_come_out_distinct_in_first_seen_order() {
        let t = table(vec![
            row("Canada, a", "2020-01-04", "x", "Both sexes", "1"),
            row("Quebec, b", "2020-01-04", "x", "Both sexes", "2"),
            row("Canada, c", "2020-01-11", "x", "Both sexes", "3"),
            row("Nova Scotia, d", "2020-01-11", "x", "Both sexes", "4"),
        ]);
        let regions = distinct_regions(&t).unwrap();
        assert_eq!(regions, vec!["Canada", "Quebec", "Nova Scotia"]);
    }

    #[test]
    fn region_without_comma_aborts_discovery() {
        let t = table(vec![
            row("Canada, a", "2020-01-04", "x", "Both sexes", "1"),
            row("Nunavut", "2020-01-04", "x", "Both sexes", "2"),
        ]);
        let err = distinct_regions(&t).unwrap_err();
        assert!(err.to_string().contains("Nunavut"));
    }
}
