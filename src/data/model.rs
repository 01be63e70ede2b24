use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

/// Column names the aggregator depends on, as they appear in the
/// Statistics Canada export (table 13100768).
pub const COL_GEO: &str = "GEO";
pub const COL_REF_DATE: &str = "REF_DATE";
pub const COL_AGE: &str = "Age at time of death";
pub const COL_SEX: &str = "Sex";
pub const COL_VALUE: &str = "VALUE";

/// Shape faults detected while building the table.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
    #[error("row {row}: expected {expected} fields, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// ColumnIndex – where the required columns live in the header
// ---------------------------------------------------------------------------

/// Positions of the required columns within the header row.
/// Built once per file; a missing column fails the whole load.
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndex {
    pub geo: usize,
    pub ref_date: usize,
    pub age: usize,
    pub sex: usize,
    pub value: usize,
}

impl ColumnIndex {
    pub fn from_headers(headers: &[String]) -> Result<Self, SchemaError> {
        let position = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(SchemaError::MissingColumn(name))
        };
        Ok(ColumnIndex {
            geo: position(COL_GEO)?,
            ref_date: position(COL_REF_DATE)?,
            age: position(COL_AGE)?,
            sex: position(COL_SEX)?,
            value: position(COL_VALUE)?,
        })
    }
}

// ---------------------------------------------------------------------------
// MortalityRow – one row of the export
// ---------------------------------------------------------------------------

/// A single input row.
///
/// Date and count stay as text here; they are parsed only once a row matches
/// a filter, so a malformed value in a row nobody asked for never faults.
#[derive(Debug, Clone)]
pub struct MortalityRow {
    /// Geography, free text: region name, a comma, then sub-detail.
    pub geo: String,
    /// Reference date, ISO `YYYY-MM-DD`.
    pub ref_date: String,
    /// Age-at-death bucket, free text.
    pub age: String,
    /// Sex category label.
    pub sex: String,
    /// Death count as text; the empty string means zero.
    pub value: String,
    /// Every field in file order, verbatim, for subset export.
    pub raw: Vec<String>,
}

impl MortalityRow {
    pub fn from_record(columns: &ColumnIndex, record: &csv::StringRecord) -> Self {
        let field = |idx: usize| record.get(idx).unwrap_or_default().to_string();
        MortalityRow {
            geo: field(columns.geo),
            ref_date: field(columns.ref_date),
            age: field(columns.age),
            sex: field(columns.sex),
            value: field(columns.value),
            raw: record.iter().map(str::to_string).collect(),
        }
    }

    /// Region name: the geography text before its first comma.
    /// `None` when the geography carries no sub-detail.
    pub fn region(&self) -> Option<&str> {
        self.geo.split_once(',').map(|(region, _)| region)
    }

    pub fn date(&self) -> chrono::format::ParseResult<NaiveDate> {
        NaiveDate::parse_from_str(&self.ref_date, "%Y-%m-%d")
    }

    /// Death count; an empty field counts as zero.
    pub fn count(&self) -> Result<i64, std::num::ParseIntError> {
        if self.value.is_empty() {
            return Ok(0);
        }
        self.value.parse()
    }
}

// ---------------------------------------------------------------------------
// MortalityTable – the complete parsed file
// ---------------------------------------------------------------------------

/// The full parsed table: header row in file order plus every data row.
#[derive(Debug, Clone)]
pub struct MortalityTable {
    pub headers: Vec<String>,
    pub rows: Vec<MortalityRow>,
}

impl MortalityTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Series – what the chart draws
// ---------------------------------------------------------------------------

/// Paired (date, count) sequences driving the chart.
/// The two vectors always have equal length.
#[derive(Debug, Clone, Default)]
pub struct Series {
    pub dates: Vec<NaiveDate>,
    pub counts: Vec<i64>,
}

impl Series {
    pub fn push(&mut self, date: NaiveDate, count: i64) {
        self.dates.push(date);
        self.counts.push(count);
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}
