//! Output layer: subset export and chart rendering.
//!
//! Both outputs for one run share a file stem derived from the filter
//! criteria; the subset writer appends `.csv`, the chart renderer `.png`.

pub mod chart;
pub mod subset;

use crate::data::filter::FilterCriteria;

/// File stem shared by the subset CSV and the chart PNG: the three criteria
/// lower-cased, whitespace runs replaced by hyphens, joined by underscores.
///
/// `("Nova Scotia", "all ages", "Both sexes")` → `nova-scotia_all-ages_both-sexes`.
pub fn output_stem(criteria: &FilterCriteria) -> String {
    [&criteria.location, &criteria.age, &criteria.sex]
        .iter()
        .map(|part| {
            part.to_lowercase()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect::<Vec<_>>()
        .join("_")
}
