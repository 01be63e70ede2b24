//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// Canonical source of the input table, printed before each run. The file is
/// never fetched automatically.
pub const DATA_SOURCE: &str = concat!(
    "https://www150.statcan.gc.ca/t1/tbl1/en/tv.action",
    "?pid=1310076801",
    "&pickMembers%5B0%5D=3.1",
    "&cubeTimeFrame.startDaily=2020-01-04",
    "&cubeTimeFrame.endDaily=2022-02-05",
    "&referencePeriods=20200104%2C20220205",
);

/// Chart all-cause death counts from a Statistics Canada CSV export
#[derive(Parser, Debug)]
#[command(name = "mortality-plot")]
#[command(version)]
pub struct Cli {
    /// CSV export of StatCan table 13100768
    #[arg(default_value = "13100768.csv")]
    pub filename: PathBuf,

    /// Region to chart, or `all` to chart every region in the file
    #[arg(default_value = "all")]
    pub location: String,

    /// Age-at-death bucket, matched as a suffix of the age column
    #[arg(default_value = "all ages")]
    pub age: String,

    /// Sex category, matched exactly
    #[arg(default_value = "Both sexes")]
    pub sex: String,

    /// Also save the matching rows as `{location}_{age}_{sex}.csv`
    #[arg(default_value_t = false, action = clap::ArgAction::Set)]
    pub save_subset: bool,
}
