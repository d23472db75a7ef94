//! SQL pipeline assembly
//!
//! Builds the single `CREATE TABLE` statement for each build path:
//!
//! - **release**: read the pre-processed artifact, keep the requested
//!   continents, order
//! - **source**: read one raw file per continent (tagged with its region),
//!   run the [`clean`] stages, [`pivot`] to long format, order
//!
//! Raw files carry every output column except `area_role`, `continent` and
//! `geometry`, plus the three role columns (`project_area`,
//! `accounting_region`, `reference_region`) as WKB. `filename` is the
//! boundary file a record was digitized from and is read from the raw file
//! as is; the region comes from the parquet file's own name instead.

pub mod clean;
pub mod pivot;

use crate::engine::{sql_in_list, sql_literal, TABLE_NAME};
use fcb_common::types::{Continent, OUTPUT_COLUMNS, SORT_COLUMNS};
use fcb_common::{FcbError, Result};

/// One raw file and the region its rows belong to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub continent: Continent,
    pub location: String,
}

impl SourceInput {
    /// Derive the region from the file name (`.../<continent>.parquet`)
    pub fn from_location(location: impl Into<String>) -> Result<Self> {
        let location = location.into();
        let file_name = location.rsplit(['/', '\\']).next().unwrap_or(&location);
        let stem = file_name.strip_suffix(".parquet").ok_or_else(|| {
            FcbError::invalid_argument(format!("'{}' is not a parquet file", location))
        })?;
        let continent = stem.parse()?;

        Ok(Self {
            continent,
            location,
        })
    }
}

fn order_by() -> String {
    SORT_COLUMNS.join(", ")
}

/// `CREATE TABLE` for the release path
pub fn release_table_sql(location: &str, continents: &[Continent]) -> String {
    let names: Vec<String> = continents.iter().map(|c| c.as_str().to_string()).collect();
    format!(
        "CREATE TABLE {TABLE_NAME} AS SELECT {columns} FROM read_parquet({location}) \
         WHERE continent IN {names} ORDER BY {order}",
        columns = OUTPUT_COLUMNS.join(", "),
        location = sql_literal(location),
        names = sql_in_list(&names),
        order = order_by(),
    )
}

/// Raw rows from every input, each tagged with its region
fn raw_query(inputs: &[SourceInput]) -> String {
    inputs
        .iter()
        .map(|input| {
            format!(
                "SELECT *, {} AS continent FROM read_parquet({})",
                sql_literal(input.continent.as_str()),
                sql_literal(&input.location)
            )
        })
        .collect::<Vec<_>>()
        .join(" UNION ALL BY NAME ")
}

/// `CREATE TABLE` for the source path
pub fn source_table_sql(inputs: &[SourceInput]) -> String {
    let stages = clean::stages("raw");
    let last = stages.last().map(|s| s.name).unwrap_or("raw");

    let mut ctes = vec![format!("raw AS ({})", raw_query(inputs))];
    ctes.extend(stages.iter().map(|s| format!("{} AS ({})", s.name, s.query)));
    ctes.push(format!("pivoted AS ({})", pivot::query(last)));

    format!(
        "CREATE TABLE {TABLE_NAME} AS WITH {} SELECT * FROM pivoted ORDER BY {}",
        ctes.join(", "),
        order_by()
    )
}
