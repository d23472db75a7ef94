//! Common types used across FCB

use crate::error::{FcbError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Columns of the output table, in table order.
pub const OUTPUT_COLUMNS: [&str; 16] = [
    "id",
    "project_name",
    "area_role",
    "registry_name",
    "methodology",
    "project_type",
    "continent",
    "country",
    "project_developer",
    "project_start_date",
    "project_end_date",
    "entry_date",
    "processing_approach",
    "pd_declined",
    "filename",
    "geometry",
];

/// Output ordering contract: ascending by these columns.
pub const SORT_COLUMNS: [&str; 3] = ["continent", "country", "id"];

// ============================================================================
// Continent
// ============================================================================

/// Region identifier; one source parquet file exists per continent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    Oceania,
    SouthAmerica,
}

impl Continent {
    pub const ALL: [Continent; 6] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::Oceania,
        Continent::SouthAmerica,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Continent::Africa => "africa",
            Continent::Asia => "asia",
            Continent::Europe => "europe",
            Continent::NorthAmerica => "north_america",
            Continent::Oceania => "oceania",
            Continent::SouthAmerica => "south_america",
        }
    }

    /// Name of the raw source file for this continent
    pub fn source_file_name(self) -> String {
        format!("{}.parquet", self.as_str())
    }
}

impl FromStr for Continent {
    type Err = FcbError;

    fn from_str(s: &str) -> Result<Self> {
        Continent::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                FcbError::invalid_argument(format!(
                    "unknown continent '{}', expected one of: {}",
                    s,
                    Continent::ALL.map(Continent::as_str).join(", ")
                ))
            })
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a list of region identifiers, failing on the first unknown one.
///
/// An empty list is rejected; callers that want "everything" pass
/// [`Continent::ALL`] explicitly.
pub fn parse_continents<S: AsRef<str>>(names: &[S]) -> Result<Vec<Continent>> {
    if names.is_empty() {
        return Err(FcbError::invalid_argument(
            "at least one continent is required",
        ));
    }
    names.iter().map(|n| n.as_ref().parse()).collect()
}

// ============================================================================
// Area role
// ============================================================================

/// Which boundary a geometry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaRole {
    /// Implementation area
    Project,
    /// Credit-accounting area
    Accounting,
    /// Baseline-reference area
    Reference,
}

impl AreaRole {
    pub const ALL: [AreaRole; 3] = [AreaRole::Project, AreaRole::Accounting, AreaRole::Reference];

    /// Value written to the `area_role` column
    pub fn label(self) -> &'static str {
        match self {
            AreaRole::Project => "project",
            AreaRole::Accounting => "accounting",
            AreaRole::Reference => "reference",
        }
    }

    /// Geometry column in the raw (wide) source files
    pub fn source_column(self) -> &'static str {
        match self {
            AreaRole::Project => "project_area",
            AreaRole::Accounting => "accounting_region",
            AreaRole::Reference => "reference_region",
        }
    }
}

impl FromStr for AreaRole {
    type Err = FcbError;

    fn from_str(s: &str) -> Result<Self> {
        AreaRole::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| FcbError::invalid_argument(format!("unknown area role '{}'", s)))
    }
}

impl fmt::Display for AreaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Build source
// ============================================================================

/// Where a database build takes its data from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSource {
    /// The pre-processed release artifact
    #[default]
    Release,
    /// Raw per-continent files, cleaned and pivoted locally
    Source,
}

impl FromStr for BuildSource {
    type Err = FcbError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "release" => Ok(BuildSource::Release),
            "source" => Ok(BuildSource::Source),
            other => Err(FcbError::invalid_argument(format!(
                "unknown build source '{}', expected 'release' or 'source'",
                other
            ))),
        }
    }
}

impl fmt::Display for BuildSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildSource::Release => f.write_str("release"),
            BuildSource::Source => f.write_str("source"),
        }
    }
}

// ============================================================================
// Project record
// ============================================================================

/// One row of the output table.
///
/// Every record carries exactly one geometry role; a project with a project
/// area and an accounting region appears as two records sharing `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Registry-prefixed project code (e.g. "VCS1234")
    pub id: String,
    pub project_name: Option<String>,
    pub area_role: AreaRole,
    pub registry_name: Option<String>,
    pub methodology: Option<String>,
    pub project_type: Option<String>,
    pub continent: Continent,
    pub country: Option<String>,
    pub project_developer: Option<String>,
    pub project_start_date: Option<NaiveDate>,
    pub project_end_date: Option<NaiveDate>,
    pub entry_date: Option<NaiveDate>,
    pub processing_approach: Option<String>,
    pub pd_declined: Option<bool>,
    pub filename: Option<String>,
    /// 2-D, valid, non-empty geometry as WKB
    #[serde(skip)]
    pub geometry: Vec<u8>,
}

impl ProjectRecord {
    /// Sort key matching the table ordering contract
    pub fn sort_key(&self) -> (Continent, Option<&str>, &str) {
        (self.continent, self.country.as_deref(), self.id.as_str())
    }
}
