//! Shared fixtures for fcb-ingest integration tests
//!
//! Release fixtures are plain parquet files written by DuckDB itself, so the
//! release build path can be exercised without network access. Source
//! fixtures need the spatial extension to encode geometries.

#![allow(dead_code)]

use anyhow::{Context, Result};
use duckdb::Connection;
use fcb_ingest::IngestConfig;
use std::path::{Path, PathBuf};

/// WKB for `POINT (1 2)`.
pub const POINT_WKB_HEX: &str = "0101000000000000000000F03F0000000000000040";

/// `(id, area_role, continent, country)`; deliberately out of table order
pub const RELEASE_ROWS: &[(&str, &str, &str, &str)] = &[
    ("EU-2", "project", "europe", "Norway"),
    ("SA-1", "project", "south_america", "Brazil"),
    ("EU-1", "accounting", "europe", "France"),
    ("AS-1", "project", "asia", "Indonesia"),
    ("EU-1", "project", "europe", "France"),
    ("OC-1", "project", "oceania", "Australia"),
    ("AF-1", "reference", "africa", "Kenya"),
    ("NA-1", "project", "north_america", "Canada"),
];

/// Rows in the release fixture for the given continents
pub fn release_rows_in(continents: &[&str]) -> usize {
    RELEASE_ROWS
        .iter()
        .filter(|(_, _, continent, _)| continents.contains(continent))
        .count()
}

fn release_values() -> String {
    RELEASE_ROWS
        .iter()
        .map(|(id, role, continent, country)| {
            format!(
                "('{id}', '{id} forest', '{role}', 'Verra', 'VM0007', 'REDD+', '{continent}', \
                 '{country}', 'Developer', DATE '2020-01-01', DATE '2050-12-31', \
                 DATE '2021-03-15', 'digitized', false, '{id}.kml', unhex('{POINT_WKB_HEX}'))"
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Write the release artifact under `releases/<tail>` and return its path
fn write_release_at(releases: &Path, tail: &str) -> Result<PathBuf> {
    let path = releases.join(tail).join("forest_carbon_boundaries.parquet");
    std::fs::create_dir_all(path.parent().context("artifact has no parent")?)?;

    let conn = Connection::open_in_memory()?;
    conn.execute_batch(&format!(
        "CREATE TABLE fixture AS SELECT * FROM (VALUES {}) t(id, project_name, area_role, \
         registry_name, methodology, project_type, continent, country, project_developer, \
         project_start_date, project_end_date, entry_date, processing_approach, pd_declined, \
         filename, geometry); \
         COPY fixture TO '{}' (FORMAT parquet);",
        release_values(),
        path.display()
    ))?;

    Ok(path)
}

/// Latest release artifact under `releases`
pub fn write_latest_release(releases: &Path) -> Result<PathBuf> {
    write_release_at(releases, "latest/download")
}

/// Tagged release artifact under `releases`
pub fn write_tagged_release(releases: &Path, tag: &str) -> Result<PathBuf> {
    write_release_at(releases, &format!("download/{}", tag))
}

/// Raw europe file with one row per geometry edge case:
///
/// - `EU-1`: three valid polygons, so three output rows
/// - `EU-2`: all three geometries NULL, so no rows
/// - `EU-3`: a 3-D point, an empty polygon and NULL, so one 2-D point row
pub fn write_source_europe(source_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(source_dir)?;
    let path = source_dir.join("europe.parquet");

    let conn = Connection::open_in_memory()?;
    conn.execute_batch(&format!(
        "INSTALL spatial; LOAD spatial;
         CREATE TABLE raw AS SELECT
             id, id || ' forest' AS project_name, 'Verra' AS registry_name,
             'VM0007' AS methodology, 'REDD+' AS project_type, country,
             'Developer' AS project_developer, start_date AS project_start_date,
             '12/31/2050' AS project_end_date, '03/15/2021' AS entry_date,
             'digitized' AS processing_approach, false AS pd_declined, id || '.kml' AS filename,
             ST_AsWKB(ST_GeomFromText(project)) AS project_area,
             ST_AsWKB(ST_GeomFromText(accounting)) AS accounting_region,
             ST_AsWKB(ST_GeomFromText(reference)) AS reference_region
         FROM (VALUES
             ('EU-1', 'France', '01/15/2020',
              'POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))',
              'POLYGON ((0 0, 2 0, 2 2, 0 2, 0 0))',
              'POLYGON ((0 0, 3 0, 3 3, 0 3, 0 0))'),
             ('EU-2', 'Norway', 'not a date', NULL, NULL, NULL),
             ('EU-3', 'Spain', '06/01/2019', 'POINT Z (1 2 3)', 'POLYGON EMPTY', NULL)
         ) t(id, country, start_date, project, accounting, reference);
         COPY raw TO '{}' (FORMAT parquet);",
        path.display()
    ))?;

    Ok(path)
}

/// Raw asia file with geometries that need repair:
///
/// - `AS-0`: a single project point in Cambodia
/// - `AS-1`: a self-intersecting project polygon and an accounting
///   collection mixing a point with a unit square
pub fn write_source_asia(source_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(source_dir)?;
    let path = source_dir.join("asia.parquet");

    let conn = Connection::open_in_memory()?;
    conn.execute_batch(&format!(
        "INSTALL spatial; LOAD spatial;
         CREATE TABLE raw AS SELECT
             id, id || ' forest' AS project_name, 'Gold Standard' AS registry_name,
             'AR-ACM0003' AS methodology, 'ARR' AS project_type, country,
             'Developer' AS project_developer, '01/01/2018' AS project_start_date,
             '01/01/2048' AS project_end_date, '03/15/2021' AS entry_date,
             'digitized' AS processing_approach, NULL::BOOLEAN AS pd_declined,
             id || '.kml' AS filename,
             ST_AsWKB(ST_GeomFromText(project)) AS project_area,
             ST_AsWKB(ST_GeomFromText(accounting)) AS accounting_region,
             ST_AsWKB(ST_GeomFromText(reference)) AS reference_region
         FROM (VALUES
             ('AS-1', 'Indonesia',
              'POLYGON ((0 0, 2 2, 2 0, 0 2, 0 0))',
              'GEOMETRYCOLLECTION (POINT (5 5), POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0)))',
              NULL),
             ('AS-0', 'Cambodia', 'POINT (104 12)', NULL, NULL)
         ) t(id, country, project, accounting, reference);
         COPY raw TO '{}' (FORMAT parquet);",
        path.display()
    ))?;

    Ok(path)
}

/// Raw file for `continent` written without the spatial extension; role
/// geometries are plain WKB blobs
pub fn write_source_plain(source_dir: &Path, continent: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(source_dir)?;
    let path = source_dir.join(format!("{}.parquet", continent));

    let conn = Connection::open_in_memory()?;
    conn.execute_batch(&format!(
        "COPY (SELECT 'X-1' AS id, 'Plain forest' AS project_name, 'Verra' AS registry_name,
                      'VM0007' AS methodology, 'REDD+' AS project_type, 'Nowhere' AS country,
                      'Developer' AS project_developer, '01/15/2020' AS project_start_date,
                      '12/31/2050' AS project_end_date, '03/15/2021' AS entry_date,
                      'digitized' AS processing_approach, false AS pd_declined,
                      'x1.kml' AS filename,
                      unhex('{POINT_WKB_HEX}') AS project_area,
                      NULL::BLOB AS accounting_region, NULL::BLOB AS reference_region)
         TO '{}' (FORMAT parquet);",
        path.display()
    ))?;

    Ok(path)
}

/// Config pointing every location at a temporary directory
pub fn local_config(root: &Path) -> IngestConfig {
    let mut config = IngestConfig::with_cache_dir(root.join("cache"));
    config.source_base_url = root.join("source").to_string_lossy().into_owned();
    config.release_base_url = root.join("releases").to_string_lossy().into_owned();
    config
}
