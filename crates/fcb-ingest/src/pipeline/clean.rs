//! Geometry cleaning stages
//!
//! Each role column goes through three `SELECT * REPLACE (...)` stages:
//!
//! 1. `forced`: decode WKB and drop any Z/M coordinate
//! 2. `extracted`: keep point parts of point-like values (dimension 0) and
//!    polygon parts of everything else
//! 3. `repaired`: make polygons valid and extract polygons again, since repair
//!    can emit lower-dimensional leftovers
//!
//! Repair runs last because forcing 2-D can create self-intersections a 3-D
//! ring did not have. Dates are parsed in the first stage; unparsable strings
//! become NULL.

use fcb_common::types::AreaRole;

/// Format of the date strings in the raw files.
pub const SOURCE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Raw string date columns converted to `DATE`.
pub const DATE_COLUMNS: [&str; 3] = ["project_start_date", "project_end_date", "entry_date"];

/// Geometry type names kept for point-like values.
pub const POINT_TYPES: &str = "'POINT', 'MULTIPOINT'";

/// Geometry type names kept for everything else.
pub const POLYGON_TYPES: &str = "'POLYGON', 'MULTIPOLYGON'";

/// A cleaning stage: its CTE name and the query it runs over `input`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub name: &'static str,
    pub query: String,
}

fn replace_stage(name: &'static str, input: &str, replacements: Vec<String>) -> Stage {
    Stage {
        name,
        query: format!(
            "SELECT * REPLACE ({}) FROM {}",
            replacements.join(", "),
            input
        ),
    }
}

fn forced_expr(column: &str) -> String {
    format!("ST_Force2D(ST_GeomFromWKB({column})) AS {column}")
}

fn date_expr(column: &str) -> String {
    format!("try_strptime({column}, '{SOURCE_DATE_FORMAT}')::DATE AS {column}")
}

fn extracted_expr(column: &str) -> String {
    format!(
        "CASE WHEN ST_Dimension({column}) = 0 \
         THEN ST_CollectionExtract({column}, 1) \
         ELSE ST_CollectionExtract({column}, 3) END AS {column}"
    )
}

fn repaired_expr(column: &str) -> String {
    format!(
        "CASE WHEN ST_GeometryType({column}) IN ({POINT_TYPES}) THEN {column} \
         WHEN ST_GeometryType({column}) IN ({POLYGON_TYPES}) \
         THEN ST_CollectionExtract(ST_MakeValid({column}), 3) END AS {column}"
    )
}

fn role_columns() -> impl Iterator<Item = &'static str> {
    AreaRole::ALL.into_iter().map(AreaRole::source_column)
}

/// Build the cleaning stages reading from `input`; the last stage's name is
/// what the pivot reads from
pub fn stages(input: &str) -> Vec<Stage> {
    let forced = replace_stage(
        "forced",
        input,
        role_columns()
            .map(forced_expr)
            .chain(DATE_COLUMNS.into_iter().map(date_expr))
            .collect(),
    );
    let extracted = replace_stage("extracted", forced.name, role_columns().map(extracted_expr).collect());
    let repaired = replace_stage("repaired", extracted.name, role_columns().map(repaired_expr).collect());

    vec![forced, extracted, repaired]
}
