//! Wide-to-long pivot
//!
//! Turns the three cleaned role columns into up to three rows per record,
//! each labelled with its `area_role` and carrying its geometry as WKB.

use super::clean::{POINT_TYPES, POLYGON_TYPES};
use fcb_common::types::{AreaRole, OUTPUT_COLUMNS};

/// Select list for one role, in output column order. Every other output
/// column, `filename` included, must already exist in the raw input.
fn select_list(role: AreaRole) -> String {
    OUTPUT_COLUMNS
        .iter()
        .map(|&col| match col {
            "area_role" => format!("'{}' AS area_role", role.label()),
            "geometry" => format!("ST_AsWKB({}) AS geometry", role.source_column()),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rows for one role: nothing is emitted for NULL, empty, or leftover
/// non-point/non-polygon geometries
pub fn role_query(role: AreaRole, input: &str) -> String {
    let column = role.source_column();
    format!(
        "SELECT {select} FROM {input} \
         WHERE {column} IS NOT NULL \
         AND NOT ST_IsEmpty({column}) \
         AND ST_GeometryType({column}) IN ({POINT_TYPES}, {POLYGON_TYPES})",
        select = select_list(role),
    )
}

/// Union of the per-role queries over `input`
pub fn query(input: &str) -> String {
    AreaRole::ALL
        .into_iter()
        .map(|role| role_query(role, input))
        .collect::<Vec<_>>()
        .join(" UNION ALL ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_list_follows_output_schema() {
        let list = select_list(AreaRole::Accounting);
        let items: Vec<&str> = list.split(", ").collect();
        assert_eq!(items.len(), OUTPUT_COLUMNS.len());
        assert_eq!(items[0], "id");
        assert_eq!(items[2], "'accounting' AS area_role");
        assert_eq!(items[15], "ST_AsWKB(accounting_region) AS geometry");
    }

    #[test]
    fn test_role_query_filters_missing_geometry() {
        let sql = role_query(AreaRole::Reference, "repaired");
        assert!(sql.contains("FROM repaired"));
        assert!(sql.contains("reference_region IS NOT NULL"));
        assert!(sql.contains("NOT ST_IsEmpty(reference_region)"));
    }

    #[test]
    fn test_query_unions_all_roles() {
        let sql = query("repaired");
        assert_eq!(sql.matches(" UNION ALL ").count(), 2);
        for role in AreaRole::ALL {
            assert!(sql.contains(&format!("'{}' AS area_role", role.label())));
        }
    }
}
