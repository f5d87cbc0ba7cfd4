//! Overpass QL query builders.
//!
//! See <https://wiki.openstreetmap.org/wiki/Overpass_API/Overpass_QL> for
//! the query language.

use crate::BoundingBox;

/// OSM tag identifying wind turbine generators.
pub const WIND_TURBINE_FILTER: &str = r#"["generator:method"="wind_turbine"]"#;

/// Builds a query for every node, way and relation tagged as a wind
/// turbine inside `bbox`.
///
/// Uses `out center;` so that ways and relations come back with a
/// representative `center` coordinate instead of their full geometry.
#[must_use]
pub fn wind_turbine_query(bbox: &BoundingBox) -> String {
    tagged_query(WIND_TURBINE_FILTER, bbox, None)
}

/// Builds a union query over nodes, ways and relations matching
/// `tag_filter` inside `bbox`, with an optional server-side timeout in
/// seconds.
#[must_use]
pub fn tagged_query(tag_filter: &str, bbox: &BoundingBox, timeout_secs: Option<u32>) -> String {
    let settings = timeout_secs.map_or_else(
        || "[out:json];".to_string(),
        |secs| format!("[out:json][timeout:{secs}];"),
    );

    format!(
        "{settings}\n\
         (\n  \
           node{tag_filter}{bbox};\n  \
           way{tag_filter}{bbox};\n  \
           rel{tag_filter}{bbox};\n\
         );\n\
         out center;\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_wind_turbine_union() {
        let bbox = BoundingBox::new(51.4, 2.6, 51.9, 3.2).unwrap();
        let query = wind_turbine_query(&bbox);
        assert_eq!(
            query,
            "[out:json];\n\
             (\n  \
               node[\"generator:method\"=\"wind_turbine\"](51.4,2.6,51.9,3.2);\n  \
               way[\"generator:method\"=\"wind_turbine\"](51.4,2.6,51.9,3.2);\n  \
               rel[\"generator:method\"=\"wind_turbine\"](51.4,2.6,51.9,3.2);\n\
             );\n\
             out center;\n"
        );
    }

    #[test]
    fn includes_timeout_setting() {
        let bbox = BoundingBox::new(55.0, -2.0, 56.0, -1.0).unwrap();
        let query = tagged_query(r#"["power"="generator"]"#, &bbox, Some(90));
        assert!(query.starts_with("[out:json][timeout:90];\n"));
        assert!(query.contains(r#"node["power"="generator"](55,-2,56,-1);"#));
        assert!(query.ends_with("out center;\n"));
    }
}
