//! Static artifact-id to group-id lookup for well-known JDBC drivers
//!
//! Exact key match wins over substring matching. Substring matching scans
//! longest pattern first, insertion order breaking ties, so an artifact id
//! containing several patterns ("db2jcc-driver" contains both "db2jcc" and
//! "jcc") always resolves the same way.

use std::sync::LazyLock;

/// Sentinel group id returned when no pattern matches
pub const UNKNOWN_GROUP_ID: &str = "unknown";

/// Known `(pattern, group_id)` pairs, in insertion order
const DRIVER_GROUP_IDS: &[(&str, &str)] = &[
    // PostgreSQL
    ("postgresql", "org.postgresql"),
    ("pgjdbc-ng", "com.impossibl.pgjdbc-ng"),
    // MySQL
    ("mysql-connector-java", "mysql"),
    ("mysql-connector-j", "com.mysql"),
    ("mariadb-java-client", "org.mariadb.jdbc"),
    // SQL Server
    ("mssql-jdbc", "com.microsoft.sqlserver"),
    ("jtds", "net.sourceforge.jtds"),
    // Oracle
    ("simplefan", "com.oracle.database.ha"),
    ("ojdbc", "com.oracle.database.jdbc"),
    // DB2
    ("jcc", "com.ibm.db2"),
    ("db2jcc", "com.ibm.db2.jcc"),
];

/// Table indices ordered for substring scanning: longest pattern first,
/// insertion order as tie-break
static SUBSTRING_ORDER: LazyLock<Vec<usize>> = LazyLock::new(|| {
    let mut order: Vec<usize> = (0..DRIVER_GROUP_IDS.len()).collect();
    order.sort_by(|&a, &b| {
        DRIVER_GROUP_IDS[b]
            .0
            .len()
            .cmp(&DRIVER_GROUP_IDS[a].0.len())
            .then(a.cmp(&b))
    });
    order
});

/// Resolve the group id for a driver artifact id
///
/// Matching is case-insensitive. Returns [`UNKNOWN_GROUP_ID`] when the
/// artifact id neither equals nor contains any known pattern.
pub fn group_id_for_artifact(artifact_id: &str) -> &'static str {
    let key = artifact_id.to_lowercase();

    // Direct matches
    if let Some((_, group_id)) = DRIVER_GROUP_IDS.iter().find(|(pattern, _)| *pattern == key) {
        return group_id;
    }

    // Pattern matching
    for &index in SUBSTRING_ORDER.iter() {
        let (pattern, group_id) = DRIVER_GROUP_IDS[index];
        if key.contains(pattern) {
            return group_id;
        }
    }
    UNKNOWN_GROUP_ID
}
