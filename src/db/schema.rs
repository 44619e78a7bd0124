//! SQL DDL for the key-value table.

/// One row per key; values are JSON text exactly as written by the caller.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
"#;
