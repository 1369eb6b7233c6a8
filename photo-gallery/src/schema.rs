use rusqlite::{Connection, Result};

/// Latest schema version known to this crate
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize image gallery database schema.
///
/// Safe to call on every start; already applied versions are skipped.
pub fn init_image_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS image_schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;

    if current_version(conn)? < 1 {
        create_image_schema_v1(conn)?;
        conn.execute("INSERT INTO image_schema_version (version) VALUES (1)", [])?;
        log::info!("Image schema v1 applied");
    }

    Ok(())
}

/// Highest applied schema version, 0 on a fresh database
pub fn current_version(conn: &Connection) -> Result<i32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM image_schema_version",
        [],
        |row| row.get(0),
    )
}

/// Create image gallery schema version 1
fn create_image_schema_v1(conn: &Connection) -> Result<()> {
    // Timestamps carry milliseconds so consecutive captures keep their order
    conn.execute(
        "CREATE TABLE IF NOT EXISTS images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            uri TEXT NOT NULL,
            latitude REAL,
            longitude REAL,
            location TEXT NOT NULL,
            timestamp DATETIME NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_images_timestamp ON images(timestamp)",
        [],
    )?;

    // Timestamps are immutable once written
    conn.execute(
        "CREATE TRIGGER IF NOT EXISTS images_timestamp_immutable
         BEFORE UPDATE OF timestamp ON images
         WHEN NEW.timestamp IS NOT OLD.timestamp
         BEGIN
            SELECT RAISE(ABORT, 'timestamp is immutable');
         END",
        [],
    )?;

    Ok(())
}
