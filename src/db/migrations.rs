use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch("
        CREATE TABLE IF NOT EXISTS prayer_times (
            record_key    TEXT NOT NULL,
            prayer        TEXT NOT NULL CHECK(prayer IN ('fajr','dhuhr','asr','maghrib','isha')),
            adhan         TEXT,
            iqama_type    TEXT NOT NULL DEFAULT 'fixed'
                          CHECK(iqama_type IN ('fixed','offset')),
            iqama_fixed   TEXT,
            iqama_offset  INTEGER,
            PRIMARY KEY(record_key, prayer)
        );

        CREATE TABLE IF NOT EXISTS record_meta (
            record_key    TEXT PRIMARY KEY,
            last_updated  TEXT
        );

        CREATE TABLE IF NOT EXISTS jumuah_times (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            khutbah     TEXT NOT NULL,
            prayer      TEXT,
            sort_order  INTEGER DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS events (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            title        TEXT NOT NULL,
            category     TEXT NOT NULL DEFAULT 'community',
            date         TEXT NOT NULL,
            time         TEXT NOT NULL,
            location     TEXT,
            speaker      TEXT,
            description  TEXT,
            is_active    INTEGER NOT NULL DEFAULT 1
        );

        CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ")?;

    // Databases created before Jumu'ah prayer times were tracked
    add_column_if_missing(conn, "jumuah_times", "prayer", "TEXT")?;
    Ok(())
}

fn add_column_if_missing(conn: &Connection, table: &str, column: &str, decl: &str) -> Result<()> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    if !columns.iter().any(|c| c == column) {
        conn.execute_batch(&format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, decl))?;
    }
    Ok(())
}
