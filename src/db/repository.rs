use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use std::str::FromStr;

use crate::models::{Event, IqamaType, JumuahSlot, PrayerEntry, PrayerRecord, PrayerType};
use crate::prayer_times::time_of_day::TimeOfDay;

/// Key of the singleton record used when no date-specific record exists.
pub const CURRENT_RECORD: &str = "current";

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ─── Prayer times ────────────────────────────────────────────────────────────

pub struct PrayerRepo;

impl PrayerRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<PrayerRecord>> {
        let mut stmt = conn.prepare(
            "SELECT prayer, adhan, iqama_type, iqama_fixed, iqama_offset
             FROM prayer_times WHERE record_key = ?1",
        )?;

        let rows = stmt.query_map(params![key], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<i32>>(4)?,
            ))
        })?;

        let mut record = PrayerRecord::default();
        let mut found = false;
        for r in rows {
            let (prayer, adhan, iqama_type, iqama_fixed, iqama_offset) = r?;
            let prayer = PrayerType::from_str(&prayer)
                .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?;
            *record.entry_mut(prayer) = PrayerEntry {
                adhan,
                iqama_type: IqamaType::from_str(&iqama_type)
                    .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                iqama_fixed,
                iqama_offset,
            };
            found = true;
        }

        let last_updated: Option<Option<String>> = conn
            .query_row(
                "SELECT last_updated FROM record_meta WHERE record_key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        if !found && last_updated.is_none() {
            return Ok(None);
        }
        record.last_updated = last_updated.flatten();
        Ok(Some(record))
    }

    /// The record for `date` if one was entered, otherwise `current`.
    pub fn get_effective(conn: &Connection, date: NaiveDate) -> Result<Option<PrayerRecord>> {
        let key = date_key(date);
        if let Some(record) = Self::get(conn, &key)? {
            log::debug!("using prayer record for {}", key);
            return Ok(Some(record));
        }
        Self::get(conn, CURRENT_RECORD)
    }

    pub fn store(conn: &Connection, key: &str, record: &PrayerRecord) -> Result<()> {
        let tx = conn.unchecked_transaction()?;
        for (prayer, entry) in record.entries() {
            tx.execute(
                "INSERT OR REPLACE INTO prayer_times
                    (record_key, prayer, adhan, iqama_type, iqama_fixed, iqama_offset)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    key,
                    prayer.as_str(),
                    entry.adhan,
                    entry.iqama_type.as_str(),
                    entry.iqama_fixed,
                    entry.iqama_offset,
                ],
            )?;
        }
        tx.execute(
            "INSERT INTO record_meta (record_key, last_updated) VALUES (?1, ?2)
             ON CONFLICT(record_key) DO UPDATE SET last_updated = ?2",
            params![key, record.last_updated],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn set_adhan(conn: &Connection, key: &str, prayer: PrayerType, adhan: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO prayer_times (record_key, prayer, adhan) VALUES (?1, ?2, ?3)
             ON CONFLICT(record_key, prayer) DO UPDATE SET adhan = ?3",
            params![key, prayer.as_str(), adhan],
        )?;
        Ok(())
    }

    /// Switches the prayer to a fixed Iqama. A previously stored offset is kept
    /// but no longer authoritative.
    pub fn set_iqama_fixed(
        conn: &Connection,
        key: &str,
        prayer: PrayerType,
        iqama: &str,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO prayer_times (record_key, prayer, iqama_type, iqama_fixed)
             VALUES (?1, ?2, 'fixed', ?3)
             ON CONFLICT(record_key, prayer) DO UPDATE SET iqama_type = 'fixed', iqama_fixed = ?3",
            params![key, prayer.as_str(), iqama],
        )?;
        Ok(())
    }

    pub fn set_iqama_offset(
        conn: &Connection,
        key: &str,
        prayer: PrayerType,
        minutes: i32,
    ) -> Result<()> {
        conn.execute(
            "INSERT INTO prayer_times (record_key, prayer, iqama_type, iqama_offset)
             VALUES (?1, ?2, 'offset', ?3)
             ON CONFLICT(record_key, prayer) DO UPDATE SET iqama_type = 'offset', iqama_offset = ?3",
            params![key, prayer.as_str(), minutes],
        )?;
        Ok(())
    }

    /// Deletes a record. Returns whether anything was there.
    pub fn clear(conn: &Connection, key: &str) -> Result<bool> {
        let rows = conn.execute("DELETE FROM prayer_times WHERE record_key = ?1", params![key])?;
        let meta = conn.execute("DELETE FROM record_meta WHERE record_key = ?1", params![key])?;
        Ok(rows + meta > 0)
    }

    pub fn list_keys(conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT record_key FROM prayer_times
             UNION SELECT record_key FROM record_meta
             ORDER BY record_key",
        )?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(keys)
    }
}

// ─── Jumu'ah ─────────────────────────────────────────────────────────────────

pub struct JumuahRepo;

impl JumuahRepo {
    pub fn list(conn: &Connection) -> Result<Vec<JumuahSlot>> {
        let mut stmt =
            conn.prepare("SELECT id, khutbah, prayer FROM jumuah_times ORDER BY sort_order, id")?;

        let rows = stmt.query_map([], |row| {
            Ok(JumuahSlot {
                id: row.get(0)?,
                khutbah: row.get(1)?,
                prayer: row.get(2)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn add(conn: &Connection, khutbah: &str, prayer: Option<&str>) -> Result<i64> {
        let max_order: i32 = conn.query_row(
            "SELECT COALESCE(MAX(sort_order), 0) FROM jumuah_times",
            [],
            |row| row.get(0),
        )?;

        conn.execute(
            "INSERT INTO jumuah_times (khutbah, prayer, sort_order) VALUES (?1, ?2, ?3)",
            params![khutbah, prayer, max_order + 1],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn remove(conn: &Connection, id: i64) -> Result<bool> {
        let n = conn.execute("DELETE FROM jumuah_times WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    pub fn clear(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM jumuah_times", [])?;
        Ok(())
    }
}

// ─── Events ──────────────────────────────────────────────────────────────────

pub struct EventRepo;

const EVENT_COLUMNS: &str =
    "id, title, category, date, time, location, speaker, description, is_active";

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<Event> {
    let date: String = row.get(3)?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Event {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        date,
        time: row.get(4)?,
        location: row.get(5)?,
        speaker: row.get(6)?,
        description: row.get(7)?,
        is_active: row.get(8)?,
    })
}

/// Date first, then clock time. Unparseable times sort last within their day.
fn sort_events(events: &mut [Event]) {
    events.sort_by_key(|e| {
        let minutes = e
            .time
            .parse::<TimeOfDay>()
            .map(|t| t.minutes_since_midnight())
            .unwrap_or(i64::MAX);
        (e.date, minutes, e.id)
    });
}

impl EventRepo {
    /// Stores `event` (its `id` is ignored) and returns the new id.
    pub fn add(conn: &Connection, event: &Event) -> Result<i64> {
        conn.execute(
            "INSERT INTO events (title, category, date, time, location, speaker, description, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                event.title,
                event.category,
                date_key(event.date),
                event.time,
                event.location,
                event.speaker,
                event.description,
                event.is_active,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Active events on or after `today`, optionally for one category.
    pub fn upcoming(
        conn: &Connection,
        today: NaiveDate,
        category: Option<&str>,
    ) -> Result<Vec<Event>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM events
             WHERE is_active = 1 AND date >= ?1 AND (?2 IS NULL OR category = ?2)",
            EVENT_COLUMNS
        ))?;
        let mut events = stmt
            .query_map(params![date_key(today), category], row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        sort_events(&mut events);
        Ok(events)
    }

    /// Every stored event, hidden and past ones included.
    pub fn list_all(conn: &Connection) -> Result<Vec<Event>> {
        let mut stmt = conn.prepare(&format!("SELECT {} FROM events", EVENT_COLUMNS))?;
        let mut events = stmt
            .query_map([], row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        sort_events(&mut events);
        Ok(events)
    }

    pub fn set_active(conn: &Connection, id: i64, active: bool) -> Result<bool> {
        let n = conn.execute(
            "UPDATE events SET is_active = ?2 WHERE id = ?1",
            params![id, active],
        )?;
        Ok(n > 0)
    }

    pub fn remove(conn: &Connection, id: i64) -> Result<bool> {
        let n = conn.execute("DELETE FROM events WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }
}

// ─── App meta ────────────────────────────────────────────────────────────────

pub struct MetaRepo;

impl MetaRepo {
    pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
        conn.query_row(
            "SELECT value FROM app_meta WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }

    pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}
