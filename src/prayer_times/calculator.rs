use anyhow::{Result, anyhow};
use chrono::{FixedOffset, NaiveDate, NaiveTime};
use rusqlite::Connection;
use salah::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::LocationConfig;
use crate::db::repository::{CURRENT_RECORD, PrayerRepo};
use crate::models::{PrayerRecord, PrayerType};
use crate::prayer_times::time_of_day::TimeOfDay;

/// Which Adhan times are filled in automatically from the astronomical calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoFetch {
    #[default]
    Off,
    Maghrib,
    All,
}

impl AutoFetch {
    pub fn as_str(&self) -> &'static str {
        match self {
            AutoFetch::Off => "off",
            AutoFetch::Maghrib => "maghrib",
            AutoFetch::All => "all",
        }
    }

    fn covers(&self, prayer: PrayerType) -> bool {
        match self {
            AutoFetch::Off => false,
            AutoFetch::Maghrib => prayer == PrayerType::Maghrib,
            AutoFetch::All => true,
        }
    }
}

impl FromStr for AutoFetch {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(AutoFetch::Off),
            "maghrib" => Ok(AutoFetch::Maghrib),
            "all" => Ok(AutoFetch::All),
            _ => Err(anyhow!("Unknown auto-fetch mode: '{}' (use off, maghrib, all)", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AdhanTimes {
    pub fajr: NaiveTime,
    pub dhuhr: NaiveTime,
    pub asr: NaiveTime,
    pub maghrib: NaiveTime,
    pub isha: NaiveTime,
}

impl AdhanTimes {
    pub fn get(&self, prayer: PrayerType) -> NaiveTime {
        match prayer {
            PrayerType::Fajr => self.fajr,
            PrayerType::Dhuhr => self.dhuhr,
            PrayerType::Asr => self.asr,
            PrayerType::Maghrib => self.maghrib,
            PrayerType::Isha => self.isha,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Disabled,
    AlreadyCurrent,
    Updated(Vec<(PrayerType, String)>),
}

pub struct AdhanCalculator {
    pub lat: f64,
    pub lng: f64,
    pub method_str: String,
    pub madhab_str: String,
    pub tz_offset_minutes: i32,
}

impl AdhanCalculator {
    pub fn new(
        lat: f64,
        lng: f64,
        method: &str,
        madhab: &str,
        tz_offset_minutes: i32,
    ) -> Result<Self> {
        // Validate method + madhab early
        parse_method(method)?;
        parse_madhab(madhab)?;
        Ok(Self {
            lat,
            lng,
            method_str: method.to_string(),
            madhab_str: madhab.to_string(),
            tz_offset_minutes,
        })
    }

    pub fn from_config(location: &LocationConfig) -> Result<Self> {
        Self::new(
            location.latitude,
            location.longitude,
            &location.calc_method,
            &location.madhab,
            location.timezone_offset,
        )
    }

    pub fn times_for_date(&self, date: NaiveDate) -> Result<AdhanTimes> {
        let coords = Coordinates::new(self.lat, self.lng);
        let method = parse_method(&self.method_str)?;
        let madhab = parse_madhab(&self.madhab_str)?;
        let params = Configuration::with(method, madhab);

        let times = PrayerSchedule::new()
            .on(date)
            .for_location(coords)
            .with_configuration(params)
            .calculate()
            .map_err(|e| anyhow!("Prayer calculation failed: {}", e))?;

        let offset = FixedOffset::east_opt(self.tz_offset_minutes * 60)
            .ok_or_else(|| anyhow!("Invalid timezone offset: {}", self.tz_offset_minutes))?;

        let to_local = |utc: chrono::DateTime<chrono::Utc>| -> NaiveTime {
            utc.with_timezone(&offset).time()
        };

        Ok(AdhanTimes {
            fajr: to_local(times.time(Prayer::Fajr)),
            dhuhr: to_local(times.time(Prayer::Dhuhr)),
            asr: to_local(times.time(Prayer::Asr)),
            maghrib: to_local(times.time(Prayer::Maghrib)),
            isha: to_local(times.time(Prayer::Isha)),
        })
    }

    /// Bring the `current` record's Adhan times up to date for `today`.
    /// Iqama settings are left alone. Skipped when the record was already
    /// refreshed today unless `force` is set.
    pub fn sync(
        &self,
        conn: &Connection,
        today: NaiveDate,
        mode: AutoFetch,
        force: bool,
    ) -> Result<SyncOutcome> {
        if mode == AutoFetch::Off {
            return Ok(SyncOutcome::Disabled);
        }

        let mut record = PrayerRepo::get(conn, CURRENT_RECORD)?.unwrap_or_default();
        if !force && !needs_refresh(&record, today) {
            log::debug!("adhan times already refreshed for {}", today);
            return Ok(SyncOutcome::AlreadyCurrent);
        }

        let times = self.times_for_date(today)?;
        let changed = apply_adhan_times(&mut record, &times, mode, today);
        PrayerRepo::store(conn, CURRENT_RECORD, &record)?;

        for (prayer, time) in &changed {
            log::info!("{} adhan set to {}", prayer.display_name(), time);
        }
        Ok(SyncOutcome::Updated(changed))
    }
}

pub fn needs_refresh(record: &PrayerRecord, today: NaiveDate) -> bool {
    let today_str = today.format("%Y-%m-%d").to_string();
    record.last_updated.as_deref() != Some(today_str.as_str())
}

/// Writes the calculated Adhan strings the mode covers into `record` and
/// stamps it with `today`. Returns what was written.
pub fn apply_adhan_times(
    record: &mut PrayerRecord,
    times: &AdhanTimes,
    mode: AutoFetch,
    today: NaiveDate,
) -> Vec<(PrayerType, String)> {
    let mut changed = Vec::new();
    for prayer in PrayerType::all() {
        if mode.covers(prayer) {
            let adhan = TimeOfDay::from(times.get(prayer)).to_string();
            record.entry_mut(prayer).adhan = Some(adhan.clone());
            changed.push((prayer, adhan));
        }
    }
    record.last_updated = Some(today.format("%Y-%m-%d").to_string());
    changed
}

fn parse_method(s: &str) -> Result<Method> {
    match s {
        "MuslimWorldLeague" => Ok(Method::MuslimWorldLeague),
        "Egyptian" => Ok(Method::Egyptian),
        "Karachi" => Ok(Method::Karachi),
        "UmmAlQura" => Ok(Method::UmmAlQura),
        "Dubai" => Ok(Method::Dubai),
        "MoonsightingCommittee" => Ok(Method::MoonsightingCommittee),
        "NorthAmerica" => Ok(Method::NorthAmerica),
        "Kuwait" => Ok(Method::Kuwait),
        "Qatar" => Ok(Method::Qatar),
        "Singapore" => Ok(Method::Singapore),
        "Tehran" => Ok(Method::Tehran),
        "Turkey" => Ok(Method::Turkey),
        "Other" => Ok(Method::Other),
        _ => Err(anyhow!(
            "Unknown calculation method: '{}' (one of: {})",
            s,
            CALC_METHODS.join(", ")
        )),
    }
}

fn parse_madhab(s: &str) -> Result<Madhab> {
    match s {
        "Hanafi" => Ok(Madhab::Hanafi),
        "Shafi" | "Shafi'i" => Ok(Madhab::Shafi),
        _ => Err(anyhow!("Unknown madhab: '{}'", s)),
    }
}

pub const CALC_METHODS: &[&str] = &[
    "MuslimWorldLeague",
    "Egyptian",
    "Karachi",
    "UmmAlQura",
    "Dubai",
    "MoonsightingCommittee",
    "NorthAmerica",
    "Kuwait",
    "Qatar",
    "Singapore",
    "Tehran",
    "Turkey",
    "Other",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::PrayerEntry;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixed_times() -> AdhanTimes {
        let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
        AdhanTimes {
            fajr: t(5, 2),
            dhuhr: t(12, 9),
            asr: t(15, 41),
            maghrib: t(18, 4),
            isha: t(19, 30),
        }
    }

    fn calculator() -> AdhanCalculator {
        AdhanCalculator::new(-33.8688, 151.2093, "MuslimWorldLeague", "Shafi", 600).unwrap()
    }

    #[test]
    fn rejects_unknown_method_and_madhab() {
        assert!(AdhanCalculator::new(0.0, 0.0, "Nope", "Hanafi", 0).is_err());
        assert!(AdhanCalculator::new(0.0, 0.0, "Karachi", "Maliki", 0).is_err());
    }

    #[test]
    fn calculated_times_are_in_order() {
        let times = calculator().times_for_date(date(2025, 10, 11)).unwrap();
        assert!(times.fajr < times.dhuhr);
        assert!(times.dhuhr < times.asr);
        assert!(times.asr < times.maghrib);
        assert!(times.maghrib < times.isha);
    }

    #[test]
    fn maghrib_mode_only_touches_maghrib() {
        let mut record = PrayerRecord {
            fajr: PrayerEntry::offset("5:00 AM", 20),
            maghrib: PrayerEntry::offset("6:00 PM", 5),
            ..Default::default()
        };
        let changed =
            apply_adhan_times(&mut record, &fixed_times(), AutoFetch::Maghrib, date(2025, 10, 11));
        assert_eq!(changed, [(PrayerType::Maghrib, "6:04 PM".to_string())]);
        assert_eq!(record.fajr.adhan.as_deref(), Some("5:00 AM"));
        assert_eq!(record.maghrib.adhan.as_deref(), Some("6:04 PM"));
        assert_eq!(record.maghrib.iqama_offset, Some(5));
        assert_eq!(record.last_updated.as_deref(), Some("2025-10-11"));
    }

    #[test]
    fn all_mode_keeps_iqama_settings() {
        let mut record = PrayerRecord {
            isha: PrayerEntry::fixed("7:00 PM", "8:00 PM"),
            ..Default::default()
        };
        apply_adhan_times(&mut record, &fixed_times(), AutoFetch::All, date(2025, 10, 11));
        assert_eq!(record.fajr.adhan.as_deref(), Some("5:02 AM"));
        assert_eq!(record.isha.adhan.as_deref(), Some("7:30 PM"));
        assert_eq!(record.isha.iqama_fixed.as_deref(), Some("8:00 PM"));
    }

    #[test]
    fn sync_runs_once_per_day_unless_forced() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let calc = calculator();
        let today = date(2025, 10, 11);

        assert_eq!(calc.sync(&conn, today, AutoFetch::Off, false).unwrap(), SyncOutcome::Disabled);
        assert!(matches!(
            calc.sync(&conn, today, AutoFetch::All, false).unwrap(),
            SyncOutcome::Updated(ref v) if v.len() == 5
        ));
        assert_eq!(
            calc.sync(&conn, today, AutoFetch::All, false).unwrap(),
            SyncOutcome::AlreadyCurrent
        );
        assert!(matches!(
            calc.sync(&conn, today, AutoFetch::Maghrib, true).unwrap(),
            SyncOutcome::Updated(ref v) if v.len() == 1
        ));

        let stored = PrayerRepo::get(&conn, CURRENT_RECORD).unwrap().unwrap();
        assert!(!needs_refresh(&stored, today));
        assert!(needs_refresh(&stored, date(2025, 10, 12)));
        assert!(stored.isha.adhan.is_some());
    }

    #[test]
    fn auto_fetch_parses() {
        assert_eq!("ALL".parse::<AutoFetch>().unwrap(), AutoFetch::All);
        assert!("sometimes".parse::<AutoFetch>().is_err());
    }
}
