use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use rusqlite::Connection;
use std::str::FromStr;

use crate::cli::args::{EventCommands, JumuahCommands, SetupArgs};
use crate::config::AppConfig;
use crate::db::repository::{CURRENT_RECORD, EventRepo, JumuahRepo, MetaRepo, PrayerRepo, date_key};
use crate::models::event::{CATEGORIES, find_category, group_by_category};
use crate::models::jumuah::slot_title;
use crate::models::{Event, PrayerType};
use crate::prayer_times::calculator::{AdhanCalculator, AutoFetch, SyncOutcome};
use crate::prayer_times::resolver::{UNKNOWN_TIME, build_schedule, out_of_order};
use crate::prayer_times::time_of_day::TimeOfDay;
use crate::utils::format::{format_event_date, format_long_date};
use crate::utils::hijri::hijri_string;

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;251;191;36m";

const SYNC_ATTEMPT_KEY: &str = "adhan_sync_attempt";

const MAX_TZ_MINUTES: u32 = 14 * 60;
/// Moon-sighting adjustments beyond a month are data-entry mistakes.
const MAX_HIJRI_OFFSET: i32 = 30;

// ─── Setup ───────────────────────────────────────────────────────────────────

pub fn handle_setup(config: &mut AppConfig, args: &SetupArgs) -> Result<()> {
    apply_setup(config, args)?;
    config.save()?;

    println!();
    println_colored!(GREEN, "  ✓ Saved {:?}", AppConfig::config_path()?);
    println!();
    println!("  Mosque:     {}", config.mosque.name);
    let mosque = &config.mosque;
    for (label, value) in [
        ("Address", &mosque.address),
        ("Phone", &mosque.phone),
        ("Email", &mosque.email),
        ("Website", &mosque.website),
        ("Imam", &mosque.imam),
    ] {
        if let Some(v) = value {
            println!("  {:<11} {}", format!("{}:", label), v);
        }
    }
    println!(
        "  Location:   {:.4}, {:.4}  (UTC{})",
        config.location.latitude,
        config.location.longitude,
        format_tz_offset(config.location.timezone_offset)
    );
    println!(
        "  Method:     {} / {}",
        config.location.calc_method, config.location.madhab
    );
    println!("  Auto Adhan: {}", config.location.auto_fetch.as_str());
    println!();
    Ok(())
}

fn apply_setup(config: &mut AppConfig, args: &SetupArgs) -> Result<()> {
    if let Some(name) = &args.name {
        config.mosque.name = name.clone();
    }
    let mosque = &mut config.mosque;
    for (value, field) in [
        (&args.address, &mut mosque.address),
        (&args.phone, &mut mosque.phone),
        (&args.email, &mut mosque.email),
        (&args.website, &mut mosque.website),
        (&args.imam, &mut mosque.imam),
    ] {
        if let Some(v) = value {
            *field = Some(v.clone());
        }
    }

    let location = &mut config.location;
    if let Some(lat) = args.lat {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(anyhow!("Latitude {} is outside -90..90", lat));
        }
        location.latitude = lat;
    }
    if let Some(lng) = args.lng {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(anyhow!("Longitude {} is outside -180..180", lng));
        }
        location.longitude = lng;
    }
    if let Some(method) = &args.method {
        location.calc_method = method.clone();
    }
    if let Some(madhab) = &args.madhab {
        location.madhab = madhab.clone();
    }
    if let Some(tz) = &args.tz {
        location.timezone_offset =
            parse_tz_offset(tz).with_context(|| format!("Invalid UTC offset '{}'", tz))?;
    }
    if let Some(offset) = args.hijri_offset {
        if offset.abs() > MAX_HIJRI_OFFSET {
            return Err(anyhow!(
                "Hijri offset {} is outside ±{} days",
                offset,
                MAX_HIJRI_OFFSET
            ));
        }
        location.hijri_offset = offset;
    }
    if let Some(mode) = &args.auto_fetch {
        location.auto_fetch = AutoFetch::from_str(mode)?;
    }

    // Rejects unknown method/madhab names before anything is saved
    AdhanCalculator::from_config(location)?;
    Ok(())
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(
    conn: &Connection,
    config: &AppConfig,
    date: Option<&str>,
    json: bool,
) -> Result<()> {
    let mut now = Local::now().naive_local();
    if let Some(date) = date {
        now = parse_date(date)?.and_time(now.time());
    } else {
        auto_sync(conn, config, now.date());
    }

    let record = PrayerRepo::get_effective(conn, now.date())?;
    let schedule = build_schedule(record.as_ref(), now);

    if json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  {}", config.mosque.name);
    if let Some(address) = &config.mosque.address {
        println_colored!(DIM, "  {}", address);
    }
    println_colored!(
        DIM,
        "  {} | {}",
        format_long_date(now),
        hijri_string(now.date(), config.location.hijri_offset)
    );
    println!();
    println_colored!(DIM, "  {:<10}  {:>8}  {:>8}", "", "Adhan", "Iqama");

    for p in &schedule.prayers {
        let line = format!(
            "  {:<10}  {:>8}  {:>8}",
            p.prayer.display_name(),
            p.adhan,
            p.iqama
        );
        if p.is_next {
            println_colored!(GOLD, "{}", line);
        } else {
            println_colored!(BOLD, "{}", line);
        }
    }

    println!();
    match &schedule.next {
        Some(next) => println_colored!(AMBER, "  {}", next.banner()),
        None => println_colored!(DIM, "  No prayer times set. Use `iqama adhan` / `iqama iqama`."),
    }
    println!();
    Ok(())
}

// ─── Editing ─────────────────────────────────────────────────────────────────

pub fn handle_adhan(conn: &Connection, prayer: &str, time: &str, date: Option<&str>) -> Result<()> {
    let prayer = parse_prayer(prayer)?;
    let time = parse_time(time)?;
    let key = record_key(date)?;

    PrayerRepo::set_adhan(conn, &key, prayer, &time.to_string())?;
    log::info!("{} adhan set to {} ({})", prayer, time, key);
    println_colored!(GREEN, "  ✓ {} Adhan set to {}", prayer.display_name(), time);
    warn_out_of_order(conn, &key)
}

pub fn handle_iqama(
    conn: &Connection,
    prayer: &str,
    fixed: Option<&str>,
    offset: Option<i32>,
    date: Option<&str>,
) -> Result<()> {
    let prayer = parse_prayer(prayer)?;
    let key = record_key(date)?;

    match (fixed, offset) {
        (Some(fixed), _) => {
            let time = parse_time(fixed)?;
            PrayerRepo::set_iqama_fixed(conn, &key, prayer, &time.to_string())?;
            log::info!("{} iqama fixed at {} ({})", prayer, time, key);
            println_colored!(GREEN, "  ✓ {} Iqama fixed at {}", prayer.display_name(), time);
        }
        (None, Some(minutes)) => {
            PrayerRepo::set_iqama_offset(conn, &key, prayer, minutes)?;
            log::info!("{} iqama {} min after adhan ({})", prayer, minutes, key);
            println_colored!(
                GREEN,
                "  ✓ {} Iqama {} minutes after Adhan",
                prayer.display_name(),
                minutes
            );
        }
        (None, None) => return Err(anyhow!("Give either --fixed <time> or --offset <minutes>")),
    }
    warn_out_of_order(conn, &key)
}

pub fn handle_clear(conn: &Connection, date: Option<&str>) -> Result<()> {
    let key = record_key(date)?;
    if PrayerRepo::clear(conn, &key)? {
        println_colored!(GREEN, "  ✓ Cleared prayer record '{}'", key);
    } else {
        println_colored!(DIM, "  No prayer record '{}'", key);
        let keys = PrayerRepo::list_keys(conn)?;
        if !keys.is_empty() {
            println_colored!(DIM, "  Stored records: {}", keys.join(", "));
        }
    }
    Ok(())
}

fn warn_out_of_order(conn: &Connection, key: &str) -> Result<()> {
    if let Some(record) = PrayerRepo::get(conn, key)? {
        for (earlier, later) in out_of_order(&record) {
            log::warn!("{} iqama is not after {} in record '{}'", later, earlier, key);
            println_colored!(
                AMBER,
                "  ! {} Iqama is not after {} Iqama; the countdown may skip ahead",
                later.display_name(),
                earlier.display_name()
            );
        }
    }
    Ok(())
}

// ─── Jumu'ah ─────────────────────────────────────────────────────────────────

pub fn handle_jumuah(conn: &Connection, action: &JumuahCommands) -> Result<()> {
    match action {
        JumuahCommands::List => {
            let slots = JumuahRepo::list(conn)?;
            println!();
            if slots.is_empty() {
                println_colored!(DIM, "  No Jumu'ah times set");
            } else {
                println_colored!(GOLD, "  Friday Prayer (Jumu'ah)");
                println!();
                for (i, slot) in slots.iter().enumerate() {
                    println!(
                        "  {:<14}  Khutbah {:>8}   Prayer {:>8}   {}",
                        slot_title(i, slots.len()),
                        slot.khutbah,
                        slot.prayer.as_deref().unwrap_or(UNKNOWN_TIME),
                        format!("{}#{}\x1b[0m", DIM, slot.id)
                    );
                }
            }
            println!();
        }
        JumuahCommands::Add { khutbah, prayer } => {
            let time = parse_time(khutbah)?;
            let prayer = prayer.as_deref().map(parse_time).transpose()?;
            if let Some(p) = prayer {
                if p <= time {
                    log::warn!("jumu'ah prayer {} is not after khutbah {}", p, time);
                    println_colored!(AMBER, "  ! Prayer {} is not after the khutbah at {}", p, time);
                }
            }
            let prayer = prayer.map(|p| p.to_string());
            let id = JumuahRepo::add(conn, &time.to_string(), prayer.as_deref())?;
            match &prayer {
                Some(p) => println_colored!(
                    GREEN,
                    "  ✓ Added Jumu'ah khutbah at {}, prayer at {} (#{})",
                    time,
                    p,
                    id
                ),
                None => println_colored!(GREEN, "  ✓ Added Jumu'ah khutbah at {} (#{})", time, id),
            }
        }
        JumuahCommands::Remove { id } => {
            if JumuahRepo::remove(conn, *id)? {
                println_colored!(GREEN, "  ✓ Removed Jumu'ah #{}", id);
            } else {
                return Err(anyhow!("No Jumu'ah time with id {}", id));
            }
        }
        JumuahCommands::Clear => {
            JumuahRepo::clear(conn)?;
            println_colored!(GREEN, "  ✓ Cleared Jumu'ah times");
        }
    }
    Ok(())
}

// ─── Events ──────────────────────────────────────────────────────────────────

pub fn handle_event(conn: &Connection, action: &EventCommands) -> Result<()> {
    match action {
        EventCommands::List { category, all } => {
            let category = category.as_deref().map(parse_category).transpose()?;
            let today = Local::now().date_naive();
            let events = if *all {
                let mut events = EventRepo::list_all(conn)?;
                events.retain(|e| category.is_none_or(|c| e.category == c));
                events
            } else {
                EventRepo::upcoming(conn, today, category)?
            };
            print_events(&events, today);
        }
        EventCommands::Add {
            title,
            date,
            time,
            category,
            location,
            speaker,
            description,
        } => {
            let title = title.trim();
            if title.is_empty() {
                return Err(anyhow!("Event title cannot be empty"));
            }
            let event = Event {
                id: 0,
                title: title.to_string(),
                category: parse_category(category)?.to_string(),
                date: parse_date(date)?,
                time: parse_time(time)?.to_string(),
                location: location.clone(),
                speaker: speaker.clone(),
                description: description.clone(),
                is_active: true,
            };
            let id = EventRepo::add(conn, &event)?;
            log::info!("event #{} '{}' added for {}", id, event.title, event.date);
            println_colored!(
                GREEN,
                "  ✓ Added '{}' on {} at {} (#{})",
                event.title,
                format_event_date(event.date),
                event.time,
                id
            );
        }
        EventCommands::Hide { id } => set_event_active(conn, *id, false)?,
        EventCommands::Show { id } => set_event_active(conn, *id, true)?,
        EventCommands::Remove { id } => {
            if !EventRepo::remove(conn, *id)? {
                return Err(anyhow!("No event with id {}", id));
            }
            println_colored!(GREEN, "  ✓ Removed event #{}", id);
        }
    }
    Ok(())
}

fn set_event_active(conn: &Connection, id: i64, active: bool) -> Result<()> {
    if !EventRepo::set_active(conn, id, active)? {
        return Err(anyhow!("No event with id {}", id));
    }
    let verb = if active { "Showing" } else { "Hid" };
    println_colored!(GREEN, "  ✓ {} event #{}", verb, id);
    Ok(())
}

fn print_events(events: &[Event], today: NaiveDate) {
    println!();
    if events.is_empty() {
        println_colored!(DIM, "  No upcoming events");
        println!();
        return;
    }
    for (label, group) in group_by_category(events) {
        println_colored!(GOLD, "  {}", label.to_uppercase());
        for event in group {
            let status = if event.is_upcoming(today) { "" } else { "  (past or hidden)" };
            println_colored!(BOLD, "  {}{}", event.title, status);
            println_colored!(
                DIM,
                "    {} at {}   #{}",
                format_event_date(event.date),
                event.time,
                event.id
            );
            if let Some(location) = &event.location {
                println!("    {}", location);
            }
            if let Some(speaker) = &event.speaker {
                println!("    Speaker: {}", speaker);
            }
            if let Some(description) = &event.description {
                println_colored!(DIM, "    {}", description);
            }
        }
        println!();
    }
}

fn parse_category(s: &str) -> Result<&'static str> {
    find_category(s).map(|c| c.id).ok_or_else(|| {
        let known: Vec<&str> = CATEGORIES.iter().map(|c| c.id).collect();
        anyhow!("Unknown event category '{}'. Use: {}", s, known.join(", "))
    })
}

// ─── Sync ────────────────────────────────────────────────────────────────────

pub fn handle_sync(conn: &Connection, config: &AppConfig, force: bool) -> Result<()> {
    let today = Local::now().date_naive();
    // An explicit sync with auto-fetch off refreshes everything
    let mode = match config.location.auto_fetch {
        AutoFetch::Off => AutoFetch::All,
        mode => mode,
    };

    let calc = AdhanCalculator::from_config(&config.location)?;
    MetaRepo::set(conn, SYNC_ATTEMPT_KEY, &date_key(today))?;
    match calc.sync(conn, today, mode, force)? {
        SyncOutcome::Updated(changed) => {
            for (prayer, adhan) in changed {
                println_colored!(GREEN, "  ✓ {:<8} Adhan {}", prayer.display_name(), adhan);
            }
        }
        SyncOutcome::AlreadyCurrent => {
            println_colored!(DIM, "  Adhan times already updated today (use --force)");
        }
        SyncOutcome::Disabled => {}
    }
    Ok(())
}

/// Startup refresh: at most one attempt per day, failures only logged.
pub fn auto_sync(conn: &Connection, config: &AppConfig, today: NaiveDate) {
    if config.location.auto_fetch == AutoFetch::Off {
        return;
    }
    if let Err(e) = try_auto_sync(conn, config, today) {
        log::warn!("automatic adhan refresh failed: {:#}", e);
    }
}

fn try_auto_sync(conn: &Connection, config: &AppConfig, today: NaiveDate) -> Result<()> {
    let today_key = date_key(today);
    if MetaRepo::get(conn, SYNC_ATTEMPT_KEY)?.as_deref() == Some(today_key.as_str()) {
        return Ok(());
    }
    MetaRepo::set(conn, SYNC_ATTEMPT_KEY, &today_key)?;

    let calc = AdhanCalculator::from_config(&config.location)?;
    calc.sync(conn, today, config.location.auto_fetch, false)?;
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn parse_prayer(s: &str) -> Result<PrayerType> {
    PrayerType::from_str(s)
        .map_err(|_| anyhow!("Unknown prayer '{}'. Use: fajr, dhuhr, asr, maghrib, isha", s))
}

fn parse_time(s: &str) -> Result<TimeOfDay> {
    TimeOfDay::from_str(s).with_context(|| format!("Invalid time '{}' (expected e.g. 5:30 AM)", s))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
}

fn record_key(date: Option<&str>) -> Result<String> {
    match date {
        Some(d) => Ok(date_key(parse_date(d)?)),
        None => Ok(CURRENT_RECORD.to_string()),
    }
}

/// Parse a UTC offset string into total minutes.
/// Accepts: "5:30", "+5:30", "-5:30", "5", "+5", "5.5"
fn parse_tz_offset(s: &str) -> Result<i32> {
    let s = s.trim().trim_start_matches('+');
    let negative = s.starts_with('-');
    let s = s.trim_start_matches('-');
    let sign = if negative { -1 } else { 1 };

    let minutes = if let Some((h, m)) = s.split_once(':') {
        let hours: u32 = h.parse()?;
        let mins: u32 = m.parse()?;
        if mins > 59 {
            return Err(anyhow!("Minutes must be below 60, got {}", mins));
        }
        hours.checked_mul(60).and_then(|h| h.checked_add(mins))
    } else if s.contains('.') {
        let hours: f64 = s.parse()?;
        (0.0..=14.0)
            .contains(&hours)
            .then(|| (hours * 60.0).round() as u32)
    } else {
        let hours: u32 = s.parse()?;
        hours.checked_mul(60)
    }
    .filter(|&m| m <= MAX_TZ_MINUTES)
    .ok_or_else(|| anyhow!("UTC offset beyond ±14 hours"))?;

    Ok(sign * minutes as i32)
}

/// Format total minutes as "+H:MM" string
fn format_tz_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { "-" } else { "+" };
    let abs = minutes.abs();
    let h = abs / 60;
    let m = abs % 60;
    if m == 0 {
        format!("{}{}", sign, h)
    } else {
        format!("{}{}:{:02}", sign, h, m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::IqamaType;

    fn db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn tz_offsets() {
        assert_eq!(parse_tz_offset("5:30").unwrap(), 330);
        assert_eq!(parse_tz_offset("+10").unwrap(), 600);
        assert_eq!(parse_tz_offset("-4").unwrap(), -240);
        assert_eq!(parse_tz_offset("5.75").unwrap(), 345);
        assert!(parse_tz_offset("east").is_err());
        assert!(parse_tz_offset("+15").is_err());
        assert!(parse_tz_offset("99999999:00").is_err());
        assert!(parse_tz_offset("4294967295").is_err());
        assert!(parse_tz_offset("5:75").is_err());
        assert!(parse_tz_offset("1e9.0").is_err());
        assert_eq!(parse_tz_offset("-14:00").unwrap(), -840);
        assert_eq!(format_tz_offset(330), "+5:30");
        assert_eq!(format_tz_offset(-240), "-4");
    }

    #[test]
    fn setup_only_changes_given_fields() {
        let mut config = AppConfig::default();
        let args = SetupArgs {
            name: Some("Masjid Noor".into()),
            tz: Some("+5:30".into()),
            auto_fetch: Some("all".into()),
            ..Default::default()
        };
        apply_setup(&mut config, &args).unwrap();
        assert_eq!(config.mosque.name, "Masjid Noor");
        assert_eq!(config.mosque.phone, None);
        assert_eq!(config.location.timezone_offset, 330);
        assert_eq!(config.location.auto_fetch, AutoFetch::All);
        assert_eq!(config.location.calc_method, "MuslimWorldLeague");
    }

    #[test]
    fn setup_bounds_hijri_offset() {
        let mut config = AppConfig::default();
        let args = SetupArgs {
            hijri_offset: Some(2_000_000_000),
            ..Default::default()
        };
        assert!(apply_setup(&mut config, &args).is_err());
        assert_eq!(config.location.hijri_offset, 0);

        let args = SetupArgs {
            hijri_offset: Some(-1),
            ..Default::default()
        };
        apply_setup(&mut config, &args).unwrap();
        assert_eq!(config.location.hijri_offset, -1);
    }

    #[test]
    fn setup_rejects_unknown_method() {
        let mut config = AppConfig::default();
        let args = SetupArgs {
            method: Some("Lunar".into()),
            ..Default::default()
        };
        assert!(apply_setup(&mut config, &args).is_err());
    }

    #[test]
    fn edits_store_canonical_times() {
        let conn = db();
        handle_adhan(&conn, "Zuhr", "01:05 pm", None).unwrap();
        handle_iqama(&conn, "dhuhr", None, Some(15), None).unwrap();
        handle_iqama(&conn, "isha", Some("08:30 PM"), None, None).unwrap();

        let record = PrayerRepo::get(&conn, CURRENT_RECORD).unwrap().unwrap();
        assert_eq!(record.dhuhr.adhan.as_deref(), Some("1:05 PM"));
        assert_eq!(record.dhuhr.iqama_type, IqamaType::Offset);
        assert_eq!(record.dhuhr.iqama_offset, Some(15));
        assert_eq!(record.isha.iqama_fixed.as_deref(), Some("8:30 PM"));
    }

    #[test]
    fn edits_reject_bad_input_without_writing() {
        let conn = db();
        assert!(handle_adhan(&conn, "fajr", "25:00", None).is_err());
        assert!(handle_adhan(&conn, "sunrise", "6:00 AM", None).is_err());
        assert!(handle_iqama(&conn, "fajr", None, None, None).is_err());
        assert!(handle_adhan(&conn, "fajr", "5:00 AM", Some("11/10/2025")).is_err());
        assert_eq!(PrayerRepo::list_keys(&conn).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn dated_edits_go_to_their_own_record() {
        let conn = db();
        handle_adhan(&conn, "fajr", "5:00 AM", Some("2025-10-17")).unwrap();
        assert_eq!(PrayerRepo::list_keys(&conn).unwrap(), ["2025-10-17".to_string()]);
        handle_clear(&conn, Some("2025-10-17")).unwrap();
        assert!(PrayerRepo::list_keys(&conn).unwrap().is_empty());
    }

    fn add_jumuah(khutbah: &str, prayer: Option<&str>) -> JumuahCommands {
        JumuahCommands::Add {
            khutbah: khutbah.into(),
            prayer: prayer.map(Into::into),
        }
    }

    #[test]
    fn jumuah_add_validates_time() {
        let conn = db();
        handle_jumuah(&conn, &add_jumuah("12:30 pm", Some("01:00 pm"))).unwrap();
        handle_jumuah(&conn, &add_jumuah("1:30 PM", None)).unwrap();
        assert!(handle_jumuah(&conn, &add_jumuah("noon", None)).is_err());
        assert!(handle_jumuah(&conn, &add_jumuah("2:30 PM", Some("soon"))).is_err());
        let slots = JumuahRepo::list(&conn).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].khutbah, "12:30 PM");
        assert_eq!(slots[0].prayer.as_deref(), Some("1:00 PM"));
        assert_eq!(slots[1].prayer, None);
        assert!(handle_jumuah(&conn, &JumuahCommands::Remove { id: 999 }).is_err());
    }

    #[test]
    fn auto_sync_attempts_once_per_day() {
        let conn = db();
        let mut config = AppConfig::default();
        config.location.auto_fetch = AutoFetch::Maghrib;
        let today = NaiveDate::from_ymd_opt(2025, 10, 11).unwrap();

        auto_sync(&conn, &config, today);
        let record = PrayerRepo::get(&conn, CURRENT_RECORD).unwrap().unwrap();
        assert!(record.maghrib.adhan.is_some());
        assert!(record.fajr.adhan.is_none());

        // A second attempt the same day leaves manual edits alone
        PrayerRepo::set_adhan(&conn, CURRENT_RECORD, PrayerType::Maghrib, "7:00 PM").unwrap();
        auto_sync(&conn, &config, today);
        let record = PrayerRepo::get(&conn, CURRENT_RECORD).unwrap().unwrap();
        assert_eq!(record.maghrib.adhan.as_deref(), Some("7:00 PM"));
    }

    #[test]
    fn auto_sync_off_touches_nothing() {
        let conn = db();
        auto_sync(&conn, &AppConfig::default(), NaiveDate::from_ymd_opt(2025, 10, 11).unwrap());
        assert_eq!(PrayerRepo::get(&conn, CURRENT_RECORD).unwrap(), None);
        assert_eq!(MetaRepo::get(&conn, SYNC_ATTEMPT_KEY).unwrap(), None);
    }

    fn add_event(title: &str, date: &str, time: &str, category: &str) -> EventCommands {
        EventCommands::Add {
            title: title.into(),
            date: date.into(),
            time: time.into(),
            category: category.into(),
            location: None,
            speaker: Some("Imam Yusuf".into()),
            description: None,
        }
    }

    #[test]
    fn event_add_validates_and_normalizes() {
        let conn = db();
        handle_event(&conn, &add_event("Tafsir night", "2030-01-04", "7:00 pm", "Lecture")).unwrap();
        assert!(handle_event(&conn, &add_event("Bad time", "2030-01-04", "19:00", "lecture")).is_err());
        assert!(handle_event(&conn, &add_event("Bad date", "04/01/2030", "7:00 PM", "lecture")).is_err());
        assert!(handle_event(&conn, &add_event("Bad kind", "2030-01-04", "7:00 PM", "sports")).is_err());
        assert!(handle_event(&conn, &add_event("  ", "2030-01-04", "7:00 PM", "lecture")).is_err());

        let events = EventRepo::list_all(&conn).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category, "lecture");
        assert_eq!(events[0].time, "7:00 PM");
        assert_eq!(events[0].speaker.as_deref(), Some("Imam Yusuf"));
    }

    #[test]
    fn event_hide_show_and_remove() {
        let conn = db();
        handle_event(&conn, &add_event("Bake sale", "2030-02-01", "10:00 AM", "charity")).unwrap();
        let id = EventRepo::list_all(&conn).unwrap()[0].id;
        let today = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

        handle_event(&conn, &EventCommands::Hide { id }).unwrap();
        assert!(EventRepo::upcoming(&conn, today, None).unwrap().is_empty());
        handle_event(&conn, &EventCommands::Show { id }).unwrap();
        assert_eq!(EventRepo::upcoming(&conn, today, Some("charity")).unwrap().len(), 1);

        handle_event(&conn, &EventCommands::Remove { id }).unwrap();
        assert!(handle_event(&conn, &EventCommands::Remove { id }).is_err());
        assert!(handle_event(&conn, &EventCommands::Hide { id }).is_err());
    }
}
