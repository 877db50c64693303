use chrono::{Datelike, Duration, NaiveDate};
use hijri_date::HijriDate;

/// Islamic month names in English (index 0 = Muharram = month 1)
const HIJRI_MONTH_NAMES: &[&str] = &[
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Awwal",
    "Jumada al-Thani",
    "Rajab",
    "Sha'ban",
    "Ramadan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

fn hijri_month_name(month: usize) -> &'static str {
    if (1..=12).contains(&month) {
        HIJRI_MONTH_NAMES[month - 1]
    } else {
        "Unknown"
    }
}

/// Hijri date for `date` shifted by `offset_days` for local moon sighting,
/// e.g. "19 Rabi' al-Thani 1447 AH". Empty when the conversion fails so the
/// header still renders.
pub fn hijri_string(date: NaiveDate, offset_days: i32) -> String {
    let Some(adjusted) = date.checked_add_signed(Duration::days(offset_days as i64)) else {
        log::debug!("hijri offset {} out of range for {}", offset_days, date);
        return String::new();
    };

    match HijriDate::from_gr(
        adjusted.year() as usize,
        adjusted.month() as usize,
        adjusted.day() as usize,
    ) {
        Ok(hd) => format!("{} {} {} AH", hd.day(), hijri_month_name(hd.month()), hd.year()),
        Err(e) => {
            log::debug!("hijri conversion failed for {}: {}", adjusted, e);
            String::new()
        }
    }
}
