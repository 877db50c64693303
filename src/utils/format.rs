use chrono::{NaiveDate, NaiveDateTime};

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{} {}", count, unit)
    } else {
        format!("{} {}s", count, unit)
    }
}

/// Format whole minutes as "H Hour(s) M Minute(s)", or "M Minute(s)" under an hour.
pub fn format_time_remaining(total_minutes: i64) -> String {
    let total_minutes = total_minutes.max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{} {}", plural(hours, "Hour"), plural(minutes, "Minute"))
    } else {
        plural(minutes, "Minute")
    }
}

/// 1st, 2nd, 3rd, 4th ... 11th, 12th, 13th ... 21st
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// "Saturday, October 11, 2025"
pub fn format_long_date(now: NaiveDateTime) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

/// "3:07 PM"
pub fn format_clock(now: NaiveDateTime) -> String {
    now.format("%-I:%M %p").to_string()
}

/// "Sat, Oct 11, 2025"
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%a, %b %-d, %Y").to_string()
}
