//! Turns a stored [`PrayerRecord`] plus the current wall clock into the
//! displayed schedule and the next-prayer countdown.
//!
//! Nothing here fails: unresolvable values become [`UNKNOWN_TIME`] and an
//! unresolvable countdown becomes `None`, so a bad record never blanks the board.

use chrono::{Days, NaiveDateTime};
use serde::Serialize;

use crate::models::{IqamaType, PrayerEntry, PrayerRecord, PrayerType};
use crate::prayer_times::time_of_day::TimeOfDay;
use crate::utils::format::format_time_remaining;

/// Placeholder shown for any time that is missing or cannot be worked out.
pub const UNKNOWN_TIME: &str = "--:--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IqamaResolution {
    /// Computed from Adhan + offset.
    Resolved(TimeOfDay),
    /// Administrator-entered fixed time, shown verbatim.
    Fixed(String),
    Unresolvable,
}

impl IqamaResolution {
    pub fn display(&self) -> String {
        match self {
            IqamaResolution::Resolved(t) => t.to_string(),
            IqamaResolution::Fixed(s) => s.clone(),
            IqamaResolution::Unresolvable => UNKNOWN_TIME.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayPrayer {
    pub prayer: PrayerType,
    pub adhan: String,
    pub iqama: String,
    pub is_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextPrayer {
    pub prayer: PrayerType,
    pub time_remaining: String,
}

impl NextPrayer {
    pub fn banner(&self) -> String {
        format!(
            "{} Jama'ah is in {}",
            self.prayer.display_name(),
            self.time_remaining
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub prayers: Vec<DisplayPrayer>,
    pub next: Option<NextPrayer>,
}

/// Whitespace-only counts as absent; anything else is passed through untouched.
fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Works out the Iqama for one prayer.
///
/// Fixed mode ignores the Adhan and offset entirely. Offset mode needs a
/// parseable Adhan and an offset; the sum wraps past midnight.
pub fn resolve_iqama(
    adhan: Option<&str>,
    iqama_type: IqamaType,
    iqama_fixed: Option<&str>,
    offset_minutes: Option<i32>,
) -> IqamaResolution {
    match iqama_type {
        IqamaType::Fixed => match non_blank(iqama_fixed) {
            Some(fixed) => IqamaResolution::Fixed(fixed.to_string()),
            None => IqamaResolution::Unresolvable,
        },
        IqamaType::Offset => {
            let (Some(adhan), Some(offset)) = (non_blank(adhan), offset_minutes) else {
                return IqamaResolution::Unresolvable;
            };
            match adhan.parse::<TimeOfDay>() {
                Ok(t) => IqamaResolution::Resolved(t.add_minutes(offset as i64)),
                Err(e) => {
                    log::debug!("unparseable adhan '{}': {}", adhan, e);
                    IqamaResolution::Unresolvable
                }
            }
        }
    }
}

pub fn resolve_iqama_display(
    adhan: Option<&str>,
    iqama_type: IqamaType,
    iqama_fixed: Option<&str>,
    offset_minutes: Option<i32>,
) -> String {
    resolve_iqama(adhan, iqama_type, iqama_fixed, offset_minutes).display()
}

pub fn resolve_entry(entry: &PrayerEntry) -> IqamaResolution {
    resolve_iqama(
        entry.adhan.as_deref(),
        entry.iqama_type,
        entry.iqama_fixed.as_deref(),
        entry.iqama_offset,
    )
}

fn countdown(prayer: PrayerType, at: NaiveDateTime, now: NaiveDateTime) -> NextPrayer {
    let minutes = (at - now).num_seconds().div_euclid(60);
    NextPrayer {
        prayer,
        time_remaining: format_time_remaining(minutes),
    }
}

/// Picks the first prayer, in the order given, whose Iqama is still ahead of
/// `now` today. When none is, falls back to Fajr tomorrow.
///
/// The scan trusts the input order; out-of-order data picks the first future
/// match rather than the soonest.
pub fn compute_next_prayer(prayers: &[DisplayPrayer], now: NaiveDateTime) -> Option<NextPrayer> {
    let today = now.date();
    let iqama_at = |p: &DisplayPrayer| {
        p.iqama
            .parse::<TimeOfDay>()
            .ok()
            .map(|t| today.and_time(t.to_naive_time()))
    };

    for p in prayers {
        if let Some(at) = iqama_at(p) {
            if at > now {
                return Some(countdown(p.prayer, at, now));
            }
        }
    }

    let fajr = prayers.iter().find(|p| p.prayer == PrayerType::Fajr)?;
    let tomorrow = iqama_at(fajr)?.checked_add_days(Days::new(1))?;
    log::debug!("no prayer left today, counting down to Fajr on {}", tomorrow.date());
    Some(countdown(PrayerType::Fajr, tomorrow, now))
}

/// Builds the five display rows and the countdown. `None` renders an
/// all-placeholder board with no countdown.
pub fn build_schedule(record: Option<&PrayerRecord>, now: NaiveDateTime) -> Schedule {
    let mut prayers: Vec<DisplayPrayer> = PrayerType::all()
        .into_iter()
        .map(|prayer| {
            let entry = record.map(|r| r.entry(prayer));
            DisplayPrayer {
                prayer,
                adhan: entry
                    .and_then(|e| non_blank(e.adhan.as_deref()))
                    .unwrap_or(UNKNOWN_TIME)
                    .to_string(),
                iqama: entry
                    .map(|e| {
                        resolve_iqama_display(
                            e.adhan.as_deref(),
                            e.iqama_type,
                            e.iqama_fixed.as_deref(),
                            e.iqama_offset,
                        )
                    })
                    .unwrap_or_else(|| UNKNOWN_TIME.to_string()),
                is_next: false,
            }
        })
        .collect();

    let next = compute_next_prayer(&prayers, now);
    if let Some(next) = &next {
        if let Some(row) = prayers.iter_mut().find(|p| p.prayer == next.prayer) {
            row.is_next = true;
        }
    }

    Schedule { prayers, next }
}

/// Adjacent prayers whose resolved Iqama is not strictly later than the one
/// before it. Unresolvable times are skipped.
pub fn out_of_order(record: &PrayerRecord) -> Vec<(PrayerType, PrayerType)> {
    let resolved: Vec<(PrayerType, TimeOfDay)> = record
        .entries()
        .filter_map(|(p, e)| {
            resolve_entry(e)
                .display()
                .parse::<TimeOfDay>()
                .ok()
                .map(|t| (p, t))
        })
        .collect();

    resolved
        .windows(2)
        .filter(|w| w[1].1 <= w[0].1)
        .map(|w| (w[0].0, w[1].0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(date: (i32, u32, u32), h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn board(iqamas: [&str; 5]) -> Vec<DisplayPrayer> {
        PrayerType::all()
            .into_iter()
            .zip(iqamas)
            .map(|(prayer, iqama)| DisplayPrayer {
                prayer,
                adhan: UNKNOWN_TIME.to_string(),
                iqama: iqama.to_string(),
                is_next: false,
            })
            .collect()
    }

    fn sample_board() -> Vec<DisplayPrayer> {
        board(["5:20 AM", "12:30 PM", "4:00 PM", "6:45 PM", "8:15 PM"])
    }

    fn sample_record() -> PrayerRecord {
        PrayerRecord {
            fajr: PrayerEntry::offset("05:00 AM", 20),
            dhuhr: PrayerEntry::fixed("12:10 PM", "12:30 PM"),
            asr: PrayerEntry::fixed("3:45 PM", "4:00 PM"),
            maghrib: PrayerEntry::offset("6:40 PM", 5),
            isha: PrayerEntry::offset("7:55 PM", 20),
            last_updated: None,
        }
    }

    #[test]
    fn offset_adds_minutes_to_adhan() {
        let s = resolve_iqama_display(Some("05:00 AM"), IqamaType::Offset, None, Some(20));
        assert_eq!(s, "5:20 AM");
    }

    #[test]
    fn offset_wraps_past_midnight() {
        let s = resolve_iqama_display(Some("11:50 PM"), IqamaType::Offset, None, Some(20));
        assert_eq!(s, "12:10 AM");
    }

    #[test]
    fn offset_needs_adhan_and_minutes() {
        assert_eq!(
            resolve_iqama(None, IqamaType::Offset, None, Some(20)),
            IqamaResolution::Unresolvable
        );
        assert_eq!(
            resolve_iqama(Some("05:00 AM"), IqamaType::Offset, Some("5:30 AM"), None),
            IqamaResolution::Unresolvable
        );
        assert_eq!(
            resolve_iqama_display(Some("dawn"), IqamaType::Offset, None, Some(20)),
            UNKNOWN_TIME
        );
    }

    #[test]
    fn fixed_is_verbatim_or_placeholder() {
        assert_eq!(
            resolve_iqama_display(Some("05:00 AM"), IqamaType::Fixed, Some("5:45 AM"), Some(20)),
            "5:45 AM"
        );
        assert_eq!(
            resolve_iqama_display(Some("05:00 AM"), IqamaType::Fixed, None, Some(20)),
            UNKNOWN_TIME
        );
        assert_eq!(
            resolve_iqama_display(None, IqamaType::Fixed, Some("   "), None),
            UNKNOWN_TIME
        );
        assert_eq!(
            resolve_iqama_display(None, IqamaType::Fixed, Some(" 5:45 AM "), None),
            " 5:45 AM "
        );
        assert_eq!(
            resolve_iqama_display(None, IqamaType::Fixed, Some("after Dhuhr"), None),
            "after Dhuhr"
        );
    }

    #[test]
    fn padded_fixed_iqama_still_counts_down() {
        let mut record = PrayerRecord::default();
        record.asr = PrayerEntry::fixed("3:45 PM", " 4:00 PM ");
        let schedule = build_schedule(Some(&record), at((2025, 10, 11), 15, 0));
        assert_eq!(schedule.prayers[2].iqama, " 4:00 PM ");
        assert_eq!(schedule.next.unwrap().time_remaining, "1 Hour 0 Minutes");
    }

    #[test]
    fn next_prayer_mid_afternoon_is_asr() {
        let next = compute_next_prayer(&sample_board(), at((2025, 10, 11), 15, 0)).unwrap();
        assert_eq!(next.prayer, PrayerType::Asr);
        assert_eq!(next.time_remaining, "1 Hour 0 Minutes");
        assert_eq!(next.banner(), "Asr Jama'ah is in 1 Hour 0 Minutes");
    }

    #[test]
    fn after_isha_counts_down_to_fajr_tomorrow() {
        let next = compute_next_prayer(&sample_board(), at((2025, 10, 11), 21, 0)).unwrap();
        assert_eq!(next.prayer, PrayerType::Fajr);
        assert_eq!(next.time_remaining, "8 Hours 20 Minutes");
    }

    #[test]
    fn tomorrow_fallback_crosses_month_end() {
        let next = compute_next_prayer(&sample_board(), at((2025, 1, 31), 23, 50)).unwrap();
        assert_eq!(next.prayer, PrayerType::Fajr);
        assert_eq!(next.time_remaining, "5 Hours 30 Minutes");
    }

    #[test]
    fn partial_minutes_are_floored() {
        let now = at((2025, 10, 11), 16, 14) + chrono::Duration::seconds(30);
        let next = compute_next_prayer(&sample_board(), now).unwrap();
        assert_eq!(next.prayer, PrayerType::Maghrib);
        assert_eq!(next.time_remaining, "2 Hours 30 Minutes");
    }

    #[test]
    fn under_an_hour_omits_hours() {
        let next = compute_next_prayer(&sample_board(), at((2025, 10, 11), 12, 29)).unwrap();
        assert_eq!(next.prayer, PrayerType::Dhuhr);
        assert_eq!(next.time_remaining, "1 Minute");
    }

    #[test]
    fn equal_time_is_not_next() {
        let next = compute_next_prayer(&sample_board(), at((2025, 10, 11), 16, 0)).unwrap();
        assert_eq!(next.prayer, PrayerType::Maghrib);
    }

    #[test]
    fn placeholders_are_skipped() {
        let prayers = board(["5:20 AM", UNKNOWN_TIME, UNKNOWN_TIME, "6:45 PM", UNKNOWN_TIME]);
        let next = compute_next_prayer(&prayers, at((2025, 10, 11), 10, 0)).unwrap();
        assert_eq!(next.prayer, PrayerType::Maghrib);
    }

    #[test]
    fn all_placeholders_yield_none() {
        let prayers = board([UNKNOWN_TIME; 5]);
        assert_eq!(compute_next_prayer(&prayers, at((2025, 10, 11), 3, 0)), None);
    }

    #[test]
    fn unparseable_fajr_after_isha_yields_none() {
        let prayers = board(["soon", "12:30 PM", "4:00 PM", "6:45 PM", "8:15 PM"]);
        assert_eq!(compute_next_prayer(&prayers, at((2025, 10, 11), 22, 0)), None);
    }

    #[test]
    fn out_of_order_input_takes_first_future_match() {
        let prayers = board(["5:20 AM", "12:30 PM", "9:00 PM", "6:45 PM", "8:15 PM"]);
        let next = compute_next_prayer(&prayers, at((2025, 10, 11), 17, 0)).unwrap();
        assert_eq!(next.prayer, PrayerType::Asr);
    }

    #[test]
    fn schedule_marks_exactly_one_next_row() {
        let record = sample_record();
        let schedule = build_schedule(Some(&record), at((2025, 10, 11), 15, 0));
        let iqamas: Vec<&str> = schedule.prayers.iter().map(|p| p.iqama.as_str()).collect();
        assert_eq!(iqamas, ["5:20 AM", "12:30 PM", "4:00 PM", "6:45 PM", "8:15 PM"]);
        assert_eq!(schedule.prayers[0].adhan, "05:00 AM");
        let next_rows: Vec<PrayerType> = schedule
            .prayers
            .iter()
            .filter(|p| p.is_next)
            .map(|p| p.prayer)
            .collect();
        assert_eq!(next_rows, [PrayerType::Asr]);
    }

    #[test]
    fn schedule_without_record_is_all_placeholders() {
        let schedule = build_schedule(None, at((2025, 10, 11), 15, 0));
        assert!(schedule.prayers.iter().all(|p| p.adhan == UNKNOWN_TIME && p.iqama == UNKNOWN_TIME));
        assert!(schedule.prayers.iter().all(|p| !p.is_next));
        assert_eq!(schedule.next, None);
    }

    #[test]
    fn detects_out_of_order_records() {
        assert!(out_of_order(&sample_record()).is_empty());
        let mut record = sample_record();
        record.asr = PrayerEntry::fixed("3:45 PM", "9:00 PM");
        assert_eq!(
            out_of_order(&record),
            [(PrayerType::Asr, PrayerType::Maghrib)]
        );
    }

    proptest! {
        #[test]
        fn fixed_ignores_adhan_and_offset(
            adhan_min in 0i64..1440,
            offset in proptest::option::of(-600i32..600),
            fixed_min in 0i64..1440,
        ) {
            let fixed = TimeOfDay::from_minutes(fixed_min).to_string();
            let adhan = TimeOfDay::from_minutes(adhan_min).to_string();
            let with = resolve_iqama_display(Some(&adhan), IqamaType::Fixed, Some(&fixed), offset);
            let without = resolve_iqama_display(None, IqamaType::Fixed, Some(&fixed), None);
            prop_assert_eq!(&with, &fixed);
            prop_assert_eq!(with, without);
        }

        #[test]
        fn a_day_of_offset_changes_nothing(adhan_min in 0i64..1440, offset in -1440i32..1440) {
            let adhan = TimeOfDay::from_minutes(adhan_min).to_string();
            prop_assert_eq!(
                resolve_iqama_display(Some(&adhan), IqamaType::Offset, None, Some(offset + 1440)),
                resolve_iqama_display(Some(&adhan), IqamaType::Offset, None, Some(offset))
            );
        }
    }
}
