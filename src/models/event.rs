use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCategory {
    pub id: &'static str,
    pub label: &'static str,
}

/// Known categories in display order.
pub const CATEGORIES: &[EventCategory] = &[
    EventCategory { id: "lecture", label: "Lectures" },
    EventCategory { id: "community", label: "Community Events" },
    EventCategory { id: "youth", label: "Youth Programs" },
    EventCategory { id: "women", label: "Women's Events" },
    EventCategory { id: "education", label: "Educational" },
    EventCategory { id: "charity", label: "Charity & Fundraising" },
];

pub fn find_category(id: &str) -> Option<&'static EventCategory> {
    CATEGORIES.iter().find(|c| c.id.eq_ignore_ascii_case(id.trim()))
}

/// Label for a category id; unknown ids are shown as-is.
pub fn category_label(id: &str) -> String {
    find_category(id)
        .map(|c| c.label.to_string())
        .unwrap_or_else(|| id.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: Option<String>,
    pub speaker: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl Event {
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.is_active && self.date >= today
    }
}

/// Buckets events under their category label. Known categories come first in
/// [`CATEGORIES`] order, unknown ones after in order of first appearance.
/// Events keep their relative order inside a bucket.
pub fn group_by_category(events: &[Event]) -> Vec<(String, Vec<&Event>)> {
    let rank = |id: &str| {
        CATEGORIES
            .iter()
            .position(|c| c.id == id)
            .unwrap_or(CATEGORIES.len())
    };

    let mut groups: Vec<(&str, Vec<&Event>)> = Vec::new();
    for event in events {
        match groups.iter_mut().find(|(id, _)| *id == event.category) {
            Some((_, bucket)) => bucket.push(event),
            None => groups.push((event.category.as_str(), vec![event])),
        }
    }
    groups.sort_by_key(|(id, _)| rank(id));

    groups
        .into_iter()
        .map(|(id, bucket)| (category_label(id), bucket))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, category: &str, day: u32) -> Event {
        Event {
            id,
            title: format!("Event {}", id),
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, day).unwrap(),
            time: "7:00 PM".to_string(),
            location: None,
            speaker: None,
            description: None,
            is_active: true,
        }
    }

    #[test]
    fn labels_fall_back_to_the_id() {
        assert_eq!(category_label("youth"), "Youth Programs");
        assert_eq!(category_label("sports"), "sports");
        assert_eq!(find_category(" Lecture ").map(|c| c.id), Some("lecture"));
    }

    #[test]
    fn upcoming_needs_active_and_not_past() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 11).unwrap();
        assert!(event(1, "lecture", 11).is_upcoming(today));
        assert!(!event(2, "lecture", 10).is_upcoming(today));
        let mut hidden = event(3, "lecture", 12);
        hidden.is_active = false;
        assert!(!hidden.is_upcoming(today));
    }

    #[test]
    fn groups_follow_category_order() {
        let events = vec![
            event(1, "charity", 12),
            event(2, "sports", 13),
            event(3, "lecture", 14),
            event(4, "charity", 15),
        ];
        let groups = group_by_category(&events);
        let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Lectures", "Charity & Fundraising", "sports"]);
        let charity: Vec<i64> = groups[1].1.iter().map(|e| e.id).collect();
        assert_eq!(charity, [1, 4]);
    }
}
