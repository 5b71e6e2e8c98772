use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Meeting, MeetingStatus};

/// How many minutes before the scheduled start a participant may already join.
pub const EARLY_JOIN_MINUTES: i64 = 10;

/// Scheduled meetings strictly after `now`, in input order, truncated to
/// `limit`. Input order is preserved deliberately: callers hand in a
/// pre-ordered collection and the dashboard relies on that ordering.
pub fn upcoming(meetings: &[Meeting], now: DateTime<Utc>, limit: usize) -> Vec<&Meeting> {
    meetings
        .iter()
        .filter(|meeting| meeting.status == MeetingStatus::Scheduled && meeting.start_time > now)
        .take(limit)
        .collect()
}

pub fn ongoing(meetings: &[Meeting]) -> Vec<&Meeting> {
    meetings
        .iter()
        .filter(|meeting| meeting.status == MeetingStatus::Ongoing)
        .collect()
}

/// Meetings starting on the same calendar date as `now`. This is a date
/// comparison, not a 24-hour window.
pub fn today(meetings: &[Meeting], now: DateTime<Utc>) -> Vec<&Meeting> {
    meetings
        .iter()
        .filter(|meeting| meeting.start_time.date_naive() == now.date_naive())
        .collect()
}

/// Meetings inside the Sunday-based week containing `now`. The window keeps
/// `now`'s time of day on both endpoints: `[now - weekday days, start + 6d]`.
pub fn this_week(meetings: &[Meeting], now: DateTime<Utc>) -> Vec<&Meeting> {
    let week_start = now - Duration::days(i64::from(now.weekday().num_days_from_sunday()));
    let week_end = week_start + Duration::days(6);

    meetings
        .iter()
        .filter(|meeting| meeting.start_time >= week_start && meeting.start_time <= week_end)
        .collect()
}

/// Join-eligibility window: ongoing meetings are always joinable; scheduled
/// ones from ten minutes before start until the scheduled end.
pub fn can_join(meeting: &Meeting, now: DateTime<Utc>) -> bool {
    meeting.status == MeetingStatus::Ongoing
        || (now >= meeting.start_time - Duration::minutes(EARLY_JOIN_MINUTES)
            && now <= meeting.end_time())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    All,
    Scheduled,
    Ongoing,
    Completed,
}

impl StatusFilter {
    fn matches(self, status: MeetingStatus) -> bool {
        match self {
            Self::All => true,
            Self::Scheduled => status == MeetingStatus::Scheduled,
            Self::Ongoing => status == MeetingStatus::Ongoing,
            Self::Completed => status == MeetingStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    StartTime,
    Title,
    Participants,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// View-state record for the meeting list: search, status filter and sort
/// toggles live here, away from the domain entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingQuery {
    pub search: String,
    pub status: StatusFilter,
    pub sort_key: SortKey,
    pub order: SortOrder,
}

impl Default for MeetingQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort_key: SortKey::StartTime,
            order: SortOrder::Asc,
        }
    }
}

impl MeetingQuery {
    /// Clicking the active sort column flips the direction; a new column
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.order = match self.order {
                SortOrder::Asc => SortOrder::Desc,
                SortOrder::Desc => SortOrder::Asc,
            };
        } else {
            self.sort_key = key;
            self.order = SortOrder::Asc;
        }
    }
}

/// Case-insensitive substring filter over title, description and host name,
/// then status filter, then a stable sort by the selected key.
pub fn filter_and_sort<'a>(meetings: &'a [Meeting], query: &MeetingQuery) -> Vec<&'a Meeting> {
    let needle = query.search.to_lowercase();

    let mut selected: Vec<&Meeting> = meetings
        .iter()
        .filter(|meeting| {
            let matches_search = needle.is_empty()
                || meeting.title.to_lowercase().contains(&needle)
                || meeting.description.to_lowercase().contains(&needle)
                || meeting.host.name.to_lowercase().contains(&needle);
            matches_search && query.status.matches(meeting.status)
        })
        .collect();

    selected.sort_by(|a, b| {
        let comparison = match query.sort_key {
            SortKey::Title => a.title.cmp(&b.title),
            SortKey::Participants => a.participants.len().cmp(&b.participants.len()),
            SortKey::StartTime => a.start_time.cmp(&b.start_time),
        };
        match query.order {
            SortOrder::Asc => comparison,
            SortOrder::Desc => comparison.reverse(),
        }
    });

    selected
}

/// "2:05 PM"
pub fn format_clock_time(instant: DateTime<Utc>) -> String {
    instant.format("%-I:%M %p").to_string()
}

/// "Mon, Jan 5"
pub fn format_day(instant: DateTime<Utc>) -> String {
    instant.format("%a, %b %-d").to_string()
}

/// Human bucket for how far `instant` is from `now`: "Now", "In 5m",
/// "In 3h", "In 2d", "5m ago", "3h ago", "2d ago", else a plain date.
pub fn relative_time(instant: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (instant - now).num_seconds().div_euclid(60);

    if minutes == 0 {
        return "Now".to_string();
    }

    if minutes > 0 {
        if minutes < 60 {
            return format!("In {minutes}m");
        }
        let hours = minutes / 60;
        if hours < 24 {
            return format!("In {hours}h");
        }
        let days = hours / 24;
        if days < 7 {
            return format!("In {days}d");
        }
    } else {
        let minutes = -minutes;
        if minutes < 60 {
            return format!("{minutes}m ago");
        }
        let hours = minutes / 60;
        if hours < 24 {
            return format!("{hours}h ago");
        }
        let days = hours / 24;
        if days < 7 {
            return format!("{days}d ago");
        }
    }

    instant.format("%-m/%-d/%Y").to_string()
}
