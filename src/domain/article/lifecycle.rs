//! Time-based classification of articles.
//!
//! Every predicate takes `now` explicitly and nothing here is cached: an
//! article stops being fresh purely because the wall clock moved on.

use chrono::{DateTime, Duration, Months, NaiveTime, Utc};

/// How long after its last update an article counts as fresh.
pub fn freshness_limit() -> Duration {
    Duration::days(7)
}

/// Calendar months after which an untouched article is stale.
pub const STALENESS_MONTHS: u32 = 6;

/// Minimum spacing between two staleness reminders to the same author.
pub fn author_reminder_interval() -> Duration {
    Duration::days(7)
}

/// Oldest `updated_at` that still counts as fresh.
pub fn freshness_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - freshness_limit()
}

/// Articles updated strictly before this instant are stale.
pub fn staleness_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(STALENESS_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn is_fresh(
    now: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    archived_at: Option<DateTime<Utc>>,
    rotted_at: Option<DateTime<Utc>>,
) -> bool {
    archived_at.is_none() && rotted_at.is_none() && updated_at >= freshness_cutoff(now)
}

/// Time-only condition; archived and rotten articles can be stale too.
pub fn is_stale(now: DateTime<Utc>, updated_at: DateTime<Utc>) -> bool {
    updated_at < staleness_cutoff(now)
}

pub fn is_rotten(rotted_at: Option<DateTime<Utc>>) -> bool {
    rotted_at.is_some()
}

pub fn is_archived(archived_at: Option<DateTime<Utc>>) -> bool {
    archived_at.is_some()
}

pub fn start_of_day(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// True when the author was reminded less than a week ago, counted from the
/// start of the day the last reminder went out.
pub fn recently_notified(now: DateTime<Utc>, last_notified_at: Option<DateTime<Utc>>) -> bool {
    last_notified_at
        .is_some_and(|last| now - start_of_day(last) <= author_reminder_interval())
}

pub fn ready_to_notify_author(now: DateTime<Utc>, last_notified_at: Option<DateTime<Utc>>) -> bool {
    !recently_notified(now, last_notified_at)
}
