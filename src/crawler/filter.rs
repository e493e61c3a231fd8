//! Recency filtering and the fixed UTC+8 display zone
//!
//! Articles are normalized into a constant UTC+8 offset (not a geographic
//! timezone) for display and for the recency check. "Now" is the process's
//! local time.
//!
//! # Known defect
//!
//! [`RecencyFilter`] compares *calendar day-of-month* values, not elapsed
//! time. Across a month boundary the difference goes negative, so an article
//! from day 29 of the previous month is still accepted on day 2. This is the
//! policy the stored corpus was built with and it is kept as-is; switching to
//! an elapsed-duration comparison changes which articles get persisted.

use chrono::{DateTime, Datelike, FixedOffset, Local, TimeZone};

/// Offset of the display zone in seconds
pub const DISPLAY_OFFSET_SECS: i32 = 8 * 60 * 60;

/// The constant UTC+8 zone
pub fn display_zone() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_OFFSET_SECS).expect("UTC+8 is a valid offset")
}

/// Express an instant in the UTC+8 display zone
pub fn to_display_zone<Tz: TimeZone>(instant: DateTime<Tz>) -> DateTime<FixedOffset> {
    instant.with_timezone(&display_zone())
}

/// Accepts articles whose day-of-month is at most `days` behind today's
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyFilter {
    days: i64,
}

impl RecencyFilter {
    pub fn new(days: i64) -> Self {
        Self { days }
    }

    /// Threshold in days
    pub fn days(&self) -> i64 {
        self.days
    }

    /// Decide against the current local time
    pub fn accepts<Tz: TimeZone>(&self, update_time: &DateTime<Tz>) -> bool {
        self.accepts_at(&Local::now(), update_time)
    }

    /// Decide against an explicit "now"
    ///
    /// The day of `now` is read in the zone it is given in; the article's
    /// day is read in UTC+8.
    pub fn accepts_at<Tn: TimeZone, Tz: TimeZone>(
        &self,
        now: &DateTime<Tn>,
        update_time: &DateTime<Tz>,
    ) -> bool {
        let now_day = i64::from(now.day());
        let article_day = i64::from(to_display_zone(update_time.clone()).day());
        now_day - article_day <= self.days
    }
}

impl Default for RecencyFilter {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_display_zone_is_fixed_plus_eight() {
        let t = to_display_zone(at("2021-06-02T07:44:33Z"));
        assert_eq!(t.to_rfc3339(), "2021-06-02T15:44:33+08:00");
        // no DST adjustments in winter or summer
        let winter = to_display_zone(at("2021-01-02T07:44:33Z"));
        assert_eq!(winter.offset().local_minus_utc(), DISPLAY_OFFSET_SECS);
    }

    #[test]
    fn test_accepts_within_window() {
        let filter = RecencyFilter::new(3);
        let now = at("2021-06-05T12:00:00+08:00");
        assert!(filter.accepts_at(&now, &at("2021-06-02T12:00:00+08:00")));
        assert!(filter.accepts_at(&now, &at("2021-06-05T01:00:00+08:00")));
    }

    #[test]
    fn test_rejects_outside_window() {
        let filter = RecencyFilter::new(3);
        let now = at("2021-06-10T12:00:00+08:00");
        assert!(!filter.accepts_at(&now, &at("2021-06-02T12:00:00+08:00")));
    }

    #[test]
    fn test_day_of_month_policy_across_month_boundary() {
        // day 2 minus day 29 is negative, so a month-old article passes
        let filter = RecencyFilter::new(3);
        let now = at("2021-07-02T12:00:00+08:00");
        assert!(filter.accepts_at(&now, &at("2021-05-29T12:00:00+08:00")));
    }

    #[test]
    fn test_article_day_read_in_display_zone() {
        let filter = RecencyFilter::new(0);
        // 2021-06-04T20:00Z is already June 5th in UTC+8
        let now = at("2021-06-05T01:00:00+08:00");
        assert!(filter.accepts_at(&now, &at("2021-06-04T20:00:00Z")));
        assert!(!filter.accepts_at(&now, &at("2021-06-04T10:00:00Z")));
    }

    #[test]
    fn test_now_day_read_in_callers_zone() {
        let filter = RecencyFilter::new(3);
        // June 5th in UTC, already June 6th in UTC+8
        let now = at("2021-06-05T20:00:00Z");
        assert!(filter.accepts_at(&now, &at("2021-06-02T12:00:00+08:00")));

        let now_plus_eight = to_display_zone(now);
        assert!(!filter.accepts_at(&now_plus_eight, &at("2021-06-02T12:00:00+08:00")));
    }

    #[test]
    fn test_accepts_fresh_article_now() {
        let filter = RecencyFilter::default();
        assert!(filter.accepts(&Local::now()));
    }
}
