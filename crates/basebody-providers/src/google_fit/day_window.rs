// ABOUTME: Local calendar-day window arithmetic for aggregate queries
// ABOUTME: Computes midnight boundaries and maps bucket start times back to dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};

/// Half-open `[start, end)` window in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive start
    pub start_millis: i64,
    /// Exclusive end
    pub end_millis: i64,
}

/// First instant of `date` in `tz`
///
/// Zones that skip midnight on a DST transition start the day at the first
/// valid local time after it.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}

/// Window from local midnight of `now`'s day through `now`
pub fn today_window<Tz: TimeZone>(now: &DateTime<Tz>) -> TimeWindow {
    let start = local_midnight(&now.timezone(), now.date_naive());
    TimeWindow {
        start_millis: start.timestamp_millis(),
        end_millis: now.timestamp_millis(),
    }
}

/// Window covering the whole local days `start..=end`
///
/// Callers must ensure `start <= end`.
pub fn range_window<Tz: TimeZone>(tz: &Tz, start: NaiveDate, end: NaiveDate) -> TimeWindow {
    let after_end = end.succ_opt().unwrap_or(end);
    TimeWindow {
        start_millis: local_midnight(tz, start).timestamp_millis(),
        end_millis: local_midnight(tz, after_end).timestamp_millis(),
    }
}

/// Local calendar day a bucket starting at `start_millis` belongs to
///
/// Fixed 24h buckets drift by an hour across DST changes, so the bucket's
/// midpoint decides the day.
pub fn bucket_date<Tz: TimeZone>(tz: &Tz, start_millis: i64) -> Option<NaiveDate> {
    let midpoint = start_millis.checked_add(Duration::hours(12).num_milliseconds())?;
    DateTime::from_timestamp_millis(midpoint).map(|utc| utc.with_timezone(tz).date_naive())
}

/// Every date from `start` through `end`, inclusive
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_window_starts_at_local_midnight() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2025, 3, 14, 15, 30, 0).unwrap();

        let window = today_window(&now);
        let expected_start = tz.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();

        assert_eq!(window.start_millis, expected_start.timestamp_millis());
        assert_eq!(window.end_millis, now.timestamp_millis());
    }

    #[test]
    fn test_single_day_range_is_one_day_wide() {
        let d = date(2025, 3, 14);
        let window = range_window(&Utc, d, d);
        assert_eq!(window.end_millis - window.start_millis, 86_400_000);
    }

    #[test]
    fn test_bucket_date_maps_back_to_calendar_day() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let start = local_midnight(&tz, date(2025, 1, 31)).timestamp_millis();
        assert_eq!(bucket_date(&tz, start), Some(date(2025, 1, 31)));
        assert_eq!(
            bucket_date(&tz, start + 86_400_000),
            Some(date(2025, 2, 1))
        );
    }

    #[test]
    fn test_days_inclusive_crosses_month_boundary() {
        let days = days_inclusive(date(2025, 2, 27), date(2025, 3, 2));
        assert_eq!(
            days,
            vec![
                date(2025, 2, 27),
                date(2025, 2, 28),
                date(2025, 3, 1),
                date(2025, 3, 2)
            ]
        );
        assert_eq!(days_inclusive(date(2025, 3, 2), date(2025, 3, 2)).len(), 1);
    }
}
