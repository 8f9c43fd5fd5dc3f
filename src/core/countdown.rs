//! Countdown math: time left until the next occurrence of a holiday date.
//!
//! Instants are zone-aware `DateTime`s. The holiday is midnight local time in
//! the zone of `now`, and the remaining time is the real difference between the
//! two instants, so a DST change in between shows up in the count.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

pub const MS_PER_SECOND: i64 = 1000;
pub const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Month/day anchor of the countdown. Midnight local time on that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayDate {
    pub month: u32,
    pub day: u32,
}

impl Default for HolidayDate {
    fn default() -> Self {
        Self::CHRISTMAS
    }
}

impl HolidayDate {
    pub const CHRISTMAS: HolidayDate = HolidayDate { month: 12, day: 25 };

    /// Feb 29 is rejected: it would skip three years out of four.
    pub fn new(month: u32, day: u32) -> Result<Self> {
        // 2023 is not a leap year.
        if NaiveDate::from_ymd_opt(2023, month, day).is_none() {
            return Err(Error::InvalidHolidayDate { month, day });
        }
        Ok(Self { month, day })
    }

    pub fn in_year(self, year: i32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)?.and_hms_opt(0, 0, 0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemainingTime {
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl RemainingTime {
    pub const ZERO: RemainingTime = RemainingTime {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    pub fn from_millis(diff_ms: i64) -> Self {
        if diff_ms <= 0 {
            return Self::ZERO;
        }
        Self {
            days: (diff_ms / MS_PER_DAY).min(u32::MAX as i64) as u32,
            hours: ((diff_ms / MS_PER_HOUR) % 24) as u32,
            minutes: ((diff_ms / MS_PER_MINUTE) % 60) as u32,
            seconds: ((diff_ms / MS_PER_SECOND) % 60) as u32,
        }
    }

    pub fn total_millis(&self) -> i64 {
        self.days as i64 * MS_PER_DAY
            + self.hours as i64 * MS_PER_HOUR
            + self.minutes as i64 * MS_PER_MINUTE
            + self.seconds as i64 * MS_PER_SECOND
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for RemainingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Remaining time from `now` to `target`; all zeros when `target` is not in the future.
pub fn compute_remaining<Tz: TimeZone, Tz2: TimeZone>(
    now: &DateTime<Tz>,
    target: &DateTime<Tz2>,
) -> RemainingTime {
    RemainingTime::from_millis(target.timestamp_millis() - now.timestamp_millis())
}

/// Pin a local wall-clock time to an instant in `tz`.
///
/// Ambiguous times take the earlier instant. A time inside a spring-forward gap
/// moves to the first valid instant after it.
fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(t) => Some(t),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=4)
            .map(|h| local + Duration::minutes(30 * h))
            .find_map(|shifted| tz.from_local_datetime(&shifted).earliest()),
    }
}

/// This year's occurrence if `now` is strictly before it, otherwise the next one.
pub fn next_target<Tz: TimeZone>(now: &DateTime<Tz>, holiday: HolidayDate) -> Option<DateTime<Tz>> {
    let tz = now.timezone();
    // Unvalidated dates (Feb 29) only exist in some years; look a few ahead.
    (now.year()..=now.year() + 8)
        .filter_map(|year| holiday.in_year(year))
        .filter_map(|local| resolve_local(&tz, local))
        .find(|target| now.timestamp_millis() < target.timestamp_millis())
}

pub fn remaining_until<Tz: TimeZone>(now: &DateTime<Tz>, holiday: HolidayDate) -> RemainingTime {
    match next_target(now, holiday) {
        Some(target) => compute_remaining(now, &target),
        None => RemainingTime::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Offset, Utc};

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32, ms: u32) -> DateTime<Utc> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_milli_opt(hh, mm, ss, ms)
            .unwrap();
        Utc.from_utc_datetime(&naive)
    }

    /// US Eastern for 2026: UTC-4 from Mar 8 07:00 UTC to Nov 1 06:00 UTC, UTC-5 otherwise.
    #[derive(Debug, Clone, Copy)]
    struct Eastern2026;

    impl Eastern2026 {
        fn offset_at_utc(utc: &NaiveDateTime) -> FixedOffset {
            let dst_start = at(2026, 3, 8, 7, 0, 0, 0).naive_utc();
            let dst_end = at(2026, 11, 1, 6, 0, 0, 0).naive_utc();
            let hours = if (dst_start..dst_end).contains(utc) { -4 } else { -5 };
            FixedOffset::east_opt(hours * 3600).unwrap()
        }
    }

    impl TimeZone for Eastern2026 {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            Eastern2026
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let fits: Vec<FixedOffset> = [-4, -5]
                .into_iter()
                .map(|h| FixedOffset::east_opt(h * 3600).unwrap())
                .filter(|off| Self::offset_at_utc(&(*local - *off)) == *off)
                .collect();
            match fits.as_slice() {
                [one] => LocalResult::Single(*one),
                [a, b] => LocalResult::Ambiguous(*a, *b),
                _ => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            Self::offset_at_utc(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            Self::offset_at_utc(utc)
        }
    }

    fn eastern(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Eastern2026> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap();
        Eastern2026.from_local_datetime(&naive).earliest().unwrap()
    }

    #[test]
    fn fields_stay_in_natural_ranges_and_reconstruct_difference() {
        let target = at(2026, 12, 25, 0, 0, 0, 0);
        let mut now = at(2026, 1, 1, 0, 0, 0, 0);
        // Walk the year in irregular steps.
        while now < target {
            let diff = (target - now).num_milliseconds();
            let r = compute_remaining(&now, &target);
            assert!(r.hours < 24 && r.minutes < 60 && r.seconds < 60);
            let rebuilt = r.total_millis();
            assert!(rebuilt <= diff && diff < rebuilt + 1000, "{now}: {r:?} vs {diff}");
            now += Duration::milliseconds(7_654_321);
        }
    }

    #[test]
    fn known_value() {
        let r = compute_remaining(
            &at(2026, 10, 19, 12, 30, 15, 500),
            &at(2026, 12, 25, 0, 0, 0, 0),
        );
        assert_eq!(
            r,
            RemainingTime {
                days: 66,
                hours: 11,
                minutes: 29,
                seconds: 44
            }
        );
        assert_eq!(r.to_string(), "66d 11h 29m 44s");
    }

    #[test]
    fn past_or_equal_target_is_zero() {
        let t = at(2026, 12, 25, 0, 0, 0, 0);
        assert!(compute_remaining(&t, &t).is_zero());
        assert!(compute_remaining(&at(2026, 12, 26, 0, 0, 0, 0), &t).is_zero());
    }

    #[test]
    fn target_this_year_before_holiday() {
        let now = at(2026, 12, 24, 23, 59, 59, 0);
        assert_eq!(
            next_target(&now, HolidayDate::CHRISTMAS),
            Some(at(2026, 12, 25, 0, 0, 0, 0))
        );
        assert_eq!(
            remaining_until(&now, HolidayDate::CHRISTMAS),
            RemainingTime {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 1
            }
        );
    }

    #[test]
    fn rolls_forward_at_and_after_holiday() {
        for now in [
            at(2026, 12, 25, 0, 0, 0, 0),
            at(2026, 12, 25, 18, 0, 0, 0),
            at(2026, 12, 26, 0, 0, 0, 0),
            at(2026, 12, 31, 23, 59, 59, 999),
        ] {
            let target = next_target(&now, HolidayDate::CHRISTMAS).unwrap();
            assert_eq!(target, at(2027, 12, 25, 0, 0, 0, 0));
            assert!(!remaining_until(&now, HolidayDate::CHRISTMAS).is_zero());
        }
    }

    #[test]
    fn dec_26_counts_a_full_year_minus_a_day() {
        let r = remaining_until(&at(2026, 12, 26, 0, 0, 0, 0), HolidayDate::CHRISTMAS);
        assert_eq!(r.days, 364);
        assert_eq!((r.hours, r.minutes, r.seconds), (0, 0, 0));
    }

    #[test]
    fn target_is_local_midnight_in_the_zone_of_now() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = plus_two.with_ymd_and_hms(2026, 12, 24, 22, 0, 0).unwrap();
        let target = next_target(&now, HolidayDate::CHRISTMAS).unwrap();
        assert_eq!(*target.offset(), plus_two);
        assert_eq!(target.naive_local(), at(2026, 12, 25, 0, 0, 0, 0).naive_utc());
        assert_eq!(remaining_until(&now, HolidayDate::CHRISTMAS).hours, 2);
    }

    #[test]
    fn dst_change_before_holiday_counts_the_extra_hour() {
        // Clocks fall back on Nov 1, so Oct 19 noon EDT to Dec 25 midnight EST is 66d 13h.
        let now = eastern(2026, 10, 19, 12, 0);
        let target = next_target(&now, HolidayDate::CHRISTMAS).unwrap();
        assert_eq!(target.offset().fix().local_minus_utc(), -5 * 3600);
        assert_eq!(target.timestamp_millis() - now.timestamp_millis(), 5_749_200_000);
        assert_eq!(
            remaining_until(&now, HolidayDate::CHRISTMAS),
            RemainingTime {
                days: 66,
                hours: 13,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn holiday_in_a_dst_gap_moves_past_it() {
        // 02:30 on Mar 8 2026 does not exist in US Eastern.
        let naive = NaiveDate::from_ymd_opt(2026, 3, 8)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let resolved = resolve_local(&Eastern2026, naive).unwrap();
        assert_eq!(resolved.naive_local().to_string(), "2026-03-08 03:00:00");
    }

    #[test]
    fn holiday_validation() {
        assert!(HolidayDate::new(12, 25).is_ok());
        assert!(HolidayDate::new(1, 1).is_ok());
        assert!(HolidayDate::new(2, 29).is_err());
        assert!(HolidayDate::new(13, 1).is_err());
        assert!(HolidayDate::new(4, 31).is_err());
    }

    #[test]
    fn unvalidated_leap_day_still_finds_a_target() {
        let leap = HolidayDate { month: 2, day: 29 };
        let target = next_target(&at(2026, 3, 1, 0, 0, 0, 0), leap).unwrap();
        assert_eq!(target, at(2028, 2, 29, 0, 0, 0, 0));
    }
}
