//! Recurring-event expansion.
//!
//! Turns one admin form submission ("repeat weekly on Tuesdays until
//! June, skipping holidays") into the concrete list of dated event
//! records to persist. Pure calendar arithmetic over `NaiveDate`; the
//! caller owns persistence.
//!
//! All dates are calendar-local: a `NaiveDate` is a plain (year, month,
//! day) value with no offset attached, so "2025-03-01" means March 1st
//! on every machine and no arithmetic here can shift a date across a
//! timezone boundary.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{TroopDirError, TroopDirResult};
use crate::event::{EventTemplate, GeneratedEvent};

/// How often a recurring series repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Weekly,
    Biweekly,
    Monthly,
}

impl FromStr for Interval {
    type Err = TroopDirError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Interval::Weekly),
            "biweekly" => Ok(Interval::Biweekly),
            "monthly" => Ok(Interval::Monthly),
            other => Err(TroopDirError::InvalidRule {
                field: "interval",
                value: other.to_string(),
            }),
        }
    }
}

/// A recurrence rule as submitted from the admin form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// The date the user picked in the form; the series' nominal start.
    pub anchor_date: NaiveDate,
    /// Inclusive upper bound for generated dates.
    pub until_date: NaiveDate,
    pub interval: Interval,
    /// Day of week every occurrence falls on. For monthly rules it only
    /// aligns the first occurrence; later occurrences keep the
    /// day-of-month instead.
    pub weekday: Weekday,
    /// Exact dates to omit (holidays).
    pub skip_dates: BTreeSet<NaiveDate>,
}

impl RecurrenceRule {
    /// Build a rule from raw form input.
    ///
    /// Dates arrive as `YYYY-MM-DD` strings exactly as a date-only form
    /// field emits them; `weekday` uses the form's 0=Sunday..6=Saturday
    /// convention. Everything is validated here, before any iteration,
    /// so expansion never starts from a half-checked rule.
    pub fn from_form(
        anchor_date: &str,
        until_date: &str,
        interval: &str,
        weekday: u8,
        skip_dates: &[String],
    ) -> TroopDirResult<Self> {
        let interval = interval.parse()?;
        let weekday = weekday_from_form(weekday)?;
        let anchor_date = parse_form_date(anchor_date)?;
        let until_date = parse_form_date(until_date)?;
        let skip_dates = skip_dates
            .iter()
            .map(|s| parse_form_date(s))
            .collect::<TroopDirResult<BTreeSet<_>>>()?;

        Ok(RecurrenceRule {
            anchor_date,
            until_date,
            interval,
            weekday,
            skip_dates,
        })
    }
}

/// When an event submission happens: once, or as a repeating series.
#[derive(Debug, Clone)]
pub enum Schedule {
    /// One-off event on a single date.
    Single { date: NaiveDate },
    /// Repeating series described by a rule.
    Recurring(RecurrenceRule),
}

/// Expand a form submission into the concrete event records to persist.
///
/// A single schedule yields exactly one record with `recurring = false`.
/// A recurring schedule yields one record per occurrence, in strictly
/// increasing date order, where every date:
///
/// - lies in `[anchor_date, until_date]` inclusive,
/// - falls on `rule.weekday` (weekly/biweekly),
/// - is not a member of `rule.skip_dates`.
///
/// A range with no valid occurrence yields an empty Vec, not an error.
/// Validation happens when the rule is built (see
/// [`RecurrenceRule::from_form`]), so expansion itself cannot fail.
pub fn expand(template: &EventTemplate, schedule: &Schedule) -> Vec<GeneratedEvent> {
    match schedule {
        Schedule::Single { date } => vec![GeneratedEvent::single(template, *date)],
        Schedule::Recurring(rule) => expand_rule(template, rule),
    }
}

fn expand_rule(template: &EventTemplate, rule: &RecurrenceRule) -> Vec<GeneratedEvent> {
    let mut events = Vec::new();

    let mut current = first_occurrence(rule.anchor_date, rule.weekday);
    // The series' nominal day-of-month, taken after weekday alignment so
    // monthly stepping keeps the day the series actually started on.
    let day_of_month = current.day();

    while current <= rule.until_date {
        if !rule.skip_dates.contains(&current) {
            events.push(GeneratedEvent::occurrence(template, current));
        }

        current = match rule.interval {
            Interval::Weekly => current + Duration::days(7),
            Interval::Biweekly => current + Duration::days(14),
            Interval::Monthly => next_month_clamped(current, day_of_month),
        };
    }

    events
}

/// First date on or after `anchor` that falls on `weekday`.
fn first_occurrence(anchor: NaiveDate, weekday: Weekday) -> NaiveDate {
    let anchor_wd = anchor.weekday().num_days_from_sunday();
    let target_wd = weekday.num_days_from_sunday();

    if anchor_wd == target_wd {
        return anchor;
    }

    let mut days_to_add = (target_wd + 7 - anchor_wd) % 7;
    if days_to_add == 0 {
        // Unreachable once the weekdays differ; kept so this branch can
        // never collapse the step to zero.
        days_to_add = 7;
    }

    anchor + Duration::days(i64::from(days_to_add))
}

/// Same nominal day next month, clamped to the target month's last day.
///
/// Clamping is per-month, not sticky: a series anchored on the 31st
/// lands on Feb 28 and then Mar 31, never rolling into the next month.
fn next_month_clamped(current: NaiveDate, day_of_month: u32) -> NaiveDate {
    let (year, month) = if current.month() == 12 {
        (current.year() + 1, 1)
    } else {
        (current.year(), current.month() + 1)
    };

    let day = day_of_month.min(days_in_month(year, month));

    // Valid by construction: day is clamped into the target month.
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .pred_opt()
        .unwrap()
        .day()
}

/// Parse a `YYYY-MM-DD` form date into its calendar components.
///
/// Never goes through an instant/epoch representation, so the result is
/// the same calendar date regardless of the machine's UTC offset.
pub fn parse_form_date(s: &str) -> TroopDirResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| TroopDirError::InvalidDate(s.to_string()))
}

/// Map the form's 0=Sunday..6=Saturday integer onto a weekday.
pub fn weekday_from_form(weekday: u8) -> TroopDirResult<Weekday> {
    match weekday {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        other => Err(TroopDirError::InvalidRule {
            field: "weekday",
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    fn make_template() -> EventTemplate {
        EventTemplate::new("Troop Meeting", EventType::Meeting)
    }

    fn make_rule(
        anchor: &str,
        until: &str,
        interval: &str,
        weekday: u8,
        skip: &[&str],
    ) -> RecurrenceRule {
        let skip: Vec<String> = skip.iter().map(|s| s.to_string()).collect();
        RecurrenceRule::from_form(anchor, until, interval, weekday, &skip).unwrap()
    }

    fn dates(events: &[GeneratedEvent]) -> Vec<String> {
        events.iter().map(|e| e.date.to_string()).collect()
    }

    #[test]
    fn test_weekly_series() {
        // 2025-01-07 is a Tuesday; weekday 2 = Tuesday.
        let rule = make_rule("2025-01-07", "2025-01-28", "weekly", 2, &[]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));

        assert_eq!(
            dates(&events),
            vec!["2025-01-07", "2025-01-14", "2025-01-21", "2025-01-28"]
        );
        assert!(events.iter().all(|e| e.recurring));
    }

    #[test]
    fn test_anchor_realignment() {
        // Anchor is a Monday; the series asks for Tuesdays, so the first
        // occurrence moves forward to the 7th, never backward.
        let rule = make_rule("2025-01-06", "2025-01-14", "weekly", 2, &[]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));

        assert_eq!(dates(&events), vec!["2025-01-07", "2025-01-14"]);
    }

    #[test]
    fn test_holiday_skip() {
        let rule = make_rule("2025-01-07", "2025-01-28", "weekly", 2, &["2025-01-14"]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));

        assert_eq!(
            dates(&events),
            vec!["2025-01-07", "2025-01-21", "2025-01-28"]
        );
    }

    #[test]
    fn test_biweekly_step() {
        let rule = make_rule("2025-01-07", "2025-02-28", "biweekly", 2, &[]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));

        assert_eq!(
            dates(&events),
            vec!["2025-01-07", "2025-01-21", "2025-02-04", "2025-02-18"]
        );
    }

    #[test]
    fn test_monthly_rollover_clamps() {
        // 2025-01-31 is a Friday; weekday 5 = Friday. February clamps to
        // the 28th (non-leap year) instead of rolling into March, and
        // March recovers the nominal 31st.
        let rule = make_rule("2025-01-31", "2025-04-30", "monthly", 5, &[]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));

        assert_eq!(
            dates(&events),
            vec!["2025-01-31", "2025-02-28", "2025-03-31", "2025-04-30"]
        );
    }

    #[test]
    fn test_monthly_december_wraps_year() {
        let rule = make_rule("2025-11-15", "2026-01-31", "monthly", 6, &[]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));

        assert_eq!(
            dates(&events),
            vec!["2025-11-15", "2025-12-15", "2026-01-15"]
        );
    }

    #[test]
    fn test_empty_range() {
        let rule = make_rule("2025-02-01", "2025-01-01", "weekly", 2, &[]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));
        assert!(events.is_empty());
    }

    #[test]
    fn test_all_occurrences_skipped() {
        let rule = make_rule("2025-01-07", "2025-01-14", "weekly", 2, &["2025-01-07", "2025-01-14"]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));
        assert!(events.is_empty());
    }

    #[test]
    fn test_parsing_is_calendar_local() {
        // NaiveDate carries no offset, so the parsed components are the
        // literal form components under any machine timezone.
        let date = parse_form_date("2025-03-01").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2025, 3, 1));
    }

    #[test]
    fn test_expansion_is_offset_independent() {
        // Same form input, same calendar dates out, whatever timezone
        // the process runs under. The month-boundary rule is the one
        // that would betray any hidden instant arithmetic.
        let expand_under = |tz: &str| {
            // Safety: no other test in this crate reads TZ.
            unsafe { std::env::set_var("TZ", tz) };
            let rule = make_rule("2025-01-31", "2025-04-30", "monthly", 5, &[]);
            dates(&expand(&make_template(), &Schedule::Recurring(rule)))
        };

        let expected = vec!["2025-01-31", "2025-02-28", "2025-03-31", "2025-04-30"];
        for tz in ["America/Los_Angeles", "UTC", "Asia/Tokyo"] {
            assert_eq!(expand_under(tz), expected, "TZ={tz}");
        }
    }

    #[test]
    fn test_non_recurring_passthrough() {
        let date = parse_form_date("2025-05-10").unwrap();
        let events = expand(&make_template(), &Schedule::Single { date });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, date);
        assert!(!events[0].recurring);
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let err = RecurrenceRule::from_form("2025-01-07", "2025-01-28", "fortnightly", 2, &[])
            .unwrap_err();

        match err {
            TroopDirError::InvalidRule { field, value } => {
                assert_eq!(field, "interval");
                assert_eq!(value, "fortnightly");
            }
            other => panic!("expected InvalidRule, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_weekday_rejected() {
        let err =
            RecurrenceRule::from_form("2025-01-07", "2025-01-28", "weekly", 7, &[]).unwrap_err();
        assert!(matches!(
            err,
            TroopDirError::InvalidRule { field: "weekday", .. }
        ));
    }

    #[test]
    fn test_malformed_dates_rejected() {
        for bad in ["01/07/2025", "2025-13-01", "2025-02-30", "yesterday"] {
            let err = RecurrenceRule::from_form(bad, "2025-01-28", "weekly", 2, &[]).unwrap_err();
            assert!(matches!(err, TroopDirError::InvalidDate(_)), "{bad}");
        }

        // Skip dates are validated just as eagerly.
        let err = RecurrenceRule::from_form(
            "2025-01-07",
            "2025-01-28",
            "weekly",
            2,
            &["not-a-date".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, TroopDirError::InvalidDate(_)));
    }

    #[test]
    fn test_dates_strictly_increase_with_fresh_ids() {
        let rule = make_rule("2025-01-01", "2025-06-30", "biweekly", 4, &["2025-02-13"]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));

        for pair in events.windows(2) {
            assert!(pair[0].date < pair[1].date);
            assert_ne!(pair[0].id, pair[1].id);
        }
    }

    #[test]
    fn test_weekly_dates_fall_on_rule_weekday() {
        let rule = make_rule("2025-01-03", "2025-03-31", "weekly", 0, &[]);
        let events = expand(&make_template(), &Schedule::Recurring(rule));

        assert!(!events.is_empty());
        for event in &events {
            assert_eq!(event.date.weekday(), Weekday::Sun);
            assert!(event.date >= parse_form_date("2025-01-03").unwrap());
            assert!(event.date <= parse_form_date("2025-03-31").unwrap());
        }
    }
}
