//! Leaderboard age buckets

use chrono::{DateTime, Utc};

/// Human-readable age of a pet, bucketed the way the leaderboard shows it.
///
/// Buckets, with floored integer division throughout:
/// - under an hour: "Just born"
/// - under a day: hours
/// - exactly one day: "1 day old"
/// - under a week: days
/// - under four weeks: weeks (days / 7)
/// - otherwise: months (days / 30)
pub fn age_label(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(created_at);
    let days = elapsed.num_days();

    if days == 0 {
        let hours = elapsed.num_hours();
        if hours == 0 {
            return "Just born".to_string();
        }
        return format!("{} hour{} old", hours, plural(hours));
    }

    if days == 1 {
        return "1 day old".to_string();
    }

    if days < 7 {
        return format!("{} days old", days);
    }

    let weeks = days / 7;
    if weeks < 4 {
        return format!("{} week{} old", weeks, plural(weeks));
    }

    let months = days / 30;
    format!("{} month{} old", months, plural(months))
}

fn plural(n: i64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 31, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn under_an_hour_is_just_born() {
        assert_eq!(age_label(now(), now()), "Just born");
        assert_eq!(age_label(now() - Duration::minutes(59), now()), "Just born");
    }

    #[test]
    fn single_hour_is_singular() {
        assert_eq!(age_label(now() - Duration::hours(1), now()), "1 hour old");
    }

    #[test]
    fn hours_under_a_day() {
        assert_eq!(age_label(now() - Duration::hours(3), now()), "3 hours old");
        assert_eq!(
            age_label(now() - Duration::hours(23), now()),
            "23 hours old"
        );
    }

    #[test]
    fn exactly_one_day() {
        assert_eq!(age_label(now() - Duration::hours(25), now()), "1 day old");
    }

    #[test]
    fn days_under_a_week() {
        assert_eq!(age_label(now() - Duration::days(2), now()), "2 days old");
        assert_eq!(age_label(now() - Duration::days(6), now()), "6 days old");
    }

    #[test]
    fn weeks_under_four() {
        assert_eq!(age_label(now() - Duration::days(7), now()), "1 week old");
        assert_eq!(age_label(now() - Duration::days(10), now()), "1 week old");
        assert_eq!(age_label(now() - Duration::days(14), now()), "2 weeks old");
        assert_eq!(age_label(now() - Duration::days(27), now()), "3 weeks old");
    }

    #[test]
    fn months_from_four_weeks() {
        assert_eq!(age_label(now() - Duration::days(40), now()), "1 month old");
        assert_eq!(age_label(now() - Duration::days(65), now()), "2 months old");
        assert_eq!(
            age_label(now() - Duration::days(365), now()),
            "12 months old"
        );
    }

    #[test]
    fn four_week_gap_rounds_to_zero_months() {
        // 28 days is past the week buckets but still under 30 days, so the
        // month count floors to zero. Inherited display behavior.
        assert_eq!(age_label(now() - Duration::days(28), now()), "0 months old");
        assert_eq!(age_label(now() - Duration::days(29), now()), "0 months old");
    }
}
