//! Derived health metrics: weekly averages, BMI and day-over-day trends.

use shared_types::{HealthLog, TodayComparison, Trend, WeeklyStats};

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Averages over the supplied logs, missing values counted as zero the way
/// the dashboard presents them. Empty input yields all-None stats.
pub fn weekly_stats(logs: &[HealthLog]) -> WeeklyStats {
    if logs.is_empty() {
        return WeeklyStats::default();
    }

    let n = logs.len() as f64;
    let sum = logs.iter().fold((0.0, 0i64, 0i64, 0.0, 0i64), |acc, log| {
        (
            acc.0 + log.sleep_hours.unwrap_or(0.0),
            acc.1 + i64::from(log.steps.unwrap_or(0)),
            acc.2 + i64::from(log.calories.unwrap_or(0)),
            acc.3 + log.water_intake.unwrap_or(0.0),
            acc.4 + i64::from(log.mood.unwrap_or(0)),
        )
    });

    WeeklyStats {
        avg_sleep: Some(round1(sum.0 / n)),
        avg_steps: Some((sum.1 as f64 / n).round() as i64),
        avg_calories: Some((sum.2 as f64 / n).round() as i64),
        avg_water: Some(round1(sum.3 / n)),
        avg_mood: Some(round1(sum.4 as f64 / n)),
    }
}

/// Body mass index rounded to one decimal; None unless both measurements
/// are present and positive.
pub fn bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height = height_cm.filter(|h| *h > 0.0)?;
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let meters = height / 100.0;
    Some(round1(weight / (meters * meters)))
}

fn trend<T: PartialOrd>(today: Option<T>, yesterday: Option<T>, up: Trend, down: Trend) -> Trend {
    match (today, yesterday) {
        (Some(t), Some(y)) => {
            if t > y {
                up
            } else {
                down
            }
        }
        _ => Trend::NoData,
    }
}

/// Today's metrics against yesterday's. More sleep/steps/water/mood reads
/// as improvement; calories are reported neutrally as increased/decreased.
pub fn compare_days(today: Option<&HealthLog>, yesterday: Option<&HealthLog>) -> TodayComparison {
    let t = today;
    let y = yesterday;
    TodayComparison {
        sleep: trend(
            t.and_then(|l| l.sleep_hours),
            y.and_then(|l| l.sleep_hours),
            Trend::Improved,
            Trend::Declined,
        ),
        steps: trend(
            t.and_then(|l| l.steps),
            y.and_then(|l| l.steps),
            Trend::Improved,
            Trend::Declined,
        ),
        calories: trend(
            t.and_then(|l| l.calories),
            y.and_then(|l| l.calories),
            Trend::Increased,
            Trend::Decreased,
        ),
        water: trend(
            t.and_then(|l| l.water_intake),
            y.and_then(|l| l.water_intake),
            Trend::Improved,
            Trend::Declined,
        ),
        mood: trend(
            t.and_then(|l| l.mood),
            y.and_then(|l| l.mood),
            Trend::Improved,
            Trend::Declined,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn log(
        day: u32,
        sleep: Option<f64>,
        steps: Option<i32>,
        calories: Option<i32>,
        water: Option<f64>,
        mood: Option<i32>,
    ) -> HealthLog {
        HealthLog {
            log_id: day as i32,
            user_id: 1,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            sleep_hours: sleep,
            steps,
            calories,
            water_intake: water,
            mood,
        }
    }

    #[test]
    fn empty_logs_give_empty_stats() {
        assert_eq!(weekly_stats(&[]), WeeklyStats::default());
    }

    #[test]
    fn averages_round_like_the_dashboard() {
        let logs = vec![
            log(1, Some(7.0), Some(9000), Some(2100), Some(1.5), Some(4)),
            log(2, Some(8.5), Some(6001), Some(1800), Some(2.0), Some(3)),
        ];
        let stats = weekly_stats(&logs);
        assert_eq!(stats.avg_sleep, Some(7.8));
        assert_eq!(stats.avg_steps, Some(7501));
        assert_eq!(stats.avg_calories, Some(1950));
        assert_eq!(stats.avg_water, Some(1.8));
        assert_eq!(stats.avg_mood, Some(3.5));
    }

    #[test]
    fn missing_values_count_as_zero() {
        let logs = vec![
            log(1, Some(8.0), None, None, None, None),
            log(2, None, None, None, None, None),
        ];
        let stats = weekly_stats(&logs);
        assert_eq!(stats.avg_sleep, Some(4.0));
        assert_eq!(stats.avg_steps, Some(0));
    }

    #[test]
    fn bmi_requires_both_measurements() {
        assert_eq!(bmi(Some(170.0), Some(65.0)), Some(22.5));
        assert_eq!(bmi(None, Some(65.0)), None);
        assert_eq!(bmi(Some(170.0), None), None);
        assert_eq!(bmi(Some(0.0), Some(65.0)), None);
    }

    #[test]
    fn comparison_tracks_each_metric_independently() {
        let today = log(2, Some(8.0), Some(5000), Some(2500), None, Some(4));
        let yesterday = log(1, Some(6.0), Some(9000), Some(2000), Some(1.0), Some(4));
        let cmp = compare_days(Some(&today), Some(&yesterday));
        assert_eq!(cmp.sleep, Trend::Improved);
        assert_eq!(cmp.steps, Trend::Declined);
        assert_eq!(cmp.calories, Trend::Increased);
        assert_eq!(cmp.water, Trend::NoData);
        // equal mood is not an improvement
        assert_eq!(cmp.mood, Trend::Declined);
    }

    #[test]
    fn comparison_without_yesterday_is_all_no_data() {
        let today = log(2, Some(8.0), Some(5000), Some(2500), Some(2.0), Some(4));
        let cmp = compare_days(Some(&today), None);
        assert_eq!(cmp.sleep, Trend::NoData);
        assert_eq!(cmp.steps, Trend::NoData);
        assert_eq!(cmp.calories, Trend::NoData);
        assert_eq!(cmp.water, Trend::NoData);
        assert_eq!(cmp.mood, Trend::NoData);
    }
}
