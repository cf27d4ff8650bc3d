use crate::models::{DailyPoint, FoodRecord, StatsResponse, WorkoutRecord};
use crate::period::{filter_by_period_at, Period};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone};
use std::collections::{BTreeMap, HashSet};

pub fn total_calories(foods: &[FoodRecord]) -> f64 {
    foods.iter().map(|food| food.calories).sum()
}

pub fn total_protein(foods: &[FoodRecord]) -> f64 {
    foods.iter().map(|food| food.protein).sum()
}

pub fn total_volume(workouts: &[WorkoutRecord]) -> f64 {
    workouts.iter().map(WorkoutRecord::volume).sum()
}

pub fn active_day_count(workouts: &[WorkoutRecord]) -> usize {
    active_day_count_in(workouts, &Local)
}

/// Distinct `(year, month, day)` triples in `tz` across the workouts.
pub fn active_day_count_in<Tz: TimeZone>(workouts: &[WorkoutRecord], tz: &Tz) -> usize {
    workouts
        .iter()
        .map(|workout| {
            let date = workout.created_at.with_timezone(tz).date_naive();
            (date.year(), date.month(), date.day())
        })
        .collect::<HashSet<_>>()
        .len()
}

pub fn build_stats(
    workouts: &[WorkoutRecord],
    foods: &[FoodRecord],
    period: Period,
) -> StatsResponse {
    build_stats_at(workouts, foods, period, &Local::now())
}

pub fn build_stats_at<Tz: TimeZone>(
    workouts: &[WorkoutRecord],
    foods: &[FoodRecord],
    period: Period,
    now: &DateTime<Tz>,
) -> StatsResponse {
    let tz = now.timezone();
    let mut filtered_workouts = filter_by_period_at(workouts, period, now);
    let mut filtered_foods = filter_by_period_at(foods, period, now);

    let days_active = match period {
        Period::Daily => None,
        Period::Weekly | Period::Overall => Some(active_day_count_in(&filtered_workouts, &tz)),
    };

    let last_7_days = last_7_days(workouts, foods, now);

    filtered_workouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered_foods.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    StatsResponse {
        period,
        workout_count: filtered_workouts.len(),
        total_volume: total_volume(&filtered_workouts),
        total_calories: total_calories(&filtered_foods),
        total_protein: total_protein(&filtered_foods),
        days_active,
        workouts: filtered_workouts,
        foods: filtered_foods,
        last_7_days,
    }
}

fn last_7_days<Tz: TimeZone>(
    workouts: &[WorkoutRecord],
    foods: &[FoodRecord],
    now: &DateTime<Tz>,
) -> Vec<DailyPoint> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut workouts_by_day: BTreeMap<NaiveDate, Vec<WorkoutRecord>> = BTreeMap::new();
    for workout in workouts {
        let date = workout.created_at.with_timezone(&tz).date_naive();
        workouts_by_day.entry(date).or_default().push(workout.clone());
    }
    let mut foods_by_day: BTreeMap<NaiveDate, Vec<FoodRecord>> = BTreeMap::new();
    for food in foods {
        let date = food.created_at.with_timezone(&tz).date_naive();
        foods_by_day.entry(date).or_default().push(food.clone());
    }

    let mut points = Vec::with_capacity(7);
    for offset in (0..7).rev() {
        let date = today - Duration::days(offset);
        let day_workouts = workouts_by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        let day_foods = foods_by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);
        points.push(DailyPoint {
            date: date.to_string(),
            workout_count: day_workouts.len(),
            volume: total_volume(day_workouts),
            calories: total_calories(day_foods),
            protein: total_protein(day_foods),
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Muscle;
    use chrono::{FixedOffset, Utc};

    fn tz() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        tz().with_ymd_and_hms(2026, 3, d, h, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn workout(weight: f64, sets: u32, reps: u32, created_at: DateTime<Utc>) -> WorkoutRecord {
        WorkoutRecord {
            id: format!("w-{weight}-{sets}-{reps}"),
            exercise_name: "Bench Press".to_string(),
            weight,
            reps,
            sets,
            muscle: Muscle::Chest,
            created_at,
        }
    }

    fn food(name: &str, calories: f64, protein: f64, created_at: DateTime<Utc>) -> FoodRecord {
        FoodRecord {
            id: name.to_string(),
            food: name.to_string(),
            calories,
            protein,
            created_at,
        }
    }

    #[test]
    fn empty_inputs_sum_to_zero() {
        assert_eq!(total_calories(&[]), 0.0);
        assert_eq!(total_protein(&[]), 0.0);
        assert_eq!(total_volume(&[]), 0.0);
        assert_eq!(active_day_count_in(&[], &tz()), 0);
    }

    #[test]
    fn single_workout_volume_is_weight_sets_reps() {
        let w = workout(135.0, 3, 8, at(10, 9));
        assert_eq!(total_volume(std::slice::from_ref(&w)), 135.0 * 3.0 * 8.0);
    }

    #[test]
    fn active_days_collapse_same_date() {
        let same_day = vec![workout(100.0, 1, 1, at(10, 7)), workout(100.0, 1, 1, at(10, 21))];
        assert_eq!(active_day_count_in(&same_day, &tz()), 1);

        let two_days = vec![workout(100.0, 1, 1, at(10, 7)), workout(100.0, 1, 1, at(11, 7))];
        assert_eq!(active_day_count_in(&two_days, &tz()), 2);
    }

    #[test]
    fn daily_calories_only_count_today() {
        let now = tz().with_ymd_and_hms(2026, 3, 12, 20, 0, 0).unwrap();
        let foods = vec![
            food("Chicken", 165.0, 31.0, at(12, 8)),
            food("Pasta", 400.0, 14.0, at(12, 13)),
            food("Burrito", 300.0, 20.0, at(11, 19)),
        ];

        let daily = filter_by_period_at(&foods, Period::Daily, &now);
        assert_eq!(daily.len(), 2);
        assert_eq!(total_calories(&daily), 565.0);
        assert_eq!(total_protein(&daily), 45.0);
    }

    #[test]
    fn stats_omit_active_days_for_daily_view() {
        let now = tz().with_ymd_and_hms(2026, 3, 12, 20, 0, 0).unwrap();
        let workouts = vec![workout(135.0, 3, 8, at(12, 9)), workout(185.0, 5, 5, at(9, 9))];

        let daily = build_stats_at(&workouts, &[], Period::Daily, &now);
        assert_eq!(daily.days_active, None);
        assert_eq!(daily.workout_count, 1);
        assert_eq!(daily.total_volume, 135.0 * 24.0);

        let weekly = build_stats_at(&workouts, &[], Period::Weekly, &now);
        assert_eq!(weekly.days_active, Some(2));
        assert_eq!(weekly.workouts[0].created_at, at(12, 9));
    }

    #[test]
    fn last_7_days_covers_each_day() {
        let now = tz().with_ymd_and_hms(2026, 3, 12, 20, 0, 0).unwrap();
        let workouts = vec![workout(100.0, 2, 5, at(10, 9))];
        let foods = vec![food("Oats", 150.0, 5.0, at(10, 7))];

        let stats = build_stats_at(&workouts, &foods, Period::Overall, &now);
        assert_eq!(stats.last_7_days.len(), 7);
        assert_eq!(stats.last_7_days[6].date, "2026-03-12");
        let point = stats
            .last_7_days
            .iter()
            .find(|day| day.date == "2026-03-10")
            .expect("missing day");
        assert_eq!(point.workout_count, 1);
        assert_eq!(point.volume, 1000.0);
        assert_eq!(point.calories, 150.0);
    }
}
