use crate::models::{FoodRecord, WorkoutRecord};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Overall,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Overall => "overall",
        }
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "overall" => Ok(Period::Overall),
            other => Err(format!(
                "period must be 'daily', 'weekly' or 'overall', got '{other}'"
            )),
        }
    }
}

pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

impl Timestamped for WorkoutRecord {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Timestamped for FoodRecord {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

pub fn filter_by_period<R: Timestamped + Clone>(records: &[R], period: Period) -> Vec<R> {
    filter_by_period_at(records, period, &Local::now())
}

/// Calendar dates are taken in `now`'s timezone. The weekly window starts at
/// local midnight six days before today and has no upper bound.
pub fn filter_by_period_at<R, Tz>(records: &[R], period: Period, now: &DateTime<Tz>) -> Vec<R>
where
    R: Timestamped + Clone,
    Tz: TimeZone,
{
    let today = now.date_naive();
    let tz = now.timezone();
    let local_date = |record: &R| record.created_at().with_timezone(&tz).date_naive();

    match period {
        Period::Daily => records
            .iter()
            .filter(|record| local_date(*record) == today)
            .cloned()
            .collect(),
        Period::Weekly => {
            let window_start = today - Duration::days(6);
            records
                .iter()
                .filter(|record| local_date(*record) >= window_start)
                .cloned()
                .collect()
        }
        Period::Overall => records.to_vec(),
    }
}
