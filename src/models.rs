use crate::errors::ApiError;
use crate::period::Period;
use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Muscle {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Core,
}

impl fmt::Display for Muscle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Muscle::Chest => "Chest",
            Muscle::Back => "Back",
            Muscle::Legs => "Legs",
            Muscle::Shoulders => "Shoulders",
            Muscle::Arms => "Arms",
            Muscle::Core => "Core",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub muscle: Muscle,
    pub created_at: DateTime<Utc>,
}

impl WorkoutRecord {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.sets) * f64::from(self.reps)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    pub id: String,
    pub food: String,
    pub calories: f64,
    pub protein: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanExercise {
    pub exercise_name: String,
    pub muscle: Muscle,
    pub target_weight: f64,
    pub target_reps: f64,
    pub target_sets: f64,
    /// Mirrors the position in `WorkoutPlan::exercises`.
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub id: String,
    pub plan_name: String,
    #[serde(default)]
    pub assigned_days: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<PlanExercise>,
}

impl WorkoutPlan {
    pub fn is_assigned_to(&self, day: &str) -> bool {
        self.assigned_days.iter().any(|assigned| assigned == day)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    pub exercise_name: String,
    pub weight: f64,
    pub reps: u32,
    pub sets: u32,
    pub muscle: Muscle,
}

impl NewWorkout {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_name("exercise name", &self.exercise_name)?;
        require_non_negative("weight", self.weight)?;
        if self.reps < 1 {
            return Err(ApiError::validation("reps must be at least 1"));
        }
        if self.sets < 1 {
            return Err(ApiError::validation("sets must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFood {
    pub food: String,
    pub calories: f64,
    pub protein: f64,
}

impl NewFood {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_name("food", &self.food)?;
        require_non_negative("calories", self.calories)?;
        require_non_negative("protein", self.protein)
    }
}

/// Body for creating a plan or replacing one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDraft {
    pub plan_name: String,
    #[serde(default)]
    pub assigned_days: Vec<String>,
    #[serde(default)]
    pub exercises: Vec<PlanExercise>,
}

impl PlanDraft {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_name("plan name", &self.plan_name)?;
        if let Some(day) = self
            .assigned_days
            .iter()
            .find(|day| !WEEKDAYS.contains(&day.as_str()))
        {
            return Err(ApiError::validation(format!("'{day}' is not a day of the week")));
        }
        for exercise in &self.exercises {
            require_name("exercise name", &exercise.exercise_name)?;
            ExerciseDefaults::from(exercise).validate()?;
        }
        Ok(())
    }

    /// Copy with every exercise's `order` set to its position.
    pub fn ordered(&self) -> PlanDraft {
        let mut draft = self.clone();
        for (index, exercise) in draft.exercises.iter_mut().enumerate() {
            exercise.order = index as u32;
        }
        draft
    }
}

/// New template targets for a single plan exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDefaults {
    pub target_weight: f64,
    pub target_reps: f64,
    pub target_sets: f64,
}

impl ExerciseDefaults {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_non_negative("target weight", self.target_weight)?;
        require_non_negative("target reps", self.target_reps)?;
        require_non_negative("target sets", self.target_sets)
    }
}

impl From<&PlanExercise> for ExerciseDefaults {
    fn from(exercise: &PlanExercise) -> Self {
        Self {
            target_weight: exercise.target_weight,
            target_reps: exercise.target_reps,
            target_sets: exercise.target_sets,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WorkoutList {
    #[serde(default)]
    pub workouts: Vec<WorkoutRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FoodList {
    #[serde(default)]
    pub foods: Vec<FoodRecord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlanList {
    #[serde(default)]
    pub plans: Vec<WorkoutPlan>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: String,
    pub workout_count: usize,
    pub volume: f64,
    pub calories: f64,
    pub protein: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub period: Period,
    pub workout_count: usize,
    pub total_volume: f64,
    pub total_calories: f64,
    pub total_protein: f64,
    /// Not reported for the daily view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_active: Option<usize>,
    pub workouts: Vec<WorkoutRecord>,
    pub foods: Vec<FoodRecord>,
    pub last_7_days: Vec<DailyPoint>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub period: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPlanRequest {
    pub plan_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub index: usize,
}

/// `value` is whatever the input box held, text or number.
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub index: usize,
    pub field: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

impl EditRequest {
    pub fn raw_value(&self) -> String {
        match &self.value {
            serde_json::Value::String(text) => text.clone(),
            serde_json::Value::Number(number) => number.to_string(),
            _ => String::new(),
        }
    }
}

fn require_name(label: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(format!("{label} is required")));
    }
    Ok(())
}

fn require_non_negative(label: &str, value: f64) -> Result<(), ApiError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::validation(format!(
            "{label} must be a number of at least 0"
        )));
    }
    Ok(())
}
