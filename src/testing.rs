//! In-memory `ApiGateway` for unit tests.

use crate::errors::ApiError;
use crate::gateway::ApiGateway;
use crate::models::{
    ExerciseDefaults, FoodRecord, NewFood, NewWorkout, PlanDraft, WorkoutPlan, WorkoutRecord,
};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateWorkout(NewWorkout),
    UpdateDefaults(String, usize, ExerciseDefaults),
    ListWorkouts,
    ListPlans,
}

#[derive(Default)]
pub struct RecordingGateway {
    pub calls: Mutex<Vec<Call>>,
    /// Zero-based count of the create call that should fail.
    pub fail_on_create: Option<usize>,
    pub fail_list_workouts: bool,
    pub workouts: Vec<WorkoutRecord>,
    pub plans: Vec<WorkoutPlan>,
}

impl RecordingGateway {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::CreateWorkout(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unsupported<T>() -> Result<T, ApiError> {
    Err(ApiError::Unknown("not used in these tests".to_string()))
}

#[async_trait]
impl ApiGateway for RecordingGateway {
    async fn create_workout(&self, workout: &NewWorkout) -> Result<WorkoutRecord, ApiError> {
        let nth = self.creates();
        if self.fail_on_create == Some(nth) {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        self.record(Call::CreateWorkout(workout.clone()));
        Ok(WorkoutRecord {
            id: format!("w{nth}"),
            exercise_name: workout.exercise_name.clone(),
            weight: workout.weight,
            reps: workout.reps,
            sets: workout.sets,
            muscle: workout.muscle,
            created_at: Utc::now(),
        })
    }

    async fn list_workouts(&self) -> Result<Vec<WorkoutRecord>, ApiError> {
        self.record(Call::ListWorkouts);
        if self.fail_list_workouts {
            return Err(ApiError::Network("down".to_string()));
        }
        Ok(self.workouts.clone())
    }

    async fn update_workout(&self, _: &str, _: &NewWorkout) -> Result<WorkoutRecord, ApiError> {
        unsupported()
    }

    async fn delete_workout(&self, _: &str) -> Result<(), ApiError> {
        unsupported()
    }

    async fn create_food(&self, _: &NewFood) -> Result<FoodRecord, ApiError> {
        unsupported()
    }

    async fn list_foods(&self) -> Result<Vec<FoodRecord>, ApiError> {
        Ok(Vec::new())
    }

    async fn update_food(&self, _: &str, _: &NewFood) -> Result<FoodRecord, ApiError> {
        unsupported()
    }

    async fn delete_food(&self, _: &str) -> Result<(), ApiError> {
        unsupported()
    }

    async fn list_workout_plans(&self) -> Result<Vec<WorkoutPlan>, ApiError> {
        self.record(Call::ListPlans);
        Ok(self.plans.clone())
    }

    async fn get_workout_plan(&self, id: &str) -> Result<WorkoutPlan, ApiError> {
        self.plans
            .iter()
            .find(|plan| plan.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Workout plan not found".to_string()))
    }

    async fn list_workout_plans_for_day(&self, day: &str) -> Result<Vec<WorkoutPlan>, ApiError> {
        Ok(self
            .plans
            .iter()
            .filter(|plan| plan.is_assigned_to(day))
            .cloned()
            .collect())
    }

    async fn create_workout_plan(&self, _: &PlanDraft) -> Result<WorkoutPlan, ApiError> {
        unsupported()
    }

    async fn update_workout_plan(&self, _: &str, _: &PlanDraft) -> Result<WorkoutPlan, ApiError> {
        unsupported()
    }

    async fn delete_workout_plan(&self, _: &str) -> Result<(), ApiError> {
        unsupported()
    }

    async fn update_plan_exercise_defaults(
        &self,
        plan_id: &str,
        exercise_index: usize,
        defaults: &ExerciseDefaults,
    ) -> Result<WorkoutPlan, ApiError> {
        self.record(Call::UpdateDefaults(
            plan_id.to_string(),
            exercise_index,
            *defaults,
        ));
        self.plans
            .iter()
            .find(|plan| plan.id == plan_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("Workout plan not found".to_string()))
    }
}
