use crate::errors::ApiError;
use crate::gateway::ApiGateway;
use crate::models::{FoodRecord, WorkoutPlan, WorkoutRecord};
use tracing::info;

/// Last-fetched records. Nothing here is written locally; callers re-fetch
/// after every mutation.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    pub workouts: Vec<WorkoutRecord>,
    pub foods: Vec<FoodRecord>,
    pub plans: Vec<WorkoutPlan>,
    plans_loaded: bool,
}

impl RecordStore {
    pub async fn refresh_workouts(&mut self, gateway: &dyn ApiGateway) -> Result<(), ApiError> {
        let mut workouts = gateway.list_workouts().await?;
        workouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        info!("fetched {} workouts", workouts.len());
        self.workouts = workouts;
        Ok(())
    }

    pub async fn refresh_foods(&mut self, gateway: &dyn ApiGateway) -> Result<(), ApiError> {
        let mut foods = gateway.list_foods().await?;
        foods.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        info!("fetched {} food entries", foods.len());
        self.foods = foods;
        Ok(())
    }

    /// Returns true when this is the first successful fetch of the plan list.
    pub async fn refresh_plans(&mut self, gateway: &dyn ApiGateway) -> Result<bool, ApiError> {
        let plans = gateway.list_workout_plans().await?;
        info!("fetched {} workout plans", plans.len());
        self.plans = plans;
        let first = !self.plans_loaded;
        self.plans_loaded = true;
        Ok(first)
    }

    pub async fn refresh_records(&mut self, gateway: &dyn ApiGateway) -> Result<(), ApiError> {
        self.refresh_workouts(gateway).await?;
        self.refresh_foods(gateway).await
    }
}
