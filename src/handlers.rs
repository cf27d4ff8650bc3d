use crate::errors::{ApiError, AppError, SessionError};
use crate::models::{
    weekday_name, DeleteParams, EditRequest, FoodRecord, LoadPlanRequest, NewFood, NewWorkout,
    PlanDraft, StatsQuery, StatsResponse, ToggleRequest, WorkoutPlan, WorkoutRecord, WEEKDAYS,
};
use crate::period::Period;
use crate::session::{save_completed, ExerciseField, SaveReport, SessionSnapshot};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Datelike, Local};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub report: SaveReport,
    pub session: SessionSnapshot,
}

pub async fn index() -> Html<String> {
    let today = Local::now();
    Html(render_index(
        &today.date_naive().to_string(),
        weekday_name(today.weekday()),
    ))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, AppError> {
    let period = match query.period.as_deref() {
        Some(raw) => raw.parse::<Period>().map_err(AppError::bad_request)?,
        None => Period::default(),
    };

    let mut store = state.store.lock().await;
    store.refresh_records(state.gateway.as_ref()).await?;
    Ok(Json(build_stats(&store.workouts, &store.foods, period)))
}

pub async fn list_workouts(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkoutRecord>>, AppError> {
    let mut store = state.store.lock().await;
    store.refresh_workouts(state.gateway.as_ref()).await?;
    Ok(Json(store.workouts.clone()))
}

pub async fn create_workout(
    State(state): State<AppState>,
    Json(payload): Json<NewWorkout>,
) -> Result<(StatusCode, Json<WorkoutRecord>), AppError> {
    let record = state.gateway.create_workout(&payload).await?;
    info!("logged workout '{}'", record.exercise_name);
    refresh_workouts(&state).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewWorkout>,
) -> Result<Json<WorkoutRecord>, AppError> {
    let record = state.gateway.update_workout(&id, &payload).await?;
    refresh_workouts(&state).await?;
    Ok(Json(record))
}

pub async fn delete_workout(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, AppError> {
    require_confirmation(&params, "workout")?;
    state.gateway.delete_workout(&id).await?;
    info!("deleted workout {id}");
    refresh_workouts(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_foods(State(state): State<AppState>) -> Result<Json<Vec<FoodRecord>>, AppError> {
    let mut store = state.store.lock().await;
    store.refresh_foods(state.gateway.as_ref()).await?;
    Ok(Json(store.foods.clone()))
}

pub async fn create_food(
    State(state): State<AppState>,
    Json(payload): Json<NewFood>,
) -> Result<(StatusCode, Json<FoodRecord>), AppError> {
    let record = state.gateway.create_food(&payload).await?;
    info!("logged food '{}'", record.food);
    refresh_foods(&state).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<NewFood>,
) -> Result<Json<FoodRecord>, AppError> {
    let record = state.gateway.update_food(&id, &payload).await?;
    refresh_foods(&state).await?;
    Ok(Json(record))
}

pub async fn delete_food(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, AppError> {
    require_confirmation(&params, "food entry")?;
    state.gateway.delete_food(&id).await?;
    info!("deleted food entry {id}");
    refresh_foods(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<WorkoutPlan>>, AppError> {
    Ok(Json(refresh_plans(&state).await?))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WorkoutPlan>, AppError> {
    Ok(Json(state.gateway.get_workout_plan(&id).await?))
}

pub async fn list_plans_for_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
) -> Result<Json<Vec<WorkoutPlan>>, AppError> {
    if !WEEKDAYS.contains(&day.as_str()) {
        return Err(AppError::bad_request(format!(
            "'{day}' is not a weekday, expected one of {}",
            WEEKDAYS.join(", ")
        )));
    }
    Ok(Json(state.gateway.list_workout_plans_for_day(&day).await?))
}

pub async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<PlanDraft>,
) -> Result<(StatusCode, Json<WorkoutPlan>), AppError> {
    let plan = state.gateway.create_workout_plan(&payload).await?;
    info!("created plan '{}'", plan.plan_name);
    refresh_plans(&state).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<PlanDraft>,
) -> Result<Json<WorkoutPlan>, AppError> {
    let plan = state.gateway.update_workout_plan(&id, &payload).await?;
    refresh_plans(&state).await?;
    Ok(Json(plan))
}

pub async fn delete_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<StatusCode, AppError> {
    require_confirmation(&params, "workout plan")?;
    state.gateway.delete_workout_plan(&id).await?;
    info!("deleted plan {id}");
    refresh_plans(&state).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

pub async fn load_session_plan(
    State(state): State<AppState>,
    Json(payload): Json<LoadPlanRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let fetched = state.gateway.get_workout_plan(&payload.plan_id).await;
    let plan = match fetched {
        Ok(plan) => plan,
        Err(ApiError::NotFound(_)) => {
            return Err(SessionError::PlanNotFound(payload.plan_id).into());
        }
        Err(err) => return Err(err.into()),
    };

    let mut session = state.session.lock().await;
    session.load_plan(plan);
    Ok(Json(session.snapshot()))
}

pub async fn toggle_exercise(
    State(state): State<AppState>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.session.lock().await;
    session.toggle_completion(payload.index)?;
    Ok(Json(session.snapshot()))
}

pub async fn edit_exercise(
    State(state): State<AppState>,
    Json(payload): Json<EditRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let field = payload.field.parse::<ExerciseField>()?;
    let mut session = state.session.lock().await;
    session.edit_field(payload.index, field, &payload.raw_value())?;
    Ok(Json(session.snapshot()))
}

pub async fn save_session(State(state): State<AppState>) -> Result<Json<SaveResponse>, AppError> {
    let report = save_completed(state.gateway.as_ref(), &state.session, &state.store).await?;
    let session = state.session.lock().await.snapshot();
    Ok(Json(SaveResponse { report, session }))
}

fn require_confirmation(params: &DeleteParams, what: &str) -> Result<(), AppError> {
    if params.confirm {
        Ok(())
    } else {
        Err(AppError::bad_request(format!(
            "deleting a {what} needs confirmation (confirm=true)"
        )))
    }
}

async fn refresh_workouts(state: &AppState) -> Result<(), AppError> {
    let mut store = state.store.lock().await;
    store.refresh_workouts(state.gateway.as_ref()).await?;
    Ok(())
}

async fn refresh_foods(state: &AppState) -> Result<(), AppError> {
    let mut store = state.store.lock().await;
    store.refresh_foods(state.gateway.as_ref()).await?;
    Ok(())
}

/// Re-fetches plans; the first time they arrive, today's plan is loaded into
/// an idle session.
async fn refresh_plans(state: &AppState) -> Result<Vec<WorkoutPlan>, AppError> {
    let (first, plans) = {
        let mut store = state.store.lock().await;
        let first = store.refresh_plans(state.gateway.as_ref()).await?;
        (first, store.plans.clone())
    };

    if first {
        let mut session = state.session.lock().await;
        session.auto_load_for(&plans, Local::now().weekday());
    }
    Ok(plans)
}
