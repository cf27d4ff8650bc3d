use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/workouts",
            get(handlers::list_workouts).post(handlers::create_workout),
        )
        .route(
            "/api/workouts/:id",
            put(handlers::update_workout).delete(handlers::delete_workout),
        )
        .route("/api/foods", get(handlers::list_foods).post(handlers::create_food))
        .route(
            "/api/foods/:id",
            put(handlers::update_food).delete(handlers::delete_food),
        )
        .route("/api/plans", get(handlers::list_plans).post(handlers::create_plan))
        .route(
            "/api/plans/:id",
            get(handlers::get_plan)
                .put(handlers::update_plan)
                .delete(handlers::delete_plan),
        )
        .route("/api/plans/day/:day", get(handlers::list_plans_for_day))
        .route("/api/session", get(handlers::get_session))
        .route("/api/session/load", post(handlers::load_session_plan))
        .route("/api/session/toggle", post(handlers::toggle_exercise))
        .route("/api/session/edit", post(handlers::edit_exercise))
        .route("/api/session/save", post(handlers::save_session))
        .with_state(state)
}
