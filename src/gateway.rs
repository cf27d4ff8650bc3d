use crate::errors::ApiError;
use crate::models::{
    ExerciseDefaults, FoodList, FoodRecord, NewFood, NewWorkout, PlanDraft, PlanList, WorkoutList,
    WorkoutPlan, WorkoutRecord,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Source of the bearer credential attached to every API call.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn bearer_token(&self) -> Result<String, ApiError>;
}

/// A token handed in through configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticToken {
    token: Option<String>,
}

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn bearer_token(&self) -> Result<String, ApiError> {
        self.token
            .clone()
            .ok_or_else(|| ApiError::Unauthenticated("No authenticated user".to_string()))
    }
}

/// Operations the remote fitness API offers. Every record belongs to the
/// caller identified by the bearer token.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    async fn create_workout(&self, workout: &NewWorkout) -> Result<WorkoutRecord, ApiError>;
    async fn list_workouts(&self) -> Result<Vec<WorkoutRecord>, ApiError>;
    async fn update_workout(&self, id: &str, workout: &NewWorkout)
        -> Result<WorkoutRecord, ApiError>;
    async fn delete_workout(&self, id: &str) -> Result<(), ApiError>;

    async fn create_food(&self, food: &NewFood) -> Result<FoodRecord, ApiError>;
    async fn list_foods(&self) -> Result<Vec<FoodRecord>, ApiError>;
    async fn update_food(&self, id: &str, food: &NewFood) -> Result<FoodRecord, ApiError>;
    async fn delete_food(&self, id: &str) -> Result<(), ApiError>;

    async fn list_workout_plans(&self) -> Result<Vec<WorkoutPlan>, ApiError>;
    async fn get_workout_plan(&self, id: &str) -> Result<WorkoutPlan, ApiError>;
    async fn list_workout_plans_for_day(&self, day: &str) -> Result<Vec<WorkoutPlan>, ApiError>;
    async fn create_workout_plan(&self, plan: &PlanDraft) -> Result<WorkoutPlan, ApiError>;
    async fn update_workout_plan(&self, id: &str, plan: &PlanDraft)
        -> Result<WorkoutPlan, ApiError>;
    async fn delete_workout_plan(&self, id: &str) -> Result<(), ApiError>;
    async fn update_plan_exercise_defaults(
        &self,
        plan_id: &str,
        exercise_index: usize,
        defaults: &ExerciseDefaults,
    ) -> Result<WorkoutPlan, ApiError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// `ApiGateway` over the REST API, e.g. `http://localhost:3000/api`.
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpGateway {
    pub fn new(base_url: Url, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .build()
            .map_err(|err| ApiError::Unknown(format!("failed to set up HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Unknown(format!("{} cannot be used as an API base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let token = self.tokens.bearer_token().await.map_err(|err| match err {
            ApiError::Unauthenticated(message) => ApiError::Unauthenticated(message),
            other => ApiError::Unauthenticated(other.to_string()),
        })?;
        let url = self.url(segments)?;
        debug!("{method} {url}");
        Ok(self.client.request(method, url).bearer_auth(token))
    }

    async fn send(&self, request: RequestBuilder, fallback: &str) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|err| {
            warn!("request failed: {err}");
            ApiError::Network(err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| fallback.to_string());
        warn!("api responded {status}: {message}");
        Err(error_for_status(status, message))
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, fallback: &str) -> Result<T, ApiError> {
        let response = self.send(request, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Unknown(format!("invalid response: {err}")))
    }
}

pub fn error_for_status(status: StatusCode, message: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthenticated(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ => ApiError::Unknown(message),
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn create_workout(&self, workout: &NewWorkout) -> Result<WorkoutRecord, ApiError> {
        workout.validate()?;
        let request = self.request(Method::POST, &["workouts"]).await?.json(workout);
        self.fetch(request, "Failed to add workout").await
    }

    async fn list_workouts(&self) -> Result<Vec<WorkoutRecord>, ApiError> {
        let request = self.request(Method::GET, &["workouts"]).await?;
        let list: WorkoutList = self.fetch(request, "Failed to fetch workouts").await?;
        Ok(list.workouts)
    }

    async fn update_workout(
        &self,
        id: &str,
        workout: &NewWorkout,
    ) -> Result<WorkoutRecord, ApiError> {
        workout.validate()?;
        let request = self.request(Method::PUT, &["workouts", id]).await?.json(workout);
        self.fetch(request, "Failed to update workout").await
    }

    async fn delete_workout(&self, id: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &["workouts", id]).await?;
        self.send(request, "Failed to delete workout").await?;
        Ok(())
    }

    async fn create_food(&self, food: &NewFood) -> Result<FoodRecord, ApiError> {
        food.validate()?;
        let request = self.request(Method::POST, &["food"]).await?.json(food);
        self.fetch(request, "Failed to add food entry").await
    }

    async fn list_foods(&self) -> Result<Vec<FoodRecord>, ApiError> {
        let request = self.request(Method::GET, &["food"]).await?;
        let list: FoodList = self.fetch(request, "Failed to fetch food entries").await?;
        Ok(list.foods)
    }

    async fn update_food(&self, id: &str, food: &NewFood) -> Result<FoodRecord, ApiError> {
        food.validate()?;
        let request = self.request(Method::PUT, &["food", id]).await?.json(food);
        self.fetch(request, "Failed to update food entry").await
    }

    async fn delete_food(&self, id: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &["food", id]).await?;
        self.send(request, "Failed to delete food entry").await?;
        Ok(())
    }

    async fn list_workout_plans(&self) -> Result<Vec<WorkoutPlan>, ApiError> {
        let request = self.request(Method::GET, &["workout-plans"]).await?;
        let list: PlanList = self.fetch(request, "Failed to fetch workout plans").await?;
        Ok(list.plans)
    }

    async fn get_workout_plan(&self, id: &str) -> Result<WorkoutPlan, ApiError> {
        let request = self.request(Method::GET, &["workout-plans", id]).await?;
        self.fetch(request, "Failed to fetch workout plan").await
    }

    async fn list_workout_plans_for_day(&self, day: &str) -> Result<Vec<WorkoutPlan>, ApiError> {
        let request = self.request(Method::GET, &["workout-plans", "day", day]).await?;
        let list: PlanList = self.fetch(request, "Failed to fetch plans for day").await?;
        Ok(list.plans)
    }

    async fn create_workout_plan(&self, plan: &PlanDraft) -> Result<WorkoutPlan, ApiError> {
        plan.validate()?;
        let request = self
            .request(Method::POST, &["workout-plans"])
            .await?
            .json(&plan.ordered());
        self.fetch(request, "Failed to create workout plan").await
    }

    async fn update_workout_plan(
        &self,
        id: &str,
        plan: &PlanDraft,
    ) -> Result<WorkoutPlan, ApiError> {
        plan.validate()?;
        let request = self
            .request(Method::PUT, &["workout-plans", id])
            .await?
            .json(&plan.ordered());
        self.fetch(request, "Failed to update workout plan").await
    }

    async fn delete_workout_plan(&self, id: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &["workout-plans", id]).await?;
        self.send(request, "Failed to delete workout plan").await?;
        Ok(())
    }

    async fn update_plan_exercise_defaults(
        &self,
        plan_id: &str,
        exercise_index: usize,
        defaults: &ExerciseDefaults,
    ) -> Result<WorkoutPlan, ApiError> {
        defaults.validate()?;
        let index = exercise_index.to_string();
        let request = self
            .request(Method::PUT, &["workout-plans", plan_id, "exercises", index.as_str()])
            .await?
            .json(defaults);
        self.fetch(request, "Failed to update exercise defaults").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(token: Option<&str>) -> HttpGateway {
        // Nothing listens on port 9; any request that goes out fails as a network error.
        let base = Url::parse("http://127.0.0.1:9/api").unwrap();
        HttpGateway::new(base, Arc::new(StaticToken::new(token.map(str::to_string)))).unwrap()
    }

    #[test]
    fn gateway_builds_its_client_without_panicking() {
        let base = Url::parse("http://localhost:3000/api").unwrap();
        let built = HttpGateway::new(base, Arc::new(StaticToken::default()));
        assert!(built.is_ok());
    }

    #[test]
    fn statuses_map_onto_error_kinds() {
        let msg = || "boom".to_string();
        assert!(matches!(error_for_status(StatusCode::UNAUTHORIZED, msg()), ApiError::Unauthenticated(_)));
        assert!(matches!(error_for_status(StatusCode::FORBIDDEN, msg()), ApiError::Unauthenticated(_)));
        assert!(matches!(error_for_status(StatusCode::BAD_REQUEST, msg()), ApiError::Validation(_)));
        assert!(matches!(error_for_status(StatusCode::NOT_FOUND, msg()), ApiError::NotFound(_)));
        assert!(matches!(error_for_status(StatusCode::INTERNAL_SERVER_ERROR, msg()), ApiError::Unknown(_)));
    }

    #[test]
    fn urls_keep_the_base_path_and_escape_ids() {
        let gateway = gateway(Some("t"));
        let url = gateway.url(&["workout-plans", "a b", "exercises", "2"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9/api/workout-plans/a%20b/exercises/2");
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let err = gateway(None).list_workouts().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));

        let err = gateway(Some("   ")).list_foods().await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_locally() {
        let food = NewFood {
            food: String::new(),
            calories: 10.0,
            protein: 1.0,
        };
        let err = gateway(Some("t")).create_food(&food).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn unreachable_api_is_a_network_error() {
        let err = gateway(Some("t")).list_workout_plans().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
