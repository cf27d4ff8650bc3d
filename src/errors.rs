use axum::http::StatusCode;
use thiserror::Error;

/// Failure of a call against the remote fitness API.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("not signed in: {0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Unknown(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// A save that stopped part way through. Steps before `completed_steps` are
/// already persisted remotely; nothing after the failing step was attempted.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("save stopped after {completed_steps} of {total_steps} steps: {error}")]
pub struct SaveFailure {
    pub completed_steps: usize,
    pub total_steps: usize,
    pub exercise_name: String,
    pub error: ApiError,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("no workout plan is loaded")]
    NoPlanLoaded,

    #[error("no exercise at position {0}")]
    IndexOutOfRange(usize),

    #[error("unknown field '{0}', expected weight, reps or sets")]
    UnknownField(String),

    #[error("please complete at least one exercise before saving")]
    NothingCompleted,

    #[error("a save is already in progress")]
    Busy,

    #[error("workout plan '{0}' was not found")]
    PlanNotFound(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Save(#[from] SaveFailure),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let status = match &err {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Network(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Api(api) => api.into(),
            SessionError::Save(failure) => Self {
                status: AppError::from(failure.error.clone()).status,
                message: failure.to_string(),
            },
            SessionError::Busy => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            SessionError::PlanNotFound(_) => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            other => Self::bad_request(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_their_kind_as_status() {
        let err = AppError::from(ApiError::NotFound("Workout not found".to_string()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "not found: Workout not found");

        let err = AppError::from(SessionError::Api(ApiError::Network("timed out".to_string())));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn session_rejections_map_to_client_errors() {
        assert_eq!(AppError::from(SessionError::Busy).status, StatusCode::CONFLICT);
        assert_eq!(
            AppError::from(SessionError::NothingCompleted).status,
            StatusCode::BAD_REQUEST
        );

        let failure = SaveFailure {
            completed_steps: 2,
            total_steps: 5,
            exercise_name: "Squat".to_string(),
            error: ApiError::Unauthenticated("expired".to_string()),
        };
        let err = AppError::from(SessionError::Save(failure));
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert!(err.message.starts_with("save stopped after 2 of 5 steps"));
    }
}
