use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// One or more request labels are missing from their trained vocabulary.
    #[error(
        "Invalid input: {} not found in training data. Please use valid artist/genre/subgenre.",
        .0.join(", ")
    )]
    UnknownCategory(Vec<String>),

    #[error("Failed to load artifact {path}: {reason}")]
    ArtifactLoad { path: String, reason: String },

    #[error("{0}")]
    Computation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn artifact_load(path: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        AppError::ArtifactLoad {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UnknownCategory(_)
            | AppError::ArtifactLoad { .. }
            | AppError::Computation(_)
            | AppError::Io(_)
            | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message_lists_labels() {
        let err = AppError::UnknownCategory(vec!["foo".to_string(), "bar baz".to_string()]);
        assert_eq!(
            err.to_string(),
            "Invalid input: foo, bar baz not found in training data. Please use valid artist/genre/subgenre."
        );
    }

    #[test]
    fn test_artifact_load_message() {
        let err = AppError::artifact_load("backend/model/scaler.json", "expected 8 columns, got 7");
        assert_eq!(
            err.to_string(),
            "Failed to load artifact backend/model/scaler.json: expected 8 columns, got 7"
        );
    }

    #[test]
    fn test_only_not_found_is_a_client_status() {
        let response = AppError::UnknownCategory(vec!["nope".to_string()]).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::Computation("boom".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("artist.json not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
