use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::league::{LeagueError, PlayerId};
use crate::proposal::ProposalError;

/// Errors returned by the HTTP handlers. Every variant renders as
/// `{"success": false, "error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No league connected")]
    NoLeague,

    #[error("Team {0} not found")]
    TeamNotFound(u32),

    #[error("Player {0} is not on a roster in this league")]
    PlayerNotFound(PlayerId),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Proposal(#[from] ProposalError),

    #[error("Failed to connect to league: {0}")]
    League(#[from] LeagueError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoLeague | ApiError::BadRequest(_) | ApiError::Proposal(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::TeamNotFound(_) | ApiError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::League(LeagueError::Network(_)) => StatusCode::BAD_GATEWAY,
            ApiError::League(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_status_codes() {
        assert_eq!(ApiError::NoLeague.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::TeamNotFound(3).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::League(LeagueError::Network("timeout".into())).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::League(LeagueError::AuthenticationRequired).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("lock".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_match_client_expectations() {
        assert_eq!(ApiError::NoLeague.to_string(), "No league connected");
        let err: ApiError = ProposalError::PlayerOnBothSides { id: PlayerId(9) }.into();
        assert_eq!(err.to_string(), "player 9 is already on the other side of the trade");
    }
}
