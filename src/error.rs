use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Riot API error: {status} - {message}")]
    RiotApi { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Player not found on Riot: {game_name}#{tag_line}")]
    PlayerNotFound { game_name: String, tag_line: String },

    #[error("Summoner not registered: {game_name}#{tag_line}")]
    SummonerNotRegistered { game_name: String, tag_line: String },

    #[error("Summoner already registered: {game_name}#{tag_line}")]
    AlreadyRegistered { game_name: String, tag_line: String },

    #[error("Invalid queue type: {0}")]
    InvalidQueue(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidQueue(_) | Self::InvalidRequest(_) | Self::AlreadyRegistered { .. } => {
                StatusCode::BAD_REQUEST
            }
            Self::PlayerNotFound { .. } | Self::SummonerNotRegistered { .. } => {
                StatusCode::NOT_FOUND
            }
            Self::Database(_)
            | Self::RiotApi { .. }
            | Self::Http(_)
            | Self::Io(_)
            | Self::InvalidRegion(_)
            | Self::InvalidTimezone(_)
            | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "🌐 ❌ Request failed");
            return (status, "Internal server error").into_response();
        }

        (status, self.to_string()).into_response()
    }
}
