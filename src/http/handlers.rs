use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::AppState;
use crate::error::AppError;
use crate::queue::Queue;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    summoner_name: Option<String>,
    tagline: Option<String>,
}

#[instrument(skip_all)]
pub async fn queue_stats(
    State(state): State<AppState>,
    Path((queue, name, tag)): Path<(String, String, String)>,
    uri: Uri,
) -> Result<String, AppError> {
    let queue: Queue = queue.parse()?;

    let key = uri.path().to_string();
    if let Some(body) = state.cache.get(&key) {
        debug!("🌐 Served from cache");
        return Ok(body);
    }

    let report = state
        .tracker
        .queue_stats(queue, &name, &tag, state.now())
        .await?;

    let body = report.to_string();
    state.cache.insert(key, body.clone());

    Ok(body)
}

#[instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, &'static str), AppError> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    let (Some(summoner_name), Some(tagline)) = (request.summoner_name, request.tagline) else {
        return Err(AppError::InvalidRequest(
            "summoner_name and tagline are required".into(),
        ));
    };

    state
        .tracker
        .register(&summoner_name, &tagline, state.now())
        .await?;

    Ok((StatusCode::CREATED, "Summoner registered"))
}
