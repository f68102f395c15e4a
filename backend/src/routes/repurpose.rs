use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use repurpose_common::{
    HistoryEntry, HistoryResponse, Platform, RepurposeRequest, RepurposeResponse,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::{ApiError, Result};
use crate::extract::{ValidJson, ValidQuery};
use crate::AppState;

pub const DEFAULT_HISTORY_LIMIT: u32 = 20;
pub const MAX_HISTORY_LIMIT: u32 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u32>,
}

impl HistoryQuery {
    /// Requested limit clamped to `1..=MAX_HISTORY_LIMIT`.
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT)
    }
}

/// POST /repurpose - rewrite an article for one platform
async fn repurpose(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidJson(request): ValidJson<RepurposeRequest>,
) -> Result<Json<RepurposeResponse>> {
    let platform = request
        .platform
        .parse::<Platform>()
        .map_err(|e| ApiError::validation(e.to_string()))?;

    if request.article.trim().is_empty() {
        return Err(ApiError::validation("Article must not be empty"));
    }

    tracing::info!(
        user_id = user.user_id,
        %platform,
        article_chars = request.article.chars().count(),
        "Repurposing article"
    );

    let repurposed_content = state.generator.generate(platform, &request.article).await?;

    state.store.append_generation(
        Some(user.user_id),
        platform.as_str(),
        &request.article,
        &repurposed_content,
    )?;

    Ok(Json(RepurposeResponse {
        platform,
        repurposed_content,
    }))
}

/// GET /history - the caller's most recent generations
async fn history(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    ValidQuery(query): ValidQuery<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let history: Vec<HistoryEntry> = state
        .store
        .list_generations(user.user_id, query.effective_limit())?
        .into_iter()
        .map(HistoryEntry::from)
        .collect();

    Ok(Json(HistoryResponse { history }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/repurpose", post(repurpose))
        .route("/history", get(history))
        .with_state(state)
}
