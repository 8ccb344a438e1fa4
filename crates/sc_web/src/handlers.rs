use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sc_core::SourceTag;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::AppState;

const FETCH_FAILED: &str = "URL 접속 중 오류가 발생되었습니다";
const SCRAP_FAILED: &str = "Article 처리 중 오류가 발생되었습니다";
const INVALID_DATE: &str = "날짜가 입력되지 않았거나 유효하지 않습니다";
const PURGE_FAILED: &str = "Article 삭제 중 오류가 발생했습니다";

#[derive(Debug, Deserialize)]
pub struct ScrapQuery {
    #[serde(rename = "urlCode")]
    pub url_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PurgeQuery {
    #[serde(rename = "beforeDate")]
    pub before_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub msg: String,
}

fn reply(status: StatusCode, msg: impl Into<String>) -> (StatusCode, Json<Message>) {
    (status, Json(Message { msg: msg.into() }))
}

/// GET /api/scrap?urlCode={QNA|BLOG}
pub async fn scrap(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScrapQuery>,
) -> impl IntoResponse {
    let code = query.url_code.as_deref().unwrap_or("QNA");
    let result = match code.parse::<SourceTag>() {
        Ok(tag) => state.manager.scrap(tag).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(count) => {
            info!("✅ Scrap of {} finished with {} articles", code, count);
            reply(StatusCode::OK, format!("{}건 처리되었습니다", count))
        }
        Err(e) => {
            error!("❌ Scrap of {} failed: {}", code, e);
            let msg = if e.is_fetch() { FETCH_FAILED } else { SCRAP_FAILED };
            reply(StatusCode::INTERNAL_SERVER_ERROR, msg)
        }
    }
}

/// GET /api/purge?beforeDate=YYYY-MM-DD
pub async fn purge(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PurgeQuery>,
) -> impl IntoResponse {
    match state.manager.purge(query.before_date.as_deref()).await {
        Ok(count) => reply(StatusCode::OK, format!("Article {}건 삭제되었습니다", count)),
        Err(e) if e.is_validation() => {
            warn!("⚠️ Rejected purge request: {}", e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, INVALID_DATE)
        }
        Err(e) => {
            error!("❌ Purge failed: {}", e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, PURGE_FAILED)
        }
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
