use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::research::types::{PromptGeneratorResult, ReResearchRequest, ResearchRequest};
use crate::server::{AppState, error::ApiError};

/// 存活探针
pub async fn root() -> Json<Value> {
    Json(json!({ "Hello": "World" }))
}

/// 首次生成报告
#[instrument(skip_all)]
pub async fn research(
    State(state): State<AppState>,
    payload: Result<Json<ResearchRequest>, JsonRejection>,
) -> Result<Json<PromptGeneratorResult>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        topic = %request.report_topic,
        dummy = request.config.dummy_api,
        "research request"
    );

    let executor = state.selector.executor(&request.config);
    let generator = state.registry.resolve(request.report_topic)?;

    let result = executor
        .execute(generator, &request)
        .await
        .map_err(ApiError::Executor)?;

    Ok(Json(result.into()))
}

/// 根据指令修订已有报告
#[instrument(skip_all)]
pub async fn re_research(
    State(state): State<AppState>,
    payload: Result<Json<ReResearchRequest>, JsonRejection>,
) -> Result<Json<PromptGeneratorResult>, ApiError> {
    let Json(request) = payload?;
    tracing::info!(
        dummy = request.config.dummy_api,
        document_len = request.document.len(),
        "re-research request"
    );

    let result = state
        .selector
        .re_executor(&request.config)
        .re_execute(&request)
        .await
        .map_err(ApiError::Executor)?;

    Ok(Json(result.into()))
}
