use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::research::generators::DispatchError;

/// 接口错误
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 请求体不符合数据契约
    #[error("{0}")]
    Validation(String),

    /// 找不到主题对应的生成器
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// 执行器失败，原样上报
    #[error("{0}")]
    Executor(anyhow::Error),
}

impl ApiError {
    fn info(&self) -> (StatusCode, String) {
        match self {
            Self::Validation(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail.clone()),
            Self::Dispatch(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Executor(err) => (StatusCode::INTERNAL_SERVER_ERROR, format!("{:#}", err)),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, detail) = self.info();
        if status_code.is_server_error() {
            tracing::error!("api request failed: {}", detail);
        } else {
            tracing::info!("api request rejected: {}", detail);
        }
        (status_code, Json(ErrorResponse { detail })).into_response()
    }
}

// response structure
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}
