//! Request extractors
//!
//! 不正な JSON ボディを axum 既定のプレーンテキストではなく
//! [`AppError`] の JSON 形式で返すための抽出器。

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// `Json<T>` のラッパー
///
/// デシリアライズに失敗した場合は 400 `INVALID_REQUEST_BODY` を返します。
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            AppError::bad_request(e.body_text())
                .with_code("INVALID_REQUEST_BODY")
                .with_source(e)
        })?;
        Ok(AppJson(value))
    }
}
