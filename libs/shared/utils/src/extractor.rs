use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use shared_models::error::AppError;

/// `Json<T>` whose rejection is an [`AppError`], so malformed bodies produce
/// the same `{"error": ...}` shape as every other failure.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection_to_error(rejection)),
        }
    }
}

pub fn json_rejection_to_error(rejection: JsonRejection) -> AppError {
    AppError::BadRequest(format!("Некорректное тело запроса: {}", rejection.body_text()))
}

/// `Query<T>` whose rejection is a JSON [`AppError`].
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(query_rejection_to_error(rejection)),
        }
    }
}

/// `Path<T>` whose rejection is a JSON [`AppError`].
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(path_rejection_to_error(rejection)),
        }
    }
}

pub fn query_rejection_to_error(rejection: QueryRejection) -> AppError {
    AppError::BadRequest(format!("Некорректные параметры запроса: {}", rejection.body_text()))
}

pub fn path_rejection_to_error(rejection: PathRejection) -> AppError {
    AppError::BadRequest(format!("Некорректный путь запроса: {}", rejection.body_text()))
}

/// Trims an optional parameter and treats blank values as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
