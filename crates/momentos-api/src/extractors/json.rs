//! JSON request bodies with the API error envelope.
//!
//! Axum's own [`Json`] rejection is a plain-text 422. [`JsonBody`] routes
//! the rejection through [`AppError`] so malformed or incomplete bodies get
//! the same `VALIDATION_ERROR` response as a failed `validate()`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use momentos_core::error::AppError;

use crate::error::ApiError;
use crate::extractors::form::rejection;

/// A JSON body deserialized into `T`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(err) => Err(json_rejection(err).into()),
        }
    }
}

fn json_rejection(err: JsonRejection) -> AppError {
    match err {
        JsonRejection::JsonDataError(e) => {
            let text = e.body_text();
            match missing_field(&text) {
                Some(field) => AppError::field(field, "This field is required"),
                None => AppError::validation(text),
            }
        }
        other => rejection(other.status(), other.body_text()),
    }
}

/// Field name from a serde "missing field `name`" message.
fn missing_field(text: &str) -> Option<&str> {
    let (_, rest) = text.split_once("missing field `")?;
    let (field, _) = rest.split_once('`')?;
    Some(field)
}
