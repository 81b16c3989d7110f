//! Form bodies that arrive either as JSON or as `multipart/form-data`.
//!
//! Profile and moment edits accept both encodings, and uploads only make
//! sense as multipart. [`FormData`] flattens either into string fields plus
//! named files so handlers read one shape.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use chrono::NaiveDate;
use serde_json::Value;

use momentos_core::error::AppError;
use momentos_service::FileUpload;

use crate::error::ApiError;
use crate::state::AppState;

/// Parsed request form.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, Vec<String>>,
    files: HashMap<String, FileUpload>,
}

impl FormData {
    /// First value of a text field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(|v| v.first()).cloned()
    }

    /// Every value of a repeated text field.
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        self.fields.get(name).cloned()
    }

    /// A boolean field. Blank counts as absent.
    pub fn flag(&self, name: &str) -> Result<Option<bool>, AppError> {
        let Some(raw) = self.text(name) else {
            return Ok(None);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "on" | "yes" => Ok(Some(true)),
            "false" | "0" | "off" | "no" => Ok(Some(false)),
            _ => Err(AppError::field(name, "Must be a valid boolean")),
        }
    }

    /// An integer field. Blank counts as absent.
    pub fn integer(&self, name: &str) -> Result<Option<i32>, AppError> {
        match self.text(name).as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| AppError::field(name, "A valid integer is required")),
        }
    }

    /// A `YYYY-MM-DD` date. Present but blank means "clear the date".
    pub fn date(&self, name: &str) -> Result<Option<Option<NaiveDate>>, AppError> {
        match self.text(name).as_deref().map(str::trim) {
            None => Ok(None),
            Some("") => Ok(Some(None)),
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map(|d| Some(Some(d)))
                .map_err(|_| AppError::field(name, "Date has wrong format. Use YYYY-MM-DD")),
        }
    }

    /// Remove and return an uploaded file.
    pub fn take_file(&mut self, name: &str) -> Option<FileUpload> {
        self.files.remove(name)
    }

    fn push(&mut self, name: String, value: String) {
        self.fields.entry(name).or_default().push(value);
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.file_name().map(str::to_string) {
                Some(filename) => {
                    let data = field.bytes().await.map_err(multipart_error)?;
                    form.files.insert(name, FileUpload { filename, data });
                }
                None => {
                    let value = field.text().await.map_err(multipart_error)?;
                    form.push(name, value);
                }
            }
        }
        Ok(form)
    }

    fn from_json(value: Value) -> Result<Self, AppError> {
        let Value::Object(map) = value else {
            return Err(AppError::validation("Expected a JSON object"));
        };
        let mut form = Self::default();
        for (name, value) in map {
            match value {
                Value::Array(items) => {
                    let values = items.into_iter().map(scalar_text).collect();
                    form.fields.insert(name, values);
                }
                other => form.push(name, scalar_text(other)),
            }
        }
        Ok(form)
    }
}

impl FromRequest<AppState> for FormData {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.to_ascii_lowercase().starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejection(e.status(), e.body_text()))?;
            return Ok(Self::from_multipart(multipart).await?);
        }

        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        Ok(Self::from_json(value)?)
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    rejection(err.status(), err.body_text())
}

pub(crate) fn rejection(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::payload_too_large("Request body is too large")
    } else {
        AppError::validation(text)
    }
}
