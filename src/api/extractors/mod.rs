//! Request extractors whose rejections render as `AppError`.

mod validated_json;

use axum::extract::{FromRequestParts, Path, Query};

use crate::errors::AppError;

pub use validated_json::{format_validation_errors, ValidatedJson};

/// `Path` with framework rejections mapped to `AppError`
#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// `Query` with framework rejections mapped to `AppError`
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
