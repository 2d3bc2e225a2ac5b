//! Request extractors that report failures through [`AppError`].

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor.
///
/// Same as [`axum::Json`], except that malformed JSON, a wrong content type
/// or a field of the wrong type is a `VALIDATION_ERROR` 400 with the usual
/// error envelope instead of axum's plain-text 400/415/422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
