//! Image serving handler

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /public/images/:filename - serve an uploaded image
///
/// Filenames are resolved through the image store, which refuses anything
/// that could escape the images directory.
pub async fn serve(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> AppResult<Response> {
    let path = state
        .images
        .path_of(&filename)
        .ok_or_else(|| AppError::not_found("Image not found"))?;

    let data = match tokio::fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::not_found("Image not found"));
        }
        Err(e) => return Err(AppError::internal(format!("failed to read image: {e}"))),
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, mime.to_string())], data).into_response())
}
