use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use super::{DescribeResponse, HealthResponse, IndexResponse};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::speech::FALLBACK_AUDIO_URL;

pub async fn describe_and_speak(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<DescribeResponse>, AppError> {
    let image = read_upload(&mut multipart).await?;

    // No description means there is nothing to speak; that one failure is
    // fatal to the request.
    let description = state.describer.describe(&image).await?;

    // Synthesis failures degrade to the fallback clip instead of erroring
    let audio_url = match state.speaker.synthesize(&description).await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Speech synthesis failed, serving fallback audio: {}", e);
            FALLBACK_AUDIO_URL.to_string()
        }
    };

    Ok(Json(DescribeResponse {
        description,
        audio_url,
    }))
}

/// Read the first file field of the upload fully into memory.
async fn read_upload(multipart: &mut Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await?;
        tracing::info!("Received file: {} ({} bytes)", name, data.len());
        return Ok(data.to_vec());
    }

    Err(AppError::BadRequest("No file field in upload".into()))
}

pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        message: "AI Vision Companion Backend is running!".to_string(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
