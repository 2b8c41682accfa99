pub mod handlers;
pub mod routes;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DescribeResponse {
    pub description: String,
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
