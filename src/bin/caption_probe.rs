//! Manual probe for the hosted vit-gpt2 image-captioning endpoint.
//!
//! Reads an image file, posts the raw bytes with a bearer token, and prints
//! the generated caption. Handy for checking the token and endpoint health
//! without running the full server.
//!
//! Usage: `caption_probe [path/to/image.jpg]` with `HF_API_TOKEN` set.

use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const API_URL: &str =
    "https://api-inference.huggingface.co/models/nlpconnect/vit-gpt2-image-captioning";

#[derive(Debug, Deserialize)]
struct Caption {
    generated_text: String,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let image_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "images/abc.jpg".to_string());

    let token = match std::env::var("HF_API_TOKEN") {
        Ok(token) => token,
        Err(_) => {
            tracing::error!("HF_API_TOKEN not set");
            std::process::exit(1);
        }
    };

    tracing::info!("Using API URL: {}", API_URL);
    tracing::info!("Reading image from: {}", image_path);

    let image = match std::fs::read(&image_path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Could not read '{}': {}", image_path, e);
            std::process::exit(1);
        }
    };

    match caption(image, &token).await {
        Ok(description) => println!("Final description: {}", description),
        Err(e) => {
            tracing::error!("Captioning failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn caption(image: Vec<u8>, token: &str) -> Result<String, Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    tracing::info!("Sending {} bytes to the captioning API", image.len());
    let response = client
        .post(API_URL)
        .bearer_auth(token)
        .timeout(Duration::from_secs(30))
        .body(image)
        .send()
        .await?;

    let status = response.status();
    tracing::info!("Received response with status {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!("Status: {}", status);
        tracing::error!("Response body: {}", body);
        return Err(format!("captioning API returned {}", status).into());
    }

    let captions: Vec<Caption> = response.json().await?;
    let description = captions
        .into_iter()
        .next()
        .map(|c| c.generated_text)
        .ok_or("could not parse a caption out of the response")?;

    tracing::info!("Caption received: {}", description);
    Ok(description)
}
