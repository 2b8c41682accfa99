use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Speaker, SynthesisError};

const DEFAULT_BASE_URL: &str = "https://api.murf.ai";
const VOICE_ID: &str = "en-US-charles";
const FORMAT: &str = "MP3";
const QUALITY: &str = "high";
const STYLE: &str = "conversational";

/// Speaker backed by the Murf speech-generation endpoint.
pub struct MurfSpeaker {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateSpeechRequest<'a> {
    text: &'a str,
    voice_id: &'a str,
    format: &'a str,
    quality: &'a str,
    style: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateSpeechResponse {
    #[serde(rename = "audioFile")]
    audio_file: Option<String>,
}

impl MurfSpeaker {
    pub fn new(client: reqwest::Client, api_key: String, timeout: Duration) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            timeout,
        }
    }

    /// Point the client at a different host, e.g. a proxy or a mock server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl Speaker for MurfSpeaker {
    async fn synthesize(&self, text: &str) -> Result<String, SynthesisError> {
        // Upstream can hand us a blank description; don't spend provider
        // quota on it.
        if text.trim().is_empty() {
            tracing::warn!("Input text for synthesis is empty, skipping provider call");
            return Err(SynthesisError::EmptyText);
        }

        let request = GenerateSpeechRequest {
            text,
            voice_id: VOICE_ID,
            format: FORMAT,
            quality: QUALITY,
            style: STYLE,
        };

        let url = format!("{}/v1/speech/generate", self.base_url);

        tracing::info!("Sending text to speech provider: '{}'", text);
        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Speech provider returned {}: {}", status, body);
            return Err(SynthesisError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateSpeechResponse = response.json().await?;
        match parsed.audio_file {
            Some(audio_url) if !audio_url.is_empty() => {
                tracing::info!("Received audio URL: {}", audio_url);
                Ok(audio_url)
            }
            _ => {
                // Distinct from transport failures so quota issues are
                // diagnosable from the logs.
                tracing::error!("Speech provider response had no audioFile field");
                Err(SynthesisError::MissingAudioField)
            }
        }
    }
}
