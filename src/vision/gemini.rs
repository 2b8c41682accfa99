use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;

use super::{DescribeError, Describer};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MODEL: &str = "gemini-1.5-flash-latest";
const PROMPT: &str =
    "Describe this image for a visually impaired person in one, clear sentence.";

/// Describer backed by the Gemini `generateContent` endpoint.
pub struct GeminiDescriber {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiDescriber {
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
impl Describer for GeminiDescriber {
    async fn describe(&self, image: &[u8]) -> Result<String, DescribeError> {
        // Reject payloads that are not a decodable still image before
        // spending provider quota on them. The detected format also
        // supplies the mime type for the inline payload.
        let format = image::guess_format(image)?;
        image::load_from_memory(image)?;

        let body = json!({
            "contents": [{
                "parts": [
                    { "text": PROMPT },
                    {
                        "inline_data": {
                            "mime_type": format.to_mime_type(),
                            "data": STANDARD.encode(image),
                        }
                    },
                ]
            }]
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, MODEL
        );

        tracing::info!("Sending image to vision provider ({} bytes)", image.len());
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Vision provider returned {}: {}", status, body);
            return Err(DescribeError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().find_map(|p| p.text))
            .ok_or(DescribeError::MalformedResponse)?;

        tracing::info!("Description received from vision provider");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn red_square_jpeg() -> Vec<u8> {
        let mut img = image::RgbImage::new(10, 10);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgb([255, 0, 0]);
        }
        let mut buffer = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, image::ImageFormat::Jpeg)
            .unwrap();
        buffer.into_inner()
    }

    fn describer(server: &MockServer) -> GeminiDescriber {
        GeminiDescriber::new(
            reqwest::Client::new(),
            "test-key".to_string(),
            Duration::from_secs(5),
        )
        .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_describe_extracts_generated_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/v1beta/models/{}:generateContent", MODEL)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "a red square" }] }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let description = describer(&server)
            .describe(&red_square_jpeg())
            .await
            .unwrap();
        assert_eq!(description, "a red square");
    }

    #[tokio::test]
    async fn test_describe_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let err = describer(&server)
            .describe(&red_square_jpeg())
            .await
            .unwrap_err();
        match err {
            DescribeError::Provider { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "overloaded");
            }
            other => panic!("expected provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_describe_rejects_undecodable_bytes_without_calling_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = describer(&server)
            .describe(b"definitely not an image")
            .await
            .unwrap_err();
        assert!(matches!(err, DescribeError::ImageDecode(_)));
    }

    #[tokio::test]
    async fn test_describe_empty_candidates_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let err = describer(&server)
            .describe(&red_square_jpeg())
            .await
            .unwrap_err();
        assert!(matches!(err, DescribeError::MalformedResponse));
    }
}
