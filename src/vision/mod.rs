pub mod gemini;

use async_trait::async_trait;

pub use gemini::GeminiDescriber;

/// Anything that can turn image bytes into a natural-language description.
#[async_trait]
pub trait Describer: Send + Sync {
    /// A successful result may still be an empty string; callers decide
    /// whether a blank description is usable downstream.
    async fn describe(&self, image: &[u8]) -> Result<String, DescribeError>;
}

#[derive(thiserror::Error, Debug)]
pub enum DescribeError {
    #[error("could not decode the upload as an image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("vision provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("vision provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("vision provider response contained no generated text")]
    MalformedResponse,
}
