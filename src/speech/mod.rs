pub mod murf;

use async_trait::async_trait;

pub use murf::MurfSpeaker;

/// Audio path the frontend falls back to when synthesis is unavailable.
pub const FALLBACK_AUDIO_URL: &str = "/static/fallback.mp3";

/// Anything that can turn a description into a hosted audio URL.
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<String, SynthesisError>;
}

#[derive(thiserror::Error, Debug)]
pub enum SynthesisError {
    #[error("input text is empty, nothing to synthesize")]
    EmptyText,

    #[error("speech provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("speech provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("speech provider response contained no audio file URL")]
    MissingAudioField,
}
