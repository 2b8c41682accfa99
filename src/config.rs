use std::env;
use std::time::Duration;

/// Process-wide configuration, read once at startup and handed to the
/// components that need it.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: String,
    pub murf_api_key: String,
    pub vision_timeout: Duration,
    pub tts_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let gemini_api_key =
            env::var("GEMINI_API_KEY").map_err(|_| "GEMINI_API_KEY not set".to_string())?;
        let murf_api_key =
            env::var("MURF_API_KEY").map_err(|_| "MURF_API_KEY not set".to_string())?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| "PORT must be a number".to_string())?;

        let vision_timeout = timeout_from_env("VISION_TIMEOUT_SECS", 30)?;
        let tts_timeout = timeout_from_env("TTS_TIMEOUT_SECS", 60)?;

        Ok(Self {
            host,
            port,
            gemini_api_key,
            murf_api_key,
            vision_timeout,
            tts_timeout,
        })
    }
}

fn timeout_from_env(var: &str, default_secs: u64) -> Result<Duration, String> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map(Duration::from_secs)
            .map_err(|_| format!("{} must be a number of seconds", var)),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_default() {
        let timeout = timeout_from_env("NO_SUCH_TIMEOUT_VAR", 30).unwrap();
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_timeout_override() {
        env::set_var("TEST_TIMEOUT_OVERRIDE_SECS", "5");
        let timeout = timeout_from_env("TEST_TIMEOUT_OVERRIDE_SECS", 30).unwrap();
        assert_eq!(timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_timeout_invalid() {
        env::set_var("TEST_TIMEOUT_BAD_SECS", "soon");
        assert!(timeout_from_env("TEST_TIMEOUT_BAD_SECS", 30).is_err());
    }

    // Runs the missing-credential and happy paths in one test so parallel
    // tests don't race on the shared variables.
    #[test]
    fn test_from_env_requires_credentials() {
        env::set_var("HOST", "127.0.0.1");
        env::set_var("PORT", "8000");
        env::remove_var("GEMINI_API_KEY");
        env::remove_var("MURF_API_KEY");
        let err = Config::from_env().unwrap_err();
        assert!(err.contains("GEMINI_API_KEY"));

        env::set_var("GEMINI_API_KEY", "g-key");
        let err = Config::from_env().unwrap_err();
        assert!(err.contains("MURF_API_KEY"));

        env::set_var("MURF_API_KEY", "m-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.gemini_api_key, "g-key");
        assert_eq!(config.murf_api_key, "m-key");
        assert_eq!(config.vision_timeout, Duration::from_secs(30));
        assert_eq!(config.tts_timeout, Duration::from_secs(60));

        env::remove_var("GEMINI_API_KEY");
        env::remove_var("MURF_API_KEY");
    }
}
