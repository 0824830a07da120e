use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_base_url: env::var("MEDICOMBINE_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            request_timeout: Duration::from_secs(
                env::var("MEDICOMBINE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()
                    .expect("MEDICOMBINE_TIMEOUT_SECS must be a number"),
            ),
        }
    }
}
