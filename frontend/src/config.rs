use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://localhost:5000";
const DEFAULT_PREDICT_TIMEOUT_MS: u64 = 30_000;
/// Largest delay `setTimeout` honours.
const MAX_PREDICT_TIMEOUT_MS: u64 = i32::MAX as u64;

/// Build-time settings. Trunk forwards the environment to `rustc`, so
/// `MOODKEWAN_API_BASE=https://... trunk build` points the bundle at another backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub predict_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            predict_timeout: Duration::from_millis(DEFAULT_PREDICT_TIMEOUT_MS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("MOODKEWAN_API_BASE"),
            option_env!("MOODKEWAN_PREDICT_TIMEOUT_MS"),
        )
    }

    fn from_values(api_base: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let defaults = Self::default();

        let api_base = api_base
            .map(str::trim)
            .filter(|base| !base.is_empty())
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);

        let predict_timeout = match timeout_ms.map(|ms| ms.trim().parse::<u64>()) {
            Some(Ok(ms)) if ms > 0 && ms <= MAX_PREDICT_TIMEOUT_MS => Duration::from_millis(ms),
            Some(_) => {
                log::warn!("Ignoring invalid MOODKEWAN_PREDICT_TIMEOUT_MS, using default");
                defaults.predict_timeout
            }
            None => defaults.predict_timeout,
        };

        Self { api_base, predict_timeout }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    pub fn health_url(&self) -> String {
        self.endpoint("/api/health")
    }

    pub fn predict_url(&self) -> String {
        self.endpoint("/api/predict")
    }
}
