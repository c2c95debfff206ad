use crate::api;
use crate::config::AppConfig;
use crate::error::ApiError;
use shared::HealthReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityStatus {
    Connected,
    #[default]
    Disconnected,
}

impl From<bool> for ConnectivityStatus {
    fn from(connected: bool) -> Self {
        if connected {
            ConnectivityStatus::Connected
        } else {
            ConnectivityStatus::Disconnected
        }
    }
}

impl ConnectivityStatus {
    pub fn is_connected(self) -> bool {
        self == ConnectivityStatus::Connected
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectivityStatus::Connected => "✓ Backend Connected",
            ConnectivityStatus::Disconnected => "✗ Backend Disconnected",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ConnectivityStatus::Connected => "connected",
            ConnectivityStatus::Disconnected => "disconnected",
        }
    }
}

/// Probes the backend once. Failures are logged and reported as
/// `Disconnected`; they never reach the error banner.
pub async fn check_status(config: &AppConfig) -> ConnectivityStatus {
    status_from_probe(api::fetch_health(config).await)
}

pub fn status_from_probe(probe: Result<HealthReport, ApiError>) -> ConnectivityStatus {
    match probe {
        Ok(report) => {
            if !report.supported_emotions.is_empty() {
                log::info!("Backend supports emotions: {}", report.supported_emotions.join(", "));
            }
            if !report.model_loaded {
                log::warn!("Backend is up but its model is not loaded");
            }
            ConnectivityStatus::from(report.model_loaded)
        }
        Err(e) => {
            log::warn!("Backend not reachable: {}", e);
            ConnectivityStatus::Disconnected
        }
    }
}
