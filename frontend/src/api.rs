use crate::config::AppConfig;
use crate::error::ApiError;
use futures::future::{Either, select};
use futures::pin_mut;
use gloo_file::File as GlooFile;
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use shared::{HealthReport, PredictionResult};

/// Multipart field the service reads the upload from.
pub const IMAGE_FIELD: &str = "image";

pub async fn fetch_health(config: &AppConfig) -> Result<HealthReport, ApiError> {
    let response = Request::get(&config.health_url())
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    read_json::<HealthReport>(response).await
}

pub async fn predict(config: &AppConfig, file: &GlooFile) -> Result<PredictionResult, ApiError> {
    let form_data =
        web_sys::FormData::new().map_err(|e| ApiError::Request(format!("{:?}", e)))?;
    form_data
        .append_with_blob_and_filename(IMAGE_FIELD, file.as_ref(), &file.name())
        .map_err(|e| ApiError::Request(format!("{:?}", e)))?;

    let request = Request::post(&config.predict_url())
        .body(form_data)
        .map_err(|e| ApiError::Request(e.to_string()))?;

    // setTimeout treats anything above i32::MAX as 0.
    let timeout_ms = config.predict_timeout.as_millis().min(i32::MAX as u128) as u32;

    let exchange = async {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json::<PredictionResult>(response).await
    };

    with_timeout(exchange, TimeoutFuture::new(timeout_ms), u64::from(timeout_ms)).await
}

/// Races the whole exchange, body included, against `timer`.
pub async fn with_timeout<T, F, D>(exchange: F, timer: D, timeout_ms: u64) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
    D: Future<Output = ()>,
{
    pin_mut!(exchange, timer);

    match select(exchange, timer).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(_) => Err(ApiError::Timeout(timeout_ms)),
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_response_body(status, &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::{pending, ready};

    #[test]
    fn test_stalled_exchange_times_out() {
        let outcome: Result<u8, ApiError> = block_on(with_timeout(pending(), ready(()), 30_000));
        assert_eq!(outcome, Err(ApiError::Timeout(30_000)));
    }

    #[test]
    fn test_stalled_body_after_headers_times_out() {
        // Headers arrived, the body never does.
        let exchange = async {
            let status = ready(200u16).await;
            assert_eq!(status, 200);
            pending::<Result<PredictionResult, ApiError>>().await
        };
        assert_eq!(block_on(with_timeout(exchange, ready(()), 5)), Err(ApiError::Timeout(5)));
    }

    #[test]
    fn test_finished_exchange_wins_over_timer() {
        assert_eq!(block_on(with_timeout(ready(Ok(7)), pending(), 5)), Ok(7));

        let failed: Result<u8, ApiError> =
            block_on(with_timeout(ready(Err(ApiError::Network("offline".into()))), pending(), 5));
        assert_eq!(failed, Err(ApiError::Network("offline".into())));
    }
}
