//! Remote Fetch Adapter
//!
//! Reads the initial purchases once per page load, going through the
//! transfer state first.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::FetchError;
use crate::model::PurchaseRecord;
use crate::transfer::{make_state_key, StateKey, TransferState};

pub const PURCHASES_COLLECTION: &str = "purchases";

pub const PURCHASES: StateKey<Vec<PurchaseRecord>> = make_state_key(PURCHASES_COLLECTION);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can answer a GET
#[async_trait(?Send)]
pub trait HttpBackend {
    async fn get(&self, url: &str) -> HttpResponse;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    TransferState,
    Network,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    pub records: Vec<PurchaseRecord>,
    pub source: LoadSource,
}

#[derive(Deserialize)]
struct Encapsulated<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Initial purchases, read at most once per transfer state
pub async fn load_purchases<H>(
    state: &mut TransferState,
    http: &H,
    config: &AppConfig,
) -> Result<Loaded, FetchError>
where
    H: HttpBackend + ?Sized,
{
    if let Some(records) = state.get(PURCHASES) {
        log::debug!("purchases served from transfer state ({} records)", records.len());
        return Ok(Loaded {
            records,
            source: LoadSource::TransferState,
        });
    }

    let url = config.collection_url(PURCHASES_COLLECTION);
    log::debug!("GET {}", url);
    let response = http.get(&url).await;
    let records = decode_collection(&response, config.data_encapsulation)?;
    state.set(PURCHASES, &records)?;
    log::info!("loaded {} purchases from {}", records.len(), url);

    Ok(Loaded {
        records,
        source: LoadSource::Network,
    })
}

fn decode_collection(
    response: &HttpResponse,
    encapsulated: bool,
) -> Result<Vec<PurchaseRecord>, FetchError> {
    if !response.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&response.body)
            .map(|body| body.error)
            .unwrap_or_else(|_| response.body.clone());
        return Err(FetchError::Status {
            status: response.status,
            message,
        });
    }

    let decoded = if encapsulated {
        serde_json::from_str::<Encapsulated<Vec<PurchaseRecord>>>(&response.body).map(|e| e.data)
    } else {
        serde_json::from_str::<Vec<PurchaseRecord>>(&response.body)
    };
    decoded.map_err(|e| FetchError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Fixed {
        response: HttpResponse,
        calls: Cell<u32>,
    }

    impl Fixed {
        fn new(status: u16, body: &str) -> Self {
            Self {
                response: HttpResponse::new(status, body),
                calls: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl HttpBackend for Fixed {
        async fn get(&self, _url: &str) -> HttpResponse {
            self.calls.set(self.calls.get() + 1);
            self.response.clone()
        }
    }

    #[tokio::test]
    async fn test_second_load_is_cache_hit() {
        let http = Fixed::new(200, r#"[{"name":"Bread","completed":false}]"#);
        let mut state = TransferState::new();
        let config = AppConfig::default();

        let first = load_purchases(&mut state, &http, &config).await.unwrap();
        let second = load_purchases(&mut state, &http, &config).await.unwrap();

        assert_eq!(first.source, LoadSource::Network);
        assert_eq!(second.source, LoadSource::TransferState);
        assert_eq!(first.records, second.records);
        assert_eq!(http.calls.get(), 1);
    }

    #[tokio::test]
    async fn test_encapsulated_body() {
        let http = Fixed::new(200, r#"{"data":[{"name":"Milk","completed":true}]}"#);
        let config = AppConfig {
            data_encapsulation: true,
            ..AppConfig::default()
        };
        let loaded = load_purchases(&mut TransferState::new(), &http, &config).await.unwrap();
        assert_eq!(loaded.records, vec![PurchaseRecord::new("Milk", true)]);
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let config = AppConfig::default();
        let mut state = TransferState::new();

        let err = load_purchases(&mut state, &Fixed::new(404, r#"{"error":"no such collection"}"#), &config)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::Status { status: 404, message: "no such collection".to_string() }
        );

        let err = load_purchases(&mut state, &Fixed::new(200, "not json"), &config)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!state.has_key(PURCHASES));
    }
}
