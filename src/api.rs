//! Mock HTTP Client
//!
//! Serves `GET api/...` from the in-memory backend after a simulated
//! network delay.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use shopping_core::{AppConfig, HttpBackend, HttpResponse, InMemoryBackend, InMemoryDb};

pub struct MockHttpClient {
    backend: InMemoryBackend,
    latency_ms: u32,
}

impl MockHttpClient {
    pub fn new(db: InMemoryDb, config: &AppConfig) -> Self {
        Self {
            backend: InMemoryBackend::new(db, config),
            latency_ms: config.latency_ms,
        }
    }
}

#[async_trait(?Send)]
impl HttpBackend for MockHttpClient {
    async fn get(&self, url: &str) -> HttpResponse {
        if self.latency_ms > 0 {
            TimeoutFuture::new(self.latency_ms).await;
        }
        let response = self.backend.get(url).await;
        log::debug!("GET {} -> {}", url, response.status);
        response
    }
}
