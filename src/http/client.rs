use std::time::{Duration, Instant};

use tracing::debug;

use crate::Result;
use crate::http::header::active_pairs;
use crate::http::request::ResolvedRequest;
use crate::http::response::Response;
use crate::http::types::Method;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Client {
    inner: reqwest::Client,
}

impl Client {
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self {
            inner: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub async fn execute(&self, request: &ResolvedRequest) -> Result<Response> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Head => reqwest::Method::HEAD,
            Method::Options => reqwest::Method::OPTIONS,
        };
        let mut req = self.inner.request(method, request.url.as_str());

        for (key, value) in active_pairs(&request.headers) {
            req = req.header(key, value);
        }

        if let Some(body) = request.effective_body() {
            req = req.body(body.to_owned());
        }

        debug!(method = %request.method, url = %request.url, "Sending request");

        let start = Instant::now();
        let response = req.send().await?;
        let duration = start.elapsed();

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = response.text().await?;

        Response::new(status, content_type, body, duration)
    }
}
