//! Shareable request paths.
//!
//! A resolved request is encoded as
//!
//! ```text
//! /<METHOD>/<base64url(utf8(url))>[/<base64url(utf8(body))>]?<key>=<value>&...
//! ```
//!
//! The body segment exists only for methods that carry a body. Only enabled
//! headers with a non-empty key become query parameters, and the `?` is
//! omitted when there are none.

pub mod segment;

use crate::http::header::{Header, active_pairs};
use crate::http::request::{RequestDraft, ResolvedRequest};
use crate::http::types::Method;
use crate::{RestpadError, Result};
use segment::{decode_segment, encode_segment};
use url::form_urlencoded;

pub struct RequestCodec;

impl RequestCodec {
    /// Encode a resolved request into its client path.
    pub fn encode(request: &ResolvedRequest) -> String {
        let mut path = format!(
            "/{}/{}",
            request.method.as_str(),
            encode_segment(&request.url)
        );

        if request.method.allows_body() {
            let body = request.body.as_deref().unwrap_or_default();
            path.push('/');
            path.push_str(&encode_segment(body));
        }

        let query = Self::encode_headers(&request.headers);
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }

        path
    }

    /// Decode a full client path, query string included.
    pub fn decode(path: &str) -> Result<ResolvedRequest> {
        let (path_part, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };

        let trimmed = path_part.strip_prefix('/').unwrap_or(path_part);
        let segments: Vec<&str> = trimmed.split('/').collect();

        Self::decode_parts(&segments, query)
    }

    /// Decode already-split path segments (`[method, url, body?]`) and query.
    pub fn decode_parts(segments: &[&str], query: Option<&str>) -> Result<ResolvedRequest> {
        let (method, encoded_url, encoded_body) = match segments {
            [method, url] => (*method, *url, None),
            [method, url, body] => (*method, *url, Some(*body)),
            _ => {
                return Err(RestpadError::MalformedInput(format!(
                    "Expected 2 or 3 path segments, got {}",
                    segments.len()
                )));
            }
        };

        let method = Method::parse(method)?;
        let url = decode_segment(encoded_url)?;

        let body = match encoded_body {
            Some(encoded) if method.allows_body() => decode_segment(encoded)?,
            _ => RequestDraft::DEFAULT_BODY.to_string(),
        };

        Ok(ResolvedRequest {
            method,
            url,
            body: Some(body),
            headers: Self::decode_headers(query.unwrap_or_default()),
        })
    }

    fn encode_headers(headers: &[Header]) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in active_pairs(headers) {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }

    fn decode_headers(query: &str) -> Vec<Header> {
        form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, value)| Header::enabled(key, value))
            .collect()
    }
}
