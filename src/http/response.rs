use crate::Result;
use crate::http::types::Status;
use std::time::Duration;

/// 传输层返回的响应
#[derive(Debug, Clone)]
pub struct Response {
    pub status: Status,
    pub content_type: String,
    pub body: String,
    pub duration: Duration,
}

impl Response {
    pub fn new(
        status: u16,
        content_type: impl Into<String>,
        body: String,
        duration: Duration,
    ) -> Result<Self> {
        Ok(Self {
            status: Status::new(status)?,
            content_type: content_type.into(),
            body,
            duration,
        })
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn is_json(&self) -> bool {
        self.content_type.contains("application/json")
    }

    /// 用于展示的响应体：JSON 会被格式化，其余原样返回
    pub fn display_body(&self) -> String {
        if !self.is_json() {
            return self.body.clone();
        }
        serde_json::from_str::<serde_json::Value>(&self.body)
            .and_then(|value| serde_json::to_string_pretty(&value))
            .unwrap_or_else(|_| self.body.clone())
    }
}
