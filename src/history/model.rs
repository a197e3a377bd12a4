use chrono::{DateTime, Local, TimeZone, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::codec::RequestCodec;
use crate::http::header::{Header, active_map};
use crate::http::request::ResolvedRequest;
use crate::http::types::Method;

/// 历史记录条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 毫秒时间戳加随机后缀，同一毫秒内也不会重复
    pub id: String,

    pub method: Method,

    /// 替换变量之后的 URL
    pub url: String,

    /// 只包含启用且 key 非空的请求头
    pub headers: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// 请求时间（Unix 毫秒）
    pub timestamp: i64,
}

/// 写入历史前的请求快照
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    pub method: Method,
    pub url: String,
    pub headers: Vec<Header>,
    pub body: Option<String>,
}

impl From<&ResolvedRequest> for RequestSnapshot {
    fn from(request: &ResolvedRequest) -> Self {
        Self {
            method: request.method,
            url: request.url.clone(),
            headers: request.headers.clone(),
            body: request.effective_body().map(str::to_string),
        }
    }
}

impl HistoryEntry {
    /// 由快照生成条目，分配 ID 和当前时间
    pub fn from_snapshot(snapshot: RequestSnapshot) -> Self {
        let timestamp = Utc::now().timestamp_millis();

        Self {
            id: generate_id(timestamp),
            method: snapshot.method,
            url: snapshot.url,
            headers: active_map(&snapshot.headers),
            body: snapshot.body.filter(|b| !b.is_empty()),
            timestamp,
        }
    }

    pub fn local_time(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.timestamp).single()
    }

    /// 还原为已解析的请求
    pub fn to_request(&self) -> ResolvedRequest {
        ResolvedRequest {
            method: self.method,
            url: self.url.clone(),
            body: self.body.clone(),
            headers: self
                .headers
                .iter()
                .map(|(k, v)| Header::enabled(k.as_str(), v.as_str()))
                .collect(),
        }
    }

    /// 重新打开该请求用的路径
    pub fn client_path(&self) -> String {
        RequestCodec::encode(&self.to_request())
    }
}

fn generate_id(timestamp: i64) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}-{}", timestamp, suffix)
}
