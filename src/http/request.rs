use crate::http::header::{Header, HeaderList, active_pairs};
use crate::http::types::Method;

/// 编辑器中的请求草稿，可能仍包含 `{{name}}` 占位符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDraft {
    pub method: Method,
    pub url: String,
    pub body: String,
    pub headers: HeaderList,
}

impl Default for RequestDraft {
    fn default() -> Self {
        Self {
            method: Method::Get,
            url: String::new(),
            body: Self::DEFAULT_BODY.to_string(),
            headers: HeaderList::new(),
        }
    }
}

impl RequestDraft {
    /// 新建草稿和解码失败时使用的默认请求体
    pub const DEFAULT_BODY: &'static str = "{}";

    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push(key, value);
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_owned();
        self
    }
}

/// 所有占位符都已替换的请求，可直接发送或持久化
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub method: Method,
    pub url: String,
    /// 只有 `method.allows_body()` 时才有意义
    pub body: Option<String>,
    pub headers: Vec<Header>,
}

impl ResolvedRequest {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = Some(body.to_owned());
        self
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push(Header::enabled(key, value));
        self
    }

    /// 会被发送的请求体：GET/HEAD 永远没有
    pub fn effective_body(&self) -> Option<&str> {
        if self.method.allows_body() {
            self.body.as_deref()
        } else {
            None
        }
    }

    /// 启用的请求头，按 key/value 排序，便于做集合比较
    pub fn sorted_active_headers(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = active_pairs(&self.headers)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        pairs.sort();
        pairs
    }

    /// 忽略行 ID、禁用行和请求头顺序后是否等价
    pub fn equivalent(&self, other: &ResolvedRequest) -> bool {
        self.method == other.method
            && self.url == other.url
            && self.effective_body() == other.effective_body()
            && self.sorted_active_headers() == other.sorted_active_headers()
    }
}
