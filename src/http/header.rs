use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// 请求头编辑行
///
/// `id` 只用于编辑器中的行标识，不会被发送或序列化进请求路径。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub id: u64,
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl Header {
    /// 空白且未启用的行
    pub fn blank() -> Self {
        Self {
            id: next_header_id(),
            key: String::new(),
            value: String::new(),
            enabled: false,
        }
    }

    /// 已启用的行（解码路径、命令行参数时使用）
    pub fn enabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: next_header_id(),
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// 是否会出现在发出的请求中
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

/// 生成行 ID：以毫秒时间戳为基准，同一毫秒内单调递增
pub fn next_header_id() -> u64 {
    static LAST_ID: AtomicU64 = AtomicU64::new(0);

    let now = Utc::now().timestamp_millis().max(0) as u64;
    let previous = LAST_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
            Some(now.max(last + 1))
        })
        .unwrap_or(now);
    now.max(previous + 1)
}

/// 过滤出启用且 key 非空的请求头，保持原有顺序
pub fn active_pairs(headers: &[Header]) -> impl Iterator<Item = (&str, &str)> {
    headers
        .iter()
        .filter(|h| h.is_active())
        .map(|h| (h.key.as_str(), h.value.as_str()))
}

/// 启用的请求头转换为 key -> value 映射，重复的 key 以后出现的为准
pub fn active_map(headers: &[Header]) -> BTreeMap<String, String> {
    active_pairs(headers)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// 请求头编辑器状态
///
/// 始终保留一行空白行：最后一行的 key 被填入非空内容时，自动追加新的空白行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderList {
    rows: Vec<Header>,
}

impl Default for HeaderList {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderList {
    pub fn new() -> Self {
        Self {
            rows: vec![Header::blank()],
        }
    }

    /// 从已有的行构建，必要时补一行空白行
    pub fn from_headers(headers: Vec<Header>) -> Self {
        let mut list = Self { rows: headers };
        list.ensure_blank_tail();
        list
    }

    pub fn rows(&self) -> &[Header] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 在末尾空白行填入一个启用的请求头
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.ensure_blank_tail();
        if let Some(last) = self.rows.last() {
            let id = last.id;
            self.set_value(id, value);
            self.set_enabled(id, true);
            self.set_key(id, key);
        }
    }

    /// 修改行的 key，返回该行是否存在
    pub fn set_key(&mut self, id: u64, key: impl Into<String>) -> bool {
        let key = key.into();
        let is_last = self.rows.last().is_some_and(|h| h.id == id);
        let grows = is_last && !key.trim().is_empty();

        let Some(row) = self.rows.iter_mut().find(|h| h.id == id) else {
            return false;
        };
        row.key = key;

        if grows {
            self.rows.push(Header::blank());
        }
        true
    }

    pub fn set_value(&mut self, id: u64, value: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|h| h.id == id) {
            Some(row) => {
                row.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn toggle(&mut self, id: u64) -> bool {
        match self.rows.iter_mut().find(|h| h.id == id) {
            Some(row) => {
                row.enabled = !row.enabled;
                true
            }
            None => false,
        }
    }

    pub fn set_enabled(&mut self, id: u64, enabled: bool) -> bool {
        match self.rows.iter_mut().find(|h| h.id == id) {
            Some(row) => {
                row.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// 删除一行；只剩一行时不删除，删除后末尾仍保留空白行
    pub fn remove(&mut self, id: u64) -> bool {
        if self.rows.len() <= 1 {
            return false;
        }
        let before = self.rows.len();
        self.rows.retain(|h| h.id != id);
        let removed = self.rows.len() != before;
        self.ensure_blank_tail();
        removed
    }

    pub fn active_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        active_pairs(&self.rows)
    }

    fn ensure_blank_tail(&mut self) {
        let needs_blank = self
            .rows
            .last()
            .is_none_or(|h| !h.key.trim().is_empty());
        if needs_blank {
            self.rows.push(Header::blank());
        }
    }
}
