use crate::Result;
use crate::codec::RequestCodec;
use crate::error::RestpadError;
use crate::history::{HistoryEntry, HistoryLog, RequestSnapshot};
use crate::http::header::{Header, HeaderList};
use crate::http::request::{RequestDraft, ResolvedRequest};
use crate::http::types::validate_url;
use crate::http::{Client, Response};
use crate::variable::{Substitution, VariableResolver, VariableStore, collect_missing};
use reqwest::header::{HeaderName, HeaderValue};
use std::collections::HashMap;
use tracing::{info, warn};

/// 提交成功后的结果
#[derive(Debug, Clone)]
pub struct Submission {
    pub request: ResolvedRequest,

    /// 可重新打开该请求的路径
    pub path: String,

    pub entry: HistoryEntry,
}

/// 请求提交流程：变量替换 → URL 校验 → 编码路径 → 写入历史 → 发送
///
/// 变量库和历史记录由调用方创建后以引用传入。
pub struct Orchestrator<'a> {
    variables: &'a VariableStore,
    history: &'a HistoryLog,
    defaults: Option<&'a HashMap<String, String>>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(variables: &'a VariableStore, history: &'a HistoryLog) -> Self {
        Self {
            variables,
            history,
            defaults: None,
        }
    }

    /// 变量库中找不到时使用的默认值（来自配置文件）
    pub fn with_defaults(mut self, defaults: &'a HashMap<String, String>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    fn substitute(&self, text: &str) -> Substitution {
        VariableResolver::substitute(text, |name| {
            self.variables
                .get(name)
                .map(str::to_string)
                .or_else(|| self.defaults.and_then(|d| d.get(name).cloned()))
        })
    }

    /// 替换草稿中的变量并校验 URL，不产生任何副作用
    pub fn resolve(&self, draft: &RequestDraft) -> Result<ResolvedRequest> {
        let url = self.substitute(&draft.url);

        let body = draft
            .method
            .allows_body()
            .then(|| self.substitute(&draft.body));

        let headers: Vec<(Header, Substitution)> = draft
            .headers
            .rows()
            .iter()
            .filter(|h| h.is_active())
            .map(|h| (h.clone(), self.substitute(&h.value)))
            .collect();

        let missing = collect_missing(
            std::iter::once(&url)
                .chain(body.as_ref())
                .chain(headers.iter().map(|(_, s)| s)),
        );
        if !missing.is_empty() {
            return Err(RestpadError::MissingVariables(missing));
        }

        validate_url(&url.result)?;
        for (header, value) in &headers {
            validate_header(&header.key, &value.result)?;
        }

        Ok(ResolvedRequest {
            method: draft.method,
            url: url.result.trim().to_string(),
            body: body.map(|b| b.result),
            headers: headers
                .into_iter()
                .map(|(header, value)| Header {
                    value: value.result,
                    ..header
                })
                .collect(),
        })
    }

    /// 解析草稿，生成路径并记录历史
    ///
    /// 缺少变量或 URL 无效时直接返回错误，不写入历史。
    pub fn prepare(&self, draft: &RequestDraft) -> Result<Submission> {
        let request = self.resolve(draft)?;
        let path = RequestCodec::encode(&request);
        let entry = self.history.append(RequestSnapshot::from(&request));

        Ok(Submission {
            request,
            path,
            entry,
        })
    }

    /// 准备并发送请求
    pub async fn submit(
        &self,
        draft: &RequestDraft,
        client: &Client,
    ) -> Result<(Submission, Response)> {
        let submission = self.prepare(draft)?;
        info!(
            method = %submission.request.method,
            url = %submission.request.url,
            "Submitting request"
        );

        let response = client.execute(&submission.request).await?;
        Ok((submission, response))
    }

    /// 从路径恢复草稿，路径损坏时回退到默认草稿
    pub fn open(path: &str) -> RequestDraft {
        match RequestCodec::decode(path) {
            Ok(request) => RequestDraft {
                method: request.method,
                url: request.url,
                body: request
                    .body
                    .unwrap_or_else(|| RequestDraft::DEFAULT_BODY.to_string()),
                headers: HeaderList::from_headers(request.headers),
            },
            Err(e) => {
                warn!("Could not decode request path, opening an empty request: {}", e);
                RequestDraft::default()
            }
        }
    }
}

/// 请求头名称和值必须能被 HTTP 传输接受
fn validate_header(key: &str, value: &str) -> Result<()> {
    HeaderName::from_bytes(key.as_bytes())
        .map_err(|_| RestpadError::MalformedInput(format!("Invalid header name: {:?}", key)))?;
    HeaderValue::from_str(value).map_err(|_| {
        RestpadError::MalformedInput(format!("Invalid value for header {}", key))
    })?;
    Ok(())
}
