use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestpadError {
    #[error("缺少变量: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("无效的输入: {0}")]
    MalformedInput(String),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    #[error("存储错误: {0}")]
    Storage(String),

    #[error("网络错误: {0}")]
    Network(String),

    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL 解析错误: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("配置文件错误: {0}")]
    ConfigError(#[from] toml::de::Error),
}

/// 错误类别
///
/// 调用方只根据类别分支处理，不检查错误消息文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingVariable,
    MalformedInput,
    InvalidUrl,
    StorageFailure,
    NetworkFailure,
}

impl RestpadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RestpadError::MissingVariables(_) => ErrorKind::MissingVariable,
            RestpadError::MalformedInput(_) | RestpadError::ConfigError(_) => {
                ErrorKind::MalformedInput
            }
            RestpadError::InvalidUrl(_) | RestpadError::UrlParseError(_) => ErrorKind::InvalidUrl,
            RestpadError::Storage(_) | RestpadError::IoError(_) | RestpadError::JsonError(_) => {
                ErrorKind::StorageFailure
            }
            RestpadError::Network(_) | RestpadError::HttpError(_) => ErrorKind::NetworkFailure,
        }
    }

    /// 缺少变量时返回变量名列表
    pub fn missing_variables(&self) -> Option<&[String]> {
        match self {
            RestpadError::MissingVariables(names) => Some(names),
            _ => None,
        }
    }
}

/// Result type for restpad crate
pub type Result<T> = std::result::Result<T, RestpadError>;
