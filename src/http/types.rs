use std::fmt;
use std::str::FromStr;

use crate::{RestpadError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl FromStr for Method {
    type Err = RestpadError;

    /// 只接受大写字面量，路径中的方法段大小写必须原样保留
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            _ => Err(RestpadError::MalformedInput(format!(
                "Invalid HTTP method: {}",
                s
            ))),
        }
    }
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Options,
    ];

    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }

    /// GET 和 HEAD 不携带请求体
    pub fn allows_body(&self) -> bool {
        !matches!(self, Method::Get | Method::Head)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 校验替换后的 URL：必须是带 host 的 http/https 绝对地址
pub fn validate_url(raw: &str) -> Result<url::Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RestpadError::InvalidUrl("URL is required".to_string()));
    }

    let url = url::Url::parse(trimmed)
        .map_err(|e| RestpadError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(RestpadError::InvalidUrl(format!(
                "Unsupported scheme: {}",
                other
            )));
        }
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(RestpadError::InvalidUrl(format!("Missing host: {}", trimmed)));
    }

    Ok(url)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(u16);

impl Status {
    pub fn new(code: u16) -> Result<Self> {
        if (100..600).contains(&code) {
            Ok(Self(code))
        } else {
            Err(RestpadError::Network(format!(
                "Invalid HTTP status code: {}",
                code
            )))
        }
    }

    pub fn code(&self) -> u16 {
        self.0
    }

    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.0)
    }

    pub fn is_redirect(&self) -> bool {
        (300..=399).contains(&self.0)
    }

    pub fn is_client_error(&self) -> bool {
        (400..=499).contains(&self.0)
    }

    pub fn is_server_error(&self) -> bool {
        (500..=599).contains(&self.0)
    }

    pub fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse_exact_literals() {
        for method in Method::ALL {
            assert_eq!(Method::parse(method.as_str()).unwrap(), method);
        }
    }

    #[test]
    fn test_method_parse_rejects_unknown_and_lowercase() {
        assert!(Method::parse("TRACE").is_err());
        assert!(Method::parse("get").is_err());
        assert!(Method::parse("").is_err());
    }

    #[test]
    fn test_allows_body() {
        assert!(!Method::Get.allows_body());
        assert!(!Method::Head.allows_body());
        assert!(Method::Post.allows_body());
        assert!(Method::Delete.allows_body());
        assert!(Method::Options.allows_body());
    }

    #[test]
    fn test_method_serde_uses_literals() {
        let json = serde_json::to_string(&Method::Patch).unwrap();
        assert_eq!(json, "\"PATCH\"");
        let method: Method = serde_json::from_str("\"OPTIONS\"").unwrap();
        assert_eq!(method, Method::Options);
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://api.example.com/v1?x=1").is_ok());
        assert!(validate_url("  http://localhost:8080  ").is_ok());

        assert!(matches!(
            validate_url(""),
            Err(RestpadError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("not a url"),
            Err(RestpadError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("ftp://example.com"),
            Err(RestpadError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_url("{{base}}/users"),
            Err(RestpadError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_status_classes() {
        assert!(Status::new(204).unwrap().is_success());
        assert!(Status::new(302).unwrap().is_redirect());
        assert!(Status::new(404).unwrap().is_client_error());
        assert!(Status::new(503).unwrap().is_server_error());
        assert!(Status::new(99).is_err());
        assert_eq!(Status::new(404).unwrap().reason_phrase(), "Not Found");
    }
}
