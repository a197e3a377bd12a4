use crate::{RestpadError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};

/// UTF-8 文本编码为 URL 安全的 Base64 路径段（无填充）
pub fn encode_segment(text: &str) -> String {
    URL_SAFE_NO_PAD.encode(text.as_bytes())
}

/// 路径段解码为 UTF-8 文本
///
/// 同时接受 URL 安全字母表和标准字母表，末尾的 `=` 填充会被忽略。
pub fn decode_segment(segment: &str) -> Result<String> {
    let trimmed = segment.trim_end_matches('=');

    let bytes = URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|e| RestpadError::MalformedInput(format!("Invalid base64 segment: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| RestpadError::MalformedInput(format!("Segment is not valid UTF-8: {}", e)))
}
