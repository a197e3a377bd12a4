use restpad::RequestCodec;
use restpad::http::{Header, Method, ResolvedRequest};

/// 所有请求方法、带重复 key 的请求头和特殊字符都能完整还原
#[test]
fn test_round_trip_matrix() {
    let urls = [
        "https://api.example.com",
        "http://localhost:8080/v1/items?page=2&sort=-created",
        "https://example.com/path with spaces/#frag",
    ];

    for method in Method::ALL {
        for url in urls {
            let mut request = ResolvedRequest::new(method, url)
                .with_header("Accept", "application/json")
                .with_header("X-Tag", "a")
                .with_header("X-Tag", "b & c = d");
            if method.allows_body() {
                request = request.with_body("{\"q\": \"?&=/+\"}");
            }

            let path = RequestCodec::encode(&request);
            let decoded = RequestCodec::decode(&path).unwrap();

            assert_eq!(decoded.method, method);
            assert_eq!(decoded.url, url);
            assert_eq!(decoded.effective_body(), request.effective_body());
            assert_eq!(
                decoded.sorted_active_headers(),
                request.sorted_active_headers()
            );
        }
    }
}

#[test]
fn test_get_path_shape() {
    let request = ResolvedRequest::new(Method::Get, "https://api.example.com");
    let path = RequestCodec::encode(&request);

    let (segments, query) = match path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (path.as_str(), None),
    };
    let segments: Vec<&str> = segments.trim_start_matches('/').split('/').collect();

    assert_eq!(segments, vec!["GET", "aHR0cHM6Ly9hcGkuZXhhbXBsZS5jb20"]);
    assert!(query.is_none_or(str::is_empty));
}

#[test]
fn test_disabled_and_empty_key_headers_not_serialized() {
    let mut request = ResolvedRequest::new(Method::Post, "https://api.example.com").with_body("{}");
    request.headers.push(Header {
        enabled: false,
        ..Header::enabled("X-Disabled", "secret")
    });
    request.headers.push(Header::enabled("", "dangling"));
    request.headers.push(Header::enabled("X-Kept", "yes"));

    let path = RequestCodec::encode(&request);
    let query = path.split_once('?').map(|(_, q)| q).unwrap();

    assert_eq!(query, "X-Kept=yes");
    let decoded = RequestCodec::decode(&path).unwrap();
    assert_eq!(decoded.headers.len(), 1);
}

#[test]
fn test_non_ascii_url_and_body_round_trip() {
    let url = "https://example.com/search?q=Zürich+–+東京&emoji=🚀";
    let body = r#"{"greeting":"cześć","note":"日本語テキスト"}"#;
    let request = ResolvedRequest::new(Method::Put, url).with_body(body);

    let decoded = RequestCodec::decode(&RequestCodec::encode(&request)).unwrap();
    assert_eq!(decoded.url, url);
    assert_eq!(decoded.body.as_deref(), Some(body));
}

#[test]
fn test_encoding_is_deterministic() {
    let request = ResolvedRequest::new(Method::Delete, "https://example.com/items/1")
        .with_body("")
        .with_header("If-Match", "\"v1\"");

    assert_eq!(RequestCodec::encode(&request), RequestCodec::encode(&request.clone()));
}

#[test]
fn test_decode_standard_padded_base64() {
    // 标准字母表（`+`）加 `=` 填充的路径段也能解码
    let decoded = RequestCodec::decode("/GET/aHR0cHM6Ly9leGFtcGxlLmNvbS9+YQ==").unwrap();
    assert_eq!(decoded.url, "https://example.com/~a");
}

#[test]
fn test_malformed_paths_are_errors_not_panics() {
    let inputs = [
        "",
        "/",
        "/GET",
        "/FETCH/aGk",
        "/GET/***",
        "/POST/aGk/***",
        "/POST/aGk/aGk/aGk",
        "/GET/__8", // 0xff 0xff 不是合法 UTF-8
    ];

    for input in inputs {
        let err = RequestCodec::decode(input).unwrap_err();
        assert_eq!(err.kind(), restpad::ErrorKind::MalformedInput, "input: {}", input);
    }
}
