use restpad::{ErrorKind, RestpadError, Result};

#[test]
fn test_missing_variables_message() {
    let err = RestpadError::MissingVariables(vec!["host".to_string(), "token".to_string()]);
    assert_eq!(err.to_string(), "缺少变量: host, token");
    assert_eq!(err.kind(), ErrorKind::MissingVariable);
}

#[test]
fn test_invalid_url() {
    let err = RestpadError::InvalidUrl("not a url".to_string());
    assert_eq!(err.to_string(), "无效的 URL: not a url");
    assert_eq!(err.kind(), ErrorKind::InvalidUrl);
}

#[test]
fn test_kinds_of_wrapped_errors() {
    let io = RestpadError::from(std::io::Error::other("disk gone"));
    assert_eq!(io.kind(), ErrorKind::StorageFailure);

    let json: RestpadError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
    assert_eq!(json.kind(), ErrorKind::StorageFailure);

    let url: RestpadError = url::Url::parse("::").unwrap_err().into();
    assert_eq!(url.kind(), ErrorKind::InvalidUrl);

    assert_eq!(
        RestpadError::Network("refused".to_string()).kind(),
        ErrorKind::NetworkFailure
    );
    assert_eq!(
        RestpadError::MalformedInput("bad".to_string()).kind(),
        ErrorKind::MalformedInput
    );
}

#[test]
fn test_result_type() {
    fn returns_error() -> Result<()> {
        Err(RestpadError::MalformedInput("test".to_string()))
    }

    let result = returns_error();
    assert!(result.is_err());
    match result {
        Err(RestpadError::MalformedInput(msg)) => assert_eq!(msg, "test"),
        _ => panic!("Expected MalformedInput"),
    }
}
