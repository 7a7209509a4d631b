use lighthouse::http::parser::{parse_content_length, parse_request, ParseError, MAX_LINE_BYTES};
use lighthouse::http::request::{Method, Request};

async fn parse(raw: &[u8]) -> Result<Request, ParseError> {
    let mut reader = raw;
    parse_request(&mut reader).await
}

#[tokio::test]
async fn test_parse_simple_get_request() {
    let parsed = parse(b"GET / HTTP/1.0\r\nHost: example.com\r\n\r\n").await.unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.0");
    assert_eq!(parsed.headers.get("host").unwrap(), "example.com");
    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_parse_request_line_recovered_exactly() {
    let lines = [
        ("GET", "/index.html", "HTTP/1.0"),
        ("HEAD", "/images/cat.jpg", "HTTP/1.0"),
        ("PUT", "/a/b/c?x=1", "HTTP/1.1"),
        ("BREW", "/pot", "HTCPCP/1.0"),
        ("get", "*", "HTTP/0.9"),
    ];

    for (method, path, version) in lines {
        let raw = format!("{method} {path} {version}\r\n\r\n");
        let parsed = parse(raw.as_bytes()).await.unwrap();
        assert_eq!(parsed.method.as_str(), method);
        assert_eq!(parsed.path, path);
        assert_eq!(parsed.version, version);
    }
}

#[tokio::test]
async fn test_parse_request_line_extra_whitespace() {
    let parsed = parse(b"GET   /x   HTTP/1.0\r\n\r\n").await.unwrap();
    assert_eq!(parsed.path, "/x");
}

#[tokio::test]
async fn test_parse_request_line_too_few_tokens() {
    let result = parse(b"GET /\r\n\r\n").await;
    assert!(matches!(result, Err(ParseError::MalformedRequestLine)));
}

#[tokio::test]
async fn test_parse_request_line_too_many_tokens() {
    let result = parse(b"GET / HTTP/1.0 extra\r\n\r\n").await;
    assert!(matches!(result, Err(ParseError::MalformedRequestLine)));
}

#[tokio::test]
async fn test_parse_empty_request() {
    let result = parse(b"\r\n").await;
    assert!(matches!(result, Err(ParseError::MalformedRequestLine)));
}

#[tokio::test]
async fn test_parse_headers_lowercased_and_trimmed() {
    let parsed = parse(b"GET / HTTP/1.0\r\nUser-Agent:   probe/1.0\r\nX-Key: a:b:c\r\n\r\n")
        .await
        .unwrap();

    assert_eq!(parsed.headers.get("user-agent").unwrap(), "probe/1.0");
    // Split only on the first colon
    assert_eq!(parsed.headers.get("x-key").unwrap(), "a:b:c");
    assert_eq!(parsed.header("USER-AGENT"), Some("probe/1.0"));
}

#[tokio::test]
async fn test_parse_repeated_header_overwrites() {
    let parsed = parse(b"GET / HTTP/1.0\r\nAccept: text/html\r\naccept: */*\r\n\r\n")
        .await
        .unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.headers.get("accept").unwrap(), "*/*");
}

#[tokio::test]
async fn test_parse_malformed_header() {
    let result = parse(b"GET / HTTP/1.0\r\nBrokenHeader\r\n\r\n").await;
    assert!(matches!(result, Err(ParseError::MalformedHeader)));
}

#[tokio::test]
async fn test_parse_bare_newline_is_not_the_separator() {
    // "\n" alone is not the blank-line sentinel, so it is an empty header line
    let result = parse(b"GET / HTTP/1.0\r\n\n\r\n").await;
    assert!(matches!(result, Err(ParseError::MalformedHeader)));
}

#[tokio::test]
async fn test_parse_post_request_with_body() {
    let parsed = parse(b"POST /api HTTP/1.0\r\nContent-Length: 5\r\n\r\nhello").await.unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.body, b"hello".to_vec());
    assert_eq!(parsed.header("Content-Length"), Some("5"));
}

#[tokio::test]
async fn test_parse_body_reads_exactly_declared_length() {
    let raw = b"PUT /x HTTP/1.0\r\nContent-Length: 3\r\n\r\nabcdef";
    let mut reader = &raw[..];

    let parsed = parse_request(&mut reader).await.unwrap();

    assert_eq!(parsed.body, b"abc".to_vec());
    assert_eq!(reader, b"def");
}

#[tokio::test]
async fn test_parse_post_without_content_length() {
    let result = parse(b"POST /x HTTP/1.0\r\n\r\n").await;
    assert!(matches!(result, Err(ParseError::MissingContentLength)));
}

#[tokio::test]
async fn test_parse_put_without_content_length_is_bodyless() {
    let parsed = parse(b"PUT /x HTTP/1.0\r\n\r\nignored").await.unwrap();
    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_parse_invalid_content_length() {
    for value in ["abc", "-5", "+5", "1.5", "", "0x10", "1 2"] {
        let raw = format!("POST /x HTTP/1.0\r\nContent-Length: {value}\r\n\r\n");
        let result = parse(raw.as_bytes()).await;
        assert!(
            matches!(result, Err(ParseError::InvalidContentLength(_))),
            "accepted Content-Length {value:?}"
        );
    }
}

#[tokio::test]
async fn test_parse_zero_content_length() {
    let parsed = parse(b"POST /api HTTP/1.0\r\nContent-Length: 0\r\n\r\n").await.unwrap();
    assert!(parsed.body.is_empty());
}

#[tokio::test]
async fn test_parse_truncated_body() {
    let result = parse(b"POST /api HTTP/1.0\r\nContent-Length: 10\r\n\r\nhello").await;
    assert!(matches!(
        result,
        Err(ParseError::TruncatedBody { expected: 10, received: 5 })
    ));
}

#[tokio::test]
async fn test_parse_binary_body() {
    let parsed = parse(b"POST /upload HTTP/1.0\r\nContent-Length: 4\r\n\r\n\x00\xff\x02\x03")
        .await
        .unwrap();
    assert_eq!(parsed.body, vec![0, 0xff, 2, 3]);
}

#[tokio::test]
async fn test_parse_connection_closed_before_blank_line() {
    let result = parse(b"GET / HTTP/1.0\r\nHost: example.com\r\n").await;
    assert!(matches!(result, Err(ParseError::ConnectionClosed)));

    let result = parse(b"").await;
    assert!(matches!(result, Err(ParseError::ConnectionClosed)));
}

#[test]
fn test_content_length_digits_only() {
    assert_eq!(parse_content_length("0").unwrap(), 0);
    assert_eq!(parse_content_length("007").unwrap(), 7);
    assert_eq!(parse_content_length("1024").unwrap(), 1024);
    assert!(matches!(
        parse_content_length("+5"),
        Err(ParseError::InvalidContentLength(v)) if v == "+5"
    ));
    assert!(parse_content_length("99999999999999999999999999").is_err());
}

#[tokio::test]
async fn test_parse_non_utf8_request_line_rejected() {
    let result = parse(b"GET /a\xffb.html HTTP/1.0\r\n\r\n").await;
    assert!(matches!(result, Err(ParseError::MalformedRequestLine)));
}

#[tokio::test]
async fn test_parse_non_utf8_header_rejected() {
    let result = parse(b"GET / HTTP/1.0\r\nX-Name: caf\xe9\r\n\r\n").await;
    assert!(matches!(result, Err(ParseError::MalformedHeader)));
}

#[tokio::test]
async fn test_parse_utf8_path_kept_verbatim() {
    let parsed = parse("GET /caf\u{e9}.html HTTP/1.0\r\n\r\n".as_bytes()).await.unwrap();
    assert_eq!(parsed.path, "/caf\u{e9}.html");
}

#[tokio::test]
async fn test_parse_overlong_line_rejected() {
    let mut raw = b"GET /".to_vec();
    raw.extend(std::iter::repeat_n(b'a', MAX_LINE_BYTES));
    raw.extend_from_slice(b" HTTP/1.0\r\n\r\n");

    let result = parse(&raw).await;
    assert!(matches!(result, Err(ParseError::LineTooLong)));
}

#[tokio::test]
async fn test_parse_overlong_header_rejected() {
    let mut raw = b"GET / HTTP/1.0\r\nX-Big: ".to_vec();
    raw.extend(std::iter::repeat_n(b'b', MAX_LINE_BYTES));
    raw.extend_from_slice(b"\r\n\r\n");

    let result = parse(&raw).await;
    assert!(matches!(result, Err(ParseError::LineTooLong)));
}

#[tokio::test]
async fn test_parse_line_at_limit_accepted() {
    let prefix = b"GET /";
    let suffix = b" HTTP/1.0\r\n";
    let mut raw = prefix.to_vec();
    raw.extend(std::iter::repeat_n(b'a', MAX_LINE_BYTES - prefix.len() - suffix.len()));
    raw.extend_from_slice(suffix);
    raw.extend_from_slice(b"\r\n");

    let parsed = parse(&raw).await.unwrap();
    assert_eq!(parsed.path.len(), MAX_LINE_BYTES - prefix.len() - suffix.len() + 1);
}
