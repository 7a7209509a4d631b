use crate::http::request::{Method, Request};
use std::collections::HashMap;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Longest request or header line accepted, terminator included.
pub const MAX_LINE_BYTES: usize = 8 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("malformed request line")]
    MalformedRequestLine,
    #[error("malformed header line")]
    MalformedHeader,
    #[error("POST request without Content-Length")]
    MissingContentLength,
    #[error("invalid Content-Length {0:?}")]
    InvalidContentLength(String),
    #[error("body truncated: got {received} of {expected} bytes")]
    TruncatedBody { expected: usize, received: usize },
    #[error("line exceeds {MAX_LINE_BYTES} bytes")]
    LineTooLong,
    #[error("connection closed before end of headers")]
    ConnectionClosed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads one request from `reader`.
///
/// Lines are consumed until the bare `\r\n` separator. The first line is the
/// request line, the rest are headers. A body is then read only when a
/// Content-Length header is present; a POST without one is rejected.
pub async fn parse_request<R>(reader: &mut R) -> Result<Request, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = Vec::with_capacity(256);
    let mut request_line = None;
    let mut headers = HashMap::new();

    loop {
        line.clear();
        let n = (&mut *reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', &mut line)
            .await?;
        if n == 0 {
            return Err(ParseError::ConnectionClosed);
        }
        if n == MAX_LINE_BYTES && !line.ends_with(b"\n") {
            return Err(ParseError::LineTooLong);
        }

        if line == b"\r\n" {
            break;
        }

        // Lines are never lossily decoded: the path must reach the resolver as sent.
        let text = std::str::from_utf8(strip_line_ending(&line));
        if request_line.is_none() {
            let text = text.map_err(|_| ParseError::MalformedRequestLine)?;
            request_line = Some(parse_request_line(text)?);
        } else {
            // A repeated header overwrites the earlier value.
            let text = text.map_err(|_| ParseError::MalformedHeader)?;
            let (key, value) = parse_header_line(text)?;
            headers.insert(key, value);
        }
    }

    let (method, path, version) = request_line.ok_or(ParseError::MalformedRequestLine)?;

    let body = match headers.get("content-length") {
        Some(raw) => {
            let expected = parse_content_length(raw)?;
            read_body(reader, expected).await?
        }
        None if method == Method::POST => return Err(ParseError::MissingContentLength),
        None => Vec::new(),
    };

    Ok(Request {
        method,
        path,
        version,
        headers,
        body,
    })
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn parse_request_line(line: &str) -> Result<(Method, String, String), ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    match parts.as_slice() {
        [method, path, version] => Ok((
            Method::from_token(method),
            path.to_string(),
            version.to_string(),
        )),
        _ => Err(ParseError::MalformedRequestLine),
    }
}

fn parse_header_line(line: &str) -> Result<(String, String), ParseError> {
    let (key, value) = line.split_once(':').ok_or(ParseError::MalformedHeader)?;

    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::MalformedHeader);
    }

    Ok((key.to_ascii_lowercase(), value.trim().to_string()))
}

/// Content-Length must be plain ASCII digits; signs and blanks are rejected.
pub fn parse_content_length(raw: &str) -> Result<usize, ParseError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidContentLength(raw.to_string()));
    }

    raw.parse::<usize>()
        .map_err(|_| ParseError::InvalidContentLength(raw.to_string()))
}

async fn read_body<R>(reader: &mut R, expected: usize) -> Result<Vec<u8>, ParseError>
where
    R: AsyncBufRead + Unpin,
{
    if expected == 0 {
        return Ok(Vec::new());
    }

    // Grow as bytes arrive rather than trusting the declared length.
    let mut body = Vec::new();
    reader.take(expected as u64).read_to_end(&mut body).await?;

    if body.len() < expected {
        return Err(ParseError::TruncatedBody {
            expected,
            received: body.len(),
        });
    }

    Ok(body)
}
