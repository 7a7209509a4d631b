use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Reason phrase used for codes missing from the table.
pub const UNKNOWN_REASON: &str = "UNKNOWN";

static STATUS_REASONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("200", "OK"),
        ("400", "Bad Request"),
        ("401", "Unauthorized"),
        ("403", "Forbidden"),
        ("404", "Not Found"),
        ("418", "I'm a teapot"),
        ("500", "Internal Server Error"),
    ]
    .into_iter()
    .collect()
});

/// Looks up the reason phrase for a status code token such as `"404"`.
///
/// # Example
///
/// ```
/// # use lighthouse::http::status::reason_phrase;
/// assert_eq!(reason_phrase("404"), "Not Found");
/// assert_eq!(reason_phrase("299"), "UNKNOWN");
/// ```
pub fn reason_phrase(code: &str) -> &'static str {
    STATUS_REASONS.get(code).copied().unwrap_or(UNKNOWN_REASON)
}

/// Status codes the server itself emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 418 I'm a teapot
    ImATeapot,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// The wire token, e.g. `"200"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Ok => "200",
            StatusCode::BadRequest => "400",
            StatusCode::Unauthorized => "401",
            StatusCode::Forbidden => "403",
            StatusCode::NotFound => "404",
            StatusCode::ImATeapot => "418",
            StatusCode::InternalServerError => "500",
        }
    }

    pub fn reason_phrase(&self) -> &'static str {
        reason_phrase(self.as_str())
    }
}
