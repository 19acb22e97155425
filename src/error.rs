use anyhow::anyhow;
use reqwest::StatusCode;

/// Builds the error for a non-2xx reply.
///
/// The message always starts with `HTTP <code>: <body>` so callers can match on the
/// status; a remediation hint follows for the statuses RePORTER commonly returns.
pub(crate) fn format_http_error(status: StatusCode, url: &str, body: &str) -> anyhow::Error {
    let code = status.as_u16();
    let body = body.trim();

    let hint = match status {
        StatusCode::TOO_MANY_REQUESTS => Some(
            "RePORTER throttles clients to about one request per second; wait and re-run.",
        ),
        StatusCode::NOT_FOUND => Some(
            "The endpoint was not found; check NIH_REPORTER_URL or the `url:` entry in .reporterrc.",
        ),
        _ => None,
    };

    match hint {
        Some(hint) => anyhow!("HTTP {}: {}\n{}\nrequest: {}", code, body, hint, url),
        None => anyhow!("HTTP {}: {}", code, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_carries_status_and_body() {
        let err = format_http_error(StatusCode::BAD_REQUEST, "http://x", "bad payload");
        assert_eq!(err.to_string(), "HTTP 400: bad payload");
    }

    #[test]
    fn throttling_adds_hint() {
        let err = format_http_error(StatusCode::TOO_MANY_REQUESTS, "http://x", "");
        let msg = err.to_string();
        assert!(msg.starts_with("HTTP 429: "));
        assert!(msg.contains("one request per second"));
        assert!(msg.contains("request: http://x"));
    }
}
