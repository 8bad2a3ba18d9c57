//! HTTP client wrapper for downloading audit files.

use std::io::Read;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::HTTP_TIMEOUT_SECS;
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("audit-harvester/", env!("CARGO_PKG_VERSION"));

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL with retry logic.
///
/// Uses exponential backoff for transient failures (network errors, 5xx responses).
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `max_size` - Largest accepted response body in bytes
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                // Retry on server errors (5xx)
                if status.is_server_error() {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                // Don't retry client errors (4xx) - they won't succeed
                let response = response.error_for_status()?;

                // Reject early when the server announces an oversized body
                if let Some(size) = response.content_length() {
                    if size > max_size {
                        return Err(HarvesterError::ResponseTooLarge {
                            size,
                            limit: max_size,
                        });
                    }
                }

                // Chunked responses carry no length, so the cap is enforced while reading
                let bytes = read_capped(response, max_size)?;
                tracing::debug!(url, size = bytes.len(), "Downloaded response body");
                return Ok(bytes);
            }
            Err(e) => {
                // Retry on connection/timeout errors
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                // Other errors (like invalid URL) - don't retry
                return Err(HarvesterError::Http(e));
            }
        }
    }

    // All retries exhausted
    Err(HarvesterError::RetriesExhausted {
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Read at most `max_size` bytes from `reader`.
///
/// Reads one byte past the limit to tell an exact fit from an overflow, so
/// memory use stays bounded by the cap whatever the server claims.
fn read_capped<R: Read>(reader: R, max_size: u64) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader
        .take(max_size.saturating_add(1))
        .read_to_end(&mut bytes)?;

    let size = bytes.len() as u64;
    if size > max_size {
        return Err(HarvesterError::ResponseTooLarge {
            size,
            limit: max_size,
        });
    }
    Ok(bytes)
}

/// Decode bytes as UTF-8, replacing invalid sequences.
///
/// Logs a warning naming `what` when any replacement happened.
pub fn bytes_to_string(bytes: &[u8], what: &str) -> String {
    match String::from_utf8_lossy(bytes) {
        std::borrow::Cow::Borrowed(text) => text.to_string(),
        std::borrow::Cow::Owned(text) => {
            tracing::warn!(source = what, "Invalid UTF-8 replaced while decoding");
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client();
        assert!(client.is_ok());
    }

    #[test]
    fn test_read_capped_within_limit() {
        let body = b"<custom_item></custom_item>";
        let bytes = read_capped(&body[..], body.len() as u64).unwrap();
        assert_eq!(bytes, body);
    }

    #[test]
    fn test_read_capped_stops_after_limit() {
        // An endless body must be rejected without reading it all
        let result = read_capped(std::io::repeat(b'x'), 1024);
        assert!(matches!(
            result,
            Err(HarvesterError::ResponseTooLarge {
                size: 1025,
                limit: 1024
            })
        ));
    }

    #[test]
    fn test_bytes_to_string_valid() {
        assert_eq!(bytes_to_string(b"<custom_item>", "test"), "<custom_item>");
    }

    #[test]
    fn test_bytes_to_string_replaces_invalid() {
        let decoded = bytes_to_string(&[b'a', 0xFF, b'b'], "test");
        assert_eq!(decoded, "a\u{FFFD}b");
    }
}
