//! Endpoint URL validation for provider configuration.
//!
//! Catches misconfiguration at construction time instead of at the first
//! network call. Plain HTTP is allowed so tests and local deployments can
//! point providers at a mock server.

use url::Url;

/// Validate a provider endpoint URL.
///
/// Accepts absolute `http`/`https` URLs with a host.
pub fn validate_endpoint(endpoint: &str) -> Result<(), String> {
    let url = Url::parse(endpoint).map_err(|e| format!("invalid endpoint URL: {e}"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("endpoint scheme must be http or https, got: {other}")),
    }
    if url.host_str().is_none() {
        return Err("endpoint URL must have a host".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_endpoint_is_accepted() {
        assert!(validate_endpoint("https://api.example.com/v1/chat/completions").is_ok());
    }

    #[test]
    fn test_http_endpoint_is_accepted_for_mocks() {
        assert!(validate_endpoint("http://127.0.0.1:8080/v1/chat/completions").is_ok());
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        assert!(validate_endpoint("ftp://example.com/upload").is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(validate_endpoint("not a url").is_err());
    }
}
