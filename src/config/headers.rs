//! HTTP header constants.
//!
//! Every request to the API carries the same JSON content negotiation headers
//! plus a bearer token.

/// Content type of request bodies and accepted responses
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Authorization scheme for access tokens
pub const BEARER_SCHEME: &str = "Bearer";

/// Builds the full header set for one request.
pub fn request_headers(access_token: &str) -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string()),
        ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
        (
            "Authorization".to_string(),
            format!("{} {}", BEARER_SCHEME, access_token),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_headers_carry_bearer_token() {
        let headers = request_headers("abc123");
        assert_eq!(headers.len(), 3);
        assert!(headers.contains(&("Accept".to_string(), "application/json".to_string())));
        assert!(headers.contains(&(
            "Content-Type".to_string(),
            "application/json".to_string()
        )));
        assert!(headers.contains(&("Authorization".to_string(), "Bearer abc123".to_string())));
    }
}
