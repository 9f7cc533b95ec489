//! URL utilities for consistent URL handling
//!
//! This module provides utilities for normalizing URLs to prevent issues
//! with trailing slashes when constructing API endpoints.

/// Normalize a base URL by trimming whitespace and trailing slashes.
///
/// # Examples
///
/// ```
/// use parley::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://localhost:8080"), "http://localhost:8080");
/// assert_eq!(normalize_base_url("http://localhost:8080/"), "http://localhost:8080");
/// assert_eq!(normalize_base_url("  http://localhost:8080// "), "http://localhost:8080");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Construct a complete API endpoint URL from a base URL and endpoint path
///
/// This function normalizes the base URL and safely appends the endpoint,
/// ensuring there are no double slashes in the result.
///
/// # Examples
///
/// ```
/// use parley::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("http://localhost:8080", "api/startConversation"),
///     "http://localhost:8080/api/startConversation"
/// );
/// assert_eq!(
///     construct_api_url("https://dialogue.example.com/v2/", "/api/continueConversation"),
///     "https://dialogue.example.com/v2/api/continueConversation"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes_and_whitespace() {
        assert_eq!(
            normalize_base_url("http://localhost:8080"),
            "http://localhost:8080"
        );
        assert_eq!(
            normalize_base_url("http://localhost:8080///"),
            "http://localhost:8080"
        );
        assert_eq!(
            normalize_base_url("\thttps://dialogue.example.com/prefix/ \n"),
            "https://dialogue.example.com/prefix"
        );
        assert_eq!(normalize_base_url(""), "");
        assert_eq!(normalize_base_url("///"), "");
    }

    #[test]
    fn construct_joins_with_exactly_one_slash() {
        for (base, endpoint) in [
            ("http://localhost:8080", "api/startConversation"),
            ("http://localhost:8080/", "api/startConversation"),
            ("http://localhost:8080", "/api/startConversation"),
            ("http://localhost:8080//", "///api/startConversation"),
        ] {
            assert_eq!(
                construct_api_url(base, endpoint),
                "http://localhost:8080/api/startConversation"
            );
        }
    }

    #[test]
    fn construct_keeps_path_prefix() {
        assert_eq!(
            construct_api_url("https://dialogue.example.com/v2/", "api/continueConversation"),
            "https://dialogue.example.com/v2/api/continueConversation"
        );
    }
}
