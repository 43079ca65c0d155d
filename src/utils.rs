use url::Url;

pub const SMART_HOME_PATH: &str = "/api/alexa/smart_home";

/// Strips surrounding whitespace and every trailing slash.
pub fn normalize_base_url(input: &str) -> &str {
    input.trim().trim_end_matches('/')
}

/// Builds `{base}/api/alexa/smart_home`, keeping any path prefix on the base.
pub fn smart_home_url(base_url: &str) -> Result<Url, url::ParseError> {
    Url::parse(&format!("{}{}", normalize_base_url(base_url), SMART_HOME_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_are_stripped() {
        assert_eq!(normalize_base_url("https://ha.example.com///"), "https://ha.example.com");
        assert_eq!(normalize_base_url(" https://ha.example.com "), "https://ha.example.com");
        assert_eq!(normalize_base_url("https://ha.example.com"), "https://ha.example.com");
    }

    #[test]
    fn test_smart_home_url() {
        let url = smart_home_url("https://ha.example.com/").unwrap();
        assert_eq!(url.as_str(), "https://ha.example.com/api/alexa/smart_home");
        assert_eq!(url.port_or_known_default(), Some(443));

        let url = smart_home_url("https://ha.example.com:8123/prefix//").unwrap();
        assert_eq!(url.as_str(), "https://ha.example.com:8123/prefix/api/alexa/smart_home");
    }

    #[test]
    fn test_base_url_without_scheme_is_rejected() {
        assert!(smart_home_url("ha.example.com").is_err());
    }
}
