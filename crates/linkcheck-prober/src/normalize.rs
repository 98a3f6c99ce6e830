use linkcheck_core::ValidationError;
use url::{ParseError, Url};

const DEFAULT_SCHEME_PREFIX: &str = "https://";
const SCHEME_SEPARATOR: &str = "://";

/// Normalizes a raw link into a probe-able URL.
///
/// Surrounding whitespace is trimmed and bare hostnames get `https://`
/// prepended, so `"google.com"` and `"https://google.com"` normalize to the
/// same URL. Only `http` and `https` URLs with a host are accepted.
pub fn normalize(link: &str) -> Result<Url, ValidationError> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let raw = if trimmed.contains(SCHEME_SEPARATOR) {
        trimmed.to_owned()
    } else {
        format!("{DEFAULT_SCHEME_PREFIX}{trimmed}")
    };

    let url = Url::parse(&raw).map_err(|e| match e {
        ParseError::EmptyHost => ValidationError::MissingHost,
        other => ValidationError::InvalidUrl(other.to_string()),
    })?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ValidationError::UnsupportedScheme(other.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(ValidationError::MissingHost),
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_gets_https() {
        let url = normalize("google.com").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("google.com"));
    }

    #[test]
    fn bare_and_explicit_https_are_identical() {
        assert_eq!(
            normalize("google.com").unwrap(),
            normalize("https://google.com").unwrap()
        );
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(
            normalize("  \thttp://example.com/path \n").unwrap().as_str(),
            "http://example.com/path"
        );
    }

    #[test]
    fn keeps_port_and_path() {
        let url = normalize("localhost:8080/status").unwrap();
        assert_eq!(url.as_str(), "https://localhost:8080/status");
    }

    #[test]
    fn empty_input() {
        assert_eq!(normalize(""), Err(ValidationError::EmptyUrl));
        assert_eq!(normalize("   "), Err(ValidationError::EmptyUrl));
    }

    #[test]
    fn unparsable_input() {
        assert!(matches!(
            normalize("://bad"),
            Err(ValidationError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize("exa mple.com"),
            Err(ValidationError::InvalidUrl(_))
        ));
    }

    #[test]
    fn missing_host() {
        assert_eq!(normalize("http://"), Err(ValidationError::MissingHost));
        assert_eq!(normalize("http:///"), Err(ValidationError::MissingHost));
        assert_eq!(
            normalize("https://:8080/path"),
            Err(ValidationError::MissingHost)
        );
    }

    #[test]
    fn unsupported_scheme() {
        assert_eq!(
            normalize("ftp://x.com"),
            Err(ValidationError::UnsupportedScheme("ftp".to_string()))
        );
        assert!(matches!(
            normalize("file:///etc/passwd"),
            Err(ValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(normalize("HTTP://Example.com").unwrap().scheme(), "http");
    }
}
