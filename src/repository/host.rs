//! Derivation of the hosting service's REST API base from its web URL.

use url::Url;

use super::error::ValidationError;

const PUBLIC_HOST: &str = "github.com";
const PUBLIC_API_BASE: &str = "https://api.github.com";
const ENTERPRISE_API_PATH: &str = "api/v3";

/// Derives the API base URL from a scheme, host and optional port.
fn derive_api_base_from_host(
    scheme: &str,
    host: &str,
    port: Option<u16>,
) -> Result<Url, ValidationError> {
    if host.eq_ignore_ascii_case(PUBLIC_HOST) {
        return Url::parse(PUBLIC_API_BASE).map_err(|error| ValidationError::InvalidBaseUrl {
            message: error.to_string(),
        });
    }

    let authority = if host.contains(':') {
        format!("[{host}]")
    } else {
        host.to_owned()
    };
    let mut api_url = Url::parse(&format!("{scheme}://{authority}")).map_err(|error| {
        ValidationError::InvalidBaseUrl {
            message: error.to_string(),
        }
    })?;

    api_url
        .set_port(port)
        .map_err(|()| ValidationError::InvalidBaseUrl {
            message: "invalid port".to_owned(),
        })?;
    api_url.set_path(ENTERPRISE_API_PATH);
    Ok(api_url)
}

/// Derives the API base URL for the host of `base_url`.
pub(crate) fn derive_api_base(base_url: &Url) -> Result<Url, ValidationError> {
    let host = base_url
        .host_str()
        .ok_or_else(|| ValidationError::InvalidBaseUrl {
            message: format!("{base_url} has no host to derive an API endpoint from"),
        })?;

    derive_api_base_from_host(base_url.scheme(), host, base_url.port())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::public("https://github.com/", "https://api.github.com/")]
    #[case::public_mixed_case("https://GitHub.com/", "https://api.github.com/")]
    #[case::enterprise("https://ghe.example.com/", "https://ghe.example.com/api/v3")]
    #[case::enterprise_port("http://127.0.0.1:8080/", "http://127.0.0.1:8080/api/v3")]
    fn derives_api_base(#[case] base_url: &str, #[case] expected: &str) {
        let parsed = Url::parse(base_url).expect("base URL should parse");

        let api_base = derive_api_base(&parsed).expect("API base should derive");

        assert_eq!(api_base.as_str(), expected, "API base mismatch");
    }

    #[rstest]
    fn rejects_hostless_url() {
        let parsed = Url::parse("file:///srv/remotes/").expect("base URL should parse");

        let result = derive_api_base(&parsed);

        assert!(
            matches!(result, Err(ValidationError::InvalidBaseUrl { .. })),
            "expected InvalidBaseUrl, got {result:?}"
        );
    }
}
