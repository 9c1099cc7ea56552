use crate::config::AuthConfig;
use crate::scope;

/// Spotify authorization endpoint
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Build the authorization URL the operator must visit in a browser.
///
/// Pure and deterministic: the same configuration always produces the same
/// URL. The redirect URI and scope string are percent-encoded.
pub fn authorize_url(config: &AuthConfig) -> String {
    format!(
        "{SPOTIFY_AUTH_URL}?\
        client_id={}&\
        response_type=code&\
        redirect_uri={}&\
        scope={}",
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(&scope::join(&config.scopes)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::new("test-client-id".to_string(), "test-secret".to_string()).unwrap()
    }

    #[test]
    fn url_carries_client_id_and_response_type() {
        let url = authorize_url(&test_config());
        assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
        assert!(url.contains("client_id=test-client-id"));
        assert!(url.contains("response_type=code"));
    }

    #[test]
    fn redirect_uri_is_percent_encoded() {
        let url = authorize_url(&test_config());
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));
    }

    #[test]
    fn url_contains_every_requested_scope() {
        let config = test_config();
        let url = authorize_url(&config);
        for scope in &config.scopes {
            assert!(url.contains(&scope.to_string()), "missing scope {scope}");
        }
    }
}
