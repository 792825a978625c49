//! Session bootstrap: token + regional channel settings
//!
//! The token endpoint authorizes a new chat session; the regional channel
//! settings endpoint (same origin, same api-version) says which Direct Line
//! base URL serves this region. Both are fetched concurrently, as the
//! original page shell does.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token endpoint has no api-version parameter")]
    MissingApiVersion,
    #[error("{what} request failed (HTTP {status})")]
    Status { what: &'static str, status: StatusCode },
    #[error("invalid {what} URL: {source}")]
    InvalidUrl {
        what: &'static str,
        source: url::ParseError,
    },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// Everything needed to open a conversation
#[derive(Clone, Debug)]
pub struct Session {
    /// Direct Line API domain, e.g. `https://europe.directline.botframework.com/v3/directline`
    pub domain: Url,
    /// Bearer token issued for this session
    pub token: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegionalSettings {
    channel_urls_by_id: ChannelUrls,
}

#[derive(Deserialize)]
struct ChannelUrls {
    directline: String,
}

/// Extract the `api-version` query parameter from the token endpoint
pub fn api_version(token_endpoint: &Url) -> Option<String> {
    token_endpoint
        .query_pairs()
        .find(|(key, _)| key == "api-version")
        .map(|(_, value)| value.into_owned())
}

/// Derive the regional channel settings URL from the token endpoint's origin
pub fn regional_settings_url(token_endpoint: &Url) -> Result<Url, SessionError> {
    let version = api_version(token_endpoint).ok_or(SessionError::MissingApiVersion)?;
    token_endpoint
        .join(&format!(
            "/powervirtualagents/regionalchannelsettings?api-version={version}"
        ))
        .map_err(|source| SessionError::InvalidUrl {
            what: "regional settings",
            source,
        })
}

/// Resolve the Direct Line API domain under the regional base URL
pub fn directline_domain(base: &Url) -> Result<Url, SessionError> {
    base.join("v3/directline")
        .map_err(|source| SessionError::InvalidUrl {
            what: "Direct Line",
            source,
        })
}

async fn fetch_token(client: &reqwest::Client, endpoint: &Url) -> Result<String, SessionError> {
    let response = client.get(endpoint.clone()).send().await?;
    if !response.status().is_success() {
        return Err(SessionError::Status {
            what: "Token",
            status: response.status(),
        });
    }
    let body: TokenResponse = response.json().await?;
    Ok(body.token)
}

async fn fetch_directline_base(
    client: &reqwest::Client,
    endpoint: &Url,
) -> Result<Url, SessionError> {
    let response = client.get(endpoint.clone()).send().await?;
    if !response.status().is_success() {
        return Err(SessionError::Status {
            what: "Regional settings",
            status: response.status(),
        });
    }
    let body: RegionalSettings = response.json().await?;
    Url::parse(&body.channel_urls_by_id.directline).map_err(|source| SessionError::InvalidUrl {
        what: "Direct Line base",
        source,
    })
}

/// Fetch the token and regional Direct Line base concurrently and combine
/// them into a [`Session`]
pub async fn fetch_session(
    client: &reqwest::Client,
    token_endpoint: &Url,
) -> Result<Session, SessionError> {
    let settings_url = regional_settings_url(token_endpoint)?;
    debug!(%settings_url, "Fetching session");

    let (base, token) = futures_util::try_join!(
        fetch_directline_base(client, &settings_url),
        fetch_token(client, token_endpoint),
    )?;

    let domain = directline_domain(&base)?;
    info!(%domain, "Session ready");
    Ok(Session { domain, token })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN_ENDPOINT: &str = "https://example.environment.api.powerplatform.com\
        /powervirtualagents/botsbyschema/crfad_bot/directline/token?api-version=2022-03-01-preview";

    #[test]
    fn test_api_version_extraction() {
        let endpoint = Url::parse(TOKEN_ENDPOINT).unwrap();
        assert_eq!(api_version(&endpoint).as_deref(), Some("2022-03-01-preview"));

        let bare = Url::parse("https://example.com/token").unwrap();
        assert!(api_version(&bare).is_none());
    }

    #[test]
    fn test_regional_settings_url_keeps_origin() {
        let endpoint = Url::parse(TOKEN_ENDPOINT).unwrap();
        let settings = regional_settings_url(&endpoint).unwrap();
        assert_eq!(
            settings.as_str(),
            "https://example.environment.api.powerplatform.com\
             /powervirtualagents/regionalchannelsettings?api-version=2022-03-01-preview"
        );
    }

    #[test]
    fn test_regional_settings_url_requires_api_version() {
        let bare = Url::parse("https://example.com/token").unwrap();
        assert!(matches!(
            regional_settings_url(&bare),
            Err(SessionError::MissingApiVersion)
        ));
    }

    #[test]
    fn test_directline_domain_join() {
        let base = Url::parse("https://europe.directline.botframework.com/").unwrap();
        let domain = directline_domain(&base).unwrap();
        assert_eq!(
            domain.as_str(),
            "https://europe.directline.botframework.com/v3/directline"
        );
    }

    #[test]
    fn test_regional_settings_response_shape() {
        let body = r#"{
            "channelUrlsById": {
                "directline": "https://europe.directline.botframework.com/",
                "telephony": "https://europe.telephony.example/"
            },
            "geoBaseUri": "https://europe.api.powerplatform.com/"
        }"#;
        let settings: RegionalSettings = serde_json::from_str(body).unwrap();
        assert_eq!(
            settings.channel_urls_by_id.directline,
            "https://europe.directline.botframework.com/"
        );
    }

    #[test]
    fn test_status_error_message_is_displayable() {
        let err = SessionError::Status {
            what: "Token",
            status: StatusCode::FORBIDDEN,
        };
        assert_eq!(err.to_string(), "Token request failed (HTTP 403 Forbidden)");
    }
}
