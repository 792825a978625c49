//! Conversation handle against the Direct Line service
//!
//! A conversation is opened over HTTP with the session token; activities
//! arrive on the returned stream URL (WebSocket) and are posted back over
//! HTTP. Posting is fire-and-forget: failures are logged, never surfaced.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use url::Url;

use crate::activity::Activity;
use crate::session::Session;

#[cfg(target_arch = "wasm32")]
use crate::conn_state::ConnState;
#[cfg(target_arch = "wasm32")]
use crate::stream_wasm::StreamClient;
#[cfg(target_arch = "wasm32")]
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("conversation start failed (HTTP {0})")]
    Start(StatusCode),
    #[error("activity post failed (HTTP {0})")]
    Post(StatusCode),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[cfg(target_arch = "wasm32")]
    #[error("activity stream failed to open: {0}")]
    Stream(String),
}

/// Response to opening a conversation; the token here is scoped to the
/// conversation and supersedes the session token
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationInfo {
    pub conversation_id: String,
    pub token: String,
    pub stream_url: String,
}

/// Open a new conversation under the session's Direct Line domain
pub async fn start_conversation(
    client: &reqwest::Client,
    session: &Session,
) -> Result<ConversationInfo, ConnectionError> {
    let response = client
        .post(format!("{}/conversations", session.domain))
        .bearer_auth(&session.token)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(ConnectionError::Start(response.status()));
    }
    let info: ConversationInfo = response.json().await?;
    info!(conversation_id = %info.conversation_id, "Conversation started");
    Ok(info)
}

/// Post one activity into a conversation
pub async fn post_activity(
    client: &reqwest::Client,
    domain: &Url,
    token: &str,
    conversation_id: &str,
    activity: &Activity,
) -> Result<(), ConnectionError> {
    let response = client
        .post(format!("{domain}/conversations/{conversation_id}/activities"))
        .bearer_auth(token)
        .json(activity)
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(ConnectionError::Post(response.status()));
    }
    Ok(())
}

/// Live conversation handle owned by the page
#[cfg(target_arch = "wasm32")]
pub struct Connection {
    info: ConversationInfo,
    domain: Url,
    http: reqwest::Client,
    stream: StreamClient,
}

#[cfg(target_arch = "wasm32")]
impl Connection {
    /// Open a conversation and attach to its activity stream
    pub async fn open(session: Session) -> Result<Self, ConnectionError> {
        let http = reqwest::Client::new();
        let info = start_conversation(&http, &session).await?;
        let stream = StreamClient::connect(&info.stream_url)
            .map_err(|e| ConnectionError::Stream(format!("{e:?}")))?;
        Ok(Self {
            info,
            domain: session.domain,
            http,
            stream,
        })
    }

    pub fn state(&self) -> ConnState {
        self.stream.state()
    }

    /// Take all buffered stream frames
    pub fn drain(&self) -> Vec<String> {
        self.stream.drain()
    }

    /// Fire-and-forget activity post
    pub fn post(&self, activity: Activity) {
        let http = self.http.clone();
        let domain = self.domain.clone();
        let token = self.info.token.clone();
        let conversation_id = self.info.conversation_id.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = post_activity(&http, &domain, &token, &conversation_id, &activity).await
            {
                warn!(error = %e, "Failed to post activity");
            }
        });
    }

    /// Best-effort teardown of the previous session; errors are swallowed
    pub fn end(&self) {
        debug!(conversation_id = %self.info.conversation_id, "Ending conversation");
        self.stream.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_response_shape() {
        let body = r#"{
            "conversationId": "9GBv5eQPHFf3Cp8rAJ5pWc-eu",
            "token": "ew0K.conversation.scoped",
            "expires_in": 3600,
            "streamUrl": "wss://europe.directline.botframework.com/v3/directline/conversations/9GBv5eQPHFf3Cp8rAJ5pWc-eu/stream?watermark=-"
        }"#;
        let info: ConversationInfo = serde_json::from_str(body).unwrap();
        assert_eq!(info.conversation_id, "9GBv5eQPHFf3Cp8rAJ5pWc-eu");
        assert!(info.stream_url.starts_with("wss://"));
        assert_eq!(info.token, "ew0K.conversation.scoped");
    }

    #[test]
    fn test_start_error_message() {
        let err = ConnectionError::Start(StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.to_string(),
            "conversation start failed (HTTP 401 Unauthorized)"
        );
    }
}
