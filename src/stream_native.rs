//! Native activity stream client
//!
//! Uses tokio-tungstenite in a background thread, with channel-based message
//! passing. Outbound activities are handed to the same task and posted over
//! HTTP, so the GUI-side handle never blocks.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{error, info, warn};
use url::Url;

use crate::activity::Activity;
use crate::conn_state::ConnState;
use crate::connection::{post_activity, ConversationInfo};

pub struct StreamClient {
    /// Receiver for incoming stream frames
    pub rx: Receiver<String>,
    state: Arc<Mutex<ConnState>>,
    post_tx: UnboundedSender<Activity>,
}

impl StreamClient {
    /// Attach to a conversation's activity stream
    ///
    /// Spawns a background thread with a tokio runtime that owns the socket
    /// and posts outbound activities.
    pub fn connect(info: &ConversationInfo, domain: &Url) -> Self {
        let (tx, rx): (Sender<String>, Receiver<String>) = mpsc::channel();
        let (post_tx, post_rx) = unbounded_channel();
        let state = Arc::new(Mutex::new(ConnState::Connecting));

        let info = info.clone();
        let domain = domain.clone();
        let state_clone = state.clone();

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!(error = %e, "Failed to create tokio runtime");
                    *state_clone.lock() = ConnState::Error(e.to_string());
                    return;
                }
            };
            rt.block_on(async move {
                Self::run(&info, &domain, tx, post_rx, state_clone).await;
            });
        });

        Self { rx, state, post_tx }
    }

    pub fn state(&self) -> ConnState {
        self.state.lock().clone()
    }

    /// Fire-and-forget activity post
    pub fn post(&self, activity: Activity) {
        if self.post_tx.send(activity).is_err() {
            warn!("Stream task gone, dropping activity");
        }
    }

    async fn run(
        info: &ConversationInfo,
        domain: &Url,
        tx: Sender<String>,
        mut post_rx: UnboundedReceiver<Activity>,
        state: Arc<Mutex<ConnState>>,
    ) {
        use futures_util::{SinkExt, StreamExt};
        use tokio_tungstenite::{connect_async, tungstenite::Message};

        info!("Connecting to activity stream");

        let ws_stream = match connect_async(info.stream_url.as_str()).await {
            Ok((stream, _)) => {
                info!("Activity stream connected");
                *state.lock() = ConnState::Connected;
                stream
            }
            Err(e) => {
                error!(error = %e, "Failed to connect");
                *state.lock() = ConnState::Error(e.to_string());
                return;
            }
        };

        let (mut write, mut read) = ws_stream.split();
        let http = reqwest::Client::new();

        loop {
            tokio::select! {
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            // Empty frames are keep-alives
                            if !text.is_empty() && tx.send(text.to_string()).is_err() {
                                // Receiver dropped, exit
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            warn!("Activity stream closed by server");
                            *state.lock() = ConnState::Disconnected;
                            return;
                        }
                        Some(Err(e)) => {
                            error!(error = %e, "Activity stream error");
                            *state.lock() = ConnState::Error(e.to_string());
                            return;
                        }
                        _ => {}
                    }
                }
                activity = post_rx.recv() => {
                    match activity {
                        Some(activity) => {
                            if let Err(e) = post_activity(
                                &http,
                                domain,
                                &info.token,
                                &info.conversation_id,
                                &activity,
                            )
                            .await
                            {
                                warn!(error = %e, "Failed to post activity");
                            }
                        }
                        // Handle dropped: close the socket, best effort
                        None => break,
                    }
                }
            }
        }

        let _ = write.send(Message::Close(None)).await;
        *state.lock() = ConnState::Disconnected;
    }
}
