//! Standalone CLI for exercising the chat bootstrap
//!
//! Run with: cargo run --features cli --bin chat-cli

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use ctc_assist::activity::{
        parse_stream_message, start_conversation_event, user_message, ActivityKind,
    };
    use ctc_assist::config;
    use ctc_assist::conn_state::ConnState;
    use ctc_assist::connection::start_conversation;
    use ctc_assist::session::fetch_session;
    use ctc_assist::stream_native::StreamClient;
    use tokio::io::AsyncBufReadExt;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};
    use url::Url;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ctc_assist=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let endpoint = Url::parse(&config::token_endpoint())?;
    let locale = config::page_locale();
    let timezone = config::local_timezone();

    info!(endpoint = %endpoint, "Bootstrapping session");
    let client = reqwest::Client::new();
    let session = fetch_session(&client, &endpoint).await?;
    let info = start_conversation(&client, &session).await?;
    let stream = StreamClient::connect(&info, &session.domain);

    info!("Type a message and press enter; ctrl-d to quit");

    let mut greeted = false;
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut poll = tokio::time::interval(std::time::Duration::from_millis(100));

    loop {
        tokio::select! {
            _ = poll.tick() => {
                while let Ok(frame) = stream.rx.try_recv() {
                    let Some(set) = parse_stream_message(&frame) else { continue };
                    for activity in set.activities {
                        if activity.kind != ActivityKind::Message || activity.is_from_user() {
                            continue;
                        }
                        if let Some(text) = &activity.text {
                            let sender = activity
                                .from
                                .as_ref()
                                .and_then(|f| f.name.clone())
                                .unwrap_or_else(|| config::AGENT_TITLE.to_string());
                            println!("{sender}: {text}");
                        }
                    }
                }

                let state = stream.state();
                if state.is_connected() && !greeted {
                    stream.post(start_conversation_event(&locale, &timezone));
                    greeted = true;
                }
                if matches!(state, ConnState::Disconnected | ConnState::Error(_)) {
                    warn!(?state, "Activity stream lost, exiting");
                    break;
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) if !line.trim().is_empty() => {
                        stream.post(user_message(line.trim(), &locale));
                    }
                    Some(_) => {}
                    None => break,
                }
            }
        }
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
