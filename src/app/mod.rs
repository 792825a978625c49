//! Branded chat page: header bar, transcript, composer
//!
//! All remote work happens off the UI thread; `update()` only drains the
//! bootstrap slot and the stream buffer.

mod composer;
mod header;
mod transcript;

use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;
use tracing::debug;
use url::Url;

use crate::activity::{self, ActivityKind};
use crate::config;
use crate::connection::Connection;
use crate::flow::{ChatStatus, SessionFlow};
use crate::session;
use crate::theme::{colors, fluent_visuals};

/// Slot filled by the async bootstrap, drained in update()
type BootstrapSlot = Rc<RefCell<Option<Result<Connection, String>>>>;

/// One rendered transcript entry
pub(crate) struct ChatEntry {
    pub from_user: bool,
    pub sender: String,
    pub text: String,
}

pub struct ChatApp {
    pub(crate) flow: SessionFlow,
    connection: Option<Connection>,
    bootstrap: BootstrapSlot,
    pub(crate) transcript: Vec<ChatEntry>,
    pub(crate) input: String,
    locale: String,
    timezone: String,
}

impl ChatApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(fluent_visuals());

        Self {
            flow: SessionFlow::new(),
            connection: None,
            bootstrap: Rc::new(RefCell::new(None)),
            transcript: Vec::new(),
            input: String::new(),
            locale: config::page_locale(),
            timezone: config::local_timezone(),
        }
    }

    /// Start (or restart) the session bootstrap. Wired to New chat and
    /// Reconnect; an in-flight attempt is not cancelled, the newest result
    /// wins the slot.
    pub(crate) fn start(&mut self) {
        debug!("Starting session bootstrap");
        self.flow.begin();
        self.transcript.clear();

        // End any previous session, best effort
        if let Some(previous) = self.connection.take() {
            previous.end();
        }

        let slot = self.bootstrap.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let result = bootstrap().await;
            *slot.borrow_mut() = Some(result);
        });
    }

    fn drain_bootstrap(&mut self) {
        if let Some(result) = self.bootstrap.borrow_mut().take() {
            match result {
                Ok(connection) => {
                    // A stale attempt can resolve after a newer handle is
                    // already live; only one stays active
                    if let Some(previous) = self.connection.replace(connection) {
                        previous.end();
                    }
                    self.flow.bootstrap_ok();
                }
                Err(message) => self.flow.bootstrap_failed(message),
            }
        }
    }

    fn drain_stream(&mut self) {
        let Some(frames) = self.connection.as_ref().map(|c| c.drain()) else {
            return;
        };

        for frame in frames {
            let Some(set) = activity::parse_stream_message(&frame) else {
                continue;
            };
            for activity in set.activities {
                if activity.kind != ActivityKind::Message {
                    continue;
                }
                let Some(text) = activity.text.clone().filter(|t| !t.is_empty()) else {
                    continue;
                };
                let from_user = activity.is_from_user();
                let sender = if from_user {
                    config::USER_NAME.to_string()
                } else {
                    activity
                        .from
                        .as_ref()
                        .and_then(|f| f.name.clone())
                        .unwrap_or_else(|| config::AGENT_TITLE.to_string())
                };
                self.transcript.push(ChatEntry {
                    from_user,
                    sender,
                    text,
                });
            }
        }

        let Some(connection) = &self.connection else {
            return;
        };
        let state = connection.state();
        if self.flow.should_greet(&state) {
            connection.post(activity::start_conversation_event(
                &self.locale,
                &self.timezone,
            ));
        }
        self.flow.observe_stream(&state);
    }

    /// Post the composer text as a message activity
    pub(crate) fn send_input(&mut self) {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return;
        }
        if let Some(connection) = &self.connection {
            connection.post(activity::user_message(&text, &self.locale));
            self.input.clear();
        }
    }

    fn render_error(&self, ui: &mut egui::Ui) {
        ui.add_space(16.0);
        ui.label(
            egui::RichText::new("Unable to connect")
                .color(colors::TEXT_PRIMARY)
                .strong(),
        );
        ui.add_space(6.0);
        ui.label(egui::RichText::new(&self.flow.error).color(colors::TEXT_SECONDARY));
    }
}

async fn bootstrap() -> Result<Connection, String> {
    let endpoint = Url::parse(&config::token_endpoint()).map_err(|e| e.to_string())?;
    let client = reqwest::Client::new();
    let session = session::fetch_session(&client, &endpoint)
        .await
        .map_err(|e| e.to_string())?;
    Connection::open(session).await.map_err(|e| e.to_string())
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll the stream buffer at ~10Hz even without input events
        ctx.request_repaint_after(std::time::Duration::from_millis(100));

        if self.flow.take_autostart() {
            self.start();
        }

        self.drain_bootstrap();
        self.drain_stream();

        egui::TopBottomPanel::top("header")
            .frame(
                egui::Frame::new()
                    .fill(colors::BG_SURFACE)
                    .inner_margin(egui::Margin::symmetric(12, 10)),
            )
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        egui::TopBottomPanel::bottom("composer")
            .frame(
                egui::Frame::new()
                    .fill(colors::BG_SURFACE)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                self.render_composer(ui);
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(colors::BG_PAGE)
                    .inner_margin(egui::Margin::same(12)),
            )
            .show(ctx, |ui| {
                if self.flow.status == ChatStatus::Error {
                    self.render_error(ui);
                    return;
                }
                self.render_transcript(ui);
            });
    }
}
