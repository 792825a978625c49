//! UI session status flow
//!
//! Pure state machine behind the header status dot and the greeting. Kept
//! free of platform types so it can be exercised on any target.

use crate::conn_state::ConnState;

/// Page-level session status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatStatus {
    #[default]
    Idle,
    Connecting,
    Online,
    Offline,
    Error,
}

/// Tracks the bootstrap lifecycle for one connection attempt
#[derive(Debug, Default)]
pub struct SessionFlow {
    pub status: ChatStatus,
    pub error: String,
    greeting_sent: bool,
    autostarted: bool,
}

impl SessionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// True on the first call only. Guards the automatic bootstrap on first
    /// display; manual reconnects go through [`begin`](Self::begin) and never
    /// re-arm it.
    pub fn take_autostart(&mut self) -> bool {
        if self.autostarted {
            false
        } else {
            self.autostarted = true;
            true
        }
    }

    /// A new bootstrap attempt starts (mount, New chat, Reconnect).
    /// Unconditional: overlapping attempts are allowed, the newest wins.
    pub fn begin(&mut self) {
        self.error.clear();
        self.greeting_sent = false;
        self.status = ChatStatus::Connecting;
    }

    pub fn bootstrap_ok(&mut self) {
        self.status = ChatStatus::Online;
    }

    pub fn bootstrap_failed(&mut self, message: String) {
        self.status = ChatStatus::Error;
        self.error = message;
    }

    /// Fold the activity stream state into the page status once online
    pub fn observe_stream(&mut self, state: &ConnState) {
        if self.status != ChatStatus::Online {
            return;
        }
        match state {
            ConnState::Disconnected => self.status = ChatStatus::Offline,
            ConnState::Error(message) => {
                self.status = ChatStatus::Error;
                self.error = message.clone();
            }
            _ => {}
        }
    }

    /// True exactly once per connection, only after the stream is live
    pub fn should_greet(&mut self, state: &ConnState) -> bool {
        if state.is_connected() && !self.greeting_sent {
            self.greeting_sent = true;
            true
        } else {
            false
        }
    }

    pub fn status_label(&self) -> &'static str {
        match self.status {
            ChatStatus::Idle => "Ready",
            ChatStatus::Connecting => "Connecting...",
            ChatStatus::Online => "Online",
            ChatStatus::Offline => "Offline",
            ChatStatus::Error => "Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successful_bootstrap_transitions() {
        let mut flow = SessionFlow::new();
        assert_eq!(flow.status, ChatStatus::Idle);

        flow.begin();
        assert_eq!(flow.status, ChatStatus::Connecting);
        assert!(flow.error.is_empty());

        flow.bootstrap_ok();
        assert_eq!(flow.status, ChatStatus::Online);
        assert!(flow.error.is_empty());
    }

    #[test]
    fn test_failed_bootstrap_shows_message() {
        let mut flow = SessionFlow::new();
        flow.begin();
        flow.bootstrap_failed("Token request failed (HTTP 403 Forbidden)".into());

        assert_eq!(flow.status, ChatStatus::Error);
        assert!(!flow.error.is_empty());
    }

    #[test]
    fn test_reconnect_clears_previous_error() {
        let mut flow = SessionFlow::new();
        flow.begin();
        flow.bootstrap_failed("boom".into());

        // Reconnect is allowed from any status and resets the error
        flow.begin();
        assert_eq!(flow.status, ChatStatus::Connecting);
        assert!(flow.error.is_empty());
    }

    #[test]
    fn test_greeting_sent_once_per_connection() {
        let mut flow = SessionFlow::new();
        flow.begin();
        flow.bootstrap_ok();

        assert!(!flow.should_greet(&ConnState::Connecting));
        assert!(flow.should_greet(&ConnState::Connected));
        assert!(!flow.should_greet(&ConnState::Connected));

        // A fresh connection greets again
        flow.begin();
        flow.bootstrap_ok();
        assert!(flow.should_greet(&ConnState::Connected));
    }

    #[test]
    fn test_autostart_fires_once_across_frames() {
        let mut flow = SessionFlow::new();
        assert!(flow.take_autostart());
        for _ in 0..5 {
            assert!(!flow.take_autostart());
        }

        // A full reconnect cycle does not re-arm the automatic start
        flow.begin();
        flow.bootstrap_ok();
        assert!(!flow.take_autostart());
    }

    #[test]
    fn test_stream_loss_goes_offline() {
        let mut flow = SessionFlow::new();
        flow.begin();
        flow.bootstrap_ok();

        flow.observe_stream(&ConnState::Connected);
        assert_eq!(flow.status, ChatStatus::Online);

        flow.observe_stream(&ConnState::Disconnected);
        assert_eq!(flow.status, ChatStatus::Offline);
    }

    #[test]
    fn test_stream_error_surfaces_message() {
        let mut flow = SessionFlow::new();
        flow.begin();
        flow.bootstrap_ok();

        flow.observe_stream(&ConnState::Error("socket dropped".into()));
        assert_eq!(flow.status, ChatStatus::Error);
        assert_eq!(flow.error, "socket dropped");
    }

    #[test]
    fn test_stream_state_ignored_while_connecting() {
        // A stale handle's teardown must not clobber a fresh attempt
        let mut flow = SessionFlow::new();
        flow.begin();
        flow.observe_stream(&ConnState::Disconnected);
        assert_eq!(flow.status, ChatStatus::Connecting);
    }
}
