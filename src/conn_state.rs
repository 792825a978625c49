//! Shared connection state for the activity stream
//!
//! Used by both the WASM and native stream clients.

/// Activity stream connection state
#[derive(Clone, Debug, PartialEq)]
pub enum ConnState {
    Connecting,
    Connected,
    Disconnected,
    Error(String),
}

impl ConnState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnState::Connected)
    }
}
