//! Browser activity stream client
//!
//! Wraps a `web_sys::WebSocket` on the conversation's stream URL. Frames are
//! buffered and drained by the app in `update()`.

use crate::conn_state::ConnState;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use tracing::{debug, error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

/// Shared frame buffer — WS callback pushes, app drains in update()
pub type MessageBuffer = Rc<RefCell<VecDeque<String>>>;

pub struct StreamClient {
    ws: WebSocket,
    state: Rc<RefCell<ConnState>>,
    buffer: MessageBuffer,
}

impl StreamClient {
    /// Attach to a conversation's activity stream
    pub fn connect(url: &str) -> Result<Self, JsValue> {
        info!("Connecting to activity stream");

        let ws = WebSocket::new(url)?;
        let state = Rc::new(RefCell::new(ConnState::Connecting));
        let buffer: MessageBuffer = Rc::new(RefCell::new(VecDeque::new()));

        let state_clone = state.clone();
        let on_open = Closure::wrap(Box::new(move |_| {
            info!("Activity stream connected");
            *state_clone.borrow_mut() = ConnState::Connected;
        }) as Box<dyn Fn(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let buffer_clone = buffer.clone();
        let on_msg = Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() {
                let msg: String = txt.into();
                // Empty frames are keep-alives
                if !msg.is_empty() {
                    buffer_clone.borrow_mut().push_back(msg);
                }
            }
        }) as Box<dyn Fn(MessageEvent)>);
        ws.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));
        on_msg.forget();

        let state_clone = state.clone();
        let on_err = Closure::wrap(Box::new(move |e: ErrorEvent| {
            let msg = e.message();
            error!(error = %msg, "Activity stream error");
            *state_clone.borrow_mut() = ConnState::Error(msg);
        }) as Box<dyn Fn(ErrorEvent)>);
        ws.set_onerror(Some(on_err.as_ref().unchecked_ref()));
        on_err.forget();

        let state_clone = state.clone();
        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            let code = e.code();
            let reason = e.reason();
            warn!(code, reason = %reason, "Activity stream closed");
            *state_clone.borrow_mut() = ConnState::Disconnected;
        }) as Box<dyn Fn(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        Ok(Self { ws, state, buffer })
    }

    pub fn state(&self) -> ConnState {
        self.state.borrow().clone()
    }

    /// Take all buffered frames
    pub fn drain(&self) -> Vec<String> {
        self.buffer.borrow_mut().drain(..).collect()
    }

    /// Close the socket; errors are swallowed
    pub fn close(&self) {
        *self.state.borrow_mut() = ConnState::Disconnected;
        if let Err(e) = self.ws.close() {
            debug!(?e, "Ignoring close error");
        }
    }
}
