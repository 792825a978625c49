//! ctcHealth Assistant - embedded web chat page
//!
//! Fetches a Direct Line session token and regional endpoint, opens a
//! conversation, and renders a branded chat surface with egui:
//! - header bar with status and New chat / Reconnect controls
//! - transcript of message activities
//! - composer posting back into the conversation

pub mod activity;
pub mod config;
pub mod conn_state;
pub mod connection;
pub mod flow;
pub mod session;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod stream_wasm;
#[cfg(target_arch = "wasm32")]
mod theme;

#[cfg(all(not(target_arch = "wasm32"), feature = "cli"))]
pub mod stream_native;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();

    // Route tracing to the browser console
    tracing_wasm::set_as_global_default();

    wasm_bindgen_futures::spawn_local(async {
        let canvas = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .expect("host page must provide a #canvas element")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("#canvas is not a canvas element");

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|cc| Ok(Box::new(app::ChatApp::new(cc)))),
            )
            .await
            .expect("failed to start the chat page");
    });
}
