//! Page branding and endpoint configuration

/// Default token-issuing endpoint (override with `window.__chat_token_url`
/// on the web, `CHAT_TOKEN_ENDPOINT` env var on native)
pub const TOKEN_ENDPOINT_URL: &str =
    "https://Defaultb62a9626ac0e43b7aee7c0d0a11492.90.environment.api.powerplatform.com\
     /powervirtualagents/botsbyschema/crfad_facialPalsyCoPilot/directline/token?api-version=2022-03-01-preview";

pub const AGENT_TITLE: &str = "ctcHealth Assistant";
pub const AGENT_INITIALS: &str = "ct";

/// Account id used for activities posted from this page
pub const USER_ID: &str = "user";
pub const USER_NAME: &str = "You";

pub const AVATAR_SIZE: f32 = 28.0;
pub const BUBBLE_MAX_WIDTH: f32 = 560.0;

/// Resolve the token endpoint, allowing a host-page / environment override
#[cfg(target_arch = "wasm32")]
pub fn token_endpoint() -> String {
    js_sys::eval("window.__chat_token_url")
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| TOKEN_ENDPOINT_URL.to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn token_endpoint() -> String {
    std::env::var("CHAT_TOKEN_ENDPOINT").unwrap_or_else(|_| TOKEN_ENDPOINT_URL.to_string())
}

/// Page locale: `<html lang>` attribute in the browser, `LANG` env on native
#[cfg(target_arch = "wasm32")]
pub fn page_locale() -> String {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|e| e.get_attribute("lang"))
        .filter(|lang| !lang.is_empty())
        .unwrap_or_else(|| "en".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_locale() -> String {
    std::env::var("LANG")
        .ok()
        .and_then(|lang| lang.split('.').next().map(|s| s.replace('_', "-")))
        .filter(|lang| !lang.is_empty() && lang != "C")
        .unwrap_or_else(|| "en".to_string())
}

/// IANA timezone name for the startConversation greeting
#[cfg(target_arch = "wasm32")]
pub fn local_timezone() -> String {
    let options = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new())
        .resolved_options();
    js_sys::Reflect::get(&options, &"timeZone".into())
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "UTC".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_timezone() -> String {
    std::env::var("TZ")
        .ok()
        .filter(|tz| !tz.is_empty())
        .unwrap_or_else(|| "UTC".to_string())
}
