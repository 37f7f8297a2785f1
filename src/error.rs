//! Errors raised while booting the page effects in the browser.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum BootError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no <head>")]
    NoHead,
    #[error("invalid page config: {0}")]
    Config(#[from] effects::config::ConfigError),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for BootError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe(&value))
    }
}

/// Best-effort text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
