//! Errors raised while mounting the whiteboard into the page.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use canvas::config::ConfigError;
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no global `window` object")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    MissingElement(String),
    #[error("element `{0}` is not a <canvas>")]
    NotACanvas(String),
    #[error("canvas did not provide a 2d context")]
    NoContext,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("DOM call failed: {0}")]
    Dom(String),
}

impl HostError {
    /// Wrap an exception thrown by a DOM call.
    #[must_use]
    pub fn dom(err: &JsValue) -> Self {
        Self::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

impl From<HostError> for JsValue {
    fn from(err: HostError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
