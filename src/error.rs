// error.rs - Failures at the edges of the engine
//
// The tick path itself never fails. Only config parsing and the browser
// glue can.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid motion config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config field `{field}` {reason}")]
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },

    #[error("browser object unavailable: {0}")]
    MissingDom(&'static str),

    #[error("javascript error: {0}")]
    Js(String),
}

impl EngineError {
    /// Wrap a thrown JS value, keeping its debug rendering.
    pub fn js(value: JsValue) -> Self {
        EngineError::Js(format!("{value:?}"))
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
