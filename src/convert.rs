/// Conversions across the JS boundary
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::HostError;

/// Serialize to a plain JS object (maps become objects, not `Map`s)
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, HostError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| HostError::new(format!("Failed to serialize: {}", e)))
}

pub fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, HostError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| HostError::new(format!("Failed to parse: {}", e)))
}

/// Best-effort message for a rejected promise: `Error.message`, a thrown string, or debug output
pub fn js_error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

pub fn host_error(err: JsValue) -> HostError {
    HostError::new(js_error_message(&err))
}
