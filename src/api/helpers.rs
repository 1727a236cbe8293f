//! Shared helpers for WASM API operations

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::layout::LayoutConfig;
use crate::models::{BoundarySpec, MeasureBoundaries, Note};

/// Build a JS `Error` from any displayable error, logging it on the way out
pub fn js_error(context: &str, error: impl std::fmt::Display) -> JsValue {
    let msg = format!("{}: {}", context, error);
    log::error!("{}", msg);
    js_sys::Error::new(&msg).into()
}

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| js_error(error_context, e))
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| js_error(error_context, e))
}

/// Explicit config when given, the process-wide default for `undefined`/`null`
pub fn config_or_current(value: JsValue) -> Result<LayoutConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(LayoutConfig::current());
    }
    deserialize(value, "Invalid layout config")
}

/// Deserialize and validate a sorted note list plus its measure boundaries
pub fn notes_and_boundaries(
    notes: JsValue,
    boundaries: JsValue,
) -> Result<(Vec<Note>, BoundarySpec), JsValue> {
    let notes: Vec<Note> = deserialize(notes, "Invalid notes")?;
    let boundaries: BoundarySpec = deserialize(boundaries, "Invalid measure boundaries")?;

    crate::layout::validate_note_order(notes.as_slice()).map_err(|e| js_error("Invalid notes", e))?;
    crate::layout::validate_boundaries(&boundaries)
        .map_err(|e| js_error("Invalid measure boundaries", e))?;

    log::debug!(
        "received {} note(s) over {} measure(s)",
        notes.len(),
        boundaries.measure_count()
    );
    Ok((notes, boundaries))
}
