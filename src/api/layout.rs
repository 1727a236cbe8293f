//! Layout planning operations for the WASM API

use wasm_bindgen::prelude::*;

use super::helpers::{config_or_current, js_error, notes_and_boundaries, serialize};
use crate::io::import_midi;
use crate::layout::{plan_layout, validate_boundaries};

/// Plan the layout of a note list.
///
/// # Parameters
/// * `notes` - array of `{ start_tick, end_tick, pitch, tab? }`, sorted by `start_tick`
/// * `boundaries` - `{ kind: "grid", ... }` or `{ kind: "table", ... }`
/// * `config` - optional `{ detect_repetitions, minimal_repetition_length }`;
///   the process-wide default is used when omitted
///
/// # Returns
/// `{ measures, elements }`
#[wasm_bindgen(js_name = planLayout)]
pub fn plan_layout_js(notes: JsValue, boundaries: JsValue, config: JsValue) -> Result<JsValue, JsValue> {
    let config = config_or_current(config)?;
    let (notes, boundaries) = notes_and_boundaries(notes, boundaries)?;

    let plan = plan_layout(notes.as_slice(), &boundaries, &config);
    log::info!(
        "planLayout: {} measure(s) -> {} element(s)",
        plan.measures.len(),
        plan.elements.len()
    );
    serialize(&plan, "Failed to serialize layout plan")
}

/// Plan the layout of one track of a Standard MIDI File.
///
/// `track` indexes the tracks that contain notes, in file order.
#[wasm_bindgen(js_name = planLayoutFromMidi)]
pub fn plan_layout_from_midi_js(bytes: &[u8], track: usize, config: JsValue) -> Result<JsValue, JsValue> {
    let config = config_or_current(config)?;
    let song = import_midi(bytes).map_err(|e| js_error("MIDI import failed", e))?;
    let notes = song.track(track).map_err(|e| js_error("MIDI import failed", e))?;
    validate_boundaries(&song.boundaries).map_err(|e| js_error("Invalid MIDI timing", e))?;

    let plan = plan_layout(notes, &song.boundaries, &config);
    log::info!(
        "planLayoutFromMidi: track {} ({} note(s)) -> {} element(s)",
        track,
        notes.notes.len(),
        plan.elements.len()
    );
    serialize(&plan, "Failed to serialize layout plan")
}

#[wasm_bindgen(js_name = getMinimalRepetitionLength)]
pub fn get_minimal_repetition_length_js() -> i32 {
    crate::layout::get_minimal_repetition_length()
}

/// Set the process-wide repetition threshold used when no config is passed
#[wasm_bindgen(js_name = setMinimalRepetitionLength)]
pub fn set_minimal_repetition_length_js(length: i32) {
    crate::layout::set_minimal_repetition_length(length);
}
