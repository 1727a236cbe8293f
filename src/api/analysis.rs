//! Silence analysis and tablature rendering for the WASM API

use wasm_bindgen::prelude::*;

use super::helpers::{config_or_current, deserialize, notes_and_boundaries, serialize};
use crate::analysers::find_silences;
use crate::layout::plan_layout;
use crate::renderers::{TablatureRenderer, Tuning};

/// Rests in measures `first_measure..=last_measure`.
///
/// # Returns
/// Array of `{ tick, end_tick, shape, dotted, triplet }`, ordered by tick
#[wasm_bindgen(js_name = findSilences)]
pub fn find_silences_js(
    notes: JsValue,
    boundaries: JsValue,
    first_measure: usize,
    last_measure: usize,
) -> Result<JsValue, JsValue> {
    let (notes, boundaries) = notes_and_boundaries(notes, boundaries)?;
    let silences = find_silences(notes.as_slice(), &boundaries, first_measure, last_measure);
    log::debug!(
        "findSilences: {} rest(s) in measures {}..={}",
        silences.len(),
        first_measure + 1,
        last_measure + 1
    );
    serialize(&silences, "Failed to serialize silences")
}

/// Plan the layout and draw it as text tablature.
///
/// `tuning` is `{ open_strings: [...] }` (highest string first), standard
/// guitar when omitted.
#[wasm_bindgen(js_name = renderTablature)]
pub fn render_tablature_js(
    notes: JsValue,
    boundaries: JsValue,
    config: JsValue,
    tuning: JsValue,
    show_measure_numbers: bool,
) -> Result<String, JsValue> {
    let config = config_or_current(config)?;
    let tuning: Tuning = if tuning.is_undefined() || tuning.is_null() {
        Tuning::default()
    } else {
        deserialize(tuning, "Invalid tuning")?
    };
    let (notes, boundaries) = notes_and_boundaries(notes, boundaries)?;

    let plan = plan_layout(notes.as_slice(), &boundaries, &config);
    Ok(TablatureRenderer::new(tuning)
        .with_measure_numbers(show_measure_numbers)
        .render_to_string(&plan, notes.as_slice()))
}
