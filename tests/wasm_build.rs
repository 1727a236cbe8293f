//! WASM build test
//!
//! Exercises the JavaScript-facing entry points. Run with
//! `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use notation_layout_wasm::api::*;
use notation_layout_wasm::models::{BoundarySpec, MeasureGrid, Note};
use notation_layout_wasm::LayoutPlan;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn notes(pitches: &[i32]) -> JsValue {
    let notes: Vec<Note> = pitches
        .iter()
        .enumerate()
        .map(|(i, &p)| Note::new(i as i64 * 400, i as i64 * 400 + 100, p))
        .collect();
    serde_wasm_bindgen::to_value(&notes).unwrap()
}

fn grid(measure_count: usize) -> JsValue {
    serde_wasm_bindgen::to_value(&BoundarySpec::Grid(MeasureGrid::new(100, 4, measure_count))).unwrap()
}

#[wasm_bindgen_test]
fn test_plan_layout_with_default_config() {
    let result = plan_layout_js(notes(&[60, 60, 62]), grid(3), JsValue::UNDEFINED).unwrap();
    let plan: LayoutPlan = serde_wasm_bindgen::from_value(result).unwrap();
    assert_eq!(plan.flatten_measures(), vec![0, 1, 2]);
    assert_eq!(plan.elements.len(), 3);
}

#[wasm_bindgen_test]
fn test_unsorted_notes_are_rejected() {
    let unsorted = vec![Note::new(400, 500, 60), Note::new(0, 100, 60)];
    let result = plan_layout_js(
        serde_wasm_bindgen::to_value(&unsorted).unwrap(),
        grid(2),
        JsValue::NULL,
    );
    assert!(result.is_err());
}

#[wasm_bindgen_test]
fn test_find_silences() {
    let result = find_silences_js(notes(&[60]), grid(2), 0, 1).unwrap();
    let silences: Vec<notation_layout_wasm::analysers::Silence> =
        serde_wasm_bindgen::from_value(result).unwrap();
    // three beats after the note, then a whole measure
    assert!(!silences.is_empty());
    assert_eq!(silences.last().map(|s| s.end_tick), Some(800));
}

#[wasm_bindgen_test]
fn test_render_tablature() {
    let text = render_tablature_js(notes(&[64, 67]), grid(2), JsValue::UNDEFINED, JsValue::UNDEFINED, false)
        .unwrap();
    assert_eq!(text.lines().count(), 6);
    assert!(text.starts_with("|0"));
}

#[wasm_bindgen_test]
fn test_garbage_midi_is_rejected() {
    assert!(plan_layout_from_midi_js(b"not midi", 0, JsValue::UNDEFINED).is_err());
}
