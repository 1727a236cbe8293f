//! Notation Layout WASM API
//!
//! JavaScript-facing entry points. Inputs arrive as plain JS objects and
//! are converted with `serde-wasm-bindgen`; every entry point validates its
//! input before planning and reports failures as `Error` objects.
//!
//! # Module Structure
//!
//! - `helpers`: (de)serialization and error mapping shared by all entry points
//! - `layout`: layout planning from notes or MIDI bytes, repetition policy
//! - `analysis`: silence analysis and tablature text

pub mod helpers;
pub mod layout;
pub mod analysis;

pub use layout::{
    get_minimal_repetition_length_js, plan_layout_from_midi_js, plan_layout_js,
    set_minimal_repetition_length_js,
};
pub use analysis::{find_silences_js, render_tablature_js};
