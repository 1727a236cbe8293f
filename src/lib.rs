//! Notation Layout WASM Module
//!
//! Plans how a track of notes is laid out as notation: which measures are
//! drawn in full, which collapse into "repeat previous measure", "play N
//! times" or "repeat measures a - b" markers, and where rests go.
//!
//! # Module Structure
//!
//! - `models`: notes, measure boundaries, annotated measures, layout elements
//! - `layout`: measure indexing, repetition detection, the layout planner
//! - `analysers`: rest placement between notes
//! - `io`: Standard MIDI File import
//! - `renderers`: element captions and text tablature
//! - `api`: JavaScript-facing entry points

pub mod models;
pub mod layout;
pub mod analysers;
pub mod io;
pub mod renderers;
pub mod api;

// Re-export commonly used types
pub use models::{
    BarTable, BoundarySpec, LayoutElement, Measure, MeasureBoundaries, MeasureGrid, Note,
    NoteSource, NoteTrack,
};
pub use layout::{plan_layout, LayoutConfig, LayoutPlan};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // fails only when a logger is already installed
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Debug);

    log::info!("Notation layout WASM module initialized");
}
