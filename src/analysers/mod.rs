//! Analysers that derive notation hints from raw notes
//!
//! - **silence**: rest placement and rest shapes between notes

pub mod silence;

pub use silence::{decompose_silence, find_silences, NoteShape, Silence};
