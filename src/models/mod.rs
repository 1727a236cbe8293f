//! Models module for the notation layout planner
//!
//! This module contains the data the planner reads (notes, measure
//! boundaries) and the data it produces (annotated measures, layout
//! elements).

pub mod note;
pub mod measure;
pub mod measure_data;
pub mod layout_element;

// Re-export commonly used types
pub use note::{Note, NoteSource, NoteTrack, TabPosition};
pub use measure::Measure;
pub use measure_data::{BarTable, BoundarySpec, MeasureBoundaries, MeasureGrid};
pub use layout_element::LayoutElement;
