//! Renderers module for the notation layout planner
//!
//! Reference consumers of a layout plan: element captions and widths, and
//! a plain-text tablature renderer.

pub mod captions;
pub mod tablature;

// Re-export commonly used types
pub use captions::{element_caption, element_char_width, MAX_ELEMENT_WIDTH, MIN_ELEMENT_WIDTH};
pub use tablature::{TablatureRenderer, Tuning};
