//! Layout planning
//!
//! Turns a note source and its measure boundaries into a layout plan: an
//! ordered list of elements telling a renderer how to draw each measure,
//! with repeated material collapsed.
//!
//! # Architecture
//!
//! ```text
//! NoteSource + MeasureBoundaries
//!     ↓
//! indexer       (per-measure note ranges, shortest duration)
//!     ↓
//! repetition    (earliest identical measure, back-references)   [optional]
//!     ↓
//! planner       (direct runs / riffs → LayoutElement list)
//! ```
//!
//! # Usage
//!
//! ```rust
//! use notation_layout_wasm::layout::{plan_layout, LayoutConfig};
//! use notation_layout_wasm::models::{MeasureGrid, Note};
//!
//! let notes = vec![Note::new(0, 480, 60), Note::new(1920, 2400, 60)];
//! let grid = MeasureGrid::new(480, 4, 2);
//! let plan = plan_layout(&notes, &grid, &LayoutConfig::default());
//! assert_eq!(plan.flatten_measures(), vec![0, 1]);
//! ```

pub mod config;
pub mod error;
pub mod indexer;
pub mod planner;
pub mod repetition;
pub mod similarity;
pub mod validate;

pub use config::{
    get_minimal_repetition_length, set_minimal_repetition_length, LayoutConfig,
    DEFAULT_MINIMAL_REPETITION_LENGTH,
};
pub use error::{ConfigError, LayoutError};
pub use indexer::index_measures;
pub use planner::{plan_layout, plan_layout_with_current_config, LayoutPlan, LayoutPlanner};
pub use repetition::{assign_similar_measures, find_direct_run, find_riff, DirectRun, Riff, RiffSearch};
pub use similarity::is_identical;
pub use validate::{validate_boundaries, validate_note_order};
