//! Error types for layout planning inputs and configuration
//!
//! Planning itself cannot fail once its preconditions hold. These errors
//! come from validating inputs upstream and from loading configuration.

use thiserror::Error;

/// Input validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Notes must be ordered by start tick
    #[error("note {index} starts at tick {start_tick}, before the previous note at tick {previous_start}")]
    NotesOutOfOrder {
        index: usize,
        start_tick: i64,
        previous_start: i64,
    },

    /// A measure ends before (or where) it starts
    #[error("measure {measure} has an empty or inverted tick range [{first_tick}, {last_tick})")]
    InvalidMeasureRange {
        measure: usize,
        first_tick: i64,
        last_tick: i64,
    },

    /// A measure starts before the previous one ended
    #[error("measure {measure} starts at tick {first_tick}, inside the previous measure ending at {previous_last}")]
    OverlappingMeasures {
        measure: usize,
        first_tick: i64,
        previous_last: i64,
    },

    /// Beat length must be positive for silence analysis
    #[error("beat length must be positive, got {0}")]
    InvalidBeatLength(i64),
}

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("minimal_repetition_length must not be negative, got {0}")]
    NegativeRepetitionLength(i32),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
