//! Layout policy configuration
//!
//! [`LayoutConfig`] is passed explicitly to [`plan_layout`](super::plan_layout).
//! A process-wide default is kept for callers that still use the
//! get/set accessor pair; it is snapshotted by [`LayoutConfig::current`].

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

use super::error::ConfigError;

/// Default minimum run length before repeats are collapsed
pub const DEFAULT_MINIMAL_REPETITION_LENGTH: i32 = 2;

lazy_static! {
    static ref DEFAULT_CONFIG: RwLock<LayoutConfig> = RwLock::new(LayoutConfig::default());
}

/// Policy knobs for one planning call
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Run the O(M²) identical-measure search. When off, every non-empty
    /// measure is laid out as a single measure.
    pub detect_repetitions: bool,

    /// Shortest run collapsed into a repetition element. Values below 2
    /// make any single repeated measure qualify.
    pub minimal_repetition_length: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            detect_repetitions: true,
            minimal_repetition_length: DEFAULT_MINIMAL_REPETITION_LENGTH,
        }
    }
}

impl LayoutConfig {
    /// Snapshot of the process-wide default
    pub fn current() -> Self {
        match DEFAULT_CONFIG.read() {
            Ok(config) => *config,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Replace the process-wide default
    pub fn set_current(config: LayoutConfig) {
        match DEFAULT_CONFIG.write() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }
    }

    pub fn with_minimal_repetition_length(mut self, length: i32) -> Self {
        self.minimal_repetition_length = length;
        self
    }

    pub fn with_detect_repetitions(mut self, detect: bool) -> Self {
        self.detect_repetitions = detect;
        self
    }

    /// True when every single repeated measure qualifies on its own
    pub fn accepts_single_repeats(&self) -> bool {
        self.minimal_repetition_length < 2
    }

    /// Threshold as a measure count; only meaningful when
    /// [`accepts_single_repeats`](Self::accepts_single_repeats) is false
    pub(crate) fn threshold(&self) -> usize {
        self.minimal_repetition_length.max(0) as usize
    }

    /// Load from YAML, e.g.
    ///
    /// ```yaml
    /// detect_repetitions: true
    /// minimal_repetition_length: 3
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.minimal_repetition_length < 0 {
            return Err(ConfigError::NegativeRepetitionLength(self.minimal_repetition_length));
        }
        Ok(self)
    }
}

/// Process-wide minimal repetition length
pub fn get_minimal_repetition_length() -> i32 {
    LayoutConfig::current().minimal_repetition_length
}

/// Set the process-wide minimal repetition length.
///
/// Not validated: negative values are stored as given and behave like 1.
pub fn set_minimal_repetition_length(length: i32) {
    let config = LayoutConfig::current().with_minimal_repetition_length(length);
    LayoutConfig::set_current(config);
}
