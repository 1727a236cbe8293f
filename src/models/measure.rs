//! Per-measure record built for one layout request

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One measure of a track, annotated for layout.
///
/// Similarity links are plain indices into the same measure array, so the
/// whole annotated set is a flat arena with no ownership between entries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Measure {
    /// Sequential index, 0-based
    pub id: usize,
    /// First tick (inclusive)
    pub first_tick: i64,
    /// Last tick (exclusive)
    pub last_tick: i64,
    /// Index of the first note in this measure
    pub first_note: usize,
    /// Index one past the last note in this measure
    pub last_note: usize,
    /// Shortest strictly positive note duration, `None` when no note qualifies
    pub shortest_duration: Option<i64>,
    /// Earliest earlier measure with identical content
    pub first_similar_measure: Option<usize>,
    /// Later measures whose `first_similar_measure` is this one, ascending
    pub similar_measures_found_later: Vec<usize>,
    /// Consumed by a "play many times" group; renderers separate it visually
    pub cut_apart: bool,
}

impl Measure {
    pub fn new(id: usize, first_tick: i64, last_tick: i64) -> Self {
        Self {
            id,
            first_tick,
            last_tick,
            first_note: 0,
            last_note: 0,
            shortest_duration: None,
            first_similar_measure: None,
            similar_measures_found_later: Vec::new(),
            cut_apart: false,
        }
    }

    pub fn note_count(&self) -> usize {
        self.last_note - self.first_note
    }

    pub fn note_range(&self) -> Range<usize> {
        self.first_note..self.last_note
    }

    /// True when no note with a positive duration starts in this measure
    pub fn is_empty(&self) -> bool {
        self.shortest_duration.is_none()
    }

    pub fn length_in_ticks(&self) -> i64 {
        self.last_tick - self.first_tick
    }
}
