//! Measure boundary providers
//!
//! A [`MeasureBoundaries`] implementation answers "where does measure N start
//! and end" for the indexer, and "which measure holds tick T" for the
//! silence analyser. Two providers are supplied: a uniform [`MeasureGrid`]
//! (constant time signature) and an explicit [`BarTable`].

use serde::{Deserialize, Serialize};

pub trait MeasureBoundaries {
    fn measure_count(&self) -> usize;

    /// First tick of measure `measure` (inclusive)
    fn first_tick_in_measure(&self, measure: usize) -> i64;

    /// Last tick of measure `measure` (exclusive)
    fn last_tick_in_measure(&self, measure: usize) -> i64;

    /// Measure containing `tick`. Ticks before the first measure map to 0,
    /// ticks past the end map to the last measure.
    fn measure_at_tick(&self, tick: i64) -> usize;

    /// Length of one beat (a quarter note) in ticks
    fn beat_length_in_ticks(&self) -> i64;

    fn measure_length_in_ticks(&self, measure: usize) -> i64 {
        self.last_tick_in_measure(measure) - self.first_tick_in_measure(measure)
    }
}

/// Uniform grid of equally long measures
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeasureGrid {
    pub ticks_per_beat: i64,
    pub beats_per_measure: i64,
    pub measure_count: usize,
}

impl MeasureGrid {
    pub fn new(ticks_per_beat: i64, beats_per_measure: i64, measure_count: usize) -> Self {
        Self {
            ticks_per_beat,
            beats_per_measure,
            measure_count,
        }
    }

    pub fn measure_length(&self) -> i64 {
        self.ticks_per_beat * self.beats_per_measure
    }
}

impl MeasureBoundaries for MeasureGrid {
    fn measure_count(&self) -> usize {
        self.measure_count
    }

    fn first_tick_in_measure(&self, measure: usize) -> i64 {
        measure as i64 * self.measure_length()
    }

    fn last_tick_in_measure(&self, measure: usize) -> i64 {
        (measure as i64 + 1) * self.measure_length()
    }

    fn measure_at_tick(&self, tick: i64) -> usize {
        let length = self.measure_length();
        if tick <= 0 || length <= 0 {
            return 0;
        }
        let measure = (tick / length) as usize;
        measure.min(self.measure_count.saturating_sub(1))
    }

    fn beat_length_in_ticks(&self) -> i64 {
        self.ticks_per_beat
    }
}

/// Explicit list of `[first_tick, last_tick)` measure ranges
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BarTable {
    pub ticks_per_beat: i64,
    pub measures: Vec<(i64, i64)>,
}

impl BarTable {
    pub fn new(ticks_per_beat: i64, measures: Vec<(i64, i64)>) -> Self {
        Self {
            ticks_per_beat,
            measures,
        }
    }

    /// Build contiguous measures from their lengths, starting at tick 0
    pub fn from_lengths(ticks_per_beat: i64, lengths: &[i64]) -> Self {
        let mut tick = 0;
        let measures = lengths
            .iter()
            .map(|&len| {
                let range = (tick, tick + len);
                tick += len;
                range
            })
            .collect();
        Self::new(ticks_per_beat, measures)
    }
}

impl MeasureBoundaries for BarTable {
    fn measure_count(&self) -> usize {
        self.measures.len()
    }

    fn first_tick_in_measure(&self, measure: usize) -> i64 {
        self.measures[measure].0
    }

    fn last_tick_in_measure(&self, measure: usize) -> i64 {
        self.measures[measure].1
    }

    fn measure_at_tick(&self, tick: i64) -> usize {
        // number of measures starting at or before `tick`
        let starting = self.measures.partition_point(|&(first, _)| first <= tick);
        starting.saturating_sub(1)
    }

    fn beat_length_in_ticks(&self) -> i64 {
        self.ticks_per_beat
    }
}

/// Boundary description as received over the JS boundary
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundarySpec {
    Grid(MeasureGrid),
    Table(BarTable),
}

impl MeasureBoundaries for BoundarySpec {
    fn measure_count(&self) -> usize {
        match self {
            BoundarySpec::Grid(grid) => grid.measure_count(),
            BoundarySpec::Table(table) => table.measure_count(),
        }
    }

    fn first_tick_in_measure(&self, measure: usize) -> i64 {
        match self {
            BoundarySpec::Grid(grid) => grid.first_tick_in_measure(measure),
            BoundarySpec::Table(table) => table.first_tick_in_measure(measure),
        }
    }

    fn last_tick_in_measure(&self, measure: usize) -> i64 {
        match self {
            BoundarySpec::Grid(grid) => grid.last_tick_in_measure(measure),
            BoundarySpec::Table(table) => table.last_tick_in_measure(measure),
        }
    }

    fn measure_at_tick(&self, tick: i64) -> usize {
        match self {
            BoundarySpec::Grid(grid) => grid.measure_at_tick(tick),
            BoundarySpec::Table(table) => table.measure_at_tick(tick),
        }
    }

    fn beat_length_in_ticks(&self) -> i64 {
        match self {
            BoundarySpec::Grid(grid) => grid.beat_length_in_ticks(),
            BoundarySpec::Table(table) => table.beat_length_in_ticks(),
        }
    }
}
