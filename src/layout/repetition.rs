//! Repetition detection
//!
//! Pass A ([`assign_similar_measures`]) links every measure to the earliest
//! identical measure before it. Pass B ([`find_direct_run`], [`find_riff`])
//! looks for runs starting at a given measure and is driven by the planner
//! as it walks the track.
//!
//! All links are indices into the measure slice.

use std::iter;

use super::similarity::is_identical;
use crate::models::{Measure, NoteSource};

/// Link each measure to the earliest identical earlier measure.
///
/// Candidates are tried in ascending order and the search stops at the first
/// match, so a link never points at a measure that is itself a repetition.
/// Cost is O(M²·k²); only run it when repetition detection is wanted.
pub fn assign_similar_measures<S>(source: &S, measures: &mut [Measure])
where
    S: NoteSource + ?Sized,
{
    for measure in 0..measures.len() {
        if let Some(original) = earliest_identical(source, measures, measure) {
            measures[measure].first_similar_measure = Some(original);
            measures[original].similar_measures_found_later.push(measure);
        }
    }
}

fn earliest_identical<S>(source: &S, measures: &[Measure], measure: usize) -> Option<usize>
where
    S: NoteSource + ?Sized,
{
    (0..measure).find(|&candidate| is_identical(source, &measures[measure], &measures[candidate]))
}

/// Consecutive measures that all repeat the same single measure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectRun {
    pub first_measure: usize,
    pub last_measure: usize,
    /// The measure every member of the run repeats
    pub original: usize,
}

impl DirectRun {
    pub fn len(&self) -> usize {
        self.last_measure - self.first_measure + 1
    }

    /// The original sits right before the run, so it is already on the page
    pub fn follows_original(&self) -> bool {
        self.original + 1 == self.first_measure
    }
}

/// Look for a run of copies of one measure starting at `measure`.
///
/// Extends forward while each next measure repeats the same original. The
/// run is only reported when something is actually played back to back:
/// either the run spans two or more measures, or it directly follows its
/// original.
pub fn find_direct_run(measures: &[Measure], measure: usize) -> Option<DirectRun> {
    assert!(measure < measures.len(), "measure {} out of range", measure);
    let original = measures[measure].first_similar_measure?;

    let mut last = measure;
    while last + 1 < measures.len() && measures[last + 1].first_similar_measure == Some(original) {
        last += 1;
    }

    let run = DirectRun {
        first_measure: measure,
        last_measure: last,
        original,
    };
    if run.len() >= 2 || run.follows_original() {
        Some(run)
    } else {
        None
    }
}

/// A multi-measure span repeating an earlier span
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Riff {
    pub first_measure: usize,
    pub last_measure: usize,
    pub first_measure_to_repeat: usize,
    pub last_measure_to_repeat: usize,
}

impl Riff {
    pub fn len(&self) -> usize {
        self.last_measure - self.first_measure + 1
    }
}

/// Outcome of [`find_riff`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RiffSearch {
    /// First candidate whose run reaches the threshold
    Accepted(Riff),
    /// Some candidate matched at least two measures, none reached the threshold
    BelowThreshold { length: usize },
    NotFound,
}

/// Look for an earlier span that `measure` and its successors repeat.
///
/// Restart points are the original of `measure` followed by every later
/// occurrence of that original, in ascending order. Restart points at or
/// after `measure` cannot precede it and are skipped.
pub fn find_riff(measures: &[Measure], measure: usize, threshold: usize) -> RiffSearch {
    assert!(measure < measures.len(), "measure {} out of range", measure);
    let original = match measures[measure].first_similar_measure {
        Some(original) => original,
        None => return RiffSearch::NotFound,
    };
    assert!(
        original < measure,
        "measure {} links to measure {}, which is not earlier",
        measure,
        original
    );

    let restart_points = iter::once(original)
        .chain(measures[original].similar_measures_found_later.iter().copied())
        .take_while(|&restart| restart < measure);

    let mut below_threshold = None;
    for restart in restart_points {
        let length = riff_length(measures, restart, measure);
        log::trace!(
            "riff check from measure {} against {}: {} matching",
            measure + 1,
            restart + 1,
            length
        );

        if length > 0 && length >= threshold {
            return RiffSearch::Accepted(Riff {
                first_measure: measure,
                last_measure: measure + length - 1,
                first_measure_to_repeat: restart,
                last_measure_to_repeat: restart + length - 1,
            });
        }
        if length >= 2 && below_threshold.is_none() {
            below_threshold = Some(length);
        }
    }

    match below_threshold {
        Some(length) => RiffSearch::BelowThreshold { length },
        None => RiffSearch::NotFound,
    }
}

/// Number of measures from `later` that match the span starting at `earlier`.
///
/// Two measures match when they repeat the same original, or when the later
/// one is a repetition of the earlier one. The earlier span may not run
/// into the later one.
pub fn riff_length(measures: &[Measure], earlier: usize, later: usize) -> usize {
    assert!(earlier != later, "measure {} compared with itself", later);
    assert!(later < measures.len(), "measure {} out of range", later);
    let mut length = 0;
    while earlier + length < later && later + length < measures.len() {
        let from = &measures[earlier + length];
        let to = &measures[later + length];

        let same_original = from.first_similar_measure.is_some()
            && from.first_similar_measure == to.first_similar_measure;
        let repeats_earlier = to.first_similar_measure == Some(earlier + length);

        if !(same_original || repeats_earlier) {
            break;
        }
        length += 1;
    }
    length
}
