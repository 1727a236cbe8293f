//! Measure indexing
//!
//! Slices an ordered note source into per-measure records in a single
//! left-to-right pass.

use crate::models::{Measure, MeasureBoundaries, NoteSource};

/// Build one [`Measure`] per boundary entry.
///
/// Notes must be ordered by start tick; they are not re-sorted. Each measure
/// takes every remaining note starting before its `last_tick`, so the
/// resulting `first_note..last_note` ranges partition the consumed notes.
/// Notes with a zero or negative duration belong to their measure but do
/// not count towards `shortest_duration`.
pub fn index_measures<S, B>(source: &S, boundaries: &B) -> Vec<Measure>
where
    S: NoteSource + ?Sized,
    B: MeasureBoundaries + ?Sized,
{
    let measure_count = boundaries.measure_count();
    let note_count = source.note_count();
    let mut measures = Vec::with_capacity(measure_count);
    let mut note = 0usize;

    for id in 0..measure_count {
        let mut measure = Measure::new(
            id,
            boundaries.first_tick_in_measure(id),
            boundaries.last_tick_in_measure(id),
        );
        measure.first_note = note;

        while note < note_count && source.start_tick(note) < measure.last_tick {
            let duration = source.end_tick(note) - source.start_tick(note);
            if duration > 0 {
                measure.shortest_duration = Some(match measure.shortest_duration {
                    Some(shortest) => shortest.min(duration),
                    None => duration,
                });
            }
            note += 1;
        }

        measure.last_note = note;
        measures.push(measure);
    }

    if note < note_count {
        log::warn!(
            "{} note(s) start after the last measure and were left out of the layout",
            note_count - note
        );
    }

    measures
}
