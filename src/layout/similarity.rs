//! Measure equality
//!
//! Two measures are identical when their notes match one-to-one on start
//! and end tick (relative to each measure's first tick) and on pitch.
//!
//! The matching is greedy: each note of `a`, in index order, binds to the
//! first still-unmatched note of `b` that matches it exactly. This is not a
//! maximum bipartite matching. Repetition results depend on this exact
//! behaviour, so it must stay first-fit.

use crate::models::{Measure, NoteSource};

/// True when `a` and `b` hold the same notes, shifted in time.
///
/// Empty measures (no notes at all) are never identical to anything.
pub fn is_identical<S>(source: &S, a: &Measure, b: &Measure) -> bool
where
    S: NoteSource + ?Sized,
{
    let note_amount = a.note_count();
    if note_amount != b.note_count() || note_amount < 1 {
        return false;
    }

    let mut matched_a = vec![false; note_amount];
    let mut matched_b = vec![false; note_amount];

    for i in 0..note_amount {
        let note_a = a.first_note + i;
        let start_a = source.start_tick(note_a) - a.first_tick;
        let end_a = source.end_tick(note_a) - a.first_tick;
        let pitch_a = source.pitch(note_a);

        for j in 0..note_amount {
            if matched_b[j] {
                continue;
            }
            let note_b = b.first_note + j;
            if source.start_tick(note_b) - b.first_tick != start_a {
                continue;
            }
            if source.end_tick(note_b) - b.first_tick != end_a {
                continue;
            }
            if source.pitch(note_b) != pitch_a {
                continue;
            }

            matched_a[i] = true;
            matched_b[j] = true;
            break;
        }

        // no counterpart for this note
        if !matched_a[i] {
            return false;
        }
    }

    true
}
