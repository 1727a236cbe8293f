//! Silence analysis
//!
//! Finds the gaps between notes and decomposes each gap into rests a reader
//! would expect to see: standard power-of-two shapes, dotted shapes that
//! start on a beat, and triplet shapes. Rests never cross a measure
//! boundary.
//!
//! Lengths are classified exactly as a fraction of a whole note (4 beats).

use num_rational::Ratio;
use serde::{Deserialize, Serialize};

use crate::models::{MeasureBoundaries, NoteSource};

/// Rest shape, named by its denominator (1 = whole, 4 = quarter, ...)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde_repr::Serialize_repr, serde_repr::Deserialize_repr)]
pub enum NoteShape {
    Whole = 1,
    Half = 2,
    Quarter = 4,
    Eighth = 8,
    Sixteenth = 16,
}

/// One notated rest
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Silence {
    pub tick: i64,
    pub end_tick: i64,
    pub shape: NoteShape,
    pub dotted: bool,
    pub triplet: bool,
}

impl Silence {
    pub fn length(&self) -> i64 {
        self.end_tick - self.tick
    }
}

/// (numerator, denominator) of a whole note, shape, dotted, triplet.
/// Order matters: first match wins.
const KNOWN_LENGTHS: [(i64, i64, NoteShape, bool, bool); 12] = [
    (1, 1, NoteShape::Whole, false, false),
    (3, 2, NoteShape::Whole, true, false),
    (1, 2, NoteShape::Half, false, false),
    (3, 4, NoteShape::Half, true, false),
    (1, 4, NoteShape::Quarter, false, false),
    (1, 3, NoteShape::Half, false, true),
    (3, 8, NoteShape::Quarter, true, false),
    (1, 8, NoteShape::Eighth, false, false),
    (1, 6, NoteShape::Quarter, false, true),
    (3, 16, NoteShape::Eighth, true, false),
    (1, 16, NoteShape::Sixteenth, false, false),
    (1, 12, NoteShape::Eighth, false, true),
];

/// Shortest rest drawn; anything shorter is dropped
fn shortest_rest() -> Ratio<i64> {
    Ratio::new(1, 16)
}

/// Decompose a silence of `length` ticks starting at `tick` into rests
pub fn decompose_silence<B>(boundaries: &B, tick: i64, length: i64) -> Vec<Silence>
where
    B: MeasureBoundaries + ?Sized,
{
    let mut silences = Vec::new();
    analyse_silence(boundaries, tick, length, &mut silences);
    silences
}

fn analyse_silence<B>(boundaries: &B, tick: i64, length: i64, out: &mut Vec<Silence>)
where
    B: MeasureBoundaries + ?Sized,
{
    if length < 2 || boundaries.measure_count() == 0 {
        return;
    }

    let measure = boundaries.measure_at_tick(tick);
    let end_measure = boundaries.measure_at_tick(tick + length - 1);

    if measure != end_measure {
        let split_tick = boundaries.first_tick_in_measure(end_measure);
        let head = split_tick - tick;
        if head > 0 && length - head > 0 {
            analyse_silence(boundaries, tick, head, out);
            analyse_silence(boundaries, split_tick, length - head, out);
            return;
        }
    }

    let beat = boundaries.beat_length_in_ticks();
    if tick < 0 || beat <= 0 {
        return;
    }

    let whole_ticks = beat * 4;
    let relative = Ratio::new(length, whole_ticks);
    let tick_in_measure = tick - boundaries.first_tick_in_measure(measure);
    let to_next_beat = beat - tick_in_measure.rem_euclid(beat);
    let on_beat = to_next_beat == beat;

    let known = KNOWN_LENGTHS.iter().find(|&&(num, den, _, dotted, _)| {
        relative == Ratio::new(num, den) && (!dotted || on_beat)
    });
    if let Some(&(_, _, shape, dotted, triplet)) = known {
        out.push(Silence {
            tick,
            end_tick: tick + length,
            shape,
            dotted,
            triplet,
        });
        return;
    }

    if relative < shortest_rest() {
        return;
    }

    // unknown length: first reach the next beat
    if !on_beat && to_next_beat < length {
        analyse_silence(boundaries, tick, to_next_beat, out);
        analyse_silence(boundaries, tick + to_next_beat, length - to_next_beat, out);
        return;
    }

    // then split off the largest power-of-two fraction shorter than the silence
    let half = Ratio::new(1, 2);
    let mut closest = Ratio::from_integer(1);
    while closest >= relative {
        closest = closest * half;
    }
    let head = (closest * Ratio::from_integer(whole_ticks)).to_integer();
    if head <= 0 || head >= length {
        return;
    }
    analyse_silence(boundaries, tick, head, out);
    analyse_silence(boundaries, tick + head, length - head, out);
}

/// Find every rest in measures `first_measure..=last_measure`.
///
/// Covers silence before the first note of a measure, between notes (notes
/// starting together count as one, ending with the longest), after the
/// last note of a measure, and whole empty measures. Results are ordered by
/// tick.
pub fn find_silences<S, B>(
    source: &S,
    boundaries: &B,
    first_measure: usize,
    last_measure: usize,
) -> Vec<Silence>
where
    S: NoteSource + ?Sized,
    B: MeasureBoundaries + ?Sized,
{
    let measure_count = boundaries.measure_count();
    if measure_count == 0 || first_measure > last_measure || first_measure >= measure_count {
        return Vec::new();
    }
    let last_measure = last_measure.min(measure_count - 1);

    let mut silences = Vec::new();
    let mut measure_empty = vec![true; last_measure - first_measure + 1];

    // end of the longest note among the latest notes to start
    let mut previous_note_end: Option<i64> = None;
    // latest end of any note in the current measure
    let mut last_note_end: Option<i64> = None;
    let mut current_measure: Option<usize> = None;

    let track_start = boundaries.first_tick_in_measure(0);
    let track_end = boundaries.last_tick_in_measure(measure_count - 1);

    let note_count = source.note_count();
    let mut note = 0;
    while note < note_count {
        let start = source.start_tick(note);
        // notes outside the measures are not laid out
        if start < track_start {
            note += 1;
            continue;
        }
        if start >= track_end {
            break;
        }
        let measure = boundaries.measure_at_tick(start);
        if measure < first_measure {
            note += 1;
            continue;
        }
        if measure > last_measure {
            break;
        }

        if current_measure.map_or(true, |current| measure > current) {
            // trailing silence in the measure we are leaving
            if let Some(end) = last_note_end {
                if end != boundaries.first_tick_in_measure(measure) {
                    let end_measure = boundaries.measure_at_tick(end - 1);
                    let length = boundaries.last_tick_in_measure(end_measure) - end;
                    if length > 0 {
                        analyse_silence(boundaries, end, length, &mut silences);
                    }
                }
            }

            // leading silence in the measure we are entering
            let measure_start = boundaries.first_tick_in_measure(measure);
            if start > measure_start {
                analyse_silence(boundaries, measure_start, start - measure_start, &mut silences);
            }

            previous_note_end = None;
            last_note_end = None;
        }
        current_measure = Some(measure);
        measure_empty[measure - first_measure] = false;

        if let Some(previous_end) = previous_note_end {
            if start > previous_end {
                analyse_silence(boundaries, previous_end, start - previous_end, &mut silences);
            }
        }

        let mut end = source.end_tick(note);
        while note + 1 < note_count && source.start_tick(note + 1) == start {
            note += 1;
            end = end.max(source.end_tick(note));
        }
        previous_note_end = Some(end);
        if last_note_end.map_or(true, |last| end > last) {
            last_note_end = Some(end);
        }

        note += 1;
    }

    // silence after the last note
    if let (Some(measure), Some(end)) = (current_measure, last_note_end) {
        let length = boundaries.last_tick_in_measure(measure) - end;
        if length > 0 {
            analyse_silence(boundaries, end, length, &mut silences);
        }
    }

    for (offset, empty) in measure_empty.iter().enumerate() {
        if *empty {
            let measure = first_measure + offset;
            analyse_silence(
                boundaries,
                boundaries.first_tick_in_measure(measure),
                boundaries.measure_length_in_ticks(measure),
                &mut silences,
            );
        }
    }

    silences.sort_by_key(|silence| silence.tick);
    silences
}
