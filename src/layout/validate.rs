//! Upstream input validation
//!
//! The planner trusts its inputs. Callers that receive notes or boundaries
//! from outside (the WASM API, the MIDI importer) check them here first.

use super::error::{LayoutError, Result};
use crate::models::{MeasureBoundaries, NoteSource};

/// Notes must be in ascending start-tick order
pub fn validate_note_order<S>(source: &S) -> Result<()>
where
    S: NoteSource + ?Sized,
{
    for index in 1..source.note_count() {
        let previous_start = source.start_tick(index - 1);
        let start_tick = source.start_tick(index);
        if start_tick < previous_start {
            return Err(LayoutError::NotesOutOfOrder {
                index,
                start_tick,
                previous_start,
            });
        }
    }
    Ok(())
}

/// Measures must be non-empty, ascending and non-overlapping, and the beat
/// length must be positive
pub fn validate_boundaries<B>(boundaries: &B) -> Result<()>
where
    B: MeasureBoundaries + ?Sized,
{
    let beat = boundaries.beat_length_in_ticks();
    if beat <= 0 {
        return Err(LayoutError::InvalidBeatLength(beat));
    }

    let mut previous_last = None;
    for measure in 0..boundaries.measure_count() {
        let first_tick = boundaries.first_tick_in_measure(measure);
        let last_tick = boundaries.last_tick_in_measure(measure);
        if last_tick <= first_tick {
            return Err(LayoutError::InvalidMeasureRange {
                measure,
                first_tick,
                last_tick,
            });
        }
        if let Some(previous_last) = previous_last {
            if first_tick < previous_last {
                return Err(LayoutError::OverlappingMeasures {
                    measure,
                    first_tick,
                    previous_last,
                });
            }
        }
        previous_last = Some(last_tick);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BarTable, MeasureGrid, Note};

    #[test]
    fn test_sorted_notes_pass() {
        let notes = vec![Note::new(0, 10, 60), Note::new(0, 5, 62), Note::new(10, 20, 64)];
        assert_eq!(validate_note_order(&notes), Ok(()));
    }

    #[test]
    fn test_unsorted_notes_fail() {
        let notes = vec![Note::new(10, 20, 60), Note::new(0, 5, 62)];
        assert_eq!(
            validate_note_order(&notes),
            Err(LayoutError::NotesOutOfOrder {
                index: 1,
                start_tick: 0,
                previous_start: 10,
            })
        );
    }

    #[test]
    fn test_grid_passes() {
        assert!(validate_boundaries(&MeasureGrid::new(480, 4, 16)).is_ok());
    }

    #[test]
    fn test_zero_beat_fails() {
        let err = validate_boundaries(&MeasureGrid::new(0, 4, 2)).unwrap_err();
        assert_eq!(err, LayoutError::InvalidBeatLength(0));
    }

    #[test]
    fn test_inverted_measure_fails() {
        let table = BarTable::new(100, vec![(0, 400), (400, 400)]);
        assert!(matches!(
            validate_boundaries(&table),
            Err(LayoutError::InvalidMeasureRange { measure: 1, .. })
        ));
    }

    #[test]
    fn test_overlapping_measures_fail() {
        let table = BarTable::new(100, vec![(0, 400), (300, 700)]);
        let err = validate_boundaries(&table).unwrap_err();
        assert!(err.to_string().contains("inside the previous measure"));
    }
}
