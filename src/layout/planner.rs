//! Layout planning
//!
//! Walks the annotated measures once and turns them into an ordered list of
//! [`LayoutElement`]s. Each step consumes one measure or a whole accepted
//! run, so the consumed spans of the emitted elements tile `0..M`.
//!
//! # Decision order for a measure `m`
//!
//! ```text
//! no playable note                      → EMPTY_MEASURE
//! detection off / not a repetition      → SINGLE_MEASURE
//! threshold < 2                         → SINGLE_REPEATED_MEASURE
//! direct run of copies of one measure   → [SINGLE_REPEATED_MEASURE] PLAY_MANY_TIMES
//! earlier multi-measure span repeated   → REPEATED_RIFF
//! otherwise                             → SINGLE_MEASURE
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Range;

use super::config::LayoutConfig;
use super::indexer::index_measures;
use super::repetition::{assign_similar_measures, find_direct_run, find_riff, RiffSearch};
use crate::models::{LayoutElement, Measure, MeasureBoundaries, NoteSource};

/// Result of one planning call
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Annotated measures (similarity links, `cut_apart` flags)
    pub measures: Vec<Measure>,
    /// Ordered layout instructions
    pub elements: Vec<LayoutElement>,
}

impl LayoutPlan {
    /// Measure indices consumed by the elements, in plan order
    pub fn flatten_measures(&self) -> Vec<usize> {
        self.elements.iter().flat_map(|element| element.measures()).collect()
    }

    /// Note indices drawn by element `element`
    pub fn note_range(&self, element: usize) -> Range<usize> {
        let element = &self.elements[element];
        let first = &self.measures[element.first_measure()];
        let last = &self.measures[element.last_measure()];
        first.first_note..last.last_note
    }

    pub fn measure_for_element(&self, element: usize) -> &Measure {
        &self.measures[self.elements[element].first_measure()]
    }
}

/// Index `source` against `boundaries` and plan its layout
pub fn plan_layout<S, B>(source: &S, boundaries: &B, config: &LayoutConfig) -> LayoutPlan
where
    S: NoteSource + ?Sized,
    B: MeasureBoundaries + ?Sized,
{
    let mut measures = index_measures(source, boundaries);
    if config.detect_repetitions {
        assign_similar_measures(source, &mut measures);
    }

    let elements = LayoutPlanner::new(*config).plan(&mut measures);
    log::info!(
        "planned {} measure(s) into {} layout element(s)",
        measures.len(),
        elements.len()
    );

    LayoutPlan { measures, elements }
}

/// Same as [`plan_layout`], using the process-wide default configuration
pub fn plan_layout_with_current_config<S, B>(source: &S, boundaries: &B) -> LayoutPlan
where
    S: NoteSource + ?Sized,
    B: MeasureBoundaries + ?Sized,
{
    plan_layout(source, boundaries, &LayoutConfig::current())
}

/// Emits layout elements for already indexed (and optionally annotated)
/// measures
pub struct LayoutPlanner {
    config: LayoutConfig,
    elements: Vec<LayoutElement>,
}

impl LayoutPlanner {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            elements: Vec::new(),
        }
    }

    /// Plan every measure. Sets `cut_apart` on measures folded into a
    /// "play many times" element.
    pub fn plan(mut self, measures: &mut [Measure]) -> Vec<LayoutElement> {
        let mut measure = 0;
        while measure < measures.len() {
            let consumed = self.step(measures, measure);
            assert!(consumed > 0, "layout step at measure {} consumed nothing", measure);
            measure += consumed;
        }
        self.elements
    }

    /// Emit the element(s) for `measure`; returns the number of measures consumed
    fn step(&mut self, measures: &mut [Measure], measure: usize) -> usize {
        if measures[measure].is_empty() {
            log::debug!("measure {} is empty", measure + 1);
            self.elements.push(LayoutElement::EmptyMeasure { measure });
            return 1;
        }

        let original = match measures[measure].first_similar_measure {
            Some(original) if self.config.detect_repetitions => original,
            _ => {
                log::debug!("measure {} is normal", measure + 1);
                self.elements.push(LayoutElement::SingleMeasure { measure });
                return 1;
            }
        };

        if self.config.accepts_single_repeats() {
            log::debug!("measure {} repeats measure {}", measure + 1, original + 1);
            self.elements.push(LayoutElement::SingleRepeatedMeasure { measure });
            return 1;
        }

        let threshold = self.config.threshold();

        if let Some(run) = find_direct_run(measures, measure) {
            // the original is already on the page when it sits right before the run
            let amount_of_times = run.len() + usize::from(run.follows_original());

            // a refused run is laid out measure by measure over the run
            // itself, not over `threshold` measures
            if amount_of_times < threshold {
                log::debug!(
                    "play many times refused, measures {} to {} are normal",
                    run.first_measure + 1,
                    run.last_measure + 1
                );
                for measure in run.first_measure..=run.last_measure {
                    self.elements.push(LayoutElement::SingleMeasure { measure });
                }
                return run.len();
            }

            log::debug!(
                "measures {} to {} play measure {} again, {} times in total",
                run.first_measure + 1,
                run.last_measure + 1,
                original + 1,
                amount_of_times
            );
            let first_folded = if run.follows_original() {
                run.first_measure
            } else {
                self.elements.push(LayoutElement::SingleRepeatedMeasure { measure });
                run.first_measure + 1
            };
            self.elements.push(LayoutElement::PlayManyTimes {
                amount_of_times,
                first_measure: first_folded,
                last_measure: run.last_measure,
            });
            for folded in &mut measures[run.first_measure..=run.last_measure] {
                folded.cut_apart = true;
            }
            return run.len();
        }

        match find_riff(measures, measure, threshold) {
            RiffSearch::Accepted(riff) => {
                log::debug!(
                    "repetition from {} to {} ({} to {})",
                    riff.first_measure + 1,
                    riff.last_measure + 1,
                    riff.first_measure_to_repeat + 1,
                    riff.last_measure_to_repeat + 1
                );
                self.elements.push(LayoutElement::RepeatedRiff {
                    first_measure: riff.first_measure,
                    last_measure: riff.last_measure,
                    first_measure_to_repeat: riff.first_measure_to_repeat,
                    last_measure_to_repeat: riff.last_measure_to_repeat,
                });
                riff.len()
            }
            RiffSearch::BelowThreshold { length } => {
                let normal = threshold.min(measures.len() - measure);
                log::debug!(
                    "repetition refused because {} < {}, measures {} to {} are normal",
                    length,
                    threshold,
                    measure + 1,
                    measure + normal
                );
                for measure in measure..measure + normal {
                    if measures[measure].is_empty() {
                        self.elements.push(LayoutElement::EmptyMeasure { measure });
                    } else {
                        self.elements.push(LayoutElement::SingleMeasure { measure });
                    }
                }
                normal
            }
            RiffSearch::NotFound => {
                log::debug!(
                    "measure {} looks like a repetition but is treated as normal",
                    measure + 1
                );
                self.elements.push(LayoutElement::SingleMeasure { measure });
                1
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeasureGrid, Note};

    /// One quarter note per measure; `None` leaves the measure empty
    fn one_note_per_measure(pattern: &[Option<i32>]) -> (Vec<Note>, MeasureGrid) {
        let notes = pattern
            .iter()
            .enumerate()
            .filter_map(|(i, pitch)| {
                pitch.map(|pitch| Note::new(i as i64 * 400, i as i64 * 400 + 100, pitch))
            })
            .collect();
        (notes, MeasureGrid::new(100, 4, pattern.len()))
    }

    fn plan(pattern: &[i32], minimal_repetition_length: i32) -> LayoutPlan {
        let pattern: Vec<Option<i32>> = pattern.iter().copied().map(Some).collect();
        let (notes, grid) = one_note_per_measure(&pattern);
        let config = LayoutConfig::default().with_minimal_repetition_length(minimal_repetition_length);
        plan_layout(&notes, &grid, &config)
    }

    #[test]
    fn test_run_of_copies_not_after_original() {
        let plan = plan(&[60, 62, 60, 60, 60], 2);
        assert_eq!(
            plan.elements,
            vec![
                LayoutElement::SingleMeasure { measure: 0 },
                LayoutElement::SingleMeasure { measure: 1 },
                LayoutElement::SingleRepeatedMeasure { measure: 2 },
                LayoutElement::PlayManyTimes {
                    amount_of_times: 3,
                    first_measure: 3,
                    last_measure: 4,
                },
            ]
        );
        assert!(plan.measures[2..].iter().all(|m| m.cut_apart));
        assert!(!plan.measures[0].cut_apart);
    }

    #[test]
    fn test_run_after_original_counts_original() {
        let plan = plan(&[60, 60, 60, 60], 2);
        assert_eq!(
            plan.elements,
            vec![
                LayoutElement::SingleMeasure { measure: 0 },
                LayoutElement::PlayManyTimes {
                    amount_of_times: 4,
                    first_measure: 1,
                    last_measure: 3,
                },
            ]
        );
    }

    #[test]
    fn test_threshold_below_two_marks_every_repeat() {
        let plan = plan(&[60, 62, 60, 62], 1);
        assert_eq!(
            plan.elements,
            vec![
                LayoutElement::SingleMeasure { measure: 0 },
                LayoutElement::SingleMeasure { measure: 1 },
                LayoutElement::SingleRepeatedMeasure { measure: 2 },
                LayoutElement::SingleRepeatedMeasure { measure: 3 },
            ]
        );
    }

    #[test]
    fn test_refused_run_is_laid_out_normally() {
        let plan = plan(&[60, 62, 60, 60, 64], 3);
        assert_eq!(
            plan.elements,
            vec![
                LayoutElement::SingleMeasure { measure: 0 },
                LayoutElement::SingleMeasure { measure: 1 },
                LayoutElement::SingleMeasure { measure: 2 },
                LayoutElement::SingleMeasure { measure: 3 },
                LayoutElement::SingleMeasure { measure: 4 },
            ]
        );
        assert!(plan.measures.iter().all(|m| !m.cut_apart));
    }

    #[test]
    fn test_refused_riff_takes_threshold_measures() {
        // 60 62 repeats at 3..4 but the threshold asks for 3 measures
        let plan = plan(&[60, 62, 50, 60, 62, 51, 52], 3);
        assert_eq!(plan.flatten_measures(), (0..7).collect::<Vec<_>>());
        assert_eq!(plan.elements[3], LayoutElement::SingleMeasure { measure: 3 });
        assert_eq!(plan.elements[4], LayoutElement::SingleMeasure { measure: 4 });
        assert_eq!(plan.elements[5], LayoutElement::SingleMeasure { measure: 5 });
        assert_eq!(plan.elements.len(), 7);
    }

    #[test]
    fn test_refused_riff_clamped_at_track_end() {
        let plan = plan(&[60, 62, 50, 60, 62], 3);
        assert_eq!(plan.flatten_measures(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_refused_riff_keeps_empty_measures() {
        let pattern = vec![Some(60), Some(62), None, Some(60), Some(62), None];
        let (notes, grid) = one_note_per_measure(&pattern);
        let config = LayoutConfig::default().with_minimal_repetition_length(3);
        let plan = plan_layout(&notes, &grid, &config);
        assert_eq!(&plan.elements[3..], &[
            LayoutElement::SingleMeasure { measure: 3 },
            LayoutElement::SingleMeasure { measure: 4 },
            LayoutElement::EmptyMeasure { measure: 5 },
        ]);
    }

    #[test]
    #[should_panic(expected = "which is not earlier")]
    fn test_forward_link_fails_loudly() {
        let (notes, grid) = one_note_per_measure(&[Some(60), Some(62), Some(64)]);
        let mut measures = index_measures(&notes, &grid);
        measures[0].first_similar_measure = Some(2);
        LayoutPlanner::new(LayoutConfig::default()).plan(&mut measures);
    }

    #[test]
    fn test_every_step_consumes_a_measure() {
        // the run search consumes the whole refused run in one step
        let pattern = [Some(60), Some(62), Some(60), Some(60), Some(64)];
        let (notes, grid) = one_note_per_measure(&pattern);
        let mut measures = index_measures(&notes, &grid);
        assign_similar_measures(&notes, &mut measures);
        let mut planner = LayoutPlanner::new(LayoutConfig::default().with_minimal_repetition_length(4));
        assert_eq!(planner.step(&mut measures, 2), 2);
        assert_eq!(planner.step(&mut measures, 4), 1);
    }

    #[test]
    fn test_detection_disabled() {
        let pattern = vec![Some(60), Some(60), Some(60)];
        let (notes, grid) = one_note_per_measure(&pattern);
        let config = LayoutConfig::default().with_detect_repetitions(false);
        let plan = plan_layout(&notes, &grid, &config);

        assert!(plan.measures.iter().all(|m| m.first_similar_measure.is_none()));
        assert!(plan
            .elements
            .iter()
            .all(|e| matches!(e, LayoutElement::SingleMeasure { .. })));
    }

    #[test]
    fn test_empty_measures_between_repeats() {
        let pattern = vec![Some(60), None, Some(60), None];
        let (notes, grid) = one_note_per_measure(&pattern);
        let plan = plan_layout(&notes, &grid, &LayoutConfig::default());
        assert_eq!(
            plan.elements,
            vec![
                LayoutElement::SingleMeasure { measure: 0 },
                LayoutElement::EmptyMeasure { measure: 1 },
                LayoutElement::SingleMeasure { measure: 2 },
                LayoutElement::EmptyMeasure { measure: 3 },
            ]
        );
    }

    #[test]
    fn test_note_range_of_elements() {
        let plan = plan(&[60, 62, 60, 62], 2);
        // 60 62 | riff 60 62
        assert_eq!(plan.elements.len(), 3);
        assert_eq!(plan.note_range(0), 0..1);
        assert_eq!(plan.note_range(2), 2..4);
        assert_eq!(plan.measure_for_element(2).id, 2);
    }
}
