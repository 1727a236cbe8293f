// Layout planner properties over many small tracks
//
// Tracks hold one quarter note per measure; `None` leaves a measure empty.
// Every pattern over a small alphabet is planned with several thresholds.

use notation_layout_wasm::layout::{index_measures, is_identical, plan_layout, LayoutConfig, LayoutPlan};
use notation_layout_wasm::models::{LayoutElement, MeasureGrid, Note};

const TICKS_PER_BEAT: i64 = 100;

fn track(pattern: &[Option<i32>]) -> (Vec<Note>, MeasureGrid) {
    let measure = TICKS_PER_BEAT * 4;
    let notes = pattern
        .iter()
        .enumerate()
        .filter_map(|(i, pitch)| {
            pitch.map(|pitch| Note::new(i as i64 * measure, i as i64 * measure + TICKS_PER_BEAT, pitch))
        })
        .collect();
    (notes, MeasureGrid::new(TICKS_PER_BEAT, 4, pattern.len()))
}

fn plan(pattern: &[Option<i32>], minimal_repetition_length: i32) -> LayoutPlan {
    let (notes, grid) = track(pattern);
    let config = LayoutConfig::default().with_minimal_repetition_length(minimal_repetition_length);
    plan_layout(&notes, &grid, &config)
}

fn pitches(pattern: &[i32]) -> Vec<Option<i32>> {
    pattern.iter().copied().map(Some).collect()
}

/// Every pattern of `length` measures over {empty, 60, 62, 64}
fn all_patterns(length: usize) -> Vec<Vec<Option<i32>>> {
    const ALPHABET: [Option<i32>; 4] = [None, Some(60), Some(62), Some(64)];
    let mut patterns = vec![Vec::new()];
    for _ in 0..length {
        patterns = patterns
            .into_iter()
            .flat_map(|prefix| {
                ALPHABET.iter().map(move |&symbol| {
                    let mut next = prefix.clone();
                    next.push(symbol);
                    next
                })
            })
            .collect();
    }
    patterns
}

#[test]
fn test_coverage_every_measure_once_in_order() {
    for length in 0..=6 {
        for pattern in all_patterns(length) {
            for threshold in -1..=4 {
                let plan = plan(&pattern, threshold);
                assert_eq!(
                    plan.flatten_measures(),
                    (0..length).collect::<Vec<_>>(),
                    "pattern {:?} threshold {} gave {:?}",
                    pattern,
                    threshold,
                    plan.elements
                );
            }
        }
    }
}

#[test]
fn test_planning_is_idempotent() {
    for pattern in all_patterns(5) {
        let first = plan(&pattern, 2);
        let second = plan(&pattern, 2);
        assert_eq!(first, second);
    }
}

#[test]
fn test_empty_measures_always_render_empty() {
    for pattern in all_patterns(6) {
        for threshold in [1, 2, 3] {
            let plan = plan(&pattern, threshold);
            for (measure, symbol) in pattern.iter().enumerate() {
                if symbol.is_none() {
                    assert!(
                        plan.elements.contains(&LayoutElement::EmptyMeasure { measure }),
                        "measure {} of {:?} not rendered empty: {:?}",
                        measure,
                        pattern,
                        plan.elements
                    );
                    assert_eq!(plan.measures[measure].shortest_duration, None);
                }
            }
        }
    }
}

#[test]
fn test_identity_is_reflexive() {
    let notes = vec![
        Note::new(0, 100, 60),
        Note::new(0, 200, 64),
        Note::new(100, 400, 67),
        Note::new(400, 500, 60),
    ];
    let measures = index_measures(&notes, &MeasureGrid::new(TICKS_PER_BEAT, 4, 3));
    for measure in &measures {
        assert_eq!(is_identical(&notes, measure, measure), !measure.is_empty());
    }
}

#[test]
fn test_distinct_measures_are_laid_out_singly() {
    let plan = plan(&pitches(&[60, 62, 64, 65]), 2);
    assert_eq!(
        plan.elements,
        (0..4).map(|measure| LayoutElement::SingleMeasure { measure }).collect::<Vec<_>>()
    );
}

#[test]
fn test_two_identical_measures_play_twice() {
    let plan = plan(&pitches(&[60, 60]), 2);
    assert_eq!(
        plan.elements,
        vec![
            LayoutElement::SingleMeasure { measure: 0 },
            LayoutElement::PlayManyTimes {
                amount_of_times: 2,
                first_measure: 1,
                last_measure: 1,
            },
        ]
    );
    assert!(plan.measures[1].cut_apart);
}

#[test]
fn test_threshold_boundary() {
    let two = plan(&pitches(&[60, 60]), 3);
    assert_eq!(
        two.elements,
        vec![
            LayoutElement::SingleMeasure { measure: 0 },
            LayoutElement::SingleMeasure { measure: 1 },
        ]
    );

    let three = plan(&pitches(&[60, 60, 60]), 3);
    assert_eq!(
        three.elements,
        vec![
            LayoutElement::SingleMeasure { measure: 0 },
            LayoutElement::PlayManyTimes {
                amount_of_times: 3,
                first_measure: 1,
                last_measure: 2,
            },
        ]
    );
}

#[test]
fn test_repeated_riff() {
    // 1..=3 come back at 5..=7
    let plan = plan(&pitches(&[50, 60, 62, 64, 55, 60, 62, 64]), 2);
    assert_eq!(
        plan.elements.last(),
        Some(&LayoutElement::RepeatedRiff {
            first_measure: 5,
            last_measure: 7,
            first_measure_to_repeat: 1,
            last_measure_to_repeat: 3,
        })
    );
    assert_eq!(plan.elements.len(), 6);
    assert_eq!(plan.measures[5].first_similar_measure, Some(1));
    assert_eq!(plan.measures[1].similar_measures_found_later, vec![5]);
}

#[test]
fn test_empty_measure_scenario() {
    let plan = plan(&[Some(60), None, Some(62)], 2);
    assert_eq!(plan.elements[1], LayoutElement::EmptyMeasure { measure: 1 });
    assert_eq!(plan.measures[1].shortest_duration, None);
    assert_eq!(plan.note_range(1), 1..1);
}

#[test]
fn test_chords_match_regardless_of_note_order() {
    // same chord, written in a different order in the second measure
    let notes = vec![
        Note::new(0, 100, 60),
        Note::new(0, 100, 64),
        Note::new(400, 500, 64),
        Note::new(400, 500, 60),
    ];
    let plan = plan_layout(&notes, &MeasureGrid::new(TICKS_PER_BEAT, 4, 2), &LayoutConfig::default());
    assert_eq!(plan.measures[1].first_similar_measure, Some(0));
    assert!(matches!(plan.elements[1], LayoutElement::PlayManyTimes { amount_of_times: 2, .. }));
}

#[test]
fn test_plan_serializes_with_type_tags() {
    let plan = plan(&pitches(&[60, 60]), 2);
    let json = serde_json::to_value(&plan.elements).unwrap();
    assert_eq!(json[0]["type"], "SINGLE_MEASURE");
    assert_eq!(json[1]["type"], "PLAY_MANY_TIMES");
    assert_eq!(json[1]["amount_of_times"], 2);
}
