//! Text labels and widths for layout elements
//!
//! Repeated elements are drawn as a caption instead of notes: the number of
//! the measure being repeated, the repeated span, or "X<n>".

use crate::layout::LayoutPlan;
use crate::models::LayoutElement;

/// Narrowest element, in characters
pub const MIN_ELEMENT_WIDTH: usize = 4;
/// Widest single measure, in characters
pub const MAX_ELEMENT_WIDTH: usize = 48;

/// Caption for element `element`, with 1-based measure numbers.
///
/// Single measures get their own number (the measure-number label), empty
/// measures get nothing.
pub fn element_caption(plan: &LayoutPlan, element: usize) -> Option<String> {
    match plan.elements[element] {
        LayoutElement::EmptyMeasure { .. } => None,
        LayoutElement::SingleMeasure { measure } => Some((measure + 1).to_string()),
        LayoutElement::SingleRepeatedMeasure { measure } => {
            let shown = plan.measures[measure].first_similar_measure.unwrap_or(measure);
            Some((shown + 1).to_string())
        }
        LayoutElement::PlayManyTimes { amount_of_times, .. } => Some(format!("X{}", amount_of_times)),
        LayoutElement::RepeatedRiff {
            first_measure_to_repeat,
            last_measure_to_repeat,
            ..
        } => Some(format!(
            "{} - {}",
            first_measure_to_repeat + 1,
            last_measure_to_repeat + 1
        )),
    }
}

/// Width of element `element` in characters.
///
/// Single measures widen with note density: two characters per shortest
/// note that fits in the measure. Captioned elements are as wide as their
/// caption plus a margin.
pub fn element_char_width(plan: &LayoutPlan, element: usize) -> usize {
    let width = match plan.elements[element] {
        LayoutElement::EmptyMeasure { .. } => MIN_ELEMENT_WIDTH,
        LayoutElement::SingleMeasure { measure } => {
            let measure = &plan.measures[measure];
            match measure.shortest_duration {
                Some(shortest) => {
                    let length = measure.length_in_ticks().max(0);
                    ((length * 2 + shortest / 2) / shortest) as usize
                }
                None => MIN_ELEMENT_WIDTH,
            }
        }
        _ => element_caption(plan, element).map_or(0, |caption| caption.len()) + 2,
    };
    width.clamp(MIN_ELEMENT_WIDTH, MAX_ELEMENT_WIDTH)
}
