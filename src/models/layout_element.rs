//! Layout elements: the instructions of a layout plan

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// One instruction in the layout plan. Serialized with a string `type` tag
/// (`"SINGLE_MEASURE"`, `"PLAY_MANY_TIMES"`, ...), which is what JavaScript
/// receives.
///
/// Every element consumes a contiguous, non-empty span of measures; the
/// spans of a plan tile the track in order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LayoutElement {
    EmptyMeasure {
        measure: usize,
    },
    SingleMeasure {
        measure: usize,
    },
    SingleRepeatedMeasure {
        measure: usize,
    },
    PlayManyTimes {
        /// Total number of times the measure is played, counting the copy
        /// that is already displayed
        amount_of_times: usize,
        /// First measure folded into this element
        first_measure: usize,
        /// Last measure folded into this element
        last_measure: usize,
    },
    RepeatedRiff {
        first_measure: usize,
        last_measure: usize,
        first_measure_to_repeat: usize,
        last_measure_to_repeat: usize,
    },
}

impl LayoutElement {
    /// Measures consumed by this element
    pub fn measures(&self) -> RangeInclusive<usize> {
        match *self {
            LayoutElement::EmptyMeasure { measure }
            | LayoutElement::SingleMeasure { measure }
            | LayoutElement::SingleRepeatedMeasure { measure } => measure..=measure,
            LayoutElement::PlayManyTimes {
                first_measure,
                last_measure,
                ..
            }
            | LayoutElement::RepeatedRiff {
                first_measure,
                last_measure,
                ..
            } => first_measure..=last_measure,
        }
    }

    pub fn first_measure(&self) -> usize {
        *self.measures().start()
    }

    pub fn last_measure(&self) -> usize {
        *self.measures().end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let element = LayoutElement::PlayManyTimes {
            amount_of_times: 3,
            first_measure: 1,
            last_measure: 2,
        };
        let json = serde_json::to_value(&element).expect("element should serialize");
        assert_eq!(json["type"], "PLAY_MANY_TIMES");
        assert_eq!(json["amount_of_times"], 3);
    }

    #[test]
    fn test_riff_measures_span() {
        let element = LayoutElement::RepeatedRiff {
            first_measure: 5,
            last_measure: 7,
            first_measure_to_repeat: 1,
            last_measure_to_repeat: 3,
        };
        assert_eq!(element.measures(), 5..=7);
    }
}
