//! Plain-text tablature rendering of a layout plan
//!
//! One row per string, a `|` at the start of every layout element. Single
//! measures show their frets at positions proportional to their ticks;
//! repeated elements show their caption on the middle string.

use serde::{Deserialize, Serialize};

use super::captions::{element_caption, element_char_width};
use crate::layout::LayoutPlan;
use crate::models::{LayoutElement, NoteSource, TabPosition};

/// Highest fret considered when placing notes without a tab position
pub const MAX_FRET: i32 = 24;

/// Open-string pitches, highest string first
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Tuning {
    pub open_strings: Vec<i32>,
}

impl Tuning {
    /// E A D G B E
    pub fn standard_guitar() -> Self {
        Self {
            open_strings: vec![64, 59, 55, 50, 45, 40],
        }
    }

    /// E A D G
    pub fn standard_bass() -> Self {
        Self {
            open_strings: vec![43, 38, 33, 28],
        }
    }

    pub fn string_count(&self) -> usize {
        self.open_strings.len()
    }

    /// Lowest-fret position for `pitch`; ties go to the higher string
    pub fn position_for(&self, pitch: i32) -> Option<TabPosition> {
        self.open_strings
            .iter()
            .enumerate()
            .filter_map(|(string, &open)| {
                let fret = pitch - open;
                (0..=MAX_FRET).contains(&fret).then_some((string, fret))
            })
            .min_by_key(|&(string, fret)| (fret, string))
            .map(|(string, fret)| TabPosition {
                string: string as u8,
                fret,
            })
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::standard_guitar()
    }
}

#[derive(Clone, Debug)]
pub struct TablatureRenderer {
    tuning: Tuning,
    show_measure_numbers: bool,
}

impl TablatureRenderer {
    pub fn new(tuning: Tuning) -> Self {
        Self {
            tuning,
            show_measure_numbers: true,
        }
    }

    pub fn with_measure_numbers(mut self, show: bool) -> Self {
        self.show_measure_numbers = show;
        self
    }

    /// Render `plan` as text rows: the measure-number row (if enabled)
    /// followed by one row per string
    pub fn render<S>(&self, plan: &LayoutPlan, source: &S) -> Vec<String>
    where
        S: NoteSource + ?Sized,
    {
        let string_count = self.tuning.string_count().max(1);
        let widths: Vec<usize> = (0..plan.elements.len())
            .map(|element| element_char_width(plan, element))
            .collect();
        let line_width = widths.iter().map(|w| w + 1).sum::<usize>() + 1;

        let mut header = vec![' '; line_width];
        let mut rows = vec![vec!['-'; line_width]; string_count];

        let mut start = 0;
        for (element, &width) in widths.iter().enumerate() {
            for row in rows.iter_mut() {
                row[start] = '|';
            }
            let content = start + 1..start + 1 + width;

            match plan.elements[element] {
                LayoutElement::EmptyMeasure { .. } => {}
                LayoutElement::SingleMeasure { measure } => {
                    if let Some(number) = element_caption(plan, element) {
                        write_text(&mut header, content.start, content.end, &number);
                    }
                    let measure = &plan.measures[measure];
                    let length = measure.length_in_ticks().max(1);
                    for note in measure.note_range() {
                        let position = source
                            .tab_position(note)
                            .or_else(|| self.tuning.position_for(source.pitch(note)));
                        let Some(position) = position else {
                            log::warn!("note {} (pitch {}) cannot be placed on any string", note, source.pitch(note));
                            continue;
                        };
                        let Some(row) = rows.get_mut(position.string as usize) else {
                            continue;
                        };
                        let offset = (source.start_tick(note) - measure.first_tick).clamp(0, length - 1);
                        let column = content.start + (offset as usize * (width - 1)) / length as usize;
                        write_text(row, column, content.end, &position.fret.to_string());
                    }
                }
                _ => {
                    if let Some(caption) = element_caption(plan, element) {
                        let column = content.start + width.saturating_sub(caption.len()) / 2;
                        write_text(&mut rows[(string_count - 1) / 2], column, content.end, &caption);
                    }
                }
            }

            start = content.end;
        }
        for row in rows.iter_mut() {
            row[start] = '|';
        }

        let mut lines = Vec::with_capacity(string_count + 1);
        if self.show_measure_numbers {
            lines.push(header.into_iter().collect::<String>().trim_end().to_string());
        }
        lines.extend(rows.into_iter().map(|row| row.into_iter().collect::<String>()));
        lines
    }

    pub fn render_to_string<S>(&self, plan: &LayoutPlan, source: &S) -> String
    where
        S: NoteSource + ?Sized,
    {
        self.render(plan, source).join("\n")
    }
}

impl Default for TablatureRenderer {
    fn default() -> Self {
        Self::new(Tuning::default())
    }
}

/// Overwrite `row[column..limit]` with `text`, truncating at `limit`
fn write_text(row: &mut [char], column: usize, limit: usize, text: &str) {
    for (slot, ch) in row[column.min(limit)..limit].iter_mut().zip(text.chars()) {
        *slot = ch;
    }
}
