//! Note model and the note-source abstraction
//!
//! The planner never owns the notes it lays out. It reads them through the
//! [`NoteSource`] trait, which is implemented for plain slices, vectors and
//! [`NoteTrack`] (a named, owned track as produced by the MIDI importer).

use serde::{Deserialize, Serialize};

/// String/fret pair for fretted instruments.
///
/// Only carried through to renderers; the planner never looks at it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TabPosition {
    /// String index, 0 = highest-pitched string
    pub string: u8,
    /// Fret number (negative frets are kept so renderers can flag them)
    pub fret: i32,
}

/// A single note in a track
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Note {
    /// Start position in ticks
    pub start_tick: i64,
    /// End position in ticks (exclusive)
    pub end_tick: i64,
    /// Pitch identifier (MIDI note number for imported tracks)
    pub pitch: i32,
    /// Fretboard position, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab: Option<TabPosition>,
}

impl Note {
    /// Create a note without fretboard information
    pub fn new(start_tick: i64, end_tick: i64, pitch: i32) -> Self {
        Self {
            start_tick,
            end_tick,
            pitch,
            tab: None,
        }
    }

    /// Attach a string/fret position
    pub fn with_tab(mut self, string: u8, fret: i32) -> Self {
        self.tab = Some(TabPosition { string, fret });
        self
    }

    /// Duration in ticks; may be zero or negative for malformed notes
    pub fn duration(&self) -> i64 {
        self.end_tick - self.start_tick
    }
}

/// Read-only, index-addressed view over an ordered note collection.
///
/// Notes are expected in ascending start-tick order. Implementations must
/// not reorder notes between calls.
pub trait NoteSource {
    fn note_count(&self) -> usize;

    fn start_tick(&self, index: usize) -> i64;

    fn end_tick(&self, index: usize) -> i64;

    fn pitch(&self, index: usize) -> i32;

    /// String/fret position for tablature rendering
    fn tab_position(&self, _index: usize) -> Option<TabPosition> {
        None
    }
}

impl NoteSource for [Note] {
    fn note_count(&self) -> usize {
        self.len()
    }

    fn start_tick(&self, index: usize) -> i64 {
        self[index].start_tick
    }

    fn end_tick(&self, index: usize) -> i64 {
        self[index].end_tick
    }

    fn pitch(&self, index: usize) -> i32 {
        self[index].pitch
    }

    fn tab_position(&self, index: usize) -> Option<TabPosition> {
        self[index].tab
    }
}

impl NoteSource for Vec<Note> {
    fn note_count(&self) -> usize {
        self.as_slice().note_count()
    }

    fn start_tick(&self, index: usize) -> i64 {
        self.as_slice().start_tick(index)
    }

    fn end_tick(&self, index: usize) -> i64 {
        self.as_slice().end_tick(index)
    }

    fn pitch(&self, index: usize) -> i32 {
        self.as_slice().pitch(index)
    }

    fn tab_position(&self, index: usize) -> Option<TabPosition> {
        self.as_slice().tab_position(index)
    }
}

/// An owned track of notes
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct NoteTrack {
    /// Track name (from the MIDI track name meta event, if any)
    #[serde(default)]
    pub name: Option<String>,
    /// Number of strings for tablature rendering
    #[serde(default = "default_string_count")]
    pub string_count: u8,
    /// Notes, ordered by start tick
    pub notes: Vec<Note>,
}

fn default_string_count() -> u8 {
    6
}

impl NoteTrack {
    pub fn new(notes: Vec<Note>) -> Self {
        Self {
            name: None,
            string_count: default_string_count(),
            notes,
        }
    }

    /// Stable sort by start tick, which is what the indexer expects
    pub fn sort_by_start(&mut self) {
        self.notes.sort_by_key(|n| n.start_tick);
    }
}

impl NoteSource for NoteTrack {
    fn note_count(&self) -> usize {
        self.notes.len()
    }

    fn start_tick(&self, index: usize) -> i64 {
        self.notes[index].start_tick
    }

    fn end_tick(&self, index: usize) -> i64 {
        self.notes[index].end_tick
    }

    fn pitch(&self, index: usize) -> i32 {
        self.notes[index].pitch
    }

    fn tab_position(&self, index: usize) -> Option<TabPosition> {
        self.notes[index].tab
    }
}
