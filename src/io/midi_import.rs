//! Standard MIDI File import
//!
//! Reads an SMF into note tracks plus the measure boundaries implied by its
//! resolution and first time signature, ready for [`plan_layout`].
//!
//! [`plan_layout`]: crate::layout::plan_layout

use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use num_rational::Ratio;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::models::{BarTable, Note, NoteTrack};

#[derive(Debug, Error)]
pub enum MidiImportError {
    #[error("midi parse error: {0}")]
    Parse(String),
    #[error("SMPTE timecode timing is not supported, only metrical timing")]
    TimecodeTiming,
    #[error("invalid time signature {numerator}/{denominator}")]
    InvalidTimeSignature { numerator: u8, denominator: u32 },
    #[error("track {0} not found")]
    MissingTrack(usize),
    #[error("failed to read midi file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MidiImportError>;

/// Everything the planner needs from one MIDI file
#[derive(Clone, Debug)]
pub struct ImportedSong {
    /// Ticks per quarter note
    pub ticks_per_beat: i64,
    /// Time signature as (numerator, denominator)
    pub time_signature: (u8, u32),
    /// Tracks holding at least one note, in file order
    pub tracks: Vec<NoteTrack>,
    /// Measures covering every note of every track
    pub boundaries: BarTable,
}

impl ImportedSong {
    pub fn track(&self, index: usize) -> Result<&NoteTrack> {
        self.tracks.get(index).ok_or(MidiImportError::MissingTrack(index))
    }

    pub fn measure_length(&self) -> i64 {
        // checked on import
        measure_length(self.ticks_per_beat, self.time_signature).unwrap_or(0)
    }
}

/// Read and import a MIDI file from disk
pub fn read_midi_file(path: impl AsRef<Path>) -> Result<ImportedSong> {
    let data = std::fs::read(path)?;
    import_midi(&data)
}

/// Import SMF bytes
pub fn import_midi(bytes: &[u8]) -> Result<ImportedSong> {
    let smf = Smf::parse(bytes).map_err(|e| MidiImportError::Parse(e.to_string()))?;

    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int() as i64,
        Timing::Timecode(_, _) => return Err(MidiImportError::TimecodeTiming),
    };
    if ticks_per_beat == 0 {
        return Err(MidiImportError::Parse("zero ticks per beat".to_string()));
    }

    let time_signature = first_time_signature(&smf)?;
    let length = measure_length(ticks_per_beat, time_signature)?;

    let mut tracks = Vec::new();
    for (index, track) in smf.tracks.iter().enumerate() {
        let note_track = collect_notes(index, track);
        if !note_track.notes.is_empty() {
            tracks.push(note_track);
        }
    }

    let song_end = tracks
        .iter()
        .flat_map(|track| track.notes.iter().map(|note| note.end_tick.max(note.start_tick + 1)))
        .max()
        .unwrap_or(0);
    let measure_count = ((song_end + length - 1) / length) as usize;
    let boundaries = BarTable::from_lengths(ticks_per_beat, &vec![length; measure_count]);

    log::info!(
        "imported {} track(s), {} measure(s) of {}/{} at {} ticks per beat",
        tracks.len(),
        measure_count,
        time_signature.0,
        time_signature.1,
        ticks_per_beat
    );

    Ok(ImportedSong {
        ticks_per_beat,
        time_signature,
        tracks,
        boundaries,
    })
}

/// Ticks per measure. Time signatures whose measure is not a positive whole
/// number of ticks at this resolution are rejected.
fn measure_length(ticks_per_beat: i64, (numerator, denominator): (u8, u32)) -> Result<i64> {
    let length = Ratio::new(ticks_per_beat * 4 * numerator as i64, denominator as i64);
    if !length.is_integer() || length.to_integer() < 1 {
        return Err(MidiImportError::InvalidTimeSignature {
            numerator,
            denominator,
        });
    }
    Ok(length.to_integer())
}

/// First time signature meta event in any track, 4/4 when there is none
fn first_time_signature(smf: &Smf) -> Result<(u8, u32)> {
    for track in &smf.tracks {
        for event in track {
            if let TrackEventKind::Meta(MetaMessage::TimeSignature(numerator, power, _, _)) = event.kind {
                let denominator = 1u32.checked_shl(power as u32).unwrap_or(0);
                if numerator == 0 || denominator == 0 {
                    return Err(MidiImportError::InvalidTimeSignature {
                        numerator,
                        denominator,
                    });
                }
                return Ok((numerator, denominator));
            }
        }
    }
    Ok((4, 4))
}

/// Pair note-on/note-off events of one track into notes sorted by start
fn collect_notes(index: usize, track: &[midly::TrackEvent]) -> NoteTrack {
    let mut notes = Vec::new();
    let mut name = None;
    // (channel, key) -> start ticks of notes still sounding, oldest first
    let mut sounding: HashMap<(u8, u8), Vec<i64>> = HashMap::new();
    let mut tick = 0i64;

    for event in track {
        tick += event.delta.as_int() as i64;

        match event.kind {
            TrackEventKind::Midi { channel, message } => {
                let (key, starts) = match message {
                    MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => (key, true),
                    MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => (key, false),
                    _ => continue,
                };
                let slot = (channel.as_int(), key.as_int());
                if starts {
                    sounding.entry(slot).or_default().push(tick);
                } else if let Some(starts) = sounding.get_mut(&slot) {
                    if !starts.is_empty() {
                        let start = starts.remove(0);
                        notes.push(Note::new(start, tick, key.as_int() as i32));
                    }
                }
            }
            TrackEventKind::Meta(MetaMessage::TrackName(raw)) => {
                if let Ok(text) = std::str::from_utf8(raw) {
                    let cleaned = text.trim_end_matches('\0').trim();
                    if !cleaned.is_empty() {
                        name = Some(cleaned.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    let unterminated: usize = sounding.values().map(Vec::len).sum();
    if unterminated > 0 {
        log::warn!(
            "track {}: {} note(s) never released, closing them at tick {}",
            index,
            unterminated,
            tick
        );
        for ((_, key), starts) in sounding {
            for start in starts {
                notes.push(Note::new(start, tick, key as i32));
            }
        }
    }

    let mut track = NoteTrack::new(notes);
    track.name = name;
    // ties broken by pitch so chords come out in a fixed order
    track.notes.sort_by_key(|note| (note.start_tick, note.pitch));
    track
}
