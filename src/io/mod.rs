//! Note-source adapters for external file formats

pub mod midi_import;

pub use midi_import::{import_midi, read_midi_file, ImportedSong, MidiImportError};
