//! XML Import/Export für Streckendateien.
//!
//! Das Format nutzt "Structure of Arrays" (parallele Koordinaten-Listen in
//! XML-Tags). Persistiert werden nur Punktpuffer und Streckenbreite.

pub mod parser;
pub mod writer;

pub use parser::{parse_track_config, TrackConfig};
pub use writer::write_track_config;
