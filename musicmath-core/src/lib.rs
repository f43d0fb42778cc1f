// musicmath-core/src/lib.rs

//! The music-theory and acoustic-math kernel behind the piano-roll editor.
//! Converts between tone numbers, key names and frequencies under equal
//! or custom tunings, imports `.tun` tuning tables, plans timeline grid
//! subdivisions, converts ticks to milliseconds and evaluates the shaped
//! curves used by pitch and automation lines.
//!
//! The crate is headless and stateless: the project tuning is always passed
//! in explicitly as a [`TuningConfig`], never looked up globally.

pub mod curve;
pub mod error;
pub mod grid;
pub mod keys;
pub mod mix;
pub mod settings;
pub mod timing;
pub mod tone;
pub mod tun;
pub mod tuning;

pub use curve::{PitchPointShape, Segment};
pub use error::{Error, Result};
pub use grid::SnapUnit;
pub use keys::{KeyColor, KeyInfo};
pub use settings::{ConfigureTuning, TuningSettings};
pub use tun::ImportedTuning;
pub use tuning::{PitchStandard, ToneFreqMap, TuningConfig};
