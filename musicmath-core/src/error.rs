//! Error types for the music-math kernel.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid beat unit: {0} (expected 2, 4, 8 or 16)")]
    InvalidBeatUnit(u32),

    #[error("Tone-to-frequency map must have 128 entries, got {0}")]
    InvalidMapLength(usize),

    #[error("Failed to import tuning file {}: {source:#}", .path.display())]
    Import {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
