//! # Tuning File Import
//!
//! Reads the line-oriented `.tun` tuning description and turns it into a
//! 128-entry frequency table.
//!
//! ## Format
//! ```text
//! ; comment
//! basefreq = 8.1757989156
//! note0 = 0
//! note1 = 100.5
//! ...
//! ```
//! - `noteN` (`N` in `0..128`) gives the cents offset of tone `N` from the
//!   base frequency. Tones without an entry keep `N * 100`.
//! - `basefreq` is the frequency of zero cents, in Hz. When absent it is
//!   derived so that tone 69 sounds at 440 Hz.
//! - Numbers always use `.` as the decimal separator.
//! - Comment lines, blank lines, unknown keys and malformed values are skipped.

use crate::tuning::{MAP_LEN, ToneFreqMap, TuningConfig};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Tone whose frequency becomes the imported concert pitch.
pub const CONCERT_PITCH_NOTE: i32 = 69;

/// Concert pitch assumed when the file gives no `basefreq`.
pub const DEFAULT_CONCERT_PITCH: f64 = 440.0;

/// Temperament value marking a custom, non-equal tuning.
pub const CUSTOM_TEMPERAMENT: i32 = 0;

/// Result of parsing a tuning file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedTuning {
    /// Cents offset of every tone from `base_freq`.
    pub cents: [f64; MAP_LEN],
    /// Frequency of zero cents in Hz.
    pub base_freq: f64,
    /// Frequency of tone 69 in Hz.
    pub concert_pitch: f64,
    pub concert_pitch_note: i32,
    pub tone_to_freq_map: ToneFreqMap,
}

impl ImportedTuning {
    /// Converts the import into a project configuration flagged as custom
    /// (`equal_temperament == 0`).
    pub fn into_config(self) -> TuningConfig {
        TuningConfig {
            equal_temperament: CUSTOM_TEMPERAMENT,
            concert_pitch: self.concert_pitch,
            concert_pitch_note: self.concert_pitch_note,
            tone_to_freq_map: Some(self.tone_to_freq_map),
        }
    }
}

enum Entry {
    Note(usize, f64),
    BaseFreq(f64),
}

/// Interprets one line, returning `None` for anything that is not a usable entry.
fn parse_line(line: &str) -> Option<Entry> {
    if line.starts_with(';') || line.trim().is_empty() {
        return None;
    }

    let mut parts = line.split('=');
    let (key, value) = match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => (key.trim(), value.trim()),
        _ => {
            debug!(line, "skipping line without a single key=value pair");
            return None;
        }
    };

    if let Some(index) = key.strip_prefix("note") {
        let tone = index.trim().parse::<usize>().ok().filter(|&n| n < MAP_LEN)?;
        match value.parse::<f64>() {
            Ok(cents) if cents.is_finite() => Some(Entry::Note(tone, cents)),
            _ => {
                debug!(key, value, "ignoring malformed cents value");
                None
            }
        }
    } else if key == "basefreq" {
        match value.parse::<f64>() {
            Ok(freq) if freq > 0.0 && freq.is_finite() => Some(Entry::BaseFreq(freq)),
            _ => {
                debug!(value, "ignoring malformed basefreq");
                None
            }
        }
    } else {
        None
    }
}

/// Parses tuning-file lines into a frequency table.
///
/// Parsing never fails: every unusable line is skipped and the affected
/// value keeps its default.
pub fn parse_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> ImportedTuning {
    let mut cents: [f64; MAP_LEN] = std::array::from_fn(|i| i as f64 * 100.0);
    let mut base_freq = None;
    let mut overrides = 0usize;

    for line in lines {
        match parse_line(line) {
            Some(Entry::Note(tone, value)) => {
                cents[tone] = value;
                overrides += 1;
            }
            Some(Entry::BaseFreq(freq)) => base_freq = Some(freq),
            None => {}
        }
    }

    let concert_offset = 2.0_f64.powf(cents[CONCERT_PITCH_NOTE as usize] / 1200.0);
    let (base_freq, concert_pitch) = match base_freq {
        Some(base) => (base, base * concert_offset),
        None => (DEFAULT_CONCERT_PITCH / concert_offset, DEFAULT_CONCERT_PITCH),
    };
    let tone_to_freq_map =
        ToneFreqMap::from_fn(|tone| base_freq * 2.0_f64.powf(cents[tone] / 1200.0));

    debug!(overrides, base_freq, concert_pitch, "parsed tuning table");

    ImportedTuning {
        cents,
        base_freq,
        concert_pitch,
        concert_pitch_note: CONCERT_PITCH_NOTE,
        tone_to_freq_map,
    }
}

/// Parses the full text of a tuning file.
pub fn parse_str(text: &str) -> ImportedTuning {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    parse_lines(text.lines())
}

/// Reads and parses a tuning file from disk.
///
/// # Returns
/// * `Ok(tuning)` - Parsed table
/// * `Err(e)` - The file could not be read or is not valid UTF-8
pub fn import_file(path: impl AsRef<Path>) -> Result<ImportedTuning> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tuning file {}", path.display()))?;
    Ok(parse_str(&text))
}
