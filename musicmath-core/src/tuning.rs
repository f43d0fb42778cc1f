//! # Musical Tuning Module
//!
//! Converts tones (integer or fractional) to frequencies and back.
//!
//! Three representations of tuning are supported:
//! - Pure formulaic equal temperament (`concert_pitch * 2^((tone - note) / N)`)
//! - A per-project table of 128 frequencies, one per tone index
//! - A custom, non-equal table imported from a tuning file (see [`crate::tun`])
//!
//! The table is only consulted when the caller's pitch standard matches the
//! configuration exactly, and any lookup the table cannot answer (out of
//! range, non-positive entries) falls back to the formula.
//!
//! ## Asymmetry
//! [`freq_to_tone`] is always formulaic. No general inverse exists for an
//! arbitrary table, so a tone resolved through a custom table will not in
//! general round-trip through [`freq_to_tone`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// Number of tone indices covered by a frequency table.
pub const MAP_LEN: usize = 128;

/// Fractional parts below this snap to the lower table entry.
const FRACTION_EPSILON: f64 = 1e-6;

/// Equal-temperament parameters used by the closed-form conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchStandard {
    /// Number of equal divisions of the octave.
    pub equal_temperament: i32,
    /// Frequency in Hz of `concert_pitch_note`.
    pub concert_pitch: f64,
    /// Tone index that sounds at `concert_pitch`.
    pub concert_pitch_note: i32,
}

impl Default for PitchStandard {
    /// 12-TET with A4 (tone 69) at 440 Hz.
    fn default() -> Self {
        Self {
            equal_temperament: 12,
            concert_pitch: 440.0,
            concert_pitch_note: 69,
        }
    }
}

impl PitchStandard {
    pub fn new(equal_temperament: i32, concert_pitch: f64, concert_pitch_note: i32) -> Self {
        Self {
            equal_temperament,
            concert_pitch,
            concert_pitch_note,
        }
    }

    /// Ratio between two adjacent tones, `2^(1/N)`.
    fn step_ratio(&self) -> f64 {
        2.0_f64.powf(1.0 / self.equal_temperament as f64)
    }

    /// Closed-form frequency of a (possibly fractional) tone.
    pub fn freq_of(&self, tone: f64) -> f64 {
        self.concert_pitch * self.step_ratio().powf(tone - self.concert_pitch_note as f64)
    }

    /// Closed-form tone of a frequency. Inverse of [`PitchStandard::freq_of`].
    pub fn tone_of(&self, freq: f64) -> f64 {
        (freq / self.concert_pitch).log(self.step_ratio()) + self.concert_pitch_note as f64
    }
}

/// A table of exactly [`MAP_LEN`] frequencies, indexed by tone.
///
/// Entries are expected to be positive and non-decreasing. That is not
/// enforced here; the resolver skips entries it cannot use.
///
/// Cloning shares the underlying storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct ToneFreqMap(Arc<[f64]>);

impl ToneFreqMap {
    /// Wraps a table, rejecting any length other than [`MAP_LEN`].
    pub fn new(freqs: Vec<f64>) -> Result<Self> {
        if freqs.len() != MAP_LEN {
            return Err(Error::InvalidMapLength(freqs.len()));
        }
        Ok(Self(freqs.into()))
    }

    /// Builds a table by evaluating `f` at every tone index.
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Self {
        Self((0..MAP_LEN).map(f).collect())
    }

    pub fn get(&self, tone: usize) -> Option<f64> {
        self.0.get(tone).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<f64>> for ToneFreqMap {
    type Error = Error;

    fn try_from(freqs: Vec<f64>) -> Result<Self> {
        Self::new(freqs)
    }
}

impl From<ToneFreqMap> for Vec<f64> {
    fn from(map: ToneFreqMap) -> Self {
        map.0.to_vec()
    }
}

/// The tuning settings of a project.
///
/// Owned by the document layer; the kernel only reads it. Replacing it is
/// done as a whole through [`crate::settings::ConfigureTuning`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Divisions of the octave. `12` enables key names; `0` marks a
    /// custom, unevenly divided tuning.
    pub equal_temperament: i32,
    pub concert_pitch: f64,
    pub concert_pitch_note: i32,
    pub tone_to_freq_map: Option<ToneFreqMap>,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self::from_standard(PitchStandard::default())
    }
}

impl TuningConfig {
    /// A formulaic configuration with no frequency table.
    pub fn from_standard(standard: PitchStandard) -> Self {
        Self {
            equal_temperament: standard.equal_temperament,
            concert_pitch: standard.concert_pitch,
            concert_pitch_note: standard.concert_pitch_note,
            tone_to_freq_map: None,
        }
    }

    pub fn standard(&self) -> PitchStandard {
        PitchStandard::new(
            self.equal_temperament,
            self.concert_pitch,
            self.concert_pitch_note,
        )
    }

    /// Builds the table the formula would produce for this configuration.
    pub fn formula_map(&self) -> ToneFreqMap {
        let standard = self.standard();
        ToneFreqMap::from_fn(|tone| standard.freq_of(tone as f64))
    }

    /// Frequency of a tone under this configuration's own standard.
    pub fn freq_of(&self, tone: f64) -> f64 {
        fractional_tone_to_freq(tone, &self.standard(), Some(self))
    }

    /// Returns the table if this configuration may answer for `standard`.
    fn table_for(&self, standard: &PitchStandard) -> Option<&[f64]> {
        let matches = self.equal_temperament == standard.equal_temperament
            && self.concert_pitch == standard.concert_pitch
            && self.concert_pitch_note == standard.concert_pitch_note;
        if !matches {
            return None;
        }
        self.tone_to_freq_map.as_ref().map(ToneFreqMap::as_slice)
    }
}

fn usable(freq: f64) -> bool {
    freq > 0.0 && freq.is_finite()
}

/// Resolves an integer tone to a frequency in Hz.
///
/// Uses the configured table when `config` matches `standard` and the tone
/// lies in `[0, 128)`; otherwise evaluates the closed form.
///
/// # Arguments
/// * `tone` - Tone index
/// * `standard` - Temperament and concert pitch the caller expects
/// * `config` - Current project tuning, if any
pub fn tone_to_freq(tone: i32, standard: &PitchStandard, config: Option<&TuningConfig>) -> f64 {
    let table = config.and_then(|c| c.table_for(standard));
    if let Some(table) = table {
        let entry = usize::try_from(tone).ok().and_then(|i| table.get(i));
        if let Some(&freq) = entry {
            if usable(freq) {
                return freq;
            }
            trace!(tone, freq, "unusable table entry, using formula");
        }
    }
    standard.freq_of(tone as f64)
}

/// Resolves a fractional tone to a frequency in Hz.
///
/// Between two table entries the frequency is interpolated geometrically,
/// `f(lo) * (f(lo+1) / f(lo))^frac`, so pitch moves evenly in cents rather
/// than in Hz. If either neighbour is not a positive frequency, or `lo + 1`
/// is past the end of the table, the closed form is used instead.
pub fn fractional_tone_to_freq(
    tone: f64,
    standard: &PitchStandard,
    config: Option<&TuningConfig>,
) -> f64 {
    let table = config.and_then(|c| c.table_for(standard));
    if let Some(table) = table {
        if tone >= 0.0 && tone < (table.len() - 1) as f64 {
            let lo = tone.floor();
            let fraction = tone - lo;
            let f1 = table[lo as usize];
            let f2 = table[lo as usize + 1];
            if fraction < FRACTION_EPSILON && usable(f1) {
                return f1;
            }
            if usable(f1) && usable(f2) {
                return f1 * (f2 / f1).powf(fraction);
            }
            trace!(tone, f1, f2, "unusable table entries, using formula");
        }
    }
    standard.freq_of(tone)
}

/// Converts a frequency to a fractional tone using the closed form only.
///
/// The configured table is never consulted; see the module docs.
pub fn freq_to_tone(freq: f64, standard: &PitchStandard) -> f64 {
    standard.tone_of(freq)
}

/// Nearest whole tone to a frequency.
pub fn nearest_tone(freq: f64, standard: &PitchStandard) -> i32 {
    freq_to_tone(freq, standard).round() as i32
}

/// Calculates the interval between two frequencies in cents.
///
/// - 100 cents = 1 semitone
/// - 1200 cents = 1 octave
/// - Positive values mean `freq` is above `reference`
pub fn cents_between(freq: f64, reference: f64) -> f64 {
    1200.0 * (freq / reference).log2()
}
