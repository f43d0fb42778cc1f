//! # Tuning Settings Module
//!
//! The edit flow for project tuning: a [`TuningSettings`] draft collects
//! changes (typed parameters or an imported tuning file), and
//! [`TuningSettings::apply`] turns them into a reversible
//! [`ConfigureTuning`] command for the document's undo history.
//!
//! A command holds complete before/after snapshots and installs either one
//! with a single assignment, so a half-updated configuration is never
//! observable.

use crate::error::{Error, Result};
use crate::tun;
use crate::tuning::{PitchStandard, ToneFreqMap, TuningConfig};
use std::fmt;
use std::path::Path;
use tracing::{debug, error};

/// Draft of the project tuning as edited in the settings dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningSettings {
    pub equal_temperament: i32,
    pub concert_pitch: f64,
    pub concert_pitch_note: i32,
    /// A table staged by [`TuningSettings::load_tun`], if any.
    pub staged_map: Option<ToneFreqMap>,
}

impl TuningSettings {
    /// Seeds the draft from the current project configuration.
    pub fn from_config(config: &TuningConfig) -> Self {
        Self {
            equal_temperament: config.equal_temperament,
            concert_pitch: config.concert_pitch,
            concert_pitch_note: config.concert_pitch_note,
            staged_map: None,
        }
    }

    pub fn standard(&self) -> PitchStandard {
        PitchStandard::new(
            self.equal_temperament,
            self.concert_pitch,
            self.concert_pitch_note,
        )
    }

    /// Imports a tuning file into the draft.
    ///
    /// On success the draft's parameters are replaced with the imported ones
    /// and the table is staged. On failure the draft is left untouched and
    /// the error is returned for the caller to show as a notification.
    pub fn load_tun(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let imported = tun::import_file(path).map_err(|source| {
            error!(path = %path.display(), "tuning import failed: {source:#}");
            Error::Import {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let config = imported.into_config();
        self.equal_temperament = config.equal_temperament;
        self.concert_pitch = config.concert_pitch;
        self.concert_pitch_note = config.concert_pitch_note;
        self.staged_map = config.tone_to_freq_map;
        debug!(path = %path.display(), "staged imported tuning");
        Ok(())
    }

    /// Builds the command that installs this draft over `current`.
    ///
    /// Returns `None` when nothing would change: every parameter equals the
    /// current one and no table is staged.
    pub fn apply(&self, current: &TuningConfig) -> Option<ConfigureTuning> {
        let unchanged = current.standard() == self.standard() && self.staged_map.is_none();
        if unchanged {
            return None;
        }
        Some(ConfigureTuning::new(
            current,
            self.standard(),
            self.staged_map.clone(),
        ))
    }
}

/// Reversible replacement of the project tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigureTuning {
    old: TuningConfig,
    new: TuningConfig,
}

impl ConfigureTuning {
    /// Captures `current` as the old snapshot and builds the new one.
    ///
    /// A supplied `map` is installed as is. Without one, the table is
    /// regenerated from the formula, or cleared when the temperament is not
    /// a positive number of divisions.
    pub fn new(current: &TuningConfig, standard: PitchStandard, map: Option<ToneFreqMap>) -> Self {
        let mut new = TuningConfig::from_standard(standard);
        new.tone_to_freq_map = match map {
            Some(map) => Some(map),
            None if standard.equal_temperament > 0 => Some(new.formula_map()),
            None => None,
        };
        Self {
            old: current.clone(),
            new,
        }
    }

    pub fn old(&self) -> &TuningConfig {
        &self.old
    }

    pub fn new_config(&self) -> &TuningConfig {
        &self.new
    }

    pub fn execute(&self, config: &mut TuningConfig) {
        debug!(
            equal_temperament = self.new.equal_temperament,
            concert_pitch = self.new.concert_pitch,
            "configure tuning"
        );
        *config = self.new.clone();
    }

    pub fn unexecute(&self, config: &mut TuningConfig) {
        debug!(
            equal_temperament = self.old.equal_temperament,
            concert_pitch = self.old.concert_pitch,
            "revert tuning"
        );
        *config = self.old.clone();
    }
}

impl fmt::Display for ConfigureTuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configure project")
    }
}
