//! # Timeline Grid Module
//!
//! Grid subdivisions for the piano-roll time axis.
//!
//! A *division* is the denominator of the grid note: 4 is quarter notes,
//! 8 eighths, 6 triplet quarters and so on. `resolution` is always ticks per
//! quarter note, so one division spans `resolution * 4 / div` ticks.
//! Resolutions above `u32::MAX / 4` are treated as `u32::MAX / 4`.

use crate::error::{Error, Result};

/// Display ratios (in quarter notes) from coarsest to finest.
pub static ZOOM_RATIOS: [f64; 9] = [
    4.0, 2.0, 1.0, 0.5, 0.25, 0.125, 0.0625, 0.031_25, 0.015_625,
];

/// Starting division of the straight chain.
const QUARTER_DIV: u32 = 4;
/// Starting division of the triplet chain.
const TRIPLET_DIV: u32 = 6;

/// A grid step length in ticks together with its division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapUnit {
    pub ticks: u32,
    pub div: u32,
}

/// Yields `start_div` and every doubling of it that still spans a whole
/// number of ticks.
fn division_chain(resolution: u32, start_div: u32) -> impl Iterator<Item = u32> {
    let mut ticks = resolution.saturating_mul(4) / start_div;
    let mut div = start_div;
    std::iter::once(start_div).chain(std::iter::from_fn(move || {
        if ticks == 0 || ticks % 2 != 0 {
            return None;
        }
        ticks /= 2;
        div = div.saturating_mul(2);
        Some(div)
    }))
}

/// All snap divisions usable at `resolution`.
///
/// The straight chain (4, 8, 16, ...) comes first, followed by the triplet
/// chain (6, 12, 24, ...). The result is not sorted.
pub fn snap_divisions(resolution: u32) -> Vec<u32> {
    division_chain(resolution, QUARTER_DIV)
        .chain(division_chain(resolution, TRIPLET_DIV))
        .collect()
}

/// Picks the finest grid whose step is still at least `min_ticks` long.
///
/// Starts from quarter notes (or triplet quarters) and keeps halving the
/// step while it divides evenly and the half would not fall below
/// `min_ticks`.
pub fn snap_unit(resolution: u32, min_ticks: f64, triplet: bool) -> SnapUnit {
    let mut div = if triplet { TRIPLET_DIV } else { QUARTER_DIV };
    let mut ticks = resolution.saturating_mul(4) / div;
    while ticks > 0 && ticks % 2 == 0 && f64::from(ticks / 2) >= min_ticks {
        ticks /= 2;
        div = div.saturating_mul(2);
    }
    SnapUnit { ticks, div }
}

/// Chooses which grid level is drawn for the current horizontal zoom.
///
/// # Arguments
/// * `quarter_width` - Width of one quarter note in pixels
/// * `beats_per_bar` - Time signature numerator
/// * `beat_unit` - Time signature denominator, one of 2, 4, 8 or 16
/// * `min_width` - Narrowest grid cell worth drawing, in pixels
///
/// # Returns
/// * `Ok(ratio)` - Grid cell length in quarter notes
/// * `Err(Error::InvalidBeatUnit)` - `beat_unit` is not supported
///
/// If even a whole bar is no wider than `min_width`, the grid collapses to
/// whole bars. Otherwise the finest level whose cell stays strictly wider
/// than `min_width` is chosen.
pub fn zoom_ratio(
    quarter_width: f64,
    beats_per_bar: u32,
    beat_unit: u32,
    min_width: f64,
) -> Result<f64> {
    let mut level: isize = match beat_unit {
        2 => 0,
        4 => 1,
        8 => 2,
        16 => 3,
        other => return Err(Error::InvalidBeatUnit(other)),
    };

    // With four or more beats per bar the level below the bar is half a bar.
    if beats_per_bar % 4 == 0 {
        level -= 1;
    }

    if quarter_width * f64::from(beats_per_bar) * 4.0 <= min_width * f64::from(beat_unit) {
        return Ok(f64::from(beats_per_bar) / f64::from(beat_unit) * 4.0);
    }

    while let Some(finer) = ratio_at(level + 1) {
        if quarter_width * finer <= min_width {
            break;
        }
        level += 1;
    }

    Ok(match usize::try_from(level) {
        Ok(i) => ZOOM_RATIOS[i],
        // Half of a 4/2-style bar, one step coarser than the table.
        Err(_) => ZOOM_RATIOS[0] * 2.0,
    })
}

fn ratio_at(level: isize) -> Option<f64> {
    let i = usize::try_from(level).ok()?;
    ZOOM_RATIOS.get(i).copied()
}
