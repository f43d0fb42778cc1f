//! Tick/millisecond conversion at a fixed tempo.

/// Ticks per quarter note. Fixed for the whole timeline.
pub const TICKS_PER_QUARTER: u32 = 480;

const MS_PER_MINUTE: f64 = 60.0 * 1000.0;

/// Converts a duration in milliseconds to ticks at `tempo` BPM.
pub fn tempo_ms_to_tick(tempo: f64, ms: f64) -> f64 {
    tempo * f64::from(TICKS_PER_QUARTER) * ms / MS_PER_MINUTE
}

/// Converts a tick count to milliseconds at `tempo` BPM.
pub fn tempo_tick_to_ms(tempo: f64, tick: i32) -> f64 {
    MS_PER_MINUTE * f64::from(tick) / (tempo * f64::from(TICKS_PER_QUARTER))
}
