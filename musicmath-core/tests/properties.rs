//! Cross-module behaviour of the kernel: round-trip laws, the `.tun`
//! import scenarios and the grid/mixing reference values.
//!
//! Run with:
//! ```bash
//! cargo test -p musicmath-core --test properties
//! ```

use approx::{assert_abs_diff_eq, assert_relative_eq};
use musicmath_core::curve::{PitchPointShape, Segment};
use musicmath_core::tuning::{self, PitchStandard, TuningConfig};
use musicmath_core::{grid, mix, tone, tun, Error};

#[test]
fn test_name_roundtrip_for_every_midi_tone() {
    for t in 0..128 {
        let name = tone::tone_to_name(t, 12);
        assert_eq!(tone::name_to_tone(&name, 12), Some(t), "{name}");
    }
}

#[test]
fn test_freq_tone_roundtrip_without_table() {
    let standards = [
        PitchStandard::default(),
        PitchStandard::new(12, 415.0, 69),
        PitchStandard::new(19, 440.0, 57),
        PitchStandard::new(31, 261.63, 60),
        PitchStandard::new(5, 100.0, 0),
    ];
    for standard in standards {
        for t in -20..150 {
            let freq = tuning::tone_to_freq(t, &standard, None);
            assert_abs_diff_eq!(
                tuning::freq_to_tone(freq, &standard),
                f64::from(t),
                epsilon = 1e-9
            );

            let fractional = f64::from(t) + 0.37;
            let freq = tuning::fractional_tone_to_freq(fractional, &standard, None);
            assert_abs_diff_eq!(
                tuning::freq_to_tone(freq, &standard),
                fractional,
                epsilon = 1e-9
            );
        }
    }
}

#[test]
fn test_imported_table_drives_resolver() {
    let config = tun::parse_str("basefreq=220\n").into_config();
    let standard = config.standard();
    for t in 0..128 {
        let expected = 220.0 * 2.0_f64.powf(f64::from(t) * 100.0 / 1200.0);
        assert_relative_eq!(
            tuning::tone_to_freq(t, &standard, Some(&config)),
            expected,
            max_relative = 1e-12
        );
    }
    let between = tuning::fractional_tone_to_freq(10.5, &standard, Some(&config));
    let expected = 220.0 * 2.0_f64.powf(10.5 / 12.0);
    assert_relative_eq!(between, expected, max_relative = 1e-12);

    // Callers asking for a different standard never see the custom table.
    let a440 = PitchStandard::default();
    assert_relative_eq!(tuning::tone_to_freq(69, &a440, Some(&config)), 440.0);
}

#[test]
fn test_note69_only_import() {
    let tuning = tun::parse_str("note69=0");
    assert_eq!(tuning.concert_pitch, 440.0);
    assert_eq!(tuning.concert_pitch_note, 69);
    assert_relative_eq!(tuning.tone_to_freq_map.as_slice()[69], 440.0);
}

#[test]
fn test_custom_table_is_not_inverted() {
    let stretched = tun::parse_str("note69=6900\nnote70=7100").into_config();
    let standard = stretched.standard();
    let freq = tuning::tone_to_freq(70, &standard, Some(&stretched));
    // The formula puts this frequency two steps above tone 69, not one.
    assert_abs_diff_eq!(
        tuning::freq_to_tone(freq, &PitchStandard::default()),
        71.0,
        epsilon = 1e-9
    );
}

#[test]
fn test_config_freq_of_uses_own_standard() {
    let config = TuningConfig::default();
    assert_relative_eq!(config.freq_of(69.0), 440.0);
}

#[test]
fn test_curves_roundtrip_strictly_inside() {
    let segments = [
        Segment::new(0.0, 0.0, 1.0, 1.0),
        Segment::new(480.0, 62.0, 960.0, 69.5),
        Segment::new(-5.0, 3.0, -4.998, -7.0),
    ];
    let shapes = [
        PitchPointShape::Linear,
        PitchPointShape::EaseIn,
        PitchPointShape::EaseOut,
        PitchPointShape::EaseInOut,
    ];
    for segment in segments {
        for shape in shapes {
            for step in 1..10 {
                let y = segment.y0 + (segment.y1 - segment.y0) * f64::from(step) / 10.0;
                let x = shape.invert(&segment, y);
                assert_relative_eq!(
                    shape.interpolate(&segment, x),
                    y,
                    epsilon = 1e-9,
                    max_relative = 1e-9
                );
            }
        }
    }
}

#[test]
fn test_snap_reference_values() {
    assert_eq!(
        grid::snap_unit(480, 60.0, false),
        grid::SnapUnit { ticks: 60, div: 32 }
    );
    let divs = grid::snap_divisions(480);
    assert_eq!(divs[0], 4);
    let triplet_start = divs.iter().position(|&d| d == 6).unwrap();
    assert!(divs[..triplet_start].iter().all(|d| d % 3 != 0));
    assert!(divs[triplet_start..].iter().all(|d| d % 3 == 0));
}

#[test]
fn test_zoom_rejects_beat_unit_3() {
    assert!(matches!(
        grid::zoom_ratio(40.0, 3, 3, 8.0),
        Err(Error::InvalidBeatUnit(3))
    ));
}

#[test]
fn test_mix_reference_values() {
    assert_eq!(mix::pan_to_channel_volumes(0.0), (-1.0, -1.0));
    assert_eq!(mix::pan_to_channel_volumes(100.0), (0.0, -1.0));
    assert_eq!(mix::pan_to_channel_volumes(-100.0), (-1.0, 0.0));
    for v in [0.001, 0.5, 2.0] {
        assert_relative_eq!(
            mix::decibel_to_linear(mix::linear_to_decibel(v)),
            v,
            max_relative = 1e-12
        );
    }
}
