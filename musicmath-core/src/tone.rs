//! # Tone Naming Module
//!
//! Converts between tone numbers and key names such as `"C4"` or `"Eb2"`.
//!
//! Names only exist under 12-tone equal temperament. Every other
//! division of the octave (including the custom-tuning sentinel `0`)
//! renders tones as plain numbers and parses numbers back.
//!
//! Tone 60 is `C4` and tone 69 is `A4`, the usual MIDI convention.

use crate::keys::{self, KeyColor, NUMBERED_NOTATIONS, SOLFEGES};

/// The temperament under which key names and colors are defined.
pub const STANDARD_TEMPERAMENT: i32 = 12;

/// Renders a tone as a display name.
///
/// Under 12-TET this is the key name followed by the octave number;
/// negative tones have no name and yield an empty string. Other
/// temperaments render the tone number itself.
///
/// # Arguments
/// * `tone` - Tone number
/// * `equal_temperament` - Number of equal divisions of the octave
///
/// # Returns
/// * Name such as `"C4"`, `""` for negative 12-TET tones, or `"61"` otherwise
pub fn tone_to_name(tone: i32, equal_temperament: i32) -> String {
    if equal_temperament == STANDARD_TEMPERAMENT {
        if tone < 0 {
            return String::new();
        }
        let octave = tone / 12 - 1;
        return format!("{}{}", keys::key_in_octave(tone).name, octave);
    }
    tone.to_string()
}

/// Parses a display name back into a tone number.
///
/// Under 12-TET the name is a one- or two-character key spelling (two
/// when the second character is `#` or `b`) followed by an integer octave.
/// Other temperaments expect a bare integer.
///
/// Returns `None` when the spelling is unknown, the octave or number does
/// not parse, the tone would not fit in an `i32`, or a 12-TET name is
/// shorter than two characters.
pub fn name_to_tone(name: &str, equal_temperament: i32) -> Option<i32> {
    if equal_temperament != STANDARD_TEMPERAMENT {
        return name.parse().ok();
    }

    let mut chars = name.char_indices();
    let (_, first) = chars.next()?;
    let (second_at, second) = chars.next()?;
    let split = if second == '#' || second == 'b' {
        second_at + second.len_utf8()
    } else {
        first.len_utf8()
    };

    let (spelling, octave) = name.split_at(split);
    let octave: i32 = octave.parse().ok()?;
    let in_octave = keys::semitone_of(spelling)?;
    octave
        .checked_add(1)?
        .checked_mul(12)?
        .checked_add(i32::from(in_octave))
}

/// True only for the black keys of a 12-TET keyboard.
pub fn is_black_key(tone: i32, equal_temperament: i32) -> bool {
    equal_temperament == STANDARD_TEMPERAMENT
        && keys::key_in_octave(tone).color == KeyColor::Black
}

/// True when the tone falls on an octave boundary of its temperament
/// (every C under 12-TET).
///
/// A non-positive temperament has no octave boundaries, so this is `false`.
pub fn is_center_key(tone: i32, equal_temperament: i32) -> bool {
    equal_temperament > 0 && tone.rem_euclid(equal_temperament) == 0
}

/// Solfege syllable (`"do"` .. `"ti"`) for a white key under 12-TET.
pub fn solfege(tone: i32, equal_temperament: i32) -> Option<&'static str> {
    if equal_temperament != STANDARD_TEMPERAMENT {
        return None;
    }
    SOLFEGES[tone.rem_euclid(12) as usize]
}

/// Numbered-notation digit (`"1"` .. `"7"`) for a white key under 12-TET.
pub fn numbered_notation(tone: i32, equal_temperament: i32) -> Option<&'static str> {
    if equal_temperament != STANDARD_TEMPERAMENT {
        return None;
    }
    NUMBERED_NOTATIONS[tone.rem_euclid(12) as usize]
}
