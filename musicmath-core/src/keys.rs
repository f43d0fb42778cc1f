//! # Key Table Module
//!
//! Static data describing the twelve keys of a standard piano octave:
//! their spelling, their color on the keyboard, and the enharmonic
//! aliases accepted when parsing names back into semitones.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// Color of a key on the piano keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyColor {
    White,
    Black,
}

/// A single key within the octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInfo {
    /// Canonical spelling, always using sharps (e.g. "C#").
    pub name: &'static str,
    pub color: KeyColor,
}

const fn key(name: &'static str, color: KeyColor) -> KeyInfo {
    KeyInfo { name, color }
}

/// The twelve keys of an octave, indexed by semitone above C.
pub static KEYS_IN_OCTAVE: [KeyInfo; 12] = [
    key("C", KeyColor::White),
    key("C#", KeyColor::Black),
    key("D", KeyColor::White),
    key("D#", KeyColor::Black),
    key("E", KeyColor::White),
    key("F", KeyColor::White),
    key("F#", KeyColor::Black),
    key("G", KeyColor::White),
    key("G#", KeyColor::Black),
    key("A", KeyColor::White),
    key("A#", KeyColor::Black),
    key("B", KeyColor::White),
];

/// Spelling to semitone lookup. Several spellings share a semitone
/// (`C#` and `Db` both map to 1).
///
/// Only single flats/sharps are listed; `Cb`, `E#` and friends are not
/// accepted.
pub static NAME_IN_OCTAVE: Lazy<BTreeMap<&'static str, u8>> = Lazy::new(|| {
    [
        ("C", 0),
        ("C#", 1),
        ("Db", 1),
        ("D", 2),
        ("D#", 3),
        ("Eb", 3),
        ("E", 4),
        ("F", 5),
        ("F#", 6),
        ("Gb", 6),
        ("G", 7),
        ("G#", 8),
        ("Ab", 8),
        ("A", 9),
        ("A#", 10),
        ("Bb", 10),
        ("B", 11),
    ]
    .into_iter()
    .collect()
});

/// Movable-do syllables for the white keys. Black keys have no syllable.
pub static SOLFEGES: [Option<&str>; 12] = [
    Some("do"),
    None,
    Some("re"),
    None,
    Some("mi"),
    Some("fa"),
    None,
    Some("sol"),
    None,
    Some("la"),
    None,
    Some("ti"),
];

/// Jianpu (numbered notation) digits for the white keys.
pub static NUMBERED_NOTATIONS: [Option<&str>; 12] = [
    Some("1"), None, Some("2"), None, Some("3"), Some("4"), None, Some("5"), None, Some("6"), None,
    Some("7"),
];

/// Returns the key at a semitone position, wrapping any integer into the octave.
pub fn key_in_octave(semitone: i32) -> &'static KeyInfo {
    &KEYS_IN_OCTAVE[semitone.rem_euclid(12) as usize]
}

/// Looks up the semitone (0-11) for a key spelling such as `"Eb"`.
pub fn semitone_of(spelling: &str) -> Option<u8> {
    NAME_IN_OCTAVE.get(spelling).copied()
}
