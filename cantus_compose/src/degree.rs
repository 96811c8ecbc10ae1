// Chromatic scale degrees.
//
// A `ScaleDegree` is a single pitch-class index in `0..12`, counted in
// semitones above the owning instrument's base pitch. Every note holds exactly
// one; the compose pass overwrites it with a fresh uniform draw.

use crate::error::ValidationError;
use cantus_prng::RandomSource;
use serde::Serialize;
use std::fmt;

/// Number of degrees in the chromatic scale.
pub const CHROMATIC_DEGREES: u8 = 12;

const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// A chromatic scale degree in `0..12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct ScaleDegree(u8);

impl ScaleDegree {
    pub const TONIC: ScaleDegree = ScaleDegree(0);

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (0..CHROMATIC_DEGREES as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::DegreeOutOfRange(value))
        }
    }

    /// Draw a degree uniformly from the full chromatic range.
    pub fn random<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        Self(rng.range_u8(0, CHROMATIC_DEGREES))
    }

    /// Draw a degree uniformly from `choices`. Panics on an empty slice.
    pub fn random_from<R: RandomSource + ?Sized>(choices: &[ScaleDegree], rng: &mut R) -> Self {
        choices[rng.range_usize(0, choices.len())]
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Pitch class (0 = C) this degree sounds at above `base_pitch`,
    /// where `base_pitch` is a MIDI-style note number.
    pub fn pitch_class(self, base_pitch: i32) -> u8 {
        let octave = CHROMATIC_DEGREES as i32;
        ((base_pitch.rem_euclid(octave) + self.0 as i32) % octave) as u8
    }

    /// Note name of the sounding pitch class above `base_pitch`.
    pub fn pitch_name(self, base_pitch: i32) -> &'static str {
        PITCH_CLASS_NAMES[self.pitch_class(base_pitch) as usize]
    }
}

impl fmt::Display for ScaleDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
