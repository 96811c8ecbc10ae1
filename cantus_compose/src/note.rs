// Notes and measures: the leaves of the composition tree.
//
// A `Note` is the only thing a compose pass ever writes to. Its timing and
// envelope are fixed at construction; its scale degree is re-rolled by every
// `compose` call. A `Measure` is an ordered bar of notes and simply passes the
// pass through to them.

use crate::compose::{Compose, fan_out};
use crate::degree::ScaleDegree;
use crate::error::{ValidationError, check_duration, check_finite};
use cantus_prng::RandomSource;
use serde::Serialize;

/// A single note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    scale_degree: ScaleDegree,
    /// Length in beats.
    duration: f64,
    /// Offset in beats from the start of the enclosing measure.
    onset: i64,
    /// Optional amplitude envelope, sampled evenly across the duration.
    envelope: Option<Vec<f64>>,
}

impl Note {
    pub fn new(scale_degree: i64, duration: f64, onset: i64) -> Result<Self, ValidationError> {
        Ok(Self {
            scale_degree: ScaleDegree::new(scale_degree)?,
            duration: check_duration("note duration", duration)?,
            onset,
            envelope: None,
        })
    }

    pub fn with_envelope(mut self, envelope: Vec<f64>) -> Result<Self, ValidationError> {
        for &level in &envelope {
            check_finite("envelope level", level)?;
        }
        self.envelope = Some(envelope);
        Ok(self)
    }

    pub fn scale_degree(&self) -> ScaleDegree {
        self.scale_degree
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn onset(&self) -> i64 {
        self.onset
    }

    pub fn envelope(&self) -> Option<&[f64]> {
        self.envelope.as_deref()
    }

    /// Re-roll the degree from `choices` instead of the chromatic range.
    pub(crate) fn compose_from<R: RandomSource + ?Sized>(
        &mut self,
        choices: &[ScaleDegree],
        rng: &mut R,
    ) {
        self.scale_degree = ScaleDegree::random_from(choices, rng);
    }
}

impl Compose for Note {
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.scale_degree = ScaleDegree::random(rng);
    }
}

/// One bar's worth of notes, in playback order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Measure {
    notes: Vec<Note>,
}

impl Measure {
    pub fn new(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub(crate) fn notes_mut(&mut self) -> &mut [Note] {
        &mut self.notes
    }

    /// Total length of the bar in beats, from the start to the end of the
    /// latest-ending note.
    pub fn span(&self) -> f64 {
        self.notes
            .iter()
            .map(|n| n.onset as f64 + n.duration)
            .fold(0.0, f64::max)
    }
}

impl Compose for Measure {
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        fan_out(&mut self.notes, rng);
    }
}
