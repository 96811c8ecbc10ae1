// Melodies: ordered measures plus an optional scale.
//
// The scale is carried but `compose` never consults it: every note draws from
// the full chromatic range. `compose_within_scale` is the explicit opt-in that
// restricts draws to the scale's degrees. Callers choose which pass to run;
// the default pass stays chromatic.
//
// In the branch-seeded scheme (see `compose.rs`) the melody is the leaf of
// seed derivation: it builds one `CantusRng` from its seed and composes all of
// its notes from that stream in order.

use crate::compose::{BranchCompose, Compose, fan_out};
use crate::degree::{CHROMATIC_DEGREES, ScaleDegree};
use crate::error::ValidationError;
use crate::note::{Measure, Note};
use crate::types::{IdGenerator, MelodyId};
use cantus_prng::{CantusRng, RandomSource};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Melody {
    id: MelodyId,
    name: Option<String>,
    measures: Vec<Measure>,
    scale: Option<Vec<ScaleDegree>>,
}

impl Melody {
    pub fn new<G: IdGenerator + ?Sized>(ids: &mut G, measures: Vec<Measure>) -> Self {
        Self {
            id: MelodyId::new(ids),
            name: None,
            measures,
            scale: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a scale. Degrees must be in `0..12` and distinct.
    pub fn with_scale(mut self, degrees: &[i64]) -> Result<Self, ValidationError> {
        if degrees.is_empty() {
            return Err(ValidationError::EmptyScale);
        }
        let mut seen = [false; CHROMATIC_DEGREES as usize];
        let mut scale = Vec::with_capacity(degrees.len());
        for &d in degrees {
            let degree = ScaleDegree::new(d)?;
            if std::mem::replace(&mut seen[degree.value() as usize], true) {
                return Err(ValidationError::DuplicateDegree(degree.value()));
            }
            scale.push(degree);
        }
        self.scale = Some(scale);
        Ok(self)
    }

    pub fn id(&self) -> MelodyId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn scale(&self) -> Option<&[ScaleDegree]> {
        self.scale.as_deref()
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.measures.iter().flat_map(|m| m.notes())
    }

    pub fn note_count(&self) -> usize {
        self.measures.iter().map(|m| m.notes().len()).sum()
    }

    /// Compose like `compose`, but draw each degree from this melody's scale.
    /// Without a scale this is the plain chromatic pass.
    pub fn compose_within_scale<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        let Some(scale) = self.scale.as_deref() else {
            self.compose(rng);
            return;
        };
        for measure in &mut self.measures {
            for note in measure.notes_mut() {
                note.compose_from(scale, rng);
            }
        }
    }
}

impl Compose for Melody {
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        fan_out(&mut self.measures, rng);
    }
}

impl BranchCompose for Melody {
    fn compose_seeded(&mut self, seed: u64) {
        self.compose(&mut CantusRng::new(seed));
    }

    fn par_compose_seeded(&mut self, seed: u64) {
        self.compose_seeded(seed);
    }
}
