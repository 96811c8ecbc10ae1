// Songs: the root of the composition tree.
//
// A compose pass is normally started here and cascades Section -> Layer ->
// Part -> Melody -> Measure -> Note. Only note degrees change.

use crate::compose::{BranchCompose, Compose, fan_out, par_seeded_fan_out, seeded_fan_out};
use crate::error::{ValidationError, check_duration};
use crate::note::Note;
use crate::section::Section;
use crate::types::{IdGenerator, SongId};
use cantus_prng::RandomSource;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    id: SongId,
    name: String,
    description: Option<String>,
    author: Option<String>,
    /// Length in seconds.
    duration: f64,
    sections: Vec<Section>,
}

impl Song {
    pub fn new<G: IdGenerator + ?Sized>(
        ids: &mut G,
        name: impl Into<String>,
        duration: f64,
        sections: Vec<Section>,
    ) -> Result<Self, ValidationError> {
        let duration = check_duration("song duration", duration)?;
        Ok(Self {
            id: SongId::new(ids),
            name: name.into(),
            description: None,
            author: None,
            duration,
            sections,
        })
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn authored_by(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn id(&self) -> SongId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.sections.iter().flat_map(Section::notes)
    }

    pub fn note_count(&self) -> usize {
        self.sections.iter().map(Section::note_count).sum()
    }
}

impl Compose for Song {
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        debug!(
            "composing song '{}' ({} sections, {} notes)",
            self.name,
            self.sections.len(),
            self.note_count()
        );
        fan_out(&mut self.sections, rng);
    }
}

impl BranchCompose for Song {
    fn compose_seeded(&mut self, seed: u64) {
        debug!("seeded compose of '{}' (seed {seed})", self.name);
        seeded_fan_out(&mut self.sections, seed);
    }

    fn par_compose_seeded(&mut self, seed: u64) {
        debug!("parallel seeded compose of '{}' (seed {seed})", self.name);
        par_seeded_fan_out(&mut self.sections, seed);
    }
}
