// Sections: a span of the song with its own tempo and stack of layers.

use crate::compose::{BranchCompose, Compose, fan_out, par_seeded_fan_out, seeded_fan_out};
use crate::error::{ValidationError, check_duration, check_finite};
use crate::layer::Layer;
use crate::note::Note;
use crate::types::{IdGenerator, SectionId};
use cantus_prng::RandomSource;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    id: SectionId,
    name: String,
    description: Option<String>,
    /// Length in seconds.
    duration: f64,
    /// Beats per minute.
    tempo: f64,
    layers: Vec<Layer>,
}

impl Section {
    pub fn new<G: IdGenerator + ?Sized>(
        ids: &mut G,
        name: impl Into<String>,
        duration: f64,
        tempo: f64,
        layers: Vec<Layer>,
    ) -> Result<Self, ValidationError> {
        let duration = check_duration("section duration", duration)?;
        if check_finite("tempo", tempo)? <= 0.0 {
            return Err(ValidationError::InvalidTempo(tempo));
        }
        Ok(Self {
            id: SectionId::new(ids),
            name: name.into(),
            description: None,
            duration,
            tempo,
            layers,
        })
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> SectionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.layers.iter().flat_map(Layer::notes)
    }

    pub fn note_count(&self) -> usize {
        self.layers.iter().map(Layer::note_count).sum()
    }
}

impl Compose for Section {
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        debug!("composing section '{}' ({} layers)", self.name, self.layers.len());
        fan_out(&mut self.layers, rng);
    }
}

impl BranchCompose for Section {
    fn compose_seeded(&mut self, seed: u64) {
        seeded_fan_out(&mut self.layers, seed);
    }

    fn par_compose_seeded(&mut self, seed: u64) {
        par_seeded_fan_out(&mut self.layers, seed);
    }
}
