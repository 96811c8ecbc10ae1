// Layers: one instrument playing an ordered list of parts.
//
// Each `Part` pairs a melody with its own dynamic level, so the two can never
// drift out of alignment. `Layer::from_parallel` accepts the older shape of
// two independent sequences and rejects it when their lengths differ.

use crate::compose::{BranchCompose, Compose, fan_out, par_seeded_fan_out, seeded_fan_out};
use crate::error::{ValidationError, check_finite};
use crate::instrument::Instrument;
use crate::melody::Melody;
use crate::note::Note;
use crate::types::{IdGenerator, LayerId};
use cantus_prng::RandomSource;
use log::trace;
use serde::Serialize;

/// A melody and the dynamic level it is played at (0.0 silent, 1.0 full).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    melody: Melody,
    dynamic: f64,
}

impl Part {
    pub fn new(melody: Melody, dynamic: f64) -> Result<Self, ValidationError> {
        check_finite("dynamic", dynamic)?;
        if !(0.0..=1.0).contains(&dynamic) {
            return Err(ValidationError::DynamicOutOfRange(dynamic));
        }
        Ok(Self { melody, dynamic })
    }

    pub fn melody(&self) -> &Melody {
        &self.melody
    }

    pub fn dynamic(&self) -> f64 {
        self.dynamic
    }
}

impl Compose for Part {
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        self.melody.compose(rng);
    }
}

impl BranchCompose for Part {
    fn compose_seeded(&mut self, seed: u64) {
        self.melody.compose_seeded(seed);
    }

    fn par_compose_seeded(&mut self, seed: u64) {
        self.melody.par_compose_seeded(seed);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    id: LayerId,
    name: Option<String>,
    description: Option<String>,
    instrument: Instrument,
    parts: Vec<Part>,
}

impl Layer {
    pub fn new<G: IdGenerator + ?Sized>(ids: &mut G, instrument: Instrument, parts: Vec<Part>) -> Self {
        Self {
            id: LayerId::new(ids),
            name: None,
            description: None,
            instrument,
            parts,
        }
    }

    /// Build from parallel melody and dynamics sequences, pairing them by
    /// position.
    pub fn from_parallel<G: IdGenerator + ?Sized>(
        ids: &mut G,
        instrument: Instrument,
        melodies: Vec<Melody>,
        dynamics: Vec<f64>,
    ) -> Result<Self, ValidationError> {
        if melodies.len() != dynamics.len() {
            return Err(ValidationError::DynamicsMismatch {
                melodies: melodies.len(),
                dynamics: dynamics.len(),
            });
        }
        let parts = melodies
            .into_iter()
            .zip(dynamics)
            .map(|(melody, dynamic)| Part::new(melody, dynamic))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(ids, instrument, parts))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn melodies(&self) -> impl Iterator<Item = &Melody> {
        self.parts.iter().map(Part::melody)
    }

    /// Dynamic levels in part order.
    pub fn dynamics(&self) -> Vec<f64> {
        self.parts.iter().map(Part::dynamic).collect()
    }

    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.melodies().flat_map(Melody::notes)
    }

    pub fn note_count(&self) -> usize {
        self.melodies().map(Melody::note_count).sum()
    }
}

impl Compose for Layer {
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R) {
        trace!("composing {} ({} parts)", self.id, self.parts.len());
        fan_out(&mut self.parts, rng);
    }
}

impl BranchCompose for Layer {
    fn compose_seeded(&mut self, seed: u64) {
        seeded_fan_out(&mut self.parts, seed);
    }

    fn par_compose_seeded(&mut self, seed: u64) {
        par_seeded_fan_out(&mut self.parts, seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::testing::CountingSource;
    use crate::note::Measure;
    use crate::types::SequentialIds;

    fn melody(ids: &mut SequentialIds, notes: usize) -> Melody {
        let notes = (0..notes as i64).map(|i| Note::new(0, 1.0, i).unwrap()).collect();
        Melody::new(ids, vec![Measure::new(notes)])
    }

    fn organ(ids: &mut SequentialIds) -> Instrument {
        Instrument::new(ids, "Organ", "organ.sf2", 48).unwrap()
    }

    #[test]
    fn from_parallel_pairs_by_position() {
        let mut ids = SequentialIds::new();
        let instrument = organ(&mut ids);
        let melodies = vec![melody(&mut ids, 1), melody(&mut ids, 2)];
        let layer = Layer::from_parallel(&mut ids, instrument, melodies, vec![0.8, 0.3]).unwrap();
        assert_eq!(layer.dynamics(), vec![0.8, 0.3]);
        assert_eq!(layer.parts()[1].melody().note_count(), 2);
        assert_eq!(layer.note_count(), 3);
    }

    #[test]
    fn from_parallel_rejects_length_mismatch() {
        let mut ids = SequentialIds::new();
        let instrument = organ(&mut ids);
        let melodies = vec![melody(&mut ids, 1), melody(&mut ids, 1)];
        assert_eq!(
            Layer::from_parallel(&mut ids, instrument, melodies, vec![0.5]),
            Err(ValidationError::DynamicsMismatch { melodies: 2, dynamics: 1 })
        );
    }

    #[test]
    fn part_rejects_bad_dynamics() {
        let mut ids = SequentialIds::new();
        let m = melody(&mut ids, 1);
        assert_eq!(
            Part::new(m.clone(), 1.5),
            Err(ValidationError::DynamicOutOfRange(1.5))
        );
        assert_eq!(
            Part::new(m.clone(), -0.1),
            Err(ValidationError::DynamicOutOfRange(-0.1))
        );
        assert!(matches!(
            Part::new(m.clone(), f64::NAN),
            Err(ValidationError::NonFiniteValue { .. })
        ));
        assert!(Part::new(m, 0.0).is_ok());
    }

    #[test]
    fn compose_visits_parts_in_order_and_keeps_metadata() {
        let mut ids = SequentialIds::new();
        let instrument = organ(&mut ids);
        let melodies = vec![melody(&mut ids, 2), melody(&mut ids, 3)];
        let mut layer = Layer::from_parallel(&mut ids, instrument, melodies, vec![0.8, 0.6])
            .unwrap()
            .named("Pedal")
            .described("low drone");
        let before = layer.clone();

        let mut source = CountingSource::default();
        layer.compose(&mut source);

        assert_eq!(source.draws, 5);
        let degrees: Vec<u8> = layer.notes().map(|n| n.scale_degree().value()).collect();
        assert_eq!(degrees, vec![0, 1, 2, 3, 4]);
        assert_eq!(layer.id(), before.id());
        assert_eq!(layer.name(), Some("Pedal"));
        assert_eq!(layer.description(), Some("low drone"));
        assert_eq!(layer.instrument(), before.instrument());
        assert_eq!(layer.dynamics(), before.dynamics());
    }

    #[test]
    fn empty_layer_compose_is_a_no_op() {
        let mut ids = SequentialIds::new();
        let instrument = organ(&mut ids);
        let mut layer = Layer::new(&mut ids, instrument, Vec::new());
        let mut source = CountingSource::default();
        layer.compose(&mut source);
        assert_eq!(source.draws, 0);
    }
}
