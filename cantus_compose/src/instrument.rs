// Instrument records: a named sound source with a base pitch.

use crate::error::ValidationError;
use crate::types::{IdGenerator, InstrumentId};
use serde::Serialize;

/// An immutable description of a sound source.
///
/// `sound` is an opaque reference (sample path, patch name) resolved by
/// whatever renders the finished song. `base_pitch` is the MIDI-style note
/// number that scale degree 0 sounds at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Instrument {
    id: InstrumentId,
    name: String,
    sound: String,
    base_pitch: i32,
}

impl Instrument {
    pub fn new<G: IdGenerator + ?Sized>(
        ids: &mut G,
        name: impl Into<String>,
        sound: impl Into<String>,
        base_pitch: i32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName("instrument"));
        }
        Ok(Self {
            id: InstrumentId::new(ids),
            name,
            sound: sound.into(),
            base_pitch,
        })
    }

    pub fn id(&self) -> InstrumentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sound(&self) -> &str {
        &self.sound
    }

    pub fn base_pitch(&self) -> i32 {
        self.base_pitch
    }
}
