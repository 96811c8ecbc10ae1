// Skeleton building: an uncomposed song of a requested shape.
//
// Authoring tools normally hand the composer a partly filled tree. For the
// `generate` binary and for benchmarks we build one from a `SkeletonConfig`
// instead: every note starts at the tonic, notes are laid end to end inside
// each measure, and every layer gets its own copy of the configured
// instrument. All invariants are enforced by the node constructors.

use crate::config::SkeletonConfig;
use crate::degree::ScaleDegree;
use crate::error::ValidationError;
use crate::instrument::Instrument;
use crate::layer::{Layer, Part};
use crate::melody::Melody;
use crate::note::{Measure, Note};
use crate::section::Section;
use crate::song::Song;
use crate::types::IdGenerator;

/// Build an uncomposed song. Ids are drawn depth-first, children before
/// their parent, so a `SequentialIds` run is fully predictable.
pub fn build_skeleton<G: IdGenerator + ?Sized>(
    config: &SkeletonConfig,
    ids: &mut G,
) -> Result<Song, ValidationError> {
    // Float arithmetic: oversized counts become an infinite duration, which
    // `Section::new` rejects, instead of overflowing.
    let beats_per_section =
        config.measures_per_melody as f64 * config.notes_per_measure as f64 * config.note_duration;
    let section_seconds = if config.tempo > 0.0 {
        beats_per_section * 60.0 / config.tempo
    } else {
        0.0
    };

    let mut sections = Vec::new();
    for s in 0..config.sections {
        let mut layers = Vec::new();
        for l in 0..config.layers_per_section {
            let instrument = Instrument::new(
                ids,
                config.instrument.name.as_str(),
                config.instrument.sound.as_str(),
                config.instrument.base_pitch,
            )?;
            let mut parts = Vec::new();
            for m in 0..config.melodies_per_layer {
                let melody = build_melody(config, ids)?.named(format!("Melody {}", m + 1));
                parts.push(Part::new(melody, config.dynamic)?);
            }
            layers.push(Layer::new(ids, instrument, parts).named(format!("Layer {}", l + 1)));
        }
        sections.push(Section::new(
            ids,
            format!("Section {}", s + 1),
            section_seconds,
            config.tempo,
            layers,
        )?);
    }

    let song = Song::new(
        ids,
        config.song_name.as_str(),
        section_seconds * config.sections as f64,
        sections,
    )?;
    Ok(match &config.author {
        Some(author) => song.authored_by(author.as_str()),
        None => song,
    })
}

fn build_melody<G: IdGenerator + ?Sized>(
    config: &SkeletonConfig,
    ids: &mut G,
) -> Result<Melody, ValidationError> {
    let mut measures = Vec::new();
    for _ in 0..config.measures_per_melody {
        let notes = (0..config.notes_per_measure)
            .map(|i| {
                let onset = (i as f64 * config.note_duration).floor() as i64;
                Note::new(ScaleDegree::TONIC.value() as i64, config.note_duration, onset)
            })
            .collect::<Result<Vec<_>, _>>()?;
        measures.push(Measure::new(notes));
    }
    let melody = Melody::new(ids, measures);
    match &config.scale {
        Some(scale) => melody.with_scale(scale),
        None => Ok(melody),
    }
}
