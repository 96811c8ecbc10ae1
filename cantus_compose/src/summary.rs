// Compact text rendering of a song for debugging and CLI output.
//
// One row per melody, grouped under its section and layer headings. Each note
// is printed as the name of the pitch class it sounds at (instrument base
// pitch plus degree), followed by one '-' per additional whole beat it is
// held. Holds longer than `MAX_HOLD_MARKS` beats print as `-x<beats>`.
// Measures are separated by '|'.

use crate::song::Song;
use std::fmt::Write;

const MAX_HOLD_MARKS: usize = 8;

pub fn render(song: &Song) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", song.name());
    if let Some(author) = song.author() {
        let _ = writeln!(out, "  by {author}");
    }
    for section in song.sections() {
        let _ = writeln!(out, "[{} @ {} bpm]", section.name(), section.tempo());
        for (li, layer) in section.layers().iter().enumerate() {
            let layer_name = layer.name().map(str::to_string).unwrap_or_else(|| format!("Layer {}", li + 1));
            let base = layer.instrument().base_pitch();
            let _ = writeln!(out, "  {} ({})", layer_name, layer.instrument().name());
            for (mi, part) in layer.parts().iter().enumerate() {
                let melody = part.melody();
                let label = melody.name().map(str::to_string).unwrap_or_else(|| format!("#{}", mi + 1));
                let _ = write!(out, "    {:>10} {:.2}: ", label, part.dynamic());
                for (bar, measure) in melody.measures().iter().enumerate() {
                    if bar > 0 {
                        out.push('|');
                    }
                    for note in measure.notes() {
                        out.push_str(note.scale_degree().pitch_name(base));
                        let held = note.duration().floor() as usize;
                        if held > MAX_HOLD_MARKS {
                            let _ = write!(out, "-x{held}");
                        } else {
                            for _ in 1..held {
                                out.push('-');
                            }
                        }
                        out.push(' ');
                    }
                }
                out.push('\n');
            }
        }
    }
    out
}

/// Note statistics for a song.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongStats {
    pub sections: usize,
    pub layers: usize,
    pub melodies: usize,
    pub notes: usize,
    /// How many notes sit at each chromatic degree.
    pub degree_histogram: [usize; 12],
}

pub fn stats(song: &Song) -> SongStats {
    let mut degree_histogram = [0usize; 12];
    for note in song.notes() {
        degree_histogram[note.scale_degree().value() as usize] += 1;
    }
    let layers = song.sections().iter().map(|s| s.layers().len()).sum();
    let melodies = song
        .sections()
        .iter()
        .flat_map(|s| s.layers())
        .map(|l| l.parts().len())
        .sum();
    SongStats {
        sections: song.sections().len(),
        layers,
        melodies,
        notes: song.note_count(),
        degree_histogram,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Instrument;
    use crate::layer::Layer;
    use crate::melody::Melody;
    use crate::note::{Measure, Note};
    use crate::section::Section;
    use crate::types::SequentialIds;

    fn tiny_song() -> Song {
        let mut ids = SequentialIds::new();
        let instrument = Instrument::new(&mut ids, "Flute", "flute", 62).unwrap();
        let melody = Melody::new(
            &mut ids,
            vec![
                Measure::new(vec![Note::new(0, 2.0, 0).unwrap(), Note::new(5, 1.0, 2).unwrap()]),
                Measure::new(vec![Note::new(10, 1.0, 0).unwrap()]),
            ],
        )
        .named("Theme");
        let layer = Layer::from_parallel(&mut ids, instrument, vec![melody], vec![0.8])
            .unwrap()
            .named("Winds");
        let section = Section::new(&mut ids, "A", 4.0, 90.0, vec![layer]).unwrap();
        Song::new(&mut ids, "Tiny", 4.0, vec![section]).unwrap().authored_by("Me")
    }

    #[test]
    fn render_names_pitches_relative_to_base() {
        let text = render(&tiny_song());
        let expected = "Tiny\n  by Me\n[A @ 90 bpm]\n  Winds (Flute)\n         Theme 0.80: D- G |C \n";
        assert_eq!(text, expected);
    }

    #[test]
    fn long_holds_render_compactly() {
        let mut ids = SequentialIds::new();
        let instrument = Instrument::new(&mut ids, "Drone", "drone", 60).unwrap();
        let melody = Melody::new(
            &mut ids,
            vec![Measure::new(vec![
                Note::new(0, 1e15, 0).unwrap(),
                Note::new(2, 8.0, 1).unwrap(),
                Note::new(4, 9.0, 2).unwrap(),
            ])],
        );
        let layer = Layer::from_parallel(&mut ids, instrument, vec![melody], vec![1.0]).unwrap();
        let section = Section::new(&mut ids, "B", 1.0, 60.0, vec![layer]).unwrap();
        let song = Song::new(&mut ids, "Long", 1.0, vec![section]).unwrap();

        let text = render(&song);
        assert!(text.len() < 200, "render output too long: {} bytes", text.len());
        assert!(text.contains("C-x1000000000000000 "));
        assert!(text.contains("D------- "));
        assert!(text.contains("E-x9 "));
    }

    #[test]
    fn extreme_base_pitch_renders() {
        let mut ids = SequentialIds::new();
        let instrument = Instrument::new(&mut ids, "Edge", "edge", i32::MAX).unwrap();
        let melody = Melody::new(&mut ids, vec![Measure::new(vec![Note::new(11, 1.0, 0).unwrap()])]);
        let layer = Layer::from_parallel(&mut ids, instrument, vec![melody], vec![0.5]).unwrap();
        let section = Section::new(&mut ids, "C", 1.0, 60.0, vec![layer]).unwrap();
        let song = Song::new(&mut ids, "Edge", 1.0, vec![section]).unwrap();
        // i32::MAX is pitch class 7 (G); degree 11 above it is F#.
        assert!(render(&song).contains(": F# "));
    }

    #[test]
    fn stats_counts_structure_and_degrees() {
        let s = stats(&tiny_song());
        assert_eq!(s.sections, 1);
        assert_eq!(s.layers, 1);
        assert_eq!(s.melodies, 1);
        assert_eq!(s.notes, 3);
        assert_eq!(s.degree_histogram[0], 1);
        assert_eq!(s.degree_histogram[5], 1);
        assert_eq!(s.degree_histogram[10], 1);
        assert_eq!(s.degree_histogram.iter().sum::<usize>(), 3);
    }
}
