// Data-driven generator configuration.
//
// `GeneratorConfig` is loaded from JSON by the `generate` binary. Every field
// has a default, so a config file only needs to name what it changes. The
// skeleton parameters describe the shape of the uncomposed song that
// `skeleton.rs` builds; `seed` and `parallel` control the compose pass.
//
// Values are not validated here. `build_skeleton` runs them through the
// ordinary node constructors, which reject anything structurally invalid.

use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Root seed for the branch-seeded compose pass. `None` means the caller
    /// picks one (the binary derives it from the clock and prints it).
    pub seed: Option<u64>,
    /// Compose sibling subtrees on the rayon thread pool.
    pub parallel: bool,
    pub skeleton: SkeletonConfig,
}

/// Shape of the song to build before composing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonConfig {
    pub song_name: String,
    pub author: Option<String>,
    pub sections: usize,
    pub layers_per_section: usize,
    pub melodies_per_layer: usize,
    pub measures_per_melody: usize,
    pub notes_per_measure: usize,
    /// Beats per minute for every section.
    pub tempo: f64,
    /// Length of each note in beats.
    pub note_duration: f64,
    /// Dynamic level given to every part.
    pub dynamic: f64,
    pub instrument: InstrumentConfig,
    /// Degrees attached to each melody as its scale.
    pub scale: Option<Vec<i64>>,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            song_name: "Untitled".to_string(),
            author: None,
            sections: 3,
            layers_per_section: 2,
            melodies_per_layer: 1,
            measures_per_melody: 4,
            notes_per_measure: 4,
            tempo: 96.0,
            note_duration: 1.0,
            dynamic: 0.8,
            instrument: InstrumentConfig::default(),
            scale: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentConfig {
    pub name: String,
    pub sound: String,
    pub base_pitch: i32,
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self {
            name: "Piano".to_string(),
            sound: "piano".to_string(),
            base_pitch: 60,
        }
    }
}

impl GeneratorConfig {
    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config = Self::from_json(&data)?;
        info!("loaded generator config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.seed, None);
        assert!(!config.parallel);
        assert_eq!(config.skeleton.sections, 3);
    }

    #[test]
    fn partial_override() {
        let json = r#"{
            "seed": 17,
            "parallel": true,
            "skeleton": { "sections": 1, "instrument": { "base_pitch": 45 } }
        }"#;
        let config = GeneratorConfig::from_json(json).unwrap();
        assert_eq!(config.seed, Some(17));
        assert!(config.parallel);
        assert_eq!(config.skeleton.sections, 1);
        assert_eq!(config.skeleton.layers_per_section, 2);
        assert_eq!(config.skeleton.instrument.base_pitch, 45);
        assert_eq!(config.skeleton.instrument.name, "Piano");
    }

    #[test]
    fn json_roundtrip() {
        let config = GeneratorConfig {
            seed: Some(3),
            skeleton: SkeletonConfig {
                scale: Some(vec![0, 2, 4, 7, 9]),
                ..SkeletonConfig::default()
            },
            ..GeneratorConfig::default()
        };
        let back = GeneratorConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn load_reports_missing_file() {
        assert!(GeneratorConfig::load(Path::new("/nonexistent/cantus.json")).is_err());
    }
}
