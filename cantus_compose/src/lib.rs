// Cantus composer
//
// Models a piece of music as an owned tree, Song -> Section -> Layer ->
// Part (melody + dynamic) -> Melody -> Measure -> Note, and runs a generative
// pass that assigns every note a fresh chromatic scale degree. The pass is a
// pure top-down fan-out: composites only forward to their children in stored
// order, and the note's degree is the single field ever mutated.
//
// Architecture:
// - types.rs: UUID and typed entity ids, the `IdGenerator` dependency
// - error.rs: `ValidationError`, raised only at construction time
// - degree.rs: `ScaleDegree` (0..12) and pitch-class naming
// - instrument.rs, note.rs, melody.rs, layer.rs, section.rs, song.rs: the
//   node types and their `Compose` implementations
// - compose.rs: `Compose` / `BranchCompose` traits and fan-out helpers
// - config.rs: JSON generator configuration
// - skeleton.rs: builds an uncomposed song from a `SkeletonConfig`
// - summary.rs: text rendering and statistics
//
// All randomness comes from a caller-supplied `RandomSource` (see the
// `cantus_prng` crate), and all ids from a caller-supplied `IdGenerator`, so
// output is reproducible given a seed.

pub mod compose;
pub mod config;
pub mod degree;
pub mod error;
pub mod instrument;
pub mod layer;
pub mod melody;
pub mod note;
pub mod section;
pub mod skeleton;
pub mod song;
pub mod summary;
pub mod types;

pub use compose::{BranchCompose, Compose};
pub use error::ValidationError;
