// The compose protocol shared by every node in the tree.
//
// `Compose` is the plain generative pass: a composite calls `compose` on each
// child in stored order, and a `Note` overwrites its scale degree with a fresh
// chromatic draw. Nothing else in the tree is written. Repeated passes re-roll
// the degrees; there is no "already composed" state.
//
// `BranchCompose` is the seeded variant used for reproducible and parallel
// generation. Child `i` of a node seeded with `s` is seeded with
// `branch_seed(s, i)`, down to each Melody, which composes its notes from a
// single `CantusRng` built from its own seed. Because no two melodies share a
// stream, `par_compose_seeded` can fan out across sections, layers and parts
// with rayon and still produce exactly what `compose_seeded` produces.
//
// See `note.rs` for the only leaf mutation, `melody.rs` for the seeded leaf
// of the branch scheme.

use cantus_prng::{RandomSource, branch_seed};
use rayon::prelude::*;

/// A node that can take part in a generative pass.
pub trait Compose {
    /// Run the generative pass over this node and everything below it,
    /// drawing all randomness from `rng` in left-to-right, depth-first order.
    fn compose<R: RandomSource + ?Sized>(&mut self, rng: &mut R);
}

/// Seeded composition with per-branch random streams.
pub trait BranchCompose: Compose {
    /// Compose sequentially, deriving one stream per melody from `seed`.
    fn compose_seeded(&mut self, seed: u64);

    /// Same result as `compose_seeded`, with sibling subtrees run in parallel.
    fn par_compose_seeded(&mut self, seed: u64);
}

/// Compose each child in order from a shared stream.
pub(crate) fn fan_out<T: Compose, R: RandomSource + ?Sized>(children: &mut [T], rng: &mut R) {
    for child in children {
        child.compose(rng);
    }
}

pub(crate) fn seeded_fan_out<T: BranchCompose>(children: &mut [T], seed: u64) {
    for (i, child) in children.iter_mut().enumerate() {
        child.compose_seeded(branch_seed(seed, i as u64));
    }
}

pub(crate) fn par_seeded_fan_out<T: BranchCompose + Send>(children: &mut [T], seed: u64) {
    children
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, child)| child.par_compose_seeded(branch_seed(seed, i as u64)));
}
