//! Index sources for random sampling.
//!
//! Any `rand::Rng` is an `IndexSource`, so callers normally pass
//! `rand::rng()`. `ScriptedIndices` replays a fixed sequence, which
//! makes sampling queries reproducible.

use rand::Rng;

/// Something that picks indices into a collection.
pub trait IndexSource {
    /// Return an index in `0..len`. `len` is never zero.
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> IndexSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.random_range(0..len)
    }
}

/// Replays a fixed list of indices, wrapping around when exhausted.
///
/// Each index is reduced modulo the requested length.
#[derive(Debug, Clone)]
pub struct ScriptedIndices {
    indices: Vec<usize>,
    position: usize,
}

impl ScriptedIndices {
    pub fn new(indices: Vec<usize>) -> Self {
        Self {
            indices,
            position: 0,
        }
    }
}

impl IndexSource for ScriptedIndices {
    fn pick_index(&mut self, len: usize) -> usize {
        if self.indices.is_empty() {
            return 0;
        }
        let index = self.indices[self.position % self.indices.len()];
        self.position += 1;
        index % len
    }
}
