use std::ops::Range;

/// Collective-communication seam of the preconditioner. Every method is a
/// collective call: all ranks of the world must enter it in the same order
/// with consistent arguments. A distributed build plugs an MPI-backed world
/// in here; the serial world below covers the single-process case and the
/// test emulations.
pub trait Communicator<F> {
    fn rank(&self) -> usize;

    fn size(&self) -> usize;

    /// Gathers the local lists of all ranks on the root. The root receives
    /// the concatenation in rank order, every other rank an empty list.
    fn gather(&self, local: &[(usize, F)]) -> Vec<(usize, F)>;

    /// Broadcasts the root's list to every rank.
    fn broadcast(&self, local: &[(usize, F)]) -> Vec<(usize, F)>;
}

/// Single-process world: rank 0 of 1, gather and broadcast are copies.
pub struct SerialWorld;

impl<F: Clone> Communicator<F> for SerialWorld {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn gather(&self, local: &[(usize, F)]) -> Vec<(usize, F)> {
        local.to_vec()
    }

    fn broadcast(&self, local: &[(usize, F)]) -> Vec<(usize, F)> {
        local.to_vec()
    }
}

/// Contiguous block of the global flat index range owned by `rank`. The
/// blocks of all ranks partition `0..dimension`.
pub fn local_range(dimension: usize, rank: usize, size: usize) -> Range<usize> {
    let begin = rank * dimension / size;
    let end = (rank + 1) * dimension / size;
    begin..end
}
